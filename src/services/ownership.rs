use serde::Deserialize;

/// The object shape a populated creator reference may carry. Older rows
/// used `_id`, newer ones `id`; both must resolve.
#[derive(Debug, Deserialize)]
struct CreatorRef {
    #[serde(default)]
    id: Option<String>,
    #[serde(default, rename = "_id")]
    legacy_id: Option<String>,
}

/// Normalize a raw `created_by` value to a creator id.
///
/// Two historical shapes are supported: a bare id string and a serialized
/// object containing an id field. Anything else - null, empty, malformed
/// JSON, object without an id - returns `None`, the no-owner sentinel.
/// `None` compares equal to no principal id, so ownership checks against
/// malformed data fail closed instead of accidentally matching.
pub fn resolve_creator_id(raw: Option<&str>) -> Option<String> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }

    if raw.starts_with('{') {
        let parsed: CreatorRef = serde_json::from_str(raw).ok()?;
        return parsed
            .id
            .or(parsed.legacy_id)
            .filter(|id| !id.trim().is_empty());
    }

    Some(raw.to_string())
}

/// True when the raw creator value resolves to the given principal id.
pub fn is_creator(raw: Option<&str>, principal_id: &str) -> bool {
    match resolve_creator_id(raw) {
        Some(owner) => owner == principal_id,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_id_resolves_as_is() {
        assert_eq!(resolve_creator_id(Some("u1")), Some("u1".to_string()));
    }

    #[test]
    fn populated_object_resolves_to_same_id_as_bare_form() {
        let bare = resolve_creator_id(Some("u1"));
        let object = resolve_creator_id(Some(r#"{"id":"u1","email":"a@b.c"}"#));
        assert_eq!(bare, object);
    }

    #[test]
    fn legacy_underscore_id_key_is_accepted() {
        assert_eq!(
            resolve_creator_id(Some(r#"{"_id":"u2","name":"Someone"}"#)),
            Some("u2".to_string())
        );
    }

    #[test]
    fn missing_value_yields_no_owner() {
        assert_eq!(resolve_creator_id(None), None);
        assert_eq!(resolve_creator_id(Some("")), None);
        assert_eq!(resolve_creator_id(Some("   ")), None);
    }

    #[test]
    fn malformed_values_fail_closed() {
        assert_eq!(resolve_creator_id(Some("{not json")), None);
        assert_eq!(resolve_creator_id(Some(r#"{"email":"a@b.c"}"#)), None);
        assert_eq!(resolve_creator_id(Some(r#"{"id":""}"#)), None);
    }

    #[test]
    fn no_owner_never_matches_a_principal() {
        assert!(!is_creator(None, "u1"));
        assert!(!is_creator(Some(""), "u1"));
        assert!(is_creator(Some("u1"), "u1"));
        assert!(!is_creator(Some("u2"), "u1"));
    }
}
