/// A point-in-time view of a gated resource, loaded once per mutating call.
///
/// Ownership is resolved from this snapshot and the conditional write is
/// guarded by its `updated_at`, so the record that was authorized is the
/// record that gets mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceSnapshot {
    pub id: String,

    /// Raw creator value as persisted. Two historical shapes exist: a bare
    /// id string and a serialized object carrying an id field. Normalized
    /// by the ownership resolver, never compared directly.
    pub created_by: Option<String>,

    pub is_active: bool,
    pub updated_at: i64,
}
