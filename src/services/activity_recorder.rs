use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate};

use crate::errors::internal::AuditError;
use crate::errors::InternalError;
use crate::stores::activity_store::{ActivityStore, PageInfo};
use crate::types::db::activity_record;
use crate::types::internal::audit::{ActionKind, ActivityEntry, ActivityFilter, ResourceKind};

/// Front door for the activity log.
///
/// Appends are best-effort by policy: a failed write is logged at warn
/// level and swallowed, never blocking the business mutation that
/// triggered it. Queries propagate errors normally.
pub struct ActivityRecorder {
    store: Arc<ActivityStore>,
}

impl ActivityRecorder {
    pub fn new(store: Arc<ActivityStore>) -> Self {
        Self { store }
    }

    /// Append one record. Returns the persisted row on success and `None`
    /// when the write failed and was swallowed.
    pub async fn record(&self, entry: ActivityEntry) -> Option<activity_record::Model> {
        let action = entry.action;
        let resource_kind = entry.resource_kind;
        match self.store.append(entry).await {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(
                    action = action.as_str(),
                    resource_kind = resource_kind.as_str(),
                    "activity record dropped: {}",
                    e
                );
                None
            }
        }
    }

    /// Filtered, paginated view of the log, most recent first.
    pub async fn list(
        &self,
        filter: &ActivityFilter,
        page: u64,
        limit: u64,
    ) -> Result<(Vec<activity_record::Model>, PageInfo), InternalError> {
        self.store.list(filter, page, limit).await
    }
}

/// Parse the caller-facing filter fields into an [`ActivityFilter`].
///
/// Empty strings and `None` mean "no filter". Dates accept full RFC 3339
/// timestamps or plain `YYYY-MM-DD` dates; a bare end date covers the
/// whole day.
pub fn parse_filter(
    action: Option<&str>,
    resource: Option<&str>,
    actor_id: Option<&str>,
    start_date: Option<&str>,
    end_date: Option<&str>,
) -> Result<ActivityFilter, InternalError> {
    let action = match non_empty(action) {
        Some(raw) => Some(
            ActionKind::from_str(raw).map_err(AuditError::InvalidFilter)?,
        ),
        None => None,
    };

    let resource_kind = match non_empty(resource) {
        Some(raw) => Some(
            ResourceKind::from_str(raw).map_err(AuditError::InvalidFilter)?,
        ),
        None => None,
    };

    let start = match non_empty(start_date) {
        Some(raw) => Some(parse_bound(raw, false)?),
        None => None,
    };
    let end = match non_empty(end_date) {
        Some(raw) => Some(parse_bound(raw, true)?),
        None => None,
    };

    Ok(ActivityFilter {
        action,
        resource_kind,
        actor_id: non_empty(actor_id).map(|s| s.to_string()),
        start,
        end,
    })
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(|s| s.trim()).filter(|s| !s.is_empty())
}

fn parse_bound(raw: &str, is_end: bool) -> Result<i64, InternalError> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.timestamp());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        let time = if is_end {
            date.and_hms_opt(23, 59, 59)
        } else {
            date.and_hms_opt(0, 0, 0)
        };
        if let Some(naive) = time {
            return Ok(naive.and_utc().timestamp());
        }
    }
    Err(AuditError::InvalidFilter(format!("unparseable date: {}", raw)).into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_and_empty_fields_are_no_ops() {
        let filter = parse_filter(None, Some(""), Some("  "), None, None).unwrap();
        assert!(filter.action.is_none());
        assert!(filter.resource_kind.is_none());
        assert!(filter.actor_id.is_none());
        assert!(filter.start.is_none());
        assert!(filter.end.is_none());
    }

    #[test]
    fn action_and_resource_tags_parse() {
        let filter =
            parse_filter(Some("CREATE"), Some("PROPERTY"), Some("u1"), None, None).unwrap();
        assert_eq!(filter.action, Some(ActionKind::Create));
        assert_eq!(filter.resource_kind, Some(ResourceKind::Property));
        assert_eq!(filter.actor_id.as_deref(), Some("u1"));
    }

    #[test]
    fn unknown_action_is_rejected() {
        assert!(parse_filter(Some("FROBNICATE"), None, None, None, None).is_err());
    }

    #[test]
    fn plain_end_date_covers_the_whole_day() {
        let filter =
            parse_filter(None, None, None, Some("2026-01-01"), Some("2026-01-01")).unwrap();
        let start = filter.start.unwrap();
        let end = filter.end.unwrap();
        assert_eq!(end - start, 86_399);
    }

    #[test]
    fn rfc3339_timestamps_parse() {
        let filter =
            parse_filter(None, None, None, Some("2026-01-01T12:00:00Z"), None).unwrap();
        assert!(filter.start.is_some());
    }
}
