//! Organization-wide activity timeline assembly (PRD-27).
//!
//! Merges audit entries, document submissions, and acknowledgments into a
//! single reverse-chronological feed for the admin dashboard. The `core`
//! crate contains no database dependencies; each source collection is
//! pre-loaded and passed in by the caller.

use serde::Serialize;

use crate::audit::action_types;
use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Action phrases
// ---------------------------------------------------------------------------

/// Known action kinds and their human-readable phrases.
const ACTION_PHRASES: &[(&str, &str)] = &[
    (action_types::STAFF_CREATED, "added a staff member"),
    (action_types::STAFF_UPDATED, "updated a staff profile"),
    (action_types::STAFF_DEACTIVATED, "deactivated a staff member"),
    (action_types::ITEM_CREATED, "created an assignment"),
    (action_types::ITEM_UPDATED, "updated an assignment"),
    (action_types::ITEM_DELETED, "removed an assignment"),
    (action_types::DOCUMENT_SUBMITTED, "submitted a document"),
    (action_types::DOCUMENT_APPROVED, "approved a document"),
    (action_types::DOCUMENT_ACKNOWLEDGED, "acknowledged a document"),
    (action_types::TRAINING_STARTED, "started a training module"),
    (action_types::TRAINING_COMPLETED, "completed a training module"),
];

/// Convert an action kind to its display phrase.
///
/// Unknown action kinds pass through as their raw label.
pub fn describe_action(action: &str) -> &str {
    for &(kind, phrase) in ACTION_PHRASES {
        if kind == action {
            return phrase;
        }
    }
    action
}

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// The source a timeline entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    Audit,
    Submission,
    Acknowledgment,
}

/// A raw event from one of the timeline sources.
#[derive(Debug, Clone)]
pub struct TimelineEvent {
    pub id: DbId,
    pub action: String,
    /// Display name of the acting staff member, when known.
    pub actor: Option<String>,
    pub timestamp: Timestamp,
}

/// One rendered entry in the merged activity feed.
#[derive(Debug, Clone, Serialize)]
pub struct ActivityEntry {
    pub id: DbId,
    #[serde(rename = "type")]
    pub entry_type: ActivityType,
    pub description: String,
    pub timestamp: Timestamp,
}

// ---------------------------------------------------------------------------
// Merge
// ---------------------------------------------------------------------------

fn describe(event: &TimelineEvent) -> String {
    let phrase = describe_action(&event.action);
    match &event.actor {
        Some(name) => format!("{name} {phrase}"),
        None => phrase.to_string(),
    }
}

/// Merge the three timeline sources into one feed, newest first.
///
/// All entries are concatenated (audit, then submissions, then
/// acknowledgments) and stable-sorted by timestamp descending, so entries
/// with equal timestamps keep that source order. The result is truncated
/// to `limit` entries; a zero limit is a caller bug and is rejected.
pub fn merge_activity_timeline(
    audit: &[TimelineEvent],
    submissions: &[TimelineEvent],
    acknowledgments: &[TimelineEvent],
    limit: usize,
) -> Result<Vec<ActivityEntry>, CoreError> {
    if limit == 0 {
        return Err(CoreError::Validation(
            "Activity timeline limit must be greater than zero".to_string(),
        ));
    }

    let mut entries: Vec<ActivityEntry> =
        Vec::with_capacity(audit.len() + submissions.len() + acknowledgments.len());

    let sources = [
        (audit, ActivityType::Audit),
        (submissions, ActivityType::Submission),
        (acknowledgments, ActivityType::Acknowledgment),
    ];
    for (events, entry_type) in sources {
        for event in events {
            entries.push(ActivityEntry {
                id: event.id,
                entry_type,
                description: describe(event),
                timestamp: event.timestamp,
            });
        }
    }

    // Vec::sort_by is stable: equal timestamps keep concatenation order.
    entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    entries.truncate(limit);

    Ok(entries)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::{TimeZone, Utc};

    use super::*;

    fn event(id: DbId, action: &str, at_secs: i64) -> TimelineEvent {
        TimelineEvent {
            id,
            action: action.to_string(),
            actor: None,
            timestamp: Utc.timestamp_opt(at_secs, 0).unwrap(),
        }
    }

    // -- describe_action ----------------------------------------------------

    #[test]
    fn known_action_maps_to_phrase() {
        assert_eq!(
            describe_action(action_types::DOCUMENT_SUBMITTED),
            "submitted a document"
        );
        assert_eq!(
            describe_action(action_types::TRAINING_COMPLETED),
            "completed a training module"
        );
    }

    #[test]
    fn unknown_action_passes_through() {
        assert_eq!(describe_action("handbook_exported"), "handbook_exported");
    }

    #[test]
    fn actor_is_prefixed_to_phrase() {
        let mut ev = event(1, action_types::STAFF_CREATED, 100);
        ev.actor = Some("Priya Nair".to_string());
        let merged = merge_activity_timeline(&[ev], &[], &[], 10).unwrap();
        assert_eq!(merged[0].description, "Priya Nair added a staff member");
    }

    // -- merge_activity_timeline --------------------------------------------

    #[test]
    fn zero_limit_rejected() {
        let result = merge_activity_timeline(&[], &[], &[], 0);
        assert_matches!(result, Err(CoreError::Validation(_)));
    }

    #[test]
    fn empty_sources_yield_empty_feed() {
        let merged = merge_activity_timeline(&[], &[], &[], 10).unwrap();
        assert!(merged.is_empty());
    }

    #[test]
    fn entries_sorted_newest_first() {
        let audit = vec![event(1, action_types::STAFF_CREATED, 100)];
        let submissions = vec![event(2, action_types::DOCUMENT_SUBMITTED, 300)];
        let acks = vec![event(3, action_types::DOCUMENT_ACKNOWLEDGED, 200)];

        let merged = merge_activity_timeline(&audit, &submissions, &acks, 10).unwrap();
        let ids: Vec<DbId> = merged.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn equal_timestamps_keep_source_order() {
        // Same timestamp in all three sources: audit wins, then submission,
        // then acknowledgment, matching concatenation order.
        let audit = vec![event(1, action_types::ITEM_CREATED, 500)];
        let submissions = vec![event(2, action_types::DOCUMENT_SUBMITTED, 500)];
        let acks = vec![event(3, action_types::DOCUMENT_ACKNOWLEDGED, 500)];

        let merged = merge_activity_timeline(&audit, &submissions, &acks, 10).unwrap();
        let types: Vec<ActivityType> = merged.iter().map(|e| e.entry_type).collect();
        assert_eq!(
            types,
            vec![
                ActivityType::Audit,
                ActivityType::Submission,
                ActivityType::Acknowledgment,
            ]
        );
    }

    #[test]
    fn result_truncated_to_limit() {
        let audit: Vec<TimelineEvent> = (0..5)
            .map(|i| event(i, action_types::STAFF_UPDATED, 100 + i))
            .collect();
        let merged = merge_activity_timeline(&audit, &[], &[], 3).unwrap();
        assert_eq!(merged.len(), 3);
        // Newest three survive.
        assert_eq!(merged[0].id, 4);
        assert_eq!(merged[2].id, 2);
    }

    #[test]
    fn entry_type_serializes_snake_case() {
        let json = serde_json::to_string(&ActivityType::Acknowledgment).unwrap();
        assert_eq!(json, "\"acknowledgment\"");
    }

    #[test]
    fn entry_serializes_type_field() {
        let merged = merge_activity_timeline(
            &[event(1, action_types::STAFF_CREATED, 100)],
            &[],
            &[],
            1,
        )
        .unwrap();
        let json = serde_json::to_value(&merged[0]).unwrap();
        assert_eq!(json["type"], "audit");
        assert_eq!(json["description"], "added a staff member");
    }
}
