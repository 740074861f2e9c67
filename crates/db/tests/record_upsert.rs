//! Integration tests for the completion-record repository.
//!
//! Exercises the upsert paths against a real database:
//! - One row per (item, staff) pair no matter how writes interleave
//! - Completion timestamp stamping rules
//! - Approval requiring a prior record
//! - Timeline event queries

use sqlx::PgPool;
use staffhub_db::models::item::CreateItem;
use staffhub_db::models::record::{SubmitDocument, UpdateTrainingProgress};
use staffhub_db::models::staff::CreateStaff;
use staffhub_db::repositories::{ItemRepo, RecordRepo, StaffRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_staff(name: &str, email: &str) -> CreateStaff {
    CreateStaff {
        full_name: name.to_string(),
        email: email.to_string(),
        department: None,
        job_title: None,
        is_admin: false,
    }
}

fn new_item(kind: &str, title: &str) -> CreateItem {
    CreateItem {
        kind: kind.to_string(),
        title: title.to_string(),
        description: None,
        is_required: true,
        created_by: None,
    }
}

fn no_payload() -> SubmitDocument {
    SubmitDocument {
        signature_url: None,
        form_data: None,
    }
}

async fn seed_pair(pool: &PgPool, kind: &str) -> (i64, i64) {
    let staff = StaffRepo::create(pool, &new_staff("Alice Osei", "alice@example.com"))
        .await
        .unwrap();
    let item = ItemRepo::create(pool, &new_item(kind, "Seeded item"))
        .await
        .unwrap();
    (item.id, staff.id)
}

async fn record_count(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM completion_records")
        .fetch_one(pool)
        .await
        .unwrap()
}

// ---------------------------------------------------------------------------
// Submission upsert
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn submission_creates_then_updates_single_row(pool: PgPool) {
    let (item_id, staff_id) = seed_pair(&pool, "onboarding_document").await;

    let first = RecordRepo::upsert_submission(&pool, item_id, staff_id, &no_payload())
        .await
        .unwrap();
    assert_eq!(first.status, "submitted");
    assert!(first.completed_at.is_some());

    let second = RecordRepo::upsert_submission(&pool, item_id, staff_id, &no_payload())
        .await
        .unwrap();
    assert_eq!(second.id, first.id, "resubmission must update in place");
    assert_eq!(record_count(&pool).await, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn resubmission_keeps_earlier_payload_fields(pool: PgPool) {
    let (item_id, staff_id) = seed_pair(&pool, "onboarding_document").await;

    let with_signature = SubmitDocument {
        signature_url: Some("https://files.example.com/sig/1.png".to_string()),
        form_data: None,
    };
    RecordRepo::upsert_submission(&pool, item_id, staff_id, &with_signature)
        .await
        .unwrap();

    // A later submission without a signature must not erase the stored one.
    let updated = RecordRepo::upsert_submission(&pool, item_id, staff_id, &no_payload())
        .await
        .unwrap();
    assert_eq!(
        updated.signature_url.as_deref(),
        Some("https://files.example.com/sig/1.png")
    );
}

// ---------------------------------------------------------------------------
// Acknowledgment upsert
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn acknowledgment_creates_pending_record(pool: PgPool) {
    let (item_id, staff_id) = seed_pair(&pool, "onboarding_document").await;

    let record = RecordRepo::upsert_acknowledgment(&pool, item_id, staff_id)
        .await
        .unwrap();
    assert_eq!(record.status, "pending");
    assert!(record.acknowledged_at.is_some());
    assert!(record.completed_at.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn acknowledgment_preserves_existing_status(pool: PgPool) {
    let (item_id, staff_id) = seed_pair(&pool, "onboarding_document").await;

    RecordRepo::upsert_submission(&pool, item_id, staff_id, &no_payload())
        .await
        .unwrap();
    let record = RecordRepo::upsert_acknowledgment(&pool, item_id, staff_id)
        .await
        .unwrap();

    assert_eq!(record.status, "submitted");
    assert!(record.acknowledged_at.is_some());
    assert_eq!(record_count(&pool).await, 1);
}

// ---------------------------------------------------------------------------
// Training progress upsert
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn completing_training_stamps_completed_at_once(pool: PgPool) {
    let (item_id, staff_id) = seed_pair(&pool, "training_assignment").await;

    let completed = RecordRepo::upsert_progress(
        &pool,
        item_id,
        staff_id,
        &UpdateTrainingProgress {
            status: Some("completed".to_string()),
            score: Some(92.0),
            watched_percentage: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(completed.status, "completed");
    let stamped_at = completed.completed_at.expect("completion must be stamped");

    // A later score-only update must not clear or restamp the timestamp.
    let updated = RecordRepo::upsert_progress(
        &pool,
        item_id,
        staff_id,
        &UpdateTrainingProgress {
            status: None,
            score: Some(95.0),
            watched_percentage: Some(100.0),
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.status, "completed");
    assert_eq!(updated.completed_at, Some(stamped_at));
    assert_eq!(updated.score, Some(95.0));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn first_progress_update_defaults_to_in_progress(pool: PgPool) {
    let (item_id, staff_id) = seed_pair(&pool, "training_assignment").await;

    let record = RecordRepo::upsert_progress(
        &pool,
        item_id,
        staff_id,
        &UpdateTrainingProgress {
            status: None,
            score: None,
            watched_percentage: Some(25.0),
        },
    )
    .await
    .unwrap();
    assert_eq!(record.status, "in_progress");
    assert!(record.completed_at.is_none());
}

// ---------------------------------------------------------------------------
// Approval
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn approval_requires_existing_record(pool: PgPool) {
    let (item_id, staff_id) = seed_pair(&pool, "onboarding_document").await;

    let missing = RecordRepo::approve(&pool, item_id, staff_id).await.unwrap();
    assert!(missing.is_none());

    RecordRepo::upsert_submission(&pool, item_id, staff_id, &no_payload())
        .await
        .unwrap();
    let approved = RecordRepo::approve(&pool, item_id, staff_id)
        .await
        .unwrap()
        .expect("submitted record must be approvable");
    assert_eq!(approved.status, "approved");
}

// ---------------------------------------------------------------------------
// Deletion and cascade
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_reports_whether_a_row_was_removed(pool: PgPool) {
    let (item_id, staff_id) = seed_pair(&pool, "onboarding_document").await;

    RecordRepo::upsert_submission(&pool, item_id, staff_id, &no_payload())
        .await
        .unwrap();

    assert!(RecordRepo::delete(&pool, item_id, staff_id).await.unwrap());
    assert!(!RecordRepo::delete(&pool, item_id, staff_id).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deleting_item_cascades_records(pool: PgPool) {
    let (item_id, staff_id) = seed_pair(&pool, "onboarding_document").await;

    RecordRepo::upsert_submission(&pool, item_id, staff_id, &no_payload())
        .await
        .unwrap();
    assert_eq!(record_count(&pool).await, 1);

    assert!(ItemRepo::delete(&pool, item_id).await.unwrap());
    assert_eq!(record_count(&pool).await, 0);
}

// ---------------------------------------------------------------------------
// Timeline queries
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn submissions_surface_as_timeline_events(pool: PgPool) {
    let (doc_id, staff_id) = seed_pair(&pool, "onboarding_document").await;
    let training = ItemRepo::create(&pool, &new_item("training_assignment", "Intro"))
        .await
        .unwrap();

    RecordRepo::upsert_submission(&pool, doc_id, staff_id, &no_payload())
        .await
        .unwrap();
    RecordRepo::upsert_progress(
        &pool,
        training.id,
        staff_id,
        &UpdateTrainingProgress {
            status: Some("completed".to_string()),
            score: None,
            watched_percentage: None,
        },
    )
    .await
    .unwrap();

    let events = RecordRepo::list_recent_submissions(&pool, 10).await.unwrap();
    assert_eq!(events.len(), 2);
    // Newest first: the training completion happened second.
    assert_eq!(events[0].action, "training_completed");
    assert_eq!(events[1].action, "document_submitted");
    assert_eq!(events[0].actor_name.as_deref(), Some("Alice Osei"));
}

// ---------------------------------------------------------------------------
// Staff constraints
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_staff_email_rejected(pool: PgPool) {
    StaffRepo::create(&pool, &new_staff("Alice Osei", "alice@example.com"))
        .await
        .unwrap();

    let result = StaffRepo::create(&pool, &new_staff("Other Alice", "alice@example.com")).await;
    assert!(result.is_err(), "unique email constraint must hold");
}
