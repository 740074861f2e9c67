//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod audit_repo;
pub mod item_repo;
pub mod record_repo;
pub mod staff_repo;

pub use audit_repo::AuditRepo;
pub use item_repo::ItemRepo;
pub use record_repo::RecordRepo;
pub use staff_repo::StaffRepo;
