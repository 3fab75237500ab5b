//! SQL access, one repository per table family.
//!
//! Repositories are stateless unit structs; every method takes the pool
//! explicitly, so callers decide about transactions and sharing.

pub mod admin_repo;
pub mod ambassador_repo;
pub mod notification_repo;
pub mod stats_repo;
pub mod submission_repo;
pub mod task_repo;

pub use admin_repo::AdminRepo;
pub use ambassador_repo::AmbassadorRepo;
pub use notification_repo::NotificationRepo;
pub use stats_repo::StatsRepo;
pub use submission_repo::SubmissionRepo;
pub use task_repo::TaskRepo;
