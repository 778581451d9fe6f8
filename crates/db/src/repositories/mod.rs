//! Per-table repositories. One struct per table, each with a shared
//! `COLUMNS` constant and static async methods taking the pool.

mod contest_repo;
mod detail_repo;
mod file_repo;
mod notification_repo;
mod prompt_repo;
mod result_repo;
mod user_repo;

pub use contest_repo::ContestRepo;
pub use detail_repo::DetailRepo;
pub use file_repo::FileRepo;
pub use notification_repo::NotificationRepo;
pub use prompt_repo::PromptRepo;
pub use result_repo::ResultRepo;
pub use user_repo::{UserRepo, STAT_CONTESTS_CREATED, STAT_FILES_UPLOADED};
