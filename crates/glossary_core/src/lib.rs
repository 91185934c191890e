//! Core domain logic for the collaborative glossary.
//! This crate is the single source of truth for keyword matching,
//! cache-backed storage and endorsement invariants.

pub mod db;
pub mod logging;
pub mod matcher;
pub mod model;
pub mod repo;
pub mod service;
pub mod spam;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use matcher::index::{escape_html, PatternIndex};
pub use model::entry::{Entry, EntryValidationError, Star, User, UserId};
pub use repo::seed_repo::{
    RepoError, RepoResult, SeedData, SeedRepository, SqliteSeedRepository, StaticSeedRepository,
};
pub use service::glossary_service::{
    FrontPage, GlossaryService, RenderedEntry, ServiceError, ServiceResult, SubmissionRejection,
    ENTRIES_PER_PAGE,
};
pub use spam::{AcceptAll, PatternClassifier, SpamClassifier, Verdict};
pub use store::annotation::{keyword_link, AnnotationCache};
pub use store::keyword_store::KeywordStore;
pub use store::region::{Region, Snapshot, UserTable};
pub use store::star_store::StarStore;
pub use store::{LockError, LockName, LockTable, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
