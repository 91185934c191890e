//! Glossary use-case service.
//!
//! # Responsibility
//! - Provide the submission, rendering, endorsement and pagination entry
//!   points the excluded HTTP layer consumes.
//! - Gate every submission through the content classifier before the store
//!   is touched.
//!
//! # Invariants
//! - Rejected submissions leave the store unmutated.
//! - Absent keywords are reported as outcomes (`None`/`NotFound`), never as
//!   transport errors.

use crate::model::entry::{Entry, Star, User, UserId};
use crate::repo::seed_repo::SeedRepository;
use crate::spam::{SpamClassifier, Verdict};
use crate::store::annotation::AnnotationCache;
use crate::store::keyword_store::KeywordStore;
use crate::store::region::Region;
use crate::store::star_store::StarStore;
use crate::store::StoreError;
use log::info;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Entries shown per front page.
pub const ENTRIES_PER_PAGE: usize = 10;
/// Page links shown on each side of the current page.
const PAGE_LINK_WINDOW: usize = 5;

/// Why a submission was turned away before reaching the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionRejection {
    /// Keyword empty or whitespace-only.
    EmptyKeyword,
    /// Classifier flagged the keyword or the description.
    SpamContent,
}

impl Display for SubmissionRejection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyKeyword => write!(f, "keyword must not be empty"),
            Self::SpamContent => write!(f, "content was classified as spam"),
        }
    }
}

/// Service-level error for glossary use cases.
#[derive(Debug)]
pub enum ServiceError {
    Rejected(SubmissionRejection),
    NotFound(String),
    Store(StoreError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rejected(reason) => write!(f, "submission rejected: {reason}"),
            Self::NotFound(keyword) => write!(f, "no entry for keyword `{keyword}`"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Rejected(_) => None,
            Self::NotFound(_) => None,
            Self::Store(err) => Some(err),
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<crate::store::LockError> for ServiceError {
    fn from(value: crate::store::LockError) -> Self {
        Self::Store(StoreError::Lock(value))
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Entry enriched with derived state for the templating collaborator.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedEntry {
    #[serde(flatten)]
    pub entry: Entry,
    pub html: String,
    pub stars: Vec<Star>,
}

/// One front page of rendered entries plus pagination metadata.
#[derive(Debug, Clone, Serialize)]
pub struct FrontPage {
    pub entries: Vec<RenderedEntry>,
    pub page: usize,
    pub last_page: usize,
    /// Page link window around the current page.
    pub pages: Vec<usize>,
    pub total: usize,
}

/// Use-case service composing the stores over one shared region.
pub struct GlossaryService<S: SeedRepository, C: SpamClassifier> {
    store: KeywordStore<S>,
    annotations: AnnotationCache,
    stars: StarStore,
    region: Arc<Region>,
    classifier: C,
}

impl<S: SeedRepository, C: SpamClassifier> GlossaryService<S, C> {
    pub fn new(region: Arc<Region>, seed: S, classifier: C) -> Self {
        Self {
            store: KeywordStore::new(Arc::clone(&region), seed),
            annotations: AnnotationCache::new(Arc::clone(&region)),
            stars: StarStore::new(Arc::clone(&region)),
            region,
            classifier,
        }
    }

    /// Explicit full reset: reloads the region from the seed source.
    pub fn initialize(&self) -> ServiceResult<()> {
        self.store.reinitialize()?;
        Ok(())
    }

    /// Submits a new or replacing entry.
    ///
    /// # Errors
    /// - `Rejected(EmptyKeyword)` for blank keywords.
    /// - `Rejected(SpamContent)` when the classifier flags the keyword or
    ///   the description; the store is untouched.
    pub fn submit(
        &self,
        keyword: &str,
        description: &str,
        author_id: UserId,
    ) -> ServiceResult<()> {
        if keyword.trim().is_empty() {
            return Err(ServiceError::Rejected(SubmissionRejection::EmptyKeyword));
        }
        if self.classifier.classify(keyword) == Verdict::Spam
            || self.classifier.classify(description) == Verdict::Spam
        {
            info!("event=entry_submit module=service status=rejected keyword={keyword}");
            return Err(ServiceError::Rejected(SubmissionRejection::SpamContent));
        }

        self.store.set(Entry::new(keyword, description, author_id))?;
        Ok(())
    }

    /// Removes an entry; `Ok(false)` is a no-op for absent keywords.
    pub fn remove(&self, keyword: &str) -> ServiceResult<bool> {
        Ok(self.store.delete(keyword)?)
    }

    /// One entry with rendered HTML and stars; `None` when absent.
    pub fn entry_page(&self, keyword: &str) -> ServiceResult<Option<RenderedEntry>> {
        let Some(entry) = self.store.get(keyword)? else {
            return Ok(None);
        };
        Ok(Some(self.rendered(entry)))
    }

    /// A front page of the most-recently-updated entries.
    ///
    /// `page` is 1-based; out-of-range pages yield an empty entry list with
    /// consistent pagination metadata.
    pub fn front_page(&self, page: usize) -> ServiceResult<FrontPage> {
        let page = page.max(1);
        let all = self.store.list()?;
        let total = all.len();
        let last_page = total.div_ceil(ENTRIES_PER_PAGE).max(1);

        let entries = all
            .into_iter()
            .skip((page - 1) * ENTRIES_PER_PAGE)
            .take(ENTRIES_PER_PAGE)
            .map(|entry| self.rendered(entry))
            .collect();

        let first_link = page.saturating_sub(PAGE_LINK_WINDOW).max(1);
        let last_link = (page + PAGE_LINK_WINDOW).min(last_page);
        let pages = (first_link..=last_link).collect();

        Ok(FrontPage {
            entries,
            page,
            last_page,
            pages,
            total,
        })
    }

    /// Endorses a keyword on behalf of a user.
    ///
    /// # Errors
    /// - `NotFound` when no entry exists for the keyword.
    pub fn add_star(&self, keyword: &str, user_name: &str) -> ServiceResult<()> {
        if self.store.get(keyword)?.is_none() {
            return Err(ServiceError::NotFound(keyword.to_string()));
        }
        self.stars.add(keyword, user_name)?;
        Ok(())
    }

    /// Stars recorded for a keyword, in submission order.
    pub fn stars_for(&self, keyword: &str) -> Vec<Star> {
        self.stars.load(keyword)
    }

    pub fn user_by_id(&self, id: UserId) -> Option<User> {
        self.region.users().by_id(id).cloned()
    }

    pub fn user_by_name(&self, name: &str) -> Option<User> {
        self.region.users().by_name(name).cloned()
    }

    fn rendered(&self, entry: Entry) -> RenderedEntry {
        let html = self.annotations.render(&entry);
        let stars = self.stars.load(&entry.keyword);
        RenderedEntry { entry, html, stars }
    }
}
