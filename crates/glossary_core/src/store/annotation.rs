//! Per-keyword rendered-HTML cache.
//!
//! # Responsibility
//! - Serve cached cross-referenced HTML for an entry's description.
//! - Compute misses via single-pass pattern substitution and cache them.
//!
//! # Invariants
//! - Cache keys are entry keywords; eviction happens only through keyword
//!   store mutations (set/delete), never time-based.
//! - A render racing a write may cache HTML from the previous snapshot;
//!   callers tolerate this bounded staleness.

use crate::matcher::index::escape_html;
use crate::model::entry::Entry;
use crate::store::region::Region;
use log::debug;
use std::sync::Arc;

/// Rendered-HTML cache bound to the shared region.
pub struct AnnotationCache {
    region: Arc<Region>,
}

impl AnnotationCache {
    pub fn new(region: Arc<Region>) -> Self {
        Self { region }
    }

    /// Returns the entry's description as cross-referenced HTML.
    ///
    /// Cached HTML is served as-is; on a miss the current snapshot's index
    /// substitutes every registered keyword occurrence with a reference
    /// link, and the result is cached under the entry's keyword.
    pub fn render(&self, entry: &Entry) -> String {
        if let Some(html) = self.region.cached_html(&entry.keyword) {
            debug!(
                "event=annotation_render module=store status=hit keyword={}",
                entry.keyword
            );
            return html;
        }

        let snapshot = self.region.snapshot();
        let html = snapshot.index.replace_all(&entry.description, keyword_link);
        self.region.store_html(&entry.keyword, html.clone());
        debug!(
            "event=annotation_render module=store status=miss keyword={}",
            entry.keyword
        );
        html
    }

    /// Evicts the cached HTML for a keyword.
    pub fn invalidate(&self, keyword: &str) {
        self.region.invalidate_html(keyword);
    }
}

/// Renders one matched keyword as a navigable reference link.
pub fn keyword_link(keyword: &str) -> String {
    format!(
        r#"<a href="/keyword/{}">{}</a>"#,
        urlencoding::encode(keyword),
        escape_html(keyword)
    )
}
