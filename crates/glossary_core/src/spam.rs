//! Content classification seam.
//!
//! # Responsibility
//! - Define the verdict contract the service consumes before any mutation.
//! - Provide a local regex deny-list implementation for deployments without
//!   the external classifier, plus a permissive one for smoke runs.
//!
//! # Invariants
//! - Classification happens before the store is touched; a spam verdict
//!   leaves the store unmutated.
//! - The external classification service itself stays out of core scope;
//!   this module only fixes the seam it plugs into.

use regex::Regex;

/// Classification outcome for submitted free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Valid,
    Spam,
}

/// Contract every classifier implementation fulfills.
pub trait SpamClassifier {
    fn classify(&self, content: &str) -> Verdict;
}

/// Accepts everything. For tests and local smoke runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl SpamClassifier for AcceptAll {
    fn classify(&self, _content: &str) -> Verdict {
        Verdict::Valid
    }
}

/// Regex deny-list classifier.
///
/// Flags content matching any configured pattern; patterns are compiled
/// once at construction.
#[derive(Debug, Clone)]
pub struct PatternClassifier {
    patterns: Vec<Regex>,
}

impl PatternClassifier {
    /// Compiles the deny-list.
    ///
    /// # Errors
    /// - The first pattern that fails to compile.
    pub fn new<I, P>(patterns: I) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|pattern| Regex::new(pattern.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }
}

impl SpamClassifier for PatternClassifier {
    fn classify(&self, content: &str) -> Verdict {
        if self.patterns.iter().any(|pattern| pattern.is_match(content)) {
            Verdict::Spam
        } else {
            Verdict::Valid
        }
    }
}
