//! Incremental multi-pattern substring matcher.
//!
//! # Responsibility
//! - Maintain the live keyword set as a character trie.
//! - Perform single-pass, longest-match-first substitution over free text.
//!
//! # Invariants
//! - The matchable set equals exactly the keywords added and not yet removed;
//!   the keyword store mutates the index in lockstep with the entries map.
//! - Replaced spans never overlap and are never re-scanned.
//! - Removing a keyword never breaks lookups for keywords sharing a prefix.
//!
//! A trie keeps substitution at one pass over the text regardless of how many
//! keywords are registered. A single alternation regex over thousands of
//! keywords hits engine size limits, and per-keyword scanning is
//! O(keywords x text length).

use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
struct Node {
    children: HashMap<char, Node>,
    terminal: bool,
}

/// Character trie over the registered keyword set.
///
/// Mutations happen only under the "entry" named lock held by the keyword
/// store; readers work on an immutable snapshot, so no interior locking is
/// needed here.
#[derive(Debug, Clone, Default)]
pub struct PatternIndex {
    root: Node,
    keywords: usize,
}

impl PatternIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an index from an initial keyword collection.
    pub fn from_keywords<I, K>(keywords: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        let mut index = Self::new();
        for keyword in keywords {
            index.add(keyword.as_ref());
        }
        index
    }

    /// Inserts a keyword; returns `false` for empty input or a duplicate.
    ///
    /// Existing keywords sharing a prefix are untouched.
    pub fn add(&mut self, keyword: &str) -> bool {
        if keyword.is_empty() {
            return false;
        }

        let mut node = &mut self.root;
        for ch in keyword.chars() {
            node = node.children.entry(ch).or_default();
        }
        if node.terminal {
            return false;
        }
        node.terminal = true;
        self.keywords += 1;
        true
    }

    /// Removes a keyword; returns `false` when it was never registered.
    ///
    /// Childless non-terminal nodes left behind are pruned, so lookups for
    /// keywords sharing a prefix keep working.
    pub fn remove(&mut self, keyword: &str) -> bool {
        if keyword.is_empty() {
            return false;
        }

        let removed = remove_rec(&mut self.root, keyword.chars()).removed;
        if removed {
            self.keywords -= 1;
        }
        removed
    }

    /// Returns whether the exact keyword is registered.
    pub fn contains(&self, keyword: &str) -> bool {
        if keyword.is_empty() {
            return false;
        }

        let mut node = &self.root;
        for ch in keyword.chars() {
            match node.children.get(&ch) {
                Some(child) => node = child,
                None => return false,
            }
        }
        node.terminal
    }

    pub fn len(&self) -> usize {
        self.keywords
    }

    pub fn is_empty(&self) -> bool {
        self.keywords == 0
    }

    /// Byte length of the longest registered keyword prefixing `text`.
    fn longest_match(&self, text: &str) -> Option<usize> {
        let mut node = &self.root;
        let mut best: Option<usize> = None;
        let mut consumed = 0;

        for ch in text.chars() {
            match node.children.get(&ch) {
                Some(child) => {
                    consumed += ch.len_utf8();
                    node = child;
                    if node.terminal {
                        best = Some(consumed);
                    }
                }
                None => break,
            }
        }

        best
    }

    /// Single-pass, longest-match-first substitution.
    ///
    /// # Contract
    /// - At every position the longest registered keyword starting there is
    ///   replaced by `render(keyword)`, emitted verbatim, and the scan
    ///   advances past the whole span.
    /// - Unmatched text is HTML-escaped; newlines become `<br />`.
    /// - Replacement output is never matched again.
    pub fn replace_all<F>(&self, text: &str, render: F) -> String
    where
        F: Fn(&str) -> String,
    {
        let mut out = String::with_capacity(text.len());
        let mut pos = 0;

        while pos < text.len() {
            let rest = &text[pos..];

            if let Some(span) = self.longest_match(rest) {
                out.push_str(&render(&rest[..span]));
                pos += span;
                continue;
            }

            if rest.starts_with("\r\n") {
                out.push_str("<br />\n");
                pos += 2;
                continue;
            }

            // `pos < text.len()` and `pos` sits on a char boundary.
            let Some(ch) = rest.chars().next() else {
                break;
            };
            match ch {
                '\n' | '\r' => out.push_str("<br />\n"),
                other => push_escaped(&mut out, other),
            }
            pos += ch.len_utf8();
        }

        out
    }
}

struct Removal {
    removed: bool,
    /// Parent should drop the child node entirely.
    prune: bool,
}

fn remove_rec(node: &mut Node, mut chars: std::str::Chars<'_>) -> Removal {
    match chars.next() {
        None => {
            if !node.terminal {
                return Removal {
                    removed: false,
                    prune: false,
                };
            }
            node.terminal = false;
            Removal {
                removed: true,
                prune: node.children.is_empty(),
            }
        }
        Some(ch) => {
            let Some(child) = node.children.get_mut(&ch) else {
                return Removal {
                    removed: false,
                    prune: false,
                };
            };
            let outcome = remove_rec(child, chars);
            if outcome.removed && outcome.prune {
                node.children.remove(&ch);
            }
            Removal {
                removed: outcome.removed,
                prune: outcome.removed && !node.terminal && node.children.is_empty(),
            }
        }
    }
}

/// Escapes text for safe embedding in HTML element content and attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        push_escaped(&mut out, ch);
    }
    out
}

fn push_escaped(out: &mut String, ch: char) {
    match ch {
        '&' => out.push_str("&amp;"),
        '<' => out.push_str("&lt;"),
        '>' => out.push_str("&gt;"),
        '"' => out.push_str("&quot;"),
        '\'' => out.push_str("&#39;"),
        other => out.push(other),
    }
}

#[cfg(test)]
mod tests {
    use super::{escape_html, PatternIndex};

    fn bracket(keyword: &str) -> String {
        format!("[{keyword}]")
    }

    #[test]
    fn add_rejects_empty_and_duplicate_keywords() {
        let mut index = PatternIndex::new();
        assert!(!index.add(""));
        assert!(index.add("rust"));
        assert!(!index.add("rust"));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn remove_prunes_without_breaking_prefix_sharers() {
        let mut index = PatternIndex::from_keywords(["car", "carpet"]);
        assert!(index.remove("carpet"));
        assert!(index.contains("car"));
        assert!(!index.contains("carpet"));

        assert!(index.remove("car"));
        assert!(index.is_empty());
        assert!(!index.remove("car"));
    }

    #[test]
    fn remove_keeps_longer_keyword_when_prefix_goes() {
        let mut index = PatternIndex::from_keywords(["car", "carpet"]);
        assert!(index.remove("car"));
        assert!(index.contains("carpet"));
        assert_eq!(index.replace_all("carpet", bracket), "[carpet]");
    }

    #[test]
    fn longest_match_wins_over_shared_prefix() {
        let index = PatternIndex::from_keywords(["New", "New York"]);
        let html = index.replace_all("New York city", bracket);
        assert_eq!(html, "[New York] city");
    }

    #[test]
    fn foobar_is_never_split() {
        let index = PatternIndex::from_keywords(["foo", "foobar"]);
        let html = index.replace_all("foobar baz foo", bracket);
        assert_eq!(html, "[foobar] baz [foo]");
    }

    #[test]
    fn replacement_output_is_not_rescanned() {
        let index = PatternIndex::from_keywords(["a"]);
        let html = index.replace_all("aa", |_| "a!".to_string());
        assert_eq!(html, "a!a!");
    }

    #[test]
    fn unmatched_text_is_escaped_and_newlines_break() {
        let index = PatternIndex::from_keywords(["tag"]);
        let html = index.replace_all("<b> & tag\r\nnext\rline", bracket);
        assert_eq!(html, "&lt;b&gt; &amp; [tag]<br />\nnext<br />\nline");
    }

    #[test]
    fn multibyte_keywords_match_on_char_boundaries() {
        let index = PatternIndex::from_keywords(["東京", "東京都"]);
        let html = index.replace_all("東京都と東京", bracket);
        assert_eq!(html, "[東京都]と[東京]");
    }

    #[test]
    fn escape_html_covers_attribute_context() {
        assert_eq!(escape_html(r#"a"b'c"#), "a&quot;b&#39;c");
    }
}
