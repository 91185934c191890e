use glossary_core::PatternIndex;

fn bracket(keyword: &str) -> String {
    format!("[{keyword}]")
}

#[test]
fn longest_keyword_wins_at_every_position() {
    let index = PatternIndex::from_keywords(["New", "New York", "York"]);

    let html = index.replace_all("New York city, New year in York", bracket);
    assert_eq!(html, "[New York] city, [New] year in [York]");
}

#[test]
fn replaced_spans_never_overlap() {
    let index = PatternIndex::from_keywords(["abc", "bcd", "cde"]);

    // "abc" consumes positions 0..3; the scan resumes at "de", so the
    // overlapping "bcd"/"cde" candidates never fire inside the span.
    let html = index.replace_all("abcde", bracket);
    assert_eq!(html, "[abc]de");
}

#[test]
fn add_then_delete_restores_matching_behavior() {
    let mut index = PatternIndex::from_keywords(["glossary"]);
    let before = index.replace_all("a glossary of terms", bracket);

    index.add("terms");
    let with_terms = index.replace_all("a glossary of terms", bracket);
    assert_eq!(with_terms, "a [glossary] of [terms]");

    index.remove("terms");
    let after = index.replace_all("a glossary of terms", bracket);
    assert_eq!(before, after);
}

#[test]
fn deleting_a_prefix_sharer_keeps_the_other_keyword_matchable() {
    let mut index = PatternIndex::from_keywords(["New", "New York"]);

    index.remove("New");
    assert_eq!(index.replace_all("New York city", bracket), "[New York] city");

    index.add("New");
    index.remove("New York");
    assert_eq!(
        index.replace_all("New York city", bracket),
        "[New] York city"
    );
}

#[test]
fn unregistered_text_passes_through_escaped_only() {
    let index = PatternIndex::new();
    assert_eq!(
        index.replace_all("1 < 2 & \"quotes\"\n", |kw| kw.to_string()),
        "1 &lt; 2 &amp; &quot;quotes&quot;<br />\n"
    );
}

#[test]
fn render_output_containing_keywords_is_not_rematched() {
    let index = PatternIndex::from_keywords(["spam"]);

    // The replacement itself mentions the keyword; a re-entrant scan would
    // loop or double-wrap it.
    let html = index.replace_all("spam spam", |kw| format!("<b>{kw}</b>"));
    assert_eq!(html, "<b>spam</b> <b>spam</b>");
}
