use glossary_core::db::{open_db, open_db_in_memory};
use glossary_core::{
    AcceptAll, Entry, GlossaryService, PatternClassifier, Region, ServiceError,
    SqliteSeedRepository, StaticSeedRepository, SubmissionRejection, User, ENTRIES_PER_PAGE,
};
use rusqlite::{params, Connection};
use std::sync::Arc;

fn insert_user(conn: &Connection, id: i64, name: &str) {
    conn.execute(
        "INSERT INTO user (id, name, salt, password_hash) VALUES (?1, ?2, 'salt', 'hash');",
        params![id, name],
    )
    .unwrap();
}

fn insert_entry(conn: &Connection, keyword: &str, description: &str, updated_at: i64) {
    conn.execute(
        "INSERT INTO entry (author_id, keyword, description, created_at, updated_at)
         VALUES (1, ?1, ?2, ?3, ?3);",
        params![keyword, description, updated_at],
    )
    .unwrap();
}

fn service_over(
    conn: &Connection,
) -> GlossaryService<SqliteSeedRepository<'_>, AcceptAll> {
    let region = Arc::new(Region::new());
    GlossaryService::new(region, SqliteSeedRepository::new(conn), AcceptAll)
}

#[test]
fn initialize_loads_seed_and_renders_cross_references() {
    let conn = open_db_in_memory().unwrap();
    insert_user(&conn, 1, "alice");
    insert_entry(&conn, "Rust", "compiles to native code", 100);
    insert_entry(&conn, "native code", "what the CPU runs", 200);

    let service = service_over(&conn);
    service.initialize().unwrap();

    let page = service.entry_page("Rust").unwrap().unwrap();
    assert_eq!(
        page.html,
        r#"compiles to <a href="/keyword/native%20code">native code</a>"#
    );
    assert!(page.stars.is_empty());
}

#[test]
fn front_page_paginates_most_recent_first() {
    let conn = open_db_in_memory().unwrap();
    insert_user(&conn, 1, "alice");
    for i in 0..23 {
        insert_entry(&conn, &format!("kw{i:02}"), "text", 1000 + i);
    }

    let service = service_over(&conn);
    service.initialize().unwrap();

    let first = service.front_page(1).unwrap();
    assert_eq!(first.total, 23);
    assert_eq!(first.last_page, 3);
    assert_eq!(first.entries.len(), ENTRIES_PER_PAGE);
    assert_eq!(first.entries[0].entry.keyword, "kw22");
    assert_eq!(first.pages, vec![1, 2, 3]);

    let last = service.front_page(3).unwrap();
    assert_eq!(last.entries.len(), 3);
    assert_eq!(last.entries[2].entry.keyword, "kw00");

    let beyond = service.front_page(9).unwrap();
    assert!(beyond.entries.is_empty());
    assert_eq!(beyond.last_page, 3);
}

#[test]
fn spam_submissions_are_rejected_and_leave_the_store_unmutated() {
    let region = Arc::new(Region::new());
    let classifier = PatternClassifier::new([r"(?i)casino"]).unwrap();
    let service = GlossaryService::new(region, StaticSeedRepository::default(), classifier);

    let err = service.submit("poker", "best casino bonuses", 1).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Rejected(SubmissionRejection::SpamContent)
    ));
    assert!(service.entry_page("poker").unwrap().is_none());

    let err = service.submit("   ", "blank keyword", 1).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Rejected(SubmissionRejection::EmptyKeyword)
    ));

    service.submit("poker", "a card game", 1).unwrap();
    assert!(service.entry_page("poker").unwrap().is_some());
}

#[test]
fn stars_require_an_existing_entry() {
    let service = GlossaryService::new(
        Arc::new(Region::new()),
        StaticSeedRepository::default(),
        AcceptAll,
    );

    let err = service.add_star("ghost", "alice").unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(ref kw) if kw == "ghost"));

    service.submit("real", "exists", 1).unwrap();
    service.add_star("real", "alice").unwrap();
    service.add_star("real", "alice").unwrap();

    let page = service.entry_page("real").unwrap().unwrap();
    assert_eq!(page.stars.len(), 2, "duplicate stars are permitted");
}

#[test]
fn user_lookup_tables_come_from_the_seed() {
    let conn = open_db_in_memory().unwrap();
    insert_user(&conn, 7, "carol");

    let service = service_over(&conn);
    service.initialize().unwrap();

    assert_eq!(service.user_by_id(7).unwrap().name, "carol");
    assert_eq!(service.user_by_name("carol").unwrap().id, 7);
    assert!(service.user_by_name("nobody").is_none());
}

#[test]
fn reinitialize_rebuilds_the_region_and_drops_derived_state() {
    let conn = open_db_in_memory().unwrap();
    insert_user(&conn, 1, "alice");
    insert_entry(&conn, "seeded", "from the seed", 100);

    let service = service_over(&conn);
    service.initialize().unwrap();

    service.submit("transient", "not in the seed", 1).unwrap();
    service.add_star("seeded", "alice").unwrap();

    service.initialize().unwrap();

    assert!(service.entry_page("transient").unwrap().is_none());
    assert!(service.stars_for("seeded").is_empty());
    assert!(service.entry_page("seeded").unwrap().is_some());
}

#[test]
fn rendered_entries_expose_the_templating_shape() {
    let service = GlossaryService::new(
        Arc::new(Region::new()),
        StaticSeedRepository::new(
            vec![Entry::new("Rust", "a language", 1)],
            vec![User {
                id: 1,
                name: "alice".to_string(),
                salt: "s".to_string(),
                password_hash: "h".to_string(),
            }],
        ),
        AcceptAll,
    );

    let page = service.entry_page("Rust").unwrap().unwrap();
    let value = serde_json::to_value(&page).unwrap();

    assert_eq!(value["keyword"], "Rust");
    assert_eq!(value["description"], "a language");
    assert_eq!(value["author_id"], 1);
    assert!(value["html"].is_string());
    assert!(value["stars"].is_array());
    assert!(value["created_at"].is_i64());
}

#[test]
fn file_backed_seed_survives_reopening() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("seed.sqlite3");

    {
        let conn = open_db(&path).unwrap();
        insert_user(&conn, 1, "alice");
        insert_entry(&conn, "durable", "survives reopen", 100);
    }

    let conn = open_db(&path).unwrap();
    let service = service_over(&conn);
    service.initialize().unwrap();
    assert!(service.entry_page("durable").unwrap().is_some());
}
