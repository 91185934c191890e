//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `glossary_core` linkage.
//! - Run a seeded end-to-end flow with deterministic output.

use glossary_core::db::open_db_in_memory;
use glossary_core::{AcceptAll, GlossaryService, Region, SqliteSeedRepository};
use rusqlite::params;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("glossary_cli error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), String> {
    println!("glossary_core version={}", glossary_core::core_version());

    let conn = open_db_in_memory().map_err(|err| err.to_string())?;
    conn.execute(
        "INSERT INTO user (id, name, salt, password_hash) VALUES (1, 'demo', 'salt', 'hash');",
        [],
    )
    .map_err(|err| err.to_string())?;
    conn.execute(
        "INSERT INTO entry (author_id, keyword, description, created_at, updated_at)
         VALUES (1, ?1, ?2, 1, 1);",
        params!["trie", "a prefix tree used for multi-pattern matching"],
    )
    .map_err(|err| err.to_string())?;

    let service =
        GlossaryService::new(Region::global(), SqliteSeedRepository::new(&conn), AcceptAll);
    service.initialize().map_err(|err| err.to_string())?;

    service
        .submit("matcher", "walks a trie once per text", 1)
        .map_err(|err| err.to_string())?;
    service
        .add_star("matcher", "demo")
        .map_err(|err| err.to_string())?;

    let page = service
        .entry_page("matcher")
        .map_err(|err| err.to_string())?
        .ok_or_else(|| "matcher entry missing after submit".to_string())?;
    println!("keyword={}", page.entry.keyword);
    println!("html={}", page.html);
    println!("stars={}", page.stars.len());

    Ok(())
}
