//! Seed repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Load the two ordered seed collections (entries, users) that rebuild the
//!   shared cache region.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Entries are returned most-recently-updated first.
//! - Rows that fail entry validation are rejected instead of masked.

use crate::db::DbError;
use crate::model::entry::{Entry, User};
use rusqlite::{Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for seed loading.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted seed data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// The two ordered collections loaded during (re)initialize.
#[derive(Debug, Clone, Default)]
pub struct SeedData {
    /// Most-recently-updated first.
    pub entries: Vec<Entry>,
    pub users: Vec<User>,
}

/// Contract for loading the rebuildable seed dataset.
pub trait SeedRepository {
    fn load_seed(&self) -> RepoResult<SeedData>;
}

/// SQLite-backed seed repository.
pub struct SqliteSeedRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSeedRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl SeedRepository for SqliteSeedRepository<'_> {
    fn load_seed(&self) -> RepoResult<SeedData> {
        let mut entries = Vec::new();
        let mut stmt = self.conn.prepare(
            "SELECT keyword, description, author_id, created_at, updated_at
             FROM entry
             ORDER BY updated_at DESC, keyword ASC;",
        )?;
        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            entries.push(parse_entry_row(row)?);
        }

        let mut users = Vec::new();
        let mut stmt = self.conn.prepare(
            "SELECT id, name, salt, password_hash
             FROM user
             ORDER BY id ASC;",
        )?;
        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            users.push(User {
                id: row.get("id")?,
                name: row.get("name")?,
                salt: row.get("salt")?,
                password_hash: row.get("password_hash")?,
            });
        }

        Ok(SeedData { entries, users })
    }
}

/// In-memory seed repository for fixtures and smoke runs.
#[derive(Debug, Clone, Default)]
pub struct StaticSeedRepository {
    pub entries: Vec<Entry>,
    pub users: Vec<User>,
}

impl StaticSeedRepository {
    pub fn new(entries: Vec<Entry>, users: Vec<User>) -> Self {
        Self { entries, users }
    }
}

impl SeedRepository for StaticSeedRepository {
    fn load_seed(&self) -> RepoResult<SeedData> {
        for entry in &self.entries {
            entry.validate().map_err(|err| {
                RepoError::InvalidData(format!("seed entry `{}`: {err}", entry.keyword))
            })?;
        }
        Ok(SeedData {
            entries: self.entries.clone(),
            users: self.users.clone(),
        })
    }
}

fn parse_entry_row(row: &Row<'_>) -> RepoResult<Entry> {
    let entry = Entry {
        keyword: row.get("keyword")?,
        description: row.get("description")?,
        author_id: row.get("author_id")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    };
    entry.validate().map_err(|err| {
        RepoError::InvalidData(format!("seed entry `{}`: {err}", entry.keyword))
    })?;
    Ok(entry)
}
