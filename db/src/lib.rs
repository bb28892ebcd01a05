#[macro_use]
extern crate diesel;

use diesel::prelude::*;
use thiserror::Error;

pub type DbConnection = SqliteConnection;

#[derive(Clone, Error, Debug)]
pub enum DbError {
    #[error("Could not connect to '{}'. Root cause: {:?}.", url, cause)]
    Connection { url: String, cause: String },

    #[error("There was a database error. Root cause: {:?}.", cause)]
    Other { cause: String },

    #[error("Could not write '{}'. Root cause: {:?}.", path, cause)]
    Io { path: String, cause: String },

    #[error("'{}' has no Windows-1253 mapping.", character)]
    Unmappable { character: char },
}

impl From<diesel::result::Error> for DbError {
    fn from(e: diesel::result::Error) -> Self {
        DbError::Other {
            cause: e.to_string(),
        }
    }
}

/// Establishes a non-pooled SQLite connection.
pub fn establish_connection(db_url: &str) -> Result<SqliteConnection, DbError> {
    SqliteConnection::establish(db_url).map_err(|e| DbError::Connection {
        url: db_url.to_owned(),
        cause: e.to_string(),
    })
}

pub mod aggregate;
pub mod bblx;
pub mod concordance;
pub mod identifier;
pub mod models;
pub mod rtf;
mod schema;

pub use aggregate::{AdjacentRepeat, DedupPolicy, SeenCompound, VerseAggregator, Verses};
pub use concordance::{Concordance, WordQuery, WordSource};
pub use identifier::{FixedWidth, IdentifierDecoder, IdentifierError, PackedMagnitude};
pub use models::{VerseKey, VerseText, WordRow};
