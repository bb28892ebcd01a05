//! eSword `.bblx` module writer.
//!
//! A module is an SQLite file with a one-row `Details` table and a
//! `Bible` table keyed by book, chapter and verse. The file is rebuilt
//! from scratch on every export.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use log::info;

use crate::aggregate::{SeenCompound, VerseAggregator, Verses};
use crate::concordance::{WordQuery, WordSource};
use crate::identifier::PackedMagnitude;
use crate::models::{NewDetails, NewVerse};
use crate::schema::{self, bible, details};
use crate::{establish_connection, rtf, DbConnection, DbError};

/// `Details.Version` written for every module.
pub const MODULE_VERSION: i32 = 1;

/// Rows per INSERT statement, well under SQLite's bind parameter limit.
const INSERT_CHUNK: usize = 500;

/// Descriptive metadata of a module.
#[derive(Clone, Debug, PartialEq)]
pub struct ModuleDetails {
    pub description: String,
    pub abbreviation: String,
    /// RTF comments shown by eSword; the export date is appended.
    pub comments: String,
    pub font: String,
    /// Language of the text, e.g. `el` or `en`.
    pub language: String,
}

impl ModuleDetails {
    /// The comments as written, stamped with the export date.
    pub fn stamped_comments(&self, exported_on: NaiveDate) -> String {
        format!(
            "{}\\par Exported by script on {}",
            self.comments,
            exported_on.format("%d %b %Y")
        )
    }
}

/// One module export: where to read from and where to write.
#[derive(Clone, Debug, PartialEq)]
pub struct BblxExport {
    pub output: PathBuf,
    /// Identifier column, decoded as a packed magnitude.
    pub query: WordQuery,
    pub details: ModuleDetails,
}

/// Outcome of an export.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BblxReport {
    pub verses: usize,
    pub skipped_rows: usize,
}

/// Reads the words of `export.query`, groups them into verses and writes
/// the module to `export.output`.
pub fn export<S: WordSource>(
    source: &mut S,
    export: &BblxExport,
    exported_on: NaiveDate,
) -> Result<BblxReport, DbError> {
    let rows = source.words(&export.query)?;

    let mut aggregator =
        VerseAggregator::new(PackedMagnitude, SeenCompound::default(), &export.query.ident);
    for row in &rows {
        aggregator.push(row);
    }
    let skipped_rows = aggregator.skipped();
    let verses = aggregator.finish();

    write(&export.output, &export.details, &verses, exported_on)?;
    info!(
        "Created {} ({}): {}",
        export.details.abbreviation,
        export.details.language,
        export.output.display()
    );

    Ok(BblxReport {
        verses: verses.len(),
        skipped_rows,
    })
}

/// Writes `verses` as a module at `path`, replacing any existing file.
///
/// A failure part way through leaves a partial file behind; the next run
/// starts over.
pub fn write(
    path: &Path,
    module: &ModuleDetails,
    verses: &Verses,
    exported_on: NaiveDate,
) -> Result<(), DbError> {
    if path.exists() {
        fs::remove_file(path).map_err(|e| DbError::Io {
            path: path.display().to_string(),
            cause: e.to_string(),
        })?;
    }

    // Encode before touching the database so an unmappable character
    // leaves no file at all.
    let scriptures = verses
        .iter()
        .map(|(key, text)| Ok((*key, rtf::encode_greek(&text.to_string())?)))
        .collect::<Result<Vec<_>, DbError>>()?;

    let mut conn = establish_connection(&path.to_string_lossy())?;
    conn.batch_execute(schema::BBLX_V4)?;

    let comments = module.stamped_comments(exported_on);
    let rows = scriptures
        .iter()
        .map(|(key, scripture)| NewVerse {
            book: key.book as i32,
            chapter: key.chapter as i32,
            verse: key.verse as i32,
            scripture,
        })
        .collect::<Vec<_>>();

    conn.transaction::<_, DbError, _>(|c| {
        insert_details(c, module, &comments)?;
        for chunk in rows.chunks(INSERT_CHUNK) {
            diesel::insert_into(bible::table).values(chunk).execute(c)?;
        }
        Ok(())
    })
}

fn insert_details(
    conn: &mut DbConnection,
    module: &ModuleDetails,
    comments: &str,
) -> Result<(), DbError> {
    diesel::insert_into(details::table)
        .values(&NewDetails {
            description: &module.description,
            abbreviation: &module.abbreviation,
            comments,
            version: MODULE_VERSION,
            font: &module.font,
            right_to_left: false,
            ot: true,
            nt: true,
            apocrypha: false,
            strong: false,
        })
        .execute(conn)?;
    Ok(())
}
