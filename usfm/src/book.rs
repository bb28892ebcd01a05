//! Per-book USFM export of the concordance.

use std::fs;
use std::path::{Path, PathBuf};

use handlebars::Handlebars;
use lazy_static::lazy_static;
use log::{info, warn};

use db::identifier::{self, FixedWidth, PackedMagnitude};
use db::{AdjacentRepeat, VerseAggregator, VerseKey, VerseText, Verses, WordQuery, WordSource};

use crate::canon::{self, BookDescriptor};
use crate::Error;

/// USFM version declared in every file.
pub const USFM_VERSION: &str = "3.0";

lazy_static! {
    static ref HEADER_TPL: Handlebars<'static> = {
        let mut tpl = Handlebars::new();
        tpl.set_strict_mode(true);
        tpl.register_escape_fn(handlebars::no_escape);
        tpl.register_template_string("book_header", include_str!("../templates/book_header.hbs"))
            .unwrap();
        tpl
    };
}

/// One USFM export of the concordance.
#[derive(Clone, Debug)]
pub struct UsfmExport {
    /// Verse keys are decoded from `query.ident` as fixed-width
    /// identifiers. When `query.cross_ident` is set it is decoded as a
    /// packed identifier and compared.
    pub query: WordQuery,
    pub books: &'static [BookDescriptor; 66],
    /// Translation tag appended to file names, e.g. `GHT`.
    pub tag: String,
    pub out_dir: PathBuf,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct UsfmReport {
    pub files: Vec<PathBuf>,
    pub skipped_rows: usize,
    /// Rows whose two identifiers name different verses.
    pub disagreements: usize,
}

/// Reads the words of `export.query` and writes one file per book.
pub fn export<S: WordSource>(source: &mut S, export: &UsfmExport) -> Result<UsfmReport, Error> {
    let rows = source.words(&export.query)?;

    let mut aggregator = VerseAggregator::new(FixedWidth, AdjacentRepeat, &export.query.ident);
    let mut disagreements = 0;

    for row in &rows {
        if let (Some(ident), Some(cross), Some(cross_column)) = (
            row.ident.as_deref(),
            row.cross_ident.as_deref(),
            export.query.cross_ident.as_deref(),
        ) {
            if let Some((key, other)) =
                identifier::disagreement(&FixedWidth, ident, &PackedMagnitude, cross)
            {
                warn!(
                    "{}={} is {} but {}={} is {}",
                    export.query.ident, ident, key, cross_column, cross, other
                );
                disagreements += 1;
            }
        }
        aggregator.push(row);
    }

    let skipped_rows = aggregator.skipped();
    let verses = aggregator.finish();
    let files = write_books(&verses, export.books, &export.tag, &export.out_dir)?;

    if disagreements > 0 {
        warn!(
            "{} rows disagree between {} and {}",
            disagreements,
            export.query.ident,
            export.query.cross_ident.as_deref().unwrap_or_default()
        );
    }
    info!(
        "Wrote {} books to {} ({} rows skipped)",
        files.len(),
        export.out_dir.display(),
        skipped_rows
    );

    Ok(UsfmReport {
        files,
        skipped_rows,
        disagreements,
    })
}

/// File name of a book, e.g. `41MATGHT.usfm`.
pub fn file_name(book: u32, descriptor: &BookDescriptor, tag: &str) -> String {
    format!(
        "{:02}{}{}.usfm",
        canon::sequence_number(book),
        descriptor.code,
        tag
    )
}

/// Writes every book present in `verses` to `out_dir`.
///
/// Returns the written paths in book order.
pub fn write_books(
    verses: &Verses,
    books: &[BookDescriptor; 66],
    tag: &str,
    out_dir: &Path,
) -> Result<Vec<PathBuf>, Error> {
    fs::create_dir_all(out_dir).map_err(|e| io_error(out_dir, e))?;

    let mut files = Vec::new();
    let mut remaining = verses.iter().peekable();

    while let Some((first, _)) = remaining.peek() {
        let book = first.book;
        let descriptor =
            canon::descriptor(books, book).ok_or(Error::UnknownBook { book })?;

        let mut book_verses = Vec::new();
        while let Some((key, text)) = remaining.next_if(|(key, _)| key.book == book) {
            book_verses.push((key, text));
        }

        let path = out_dir.join(file_name(book, descriptor, tag));
        let usfm = render_book(descriptor, book_verses)?;
        fs::write(&path, usfm).map_err(|e| io_error(&path, e))?;

        files.push(path);
    }

    Ok(files)
}

/// Renders one book: the header block, then a `\c` line per chapter and a
/// `\v` line per verse, then a blank line.
pub fn render_book<'a, I>(descriptor: &BookDescriptor, verses: I) -> Result<String, Error>
where
    I: IntoIterator<Item = (&'a VerseKey, &'a VerseText)>,
{
    let mut usfm = HEADER_TPL
        .render("book_header", descriptor)
        .map_err(|e| Error::Template {
            cause: e.to_string(),
        })?;

    let mut chapter = None;
    for (key, text) in verses {
        if chapter != Some(key.chapter) {
            usfm.push_str(&format!("\\c {}\n", key.chapter));
            chapter = Some(key.chapter);
        }
        usfm.push_str(&format!("\\v {} {}\n", key.verse, text));
    }
    usfm.push('\n');

    Ok(usfm)
}

fn io_error(path: &Path, e: std::io::Error) -> Error {
    Error::Io {
        path: path.display().to_string(),
        cause: e.to_string(),
    }
}
