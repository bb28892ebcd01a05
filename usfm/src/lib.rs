//! USFM and USX output for the concordance.

use db::DbError;
use thiserror::Error;

#[derive(Clone, Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Db(#[from] DbError),

    #[error("Could not write '{}'. Root cause: {:?}.", path, cause)]
    Io { path: String, cause: String },

    #[error("Could not render the book header. Root cause: {:?}.", cause)]
    Template { cause: String },

    #[error("Could not download '{}'. Root cause: {:?}.", url, cause)]
    Fetch { url: String, cause: String },

    #[error("Invalid selector '{}'. Root cause: {:?}.", selector, cause)]
    Selector { selector: String, cause: String },

    #[error("No element with id '{}' in the page.", id)]
    ContainerNotFound { id: String },

    #[error("Book {} has no descriptor.", book)]
    UnknownBook { book: u32 },
}

pub mod book;
pub mod canon;
pub mod intro;
pub mod usx;

pub use book::{UsfmExport, UsfmReport};
pub use intro::{Excision, IntroConfig};
pub use usx::{Converter, UsxConfig, UsxReport, Usfmconv};
