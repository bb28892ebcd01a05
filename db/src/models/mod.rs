use std::fmt;

use diesel::sql_types::{Nullable, Text};

use crate::schema::{bible, details};

/// A word row read from the concordance `entries` table.
///
/// Identifier columns may hold integers, reals (`1001001.0`) or text, so
/// every column is read as nullable text and decoded later.
#[derive(Clone, Debug, Default, PartialEq, QueryableByName)]
pub struct WordRow {
    /// Identifier the verse key is decoded from.
    #[diesel(sql_type = Nullable<Text>)]
    pub ident: Option<String>,
    /// Identifier of the other numbering convention, when the query asks
    /// for a cross check.
    #[diesel(sql_type = Nullable<Text>)]
    pub cross_ident: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    pub token: Option<String>,
}

impl WordRow {
    pub fn new(ident: &str, token: &str) -> Self {
        Self {
            ident: Some(ident.to_owned()),
            cross_ident: None,
            token: Some(token.to_owned()),
        }
    }
}

/// Tokens of one verse, in source order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VerseText {
    pub tokens: Vec<String>,
}

impl fmt::Display for VerseText {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.tokens.join(" "))
    }
}

/// Row of the eSword `Details` table.
#[derive(Debug, Insertable)]
#[diesel(table_name = details)]
pub struct NewDetails<'a> {
    pub description: &'a str,
    pub abbreviation: &'a str,
    pub comments: &'a str,
    pub version: i32,
    pub font: &'a str,
    pub right_to_left: bool,
    pub ot: bool,
    pub nt: bool,
    pub apocrypha: bool,
    pub strong: bool,
}

/// Row of the eSword `Bible` table.
#[derive(Debug, Insertable)]
#[diesel(table_name = bible)]
pub struct NewVerse<'a> {
    pub book: i32,
    pub chapter: i32,
    pub verse: i32,
    pub scripture: &'a str,
}

mod verse_key;
pub use self::verse_key::VerseKey;
