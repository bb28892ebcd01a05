use diesel::prelude::*;
use diesel::sql_types::Text;
use log::debug;

use crate::models::WordRow;
use crate::{establish_connection, DbConnection, DbError};

/// Table holding one row per translated word.
pub const ENTRIES: &str = "entries";

/// Columns to read word rows from.
#[derive(Clone, Debug, PartialEq)]
pub struct WordQuery {
    pub table: String,
    /// Column the verse key is decoded from.
    pub ident: String,
    /// Column decoded under the other identifier convention, for cross
    /// checking only.
    pub cross_ident: Option<String>,
    /// Column holding the word text.
    pub token: String,
    /// Column giving the scan order.
    pub order_by: String,
}

impl WordQuery {
    /// Reads `token` keyed and ordered by `ident` from `entries`.
    pub fn new(ident: &str, token: &str) -> Self {
        Self {
            table: ENTRIES.to_owned(),
            ident: ident.to_owned(),
            cross_ident: None,
            token: token.to_owned(),
            order_by: ident.to_owned(),
        }
    }

    pub fn order_by(mut self, column: &str) -> Self {
        self.order_by = column.to_owned();
        self
    }

    pub fn cross_check(mut self, column: &str) -> Self {
        self.cross_ident = Some(column.to_owned());
        self
    }

    /// Renders the SELECT statement. Rows without text are left out.
    pub fn to_sql(&self) -> String {
        let cross = self
            .cross_ident
            .as_deref()
            .map(quote)
            .unwrap_or_else(|| "NULL".to_owned());

        format!(
            "SELECT {ident} AS ident, {cross} AS cross_ident, {token} AS token \
             FROM {table} WHERE {token} IS NOT NULL ORDER BY {order}",
            ident = quote(&self.ident),
            cross = cross,
            token = quote(&self.token),
            table = quote(&self.table),
            order = quote(&self.order_by),
        )
    }
}

/// Trait implemented by types that can supply the word rows of a
/// concordance.
pub trait WordSource {
    /// Loads every row matching the query, in scan order.
    fn words(&mut self, query: &WordQuery) -> Result<Vec<WordRow>, DbError>;
}

/// The SQLite concordance database.
pub struct Concordance {
    conn: DbConnection,
}

impl Concordance {
    pub fn open(db_url: &str) -> Result<Self, DbError> {
        Ok(Self {
            conn: establish_connection(db_url)?,
        })
    }

    pub fn from_connection(conn: DbConnection) -> Self {
        Self { conn }
    }

    /// Fails unless every column the query names exists. SQLite reads an
    /// unknown double-quoted name as a string literal, so a typo would
    /// otherwise select that text for every row.
    fn check_columns(&mut self, query: &WordQuery) -> Result<(), DbError> {
        let columns = diesel::sql_query(format!("PRAGMA table_info({})", quote(&query.table)))
            .load::<ColumnInfo>(&mut self.conn)?;
        if columns.is_empty() {
            return Err(DbError::Other {
                cause: format!("No table '{}'.", query.table),
            });
        }

        let wanted = [
            Some(&query.ident),
            query.cross_ident.as_ref(),
            Some(&query.token),
            Some(&query.order_by),
        ];
        for name in wanted.into_iter().flatten() {
            if !columns.iter().any(|c| c.name.eq_ignore_ascii_case(name)) {
                return Err(DbError::Other {
                    cause: format!("No column '{}' in table '{}'.", name, query.table),
                });
            }
        }

        Ok(())
    }
}

#[derive(QueryableByName)]
struct ColumnInfo {
    #[diesel(sql_type = Text)]
    name: String,
}

impl WordSource for Concordance {
    fn words(&mut self, query: &WordQuery) -> Result<Vec<WordRow>, DbError> {
        self.check_columns(query)?;

        let sql = query.to_sql();
        debug!("{}", sql);

        diesel::sql_query(sql)
            .load::<WordRow>(&mut self.conn)
            .map_err(|e| DbError::Other {
                cause: format!("Could not read {}.{}. Cause: {e}", query.table, query.token),
            })
    }
}

/// Quotes an SQL identifier.
fn quote(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::fixture;

    #[test]
    fn sql() {
        assert_eq!(
            WordQuery::new("uid", "raw").to_sql(),
            "SELECT \"uid\" AS ident, NULL AS cross_ident, \"raw\" AS token \
             FROM \"entries\" WHERE \"raw\" IS NOT NULL ORDER BY \"uid\""
        );
        assert_eq!(
            WordQuery::new("uid", "greek")
                .order_by("guid")
                .cross_check("guid")
                .to_sql(),
            "SELECT \"uid\" AS ident, \"guid\" AS cross_ident, \"greek\" AS token \
             FROM \"entries\" WHERE \"greek\" IS NOT NULL ORDER BY \"guid\""
        );
    }

    #[test]
    fn words() {
        let mut concordance = fixture();

        let rows = concordance.words(&WordQuery::new("uid", "raw")).unwrap();
        assert_eq!(
            rows.iter()
                .map(|r| (r.ident.as_deref(), r.token.as_deref().unwrap()))
                .collect::<Vec<_>>(),
            vec![
                (None, "orphan"),
                (Some("01001001.1"), "In"),
                (Some("01001001.2"), "beginning"),
                (Some("01001002.1"), "And"),
                (Some("40001001"), "_"),
            ]
        );
    }

    #[test]
    fn numeric_identifiers_read_as_text() {
        let mut concordance = fixture();

        let rows = concordance
            .words(&WordQuery::new("guid", "greek").cross_check("uid"))
            .unwrap();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].ident.as_deref(), Some("1001001.0"));
        assert!(rows[0].cross_ident.as_deref().unwrap().starts_with("01001001."));
        assert_eq!(rows[2].ident.as_deref(), Some("1001002"));
        assert_eq!(rows[2].cross_ident, None);
        assert_eq!(rows[3].ident.as_deref(), Some("40001001"));
    }

    #[test]
    fn missing_column_is_an_error() {
        let mut concordance = fixture();

        assert!(matches!(
            concordance.words(&WordQuery::new("uid", "latin")),
            Err(DbError::Other { .. })
        ));
    }

    #[test]
    fn missing_key_columns_are_named() {
        let mut concordance = fixture();

        vec![
            WordQuery::new("gid", "greek"),
            WordQuery::new("uid", "greek").order_by("guidd"),
            WordQuery::new("uid", "greek").cross_check("gud"),
        ]
        .iter()
        .for_each(|query| match concordance.words(query) {
            Err(DbError::Other { cause }) => assert!(cause.starts_with("No column"), "{}", cause),
            other => panic!("Unexpected result: {:?}", other),
        });
    }

    #[test]
    fn column_names_ignore_case() {
        let mut concordance = fixture();

        let rows = concordance.words(&WordQuery::new("UID", "Raw")).unwrap();
        assert_eq!(rows.len(), 5);
    }

    #[test]
    fn missing_table_is_an_error() {
        let mut concordance = fixture();
        let mut query = WordQuery::new("uid", "raw");
        query.table = "words".to_string();

        assert!(matches!(
            concordance.words(&query),
            Err(DbError::Other { cause }) if cause == "No table 'words'."
        ));
    }
}
