use std::collections::{BTreeMap, HashMap, HashSet};

use log::{debug, warn};

use crate::identifier::IdentifierDecoder;
use crate::models::{VerseKey, VerseText, WordRow};

/// Aggregated verses in canonical order.
pub type Verses = BTreeMap<VerseKey, VerseText>;

/// Token marking a word slot with no rendering.
pub const PLACEHOLDER: &str = "_";

/// Decides whether a token joins the verse built so far.
///
/// Each export pipeline has its own policy; they make different
/// assumptions about their source columns and are not interchangeable.
pub trait DedupPolicy {
    fn admit(&mut self, key: VerseKey, token: &str, verse: &[String]) -> bool;
}

/// Drops a token equal to the one right before it in the same verse.
#[derive(Clone, Copy, Debug, Default)]
pub struct AdjacentRepeat;

impl DedupPolicy for AdjacentRepeat {
    fn admit(&mut self, _: VerseKey, token: &str, verse: &[String]) -> bool {
        verse.last().map(String::as_str) != Some(token)
    }
}

/// Drops an underscore compound that already occurred in the same verse.
#[derive(Clone, Debug, Default)]
pub struct SeenCompound {
    seen: HashMap<VerseKey, HashSet<String>>,
}

impl DedupPolicy for SeenCompound {
    fn admit(&mut self, key: VerseKey, token: &str, _: &[String]) -> bool {
        let seen = self.seen.entry(key).or_default();
        if token.contains('_') && seen.contains(token) {
            return false;
        }
        seen.insert(token.to_owned());
        true
    }
}

/// Groups word rows into verses.
///
/// Rows must be pushed in source order; tokens are never re-sorted.
pub struct VerseAggregator<D, P> {
    decoder: D,
    policy: P,
    column: String,
    verses: Verses,
    skipped: usize,
}

impl<D, P> VerseAggregator<D, P>
where
    D: IdentifierDecoder,
    P: DedupPolicy,
{
    /// Creates an aggregator decoding identifiers read from `column`.
    pub fn new(decoder: D, policy: P, column: &str) -> Self {
        Self {
            decoder,
            policy,
            column: column.to_owned(),
            verses: Verses::new(),
            skipped: 0,
        }
    }

    /// Adds one row, returning the verse it was filed under.
    ///
    /// Rows with a missing, empty or placeholder token are ignored, as are
    /// rows whose identifier does not decode. Bad identifiers are logged
    /// and counted.
    pub fn push(&mut self, row: &WordRow) -> Option<VerseKey> {
        let token = match row.token.as_deref().map(str::trim) {
            Some(token) if !token.is_empty() && token != PLACEHOLDER => token,
            _ => return None,
        };

        let raw = match row.ident.as_deref() {
            Some(raw) => raw,
            None => {
                debug!("Skipping '{}' without {}", token, self.column);
                return None;
            }
        };

        let key = match self.decoder.decode(raw) {
            Ok(key) => key,
            Err(e) => {
                warn!(
                    "Skipping {}={} ({} identifier): {}",
                    self.column,
                    raw,
                    self.decoder.name(),
                    e
                );
                self.skipped += 1;
                return None;
            }
        };

        let verse = self.verses.entry(key).or_default();
        if self.policy.admit(key, token, &verse.tokens) {
            verse.tokens.push(token.to_owned());
        }

        Some(key)
    }

    /// Number of rows dropped for a bad identifier so far.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn finish(self) -> Verses {
        self.verses
            .into_iter()
            .filter(|(_, text)| !text.tokens.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifier::{FixedWidth, PackedMagnitude};

    fn usfm_verses(rows: &[(&str, &str)]) -> Verses {
        let mut agg = VerseAggregator::new(FixedWidth, AdjacentRepeat, "uid");
        rows.iter()
            .for_each(|(id, token)| {
                agg.push(&WordRow::new(id, token));
            });
        agg.finish()
    }

    fn bblx_verses(rows: &[(&str, &str)]) -> Verses {
        let mut agg = VerseAggregator::new(PackedMagnitude, SeenCompound::default(), "guid");
        rows.iter()
            .for_each(|(id, token)| {
                agg.push(&WordRow::new(id, token));
            });
        agg.finish()
    }

    fn text(verses: &Verses, book: u32, chapter: u32, verse: u32) -> String {
        verses[&VerseKey::new(book, chapter, verse).unwrap()].to_string()
    }

    #[test]
    fn keeps_source_order() {
        let verses = usfm_verses(&[
            ("01001001", "In"),
            ("01001001", "beginning"),
            ("01001001", "God"),
            ("01001001", "created"),
        ]);

        assert_eq!(verses.len(), 1);
        assert_eq!(text(&verses, 1, 1, 1), "In beginning God created");
    }

    #[test]
    fn groups_by_verse() {
        let verses = usfm_verses(&[
            ("01001002", "And"),
            ("01001001", "In"),
            ("40001001", "Book"),
            ("01001002", "the"),
        ]);

        assert_eq!(
            verses
                .iter()
                .map(|(k, v)| format!("{} {}", k, v))
                .collect::<Vec<_>>(),
            vec!["1 1:1 In", "1 1:2 And the", "40 1:1 Book"]
        );
    }

    #[test]
    fn skips_placeholders_and_blanks() {
        let mut agg = VerseAggregator::new(FixedWidth, AdjacentRepeat, "uid");
        agg.push(&WordRow::new("01001001", "_"));
        agg.push(&WordRow::new("01001001", "  "));
        agg.push(&WordRow::new("01001001", " In "));
        agg.push(&WordRow {
            ident: Some("01001001".to_string()),
            cross_ident: None,
            token: None,
        });
        agg.push(&WordRow::new("01001001", "_"));
        let verses = agg.finish();

        assert_eq!(text(&verses, 1, 1, 1), "In");
    }

    #[test]
    fn placeholder_only_verse_is_dropped() {
        let verses = usfm_verses(&[("01001001", "_"), ("01001002", "And")]);

        assert_eq!(verses.len(), 1);
        assert!(!verses.contains_key(&VerseKey::new(1, 1, 1).unwrap()));
    }

    #[test]
    fn adjacent_repeats_collapse() {
        let verses = usfm_verses(&[
            ("01001001", "word"),
            ("01001001", "word"),
            ("01001001", "x"),
            ("01001001", "word"),
        ]);

        assert_eq!(text(&verses, 1, 1, 1), "word x word");
    }

    #[test]
    fn adjacent_repeat_is_per_verse() {
        let verses = usfm_verses(&[("01001001", "and"), ("01001002", "and")]);

        assert_eq!(text(&verses, 1, 1, 1), "and");
        assert_eq!(text(&verses, 1, 1, 2), "and");
    }

    #[test]
    fn bad_identifiers_are_counted() {
        let mut agg = VerseAggregator::new(FixedWidth, AdjacentRepeat, "uid");
        assert_eq!(agg.push(&WordRow::new("oops", "In")), None);
        assert_eq!(agg.push(&WordRow::new("99001001", "In")), None);
        assert_eq!(
            agg.push(&WordRow::new("01001001", "In")),
            VerseKey::new(1, 1, 1)
        );
        assert_eq!(agg.skipped(), 2);
        assert_eq!(agg.finish().len(), 1);
    }

    #[test]
    fn seen_compounds_are_dropped() {
        let verses = bblx_verses(&[
            ("1001001", "ἐν_ἀρχῇ"),
            ("1001001", "ἦν"),
            ("1001001", "ἐν_ἀρχῇ"),
            ("1001001", "ἦν"),
            ("1001002", "ἐν_ἀρχῇ"),
        ]);

        assert_eq!(text(&verses, 1, 1, 1), "ἐν_ἀρχῇ ἦν ἦν");
        assert_eq!(text(&verses, 1, 1, 2), "ἐν_ἀρχῇ");
    }

    #[test]
    fn seen_compound_ignores_adjacency() {
        let verses = bblx_verses(&[("1001001.0", "the"), ("1001001.0", "the")]);

        assert_eq!(text(&verses, 1, 1, 1), "the the");
    }
}
