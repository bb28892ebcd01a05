//! Decoding of packed verse identifiers.
//!
//! The concordance carries two identifier conventions. `uid` values are
//! fixed-width decimal strings (`BBCCCVVV`, possibly with a fractional
//! word suffix), while `guid` values are plain magnitudes
//! (`book * 1_000_000 + chapter * 1_000 + verse`). Callers pick the
//! decoder for the column they read; nothing here guesses.

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

use crate::models::VerseKey;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum IdentifierError {
    #[error("'{}' is not a numeric verse identifier.", raw)]
    Malformed { raw: String },

    #[error("'{}' decodes to {}.{}.{}, which is not a verse.", raw, book, chapter, verse)]
    OutOfRange {
        raw: String,
        book: u64,
        chapter: u64,
        verse: u64,
    },
}

/// Trait implemented by the identifier conventions of the source tables.
pub trait IdentifierDecoder {
    /// Short name used in log messages.
    fn name(&self) -> &'static str;

    /// Decodes a raw identifier into a verse key.
    fn decode(&self, raw: &str) -> Result<VerseKey, IdentifierError>;
}

/// `BBCCCVVV` identifiers, zero padded on the left to eight digits.
///
/// Anything after a `.` is a word-level suffix and is ignored.
#[derive(Clone, Copy, Debug, Default)]
pub struct FixedWidth;

impl IdentifierDecoder for FixedWidth {
    fn name(&self) -> &'static str {
        "fixed-width"
    }

    fn decode(&self, raw: &str) -> Result<VerseKey, IdentifierError> {
        lazy_static! {
            static ref FIXED_RE: Regex = Regex::new(r"^(\d{1,8})(?:\.\d*)?$").unwrap();
        }

        let digits = FIXED_RE
            .captures(raw.trim())
            .and_then(|caps| caps.get(1))
            .ok_or_else(|| malformed(raw))?;
        let padded = format!("{:0>8}", digits.as_str());

        // The capture is ASCII digits only, so slicing by byte is safe.
        let book = parse_digits(&padded[0..2], raw)?;
        let chapter = parse_digits(&padded[2..5], raw)?;
        let verse = parse_digits(&padded[5..8], raw)?;

        key(raw, book, chapter, verse)
    }
}

/// `book * 1_000_000 + chapter * 1_000 + verse` identifiers.
///
/// Real-valued forms such as `1001001.0` are accepted and truncated.
#[derive(Clone, Copy, Debug, Default)]
pub struct PackedMagnitude;

impl IdentifierDecoder for PackedMagnitude {
    fn name(&self) -> &'static str {
        "packed"
    }

    fn decode(&self, raw: &str) -> Result<VerseKey, IdentifierError> {
        let trimmed = raw.trim();
        let id = match trimmed.parse::<u64>() {
            Ok(id) => id,
            Err(_) => {
                let real: f64 = trimmed.parse().map_err(|_| malformed(raw))?;
                if !real.is_finite() || real < 0.0 || real >= u64::MAX as f64 {
                    return Err(malformed(raw));
                }
                real.trunc() as u64
            }
        };

        key(raw, id / 1_000_000, (id % 1_000_000) / 1_000, id % 1_000)
    }
}

/// Decodes one row under two conventions and returns both keys when they
/// name different verses.
///
/// Rows where either identifier fails to decode are not compared.
pub fn disagreement<A, B>(a: &A, a_raw: &str, b: &B, b_raw: &str) -> Option<(VerseKey, VerseKey)>
where
    A: IdentifierDecoder,
    B: IdentifierDecoder,
{
    match (a.decode(a_raw), b.decode(b_raw)) {
        (Ok(left), Ok(right)) if left != right => Some((left, right)),
        _ => None,
    }
}

fn parse_digits(digits: &str, raw: &str) -> Result<u64, IdentifierError> {
    digits.parse().map_err(|_| malformed(raw))
}

fn key(raw: &str, book: u64, chapter: u64, verse: u64) -> Result<VerseKey, IdentifierError> {
    let out_of_range = || IdentifierError::OutOfRange {
        raw: raw.to_owned(),
        book,
        chapter,
        verse,
    };

    match (
        u32::try_from(book),
        u32::try_from(chapter),
        u32::try_from(verse),
    ) {
        (Ok(b), Ok(c), Ok(v)) => VerseKey::new(b, c, v).ok_or_else(out_of_range),
        _ => Err(out_of_range()),
    }
}

fn malformed(raw: &str) -> IdentifierError {
    IdentifierError::Malformed {
        raw: raw.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn k(book: u32, chapter: u32, verse: u32) -> VerseKey {
        VerseKey::new(book, chapter, verse).unwrap()
    }

    #[test]
    fn fixed_width() {
        vec![
            ("01001001", k(1, 1, 1)),
            ("1001001", k(1, 1, 1)),
            ("1001001.0", k(1, 1, 1)),
            ("1001001.12", k(1, 1, 1)),
            ("19119105", k(19, 119, 105)),
            ("40001001", k(40, 1, 1)),
            ("66022021.", k(66, 22, 21)),
            (" 43003016 ", k(43, 3, 16)),
        ]
        .iter()
        .for_each(|(raw, expected)| {
            assert_eq!(FixedWidth.decode(raw).unwrap(), *expected, "{}", raw);
        });
    }

    #[test]
    fn fixed_width_round_trip() {
        for book in [1, 19, 39, 40, 66] {
            for chapter in [1, 9, 10, 119, 150] {
                for verse in [1, 16, 105, 176] {
                    let raw = format!("{:02}{:03}{:03}", book, chapter, verse);
                    assert_eq!(FixedWidth.decode(&raw).unwrap(), k(book, chapter, verse));
                }
            }
        }
    }

    #[test]
    fn fixed_width_malformed() {
        vec!["", "abc", "1001a01", "-1001001", "123456789", ".5", "1e6"]
            .iter()
            .for_each(|raw| {
                assert_eq!(
                    FixedWidth.decode(raw),
                    Err(IdentifierError::Malformed {
                        raw: raw.to_string()
                    }),
                    "{}",
                    raw
                );
            });
    }

    #[test]
    fn fixed_width_out_of_range() {
        vec!["1001", "67001001", "01000001", "01001000"]
            .iter()
            .for_each(|raw| {
                assert!(matches!(
                    FixedWidth.decode(raw),
                    Err(IdentifierError::OutOfRange { .. })
                ));
            });
    }

    #[test]
    fn packed() {
        vec![
            ("1001001", k(1, 1, 1)),
            ("1001001.0", k(1, 1, 1)),
            ("1001001.9", k(1, 1, 1)),
            ("19119105", k(19, 119, 105)),
            ("66022021", k(66, 22, 21)),
        ]
        .iter()
        .for_each(|(raw, expected)| {
            assert_eq!(PackedMagnitude.decode(raw).unwrap(), *expected, "{}", raw);
        });
    }

    #[test]
    fn packed_recomposes() {
        for id in [1_001_001u64, 19_119_105, 40_028_020, 66_022_021, 43_003_016] {
            let key = PackedMagnitude.decode(&id.to_string()).unwrap();
            assert_eq!(
                key.book as u64 * 1_000_000 + key.chapter as u64 * 1_000 + key.verse as u64,
                id
            );
        }
    }

    #[test]
    fn packed_malformed() {
        vec!["", "one", "-1001001", "NaN", "inf"]
            .iter()
            .for_each(|raw| {
                assert_eq!(
                    PackedMagnitude.decode(raw),
                    Err(IdentifierError::Malformed {
                        raw: raw.to_string()
                    }),
                    "{}",
                    raw
                );
            });
        assert!(matches!(
            PackedMagnitude.decode("67001001"),
            Err(IdentifierError::OutOfRange { book: 67, .. })
        ));
    }

    #[test]
    fn cross_check() {
        assert_eq!(
            disagreement(&FixedWidth, "01001001", &PackedMagnitude, "1001001"),
            None
        );
        assert_eq!(
            disagreement(&FixedWidth, "01001002", &PackedMagnitude, "1001001"),
            Some((k(1, 1, 2), k(1, 1, 1)))
        );
        assert_eq!(
            disagreement(&FixedWidth, "bad", &PackedMagnitude, "1001001"),
            None
        );
    }
}
