use std::fmt;
use std::ops::RangeInclusive;

/// Canonical book numbers accepted in a verse key.
pub const BOOKS: RangeInclusive<u32> = 1..=66;

/// The (book, chapter, verse) triple identifying one verse.
///
/// Keys order by book, then chapter, then verse, which is the order the
/// exporters write verses in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VerseKey {
    pub book: u32,
    pub chapter: u32,
    pub verse: u32,
}

impl VerseKey {
    /// Builds a key, rejecting book numbers outside 1..=66 and zero
    /// chapters or verses.
    pub fn new(book: u32, chapter: u32, verse: u32) -> Option<Self> {
        if BOOKS.contains(&book) && chapter >= 1 && verse >= 1 {
            Some(Self {
                book,
                chapter,
                verse,
            })
        } else {
            None
        }
    }
}

impl fmt::Display for VerseKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}:{}", self.book, self.chapter, self.verse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new() {
        vec![
            ((1, 1, 1), true),
            ((66, 22, 21), true),
            ((40, 1, 1), true),
            ((0, 1, 1), false),
            ((67, 1, 1), false),
            ((1, 0, 1), false),
            ((1, 1, 0), false),
        ]
        .iter()
        .for_each(|((book, chapter, verse), valid)| {
            assert_eq!(VerseKey::new(*book, *chapter, *verse).is_some(), *valid);
        });
    }

    #[test]
    fn order() {
        let mut keys = vec![
            VerseKey::new(2, 1, 1).unwrap(),
            VerseKey::new(1, 10, 1).unwrap(),
            VerseKey::new(1, 2, 30).unwrap(),
            VerseKey::new(1, 2, 4).unwrap(),
        ];
        keys.sort();

        assert_eq!(
            keys.iter().map(|k| k.to_string()).collect::<Vec<_>>(),
            vec!["1 2:4", "1 2:30", "1 10:1", "2 1:1"]
        );
    }
}
