//! Canonical book tables.
//!
//! Both tables list the 66 books in canonical order, so the descriptor of
//! book `n` is at index `n - 1`. Old Testament books carry no title.

use serde_derive::Serialize;

/// Last book of the Old Testament.
pub const MALACHI: u32 = 39;

/// A book's USFM code, display name and running-head title.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct BookDescriptor {
    pub code: &'static str,
    pub name: &'static str,
    pub title: &'static str,
}

const fn book(code: &'static str, name: &'static str, title: &'static str) -> BookDescriptor {
    BookDescriptor { code, name, title }
}

/// English running heads.
pub const ENGLISH: [BookDescriptor; 66] = [
    book("GEN", "Genesis", ""),
    book("EXO", "Exodus", ""),
    book("LEV", "Leviticus", ""),
    book("NUM", "Numbers", ""),
    book("DEU", "Deuteronomy", ""),
    book("JOS", "Joshua", ""),
    book("JDG", "Judges", ""),
    book("RUT", "Ruth", ""),
    book("1SA", "1 Samuel", ""),
    book("2SA", "2 Samuel", ""),
    book("1KI", "1 Kings", ""),
    book("2KI", "2 Kings", ""),
    book("1CH", "1 Chronicles", ""),
    book("2CH", "2 Chronicles", ""),
    book("EZR", "Ezra", ""),
    book("NEH", "Nehemiah", ""),
    book("EST", "Esther", ""),
    book("JOB", "Job", ""),
    book("PSA", "Psalms", ""),
    book("PRO", "Proverbs", ""),
    book("ECC", "Ecclesiastes", ""),
    book("SNG", "Song of Solomon", ""),
    book("ISA", "Isaiah", ""),
    book("JER", "Jeremiah", ""),
    book("LAM", "Lamentations", ""),
    book("EZK", "Ezekiel", ""),
    book("DAN", "Daniel", ""),
    book("HOS", "Hosea", ""),
    book("JOL", "Joel", ""),
    book("AMO", "Amos", ""),
    book("OBA", "Obadiah", ""),
    book("JON", "Jonah", ""),
    book("MIC", "Micah", ""),
    book("NAM", "Nahum", ""),
    book("HAB", "Habakkuk", ""),
    book("ZEP", "Zephaniah", ""),
    book("HAG", "Haggai", ""),
    book("ZEC", "Zechariah", ""),
    book("MAL", "Malachi", ""),
    book("MAT", "Matthew", "Good-message according-to Matthew"),
    book("MRK", "Mark", "Good-message according-to Mark"),
    book("LUK", "Luke", "Good-message according-to Luke"),
    book("JHN", "John", "Good-message according-to John"),
    book("ACT", "Acts", "Practices of{the sent-off[one]s}"),
    book("ROM", "Romans", "Toward Romans"),
    book("1CO", "1 Corinthians", "Toward Corinthians, Alpha"),
    book("2CO", "2 Corinthians", "Toward Corinthians, Beta"),
    book("GAL", "Galatians", "Toward Galatians"),
    book("EPH", "Ephesians", "Toward Ephesians"),
    book("PHP", "Philippians", "Toward Philippians"),
    book("COL", "Colossians", "Toward Colossians"),
    book("1TH", "1 Thessalonians", "Toward Thessalonians, Alpha"),
    book("2TH", "2 Thessalonians", "Toward Thessalonians, Beta"),
    book("1TI", "1 Timothy", "Toward Timothy, Alpha"),
    book("2TI", "2 Timothy", "Toward Timothy, Beta"),
    book("TIT", "Titus", "Toward Titus"),
    book("PHM", "Philemon", "Toward Philemon"),
    book("HEB", "Hebrews", "Toward Hebrews"),
    book("JAS", "James", "[James]"),
    book("1PE", "1 Peter", "[1 Peter]"),
    book("2PE", "2 Peter", "[2 Peter]"),
    book("1JN", "1 John", "[1 John]"),
    book("2JN", "2 John", "[2 John]"),
    book("3JN", "3 John", "[3 John]"),
    book("JUD", "Jude", "[Jude]"),
    book("REV", "Revelation", "[Revelation]"),
];

/// Greek running heads.
pub const GREEK: [BookDescriptor; 66] = [
    book("GEN", "Genesis", ""),
    book("EXO", "Exodus", ""),
    book("LEV", "Leviticus", ""),
    book("NUM", "Numbers", ""),
    book("DEU", "Deuteronomy", ""),
    book("JOS", "Joshua", ""),
    book("JDG", "Judges", ""),
    book("RUT", "Ruth", ""),
    book("1SA", "1 Samuel", ""),
    book("2SA", "2 Samuel", ""),
    book("1KI", "1 Kings", ""),
    book("2KI", "2 Kings", ""),
    book("1CH", "1 Chronicles", ""),
    book("2CH", "2 Chronicles", ""),
    book("EZR", "Ezra", ""),
    book("NEH", "Nehemiah", ""),
    book("EST", "Esther", ""),
    book("JOB", "Job", ""),
    book("PSA", "Psalms", ""),
    book("PRO", "Proverbs", ""),
    book("ECC", "Ecclesiastes", ""),
    book("SNG", "Song of Solomon", ""),
    book("ISA", "Isaiah", ""),
    book("JER", "Jeremiah", ""),
    book("LAM", "Lamentations", ""),
    book("EZK", "Ezekiel", ""),
    book("DAN", "Daniel", ""),
    book("HOS", "Hosea", ""),
    book("JOL", "Joel", ""),
    book("AMO", "Amos", ""),
    book("OBA", "Obadiah", ""),
    book("JON", "Jonah", ""),
    book("MIC", "Micah", ""),
    book("NAM", "Nahum", ""),
    book("HAB", "Habakkuk", ""),
    book("ZEP", "Zephaniah", ""),
    book("HAG", "Haggai", ""),
    book("ZEC", "Zechariah", ""),
    book("MAL", "Malachi", ""),
    book("MAT", "Matthew", "ευαγγελιον κατα ματθαιον"),
    book("MRK", "Mark", "ευαγγελιον κατα μαρκον"),
    book("LUK", "Luke", "ευαγγελιον κατα λογκαν"),
    book("JHN", "John", "ευαγγελιον κατα ιωαννην"),
    book("ACT", "Acts", "πραξεις αποστολων"),
    book("ROM", "Romans", "προς ρωμαιους"),
    book("1CO", "1 Corinthians", "προς κορινθιους α"),
    book("2CO", "2 Corinthians", "προς κορινθιους β"),
    book("GAL", "Galatians", "προς γαλατας"),
    book("EPH", "Ephesians", "προς εφεσιους"),
    book("PHP", "Philippians", "προς φιλιππησιους"),
    book("COL", "Colossians", "προς κολοσσαεις"),
    book("1TH", "1 Thessalonians", "προς θεσσαλονικεις α"),
    book("2TH", "2 Thessalonians", "προς θεσσαλονικεις β"),
    book("1TI", "1 Timothy", "προς τιμοθεον α"),
    book("2TI", "2 Timothy", "προς τιμοθεον β"),
    book("TIT", "Titus", "προς τιτον"),
    book("PHM", "Philemon", "προς φιλημονα"),
    book("HEB", "Hebrews", "προς εβραιους"),
    book("JAS", "James", "[James]"),
    book("1PE", "1 Peter", "[1 Peter]"),
    book("2PE", "2 Peter", "[2 Peter]"),
    book("1JN", "1 John", "[1 John]"),
    book("2JN", "2 John", "[2 John]"),
    book("3JN", "3 John", "[3 John]"),
    book("JUD", "Jude", "[Jude]"),
    book("REV", "Revelation", "[Revelation]"),
];

/// Looks up the descriptor of a canonical book number (1-based).
pub fn descriptor(table: &[BookDescriptor; 66], book: u32) -> Option<&BookDescriptor> {
    let index = usize::try_from(book).ok()?.checked_sub(1)?;
    table.get(index)
}

/// Sequence number used in USFM file names.
///
/// New Testament books skip one number after Malachi, so Matthew (book 40)
/// is written as `41`.
pub fn sequence_number(book: u32) -> u32 {
    if book > MALACHI {
        book + 1
    } else {
        book
    }
}
