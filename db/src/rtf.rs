//! RTF encoding of verse text for eSword.
//!
//! eSword renders Greek through a Windows-1253 font, so every character
//! of the Greek and Coptic block becomes a `\'hh` code-page escape. Other
//! characters pass through, apart from the three RTF control characters.

use std::ops::RangeInclusive;

use encoding_rs::WINDOWS_1253;

use crate::DbError;

/// Font selection prefixed to every encoded string.
pub const FONT_ESCAPE: &str = "\\f1";

/// The Greek and Coptic block.
pub const GREEK_BLOCK: RangeInclusive<char> = '\u{0370}'..='\u{03FF}';

/// Encodes `text` as RTF, failing on Greek characters Windows-1253 lacks.
pub fn encode_greek(text: &str) -> Result<String, DbError> {
    let mut rtf = String::with_capacity(FONT_ESCAPE.len() + text.len() * 4);
    rtf.push_str(FONT_ESCAPE);

    for c in text.chars() {
        match c {
            c if GREEK_BLOCK.contains(&c) => {
                let mut buf = [0u8; 4];
                let (bytes, _, had_errors) = WINDOWS_1253.encode(c.encode_utf8(&mut buf));
                if had_errors {
                    return Err(DbError::Unmappable { character: c });
                }
                for b in bytes.iter() {
                    rtf.push_str(&format!("\\'{:02x}", b));
                }
            }
            '\\' | '{' | '}' => {
                rtf.push('\\');
                rtf.push(c);
            }
            c => rtf.push(c),
        }
    }

    Ok(rtf)
}
