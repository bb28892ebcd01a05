//! The published GHT exports.

use std::path::Path;

use db::bblx::{BblxExport, ModuleDetails};
use db::WordQuery;
use usfm::canon::{ENGLISH, GREEK};
use usfm::UsfmExport;

/// Comments shared by both eSword modules.
const MODULE_INFO: &str = "\\strike\\'a9\\strike0 Dedicated to the Public Domain.\\par Garth's Hyper-literal Translation sets a new bar as \"the only English translation actually achieving, or nearly achieving, 'formal equivalence' (faithful to the lexical/grammatical details of the source language)... It is for serious bible study for those who do not know Greek (yet), or who do know it but are not yet able to easily sight read it in the way they are able to sight read English at a glance... If you want to know what the original says, as close to the original as possible, translating every original word and every original grammatical construct, at the expense of nice English, yet still reasonably understandable in English, then this is the translation for you.\" Note, this translation does not pretend to tell you what the scriptures mean; only what they say. It your responsibility to interpret what is said in its proper context. Refer to the introduction at https://www.wiebefamily.org/GHT.htm for more details about the translation philosophy, formatting choices, textual basis, and translator qualification.\\par The module is maintained by Nathan; contact information is found at https://www.ghukek.com/ght.html. Please direct any module-specific issues (such as discrepancies between the module and the source) to him. Please keep in mind that this module will be updated less frequently than the source. Before contacting Garth with translation concerns, check the source to verify the current reading.";

const GREEK_COMMENTS: &str = "\\par This module is the Greek textual basis for the GHT, compiled by means of back-translation \\'e0 la Scrivener as part of the validation process. It does not perfectly correspond to any published Greek New Testament but every variance from them is supported by significant manuscript evidence.";

const ENGLISH_COMMENTS: &str = "\\par This English text of the GHT is retrieved from the original source and has been checked for textual, lexical, and grammatical consistency using a battery of automated tools with manual oversight.";

/// English and Greek USFM exports, in that order, under `out_root`.
pub fn usfm_exports(out_root: &Path) -> Vec<UsfmExport> {
    vec![
        UsfmExport {
            query: WordQuery::new("uid", "raw"),
            books: &ENGLISH,
            tag: "GHT".to_string(),
            out_dir: out_root.join("ght_usfm"),
        },
        // Greek words follow the Greek word order but are keyed by the
        // English verse.
        UsfmExport {
            query: WordQuery::new("uid", "greek")
                .order_by("guid")
                .cross_check("guid"),
            books: &GREEK,
            tag: "GHTG".to_string(),
            out_dir: out_root.join("ghtg_usfm"),
        },
    ]
}

/// Greek and English eSword modules, in that order, under `out_root`.
pub fn bblx_exports(out_root: &Path) -> Vec<BblxExport> {
    vec![
        BblxExport {
            output: out_root.join("ght-g.bblx"),
            query: WordQuery::new("guid", "greek"),
            details: ModuleDetails {
                description: "Garth's Hyper-literal Translation, Greek Text".to_string(),
                abbreviation: "GHTg".to_string(),
                comments: format!("{}{}", MODULE_INFO, GREEK_COMMENTS),
                font: "Greek".to_string(),
                language: "el".to_string(),
            },
        },
        BblxExport {
            output: out_root.join("ght.bblx"),
            query: WordQuery::new("uid", "raw"),
            details: ModuleDetails {
                description: "Garth's Hyper-literal Translation".to_string(),
                abbreviation: "GHT".to_string(),
                comments: format!("{}{}", MODULE_INFO, ENGLISH_COMMENTS),
                font: "English".to_string(),
                language: "en".to_string(),
            },
        },
    ]
}
