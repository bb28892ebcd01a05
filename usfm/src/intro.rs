//! Conversion of the published HTML introduction into a USFM
//! introduction book.

use std::fs;
use std::path::PathBuf;

use log::{debug, info};
use scraper::{ElementRef, Html, Node, Selector};
use url::Url;

use crate::Error;

/// Id of the `div` holding the introduction.
pub const CONTAINER_ID: &str = "Introduction";

/// Header lines of the introduction book.
const HEADER: [&str; 3] = ["\\id INT", "\\usfm 3.0", "\\ide UTF-8"];

/// Closing marker of the introduction book.
const END: &str = "\\ie";

/// A run of lines to drop from the converted introduction. The page
/// repeats a block; it starts at the first line containing `start` and
/// ends at the first line from there on containing `end`.
#[derive(Clone, Debug, PartialEq)]
pub struct Excision {
    pub start: String,
    pub end: String,
}

impl Default for Excision {
    fn default() -> Self {
        Self {
            start: "\\ip \\jmp https://www.wiebefamily.org/Greek.htm".to_string(),
            end: "first the New Testament.".to_string(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct IntroConfig {
    pub url: Url,
    pub container_id: String,
    pub excision: Option<Excision>,
    pub out_dir: PathBuf,
    pub file_name: String,
}

/// Downloads the introduction page, converts it and writes the USFM file.
pub fn run(config: &IntroConfig) -> Result<PathBuf, Error> {
    info!("Downloading {}", config.url);
    let html = fetch(&config.url)?;

    write_intro(&html, config)
}

/// Converts an already fetched page and writes the USFM file. Nothing is
/// written when the conversion fails.
pub fn write_intro(html: &str, config: &IntroConfig) -> Result<PathBuf, Error> {
    info!("Converting HTML to USFM");
    let usfm = convert(html, &config.container_id, config.excision.as_ref())?;

    fs::create_dir_all(&config.out_dir).map_err(|e| Error::Io {
        path: config.out_dir.display().to_string(),
        cause: e.to_string(),
    })?;
    let path = config.out_dir.join(&config.file_name);
    fs::write(&path, usfm).map_err(|e| Error::Io {
        path: path.display().to_string(),
        cause: e.to_string(),
    })?;

    info!("Saved: {}", path.display());
    Ok(path)
}

/// Fetches a page, decoding the body as UTF-8 whatever the server
/// declares.
pub fn fetch(url: &Url) -> Result<String, Error> {
    let fetch_error = |e: reqwest::Error| Error::Fetch {
        url: url.to_string(),
        cause: e.to_string(),
    };

    let bytes = reqwest::blocking::get(url.clone())
        .and_then(|resp| resp.error_for_status())
        .and_then(|resp| resp.bytes())
        .map_err(fetch_error)?;

    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Converts a whole page into the text of the introduction book.
pub fn convert(
    html: &str,
    container_id: &str,
    excision: Option<&Excision>,
) -> Result<String, Error> {
    let mut lines = transform(html, container_id)?;
    if let Some(excision) = excision {
        if excise(&mut lines, excision) {
            info!("Removed the repeated block at '{}'", excision.start);
        }
    }
    Ok(render(&lines))
}

/// Maps the block elements inside the container to USFM introduction
/// lines, in document order.
pub fn transform(html: &str, container_id: &str) -> Result<Vec<String>, Error> {
    let document = Html::parse_document(html);
    let selector_text = format!("div[id=\"{}\"]", container_id.replace('"', "\\\""));
    let selector = Selector::parse(&selector_text).map_err(|e| Error::Selector {
        selector: selector_text.clone(),
        cause: e.to_string(),
    })?;

    let container = document
        .select(&selector)
        .next()
        .ok_or_else(|| Error::ContainerNotFound {
            id: container_id.to_owned(),
        })?;

    let mut lines = Vec::new();
    let mut first_heading = true;

    // Nested blocks each produce their own line, so a paragraph inside a
    // div appears twice.
    for element in container.descendants().skip(1).filter_map(ElementRef::wrap) {
        let marker = match element.value().name() {
            "h1" | "h2" | "h3" | "h4" if first_heading => "\\imt",
            "h1" | "h2" | "h3" | "h4" => "\\is",
            "p" | "div" | "section" | "article" => "\\ip",
            "li" => "\\ili1",
            "blockquote" => "\\iq1",
            _ => continue,
        };

        let text = clean(&inline(element));
        if text.is_empty() {
            continue;
        }
        if marker == "\\imt" {
            first_heading = false;
        }

        debug!("{} {}", marker, text);
        lines.push(format!("{} {}", marker, text));
    }

    Ok(lines)
}

/// Removes the first run of lines delimited by the excision anchors.
///
/// Nothing is removed unless both anchors are found in order.
pub fn excise(lines: &mut Vec<String>, excision: &Excision) -> bool {
    let start = match lines.iter().position(|l| l.contains(&excision.start)) {
        Some(start) => start,
        None => return false,
    };
    let end = match lines[start..]
        .iter()
        .position(|l| l.contains(&excision.end))
    {
        Some(offset) => start + offset,
        None => return false,
    };

    lines.drain(start..=end);
    true
}

/// Assembles the introduction book around the converted lines.
pub fn render(lines: &[String]) -> String {
    let mut usfm: Vec<&str> = HEADER.to_vec();
    usfm.push("");
    usfm.extend(lines.iter().map(String::as_str));
    usfm.push("");
    usfm.push(END);
    usfm.push("");

    usfm.join("\n")
}

/// Renders the inline content of an element.
fn inline(element: ElementRef) -> String {
    match element.value().name() {
        "i" | "em" => format!(" \\it {} \\it*", children(element)),
        "b" | "strong" => format!(" \\bd {} \\bd*", children(element)),
        "a" => {
            let text = children(element);
            match element.value().attr("href").map(str::trim) {
                Some(href) if !href.is_empty() => {
                    format!(" \\jmp {}|link-href=\"{}\"\\jmp*", text, href)
                }
                _ => text,
            }
        }
        "br" => "\n".to_string(),
        _ => children(element),
    }
}

fn children(element: ElementRef) -> String {
    element
        .children()
        .map(|child| match child.value() {
            Node::Text(text) => clean(text),
            Node::Element(_) => ElementRef::wrap(child).map(inline).unwrap_or_default(),
            _ => String::new(),
        })
        .collect()
}

/// Normalises non-breaking spaces and trims.
fn clean(s: &str) -> String {
    s.replace('\u{a0}', " ").trim().to_string()
}
