//! Section splitting as a line-oriented state machine.
//!
//! A line opens a section when it is heading-shaped (at most
//! [`MAX_HEADING_WORDS`] words, no sentence punctuation) and contains one of
//! the configured headers as whole words, case-insensitively. So "Skills",
//! "Technical Skills" and "== PROJECTS ==" all open a section. A heading may
//! carry inline content after a colon (`Skills: Python, Docker`). Body lines
//! accumulate under the most recent header until the next header line. A
//! header word inside a sentence never opens a section. Text before the first
//! header belongs to no section. A repeated header appends to the existing
//! section.

use std::collections::HashMap;

/// Longest line, in words, still treated as a heading.
const MAX_HEADING_WORDS: usize = 3;

const SENTENCE_PUNCTUATION: &[char] = &['.', ',', ';', '!', '?'];

#[derive(Debug, Clone, Default)]
pub struct Sections {
    bodies: HashMap<String, Vec<String>>,
}

impl Sections {
    /// Trimmed, non-empty body lines of a section; empty when absent.
    pub fn lines(&self, header: &str) -> Vec<String> {
        self.bodies
            .get(&header.to_lowercase())
            .map(|body| {
                body.iter()
                    .map(|line| line.trim())
                    .filter(|line| !line.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default()
    }
}

pub fn split_sections(text: &str, headers: &[String]) -> Sections {
    let mut bodies: HashMap<String, Vec<String>> = HashMap::new();
    let mut current: Option<String> = None;

    for line in text.lines() {
        if let Some((key, inline)) = match_header(line, headers) {
            let body = bodies.entry(key.clone()).or_default();
            if let Some(inline) = inline {
                body.push(inline.to_string());
            }
            current = Some(key);
        } else if let Some(key) = &current {
            bodies.entry(key.clone()).or_default().push(line.to_string());
        }
    }

    Sections { bodies }
}

fn match_header<'a>(line: &'a str, headers: &[String]) -> Option<(String, Option<&'a str>)> {
    let trimmed = line.trim();
    let (heading, inline) = match trimmed.split_once(':') {
        Some((heading, rest)) => (heading, Some(rest.trim()).filter(|rest| !rest.is_empty())),
        None => (trimmed, None),
    };

    let bare = heading.trim_matches(|c: char| !c.is_alphanumeric());
    if bare.contains(SENTENCE_PUNCTUATION) {
        return None;
    }
    let words: Vec<&str> = bare
        .split_whitespace()
        .map(|word| word.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|word| !word.is_empty())
        .collect();
    if words.is_empty() || words.len() > MAX_HEADING_WORDS {
        return None;
    }

    headers
        .iter()
        .find(|header| contains_words(&words, header))
        .map(|header| (header.to_lowercase(), inline))
}

/// True when `header`'s words appear consecutively in `words`.
fn contains_words(words: &[&str], header: &str) -> bool {
    let target: Vec<&str> = header.split_whitespace().collect();
    if target.is_empty() || target.len() > words.len() {
        return false;
    }
    words.windows(target.len()).any(|window| {
        window
            .iter()
            .zip(&target)
            .all(|(word, expected)| word.eq_ignore_ascii_case(expected))
    })
}
