use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::models::resume::ParsedResume;
use crate::parsing::FileFormat;
use crate::vocabulary::Vocabulary;

static BULLET_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*[–•●*-]\s+").expect("bullet pattern"));

static MONTH_YEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)[a-z]*\s+\d{2,4}\b")
        .expect("month-year pattern")
});

pub const SECTION_PRESENCE_POINTS: u32 = 5;
pub const CONTACT_INFO_POINTS: u32 = 2;
pub const BULLET_POINTS: u32 = 3;
pub const DATE_FORMAT_POINTS: u32 = 2;
pub const FONT_ALIGNMENT_POINTS: u32 = 2;
pub const WHITESPACE_POINTS: u32 = 2;
pub const HEADER_CLARITY_POINTS: u32 = 2;
pub const FILE_FORMAT_POINTS: u32 = 2;

const MIN_HEADERS: usize = 3;
const MIN_DATES: usize = 2;
const MIN_LINES: usize = 40;
const MAX_AVG_LINE_LEN: f64 = 90.0;

/// Eight all-or-nothing checks over the raw text.
///
/// `font_alignment_consistency` has no layout data to inspect; it reuses the
/// month-year date signal as a proxy and always agrees with
/// `date_format_consistency`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FormattingBreakdown {
    pub section_presence: bool,
    pub contact_info_present: bool,
    pub bullet_point_usage: bool,
    pub font_alignment_consistency: bool,
    pub date_format_consistency: bool,
    pub whitespace_and_spacing: bool,
    pub header_clarity: bool,
    pub file_format_check: bool,
}

impl FormattingBreakdown {
    /// Sum of the points of every passing check.
    pub fn points(&self) -> u32 {
        [
            (self.section_presence, SECTION_PRESENCE_POINTS),
            (self.contact_info_present, CONTACT_INFO_POINTS),
            (self.bullet_point_usage, BULLET_POINTS),
            (self.font_alignment_consistency, FONT_ALIGNMENT_POINTS),
            (self.date_format_consistency, DATE_FORMAT_POINTS),
            (self.whitespace_and_spacing, WHITESPACE_POINTS),
            (self.header_clarity, HEADER_CLARITY_POINTS),
            (self.file_format_check, FILE_FORMAT_POINTS),
        ]
        .iter()
        .filter(|(passed, _)| *passed)
        .map(|(_, points)| points)
        .sum()
    }
}

pub fn score_formatting(
    text: &str,
    resume: &ParsedResume,
    format: Option<FileFormat>,
    vocab: &Vocabulary,
) -> (u32, FormattingBreakdown) {
    let lower = text.to_lowercase();
    let headers: Vec<String> = vocab
        .formatting_headers
        .iter()
        .map(|h| h.to_lowercase())
        .collect();

    let headers_found = headers.iter().filter(|h| lower.contains(h.as_str())).count();
    let dates_found = MONTH_YEAR.find_iter(text).count();

    let filled: Vec<&str> = text
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    let avg_len = if filled.is_empty() {
        0.0
    } else {
        filled.iter().map(|l| l.chars().count()).sum::<usize>() as f64 / filled.len() as f64
    };

    let header_lines = lower
        .split('\n')
        .filter(|line| {
            let line = line.trim();
            headers.iter().any(|h| line.contains(h.as_str()))
        })
        .count();

    let breakdown = FormattingBreakdown {
        section_presence: headers_found >= MIN_HEADERS,
        contact_info_present: resume.has_contact_info(),
        bullet_point_usage: BULLET_LINE.is_match(text),
        font_alignment_consistency: dates_found >= MIN_DATES,
        date_format_consistency: dates_found >= MIN_DATES,
        whitespace_and_spacing: filled.len() > MIN_LINES && avg_len < MAX_AVG_LINE_LEN,
        header_clarity: header_lines >= MIN_HEADERS,
        file_format_check: format == Some(FileFormat::Pdf),
    };

    (breakdown.points(), breakdown)
}
