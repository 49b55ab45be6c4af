use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::models::profile::JobProfile;
use crate::scoring::content::contained;
use crate::scoring::grammar::GrammarIssues;

static TABLE_MARKUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<table|<td|<tr").expect("table markup pattern"));

const TAILORING_POINTS: u32 = 4;
const GRAMMAR_FALLBACK_POINTS: u32 = 2;
const ATS_POINTS: u32 = 4;

/// `(max words, points)`; longer texts earn nothing.
const CONCISENESS_TIERS: [(usize, u32); 3] = [(800, 5), (1200, 3), (1600, 1)];
/// `(max issues, points)`; more issues earn nothing.
const GRAMMAR_TIERS: [(usize, u32); 3] = [(2, 5), (5, 3), (10, 1)];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizationBreakdown {
    /// Informational only: tailoring points do not scale with matches.
    pub tailoring: Vec<String>,
    pub spelling_grammar_issues: GrammarIssues,
    pub concise: bool,
    pub ats_friendly: bool,
}

/// Pure part of the optimization score. The grammar result is fetched by the
/// engine beforehand.
pub fn score_optimization(
    text: &str,
    profile: &JobProfile,
    grammar: GrammarIssues,
) -> (u32, OptimizationBreakdown) {
    let mut score = TAILORING_POINTS;
    let tailoring = contained(&text.to_lowercase(), &profile.job_specific_keywords);

    score += match grammar {
        GrammarIssues::Count(issues) => tier_points(&GRAMMAR_TIERS, issues),
        GrammarIssues::Unavailable => GRAMMAR_FALLBACK_POINTS,
    };

    let words = text.split_whitespace().count();
    score += tier_points(&CONCISENESS_TIERS, words);

    let ats_friendly = !TABLE_MARKUP.is_match(text);
    if ats_friendly {
        score += ATS_POINTS;
    }

    let breakdown = OptimizationBreakdown {
        tailoring,
        spelling_grammar_issues: grammar,
        concise: words <= CONCISENESS_TIERS[0].0,
        ats_friendly,
    };
    (score, breakdown)
}

fn tier_points(tiers: &[(usize, u32)], value: usize) -> u32 {
    tiers
        .iter()
        .find(|(max, _)| value <= *max)
        .map(|(_, points)| *points)
        .unwrap_or(0)
}
