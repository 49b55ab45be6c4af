use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::models::profile::JobProfile;
use crate::models::resume::ParsedResume;
use crate::vocabulary::Vocabulary;

/// Percentages, money, scale words and "N+ users"-style counts.
static QUANTIFIED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\d+%|\d+\s?(?:k|K|million|crore|billion|lakh|lakhs|thousand|thousands)|\$\d+|\d+\+\s?(?:users|clients|projects|leads|deals|campaigns|customers|downloads)",
    )
    .expect("quantified achievement pattern")
});

const REQUIRED_POINTS: u32 = 2;
const REQUIRED_CAP: u32 = 10;
const PREFERRED_CAP: u32 = 5;
const QUALIFICATION_POINTS: u32 = 10;
const ACTION_LINE_CAP: u32 = 5;
const KEYWORD_CAP: u32 = 10;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ContentBreakdown {
    pub required_matched: Vec<String>,
    pub preferred_matched: Vec<String>,
    pub missing_required: Vec<String>,
    pub qualifications_found: bool,
    pub action_verb_lines: Vec<String>,
    pub keywords_matches: Vec<String>,
}

/// Scores the extracted entities (not the raw text) against the profile.
pub fn score_content(
    resume: &ParsedResume,
    profile: &JobProfile,
    vocab: &Vocabulary,
) -> (u32, ContentBreakdown) {
    let corpus = resume.corpus();
    let lower = corpus.to_lowercase();
    let mut breakdown = ContentBreakdown::default();
    let mut score = 0;

    let (matched, missing): (Vec<String>, Vec<String>) = profile
        .required_skills
        .iter()
        .cloned()
        .partition(|skill| lower.contains(&skill.to_lowercase()));
    score += (count(&matched) * REQUIRED_POINTS).min(REQUIRED_CAP);
    breakdown.required_matched = matched;
    breakdown.missing_required = missing;

    breakdown.preferred_matched = contained(&lower, &profile.preferred_skills);
    score += count(&breakdown.preferred_matched).min(PREFERRED_CAP);

    if QUANTIFIED.is_match(&corpus)
        || contains_any(&lower, &vocab.achievement_verbs)
        || contains_any(&lower, &vocab.recognitions)
    {
        breakdown.qualifications_found = true;
        score += QUALIFICATION_POINTS;
    }

    breakdown.action_verb_lines = corpus
        .split('\n')
        .filter(|line| contains_any(&line.to_lowercase(), &vocab.action_verbs))
        .map(String::from)
        .collect();
    score += count(&breakdown.action_verb_lines).min(ACTION_LINE_CAP);

    breakdown.keywords_matches = contained(&lower, &profile.keywords);
    score += count(&breakdown.keywords_matches).min(KEYWORD_CAP);

    (score, breakdown)
}

/// Items of `needles` found (case-insensitively) in the already-lowercased `haystack`.
pub(crate) fn contained(haystack: &str, needles: &[String]) -> Vec<String> {
    needles
        .iter()
        .filter(|needle| haystack.contains(&needle.to_lowercase()))
        .cloned()
        .collect()
}

pub(crate) fn contains_any(haystack: &str, needles: &[String]) -> bool {
    needles
        .iter()
        .any(|needle| haystack.contains(&needle.to_lowercase()))
}

pub(crate) fn count<T>(items: &[T]) -> u32 {
    u32::try_from(items.len()).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> JobProfile {
        JobProfile {
            required_skills: vec!["Python".into(), "SQL".into(), "Tableau".into()],
            preferred_skills: vec!["Docker".into()],
            keywords: vec!["dashboard".into(), "etl".into()],
            ..Default::default()
        }
    }

    fn resume() -> ParsedResume {
        ParsedResume {
            skills: vec!["Python".into(), "SQL".into(), "Docker".into()],
            experience: vec![
                "Built ETL pipelines feeding a sales dashboard".into(),
                "Reduced report latency by 40%".into(),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_full_breakdown() {
        let (score, breakdown) = score_content(&resume(), &profile(), &Vocabulary::default());
        assert_eq!(breakdown.required_matched, vec!["Python", "SQL"]);
        assert_eq!(breakdown.missing_required, vec!["Tableau"]);
        assert_eq!(breakdown.preferred_matched, vec!["Docker"]);
        assert!(breakdown.qualifications_found);
        assert_eq!(breakdown.action_verb_lines.len(), 2);
        assert_eq!(breakdown.keywords_matches, vec!["dashboard", "etl"]);
        // 4 required + 1 preferred + 10 qualifications + 2 action lines + 2 keywords
        assert_eq!(score, 19);
    }

    #[test]
    fn test_empty_resume_scores_zero() {
        let (score, breakdown) =
            score_content(&ParsedResume::default(), &profile(), &Vocabulary::default());
        assert_eq!(score, 0);
        assert!(!breakdown.qualifications_found);
        assert_eq!(breakdown.missing_required.len(), 3);
    }

    #[test]
    fn test_quantified_patterns() {
        for line in ["grew revenue 25%", "saved $500", "served 10K requests", "100+ users"] {
            assert!(QUANTIFIED.is_match(line), "{line}");
        }
        assert!(!QUANTIFIED.is_match("no numbers at all"));
    }

    #[test]
    fn test_partial_credit_caps() {
        let many: Vec<String> = (0..20).map(|i| format!("skill{i:02}")).collect();
        let profile = JobProfile {
            required_skills: many.clone(),
            preferred_skills: many.clone(),
            keywords: many.clone(),
            ..Default::default()
        };
        let resume = ParsedResume {
            skills: many,
            experience: (0..8).map(|i| format!("Led team {i}")).collect(),
            ..Default::default()
        };
        let (score, _) = score_content(&resume, &profile, &Vocabulary::default());
        assert_eq!(score, REQUIRED_CAP + PREFERRED_CAP + QUALIFICATION_POINTS + ACTION_LINE_CAP + KEYWORD_CAP);
        assert_eq!(score, 40);
    }

    #[test]
    fn test_content_stays_within_ceiling_for_realistic_profiles() {
        let (score, _) = score_content(&resume(), &profile(), &Vocabulary::default());
        assert!(score <= 40);
    }
}
