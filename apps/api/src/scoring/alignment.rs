use chrono::NaiveDate;
use serde::Serialize;

use crate::models::profile::JobProfile;
use crate::models::resume::ParsedResume;
use crate::scoring::content::contains_any;
use crate::scoring::dates::{months_to_years, total_experience_months};
use crate::vocabulary::Vocabulary;

const EXPERIENCE_POINTS: u32 = 6;
const LINE_MATCH_POINTS: u32 = 2;
const LINE_MATCH_CAP: usize = 2;
const SIDE_PROJECT_POINTS: u32 = 3;
const ONLINE_PRESENCE_POINTS: u32 = 2;
const CERTIFICATION_POINTS: u32 = 2;
const MULTI_ROLE_POINTS: u32 = 1;
const MULTI_ROLE_MIN_MENTIONS: usize = 2;

const SIDE_PROJECT_MARKERS: [&str; 2] = ["github", "open source"];
const ONLINE_PRESENCE_MARKERS: [&str; 3] = ["linkedin", "github", "portfolio"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlignmentBreakdown {
    pub meets_min_experience: bool,
    /// Summed length of all date ranges, in years.
    pub experience_years: f64,
    pub relevant_roles: Vec<String>,
    pub project_impact: Vec<String>,
    pub side_projects: bool,
    pub online_presence: bool,
    pub certifications: bool,
    pub multi_role_match: u8,
}

pub fn score_alignment(
    text: &str,
    resume: &ParsedResume,
    profile: &JobProfile,
    vocab: &Vocabulary,
    today: NaiveDate,
) -> (u32, AlignmentBreakdown) {
    let mut score = 0;
    let lines: Vec<&str> = text.split('\n').collect();
    let lowered: Vec<String> = lines.iter().map(|line| line.to_lowercase()).collect();

    let experience_years = months_to_years(total_experience_months(text, today));
    let meets_min_experience =
        profile.min_experience == 0 || experience_years >= f64::from(profile.min_experience);
    if meets_min_experience {
        score += EXPERIENCE_POINTS;
    }

    let relevant_roles = lines_matching(&lines, &lowered, &vocab.role_titles);
    score += capped_line_points(relevant_roles.len());

    let project_impact = lines_matching(&lines, &lowered, &vocab.impact_verbs);
    score += capped_line_points(project_impact.len());

    let side_projects = lowered
        .iter()
        .any(|line| SIDE_PROJECT_MARKERS.iter().any(|m| line.contains(m)));
    if side_projects {
        score += SIDE_PROJECT_POINTS;
    }

    let online_presence = resume
        .email
        .iter()
        .chain(resume.certifications.iter())
        .map(|field| field.to_lowercase())
        .chain(lowered.iter().cloned())
        .any(|line| ONLINE_PRESENCE_MARKERS.iter().any(|m| line.contains(m)));
    if online_presence {
        score += ONLINE_PRESENCE_POINTS;
    }

    let certifications = lowered
        .iter()
        .any(|line| contains_any(line, &vocab.certification_keywords));
    if certifications {
        score += CERTIFICATION_POINTS;
    }

    let lower_text = text.to_lowercase();
    let role_mentions: usize = vocab
        .multi_role_keywords
        .iter()
        .map(|role| lower_text.matches(&role.to_lowercase()).count())
        .sum();
    let multi_role_match = u8::from(role_mentions >= MULTI_ROLE_MIN_MENTIONS);
    if multi_role_match == 1 {
        score += MULTI_ROLE_POINTS;
    }

    let breakdown = AlignmentBreakdown {
        meets_min_experience,
        experience_years,
        relevant_roles,
        project_impact,
        side_projects,
        online_presence,
        certifications,
        multi_role_match,
    };
    (score, breakdown)
}

/// Matching lines exactly as they appear in the text, indentation included.
fn lines_matching(lines: &[&str], lowered: &[String], needles: &[String]) -> Vec<String> {
    lines
        .iter()
        .zip(lowered)
        .filter(|(_, lower)| contains_any(lower, needles))
        .map(|(line, _)| line.to_string())
        .collect()
}

fn capped_line_points(matches: usize) -> u32 {
    matches.min(LINE_MATCH_CAP) as u32 * LINE_MATCH_POINTS
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    fn profile(min_experience: u32) -> JobProfile {
        JobProfile {
            min_experience,
            ..Default::default()
        }
    }

    fn score(text: &str, min_experience: u32) -> (u32, AlignmentBreakdown) {
        score_alignment(
            text,
            &ParsedResume::default(),
            &profile(min_experience),
            &Vocabulary::default(),
            today(),
        )
    }

    #[test]
    fn test_zero_minimum_without_ranges_still_meets() {
        let (points, breakdown) = score("", 0);
        assert!(breakdown.meets_min_experience);
        assert_eq!(breakdown.experience_years, 0.0);
        assert_eq!(points, EXPERIENCE_POINTS);
    }

    #[test]
    fn test_experience_against_minimum() {
        let (_, breakdown) = score("Mar 2019 - Jun 2021", 3);
        assert_eq!(breakdown.experience_years, 2.3);
        assert!(!breakdown.meets_min_experience);

        let (_, breakdown) = score("Jan 2020 – Present", 4);
        assert!(breakdown.meets_min_experience);
    }

    #[test]
    fn test_role_and_impact_lines_are_capped() {
        let text = "Developer at A\nEngineer at B\nAnalyst at C\nLaunched X\nReduced Y\nBoosted Z";
        let (points, breakdown) = score(text, 0);
        assert_eq!(breakdown.relevant_roles.len(), 3);
        assert_eq!(breakdown.project_impact.len(), 3);
        assert_eq!(breakdown.multi_role_match, 1);
        // experience 6 + roles 4 + impact 4 + multi-role 1
        assert_eq!(points, 15);
    }

    #[test]
    fn test_online_presence_from_email_field() {
        let resume = ParsedResume {
            email: vec!["jane@portfolio.dev".into()],
            ..Default::default()
        };
        let (_, breakdown) =
            score_alignment("", &resume, &profile(0), &Vocabulary::default(), today());
        assert!(breakdown.online_presence);
        assert!(!breakdown.side_projects);
    }

    #[test]
    fn test_github_counts_for_side_projects_and_presence() {
        let (points, breakdown) = score("github.com/jane", 0);
        assert!(breakdown.side_projects);
        assert!(breakdown.online_presence);
        assert_eq!(points, EXPERIENCE_POINTS + SIDE_PROJECT_POINTS + ONLINE_PRESENCE_POINTS);
    }

    #[test]
    fn test_wildcard_cert_keywords_match_literally() {
        let vocab = Vocabulary {
            certification_keywords: vec!["completed .* course".into()],
            ..Vocabulary::default()
        };
        let check = |text: &str| {
            score_alignment(text, &ParsedResume::default(), &profile(0), &vocab, today())
                .1
                .certifications
        };
        assert!(!check("completed the rust course"));
        assert!(check("I completed .* course twice"));
    }

    #[test]
    fn test_single_role_mention_is_not_multi_role() {
        let (_, breakdown) = score("Consultant\nResearcher", 0);
        assert_eq!(breakdown.multi_role_match, 0);
    }

    #[test]
    fn test_matched_lines_are_reported_verbatim() {
        let (_, breakdown) = score("  Developer at Acme\n\tLaunched billing v2 ", 0);
        assert_eq!(breakdown.relevant_roles, vec!["  Developer at Acme"]);
        assert_eq!(breakdown.project_impact, vec!["\tLaunched billing v2 "]);
    }
}
