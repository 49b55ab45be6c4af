//! Keyword tables shared by the extractor and the scorers.
//!
//! Built once at startup (`Vocabulary::default()` or `Vocabulary::load`) and
//! shared read-only through `Arc`. Tests build smaller fixtures directly.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::profiles::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Vocabulary {
    /// Skills recognised by the extractor (case-insensitive substring match).
    pub known_skills: Vec<String>,
    /// Phrases that mark a line as an experience narrative line.
    pub experience_phrases: Vec<String>,
    /// Section headers the extractor splits on.
    pub section_headers: Vec<String>,
    /// Headers the formatting scorer looks for as plain substrings.
    pub formatting_headers: Vec<String>,
    pub action_verbs: Vec<String>,
    pub achievement_verbs: Vec<String>,
    pub recognitions: Vec<String>,
    pub role_titles: Vec<String>,
    pub impact_verbs: Vec<String>,
    /// Role words counted for the multi-role signal.
    pub multi_role_keywords: Vec<String>,
    /// Matched as literal substrings, never compiled as patterns.
    pub certification_keywords: Vec<String>,
}

impl Vocabulary {
    /// Loads a vocabulary file. Missing tables fall back to the built-in ones.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Missing {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Malformed {
            path: path.display().to_string(),
            source,
        })
    }
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

const KNOWN_SKILLS: &[&str] = &[
    "Python",
    "Java",
    "C++",
    "JavaScript",
    "HTML",
    "CSS",
    "SQL",
    "MongoDB",
    "MySQL",
    "PostgreSQL",
    "Oracle",
    "Git",
    "Docker",
    "Kubernetes",
    "AWS",
    "Azure",
    "Machine Learning",
    "Deep Learning",
    "NLP",
    "Computer Vision",
    "Web Development",
    "Mobile Development",
    "Backend Development",
    "Frontend Development",
    "Full Stack Development",
    "DevOps",
    "Data Science",
    "Data Analysis",
    "Data Visualization",
    "Scikit-learn",
    "Pandas",
    "NumPy",
    "Matplotlib",
    "Seaborn",
    "TensorFlow",
    "PyTorch",
    "Keras",
    "Streamlit",
    "FastAPI",
    "Django",
    "Flask",
    "React",
    "Vue",
    "Angular",
    "Ember",
    "Spring",
    "Hibernate",
    "JPA",
    "Ruby On Rails",
    "Api Development",
    "Database Management",
    "Restful Services",
    "API Gateway",
    "API Security",
    "API Design",
    "API Testing",
    "API Documentation",
    "API Performance Optimization",
    "Cloud Computing",
    "Cloud Security",
    "Cloud Migration",
    "Cloud Deployment",
    "Cloud Management",
    "Cloud Monitoring",
    "Cloud Cost Optimization",
    "Cloud Scalability",
    "Cloud Reliability",
    "Cloud Performance",
];

const EXPERIENCE_PHRASES: &[&str] = &[
    "years of experience",
    "developed",
    "built",
    "engineered",
    "implemented",
    "designed",
    "optimized",
    "worked on",
    "responsible for",
    "managed",
    "led",
    "coordinated",
    "supervised",
    "directed",
    "coached",
    "trained",
    "mentored",
    "collaborated",
    "contributed",
    "participated in",
    "involved in",
];

const SECTION_HEADERS: &[&str] = &[
    "Education",
    "Work Experience",
    "Skills",
    "Projects",
    "Achievements",
    "Certifications",
];

const FORMATTING_HEADERS: &[&str] = &[
    "Education",
    "Experience",
    "Skills",
    "Projects",
    "Achievements",
    "Certifications",
];

const ACTION_VERBS: &[&str] = &[
    "led",
    "developed",
    "implemented",
    "created",
    "designed",
    "managed",
    "built",
    "optimized",
    "launched",
    "streamlined",
    "executed",
    "increased",
    "reduced",
    "automated",
    "delivered",
];

const ACHIEVEMENT_VERBS: &[&str] = &[
    "accelerated",
    "boosted",
    "cut",
    "drove",
    "enhanced",
    "exceeded",
    "generated",
    "optimized",
    "streamlined",
    "transformed",
    "led",
    "initiated",
    "launched",
    "executed",
    "revamped",
    "overhauled",
    "achieved",
    "surpassed",
    "secured",
    "managed",
    "mentored",
    "solved",
    "won",
    "closed",
    "built",
    "automated",
];

const RECOGNITIONS: &[&str] = &[
    "awarded",
    "recognized",
    "certified",
    "nominated",
    "winner",
    "top performer",
    "appreciated",
    "honored",
    "commendation",
    "employee of the month",
    "ranked",
];

const ROLE_TITLES: &[&str] = &[
    "developer",
    "engineer",
    "analyst",
    "researcher",
    "consultant",
    "manager",
];

const IMPACT_VERBS: &[&str] = &[
    "launched",
    "delivered",
    "increased",
    "optimized",
    "boosted",
    "reduced",
];

const MULTI_ROLE_KEYWORDS: &[&str] = &["analyst", "developer", "engineer", "researcher"];

const CERTIFICATION_KEYWORDS: &[&str] = &[
    "aws",
    "gcp",
    "azure",
    "pmp",
    "credential",
    "completed",
    "certified",
    "certification",
    "badge",
    "course",
    "completed .* course",
    "earned .* certificate",
    "aws certified",
    "microsoft certified",
    "google cloud certified",
    "scrum master",
    "six sigma",
    "cissp",
    "cka",
    "ckad",
    "csm",
    "ccnp",
    "ccie",
];

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            known_skills: owned(KNOWN_SKILLS),
            experience_phrases: owned(EXPERIENCE_PHRASES),
            section_headers: owned(SECTION_HEADERS),
            formatting_headers: owned(FORMATTING_HEADERS),
            action_verbs: owned(ACTION_VERBS),
            achievement_verbs: owned(ACHIEVEMENT_VERBS),
            recognitions: owned(RECOGNITIONS),
            role_titles: owned(ROLE_TITLES),
            impact_verbs: owned(IMPACT_VERBS),
            multi_role_keywords: owned(MULTI_ROLE_KEYWORDS),
            certification_keywords: owned(CERTIFICATION_KEYWORDS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_tables_are_populated() {
        let vocab = Vocabulary::default();
        assert_eq!(vocab.section_headers.len(), 6);
        assert_eq!(vocab.action_verbs.len(), 15);
        assert!(vocab.known_skills.iter().any(|s| s == "Docker"));
    }

    #[test]
    fn test_wildcard_cert_keywords_stay_literal() {
        let vocab = Vocabulary::default();
        assert!(vocab
            .certification_keywords
            .iter()
            .any(|k| k == "completed .* course"));
    }

    #[test]
    fn test_load_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "known_skills": ["Rust", "Go"] }}"#).unwrap();

        let vocab = Vocabulary::load(file.path()).unwrap();
        assert_eq!(vocab.known_skills, vec!["Rust", "Go"]);
        assert_eq!(vocab.role_titles.len(), 6);
    }

    #[test]
    fn test_load_missing_file_is_config_error() {
        let err = Vocabulary::load(Path::new("/nonexistent/vocab.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Missing { .. }));
    }
}
