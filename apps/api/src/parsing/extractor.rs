//! Entity extraction: normalized resume text -> `ParsedResume`.

use std::collections::BTreeSet;
use std::sync::{Arc, LazyLock};

use regex::Regex;
use tracing::warn;

use crate::models::resume::ParsedResume;
use crate::parsing::ner::{EntitySpan, NamedEntityRecognizer};
use crate::parsing::sections::split_sections;
use crate::vocabulary::Vocabulary;

static NAME_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]+\s[A-Z]+\b").expect("name pattern"));

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\w.-]+@[\w.-]+").expect("email pattern"));

static PHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}").expect("phone pattern")
});

/// Number of leading lines searched by the name heuristic.
const NAME_SCAN_LINES: usize = 5;

#[derive(Clone)]
pub struct EntityExtractor {
    vocabulary: Arc<Vocabulary>,
    recognizer: Arc<dyn NamedEntityRecognizer>,
}

impl EntityExtractor {
    pub fn new(vocabulary: Arc<Vocabulary>, recognizer: Arc<dyn NamedEntityRecognizer>) -> Self {
        Self {
            vocabulary,
            recognizer,
        }
    }

    /// Runs the recognizer, then the rule-based extraction. A recognizer
    /// failure is logged and treated as "no entities".
    pub async fn extract(&self, text: &str) -> ParsedResume {
        let entities = match self.recognizer.recognize(text).await {
            Ok(entities) => entities,
            Err(e) => {
                warn!("Entity recognition failed, using name heuristic: {}", e);
                Vec::new()
            }
        };
        self.extract_with_entities(text, &entities)
    }

    pub fn extract_with_entities(&self, text: &str, entities: &[EntitySpan]) -> ParsedResume {
        let vocab = &self.vocabulary;
        let sections = split_sections(text, &vocab.section_headers);

        let skills_text = sections.lines("Skills").join(" ");
        let mut skills: BTreeSet<String> = match_skills(&skills_text, &vocab.known_skills);
        skills.extend(match_skills(text, &vocab.known_skills));

        let experience = text
            .split('\n')
            .filter(|line| {
                let lower = line.to_lowercase();
                vocab
                    .experience_phrases
                    .iter()
                    .any(|phrase| lower.contains(&phrase.to_lowercase()))
            })
            .map(|line| line.trim().to_string())
            .collect();

        ParsedResume {
            name: extract_name(text, entities).into_iter().collect(),
            email: all_matches(&EMAIL, text),
            phone: all_matches(&PHONE, text),
            education: sections.lines("Education"),
            experience,
            work_experience: sections.lines("Work Experience"),
            skills: skills.into_iter().collect(),
            projects: sections.lines("Projects"),
            achievements: sections.lines("Achievements"),
            certifications: sections.lines("Certifications"),
        }
    }
}

fn extract_name(text: &str, entities: &[EntitySpan]) -> Option<String> {
    if let Some(person) = entities.iter().find(|span| span.is_person()) {
        return Some(person.text.clone());
    }
    text.split('\n')
        .take(NAME_SCAN_LINES)
        .find_map(|line| NAME_LINE.find(line.trim()))
        .map(|m| title_case(m.as_str()))
}

fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

fn all_matches(pattern: &Regex, text: &str) -> Vec<String> {
    pattern
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

fn match_skills(text: &str, known_skills: &[String]) -> BTreeSet<String> {
    let lower = text.to_lowercase();
    known_skills
        .iter()
        .filter(|skill| lower.contains(&skill.to_lowercase()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::ner::{NerError, NoopRecognizer};
    use async_trait::async_trait;

    struct FailingRecognizer;

    #[async_trait]
    impl NamedEntityRecognizer for FailingRecognizer {
        async fn recognize(&self, _text: &str) -> Result<Vec<EntitySpan>, NerError> {
            Err(NerError::Api {
                status: 503,
                message: "down".into(),
            })
        }
    }

    struct FixedRecognizer(Vec<EntitySpan>);

    #[async_trait]
    impl NamedEntityRecognizer for FixedRecognizer {
        async fn recognize(&self, _text: &str) -> Result<Vec<EntitySpan>, NerError> {
            Ok(self.0.clone())
        }
    }

    fn extractor() -> EntityExtractor {
        EntityExtractor::new(Arc::new(Vocabulary::default()), Arc::new(NoopRecognizer))
    }

    const RESUME: &str = "JANE DOE\n\
        jane.doe@example.com | (555) 123-4567\n\
        Skills\n\
        Python, Docker\n\
        Work Experience\n\
        Backend Engineer, Acme (Jan 2020 - Present)\n\
        Developed billing services on AWS\n\
        \n\
        Education\n\
        B.Sc. Computer Science\n\
        Projects\n\
        Resume scorer\n";

    #[test]
    fn test_skills_union_is_sorted() {
        let parsed = extractor().extract_with_entities(RESUME, &[]);
        assert_eq!(parsed.skills, vec!["AWS", "Docker", "Python"]);
    }

    #[test]
    fn test_name_falls_back_to_all_caps_line() {
        let parsed = extractor().extract_with_entities(RESUME, &[]);
        assert_eq!(parsed.name, vec!["Jane Doe"]);
    }

    #[test]
    fn test_name_prefers_first_person_entity() {
        let entities = vec![
            EntitySpan::new("Acme", "ORG"),
            EntitySpan::new("Jane Q. Doe", "PERSON"),
            EntitySpan::new("John Roe", "PERSON"),
        ];
        let parsed = extractor().extract_with_entities(RESUME, &entities);
        assert_eq!(parsed.name, vec!["Jane Q. Doe"]);
    }

    #[test]
    fn test_name_heuristic_only_scans_leading_lines() {
        let text = "a\nb\nc\nd\ne\nJANE DOE";
        let parsed = extractor().extract_with_entities(text, &[]);
        assert!(parsed.name.is_empty());
    }

    #[test]
    fn test_contact_fields_keep_every_match() {
        let text = "a@x.com\nb@y.org\na@x.com\n555.123.4567";
        let parsed = extractor().extract_with_entities(text, &[]);
        assert_eq!(parsed.email, vec!["a@x.com", "b@y.org", "a@x.com"]);
        assert_eq!(parsed.phone, vec!["555.123.4567"]);
    }

    #[test]
    fn test_section_fields_are_trimmed_lines() {
        let parsed = extractor().extract_with_entities(RESUME, &[]);
        assert_eq!(
            parsed.work_experience,
            vec![
                "Backend Engineer, Acme (Jan 2020 - Present)",
                "Developed billing services on AWS"
            ]
        );
        assert_eq!(parsed.education, vec!["B.Sc. Computer Science"]);
        assert_eq!(parsed.projects, vec!["Resume scorer"]);
        assert!(parsed.achievements.is_empty());
        assert!(parsed.certifications.is_empty());
    }

    #[test]
    fn test_experience_lines_come_from_whole_document() {
        let parsed = extractor().extract_with_entities(RESUME, &[]);
        assert_eq!(parsed.experience, vec!["Developed billing services on AWS"]);
    }

    #[test]
    fn test_skill_fixture_vocabulary() {
        let vocab = Vocabulary {
            known_skills: vec!["Rust".into()],
            ..Vocabulary::default()
        };
        let extractor = EntityExtractor::new(Arc::new(vocab), Arc::new(NoopRecognizer));
        let parsed = extractor.extract_with_entities("Skills\nrust, Python", &[]);
        assert_eq!(parsed.skills, vec!["Rust"]);
    }

    #[tokio::test]
    async fn test_recognizer_failure_falls_back_to_heuristic() {
        let extractor =
            EntityExtractor::new(Arc::new(Vocabulary::default()), Arc::new(FailingRecognizer));
        let parsed = extractor.extract(RESUME).await;
        assert_eq!(parsed.name, vec!["Jane Doe"]);
    }

    #[tokio::test]
    async fn test_extract_uses_recognizer_spans() {
        let recognizer = FixedRecognizer(vec![EntitySpan::new("Janet Doe", "PERSON")]);
        let extractor = EntityExtractor::new(Arc::new(Vocabulary::default()), Arc::new(recognizer));
        let parsed = extractor.extract(RESUME).await;
        assert_eq!(parsed.name, vec!["Janet Doe"]);
    }

    #[test]
    fn test_qualified_section_headings() {
        let parsed = extractor().extract_with_entities(
            "JANE DOE\nAcademic Projects\nResume scorer in Rust\nTechnical Skills\nDocker",
            &[],
        );
        assert_eq!(parsed.projects, vec!["Resume scorer in Rust"]);
        assert_eq!(parsed.skills, vec!["Docker"]);
    }
}
