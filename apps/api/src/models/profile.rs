use serde::{Deserialize, Serialize};

/// Requirement set for one role. Immutable once loaded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobProfile {
    pub required_skills: Vec<String>,
    pub preferred_skills: Vec<String>,
    pub keywords: Vec<String>,
    pub job_specific_keywords: Vec<String>,
    /// Minimum experience in years.
    pub min_experience: u32,
}

impl JobProfile {
    /// Drops case-insensitive duplicates from every list, keeping first occurrence.
    pub fn normalized(mut self) -> Self {
        for list in [
            &mut self.required_skills,
            &mut self.preferred_skills,
            &mut self.keywords,
            &mut self.job_specific_keywords,
        ] {
            dedup_case_insensitive(list);
        }
        self
    }
}

fn dedup_case_insensitive(items: &mut Vec<String>) {
    let mut seen = std::collections::HashSet::new();
    items.retain(|item| seen.insert(item.trim().to_lowercase()));
}
