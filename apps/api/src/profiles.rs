//! Job profile store: category -> role -> `JobProfile`, loaded once at startup.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;
use thiserror::Error;

use crate::models::profile::JobProfile;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration file '{path}' could not be read: {source}")]
    Missing {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("configuration file '{path}' is malformed: {source}")]
    Malformed {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("job profile file '{0}' defines no profiles")]
    Empty(String),
}

#[derive(Debug, Clone, Serialize)]
pub struct CategorySummary {
    pub category: String,
    pub roles: Vec<String>,
}

/// Read-only after load; shared across all scoring calls.
#[derive(Debug, Clone, Default)]
pub struct JobProfileStore {
    profiles: BTreeMap<String, BTreeMap<String, JobProfile>>,
}

impl JobProfileStore {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let display = path.display().to_string();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Missing {
            path: display.clone(),
            source,
        })?;
        let store = Self::from_json(&raw).map_err(|source| ConfigError::Malformed {
            path: display.clone(),
            source,
        })?;
        if store.is_empty() {
            return Err(ConfigError::Empty(display));
        }
        Ok(store)
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let parsed: BTreeMap<String, BTreeMap<String, JobProfile>> = serde_json::from_str(raw)?;
        let profiles = parsed
            .into_iter()
            .map(|(category, roles)| {
                let roles = roles
                    .into_iter()
                    .map(|(role, profile)| (role, profile.normalized()))
                    .collect();
                (category, roles)
            })
            .collect();
        Ok(Self { profiles })
    }

    pub fn get(&self, category: &str, role: &str) -> Option<&JobProfile> {
        self.profiles.get(category)?.get(role)
    }

    pub fn categories(&self) -> Vec<CategorySummary> {
        self.profiles
            .iter()
            .map(|(category, roles)| CategorySummary {
                category: category.clone(),
                roles: roles.keys().cloned().collect(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.profiles.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const PROFILES: &str = r#"{
        "Fresher": {
            "Data Analyst": {
                "required_skills": ["SQL", "Python"],
                "keywords": ["dashboard"],
                "min_experience": 0
            },
            "Backend Developer": { "required_skills": ["Java"] }
        },
        "Experienced": {
            "Cloud Engineer": { "required_skills": ["AWS"], "min_experience": 3 }
        }
    }"#;

    #[test]
    fn test_lookup_by_category_and_role() {
        let store = JobProfileStore::from_json(PROFILES).unwrap();
        let profile = store.get("Experienced", "Cloud Engineer").unwrap();
        assert_eq!(profile.min_experience, 3);
        assert!(store.get("Experienced", "Data Analyst").is_none());
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_categories_are_sorted() {
        let store = JobProfileStore::from_json(PROFILES).unwrap();
        let categories = store.categories();
        assert_eq!(categories[0].category, "Experienced");
        assert_eq!(categories[1].roles, vec!["Backend Developer", "Data Analyst"]);
    }

    #[test]
    fn test_load_missing_file_fails() {
        let err = JobProfileStore::load(Path::new("/nonexistent/job_profile.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Missing { .. }));
    }

    #[test]
    fn test_load_malformed_file_fails() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        let err = JobProfileStore::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Malformed { .. }));
    }

    #[test]
    fn test_load_empty_file_fails() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{}}").unwrap();
        let err = JobProfileStore::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Empty(_)));
    }

    #[test]
    fn test_load_valid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{PROFILES}").unwrap();
        let store = JobProfileStore::load(file.path()).unwrap();
        assert!(!store.is_empty());
    }
}
