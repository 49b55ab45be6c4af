use serde::{Deserialize, Serialize};

/// Structured entities pulled out of one resume. Created once per upload.
///
/// `skills` is deduplicated and sorted; every other field is an ordered list of
/// line-level fragments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedResume {
    pub name: Vec<String>,
    pub email: Vec<String>,
    pub phone: Vec<String>,
    pub education: Vec<String>,
    pub experience: Vec<String>,
    pub work_experience: Vec<String>,
    pub skills: Vec<String>,
    pub projects: Vec<String>,
    pub achievements: Vec<String>,
    pub certifications: Vec<String>,
}

impl ParsedResume {
    /// All fields in declaration order.
    pub fn fields(&self) -> [&[String]; 10] {
        [
            &self.name,
            &self.email,
            &self.phone,
            &self.education,
            &self.experience,
            &self.work_experience,
            &self.skills,
            &self.projects,
            &self.achievements,
            &self.certifications,
        ]
    }

    /// Every extracted fragment joined by newlines, used as the content corpus.
    pub fn corpus(&self) -> String {
        self.fields()
            .iter()
            .flat_map(|field| field.iter())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn has_contact_info(&self) -> bool {
        !self.email.is_empty() && !self.phone.is_empty()
    }
}
