use crate::scoring::alignment::AlignmentBreakdown;
use crate::scoring::content::ContentBreakdown;
use crate::scoring::formatting::FormattingBreakdown;
use crate::scoring::grammar::GrammarIssues;
use crate::scoring::optimization::OptimizationBreakdown;

use super::{percentage, Advice, Category, CategoryFeedback, ChecklistItem, Tier};

// ────────────────────────────────────────────────────────────────────────────
// Shared builder
// ────────────────────────────────────────────────────────────────────────────

struct FeedbackBuilder {
    category: Category,
    score: u32,
    max_score: u32,
    percentage: f64,
    tier: Tier,
    advice: Vec<Advice>,
    checklist: Vec<ChecklistItem>,
}

impl FeedbackBuilder {
    fn new(category: Category, score: u32, max_score: u32) -> Self {
        let percentage = percentage(score, max_score);
        Self {
            category,
            score,
            max_score,
            percentage,
            tier: Tier::from_percentage(percentage),
            advice: Vec::new(),
            checklist: Vec::new(),
        }
    }

    fn advise<S: AsRef<str>>(&mut self, heading: &str, bullets: &[S]) {
        self.advice.push(Advice {
            heading: heading.to_string(),
            bullets: bullets.iter().map(|b| b.as_ref().to_string()).collect(),
        });
    }

    fn check(&mut self, label: &str, passed: bool) {
        self.count(label, if passed { "yes" } else { "no" });
    }

    fn count(&mut self, label: &str, value: impl ToString) {
        self.checklist.push(ChecklistItem {
            label: label.to_string(),
            value: value.to_string(),
        });
    }

    /// Uses `fallback` when the tier produced no specific advice.
    fn finish(self, headline: &str, fallback: &str) -> CategoryFeedback {
        let headline = if self.advice.is_empty() && self.tier != Tier::Excellent {
            fallback
        } else {
            headline
        };
        CategoryFeedback {
            category: self.category,
            score: self.score,
            max_score: self.max_score,
            percentage: self.percentage,
            tier: self.tier,
            headline: headline.to_string(),
            advice: self.advice,
            checklist: self.checklist,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Content
// ────────────────────────────────────────────────────────────────────────────

pub fn content_feedback(score: u32, max_score: u32, b: &ContentBreakdown) -> CategoryFeedback {
    let mut fb = FeedbackBuilder::new(Category::Content, score, max_score);

    let headline = match fb.tier {
        Tier::Excellent => {
            "Excellent work: the resume aligns strongly with the job requirements. Minor keyword tuning can still help ATS matching."
        }
        Tier::Good => {
            if !b.missing_required.is_empty() {
                let mut bullets: Vec<String> = b
                    .missing_required
                    .iter()
                    .take(3)
                    .map(|skill| format!("Consider adding experience with {skill} if you have it"))
                    .collect();
                bullets.push("Reorganize existing content to highlight these skills".into());
                fb.advise("Skills fine-tuning", &bullets);
            }
            if !b.qualifications_found {
                fb.advise(
                    "Achievement enhancement",
                    &[
                        "Add specific metrics to accomplishments (percentages, numbers, amounts)",
                        "Quantify impact: 'Increased efficiency by 25%' rather than 'Improved efficiency'",
                        "Include recognition or awards",
                    ],
                );
            }
            if b.keywords_matches.len() < 5 {
                fb.advise(
                    "Keyword optimization",
                    &[
                        "Use more industry-specific terminology from the job description",
                        "Use variations of key terms throughout the resume",
                    ],
                );
            }
            "Great job: the resume shows strong alignment with the job requirements."
        }
        Tier::NeedsWork => {
            if !b.missing_required.is_empty() {
                let mut bullets: Vec<String> = b
                    .missing_required
                    .iter()
                    .map(|skill| format!("Add {skill}: it is a required skill for this position"))
                    .collect();
                bullets.push("Write bullet points demonstrating experience with these skills".into());
                bullets.push("If a skill is missing, build it through a course or a project".into());
                fb.advise("Priority: required skills", &bullets);
            }
            if b.preferred_matched.len() < 3 {
                fb.advise(
                    "Preferred skills",
                    &[
                        "Add more of the preferred skills from the job description",
                        "Highlight certifications or training in preferred technologies",
                    ],
                );
            }
            if !b.qualifications_found {
                fb.advise(
                    "Achievement and impact",
                    &[
                        "Add quantifiable achievements with specific metrics",
                        "Include percentages, amounts, time savings or growth numbers",
                        "Add awards, recognitions or performance rankings",
                    ],
                );
            }
            if b.action_verb_lines.len() < 3 {
                fb.advise(
                    "Content structure",
                    &[
                        "Start more bullet points with strong action verbs",
                        "Use verbs like accelerated, optimized, led, executed, transformed",
                        "Rewrite passive statements as active, impact-focused ones",
                    ],
                );
            }
            "Good foundation: strengthen the resume to better match the role."
        }
        Tier::Overhaul => {
            let mut bullets: Vec<String> = b
                .missing_required
                .iter()
                .take(5)
                .map(|skill| format!("Learn {skill} through courses or hands-on projects"))
                .collect();
            bullets.push("Build a portfolio demonstrating these skills".into());
            fb.advise("Skills development", &bullets);
            fb.advise(
                "Rewrite",
                &[
                    "Start from scratch with a job-focused approach",
                    "Add a professional summary matching the role",
                    "Include at least five quantified achievements",
                ],
            );
            fb.advise(
                "Experience building",
                &[
                    "Look for relevant internships or entry-level positions",
                    "Build two or three substantial projects showcasing key skills",
                ],
            );
            "Major rework required."
        }
    };

    fb.count("Required skills matched", b.required_matched.len());
    fb.count("Missing required skills", b.missing_required.len());
    fb.count("Preferred skills matched", b.preferred_matched.len());
    fb.check("Quantifiable achievements", b.qualifications_found);
    fb.count("Action-oriented lines", b.action_verb_lines.len());
    fb.count("Keyword matches", b.keywords_matches.len());

    fb.finish(
        headline,
        "Good work: the resume aligns with the job requirements. Minor optimizations can still help.",
    )
}

// ────────────────────────────────────────────────────────────────────────────
// Formatting
// ────────────────────────────────────────────────────────────────────────────

pub fn formatting_feedback(
    score: u32,
    max_score: u32,
    b: &FormattingBreakdown,
    ats_friendly: bool,
) -> CategoryFeedback {
    let mut fb = FeedbackBuilder::new(Category::Formatting, score, max_score);

    let headline = match fb.tier {
        Tier::Excellent => {
            if !b.file_format_check {
                fb.advise("Minor enhancement", &["Submit as PDF for consistent rendering"]);
            }
            "Excellent formatting: professional, ATS-friendly and easy to scan."
        }
        Tier::Good => {
            if !b.section_presence {
                fb.advise(
                    "Section organization",
                    &[
                        "Add clear sections: Education, Experience, Skills, Projects",
                        "Use one consistent heading style",
                    ],
                );
            }
            if !b.contact_info_present {
                fb.advise(
                    "Contact information",
                    &[
                        "Include both an email address and a phone number in the header",
                        "Add LinkedIn or portfolio links if relevant",
                    ],
                );
            }
            if !b.bullet_point_usage {
                fb.advise(
                    "Content structure",
                    &[
                        "List achievements as bullet points (•, - or *)",
                        "Break long paragraphs into scannable bullets",
                    ],
                );
            }
            if !b.date_format_consistency {
                fb.advise(
                    "Date consistency",
                    &[
                        "Use one date format, e.g. 'Jan 2023 - Present'",
                        "Include graduation dates and employment periods",
                    ],
                );
            }
            if !b.file_format_check {
                fb.advise(
                    "File format",
                    &["Save and submit as PDF", "Avoid Word documents unless requested"],
                );
            }
            "Good formatting foundation: polish a few areas for maximum impact."
        }
        Tier::NeedsWork => {
            if !b.contact_info_present {
                fb.advise(
                    "Contact information",
                    &["Add a professional email address", "Add a phone number", "Add a LinkedIn URL"],
                );
            }
            if !b.section_presence {
                fb.advise(
                    "Section structure",
                    &[
                        "Create clear sections with headers",
                        "Order content logically: contact, summary, experience, education, skills",
                    ],
                );
            }
            if !b.bullet_point_usage {
                fb.advise(
                    "Content organization",
                    &["Convert paragraph text into bullet points", "Keep bullets to one or two lines"],
                );
            }
            if !b.whitespace_and_spacing {
                fb.advise(
                    "Layout and spacing",
                    &[
                        "Leave white space between sections",
                        "Break long lines into shorter, readable segments",
                    ],
                );
            }
            if !b.header_clarity {
                fb.advise(
                    "Header clarity",
                    &["Make section headers prominent and consistent"],
                );
            }
            "Formatting needs attention."
        }
        Tier::Overhaul => {
            fb.advise(
                "Basic structure",
                &[
                    "Start from a professional resume template",
                    "Set up clear sections: header, summary, experience, education, skills",
                ],
            );
            fb.advise(
                "Contact header",
                &[
                    "Full name in a larger font",
                    "Professional email address and phone number",
                    "LinkedIn and portfolio links",
                ],
            );
            fb.advise(
                "Content formatting",
                &[
                    "Use bullet points for responsibilities and achievements",
                    "Keep one date format throughout",
                ],
            );
            fb.advise(
                "Final polish",
                &[
                    "Save as PDF",
                    "Avoid images and tables so ATS parsers can read it",
                ],
            );
            "Major formatting overhaul required."
        }
    };

    fb.check("Clear sections", b.section_presence);
    fb.check("Contact info", b.contact_info_present);
    fb.check("Bullet points", b.bullet_point_usage);
    fb.check("Date consistency", b.date_format_consistency);
    fb.check("Professional layout", b.whitespace_and_spacing);
    fb.check("Clear headers", b.header_clarity);
    fb.check("PDF format", b.file_format_check);
    fb.check("ATS friendly", ats_friendly);

    fb.finish(headline, "Solid formatting: meets professional standards.")
}

// ────────────────────────────────────────────────────────────────────────────
// Optimization
// ────────────────────────────────────────────────────────────────────────────

pub fn optimization_feedback(
    score: u32,
    max_score: u32,
    b: &OptimizationBreakdown,
) -> CategoryFeedback {
    let mut fb = FeedbackBuilder::new(Category::Optimization, score, max_score);
    let issues = match b.spelling_grammar_issues {
        GrammarIssues::Count(n) => Some(n),
        GrammarIssues::Unavailable => None,
    };

    let headline = match fb.tier {
        Tier::Excellent => {
            if let Some(n) = issues.filter(|n| *n > 0) {
                fb.advise("Minor polish", &[format!("Fix {n} minor grammar or spelling issues")]);
            }
            "Excellently optimized for ATS systems and hiring managers."
        }
        Tier::Good => {
            if b.tailoring.len() < 3 {
                fb.advise(
                    "Job-specific tailoring",
                    &[
                        "Use more job-specific keywords from the posting",
                        "Use the exact terminology of the job description",
                    ],
                );
            }
            if let Some(n) = issues.filter(|n| *n > 2) {
                fb.advise(
                    "Proofreading",
                    &[
                        format!("Fix the {n} grammar or spelling issues detected"),
                        "Ask someone to proofread the resume".to_string(),
                    ],
                );
            }
            if !b.concise {
                fb.advise(
                    "Conciseness",
                    &[
                        "Aim for 400 to 800 words in total",
                        "Remove filler words and combine similar bullet points",
                    ],
                );
            }
            if !b.ats_friendly {
                fb.advise(
                    "ATS compatibility",
                    &[
                        "Remove tables, text boxes and complex formatting",
                        "Use standard section headers",
                    ],
                );
            }
            "Good optimization with room for enhancement."
        }
        Tier::NeedsWork => {
            fb.advise(
                "Job tailoring",
                &[
                    format!("Currently matching {} job-specific keywords", b.tailoring.len()),
                    "Study the posting and work in 5 to 10 of its specific terms".to_string(),
                ],
            );
            if !b.concise {
                fb.advise(
                    "Content length",
                    &[
                        "Cut the resume to one or two pages",
                        "Remove outdated or irrelevant experience",
                    ],
                );
            }
            if let Some(n) = issues.filter(|n| *n > 5) {
                fb.advise(
                    "Proofreading",
                    &[format!("{n} errors detected: the resume needs a thorough review")],
                );
            }
            if !b.ats_friendly {
                fb.advise(
                    "ATS compatibility",
                    &["Remove all tables and complex formatting", "Use a simple, clean layout"],
                );
            }
            "Optimization improvements needed."
        }
        Tier::Overhaul => {
            fb.advise(
                "Content overhaul",
                &[
                    "Rewrite the resume with a job-specific focus",
                    "Work in 10 to 15 relevant keywords naturally",
                    "Cut the content to 800 words at most",
                ],
            );
            fb.advise(
                "Technical optimization",
                &[
                    "Remove formatting that ATS parsers cannot read",
                    "Make sure all PDF text is selectable",
                ],
            );
            let mut quality = Vec::new();
            if let Some(n) = issues.filter(|n| *n > 10) {
                quality.push(format!("{n} errors need fixing"));
            }
            quality.push("Proofread in several rounds".to_string());
            fb.advise("Quality assurance", &quality);
            "Complete optimization required."
        }
    };

    fb.count("Job keywords matched", b.tailoring.len());
    fb.count(
        "Grammar issues",
        issues.map_or_else(|| "unavailable".to_string(), |n| n.to_string()),
    );
    fb.check("Concise length", b.concise);
    fb.check("ATS compatible", b.ats_friendly);

    fb.finish(headline, "Well optimized: the resume is on track.")
}

// ────────────────────────────────────────────────────────────────────────────
// Alignment
// ────────────────────────────────────────────────────────────────────────────

pub fn alignment_feedback(score: u32, max_score: u32, b: &AlignmentBreakdown) -> CategoryFeedback {
    let mut fb = FeedbackBuilder::new(Category::Alignment, score, max_score);

    let headline = match fb.tier {
        Tier::Excellent => {
            if !b.certifications {
                fb.advise(
                    "Enhancement opportunity",
                    &["Add relevant certifications to strengthen the profile"],
                );
            }
            if !b.online_presence {
                fb.advise(
                    "Professional presence",
                    &["Add a LinkedIn profile or portfolio link"],
                );
            }
            "Excellent job alignment: experience and qualifications match the role."
        }
        Tier::Good => {
            if !b.meets_min_experience {
                fb.advise(
                    "Experience gap",
                    &[
                        "Highlight transferable skills from other experience",
                        "Emphasize relevant projects, internships or volunteer work",
                    ],
                );
            }
            if b.relevant_roles.len() < 2 {
                fb.advise(
                    "Role relevance",
                    &[
                        "Frame job titles and descriptions in the target role's language",
                        "Use industry-standard job titles where possible",
                    ],
                );
            }
            if b.project_impact.len() < 2 {
                fb.advise(
                    "Impact and achievements",
                    &[
                        "Add three to five quantified project outcomes",
                        "Show progression and increasing responsibility",
                    ],
                );
            }
            if !b.side_projects {
                fb.advise(
                    "Professional development",
                    &[
                        "Add a GitHub profile with relevant projects",
                        "Include open-source contributions or personal projects",
                    ],
                );
            }
            if !b.online_presence {
                fb.advise(
                    "Professional visibility",
                    &["Add a LinkedIn URL to the header", "Include a portfolio or GitHub link"],
                );
            }
            if !b.certifications {
                fb.advise(
                    "Skill validation",
                    &[
                        "Pursue relevant industry certifications",
                        "List completed courses from recognized platforms",
                    ],
                );
            }
            "Strong foundation: the alignment can still be sharpened."
        }
        Tier::NeedsWork => {
            if !b.meets_min_experience {
                fb.advise(
                    "Experience development",
                    &[
                        "Look for contract or freelance opportunities",
                        "Highlight all relevant experience, including non-traditional roles",
                    ],
                );
            }
            if b.relevant_roles.is_empty() {
                fb.advise(
                    "Role positioning",
                    &[
                        "Rewrite job descriptions to emphasize relevant skills",
                        "Consider a functional format that puts skills first",
                    ],
                );
            }
            if b.project_impact.is_empty() {
                fb.advise(
                    "Project portfolio",
                    &[
                        "Create two or three projects relevant to the target role",
                        "Document and quantify project outcomes",
                    ],
                );
            }
            let mut gaps = Vec::new();
            if !b.certifications {
                gaps.push("Start a relevant certification program");
            }
            if !b.online_presence {
                gaps.push("Build a professional LinkedIn profile and portfolio");
            }
            gaps.push("Complete online courses in key skill areas");
            fb.advise("Skill gap closure", &gaps);
            "Alignment improvements needed."
        }
        Tier::Overhaul => {
            fb.advise(
                "Gap analysis",
                &[
                    "Assess skills against the target role requirements",
                    "Identify the top five gaps and plan how to close them",
                ],
            );
            let mut building = Vec::new();
            if !b.meets_min_experience {
                building.push("Gain experience through volunteer work, freelancing or internships");
            }
            if !b.certifications {
                building.push("Complete industry-standard certifications");
            }
            building.push("Build three to five projects demonstrating target skills");
            fb.advise("Skill building", &building);
            fb.advise(
                "Alternatives",
                &[
                    "Consider entry-level positions in the target field",
                    "Look for bridge roles combining current and target skills",
                ],
            );
            "Major career realignment required."
        }
    };

    fb.check("Experience requirement", b.meets_min_experience);
    fb.count("Experience (years)", b.experience_years);
    fb.count("Relevant roles", b.relevant_roles.len());
    fb.count("Project impact examples", b.project_impact.len());
    fb.check("Side projects", b.side_projects);
    fb.check("Online presence", b.online_presence);
    fb.check("Certifications", b.certifications);

    fb.finish(headline, "Good alignment: qualifications fit the target role.")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content(missing: &[&str], qualifications: bool, keywords: usize) -> ContentBreakdown {
        ContentBreakdown {
            missing_required: missing.iter().map(|s| s.to_string()).collect(),
            qualifications_found: qualifications,
            keywords_matches: (0..keywords).map(|i| format!("kw{i}")).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_good_tier_lists_at_most_three_missing_skills() {
        let fb = content_feedback(26, 40, &content(&["A", "B", "C", "D"], true, 5));
        assert_eq!(fb.tier, Tier::Good);
        assert_eq!(fb.advice.len(), 1);
        assert_eq!(fb.advice[0].bullets.len(), 4);
        assert!(fb.advice[0].bullets[0].contains('A'));
    }

    #[test]
    fn test_good_tier_without_gaps_uses_fallback_headline() {
        let fb = content_feedback(26, 40, &content(&[], true, 6));
        assert!(fb.advice.is_empty());
        assert!(fb.headline.starts_with("Good work"));
    }

    #[test]
    fn test_excellent_tier_keeps_its_headline() {
        let fb = content_feedback(36, 40, &content(&[], true, 10));
        assert_eq!(fb.tier, Tier::Excellent);
        assert!(fb.headline.starts_with("Excellent"));
    }

    #[test]
    fn test_overhaul_always_advises() {
        let fb = formatting_feedback(2, 20, &FormattingBreakdown::default(), true);
        assert_eq!(fb.tier, Tier::Overhaul);
        assert!(fb.advice.len() >= 3);
        assert_eq!(fb.checklist.len(), 8);
    }

    #[test]
    fn test_unavailable_grammar_is_reported_not_counted() {
        let breakdown = OptimizationBreakdown {
            tailoring: vec![],
            spelling_grammar_issues: GrammarIssues::Unavailable,
            concise: true,
            ats_friendly: true,
        };
        let fb = optimization_feedback(15, 18, &breakdown);
        assert_eq!(fb.tier, Tier::Excellent);
        assert!(fb.advice.is_empty());
        let grammar = fb
            .checklist
            .iter()
            .find(|item| item.label == "Grammar issues")
            .unwrap();
        assert_eq!(grammar.value, "unavailable");
    }

    #[test]
    fn test_alignment_needs_work_flags_missing_experience() {
        let breakdown = AlignmentBreakdown {
            meets_min_experience: false,
            experience_years: 1.5,
            relevant_roles: vec!["Developer".into()],
            project_impact: vec![],
            side_projects: true,
            online_presence: true,
            certifications: true,
            multi_role_match: 0,
        };
        let fb = alignment_feedback(10, 22, &breakdown);
        assert_eq!(fb.tier, Tier::NeedsWork);
        let headings: Vec<&str> = fb.advice.iter().map(|a| a.heading.as_str()).collect();
        assert_eq!(
            headings,
            vec!["Experience development", "Project portfolio", "Skill gap closure"]
        );
    }
}
