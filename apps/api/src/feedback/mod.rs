//! Feedback generator: turns a `ScoreResult` into tiered, human-readable
//! recommendations. Presentation only; no scoring logic lives here.

pub mod recommendations;

use serde::Serialize;

use crate::scoring::ScoreResult;

use recommendations::{
    alignment_feedback, content_feedback, formatting_feedback, optimization_feedback,
};

/// Nominal maximum of the total score.
const MAX_TOTAL: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// 80% of the ceiling or more.
    Excellent,
    /// 60% to 80%.
    Good,
    /// 40% to 60%.
    NeedsWork,
    /// Below 40%.
    Overhaul,
}

impl Tier {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 80.0 {
            Tier::Excellent
        } else if percentage >= 60.0 {
            Tier::Good
        } else if percentage >= 40.0 {
            Tier::NeedsWork
        } else {
            Tier::Overhaul
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Content,
    Formatting,
    Optimization,
    Alignment,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Advice {
    pub heading: String,
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChecklistItem {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryFeedback {
    pub category: Category,
    pub score: u32,
    pub max_score: u32,
    pub percentage: f64,
    pub tier: Tier,
    pub headline: String,
    pub advice: Vec<Advice>,
    pub checklist: Vec<ChecklistItem>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Excellent,
    Strong,
    GoodFoundation,
    NeedsImprovement,
    MajorOverhaul,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionPlan {
    pub horizon: String,
    pub steps: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedbackReport {
    pub total_score: u32,
    pub percentage: f64,
    pub verdict: Verdict,
    pub summary: String,
    pub categories: Vec<CategoryFeedback>,
    pub action_plan: ActionPlan,
}

/// Percentage of `max`, one decimal place.
pub fn percentage(score: u32, max: u32) -> f64 {
    if max == 0 {
        return 0.0;
    }
    (f64::from(score) / f64::from(max) * 1000.0).round() / 10.0
}

pub fn build_feedback(result: &ScoreResult) -> FeedbackReport {
    let max = result.max_scores;
    let breakdown = &result.breakdown;
    let categories = vec![
        content_feedback(result.content_score, max.content, &breakdown.content),
        formatting_feedback(
            result.formatting_score,
            max.formatting,
            &breakdown.formatting,
            breakdown.optimization.ats_friendly,
        ),
        optimization_feedback(
            result.optimization_score,
            max.optimization,
            &breakdown.optimization,
        ),
        alignment_feedback(result.alignment_score, max.alignment, &breakdown.alignment),
    ];

    let overall = percentage(result.total_score, MAX_TOTAL);
    let (verdict, summary) = verdict(overall);

    FeedbackReport {
        total_score: result.total_score,
        percentage: overall,
        verdict,
        summary: summary.to_string(),
        categories,
        action_plan: action_plan(overall),
    }
}

fn verdict(percentage: f64) -> (Verdict, &'static str) {
    if percentage >= 80.0 {
        (
            Verdict::Excellent,
            "Excellent resume: highly competitive and ready for applications.",
        )
    } else if percentage >= 65.0 {
        (
            Verdict::Strong,
            "Strong resume: a few improvements will make it highly competitive.",
        )
    } else if percentage >= 50.0 {
        (
            Verdict::GoodFoundation,
            "Good foundation: moderate improvements are needed to be competitive.",
        )
    } else if percentage >= 35.0 {
        (
            Verdict::NeedsImprovement,
            "Needs improvement: significant work is required before applying.",
        )
    } else {
        (
            Verdict::MajorOverhaul,
            "Major overhaul required: the resume needs substantial rework.",
        )
    }
}

fn action_plan(percentage: f64) -> ActionPlan {
    let (horizon, steps): (&str, &[&str]) = if percentage >= 80.0 {
        (
            "Immediate",
            &[
                "Apply to target positions",
                "Keep tuning keywords for each specific posting",
                "Keep the resume updated with recent achievements",
            ],
        )
    } else if percentage >= 65.0 {
        (
            "Next 1-2 weeks",
            &[
                "Address the highest-impact recommendations first",
                "Focus on content and alignment improvements",
                "Ask a colleague to review the updated resume",
            ],
        )
    } else if percentage >= 50.0 {
        (
            "Next 2-4 weeks",
            &[
                "Prioritize content and optimization improvements",
                "Research keywords and tailor the resume to the role",
                "Consider a professional resume review",
            ],
        )
    } else {
        (
            "Next 1-3 months",
            &[
                "Work through the category improvement plans",
                "Invest in skill development or career counseling",
                "Build experience through projects, volunteering or training",
            ],
        )
    };
    ActionPlan {
        horizon: horizon.to_string(),
        steps: steps.iter().map(|s| s.to_string()).collect(),
    }
}
