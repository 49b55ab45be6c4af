//! Scoring engine: four independent sub-scorers combined into one result.
//!
//! Every sub-scorer is a pure function of (entities, profile, text). The only
//! suspending step is the grammar service call, which is bounded by a timeout
//! and folded into `GrammarIssues` before the pure scorers run.

pub mod alignment;
pub mod batch;
pub mod content;
pub mod dates;
pub mod formatting;
pub mod grammar;
pub mod handlers;
pub mod optimization;

use std::sync::Arc;
use std::time::Duration;

use chrono::{Local, NaiveDate};
use serde::Serialize;
use tracing::{debug, warn};

use crate::models::profile::JobProfile;
use crate::models::resume::ParsedResume;
use crate::parsing::FileFormat;
use crate::vocabulary::Vocabulary;

use alignment::{score_alignment, AlignmentBreakdown};
use content::{score_content, ContentBreakdown};
use formatting::{score_formatting, FormattingBreakdown};
use grammar::{grammar_excerpt, GrammarChecker, GrammarError, GrammarIssues};
use optimization::{score_optimization, OptimizationBreakdown};

pub const CONTENT_CEILING: u32 = 40;
pub const FORMATTING_CEILING: u32 = 20;
pub const OPTIMIZATION_CEILING: u32 = 18;
pub const ALIGNMENT_CEILING: u32 = 22;

/// Nominal maximum of each sub-score. Caps apply per rule, not per sub-score,
/// so saturated keyword lists can push a sub-score past its ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Ceilings {
    pub content: u32,
    pub formatting: u32,
    pub optimization: u32,
    pub alignment: u32,
}

pub const CEILINGS: Ceilings = Ceilings {
    content: CONTENT_CEILING,
    formatting: FORMATTING_CEILING,
    optimization: OPTIMIZATION_CEILING,
    alignment: ALIGNMENT_CEILING,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub content: ContentBreakdown,
    pub formatting: FormattingBreakdown,
    pub optimization: OptimizationBreakdown,
    pub alignment: AlignmentBreakdown,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreResult {
    /// Sum of the four sub-scores. Not clamped to 100.
    pub total_score: u32,
    pub content_score: u32,
    pub formatting_score: u32,
    pub optimization_score: u32,
    pub alignment_score: u32,
    pub max_scores: Ceilings,
    pub breakdown: ScoreBreakdown,
}

/// Shared, read-only scorer. Cheap to clone.
#[derive(Clone)]
pub struct ScoringEngine {
    vocabulary: Arc<Vocabulary>,
    grammar: Arc<dyn GrammarChecker>,
    language: String,
    grammar_timeout: Duration,
}

impl ScoringEngine {
    pub fn new(
        vocabulary: Arc<Vocabulary>,
        grammar: Arc<dyn GrammarChecker>,
        language: String,
        grammar_timeout: Duration,
    ) -> Self {
        Self {
            vocabulary,
            grammar,
            language,
            grammar_timeout,
        }
    }

    /// Scores against today's date ("Present" in date ranges).
    pub async fn score(
        &self,
        resume: &ParsedResume,
        profile: &JobProfile,
        text: &str,
        format: Option<FileFormat>,
    ) -> ScoreResult {
        self.score_at(resume, profile, text, format, Local::now().date_naive())
            .await
    }

    pub async fn score_at(
        &self,
        resume: &ParsedResume,
        profile: &JobProfile,
        text: &str,
        format: Option<FileFormat>,
        today: NaiveDate,
    ) -> ScoreResult {
        let grammar = match self.check_grammar(text).await {
            Ok(issues) => GrammarIssues::Count(issues),
            Err(e) => {
                warn!("Grammar check unavailable, using fallback score: {}", e);
                GrammarIssues::Unavailable
            }
        };
        self.score_with_grammar(resume, profile, text, format, grammar, today)
    }

    /// Deterministic scoring with the grammar result supplied by the caller.
    pub fn score_with_grammar(
        &self,
        resume: &ParsedResume,
        profile: &JobProfile,
        text: &str,
        format: Option<FileFormat>,
        grammar: GrammarIssues,
        today: NaiveDate,
    ) -> ScoreResult {
        let vocab = &self.vocabulary;
        let (content_score, content) = score_content(resume, profile, vocab);
        let (formatting_score, formatting) = score_formatting(text, resume, format, vocab);
        let (optimization_score, optimization) = score_optimization(text, profile, grammar);
        let (alignment_score, alignment) = score_alignment(text, resume, profile, vocab, today);

        debug!(
            "Sub-scores: content={} formatting={} optimization={} alignment={}",
            content_score, formatting_score, optimization_score, alignment_score
        );

        ScoreResult {
            total_score: content_score + formatting_score + optimization_score + alignment_score,
            content_score,
            formatting_score,
            optimization_score,
            alignment_score,
            max_scores: CEILINGS,
            breakdown: ScoreBreakdown {
                content,
                formatting,
                optimization,
                alignment,
            },
        }
    }

    async fn check_grammar(&self, text: &str) -> Result<usize, GrammarError> {
        let excerpt = grammar_excerpt(text);
        tokio::time::timeout(self.grammar_timeout, self.grammar.check(excerpt, &self.language))
            .await
            .map_err(|_| GrammarError::Timeout(self.grammar_timeout))?
    }
}
