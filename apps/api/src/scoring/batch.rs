//! Batch ranking: many resumes scored against one job profile.
//!
//! Each file is decoded, extracted and scored on its own task, bounded by a
//! semaphore. A failing file becomes a `FailedResume` entry and never aborts
//! the batch. Filtering, ordering and truncation happen only after every file
//! has finished.

use std::sync::Arc;

use bytes::Bytes;
use serde::Serialize;
use tokio::sync::Semaphore;
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::profile::JobProfile;
use crate::parsing::{read_document, EntityExtractor};
use crate::scoring::{ScoreResult, ScoringEngine};

pub const DEFAULT_TOP_N: usize = 10;

#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub bytes: Bytes,
}

#[derive(Debug, Clone, Copy)]
pub struct RankOptions {
    pub top_n: usize,
    pub min_score: u32,
    pub concurrency: usize,
}

impl Default for RankOptions {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            min_score: 0,
            concurrency: 4,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoredResume {
    pub file_name: String,
    pub candidate_name: Option<String>,
    pub score: ScoreResult,
}

#[derive(Debug, Clone, Serialize)]
pub struct RankedResume {
    pub rank: usize,
    #[serde(flatten)]
    pub resume: ScoredResume,
}

#[derive(Debug, Clone, Serialize)]
pub struct FailedResume {
    pub file_name: String,
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchSummary {
    pub processed: usize,
    pub failed: usize,
    pub qualified: usize,
    pub highest_score: Option<u32>,
    pub average_score: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub batch_id: Uuid,
    pub ranked: Vec<RankedResume>,
    pub failed: Vec<FailedResume>,
    pub summary: BatchSummary,
}

/// Scores every file concurrently, then ranks the successes.
pub async fn rank_resumes(
    extractor: &EntityExtractor,
    engine: &ScoringEngine,
    profile: &JobProfile,
    files: Vec<UploadedFile>,
    options: RankOptions,
) -> BatchReport {
    let semaphore = Arc::new(Semaphore::new(options.concurrency.max(1)));
    let profile = Arc::new(profile.clone());

    let handles: Vec<_> = files
        .into_iter()
        .map(|file| {
            let semaphore = semaphore.clone();
            let extractor = extractor.clone();
            let engine = engine.clone();
            let profile = profile.clone();
            let file_name = file.file_name.clone();
            let handle = tokio::spawn(async move {
                let _permit = semaphore.acquire_owned().await.map_err(|e| e.to_string())?;
                score_file(&extractor, &engine, &profile, file).await
            });
            (file_name, handle)
        })
        .collect();

    let mut outcomes = Vec::with_capacity(handles.len());
    for (file_name, handle) in handles {
        let outcome = match handle.await {
            Ok(result) => result,
            Err(e) => Err(format!("scoring task failed: {e}")),
        };
        outcomes.push((file_name, outcome));
    }

    let report = build_report(outcomes, &options);
    info!(
        "Batch {} ranked {} of {} resumes ({} failed)",
        report.batch_id, report.summary.qualified, report.summary.processed, report.summary.failed
    );
    report
}

async fn score_file(
    extractor: &EntityExtractor,
    engine: &ScoringEngine,
    profile: &JobProfile,
    file: UploadedFile,
) -> Result<ScoredResume, String> {
    let (format, text) = read_document(&file.file_name, file.bytes)
        .await
        .map_err(|e| e.to_string())?;
    let parsed = extractor.extract(&text).await;
    let score = engine.score(&parsed, profile, &text, Some(format)).await;
    Ok(ScoredResume {
        file_name: file.file_name,
        candidate_name: parsed.name.first().cloned(),
        score,
    })
}

/// Filters by `min_score`, orders by descending total (ties keep input
/// order), truncates to `top_n` and assigns ranks from 1.
pub fn build_report(
    outcomes: Vec<(String, Result<ScoredResume, String>)>,
    options: &RankOptions,
) -> BatchReport {
    let processed = outcomes.len();
    let mut scored = Vec::new();
    let mut failed = Vec::new();

    for (file_name, outcome) in outcomes {
        match outcome {
            Ok(resume) => scored.push(resume),
            Err(error) => {
                warn!("Failed to score '{}': {}", file_name, error);
                failed.push(FailedResume { file_name, error });
            }
        }
    }

    scored.retain(|resume| resume.score.total_score >= options.min_score);
    scored.sort_by(|a, b| b.score.total_score.cmp(&a.score.total_score));
    scored.truncate(options.top_n);

    let ranked: Vec<RankedResume> = scored
        .into_iter()
        .enumerate()
        .map(|(i, resume)| RankedResume { rank: i + 1, resume })
        .collect();

    let scores: Vec<u32> = ranked.iter().map(|r| r.resume.score.total_score).collect();
    let summary = BatchSummary {
        processed,
        failed: failed.len(),
        qualified: ranked.len(),
        highest_score: scores.iter().copied().max(),
        average_score: (!scores.is_empty()).then(|| {
            let mean = scores.iter().map(|s| f64::from(*s)).sum::<f64>() / scores.len() as f64;
            (mean * 10.0).round() / 10.0
        }),
    };

    BatchReport {
        batch_id: Uuid::new_v4(),
        ranked,
        failed,
        summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::NoopRecognizer;
    use crate::scoring::grammar::{GrammarChecker, GrammarError, GrammarIssues};
    use crate::vocabulary::Vocabulary;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::io::{Cursor, Write};
    use std::time::Duration;
    use zip::write::SimpleFileOptions;

    struct CleanGrammar;

    #[async_trait]
    impl GrammarChecker for CleanGrammar {
        async fn check(&self, _text: &str, _language: &str) -> Result<usize, GrammarError> {
            Ok(0)
        }
    }

    fn engine() -> ScoringEngine {
        ScoringEngine::new(
            Arc::new(Vocabulary::default()),
            Arc::new(CleanGrammar),
            "en-US".into(),
            Duration::from_secs(1),
        )
    }

    fn extractor() -> EntityExtractor {
        EntityExtractor::new(Arc::new(Vocabulary::default()), Arc::new(NoopRecognizer))
    }

    /// A scored resume whose total is `total`, built through the real engine
    /// and then overridden so ordering tests stay readable.
    fn scored(file_name: &str, total: u32) -> ScoredResume {
        let mut score = engine().score_with_grammar(
            &Default::default(),
            &Default::default(),
            "",
            None,
            GrammarIssues::Count(0),
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        );
        score.total_score = total;
        ScoredResume {
            file_name: file_name.to_string(),
            candidate_name: None,
            score,
        }
    }

    fn ok(file_name: &str, total: u32) -> (String, Result<ScoredResume, String>) {
        (file_name.to_string(), Ok(scored(file_name, total)))
    }

    fn docx(paragraphs: &[&str]) -> Bytes {
        let body: String = paragraphs
            .iter()
            .map(|p| format!("<w:p><w:r><w:t>{p}</w:t></w:r></w:p>"))
            .collect();
        let xml = format!("<w:document><w:body>{body}</w:body></w:document>");
        let mut buffer = Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut buffer);
            writer
                .start_file("word/document.xml", SimpleFileOptions::default())
                .unwrap();
            writer.write_all(xml.as_bytes()).unwrap();
            writer.finish().unwrap();
        }
        Bytes::from(buffer.into_inner())
    }

    #[test]
    fn test_ranking_orders_filters_and_truncates() {
        let outcomes = vec![
            ok("a.pdf", 55),
            ok("b.pdf", 80),
            ("c.txt".to_string(), Err("unsupported".to_string())),
            ok("d.pdf", 30),
            ok("e.pdf", 80),
            ok("f.pdf", 70),
        ];
        let options = RankOptions {
            top_n: 3,
            min_score: 50,
            concurrency: 1,
        };
        let report = build_report(outcomes, &options);

        let order: Vec<(&str, usize)> = report
            .ranked
            .iter()
            .map(|r| (r.resume.file_name.as_str(), r.rank))
            .collect();
        assert_eq!(order, vec![("b.pdf", 1), ("e.pdf", 2), ("f.pdf", 3)]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].file_name, "c.txt");
        assert_eq!(
            report.summary,
            BatchSummary {
                processed: 6,
                failed: 1,
                qualified: 3,
                highest_score: Some(80),
                average_score: Some(76.7),
            }
        );
    }

    #[test]
    fn test_empty_ranking_has_no_statistics() {
        let report = build_report(vec![ok("a.pdf", 10)], &RankOptions { min_score: 50, ..Default::default() });
        assert!(report.ranked.is_empty());
        assert_eq!(report.summary.highest_score, None);
        assert_eq!(report.summary.average_score, None);
    }

    #[tokio::test]
    async fn test_bad_file_does_not_abort_batch() {
        let files = vec![
            UploadedFile {
                file_name: "notes.txt".into(),
                bytes: Bytes::from_static(b"plain text"),
            },
            UploadedFile {
                file_name: "jane.docx".into(),
                bytes: docx(&["JANE DOE", "Skills", "Python, Docker", "jane@example.com"]),
            },
            UploadedFile {
                file_name: "broken.docx".into(),
                bytes: Bytes::from_static(b"not a zip archive"),
            },
        ];
        let report = rank_resumes(
            &extractor(),
            &engine(),
            &JobProfile::default(),
            files,
            RankOptions {
                concurrency: 2,
                ..Default::default()
            },
        )
        .await;

        assert_eq!(report.summary.processed, 3);
        assert_eq!(report.ranked.len(), 1);
        assert_eq!(report.ranked[0].resume.file_name, "jane.docx");
        assert_eq!(report.ranked[0].resume.candidate_name.as_deref(), Some("Jane Doe"));
        let failed: Vec<&str> = report.failed.iter().map(|f| f.file_name.as_str()).collect();
        assert_eq!(failed, vec!["notes.txt", "broken.docx"]);
    }
}
