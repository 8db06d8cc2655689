//! Core Extractor implementation

use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::merge::merge;
use crate::orchestrator::{self, ExtractionOutcome};
use crate::prompt::PromptBuilder;
use crate::types::{ExtractionReport, RecordSource, Stage, StageEvent};
use minutes_domain::traits::LlmProvider;
use minutes_llm::strip_preamble;
use std::sync::Arc;
use std::time::Instant;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// How a secondary record is combined with the direct one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Combine {
    /// Field-by-field merge, full prompt
    Merge,
    /// Secondary wins unless entirely default, compact prompt
    Replace,
}

/// The Extractor turns a free-text meeting description into a meeting record
///
/// Direct extraction runs first. When its result falls below the confidence
/// policy, the text is sent to the generative model, the model's labeled
/// answer goes through direct extraction again, and the two records are
/// combined. Model failures never fail the call.
pub struct Extractor<L>
where
    L: LlmProvider,
{
    llm_provider: Arc<L>,
    config: ExtractorConfig,
}

impl<L> Extractor<L>
where
    L: LlmProvider + Send + Sync + 'static,
    L::Error: std::fmt::Display,
{
    /// Create a new Extractor
    pub fn new(llm_provider: L, config: ExtractorConfig) -> Self {
        Self {
            llm_provider: Arc::new(llm_provider),
            config,
        }
    }

    /// Active configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    fn validate_input(&self, text: &str) -> Result<(), ExtractorError> {
        if text.trim().is_empty() {
            return Err(ExtractorError::EmptyText);
        }
        let length = text.chars().count();
        if length > self.config.max_text_length {
            return Err(ExtractorError::TextTooLong(
                length,
                self.config.max_text_length,
            ));
        }
        Ok(())
    }

    /// Direct extraction only, without the model
    pub fn extract_direct(&self, text: &str) -> Result<ExtractionOutcome, ExtractorError> {
        self.validate_input(text)?;
        Ok(orchestrator::extract(text, &self.config))
    }

    /// Extract a meeting record, calling the model when direct extraction is weak
    pub async fn extract(&self, text: &str) -> Result<ExtractionReport, ExtractorError> {
        self.run(text, Combine::Merge).await
    }

    /// Extract a record for document generation
    ///
    /// Same as [`extract`](Self::extract), except that a model answer with
    /// any resolved field replaces the direct record instead of being merged
    /// into it, and the shorter prompt is used.
    pub async fn generate(&self, text: &str) -> Result<ExtractionReport, ExtractorError> {
        self.run(text, Combine::Replace).await
    }

    async fn run(&self, text: &str, combine: Combine) -> Result<ExtractionReport, ExtractorError> {
        let start_time = Instant::now();
        self.validate_input(text)?;

        info!("Starting extraction, text length {}", text.chars().count());

        let primary = orchestrator::extract(text, &self.config);
        let filled_fields = primary.filled_fields();
        let resolved_topics = primary.resolved_topics;
        let acceptable = primary.is_acceptable(&self.config.confidence);

        let mut events = primary.events;
        events.push(StageEvent::new(
            Stage::Confidence,
            format!(
                "{} fields, {} topics: {}",
                filled_fields,
                resolved_topics,
                if acceptable { "accepted" } else { "low" }
            ),
        ));

        let mut report = ExtractionReport {
            record: primary.record,
            source: RecordSource::Primary,
            raw_text: text.to_string(),
            filled_fields,
            resolved_topics,
            model_name: None,
            secondary_error: None,
            processing_time_ms: 0,
            events,
        };

        if !acceptable {
            if self.config.secondary_pass {
                self.run_secondary(text, combine, &mut report).await;
            } else {
                debug!("Low-confidence record, secondary pass disabled");
                report.source = RecordSource::PrimaryFallback;
                report.secondary_error = Some("secondary pass disabled".to_string());
            }
        }

        report.processing_time_ms = start_time.elapsed().as_millis() as u64;
        info!(
            "Extraction complete: {:?}, {} fields, {} topics in {}ms",
            report.source,
            report.record.filled_scalar_count(),
            report.record.topics.len(),
            report.processing_time_ms
        );
        Ok(report)
    }

    async fn run_secondary(&self, text: &str, combine: Combine, report: &mut ExtractionReport) {
        let model_name = self.llm_provider.model_name().to_string();
        info!("Direct extraction is low-confidence, asking {}", model_name);
        report.model_name = Some(model_name);

        match self.secondary_pass(text, combine == Combine::Replace).await {
            Ok((raw_output, secondary)) => {
                report.events.push(StageEvent::new(
                    Stage::Secondary,
                    format!(
                        "{} fields, {} topics from model output",
                        secondary.filled_fields(),
                        secondary.resolved_topics
                    ),
                ));
                match combine {
                    Combine::Merge => {
                        report.raw_text = raw_output;
                        let primary = std::mem::take(&mut report.record);
                        report.record = merge(primary, secondary.record);
                        report.events.push(StageEvent::new(
                            Stage::Merge,
                            format!("{} fields filled", report.record.filled_scalar_count()),
                        ));
                        report.source = RecordSource::Merged;
                    }
                    Combine::Replace if !secondary.record.is_all_default() => {
                        report.raw_text = raw_output;
                        report.record = secondary.record;
                        report.events.push(StageEvent::new(Stage::Merge, "replaced by model record"));
                        report.source = RecordSource::Secondary;
                    }
                    Combine::Replace => {
                        report.events.push(StageEvent::new(Stage::Merge, "model record empty"));
                        report.source = RecordSource::PrimaryFallback;
                        report.secondary_error = Some("model output held no fields".to_string());
                    }
                }
            }
            Err(e) => {
                warn!("Secondary pass failed, keeping direct result: {}", e);
                report
                    .events
                    .push(StageEvent::new(Stage::Secondary, e.to_string()));
                report.source = RecordSource::PrimaryFallback;
                report.secondary_error = Some(e.to_string());
            }
        }
    }

    async fn secondary_pass(
        &self,
        text: &str,
        compact: bool,
    ) -> Result<(String, ExtractionOutcome), ExtractorError> {
        let prompt = PromptBuilder::new(text).compact(compact).build();
        debug!("Prompt length: {} chars", prompt.len());

        let budget = self.config.llm_timeout();
        let response = timeout(budget, self.call_llm(&prompt))
            .await
            .map_err(|_| ExtractorError::Timeout(budget))??;
        debug!("LLM response length: {} chars", response.len());

        let cleaned = strip_preamble(&response);
        let outcome = orchestrator::extract(&cleaned, &self.config);
        Ok((cleaned, outcome))
    }

    /// Call the LLM provider
    async fn call_llm(&self, prompt: &str) -> Result<String, ExtractorError> {
        let llm = Arc::clone(&self.llm_provider);
        let prompt = prompt.to_string();

        // Call in a blocking context since LlmProvider is not async
        tokio::task::spawn_blocking(move || {
            llm.generate(&prompt)
                .map_err(|e| ExtractorError::Llm(e.to_string()))
        })
        .await
        .map_err(|e| ExtractorError::Llm(format!("Task join error: {}", e)))?
    }
}
