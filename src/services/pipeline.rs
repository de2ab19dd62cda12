use crate::config::{read_api_key, Settings};
use crate::domain::errors::EnrichError;
use crate::domain::models::{BatchSummary, ItemOutcome, Stage};
use crate::services::artifacts::{ArtifactBody, ArtifactStore};
use crate::services::hash_source::extract_hashes;
use crate::services::renderer::ReportRenderer;
use crate::services::verdict_client::{VerdictLookup, VirusTotalClient};
use std::any::Any;
use std::cell::Cell;
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Drives fetch → render → persist for each hash, one at a time.
///
/// Every hash ends in exactly one `ItemOutcome`; a failure at any stage is
/// logged and recorded, and the loop moves on to the next hash.
pub struct BatchOrchestrator<'a> {
    client: &'a dyn VerdictLookup,
    renderer: &'a ReportRenderer,
    store: &'a ArtifactStore,
}

struct ItemFailure {
    stage: Stage,
    errors: Vec<EnrichError>,
}

impl ItemFailure {
    fn at(stage: Stage, error: EnrichError) -> Self {
        Self {
            stage,
            errors: vec![error],
        }
    }

    fn message(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl<'a> BatchOrchestrator<'a> {
    pub fn new(
        client: &'a dyn VerdictLookup,
        renderer: &'a ReportRenderer,
        store: &'a ArtifactStore,
    ) -> Self {
        Self {
            client,
            renderer,
            store,
        }
    }

    pub fn run(&self, hashes: &[String]) -> Vec<ItemOutcome> {
        let total = hashes.len();
        hashes
            .iter()
            .enumerate()
            .map(|(i, hash)| {
                tracing::info!(hash = %hash, position = i + 1, total, "processing hash");
                self.process(hash)
            })
            .collect()
    }

    fn process(&self, hash: &str) -> ItemOutcome {
        let stage = Cell::new(Stage::Fetch);
        let result = catch_unwind(AssertUnwindSafe(|| self.advance(hash, &stage)));
        match result {
            Ok(Ok(())) => {
                tracing::info!(hash = %hash, "report generated");
                ItemOutcome::persisted(hash)
            }
            Ok(Err(failure)) => {
                let message = failure.message();
                for e in &failure.errors {
                    if matches!(e, EnrichError::Unexpected(_)) {
                        tracing::error!(
                            hash = %hash,
                            stage = %failure.stage,
                            class = e.class(),
                            error = %e,
                            "unexpected failure"
                        );
                    } else {
                        tracing::warn!(
                            hash = %hash,
                            stage = %failure.stage,
                            class = e.class(),
                            error = %e,
                            "hash failed"
                        );
                    }
                }
                ItemOutcome::failed(hash, failure.stage, message)
            }
            Err(panic) => {
                let e = EnrichError::Unexpected(panic_message(panic.as_ref()));
                tracing::error!(
                    hash = %hash,
                    stage = %stage.get(),
                    class = e.class(),
                    error = %e,
                    "unexpected failure"
                );
                ItemOutcome::failed(hash, stage.get(), e.to_string())
            }
        }
    }

    fn advance(&self, hash: &str, stage: &Cell<Stage>) -> Result<(), ItemFailure> {
        stage.set(Stage::Fetch);
        let record = self
            .client
            .fetch(hash)
            .map_err(|e| ItemFailure::at(Stage::Fetch, e))?;

        stage.set(Stage::Render);
        let report = self
            .renderer
            .render(&record)
            .map_err(|e| ItemFailure::at(Stage::Render, e))?;

        // Both writes are attempted; a successful one is left in place if the other fails.
        stage.set(Stage::Persist);
        let errors: Vec<EnrichError> = [
            self.store.put(hash, ArtifactBody::Raw(&record)),
            self.store.put(hash, ArtifactBody::Rendered(&report)),
        ]
        .into_iter()
        .filter_map(Result::err)
        .collect();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ItemFailure {
                stage: Stage::Persist,
                errors,
            })
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        format!("panic: {s}")
    } else if let Some(s) = panic.downcast_ref::<String>() {
        format!("panic: {s}")
    } else {
        "panic with non-string payload".to_string()
    }
}

/// Loads everything the batch needs, then runs it.
///
/// Credential, template and hash list problems are returned before any hash is
/// looked up. The HTTP session lives for the duration of this call.
pub fn run_batch(settings: &Settings) -> Result<BatchSummary, EnrichError> {
    let api_key = read_api_key(&settings.api_key_file)?;
    let renderer = ReportRenderer::from_dir(&settings.template_dir, &settings.template)?;
    let hashes = extract_hashes(&settings.hashes)?;
    let store = ArtifactStore::new(&settings.responses_dir, &settings.reports_dir);
    if settings.create_output_dirs {
        store.ensure_dirs()?;
    }
    let client = VirusTotalClient::new(&api_key, &settings.api_url, settings.timeout())?;

    tracing::info!(
        count = hashes.len(),
        source = %settings.hashes.display(),
        "hash list loaded"
    );
    let outcomes = BatchOrchestrator::new(&client, &renderer, &store).run(&hashes);
    let summary = BatchSummary::from_outcomes(outcomes);
    tracing::info!(
        total = summary.total,
        persisted = summary.persisted,
        failed = summary.failed,
        "batch complete"
    );
    Ok(summary)
}
