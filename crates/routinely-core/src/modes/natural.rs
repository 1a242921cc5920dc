//! Natural-language mode: extract tasks from free text, then go automatic.

use std::time::Duration;

use super::{AutomaticAdapter, AutomaticRequest};
use crate::adaptation::Adaptation;
use crate::collaborators::TaskExtractor;
use crate::error::{ExtractionError, Result, ScheduleError};
use crate::task::Priority;

pub struct NaturalLanguageAdapter<'a> {
    extractor: &'a dyn TaskExtractor,
    timeout: Duration,
}

impl<'a> NaturalLanguageAdapter<'a> {
    pub fn new(extractor: &'a dyn TaskExtractor, timeout: Duration) -> Self {
        Self { extractor, timeout }
    }

    /// Run the extractor once and turn its output into an automatic plan.
    ///
    /// # Errors
    ///
    /// `Extraction` when the collaborator fails or exceeds the timeout,
    /// `NoExtractableTasks` when it returns nothing.
    pub async fn resolve(
        &self,
        text: &str,
        priority_focus: Option<Priority>,
    ) -> Result<AutomaticAdapter> {
        let extracted = tokio::time::timeout(self.timeout, self.extractor.extract(text))
            .await
            .map_err(|_| ExtractionError::Timeout {
                timeout_secs: self.timeout.as_secs(),
            })
            .and_then(|inner| inner)
            .map_err(|err| {
                tracing::warn!(error = %err, "task extraction failed");
                ScheduleError::Extraction(err)
            })?;

        if extracted.is_empty() {
            return Err(ScheduleError::NoExtractableTasks);
        }

        tracing::debug!(count = extracted.len(), "extracted tasks from free text");
        let count = extracted.len();
        Ok(AutomaticAdapter::new(AutomaticRequest {
            priority_focus,
            energy_hint: None,
        })
        .with_candidates(extracted)
        .with_note(Adaptation::TasksExtracted { count }))
    }
}
