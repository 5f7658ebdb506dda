//! @ai:module:intent Snapshot, capture, compose and export a store's report
//! @ai:module:layer application
//! @ai:module:public_api ReportPipeline
//! @ai:module:stateless true

use crate::fetcher::SeriesFetcherTrait;
use crate::report::charts::ChartCapture;
use crate::report::composer::ReportComposer;
use crate::report::document::ReportDocument;
use crate::report::sink::DocumentSink;
use crate::store::{AnalyticsState, AnalyticsStore};
use anyhow::Result;
use std::path::{Path, PathBuf};

/// @ai:intent Report synthesis over an injected chart capture
pub struct ReportPipeline<C: ChartCapture> {
    composer: ReportComposer,
    capture: Option<C>,
}

impl<C: ChartCapture> ReportPipeline<C> {
    /// @ai:intent Create a pipeline that captures a chart for every report
    /// @ai:effects pure
    pub fn new(composer: ReportComposer, capture: C) -> Self {
        Self {
            composer,
            capture: Some(capture),
        }
    }

    /// @ai:intent Create a pipeline whose reports carry a value summary instead of a chart
    /// @ai:effects pure
    pub fn without_chart(composer: ReportComposer) -> Self {
        Self {
            composer,
            capture: None,
        }
    }

    /// @ai:intent Build a document from the store's next settled snapshot
    /// @ai:post never fails; a capture error yields a summary in place of the chart
    /// @ai:effects fs:write, time
    pub async fn build<F: SeriesFetcherTrait>(&self, store: &AnalyticsStore<F>) -> ReportDocument {
        let state = Self::settled_state(store).await;
        let config = store.config();

        let chart = match &self.capture {
            Some(capture) => match capture.capture(config, &state.series).await {
                Ok(image) => Some(image),
                Err(e) => {
                    tracing::warn!("[{}] chart capture failed, using summary: {}", config.key(), e);
                    None
                }
            },
            None => None,
        };

        self.composer.compose(&state, config, chart)
    }

    /// @ai:intent Wait out an in-flight fetch so range, series and table agree
    /// @ai:effects time
    async fn settled_state<F: SeriesFetcherTrait>(store: &AnalyticsStore<F>) -> AnalyticsState {
        let mut updates = store.subscribe();
        let settled = match updates.wait_for(|state| !state.loading).await {
            Ok(state) => state.clone(),
            Err(_) => store.get_state(),
        };
        settled
    }

    /// @ai:intent Build the report and hand it to a sink
    /// @ai:effects fs:write
    pub async fn export<F: SeriesFetcherTrait, S: DocumentSink + ?Sized>(
        &self,
        store: &AnalyticsStore<F>,
        sink: &S,
        output_dir: &Path,
    ) -> Result<PathBuf> {
        let document = self.build(store).await;
        let path = sink.write(&document, output_dir)?;

        tracing::info!(
            "[{}] report written to {}{}",
            store.config().key(),
            path.display(),
            if document.is_simulated() { " (simulated data)" } else { "" }
        );
        Ok(path)
    }
}
