//! @ai:module:intent Assemble report documents from a store snapshot
//! @ai:module:layer application
//! @ai:module:public_api ReportComposer, ReportBranding
//! @ai:module:stateless true

use crate::analytics::SeriesSummary;
use crate::config::ReportConfig;
use crate::report::document::{
    ChartContent, ChartImage, ChartSection, FooterSection, HeaderSection, MetadataSection,
    RecommendationsSection, ReportDocument, ReportSection, TableSection,
};
use crate::resource::ResourceTypeConfig;
use crate::store::AnalyticsState;
use chrono::{Datelike, NaiveDate};

/// @ai:intent Organisation-level strings shared by every report
#[derive(Debug, Clone)]
pub struct ReportBranding {
    pub brand_title: String,
    pub copyright_holder: String,
}

impl From<&ReportConfig> for ReportBranding {
    fn from(config: &ReportConfig) -> Self {
        Self {
            brand_title: config.brand_title.clone(),
            copyright_holder: config.copyright_holder.clone(),
        }
    }
}

/// @ai:intent Builds the fixed-order section list of a report
pub struct ReportComposer {
    branding: ReportBranding,
}

impl ReportComposer {
    /// @ai:intent Create a composer with the given branding
    /// @ai:effects pure
    pub fn new(branding: ReportBranding) -> Self {
        Self { branding }
    }

    /// @ai:intent Compose a report dated today
    /// @ai:effects time
    pub fn compose(
        &self,
        state: &AnalyticsState,
        config: &ResourceTypeConfig,
        chart: Option<ChartImage>,
    ) -> ReportDocument {
        let today = chrono::Local::now().date_naive();
        self.compose_on(state, config, chart, today)
    }

    /// @ai:intent Compose a report with an explicit generation date
    /// @ai:post sections are Header, Metadata, Chart, Table, Recommendations, Footer
    /// @ai:effects pure
    pub fn compose_on(
        &self,
        state: &AnalyticsState,
        config: &ResourceTypeConfig,
        chart: Option<ChartImage>,
        generated_date: NaiveDate,
    ) -> ReportDocument {
        let summary = SeriesSummary::from_series(&state.series);

        let sections = vec![
            ReportSection::Header(HeaderSection {
                brand_title: self.branding.brand_title.clone(),
                title: config.document_template.title.to_string(),
                generated_date,
            }),
            ReportSection::Metadata(MetadataSection {
                resource: config.resource,
                range: state.range,
                projection: state.projection,
                unit: config.unit.to_string(),
                degraded_notice: state.degraded.then(|| Self::simulated_notice(state, config)),
                summary: summary.clone(),
            }),
            ReportSection::Chart(Self::chart_section(state, config, chart, summary.as_ref())),
            ReportSection::Table(Self::table_section(state, config)),
            ReportSection::Recommendations(RecommendationsSection {
                items: config
                    .document_template
                    .recommendations
                    .iter()
                    .map(|item| item.to_string())
                    .collect(),
            }),
            ReportSection::Footer(FooterSection {
                copyright: format!(
                    "\u{a9} {} {}. All rights reserved.",
                    generated_date.year(),
                    self.branding.copyright_holder
                ),
            }),
        ];

        ReportDocument {
            resource: config.resource,
            display_name: config.display_name.to_string(),
            sections,
        }
    }

    fn simulated_notice(state: &AnalyticsState, config: &ResourceTypeConfig) -> String {
        format!(
            "Simulated data: live {} production figures for {} could not be retrieved. \
             The values in this report are generated estimates, not measurements.",
            config.display_name.to_lowercase(),
            state.range
        )
    }

    fn chart_section(
        state: &AnalyticsState,
        config: &ResourceTypeConfig,
        chart: Option<ChartImage>,
        summary: Option<&SeriesSummary>,
    ) -> ChartSection {
        let alt_text = format!("{} production, {}", config.display_name, state.range);

        let content = match chart {
            Some(image) => ChartContent::Image(image),
            None => ChartContent::Summary {
                text: summary
                    .map(|summary| summary.describe(config.unit))
                    .unwrap_or_else(|| {
                        format!("No production data available for {}.", state.range)
                    }),
            },
        };

        ChartSection { alt_text, content }
    }

    fn table_section(state: &AnalyticsState, config: &ResourceTypeConfig) -> TableSection {
        let mut rows = state.series.clone();
        rows.sort_by_key(|point| point.period);

        TableSection {
            caption: config.document_template.table_caption.to_string(),
            unit: config.unit.to_string(),
            rows,
        }
    }
}

impl Default for ReportComposer {
    fn default() -> Self {
        Self::new(ReportBranding::from(&ReportConfig::default()))
    }
}
