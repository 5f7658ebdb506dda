//! @ai:module:intent Render a resource series to an in-memory chart image
//! @ai:module:layer infrastructure
//! @ai:module:public_api ChartCapture, PlottersChartRenderer
//! @ai:module:stateless true

use crate::error::{Error, Result};
use crate::report::document::{ChartImage, ImageFormat};
use crate::resource::ResourceTypeConfig;
use crate::series::TimeSeriesPoint;
use plotters::prelude::*;
use std::path::Path;

/// @ai:intent Capability producing a chart snapshot for a series
#[allow(async_fn_in_trait)]
pub trait ChartCapture: Send + Sync {
    /// @ai:intent Capture the chart of one resource's series
    async fn capture(
        &self,
        config: &ResourceTypeConfig,
        series: &[TimeSeriesPoint],
    ) -> Result<ChartImage>;
}

/// @ai:intent Line chart renderer backed by plotters
pub struct PlottersChartRenderer {
    width: u32,
    height: u32,
}

impl PlottersChartRenderer {
    /// @ai:intent Create a renderer with the default report size
    /// @ai:effects pure
    pub fn new() -> Self {
        Self::with_size(800, 500)
    }

    pub fn with_size(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// @ai:intent Draw the series as a line chart in the resource color
    /// @ai:pre series is not empty
    /// @ai:effects fs:write
    fn render_png(
        &self,
        config: &ResourceTypeConfig,
        series: &[TimeSeriesPoint],
        output_path: &Path,
    ) -> anyhow::Result<()> {
        let root = BitMapBackend::new(output_path, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE)?;

        let first = series.first().map(|p| p.period).unwrap_or_default();
        let last = series.last().map(|p| p.period).unwrap_or(first);
        // A single-year series still needs a non-empty axis.
        let (x_start, x_end) = if first == last {
            (first.saturating_sub(1), last.saturating_add(1))
        } else {
            (first, last)
        };

        let peak = series.iter().map(|p| p.value).fold(0.0, f64::max);
        let y_end = if peak > 0.0 { peak * 1.15 } else { 1.0 };

        let color = RGBColor(
            config.display_color.r,
            config.display_color.g,
            config.display_color.b,
        );

        let mut chart = ChartBuilder::on(&root)
            .caption(config.document_template.title, ("sans-serif", 26))
            .margin(20)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(x_start..x_end, 0f64..y_end)?;

        chart
            .configure_mesh()
            .x_desc("Year")
            .y_desc(config.unit)
            .x_labels(series.len().clamp(2, 12))
            .x_label_formatter(&|x| x.to_string())
            .draw()?;

        chart
            .draw_series(LineSeries::new(
                series.iter().map(|p| (p.period, p.value)),
                color.stroke_width(3),
            ))?
            .label(config.display_name)
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(3))
            });

        chart.draw_series(
            series
                .iter()
                .map(|p| Circle::new((p.period, p.value), 4, color.filled())),
        )?;

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .border_style(BLACK)
            .draw()?;

        root.present()?;
        Ok(())
    }
}

impl Default for PlottersChartRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ChartCapture for PlottersChartRenderer {
    /// @ai:intent Render through a temporary PNG file and return its bytes
    /// @ai:effects fs:write, fs:read
    async fn capture(
        &self,
        config: &ResourceTypeConfig,
        series: &[TimeSeriesPoint],
    ) -> Result<ChartImage> {
        if series.is_empty() {
            return Err(Error::ChartCapture("no data points to plot".to_string()));
        }

        let file = tempfile::Builder::new()
            .prefix("chart-")
            .suffix(".png")
            .tempfile()?;

        self.render_png(config, series, file.path())
            .map_err(|e| Error::ChartCapture(e.to_string()))?;

        let bytes = std::fs::read(file.path())?;

        Ok(ChartImage {
            format: ImageFormat::Png,
            width: self.width,
            height: self.height,
            bytes,
        })
    }
}
