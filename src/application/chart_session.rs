// Chart session - Owns the rendering handle and the rolling load series
use crate::application::page_view::ChartSurface;
use crate::domain::chart::{ChartOptions, ChartSeries, SeriesPoint};
use crate::domain::error::FlowError;
use std::sync::Arc;

pub struct ChartSession {
    surface: Option<Arc<dyn ChartSurface>>,
    options: ChartOptions,
    series: ChartSeries,
}

impl ChartSession {
    /// Set up an empty chart and draw it once.
    ///
    /// Without a surface the session is disabled: the failure is logged
    /// and later appends do nothing.
    pub fn initialize(surface: Option<Arc<dyn ChartSurface>>, options: ChartOptions) -> Self {
        let series = ChartSeries::new();

        match &surface {
            Some(surface) => {
                surface.render(&series, &options);
                tracing::info!("Chart initialized");
            }
            None => {
                tracing::error!("{}, charting disabled", FlowError::MissingRenderTarget);
            }
        }

        Self {
            surface,
            options,
            series,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.surface.is_some()
    }

    pub fn series(&self) -> &ChartSeries {
        &self.series
    }

    /// Append a point, evicting the oldest past capacity, then redraw.
    pub fn append_point(&mut self, label: String, value: f64) -> Option<SeriesPoint> {
        let Some(surface) = &self.surface else {
            tracing::debug!("Chart disabled, dropping point {} = {}", label, value);
            return None;
        };

        let evicted = self.series.push(SeriesPoint::new(label, value));
        if let Some(old) = &evicted {
            tracing::debug!("Evicted oldest chart point {}", old.label);
        }

        surface.render(&self.series, &self.options);
        evicted
    }
}
