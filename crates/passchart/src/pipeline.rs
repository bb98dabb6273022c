//! Per-image extraction: crop, rectify, erase labels, then locate each
//! outcome's markers and map them to yards.

use log::{debug, warn};
use passchart_core::{OutcomeKind, PassCount, PassEvent, RgbImage};
use passchart_field::{
    correct_perspective, erase_sidelines, FieldImage, FieldMapper, FieldProfile, FieldTrapezoid,
};
use passchart_markers::{locate_markers, MarkerParams, Reconciliation};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::error::PassChartError;
use crate::io::{records_for, ChartIdentity, PassRecord};
use crate::params::{InputParams, PipelineParams};

/// Keep the field part of a canonical chart raster.
pub fn crop_canonical(raw: &RgbImage, params: &InputParams) -> Result<RgbImage, PassChartError> {
    if raw.width != params.expected_width || raw.height != params.expected_height {
        return Err(PassChartError::UnexpectedInputSize {
            width: raw.width,
            height: raw.height,
            expected_width: params.expected_width,
            expected_height: params.expected_height,
        });
    }
    Ok(raw.top_rows(params.crop_rows))
}

/// Rectified, label-free field ready for marker search.
#[derive(Clone, Debug)]
pub struct PreparedField {
    pub field: FieldImage,
    pub trapezoid: FieldTrapezoid,
}

/// Result of one chart.
#[derive(Clone, Debug)]
pub struct ChartExtraction {
    /// Exactly `counts.attempts()` events in output order.
    pub events: Vec<PassEvent>,
    /// `None` when the image was rejected.
    pub profile: Option<FieldProfile>,
    /// Why the image was rejected, if it was.
    pub rejection: Option<String>,
    /// Incompletion merge decision, when incompletions were clustered.
    pub reconciliation: Option<Reconciliation>,
}

impl ChartExtraction {
    pub fn located(&self) -> usize {
        self.events.iter().filter(|e| e.coords.is_some()).count()
    }
}

/// Runs the full pipeline on chart images.
#[derive(Clone, Debug)]
pub struct PassChartExtractor {
    params: PipelineParams,
    markers: MarkerParams,
}

impl Default for PassChartExtractor {
    fn default() -> Self {
        Self::new(PipelineParams::default())
    }
}

impl PassChartExtractor {
    pub fn new(params: PipelineParams) -> Self {
        let markers = params.marker_params();
        Self { params, markers }
    }

    /// Crop, rectify and erase the sideline labels.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self, raw), fields(width = raw.width, height = raw.height))
    )]
    pub fn prepare(&self, raw: &RgbImage) -> Result<PreparedField, PassChartError> {
        let cropped = crop_canonical(raw, &self.params.input)?;
        let corrected = correct_perspective(&cropped, &self.params.correction)?;
        let mut field = corrected.field;
        erase_sidelines(&mut field, self.params.correction.border_color);
        Ok(PreparedField {
            field,
            trapezoid: corrected.trapezoid,
        })
    }

    /// Locate every declared event on a prepared field.
    ///
    /// Events come out grouped by outcome in [`OutcomeKind::ALL`] order;
    /// within an outcome located events precede unresolved ones.
    pub fn locate(&self, field: &FieldImage, counts: &PassCount) -> ChartExtraction {
        let mapper = FieldMapper::for_field(field, &self.params.mapping);
        let mut events = Vec::with_capacity(counts.attempts() as usize);
        let mut reconciliation = None;

        for kind in OutcomeKind::ALL {
            let declared = counts.get(kind) as usize;
            let found = locate_markers(field, kind, declared, &self.markers);
            debug!("{kind}: {} of {declared} located", found.centroids.len());
            events.extend(found.slots().map(|p| PassEvent {
                outcome: kind,
                coords: mapper.map(p),
            }));
            if found.reconciliation.is_some() {
                reconciliation = found.reconciliation;
            }
        }

        ChartExtraction {
            events,
            profile: Some(field.profile),
            rejection: None,
            reconciliation,
        }
    }

    /// Full pipeline on one raw chart. Never fails: a rejected image yields
    /// unlocated events.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self, raw, counts), fields(attempts = counts.attempts()))
    )]
    pub fn extract(&self, raw: &RgbImage, counts: &PassCount) -> ChartExtraction {
        match self.prepare(raw) {
            Ok(prepared) => self.locate(&prepared.field, counts),
            Err(e) => {
                warn!("chart rejected: {e}");
                Self::rejected(counts, e.to_string())
            }
        }
    }

    /// Events for a chart whose image could not be used.
    pub fn rejected(counts: &PassCount, reason: String) -> ChartExtraction {
        ChartExtraction {
            events: counts.unlocated_events(),
            profile: None,
            rejection: Some(reason),
            reconciliation: None,
        }
    }

    /// [`Self::extract`] plus the identity join key.
    pub fn extract_records(
        &self,
        raw: &RgbImage,
        counts: &PassCount,
        identity: &ChartIdentity,
    ) -> Vec<PassRecord> {
        records_for(identity, &self.extract(raw, counts).events)
    }
}
