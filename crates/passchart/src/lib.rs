//! Extract field-relative pass locations from pass-chart images.
//!
//! A pass chart is a perspective drawing of a football field with one
//! colored marker per pass attempt. Given the chart image and the pass
//! counts from its metadata, [`PassChartExtractor`] produces one
//! [`PassEvent`] per attempt with coordinates in yards (x from the middle of
//! the field, y downfield from the line of scrimmage), or without
//! coordinates when the marker could not be found.
//!
//! ## Quickstart
//!
//! ```no_run
//! use passchart::{load::load_rgb, GameMetadata, PassChartExtractor, PipelineParams};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let meta = GameMetadata::load_json("brady_tom_QB.json")?;
//! let raw = load_rgb("brady_tom_QB.jpeg")?;
//!
//! let extractor = PassChartExtractor::new(PipelineParams::default());
//! let records = extractor.extract_records(&raw, &meta.pass_count()?, &meta.identity(None));
//! println!("{}", serde_json::to_string_pretty(&records)?);
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `passchart::core`: pixel buffers, colors, homography, event types.
//! - `passchart::field`: profiles, perspective correction, label erasure, yard mapping.
//! - `passchart::markers`: segmentation, denoising, clustering, merge reconciliation.
//! - `passchart::load` (feature `image`): decoding chart files.

pub use passchart_core as core;
pub use passchart_field as field;
pub use passchart_markers as markers;

pub use passchart_core::{FieldCoords, OutcomeKind, PassCount, PassEvent, RgbImage};
pub use passchart_field::FieldProfile;

mod batch;
mod error;
mod io;
mod params;
mod pipeline;

#[cfg(feature = "image")]
pub mod load;

#[cfg(feature = "image")]
pub use batch::extract_batch_files;
pub use batch::{extract_batch, run_job};
pub use error::{MetadataError, PassChartError, PassChartIoError};
pub use io::{
    records_for, BatchManifest, ChartIdentity, ChartJob, ExtractionReport, GameMetadata,
    JobFailure, PassRecord,
};
pub use params::{InputParams, PipelineParams};
pub use pipeline::{crop_canonical, ChartExtraction, PassChartExtractor, PreparedField};
