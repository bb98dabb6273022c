//! Field geometry for pass charts.
//!
//! ## Quickstart
//!
//! ```
//! use passchart_core::{PixelPoint, RgbImage};
//! use passchart_field::{
//!     correct_perspective, erase_sidelines, CorrectionParams, FieldMapper, MappingParams,
//!     FIELD_GREY,
//! };
//!
//! let raw = RgbImage::filled(1200, 680, FIELD_GREY);
//! let mut corrected = correct_perspective(&raw, &CorrectionParams::default()).unwrap();
//! erase_sidelines(&mut corrected.field, FIELD_GREY);
//!
//! let mapper = FieldMapper::for_field(&corrected.field, &MappingParams::default());
//! let at_los = mapper.to_field(PixelPoint::new(572.0, 600.0));
//! assert!(at_los.y.abs() < 1e-9);
//! ```
//!
//! Pipeline order:
//! 1. [`correct_perspective`] turns the trapezoidal field into a rectangle and
//!    picks the [`FieldProfile`] from the corrected width.
//! 2. [`erase_sidelines`] paints over the yard-line labels of that profile.
//! 3. [`FieldMapper`] converts marker centroids to yards.

mod mapping;
mod params;
mod profile;
mod sideline;
mod undistort;

pub use mapping::FieldMapper;
pub use params::{CorrectionParams, MappingParams, FIELD_GREY};
pub use profile::{FieldImage, FieldProfile, ProfileCalibration};
pub use sideline::{erase_labels, erase_sidelines, PixelRect, SidelineLayout, YardLabel};
pub use undistort::{
    correct_perspective, detect_trapezoid, CorrectedField, CorrectionError, FieldTrapezoid,
};
