use passchart_field::CorrectionError;

/// Reasons a chart image yields no usable field.
#[derive(thiserror::Error, Debug)]
pub enum PassChartError {
    #[error("unexpected input size {width}x{height} (expected {expected_width}x{expected_height})")]
    UnexpectedInputSize {
        width: usize,
        height: usize,
        expected_width: usize,
        expected_height: usize,
    },
    #[error(transparent)]
    Correction(#[from] CorrectionError),
}

/// Metadata that cannot be turned into pass counts.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum MetadataError {
    #[error("inconsistent pass counts: {what} would be {value}")]
    InconsistentCounts { what: &'static str, value: i64 },
}

/// Errors from reading or writing files.
#[derive(thiserror::Error, Debug)]
pub enum PassChartIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[cfg(feature = "image")]
    #[error(transparent)]
    Image(#[from] image::ImageError),
    #[error(transparent)]
    Metadata(#[from] MetadataError),
}
