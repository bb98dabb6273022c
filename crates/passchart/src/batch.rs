//! Many charts at once on the rayon pool.

use std::path::Path;

use log::{info, warn};
use passchart_core::RgbImage;
use rayon::prelude::*;

use crate::error::PassChartIoError;
use crate::io::{records_for, ChartJob, ExtractionReport, GameMetadata, JobFailure, PassRecord};
use crate::pipeline::PassChartExtractor;

/// Process one job.
///
/// Unreadable or inconsistent metadata is an error. An unreadable image is
/// not: its events are reported without coordinates.
pub fn run_job<L>(
    extractor: &PassChartExtractor,
    job: &ChartJob,
    load: &L,
) -> Result<Vec<PassRecord>, PassChartIoError>
where
    L: Fn(&Path) -> Result<RgbImage, PassChartIoError>,
{
    let meta = GameMetadata::load_json(&job.meta)?;
    let counts = meta.pass_count()?;
    let identity = meta.identity(job.week.clone());

    let extraction = match load(&job.image) {
        Ok(raw) => extractor.extract(&raw, &counts),
        Err(e) => {
            warn!("{}: {e}", job.image.display());
            PassChartExtractor::rejected(&counts, e.to_string())
        }
    };
    Ok(records_for(&identity, &extraction.events))
}

/// Run every job in parallel. Records keep manifest order.
pub fn extract_batch<L>(
    extractor: &PassChartExtractor,
    jobs: &[ChartJob],
    load: L,
) -> ExtractionReport
where
    L: Fn(&Path) -> Result<RgbImage, PassChartIoError> + Sync,
{
    let outcomes: Vec<Result<Vec<PassRecord>, PassChartIoError>> = jobs
        .par_iter()
        .map(|job| run_job(extractor, job, &load))
        .collect();

    let mut report = ExtractionReport::default();
    for (job, outcome) in jobs.iter().zip(outcomes) {
        match outcome {
            Ok(records) => report.records.extend(records),
            Err(e) => {
                warn!("{}: {e}", job.meta.display());
                report.failures.push(JobFailure {
                    meta: job.meta.clone(),
                    error: e.to_string(),
                });
            }
        }
    }
    info!(
        "{} jobs, {} records, {} failures",
        jobs.len(),
        report.records.len(),
        report.failures.len()
    );
    report
}

/// [`extract_batch`] reading images from disk.
#[cfg(feature = "image")]
pub fn extract_batch_files(extractor: &PassChartExtractor, jobs: &[ChartJob]) -> ExtractionReport {
    extract_batch(extractor, jobs, |p: &Path| crate::load::load_rgb(p))
}
