//! File-level dehazing: decode, run the pipeline, write every artifact.

use crate::error::AppError;
use crate::models::{DehazeConfig, OutputPlan};
use crate::rendering::{read_image, write_png};
use dark_channel::Dehazer;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Outcome of one successfully processed image.
#[derive(Debug, Clone)]
pub struct ProcessedImage {
    pub input: PathBuf,
    pub outputs: Vec<PathBuf>,
    pub atmosphere: [f64; 3],
}

/// Outcome of a batch run. Failures do not stop the remaining images.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub processed: Vec<ProcessedImage>,
    pub failed: Vec<(PathBuf, AppError)>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Dehazes image files with one fixed configuration.
///
/// The service holds no per-image state, so [`process_batch()`](Self::process_batch)
/// can run every input on its own rayon task.
pub struct DehazeService {
    config: DehazeConfig,
    dehazer: Dehazer,
    out_dir: PathBuf,
}

impl DehazeService {
    pub fn new(config: DehazeConfig, out_dir: impl Into<PathBuf>) -> Self {
        let dehazer = Dehazer::with_options(config.to_options());
        Self {
            config,
            dehazer,
            out_dir: out_dir.into(),
        }
    }

    pub fn config(&self) -> &DehazeConfig {
        &self.config
    }

    /// Output locations that [`process_file()`](Self::process_file) uses for `input`.
    pub fn plan_for(&self, input: &Path) -> OutputPlan {
        OutputPlan::new(input, &self.out_dir, &self.config)
    }

    /// Dehaze one image file and write its five PNG artifacts.
    ///
    /// Nothing is written unless the whole pipeline succeeds.
    pub fn process_file(&self, input: &Path) -> Result<ProcessedImage, AppError> {
        let start = Instant::now();
        tracing::info!(input = %input.display(), "Processing");

        let image = read_image(input)?;
        let result = self.dehazer.dehaze(&image)?;

        std::fs::create_dir_all(&self.out_dir)?;
        let plan = self.plan_for(input);
        let mut outputs = Vec::with_capacity(5);
        for (artifact, path) in plan.paths() {
            write_png(&path, &result.render(artifact))?;
            outputs.push(path);
        }

        let atmosphere = result.atmosphere().channels();
        tracing::info!(
            input = %input.display(),
            width = image.width(),
            height = image.height(),
            atmosphere = ?atmosphere,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Saved dehazed artifacts"
        );

        Ok(ProcessedImage {
            input: input.to_path_buf(),
            outputs,
            atmosphere,
        })
    }

    /// Dehaze many files in parallel. Results keep the input order.
    pub fn process_batch(&self, inputs: &[PathBuf]) -> BatchReport {
        let outcomes: Vec<_> = inputs
            .par_iter()
            .map(|input| (input, self.process_file(input)))
            .collect();

        let mut report = BatchReport::default();
        for (input, outcome) in outcomes {
            match outcome {
                Ok(done) => report.processed.push(done),
                Err(e) => {
                    tracing::error!(input = %input.display(), error = %e, "Failed to dehaze");
                    report.failed.push((input.clone(), e));
                }
            }
        }
        report
    }
}
