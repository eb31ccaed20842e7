use super::DehazeConfig;
use dark_channel::Artifact;
use std::path::{Path, PathBuf};

/// Output file locations for one input image.
///
/// Artifacts share a base name that records the input stem and the key
/// parameters, so runs with different settings never overwrite each other:
///
/// ```text
/// <out>/<stem>_result_<t_min * 100>e-2_<atm_max>_<window>_<radius>_<artifact>.png
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPlan {
    base: PathBuf,
}

impl OutputPlan {
    /// Plan outputs for `input` inside `out_dir`.
    pub fn new(input: &Path, out_dir: &Path, config: &DehazeConfig) -> Self {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());

        let name = format!(
            "{}_result_{}e-2_{}_{}_{}",
            stem,
            (config.t_min * 100.0).round() as i64,
            config.atm_max.round() as i64,
            config.window,
            config.radius
        );

        Self {
            base: out_dir.join(name),
        }
    }

    /// Path of the file holding `artifact`.
    pub fn path_for(&self, artifact: Artifact) -> PathBuf {
        let mut name = self.base.as_os_str().to_owned();
        name.push(format!("_{}.png", artifact.name()));
        PathBuf::from(name)
    }

    /// All artifact paths in pipeline order.
    pub fn paths(&self) -> Vec<(Artifact, PathBuf)> {
        Artifact::ALL
            .iter()
            .map(|&artifact| (artifact, self.path_for(artifact)))
            .collect()
    }
}
