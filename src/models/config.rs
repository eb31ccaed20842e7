use crate::error::AppError;
use dark_channel::DehazeOptions;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Dehazing parameters loaded from a YAML file.
///
/// Every key is optional; missing keys take the library defaults.
///
/// ```yaml
/// t_min: 0.2
/// atm_max: 220
/// window: 15
/// top_fraction: 0.0001
/// omega: 0.95
/// guided: true
/// radius: 40
/// eps: 0.001
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DehazeConfig {
    /// Minimum transmission rate
    #[serde(default = "default_t_min")]
    pub t_min: f64,

    /// Maximum atmosphere light per channel
    #[serde(default = "default_atm_max")]
    pub atm_max: f64,

    /// Dark channel window size
    #[serde(default = "default_window")]
    pub window: usize,

    /// Fraction of pixels used to estimate the atmosphere light
    #[serde(default = "default_top_fraction")]
    pub top_fraction: f64,

    /// Haze removal strength
    #[serde(default = "default_omega")]
    pub omega: f64,

    /// Refine transmission with the guided filter
    #[serde(default = "default_guided")]
    pub guided: bool,

    /// Guided filter radius
    #[serde(default = "default_radius")]
    pub radius: usize,

    /// Guided filter regularization
    #[serde(default = "default_eps")]
    pub eps: f64,
}

fn default_t_min() -> f64 {
    DehazeOptions::default().t_min
}

fn default_atm_max() -> f64 {
    DehazeOptions::default().atm_max
}

fn default_window() -> usize {
    DehazeOptions::default().window
}

fn default_top_fraction() -> f64 {
    DehazeOptions::default().top_fraction
}

fn default_omega() -> f64 {
    DehazeOptions::default().omega
}

fn default_guided() -> bool {
    DehazeOptions::default().guided
}

fn default_radius() -> usize {
    DehazeOptions::default().radius
}

fn default_eps() -> f64 {
    DehazeOptions::default().eps
}

/// Optional per-invocation parameter overrides (command line flags).
#[derive(Debug, Default, Clone)]
pub struct ParamOverrides {
    pub t_min: Option<f64>,
    pub atm_max: Option<f64>,
    pub window: Option<usize>,
    pub top_fraction: Option<f64>,
    pub omega: Option<f64>,
    pub guided: Option<bool>,
    pub radius: Option<usize>,
    pub eps: Option<f64>,
}

impl Default for DehazeConfig {
    fn default() -> Self {
        Self::from(&DehazeOptions::default())
    }
}

impl From<&DehazeOptions> for DehazeConfig {
    fn from(options: &DehazeOptions) -> Self {
        Self {
            t_min: options.t_min,
            atm_max: options.atm_max,
            window: options.window,
            top_fraction: options.top_fraction,
            omega: options.omega,
            guided: options.guided,
            radius: options.radius,
            eps: options.eps,
        }
    }
}

impl DehazeConfig {
    /// Load configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_yaml(&content).map_err(|e| AppError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        tracing::info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Parse configuration from YAML text. An empty document yields defaults.
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    /// Render configuration as YAML.
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    /// Apply command line overrides on top of file values.
    pub fn with_overrides(mut self, overrides: &ParamOverrides) -> Self {
        if let Some(v) = overrides.t_min {
            self.t_min = v;
        }
        if let Some(v) = overrides.atm_max {
            self.atm_max = v;
        }
        if let Some(v) = overrides.window {
            self.window = v;
        }
        if let Some(v) = overrides.top_fraction {
            self.top_fraction = v;
        }
        if let Some(v) = overrides.omega {
            self.omega = v;
        }
        if let Some(v) = overrides.guided {
            self.guided = v;
        }
        if let Some(v) = overrides.radius {
            self.radius = v;
        }
        if let Some(v) = overrides.eps {
            self.eps = v;
        }
        self
    }

    /// Convert to library options. Validation happens when the pipeline runs.
    pub fn to_options(&self) -> DehazeOptions {
        DehazeOptions::new()
            .t_min(self.t_min)
            .atm_max(self.atm_max)
            .window(self.window)
            .top_fraction(self.top_fraction)
            .omega(self.omega)
            .guided(self.guided)
            .radius(self.radius)
            .eps(self.eps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_yaml_gives_defaults() {
        let config = DehazeConfig::from_yaml("").unwrap();
        assert_eq!(config, DehazeConfig::default());
        assert_eq!(config.to_options(), DehazeOptions::default());
    }

    #[test]
    fn test_partial_yaml_keeps_other_defaults() {
        let config = DehazeConfig::from_yaml("window: 7\nguided: false\n").unwrap();
        assert_eq!(config.window, 7);
        assert!(!config.guided);
        assert_eq!(config.t_min, 0.2);
        assert_eq!(config.radius, 40);
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(DehazeConfig::from_yaml("omgea: 0.9\n").is_err());
    }

    #[test]
    fn test_yaml_round_trip_of_defaults() {
        let yaml = DehazeConfig::default().to_yaml().unwrap();
        assert_eq!(
            DehazeConfig::from_yaml(&yaml).unwrap(),
            DehazeConfig::default()
        );
    }

    #[test]
    fn test_overrides_win_over_file() {
        let config = DehazeConfig::from_yaml("t_min: 0.3\nomega: 0.8\n").unwrap();
        let overrides = ParamOverrides {
            omega: Some(0.9),
            radius: Some(10),
            ..Default::default()
        };
        let merged = config.with_overrides(&overrides);
        assert_eq!(merged.t_min, 0.3);
        assert_eq!(merged.omega, 0.9);
        assert_eq!(merged.radius, 10);
    }

    #[test]
    fn test_load_reports_path_on_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dehaze.yaml");
        std::fs::write(&path, "window: [1, 2]\n").unwrap();
        match DehazeConfig::load(&path) {
            Err(AppError::Config { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected config error, got {:?}", other),
        }
    }
}
