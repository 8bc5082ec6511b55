use serde::{Deserialize, Serialize};
use crate::error::{TacError, TacResult};
use std::path::Path;

/// Environment variable naming an optional TOML config file
pub const CONFIG_ENV: &str = "SHUNT_TAC_CONFIG";

/// Main configuration structure
///
/// Every section defaults to the reference recipe, so an empty file
/// (or no file at all) reproduces the stock simulation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub generator: GeneratorConfig,
    pub analysis: AnalysisConfig,
    pub plot: PlotConfig,
    pub logging: LoggingConfig,
}

/// Constants of the synthetic curve recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Number of signal samples per curve (seconds of observation)
    pub samples: usize,
    /// Liver factor, applied after the cumulative sum
    pub liver_scale: f64,
    /// Heart factor, applied to the time index before the cumulative sum
    pub heart_scale: f64,
    /// Liver jitter bound in percent, drawn from [-n, n]
    pub liver_noise_pct: i32,
    /// Heart jitter bound in percent, drawn from [-n, n]
    pub heart_noise_pct: i32,
    pub lag_min: i64,
    pub lag_max: i64,
    pub background_min: i64,
    pub background_max: i64,
    /// Largest accepted PSS; bounds the heart background length
    pub max_pss: i64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            samples: 60,
            liver_scale: 200.0,
            heart_scale: 0.9,
            liver_noise_pct: 5,
            heart_noise_pct: 10,
            lag_min: 15,
            lag_max: 25,
            background_min: 1,
            background_max: 20,
            max_pss: 120,
        }
    }
}

impl GeneratorConfig {
    /// Reject ranges the generator cannot draw from
    pub fn validate(&self) -> TacResult<()> {
        if self.samples == 0 {
            return Err(TacError::invalid("generator.samples must be at least 1"));
        }
        if self.lag_min < 1 {
            return Err(TacError::invalid(format!(
                "generator.lag_min {} must be at least 1",
                self.lag_min
            )));
        }
        if self.lag_min > self.lag_max {
            return Err(TacError::invalid(format!(
                "generator.lag_min {} exceeds lag_max {}",
                self.lag_min, self.lag_max
            )));
        }
        if self.background_min > self.background_max {
            return Err(TacError::invalid(format!(
                "generator.background_min {} exceeds background_max {}",
                self.background_min, self.background_max
            )));
        }
        if self.max_pss < 0 {
            return Err(TacError::invalid(format!(
                "generator.max_pss {} must be non-negative",
                self.max_pss
            )));
        }
        if self.liver_noise_pct < 0 || self.heart_noise_pct < 0 {
            return Err(TacError::invalid("noise bounds must be non-negative"));
        }
        if !self.liver_scale.is_finite() || !self.heart_scale.is_finite() {
            return Err(TacError::invalid("curve scales must be finite"));
        }
        Ok(())
    }
}

/// Which onset the heart summation window starts at
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowAnchor {
    /// Both windows start at the liver lag
    #[default]
    LiverOnset,
    /// Heart window starts at lag + PSS
    HeartOnset,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Samples summed per region
    pub window_len: usize,
    pub anchor: WindowAnchor,
    /// Leading points of each curve handed to the plot
    pub plot_points: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            window_len: 14,
            anchor: WindowAnchor::LiverOnset,
            plot_points: 60,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub width: u32,
    pub height: u32,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            title: "Time activity curve (cat)".to_string(),
            x_label: "Time (seconds)".to_string(),
            y_label: "Counts".to_string(),
            width: 1024,
            height: 640,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// "pretty" or "json"
    pub output: String,
    /// Append logs here instead of stderr when non-empty
    pub file_path: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            output: "pretty".to_string(),
            file_path: String::new(),
        }
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> TacResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml(contents: &str) -> TacResult<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from the file named by `SHUNT_TAC_CONFIG`, or the defaults
    pub fn load() -> TacResult<Self> {
        match std::env::var(CONFIG_ENV) {
            Ok(path) if !path.is_empty() => Self::from_file(path),
            _ => Ok(Self::default()),
        }
    }

    /// Reject settings the generator or analyzer cannot honor
    pub fn validate(&self) -> TacResult<()> {
        self.generator.validate()?;

        let a = &self.analysis;
        if a.window_len == 0 {
            return Err(TacError::invalid("analysis.window_len must be at least 1"));
        }
        if self.plot.width == 0 || self.plot.height == 0 {
            return Err(TacError::invalid("plot dimensions must be non-zero"));
        }
        Ok(())
    }
}
