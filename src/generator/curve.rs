use crate::data::TacDataset;
use crate::error::{TacError, TacResult};
use crate::generator::noise::{apply_jitter, background};
use crate::utils::config::GeneratorConfig;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Synthetic time-activity curve generator
///
/// Builds a liver and a heart count curve on a shared time axis, each
/// preceded by a random-length background baseline.
///
/// Algorithm:
/// 1. Time index t = 1..=samples
/// 2. Liver base = cumsum(t) * liver_scale (quadratic growth)
/// 3. Heart base = cumsum(t * heart_scale); the factor goes in before the
///    sum, which keeps heart counts far below liver counts
/// 4. Integer-percent jitter per sample (liver, then heart)
/// 5. Draw lag, heart lag = lag + PSS (PSS above `max_pss` is refused
///    before any draw)
/// 6. Background prefixes of lag-1 (liver) and lag_heart-1 (heart) samples
/// 7. Time axis = 1..lag-1 followed by t shifted by lag-1
pub struct CurveGenerator {
    config: GeneratorConfig,
}

impl CurveGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate one dataset for the given prescribed shunt shift
    ///
    /// Random draws are taken in a fixed order (liver noise, heart noise,
    /// lag, liver background, heart background) so a seeded `rng` always
    /// yields the same dataset.
    pub fn generate<R: Rng + ?Sized>(&self, pss: i64, rng: &mut R) -> TacResult<TacDataset> {
        let cfg = &self.config;
        cfg.validate()?;
        if pss > cfg.max_pss {
            return Err(TacError::invalid(format!(
                "PSS {} exceeds the configured maximum {}",
                pss, cfg.max_pss
            )));
        }

        // 1-3. Noise-free curves
        let liver_base = liver_base(cfg.samples, cfg.liver_scale);
        let heart_base = heart_base(cfg.samples, cfg.heart_scale);

        // 4. Jitter
        let liver_signal = apply_jitter(&liver_base, cfg.liver_noise_pct, rng);
        let heart_signal = apply_jitter(&heart_base, cfg.heart_noise_pct, rng);

        // 5. Onsets
        let lag = rng.gen_range(cfg.lag_min..=cfg.lag_max);
        let lag_heart = lag.checked_add(pss).ok_or_else(|| {
            TacError::invalid(format!("PSS {} overflows the heart lag (lag {})", pss, lag))
        })?;
        if lag_heart < 1 {
            return Err(TacError::invalid(format!(
                "PSS {} gives heart lag {} (lag {}), must be at least 1",
                pss, lag_heart, lag
            )));
        }
        debug!(lag, lag_heart, pss, "Drew curve onsets");

        // 6. Baselines
        let liver_prefix = background((lag - 1) as usize, cfg.background_min, cfg.background_max, rng);
        let heart_prefix = background(
            (lag_heart - 1) as usize,
            cfg.background_min,
            cfg.background_max,
            rng,
        );

        let liver: Vec<f64> = liver_prefix.into_iter().chain(liver_signal).collect();
        let heart: Vec<f64> = heart_prefix.into_iter().chain(heart_signal).collect();

        // 7. Extended time axis
        let time_axis = extended_time_axis(cfg.samples, lag);

        debug!(
            liver_len = liver.len(),
            heart_len = heart.len(),
            "Generated time activity curves"
        );

        TacDataset::from_parts(time_axis, liver, heart, lag, pss)
    }

    /// Generate with a `StdRng` seeded from `seed`
    pub fn generate_seeded(&self, pss: i64, seed: u64) -> TacResult<TacDataset> {
        let mut rng = StdRng::seed_from_u64(seed);
        self.generate(pss, &mut rng)
    }
}

impl Default for CurveGenerator {
    fn default() -> Self {
        Self::new(GeneratorConfig::default())
    }
}

/// cumsum(1..=samples), scaled after summation
pub fn liver_base(samples: usize, scale: f64) -> Vec<f64> {
    (1..=samples as u64)
        .scan(0u64, |acc, t| {
            *acc += t;
            Some(*acc)
        })
        .map(|sum| sum as f64 * scale)
        .collect()
}

/// cumsum(t * scale) for t in 1..=samples, no factor after summation
pub fn heart_base(samples: usize, scale: f64) -> Vec<f64> {
    (1..=samples)
        .map(|t| t as f64 * scale)
        .scan(0.0f64, |acc, x| {
            *acc += x;
            Some(*acc)
        })
        .collect()
}

/// Baseline seconds 1..lag-1 followed by the signal seconds shifted by lag-1
pub fn extended_time_axis(samples: usize, lag: i64) -> Vec<i64> {
    let baseline = 1..lag;
    let signal = (1..=samples as i64).map(|t| t + lag - 1);
    baseline.chain(signal).collect()
}
