use crate::analysis::series::PlotSeries;
use crate::data::{Region, TacDataset};
use crate::error::{TacError, TacResult};
use crate::utils::config::{AnalysisConfig, PlotConfig, WindowAnchor};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Shunt index analyzer
///
/// Sums a fixed window of counts over each region right after onset and
/// reports the heart share of the total:
///
/// shunt_index = heart / (heart + liver) * 100, rounded to 0.1
///
/// With the default `LiverOnset` anchor both windows start at the liver
/// lag, even though the heart curve begins at `lag + pss`.
pub struct ShuntAnalyzer {
    config: AnalysisConfig,
}

impl ShuntAnalyzer {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Compute the shunt index for one dataset
    ///
    /// Never modifies the dataset; repeated calls give the same report.
    pub fn analyze(&self, dataset: &TacDataset) -> TacResult<ShuntReport> {
        let window_len = self.config.window_len;

        // 1. Window starts (indices into each curve)
        let liver_start = dataset.lag() as usize;
        let heart_start = match self.config.anchor {
            WindowAnchor::LiverOnset => dataset.lag() as usize,
            WindowAnchor::HeartOnset => dataset.lag_heart() as usize,
        };

        // 2. Region sums
        let liver_counts = window_sum(dataset, Region::Liver, liver_start, window_len)?;
        let heart_counts = window_sum(dataset, Region::Heart, heart_start, window_len)?;
        debug!(liver_counts, heart_counts, liver_start, heart_start, window_len, "Summed shunt windows");

        // 3. Ratio
        let shunt_index = shunt_index(liver_counts, heart_counts)?;

        Ok(ShuntReport {
            seed: None,
            pss: dataset.pss(),
            lag: dataset.lag(),
            lag_heart: dataset.lag_heart(),
            liver_window_start: liver_start,
            heart_window_start: heart_start,
            window_len,
            liver_counts,
            heart_counts,
            shunt_index,
            liver_len: dataset.liver().len(),
            heart_len: dataset.heart().len(),
        })
    }

    /// Series for the TAC chart: the first `plot_points` samples of each curve
    pub fn plot_series(&self, dataset: &TacDataset, labels: &PlotConfig) -> TacResult<PlotSeries> {
        PlotSeries::from_dataset(dataset, self.config.plot_points, labels)
    }
}

impl Default for ShuntAnalyzer {
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
    }
}

/// Sum `len` samples of a region's counts starting at index `start`
pub fn window_sum(dataset: &TacDataset, region: Region, start: usize, len: usize) -> TacResult<f64> {
    let counts = dataset.counts(region);
    let end = start + len;
    if end > counts.len() {
        return Err(TacError::invalid(format!(
            "{} window [{}, {}) exceeds curve length {}",
            region.label(),
            start,
            end,
            counts.len()
        )));
    }
    Ok(counts[start..end].iter().sum())
}

/// Heart share of the total in percent, rounded to one decimal
pub fn shunt_index(liver_counts: f64, heart_counts: f64) -> TacResult<f64> {
    let total = heart_counts + liver_counts;
    if total == 0.0 {
        return Err(TacError::DegenerateShunt { liver_counts, heart_counts });
    }
    let pct = heart_counts / total * 100.0;
    // Formatting rounds the exact binary value, half to even
    format!("{:.1}", pct)
        .parse::<f64>()
        .map_err(|e| TacError::invalid(format!("shunt index {} not representable: {}", pct, e)))
}

/// Result of one analysis pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShuntReport {
    /// Seed the dataset was generated from, when known
    pub seed: Option<u64>,
    pub pss: i64,
    pub lag: i64,
    pub lag_heart: i64,
    pub liver_window_start: usize,
    pub heart_window_start: usize,
    pub window_len: usize,
    pub liver_counts: f64,
    pub heart_counts: f64,
    /// Percent, one decimal
    pub shunt_index: f64,
    pub liver_len: usize,
    pub heart_len: usize,
}

impl ShuntReport {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// The one-line result
    pub fn message(&self) -> String {
        format!("Shunt index calculated from this curve is {:.1} %.", self.shunt_index)
    }

    pub fn to_json(&self) -> TacResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Print results summary
    pub fn print_summary(&self) {
        let seed = self.seed.map(|s| s.to_string()).unwrap_or_else(|| "-".to_string());
        println!("\n╔════════════════════════════════════════════════╗");
        println!("║         SHUNT INDEX SUMMARY                    ║");
        println!("╠════════════════════════════════════════════════╣");
        println!("║ Seed: {:<41} ║", seed);
        println!("║ PSS: {:<42} ║", self.pss);
        println!("║ Lag (liver): {:<34} ║", self.lag);
        println!("║ Lag (heart): {:<34} ║", self.lag_heart);
        println!("╠════════════════════════════════════════════════╣");
        println!("║ Liver window: [{:>3}, {:>3}){:<28} ║", self.liver_window_start, self.liver_window_start + self.window_len, "");
        println!("║ Heart window: [{:>3}, {:>3}){:<28} ║", self.heart_window_start, self.heart_window_start + self.window_len, "");
        println!("║ Liver counts: {:<33.1} ║", self.liver_counts);
        println!("║ Heart counts: {:<33.1} ║", self.heart_counts);
        println!("╠════════════════════════════════════════════════╣");
        println!("║ Shunt index: {:<33.1}% ║", self.shunt_index);
        println!("╚════════════════════════════════════════════════╝\n");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::CurveGenerator;
    use crate::utils::config::GeneratorConfig;
    use proptest::prelude::*;

    fn flat_dataset(liver_value: f64, heart_value: f64, lag: i64, pss: i64) -> TacDataset {
        let len = (lag - 1 + 60) as usize;
        let heart_len = (lag + pss - 1 + 60) as usize;
        let axis: Vec<i64> = (1..=len as i64).collect();
        TacDataset::from_parts(axis, vec![liver_value; len], vec![heart_value; heart_len], lag, pss).unwrap()
    }

    #[test]
    fn test_equal_regions_give_fifty_percent() {
        let report = ShuntAnalyzer::default().analyze(&flat_dataset(10.0, 10.0, 20, 5)).unwrap();

        assert_eq!(report.liver_counts, 140.0);
        assert_eq!(report.heart_counts, 140.0);
        assert_eq!(report.shunt_index, 50.0);
        assert_eq!(report.message(), "Shunt index calculated from this curve is 50.0 %.");
    }

    #[test]
    fn test_window_is_anchored_on_liver_lag() {
        // Liver: ones everywhere. Heart: index i holds i, so the sum
        // identifies exactly which indices were read.
        let lag = 20;
        let pss = 5;
        let len = (lag - 1 + 60) as usize;
        let heart: Vec<f64> = (0..(lag + pss - 1 + 60) as usize).map(|i| i as f64).collect();
        let ds = TacDataset::from_parts((1..=len as i64).collect(), vec![1.0; len], heart, lag, pss).unwrap();

        let report = ShuntAnalyzer::default().analyze(&ds).unwrap();
        assert_eq!(report.heart_window_start, 20);
        assert_eq!(report.liver_window_start, 20);
        // 20 + 21 + ... + 33
        assert_eq!(report.heart_counts, (20..34).sum::<i32>() as f64);
        assert_eq!(report.liver_counts, 14.0);
    }

    #[test]
    fn test_heart_onset_anchor() {
        let lag = 20;
        let pss = 5;
        let len = (lag - 1 + 60) as usize;
        let heart: Vec<f64> = (0..(lag + pss - 1 + 60) as usize).map(|i| i as f64).collect();
        let ds = TacDataset::from_parts((1..=len as i64).collect(), vec![1.0; len], heart, lag, pss).unwrap();

        let analyzer = ShuntAnalyzer::new(AnalysisConfig {
            anchor: WindowAnchor::HeartOnset,
            ..AnalysisConfig::default()
        });
        let report = analyzer.analyze(&ds).unwrap();
        assert_eq!(report.heart_window_start, 25);
        assert_eq!(report.heart_counts, (25..39).sum::<i32>() as f64);
    }

    #[test]
    fn test_zero_counts_is_degenerate() {
        let err = ShuntAnalyzer::default().analyze(&flat_dataset(0.0, 0.0, 20, 0)).unwrap_err();
        assert!(matches!(err, TacError::DegenerateShunt { .. }));
    }

    #[test]
    fn test_window_past_end_is_invalid() {
        let analyzer = ShuntAnalyzer::new(AnalysisConfig {
            window_len: 100,
            ..AnalysisConfig::default()
        });
        let err = analyzer.analyze(&flat_dataset(1.0, 1.0, 20, 0)).unwrap_err();
        assert!(matches!(err, TacError::InvalidParameter(_)));
    }

    #[test]
    fn test_rounding_to_one_decimal() {
        // 1 / 3 -> 33.333.. -> 33.3
        assert_eq!(shunt_index(2.0, 1.0).unwrap(), 33.3);
        // 2 / 3 -> 66.666.. -> 66.7
        assert_eq!(shunt_index(1.0, 2.0).unwrap(), 66.7);
        assert_eq!(shunt_index(1.0, 0.0).unwrap(), 0.0);
        // 0.35 / 100 * 100 lands just below 0.35 and must round down
        assert_eq!(shunt_index(99.65, 0.35).unwrap(), 0.3);
        assert_eq!(shunt_index(0.0, 1.0).unwrap(), 100.0);
    }

    #[test]
    fn test_analyze_is_idempotent() {
        let ds = CurveGenerator::default().generate_seeded(3, 77).unwrap();
        let analyzer = ShuntAnalyzer::default();

        let first = analyzer.analyze(&ds).unwrap();
        let second = analyzer.analyze(&ds).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_reference_scenario_window() {
        let generator = CurveGenerator::new(GeneratorConfig {
            lag_min: 20,
            lag_max: 20,
            ..GeneratorConfig::default()
        });
        let ds = generator.generate_seeded(5, 8).unwrap();
        let report = ShuntAnalyzer::default().analyze(&ds).unwrap().with_seed(8);

        assert_eq!(report.seed, Some(8));
        assert_eq!(report.liver_len, 79);
        assert_eq!(report.heart_len, 84);
        assert_eq!(report.liver_window_start, 20);
        assert_eq!(report.window_len, 14);
        assert_eq!(report.liver_counts, ds.liver()[20..34].iter().sum::<f64>());
        assert_eq!(report.heart_counts, ds.heart()[20..34].iter().sum::<f64>());
        assert!((0.0..=100.0).contains(&report.shunt_index));
    }

    #[test]
    fn test_report_json() {
        let report = ShuntAnalyzer::default()
            .analyze(&flat_dataset(3.0, 1.0, 15, 0))
            .unwrap()
            .with_seed(1);
        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

        assert_eq!(json["shunt_index"], 25.0);
        assert_eq!(json["seed"], 1);
        assert_eq!(json["lag"], 15);
    }

    #[test]
    fn test_plot_series_from_generated() {
        let ds = CurveGenerator::default().generate_seeded(-14, 2).unwrap();
        let series = ShuntAnalyzer::default().plot_series(&ds, &PlotConfig::default()).unwrap();

        assert_eq!(series.curves.len(), 2);
        assert!(series.curves.iter().all(|c| c.points.len() == 60));
    }

    proptest! {
        #[test]
        fn prop_index_in_percent_range(seed in any::<u64>(), pss in -14i64..40) {
            let ds = CurveGenerator::default().generate_seeded(pss, seed).unwrap();
            let report = ShuntAnalyzer::default().analyze(&ds).unwrap();
            prop_assert!(report.shunt_index >= 0.0 && report.shunt_index <= 100.0);
        }
    }
}
