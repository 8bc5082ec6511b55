use crate::error::{TacError, TacResult};
use serde::{Deserialize, Serialize};

/// Region of interest a count curve was observed over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    Liver,
    Heart,
}

impl Region {
    /// Legend label used on the TAC plot
    pub fn label(self) -> &'static str {
        match self {
            Region::Liver => "Liver",
            Region::Heart => "Heart",
        }
    }
}

/// One generation run: shared time axis, both count curves and their lags
///
/// Written once by the generator and only read afterwards. The two curves
/// can differ in length because the heart background prefix is
/// `lag + pss - 1` samples long while the liver prefix is `lag - 1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TacDataset {
    time_axis: Vec<i64>,
    liver: Vec<f64>,
    heart: Vec<f64>,
    lag: i64,
    lag_heart: i64,
    pss: i64,
}

impl TacDataset {
    /// Assemble a dataset from already generated parts
    ///
    /// Checks the invariants the analyzer relies on: lag and heart lag are
    /// at least 1, the time axis is strictly increasing and matches the
    /// liver curve in length.
    pub fn from_parts(
        time_axis: Vec<i64>,
        liver: Vec<f64>,
        heart: Vec<f64>,
        lag: i64,
        pss: i64,
    ) -> TacResult<Self> {
        if lag < 1 {
            return Err(TacError::invalid(format!("lag {} must be at least 1", lag)));
        }
        let lag_heart = lag.checked_add(pss).ok_or_else(|| {
            TacError::invalid(format!("PSS {} overflows the heart lag (lag {})", pss, lag))
        })?;
        if lag_heart < 1 {
            return Err(TacError::invalid(format!(
                "PSS {} gives heart lag {} (lag {}), must be at least 1",
                pss, lag_heart, lag
            )));
        }
        if time_axis.len() != liver.len() {
            return Err(TacError::invalid(format!(
                "time axis has {} points but liver curve has {}",
                time_axis.len(),
                liver.len()
            )));
        }
        if time_axis.windows(2).any(|w| w[0] >= w[1]) {
            return Err(TacError::invalid("time axis must be strictly increasing"));
        }

        Ok(Self { time_axis, liver, heart, lag, lag_heart, pss })
    }

    pub fn time_axis(&self) -> &[i64] {
        &self.time_axis
    }

    pub fn liver(&self) -> &[f64] {
        &self.liver
    }

    pub fn heart(&self) -> &[f64] {
        &self.heart
    }

    /// Counts for one region
    pub fn counts(&self, region: Region) -> &[f64] {
        match region {
            Region::Liver => &self.liver,
            Region::Heart => &self.heart,
        }
    }

    /// Liver onset lag in seconds
    pub fn lag(&self) -> i64 {
        self.lag
    }

    /// Heart onset lag, `lag + pss`
    pub fn lag_heart(&self) -> i64 {
        self.lag_heart
    }

    pub fn pss(&self) -> i64 {
        self.pss
    }
}
