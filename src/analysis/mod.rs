pub mod series;
pub mod shunt;

pub use series::{CurveSeries, PlotSeries};
pub use shunt::{ShuntAnalyzer, ShuntReport, shunt_index, window_sum};
