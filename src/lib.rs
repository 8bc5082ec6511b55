pub mod data;
pub mod error;
pub mod generator;
pub mod analysis;
pub mod render;
pub mod utils;

// Re-export commonly used types
pub use data::{Region, TacDataset};
pub use error::{TacError, TacResult};
pub use generator::CurveGenerator;
pub use analysis::{PlotSeries, ShuntAnalyzer, ShuntReport};
pub use render::render_svg;
pub use utils::{Config, WindowAnchor};
