pub mod config;
pub mod logger;

pub use config::{AnalysisConfig, Config, GeneratorConfig, LoggingConfig, PlotConfig, WindowAnchor};
pub use logger::{init_logger, init_from_config};
