use anyhow::Context;
use clap::Parser;
use shunt_tac::utils::init_from_config;
use shunt_tac::{render_svg, Config, CurveGenerator, ShuntAnalyzer};
use std::path::PathBuf;
use tracing::info;

/// Generate synthetic liver/heart time activity curves and compute the shunt index
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Prescribed shunt shift added to the liver lag for the heart curve
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pss: i64,

    /// Random seed (a fresh one is drawn and reported when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// TOML config file (falls back to $SHUNT_TAC_CONFIG, then defaults)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Where to write the TAC plot
    #[arg(long, default_value = "tac.svg")]
    plot: PathBuf,

    /// Skip rendering the plot
    #[arg(long)]
    no_plot: bool,

    /// Print the report as JSON instead of the text line
    #[arg(long)]
    json: bool,

    /// Also write the JSON report to this file
    #[arg(long)]
    report: Option<PathBuf>,

    /// Print a boxed summary after the result line
    #[arg(long)]
    summary: bool,

    /// Override the configured log level
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Config::load().context("Failed to load config")?,
    };
    if let Some(level) = &args.log_level {
        config.logging.level = level.clone();
    }
    init_from_config(&config.logging).context("Failed to initialize logging")?;

    let seed = args.seed.unwrap_or_else(rand::random);
    info!(pss = args.pss, seed, "Generating time activity curves");

    // Generate
    let generator = CurveGenerator::new(config.generator.clone());
    let dataset = generator
        .generate_seeded(args.pss, seed)
        .context("Curve generation failed")?;
    info!(lag = dataset.lag(), lag_heart = dataset.lag_heart(), "Curves ready");

    // Analyze
    let analyzer = ShuntAnalyzer::new(config.analysis.clone());
    let report = analyzer
        .analyze(&dataset)
        .context("Shunt analysis failed")?
        .with_seed(seed);

    // Render
    if !args.no_plot {
        let series = analyzer
            .plot_series(&dataset, &config.plot)
            .context("Failed to build plot series")?;
        render_svg(&series, &config.plot, &args.plot)
            .with_context(|| format!("Failed to render {}", args.plot.display()))?;
    }

    // Report
    let json = report.to_json()?;
    if let Some(path) = &args.report {
        std::fs::write(path, &json)
            .with_context(|| format!("Failed to write report {}", path.display()))?;
        info!(path = %path.display(), "Wrote shunt report");
    }

    if args.json {
        println!("{}", json);
    } else {
        println!("{}", report.message());
        if args.summary {
            report.print_summary();
        }
    }

    Ok(())
}
