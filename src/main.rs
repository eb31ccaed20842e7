use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dehaze::models::{DehazeConfig, ParamOverrides};
use dehaze::services::DehazeService;

#[derive(Parser)]
#[command(name = "dehaze")]
#[command(about = "Single image haze removal using the dark channel prior")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Dehaze one or more images
    Run {
        /// Input image files (PNG, JPEG, BMP, TIFF, GIF, WebP)
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory
        #[arg(short, long, default_value = "results")]
        output: PathBuf,

        /// YAML parameter file (flags override its values)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Minimum transmission rate
        #[arg(short = 't', long = "tmin")]
        t_min: Option<f64>,

        /// Maximum atmosphere light per channel
        #[arg(short = 'A', long = "amax")]
        atm_max: Option<f64>,

        /// Dark channel window size
        #[arg(short, long)]
        window: Option<usize>,

        /// Fraction of pixels used to estimate the atmosphere light
        #[arg(short = 'p', long)]
        top_fraction: Option<f64>,

        /// Haze removal strength
        #[arg(long)]
        omega: Option<f64>,

        /// Guided filter radius
        #[arg(short, long)]
        radius: Option<usize>,

        /// Guided filter regularization
        #[arg(long)]
        eps: Option<f64>,

        /// Skip guided filter refinement
        #[arg(long)]
        no_guided: bool,

        /// Worker threads (defaults to one per core)
        #[arg(short, long)]
        jobs: Option<usize>,

        /// Log pipeline details
        #[arg(short, long)]
        verbose: bool,
    },
    /// Print the default parameters as YAML
    Defaults,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            inputs,
            output,
            config,
            t_min,
            atm_max,
            window,
            top_fraction,
            omega,
            radius,
            eps,
            no_guided,
            jobs,
            verbose,
        } => {
            init_logging(verbose);
            let overrides = ParamOverrides {
                t_min,
                atm_max,
                window,
                top_fraction,
                omega,
                guided: no_guided.then_some(false),
                radius,
                eps,
            };
            run_command(inputs, output, config, overrides, jobs)
        }
        Commands::Defaults => {
            let yaml = DehazeConfig::default()
                .to_yaml()
                .context("Failed to serialize defaults")?;
            print!("{}", yaml);
            Ok(())
        }
    }
}

fn init_logging(verbose: bool) {
    let fallback = if verbose {
        "dehaze=debug,dark_channel=debug"
    } else {
        "dehaze=info,dark_channel=warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| fallback.into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

fn run_command(
    inputs: Vec<PathBuf>,
    output: PathBuf,
    config_path: Option<PathBuf>,
    overrides: ParamOverrides,
    jobs: Option<usize>,
) -> anyhow::Result<()> {
    let base = match config_path {
        Some(path) => DehazeConfig::load(&path)?,
        None => DehazeConfig::default(),
    };
    let config = base.with_overrides(&overrides);
    config
        .to_options()
        .validate()
        .context("Invalid dehazing parameters")?;

    tracing::info!(
        t_min = config.t_min,
        atm_max = config.atm_max,
        window = config.window,
        top_fraction = config.top_fraction,
        omega = config.omega,
        guided = config.guided,
        radius = config.radius,
        eps = config.eps,
        "Dehazing {} image(s) into {}",
        inputs.len(),
        output.display()
    );

    let service = DehazeService::new(config, output);
    let report = match jobs {
        Some(n) => rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build()
            .context("Failed to build worker pool")?
            .install(|| service.process_batch(&inputs)),
        None => service.process_batch(&inputs),
    };

    for done in &report.processed {
        for path in &done.outputs {
            println!("{}", path.display());
        }
    }

    if !report.is_success() {
        anyhow::bail!(
            "{} of {} image(s) failed",
            report.failed.len(),
            inputs.len()
        );
    }
    Ok(())
}
