use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use env_logger::Env;
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use molecule_box::{App, AppConfig, build_scene, gui};

/// Molecules bouncing in a box whose walls can be heated and cooled.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// YAML configuration file; built-in defaults when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for the initial scene, overrides `simulation.seed`
    #[arg(long)]
    seed: Option<u64>,

    /// Run without a window and log statistics instead
    #[arg(long)]
    headless: bool,

    /// Frames to simulate in headless mode
    #[arg(long, default_value_t = 10_000)]
    frames: u64,

    /// Headless summary interval in frames
    #[arg(long, default_value_t = 1_000)]
    log_every: u64,
}

// load here to keep main clean
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = match &args.config {
        Some(path) => AppConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => AppConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.simulation.seed = Some(seed);
    }
    Ok(config)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    let config = load_config(&args)?;

    let seed = config.simulation.seed.unwrap_or_else(|| rand::rng().random());
    info!("scene seed {seed}");
    let mut rng = StdRng::seed_from_u64(seed);

    let scene = build_scene(&config, &mut rng).context("failed to build scene")?;
    let mut app = App::new(scene, &config)?;

    if args.headless {
        app.run_headless(args.frames, args.log_every);
        return Ok(());
    }

    gui::run(&config, app).map_err(|e| anyhow!("window error: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_flag_overrides_config_file() {
        let args = Args::parse_from(["molecule_box", "--config", "scenarios/crowded.yaml", "--seed", "5"]);
        let config = load_config(&args).unwrap();
        assert_eq!(config.simulation.seed, Some(5));
        assert_eq!(config.simulation.circles, 80);
    }

    #[test]
    fn config_seed_is_kept_without_flag() {
        let args = Args::parse_from(["molecule_box", "--config", "scenarios/crowded.yaml"]);
        assert_eq!(load_config(&args).unwrap().simulation.seed, Some(42));

        let args = Args::parse_from(["molecule_box"]);
        assert_eq!(load_config(&args).unwrap().simulation.seed, None);
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let args = Args::parse_from(["molecule_box", "--config", "scenarios/does_not_exist.yaml"]);
        assert!(load_config(&args).is_err());
    }
}
