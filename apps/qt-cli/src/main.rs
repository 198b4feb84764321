use anyhow::{Context, Result};
use clap::Parser;
use qt_factory::{
    classifier::LinkClassifier,
    config::{self, Config},
    menu,
    runner::{self, ToolLocator},
};
use std::{
    fs::{self, OpenOptions},
    path::{Path, PathBuf},
    process::ExitCode,
    sync::Mutex,
};
use tracing::{info, warn, Level};

#[derive(Parser)]
#[command(name = "quicktube")]
#[command(version)]
#[command(about = "Stream or download YouTube and SVT Play links through yt-dlp, svtplay-dl and mpv")]
struct Cli {
    /// Config file (default: <config dir>/quicktube/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Where downloaded tools live
    #[arg(long)]
    bin_dir: Option<PathBuf>,

    /// trace, debug, info, warn or error
    #[arg(long)]
    log_level: Option<String>,

    /// Start even if mpv or ffmpeg is missing
    #[arg(long, default_value_t = false)]
    skip_dependency_check: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = match config::load_config(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("⚠️  {:#}. Using defaults.", e);
            Config::default()
        }
    };
    if let Some(dir) = cli.bin_dir {
        config.bin_dir = Some(dir);
    }
    if let Some(level) = cli.log_level {
        config.log_level = Some(level);
    }

    init_logging(&config.log_file(), config.log_level());
    info!("QuickTube {} starting", env!("CARGO_PKG_VERSION"));

    match run(&config, cli.skip_dependency_check) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{:#}", e);
            eprintln!("❌ {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config, skip_dependency_check: bool) -> Result<ExitCode> {
    let classifier =
        LinkClassifier::new(&config.patterns).context("Invalid link pattern in config")?;
    let locator = ToolLocator::new(config.bin_dir());

    let missing = runner::check_dependencies(&locator);
    for tool in &missing {
        warn!("{} not found", tool);
        if tool.is_installable() {
            eprintln!("⚠️  {} not found. Use 'Update tools' to download it.", tool);
        } else {
            eprintln!("⚠️  {} not found.", tool);
        }
    }
    if !skip_dependency_check && missing.iter().any(|t| runner::is_critical(*t)) {
        eprintln!("❌ mpv and ffmpeg are required. Install them with your package manager:");
        eprintln!("   Debian/Ubuntu: sudo apt install mpv ffmpeg");
        eprintln!("   macOS:         brew install mpv ffmpeg");
        eprintln!("   Windows:       winget install mpv ffmpeg");
        eprintln!("   (or start with --skip-dependency-check)");
        return Ok(ExitCode::from(2));
    }

    if let Err(e) = runner::install_interrupt_guard() {
        warn!("Could not install Ctrl+C handler: {}", e);
    }

    menu::run_menu(classifier, locator, config.cookie_browser)?;
    Ok(ExitCode::SUCCESS)
}

/// Log lines go to a file; the terminal belongs to the menu and the tools.
fn init_logging(path: &Path, level: &str) {
    let level = level.parse::<Level>().unwrap_or(Level::INFO);
    let builder = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(false)
        .with_target(false);

    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    match OpenOptions::new().create(true).append(true).open(path) {
        Ok(file) => builder.with_writer(Mutex::new(file)).init(),
        Err(e) => {
            eprintln!("⚠️  Cannot open log file {:?}: {}", path, e);
            builder.with_writer(std::io::sink).init();
        }
    }
}
