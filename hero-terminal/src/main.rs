/// Fellowship landing page in the terminal
///
/// Controls:
///   - Drag inside the tower viewport: orbit the tower
///   - Enter / click the button: open the application page
///   - Arrow keys / PgUp / PgDn / mouse wheel: scroll
///   - Q/ESC: Quit
use anyhow::Context;
use clap::Parser;
use env_logger::{Env, Target};
use hero_terminal::{HeroConfig, TerminalApp};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "hero-terminal", version, about = "Fellowship landing page in the terminal")]
struct Cli {
    /// Path to the RON config file
    #[arg(short, long, default_value = "hero.ron")]
    config: PathBuf,

    /// Keep the wordmark glyph still
    #[arg(long)]
    reduced_motion: bool,

    /// Frames per second, overriding the config
    #[arg(long)]
    fps: Option<u32>,
}

fn init_logging(config: &HeroConfig) -> anyhow::Result<()> {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("warn"));
    // Stderr would draw over the alternate screen
    if let Some(path) = &config.log_file {
        let file = File::create(path)
            .with_context(|| format!("creating log file {}", path.display()))?;
        builder.target(Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (mut config, load_error) = match HeroConfig::load(&cli.config) {
        Ok(config) => (config, None),
        Err(e) => (HeroConfig::default(), Some(e)),
    };
    if let Some(fps) = cli.fps {
        config.target_fps = fps;
    }

    init_logging(&config)?;
    if let Some(e) = load_error {
        log::warn!("{e}; using default settings");
    }

    let motion = config.motion_preference(cli.reduced_motion);
    log::info!("starting with {config:?}, reduced motion: {}", motion.reduced);

    let size = crossterm::terminal::size().context("reading the terminal size")?;
    let mut app = TerminalApp::new(config, motion, size)?;
    let result = app.run();
    app.unmount();
    result
}
