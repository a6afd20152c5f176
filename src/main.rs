mod app;
mod config;
mod contact;
mod driver;
mod keys;
mod logging;
mod page;
mod particles;
mod preference;
mod tween;
mod typewriter;
mod ui;
mod visibility;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::io;
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

use app::App;
use config::{
    generate_config_file, get_log_path, get_preferences_path, load_config, load_config_from_path,
};
use contact::SimulatedOutbox;
use particles::ParticleField;
use preference::{FileStore, MemoryStore, PreferenceStore, ThemeController};

/// Rows moved per mouse wheel notch.
const WHEEL_ROWS: i64 = 3;

// ============================================================================
// MAIN
// ============================================================================

#[derive(Parser)]
#[command(name = "folio")]
#[command(author = "Shubham Yadav")]
#[command(version)]
#[command(about = "A personal portfolio that lives in your terminal", long_about = None)]
struct Cli {
    /// Generate default configuration file
    #[arg(short, long)]
    init: bool,

    /// Specify custom config file path
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Where the theme preference is stored
    #[arg(short, long, value_name = "PATH")]
    preferences: Option<PathBuf>,

    /// Write logs here instead of the data directory
    #[arg(short, long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Turn off the particle backdrop
    #[arg(long)]
    no_particles: bool,

    /// Frames per second
    #[arg(long, value_name = "N")]
    fps: Option<u16>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Handle --init flag
    if cli.init {
        let config_path = generate_config_file()?;
        println!(
            "Default configuration file created at: {}",
            config_path.display()
        );
        println!("Edit this file to customize folio's content and appearance.");
        return Ok(());
    }

    if let Some(log_path) = cli.log_file.clone().or_else(get_log_path) {
        if let Err(e) = logging::init_tracing(&log_path) {
            eprintln!("Warning: logging disabled: {e:#}");
        }
    }

    // Load configuration
    let mut config = if let Some(config_path) = &cli.config {
        load_config_from_path(config_path)?
    } else {
        load_config()
    };
    if let Some(fps) = cli.fps {
        config.animation.fps = fps;
    }
    if cli.no_particles {
        config.particles.enabled = false;
    }

    let preferences = match cli.preferences.clone().or_else(get_preferences_path) {
        Some(path) => PreferenceStore::new(FileStore::new(path)),
        None => PreferenceStore::new(MemoryStore::unavailable()),
    };
    let theme = ThemeController::load(preferences);
    let particles = config
        .particles
        .enabled
        .then(|| ParticleField::new(&config.particles));

    // Setup terminal
    logging::install_panic_hook();
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    // Run the app
    info!("starting");
    let mut app = App::new(config, theme, particles, SimulatedOutbox);
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    if let Err(err) = res {
        tracing::error!("{err:#}");
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    let clock = Instant::now();
    let frame = app.config.animation.frame_interval();

    let size = terminal.size().context("Failed to read terminal size")?;
    app.resize(size.width, size.height);

    loop {
        app.on_frame(clock.elapsed());
        terminal.draw(|f| ui::ui(f, app))?;
        app.update_visibility();

        if app.should_quit {
            break;
        }

        if event::poll(frame)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(&key),
                Event::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::ScrollDown => app.wheel(WHEEL_ROWS),
                    MouseEventKind::ScrollUp => app.wheel(-WHEEL_ROWS),
                    _ => {}
                },
                Event::Resize(cols, rows) => app.resize(cols, rows),
                _ => {}
            }
        }
    }
    Ok(())
}
