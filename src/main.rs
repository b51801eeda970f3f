// src/main.rs
use std::{io, path::PathBuf, time::Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{backend::Backend, prelude::*};
use tracing::info;

use numgrid::{
    app::App,
    config::Settings,
    input, logging,
    terminal::{self, Crossterm, TerminalGuard},
    theme::Theme,
    ui,
};

#[derive(Parser, Debug)]
#[command(name = "numgrid", version, about = "Interactive 1-100 number grid with highlighting")]
struct Cli {
    /// Extra config file, applied on top of the user and local ones
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for reproducible random picks
    #[arg(short, long)]
    seed: Option<u64>,

    /// Write logs to this file
    #[arg(short, long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = Settings::new(cli.config.as_deref()).context("failed to load configuration")?;
    logging::init(cli.log_file.as_deref(), &settings.log_level)?;
    info!(?settings, seed = ?cli.seed, "starting numgrid");

    let mut app = App::new(&settings, cli.seed);
    let theme = Theme::default();

    terminal::install_panic_hook(settings.mouse);
    let mut guard = TerminalGuard::enter(Crossterm, settings.mouse)
        .context("failed to set up terminal")?;
    let result = Terminal::new(CrosstermBackend::new(io::stdout()))
        .context("failed to create terminal")
        .and_then(|mut terminal| run(&mut terminal, &mut app, &theme, &settings));
    let restored = guard.restore().context("failed to restore terminal");
    info!(highlighted = app.controller.count(), "exiting");
    result?;
    restored
}

fn run<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    theme: &Theme,
    settings: &Settings,
) -> Result<()> {
    let mut dirty = true;
    while app.running {
        if app.take_changed() || dirty {
            let mut layout = app.layout;
            terminal.draw(|f| layout = ui::render(f, app, theme))?;
            app.layout = layout;
            dirty = false;
        }

        if event::poll(settings.tick_rate())? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    input::handle_key(app, key);
                    dirty = true;
                }
                Event::Mouse(mouse) if settings.mouse => {
                    input::handle_mouse(app, mouse);
                    dirty = true;
                }
                Event::Resize(_, _) => dirty = true,
                _ => {}
            }
        }
        app.tick(Instant::now());
    }
    Ok(())
}
