use std::fs::File;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use env_logger::{Env, Target};

use windowed_listing::app::App;
use windowed_listing::catalog::Catalog;
use windowed_listing::config::{AppConfig, GeneralConfig, ThemeConfig};
use windowed_listing::error::Result;
use windowed_listing::event::{Event, EventHandler};
use windowed_listing::tui::{install_panic_hook, Tui};
use windowed_listing::{handler, ui};

/// Browse a hierarchy of slash-separated item IDs in the terminal.
#[derive(Parser, Debug)]
#[command(name = "wl", version, about)]
struct Cli {
    /// Catalog of item IDs: one per line, a JSON array (`.json`), or `-` for stdin
    catalog: PathBuf,

    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Comma-separated IDs to show initially (defaults to the top level)
    #[arg(short, long, value_delimiter = ',')]
    initial: Option<Vec<String>>,

    /// ID to select initially
    #[arg(short, long)]
    selected: Option<String>,

    /// Color theme: dark, light, custom
    #[arg(short, long)]
    theme: Option<String>,

    /// Disable mouse support
    #[arg(long)]
    no_mouse: bool,

    /// Write logs to this file (filter with RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

/// Partial config built from CLI flags; merged last so it wins.
fn cli_overrides(cli: &Cli) -> AppConfig {
    AppConfig {
        general: GeneralConfig {
            mouse: cli.no_mouse.then_some(false),
            use_icons: None,
        },
        theme: ThemeConfig {
            scheme: cli.theme.clone(),
            custom: None,
        },
        ..Default::default()
    }
}

/// The terminal belongs to the UI, so logs only go to an explicit file.
fn init_logging(log_file: Option<&PathBuf>) -> Result<()> {
    if let Some(path) = log_file {
        let file = File::create(path)?;
        env_logger::Builder::from_env(Env::default().default_filter_or("info"))
            .format_timestamp_millis()
            .target(Target::Pipe(Box::new(file)))
            .init();
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_ref())?;

    let config = AppConfig::load(cli.config.as_deref(), Some(&cli_overrides(&cli)));
    let catalog = Catalog::load(&cli.catalog)?;
    let initial = catalog.resolve_initial(cli.initial.clone(), cli.selected.clone());

    install_panic_hook();

    let mut tui = Tui::new(config.mouse_enabled())?;
    let viewport = ui::listing_height(tui.height()?, false);
    let mut app = App::new(catalog, initial, viewport, &config).await?;
    let mut events = EventHandler::new(Duration::from_millis(16));

    loop {
        tui.terminal_mut().draw(|frame| {
            ui::render(&mut app, frame);
        })?;
        // The panel height may have changed with a resize or the search bar.
        app.sync_viewport().await;

        match events.next().await? {
            Event::Key(key) => handler::handle_key_event(&mut app, key).await,
            Event::Mouse(mouse) => handler::handle_mouse_event(&mut app, mouse).await,
            Event::Tick => app.on_tick(Instant::now()).await,
            Event::Resize(_, _) => {}
        }

        if app.should_quit {
            break;
        }
    }

    tui.restore()?;
    log::info!("exiting");
    Ok(())
}
