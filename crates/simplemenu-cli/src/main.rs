//! simplemenu CLI
//!
//! Runs the popup placer and the root menu model outside a panel host.
//! Provides:
//! - `place`: compute where the menu popup opens for a scene description
//! - `menu`: print the menu tree built from an app catalog
//! - `trigger`: resolve what activating a menu row does
//! - `config`: inspect or create the config file

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use simplemenu_core::config::{Config, Directories, PopupConfig, spawn_config_watcher};
use simplemenu_core::menu::{GroupChild, MenuEntry, MenuEvent, RootModel};
use simplemenu_core::placement::{PopupPlacer, Scene};
use simplemenu_core::{MenuAction, PanelEdge, Size, load_catalog};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// simplemenu - panel application menu tools
#[derive(Parser)]
#[command(name = "simplemenu")]
#[command(about = "Popup placement and application menu model for panel launchers")]
#[command(version)]
#[command(after_help = "\
Examples:
  simplemenu place --scene scene.json                 Print the popup position
  simplemenu place --scene scene.json --edge left     Override the panel edge
  simplemenu place --scene scene.json --watch         Re-place on config or scene changes
  simplemenu menu --catalog apps.json --depth 2       Print the first two menu levels
  simplemenu trigger --catalog apps.json 0.1.0        Launch the first app on page one
  simplemenu trigger 0.1.0 add-to-favorites           Pin that app and save the config
  simplemenu trigger --system 0                       Resolve the first session action
  simplemenu config init                              Write a default config file
")]
struct Cli {
    /// Config file (defaults to `$XDG_CONFIG_HOME/simplemenu/config.json`)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the popup position for the anchor described in a scene file
    Place(PlaceArgs),

    /// Print the root menu model
    Menu {
        /// App catalog (defaults to `$XDG_DATA_HOME/simplemenu/catalog.json`)
        #[arg(long, value_name = "FILE")]
        catalog: Option<PathBuf>,

        /// Number of levels to print
        #[arg(long)]
        depth: Option<usize>,
    },

    /// Trigger a menu row and print the resulting action
    Trigger(TriggerArgs),

    /// Config file commands
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Args)]
struct PlaceArgs {
    /// Scene description (screens, windows and the anchor)
    #[arg(long, value_name = "FILE")]
    scene: PathBuf,

    /// Popup width
    #[arg(long, default_value_t = 300)]
    width: i32,

    /// Popup height
    #[arg(long, default_value_t = 400)]
    height: i32,

    /// Panel edge (top, bottom, left, right), overrides the config
    #[arg(long)]
    edge: Option<PanelEdge>,

    /// Gap from screen edges, overrides the config
    #[arg(long, allow_negative_numbers = true)]
    offset: Option<i32>,

    /// Keep running and print a new position whenever the config or scene changes
    #[arg(long)]
    watch: bool,
}

#[derive(Args)]
struct TriggerArgs {
    /// App catalog (defaults to `$XDG_DATA_HOME/simplemenu/catalog.json`)
    #[arg(long, value_name = "FILE")]
    catalog: Option<PathBuf>,

    /// Row to trigger; nested rows are separated by dots, e.g. `0.1.3`
    row: String,

    /// Action id (empty launches apps and runs session actions)
    action: Option<String>,

    /// Argument for the action, e.g. the target index of `move-favorite`
    #[arg(long)]
    argument: Option<String>,

    /// Trigger a row of the session actions model instead
    #[arg(long)]
    system: bool,
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Print the config file path
    Path,
    /// Print the effective config
    Show,
    /// Write a config file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Set up logging.
/// In debug builds, defaults to debug level and also logs to a timestamped
/// file. Output goes to stderr so stdout stays parseable.
fn setup_logging() {
    let default_level = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("simplemenu={default_level}")));

    if cfg!(debug_assertions) {
        let temp_dir = std::env::temp_dir();
        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let log_filename = format!("simplemenu-{timestamp}.log");
        let log_path = temp_dir.join(&log_filename);

        #[cfg(unix)]
        {
            let symlink_path = temp_dir.join("simplemenu.log");
            let _ = std::fs::remove_file(&symlink_path);
            let _ = std::os::unix::fs::symlink(&log_path, &symlink_path);
        }

        let file_appender = tracing_appender::rolling::never(&temp_dir, &log_filename);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        std::mem::forget(guard);

        let file_layer = fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_target(true)
            .with_line_number(true);

        let stderr_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(true)
            .with_target(true)
            .with_line_number(true);

        tracing_subscriber::registry()
            .with(file_layer)
            .with(stderr_layer)
            .with(filter)
            .init();

        debug!("Logging to: {} (and stderr)", log_path.display());
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr))
            .with(filter)
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging();

    let config_path = match cli.config {
        Some(path) => path,
        None => Directories::new()?.config_file,
    };

    match cli.command {
        Commands::Place(args) => run_place(&config_path, &args).await,
        Commands::Menu { catalog, depth } => run_menu(&config_path, catalog, depth),
        Commands::Trigger(args) => run_trigger(&config_path, &args),
        Commands::Config { command } => run_config_command(&config_path, &command),
    }
}

fn load_config(path: &Path) -> Result<Config> {
    Config::load(path).with_context(|| format!("Failed to load config from {}", path.display()))
}

fn catalog_path(arg: Option<PathBuf>) -> Result<PathBuf> {
    match arg {
        Some(path) => Ok(path),
        None => Ok(Directories::new()?.catalog_file),
    }
}

// ---- place ----

/// Popup settings from the config file with command line overrides applied
fn popup_settings(config: &Config, args: &PlaceArgs) -> PopupConfig {
    let mut popup = config.popup;
    if let Some(edge) = args.edge {
        popup.panel_edge = edge;
    }
    if let Some(offset) = args.offset {
        popup.offset = offset;
    }
    popup
}

fn load_scene(path: &Path) -> Result<Scene> {
    Scene::load(path).with_context(|| format!("Failed to load scene from {}", path.display()))
}

fn print_position(placer: &PopupPlacer, scene: &Scene, size: Size) {
    let position = scene
        .anchor_item()
        .and_then(|item| placer.popup_position(&item, size, scene));
    match position {
        Some(pos) => println!("{pos}"),
        None => println!("not placeable"),
    }
}

async fn run_place(config_path: &Path, args: &PlaceArgs) -> Result<()> {
    let config = load_config(config_path)?;
    let mut scene = load_scene(&args.scene)?;
    let size = Size::new(args.width, args.height);

    let (mut placer, mut events) = PopupPlacer::from_config(&popup_settings(&config, args));

    print_position(&placer, &scene, size);

    if !args.watch {
        return Ok(());
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let (config_tx, mut config_rx) = mpsc::unbounded_channel();
    let _config_watcher =
        spawn_config_watcher(config_path, config_tx).context("Failed to watch config file")?;
    let (scene_tx, mut scene_rx) = mpsc::unbounded_channel();
    let _scene_watcher =
        spawn_config_watcher(&args.scene, scene_tx).context("Failed to watch scene file")?;

    info!("Watching for changes, press Ctrl+C to stop");

    loop {
        tokio::select! {
            Some(()) = config_rx.recv() => {
                match Config::load(config_path) {
                    Ok(config) => placer.apply_config(&popup_settings(&config, args)),
                    Err(e) => {
                        warn!("Keeping previous config: {e}");
                        continue;
                    }
                }
                let mut changed = false;
                while let Ok(event) = events.try_recv() {
                    info!("Placer setting changed: {event:?}");
                    changed = true;
                }
                if changed {
                    print_position(&placer, &scene, size);
                }
            }
            Some(()) = scene_rx.recv() => {
                match Scene::load(&args.scene) {
                    Ok(reloaded) => {
                        scene = reloaded;
                        print_position(&placer, &scene, size);
                    }
                    Err(e) => warn!("Keeping previous scene: {e}"),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, stopping watch");
                break;
            }
        }
    }

    Ok(())
}

// ---- menu ----

fn build_model(
    config: &Config,
    catalog: Option<PathBuf>,
) -> Result<(RootModel, UnboundedReceiver<MenuEvent>)> {
    let path = catalog_path(catalog)?;
    let catalog = load_catalog(&path)
        .with_context(|| format!("Failed to load catalog from {}", path.display()))?;

    let (mut model, events) = RootModel::new(&config.menu);
    model.set_catalog(catalog);
    Ok((model, events))
}

fn print_entries(model: &RootModel, entries: &[MenuEntry], level: usize, depth: Option<usize>) {
    let indent = "  ".repeat(level);
    for (row, entry) in entries.iter().enumerate() {
        match entry {
            MenuEntry::App(app) => println!("{indent}{row}: {} [{}]", app.name, app.storage_id),
            MenuEntry::Separator => println!("{indent}{row}: ----"),
            MenuEntry::System(action) => {
                println!("{indent}{row}: {} [{}]", action.label(), action.id());
            }
            MenuEntry::Group(group) => {
                let children = model.child_model(group);
                let label = match (&group.child, group.name.is_empty()) {
                    (GroupChild::Favorites, _) => "Favorites",
                    (GroupChild::Model(_), true) => "Page",
                    (GroupChild::Model(_), false) => group.name.as_str(),
                };
                println!("{indent}{row}: {label}/ ({} entries)", children.count());
                if depth.is_none_or(|max| level + 1 < max) {
                    print_entries(model, children.entries(), level + 1, depth);
                }
            }
        }
    }
}

fn run_menu(config_path: &Path, catalog: Option<PathBuf>, depth: Option<usize>) -> Result<()> {
    let config = load_config(config_path)?;
    let (model, _events) = build_model(&config, catalog)?;

    print_entries(&model, model.entries(), 0, depth);

    if let Some(system) = model.system_model() {
        println!();
        println!("Session actions:");
        print_entries(&model, system.model().entries(), 1, depth);
        println!("Session favorites:");
        print_entries(&model, system.favorites().entries(), 1, depth);
    }
    Ok(())
}

// ---- trigger ----

fn parse_row_path(row: &str) -> Result<Vec<usize>> {
    row.split('.')
        .map(|part| {
            part.trim()
                .parse::<usize>()
                .with_context(|| format!("Invalid row '{part}' in '{row}'"))
        })
        .collect()
}

fn run_trigger(config_path: &Path, args: &TriggerArgs) -> Result<()> {
    let mut config = load_config(config_path)?;
    let (mut model, _events) = build_model(&config, args.catalog.clone())?;
    let action_id = args.action.as_deref().unwrap_or("");

    let action = if args.system {
        let row = args
            .row
            .parse::<usize>()
            .with_context(|| format!("Session action rows are plain indices, got '{}'", args.row))?;
        model.trigger_system(row, action_id)
    } else {
        let path = parse_row_path(&args.row)?;
        model.trigger_path(&path, action_id, args.argument.as_deref())
    };

    let Some(action) = action else {
        println!("no action");
        return Ok(());
    };

    println!("{}", serde_json::to_string(&action)?);

    if let MenuAction::FavoritesChanged { favorites } = action {
        config.menu.favorites = favorites;
        config
            .save(config_path)
            .with_context(|| format!("Failed to save config to {}", config_path.display()))?;
        info!("Saved favorites to {}", config_path.display());
    }
    Ok(())
}

// ---- config ----

fn run_config_command(config_path: &Path, command: &ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Path => println!("{}", config_path.display()),
        ConfigCommands::Show => {
            let config = load_config(config_path)?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        ConfigCommands::Init { force } => {
            if config_path.exists() && !force {
                bail!(
                    "{} already exists (use --force to overwrite)",
                    config_path.display()
                );
            }
            Config::default()
                .save(config_path)
                .with_context(|| format!("Failed to write {}", config_path.display()))?;
            println!("Wrote {}", config_path.display());
        }
    }
    Ok(())
}
