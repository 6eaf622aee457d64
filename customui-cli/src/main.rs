// customui-cli/src/main.rs
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use customui_core::{
    ConfigFile, Customizer, ExtensionLoader, FileBlobStore, PlacementProperties, WidgetKind,
};
use customui_widgets::{builtin_customizer, catalog};

#[derive(Parser)]
#[command(author, version, about = "Inspect and edit the saved toolbar arrangement")]
struct Cli {
    /// State file to use instead of the configured one
    #[arg(long, global = true)]
    state: Option<PathBuf>,
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List areas and the widgets placed in them
    Show,
    /// List registered widgets
    Widgets,
    /// Place a widget in an area
    Insert {
        widget: String,
        area: String,
        /// Position in the area, clamped to its length; appends if omitted
        #[arg(long)]
        index: Option<usize>,
        /// Place the widget hidden
        #[arg(long)]
        hidden: bool,
    },
    /// Move a placed widget to another area or position
    Move {
        widget: String,
        area: String,
        #[arg(long)]
        index: Option<usize>,
    },
    /// Take a widget out of its area
    Remove { widget: String },
    /// Go back to the default arrangement
    Reset,
    /// Re-register extension widgets whenever a manifest changes
    Watch,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = ConfigFile::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "failed to load config, using defaults");
        ConfigFile::default()
    });
    let state_path = cli.state.clone().unwrap_or_else(|| config.state_path());
    tracing::debug!(path = %state_path.display(), "using state file");

    let mut customizer = builtin_customizer(Box::new(FileBlobStore::new(&state_path)));
    for area in config.extra_areas() {
        customizer.define_area(area);
    }

    // Extension widgets go in before startup so their saved placements survive
    let mut loader = ExtensionLoader::new(config.extensions_dir());
    match loader.load_all() {
        Ok(manifests) => {
            for manifest in &manifests {
                customizer.register_extension(manifest);
            }
        }
        Err(e) => tracing::warn!(error = %e, "failed to load extensions"),
    }

    let outcome = customizer.initialize(catalog());
    if let Some(e) = outcome.failed {
        tracing::warn!(error = %e, "UI state is only partially migrated");
    }

    match cli.command {
        Commands::Show => show(&customizer),
        Commands::Widgets => list_widgets(&customizer),
        Commands::Insert {
            widget,
            area,
            index,
            hidden,
        } => {
            let properties = hidden.then_some(PlacementProperties { visible: false });
            let at = customizer
                .insert_placement(&area, &widget, index.unwrap_or(usize::MAX), properties)
                .with_context(|| format!("cannot place {widget} in {area}"))?;
            save(&mut customizer, &state_path)?;
            println!("Placed {widget} in {area} at {at}");
        }
        Commands::Move {
            widget,
            area,
            index,
        } => {
            let at = customizer
                .move_placement(&widget, &area, index.unwrap_or(usize::MAX))
                .with_context(|| format!("cannot move {widget} to {area}"))?;
            save(&mut customizer, &state_path)?;
            println!("Moved {widget} to {area} at {at}");
        }
        Commands::Remove { widget } => match customizer.remove_placement(&widget) {
            Some(removed) => {
                save(&mut customizer, &state_path)?;
                println!("Removed {widget} from {}", removed.area);
            }
            None => println!("{widget} is not placed"),
        },
        Commands::Reset => {
            customizer.reset();
            save(&mut customizer, &state_path)?;
            println!("Restored the default arrangement");
        }
        Commands::Watch => watch(&mut customizer, &mut loader, &state_path)?,
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("CUSTOMUI_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn save(customizer: &mut Customizer, path: &std::path::Path) -> Result<()> {
    customizer
        .save()
        .with_context(|| format!("failed to write {}", path.display()))
}

fn show(customizer: &Customizer) {
    println!("State version {}", customizer.current_version());
    for area in customizer.areas() {
        match customizer.resolve_anchor(&area.id) {
            Some(anchor) => println!("{} (overflow: {anchor})", area.id),
            None => println!("{}", area.id),
        }
        for (i, placement) in customizer.placements(&area.id).iter().enumerate() {
            let hidden = if placement.visible() { "" } else { " (hidden)" };
            println!("  {i:>2}. {}{hidden}", placement.widget_id);
        }
    }
}

fn list_widgets(customizer: &Customizer) {
    for widget in customizer.widgets() {
        let area = customizer.area_of(&widget.id).unwrap_or("-");
        let label = match &widget.kind {
            WidgetKind::ToolbarButton(button) if !button.text.is_empty() => button.text.as_str(),
            _ => "",
        };
        println!(
            "{:<28} {:<15} {:<9} {:<28} {label}",
            widget.id,
            widget.kind.name(),
            widget.source.as_str(),
            area
        );
    }
}

fn watch(
    customizer: &mut Customizer,
    loader: &mut ExtensionLoader,
    state_path: &std::path::Path,
) -> Result<()> {
    loader
        .watch()
        .with_context(|| format!("cannot watch {}", loader.dir().display()))?;
    if !loader.is_watching() {
        println!("{} does not exist, nothing to watch", loader.dir().display());
        return Ok(());
    }
    println!("Watching {} (Ctrl+C to stop)", loader.dir().display());

    loop {
        let manifests = loader.check_for_changes();
        if !manifests.is_empty() {
            for manifest in &manifests {
                let ids = customizer.register_extension(manifest);
                println!("Reloaded {} ({} widgets)", manifest.name, ids.len());
            }
            save(customizer, state_path)?;
        }
        customizer.process_pending();
        std::thread::sleep(Duration::from_millis(500));
    }
}
