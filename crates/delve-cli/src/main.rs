//! delve: generate a dungeon and print it
//!
//! Settings come from an optional JSON config file; command-line flags
//! override individual values.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use delve_core::Dungeon;
use delve_core::dungeon::{DungeonConfig, MapSymbols};

/// Procedural dungeon generator
#[derive(Parser, Debug)]
#[command(name = "delve")]
#[command(author, version, about = "Generate a dungeon of rooms and hallways", long_about = None)]
struct Args {
    /// JSON configuration file; missing fields use the defaults
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Grid width in tiles
    #[arg(long)]
    width: Option<i32>,

    /// Grid height in tiles
    #[arg(long)]
    height: Option<i32>,

    /// Seed for a reproducible layout
    #[arg(short = 's', long)]
    seed: Option<u64>,

    /// Room budget (hallways count towards it)
    #[arg(short = 'n', long = "max-rooms")]
    max_rooms: Option<u32>,

    /// Largest room area in tiles
    #[arg(long = "max-area")]
    max_area: Option<i32>,

    /// Tiles kept between a door and a wall corner
    #[arg(long = "door-padding")]
    door_padding: Option<i32>,

    /// Print only the summary, not the map
    #[arg(long = "summary-only")]
    summary_only: bool,

    /// Verbose output (generation phases at debug level)
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = build_config(&args)?;
    tracing::debug!(?config, "configuration loaded");

    let dungeon = Dungeon::generate(&config).context("dungeon generation failed")?;

    let mut out = io::stdout().lock();
    if !args.summary_only {
        write!(out, "{}", dungeon.render_ascii(&MapSymbols::default()))?;
        writeln!(out)?;
    }
    write_summary(&mut out, &dungeon)?;
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "delve=debug,delve_core=debug" } else { "delve=info,delve_core=info" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true).with_writer(io::stderr))
        .init();
}

fn load_config(path: &Path) -> Result<DungeonConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("failed to parse config file {}", path.display()))
}

/// Config file (or defaults) with command-line overrides applied
fn build_config(args: &Args) -> Result<DungeonConfig> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => DungeonConfig::default(),
    };

    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(max_rooms) = args.max_rooms {
        config.rooms.max_rooms = max_rooms;
    }
    if let Some(max_area) = args.max_area {
        config.rooms.max_area = max_area;
    }
    if let Some(door_padding) = args.door_padding {
        config.door_padding = door_padding;
    }

    Ok(config)
}

fn write_summary(out: &mut impl Write, dungeon: &Dungeon) -> io::Result<()> {
    writeln!(out, "seed:      {}", dungeon.seed())?;
    writeln!(out, "size:      {}x{}", dungeon.width(), dungeon.height())?;
    writeln!(out, "rooms:     {}", dungeon.chambers().count())?;
    writeln!(out, "hallways:  {}", dungeon.hallways().count())?;
    writeln!(out, "start:     {}", dungeon.start_room_id())?;
    writeln!(out, "end:       {}", dungeon.end_room_id())?;
    writeln!(out, "connections:")?;

    let graph = dungeon.connections();
    for id in graph.ids() {
        let kind = dungeon.room(id).map(|room| room.room_type().to_string()).unwrap_or_default();
        let neighbors: Vec<String> = graph.neighbors(id).iter().map(ToString::to_string).collect();
        writeln!(out, "  {id:>3} {kind:<7} -> {}", neighbors.join(", "))?;
    }
    Ok(())
}
