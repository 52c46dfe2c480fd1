//! Gridfence CLI - inspect maps and plan turns from the command line.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use clap::{Parser, Subcommand};
use gridfence::engine::HillPolicy;
use gridfence::{Color, Coord};
use std::path::PathBuf;
use std::process::ExitCode;

/// Gridfence - territory and routing for a toroidal enclosure game
#[derive(Parser, Debug)]
#[command(name = "gridfence")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// List the areas a color has fenced off, with their trigger cells
    Areas {
        /// Map file (one row per line)
        #[arg(required = true)]
        map: PathBuf,

        /// Fence color
        #[arg(short, long, default_value = "A", value_parser = parse_color)]
        color: Color,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },

    /// Show the cells a harvest from a seed would remove
    Harvest {
        /// Map file (one row per line)
        #[arg(required = true)]
        map: PathBuf,

        /// Seed cell as x,y
        #[arg(short, long, value_parser = parse_coord)]
        seed: Coord,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },

    /// Print BFS distances from a cell
    Distance {
        /// Map file (one row per line)
        #[arg(required = true)]
        map: PathBuf,

        /// Origin cell as x,y
        #[arg(long, value_parser = parse_coord)]
        from: Coord,

        /// Destination cell as x,y
        #[arg(long, value_parser = parse_coord)]
        to: Option<Coord>,

        /// Let paths cross hills
        #[arg(long)]
        hills_traversable: bool,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },

    /// Play one turn from a snapshot and print the commands it would send
    Plan {
        /// Snapshot file (world line, map, workers, enemies)
        #[arg(required = true)]
        snapshot: PathBuf,

        /// Agent config JSON file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },

    /// Generate a random map
    Generate {
        /// Side length (default: 32)
        #[arg(long, default_value = "32")]
        size: u16,

        /// Random seed
        #[arg(short, long, default_value = "1")]
        seed: u64,

        /// Fraction of hill cells
        #[arg(long, default_value = "0.05")]
        hill_ratio: f64,

        /// Fraction of open cells holding a marker
        #[arg(long, default_value = "0.1")]
        marker_ratio: f64,

        /// Marker colors to scatter
        #[arg(long, default_value = "ABCD")]
        palette: String,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },
}

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();

    let result = match args.command {
        Commands::Areas { map, color, format } => cli::areas::execute(&map, color, format),

        Commands::Harvest { map, seed, format } => cli::harvest::execute(&map, seed, format),

        Commands::Distance {
            map,
            from,
            to,
            hills_traversable,
            format,
        } => cli::distance::execute(
            &map,
            from,
            to,
            HillPolicy::from_flag(hills_traversable),
            format,
        ),

        Commands::Plan {
            snapshot,
            config,
            format,
        } => cli::plan::execute(&snapshot, config.as_deref(), format),

        Commands::Generate {
            size,
            seed,
            hill_ratio,
            marker_ratio,
            palette,
            format,
        } => cli::generate::execute(size, seed, hill_ratio, marker_ratio, &palette, format),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr, filtered by `RUST_LOG`.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}

fn parse_coord(s: &str) -> Result<Coord, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected x,y but got {s:?}"))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<u16>()
            .map_err(|e| format!("invalid coordinate {v:?}: {e}"))
    };
    Ok(Coord::new(parse(x)?, parse(y)?))
}

fn parse_color(s: &str) -> Result<Color, String> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Color::from_char(ch).ok_or_else(|| format!("{ch:?} is not a letter")),
        _ => Err(format!("expected one letter but got {s:?}")),
    }
}
