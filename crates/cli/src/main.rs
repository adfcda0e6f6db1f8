//! Pipeline trace replay CLI.
//!
//! This binary is a terminal presentation adapter for the replay engine. It performs:
//! 1. **List:** Show the programs of the catalog with their listing and trace sizes.
//! 2. **Play:** Auto-play a program's trace, printing one frame per displayed cycle.
//! 3. **Show:** Print the state at a single cycle, as text or JSON.

mod render;
mod runner;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

use pipeviz_core::config::Config;
use pipeviz_core::sim::{Catalog, DirSource, Event, PlaybackSession, load_program};

use crate::render::TextFrame;
use crate::runner::Runner;

#[derive(Parser, Debug)]
#[command(
    name = "pipeviz",
    author,
    version,
    about = "Replay 4-stage pipeline occupancy traces",
    long_about = "Replay a precomputed pipeline trace next to its assembly listing.\n\nEach program lives in <root>/<name>/ with assembly_code.txt and pc_stages.txt.\n\nExamples:\n  pipeviz list\n  pipeviz play fib --rate 10\n  pipeviz show fib --cycle 12 --json"
)]
struct Cli {
    /// Directory holding one sub-directory per program.
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// JSON configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Catalog file (programs.json).
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the programs in the catalog.
    List,

    /// Auto-play a program until its last cycle.
    Play {
        /// Program name; defaults to the configured default program.
        program: Option<String>,

        /// Cycles per second (integer, at least 1).
        #[arg(long)]
        rate: Option<String>,

        /// Rows shown around the stage 3 instruction (0 shows the whole listing).
        #[arg(long, default_value_t = 0)]
        window: usize,

        /// Print frames one after another instead of redrawing in place.
        #[arg(long)]
        plain: bool,
    },

    /// Print the pipeline state at one cycle.
    Show {
        /// Program name; defaults to the configured default program.
        program: Option<String>,

        /// Cycle to display (clamped to the trace).
        #[arg(long, default_value_t = 0)]
        cycle: usize,

        /// Emit the snapshot as JSON.
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    init_logger();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::from_file(path).unwrap_or_else(|e| fail(&e)),
        None => Config::default(),
    };
    if let Some(root) = cli.root {
        config.catalog.root = root;
    }
    if let Some(catalog) = cli.catalog {
        config.catalog.catalog_file = catalog;
    }

    match cli.command {
        Commands::List => cmd_list(&config),
        Commands::Play {
            program,
            rate,
            window,
            plain,
        } => cmd_play(config, program, rate, window, plain),
        Commands::Show {
            program,
            cycle,
            json,
        } => cmd_show(config, program, cycle, json),
    }
}

/// Installs the global tracing subscriber.
///
/// The default level is `INFO`; override it with `RUST_LOG`. Logs go to
/// stderr so frames and JSON on stdout stay clean.
fn init_logger() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn fail(err: &dyn std::error::Error) -> ! {
    eprintln!("error: {err}");
    process::exit(1);
}

/// Reads the catalog; a missing file means "accept any program name".
fn read_catalog(config: &Config) -> Catalog {
    let path = &config.catalog.catalog_file;
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no catalog file, accepting any program");
        return Catalog::default();
    }
    Catalog::from_file(path).unwrap_or_else(|e| fail(&e))
}

/// Prints each catalog entry with its instruction and cycle counts.
fn cmd_list(config: &Config) {
    let catalog = read_catalog(config);
    if catalog.programs.is_empty() {
        eprintln!(
            "No programs listed in {}",
            config.catalog.catalog_file.display()
        );
        process::exit(1);
    }

    for name in &catalog.programs {
        let marker = if *name == config.catalog.default_program {
            "*"
        } else {
            " "
        };
        match catalog
            .request(&config.catalog, name)
            .and_then(|request| load_program(&DirSource, &request))
        {
            Ok(program) => println!(
                "{marker} {name:<16} {:>5} instructions {:>7} cycles",
                program.instructions.len(),
                program.total_cycles()
            ),
            Err(e) => println!("{marker} {name:<16} unavailable: {e}"),
        }
    }
}

/// Auto-plays `program` and prints a frame for every render effect.
fn cmd_play(
    config: Config,
    program: Option<String>,
    rate: Option<String>,
    window: usize,
    plain: bool,
) {
    let name = program.unwrap_or_else(|| config.catalog.default_program.clone());
    let catalog = read_catalog(&config);
    let session = PlaybackSession::new(config, catalog);
    let frame = TextFrame { window, plain };

    let mut runner = Runner::new(session, DirSource);
    runner.push(Event::SelectProgram(name));
    if let Some(rate) = rate {
        runner.push(Event::SetRate(rate));
    }
    runner.run(|snapshot| frame.print(snapshot));

    if runner.session().program().is_none() {
        process::exit(1);
    }
}

/// Loads `program` without playback, seeks to `cycle` and prints the state.
fn cmd_show(mut config: Config, program: Option<String>, cycle: usize, json: bool) {
    config.playback.autoplay = false;
    let name = program.unwrap_or_else(|| config.catalog.default_program.clone());
    let catalog = read_catalog(&config);

    let mut runner = Runner::new(PlaybackSession::new(config, catalog), DirSource);
    runner.push(Event::SelectProgram(name));
    runner.push(Event::Seek(cycle));
    runner.run(|_| {});

    if runner.session().program().is_none() {
        process::exit(1);
    }

    let snapshot = runner.session().snapshot();
    if json {
        match serde_json::to_string_pretty(&snapshot) {
            Ok(text) => println!("{text}"),
            Err(e) => fail(&e),
        }
    } else {
        TextFrame {
            window: 0,
            plain: true,
        }
        .print(&snapshot);
    }
}
