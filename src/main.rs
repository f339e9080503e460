//! Polyomino Grid Puzzle
//!
//! Fill a rectangular grid completely using a tray of polyomino pieces, some
//! of which are locked in place from the start. Pieces can be rotated and
//! mirrored before they are placed. The binary is a small terminal front end
//! over the `gridfill` library.

mod console;

use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use gridfill::levels::LevelPack;
use gridfill::{persistence, Session};

/// Plays and inspects polyomino grid-filling puzzles.
#[derive(Parser)]
#[command(name = "gridfill")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON level pack to use instead of the built-in levels.
    #[arg(long, global = true, value_name = "FILE")]
    levels: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Play interactively on the terminal.
    Play {
        /// Level to start on (1-based).
        #[arg(long, default_value_t = 1)]
        level: usize,
    },
    /// List every level with its cell accounting.
    Levels,
    /// Print the starting board and tray of one level.
    Show {
        /// Level number (1-based).
        level: usize,
    },
    /// Write the active level pack as JSON.
    Export {
        /// Destination file.
        path: PathBuf,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let pack = match load_pack(cli.levels.as_deref()) {
        Ok(pack) => pack,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let result = match cli.command.unwrap_or(Command::Play { level: 1 }) {
        Command::Play { level } => run_play(pack, level),
        Command::Levels => {
            print!("{}", console::format_level_table(&pack));
            Ok(())
        }
        Command::Show { level } => run_show(pack, level),
        Command::Export { path } => run_export(&pack, &path),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{}", message);
            ExitCode::FAILURE
        }
    }
}

/// Loads the pack from `path`, or the built-in pack when none is given.
fn load_pack(path: Option<&Path>) -> Result<LevelPack, persistence::PackError> {
    match path {
        Some(path) => persistence::load(path),
        None => Ok(LevelPack::builtin()),
    }
}

/// Starts a session on `level` (1-based).
fn start_session(pack: LevelPack, level: usize) -> Result<Session, String> {
    let count = pack.levels.len();
    let mut session = Session::with_pack(pack).map_err(|e| e.to_string())?;
    if level == 0 || !session.load_level(level - 1) {
        return Err(format!("level {} does not exist (1..={})", level, count));
    }
    Ok(session)
}

/// Runs the interactive loop on stdin/stdout.
fn run_play(pack: LevelPack, level: usize) -> Result<(), String> {
    let mut session = start_session(pack, level)?;
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    console::play(&mut session, stdin.lock(), &mut stdout).map_err(|e| e.to_string())
}

/// Prints the starting position of a level.
fn run_show(pack: LevelPack, level: usize) -> Result<(), String> {
    let session = start_session(pack, level)?;
    print!("{}", console::render(&session));
    Ok(())
}

/// Writes the pack to disk.
fn run_export(pack: &LevelPack, path: &Path) -> Result<(), String> {
    persistence::save(pack, path).map_err(|e| e.to_string())?;
    println!("Wrote {} levels to {}", pack.levels.len(), path.display());
    Ok(())
}
