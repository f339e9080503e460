//! Terminal front end: renders a session as text and routes typed commands
//! into it.
//!
//! Rows, columns, levels and tray slots are 1-based on screen.

use std::io::{self, BufRead, Write};

use gridfill::grid::{format_grid, slot_char};
use gridfill::levels::LevelPack;
use gridfill::{Hint, PlacementOutcome, Session, SessionState};

const HELP: &str = "\
commands:
  select N        pick tray piece N for the next placement
  rotate N        turn tray piece N a quarter turn clockwise
  flip N          mirror tray piece N
  place R C       put the selected piece with its top-left corner at row R, column C
  remove R C      lift the piece covering row R, column C back into the tray
  click R C       place when a piece is selected, otherwise remove
  hint            suggest a spot for the first unplaced piece
  reset           start the level over
  next | prev     move to the next or previous level
  level N         jump to level N
  show            redraw the board
  help            show this text
  quit            leave";

/// A parsed player command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Select(usize),
    Rotate(usize),
    Flip(usize),
    Place(usize, usize),
    Remove(usize, usize),
    Click(usize, usize),
    Hint,
    Reset,
    Next,
    Prev,
    Level(usize),
    Show,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unknown command {0:?}, type `help` for a list")]
    Unknown(String),
    #[error("`{0}` needs {1} number(s)")]
    MissingArgument(&'static str, usize),
    #[error("{0:?} is not a number from 1 up")]
    BadNumber(String),
}

/// Parses one 1-based number into a 0-based index.
fn parse_index(word: &str) -> Result<usize, ParseError> {
    match word.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n - 1),
        _ => Err(ParseError::BadNumber(word.to_owned())),
    }
}

/// Parses a command line. Blank lines parse as [`Command::Show`].
pub fn parse_command(line: &str) -> Result<Command, ParseError> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(Command::Show);
    };
    let args: Vec<&str> = words.collect();

    let one = |name: &'static str| -> Result<usize, ParseError> {
        let word = args.first().ok_or(ParseError::MissingArgument(name, 1))?;
        parse_index(word)
    };
    let two = |name: &'static str| -> Result<(usize, usize), ParseError> {
        match args.as_slice() {
            [row, col, ..] => Ok((parse_index(row)?, parse_index(col)?)),
            _ => Err(ParseError::MissingArgument(name, 2)),
        }
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "select" | "s" => Command::Select(one("select")?),
        "rotate" | "r" => Command::Rotate(one("rotate")?),
        "flip" | "f" => Command::Flip(one("flip")?),
        "place" | "p" => {
            let (row, col) = two("place")?;
            Command::Place(row, col)
        }
        "remove" | "x" => {
            let (row, col) = two("remove")?;
            Command::Remove(row, col)
        }
        "click" | "c" => {
            let (row, col) = two("click")?;
            Command::Click(row, col)
        }
        "hint" | "h" => Command::Hint,
        "reset" => Command::Reset,
        "next" | "n" => Command::Next,
        "prev" => Command::Prev,
        "level" | "l" => Command::Level(one("level")?),
        "show" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        other => return Err(ParseError::Unknown(other.to_owned())),
    };
    Ok(command)
}

/// Message shown for a hint.
pub fn describe_hint(hint: &Hint) -> String {
    match hint {
        Hint::Place {
            shape_name,
            row,
            col,
        } => format!(
            "Try placing the {shape_name} piece at row {}, column {}",
            row + 1,
            col + 1
        ),
        Hint::TryTransforming { shape_name } => {
            format!("The {shape_name} piece fits nowhere as it is. Try rotating or flipping it!")
        }
        Hint::AllPlaced => "All pieces are placed!".to_owned(),
    }
}

fn placement_message(outcome: PlacementOutcome) -> &'static str {
    match outcome {
        PlacementOutcome::Rejected => "",
        PlacementOutcome::Placed => "placed",
        PlacementOutcome::Won => "Level complete! Type `next` for the next level.",
    }
}

/// Applies `command` to the session and returns the message to print.
pub fn apply(session: &mut Session, command: Command) -> String {
    match command {
        Command::Select(slot) => {
            if session.select_piece(slot) {
                format!("selected piece {}", slot + 1)
            } else {
                String::new()
            }
        }
        Command::Rotate(slot) => {
            session.rotate_piece(slot);
            String::new()
        }
        Command::Flip(slot) => {
            session.flip_piece(slot);
            String::new()
        }
        Command::Place(row, col) => {
            placement_message(session.attempt_placement(row, col)).to_owned()
        }
        Command::Remove(row, col) => {
            session.remove_at(row, col);
            String::new()
        }
        Command::Click(row, col) => placement_message(session.click(row, col)).to_owned(),
        Command::Hint => describe_hint(&session.request_hint()),
        Command::Reset => {
            session.reset_current_level();
            String::new()
        }
        Command::Next => {
            session.change_level(1);
            String::new()
        }
        Command::Prev => {
            session.change_level(-1);
            String::new()
        }
        Command::Level(level) => {
            session.load_level(level);
            String::new()
        }
        Command::Show | Command::Quit => String::new(),
        Command::Help => HELP.to_owned(),
    }
}

fn state_label(state: SessionState) -> &'static str {
    match state {
        SessionState::Loading => "loading",
        SessionState::Active => "active",
        SessionState::Won => "won",
    }
}

/// Renders the level header, grid and tray.
pub fn render(session: &Session) -> String {
    let mut output = format!(
        "Level {}/{} ({})\n",
        session.current_level() + 1,
        session.level_count(),
        state_label(session.state())
    );
    output.push_str(&format_grid(session.grid()));
    output.push_str("\nTray:\n");

    for (slot, piece) in session.tray().iter().enumerate() {
        let marker = if session.selected() == Some(slot) { '*' } else { ' ' };
        let name = &session.shape_of(piece).name;
        output.push_str(&format!("{}{} {}", slot_char(slot), marker, name));
        if piece.placed {
            output.push_str(" (placed)\n");
            continue;
        }

        output.push_str(&format!(" rot {}", u16::from(piece.orientation.rotation) * 90));
        if piece.orientation.flipped {
            output.push_str(" flipped");
        }
        output.push('\n');

        if let Some(pattern) = session.piece_pattern(slot) {
            for row in 0..pattern.rows() {
                output.push_str("    ");
                for col in 0..pattern.cols() {
                    output.push(if pattern.is_set(row, col) { '#' } else { '.' });
                }
                output.push('\n');
            }
        }
    }

    output
}

/// One line per level: size and cell accounting.
pub fn format_level_table(pack: &LevelPack) -> String {
    let mut output = String::new();
    for (idx, level) in pack.levels.iter().enumerate() {
        let budget = level.budget(&pack.shapes);
        output.push_str(&format!(
            "{:>3}  {}x{}  locked {:>2}  tray {:>2} pieces / {:>2} cells  slack {}\n",
            idx + 1,
            level.rows,
            level.cols,
            budget.locked,
            level.available_shapes.len(),
            budget.available,
            budget.slack()
        ));
    }
    output
}

/// Runs the interactive loop until `quit` or end of input.
pub fn play<R: BufRead, W: Write>(
    session: &mut Session,
    input: R,
    output: &mut W,
) -> io::Result<()> {
    write!(output, "{}", render(session))?;
    writeln!(output, "Type `help` for commands.")?;

    for line in input.lines() {
        let line = line?;
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(err) => {
                writeln!(output, "{err}")?;
                continue;
            }
        };
        if command == Command::Quit {
            break;
        }

        let message = apply(session, command);
        if command != Command::Help {
            write!(output, "{}", render(session))?;
        }
        if !message.is_empty() {
            writeln!(output, "{message}")?;
        }
    }

    Ok(())
}
