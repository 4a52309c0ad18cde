// vim: set ai et ts=4 sw=4 sts=4:
use std::io::{self, BufRead, Write};
use log::{info, warn};

use super::grid::{Error, Mode};
use super::puzzle::{Puzzle, SessionOutcome};

const HELP: &str = "\
Commands:
  m <row> <col>   mark a square (again to clear it)
  x <row> <col>   cross out a square (again to clear it)
  r               clear the whole board
  p               print the board
  h               show this help
  q               quit
Rows and columns are counted from 1, starting at the top left.";

#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum Command {
    Toggle { row: isize, col: isize, mode: Mode },
    Reset,
    Print,
    Help,
    Quit,
}

impl Command {
    // returns Ok(None) for a blank line
    pub fn parse(line: &str) -> Result<Option<Command>, String> {
        let mut words = line.split_whitespace();
        let verb = match words.next() {
            Some(w) => w.to_lowercase(),
            None    => return Ok(None),
        };
        let command = match verb.as_str() {
            "m" | "mark"              => Self::_parse_toggle(Mode::Mark, &mut words)?,
            "x" | "exclude"           => Self::_parse_toggle(Mode::Exclude, &mut words)?,
            "r" | "reset"             => Command::Reset,
            "p" | "print"             => Command::Print,
            "h" | "help" | "?"        => Command::Help,
            "q" | "quit" | "exit"     => Command::Quit,
            other                     => return Err(format!("unknown command '{}', type h for help", other)),
        };
        if let Some(extra) = words.next() {
            return Err(format!("unexpected argument '{}'", extra));
        }
        Ok(Some(command))
    }

    fn _parse_toggle<'a, I>(mode: Mode, words: &mut I) -> Result<Command, String>
        where I: Iterator<Item = &'a str>
    {
        // one-based on the command line, zero-based in the grid
        let mut zero_based = |name: &str| -> Result<isize, String> {
            let word = words.next().ok_or_else(|| format!("missing {} number", name))?;
            word.parse::<isize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .ok_or_else(|| format!("'{}' is not a valid {} number", word, name))
        };
        let row = zero_based("row")?;
        let col = zero_based("column")?;
        Ok(Command::Toggle { row, col, mode })
    }
}

pub struct ConsoleSettings {
    pub subdivision: Option<usize>,
    pub emit_color: bool,
}

fn print_board<W: Write>(puzzle: &Puzzle, output: &mut W, settings: &ConsoleSettings) -> io::Result<()> {
    write!(output, "{}", puzzle.render(settings.subdivision, settings.emit_color))?;
    writeln!(output, "Marked: {}/{}", puzzle.state().marked_count(), puzzle.state().filled_count())
}

/// Runs one play session on a line-oriented terminal, reading commands from `input` until
/// the puzzle is solved, a quit command arrives, or the input ends.
pub fn play<R, W>(puzzle: &mut Puzzle,
                  input: R,
                  output: &mut W,
                  settings: &ConsoleSettings)
    -> io::Result<SessionOutcome>
    where R: BufRead, W: Write
{
    writeln!(output, "{}", puzzle.title)?;
    print_board(puzzle, output, settings)?;
    writeln!(output, "Type h for help.")?;

    for line in input.lines() {
        let line = line?;
        let command = match Command::parse(&line) {
            Ok(Some(c)) => c,
            Ok(None)    => continue,
            Err(msg)    => {
                writeln!(output, "? {}", msg)?;
                continue;
            }
        };

        match command {
            Command::Toggle { row, col, mode } => {
                match puzzle.toggle_mark(row, col, mode) {
                    Ok(_) => {}
                    Err(Error::OutOfRange { height, width, .. }) => {
                        let (row, col) = (row.saturating_add(1), col.saturating_add(1));
                        warn!("rejected {} at row {} col {}", mode, row, col);
                        writeln!(output, "? no square at row {} column {} (the grid has {} rows and {} columns)",
                                 row, col, height, width)?;
                        continue;
                    }
                    Err(e) => return Err(io::Error::new(io::ErrorKind::Other, e.to_string())),
                }
                print_board(puzzle, output, settings)?;
                if puzzle.is_solved() {
                    info!("'{}' solved", puzzle.title);
                    writeln!(output, "YOU WON!!")?;
                    return Ok(SessionOutcome::Solved);
                }
            }
            Command::Reset => {
                puzzle.reset();
                print_board(puzzle, output, settings)?;
            }
            Command::Print => print_board(puzzle, output, settings)?,
            Command::Help  => writeln!(output, "{}", HELP)?,
            Command::Quit  => return Ok(SessionOutcome::Quit),
        }
    }

    Ok(SessionOutcome::Quit)
}
