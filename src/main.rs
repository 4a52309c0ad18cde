// vim: set ai et ts=4 sts=4 sw=4:
mod util;
mod grid;
mod clue;
mod state;
mod puzzle;
mod console;
mod ui;

use std::error;
use std::io;
use std::process;
use clap::{App, Arg, ArgMatches};
use log::{info, LevelFilter};

use self::console::ConsoleSettings;
use self::puzzle::{Puzzle, SessionOutcome};
use self::util::is_a_tty;

pub struct Args {
    pub puzzle_path: Option<String>,
    pub gui: bool,
    pub font: String,
    pub visual_groups: Option<usize>, // None disables subdivision lines
    pub win_pause: f64,
    pub emit_color: bool,
    pub verbosity: u64,
}

impl Args {
    fn from_matches(matches: &ArgMatches, stdout_is_tty: bool) -> Result<Args, String> {
        let visual_groups = match matches.value_of("visual-groups") {
            Some(s) => s.parse::<usize>()
                        .map_err(|_| format!("invalid value for --visual-groups: '{}'", s))?,
            None    => 5,
        };
        let win_pause = match matches.value_of("win-pause") {
            Some(s) => s.parse::<f64>()
                        .ok()
                        .filter(|secs| *secs >= 0.0)
                        .ok_or_else(|| format!("invalid value for --win-pause: '{}'", s))?,
            None    => 2.0,
        };
        Ok(Args {
            puzzle_path:   matches.value_of("puzzle").map(String::from),
            gui:           matches.is_present("gui"),
            font:          matches.value_of("font").unwrap_or("FiraSans-Regular.ttf").to_string(),
            visual_groups: Some(visual_groups).filter(|&n| n > 0),
            win_pause,
            emit_color:    !matches.is_present("no-color") && stdout_is_tty,
            verbosity:     matches.occurrences_of("verbose"),
        })
    }
}

fn app() -> App<'static, 'static> {
    App::new("nonogram")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Solve a nonogram by marking the squares its row and column clues describe")
        .arg(Arg::with_name("puzzle")
                 .value_name("PUZZLE")
                 .help("YAML puzzle file; the built-in puzzle is used when omitted")
                 .index(1))
        .arg(Arg::with_name("gui")
                 .long("gui")
                 .help("Play in a window instead of the terminal"))
        .arg(Arg::with_name("font")
                 .long("font")
                 .value_name("PATH")
                 .takes_value(true)
                 .default_value("FiraSans-Regular.ttf")
                 .help("TrueType font used by the window"))
        .arg(Arg::with_name("visual-groups")
                 .long("visual-groups")
                 .value_name("N")
                 .takes_value(true)
                 .default_value("5")
                 .help("Draw a heavier separator every N squares (0 disables)"))
        .arg(Arg::with_name("win-pause")
                 .long("win-pause")
                 .value_name("SECONDS")
                 .takes_value(true)
                 .default_value("2")
                 .help("How long the window stays open after the puzzle is solved"))
        .arg(Arg::with_name("no-color")
                 .long("no-color")
                 .help("Don't color the terminal board"))
        .arg(Arg::with_name("verbose")
                 .short("v")
                 .multiple(true)
                 .help("Log more (repeat for more detail)"))
}

fn setup_logging(verbosity: u64) -> Result<(), log::SetLoggerError> {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!("[{}][{}] {}", record.level(), record.target(), message))
        })
        .level(level)
        .chain(io::stderr())
        .apply()
}

fn run(args: &Args) -> Result<SessionOutcome, Box<dyn error::Error>> {
    let mut puzzle = match &args.puzzle_path {
        Some(path) => Puzzle::from_file(path)?,
        None       => Puzzle::builtin()?,
    };
    info!("playing '{}' ({}x{})", puzzle.title, puzzle.height(), puzzle.width());

    if args.gui {
        return ui::ui_main(puzzle, args);
    }

    let settings = ConsoleSettings {
        subdivision: args.visual_groups,
        emit_color:  args.emit_color,
    };
    let stdin = io::stdin();
    let stdout = io::stdout();
    let outcome = console::play(&mut puzzle, stdin.lock(), &mut stdout.lock(), &settings)?;
    Ok(outcome)
}

fn main() {
    let matches = app().get_matches();
    let args = match Args::from_matches(&matches, is_a_tty(&io::stdout())) {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("error: {}", msg);
            process::exit(2);
        }
    };
    if let Err(e) = setup_logging(args.verbosity) {
        eprintln!("could not set up logging: {}", e);
    }

    match run(&args) {
        Ok(outcome) => info!("session ended: {:?}", outcome),
        Err(e)      => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str], tty: bool) -> Result<Args, String> {
        let matches = app().get_matches_from_safe(argv.iter().cloned())
                           .map_err(|e| e.message)?;
        Args::from_matches(&matches, tty)
    }

    #[test]
    fn defaults() {
        let args = parse(&["nonogram"], true).unwrap();
        assert_eq!(args.puzzle_path, None);
        assert!(!args.gui);
        assert_eq!(args.font, "FiraSans-Regular.ttf");
        assert_eq!(args.visual_groups, Some(5));
        assert_eq!(args.win_pause, 2.0);
        assert!(args.emit_color);
        assert_eq!(args.verbosity, 0);
    }

    #[test]
    fn explicit_options() {
        let args = parse(&["nonogram", "--gui", "--visual-groups", "0", "--win-pause", "0.5",
                           "--font", "mono.ttf", "--no-color", "-vv", "heart.yaml"], true).unwrap();
        assert_eq!(args.puzzle_path.as_deref(), Some("heart.yaml"));
        assert!(args.gui);
        assert_eq!(args.font, "mono.ttf");
        assert_eq!(args.visual_groups, None);
        assert_eq!(args.win_pause, 0.5);
        assert!(!args.emit_color);
        assert_eq!(args.verbosity, 2);
    }

    #[test]
    fn color_follows_the_terminal() {
        assert!(!parse(&["nonogram"], false).unwrap().emit_color);
    }

    #[test]
    fn rejects_bad_numbers() {
        assert!(parse(&["nonogram", "--visual-groups", "many"], true).is_err());
        assert!(parse(&["nonogram", "--win-pause", "-1"], true).is_err());
    }
}
