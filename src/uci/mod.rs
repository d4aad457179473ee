//! Universal Chess Interface (UCI) front end.
//!
//! A line-oriented session around one [`Game`]. `go` runs the move selector
//! on a worker thread so the session keeps answering `isready` while the bot
//! thinks; commands that touch the game wait for that search first.

use std::fmt;
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use parking_lot::Mutex;

use crate::engine::{MoveSelector, SelectorConfig, Selection, UnknownDifficulty};
use crate::eval::{Evaluator, HeuristicEvaluator};
use crate::rules::{Game, Position, RulesError};
use crate::search::{Score, MATE_THRESHOLD};

pub mod command;
pub mod options;

use command::{parse_uci_command, UciCommand};
use options::{parse_setoption, UciOptions};

/// Search thread stack size (8 MB)
const SEARCH_STACK_SIZE: usize = 8 * 1024 * 1024;

/// Error type for UCI command handling
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UciError {
    /// Invalid FEN or move reported by the rules layer
    Rules(RulesError),
    /// Invalid move in the move list
    InvalidMove { move_str: String, error: RulesError },
    /// Missing required parts in the command
    MissingParts,
    /// Option value that could not be applied
    InvalidOption { name: String, value: Option<String> },
    UnknownOption(String),
    Difficulty(UnknownDifficulty),
    UnknownCommand(String),
}

impl fmt::Display for UciError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UciError::Rules(e) => write!(f, "{e}"),
            UciError::InvalidMove { move_str, error } => {
                write!(f, "Invalid move '{move_str}': {error}")
            }
            UciError::MissingParts => write!(f, "Missing required parts in command"),
            UciError::InvalidOption { name, value } => match value {
                Some(value) => write!(f, "Invalid value '{value}' for option '{name}'"),
                None => write!(f, "Missing value for option '{name}'"),
            },
            UciError::UnknownOption(name) => write!(f, "Unknown option '{name}'"),
            UciError::Difficulty(e) => write!(f, "{e}"),
            UciError::UnknownCommand(line) => write!(f, "Unknown command '{line}'"),
        }
    }
}

impl std::error::Error for UciError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            UciError::Rules(e) | UciError::InvalidMove { error: e, .. } => Some(e),
            UciError::Difficulty(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RulesError> for UciError {
    fn from(e: RulesError) -> Self {
        UciError::Rules(e)
    }
}

impl From<UnknownDifficulty> for UciError {
    fn from(e: UnknownDifficulty) -> Self {
        UciError::Difficulty(e)
    }
}

/// Parse a UCI position command into a fresh game.
///
/// Supports both "position startpos" and "position fen <fen>" formats,
/// optionally followed by "moves <move1> <move2> ...".
pub fn try_parse_position_command(parts: &[&str]) -> Result<Game, UciError> {
    let mut i = 1;

    let mut game = match parts.get(i) {
        Some(&"startpos") => {
            i += 1;
            Game::new()
        }
        Some(&"fen") => {
            let end = parts[i + 1..]
                .iter()
                .position(|p| *p == "moves")
                .map_or(parts.len(), |offset| i + 1 + offset);
            if end == i + 1 {
                return Err(UciError::MissingParts);
            }
            let game = Game::from_fen(&parts[i + 1..end].join(" "))?;
            i = end;
            game
        }
        _ => return Err(UciError::MissingParts),
    };

    if parts.get(i) == Some(&"moves") {
        for move_str in &parts[i + 1..] {
            game.play_uci(move_str)
                .map_err(|error| UciError::InvalidMove {
                    move_str: (*move_str).to_string(),
                    error,
                })?;
        }
    }

    Ok(game)
}

/// `info` line describing a finished selection, if it searched at all.
#[must_use]
pub fn format_info(selection: &Selection) -> Option<String> {
    let score = selection.score?;
    let best = selection.best_move?;
    Some(format!(
        "info depth {} score {} nodes {} time {} pv {best}",
        selection.depth,
        format_score(score, selection.depth),
        selection.nodes,
        selection.elapsed.as_millis(),
    ))
}

/// UCI score token for a root score in pawn units.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn format_score(score: Score, depth: u32) -> String {
    if score.abs() > MATE_THRESHOLD {
        // Mates are only detected inside the searched horizon
        let moves = i64::from(depth.div_ceil(2).max(1));
        let moves = if score > 0.0 { moves } else { -moves };
        format!("mate {moves}")
    } else {
        format!("cp {}", (score * 100.0).round() as i64)
    }
}

#[must_use]
pub fn format_bestmove(selection: &Selection) -> String {
    match selection.best_move {
        Some(mv) => format!("bestmove {mv}"),
        None => "bestmove 0000".to_string(),
    }
}

/// Whether the session should keep reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// One UCI conversation writing its replies to `W`.
pub struct UciSession<W: Write + Send + 'static> {
    out: Arc<Mutex<W>>,
    game: Game,
    options: UciOptions,
    search: Option<JoinHandle<()>>,
}

impl<W: Write + Send + 'static> UciSession<W> {
    pub fn new(out: W) -> Self {
        UciSession {
            out: Arc::new(Mutex::new(out)),
            game: Game::new(),
            options: UciOptions::default(),
            search: None,
        }
    }

    #[must_use]
    pub fn game(&self) -> &Game {
        &self.game
    }

    #[must_use]
    pub fn options(&self) -> &UciOptions {
        &self.options
    }

    /// Shared handle to the output sink.
    #[must_use]
    pub fn output(&self) -> Arc<Mutex<W>> {
        Arc::clone(&self.out)
    }

    fn emit(&self, line: &str) {
        emit(&self.out, line);
    }

    /// Block until the running search, if any, has printed its best move.
    pub fn wait(&mut self) {
        if let Some(handle) = self.search.take() {
            if handle.join().is_err() {
                log::error!("search thread panicked");
            }
        }
    }

    /// Handle one input line.
    pub fn handle_line(&mut self, line: &str) -> Result<Flow, UciError> {
        let Some(command) = parse_uci_command(line) else {
            return Ok(Flow::Continue);
        };
        log::trace!("<< {command:?}");

        match command {
            UciCommand::Uci => {
                for line in self.options.describe() {
                    self.emit(&line);
                }
            }
            UciCommand::IsReady => self.emit("readyok"),
            UciCommand::UciNewGame => {
                self.wait();
                self.game = Game::new();
            }
            UciCommand::Position(parts) => {
                self.wait();
                let parts: Vec<&str> = parts.iter().map(String::as_str).collect();
                self.game = try_parse_position_command(&parts)?;
            }
            UciCommand::Go(parts) => {
                self.wait();
                let parts: Vec<&str> = parts.iter().map(String::as_str).collect();
                let config = self.options.go_config(&parts, self.game.side_to_move());
                self.search = self.spawn_search(config);
            }
            UciCommand::SetOption(parts) => {
                let parts: Vec<&str> = parts.iter().map(String::as_str).collect();
                let (name, value) = parse_setoption(&parts).ok_or(UciError::MissingParts)?;
                self.options.apply_setoption(&name, value.as_deref())?;
            }
            UciCommand::Eval => {
                self.wait();
                self.emit(&self.describe_eval());
            }
            UciCommand::Display => {
                self.wait();
                self.emit(&format!("info string fen {}", self.game.fen()));
            }
            // Searches are bounded by their time budget; stop just waits
            UciCommand::Stop => self.wait(),
            UciCommand::Quit => {
                self.wait();
                return Ok(Flow::Quit);
            }
            UciCommand::Unknown(line) => return Err(UciError::UnknownCommand(line)),
        }
        Ok(Flow::Continue)
    }

    fn describe_eval(&self) -> String {
        let score = HeuristicEvaluator.evaluate(&self.game);
        match HeuristicEvaluator.breakdown(&self.game) {
            Some(terms) => format!(
                "info string eval {score:.2} material {} mobility {} pawns {}",
                terms.material, terms.mobility, terms.pawn_structure
            ),
            None => format!("info string eval {score:.2} ({:?})", self.game.status()),
        }
    }

    fn spawn_search(&self, config: SelectorConfig) -> Option<JoinHandle<()>> {
        let mut game = self.game.clone();
        let out = Arc::clone(&self.out);
        let mut task = move || {
            let selection = MoveSelector::new(config).select(&mut game);
            if let Some(info) = format_info(&selection) {
                emit(&out, &info);
            }
            emit(&out, &format_bestmove(&selection));
        };

        match thread::Builder::new()
            .name("search".to_string())
            .stack_size(SEARCH_STACK_SIZE)
            .spawn(task.clone())
        {
            Ok(handle) => Some(handle),
            Err(e) => {
                log::warn!("could not spawn search thread ({e}), searching inline");
                task();
                None
            }
        }
    }
}

fn emit<W: Write>(out: &Mutex<W>, line: &str) {
    let mut out = out.lock();
    if let Err(e) = writeln!(out, "{line}").and_then(|()| out.flush()) {
        log::warn!("failed to write '{line}': {e}");
    }
}

/// Run a UCI session over stdin and stdout until `quit` or end of input.
pub fn run_uci_loop() {
    let stdin = io::stdin();
    let mut session = UciSession::new(io::stdout());

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                log::error!("failed to read input: {e}");
                break;
            }
        };
        match session.handle_line(&line) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(e) => {
                log::warn!("{e}");
                session.emit(&format!("info string error {e}"));
            }
        }
    }
    session.wait();
}
