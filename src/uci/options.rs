use std::time::Duration;

use chess::Color;

use super::UciError;
use crate::engine::{Difficulty, SelectorConfig};

/// Largest depth accepted through `setoption` or `go depth`.
pub const MAX_UCI_DEPTH: u32 = 10;

/// Largest per-move budget accepted through `setoption`, in milliseconds.
pub const MAX_MOVE_TIME_MS: u64 = 60_000;

/// Moves assumed left in the game when `go` only gives clock times.
pub const DEFAULT_MOVES_TO_GO: u32 = 30;

/// Options a GUI can change with `setoption`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct UciOptions {
    pub config: SelectorConfig,
}

impl UciOptions {
    /// Reply to the `uci` command.
    #[must_use]
    pub fn describe(&self) -> Vec<String> {
        vec![
            format!("id name {} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
            "id author chess_bot developers".to_string(),
            format!(
                "option name Depth type spin default {} min 1 max {MAX_UCI_DEPTH}",
                self.config.max_depth
            ),
            format!(
                "option name MoveTime type spin default {} min 1 max {MAX_MOVE_TIME_MS}",
                self.config.time_budget.as_millis()
            ),
            format!(
                "option name OwnBook type check default {}",
                self.config.use_book
            ),
            "option name Difficulty type combo default hard var easy var medium var hard"
                .to_string(),
            "uciok".to_string(),
        ]
    }

    pub fn apply_setoption(&mut self, name: &str, value: Option<&str>) -> Result<(), UciError> {
        let invalid = || UciError::InvalidOption {
            name: name.to_string(),
            value: value.map(str::to_string),
        };
        let value = value.map(str::trim);

        match name.trim().to_ascii_lowercase().as_str() {
            "depth" => {
                let depth = value
                    .and_then(|v| v.parse::<u32>().ok())
                    .ok_or_else(invalid)?;
                self.config.max_depth = depth.clamp(1, MAX_UCI_DEPTH);
            }
            "movetime" => {
                let ms = value
                    .and_then(|v| v.parse::<u64>().ok())
                    .ok_or_else(invalid)?;
                self.config.time_budget = Duration::from_millis(ms.clamp(1, MAX_MOVE_TIME_MS));
            }
            "ownbook" => {
                self.config.use_book = match value.map(str::to_ascii_lowercase).as_deref() {
                    Some("true" | "1") => true,
                    Some("false" | "0") => false,
                    _ => return Err(invalid()),
                };
            }
            "difficulty" => {
                let level: Difficulty = value.ok_or_else(invalid)?.parse()?;
                let preset = level.config();
                self.config.max_depth = preset.max_depth;
                self.config.time_budget = preset.time_budget;
            }
            _ => return Err(UciError::UnknownOption(name.to_string())),
        }
        log::debug!("option {name} set, now {:?}", self.config);
        Ok(())
    }

    /// Selector configuration for one `go` command.
    ///
    /// `depth` and `movetime` override the options; clock times are spread
    /// over [`DEFAULT_MOVES_TO_GO`] moves plus the increment.
    #[must_use]
    pub fn go_config(&self, parts: &[&str], side: Color) -> SelectorConfig {
        let mut config = self.config;
        let mut movetime = None;
        let mut time_left = None;
        let mut inc = Duration::ZERO;

        let millis = |i: usize| {
            parts
                .get(i + 1)
                .and_then(|v| v.parse::<u64>().ok())
                .map(Duration::from_millis)
        };

        let mut i = 1;
        while i < parts.len() {
            match (parts[i], side) {
                ("depth", _) => {
                    if let Some(depth) = parts.get(i + 1).and_then(|v| v.parse::<u32>().ok()) {
                        config.max_depth = depth.clamp(1, MAX_UCI_DEPTH);
                    }
                    i += 2;
                }
                ("movetime", _) => {
                    movetime = millis(i);
                    i += 2;
                }
                ("wtime", Color::White) | ("btime", Color::Black) => {
                    time_left = millis(i);
                    i += 2;
                }
                ("winc", Color::White) | ("binc", Color::Black) => {
                    inc = millis(i).unwrap_or(Duration::ZERO);
                    i += 2;
                }
                ("wtime" | "btime" | "winc" | "binc" | "movestogo", _) => i += 2,
                _ => i += 1,
            }
        }

        if let Some(budget) = movetime {
            config.time_budget = budget.max(Duration::from_millis(1));
        } else if let Some(left) = time_left {
            config.time_budget = (left / DEFAULT_MOVES_TO_GO + inc).max(Duration::from_millis(1));
        }
        config
    }
}

#[must_use]
pub fn parse_setoption(parts: &[&str]) -> Option<(String, Option<String>)> {
    if parts.first() != Some(&"setoption") {
        return None;
    }

    let mut name_parts: Vec<&str> = Vec::new();
    let mut value_parts: Vec<&str> = Vec::new();
    let mut mode = "";

    for part in parts.iter().skip(1) {
        match *part {
            "name" => mode = "name",
            "value" => mode = "value",
            _ => match mode {
                "name" => name_parts.push(part),
                "value" => value_parts.push(part),
                _ => {}
            },
        }
    }

    if name_parts.is_empty() {
        return None;
    }

    let name = name_parts.join(" ");
    let value = if value_parts.is_empty() {
        None
    } else {
        Some(value_parts.join(" "))
    };

    Some((name, value))
}
