/// A line of input from the GUI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UciCommand {
    Uci,
    IsReady,
    UciNewGame,
    Position(Vec<String>),
    Go(Vec<String>),
    SetOption(Vec<String>),
    /// Print the static evaluation of the current position.
    Eval,
    /// Print the current position as FEN.
    Display,
    Stop,
    Quit,
    Unknown(String),
}

/// Parse one input line. Blank lines yield `None`.
#[must_use]
pub fn parse_uci_command(line: &str) -> Option<UciCommand> {
    let trimmed = line.trim();
    let parts: Vec<&str> = trimmed.split_whitespace().collect();
    let first = *parts.first()?;

    let owned_parts = || parts.iter().map(|p| (*p).to_string()).collect::<Vec<String>>();

    let cmd = match first {
        "uci" => UciCommand::Uci,
        "isready" => UciCommand::IsReady,
        "ucinewgame" => UciCommand::UciNewGame,
        "position" => UciCommand::Position(owned_parts()),
        "go" => UciCommand::Go(owned_parts()),
        "setoption" => UciCommand::SetOption(owned_parts()),
        "eval" => UciCommand::Eval,
        "d" => UciCommand::Display,
        "stop" => UciCommand::Stop,
        "quit" => UciCommand::Quit,
        _ => UciCommand::Unknown(trimmed.to_string()),
    };

    Some(cmd)
}
