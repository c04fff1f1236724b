//! Parsing of interactive whiteboard commands.
//!
//! Lines starting with `/` are commands; anything else is a chat message.

/// One parsed input line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Create a meeting, optionally password protected.
    Create { password: String },
    /// Join an existing meeting by code.
    Join { meeting_id: String },
    /// Check a meeting password before joining.
    Validate { meeting_id: String, password: String },
    /// Draw a pen stroke at the given coordinates.
    Draw { x: f64, y: f64 },
    /// Place text at the given coordinates.
    Text { x: f64, y: f64, text: String },
    /// Clear the whole board.
    Clear,
    /// Remove a participant (host only).
    Kick { username: String },
    /// Lock or unlock the board (host only).
    Lock { is_locked: bool },
    /// Undo the last local operation.
    Undo,
    /// Redo the last undone operation.
    Redo,
    /// Print the current board.
    Board,
    /// Print the board with the export watermark.
    Export,
    /// Exit the client.
    Quit,
    /// Send a chat message.
    Chat { message: String },
    /// Unrecognized or malformed command.
    Invalid { reason: String },
}

/// Parse one input line. The line is expected to be trimmed and non-empty.
pub fn parse(line: &str) -> Command {
    if !line.starts_with('/') {
        return Command::Chat {
            message: line.to_string(),
        };
    }

    let mut parts = line.split_whitespace();
    let head = parts.next().unwrap_or("");
    match head {
        "/create" => Command::Create {
            password: parts.next().unwrap_or("").to_string(),
        },
        "/join" => match parts.next() {
            Some(code) => Command::Join {
                meeting_id: code.to_string(),
            },
            None => Command::Invalid {
                reason: "usage: /join CODE".to_string(),
            },
        },
        "/validate" => match (parts.next(), parts.next()) {
            (Some(code), Some(password)) => Command::Validate {
                meeting_id: code.to_string(),
                password: password.to_string(),
            },
            _ => Command::Invalid {
                reason: "usage: /validate CODE PASSWORD".to_string(),
            },
        },
        "/draw" => match parse_coords(parts.next(), parts.next()) {
            Some((x, y)) => Command::Draw { x, y },
            None => Command::Invalid {
                reason: "usage: /draw X Y".to_string(),
            },
        },
        "/text" => {
            let coords = parse_coords(parts.next(), parts.next());
            let rest: Vec<&str> = parts.collect();
            match coords {
                Some((x, y)) if !rest.is_empty() => Command::Text {
                    x,
                    y,
                    text: rest.join(" "),
                },
                _ => Command::Invalid {
                    reason: "usage: /text X Y MESSAGE".to_string(),
                },
            }
        }
        "/clear" => Command::Clear,
        "/kick" => match parts.next() {
            Some(name) => Command::Kick {
                username: name.to_string(),
            },
            None => Command::Invalid {
                reason: "usage: /kick NAME".to_string(),
            },
        },
        "/lock" => Command::Lock { is_locked: true },
        "/unlock" => Command::Lock { is_locked: false },
        "/undo" => Command::Undo,
        "/redo" => Command::Redo,
        "/board" => Command::Board,
        "/export" => Command::Export,
        "/quit" => Command::Quit,
        other => Command::Invalid {
            reason: format!("unknown command: {}", other),
        },
    }
}

fn parse_coords(x: Option<&str>, y: Option<&str>) -> Option<(f64, f64)> {
    let x = x?.parse().ok()?;
    let y = y?.parse().ok()?;
    Some((x, y))
}
