//! Client-side board state.
//!
//! The server never stores board contents, so each client keeps its own copy
//! as the ordered list of drawing operations it has performed or received.
//! Undo and redo restore whole-board snapshots of this list.

use kokuban_shared::protocol::DrawPayload;

/// Immutable whole-board snapshot used by the undo/redo history.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardSnapshot(Vec<DrawPayload>);

/// The local rendition of the shared whiteboard.
#[derive(Debug, Default)]
pub struct Board {
    ops: Vec<DrawPayload>,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one drawing operation, local or relayed. A `clear` operation
    /// empties the board.
    pub fn apply(&mut self, op: DrawPayload) {
        if op.kind == "clear" {
            self.ops.clear();
        } else {
            self.ops.push(op);
        }
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Capture the current board contents.
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot(self.ops.clone())
    }

    /// Replace the board contents with a snapshot.
    pub fn restore(&mut self, snapshot: &BoardSnapshot) {
        self.ops = snapshot.0.clone();
    }

    /// Render the board as a textual operation list.
    pub fn render(&self) -> String {
        if self.ops.is_empty() {
            return "(empty board)\n".to_string();
        }
        let mut output = String::new();
        for (i, op) in self.ops.iter().enumerate() {
            output.push_str(&format!("{:>4}. {}\n", i + 1, describe_op(op)));
        }
        output
    }

    /// Render the board for export, framed with the Kokuban watermark.
    pub fn export_with_watermark(&self) -> String {
        format!(
            "============================================================\n\
             {}\
             ------------------------------------------------------------\n\
             Exported from Kokuban\n\
             ============================================================\n",
            self.render()
        )
    }
}

fn describe_op(op: &DrawPayload) -> String {
    match op.kind.as_str() {
        "text" => format!(
            "text {:?} at ({}, {})",
            op.text.as_deref().unwrap_or(""),
            op.x.unwrap_or(0.0),
            op.y.unwrap_or(0.0)
        ),
        _ => format!(
            "{} {} at ({}, {}) size {}",
            op.tool.as_deref().unwrap_or("pen"),
            op.color.as_deref().unwrap_or("#000000"),
            op.x.unwrap_or(0.0),
            op.y.unwrap_or(0.0),
            op.size.unwrap_or(1.0)
        ),
    }
}

/// Build a stroke payload for a local pen operation.
pub fn stroke(x: f64, y: f64) -> DrawPayload {
    DrawPayload {
        tool: Some("pen".to_string()),
        shape: None,
        color: Some("#000000".to_string()),
        size: Some(3.0),
        x: Some(x),
        y: Some(y),
        text: None,
        is_drawing: Some(true),
        kind: "drawing".to_string(),
    }
}

/// Build a text payload placed at the given coordinates.
pub fn text_op(x: f64, y: f64, text: String) -> DrawPayload {
    DrawPayload {
        tool: None,
        shape: None,
        color: Some("#000000".to_string()),
        size: None,
        x: Some(x),
        y: Some(y),
        text: Some(text),
        is_drawing: None,
        kind: "text".to_string(),
    }
}
