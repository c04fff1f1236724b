//! Snapshot-based undo/redo history for the local board.
//!
//! The history is a list of whole-board snapshots with a cursor. Undo and
//! redo move the cursor; recording a new snapshot after an undo truncates
//! the abandoned redo tail. The history is unbounded and purely local: it
//! never produces network traffic.

use crate::board::BoardSnapshot;

/// Undo/redo history over board snapshots.
#[derive(Debug)]
pub struct BoardHistory {
    snapshots: Vec<BoardSnapshot>,
    /// Index of the snapshot representing the current board state.
    cursor: usize,
}

impl BoardHistory {
    /// Start a history at the given initial state (usually an empty board).
    pub fn new(initial: BoardSnapshot) -> Self {
        Self {
            snapshots: vec![initial],
            cursor: 0,
        }
    }

    /// Record the state reached after a local operation. Any redo tail
    /// beyond the cursor is discarded.
    pub fn record(&mut self, snapshot: BoardSnapshot) {
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push(snapshot);
        self.cursor += 1;
    }

    /// Step back one state. Returns the snapshot to restore, or `None` at
    /// the initial state.
    pub fn undo(&mut self) -> Option<&BoardSnapshot> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(&self.snapshots[self.cursor])
    }

    /// Step forward one state. Returns the snapshot to restore, or `None`
    /// when there is nothing to redo.
    pub fn redo(&mut self) -> Option<&BoardSnapshot> {
        if self.cursor + 1 >= self.snapshots.len() {
            return None;
        }
        self.cursor += 1;
        Some(&self.snapshots[self.cursor])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, stroke};

    fn board_with_strokes(n: usize) -> Board {
        let mut board = Board::new();
        for i in 0..n {
            board.apply(stroke(i as f64, i as f64));
        }
        board
    }

    #[test]
    fn test_undo_restores_previous_state() {
        // テスト項目: undo で1つ前の状態に戻る
        // given (前提条件):
        let mut board = Board::new();
        let mut history = BoardHistory::new(board.snapshot());
        board.apply(stroke(1.0, 1.0));
        history.record(board.snapshot());

        // when (操作):
        let snapshot = history.undo().unwrap().clone();
        board.restore(&snapshot);

        // then (期待する結果):
        assert!(board.is_empty());
    }

    #[test]
    fn test_undo_at_initial_state_returns_none() {
        // テスト項目: 初期状態での undo が None を返す
        // given (前提条件):
        let board = Board::new();
        let mut history = BoardHistory::new(board.snapshot());

        // when (操作) / then (期待する結果):
        assert!(history.undo().is_none());
    }

    #[test]
    fn test_redo_restores_undone_state() {
        // テスト項目: redo で undo した状態が復元される
        // given (前提条件):
        let mut board = board_with_strokes(0);
        let mut history = BoardHistory::new(board.snapshot());
        board.apply(stroke(1.0, 1.0));
        history.record(board.snapshot());
        let after_one = board.snapshot();
        let undone = history.undo().unwrap().clone();
        board.restore(&undone);

        // when (操作):
        let redone = history.redo().unwrap().clone();
        board.restore(&redone);

        // then (期待する結果):
        assert_eq!(board.snapshot(), after_one);
        assert!(history.redo().is_none());
    }

    #[test]
    fn test_new_record_after_undo_discards_redo_tail() {
        // テスト項目: undo 後の新規操作で redo 側の履歴が破棄される
        // given (前提条件):
        let mut board = Board::new();
        let mut history = BoardHistory::new(board.snapshot());
        board.apply(stroke(1.0, 1.0));
        history.record(board.snapshot());
        board.apply(stroke(2.0, 2.0));
        history.record(board.snapshot());

        let snapshot = history.undo().unwrap().clone();
        board.restore(&snapshot);

        // when (操作): diverge with a new stroke
        board.apply(stroke(9.0, 9.0));
        history.record(board.snapshot());

        // then (期待する結果):
        assert!(history.redo().is_none());
        let back = history.undo().unwrap().clone();
        board.restore(&back);
        assert_eq!(board.len(), 1);
    }

    #[test]
    fn test_history_survives_many_operations() {
        // テスト項目: 多数の操作を記録しても undo で全て遡れる
        // given (前提条件):
        let mut board = Board::new();
        let mut history = BoardHistory::new(board.snapshot());
        for i in 0..100 {
            board.apply(stroke(i as f64, 0.0));
            history.record(board.snapshot());
        }

        // when (操作):
        let mut undo_count = 0;
        while history.undo().is_some() {
            undo_count += 1;
        }

        // then (期待する結果):
        assert_eq!(undo_count, 100);
    }
}
