use super::engine::GameEngine;

impl GameEngine {
    /// Reverses the last applied move. If it was a castling move, the
    /// rook's companion movement is reversed in the same call rather than
    /// requiring a second history entry, since both halves were recorded
    /// together in the first place.
    pub fn undo(&mut self) {
        let record = match self.history.pop() {
            Some(r) => r,
            None => return,
        };

        self.board.set(record.to, None);
        self.board.set(record.from, Some(record.piece_before));

        if let Some((square, piece)) = record.captured {
            self.board.set(square, Some(piece));
        }

        if let Some(rook) = record.castling_rook {
            self.board.set(rook.to, None);
            self.board.set(rook.from, Some(rook.piece_before));
        }

        if record.piece_before.kind == crate::pieces::PieceKind::King {
            let index = match record.mover {
                crate::pieces::Color::White => 0,
                crate::pieces::Color::Black => 1,
            };
            self.king_squares[index] = record.from;
        }

        self.board.set_en_passant_target(
            self.history.last().and_then(|prev| prev.enables_en_passant),
        );

        self.turn = record.mover;
    }

    /// Undoes the last two moves that altered the board, unless both
    /// players are human, in which case a single undo is enough to hand the
    /// move back to the player who just made it.
    pub fn double_undo(&mut self, both_human: bool) {
        if both_human {
            self.undo();
        } else {
            self.undo();
            self.undo();
        }
    }
}
