#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    Ok,
    Promote,
    Check,
    Checkmate,
    Stalemate,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MoveRejection {
    NotYourTurn,
    NoPieceAtSquare,
    NotYourPiece,
    IllegalMove,
    CastlingNotAllowed,
    KingStillChecked,
}

pub type MoveResult = Result<MoveOutcome, MoveRejection>;
