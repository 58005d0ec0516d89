use crate::board::Coord;

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum CastlingSide {
    Short,
    Long,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NormalMove {
    pub from: Coord,
    pub to: Coord,
}

impl NormalMove {
    pub fn new(from: Coord, to: Coord) -> Self {
        NormalMove { from, to }
    }

    pub fn squares(&self) -> (Coord, Coord) {
        (self.from, self.to)
    }
}

/// A move as requested by a player, before it has been validated against the
/// board. Promotion always resolves to a queen, so there is no separate
/// choice of promotion piece to carry here.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerMove {
    Normal(NormalMove),
    Castling(CastlingSide),
}

impl PlayerMove {
    pub fn normal(from: Coord, to: Coord) -> Self {
        PlayerMove::Normal(NormalMove::new(from, to))
    }
}
