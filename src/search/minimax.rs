use crate::evaluation;
use crate::game::engine::GameEngine;
use crate::pieces::Color;
use crate::rules::PseudoMove;

/// Finds the best move for the side to move at `depth` plies, falling back
/// to shallower depths if none is found (the position is immediately
/// terminal at every depth tried), down to 0. Returns `None` only when the
/// side to move has no legal move at all, i.e. the position is checkmate or
/// stalemate.
pub fn best_move(engine: &mut GameEngine, depth: u32) -> Option<(PseudoMove, f32)> {
    let mut remaining = depth;
    loop {
        let found = match engine.turn() {
            Color::White => max_search(engine, remaining, f32::NEG_INFINITY, f32::INFINITY),
            Color::Black => min_search(engine, remaining, f32::NEG_INFINITY, f32::INFINITY),
        };
        if found.is_some() {
            return found;
        }
        if remaining == 0 {
            return None;
        }
        remaining -= 1;
    }
}

/// White's ply: maximizes the white-relative evaluation. Mirrors `min_search`
/// with every comparison and terminal sign reversed.
fn max_search(
    engine: &mut GameEngine,
    depth: u32,
    mut alpha: f32,
    beta: f32,
) -> Option<(PseudoMove, f32)> {
    let mut best: Option<(PseudoMove, f32)> = None;
    for mv in engine.pseudo_legal_moves(Color::White) {
        if !engine.test_and_apply(mv) {
            continue;
        }
        let value = if depth > 1 {
            match min_search(engine, depth - 1, alpha, beta) {
                Some((_, v)) => v,
                // Black has no reply: if black's king is attacked, white has
                // just delivered mate (a maximal win for white); otherwise
                // it's a stalemate, which this evaluator scores as a loss for
                // white too, per the source's own (debatable) convention.
                None if engine.is_in_check(Color::Black) => f32::INFINITY,
                None => f32::NEG_INFINITY,
            }
        } else {
            evaluation::evaluate(engine.board())
        };
        alpha = alpha.max(value);
        engine.undo();
        if best.as_ref().map_or(true, |&(_, b)| value > b) {
            best = Some((mv, value));
        }
        if beta <= alpha {
            break;
        }
    }
    best
}

/// Black's ply: minimizes the white-relative evaluation.
fn min_search(
    engine: &mut GameEngine,
    depth: u32,
    alpha: f32,
    mut beta: f32,
) -> Option<(PseudoMove, f32)> {
    let mut best: Option<(PseudoMove, f32)> = None;
    for mv in engine.pseudo_legal_moves(Color::Black) {
        if !engine.test_and_apply(mv) {
            continue;
        }
        let value = if depth > 1 {
            match max_search(engine, depth - 1, alpha, beta) {
                Some((_, v)) => v,
                None if engine.is_in_check(Color::White) => f32::NEG_INFINITY,
                None => f32::INFINITY,
            }
        } else {
            evaluation::evaluate(engine.board())
        };
        beta = beta.min(value);
        engine.undo();
        if best.as_ref().map_or(true, |&(_, b)| value < b) {
            best = Some((mv, value));
        }
        if beta <= alpha {
            break;
        }
    }
    best
}
