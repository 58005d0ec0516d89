use crate::board::Board;
use crate::pieces::{Color, Piece, PieceKind};

fn piece_to_char(piece: Piece) -> char {
    let c = match piece.kind {
        PieceKind::King => 'K',
        PieceKind::Queen => 'Q',
        PieceKind::Rook => 'R',
        PieceKind::Bishop => 'B',
        PieceKind::Knight => 'N',
        PieceKind::Pawn => 'P',
    };
    if piece.color == Color::White {
        c
    } else {
        c.to_ascii_lowercase()
    }
}

/// Dumps the board to stdout, rank 8 at the top, files a-h across. Plain
/// text, no ANSI backgrounds; useful from a test or a `main.rs` scratch run,
/// never called from the search itself.
pub fn print_board(board: &Board) {
    print!("   ");
    for file in 1..=8 {
        print!(" {} ", (b'a' + (file - 1) as u8) as char);
    }
    println!();

    for rank in (1..=8).rev() {
        print!(" {} ", rank);
        for file in 1..=8 {
            let square = crate::board::Coord::new(rank, file);
            match board.piece_at(square) {
                Some(piece) => print!(" {} ", piece_to_char(piece)),
                None => print!(" . "),
            }
        }
        println!();
    }
}
