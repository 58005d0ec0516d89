use chessbrain_core::prelude::*;

fn main() {
    let mut game = Game::new(GameConfig {
        black_player: PlayerKind::Computer,
        depth: 2,
        ..GameConfig::default()
    });

    println!("Starting position:");
    print_board(game.board());

    let result = game.try_human_move(Color::White, Coord::new(2, 5), Coord::new(4, 5));
    println!("e2-e4: {:?}", result);

    let result = game.computer_move();
    println!("computer reply: {:?}", result);

    print_board(game.board());
    println!("status: {:?}", game.game_status());
}
