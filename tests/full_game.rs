use bitcheckers::{GameState, Move, Player};
use rand::seq::SliceRandom;

fn assert_invariants(game: &GameState) {
    let boards = [
        game.men(Player::Red),
        game.kings(Player::Red),
        game.men(Player::Black),
        game.kings(Player::Black),
    ];
    for i in 0..boards.len() {
        for j in (i + 1)..boards.len() {
            assert_eq!(boards[i] & boards[j], 0, "piece boards {i} and {j} overlap");
        }
    }
    assert!(game.on_dark_squares(), "piece left the dark squares");
    assert!(game.piece_count(Player::Red) <= 12);
    assert!(game.piece_count(Player::Black) <= 12);
}

#[test]
fn scripted_capture_exchange() {
    let mut game = GameState::new();

    // Red advances, Black steps into range, Red jumps, Black recaptures.
    assert_eq!(game.make_move(Move::new(44, 37)), Ok(None));
    assert_eq!(game.make_move(Move::new(19, 28)), Ok(None));
    assert_eq!(game.make_move(Move::new(37, 19)), Ok(Some(28)));
    assert_eq!(game.piece_count(Player::Black), 11);
    assert_eq!(game.make_move(Move::new(12, 26)), Ok(Some(19)));
    assert_eq!(game.piece_count(Player::Red), 11);

    assert_eq!(game.current_player(), Player::Red);
    assert_eq!(game.winner(), None);
    assert_invariants(&game);
}

#[test]
fn random_games_preserve_invariants_and_oracle_agreement() {
    let mut rng = rand::thread_rng();

    for _ in 0..25 {
        let mut game = GameState::new();
        for _ply in 0..200 {
            for player in [Player::Red, Player::Black] {
                assert_eq!(
                    game.has_any_move(player),
                    !game.legal_moves(player).is_empty(),
                    "mobility oracle disagrees with move listing"
                );
            }
            assert_invariants(&game);

            if game.winner().is_some() {
                break;
            }
            // No winner means both sides still have moves, so the listing
            // for the side to move cannot be empty.
            let moves = game.legal_moves(game.current_player());
            let mv = *moves.choose(&mut rng).expect("side to move has a move");
            game.make_move(mv).expect("listed move is legal");
        }
    }
}

#[test]
fn won_positions_report_a_winner_from_either_perspective() {
    // Red's last piece gets captured: Black wins on material.
    let mut game = GameState::from_bitboards(
        1 << 35,
        0,
        1 << 28,
        0,
        Player::Black,
    );
    assert_eq!(game.winner(), None);
    assert_eq!(game.make_move(Move::new(28, 42)), Ok(Some(35)));
    assert_eq!(game.winner(), Some(Player::Black));
}
