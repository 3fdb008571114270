//! Property tests over board geometry, move generation, and recording.

use proptest::prelude::*;

use onepeg::board::{position_count, Board, Configuration, MAX_SIZE};
use onepeg::game::{replay, Game};
use onepeg::movegen::{is_legal_move, jumped_position, legal_moves, FirstMove, RandomMoves};
use onepeg::protocol::{
    merge_into_corpus, parse_corpus_key, parse_move_notation, record_move,
    serialize_configuration, Corpus, RecordError,
};
use onepeg::resolve::apply_move;
use rand::rngs::SmallRng;
use rand::SeedableRng;

/// A board of side length 1..=9 with arbitrary fill flags.
fn any_board() -> impl Strategy<Value = Board> {
    (1usize..=9).prop_flat_map(|size| {
        prop::collection::vec(any::<bool>(), position_count(size)).prop_map(move |cells| {
            Board::from_configuration(size, &Configuration::new(cells)).unwrap()
        })
    })
}

proptest! {
    #[test]
    fn position_count_is_triangular(size in 1usize..=40) {
        let board = Board::new(size).unwrap();
        prop_assert_eq!(board.position_count(), size * (size + 1) / 2);
    }

    #[test]
    fn adjacency_is_symmetric(size in 1usize..=12) {
        let board = Board::new(size).unwrap();
        for p in 0..board.position_count() {
            for &q in board.adjacent_positions(p).unwrap() {
                prop_assert!(board.adjacent_positions(q).unwrap().contains(&p));
            }
            prop_assert!(board.adjacent_positions(p).unwrap().len() <= 6);
        }
    }

    #[test]
    fn legal_moves_have_one_filled_shared_neighbor(board in any_board()) {
        for mv in legal_moves(&board) {
            let shared = board.shared_neighbors(mv.start, mv.end).unwrap();
            prop_assert_eq!(shared, vec![mv.over]);
            prop_assert!(board.is_filled(mv.over).unwrap());
            prop_assert!(!board.is_adjacent(mv.start, mv.end).unwrap());
            prop_assert_eq!(jumped_position(&board, mv.start, mv.end), Ok(mv.over));
        }
    }

    #[test]
    fn enumeration_agrees_with_pair_scan(board in any_board()) {
        let mut walked: Vec<_> = legal_moves(&board).iter().map(|m| m.endpoints()).collect();
        let before = walked.len();
        walked.sort();
        walked.dedup();
        prop_assert_eq!(walked.len(), before);

        let n = board.position_count();
        let mut scanned = Vec::new();
        for s in 0..n {
            for e in 0..n {
                if is_legal_move(&board, s, e).unwrap() {
                    scanned.push((s, e));
                }
            }
        }
        prop_assert_eq!(walked, scanned);
    }

    #[test]
    fn apply_removes_exactly_one_peg(board in any_board(), pick in any::<prop::sample::Index>()) {
        let moves = legal_moves(&board);
        prop_assume!(!moves.is_empty());
        let mv = moves[pick.index(moves.len())];
        let mut after = board.clone();
        apply_move(&mut after, mv.start, mv.end).unwrap();
        prop_assert_eq!(after.filled_count(), board.filled_count() - 1);
    }

    #[test]
    fn notation_round_trip(size in 3usize..=8, seed in any::<u64>(), plies in 0usize..6) {
        let mut game = Game::standard(size).unwrap();
        let mut source = RandomMoves::new(SmallRng::seed_from_u64(seed));
        for _ in 0..plies {
            if game.step(&mut source).unwrap().is_none() {
                break;
            }
        }
        let legal = legal_moves(game.board());
        prop_assume!(!legal.is_empty());
        let mv = legal[0];
        let mut board = game.board().clone();
        apply_move(&mut board, mv.start, mv.end).unwrap();

        let text = record_move(mv.start, mv.end, &board).to_string();
        let parsed = parse_move_notation(&text, board.position_count()).unwrap();
        prop_assert_eq!((parsed.start, parsed.end), (mv.start, mv.end));
        prop_assert_eq!(parsed.configuration.to_string(), serialize_configuration(&board));
    }

    #[test]
    fn random_games_replay_and_score(size in 3usize..=7, seed in any::<u64>()) {
        let mut game = Game::standard(size).unwrap();
        let score = game.run(&mut RandomMoves::new(SmallRng::seed_from_u64(seed))).unwrap();
        prop_assert!(legal_moves(game.board()).is_empty());
        prop_assert_eq!(score, game.board().filled_positions().count());
        prop_assert!(score >= 1);

        let record = game.record();
        let replayed = replay(&record).unwrap();
        prop_assert_eq!(replayed.board(), game.board());
    }

    #[test]
    fn merge_is_additive(a in 1usize..6, b in 1usize..6) {
        let mut game = Game::standard(5).unwrap();
        game.run(&mut FirstMove).unwrap();
        let record = game.record();

        let mut left = Corpus::new();
        for _ in 0..a {
            merge_into_corpus(&mut left, &record).unwrap();
        }
        let snapshot = left.clone();
        for _ in 0..b {
            merge_into_corpus(&mut left, &record).unwrap();
        }

        let games = &left.get(&record.key()).unwrap().games;
        prop_assert_eq!(games.len(), a + b);
        let original = &snapshot.get(&record.key()).unwrap().games;
        prop_assert_eq!(&games[..a], &original[..]);
    }

    #[test]
    fn oversized_keys_are_rejected_not_panicking(size in (MAX_SIZE + 1)..usize::MAX) {
        let key = format!("{}-F", size);
        prop_assert_eq!(parse_corpus_key(&key), Err(RecordError::InvalidKey(key.clone())));
        prop_assert!(Board::new(size).is_err());
    }
}

#[test]
fn standard_boards_open_with_moves() {
    for size in 3..=12 {
        let board = Board::standard(size).unwrap();
        let moves = legal_moves(&board);
        assert!(!moves.is_empty(), "size {}", size);
        assert!(moves.iter().all(|m| m.end == 0));
    }
}
