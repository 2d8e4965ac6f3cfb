//! Property tests for the move resolver, injector and game-over check,
//! run over randomly generated 4x4 boards.
use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use twenty48_engine::engine::{Board, Direction, BOARD_SIZE};
use twenty48_engine::spawn::inject;

fn arb_board() -> impl Strategy<Value = Board> {
    prop::collection::vec(prop::option::of(1u32..12), BOARD_SIZE * BOARD_SIZE).prop_map(|cells| {
        let rows = cells
            .chunks(BOARD_SIZE)
            .map(|row| row.iter().map(|e| e.map(|exp| 1u32 << exp)).collect())
            .collect();
        Board::from_rows(rows).expect("generated tiles are powers of two")
    })
}

fn arb_full_board() -> impl Strategy<Value = Board> {
    prop::collection::vec(1u32..4, BOARD_SIZE * BOARD_SIZE).prop_map(|exps| {
        let rows = exps
            .chunks(BOARD_SIZE)
            .map(|row| row.iter().map(|&exp| Some(1u32 << exp)).collect())
            .collect();
        Board::from_rows(rows).expect("generated tiles are powers of two")
    })
}

fn arb_direction() -> impl Strategy<Value = Direction> {
    prop::sample::select(Direction::ALL.to_vec())
}

/// The non-empty values of each line, read in travel order.
fn lines(board: &Board, direction: Direction) -> Vec<Vec<u32>> {
    let rows = board.rows();
    let n = board.size();
    (0..n)
        .map(|i| {
            let line: Vec<Option<u32>> = match direction {
                Direction::Left => rows[i].clone(),
                Direction::Right => rows[i].iter().rev().copied().collect(),
                Direction::Up => (0..n).map(|r| rows[r][i]).collect(),
                Direction::Down => (0..n).rev().map(|r| rows[r][i]).collect(),
            };
            line.into_iter().flatten().collect()
        })
        .collect()
}

proptest! {
    #[test]
    fn score_delta_is_even_and_mass_is_accounted(board in arb_board(), direction in arb_direction()) {
        let outcome = board.resolve(direction);
        prop_assert_eq!(outcome.score_delta % 2, 0);
        // Tile values are conserved; the score counts each merge result once.
        prop_assert_eq!(outcome.board.tile_sum(), board.tile_sum());
        prop_assert_eq!(outcome.changed, outcome.board != board);
    }

    #[test]
    fn repeating_a_move_without_merges_is_a_noop(board in arb_board(), direction in arb_direction()) {
        let first = board.resolve(direction);
        let second = first.board.resolve(direction);
        if second.score_delta == 0 {
            prop_assert_eq!(&second.board, &first.board);
            prop_assert!(!second.changed);
        }
    }

    #[test]
    fn move_without_merges_preserves_line_order(board in arb_board(), direction in arb_direction()) {
        let outcome = board.resolve(direction);
        if outcome.score_delta == 0 {
            prop_assert_eq!(lines(&outcome.board, direction), lines(&board, direction));
        }
    }

    #[test]
    fn tiles_end_up_flush_against_the_leading_edge(board in arb_board(), direction in arb_direction()) {
        let outcome = board.resolve(direction);
        let n = outcome.board.size();
        for i in 0..n {
            let line: Vec<Option<u32>> = (0..n)
                .map(|k| match direction {
                    Direction::Left => outcome.board.get_tile(i, k),
                    Direction::Right => outcome.board.get_tile(i, n - 1 - k),
                    Direction::Up => outcome.board.get_tile(k, i),
                    Direction::Down => outcome.board.get_tile(n - 1 - k, i),
                })
                .collect();
            let filled = line.iter().take_while(|c| c.is_some()).count();
            prop_assert!(line[filled..].iter().all(Option::is_none));
        }
    }

    #[test]
    fn is_over_matches_no_move_changes_board(board in arb_full_board()) {
        let stuck = Direction::ALL.iter().all(|&d| !board.resolve(d).changed);
        prop_assert_eq!(board.is_over(), board.is_full() && stuck);
    }

    #[test]
    fn board_with_empty_cell_is_never_over(board in arb_board()) {
        if !board.is_full() {
            prop_assert!(!board.is_over());
        }
    }

    #[test]
    fn inject_fills_one_empty_cell(board in arb_board(), seed in any::<u64>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let next = inject(&board, &mut rng);
        if board.is_full() {
            prop_assert_eq!(next, board);
        } else {
            prop_assert_eq!(next.empty_cells().len(), board.empty_cells().len() - 1);
            let added = next.tile_sum() - board.tile_sum();
            prop_assert!(added == 2 || added == 4);
        }
    }
}
