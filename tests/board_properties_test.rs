//! Tests for the properties of the generated boards and of the word matching.

use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::HashSet;

use cacapalavras::generator::scan;
use cacapalavras::hints::{self, HintOutcome};
use cacapalavras::validator;
use cacapalavras::words::bundled;
use cacapalavras::{
    Board, BoardGenerator, EngineConfig, EventSink, Game, PointerResult, WordConstraints,
};

fn words_and_board_for(level: u32, seed: u64) -> (Vec<String>, Board) {
    let mut rng: StdRng = StdRng::seed_from_u64(seed);
    let words: Vec<String> = bundled::pick(level, &WordConstraints::for_level(level, Vec::new()), &mut rng);
    let board: Board = BoardGenerator::default()
        .generate(&words, level, &mut rng)
        .unwrap_or_else(|e| panic!("level {level} seed {seed}: {e}"));
    (words, board)
}

fn board_for(level: u32, seed: u64) -> Board {
    words_and_board_for(level, seed).1
}

#[test]
fn test_placements_are_complete_and_sound() {
    for level in [1, 3, 5, 8, 11, 15] {
        for seed in 0..20 {
            let (words, board) = words_and_board_for(level, seed);
            let size: usize = board.grid.size();
            assert!(board.grid.is_full());
            assert!(
                board.dropped_words.is_empty(),
                "level {level} seed {seed}: dropped {:?}",
                board.dropped_words
            );
            assert_eq!(board.placed_words.len(), words.len());
            for p in &board.placed_words {
                assert_eq!(p.positions.len(), p.word.len());
                assert_eq!(board.grid.read(&p.positions), p.word);
                for pair in p.positions.windows(2) {
                    assert_eq!(pair[0].step(p.direction, 1, size), Some(pair[1]));
                }
                assert!(scan::find_occurrences(&board.grid, &p.word).contains(&p.positions));
            }
        }
    }
}

#[test]
fn test_selection_direction_does_not_matter() {
    let board: Board = board_for(4, 11);
    let found: HashSet<String> = HashSet::new();
    for p in &board.placed_words {
        let forward = validator::validate(&p.positions, &board.grid, &board.placed_words, &found);
        let reversed: Vec<_> = p.positions.iter().rev().copied().collect();
        let backward = validator::validate(&reversed, &board.grid, &board.placed_words, &found);
        assert_eq!(forward, backward);
        assert_eq!(forward.map(|m| m.word), Some(p.word.clone()));
    }
}

#[test]
fn test_word_is_counted_once() {
    let board: Board = board_for(2, 5);
    let mut game: Game = Game::new(board.clone(), &EngineConfig::default(), EventSink::disabled());
    game.start();
    let p = &board.placed_words[0];
    let mut results: Vec<PointerResult> = Vec::new();
    for _ in 0..3 {
        game.pointer_down(p.positions[0]);
        game.pointer_move(*p.positions.last().unwrap());
        results.push(game.pointer_up());
    }
    assert!(matches!(results[0], PointerResult::Found(_)));
    assert_eq!(results[1], PointerResult::NoMatch);
    assert_eq!(results[2], PointerResult::NoMatch);
    assert_eq!(game.found_words().len(), 1);
    assert_eq!(game.level_score(), EngineConfig::default().points.points(&p.word));
}

#[test]
fn test_hints_never_reveal_the_challenge_word() {
    for seed in 0..10 {
        let board: Board = board_for(6, seed);
        let challenge: String = board.challenge_word().unwrap().word.clone();
        let mut found: HashSet<String> = HashSet::new();
        // Reveal and find the words one by one until only the challenge word is left
        loop {
            match hints::request_hint(&board.placed_words, &found, Some(&challenge), None, 0, usize::MAX) {
                HintOutcome::Revealed { word, .. } => {
                    assert_ne!(word, challenge);
                    found.insert(word);
                }
                HintOutcome::Blocked => break,
                o => panic!("unexpected outcome {o:?}"),
            }
        }
        assert_eq!(found.len(), board.placed_words.len() - 1);
        assert!(!found.contains(&challenge));
    }
}

#[test]
fn test_stray_gestures_do_not_match() {
    let board: Board = board_for(1, 9);
    let mut game: Game = Game::new(board.clone(), &EngineConfig::default(), EventSink::disabled());
    game.start();
    let p = &board.placed_words[0];

    // One cell short of the word
    game.pointer_down(p.positions[0]);
    game.pointer_move(p.positions[p.positions.len() - 2]);
    assert_eq!(game.pointer_up(), PointerResult::NoMatch);

    // A tap is a one-cell selection
    game.pointer_down(p.positions[0]);
    assert_eq!(game.pointer_up(), PointerResult::NoMatch);

    // Cells out of the grid are ignored
    let outside = cacapalavras::Position::new(board.grid.size(), 0);
    assert_eq!(game.pointer_down(outside), PointerResult::Ignored);
    assert!(game.found_words().is_empty());
}
