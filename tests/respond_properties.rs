//! Exhaustive checks of how the built-in rules classify and answer boards.

mod common;

use common::{all_boards, board, complete_lines, full_boards};
use perceptris::{
    rules::{RuleNetwork, Situation},
    tictactoe::{BOARD_CELLS, Board, Cell, completing_cells},
};

fn rules(seed: u64) -> RuleNetwork {
    RuleNetwork::new(Some(seed)).unwrap()
}

fn with_circle(board: &Board, pos: usize) -> Board {
    board.place(pos, Cell::Circle).unwrap()
}

#[test]
fn test_single_circle_line_is_computer_victory() {
    let mut rules = rules(1);
    let mut checked = 0;
    for input in all_boards().filter(|b| {
        complete_lines(b, Cell::Circle) == 1 && complete_lines(b, Cell::Star) == 0
    }) {
        let response = rules.respond(&input).unwrap();
        assert_eq!(response.situation, Situation::ComputerVictory, "{input}");
        assert_eq!(response.to, input, "board changed for\n{input}");
        checked += 1;
    }
    assert!(checked > 0);
}

#[test]
fn test_single_star_line_is_human_victory() {
    let mut rules = rules(2);
    for input in all_boards().filter(|b| {
        complete_lines(b, Cell::Star) == 1 && complete_lines(b, Cell::Circle) == 0
    }) {
        let response = rules.respond(&input).unwrap();
        assert_eq!(response.situation, Situation::HumanVictory, "{input}");
    }
}

#[test]
fn test_five_four_split_without_line_is_tie() {
    let mut rules = rules(3);
    let mut checked = 0;
    for input in full_boards().filter(|b| {
        let (circles, stars) = (b.count(Cell::Circle), b.count(Cell::Star));
        circles.min(stars) == 4
            && complete_lines(b, Cell::Circle) == 0
            && complete_lines(b, Cell::Star) == 0
    }) {
        let response = rules.respond(&input).unwrap();
        assert_eq!(response.situation, Situation::Tie, "{input}");
        assert_eq!(response.to, input);
        checked += 1;
    }
    // both splits occur among the drawn positions
    assert!(checked >= 2);
}

#[test]
fn test_one_open_circle_line_is_completed() {
    let mut rules = rules(4);
    for input in all_boards() {
        let open = completing_cells(&input, Cell::Circle);
        if open.len() != 1
            || complete_lines(&input, Cell::Circle) > 0
            || complete_lines(&input, Cell::Star) > 0
        {
            continue;
        }
        let response = rules.respond(&input).unwrap();
        assert_eq!(response.situation, Situation::ComputerVictory, "{input}");
        assert_eq!(response.to, with_circle(&input, open[0]), "{input}");
    }
}

#[test]
fn test_one_open_star_line_is_blocked() {
    let mut rules = rules(5);
    for input in all_boards() {
        let threats = completing_cells(&input, Cell::Star);
        if threats.len() != 1
            || !completing_cells(&input, Cell::Circle).is_empty()
            || complete_lines(&input, Cell::Circle) > 0
            || complete_lines(&input, Cell::Star) > 0
        {
            continue;
        }
        let response = rules.respond(&input).unwrap();
        assert_eq!(response.situation, Situation::BasicDefense, "{input}");
        assert_eq!(response.to, with_circle(&input, threats[0]), "{input}");
    }
}

#[test]
fn test_repeated_respond_gives_same_classification() {
    let mut rules = rules(6);
    for input in ["OO__X___X", "XX__O____", "_________", "OXOOXXXOO", "X___O____"] {
        let input = board(input);
        let first = rules.respond(&input).unwrap();
        let second = rules.respond(&input).unwrap();
        assert_eq!(first.situation, second.situation, "{input}");
    }
}

#[test]
fn test_open_row_end_to_end() {
    let response = rules(7).respond(&board("OO__X___X")).unwrap();
    assert_eq!(response.situation, Situation::ComputerVictory);
    assert_eq!(response.to, board("OOO_X___X"));
}

#[test]
fn test_empty_board_end_to_end() {
    for seed in 0..20 {
        let response = rules(seed).respond(&Board::new()).unwrap();
        assert_eq!(response.situation, Situation::RandomAttack);
        assert_eq!(response.to.count(Cell::Circle), 1);
        assert_eq!(response.to.count(Cell::Empty), BOARD_CELLS - 1);
        assert_eq!(response.to.count(Cell::Star), 0);
    }
}
