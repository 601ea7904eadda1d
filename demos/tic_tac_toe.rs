//! Tic-Tac-Toe demo for the parallel MCTS engine
//!
//! Plays a human (X) against the engine (O). The coordinator is told about
//! every move actually played, so the matching subtree is carried across
//! turns instead of searching each position from scratch.

use std::fmt;
use std::io::{self, Write};

use canopy_mcts::{Action, Coordinator, GameState, SearchConfig};

fn main() {
    // Initialize logging
    env_logger::init();

    println!("Parallel MCTS Tic-Tac-Toe");
    println!("=========================");
    println!();

    let mut game = TicTacToe::new();

    let config = SearchConfig::default()
        .with_simulation_count(5_000)
        .with_num_trees(4)
        .with_seed(rand::random());
    let mut coordinator = Coordinator::new(config).expect("configuration is valid");

    // Main game loop
    while !game.is_terminal() {
        println!("{}", game);

        if game.current_player == Player::X {
            // Human player (X)
            println!("Your move (enter row column, e.g. '1 2'): ");
            io::stdout().flush().unwrap();

            let mut input = String::new();
            io::stdin().read_line(&mut input).unwrap();

            let coords: Vec<usize> = input
                .trim()
                .split_whitespace()
                .filter_map(|s| s.parse::<usize>().ok())
                .collect();

            if coords.len() != 2 || coords[0] > 2 || coords[1] > 2 {
                println!("Invalid move! Enter row and column (0-2).");
                continue;
            }

            let action = Move {
                index: coords[0] * 3 + coords[1],
            };
            if !game.is_legal_move(&action) {
                println!("Illegal move! Try again.");
                continue;
            }

            game = game.apply(&action);
            coordinator.advance(&action);
        } else {
            // Engine player (O)
            println!("Engine is thinking...");

            match coordinator.decide(&game) {
                Some(action) => {
                    println!(
                        "Engine chooses: {} (row {}, col {})",
                        action.index,
                        action.index / 3,
                        action.index % 3
                    );
                    game = game.apply(&action);
                    coordinator.advance(&action);

                    println!("{}", coordinator.statistics().summary());
                }
                None => {
                    println!("No legal moves left.");
                    break;
                }
            }
        }
    }

    // Display final state
    println!("{}", game);

    if let Some(winner) = game.winner() {
        println!("Player {:?} wins!", winner);
    } else {
        println!("The game is a draw!");
    }
}

/// Players in Tic-Tac-Toe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Player {
    X,
    O,
}

/// Tic-Tac-Toe move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Move {
    /// Board position index (0-8)
    index: usize,
}

impl Action for Move {
    fn id(&self) -> usize {
        self.index
    }
}

const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// Tic-Tac-Toe game state
#[derive(Clone)]
struct TicTacToe {
    /// Board representation (None = empty, Some(Player) = occupied)
    board: [Option<Player>; 9],

    /// Current player's turn
    current_player: Player,

    /// The move that produced this position
    last_move: Option<Move>,
}

impl TicTacToe {
    fn new() -> Self {
        TicTacToe {
            board: [None; 9],
            current_player: Player::X,
            last_move: None,
        }
    }

    fn is_legal_move(&self, action: &Move) -> bool {
        action.index < 9 && self.board[action.index].is_none() && self.winner().is_none()
    }

    fn winner(&self) -> Option<Player> {
        LINES.iter().find_map(|line| {
            let first = self.board[line[0]]?;
            (line.iter().all(|&i| self.board[i] == Some(first))).then_some(first)
        })
    }
}

impl GameState for TicTacToe {
    type Action = Move;

    fn possible_actions(&self) -> Vec<Move> {
        if self.winner().is_some() {
            return vec![];
        }
        (0..9)
            .filter(|&i| self.board[i].is_none())
            .map(|index| Move { index })
            .collect()
    }

    fn apply(&self, action: &Move) -> Self {
        assert!(
            self.is_legal_move(action),
            "illegal move at index {}",
            action.index
        );
        let mut board = self.board;
        board[action.index] = Some(self.current_player);
        TicTacToe {
            board,
            current_player: match self.current_player {
                Player::X => Player::O,
                Player::O => Player::X,
            },
            last_move: Some(*action),
        }
    }

    fn is_terminal(&self) -> bool {
        self.winner().is_some() || self.board.iter().all(Option::is_some)
    }

    fn reward(&self) -> f64 {
        // A winning line is always completed by the last move.
        match self.winner() {
            Some(_) => 1.0,
            None => 0.0,
        }
    }

    fn last_action(&self) -> Option<Move> {
        self.last_move
    }

    fn same_state(&self, other: &Self) -> bool {
        self.board == other.board && self.current_player == other.current_player
    }
}

impl fmt::Display for TicTacToe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  0 1 2")?;
        for row in 0..3 {
            write!(f, "{} ", row)?;
            for col in 0..3 {
                let symbol = match self.board[row * 3 + col] {
                    Some(Player::X) => "X",
                    Some(Player::O) => "O",
                    None => ".",
                };
                write!(f, "{} ", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
