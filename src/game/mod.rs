// Copyright 2026 Tobin Edwards
//
//    Licensed under the Apache License, Version 2.0 (the "License");
//    you may not use this file except in compliance with the License.
//    You may obtain a copy of the License at
//
//        http://www.apache.org/licenses/LICENSE-2.0
//
//    Unless required by applicable law or agreed to in writing, software
//    distributed under the License is distributed on an "AS IS" BASIS,
//    WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//    See the License for the specific language governing permissions and
//    limitations under the License.

//! A game drives a `Board` from textual input: it parses square names,
//! enforces turn order, counts half-moves and records how the game ended.

use anyhow::Result;
use log::debug;
#[cfg(feature = "random")]
use rand::{thread_rng, Rng};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    Board, Color, MoveError, ParseError, Piece, PieceType, PlacedPiece, Position, PromotionError,
};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameId(u64);

impl GameId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }
    #[cfg(feature = "random")]
    pub fn random() -> Self {
        Self(thread_rng().gen())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("It's not your turn. Expected: {expected}, but got: {found}")]
    NotYourTurn { expected: Color, found: Color },
    #[error("The game is already over: {0:?}")]
    GameOver(Outcome),
    #[error("The game has reached the maximum number of half-moves")]
    MoveLimit,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    InProgress,
    /// The winner, having checkmated the opponent.
    Checkmate(Color),
    /// The winner, whose opponent resigned.
    Resigned(Color),
}

impl Outcome {
    pub fn winner(&self) -> Option<Color> {
        match self {
            Outcome::InProgress => None,
            Outcome::Checkmate(color) | Outcome::Resigned(color) => Some(*color),
        }
    }
}

/// What a successful `Game::submit_move` did to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    pub moved: PlacedPiece,
    pub captured: Option<Piece>,
    /// The side now to move is in check.
    pub check: bool,
    /// The side now to move is checkmated and the game is over.
    pub checkmate: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Game {
    pub id: GameId,
    pub board: Board,
    /// Half-moves played. Its parity decides the side to move.
    pub move_count: u32,
    pub outcome: Outcome,
}

/// True only when both squares hold pieces and the pieces differ in color.
pub fn is_enemy(a: Option<Piece>, b: Option<Piece>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.is_enemy_of(&b),
        _ => false,
    }
}

impl Game {
    pub fn new(id: GameId) -> Self {
        Self {
            id,
            board: Board::new(),
            move_count: 0,
            outcome: Outcome::InProgress,
        }
    }

    /// Parses a square name such as `e2`. Exactly two characters are
    /// accepted: a file letter then a rank digit, both on the board.
    pub fn parse_position(input: &str) -> Result<Position, ParseError> {
        input.parse()
    }

    #[inline]
    pub fn next_to_move(&self) -> Color {
        Color::to_move(self.move_count)
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.outcome != Outcome::InProgress
    }

    /// Legal destinations of the piece on `square`, in row-major order.
    /// Empty if the square is vacant.
    pub fn possible_moves(&self, square: &str) -> Result<Vec<Position>> {
        let from = Self::parse_position(square)?;
        Ok(self.board.legal_moves(from).to_vec())
    }

    /// The subset of `possible_moves` that capture an enemy piece.
    pub fn capture_moves(&self, square: &str) -> Result<Vec<Position>> {
        let from = Self::parse_position(square)?;
        let piece = self.board.get(from);
        Ok(self
            .board
            .legal_moves(from)
            .iter()
            .filter(|to| is_enemy(piece, self.board.get(*to)))
            .collect())
    }

    /// Plays a move for the side to move. On success the turn passes to
    /// the opponent, and the game ends if that leaves the opponent
    /// checkmated.
    pub fn submit_move(&mut self, from: &str, to: &str) -> Result<MoveOutcome> {
        let from = Self::parse_position(from)?;
        let to = Self::parse_position(to)?;
        if self.is_over() {
            return Err(GameError::GameOver(self.outcome).into());
        }
        if from == to {
            return Err(MoveError::SamePosition(to).into());
        }
        let piece = self.board.get(from).ok_or(MoveError::NoPiece(from))?;
        let mover = self.next_to_move();
        if piece.color() != mover {
            return Err(GameError::NotYourTurn {
                expected: mover,
                found: piece.color(),
            }
            .into());
        }
        let count = self.move_count.checked_add(1).ok_or(GameError::MoveLimit)?;
        let captured = self.board.get(to);
        let moved = self.board.move_piece(from, to)?;
        self.move_count = count;

        let check = self.board.is_in_check(!mover);
        let checkmate = check && self.board.is_checkmate(!mover);
        if checkmate {
            self.outcome = Outcome::Checkmate(moved.color());
            debug!("game {:?}: {} wins by checkmate", self.id, moved.color());
        }
        Ok(MoveOutcome {
            moved,
            captured,
            check,
            checkmate,
        })
    }

    /// Promotes the pawn on `square`. `symbol` is one of `q`, `r`, `b` or
    /// `n`, in either case. Only the side that just moved may promote.
    pub fn promote(&mut self, square: &str, symbol: char) -> Result<PlacedPiece> {
        let position = Self::parse_position(square)?;
        if self.is_over() {
            return Err(GameError::GameOver(self.outcome).into());
        }
        let mover = !self.next_to_move();
        if let Some(piece) = self.board.get(position) {
            if piece.color() != mover {
                return Err(GameError::NotYourTurn {
                    expected: mover,
                    found: piece.color(),
                }
                .into());
            }
        }
        let kind = match PieceType::from_symbol(symbol) {
            Some(kind) => kind,
            None => return Err(PromotionError::InvalidType(symbol).into()),
        };
        let promoted = self.board.promote(position, kind)?;
        let opponent = !promoted.color();
        if self.board.is_checkmate(opponent) {
            self.outcome = Outcome::Checkmate(promoted.color());
            debug!("game {:?}: {} wins by checkmate", self.id, promoted.color());
        }
        Ok(promoted)
    }

    /// The side to move gives up.
    pub fn resign(&mut self) -> Result<Outcome> {
        if self.is_over() {
            return Err(GameError::GameOver(self.outcome).into());
        }
        let loser = self.next_to_move();
        self.outcome = Outcome::Resigned(!loser);
        debug!("game {:?}: {} resigns", self.id, loser);
        Ok(self.outcome)
    }

    pub fn fen(&self) -> String {
        self.board.to_fen(self.next_to_move(), self.move_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Position {
        name.parse().unwrap()
    }

    fn play(game: &mut Game, moves: &[(&str, &str)]) {
        for (from, to) in moves {
            game.submit_move(from, to).unwrap();
        }
    }

    #[test]
    fn test_new_game() {
        let game = Game::new(GameId::new(7));
        assert_eq!(game.next_to_move(), Color::White);
        assert_eq!(game.move_count, 0);
        assert_eq!(game.outcome, Outcome::InProgress);
        assert_eq!(game.board, Board::new());
        assert_eq!(game.fen(), "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w 0");
    }
    #[test]
    fn test_parse_position() {
        assert_eq!(Game::parse_position("a1"), Ok(sq("a1")));
        assert_eq!(
            Game::parse_position("e22"),
            Err(ParseError::InvalidFormat("e22".to_string()))
        );
        assert_eq!(
            Game::parse_position("j2"),
            Err(ParseError::OutOfBounds("j2".to_string()))
        );
    }
    #[test]
    fn test_turns_alternate() {
        let mut game = Game::new(GameId::new(1));
        let outcome = game.submit_move("e2", "e4").unwrap();
        assert_eq!(outcome.moved, PlacedPiece::new(Piece::WP, sq("e4")));
        assert_eq!(outcome.captured, None);
        assert!(!outcome.check);
        assert_eq!(game.next_to_move(), Color::Black);
        assert_eq!(game.move_count, 1);

        let err = game.submit_move("d2", "d4").unwrap_err();
        assert_eq!(
            err.downcast_ref::<GameError>(),
            Some(&GameError::NotYourTurn {
                expected: Color::Black,
                found: Color::White
            })
        );
        assert_eq!(
            err.to_string(),
            "It's not your turn. Expected: Black, but got: White"
        );
        assert_eq!(game.move_count, 1);
    }
    #[test]
    fn test_rejected_moves_keep_state() {
        let mut game = Game::new(GameId::new(1));
        let err = game.submit_move("e2", "e2").unwrap_err();
        assert_eq!(
            err.downcast_ref::<MoveError>(),
            Some(&MoveError::SamePosition(sq("e2")))
        );
        let err = game.submit_move("e4", "e5").unwrap_err();
        assert_eq!(
            err.downcast_ref::<MoveError>(),
            Some(&MoveError::NoPiece(sq("e4")))
        );
        let err = game.submit_move("e2", "e5").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<MoveError>(),
            Some(MoveError::Unreachable { .. })
        ));
        let err = game.submit_move("e2", "x9").unwrap_err();
        assert!(err.downcast_ref::<ParseError>().is_some());
        assert_eq!(game.move_count, 0);
        assert_eq!(game.next_to_move(), Color::White);
        assert_eq!(game.board, Board::new());
    }
    #[test]
    fn test_capture_is_reported() {
        let mut game = Game::new(GameId::new(1));
        play(&mut game, &[("e2", "e4"), ("d7", "d5")]);
        let outcome = game.submit_move("e4", "d5").unwrap();
        assert_eq!(outcome.captured, Some(Piece::BP));
        assert_eq!(game.board.pieces_of(Color::Black).count(), 15);
    }
    #[test]
    fn test_possible_and_capture_moves() {
        let mut game = Game::new(GameId::new(1));
        game.board.clear();
        game.board.set(sq("a1"), Some(Piece::WK));
        game.board.set(sq("h8"), Some(Piece::BK));
        game.board.set(sq("c3"), Some(Piece::BP));
        game.board.set(sq("b2"), Some(Piece::WP));
        assert_eq!(
            game.possible_moves("b2").unwrap(),
            vec![sq("b3"), sq("c3"), sq("b4")]
        );
        assert_eq!(game.capture_moves("b2").unwrap(), vec![sq("c3")]);
        assert!(game.possible_moves("e5").unwrap().is_empty());
        assert!(game.possible_moves("e").is_err());
    }
    #[test]
    fn test_is_enemy() {
        assert!(is_enemy(Some(Piece::WP), Some(Piece::BP)));
        assert!(!is_enemy(Some(Piece::WP), Some(Piece::WQ)));
        assert!(!is_enemy(None, Some(Piece::BP)));
        assert!(!is_enemy(Some(Piece::WP), None));
        assert!(!is_enemy(None, None));
    }
    #[test]
    fn test_promote_by_symbol() {
        let mut game = Game::new(GameId::new(1));
        game.board.clear();
        game.board.set(sq("e1"), Some(Piece::WK));
        game.board.set(sq("h8"), Some(Piece::BK));
        game.board.set(sq("a8"), Some(Piece::WP));
        // White has just moved
        game.move_count = 1;
        let err = game.promote("a8", 'k').unwrap_err();
        assert_eq!(
            err.downcast_ref::<PromotionError>(),
            Some(&PromotionError::InvalidType('k'))
        );
        let err = game.promote("a8", 'x').unwrap_err();
        assert_eq!(
            err.downcast_ref::<PromotionError>(),
            Some(&PromotionError::InvalidType('x'))
        );
        let promoted = game.promote("a8", 'R').unwrap();
        assert_eq!(promoted, PlacedPiece::new(Piece::WR, sq("a8")));
        assert!(game.board.is_in_check(Color::Black));
        assert_eq!(game.outcome, Outcome::InProgress);
    }
    #[test]
    fn test_promote_only_own_pawn() {
        let mut game = Game::new(GameId::new(1));
        game.board.clear();
        game.board.set(sq("e1"), Some(Piece::WK));
        game.board.set(sq("e8"), Some(Piece::BK));
        game.board.set(sq("a1"), Some(Piece::BP));
        game.move_count = 1;
        let err = game.promote("a1", 'q').unwrap_err();
        assert_eq!(
            err.downcast_ref::<GameError>(),
            Some(&GameError::NotYourTurn {
                expected: Color::White,
                found: Color::Black
            })
        );
        assert_eq!(game.board.get(sq("a1")), Some(Piece::BP));

        game.move_count = 2;
        let promoted = game.promote("a1", 'q').unwrap();
        assert_eq!(promoted, PlacedPiece::new(Piece::BQ, sq("a1")));
    }
    #[test]
    fn test_turn_follows_move_count() {
        let mut game = Game::new(GameId::new(1));
        game.move_count = 7;
        assert_eq!(game.next_to_move(), Color::Black);
        assert!(game.fen().ends_with(" b 7"));
        game.move_count = 8;
        assert_eq!(game.next_to_move(), Color::White);
    }
    #[test]
    fn test_move_count_limit() {
        let mut game = Game::new(GameId::new(1));
        game.move_count = u32::MAX - 1;
        game.submit_move("e2", "e4").unwrap();
        assert_eq!(game.move_count, u32::MAX);
        assert_eq!(game.next_to_move(), Color::Black);

        let before = game.clone();
        let err = game.submit_move("e7", "e5").unwrap_err();
        assert_eq!(err.downcast_ref::<GameError>(), Some(&GameError::MoveLimit));
        assert_eq!(game, before);
    }
    #[test]
    fn test_resign() {
        let mut game = Game::new(GameId::new(1));
        play(&mut game, &[("e2", "e4")]);
        assert_eq!(game.resign().unwrap(), Outcome::Resigned(Color::White));
        assert_eq!(game.outcome.winner(), Some(Color::White));
        let err = game.submit_move("e7", "e5").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<GameError>(),
            Some(GameError::GameOver(_))
        ));
        assert!(game.resign().is_err());
    }
    #[test]
    fn test_serialize_game() {
        let mut game = Game::new(GameId::new(42));
        play(&mut game, &[("g1", "f3"), ("b8", "c6")]);
        let json = serde_json::to_string(&game).unwrap();
        let restored: Game = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, game);
        assert_eq!(restored.fen(), game.fen());
    }
    #[cfg(feature = "random")]
    #[test]
    fn test_random_id() {
        let game = Game::new(GameId::random());
        assert_eq!(game.outcome, Outcome::InProgress);
    }
}
