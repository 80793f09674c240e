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

use log::debug;
use once_cell::sync::Lazy;
use strum::IntoEnumIterator;
use thiserror::Error;

use super::material::{Color, PieceType, PlacedPiece};
use super::square::{Direction, Mask, Offset, Position};
use super::{Board, PAWN_ROWS};

use PieceType::*;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    #[error("No piece at the specified position: {0}")]
    NoPiece(Position),
    #[error("Illegal move to position: {0}. The start and end positions are the same.")]
    SamePosition(Position),
    #[error("Illegal move from {from} to {to}")]
    Unreachable { from: Position, to: Position },
    #[error("Illegal move from {from} to {to}: your king would be in check")]
    KingInCheck { from: Position, to: Position },
}
use MoveError::*;

impl Board {
    /// Destinations reachable by the movement pattern of the piece on
    /// `from`, ignoring whether the move would expose the mover's king.
    /// Empty if `from` is vacant.
    pub fn pseudo_legal_moves(&self, from: Position) -> Mask {
        match self.get(from) {
            Some(piece) => match piece.kind() {
                King => self.king_moves(from, piece.color()),
                Queen => self.queen_moves(from, piece.color()),
                Rook => self.rook_moves(from, piece.color()),
                Bishop => self.bishop_moves(from, piece.color()),
                Knight => self.knight_moves(from, piece.color()),
                Pawn => self.pawn_moves(from, piece.color()),
            },
            None => Mask::empty(),
        }
    }

    /// Relocates the piece on `from` to `to`, capturing whatever stands
    /// there. The move must be among `legal_moves(from)`; otherwise the
    /// board is left untouched and the reason is returned.
    ///
    /// Returns the moved piece at its new position.
    pub fn move_piece(&mut self, from: Position, to: Position) -> Result<PlacedPiece, MoveError> {
        let piece = self.get(from).ok_or(NoPiece(from))?;
        if from == to {
            return Err(SamePosition(to));
        }
        if !self.pseudo_legal_moves(from).contains(to) {
            return Err(Unreachable { from, to });
        }
        if self.would_leave_king_in_check(from, to) {
            return Err(KingInCheck { from, to });
        }
        let captured = self.relocate(from, to);
        debug!(
            "{} {} {} -> {}{}",
            piece.color(),
            piece.kind(),
            from,
            to,
            captured.map_or(String::new(), |c| format!(" captures {}", c.kind()))
        );
        Ok(PlacedPiece::new(piece, to))
    }

    fn king_moves(&self, from: Position, color: Color) -> Mask {
        KING_MOVES[from] - self.occupied_by(color)
    }

    fn knight_moves(&self, from: Position, color: Color) -> Mask {
        KNIGHT_MOVES[from] - self.occupied_by(color)
    }

    fn queen_moves(&self, from: Position, color: Color) -> Mask {
        self.rook_moves(from, color) | self.bishop_moves(from, color)
    }

    fn rook_moves(&self, from: Position, color: Color) -> Mask {
        Direction::horizontals()
            .map(|dir| self.ray(from, dir, color))
            .fold(Mask::empty(), |acc, ray| acc | ray)
    }

    fn bishop_moves(&self, from: Position, color: Color) -> Mask {
        Direction::diagonals()
            .map(|dir| self.ray(from, dir, color))
            .fold(Mask::empty(), |acc, ray| acc | ray)
    }

    // Walks from `from` towards `dir` until the edge or the first occupied
    // square, which is included only if it holds an enemy piece.
    fn ray(&self, from: Position, dir: Direction, color: Color) -> Mask {
        let mut mask = Mask::empty();
        let mut next = from + dir;
        while let Some(square) = next {
            match self.get(square) {
                None => mask |= square,
                Some(piece) => {
                    if piece.color() != color {
                        mask |= square;
                    }
                    break;
                }
            }
            next = square + dir;
        }
        mask
    }

    fn pawn_moves(&self, from: Position, color: Color) -> Mask {
        let mut mask = Mask::empty();
        let forward = color.forward();
        if let Some(one) = from + Offset::new(forward, 0) {
            if !self.is_occupied(one) {
                mask |= one;
                if from.row() == PAWN_ROWS[color] {
                    if let Some(two) = one + Offset::new(forward, 0) {
                        if !self.is_occupied(two) {
                            mask |= two;
                        }
                    }
                }
            }
        }
        for side in [-1, 1] {
            if let Some(target) = from + Offset::new(forward, side) {
                if matches!(self.get(target), Some(piece) if piece.color() != color) {
                    mask |= target;
                }
            }
        }
        mask
    }
}

static KING_MOVES: Lazy<[Mask; 64]> = Lazy::new(|| {
    let mut array = [Mask::default(); 64];
    for square in Position::iter() {
        array[square] = Mask::from_positions(Direction::iter().filter_map(|dir| square + dir));
    }
    array
});

static KNIGHT_MOVES: Lazy<[Mask; 64]> = Lazy::new(|| {
    const OFFSETS: [Offset; 8] = [
        Offset::new(-2, -1),
        Offset::new(-2, 1),
        Offset::new(2, -1),
        Offset::new(2, 1),
        Offset::new(-1, -2),
        Offset::new(-1, 2),
        Offset::new(1, -2),
        Offset::new(1, 2),
    ];
    let mut array = [Mask::default(); 64];
    for square in Position::iter() {
        array[square] =
            Mask::from_positions(OFFSETS.into_iter().filter_map(|offset| square + offset));
    }
    array
});
