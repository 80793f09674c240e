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

//! Chess board and move legality
//!
//! A _board_ holds the contents of the 64 squares and answers every
//! rules question about them: where a piece may go, whether a side is
//! in check or checkmated, whether a pawn may be promoted. The
//! following rules are supported:
//!
//! [x] Piece movement, obstruction and capture for all six piece types
//! [x] Pawn single and double advances, diagonal captures
//! [x] Moves that would leave the mover's king attacked are rejected
//! [x] Checkmate detection
//! [x] Pawn promotion to queen, rook, bishop or knight
//! [x] FEN-like export of the piece placement
//! [ ] Castling
//! [ ] En passant
//! [ ] Stalemate and other draw rules
//!
//! Some of the key abstractions include:
//!
//! * A `Position` is the coordinate of a single square: a row (0..8,
//!   row 0 being White's back rank) and a column (0..8, column 0 being
//!   the a-file). Positions print and parse in algebraic form (`e4`).
//!
//! * A `Mask` is a 64-bit value in which each bit maps to a position.
//!   Move generation reports destinations as masks; iterating a mask
//!   yields positions in row-major order.
//!
//! * A `Piece` is a `PieceType` (`King` .. `Pawn`) of a `Color`. Pieces
//!   do not know where they stand: the board slot holding a piece is
//!   the only record of its location, and `PlacedPiece` pairs the two
//!   when a caller needs both.
//!
//! * `Board` owns the grid. Pieces only ever change squares through
//!   `Board::move_piece`, which validates the move against the legal
//!   move set and then clears the source and fills the destination in
//!   one step. Legality checks run on a scratch copy of the board, so
//!   queries never disturb the live position.

mod check;
mod fen;
mod material;
mod moves;
mod promotion;
mod square;

pub use material::*;
pub use moves::*;
pub use promotion::*;
pub use square::*;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::Index;

use PieceType::*;

const BACK_RANK: [PieceType; 8] = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];
const BACK_ROWS: Pair<u8> = Pair::new(0, 7);
pub(crate) const PAWN_ROWS: Pair<u8> = Pair::new(1, 6);
pub(crate) const PROMOTION_ROWS: Pair<u8> = Pair::new(7, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [Option<Piece>; 64],
}

impl Serialize for Board {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.squares.iter())
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let squares: Vec<Option<Piece>> = Vec::deserialize(deserializer)?;
        let squares: [Option<Piece>; 64] = squares
            .try_into()
            .map_err(|v: Vec<_>| D::Error::invalid_length(v.len(), &"64 squares"))?;
        Ok(Self { squares })
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// A board set up with the standard 32-piece starting layout.
    pub fn new() -> Self {
        let mut board = Self::empty();
        for color in [Color::White, Color::Black] {
            for (column, kind) in BACK_RANK.into_iter().enumerate() {
                board.place(BACK_ROWS[color], column as u8, Piece::new(color, kind));
                board.place(PAWN_ROWS[color], column as u8, Piece::new(color, Pawn));
            }
        }
        board
    }

    pub fn empty() -> Self {
        Self {
            squares: [None; 64],
        }
    }

    fn place(&mut self, row: u8, column: u8, piece: Piece) {
        let index = row as usize * 8 + column as usize;
        self.squares[index] = Some(piece);
    }

    #[inline]
    pub fn is_valid_position(&self, row: i32, column: i32) -> bool {
        Position::is_valid(row, column)
    }

    #[inline]
    pub fn get(&self, position: Position) -> Option<Piece> {
        self.squares[position.to_index()]
    }

    /// Overwrites a single slot and returns its previous occupant. No other
    /// slot is touched: placing a piece that already stands elsewhere
    /// leaves both copies on the board, so relocations should go through
    /// `move_piece`.
    #[inline]
    pub fn set(&mut self, position: Position, piece: Option<Piece>) -> Option<Piece> {
        std::mem::replace(&mut self.squares[position.to_index()], piece)
    }

    pub fn clear(&mut self) {
        self.squares = [None; 64];
    }

    #[inline]
    pub fn is_occupied(&self, position: Position) -> bool {
        self.get(position).is_some()
    }

    pub fn king_of(&self, color: Color) -> Option<PlacedPiece> {
        self.pieces_of(color).find(|placed| placed.kind().is_king())
    }

    /// The pieces of one color in row-major order.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = PlacedPiece> + '_ {
        self.pieces().filter(move |placed| placed.color() == color)
    }

    pub fn pieces(&self) -> impl Iterator<Item = PlacedPiece> + '_ {
        Position::iter().filter_map(|position| {
            self.get(position)
                .map(|piece| PlacedPiece::new(piece, position))
        })
    }

    pub fn occupied_by(&self, color: Color) -> Mask {
        Mask::from_positions(self.pieces_of(color).map(|placed| placed.position))
    }

    pub fn occupied(&self) -> Mask {
        Mask::from_positions(self.pieces().map(|placed| placed.position))
    }

    /// Moves whatever stands on `from` to `to`, returning the captured
    /// occupant of `to`. Performs no rules checks.
    pub(crate) fn relocate(&mut self, from: Position, to: Position) -> Option<Piece> {
        let piece = self.set(from, None);
        self.set(to, piece)
    }
}

impl Index<Position> for Board {
    type Output = Option<Piece>;
    #[inline]
    fn index(&self, index: Position) -> &Self::Output {
        &self.squares[index.to_index()]
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..8u8).rev() {
            write!(f, "{} ", row + 1)?;
            for column in 0..8u8 {
                let index = row as usize * 8 + column as usize;
                match self.squares[index] {
                    Some(piece) => write!(f, "{}", piece)?,
                    None => write!(f, ".")?,
                }
            }
            writeln!(f)?;
        }
        write!(f, "  abcdefgh")
    }
}

#[cfg(test)]
impl Board {
    /// Builds a board from `(square, piece)` pairs, e.g. `("e1", Piece::WK)`.
    pub fn with_pieces(pieces: &[(&str, Piece)]) -> Self {
        let mut board = Self::empty();
        for (name, piece) in pieces {
            board.set(name.parse().unwrap(), Some(*piece));
        }
        board
    }
}
