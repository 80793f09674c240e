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

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, Not};
use strum_macros::Display;

use super::square::Position;

/// A piece of a given type and color. Where a piece stands is recorded
/// only by the board slot that holds it.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: PieceType,
    color: Color,
}

impl Piece {
    pub const WK: Self = Self::white(King);
    pub const WQ: Self = Self::white(Queen);
    pub const WR: Self = Self::white(Rook);
    pub const WB: Self = Self::white(Bishop);
    pub const WN: Self = Self::white(Knight);
    pub const WP: Self = Self::white(Pawn);

    pub const BK: Self = Self::black(King);
    pub const BQ: Self = Self::black(Queen);
    pub const BR: Self = Self::black(Rook);
    pub const BB: Self = Self::black(Bishop);
    pub const BN: Self = Self::black(Knight);
    pub const BP: Self = Self::black(Pawn);

    #[inline]
    pub const fn new(color: Color, kind: PieceType) -> Self {
        Self { kind, color }
    }

    #[inline]
    pub const fn white(kind: PieceType) -> Self {
        Self::new(White, kind)
    }

    #[inline]
    pub const fn black(kind: PieceType) -> Self {
        Self::new(Black, kind)
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub fn kind(&self) -> PieceType {
        self.kind
    }

    #[inline]
    pub fn is_enemy_of(&self, other: &Piece) -> bool {
        self.color != other.color
    }

    /// FEN letter: upper case for White, lower case for Black.
    pub fn symbol(&self) -> char {
        let symbol = self.kind.symbol();
        match self.color {
            White => symbol,
            Black => symbol.to_ascii_lowercase(),
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A piece together with the square it occupies. Two placed pieces are
/// equal only if type, color and square all match, so a piece that has
/// moved compares unequal to its former self.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlacedPiece {
    pub piece: Piece,
    pub position: Position,
}

impl PlacedPiece {
    pub const fn new(piece: Piece, position: Position) -> Self {
        Self { piece, position }
    }
    #[inline]
    pub fn color(&self) -> Color {
        self.piece.color()
    }
    #[inline]
    pub fn kind(&self) -> PieceType {
        self.piece.kind()
    }
}

use Color::{Black, White};

#[derive(Debug, Serialize, Deserialize, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// Row delta of a pawn advance.
    pub const fn forward(&self) -> isize {
        match self {
            White => 1,
            Black => -1,
        }
    }

    /// The side to move after `half_moves` half-moves have been played.
    pub const fn to_move(half_moves: u32) -> Self {
        if half_moves % 2 == 0 {
            White
        } else {
            Black
        }
    }
}

impl Not for Color {
    type Output = Self;

    #[inline]
    fn not(self) -> Self {
        match self {
            White => Black,
            Black => White,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Pair<T>((T, T));

impl<T> Pair<T> {
    pub const fn new(white: T, black: T) -> Self {
        Self((white, black))
    }
    pub fn white(&self) -> &T {
        &self.0 .0
    }
    pub fn black(&self) -> &T {
        &self.0 .1
    }
}

impl<T> Index<Color> for Pair<T> {
    type Output = T;

    #[inline(always)]
    fn index(&self, index: Color) -> &Self::Output {
        match index {
            White => self.white(),
            Black => self.black(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceType {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
}
use PieceType::{Bishop, King, Knight, Pawn, Queen, Rook};

impl PieceType {
    pub const fn symbol(&self) -> char {
        match self {
            King => 'K',
            Queen => 'Q',
            Rook => 'R',
            Bishop => 'B',
            Knight => 'N',
            Pawn => 'P',
        }
    }

    /// Inverse of `symbol`, ignoring case.
    pub fn from_symbol(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'K' => Some(King),
            'Q' => Some(Queen),
            'R' => Some(Rook),
            'B' => Some(Bishop),
            'N' => Some(Knight),
            'P' => Some(Pawn),
            _ => None,
        }
    }

    pub fn is_king(&self) -> bool {
        matches!(*self, King)
    }
    pub fn is_pawn(&self) -> bool {
        matches!(*self, Pawn)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Promotion {
    Queen,
    Rook,
    Bishop,
    Knight,
}

impl From<Promotion> for PieceType {
    fn from(value: Promotion) -> Self {
        match value {
            Promotion::Queen => Queen,
            Promotion::Rook => Rook,
            Promotion::Bishop => Bishop,
            Promotion::Knight => Knight,
        }
    }
}

impl TryFrom<PieceType> for Promotion {
    type Error = PieceType;

    fn try_from(value: PieceType) -> Result<Self, Self::Error> {
        match value {
            Queen => Ok(Promotion::Queen),
            Rook => Ok(Promotion::Rook),
            Bishop => Ok(Promotion::Bishop),
            Knight => Ok(Promotion::Knight),
            King | Pawn => Err(value),
        }
    }
}
