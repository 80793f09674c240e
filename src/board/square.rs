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
use std::ops::{Add, BitOr, BitOrAssign, Index, IndexMut, Sub};
use std::str::FromStr;
use strum_macros::EnumIter;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid input format. Please provide a valid position (e.g., 'a1'), got {0:?}")]
    InvalidFormat(String),
    #[error("Invalid position. Position must be within the chessboard, got {0:?}")]
    OutOfBounds(String),
}

/// A square on the board, addressed by a 0-based row and column.
///
/// Row 0 is White's back rank ("1" in algebraic notation) and column 0 is
/// the a-file. A `Position` can only be built from in-range coordinates,
/// so every value in circulation is a valid square.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "(u8, u8)", into = "(u8, u8)")]
pub struct Position {
    row: u8,
    column: u8,
}

impl Position {
    #[inline]
    pub const fn new(row: u8, column: u8) -> Option<Self> {
        if row < 8 && column < 8 {
            Some(Self { row, column })
        } else {
            None
        }
    }

    #[inline]
    pub(crate) const fn from_index(index: usize) -> Self {
        debug_assert!(index < 64);
        Self {
            row: (index / 8) as u8,
            column: (index % 8) as u8,
        }
    }

    /// True iff `0 <= row < 8` and `0 <= column < 8`.
    #[inline]
    pub const fn is_valid(row: i32, column: i32) -> bool {
        row >= 0 && row < 8 && column >= 0 && column < 8
    }

    #[inline]
    pub fn try_from_chars(f: char, r: char) -> Option<Self> {
        let column = (f as i32) - ('a' as i32);
        let row = r.to_digit(10)? as i32 - 1;
        Self::try_from((row, column)).ok()
    }

    #[inline]
    pub const fn row(&self) -> u8 {
        self.row
    }
    #[inline]
    pub const fn column(&self) -> u8 {
        self.column
    }
    #[inline]
    pub const fn to_index(&self) -> usize {
        self.row as usize * 8 + self.column as usize
    }
    #[inline]
    pub const fn to_mask(&self) -> Mask {
        Mask::new(0x1 << self.to_index())
    }

    /// All 64 positions in row-major order, starting at `a1`.
    pub fn iter() -> impl Iterator<Item = Position> {
        (0..64).map(Self::from_index)
    }

    #[inline]
    pub fn file_char(&self) -> char {
        (b'a' + self.column) as char
    }
    #[inline]
    pub fn rank_char(&self) -> char {
        (b'1' + self.row) as char
    }
}

impl TryFrom<(i32, i32)> for Position {
    type Error = ParseError;

    fn try_from((row, column): (i32, i32)) -> Result<Self, Self::Error> {
        if !Self::is_valid(row, column) {
            return Err(ParseError::OutOfBounds(format!("({row}, {column})")));
        }
        Ok(Self {
            row: row as u8,
            column: column as u8,
        })
    }
}

impl TryFrom<(u8, u8)> for Position {
    type Error = ParseError;

    fn try_from((row, column): (u8, u8)) -> Result<Self, Self::Error> {
        Self::new(row, column).ok_or_else(|| ParseError::OutOfBounds(format!("({row}, {column})")))
    }
}

impl From<Position> for (u8, u8) {
    fn from(value: Position) -> Self {
        (value.row, value.column)
    }
}

impl FromStr for Position {
    type Err = ParseError;

    /// Parses a two character square name such as `e4`: a file letter
    /// followed by a rank digit.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(f), Some(r), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(ParseError::InvalidFormat(s.to_string()));
        };
        if !f.is_alphabetic() || !r.is_ascii_digit() {
            return Err(ParseError::InvalidFormat(s.to_string()));
        }
        Self::try_from_chars(f, r).ok_or_else(|| ParseError::OutOfBounds(s.to_string()))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

impl From<Position> for usize {
    fn from(value: Position) -> Self {
        value.to_index()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Offset {
    pub row: isize,
    pub column: isize,
}

impl Offset {
    pub const fn new(row: isize, column: isize) -> Self {
        Self { row, column }
    }
}

impl Add<Offset> for Position {
    type Output = Option<Position>;
    fn add(self, rhs: Offset) -> Self::Output {
        let row = (self.row as isize).checked_add(rhs.row)?;
        let column = (self.column as isize).checked_add(rhs.column)?;
        Position::try_from((row as i32, column as i32)).ok()
    }
}

impl Index<Position> for [Mask; 64] {
    type Output = Mask;
    fn index(&self, position: Position) -> &Self::Output {
        &self[position.to_index()]
    }
}

impl IndexMut<Position> for [Mask; 64] {
    fn index_mut(&mut self, position: Position) -> &mut Self::Output {
        &mut self[position.to_index()]
    }
}

/// The eight compass directions. `Up` points towards Black's side of the
/// board (increasing row).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Direction {
    UpLeft,
    Up,
    UpRight,
    Left,
    Right,
    DownLeft,
    Down,
    DownRight,
}

use Direction::{Down, DownLeft, DownRight, Left, Right, Up, UpLeft, UpRight};

impl Direction {
    pub fn horizontals() -> impl Iterator<Item = Self> {
        [Up, Left, Right, Down].into_iter()
    }
    pub fn diagonals() -> impl Iterator<Item = Self> {
        [UpLeft, UpRight, DownLeft, DownRight].into_iter()
    }
}

impl From<Direction> for Offset {
    fn from(value: Direction) -> Self {
        match value {
            UpLeft => Self::new(1, -1),
            Up => Self::new(1, 0),
            UpRight => Self::new(1, 1),
            Left => Self::new(0, -1),
            Right => Self::new(0, 1),
            DownLeft => Self::new(-1, -1),
            Down => Self::new(-1, 0),
            DownRight => Self::new(-1, 1),
        }
    }
}

impl Add<Direction> for Position {
    type Output = Option<Position>;
    fn add(self, rhs: Direction) -> Self::Output {
        let offset: Offset = rhs.into();
        self + offset
    }
}

/// A set of positions packed into 64 bits, one bit per square.
///
/// Iteration yields positions in ascending row-major order (`a1`, `b1`,
/// .., `h1`, `a2`, ..), which is also the order in which move generation
/// reports destinations.
#[derive(Clone, Serialize, Deserialize, Copy, PartialEq, Eq, Hash, Default)]
pub struct Mask(u64);

impl Mask {
    #[inline]
    pub const fn new(val: u64) -> Self {
        Self(val)
    }

    #[inline]
    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn from_positions<I>(positions: I) -> Self
    where
        I: IntoIterator<Item = Position>,
    {
        positions
            .into_iter()
            .map(|position| position.to_mask())
            .reduce(|m1, m2| m1 | m2)
            .unwrap_or_default()
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline]
    pub const fn contains(&self, position: Position) -> bool {
        (self.0 & position.to_mask().0) != 0
    }

    #[inline]
    pub fn insert(&mut self, position: Position) {
        self.0 |= position.to_mask().0;
    }

    #[inline]
    pub fn remove(&mut self, position: Position) {
        self.0 &= !position.to_mask().0;
    }

    pub fn iter(&self) -> MaskIter {
        MaskIter(self.0)
    }

    pub fn to_vec(&self) -> Vec<Position> {
        self.iter().collect()
    }
}

impl fmt::Debug for Mask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..8).rev() {
            for column in 0..8 {
                let index = row * 8 + column;
                let position = Position::from_index(index);
                write!(f, "{}", if self.contains(position) { "#" } else { "." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl Sub<Position> for Mask {
    type Output = Self;
    fn sub(self, rhs: Position) -> Self::Output {
        Self(self.0 & !rhs.to_mask().0)
    }
}

impl Sub for Mask {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 & !rhs.0)
    }
}

impl BitOr for Mask {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Mask {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitOrAssign<Position> for Mask {
    fn bitor_assign(&mut self, rhs: Position) {
        self.0 |= rhs.to_mask().0;
    }
}

impl IntoIterator for Mask {
    type Item = Position;
    type IntoIter = MaskIter;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaskIter(u64);

impl Iterator for MaskIter {
    type Item = Position;

    fn next(&mut self) -> Option<Self::Item> {
        if self.0 != 0 {
            let position = Position::from_index(self.0.trailing_zeros() as usize);
            self.0 &= self.0 - 1;
            return Some(position);
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.0.count_ones() as usize;
        (len, Some(len))
    }
}

impl ExactSizeIterator for MaskIter {}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(row: u8, column: u8) -> Position {
        Position::new(row, column).unwrap()
    }

    #[test]
    fn test_valid_bounds() {
        assert!(Position::is_valid(2, 2));
        assert!(Position::is_valid(0, 0));
        assert!(Position::is_valid(7, 0));
        assert!(Position::is_valid(0, 7));
        assert!(Position::is_valid(7, 7));
        assert!(!Position::is_valid(-1, 2));
        assert!(!Position::is_valid(8, 2));
        assert!(!Position::is_valid(2, -1));
        assert!(!Position::is_valid(2, 8));
        assert!(!Position::is_valid(-1, -1));
        assert!(!Position::is_valid(8, 8));
        assert!(Position::new(8, 0).is_none());
        assert!(Position::new(0, 8).is_none());
    }
    #[test]
    fn test_parse_corners() {
        assert_eq!("a1".parse::<Position>().unwrap(), pos(0, 0));
        assert_eq!("h8".parse::<Position>().unwrap(), pos(7, 7));
        assert_eq!("a8".parse::<Position>().unwrap(), pos(7, 0));
        assert_eq!("h1".parse::<Position>().unwrap(), pos(0, 7));
        assert_eq!("e5".parse::<Position>().unwrap(), pos(4, 4));
    }
    #[test]
    fn test_parse_invalid_format() {
        for input in ["", "a", "abc", "a12", "12", "abc12", "aa", "1a"] {
            assert!(
                matches!(input.parse::<Position>(), Err(ParseError::InvalidFormat(_))),
                "{input}"
            );
        }
    }
    #[test]
    fn test_parse_out_of_bounds() {
        for input in ["i1", "a0", "a9", "h9", "A1", "z5"] {
            assert!(
                matches!(input.parse::<Position>(), Err(ParseError::OutOfBounds(_))),
                "{input}"
            );
        }
    }
    #[test]
    fn test_display_is_algebraic() {
        assert_eq!(pos(0, 0).to_string(), "a1");
        assert_eq!(pos(2, 5).to_string(), "f3");
        assert_eq!(pos(7, 7).to_string(), "h8");
    }
    #[test]
    fn test_offset_leaves_board() {
        assert_eq!(pos(0, 0) + Direction::Down, None);
        assert_eq!(pos(0, 0) + Direction::Left, None);
        assert_eq!(pos(0, 0) + Direction::UpRight, Some(pos(1, 1)));
        assert_eq!(pos(7, 7) + Offset::new(-2, -1), Some(pos(5, 6)));
        assert_eq!(pos(6, 6) + Offset::new(2, 1), None);
    }
    #[test]
    fn test_deserialize_checks_bounds() {
        let position: Position = serde_json::from_str("[4, 2]").unwrap();
        assert_eq!(position, pos(4, 2));
        assert_eq!(serde_json::to_string(&pos(4, 2)).unwrap(), "[4,2]");
        assert!(serde_json::from_str::<Position>("[9, 0]").is_err());
        assert!(serde_json::from_str::<Position>("[0, 8]").is_err());
        // a board needs exactly 64 squares
        let short = format!("[{}]", ["null"; 63].join(","));
        assert!(serde_json::from_str::<crate::Board>(&short).is_err());
    }
    #[test]
    fn test_mask_iterates_row_major() {
        let mask = Mask::from_positions([pos(5, 5), pos(3, 3), pos(3, 4), pos(4, 3)]);
        assert_eq!(mask.len(), 4);
        assert_eq!(mask.to_vec(), vec![pos(3, 3), pos(3, 4), pos(4, 3), pos(5, 5)]);
    }
    #[test]
    fn test_mask_insert_remove() {
        let mut mask = Mask::empty();
        mask.insert(pos(7, 7));
        mask.insert(pos(0, 0));
        assert!(mask.contains(pos(7, 7)));
        mask.remove(pos(7, 7));
        assert!(!mask.contains(pos(7, 7)));
        assert_eq!(mask - pos(0, 0), Mask::empty());
    }
}
