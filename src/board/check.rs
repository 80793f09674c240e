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

use log::{debug, trace};

use super::material::Color;
use super::square::{Mask, Position};
use super::Board;

impl Board {
    /// Every square a piece of `color` could move to, ignoring whether
    /// the move would expose its own king.
    pub fn attacked_by(&self, color: Color) -> Mask {
        self.pieces_of(color)
            .map(|placed| self.pseudo_legal_moves(placed.position))
            .fold(Mask::empty(), |acc, moves| acc | moves)
    }

    /// Whether the king of `color` stands on a square the opponent attacks.
    /// A side without a king is never in check.
    pub fn is_in_check(&self, color: Color) -> bool {
        match self.king_of(color) {
            Some(king) => self.attacked_by(!color).contains(king.position),
            None => false,
        }
    }

    /// Plays `from -> to` on a scratch copy and reports whether the
    /// mover's king ends up in check. `self` is never modified.
    pub fn would_leave_king_in_check(&self, from: Position, to: Position) -> bool {
        let Some(piece) = self.get(from) else {
            return false;
        };
        let mut scratch = *self;
        scratch.relocate(from, to);
        scratch.is_in_check(piece.color())
    }

    /// The pseudo-legal moves of the piece on `from` that do not leave its
    /// own king attacked.
    pub fn legal_moves(&self, from: Position) -> Mask {
        let mut mask = self.pseudo_legal_moves(from);
        for to in mask {
            if self.would_leave_king_in_check(from, to) {
                trace!("{} -> {} rejected: king would be in check", from, to);
                mask.remove(to);
            }
        }
        mask
    }

    pub fn has_legal_moves(&self, color: Color) -> bool {
        self.pieces_of(color)
            .any(|placed| !self.legal_moves(placed.position).is_empty())
    }

    /// True iff `color` has a king, it is in check, and no piece of
    /// `color` can make a legal move.
    pub fn is_checkmate(&self, color: Color) -> bool {
        let mated = self.is_in_check(color) && !self.has_legal_moves(color);
        if mated {
            debug!("{} is checkmated", color);
        }
        mated
    }

    /// The side that is checkmated on this board, if either.
    pub fn checkmated(&self) -> Option<Color> {
        [Color::White, Color::Black]
            .into_iter()
            .find(|&color| self.is_checkmate(color))
    }
}
