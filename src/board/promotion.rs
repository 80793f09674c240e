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
use thiserror::Error;

use super::material::{Piece, PieceType, PlacedPiece, Promotion};
use super::square::Position;
use super::{Board, PROMOTION_ROWS};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PromotionError {
    #[error("No piece at position!")]
    NoPiece(Position),
    #[error("You can only promote pawns!")]
    NotPawn(Position),
    #[error("You can't promote on that row!")]
    WrongRow(Position),
    #[error(
        "Promotion is not allowed: The specified type is invalid. \
         Valid promotion types are 'Queen', 'Rook', 'Bishop', or 'Knight'."
    )]
    InvalidType(char),
}
use PromotionError::*;

impl Board {
    /// Replaces the pawn on `position` with a piece of type `kind` and the
    /// same color. The pawn must stand on the far row for its color.
    pub fn promote(
        &mut self,
        position: Position,
        kind: PieceType,
    ) -> Result<PlacedPiece, PromotionError> {
        let pawn = self.get(position).ok_or(NoPiece(position))?;
        if !pawn.kind().is_pawn() {
            return Err(NotPawn(position));
        }
        if position.row() != PROMOTION_ROWS[pawn.color()] {
            return Err(WrongRow(position));
        }
        let promotion = Promotion::try_from(kind).map_err(|kind| InvalidType(kind.symbol()))?;
        let piece = Piece::new(pawn.color(), promotion.into());
        self.set(position, Some(piece));
        debug!("{} pawn on {} promoted to {}", pawn.color(), position, kind);
        Ok(PlacedPiece::new(piece, position))
    }
}
