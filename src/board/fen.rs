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

use super::material::Color;
use super::square::Position;
use super::Board;

impl Board {
    /// Piece placement in FEN order (row 8 first), followed by the side to
    /// move and the half-move count:
    ///
    /// `rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w 0`
    pub fn to_fen(&self, side_to_move: Color, half_moves: u32) -> String {
        let mut fen = String::with_capacity(64);
        for row in (0..8u8).rev() {
            let mut empty = 0;
            for column in 0..8u8 {
                let Some(position) = Position::new(row, column) else {
                    continue;
                };
                match self.get(position) {
                    Some(piece) => {
                        if empty > 0 {
                            fen.push_str(&empty.to_string());
                            empty = 0;
                        }
                        fen.push(piece.symbol());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                fen.push_str(&empty.to_string());
            }
            if row > 0 {
                fen.push('/');
            }
        }
        let side = match side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        };
        format!("{fen} {side} {half_moves}")
    }
}
