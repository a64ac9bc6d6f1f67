use crate::bits::count_bits64;
use crate::masks::{bit, masks, square_is_dark};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The two sides. Red (player 1) starts at the bottom of the board and
/// advances "up" toward row 0, i.e. toward smaller bit indices; Black
/// (player 2) starts at the top and advances toward row 7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Player {
    Red,
    Black,
}

impl Player {
    pub fn opponent(&self) -> Player {
        match self {
            Player::Red => Player::Black,
            Player::Black => Player::Red,
        }
    }

    /// The 1/2 indicator used by prompts and the save format.
    pub fn number(&self) -> u8 {
        match self {
            Player::Red => 1,
            Player::Black => 2,
        }
    }

    pub fn from_number(n: u8) -> Option<Player> {
        match n {
            1 => Some(Player::Red),
            2 => Some(Player::Black),
            _ => None,
        }
    }

    /// True when a signed index delta points in this player's forward
    /// direction. Men are restricted to forward moves; kings are not.
    fn advances(&self, delta: i16) -> bool {
        match self {
            Player::Red => delta < 0,
            Player::Black => delta > 0,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Red => write!(f, "Player 1 (red)"),
            Player::Black => write!(f, "Player 2 (black)"),
        }
    }
}

/// A from/to pair of board indices. Whether it is a step or a jump is
/// decided by the validator, not stored here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub from: u8,
    pub to: u8,
}

impl Move {
    pub fn new(from: u8, to: u8) -> Self {
        Move { from, to }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// Why a move-text line could not be turned into a [`Move`]. Rejected
/// before the validator ever sees the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseMoveError {
    #[error("expected two board indices, e.g. \"12 21\" or \"12->21\"")]
    Malformed,
    #[error("board indices must be between 0 and 63")]
    OutOfRange,
}

impl FromStr for Move {
    type Err = ParseMoveError;

    /// Accepts two indices separated by whitespace, `-`, `->` or `,`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.replace("->", " ");
        let mut parts = normalized
            .split(|c: char| c.is_whitespace() || c == '-' || c == ',')
            .filter(|p| !p.is_empty());
        let from = parts.next().ok_or(ParseMoveError::Malformed)?;
        let to = parts.next().ok_or(ParseMoveError::Malformed)?;
        if parts.next().is_some() {
            return Err(ParseMoveError::Malformed);
        }
        let from: u8 = from.parse().map_err(|_| ParseMoveError::Malformed)?;
        let to: u8 = to.parse().map_err(|_| ParseMoveError::Malformed)?;
        if from > 63 || to > 63 {
            return Err(ParseMoveError::OutOfRange);
        }
        Ok(Move::new(from, to))
    }
}

/// Why the validator rejected a move. One variant per precondition, in the
/// order the checks run. Never fatal; the turn does not advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("square {square} is off the board (0-63)")]
    OutOfRange { square: u8 },
    #[error("square {square} is a light square; only dark squares are playable")]
    LightSquare { square: u8 },
    #[error("no piece of yours on square {square}")]
    NotYourPiece { square: u8 },
    #[error("square {square} is occupied")]
    Occupied { square: u8 },
    #[error("{delta:+} is not a diagonal step or jump")]
    InvalidDelta { delta: i16 },
    #[error("men may only move toward the opponent's side")]
    WrongDirection,
    #[error("move {from} -> {to} would wrap around the board edge")]
    EdgeWrap { from: u8, to: u8 },
    #[error("no opponent piece on square {square} to jump over")]
    NothingToCapture { square: u8 },
}

/// Complete game position: four pairwise-disjoint bitboards plus the side
/// to move. Bit `i` is row `i / 8`, column `i % 8`, row 0 at the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    red_men: u64,
    red_kings: u64,
    black_men: u64,
    black_kings: u64,
    current_player: Player,
}

impl GameState {
    /// Standard opening position: Black men on the dark squares of the top
    /// three rows, Red men on the dark squares of the bottom three, Red to
    /// move.
    pub fn new() -> Self {
        let mut black_men = 0u64;
        let mut red_men = 0u64;
        for row in 0..3u8 {
            for col in 0..8u8 {
                let sq = row * 8 + col;
                if square_is_dark(sq) {
                    black_men |= bit(sq);
                }
            }
        }
        for row in 5..8u8 {
            for col in 0..8u8 {
                let sq = row * 8 + col;
                if square_is_dark(sq) {
                    red_men |= bit(sq);
                }
            }
        }
        GameState {
            red_men,
            red_kings: 0,
            black_men,
            black_kings: 0,
            current_player: Player::Red,
        }
    }

    /// Builds a state directly from its bitboards, e.g. when restoring a
    /// save. The boards are taken verbatim; positions off the dark mask are
    /// allowed (callers may warn via [`GameState::on_dark_squares`]).
    pub fn from_bitboards(
        red_men: u64,
        red_kings: u64,
        black_men: u64,
        black_kings: u64,
        current_player: Player,
    ) -> Self {
        GameState {
            red_men,
            red_kings,
            black_men,
            black_kings,
            current_player,
        }
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn men(&self, player: Player) -> u64 {
        match player {
            Player::Red => self.red_men,
            Player::Black => self.black_men,
        }
    }

    pub fn kings(&self, player: Player) -> u64 {
        match player {
            Player::Red => self.red_kings,
            Player::Black => self.black_kings,
        }
    }

    fn men_mut(&mut self, player: Player) -> &mut u64 {
        match player {
            Player::Red => &mut self.red_men,
            Player::Black => &mut self.black_men,
        }
    }

    fn kings_mut(&mut self, player: Player) -> &mut u64 {
        match player {
            Player::Red => &mut self.red_kings,
            Player::Black => &mut self.black_kings,
        }
    }

    /// All of `player`'s pieces, men and kings.
    pub fn pieces(&self, player: Player) -> u64 {
        self.men(player) | self.kings(player)
    }

    pub fn all_pieces(&self) -> u64 {
        self.red_men | self.red_kings | self.black_men | self.black_kings
    }

    /// Unoccupied dark squares, the only squares a move may land on.
    fn empty_dark(&self) -> u64 {
        !self.all_pieces() & masks().dark_squares
    }

    pub fn piece_count(&self, player: Player) -> u32 {
        count_bits64(self.pieces(player))
    }

    /// True when every piece sits on the dark-square mask. Restored saves
    /// may violate this; it is worth a warning but not a rejection.
    pub fn on_dark_squares(&self) -> bool {
        self.all_pieces() & !masks().dark_squares == 0
    }

    /// Checks a candidate move for `player` without touching the state.
    /// `Ok(Some(square))` means a legal jump capturing `square`; `Ok(None)`
    /// a legal plain step.
    pub fn validate(&self, player: Player, from: u8, to: u8) -> Result<Option<u8>, MoveError> {
        if from > 63 {
            return Err(MoveError::OutOfRange { square: from });
        }
        if to > 63 {
            return Err(MoveError::OutOfRange { square: to });
        }
        if !square_is_dark(from) {
            return Err(MoveError::LightSquare { square: from });
        }
        if !square_is_dark(to) {
            return Err(MoveError::LightSquare { square: to });
        }

        let from_bit = bit(from);
        let to_bit = bit(to);
        let m = masks();

        let moving_king = if self.men(player) & from_bit != 0 {
            false
        } else if self.kings(player) & from_bit != 0 {
            true
        } else {
            return Err(MoveError::NotYourPiece { square: from });
        };

        if self.all_pieces() & to_bit != 0 {
            return Err(MoveError::Occupied { square: to });
        }

        let delta = to as i16 - from as i16;

        match delta {
            7 | 9 | -7 | -9 => {
                if !moving_king && !player.advances(delta) {
                    return Err(MoveError::WrongDirection);
                }
                let wraps = match delta {
                    9 | -7 => from_bit & m.file_h != 0,
                    _ => from_bit & m.file_a != 0,
                };
                if wraps {
                    return Err(MoveError::EdgeWrap { from, to });
                }
                Ok(None)
            }
            14 | 18 | -14 | -18 => {
                // The jumped square is the arithmetic midpoint; jump deltas
                // are even, so it is exact.
                let mid = ((from as u16 + to as u16) / 2) as u8;
                if self.pieces(player.opponent()) & bit(mid) == 0 {
                    return Err(MoveError::NothingToCapture { square: mid });
                }
                if !moving_king && !player.advances(delta) {
                    return Err(MoveError::WrongDirection);
                }
                let wraps = match delta {
                    18 | -14 => from_bit & m.file_gh != 0,
                    _ => from_bit & m.file_ab != 0,
                };
                if wraps {
                    return Err(MoveError::EdgeWrap { from, to });
                }
                Ok(Some(mid))
            }
            _ => Err(MoveError::InvalidDelta { delta }),
        }
    }

    /// Applies an already-validated move. Relocates within the moving
    /// piece's own rank board, removes the captured piece if any, and
    /// promotes a man landing on its player's far row. Does not switch the
    /// turn. Callers must validate first; applying an unvalidated move
    /// corrupts the position.
    pub fn apply(&mut self, player: Player, from: u8, to: u8, captured: Option<u8>) {
        let from_bit = bit(from);
        let to_bit = bit(to);
        let moving_king = self.kings(player) & from_bit != 0;

        let rank = if moving_king {
            self.kings_mut(player)
        } else {
            self.men_mut(player)
        };
        *rank &= !from_bit;
        *rank |= to_bit;

        if let Some(square) = captured {
            let cap_bit = bit(square);
            let opponent = player.opponent();
            // At most one of these held the piece; clearing both is fine.
            *self.men_mut(opponent) &= !cap_bit;
            *self.kings_mut(opponent) &= !cap_bit;
        }

        // Promotion applies only to the piece that just moved, never to men
        // already resting on the far row. Kings are never demoted.
        if !moving_king {
            let promo_row = match player {
                Player::Red => masks().row_0,
                Player::Black => masks().row_7,
            };
            if to_bit & promo_row != 0 {
                *self.men_mut(player) &= !to_bit;
                *self.kings_mut(player) |= to_bit;
            }
        }
    }

    /// Validates `mv` for the side to move, applies it and passes the turn
    /// to the opponent. On rejection the state is untouched. Returns the
    /// captured square for jumps.
    pub fn make_move(&mut self, mv: Move) -> Result<Option<u8>, MoveError> {
        let player = self.current_player;
        let captured = self.validate(player, mv.from, mv.to)?;
        self.apply(player, mv.from, mv.to, captured);
        self.current_player = player.opponent();
        Ok(captured)
    }

    /// Whole-board mobility test: true iff `player` has at least one legal
    /// step or jump. Mirrors the validator's direction and edge-wrap rules
    /// exactly; men shift only toward the opponent, kings shift both ways.
    pub fn has_any_move(&self, player: Player) -> bool {
        let m = masks();
        let men = self.men(player);
        let kings = self.kings(player);
        let opponents = self.pieces(player.opponent());
        let empty = self.empty_dark();

        // "Up" is toward row 0 (right shifts), Red's forward direction.
        let up_movers = match player {
            Player::Red => men | kings,
            Player::Black => kings,
        };
        let down_movers = match player {
            Player::Red => kings,
            Player::Black => men | kings,
        };

        // Single steps.
        if ((up_movers & !m.file_h) >> 7) & empty != 0 {
            return true;
        }
        if ((up_movers & !m.file_a) >> 9) & empty != 0 {
            return true;
        }
        if ((down_movers & !m.file_h) << 9) & empty != 0 {
            return true;
        }
        if ((down_movers & !m.file_a) << 7) & empty != 0 {
            return true;
        }

        // Jumps: shift onto an adjacent opponent, then once more into an
        // empty dark square. The two-file masks guard both column steps.
        let over = ((up_movers & !m.file_gh) >> 7) & opponents;
        if (over >> 7) & empty != 0 {
            return true;
        }
        let over = ((up_movers & !m.file_ab) >> 9) & opponents;
        if (over >> 9) & empty != 0 {
            return true;
        }
        let over = ((down_movers & !m.file_gh) << 9) & opponents;
        if (over << 9) & empty != 0 {
            return true;
        }
        let over = ((down_movers & !m.file_ab) << 7) & opponents;
        if (over << 7) & empty != 0 {
            return true;
        }

        false
    }

    /// Every legal move for `player`, derived square by square from the
    /// validator. Eight candidate deltas cover all diagonal adjacencies at
    /// both step depths.
    pub fn legal_moves(&self, player: Player) -> Vec<Move> {
        const DELTAS: [i16; 8] = [-18, -14, -9, -7, 7, 9, 14, 18];
        let mut moves = Vec::new();
        let mut sources = self.pieces(player);
        while sources != 0 {
            let from = sources.trailing_zeros() as u8;
            sources &= sources - 1;
            for delta in DELTAS {
                let to = from as i16 + delta;
                if (0..64).contains(&to) && self.validate(player, from, to as u8).is_ok() {
                    moves.push(Move::new(from, to as u8));
                }
            }
        }
        moves
    }

    /// Terminal check. A player loses on running out of pieces, or on
    /// having pieces but no legal move. Material is checked before
    /// mobility, Red's side before Black's.
    pub fn winner(&self) -> Option<Player> {
        if self.piece_count(Player::Red) == 0 {
            return Some(Player::Black);
        }
        if self.piece_count(Player::Black) == 0 {
            return Some(Player::Red);
        }
        if !self.has_any_move(Player::Red) {
            return Some(Player::Black);
        }
        if !self.has_any_move(Player::Black) {
            return Some(Player::Red);
        }
        None
    }

    /// Renders the position with the bit indices alongside: `r`/`R` Red
    /// man/king, `b`/`B` Black, `-` empty dark square, `.` light square.
    pub fn display_board(&self) -> String {
        let mut out = String::new();
        out.push_str("   Checkers - bitboard (bit indices shown)\n");
        out.push_str("   P1=red (r/R), P2=black (b/B). Only dark squares are used.\n\n");
        for row in 0..8u8 {
            out.push_str(&format!("{row}  "));
            for col in 0..8u8 {
                let sq = row * 8 + col;
                let b = bit(sq);
                let ch = if !square_is_dark(sq) {
                    '.'
                } else if self.red_men & b != 0 {
                    'r'
                } else if self.red_kings & b != 0 {
                    'R'
                } else if self.black_men & b != 0 {
                    'b'
                } else if self.black_kings & b != 0 {
                    'B'
                } else {
                    '-'
                };
                out.push(ch);
                out.push(' ');
            }
            out.push_str("  ");
            for col in 0..8u8 {
                out.push_str(&format!("{:2} ", row * 8 + col));
            }
            out.push('\n');
        }
        out.push_str("   ");
        for col in 0..8 {
            out.push_str(&format!("{col} "));
        }
        out.push('\n');
        out
    }

    /// One-line piece summary for the prompt.
    pub fn display_counts(&self) -> String {
        format!(
            "P1 men={} kings={} | P2 men={} kings={}",
            count_bits64(self.red_men),
            count_bits64(self.red_kings),
            count_bits64(self.black_men),
            count_bits64(self.black_kings),
        )
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
