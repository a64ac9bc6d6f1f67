//! Save/load codec for game states.
//!
//! The artifact is a small JSON document carrying a magic tag, a format
//! version, the four piece bitboards and a 1/2 current-player indicator.
//! Loading refuses anything that fails the format check and leaves the
//! caller's in-memory state untouched; a position with pieces off the dark
//! mask is restored verbatim (the driver warns, the codec does not judge).

use crate::game::{GameState, Player};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

const MAGIC: &str = "BCHK";
const VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("file error: {0}")]
    Io(#[from] std::io::Error),
    #[error("not a valid save file: {0}")]
    Format(#[from] serde_json::Error),
    #[error("not a valid save file: bad magic {found:?}")]
    BadMagic { found: String },
    #[error("unsupported save version {found}")]
    UnsupportedVersion { found: u32 },
}

/// The persisted form of a game.
#[derive(Debug, Serialize, Deserialize)]
struct SaveGame {
    magic: String,
    version: u32,
    red_men: u64,
    red_kings: u64,
    black_men: u64,
    black_kings: u64,
    current_player: u8,
}

impl SaveGame {
    fn from_state(state: &GameState) -> Self {
        SaveGame {
            magic: MAGIC.to_string(),
            version: VERSION,
            red_men: state.men(Player::Red),
            red_kings: state.kings(Player::Red),
            black_men: state.men(Player::Black),
            black_kings: state.kings(Player::Black),
            current_player: state.current_player().number(),
        }
    }

    fn into_state(self) -> GameState {
        // An out-of-range player indicator falls back to player 1; the
        // magic/version check is the corruption gate, not this field.
        let player = Player::from_number(self.current_player).unwrap_or(Player::Red);
        GameState::from_bitboards(
            self.red_men,
            self.red_kings,
            self.black_men,
            self.black_kings,
            player,
        )
    }
}

/// Writes `state` to `path`.
pub fn save_game(state: &GameState, path: impl AsRef<Path>) -> Result<(), SaveError> {
    let artifact = SaveGame::from_state(state);
    let text = serde_json::to_string_pretty(&artifact)?;
    fs::write(path, text)?;
    Ok(())
}

/// Reads a state back from `path`. The restored boards are accepted
/// verbatim, including positions off the dark-square mask.
pub fn load_game(path: impl AsRef<Path>) -> Result<GameState, SaveError> {
    let text = fs::read_to_string(path)?;
    let artifact: SaveGame = serde_json::from_str(&text)?;
    if artifact.magic != MAGIC {
        return Err(SaveError::BadMagic {
            found: artifact.magic,
        });
    }
    if artifact.version != VERSION {
        return Err(SaveError::UnsupportedVersion {
            found: artifact.version,
        });
    }
    Ok(artifact.into_state())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Move;
    use std::path::PathBuf;

    /// Unique temp path per test so parallel runs do not collide.
    fn temp_path(name: &str) -> PathBuf {
        let mut p = std::env::temp_dir();
        p.push(format!("bitcheckers-{}-{}", std::process::id(), name));
        p
    }

    #[test]
    fn round_trip_preserves_position_and_turn() {
        let mut g = GameState::new();
        g.make_move(Move::new(44, 37)).expect("legal opening move");
        let path = temp_path("roundtrip.json");

        save_game(&g, &path).expect("save");
        let restored = load_game(&path).expect("load");
        fs::remove_file(&path).ok();

        assert_eq!(restored, g);
        assert_eq!(restored.current_player(), Player::Black);
    }

    #[test]
    fn wrong_magic_is_refused() {
        let path = temp_path("magic.json");
        fs::write(
            &path,
            r#"{"magic":"NOPE","version":1,"red_men":0,"red_kings":0,
               "black_men":0,"black_kings":0,"current_player":1}"#,
        )
        .expect("write");
        let err = load_game(&path).unwrap_err();
        fs::remove_file(&path).ok();
        assert!(matches!(err, SaveError::BadMagic { .. }));
    }

    #[test]
    fn wrong_version_is_refused() {
        let path = temp_path("version.json");
        fs::write(
            &path,
            r#"{"magic":"BCHK","version":9,"red_men":0,"red_kings":0,
               "black_men":0,"black_kings":0,"current_player":1}"#,
        )
        .expect("write");
        let err = load_game(&path).unwrap_err();
        fs::remove_file(&path).ok();
        assert!(matches!(err, SaveError::UnsupportedVersion { found: 9 }));
    }

    #[test]
    fn unparsable_text_is_refused() {
        let path = temp_path("garbage.json");
        fs::write(&path, "BCHK 1 but not json").expect("write");
        let err = load_game(&path).unwrap_err();
        fs::remove_file(&path).ok();
        assert!(matches!(err, SaveError::Format(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_game(temp_path("does-not-exist.json")).unwrap_err();
        assert!(matches!(err, SaveError::Io(_)));
    }

    #[test]
    fn off_dark_positions_load_with_a_flag_not_an_error() {
        // Square 4 is a light square; the codec accepts it verbatim.
        let path = temp_path("light.json");
        fs::write(
            &path,
            r#"{"magic":"BCHK","version":1,"red_men":16,"red_kings":0,
               "black_men":0,"black_kings":0,"current_player":2}"#,
        )
        .expect("write");
        let restored = load_game(&path).expect("load");
        fs::remove_file(&path).ok();
        assert!(!restored.on_dark_squares());
        assert_eq!(restored.current_player(), Player::Black);
    }

    #[test]
    fn bogus_player_indicator_falls_back_to_player_one() {
        let path = temp_path("player.json");
        fs::write(
            &path,
            r#"{"magic":"BCHK","version":1,"red_men":0,"red_kings":0,
               "black_men":0,"black_kings":0,"current_player":7}"#,
        )
        .expect("write");
        let restored = load_game(&path).expect("load");
        fs::remove_file(&path).ok();
        assert_eq!(restored.current_player(), Player::Red);
    }
}
