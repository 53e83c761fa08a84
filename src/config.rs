//! Tunables a host passes to the engine.
use crate::engine::{check_size, Board, DEFAULT_BOARD_SIZE, DEFAULT_MISMATCH_DELAY};
use crate::error::BoardError;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::time::Duration;

/// Game configuration. `Default` matches the classic 4x4 game on a 500x400 window.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    /// Tiles per side. `board_size * board_size` must be even.
    pub board_size: usize,
    pub surface_width: u32,
    pub surface_height: u32,
    /// Update cycles per second.
    pub fps: u32,
    /// How long a mismatched pair stays face-up.
    pub mismatch_delay: Duration,
    /// Seed for the face shuffle. `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            board_size: DEFAULT_BOARD_SIZE,
            surface_width: 500,
            surface_height: 400,
            fps: 60,
            mismatch_delay: DEFAULT_MISMATCH_DELAY,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Checks that this configuration can start a game.
    ///
    /// # Errors
    /// Returns the first problem found: an empty, odd-celled or oversized board,
    /// a surface too short to give each tile at least one pixel, or a zero tick rate.
    pub fn validate(&self) -> Result<(), BoardError> {
        let size = self.board_size;
        check_size(size)?;
        if self.tile_size() == 0 || self.surface_width < self.surface_height {
            return Err(BoardError::SurfaceTooSmall {
                width: self.surface_width,
                height: self.surface_height,
                size,
            });
        }
        if self.fps == 0 {
            return Err(BoardError::ZeroTickRate);
        }
        Ok(())
    }

    /// Side of each square tile: the surface height split evenly between rows.
    pub fn tile_size(&self) -> u32 {
        match u32::try_from(self.board_size) {
            Ok(0) | Err(_) => 0,
            Ok(size) => self.surface_height / size,
        }
    }

    /// Time budget of one update cycle.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.fps.max(1)
    }

    /// Validates the configuration and builds a freshly shuffled board.
    pub fn build_board(&self) -> Result<Board, BoardError> {
        self.validate()?;
        let mut rng = match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        let board = Board::build(self.board_size, self.tile_size(), &mut rng)?;
        Ok(board.with_mismatch_delay(self.mismatch_delay))
    }

    /// Builds a board from layout rows, applying this configuration's delay.
    ///
    /// The board size comes from the layout, not from `board_size`.
    pub fn build_board_from_layout(&self, rows: &[&str]) -> Result<Board, BoardError> {
        let size = u32::try_from(rows.len()).unwrap_or(u32::MAX).max(1);
        let tile_size = self.surface_height / size;
        let board = crate::utils::board_from_str_array(rows, tile_size)?;
        Ok(board.with_mismatch_delay(self.mismatch_delay))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::MAX_BOARD_SIZE;

    #[test]
    fn test_default_config_is_valid() {
        let config = GameConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.tile_size(), 100);
        assert_eq!(config.frame_interval(), Duration::from_secs(1) / 60);
    }

    #[test]
    fn test_validate_rejects_odd_board() {
        let config = GameConfig {
            board_size: 5,
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(BoardError::OddCellCount { size: 5, cells: 25 })
        );
        assert!(config.build_board().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_board() {
        let config = GameConfig {
            board_size: 0,
            ..GameConfig::default()
        };
        assert_eq!(config.validate(), Err(BoardError::EmptyBoard));
    }

    #[test]
    fn test_validate_rejects_large_board() {
        let config = GameConfig {
            board_size: 12,
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(BoardError::TooLarge {
                size: 12,
                max: MAX_BOARD_SIZE
            })
        );

        let huge = GameConfig {
            board_size: 1usize << 32,
            ..GameConfig::default()
        };
        assert_eq!(
            huge.validate(),
            Err(BoardError::TooLarge {
                size: 1usize << 32,
                max: MAX_BOARD_SIZE
            })
        );
        assert!(huge.build_board().is_err());
    }

    #[test]
    fn test_validate_rejects_small_surface() {
        let config = GameConfig {
            surface_height: 3,
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(BoardError::SurfaceTooSmall {
                width: 500,
                height: 3,
                size: 4
            })
        );
    }

    #[test]
    fn test_validate_rejects_zero_fps() {
        let config = GameConfig {
            fps: 0,
            ..GameConfig::default()
        };
        assert_eq!(config.validate(), Err(BoardError::ZeroTickRate));
    }

    #[test]
    fn test_build_board_applies_config() {
        let config = GameConfig {
            board_size: 6,
            mismatch_delay: Duration::from_millis(250),
            seed: Some(9),
            ..GameConfig::default()
        };
        let board = config.build_board().unwrap();
        assert_eq!(board.size(), 6);
        assert_eq!(board.tile_size(), 66);
        assert_eq!(board.mismatch_delay(), Duration::from_millis(250));

        let again = config.build_board().unwrap();
        let faces = |b: &Board| b.tiles().map(|t| t.face()).collect::<Vec<_>>();
        assert_eq!(faces(&board), faces(&again));
    }

    #[test]
    fn test_build_board_from_layout() {
        let config = GameConfig::default();
        let board = config.build_board_from_layout(&["AB", "BA"]).unwrap();
        assert_eq!(board.size(), 2);
        assert_eq!(board.tile_size(), 200);
        assert_eq!(board.mismatch_delay(), DEFAULT_MISMATCH_DELAY);
    }
}
