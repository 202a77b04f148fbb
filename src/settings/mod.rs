use ron::{self, extensions::Extensions};
use serde::{Deserialize, Serialize};

use crate::{algorithms::generate_maze, dims::Dims, error::MazeError, game::RunningGame};

const DEFAULT_WIDTH: i32 = 10;
const DEFAULT_HEIGHT: i32 = 10;
const DEFAULT_CELL_SIZE: i32 = 30;
const DEFAULT_MAX_PATHS: usize = 2;
const DEFAULT_SECONDS_PER_CELL: f32 = 0.5;

pub const DEFAULT_SETTINGS: &str = include_str!("./default_settings.ron");

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub width: Option<i32>,
    #[serde(default)]
    pub height: Option<i32>,
    #[serde(default)]
    pub cell_size: Option<i32>,
    #[serde(default)]
    pub max_paths: Option<usize>,
    #[serde(default)]
    pub seconds_per_cell: Option<f32>,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses settings from a RON document, fields may be omitted.
    pub fn from_ron(source: &str) -> Result<Self, MazeError> {
        let options = ron::Options::default().with_default_extension(Extensions::IMPLICIT_SOME);
        Ok(options.from_str(source)?)
    }

    pub fn load_default() -> Self {
        Self::from_ron(DEFAULT_SETTINGS).unwrap_or_default()
    }

    pub fn set_size(mut self, size: Dims) -> Self {
        self.width = Some(size.0);
        self.height = Some(size.1);
        self
    }

    /// Maze size, the size itself is validated when the maze is created.
    pub fn get_size(&self) -> Dims {
        Dims(
            self.width.unwrap_or(DEFAULT_WIDTH),
            self.height.unwrap_or(DEFAULT_HEIGHT),
        )
    }

    pub fn set_cell_size(mut self, value: i32) -> Self {
        self.cell_size = Some(value);
        self
    }

    pub fn get_cell_size(&self) -> i32 {
        match self.cell_size {
            Some(size) if size <= 0 => {
                log::warn!("Invalid cell size {}, using default value", size);
                DEFAULT_CELL_SIZE
            }
            Some(size) => size,
            None => DEFAULT_CELL_SIZE,
        }
    }

    pub fn set_max_paths(mut self, value: usize) -> Self {
        self.max_paths = Some(value);
        self
    }

    pub fn get_max_paths(&self) -> usize {
        self.max_paths.unwrap_or(DEFAULT_MAX_PATHS)
    }

    pub fn set_seconds_per_cell(mut self, value: f32) -> Self {
        self.seconds_per_cell = Some(value);
        self
    }

    pub fn get_seconds_per_cell(&self) -> f32 {
        match self.seconds_per_cell {
            Some(secs) if !secs.is_finite() || secs < 0.0 => {
                log::warn!("Invalid seconds per cell {}, using default value", secs);
                DEFAULT_SECONDS_PER_CELL
            }
            Some(secs) => secs,
            None => DEFAULT_SECONDS_PER_CELL,
        }
    }

    pub fn set_seed(mut self, value: u64) -> Self {
        self.seed = Some(value);
        self
    }

    pub fn get_seed(&self) -> Option<u64> {
        self.seed
    }

    /// Where the player starts, middle of the left edge.
    pub fn entry(&self) -> Dims {
        Dims(0, self.get_size().1 / 2)
    }

    /// Bottom right corner.
    pub fn goal(&self) -> Dims {
        self.get_size() - Dims::ONE
    }

    /// Generates a maze from these settings and starts a game on it.
    pub fn new_game(&self) -> Result<RunningGame, MazeError> {
        let maze = generate_maze(self.get_size(), self.entry(), self.get_seed())?;
        RunningGame::new(maze, self.entry())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_document_matches_defaults() {
        let settings = Settings::from_ron(DEFAULT_SETTINGS).unwrap();
        assert_eq!(settings.get_size(), Dims(10, 10));
        assert_eq!(settings.get_cell_size(), 30);
        assert_eq!(settings.get_max_paths(), 2);
        assert_eq!(settings.get_seconds_per_cell(), 0.5);
        assert_eq!(settings.get_seed(), None);

        let empty = Settings::new();
        assert_eq!(empty.get_size(), settings.get_size());
        assert_eq!(empty.get_max_paths(), settings.get_max_paths());
    }

    #[test]
    fn partial_document() {
        let settings = Settings::from_ron("(width: 20, seed: 7)").unwrap();
        assert_eq!(settings.get_size(), Dims(20, 10));
        assert_eq!(settings.get_seed(), Some(7));
        assert_eq!(settings.entry(), Dims(0, 5));
        assert_eq!(settings.goal(), Dims(19, 9));
    }

    #[test]
    fn broken_document_is_an_error() {
        assert!(matches!(
            Settings::from_ron("(width: \"wide\")"),
            Err(MazeError::Settings(_))
        ));
    }

    #[test]
    fn invalid_values_fall_back() {
        let settings = Settings::new().set_cell_size(-4).set_seconds_per_cell(f32::NAN);
        assert_eq!(settings.get_cell_size(), 30);
        assert_eq!(settings.get_seconds_per_cell(), 0.5);
    }

    #[test]
    fn new_game_uses_settings() {
        let settings = Settings::new().set_size(Dims(6, 4)).set_seed(11);
        let game = settings.new_game().unwrap();
        assert_eq!(game.get_maze().size(), Dims(6, 4));
        assert_eq!(game.get_player_pos(), Dims(0, 2));
        assert_eq!(game.get_goal_pos(), Dims(5, 3));

        assert!(Settings::new().set_size(Dims(0, 4)).new_game().is_err());
    }
}
