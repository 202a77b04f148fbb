use std::time::Duration;

use pausable_clock::{PausableClock, PausableInstant};

use crate::{
    dims::Dims,
    error::MazeError,
    gameboard::{CellWall, Maze},
    pathfinding::{find_distinct_paths, Route},
};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum RunningGameState {
    NotStarted,
    Running,
    Finished,
}

/// Summary shown once the goal is reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameStats {
    pub score: u32,
    pub time: String,
    pub moves: usize,
}

pub struct RunningGame {
    maze: Maze,
    state: RunningGameState,
    clock: Option<PausableClock>,
    start: Option<PausableInstant>,
    entry: Dims,
    goal: Dims,
    player_pos: Dims,
    history: Vec<Dims>,
    victory_reported: bool,
}

impl RunningGame {
    /// Starts a game with the player on `entry` and the goal in the bottom
    /// right corner.
    pub fn new(maze: Maze, entry: Dims) -> Result<Self, MazeError> {
        maze.check_bounds(entry)?;

        let mut game = RunningGame {
            goal: maze.size() - Dims::ONE,
            maze,
            state: RunningGameState::NotStarted,
            clock: None,
            start: None,
            entry,
            player_pos: entry,
            history: vec![entry],
            victory_reported: false,
        };
        game.start_clock();

        Ok(game)
    }

    fn start_clock(&mut self) {
        let clock = PausableClock::default();
        self.start = Some(clock.now());
        self.clock = Some(clock);
    }

    pub fn get_state(&self) -> RunningGameState {
        self.state
    }

    pub fn get_maze(&self) -> &Maze {
        &self.maze
    }

    pub fn get_player_pos(&self) -> Dims {
        self.player_pos
    }

    pub fn get_goal_pos(&self) -> Dims {
        self.goal
    }

    pub fn get_entry_pos(&self) -> Dims {
        self.entry
    }

    /// Every cell the player stood on, starting with the entry.
    pub fn get_history(&self) -> &[Dims] {
        &self.history
    }

    pub fn get_move_count(&self) -> usize {
        self.history.len() - 1
    }

    pub fn get_available_moves(&self) -> [bool; 4] {
        CellWall::get_in_order().map(|wall| self.maze.is_passable(self.player_pos, wall))
    }

    /// Moves the player one cell, returns whether the move was accepted.
    ///
    /// The clock already runs from the moment the maze was set up, so time
    /// spent before the first move counts. Reaching the goal stops it and
    /// any further moves are rejected.
    pub fn apply_move(&mut self, dir: CellWall) -> bool {
        if self.state == RunningGameState::Finished {
            return false;
        }

        if !self.maze.is_passable(self.player_pos, dir) {
            return false;
        }

        if self.state == RunningGameState::NotStarted {
            self.state = RunningGameState::Running;
        }

        self.player_pos += dir.to_coord();
        self.history.push(self.player_pos);

        if self.player_pos == self.goal {
            self.state = RunningGameState::Finished;
            if let Some(clock) = self.clock.as_mut() {
                clock.pause();
            }
            log::info!("Goal reached in {} moves", self.get_move_count());
        }

        true
    }

    /// Returns the final stats the first time it's called after the goal was
    /// reached, `None` otherwise.
    pub fn check_victory(&mut self) -> Option<GameStats> {
        if self.state != RunningGameState::Finished || self.victory_reported {
            return None;
        }

        self.victory_reported = true;
        let elapsed = self.get_elapsed().unwrap_or_default();

        Some(GameStats {
            score: score_for(elapsed, self.get_move_count()),
            time: format_time(elapsed),
            moves: self.get_move_count(),
        })
    }

    pub fn get_elapsed(&self) -> Option<Duration> {
        match (&self.clock, &self.start) {
            (Some(clock), Some(start)) => Some(start.elapsed(clock)),
            _ => None,
        }
    }

    pub fn formatted_time(&self) -> String {
        format_time(self.get_elapsed().unwrap_or_default())
    }

    pub fn score(&self) -> u32 {
        score_for(self.get_elapsed().unwrap_or_default(), self.get_move_count())
    }

    /// Distinct routes from the player to the goal.
    pub fn routes(&self, max_paths: usize) -> Result<Vec<Route>, MazeError> {
        find_distinct_paths(&self.maze, self.player_pos, self.goal, max_paths)
    }

    /// Puts the player back on the entry and restarts the clock.
    pub fn reset(&mut self) {
        self.state = RunningGameState::NotStarted;
        self.player_pos = self.entry;
        self.history.clear();
        self.history.push(self.entry);
        self.victory_reported = false;

        self.start_clock();
    }

    /// Swaps in a freshly generated maze and resets the player.
    pub fn set_maze(&mut self, maze: Maze) -> Result<(), MazeError> {
        maze.check_bounds(self.entry)?;

        self.goal = maze.size() - Dims::ONE;
        self.maze = maze;
        self.reset();

        Ok(())
    }
}

/// Ten seconds and a hundred moves are worth points, anything slower scores
/// zero in that category.
pub fn score_for(elapsed: Duration, moves: usize) -> u32 {
    let time_score = 10_000u128.saturating_sub(elapsed.as_millis());
    let move_score = 1_000u128.saturating_sub(moves as u128 * 10);
    ((time_score + move_score) / 100) as u32
}

/// Formats as `mm:ss`.
pub fn format_time(elapsed: Duration) -> String {
    let total = elapsed.as_secs();
    format!("{:02}:{:02}", total / 60, total % 60)
}
