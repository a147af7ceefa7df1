/// Top-level phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Playing,
    /// Timed pause between levels; only the countdown advances
    LevelTransition,
    /// Lives ran out or the boss was destroyed
    GameOver,
}
