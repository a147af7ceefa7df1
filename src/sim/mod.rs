//! Frame simulation
//!
//! All gameplay rules live here. Nothing in this module touches the
//! terminal: randomness comes from the world's seeded RNG and time only
//! enters through the `dt` passed to [`tick`].

pub mod collision;
pub mod level;
pub mod state;
pub mod tick;

pub use collision::Aabb;
pub use level::{LEVELS, LevelProfile, LevelState};
pub use state::{ScreenShake, World};
pub use tick::{TickInput, tick};
