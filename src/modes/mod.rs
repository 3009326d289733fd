pub mod play;
pub mod scores;

pub use play::{PlayMode, fit_to_terminal};
pub use scores::ScoresMode;
