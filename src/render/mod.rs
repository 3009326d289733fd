pub mod renderer;

pub use renderer::{Hud, Renderer, SIDE_PANEL_WIDTH, grid_viewport};
