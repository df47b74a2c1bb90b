pub mod controls;
pub mod image_viewer;
pub mod session_panel;

pub use controls::control_bar;
pub use image_viewer::{image_panel, RenderedFrame, SliceImage};
pub use session_panel::session_panel;
