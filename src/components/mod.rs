pub mod segmented_toggle;

pub use segmented_toggle::plane_toggle;
