pub mod formatting;

pub use formatting::{confidence_text, stack_summary, truncate_locator};
