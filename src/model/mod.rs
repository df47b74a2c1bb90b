pub mod loader;
pub mod plane;
pub mod prediction;
pub mod role;
pub mod slice_stack;

pub use loader::{load_session, SessionPayload};
pub use plane::{PerPlane, Plane};
pub use prediction::{AnatomicalRegion, PredictionAnnotation, PredictionLabel, RegionEllipse};
pub use role::ViewerRole;
pub use slice_stack::{ImageReference, SliceStack, SYNTHETIC_SLICE_COUNT};
