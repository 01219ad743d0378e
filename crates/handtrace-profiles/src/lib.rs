pub mod drawing;
pub mod error;
pub mod machine;

pub use drawing::{DrawingOverrides, DrawingParameters, DrawingStyle};
pub use error::{ProfileError, ProfileResult};
pub use machine::{MachineKind, MachineProfile};
