//! Step phrases, their matching, and the per-scenario context they act on.
mod context;
mod definitions;
mod pattern;
mod registry;


pub use context::{RepositoryRef, World};
pub use definitions::StepKind;
pub use pattern::StepPattern;
pub use registry::{StepLookup, StepMatch, StepRegistry};
