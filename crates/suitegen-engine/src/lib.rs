pub mod diagnostics;
pub mod emit;
pub mod escape;
pub mod fixture;
pub mod io;
pub mod models;
pub mod pipeline;
pub mod sentinel;
pub mod tags;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use diagnostics::*;
pub use emit::{Compare, EmissionMode, EmitOptions, EmitReport, InputSource, LineNormalization, SpecStyle};
pub use fixture::{FixtureError, inherit::ResolvedCase};
pub use io::*;
pub use models::*;
pub use pipeline::{Generated, LoadError, SuiteLoader, generate};
