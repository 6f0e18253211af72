//! Models under commutativity analysis.

pub mod namespace;
pub mod register;
pub mod sink;

pub use namespace::Namespace;
pub use register::Register;
pub use sink::JsonSink;

/// Names accepted on the command line.
pub const MODEL_NAMES: &[&str] = &["register", "namespace"];
