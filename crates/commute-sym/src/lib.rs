//! Symbolic execution engine layer over Z3.
//!
//! The engine owns everything solver-facing: the declaration registry
//! ([`Env`]), branch-tracked execution ([`symbolic_apply`]), satisfiability
//! queries returning snapshotted models ([`env::Env::check`]), and the
//! conversion between solver values and engine values ([`ConcreteModel`]).
//! Analysis code above this crate never touches a raw Z3 model.

pub mod env;
pub mod exec;
pub mod model;
pub mod solver;

pub use env::{DeclId, DeclShape, Env, IndexSort, ScalarSort, SortId, SymMap};
pub use exec::{symbolic_apply, Exec, PathResult};
pub use model::{ConcreteModel, ModelDecl, SolvedScalar};
pub use solver::{exists, sat_of, simplify_deep, sym_eq, symand, symnot, symor, CheckOutcome};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SymError {
    /// Declaration shape the analysis cannot decompose.
    #[error("unsupported declaration: {0}")]
    UnsupportedDecl(String),

    /// A name was registered twice with incompatible shapes.
    #[error("declaration '{name}' redefined with a different shape")]
    ShapeMismatch { name: String },

    /// Ill-typed or unresolvable symbolic value.
    #[error("encoding error: {0}")]
    Encoding(String),
}

pub type SymResult<T> = Result<T, SymError>;
