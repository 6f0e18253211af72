//! Concrete model snapshots.
//!
//! A [`ConcreteModel`] freezes one solver assignment together with the
//! declaration registry it was produced under, so decomposition can run
//! without touching the solver again. Values are read back through
//! `Model::eval`; identity universes are derived from the values the
//! model gives to registered constants and recorded map indices.

use std::collections::HashMap;

use z3::ast::{Array, Ast, Dynamic};
use z3::Model;

use crate::env::{Decl, DeclNode, DeclShape, Env, IndexSort, ScalarSort, SortId};
use crate::{SymError, SymResult};

/// Indirection bound when resolving wrapped model values.
const MAX_RESOLVE_DEPTH: usize = 4;

/// A concrete scalar read out of a model.
#[derive(Debug, Clone)]
pub enum SolvedScalar {
    Bool(bool),
    Int(i64),
    /// A universe element of an identity sort, keyed by its printed form.
    Identity { sort: SortId, key: String },
}

/// Frozen view of one declaration inside a snapshot.
pub struct ModelDecl {
    pub name: String,
    pub internal: bool,
    pub sem_kind: String,
    pub shape: DeclShape,
    scalar: Option<Dynamic>,
    map: Option<MapSnapshot>,
}

impl ModelDecl {
    pub fn scalar_expr(&self) -> SymResult<&Dynamic> {
        self.scalar
            .as_ref()
            .ok_or_else(|| SymError::Encoding(format!("declaration '{}' has no scalar", self.name)))
    }

    pub fn map(&self) -> SymResult<&MapSnapshot> {
        self.map
            .as_ref()
            .ok_or_else(|| SymError::Encoding(format!("declaration '{}' has no map", self.name)))
    }
}

pub struct MapSnapshot {
    array: Array,
    touched: Vec<Dynamic>,
}

impl MapSnapshot {
    pub fn touched(&self) -> &[Dynamic] {
        &self.touched
    }

    pub fn select(&self, idx: &Dynamic) -> Dynamic {
        self.array.select(idx)
    }
}

/// One solver assignment, snapshotted with the declarations it covers.
pub struct ConcreteModel {
    model: Model,
    decls: Vec<ModelDecl>,
    universes: HashMap<SortId, Vec<String>>,
}

impl ConcreteModel {
    pub(crate) fn snapshot(env: &Env, model: Model) -> ConcreteModel {
        let decls: Vec<ModelDecl> = env
            .decl_slice()
            .iter()
            .map(|d: &Decl| {
                let (scalar, map) = match &d.node {
                    DeclNode::Scalar(ast) => (Some(ast.clone()), None),
                    DeclNode::Map { array, touched } => (
                        None,
                        Some(MapSnapshot { array: array.clone(), touched: touched.clone() }),
                    ),
                    DeclNode::Func(_) => (None, None),
                };
                ModelDecl {
                    name: d.name.clone(),
                    internal: d.internal,
                    sem_kind: d.sem_kind.clone(),
                    shape: d.shape,
                    scalar,
                    map,
                }
            })
            .collect();

        let mut snapshot = ConcreteModel { model, decls, universes: HashMap::new() };
        snapshot.universes = snapshot.collect_universes();
        snapshot
    }

    /// Identity-sort universes: every distinct value the model assigns to
    /// an expression of that sort flowing through the registry.
    fn collect_universes(&self) -> HashMap<SortId, Vec<String>> {
        let mut candidates: Vec<(SortId, Dynamic)> = Vec::new();
        for decl in &self.decls {
            match decl.shape {
                DeclShape::Scalar(ScalarSort::Identity(sid)) => {
                    if let Some(expr) = &decl.scalar {
                        candidates.push((sid, expr.clone()));
                    }
                }
                DeclShape::Map { index, value } => {
                    if let Some(map) = &decl.map {
                        if let IndexSort::Identity(sid) = index {
                            for idx in &map.touched {
                                candidates.push((sid, idx.clone()));
                            }
                        }
                        if let ScalarSort::Identity(vsid) = value {
                            for idx in &map.touched {
                                candidates.push((vsid, map.select(idx)));
                            }
                        }
                    }
                }
                _ => {}
            }
        }
        let mut universes: HashMap<SortId, Vec<String>> = HashMap::new();
        for (sid, expr) in candidates {
            let Some(value) = self.model.eval(&expr, false) else { continue };
            // An expression the model never constrained evaluates to
            // itself; it names no universe element.
            if value.to_string() == expr.to_string() || !value.children().is_empty() {
                continue;
            }
            let keys = universes.entry(sid).or_default();
            let key = value.to_string();
            if !keys.contains(&key) {
                keys.push(key);
            }
        }
        universes
    }

    pub fn decls(&self) -> &[ModelDecl] {
        &self.decls
    }

    /// Distinct value keys of an identity sort, in first-seen order.
    pub fn universe(&self, sort: SortId) -> &[String] {
        self.universes.get(&sort).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Read a scalar out of the model without completion. `Ok(None)`
    /// means the model never assigned the expression, which callers skip.
    /// Wrapped values are chased through bounded completion re-evaluation;
    /// a value that never bottoms out is an encoding error.
    pub fn eval_scalar(&self, expr: &Dynamic, sort: ScalarSort) -> SymResult<Option<SolvedScalar>> {
        let first = self
            .model
            .eval(expr, false)
            .ok_or_else(|| SymError::Encoding(format!("cannot evaluate '{expr}'")))?;
        if first.to_string() == expr.to_string() {
            return Ok(None);
        }
        let mut current = first;
        for _ in 0..MAX_RESOLVE_DEPTH {
            if let Some(solved) = concrete_scalar(&current, sort) {
                return Ok(Some(solved));
            }
            let next = self
                .model
                .eval(&current, true)
                .ok_or_else(|| SymError::Encoding(format!("cannot evaluate '{current}'")))?;
            if next.to_string() == current.to_string() {
                break;
            }
            current = next;
        }
        Err(SymError::Encoding(format!("cannot resolve model value '{current}'")))
    }

    /// Printed concrete value under full completion, for materialization.
    /// Only call after exclusion conditions have been computed.
    pub fn eval_display(&self, expr: &Dynamic) -> SymResult<String> {
        let value = self
            .model
            .eval(expr, true)
            .ok_or_else(|| SymError::Encoding(format!("cannot evaluate '{expr}'")))?;
        Ok(value.to_string())
    }

    /// Raw solver assignment text, for the audit model file.
    pub fn dump(&self) -> String {
        self.model.to_string()
    }
}

fn concrete_scalar(value: &Dynamic, sort: ScalarSort) -> Option<SolvedScalar> {
    match sort {
        ScalarSort::Bool => value.as_bool().and_then(|b| b.as_bool()).map(SolvedScalar::Bool),
        ScalarSort::Int => value.as_int().and_then(|i| i.as_i64()).map(SolvedScalar::Int),
        ScalarSort::Identity(sid) => {
            if value.children().is_empty() {
                Some(SolvedScalar::Identity { sort: sid, key: value.to_string() })
            } else {
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::{symand, CheckOutcome};
    use z3::ast::{Ast, Int};

    fn checked(env: &Env, cond: &z3::ast::Bool) -> ConcreteModel {
        match env.check(cond) {
            CheckOutcome::Sat(m) => m,
            other => panic!(
                "expected sat, got: {}",
                match other {
                    CheckOutcome::Unsat => "unsat".to_string(),
                    CheckOutcome::Unknown { reason } => reason,
                    CheckOutcome::Sat(_) => unreachable!(),
                }
            ),
        }
    }

    #[test]
    fn assigned_int_reads_back() {
        let mut env = Env::new();
        let x = env.int_const("x", "value").unwrap();
        let model = checked(&env, &x.eq(&Int::from_i64(7)));
        let solved = model
            .eval_scalar(&Dynamic::from_ast(&x), ScalarSort::Int)
            .unwrap();
        assert!(matches!(solved, Some(SolvedScalar::Int(7))), "got: {solved:?}");
    }

    #[test]
    fn unassigned_constant_is_skipped() {
        let mut env = Env::new();
        let x = env.int_const("x", "value").unwrap();
        let y = env.int_const("y", "value").unwrap();
        let model = checked(&env, &x.eq(&Int::from_i64(1)));
        let solved = model
            .eval_scalar(&Dynamic::from_ast(&y), ScalarSort::Int)
            .unwrap();
        assert!(solved.is_none(), "unconstrained constant should read as unassigned");
    }

    #[test]
    fn identity_universe_covers_constrained_constants() {
        let mut env = Env::new();
        let name = env.identity_sort("Name");
        let a = env.id_const("a", name, "name").unwrap();
        let b = env.id_const("b", name, "name").unwrap();
        let model = checked(&env, &symand(&[crate::solver::sym_eq(&a, &b)]));
        // Both constants share one universe element.
        assert_eq!(model.universe(name).len(), 1);
    }
}
