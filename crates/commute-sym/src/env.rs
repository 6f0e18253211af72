//! Declaration registry: named symbolic constants, identity sorts, maps.
//!
//! Declarations are registered by name. Re-registering a name returns the
//! same symbolic constant, which is how independent executions of a call
//! set come to share one symbolic initial state. Each declaration carries
//! an explicit internal flag, a semantic-kind tag, and a closed shape
//! descriptor; downstream decomposition dispatches on the shape alone.

use std::collections::HashMap;

use z3::ast::{Array, Ast, Bool, Dynamic, Int};
use z3::{FuncDecl, Sort, Symbol};

use crate::{SymError, SymResult};

/// Handle to a registered identity (uninterpreted) sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SortId(pub(crate) usize);

/// Handle to a registered declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DeclId(pub(crate) usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarSort {
    Bool,
    Int,
    Identity(SortId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexSort {
    Int,
    Identity(SortId),
}

/// Closed set of declaration shapes the analysis understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclShape {
    Scalar(ScalarSort),
    Map { index: IndexSort, value: ScalarSort },
    /// Uninterpreted function of nonzero arity. Registered for
    /// completeness; the matcher rejects it.
    Func { arity: usize },
}

pub(crate) enum DeclNode {
    Scalar(Dynamic),
    Map { array: Array, touched: Vec<Dynamic> },
    Func(FuncDecl),
}

pub(crate) struct Decl {
    pub name: String,
    pub internal: bool,
    pub sem_kind: String,
    pub shape: DeclShape,
    pub node: DeclNode,
}

struct IdSort {
    #[allow(dead_code)]
    name: String,
    sort: Sort,
}

/// The declaration registry for one call-set analysis.
pub struct Env {
    sorts: Vec<IdSort>,
    sort_ids: HashMap<String, SortId>,
    decls: Vec<Decl>,
    by_name: HashMap<String, DeclId>,
    timeout_ms: Option<u64>,
}

impl Env {
    pub fn new() -> Self {
        Env {
            sorts: Vec::new(),
            sort_ids: HashMap::new(),
            decls: Vec::new(),
            by_name: HashMap::new(),
            timeout_ms: None,
        }
    }

    /// Per-query solver timeout for every check issued through this env.
    pub fn set_timeout_ms(&mut self, ms: Option<u64>) {
        self.timeout_ms = ms;
    }

    pub(crate) fn timeout_ms(&self) -> Option<u64> {
        self.timeout_ms
    }

    /// Register (or look up) a named identity sort.
    pub fn identity_sort(&mut self, name: &str) -> SortId {
        if let Some(&id) = self.sort_ids.get(name) {
            return id;
        }
        let id = SortId(self.sorts.len());
        self.sorts.push(IdSort {
            name: name.to_string(),
            sort: Sort::uninterpreted(Symbol::String(name.to_string())),
        });
        self.sort_ids.insert(name.to_string(), id);
        id
    }

    pub(crate) fn z3_sort(&self, sort: ScalarSort) -> Sort {
        match sort {
            ScalarSort::Bool => Sort::bool(),
            ScalarSort::Int => Sort::int(),
            ScalarSort::Identity(id) => self.sorts[id.0].sort.clone(),
        }
    }

    fn index_z3_sort(&self, sort: IndexSort) -> Sort {
        match sort {
            IndexSort::Int => Sort::int(),
            IndexSort::Identity(id) => self.sorts[id.0].sort.clone(),
        }
    }

    fn new_scalar(&self, name: &str, sort: ScalarSort) -> Dynamic {
        match sort {
            ScalarSort::Bool => Dynamic::from_ast(&Bool::new_const(name)),
            ScalarSort::Int => Dynamic::from_ast(&Int::new_const(name)),
            ScalarSort::Identity(_) => {
                FuncDecl::new(name, &[], &self.z3_sort(sort)).apply(&[])
            }
        }
    }

    fn register(
        &mut self,
        name: &str,
        internal: bool,
        sem_kind: &str,
        shape: DeclShape,
        node: impl FnOnce(&Env) -> DeclNode,
    ) -> SymResult<DeclId> {
        if let Some(&id) = self.by_name.get(name) {
            if self.decls[id.0].shape != shape {
                return Err(SymError::ShapeMismatch { name: name.to_string() });
            }
            return Ok(id);
        }
        let node = node(self);
        let id = DeclId(self.decls.len());
        self.decls.push(Decl {
            name: name.to_string(),
            internal,
            sem_kind: sem_kind.to_string(),
            shape,
            node,
        });
        self.by_name.insert(name.to_string(), id);
        Ok(id)
    }

    fn scalar_node(&self, id: DeclId) -> SymResult<Dynamic> {
        match &self.decls[id.0].node {
            DeclNode::Scalar(ast) => Ok(ast.clone()),
            _ => Err(SymError::Encoding(format!(
                "declaration '{}' is not a scalar",
                self.decls[id.0].name
            ))),
        }
    }

    pub fn scalar_const(&mut self, name: &str, sort: ScalarSort, kind: &str) -> SymResult<Dynamic> {
        let id = self.register(name, false, kind, DeclShape::Scalar(sort), |env| {
            DeclNode::Scalar(env.new_scalar(name, sort))
        })?;
        self.scalar_node(id)
    }

    pub fn int_const(&mut self, name: &str, kind: &str) -> SymResult<Int> {
        let ast = self.scalar_const(name, ScalarSort::Int, kind)?;
        ast.as_int()
            .ok_or_else(|| SymError::Encoding(format!("'{name}' is not an int")))
    }

    pub fn bool_const(&mut self, name: &str, kind: &str) -> SymResult<Bool> {
        let ast = self.scalar_const(name, ScalarSort::Bool, kind)?;
        ast.as_bool()
            .ok_or_else(|| SymError::Encoding(format!("'{name}' is not a bool")))
    }

    pub fn id_const(&mut self, name: &str, sort: SortId, kind: &str) -> SymResult<Dynamic> {
        self.scalar_const(name, ScalarSort::Identity(sort), kind)
    }

    /// Internal (existentially quantified) integer. Names must be unique
    /// per choice site but stable across re-executions, so callers bake
    /// the ordering and call label into them.
    pub fn internal_int(&mut self, name: &str, kind: &str) -> SymResult<Int> {
        let id = self.register(name, true, kind, DeclShape::Scalar(ScalarSort::Int), |env| {
            DeclNode::Scalar(env.new_scalar(name, ScalarSort::Int))
        })?;
        let ast = self.scalar_node(id)?;
        ast.as_int()
            .ok_or_else(|| SymError::Encoding(format!("'{name}' is not an int")))
    }

    /// Internal (existentially quantified) identity value; naming rules
    /// as for [`Env::internal_int`].
    pub fn internal_id(&mut self, name: &str, sort: SortId, kind: &str) -> SymResult<Dynamic> {
        let shape = DeclShape::Scalar(ScalarSort::Identity(sort));
        let id = self.register(name, true, kind, shape, |env| {
            DeclNode::Scalar(env.new_scalar(name, ScalarSort::Identity(sort)))
        })?;
        self.scalar_node(id)
    }

    /// Register (or look up) a map declaration backed by a Z3 array.
    pub fn map_const(
        &mut self,
        name: &str,
        index: IndexSort,
        value: ScalarSort,
        kind: &str,
    ) -> SymResult<SymMap> {
        let shape = DeclShape::Map { index, value };
        let id = self.register(name, false, kind, shape, |env| DeclNode::Map {
            array: Array::new_const(name, &env.index_z3_sort(index), &env.z3_sort(value)),
            touched: Vec::new(),
        })?;
        match &self.decls[id.0].node {
            DeclNode::Map { array, .. } => Ok(SymMap { decl: id, array: array.clone() }),
            _ => Err(SymError::Encoding(format!("declaration '{name}' is not a map"))),
        }
    }

    /// Register an uninterpreted function of nonzero arity. The matcher
    /// rejects these; the registration exists so the failure is reported
    /// at decomposition time rather than lost.
    pub fn uninterp_func(
        &mut self,
        name: &str,
        domain: &[ScalarSort],
        range: ScalarSort,
    ) -> SymResult<FuncDecl> {
        let shape = DeclShape::Func { arity: domain.len() };
        let id = self.register(name, false, "", shape, |env| {
            let sorts: Vec<Sort> = domain.iter().map(|s| env.z3_sort(*s)).collect();
            let refs: Vec<&Sort> = sorts.iter().collect();
            DeclNode::Func(FuncDecl::new(name, &refs, &env.z3_sort(range)))
        })?;
        match &self.decls[id.0].node {
            DeclNode::Func(f) => Ok(f.clone()),
            _ => Err(SymError::Encoding(format!("declaration '{name}' is not a function"))),
        }
    }

    /// Record a map index expression so decomposition sees it later.
    pub(crate) fn touch(&mut self, decl: DeclId, idx: &Dynamic) {
        if let DeclNode::Map { touched, .. } = &mut self.decls[decl.0].node {
            let key = idx.to_string();
            if !touched.iter().any(|t| t.to_string() == key) {
                touched.push(idx.clone());
            }
        }
    }

    /// All internal scalar constants, for existential quantification.
    pub fn internals(&self) -> Vec<Dynamic> {
        self.decls
            .iter()
            .filter(|d| d.internal)
            .filter_map(|d| match &d.node {
                DeclNode::Scalar(ast) => Some(ast.clone()),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn decl_slice(&self) -> &[Decl] {
        &self.decls
    }
}

impl Default for Env {
    fn default() -> Self {
        Self::new()
    }
}

/// A map-shaped state field. Select/store record the index expression on
/// the owning declaration; stores rebind the array functionally.
#[derive(Clone)]
pub struct SymMap {
    decl: DeclId,
    array: Array,
}

impl SymMap {
    pub fn select(&self, env: &mut Env, idx: &Dynamic) -> Dynamic {
        env.touch(self.decl, idx);
        self.array.select(idx)
    }

    pub fn store(&mut self, env: &mut Env, idx: &Dynamic, value: &Dynamic) {
        env.touch(self.decl, idx);
        self.array = self.array.store(idx, value);
    }

    pub fn eq(&self, other: &SymMap) -> Bool {
        self.array.eq(&other.array)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reregistration_returns_the_same_constant() {
        let mut env = Env::new();
        let a = env.int_const("Reg.value", "value").unwrap();
        let b = env.int_const("Reg.value", "value").unwrap();
        assert_eq!(a.to_string(), b.to_string());
        assert_eq!(env.decl_slice().len(), 1);
    }

    #[test]
    fn shape_mismatch_is_an_error() {
        let mut env = Env::new();
        env.int_const("x", "value").unwrap();
        let err = env.bool_const("x", "value").unwrap_err();
        assert!(matches!(err, SymError::ShapeMismatch { .. }), "got: {err:?}");
    }

    #[test]
    fn internal_constants_are_flagged_and_stable() {
        let mut env = Env::new();
        let a = env.internal_int("choice.ab.a", "value").unwrap();
        let b = env.internal_int("choice.ab.b", "value").unwrap();
        assert_ne!(a.to_string(), b.to_string());
        assert_eq!(env.internals().len(), 2);
        // Replaying the same site reuses the constant.
        let again = env.internal_int("choice.ab.a", "value").unwrap();
        assert_eq!(a.to_string(), again.to_string());
        assert_eq!(env.internals().len(), 2);
    }

    #[test]
    fn map_select_records_the_index() {
        let mut env = Env::new();
        let name = env.identity_sort("Name");
        let m = env
            .map_const("ns.exists", IndexSort::Identity(name), ScalarSort::Bool, "presence")
            .unwrap();
        let n = env.id_const("n", name, "name").unwrap();
        let _ = m.select(&mut env, &n);
        let _ = m.select(&mut env, &n);
        match &env.decl_slice()[0].node {
            DeclNode::Map { touched, .. } => assert_eq!(touched.len(), 1),
            _ => panic!("expected map decl"),
        }
    }
}
