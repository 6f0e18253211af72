//! Model-isomorphism matcher.
//!
//! Decomposes a concrete solver model into atomic (expression, value)
//! facts and rebuilds them as a symbolic condition meaning "any model
//! isomorphic to this one": by-value atoms pin their exact value, while
//! identity atoms only pin the equality pattern among expressions, with
//! group representatives pairwise distinct. Negating the condition
//! excludes the whole equivalence class from further enumeration.

use std::collections::{BTreeMap, HashMap, HashSet};

use z3::ast::{Bool, Dynamic, Int};

use commute_sym::{
    sym_eq, symand, symnot, ConcreteModel, DeclShape, IndexSort, ModelDecl, ScalarSort,
    SolvedScalar, SortId, SymError,
};

use crate::{CoreError, CoreResult};

/// How a solved atom constrains isomorphic models.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPolicy {
    /// Drop the atom entirely.
    Ignore,
    /// Pin the exact concrete value.
    ByValue,
    /// Pin only the equality pattern among same-valued expressions.
    ByIdentity,
}

/// Semantic-kind overrides, keyed by the kind tag on declarations.
pub struct KindTable {
    policies: HashMap<String, MatchPolicy>,
}

impl KindTable {
    pub fn new() -> Self {
        KindTable { policies: HashMap::new() }
    }

    pub fn set(&mut self, kind: &str, policy: MatchPolicy) -> &mut Self {
        self.policies.insert(kind.to_string(), policy);
        self
    }

    /// Identity-sorted values can never be pinned to a literal, so they
    /// group by identity unless ignored outright.
    fn policy_for(&self, kind: &str, sort: ScalarSort) -> MatchPolicy {
        let identity = matches!(sort, ScalarSort::Identity(_));
        match self.policies.get(kind) {
            Some(MatchPolicy::Ignore) => MatchPolicy::Ignore,
            Some(MatchPolicy::ByIdentity) => MatchPolicy::ByIdentity,
            Some(MatchPolicy::ByValue) | None => {
                if identity {
                    MatchPolicy::ByIdentity
                } else {
                    MatchPolicy::ByValue
                }
            }
        }
    }
}

impl Default for KindTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Grouping space for identity atoms. Grouping is per sort, not per
/// kind tag; two kinds sharing a sort share a space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum GroupDomain {
    Bool,
    Int,
    Identity(SortId),
}

struct IdentityAtom {
    expr: Dynamic,
    expr_key: String,
    value_key: String,
}

/// Decomposition state threaded through the declaration walk.
struct MatchCtx {
    conds: Vec<Bool>,
    cond_keys: HashSet<String>,
    groups: BTreeMap<GroupDomain, Vec<IdentityAtom>>,
    changed: bool,
}

impl MatchCtx {
    fn new() -> Self {
        MatchCtx {
            conds: Vec::new(),
            cond_keys: HashSet::new(),
            groups: BTreeMap::new(),
            changed: false,
        }
    }

    fn add_cond(&mut self, cond: Bool) {
        if self.cond_keys.insert(cond.to_string()) {
            self.conds.push(cond);
        }
    }

    fn add_identity(&mut self, domain: GroupDomain, expr: Dynamic, value_key: String) {
        let atoms = self.groups.entry(domain).or_default();
        let expr_key = expr.to_string();
        if atoms.iter().any(|a| a.value_key == value_key && a.expr_key == expr_key) {
            return;
        }
        if !atoms.iter().any(|a| a.value_key == value_key) {
            // A new group can give map decomposition a representative it
            // lacked on the previous pass.
            self.changed = true;
        }
        atoms.push(IdentityAtom { expr, expr_key, value_key });
    }

    /// First expression recorded for this value, if any.
    fn representative(&self, domain: GroupDomain, value_key: &str) -> Option<Dynamic> {
        self.groups
            .get(&domain)?
            .iter()
            .find(|a| a.value_key == value_key)
            .map(|a| a.expr.clone())
    }
}

/// Condition satisfied exactly by models isomorphic to `model`.
pub fn match_condition(model: &ConcreteModel, kinds: &KindTable) -> CoreResult<Bool> {
    let mut ctx = MatchCtx::new();
    // Fixed point: map decomposition may surface identity values whose
    // representative expressions only appear on a later pass.
    loop {
        ctx.changed = false;
        for decl in model.decls() {
            if decl.internal {
                continue;
            }
            process_decl(&mut ctx, model, kinds, decl)?;
        }
        if !ctx.changed {
            break;
        }
    }
    finish_groups(&mut ctx);
    Ok(symand(&ctx.conds))
}

/// Exclusion condition: rules out the whole equivalence class of `model`.
pub fn exclusion_condition(model: &ConcreteModel, kinds: &KindTable) -> CoreResult<Bool> {
    Ok(symnot(&match_condition(model, kinds)?))
}

fn process_decl(
    ctx: &mut MatchCtx,
    model: &ConcreteModel,
    kinds: &KindTable,
    decl: &ModelDecl,
) -> CoreResult<()> {
    match decl.shape {
        DeclShape::Func { arity } => Err(CoreError::Sym(SymError::UnsupportedDecl(format!(
            "declaration '{}' is a function of arity {arity}",
            decl.name
        )))),
        DeclShape::Scalar(sort) => {
            let expr = decl.scalar_expr()?.clone();
            process_scalar(ctx, model, kinds, &expr, sort, &decl.sem_kind)
        }
        DeclShape::Map { index, value } => process_map(ctx, model, kinds, decl, index, value),
    }
}

fn process_scalar(
    ctx: &mut MatchCtx,
    model: &ConcreteModel,
    kinds: &KindTable,
    expr: &Dynamic,
    sort: ScalarSort,
    kind: &str,
) -> CoreResult<()> {
    // Expressions the model never assigned constrain nothing.
    let Some(solved) = model.eval_scalar(expr, sort)? else {
        return Ok(());
    };
    match kinds.policy_for(kind, sort) {
        MatchPolicy::Ignore => {}
        MatchPolicy::ByValue => {
            let cond = match solved {
                SolvedScalar::Bool(b) => sym_eq(expr, &Dynamic::from_ast(&Bool::from_bool(b))),
                SolvedScalar::Int(i) => sym_eq(expr, &Dynamic::from_ast(&Int::from_i64(i))),
                SolvedScalar::Identity { .. } => {
                    return Err(CoreError::Sym(SymError::Encoding(format!(
                        "identity value cannot be pinned by value: {expr}"
                    ))))
                }
            };
            ctx.add_cond(cond);
        }
        MatchPolicy::ByIdentity => {
            let (domain, value_key) = match solved {
                SolvedScalar::Bool(b) => (GroupDomain::Bool, b.to_string()),
                SolvedScalar::Int(i) => (GroupDomain::Int, i.to_string()),
                SolvedScalar::Identity { sort, key } => (GroupDomain::Identity(sort), key),
            };
            ctx.add_identity(domain, expr.clone(), value_key);
        }
    }
    Ok(())
}

fn process_map(
    ctx: &mut MatchCtx,
    model: &ConcreteModel,
    kinds: &KindTable,
    decl: &ModelDecl,
    index: IndexSort,
    value: ScalarSort,
) -> CoreResult<()> {
    let map = decl.map()?;
    match index {
        // Interpreted index domain: decompose the explicitly touched
        // entries only. The default branch over the unbounded domain is
        // left unconstrained; enumeration stays sound but may distinguish
        // models that differ nowhere observable.
        IndexSort::Int => {
            let mut seen: HashSet<i64> = HashSet::new();
            for idx in map.touched() {
                let Some(SolvedScalar::Int(concrete)) =
                    model.eval_scalar(idx, ScalarSort::Int)?
                else {
                    continue;
                };
                if !seen.insert(concrete) {
                    continue;
                }
                let literal = Dynamic::from_ast(&Int::from_i64(concrete));
                let entry = map.select(&literal);
                process_scalar(ctx, model, kinds, &entry, value, &decl.sem_kind)?;
            }
        }
        // Identity index domain: the universe is finite and known, so
        // every element reachable through a representative expression is
        // decomposed, covering the default branch as well.
        IndexSort::Identity(sid) => {
            let keys: Vec<String> = model.universe(sid).to_vec();
            for key in keys {
                let Some(rep) = ctx.representative(GroupDomain::Identity(sid), &key) else {
                    continue;
                };
                let entry = map.select(&rep);
                process_scalar(ctx, model, kinds, &entry, value, &decl.sem_kind)?;
            }
        }
    }
    Ok(())
}

fn finish_groups(ctx: &mut MatchCtx) {
    let mut conds = Vec::new();
    for atoms in ctx.groups.values() {
        // Partition by assigned value, keeping first-seen order.
        let mut order: Vec<&str> = Vec::new();
        let mut members: HashMap<&str, Vec<&Dynamic>> = HashMap::new();
        for atom in atoms {
            let entry = members.entry(atom.value_key.as_str()).or_default();
            if entry.is_empty() {
                order.push(atom.value_key.as_str());
            }
            entry.push(&atom.expr);
        }
        let mut representatives: Vec<&Dynamic> = Vec::new();
        for key in &order {
            let exprs = &members[key];
            for other in &exprs[1..] {
                conds.push(sym_eq(exprs[0], other));
            }
            representatives.push(exprs[0]);
        }
        for (i, a) in representatives.iter().enumerate() {
            for b in &representatives[i + 1..] {
                conds.push(symnot(&sym_eq(a, b)));
            }
        }
    }
    for cond in conds {
        ctx.add_cond(cond);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use commute_sym::{CheckOutcome, Env};
    use z3::SatResult;

    fn sat_model(env: &Env, cond: &Bool) -> ConcreteModel {
        match env.check(cond) {
            CheckOutcome::Sat(m) => m,
            CheckOutcome::Unsat => panic!("expected sat, got unsat"),
            CheckOutcome::Unknown { reason } => panic!("expected sat, got unknown: {reason}"),
        }
    }

    #[test]
    fn by_value_atoms_pin_the_literal() {
        let mut env = Env::new();
        let x = env.int_const("x", "value").unwrap();
        let model = sat_model(&env, &x.eq(&Int::from_i64(3)));
        let cond = match_condition(&model, &KindTable::new()).unwrap();
        // The matching condition together with x != 3 must be unsat.
        let clash = symand(&[cond, x.eq(&Int::from_i64(3)).not()]);
        assert!(matches!(commute_sym::sat_of(&clash), SatResult::Unsat));
    }

    #[test]
    fn ignored_kinds_constrain_nothing() {
        let mut env = Env::new();
        let t = env.int_const("mtime", "time").unwrap();
        let model = sat_model(&env, &t.eq(&Int::from_i64(42)));
        let mut kinds = KindTable::new();
        kinds.set("time", MatchPolicy::Ignore);
        let cond = match_condition(&model, &kinds).unwrap();
        let other = symand(&[cond, t.eq(&Int::from_i64(0))]);
        assert!(matches!(commute_sym::sat_of(&other), SatResult::Sat));
    }

    #[test]
    fn identity_atoms_pin_the_pattern_not_the_element() {
        let mut env = Env::new();
        let name = env.identity_sort("Name");
        let a = env.id_const("a", name, "name").unwrap();
        let b = env.id_const("b", name, "name").unwrap();
        let c = env.id_const("c", name, "name").unwrap();
        // a == b, c distinct.
        let setup = symand(&[sym_eq(&a, &b), symnot(&sym_eq(&a, &c))]);
        let model = sat_model(&env, &setup);
        let cond = match_condition(&model, &KindTable::new()).unwrap();
        // Any renaming with the same pattern satisfies the condition...
        assert!(matches!(commute_sym::sat_of(&cond), SatResult::Sat));
        // ...but collapsing the distinct pair does not.
        let collapsed = symand(&[cond.clone(), sym_eq(&a, &c)]);
        assert!(matches!(commute_sym::sat_of(&collapsed), SatResult::Unsat));
        // Nor does splitting the equal pair.
        let split = symand(&[cond, symnot(&sym_eq(&a, &b))]);
        assert!(matches!(commute_sym::sat_of(&split), SatResult::Unsat));
    }

    #[test]
    fn function_declarations_are_fatal() {
        let mut env = Env::new();
        env.uninterp_func("f", &[ScalarSort::Int], ScalarSort::Int).unwrap();
        let x = env.int_const("x", "value").unwrap();
        let model = sat_model(&env, &x.eq(&Int::from_i64(0)));
        let err = match_condition(&model, &KindTable::new()).unwrap_err();
        assert!(
            matches!(err, CoreError::Sym(SymError::UnsupportedDecl(_))),
            "got: {err:?}"
        );
    }
}
