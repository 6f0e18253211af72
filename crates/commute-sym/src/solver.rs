//! Solver queries, boolean combinators, and simplification.

use z3::ast::{exists_const, Ast, Bool, Dynamic};
use z3::{Goal, Params, SatResult, Solver, Tactic};

use crate::env::Env;
use crate::model::ConcreteModel;

/// Outcome of a satisfiability query through [`Env::check`].
pub enum CheckOutcome {
    Sat(ConcreteModel),
    Unsat,
    Unknown { reason: String },
}

/// Conjunction; empty input is `true`.
pub fn symand(conds: &[Bool]) -> Bool {
    match conds.len() {
        0 => Bool::from_bool(true),
        1 => conds[0].clone(),
        _ => Bool::and(conds),
    }
}

/// Disjunction; empty input is `false`.
pub fn symor(conds: &[Bool]) -> Bool {
    match conds.len() {
        0 => Bool::from_bool(false),
        1 => conds[0].clone(),
        _ => Bool::or(conds),
    }
}

pub fn symnot(cond: &Bool) -> Bool {
    cond.not()
}

/// Sort-aware equality between engine values.
pub fn sym_eq(a: &Dynamic, b: &Dynamic) -> Bool {
    if let (Some(ai), Some(bi)) = (a.as_int(), b.as_int()) {
        return ai.eq(&bi);
    }
    if let (Some(ab), Some(bb)) = (a.as_bool(), b.as_bool()) {
        return ab.eq(&bb);
    }
    a.eq(b)
}

/// Existential quantification over the given constants.
pub fn exists(bounds: &[Dynamic], body: &Bool) -> Bool {
    if bounds.is_empty() {
        return body.clone();
    }
    let refs: Vec<&dyn Ast> = bounds.iter().map(|b| b as &dyn Ast).collect();
    exists_const(&refs, &[], body)
}

/// Plain satisfiability, no model wanted.
pub fn sat_of(cond: &Bool) -> SatResult {
    let solver = Solver::new();
    solver.assert(cond);
    solver.check()
}

/// Deeper simplification through the context-aware solver tactic.
/// Slower than [`Ast::simplify`], but eliminates variables that plain
/// rewriting cannot.
pub fn simplify_deep(cond: &Bool) -> Bool {
    let goal = Goal::new(false, false, false);
    goal.assert(cond);
    let tactic = Tactic::new("ctx-solver-simplify");
    if let Ok(applied) = tactic.apply(&goal, None) {
        let mut formulas = Vec::new();
        for subgoal in applied.list_subgoals() {
            formulas.extend(subgoal.get_formulas::<Bool>());
        }
        symand(&formulas)
    } else {
        cond.simplify()
    }
}

impl Env {
    /// Check a condition, snapshotting the model on sat so the caller can
    /// decompose it without holding solver state.
    pub fn check(&self, cond: &Bool) -> CheckOutcome {
        let solver = Solver::new();
        if let Some(ms) = self.timeout_ms() {
            let mut params = Params::new();
            params.set_u32("timeout", ms as u32);
            solver.set_params(&params);
        }
        solver.assert(cond);
        match solver.check() {
            SatResult::Sat => match solver.get_model() {
                Some(model) => CheckOutcome::Sat(ConcreteModel::snapshot(self, model)),
                None => CheckOutcome::Unknown { reason: "sat without a model".to_string() },
            },
            SatResult::Unsat => CheckOutcome::Unsat,
            SatResult::Unknown => CheckOutcome::Unknown {
                reason: solver
                    .get_reason_unknown()
                    .unwrap_or_else(|| "unknown".to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use z3::ast::Int;

    #[test]
    fn empty_combinators_have_identity_values() {
        assert!(matches!(sat_of(&symand(&[])), SatResult::Sat));
        assert!(matches!(sat_of(&symor(&[])), SatResult::Unsat));
    }

    #[test]
    fn exists_masks_the_bound_constant() {
        let mut env = Env::new();
        let hidden = env.internal_int("choice", "value").unwrap();
        let x = env.int_const("x", "value").unwrap();
        // x == hidden is only sometimes true, but some hidden always works.
        let cond = x.eq(&hidden);
        let closed = exists(&env.internals(), &cond);
        assert!(matches!(sat_of(&symnot(&closed)), SatResult::Unsat));
    }

    #[test]
    fn check_reports_unsat() {
        let env = Env::new();
        let cond = symand(&[
            Int::from_i64(1).eq(&Int::from_i64(2)),
        ]);
        assert!(matches!(env.check(&cond), CheckOutcome::Unsat));
    }
}
