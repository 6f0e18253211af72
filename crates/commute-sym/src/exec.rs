//! Branch-tracked symbolic execution.
//!
//! A computation over symbolic state is run once per control path. Branch
//! decisions are recorded in a schedule; after each run the deepest
//! unforced true decision is flipped and the computation replays from the
//! top, depth-first, until the schedule is exhausted. At every fresh
//! branch point the solver decides which arms are feasible under the
//! current path prefix, and single-feasible arms are forced rather than
//! explored twice.

use tracing::debug;
use z3::ast::Bool;
use z3::SatResult;

use crate::env::Env;
use crate::solver::{sat_of, symand, symnot};
use crate::SymResult;

#[derive(Debug, Clone, Copy)]
struct Decision {
    value: bool,
    forced: bool,
}

/// Execution context handed to calls under analysis.
pub struct Exec<'e> {
    pub env: &'e mut Env,
    path: Vec<Bool>,
    assumptions: Vec<Bool>,
    schedule: Vec<Decision>,
    cursor: usize,
}

/// One satisfiable control path of a symbolic computation.
pub struct PathResult<R> {
    pub value: R,
    pub path_condition: Bool,
}

impl<'e> Exec<'e> {
    fn new(env: &'e mut Env, schedule: Vec<Decision>) -> Self {
        Exec { env, path: Vec::new(), assumptions: Vec::new(), schedule, cursor: 0 }
    }

    /// Take a branch on `cond`, replaying the schedule when the decision
    /// was already made on an earlier run. Unknown counts as feasible;
    /// the final path-condition check filters infeasible leftovers.
    pub fn branch(&mut self, cond: &Bool) -> bool {
        let taken = if self.cursor < self.schedule.len() {
            self.schedule[self.cursor].value
        } else {
            let prefix = self.path_condition();
            let t = feasible(&symand(&[prefix.clone(), cond.clone()]));
            let f = feasible(&symand(&[prefix, symnot(cond)]));
            let decision = match (t, f) {
                (true, true) => Decision { value: true, forced: false },
                (true, false) => Decision { value: true, forced: true },
                (false, true) => Decision { value: false, forced: true },
                // Both arms infeasible means the prefix itself is unsat;
                // the completed path is dropped at collection time.
                (false, false) => Decision { value: true, forced: true },
            };
            self.schedule.push(decision);
            decision.value
        };
        self.path.push(if taken { cond.clone() } else { symnot(cond) });
        self.cursor += 1;
        taken
    }

    /// Constrain the current path without forking it.
    pub fn assume(&mut self, cond: &Bool) {
        self.assumptions.push(cond.clone());
    }

    pub fn path_condition(&self) -> Bool {
        let mut conds = self.path.clone();
        conds.extend(self.assumptions.iter().cloned());
        symand(&conds)
    }
}

fn feasible(cond: &Bool) -> bool {
    matches!(sat_of(cond), SatResult::Sat | SatResult::Unknown)
}

/// Run `f` once per satisfiable control path, yielding each path's value
/// and path condition.
pub fn symbolic_apply<R>(
    env: &mut Env,
    mut f: impl FnMut(&mut Exec<'_>) -> SymResult<R>,
) -> SymResult<Vec<PathResult<R>>> {
    let mut schedule: Vec<Decision> = Vec::new();
    let mut results = Vec::new();
    loop {
        let mut exec = Exec::new(&mut *env, schedule);
        let value = f(&mut exec)?;
        let path_condition = exec.path_condition();
        schedule = exec.schedule;
        if matches!(sat_of(&path_condition), SatResult::Sat | SatResult::Unknown) {
            results.push(PathResult { value, path_condition });
        }
        // Backtrack to the deepest unforced true decision and flip it.
        while matches!(schedule.last(), Some(d) if d.forced || !d.value) {
            schedule.pop();
        }
        match schedule.last_mut() {
            Some(d) => d.value = false,
            None => break,
        }
    }
    debug!(paths = results.len(), "symbolic apply complete");
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use z3::ast::Ast;

    #[test]
    fn straight_line_code_has_one_path() {
        let mut env = Env::new();
        let paths = symbolic_apply(&mut env, |ex| {
            let x = ex.env.int_const("x", "value")?;
            Ok(x)
        })
        .unwrap();
        assert_eq!(paths.len(), 1);
    }

    #[test]
    fn one_branch_yields_two_paths() {
        let mut env = Env::new();
        let paths = symbolic_apply(&mut env, |ex| {
            let x = ex.env.int_const("x", "value")?;
            let taken = ex.branch(&x.eq(&z3::ast::Int::from_i64(0)));
            Ok(taken)
        })
        .unwrap();
        assert_eq!(paths.len(), 2);
        assert!(paths[0].value);
        assert!(!paths[1].value);
    }

    #[test]
    fn infeasible_arms_are_forced() {
        let mut env = Env::new();
        let paths = symbolic_apply(&mut env, |ex| {
            let x = ex.env.int_const("x", "value")?;
            let is_zero = x.eq(&z3::ast::Int::from_i64(0));
            let first = ex.branch(&is_zero);
            // Under either prefix the second branch has one feasible arm.
            let second = ex.branch(&is_zero);
            Ok((first, second))
        })
        .unwrap();
        assert_eq!(paths.len(), 2);
        for p in &paths {
            assert_eq!(p.value.0, p.value.1, "second branch must follow the first");
        }
    }

    #[test]
    fn nested_branches_explore_depth_first() {
        let mut env = Env::new();
        let paths = symbolic_apply(&mut env, |ex| {
            let x = ex.env.int_const("x", "value")?;
            let y = ex.env.int_const("y", "value")?;
            let a = ex.branch(&x.eq(&z3::ast::Int::from_i64(0)));
            let b = ex.branch(&y.eq(&z3::ast::Int::from_i64(0)));
            Ok((a, b))
        })
        .unwrap();
        let values: Vec<_> = paths.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![(true, true), (true, false), (false, true), (false, false)]);
    }
}
