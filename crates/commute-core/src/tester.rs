//! Commutativity tester.
//!
//! Runs every ordering of a call set against one shared symbolic initial
//! state, then takes the divergence decision itself as a symbolic branch:
//! each control path of the orderings splits once more into a commuting
//! path and a diverging path, and both carry their own path condition.

use z3::ast::Dynamic;

use commute_sym::{sym_eq, symnot, symor, Exec, SymResult};

use crate::{CallDef, CallLabel, ModelDef};

/// Divergence label of one path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Divergence {
    Commutes,
    /// Coarse label: results and/or state differ.
    Diverges,
    ResultsDiverge,
    StateDiverges,
    BothDiverge,
}

/// Per-path outcome of one call-set analysis. Results and state are the
/// program-order (first ordering) values, used for materialization.
pub struct CallSetOutcome {
    pub label: Divergence,
    pub results: Vec<Dynamic>,
    pub state: Vec<(String, Dynamic)>,
}

/// Execute all orderings of `calls` and compare them. Branch-tracked:
/// must run under [`commute_sym::symbolic_apply`].
pub fn run_call_set<M: ModelDef>(
    ex: &mut Exec<'_>,
    calls: &[CallDef<M::State>],
    fine: bool,
) -> SymResult<CallSetOutcome> {
    let k = calls.len();
    let mut all_results: Vec<Vec<Dynamic>> = Vec::new();
    let mut all_states: Vec<M::State> = Vec::new();

    for ordering in permutations(k) {
        let seq: String = ordering.iter().map(|&i| short_label(i)).collect();
        let mut state = M::fresh_state(ex.env)?;
        let mut pairs: Vec<(usize, Dynamic)> = Vec::with_capacity(k);
        for &idx in &ordering {
            let label = CallLabel { call: short_label(idx), seq: seq.clone() };
            let result = (calls[idx].run)(ex, &mut state, &label)?;
            pairs.push((idx, result));
        }
        pairs.sort_by_key(|(idx, _)| *idx);
        all_results.push(pairs.into_iter().map(|(_, r)| r).collect());
        all_states.push(state);
    }

    let results = all_results.swap_remove(0);
    let state = all_states.swap_remove(0);

    // A single call trivially commutes with itself.
    if k <= 1 {
        return Ok(CallSetOutcome {
            label: Divergence::Commutes,
            results,
            state: M::snapshot(&state),
        });
    }

    let mut result_diffs = Vec::new();
    let mut state_diffs = Vec::new();
    for (other_results, other_state) in all_results.iter().zip(&all_states) {
        for (r0, ri) in results.iter().zip(other_results) {
            result_diffs.push(symnot(&sym_eq(r0, ri)));
        }
        state_diffs.push(symnot(&M::state_eq(&state, other_state)));
    }

    let label = if fine {
        let results_differ = ex.branch(&symor(&result_diffs));
        let state_differs = ex.branch(&symor(&state_diffs));
        match (results_differ, state_differs) {
            (false, false) => Divergence::Commutes,
            (true, false) => Divergence::ResultsDiverge,
            (false, true) => Divergence::StateDiverges,
            (true, true) => Divergence::BothDiverge,
        }
    } else {
        let mut diffs = result_diffs;
        diffs.extend(state_diffs);
        if ex.branch(&symor(&diffs)) {
            Divergence::Diverges
        } else {
            Divergence::Commutes
        }
    };

    Ok(CallSetOutcome { label, results, state: M::snapshot(&state) })
}

fn short_label(idx: usize) -> char {
    (b'a' + idx as u8) as char
}

/// All orderings of `0..k`; the first is always program order.
fn permutations(k: usize) -> Vec<Vec<usize>> {
    fn rec(items: &mut Vec<usize>, at: usize, out: &mut Vec<Vec<usize>>) {
        if at == items.len() {
            out.push(items.clone());
            return;
        }
        for i in at..items.len() {
            items.swap(at, i);
            rec(items, at + 1, out);
            items.swap(at, i);
        }
    }
    let mut items: Vec<usize> = (0..k).collect();
    let mut out = Vec::new();
    rec(&mut items, 0, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn program_order_comes_first() {
        let perms = permutations(3);
        assert_eq!(perms.len(), 6);
        assert_eq!(perms[0], vec![0, 1, 2]);
    }

    #[test]
    fn labels_follow_call_set_position() {
        assert_eq!(short_label(0), 'a');
        assert_eq!(short_label(2), 'c');
    }
}
