//! Commutativity analysis core.
//!
//! Given a model under test ([`ModelDef`]), [`analyze`] enumerates call
//! sets (combinations with replacement), runs every ordering of each set
//! over one shared symbolic initial state, partitions the resulting path
//! conditions by divergence label, reports when the set commutes, and
//! enumerates one concrete test case per model-equivalence class of each
//! commuting path.

pub mod enumerate;
pub mod isomatch;
pub mod report;
pub mod tester;

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;
use z3::ast::{Bool, Dynamic};

use commute_sym::{exists, symand, symnot, symor, symbolic_apply, Env, Exec, SymError, SymResult};

pub use enumerate::TestWriter;
pub use isomatch::{KindTable, MatchPolicy};
pub use tester::{CallSetOutcome, Divergence};

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Sym(#[from] SymError),

    #[error("model '{model}' has no test-case generator")]
    NoTestgen { model: String },

    #[error("unknown call '{0}'")]
    UnknownCall(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("test generation failed: {0}")]
    Testgen(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type CoreResult<T> = Result<T, CoreError>;

// === Model-under-test interface ===

/// Position label of one call inside a call set: the short letter (`a`,
/// `b`, …) plus the full ordering string, for naming internal choices.
pub struct CallLabel {
    pub call: char,
    pub seq: String,
}

/// A named call of the model under test.
pub struct CallDef<S> {
    pub name: &'static str,
    pub run: fn(&mut Exec<'_>, &mut S, &CallLabel) -> SymResult<Dynamic>,
}

impl<S> Clone for CallDef<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for CallDef<S> {}

/// A model under test: symbolic state plus the calls to analyze.
pub trait ModelDef {
    type State: Clone;

    const NAME: &'static str;

    /// Build a fresh symbolic state. Declaration names must be stable so
    /// that every ordering of a call set shares one initial state.
    fn fresh_state(env: &mut Env) -> SymResult<Self::State>;

    /// Symbolic equality of two whole states.
    fn state_eq(a: &Self::State, b: &Self::State) -> Bool;

    /// Named symbolic fields of a state, for test-case materialization.
    fn snapshot(state: &Self::State) -> Vec<(String, Dynamic)>;

    fn calls() -> Vec<CallDef<Self::State>>;

    /// Semantic-kind overrides for model decomposition.
    fn kind_table() -> KindTable {
        KindTable::new()
    }

    /// Open a test-case sink, if this model supports test generation.
    fn testgen(_path: &Path) -> CoreResult<Option<Box<dyn TestgenSink>>> {
        Ok(None)
    }
}

/// One materialized test case: concrete initial-state assignments plus
/// the per-call results and final state of the program-order run.
pub struct ConcreteCase {
    pub calls: Vec<String>,
    pub assignments: Vec<(String, String)>,
    pub results: Vec<(String, String)>,
    pub state: Vec<(String, String)>,
}

/// Receiver for materialized test cases.
pub trait TestgenSink {
    fn begin_call_set(&mut self, calls: &[String]) -> CoreResult<()>;
    fn on_case(&mut self, case: &ConcreteCase) -> CoreResult<()>;
    fn end_call_set(&mut self) -> CoreResult<()>;
    fn finish(&mut self) -> CoreResult<()>;
}

// === Configuration ===

pub struct AnalysisConfig {
    /// Call-set size (combinations with replacement).
    pub ncomb: usize,
    /// Restrict analysis to these calls, in the given order.
    pub calls: Option<Vec<String>>,
    /// Per-call-set cap on emitted test cases; truncation is silent.
    pub max_testcases: usize,
    /// Use the context-aware solver tactic when simplifying conditions.
    pub simplify_more: bool,
    /// Log each enumerated model and its exclusion condition.
    pub verbose_testgen: bool,
    /// Check conditions for always/sometimes instead of reporting maybe.
    pub check_conds: bool,
    /// Print the (simplified) conditions themselves.
    pub print_conds: bool,
    /// Attribute divergence to results/state instead of the coarse label.
    pub fine_divergence: bool,
    /// Per-query solver timeout.
    pub timeout_ms: Option<u64>,
    /// Raw solver-model audit file.
    pub model_file: Option<PathBuf>,
    /// Test-case output file, handed to the model's sink.
    pub test_file: Option<PathBuf>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            ncomb: 2,
            calls: None,
            max_testcases: usize::MAX,
            simplify_more: false,
            verbose_testgen: false,
            check_conds: false,
            print_conds: false,
            fine_divergence: false,
            timeout_ms: None,
            model_file: None,
            test_file: None,
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct AnalysisSummary {
    pub call_sets: usize,
    pub paths: usize,
    pub commuting_paths: usize,
    pub testcases: usize,
}

// === Orchestration ===

/// Run the full analysis for one model.
pub fn analyze<M: ModelDef>(config: &AnalysisConfig) -> CoreResult<AnalysisSummary> {
    if config.ncomb == 0 {
        return Err(CoreError::InvalidConfig("call-set size must be at least 1".to_string()));
    }
    let kinds = M::kind_table();
    let mut writer = TestWriter::new::<M>(config)?;
    let selected = select_calls::<M>(config)?;
    info!(model = M::NAME, ncomb = config.ncomb, calls = selected.len(), "analysis starting");

    let mut summary = AnalysisSummary::default();
    for combo in combinations_with_replacement(selected.len(), config.ncomb) {
        let callset: Vec<CallDef<M::State>> = combo.iter().map(|&i| selected[i]).collect();
        let names: Vec<String> = callset.iter().map(|c| c.name.to_string()).collect();
        println!("{}", names.join(" "));
        writer.begin_call_set(&names)?;

        let mut env = Env::new();
        env.set_timeout_ms(config.timeout_ms);
        let paths = symbolic_apply(&mut env, |ex| {
            tester::run_call_set::<M>(ex, &callset, config.fine_divergence)
        })?;
        summary.call_sets += 1;
        summary.paths += paths.len();

        let mut buckets: BTreeMap<Divergence, Vec<Bool>> = BTreeMap::new();
        for path in &paths {
            buckets
                .entry(path.value.label)
                .or_default()
                .push(path.path_condition.clone());
            writer.on_result(&env, path, &kinds, config)?;
        }
        writer.end_call_set()?;

        let commute = buckets
            .get(&Divergence::Commutes)
            .map(|conds| symor(conds))
            .unwrap_or_else(|| Bool::from_bool(false));
        // A call set only truly fails to commute when no internal choice
        // could have made it commute.
        let cannot = symnot(&exists(&env.internals(), &commute));
        let opts = report::ReportOptions {
            check_conds: config.check_conds,
            print_conds: config.print_conds,
            simplify_more: config.simplify_more,
        };
        for (label, conds) in &buckets {
            if *label == Divergence::Commutes {
                report::print_cond("can commute", &commute, &opts);
            } else {
                report::print_cond(
                    &format!("cannot commute, {label} can diverge"),
                    &symand(&[symor(conds), cannot.clone()]),
                    &opts,
                );
            }
        }
    }
    writer.finish()?;
    summary.commuting_paths = writer.total_commuting();
    summary.testcases = writer.total_cases();
    info!(
        call_sets = summary.call_sets,
        paths = summary.paths,
        commuting = summary.commuting_paths,
        testcases = summary.testcases,
        "analysis complete"
    );
    Ok(summary)
}

fn select_calls<M: ModelDef>(config: &AnalysisConfig) -> CoreResult<Vec<CallDef<M::State>>> {
    let all = M::calls();
    match &config.calls {
        None => Ok(all),
        Some(names) => names
            .iter()
            .map(|n| {
                all.iter()
                    .find(|c| c.name == n)
                    .copied()
                    .ok_or_else(|| CoreError::UnknownCall(n.clone()))
            })
            .collect(),
    }
}

/// Non-decreasing index sequences of length `k` over `0..n`.
fn combinations_with_replacement(n: usize, k: usize) -> Vec<Vec<usize>> {
    fn rec(n: usize, k: usize, start: usize, cur: &mut Vec<usize>, out: &mut Vec<Vec<usize>>) {
        if cur.len() == k {
            out.push(cur.clone());
            return;
        }
        for i in start..n {
            cur.push(i);
            rec(n, k, i, cur, out);
            cur.pop();
        }
    }
    let mut out = Vec::new();
    if n > 0 {
        rec(n, k, 0, &mut Vec::with_capacity(k), &mut out);
    }
    out
}

impl fmt::Display for Divergence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Divergence::Commutes => "commute",
            Divergence::Diverges => "something",
            Divergence::ResultsDiverge => "results",
            Divergence::StateDiverges => "state",
            Divergence::BothDiverge => "results, state",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use z3::ast::Ast;
    use z3::ast::Int;

    #[derive(Clone)]
    struct MiniState {
        x: Int,
    }

    struct Mini;

    impl ModelDef for Mini {
        type State = MiniState;

        const NAME: &'static str = "mini";

        fn fresh_state(env: &mut Env) -> commute_sym::SymResult<MiniState> {
            Ok(MiniState { x: env.int_const("Mini.x", "value")? })
        }

        fn state_eq(a: &MiniState, b: &MiniState) -> Bool {
            a.x.eq(&b.x)
        }

        fn snapshot(state: &MiniState) -> Vec<(String, Dynamic)> {
            vec![("x".to_string(), Dynamic::from_ast(&state.x))]
        }

        fn calls() -> Vec<CallDef<MiniState>> {
            vec![
                CallDef { name: "alpha", run: |_ex, s, _l| Ok(Dynamic::from_ast(&s.x)) },
                CallDef { name: "beta", run: |_ex, s, _l| Ok(Dynamic::from_ast(&s.x)) },
            ]
        }
    }

    #[test]
    fn call_filter_preserves_user_order() {
        let config = AnalysisConfig {
            calls: Some(vec!["beta".to_string(), "alpha".to_string()]),
            ..Default::default()
        };
        let picked = select_calls::<Mini>(&config).unwrap();
        let names: Vec<&str> = picked.iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["beta", "alpha"]);
    }

    #[test]
    fn combinations_cover_pairs_without_order() {
        let combos = combinations_with_replacement(3, 2);
        assert_eq!(
            combos,
            vec![
                vec![0, 0],
                vec![0, 1],
                vec![0, 2],
                vec![1, 1],
                vec![1, 2],
                vec![2, 2]
            ]
        );
    }

    #[test]
    fn combinations_of_nothing_are_empty() {
        assert!(combinations_with_replacement(0, 2).is_empty());
    }
}
