//! End-to-end analysis over a small scalar model.

use std::path::PathBuf;

use z3::ast::{Bool, Dynamic, Int};

use commute_core::{
    analyze, AnalysisConfig, CallDef, CoreError, Divergence, ModelDef,
};
use commute_sym::{symbolic_apply, Env, SymResult};

#[derive(Clone)]
struct CounterState {
    value: Int,
    flag: Bool,
}

/// One integer cell plus an independent flag.
struct Counter;

impl ModelDef for Counter {
    type State = CounterState;

    const NAME: &'static str = "counter";

    fn fresh_state(env: &mut Env) -> SymResult<CounterState> {
        Ok(CounterState {
            value: env.int_const("Counter.value", "value")?,
            flag: env.bool_const("Counter.flag", "flag")?,
        })
    }

    fn state_eq(a: &CounterState, b: &CounterState) -> Bool {
        Bool::and(&[a.value.eq(&b.value), a.flag.eq(&b.flag)])
    }

    fn snapshot(state: &CounterState) -> Vec<(String, Dynamic)> {
        vec![
            ("value".to_string(), Dynamic::from_ast(&state.value)),
            ("flag".to_string(), Dynamic::from_ast(&state.flag)),
        ]
    }

    fn calls() -> Vec<CallDef<CounterState>> {
        vec![
            CallDef {
                name: "read",
                run: |_ex, s, _l| Ok(Dynamic::from_ast(&s.value)),
            },
            CallDef {
                name: "write",
                run: |ex, s, l| {
                    let v = ex.env.int_const(&format!("write.v.{}", l.call), "value")?;
                    s.value = v;
                    Ok(Dynamic::from_ast(&Int::from_i64(0)))
                },
            },
            CallDef {
                name: "write_one",
                run: |_ex, s, _l| {
                    s.value = Int::from_i64(1);
                    Ok(Dynamic::from_ast(&Int::from_i64(0)))
                },
            },
            CallDef {
                name: "read_flag",
                run: |_ex, s, _l| Ok(Dynamic::from_ast(&s.flag)),
            },
        ]
    }
}

fn call(name: &str) -> CallDef<CounterState> {
    Counter::calls()
        .into_iter()
        .find(|c| c.name == name)
        .unwrap_or_else(|| panic!("no call named {name}"))
}

fn labels_of(calls: &[CallDef<CounterState>]) -> Vec<Divergence> {
    let mut env = Env::new();
    let paths = symbolic_apply(&mut env, |ex| {
        commute_core::tester::run_call_set::<Counter>(ex, calls, false)
    })
    .unwrap();
    paths.iter().map(|p| p.value.label).collect()
}

fn tmp(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("commute-analysis-{}-{name}", std::process::id()))
}

#[test]
fn read_and_write_can_go_either_way() {
    let labels = labels_of(&[call("read"), call("write")]);
    assert!(labels.contains(&Divergence::Commutes), "got: {labels:?}");
    assert!(labels.contains(&Divergence::Diverges), "got: {labels:?}");
}

#[test]
fn constant_writes_always_commute() {
    let labels = labels_of(&[call("write_one"), call("write_one")]);
    assert_eq!(labels, vec![Divergence::Commutes]);
}

#[test]
fn disjoint_reads_always_commute() {
    let labels = labels_of(&[call("read"), call("read_flag")]);
    assert_eq!(labels, vec![Divergence::Commutes]);
}

#[test]
fn single_calls_trivially_commute() {
    let summary = analyze::<Counter>(&AnalysisConfig { ncomb: 1, ..Default::default() }).unwrap();
    assert_eq!(summary.call_sets, 4);
    assert_eq!(summary.paths, summary.commuting_paths);
    assert_eq!(summary.testcases, 0, "no output requested, no cases enumerated");
}

#[test]
fn unconstrained_call_sets_yield_one_case_each() {
    let model_file = tmp("reads.models");
    let config = AnalysisConfig {
        calls: Some(vec!["read".to_string(), "read_flag".to_string()]),
        model_file: Some(model_file.clone()),
        ..Default::default()
    };
    let summary = analyze::<Counter>(&config).unwrap();
    // read+read, read+read_flag, read_flag+read_flag: every path is
    // unconstrained, so each set collapses to a single equivalence class.
    assert_eq!(summary.call_sets, 3);
    assert_eq!(summary.testcases, 3);
    std::fs::remove_file(model_file).ok();
}

#[test]
fn max_testcases_truncates_silently() {
    let model_file = tmp("truncated.models");
    let config = AnalysisConfig {
        calls: Some(vec!["read".to_string(), "write".to_string()]),
        max_testcases: 2,
        model_file: Some(model_file.clone()),
        ..Default::default()
    };
    let summary = analyze::<Counter>(&config).unwrap();
    // read+read is one class; read+write and write+write both have
    // unboundedly many classes and stop at the cap.
    assert_eq!(summary.testcases, 1 + 2 + 2);
    std::fs::remove_file(model_file).ok();
}

#[test]
fn unknown_call_is_rejected() {
    let config = AnalysisConfig {
        calls: Some(vec!["frobnicate".to_string()]),
        ..Default::default()
    };
    let err = analyze::<Counter>(&config).unwrap_err();
    assert!(matches!(err, CoreError::UnknownCall(_)), "got: {err:?}");
}

#[test]
fn test_file_without_a_sink_is_fatal() {
    let config = AnalysisConfig {
        test_file: Some(tmp("never-created.json")),
        ..Default::default()
    };
    let err = analyze::<Counter>(&config).unwrap_err();
    assert!(matches!(err, CoreError::NoTestgen { .. }), "got: {err:?}");
}
