//! Integer register: one value cell plus an independent flag.
//!
//! The smallest interesting model: reads of disjoint fields commute
//! unconditionally, a read commutes with a write exactly when the write
//! stores the value already present, and two symbolic writes commute
//! exactly when they store the same value.

use std::path::Path;

use z3::ast::{Bool, Dynamic, Int};

use commute_core::{CallDef, CoreResult, ModelDef, TestgenSink};
use commute_sym::{Env, SymResult};

use crate::sink::JsonSink;

#[derive(Clone)]
pub struct RegisterState {
    value: Int,
    flag: Bool,
}

pub struct Register;

fn unit() -> Dynamic {
    Dynamic::from_ast(&Int::from_i64(0))
}

impl ModelDef for Register {
    type State = RegisterState;

    const NAME: &'static str = "register";

    fn fresh_state(env: &mut Env) -> SymResult<RegisterState> {
        Ok(RegisterState {
            value: env.int_const("Register.value", "value")?,
            flag: env.bool_const("Register.flag", "flag")?,
        })
    }

    fn state_eq(a: &RegisterState, b: &RegisterState) -> Bool {
        Bool::and(&[a.value.eq(&b.value), a.flag.eq(&b.flag)])
    }

    fn snapshot(state: &RegisterState) -> Vec<(String, Dynamic)> {
        vec![
            ("value".to_string(), Dynamic::from_ast(&state.value)),
            ("flag".to_string(), Dynamic::from_ast(&state.flag)),
        ]
    }

    fn calls() -> Vec<CallDef<RegisterState>> {
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
                    Ok(unit())
                },
            },
            CallDef {
                name: "write_one",
                run: |_ex, s, _l| {
                    s.value = Int::from_i64(1);
                    Ok(unit())
                },
            },
            CallDef {
                name: "read_flag",
                run: |_ex, s, _l| Ok(Dynamic::from_ast(&s.flag)),
            },
        ]
    }

    fn testgen(path: &Path) -> CoreResult<Option<Box<dyn TestgenSink>>> {
        Ok(Some(Box::new(JsonSink::create(path)?)))
    }
}
