//! Namespace: opaque names bound to opaque file identities.
//!
//! Names and file ids are identity sorts; only the equality pattern among
//! them matters. `create` allocates a fresh file id through an internal
//! choice, so whether two creates commute depends on whether some
//! allocation could have satisfied both orders. The modification time is
//! tagged `time` and ignored during matching.

use std::path::Path;

use z3::ast::{Bool, Dynamic, Int};

use commute_core::{CallDef, CallLabel, CoreResult, KindTable, MatchPolicy, ModelDef, TestgenSink};
use commute_sym::{Env, Exec, IndexSort, ScalarSort, SymError, SymMap, SymResult};

use crate::sink::JsonSink;

#[derive(Clone)]
pub struct NamespaceState {
    exists: SymMap,
    file: SymMap,
    mtime: Int,
}

pub struct Namespace;

fn name_arg(ex: &mut Exec<'_>, op: &str, label: &CallLabel) -> SymResult<Dynamic> {
    let name_sort = ex.env.identity_sort("Name");
    ex.env.id_const(&format!("{op}.name.{}", label.call), name_sort, "name")
}

fn presence(state: &NamespaceState, ex: &mut Exec<'_>, name: &Dynamic) -> SymResult<Bool> {
    let entry = state.exists.select(ex.env, name);
    entry
        .as_bool()
        .ok_or_else(|| SymError::Encoding("presence entry is not a bool".to_string()))
}

fn bump_mtime(state: &mut NamespaceState) {
    state.mtime = Int::add(&[state.mtime.clone(), Int::from_i64(1)]);
}

fn bool_result(b: bool) -> Dynamic {
    Dynamic::from_ast(&Bool::from_bool(b))
}

impl ModelDef for Namespace {
    type State = NamespaceState;

    const NAME: &'static str = "namespace";

    fn fresh_state(env: &mut Env) -> SymResult<NamespaceState> {
        let name = env.identity_sort("Name");
        let fileid = env.identity_sort("FileId");
        Ok(NamespaceState {
            exists: env.map_const(
                "Namespace.exists",
                IndexSort::Identity(name),
                ScalarSort::Bool,
                "presence",
            )?,
            file: env.map_const(
                "Namespace.file",
                IndexSort::Identity(name),
                ScalarSort::Identity(fileid),
                "fileid",
            )?,
            mtime: env.int_const("Namespace.mtime", "time")?,
        })
    }

    fn state_eq(a: &NamespaceState, b: &NamespaceState) -> Bool {
        Bool::and(&[a.exists.eq(&b.exists), a.file.eq(&b.file), a.mtime.eq(&b.mtime)])
    }

    fn snapshot(state: &NamespaceState) -> Vec<(String, Dynamic)> {
        vec![("mtime".to_string(), Dynamic::from_ast(&state.mtime))]
    }

    fn calls() -> Vec<CallDef<NamespaceState>> {
        vec![
            CallDef {
                name: "create",
                run: |ex, s, l| {
                    let n = name_arg(ex, "create", l)?;
                    let present = presence(s, ex, &n)?;
                    if ex.branch(&present) {
                        return Ok(bool_result(false));
                    }
                    let fileid = ex.env.identity_sort("FileId");
                    let fid = ex
                        .env
                        .internal_id(&format!("create.fileid.{}.{}", l.seq, l.call), fileid, "fileid")?;
                    s.exists.store(ex.env, &n, &bool_result(true));
                    s.file.store(ex.env, &n, &fid);
                    bump_mtime(s);
                    Ok(bool_result(true))
                },
            },
            CallDef {
                name: "remove",
                run: |ex, s, l| {
                    let n = name_arg(ex, "remove", l)?;
                    let present = presence(s, ex, &n)?;
                    if !ex.branch(&present) {
                        return Ok(bool_result(false));
                    }
                    s.exists.store(ex.env, &n, &bool_result(false));
                    bump_mtime(s);
                    Ok(bool_result(true))
                },
            },
            CallDef {
                name: "lookup",
                run: |ex, s, l| {
                    let n = name_arg(ex, "lookup", l)?;
                    let present = presence(s, ex, &n)?;
                    if ex.branch(&present) {
                        Ok(s.file.select(ex.env, &n))
                    } else {
                        let fileid = ex.env.identity_sort("FileId");
                        ex.env.id_const("FileId.missing", fileid, "fileid")
                    }
                },
            },
        ]
    }

    fn kind_table() -> KindTable {
        let mut kinds = KindTable::new();
        kinds.set("time", MatchPolicy::Ignore);
        kinds
    }

    fn testgen(path: &Path) -> CoreResult<Option<Box<dyn TestgenSink>>> {
        Ok(Some(Box::new(JsonSink::create(path)?)))
    }
}
