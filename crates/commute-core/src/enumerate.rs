//! Test-case enumeration.
//!
//! For each commuting path, repeatedly checks the path condition, emits
//! the found model, and conjoins the negated isomorphism condition so
//! the next model comes from a fresh equivalence class. Enumeration
//! stops on unsat, on solver unknown (that path only), or at the
//! per-call-set cap.

use std::fs::File;
use std::io::{self, BufWriter, IsTerminal, Write};

use tracing::{info, warn};
use z3::ast::Ast;

use commute_sym::{simplify_deep, symand, CheckOutcome, ConcreteModel, DeclShape, Env, PathResult};

use crate::isomatch::{self, KindTable};
use crate::tester::{CallSetOutcome, Divergence};
use crate::{AnalysisConfig, ConcreteCase, CoreResult, ModelDef, TestgenSink};

pub struct TestWriter {
    model_file: Option<BufWriter<File>>,
    sink: Option<Box<dyn TestgenSink>>,
    callset: Vec<String>,
    npath: usize,
    ncompath: usize,
    nmodel: usize,
    total_paths: usize,
    total_commuting: usize,
    total_cases: usize,
    tty: bool,
}

impl TestWriter {
    pub fn new<M: ModelDef>(config: &AnalysisConfig) -> CoreResult<Self> {
        let model_file = match &config.model_file {
            Some(path) => Some(BufWriter::new(File::create(path)?)),
            None => None,
        };
        let sink = match &config.test_file {
            Some(path) => match M::testgen(path)? {
                Some(sink) => Some(sink),
                None => return Err(crate::CoreError::NoTestgen { model: M::NAME.to_string() }),
            },
            None => None,
        };
        Ok(TestWriter {
            model_file,
            sink,
            callset: Vec::new(),
            npath: 0,
            ncompath: 0,
            nmodel: 0,
            total_paths: 0,
            total_commuting: 0,
            total_cases: 0,
            tty: io::stdout().is_terminal(),
        })
    }

    pub fn begin_call_set(&mut self, calls: &[String]) -> CoreResult<()> {
        if let Some(f) = &mut self.model_file {
            writeln!(f, "=== Models for {} ===", calls.join(" "))?;
            writeln!(f)?;
        }
        self.callset = calls.to_vec();
        self.npath = 0;
        self.ncompath = 0;
        self.nmodel = 0;
        if let Some(sink) = &mut self.sink {
            sink.begin_call_set(calls)?;
        }
        Ok(())
    }

    /// Account one path; enumerate test cases when it commutes.
    pub fn on_result(
        &mut self,
        env: &Env,
        path: &PathResult<CallSetOutcome>,
        kinds: &KindTable,
        config: &AnalysisConfig,
    ) -> CoreResult<()> {
        self.npath += 1;
        if path.value.label != Divergence::Commutes {
            self.progress(false);
            return Ok(());
        }
        self.ncompath += 1;
        if self.model_file.is_none() && self.sink.is_none() {
            self.progress(false);
            return Ok(());
        }
        if let Some(f) = &mut self.model_file {
            writeln!(f, "== Path {} ==", self.ncompath)?;
            writeln!(f)?;
        }

        let mut cond = if config.simplify_more {
            simplify_deep(&path.path_condition)
        } else {
            path.path_condition.simplify()
        };
        while self.nmodel < config.max_testcases {
            match env.check(&cond) {
                CheckOutcome::Unsat => break,
                CheckOutcome::Unknown { reason } => {
                    warn!(reason = %reason, "cannot enumerate test cases for path, moving on");
                    break;
                }
                CheckOutcome::Sat(model) => {
                    // The exclusion must be computed before the case is
                    // materialized; completion extends the assignment.
                    let exclusion = isomatch::exclusion_condition(&model, kinds)?;
                    self.emit(&model, &path.value)?;
                    if config.verbose_testgen {
                        info!(case = self.nmodel, exclusion = %exclusion, "enumerated model");
                    }
                    cond = symand(&[cond, exclusion]);
                    self.progress(false);
                }
            }
        }
        self.progress(false);
        Ok(())
    }

    fn emit(
        &mut self,
        model: &ConcreteModel,
        outcome: &CallSetOutcome,
    ) -> CoreResult<()> {
        self.nmodel += 1;
        if let Some(f) = &mut self.model_file {
            writeln!(f, "{}", model.dump())?;
            writeln!(f)?;
            f.flush()?;
        }
        if let Some(sink) = &mut self.sink {
            let case = materialize(model, &self.callset, outcome)?;
            sink.on_case(&case)?;
        }
        Ok(())
    }

    pub fn end_call_set(&mut self) -> CoreResult<()> {
        if let Some(sink) = &mut self.sink {
            sink.end_call_set()?;
        }
        self.progress(true);
        self.total_paths += self.npath;
        self.total_commuting += self.ncompath;
        self.total_cases += self.nmodel;
        Ok(())
    }

    pub fn finish(&mut self) -> CoreResult<()> {
        if let Some(f) = &mut self.model_file {
            f.flush()?;
        }
        if let Some(sink) = &mut self.sink {
            sink.finish()?;
        }
        Ok(())
    }

    pub fn total_commuting(&self) -> usize {
        self.total_commuting
    }

    pub fn total_cases(&self) -> usize {
        self.total_cases
    }

    /// Incremental counters: overwrite in place on a terminal, one line
    /// at call-set end otherwise.
    fn progress(&self, end: bool) {
        let mut out = io::stdout();
        if self.tty {
            let _ = write!(out, "\r");
        } else if !end {
            return;
        }
        let _ = write!(
            out,
            "  {} paths ({} commutative), {} testcases",
            self.npath, self.ncompath, self.nmodel
        );
        if self.tty {
            let _ = write!(out, "\x1b[K");
            if end {
                let _ = writeln!(out);
            }
        } else {
            let _ = writeln!(out);
        }
        let _ = out.flush();
    }
}

/// Read the concrete test case out of a model: external scalar initial
/// values, plus program-order results and final state under completion.
fn materialize(
    model: &ConcreteModel,
    calls: &[String],
    outcome: &CallSetOutcome,
) -> CoreResult<ConcreteCase> {
    let mut assignments = Vec::new();
    for decl in model.decls() {
        if decl.internal || !matches!(decl.shape, DeclShape::Scalar(_)) {
            continue;
        }
        let expr = decl.scalar_expr()?;
        assignments.push((decl.name.clone(), model.eval_display(expr)?));
    }
    let mut results = Vec::new();
    for (name, result) in calls.iter().zip(&outcome.results) {
        results.push((name.clone(), model.eval_display(result)?));
    }
    let mut state = Vec::new();
    for (field, expr) in &outcome.state {
        state.push((field.clone(), model.eval_display(expr)?));
    }
    Ok(ConcreteCase { calls: calls.to_vec(), assignments, results, state })
}
