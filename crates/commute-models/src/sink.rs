//! JSON-lines test-case sink: one record per enumerated case.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use commute_core::{ConcreteCase, CoreError, CoreResult, TestgenSink};

#[derive(Serialize)]
struct CaseRecord<'a> {
    calls: &'a [String],
    assignments: &'a [(String, String)],
    results: &'a [(String, String)],
    state: &'a [(String, String)],
}

pub struct JsonSink {
    out: BufWriter<File>,
}

impl JsonSink {
    pub fn create(path: &Path) -> CoreResult<Self> {
        Ok(JsonSink { out: BufWriter::new(File::create(path)?) })
    }
}

impl TestgenSink for JsonSink {
    fn begin_call_set(&mut self, _calls: &[String]) -> CoreResult<()> {
        Ok(())
    }

    fn on_case(&mut self, case: &ConcreteCase) -> CoreResult<()> {
        let record = CaseRecord {
            calls: &case.calls,
            assignments: &case.assignments,
            results: &case.results,
            state: &case.state,
        };
        serde_json::to_writer(&mut self.out, &record)
            .map_err(|e| CoreError::Testgen(e.to_string()))?;
        writeln!(self.out)?;
        Ok(())
    }

    fn end_call_set(&mut self) -> CoreResult<()> {
        self.out.flush()?;
        Ok(())
    }

    fn finish(&mut self) -> CoreResult<()> {
        self.out.flush()?;
        Ok(())
    }
}
