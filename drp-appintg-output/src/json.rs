use std::io::Write;

use indexmap::IndexMap;
use serde::Serialize;

use drp_appintg_core::SubRecord;

use crate::{Line, LineWriter, OutputError};

/// Pretty-printed JSON with the same `list` / `line` / `file` nesting as WCL.
/// Line, label and field order follow the query results.
pub struct JsonWriter;

impl JsonWriter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct Document<'a> {
    list: LineBlock<'a>,
}

#[derive(Serialize)]
struct LineBlock<'a> {
    line: IndexMap<String, FileBlock<'a>>,
}

#[derive(Serialize)]
struct FileBlock<'a> {
    file: &'a IndexMap<String, SubRecord>,
}

impl LineWriter for JsonWriter {
    fn name(&self) -> &'static str {
        "json"
    }

    fn write_lines(&self, lines: &[Line], out: &mut dyn Write) -> Result<(), OutputError> {
        let doc = Document {
            list: LineBlock {
                line: lines
                    .iter()
                    .map(|line| (line.name(), FileBlock { file: &line.files }))
                    .collect(),
            },
        };
        serde_json::to_writer_pretty(&mut *out, &doc)?;
        writeln!(out)?;
        Ok(())
    }
}
