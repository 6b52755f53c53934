use std::io::Write;

use drp_appintg_core::SubRecord;

use crate::{Line, LineWriter, OutputError};

const INDENT: usize = 4;

/// WCL (workflow control language) output: nested `<name>` blocks holding
/// `key = value` entries. Keys within a block are written sorted.
pub struct WclWriter;

impl WclWriter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for WclWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl LineWriter for WclWriter {
    fn name(&self) -> &'static str {
        "wcl"
    }

    fn write_lines(&self, lines: &[Line], out: &mut dyn Write) -> Result<(), OutputError> {
        open_block(out, "list", 0)?;
        open_block(out, "line", 1)?;

        for line in lines {
            let name = line.name();
            open_block(out, &name, 2)?;
            open_block(out, "file", 3)?;

            let mut labels: Vec<&String> = line.files.keys().collect();
            labels.sort();
            for label in labels {
                open_block(out, label, 4)?;
                write_entries(out, &line.files[label], 5)?;
                close_block(out, label, 4)?;
            }

            close_block(out, "file", 3)?;
            close_block(out, &name, 2)?;
        }

        close_block(out, "line", 1)?;
        close_block(out, "list", 0)?;
        Ok(())
    }
}

fn open_block(out: &mut dyn Write, name: &str, depth: usize) -> std::io::Result<()> {
    writeln!(out, "{:indent$}<{name}>", "", indent = depth * INDENT)
}

fn close_block(out: &mut dyn Write, name: &str, depth: usize) -> std::io::Result<()> {
    writeln!(out, "{:indent$}</{name}>", "", indent = depth * INDENT)
}

fn write_entries(out: &mut dyn Write, record: &SubRecord, depth: usize) -> std::io::Result<()> {
    let mut keys: Vec<&String> = record.keys().collect();
    keys.sort();
    for key in keys {
        writeln!(
            out,
            "{:indent$}{key} = {}",
            "",
            record[key],
            indent = depth * INDENT
        )?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/wcl_tests.rs"]
mod tests;
