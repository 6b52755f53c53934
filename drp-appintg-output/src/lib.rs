//! Line-oriented output for the processccd input query.
//!
//! Flattened query results become numbered [`Line`]s, which are written in one
//! of the formats the pipeline-configuration stage reads.

pub mod error;
pub mod json;
pub mod lines;
pub mod wcl;
pub mod xml;

pub use error::OutputError;
pub use json::JsonWriter;
pub use lines::{Line, convert_multiple_files_to_lines};
pub use wcl::WclWriter;
pub use xml::XmlWriter;

use std::fmt;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

/// Trait for output format writers.
pub trait LineWriter {
    fn name(&self) -> &'static str;

    /// Serialize all `lines` to `out`.
    fn write_lines(&self, lines: &[Line], out: &mut dyn Write) -> Result<(), OutputError>;
}

/// Output formats selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputType {
    #[default]
    Wcl,
    Json,
    Xml,
}

impl OutputType {
    pub fn writer(&self) -> Box<dyn LineWriter> {
        match self {
            OutputType::Wcl => Box::new(WclWriter::new()),
            OutputType::Json => Box::new(JsonWriter::new()),
            OutputType::Xml => Box::new(XmlWriter::new()),
        }
    }
}

impl FromStr for OutputType {
    type Err = OutputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wcl" => Ok(OutputType::Wcl),
            "json" => Ok(OutputType::Json),
            "xml" => Ok(OutputType::Xml),
            _ => Err(OutputError::UnsupportedType(s.to_string())),
        }
    }
}

impl fmt::Display for OutputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.writer().name())
    }
}

/// Write `lines` to `path` in `output_type` format.
///
/// The file is written next to its destination and renamed into place, so a
/// failed run never leaves a truncated output file.
pub fn output_lines(path: &Path, lines: &[Line], output_type: OutputType) -> Result<(), OutputError> {
    let mut buf = Vec::new();
    output_type.writer().write_lines(lines, &mut buf)?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp = Path::new(&tmp_name);
    std::fs::write(tmp, &buf)?;
    std::fs::rename(tmp, path)?;

    log::debug!(
        "wrote {} line(s) as {} to {}",
        lines.len(),
        output_type,
        path.display()
    );
    Ok(())
}
