use std::io::Write;

use quick_xml::escape::escape;

use crate::{Line, LineWriter, OutputError};

/// XML output: one `<line>` per image, one `<file>` per label, one `<field>`
/// per column.
pub struct XmlWriter;

impl XmlWriter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for XmlWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl LineWriter for XmlWriter {
    fn name(&self) -> &'static str {
        "xml"
    }

    fn write_lines(&self, lines: &[Line], out: &mut dyn Write) -> Result<(), OutputError> {
        let mut xml = String::new();
        xml.push_str("<?xml version=\"1.0\"?>\n");
        xml.push_str("<list>\n");

        for line in lines {
            xml.push_str(&format!("  <line name=\"{}\">\n", line.name()));
            for (label, record) in &line.files {
                xml.push_str(&format!("    <file label=\"{}\">\n", escape(label.as_str())));
                for (key, value) in record {
                    write_field(&mut xml, key, &value.to_string());
                }
                xml.push_str("    </file>\n");
            }
            xml.push_str("  </line>\n");
        }

        xml.push_str("</list>\n");
        out.write_all(xml.as_bytes())?;
        Ok(())
    }
}

fn write_field(xml: &mut String, name: &str, value: &str) {
    xml.push_str("      <field name=\"");
    xml.push_str(&escape(name));
    xml.push_str("\">");
    xml.push_str(&escape(value));
    xml.push_str("</field>\n");
}
