use drp_appintg_core::{FieldValue, SubRecord};
use drp_appintg_output::*;

fn record(imgname: &str, filename: &str, filetype: Option<&str>) -> SubRecord {
    let mut r = SubRecord::new();
    r.insert("imgname".into(), FieldValue::text(imgname));
    r.insert("filename".into(), FieldValue::text(filename));
    if let Some(ft) = filetype {
        r.insert("filetype".into(), FieldValue::text(ft));
    }
    r.insert("ccd".into(), FieldValue::Int(5));
    r
}

fn labels() -> Vec<String> {
    vec!["raw".into(), "bias".into(), "flat".into()]
}

fn rows() -> Vec<Vec<SubRecord>> {
    vec![
        vec![
            record("img1.fits", "img1.fits", None),
            record("img1.fits", "BIAS-5.fits", Some("bias")),
            record("img1.fits", "FLAT-5.fits", Some("flat")),
        ],
        vec![
            record("img2.fits", "img2.fits", None),
            record("img2.fits", "BIAS-6.fits", Some("bias")),
            record("img2.fits", "FLAT-6.fits", Some("flat")),
        ],
    ]
}

#[test]
fn lines_are_numbered_from_start_index() {
    let lines = convert_multiple_files_to_lines(rows(), &labels(), 1).unwrap();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].name(), "line00001");
    assert_eq!(lines[1].name(), "line00002");

    let keys: Vec<&str> = lines[0].files.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["raw", "bias", "flat"]);
    assert_eq!(
        lines[1].files["bias"]["filename"],
        FieldValue::text("BIAS-6.fits")
    );

    let lines = convert_multiple_files_to_lines(rows(), &labels(), 10).unwrap();
    assert_eq!(lines[0].name(), "line00010");
}

#[test]
fn label_count_mismatch_rejected() {
    let mut bad = rows();
    bad[1].pop();
    let err = convert_multiple_files_to_lines(bad, &labels(), 1).unwrap_err();
    assert!(matches!(
        err,
        OutputError::LabelCount {
            line: 2,
            expected: 3,
            found: 2
        }
    ));
}

#[test]
fn output_type_parsing() {
    assert_eq!("wcl".parse::<OutputType>().unwrap(), OutputType::Wcl);
    assert_eq!("JSON".parse::<OutputType>().unwrap(), OutputType::Json);
    assert_eq!("xml".parse::<OutputType>().unwrap(), OutputType::Xml);
    assert_eq!(OutputType::default(), OutputType::Wcl);
    assert_eq!(OutputType::Json.to_string(), "json");

    let err = "csv".parse::<OutputType>().unwrap_err();
    assert!(matches!(err, OutputError::UnsupportedType(ref t) if t == "csv"));
    assert!(err.to_string().contains("wcl, json, xml"));
}

#[test]
fn json_keeps_result_order() {
    let lines = convert_multiple_files_to_lines(rows(), &labels(), 1).unwrap();
    let mut out = Vec::new();
    JsonWriter::new().write_lines(&lines, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    let line = &value["list"]["line"]["line00002"]["file"];
    assert_eq!(line["flat"]["filename"], "FLAT-6.fits");
    assert_eq!(line["raw"]["ccd"], 5);

    let raw_pos = text.find("\"raw\"").unwrap();
    let bias_pos = text.find("\"bias\"").unwrap();
    let flat_pos = text.find("\"flat\"").unwrap();
    assert!(raw_pos < bias_pos && bias_pos < flat_pos);
}

#[test]
fn xml_escapes_values() {
    let mut rows = rows();
    rows[0][0].insert("field".into(), FieldValue::text("A&B <deep>"));
    let lines = convert_multiple_files_to_lines(rows, &labels(), 1).unwrap();

    let mut out = Vec::new();
    XmlWriter::new().write_lines(&lines, &mut out).unwrap();
    let xml = String::from_utf8(out).unwrap();

    assert!(xml.starts_with("<?xml version=\"1.0\"?>\n<list>\n"));
    assert!(xml.contains("<line name=\"line00001\">"));
    assert!(xml.contains("<file label=\"bias\">"));
    assert!(xml.contains("<field name=\"field\">A&amp;B &lt;deep&gt;</field>"));
    assert!(xml.contains("<field name=\"ccd\">5</field>"));
}

#[test]
fn output_lines_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out").join("processccd.wcl");
    let lines = convert_multiple_files_to_lines(rows(), &labels(), 1).unwrap();

    output_lines(&path, &lines, OutputType::Wcl).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("<list>\n"));
    assert!(text.contains("<line00002>"));
    assert!(text.contains("filename = FLAT-6.fits"));
    assert!(!dir.path().join("out").join("processccd.wcl.tmp").exists());
}
