//! Builds the SQL that matches raw images to their calibration products.
//!
//! The statement is assembled from a fixed list of join and validity predicates
//! followed by optional predicates, each appended only when its criterion is set.
//! Single values (tract, versions, filetype, patch, ccd) are always bound by name;
//! set-membership lists are embedded as literals after
//! [`SelectionCriteria::validate`] has restricted their character set.

use crate::criteria::SelectionCriteria;
use crate::error::QueryError;
use crate::value::{BindMap, FieldValue};

/// Oracle-style date format used to parse `image.dateobs`.
pub const DATEOBS_FORMAT: &str = "YYYY-MM-DD";

const BASE_TABLES: &[&str] = &[
    "ops_calibration_lookup l",
    "calibration c",
    "ccd_overlap_patch o",
    "image i",
];

const VISIT_TAG_TABLE: &str = "visit_tag vt";

const BLACKLIST_MATCH: &str =
    "select visit from blacklist bl where i.visit=bl.visit and i.ccd=bl.ccd";

/// Driver-specific syntax for a named bind parameter.
pub trait BindPlaceholder {
    fn bind_placeholder(&self, name: &str) -> String;
}

/// `:name` placeholders, as used by SQLite and Oracle.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColonPlaceholder;

impl BindPlaceholder for ColonPlaceholder {
    fn bind_placeholder(&self, name: &str) -> String {
        format!(":{name}")
    }
}

/// A built statement and the values for every placeholder it references.
#[derive(Debug, Clone, PartialEq)]
pub struct QuerySpec {
    pub sql: String,
    pub binds: BindMap,
}

/// Records bind values as placeholders are handed out, so the map never holds
/// an entry the SQL does not reference.
struct Binder<'a, P: ?Sized> {
    style: &'a P,
    binds: BindMap,
}

impl<'a, P: BindPlaceholder + ?Sized> Binder<'a, P> {
    fn new(style: &'a P) -> Self {
        Self {
            style,
            binds: BindMap::new(),
        }
    }

    fn bind(&mut self, name: &str, value: impl Into<FieldValue>) -> String {
        self.binds.insert(name.to_string(), value.into());
        self.style.bind_placeholder(name)
    }
}

/// Build the calibration-matching query for `criteria`.
///
/// Deterministic: equal criteria give byte-identical SQL and bind maps.
pub fn build_query<P: BindPlaceholder + ?Sized>(
    criteria: &SelectionCriteria,
    style: &P,
) -> Result<QuerySpec, QueryError> {
    criteria.validate()?;

    let mut binder = Binder::new(style);

    let img_select: Vec<String> = criteria
        .raw_fields
        .iter()
        .map(|f| format!("i.{f} as img_{f}"))
        .collect();
    let calib_select: Vec<String> = criteria
        .calib_fields
        .iter()
        .map(|f| format!("c.{f} as calib_{f}"))
        .collect();

    let mut from_tables = BASE_TABLES.to_vec();
    if !criteria.visit_tags.is_empty() {
        from_tables.push(VISIT_TAG_TABLE);
    }

    let dateobs = format!("to_date(i.dateobs, '{DATEOBS_FORMAT}')");
    let raw_filetype = binder.bind("raw_filetype", criteria.raw_filetype.as_str());
    let overlap_version = binder.bind("overlap_version", criteria.overlap_version.as_str());
    let calib_version = binder.bind("calib_version", criteria.calib_version.as_str());
    let tract = binder.bind("tract", criteria.tract);

    let mut predicates = vec![
        "c.filename=l.filename".to_string(),
        format!("i.filetype={raw_filetype}"),
        "i.visit=o.visit and i.ccd=o.ccd".to_string(),
        format!("l.min_date <= {dateobs} and {dateobs} <= l.max_date"),
        "i.ccd=c.ccd".to_string(),
        "(c.filter is null or c.filter=i.filter)".to_string(),
        format!("o.version={overlap_version} and l.version={calib_version} and o.tract={tract}"),
    ];

    if !criteria.filters.is_empty() {
        predicates.push(format!("i.filter in ({})", quoted_list(&criteria.filters)));
    }

    if let Some(patch) = &criteria.patch {
        predicates.push(format!("o.patch={}", binder.bind("patch", patch.as_str())));
    }

    if !criteria.visits.is_empty() {
        predicates.push(format!("o.visit in ({})", quoted_list(&criteria.visits)));
    }

    if let Some(ccd) = &criteria.ccd {
        predicates.push(format!("o.ccd={}", binder.bind("ccd", ccd.as_str())));
    }

    if !criteria.visit_tags.is_empty() {
        predicates.push(format!(
            "vt.tag in ({}) and vt.visit=i.visit and vt.ccd=i.ccd",
            quoted_list(&criteria.visit_tags)
        ));
    }

    if criteria.blacklist_excluded {
        predicates.push(format!("not exists ({BLACKLIST_MATCH})"));
    }

    if !criteria.blacklist_codes.is_empty() {
        predicates.push(format!(
            "not exists ({BLACKLIST_MATCH} and bl.reason_code in ({}))",
            criteria.blacklist_codes.join(",")
        ));
    }

    let sql = format!(
        "select distinct o.tract, {}, {} from {} where {}",
        img_select.join(", "),
        calib_select.join(", "),
        from_tables.join(", "),
        predicates.join(" and "),
    );

    log::debug!(
        "built query for tract {} with {} bind(s) and {} predicate(s)",
        criteria.tract,
        binder.binds.len(),
        predicates.len()
    );

    Ok(QuerySpec {
        sql,
        binds: binder.binds,
    })
}

/// `'a','b'` for an IN list. Callers must have validated the values.
fn quoted_list(values: &[String]) -> String {
    values
        .iter()
        .map(|v| format!("'{v}'"))
        .collect::<Vec<_>>()
        .join(",")
}
