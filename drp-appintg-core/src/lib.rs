//! Query construction and result reshaping for the processccd input query.
//!
//! Given a tract and version/filter criteria, [`build_query`] produces the SQL
//! that matches raw images to valid calibration products. Execution happens
//! elsewhere; the rows that come back go through [`normalize`] and [`reshape`]
//! and are flattened into one line per image.

pub mod criteria;
pub mod error;
pub mod normalize;
pub mod query;
pub mod reshape;
pub mod util;
pub mod value;

pub use criteria::{
    DEFAULT_CALIB_FIELDS, DEFAULT_RAW_FIELDS, DEFAULT_RAW_FILETYPE, SelectionCriteria,
};
pub use error::QueryError;
pub use normalize::{NULL_SENTINEL, normalize};
pub use query::{BindPlaceholder, ColonPlaceholder, DATEOBS_FORMAT, QuerySpec, build_query};
pub use reshape::{
    FileLabelSet, IMGNAME_KEY, ImageRecord, RAW_LABEL, Reshaped, flatten, reshape,
};
pub use util::split_list;
pub use value::{BindMap, FieldValue, ResultRow, SubRecord};
