//! Command-line arguments and their conversion into selection criteria.

use std::path::PathBuf;

use clap::Parser;

use drp_appintg_core::{
    DEFAULT_CALIB_FIELDS, DEFAULT_RAW_FIELDS, DEFAULT_RAW_FILETYPE, SelectionCriteria, split_list,
};

use crate::error::CliError;

#[derive(Parser, Debug)]
#[command(name = "processccd-query")]
#[command(
    about = "Find raw images in a tract and the calibration files needed to process them",
    long_about = None
)]
pub(crate) struct Cli {
    /// Tract number
    #[arg(long)]
    pub tract: i64,

    /// Tract/ccd overlap table version
    #[arg(long = "overlap_version")]
    pub overlap_version: String,

    /// Calibration lookup version
    #[arg(long = "calib_version")]
    pub calib_version: String,

    /// Filetype of the raw images
    #[arg(long = "raw_filetype", default_value = DEFAULT_RAW_FILETYPE)]
    pub raw_filetype: String,

    /// Comma-separated calibration columns to return
    #[arg(long = "calib_select", default_value_t = DEFAULT_CALIB_FIELDS.join(", "))]
    pub calib_select: String,

    /// Comma-separated raw image columns to return
    #[arg(long = "raw_select", default_value_t = DEFAULT_RAW_FIELDS.join(", "))]
    pub raw_select: String,

    /// Only images overlapping this patch (e.g. "4,5")
    #[arg(long)]
    pub patch: Option<String>,

    /// Comma-separated band filters (e.g. g,r,i)
    #[arg(long)]
    pub filter: Option<String>,

    /// Comma-separated visit numbers
    #[arg(long)]
    pub visit: Option<String>,

    /// Only this ccd number
    #[arg(long)]
    pub ccd: Option<String>,

    /// Comma-separated visit tags
    #[arg(long)]
    pub visittag: Option<String>,

    /// Include blacklisted images (they are excluded by default)
    #[arg(long)]
    pub blacklist: bool,

    /// Comma-separated blacklist reason codes to exclude
    #[arg(long = "blacklist_code")]
    pub blacklist_code: Option<String>,

    /// Services file section with the database connection
    #[arg(short, long)]
    pub section: Option<String>,

    /// Services file to read the section from (default: $DES_SERVICES, then ~/.desservices.toml)
    #[arg(long = "des_services")]
    pub des_services: Option<PathBuf>,

    /// Output file
    #[arg(long)]
    pub qoutfile: PathBuf,

    /// Output format: wcl, json or xml
    #[arg(long, default_value = "wcl")]
    pub qouttype: String,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Selection criteria described by these arguments.
    pub(crate) fn criteria(&self) -> Result<SelectionCriteria, CliError> {
        let mut criteria =
            SelectionCriteria::new(self.tract, &self.overlap_version, &self.calib_version);
        criteria.raw_filetype = self.raw_filetype.trim().to_string();
        criteria.raw_fields = split_list(&self.raw_select);
        criteria.calib_fields = split_list(&self.calib_select);
        criteria.patch = non_empty(&self.patch);
        criteria.ccd = non_empty(&self.ccd);
        criteria.filters = list(&self.filter);
        criteria.visits = list(&self.visit);
        criteria.visit_tags = list(&self.visittag);
        criteria.blacklist_excluded = !self.blacklist;
        criteria.blacklist_codes = list(&self.blacklist_code);

        if criteria.raw_filetype.is_empty() {
            return Err(CliError::config("--raw_filetype must not be empty"));
        }
        Ok(criteria)
    }
}

fn list(arg: &Option<String>) -> Vec<String> {
    arg.as_deref().map(split_list).unwrap_or_default()
}

fn non_empty(arg: &Option<String>) -> Option<String> {
    arg.as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    const REQUIRED: &[&str] = &[
        "processccd-query",
        "--tract",
        "100",
        "--overlap_version",
        "v1",
        "--calib_version",
        "v2",
        "--qoutfile",
        "out.wcl",
    ];

    fn parse(extra: &[&str]) -> Cli {
        let args: Vec<&str> = REQUIRED.iter().chain(extra).copied().collect();
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&[]);
        assert_eq!(cli.qouttype, "wcl");
        assert!(!cli.blacklist);

        let criteria = cli.criteria().unwrap();
        assert_eq!(criteria.tract, 100);
        assert_eq!(criteria.raw_filetype, "hsc_raw");
        assert_eq!(criteria.raw_fields, DEFAULT_RAW_FIELDS);
        assert_eq!(criteria.calib_fields, DEFAULT_CALIB_FIELDS);
        assert!(criteria.blacklist_excluded);
        assert!(criteria.filters.is_empty());
        assert_eq!(criteria.patch, None);
    }

    #[test]
    fn test_lists_and_flags() {
        let cli = parse(&[
            "--filter",
            "g, r,,i",
            "--visit",
            "1228",
            "--ccd",
            "5",
            "--visittag",
            "SSP",
            "--patch",
            "4,5",
            "--blacklist",
            "--blacklist_code",
            "2,7",
            "--raw_select",
            "filename,visit",
        ]);
        let criteria = cli.criteria().unwrap();
        assert_eq!(criteria.filters, vec!["g", "r", "i"]);
        assert_eq!(criteria.visits, vec!["1228"]);
        assert_eq!(criteria.ccd.as_deref(), Some("5"));
        assert_eq!(criteria.visit_tags, vec!["SSP"]);
        assert_eq!(criteria.patch.as_deref(), Some("4,5"));
        assert!(!criteria.blacklist_excluded);
        assert_eq!(criteria.blacklist_codes, vec!["2", "7"]);
        assert_eq!(criteria.raw_fields, vec!["filename", "visit"]);
    }

    #[test]
    fn test_blank_optionals_are_unset() {
        let criteria = parse(&["--ccd", " ", "--filter", ""]).criteria().unwrap();
        assert_eq!(criteria.ccd, None);
        assert!(criteria.filters.is_empty());
    }

    #[test]
    fn test_missing_required() {
        assert!(Cli::try_parse_from(["processccd-query", "--tract", "100"]).is_err());
        assert!(
            Cli::try_parse_from([
                "processccd-query",
                "--tract",
                "abc",
                "--overlap_version",
                "v1",
                "--calib_version",
                "v2",
                "--qoutfile",
                "x",
            ])
            .is_err()
        );
    }

    #[test]
    fn test_empty_filetype_rejected() {
        let err = parse(&["--raw_filetype", " "]).criteria().unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }
}
