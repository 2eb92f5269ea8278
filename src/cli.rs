use crate::loaders::{LoadOptions, ParsePolicy};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "estate-agent")]
#[command(about = "Values real-estate listings and reports portfolio statistics.")]
pub struct CommandLine {
    /// Listings file, one `#`-separated record per line
    pub input: PathBuf,

    /// Also write the report lines to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write the report as JSON to this file
    #[arg(long)]
    pub json: Option<PathBuf>,

    /// Append log output to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Abort on the first malformed record instead of skipping it
    #[arg(long)]
    pub strict: bool,

    /// Discount every listing by this percentage before valuation
    #[arg(long, value_name = "PERCENT")]
    pub discount: Option<f64>,

    /// Do not echo the report to stdout
    #[arg(short, long)]
    pub quiet: bool,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            policy: if self.strict {
                ParsePolicy::Abort
            } else {
                ParsePolicy::Skip
            },
            discount: self.discount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_skip_bad_records() {
        let cli = CommandLine::try_parse_from(["estate-agent", "listings.txt"]).unwrap();
        assert_eq!(cli.input, PathBuf::from("listings.txt"));
        assert_eq!(cli.load_options(), LoadOptions::default());
        assert!(cli.output.is_none());
        assert!(!cli.quiet);
    }

    #[test]
    fn strict_and_discount_flow_into_load_options() {
        let cli = CommandLine::try_parse_from([
            "estate-agent",
            "listings.txt",
            "--strict",
            "--discount",
            "12.5",
            "-o",
            "report.txt",
        ])
        .unwrap();
        let options = cli.load_options();
        assert_eq!(options.policy, ParsePolicy::Abort);
        assert_eq!(options.discount, Some(12.5));
        assert_eq!(cli.output, Some(PathBuf::from("report.txt")));
    }

    #[test]
    fn input_is_required() {
        assert!(CommandLine::try_parse_from(["estate-agent"]).is_err());
    }
}
