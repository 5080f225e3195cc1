//! Command line options that are used across applications.

use std::path::{Path, PathBuf};

use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use clap::{App, Arg, ArgMatches};

use crate::{
    config::{default_root, Config},
    errors::NexradDataErr,
    time_range::IntoUtc,
};

/// Struct to package up command line arguments.
#[derive(Clone, Debug)]
pub struct CommonCmdLineArgs {
    // Where downloaded files go
    root: PathBuf,
    // How to reach the bucket
    config: Config,
}

impl<'a, 'b> CommonCmdLineArgs {
    /// Create a new set of args.
    pub fn new_app(app_name: &'static str, about: &'static str) -> App<'a, 'b> {
        App::new(app_name)
            .about(about)
            .version(clap::crate_version!())
            .arg(
                Arg::with_name("root")
                    .short("r")
                    .long("root")
                    .takes_value(true)
                    .global(true)
                    .help("Directory to download into.")
                    .long_help("Directory to download into. Defaults to '${HOME}/nexrad/'"),
            )
            .arg(
                Arg::with_name("endpoint")
                    .long("endpoint")
                    .takes_value(true)
                    .global(true)
                    .help("Url of the storage service.")
                    .long_help(concat!(
                        "Url of the storage service. Defaults to $NEXRAD_AWS_ENDPOINT, or ",
                        "the public AWS endpoint if that is not set."
                    )),
            )
            .arg(
                Arg::with_name("bucket")
                    .long("bucket")
                    .takes_value(true)
                    .global(true)
                    .help("Name of the bucket holding the archive."),
            )
            .after_help(concat!(
                "Times are either RFC 3339 with a zone, e.g. 2013-05-31T15:00:00-05:00, or ",
                "without a zone, e.g. 2013-05-31T20:00, in which case they are UTC."
            ))
    }

    /// Process an `App` to get the parsed values out of it and the matches object so an application
    /// can continue with further argument parsing.
    pub fn matches(app: App<'a, 'b>) -> (Self, ArgMatches<'a>) {
        let matches = app.get_matches();
        let args = Self::from_matches(&matches);
        (args, matches)
    }

    fn from_matches(matches: &ArgMatches) -> Self {
        let root = matches
            .value_of("root")
            .map(PathBuf::from)
            .or_else(default_root)
            .unwrap_or_else(|| PathBuf::from("nexrad"));

        let mut config = Config::from_env();
        if let Some(endpoint) = matches.value_of("endpoint") {
            config = config.with_endpoint(endpoint);
        }
        if let Some(bucket) = matches.value_of("bucket") {
            config = config.with_bucket(bucket);
        }

        CommonCmdLineArgs { root, config }
    }

    /// Get the download directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the connection settings.
    pub fn config(&self) -> &Config {
        &self.config
    }
}

/// A time given on the command line, with or without a zone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeArg {
    /// No zone given, taken as UTC.
    Naive(NaiveDateTime),
    /// Zone given as an offset.
    Aware(DateTime<FixedOffset>),
}

impl IntoUtc for TimeArg {
    fn into_utc(self) -> DateTime<Utc> {
        match self {
            TimeArg::Naive(naive) => naive.into_utc(),
            TimeArg::Aware(aware) => aware.into_utc(),
        }
    }
}

/// Parse a time from the command line.
pub fn parse_time_arg(text: &str) -> Result<TimeArg, NexradDataErr> {
    const NAIVE_FORMATS: &[&str] = &[
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ];

    let text = text.trim();

    if let Ok(aware) = DateTime::parse_from_rfc3339(text) {
        return Ok(TimeArg::Aware(aware));
    }

    NAIVE_FORMATS[1..]
        .iter()
        .fold(
            NaiveDateTime::parse_from_str(text, NAIVE_FORMATS[0]),
            |res, fmt| res.or_else(|_| NaiveDateTime::parse_from_str(text, fmt)),
        )
        .map(TimeArg::Naive)
        .map_err(NexradDataErr::from)
}

#[cfg(test)]
mod unit {
    use super::*;

    use chrono::NaiveDate;

    #[test]
    fn test_parse_time_arg() {
        let expected = NaiveDate::from_ymd_opt(2013, 5, 31)
            .unwrap()
            .and_hms_opt(20, 0, 0)
            .unwrap();

        assert_eq!(
            parse_time_arg("2013-05-31T20:00").unwrap(),
            TimeArg::Naive(expected)
        );
        assert_eq!(
            parse_time_arg("2013-05-31 20:00:00").unwrap(),
            TimeArg::Naive(expected)
        );

        let aware = parse_time_arg("2013-05-31T15:00:00-05:00").unwrap();
        assert!(matches!(aware, TimeArg::Aware(_)));
        assert_eq!(aware.into_utc().naive_utc(), expected);

        assert!(matches!(
            parse_time_arg("yesterday"),
            Err(NexradDataErr::TimeParse(_))
        ));
    }

    #[test]
    fn test_common_args() {
        let app = CommonCmdLineArgs::new_app("test", "testing");
        let matches = app
            .get_matches_from_safe(vec![
                "test",
                "--root",
                "/tmp/radar",
                "--endpoint",
                "http://localhost:9000",
                "--bucket",
                "mirror",
            ])
            .unwrap();

        let args = CommonCmdLineArgs::from_matches(&matches);
        assert_eq!(args.root(), Path::new("/tmp/radar"));
        assert_eq!(args.config().endpoint(), "http://localhost:9000");
        assert_eq!(args.config().bucket(), "mirror");
    }
}
