#![deny(missing_docs)]
//! Package to browse and download radar scans from the NEXRAD level 2 archive on AWS.
//!
//! The archive is a public bucket with keys laid out as `YYYY/MM/DD/SITE/filename`.
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use nexrad_aws_data::RadarArchive;
//!
//! # fn main() -> Result<(), nexrad_aws_data::NexradDataErr> {
//! let arch = RadarArchive::connect()?;
//! let day = NaiveDate::from_ymd_opt(2013, 5, 31).unwrap();
//! let start = day.and_hms_opt(20, 0, 0).unwrap();
//! let end = day.and_hms_opt(23, 0, 0).unwrap();
//!
//! let scans = arch.query_range("KTLX", start, end)?;
//! let local = arch.download(&scans, std::path::Path::new("/tmp/nexrad"), true)?;
//! println!("downloaded {} files", local.len());
//! # Ok(())
//! # }
//! ```

//
// Public API
//
pub use crate::archive::{ensure_dir, DirStatus, RadarArchive};
pub use crate::bucket::{Bucket, HttpBucket, ListPage, Listing, MemoryBucket};
pub use crate::cmd_line::{parse_time_arg, CommonCmdLineArgs, TimeArg};
pub use crate::config::{default_root, Config};
pub use crate::errors::NexradDataErr;
pub use crate::key::{KeyPatterns, Level, Partition};
pub use crate::scan::{parse_scan_time, LocalScanFile, ScanRecord};
pub use crate::time_range::{enumerate_days, normalize, DayIter, IntoUtc, UtcInterval};

//
// Implementation only
//
mod archive;
mod bucket;
mod cmd_line;
mod config;
mod errors;
mod key;
mod scan;
mod time_range;
