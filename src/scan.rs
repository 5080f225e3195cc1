//! Radar scan files, both remote and local.

use std::{
    fmt::Display,
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use flate2::bufread::GzDecoder;

use crate::{errors::NexradDataErr, key::KeyPatterns};

/// A scan file as cataloged in the remote archive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScanRecord {
    key: String,
    radar_id: String,
    scan_time: DateTime<Utc>,
}

impl ScanRecord {
    /// Build a record from a full key, parsing the scan time from the file name.
    pub fn from_key(key: &str, patterns: &KeyPatterns) -> Result<Self, NexradDataErr> {
        let radar_id = patterns
            .radar(key)
            .ok_or_else(|| NexradDataErr::InvalidScanKey(key.to_owned()))?;
        let fname = patterns
            .scan_filename(key)
            .ok_or_else(|| NexradDataErr::InvalidScanKey(key.to_owned()))?;

        let scan_time = parse_scan_time(fname)?;

        Ok(ScanRecord {
            key: key.to_owned(),
            radar_id: radar_id.to_owned(),
            scan_time,
        })
    }

    /// The full key of the object in the bucket.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The four character radar site.
    pub fn radar_id(&self) -> &str {
        &self.radar_id
    }

    /// The time of the scan.
    pub fn scan_time(&self) -> DateTime<Utc> {
        self.scan_time
    }

    /// The file name, the last component of the key.
    pub fn filename(&self) -> &str {
        self.key.rsplit('/').next().unwrap_or(&self.key)
    }

    /// The `YYYY/MM/DD/SITE` directory portion of the key.
    fn directories(&self) -> impl Iterator<Item = &str> {
        let mut parts: Vec<&str> = self.key.split('/').collect();
        parts.pop();
        parts.into_iter()
    }

    /// Where this file goes under `root`.
    ///
    /// With `keep_hierarchy` the year, month, day, and radar directories of the archive are
    /// replicated below `root`, otherwise the file goes directly in `root`.
    pub fn local_path(&self, root: &Path, keep_hierarchy: bool) -> PathBuf {
        let mut path = root.to_path_buf();
        if keep_hierarchy {
            path.extend(self.directories());
        }
        path.join(self.filename())
    }
}

impl Display for ScanRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.key)
    }
}

/// Parse the scan time from a scan file name.
///
/// File names look like `KTLX20130531_000358_V06.gz`, a four character site followed by the
/// date and time. Anything after the time (version, suffix) is ignored.
pub fn parse_scan_time(fname: &str) -> Result<DateTime<Utc>, NexradDataErr> {
    const FORMAT: &str = "%Y%m%d_%H%M%S";
    // 8 digit date, underscore, 6 digit time
    const LEN: usize = 15;

    let stamp = fname
        .get(4..4 + LEN)
        .ok_or_else(|| NexradDataErr::InvalidScanTime(fname.to_owned()))?;

    NaiveDateTime::parse_from_str(stamp, FORMAT)
        .map(|naive| Utc.from_utc_datetime(&naive))
        .map_err(|_| NexradDataErr::InvalidScanTime(fname.to_owned()))
}

/// A scan file that has been downloaded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocalScanFile {
    remote: ScanRecord,
    path: PathBuf,
}

impl LocalScanFile {
    pub(crate) fn new(remote: ScanRecord, path: PathBuf) -> Self {
        LocalScanFile { remote, path }
    }

    /// The record this file was downloaded from.
    pub fn remote(&self) -> &ScanRecord {
        &self.remote
    }

    /// Location on the local file system.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open the file as it was stored in the archive.
    pub fn open(&self) -> Result<BufReader<File>, NexradDataErr> {
        Ok(BufReader::new(File::open(&self.path)?))
    }

    /// Open the file and decompress it on the fly.
    pub fn open_decompressed(&self) -> Result<GzDecoder<BufReader<File>>, NexradDataErr> {
        Ok(GzDecoder::new(self.open()?))
    }
}

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/
