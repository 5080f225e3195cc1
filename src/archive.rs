//! The remote archive of radar scans.

use crate::{
    bucket::{Bucket, HttpBucket},
    key::KeyPatterns,
};

/// The archive.
///
/// Holds the connection to the bucket and the compiled key patterns, neither of which change
/// after construction. No state is kept between calls.
#[derive(Debug)]
pub struct RadarArchive<B: Bucket = HttpBucket> {
    bucket: B,             // Where the objects are.
    patterns: KeyPatterns, // Compiled once, read only.
}

mod catalog;
mod query;
mod retrieve;
mod root;

pub use self::retrieve::{ensure_dir, DirStatus};

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/
#[cfg(test)]
mod unit {
    use super::*;

    use crate::{
        bucket::{ListPage, MemoryBucket},
        errors::NexradDataErr,
        scan::ScanRecord,
    };

    use std::{cell::Cell, path::Path};

    use chrono::{FixedOffset, NaiveDate, NaiveDateTime, TimeZone};
    use tempdir::TempDir;

    const SCAN_KEYS: &[&str] = &[
        "2013/05/30/KTLX/KTLX20130530_235800_V06.gz",
        "2013/05/31/KTLX/",
        "2013/05/31/KTLX/KTLX20130531_195946_V06.gz",
        "2013/05/31/KTLX/KTLX20130531_200046_V06.gz",
        "2013/05/31/KTLX/KTLX20130531_213000_V06.gz",
        "2013/05/31/KTLX/KTLX20130531_230000_V06.gz",
        "2013/05/31/KTLX/KTLX20130531_230001_V06.gz",
        "2013/05/31/KTLX/KTLX20130531_230001_V06_MDM",
        "2013/05/31/KVNX/KVNX20130531_200300_V06.gz",
        "2013/05/31/NEXRAD/notes.txt",
        "2013/05/31/index.html",
        "2013/06/01/KTLX/KTLX20130601_000300_V06.gz",
        "2014/01/01/KTLX/KTLX20140101_000000_V06.gz",
        "docs/readme.txt",
        "index.html",
    ];

    // Function to create an archive backed by memory and filled with example keys.
    fn create_test_archive(page_size: usize) -> RadarArchive<MemoryBucket> {
        let bucket = MemoryBucket::new().with_page_size(page_size);
        for key in SCAN_KEYS {
            bucket.insert(key, key.as_bytes().to_vec());
        }

        RadarArchive::with_bucket(bucket).expect("Failed to create test archive.")
    }

    // Fails the listing request numbered `fail_on`, counting from 1, and serves the rest.
    #[derive(Debug)]
    struct FailingBucket {
        inner: MemoryBucket,
        fail_on: usize,
        calls: Cell<usize>,
    }

    impl Bucket for FailingBucket {
        fn list_page(
            &self,
            prefix: &str,
            delimiter: &str,
            continuation: Option<&str>,
        ) -> Result<ListPage, NexradDataErr> {
            self.calls.set(self.calls.get() + 1);
            if self.calls.get() == self.fail_on {
                return Err(NexradDataErr::MalformedListing("listing failed"));
            }

            self.inner.list_page(prefix, delimiter, continuation)
        }

        fn download(&self, key: &str, dest: &Path) -> Result<(), NexradDataErr> {
            self.inner.download(key, dest)
        }
    }

    fn create_failing_archive(fail_on: usize) -> RadarArchive<FailingBucket> {
        let inner = MemoryBucket::new();
        for key in SCAN_KEYS {
            inner.insert(key, key.as_bytes().to_vec());
        }

        let bucket = FailingBucket {
            inner,
            fail_on,
            calls: Cell::new(0),
        };

        RadarArchive::with_bucket(bucket).expect("Failed to create test archive.")
    }

    fn time(y: i32, m: u32, d: u32, hh: u32, mm: u32, ss: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|date| date.and_hms_opt(hh, mm, ss))
            .unwrap()
    }

    fn filenames(scans: &[ScanRecord]) -> Vec<&str> {
        scans.iter().map(|scan| scan.filename()).collect()
    }

    #[test]
    fn test_list_hierarchy() {
        let arch = create_test_archive(1000);

        // "docs/" and "2013/05/31/NEXRAD/" are in the bucket but do not fit their level.
        assert_eq!(arch.list_years().unwrap(), vec!["2013", "2014"]);
        assert_eq!(arch.list_months("2013").unwrap(), vec!["05", "06"]);
        assert_eq!(arch.list_days("2013", "05").unwrap(), vec!["30", "31"]);
        assert_eq!(
            arch.list_radars("2013", "05", "31").unwrap(),
            vec!["KTLX", "KVNX"]
        );
        assert!(arch.list_radars("1990", "01", "01").unwrap().is_empty());
    }

    #[test]
    fn test_list_scans_skips_non_scans() {
        let arch = create_test_archive(1000);

        let scans = arch.list_scans("2013", "05", "31", "KTLX").unwrap();
        assert_eq!(
            filenames(&scans),
            vec![
                "KTLX20130531_195946_V06.gz",
                "KTLX20130531_200046_V06.gz",
                "KTLX20130531_213000_V06.gz",
                "KTLX20130531_230000_V06.gz",
                "KTLX20130531_230001_V06.gz",
            ]
        );
        assert!(scans.iter().all(|scan| scan.radar_id() == "KTLX"));
    }

    #[test]
    fn test_list_scans_with_bad_time_fails() {
        let arch = create_test_archive(1000);
        arch.bucket().insert("2013/05/31/KTLX/KTLXgarbage_V06.gz", vec![]);

        assert!(matches!(
            arch.list_scans("2013", "05", "31", "KTLX"),
            Err(NexradDataErr::InvalidScanTime(_))
        ));
    }

    #[test]
    fn test_day_helpers() {
        let arch = create_test_archive(1000);
        let date = NaiveDate::from_ymd_opt(2013, 6, 1).unwrap();

        assert_eq!(arch.radars_for_day(date).unwrap(), vec!["KTLX"]);
        assert_eq!(
            filenames(&arch.scans_for_day(date, "ktlx").unwrap()),
            vec!["KTLX20130601_000300_V06.gz"]
        );
    }

    #[test]
    fn test_query_range_is_inclusive() {
        let arch = create_test_archive(1000);

        let scans = arch
            .query_range("KTLX", time(2013, 5, 31, 20, 0, 0), time(2013, 5, 31, 23, 0, 0))
            .unwrap();

        assert_eq!(
            filenames(&scans),
            vec![
                "KTLX20130531_200046_V06.gz",
                "KTLX20130531_213000_V06.gz",
                "KTLX20130531_230000_V06.gz",
            ]
        );
        assert_eq!(arch.bucket().requests(), vec!["2013/05/31/KTLX/"]);
    }

    #[test]
    fn test_query_range_lower_case_radar_and_zones() {
        let arch = create_test_archive(1000);

        // 15:00 to 18:00 CDT is 20:00 to 23:00 UTC.
        let cdt = FixedOffset::west_opt(5 * 3600).unwrap();
        let start = cdt.from_local_datetime(&time(2013, 5, 31, 15, 0, 0)).unwrap();
        let end = cdt.from_local_datetime(&time(2013, 5, 31, 18, 0, 0)).unwrap();

        let scans = arch.query_range("ktlx", start, end).unwrap();
        assert_eq!(scans.len(), 3);
        assert_eq!(scans[0].filename(), "KTLX20130531_200046_V06.gz");
    }

    #[test]
    fn test_query_range_across_days() {
        let arch = create_test_archive(1000);

        let scans = arch
            .query_range("KTLX", time(2013, 5, 30, 23, 0, 0), time(2013, 6, 1, 1, 0, 0))
            .unwrap();

        assert_eq!(scans.len(), 7);
        assert_eq!(scans[0].filename(), "KTLX20130530_235800_V06.gz");
        assert_eq!(scans[6].filename(), "KTLX20130601_000300_V06.gz");
        assert!(scans
            .windows(2)
            .all(|pair| pair[0].scan_time() <= pair[1].scan_time()));

        // One listing per day, in day order.
        assert_eq!(
            arch.bucket().requests(),
            vec!["2013/05/30/KTLX/", "2013/05/31/KTLX/", "2013/06/01/KTLX/"]
        );
    }

    #[test]
    fn test_query_range_with_small_pages() {
        let arch = create_test_archive(2);

        let scans = arch
            .query_range("KTLX", time(2013, 5, 31, 0, 0, 0), time(2013, 5, 31, 23, 59, 59))
            .unwrap();

        assert_eq!(scans.len(), 5);
        assert!(arch.bucket().requests().len() > 1);
    }

    #[test]
    fn test_query_range_empty() {
        let arch = create_test_archive(1000);

        assert!(arch
            .query_range("KFAKE", time(2013, 5, 31, 0, 0, 0), time(2013, 6, 1, 0, 0, 0))
            .unwrap()
            .is_empty());

        // Inverted range lists nothing at all.
        assert!(arch
            .query_range("KTLX", time(2013, 6, 1, 0, 0, 0), time(2013, 5, 31, 0, 0, 0))
            .unwrap()
            .is_empty());
        assert_eq!(arch.bucket().requests().len(), 2);
    }

    #[test]
    fn test_listing_failure_aborts_query() {
        // Days 05/31, 06/01, 06/02 are listed in order, the second listing fails.
        let arch = create_failing_archive(2);

        assert!(matches!(
            arch.query_range(
                "KTLX",
                time(2013, 5, 31, 0, 0, 0),
                time(2013, 6, 2, 0, 0, 0)
            ),
            Err(NexradDataErr::MalformedListing(_))
        ));
        assert_eq!(arch.bucket().calls.get(), 2);
    }

    #[test]
    fn test_listing_failure_in_catalog() {
        let arch = create_failing_archive(1);

        assert!(matches!(
            arch.list_radars("2013", "05", "31"),
            Err(NexradDataErr::MalformedListing(_))
        ));

        // Only the one request failed.
        assert_eq!(
            arch.list_radars("2013", "05", "31").unwrap(),
            vec!["KTLX", "KVNX"]
        );
    }

    #[test]
    fn test_download_keep_hierarchy() {
        let tmp = TempDir::new("nexrad-aws-data-test-download").unwrap();
        let arch = create_test_archive(1000);

        let scans = arch
            .query_range("KTLX", time(2013, 5, 31, 21, 0, 0), time(2013, 6, 1, 1, 0, 0))
            .unwrap();
        assert_eq!(scans.len(), 4);

        let local = arch.download(&scans, tmp.path(), true).unwrap();

        assert_eq!(local.len(), scans.len());
        for (lf, scan) in local.iter().zip(&scans) {
            assert_eq!(lf.remote(), scan);
            assert!(lf.path().ends_with(Path::new(scan.key())));
            assert!(lf.path().starts_with(tmp.path()));
            assert_eq!(std::fs::read(lf.path()).unwrap(), scan.key().as_bytes());
        }

        // Directories already exist the second time around.
        let again = arch.download(&scans, tmp.path(), true).unwrap();
        assert_eq!(again, local);
    }

    #[test]
    fn test_download_flat() {
        let tmp = TempDir::new("nexrad-aws-data-test-download").unwrap();
        let arch = create_test_archive(1000);

        let scans = arch.list_scans("2013", "05", "31", "KTLX").unwrap();
        let picked = vec![scans[3].clone(), scans[1].clone()];

        let local = arch.download(&picked, tmp.path(), false).unwrap();

        assert_eq!(
            local[0].path(),
            tmp.path().join("KTLX20130531_230000_V06.gz").as_path()
        );
        assert_eq!(
            local[1].path(),
            tmp.path().join("KTLX20130531_200046_V06.gz").as_path()
        );

        let one = arch.download_one(&scans[0], tmp.path(), false).unwrap();
        assert_eq!(one.path(), tmp.path().join(scans[0].filename()).as_path());
    }

    #[test]
    fn test_download_failure_aborts_batch() {
        let tmp = TempDir::new("nexrad-aws-data-test-download").unwrap();
        let arch = create_test_archive(1000);
        let pats = arch.patterns();

        let good = ScanRecord::from_key(SCAN_KEYS[0], pats).unwrap();
        let missing =
            ScanRecord::from_key("2013/05/30/KTLX/KTLX20130530_235900_V06.gz", pats).unwrap();

        assert!(arch
            .download(&[good, missing.clone()], tmp.path(), false)
            .is_err());
        assert!(!tmp.path().join(missing.filename()).exists());
    }

    #[test]
    fn test_download_into_a_file_fails() {
        let tmp = TempDir::new("nexrad-aws-data-test-download").unwrap();
        let arch = create_test_archive(1000);
        let root = tmp.path().join("occupied");
        std::fs::write(&root, b"").unwrap();

        let scans = arch.list_scans("2013", "06", "01", "KTLX").unwrap();

        assert!(matches!(
            arch.download(&scans, &root, true),
            Err(NexradDataErr::DirectoryCreate { .. })
        ));
    }
}
