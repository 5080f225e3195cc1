use chrono::NaiveDate;
use strum::AsStaticRef;

use super::RadarArchive;

use crate::{
    bucket::Bucket,
    errors::NexradDataErr,
    key::{date_parts, Partition},
    scan::ScanRecord,
};

impl<B: Bucket> RadarArchive<B> {
    const DELIMITER: &'static str = "/";

    /// Retrieve a list of the years in the archive.
    pub fn list_years(&self) -> Result<Vec<String>, NexradDataErr> {
        self.browse(&Partition::Root)
    }

    /// Retrieve a list of the months available in a year, e.g. `"2013"`.
    pub fn list_months(&self, year: &str) -> Result<Vec<String>, NexradDataErr> {
        self.browse(&Partition::Year(year))
    }

    /// Retrieve a list of the days available in a month, e.g. `"2013", "05"`.
    pub fn list_days(&self, year: &str, month: &str) -> Result<Vec<String>, NexradDataErr> {
        self.browse(&Partition::Month(year, month))
    }

    /// Retrieve a list of the radar sites with data on a day.
    pub fn list_radars(
        &self,
        year: &str,
        month: &str,
        day: &str,
    ) -> Result<Vec<String>, NexradDataErr> {
        self.browse(&Partition::Day(year, month, day))
    }

    /// Retrieve the scans for a radar on a day, in the order the archive lists them.
    ///
    /// Fails if any scan file name does not contain a valid scan time.
    pub fn list_scans(
        &self,
        year: &str,
        month: &str,
        day: &str,
        radar: &str,
    ) -> Result<Vec<ScanRecord>, NexradDataErr> {
        let partition = Partition::Radar(year, month, day, radar);
        let listing = self
            .bucket
            .list(&partition.prefix(), Self::DELIMITER)?;

        listing
            .keys
            .iter()
            .filter(|key| self.is_match(&partition, key))
            .map(|key| ScanRecord::from_key(key, &self.patterns))
            .collect()
    }

    /// Retrieve the radar sites with data on `date`.
    pub fn radars_for_day(&self, date: NaiveDate) -> Result<Vec<String>, NexradDataErr> {
        let (year, month, day) = date_parts(date);
        self.list_radars(&year, &month, &day)
    }

    /// Retrieve the scans for a radar on `date`. The radar id is case insensitive.
    pub fn scans_for_day(
        &self,
        date: NaiveDate,
        radar: &str,
    ) -> Result<Vec<ScanRecord>, NexradDataErr> {
        let (year, month, day) = date_parts(date);
        self.list_scans(&year, &month, &day, &radar.to_uppercase())
    }

    // List the child prefixes of a partition and pull out the component for the next level.
    fn browse(&self, partition: &Partition) -> Result<Vec<String>, NexradDataErr> {
        let level = partition.child_level();
        let listing = self
            .bucket
            .list(&partition.prefix(), Self::DELIMITER)?;

        Ok(listing
            .prefixes
            .iter()
            .filter_map(|prefix| {
                let found = self.patterns.extract(level, prefix);
                if found.is_none() {
                    log::trace!("skipping {} while listing {}s", prefix, level.as_static());
                }
                found
            })
            .map(str::to_owned)
            .collect())
    }

    fn is_match(&self, partition: &Partition, key: &str) -> bool {
        let level = partition.child_level();
        let found = self.patterns.extract(level, key).is_some();
        if !found {
            log::trace!("skipping {} while listing {}s", key, level.as_static());
        }
        found
    }
}
