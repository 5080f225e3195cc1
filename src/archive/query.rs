use super::RadarArchive;

use crate::{
    bucket::Bucket,
    errors::NexradDataErr,
    key::date_parts,
    scan::ScanRecord,
    time_range::{normalize, IntoUtc},
};

impl<B: Bucket> RadarArchive<B> {
    /// Retrieve all the scans for a radar with a scan time between `start` and `end`, inclusive.
    ///
    /// Times without a zone are taken to be UTC. The radar id is case insensitive. Every UTC day
    /// touched by the range is listed, one day at a time, and results come back in day order
    /// and then listing order within a day.
    pub fn query_range<S, E>(
        &self,
        radar: &str,
        start: S,
        end: E,
    ) -> Result<Vec<ScanRecord>, NexradDataErr>
    where
        S: IntoUtc,
        E: IntoUtc,
    {
        let interval = normalize(start, end);
        let radar = radar.to_uppercase();

        log::debug!(
            "querying {} from {} to {}",
            radar,
            interval.start(),
            interval.end()
        );

        let mut scans = vec![];
        for day in interval.days() {
            let (year, month, day) = date_parts(day);

            scans.extend(
                self.list_scans(&year, &month, &day, &radar)?
                    .into_iter()
                    .filter(|scan| interval.contains(&scan.scan_time())),
            );
        }

        Ok(scans)
    }
}
