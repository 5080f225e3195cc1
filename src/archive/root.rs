use super::RadarArchive;

use crate::{
    bucket::{Bucket, HttpBucket},
    config::Config,
    errors::NexradDataErr,
    key::KeyPatterns,
};

impl RadarArchive<HttpBucket> {
    /// Connect to the public archive with the default configuration.
    pub fn connect() -> Result<Self, NexradDataErr> {
        Self::connect_with(&Config::default())
    }

    /// Connect to an archive described by `config`.
    pub fn connect_with(config: &Config) -> Result<Self, NexradDataErr> {
        log::debug!("connecting to {}", config.bucket_url());
        Self::with_bucket(HttpBucket::new(config)?)
    }
}

impl<B: Bucket> RadarArchive<B> {
    /// Use an already connected bucket, e.g. a `MemoryBucket` for testing.
    pub fn with_bucket(bucket: B) -> Result<Self, NexradDataErr> {
        Ok(RadarArchive {
            bucket,
            patterns: KeyPatterns::new()?,
        })
    }

    /// The bucket this archive reads from.
    pub fn bucket(&self) -> &B {
        &self.bucket
    }

    /// The patterns used to pick apart keys.
    pub fn patterns(&self) -> &KeyPatterns {
        &self.patterns
    }
}
