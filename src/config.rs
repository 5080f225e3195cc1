//! Connection settings for the remote archive.

use std::{env, path::PathBuf, time::Duration};

/// Where and how to reach the archive bucket.
///
/// Access is always anonymous, there is no credential material here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    endpoint: String,
    bucket: String,
    timeout: Option<Duration>,
    page_size: Option<u32>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            endpoint: Self::DEFAULT_ENDPOINT.to_owned(),
            bucket: Self::DEFAULT_BUCKET.to_owned(),
            timeout: Some(Duration::from_secs(Self::DEFAULT_TIMEOUT_SECS)),
            page_size: None,
        }
    }
}

impl Config {
    /// Public S3 endpoint for the us-east-1 region, where the archive lives.
    pub const DEFAULT_ENDPOINT: &'static str = "https://s3.amazonaws.com";
    /// Bucket holding the level 2 archive.
    pub const DEFAULT_BUCKET: &'static str = "noaa-nexrad-level2";
    const DEFAULT_TIMEOUT_SECS: u64 = 60;

    const ENDPOINT_VAR: &'static str = "NEXRAD_AWS_ENDPOINT";
    const BUCKET_VAR: &'static str = "NEXRAD_AWS_BUCKET";
    const TIMEOUT_VAR: &'static str = "NEXRAD_AWS_TIMEOUT_SECS";

    /// Start from the defaults and override them with any of `NEXRAD_AWS_ENDPOINT`,
    /// `NEXRAD_AWS_BUCKET`, and `NEXRAD_AWS_TIMEOUT_SECS` that are set.
    ///
    /// A timeout of 0 seconds means no timeout. Unparseable values are ignored.
    pub fn from_env() -> Self {
        let mut config = Config::default();

        if let Ok(endpoint) = env::var(Self::ENDPOINT_VAR) {
            config = config.with_endpoint(&endpoint);
        }

        if let Ok(bucket) = env::var(Self::BUCKET_VAR) {
            config = config.with_bucket(&bucket);
        }

        if let Some(secs) = env::var(Self::TIMEOUT_VAR)
            .ok()
            .and_then(|val| val.parse::<u64>().ok())
        {
            config = config.with_timeout(Some(secs).filter(|s| *s > 0).map(Duration::from_secs));
        }

        config
    }

    /// Set the endpoint, e.g. `https://s3.amazonaws.com` or a local mirror.
    pub fn with_endpoint(self, endpoint: &str) -> Self {
        Config {
            endpoint: endpoint.trim_end_matches('/').to_owned(),
            ..self
        }
    }

    /// Set the bucket name.
    pub fn with_bucket(self, bucket: &str) -> Self {
        Config {
            bucket: bucket.to_owned(),
            ..self
        }
    }

    /// Set the timeout for each request, `None` to wait forever.
    pub fn with_timeout(self, timeout: Option<Duration>) -> Self {
        Config { timeout, ..self }
    }

    /// Limit the number of entries per listing page, `None` uses the service default.
    pub fn with_page_size(self, page_size: Option<u32>) -> Self {
        Config { page_size, ..self }
    }

    /// The endpoint.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The bucket name.
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// The request timeout.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// The listing page size.
    pub fn page_size(&self) -> Option<u32> {
        self.page_size
    }

    /// Url of the bucket, path style.
    pub(crate) fn bucket_url(&self) -> String {
        format!("{}/{}", self.endpoint, self.bucket)
    }
}

/// Get the default location to download files into, `${HOME}/nexrad`.
pub fn default_root() -> Option<PathBuf> {
    dirs::home_dir().map(|hd| hd.join("nexrad"))
}
