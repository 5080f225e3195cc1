//! Anonymous access to an S3 bucket over http.

use std::{
    fs::File,
    path::{Path, PathBuf},
};

use regex::Regex;
use reqwest::{blocking::Client, Url};

use super::{Bucket, ListPage, Listing};
use crate::{config::Config, errors::NexradDataErr};

/// A bucket on an S3 compatible service, accessed with unsigned requests.
#[derive(Debug)]
pub struct HttpBucket {
    client: Client,
    base: Url,
    page_size: Option<u32>,
    parser: ListingParser,
}

impl HttpBucket {
    /// Connect to the bucket described by `config`.
    pub fn new(config: &Config) -> Result<Self, NexradDataErr> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        let base = Url::parse(&config.bucket_url())
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| NexradDataErr::InvalidEndpoint(config.bucket_url()))?;

        Ok(HttpBucket {
            client,
            base,
            page_size: config.page_size(),
            parser: ListingParser::new()?,
        })
    }

    fn object_url(&self, key: &str) -> Result<Url, NexradDataErr> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| NexradDataErr::InvalidEndpoint(self.base.to_string()))?
            .pop_if_empty()
            .extend(key.split('/'));
        Ok(url)
    }

    fn get(&self, url: Url) -> Result<reqwest::blocking::Response, NexradDataErr> {
        let response = self.client.get(url.clone()).send()?;

        if !response.status().is_success() {
            return Err(NexradDataErr::HttpStatus {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        Ok(response)
    }
}

impl Bucket for HttpBucket {
    fn list_page(
        &self,
        prefix: &str,
        delimiter: &str,
        continuation: Option<&str>,
    ) -> Result<ListPage, NexradDataErr> {
        let mut url = self.base.clone();
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("list-type", "2");
            query.append_pair("delimiter", delimiter);
            if !prefix.is_empty() {
                query.append_pair("prefix", prefix);
            }
            if let Some(page_size) = self.page_size {
                query.append_pair("max-keys", &page_size.to_string());
            }
            if let Some(token) = continuation {
                query.append_pair("continuation-token", token);
            }
        }

        log::trace!("GET {}", url);
        let body = self.get(url)?.text()?;

        self.parser.parse(&body)
    }

    fn download(&self, key: &str, dest: &Path) -> Result<(), NexradDataErr> {
        let url = self.object_url(key)?;
        log::debug!("downloading {} to {}", url, dest.display());

        let mut response = self.get(url)?;

        let part = part_path(dest);
        let copied = File::create(&part)
            .map_err(NexradDataErr::from)
            .and_then(|mut file| response.copy_to(&mut file).map_err(NexradDataErr::from));

        match copied {
            Ok(bytes) => {
                log::trace!("received {} bytes for {}", bytes, key);
                std::fs::rename(&part, dest)?;
                Ok(())
            }
            Err(err) => {
                let _ = std::fs::remove_file(&part);
                Err(err)
            }
        }
    }
}

// Temporary file to download into, moved into place once complete.
fn part_path(dest: &Path) -> PathBuf {
    let mut part = dest.as_os_str().to_owned();
    part.push(".part");
    PathBuf::from(part)
}

/// Pulls the pieces we need out of a ListObjectsV2 response.
#[derive(Clone, Debug)]
struct ListingParser {
    result: Regex,
    prefix: Regex,
    key: Regex,
    truncated: Regex,
    token: Regex,
    entity: Regex,
}

impl ListingParser {
    fn new() -> Result<Self, NexradDataErr> {
        Ok(ListingParser {
            result: Regex::new(r"<ListBucketResult[\s>]")?,
            prefix: Regex::new(
                r"<CommonPrefixes>\s*<Prefix>([^<]*)</Prefix>\s*</CommonPrefixes>",
            )?,
            key: Regex::new(r"(?s)<Contents>.*?<Key>([^<]*)</Key>")?,
            truncated: Regex::new(r"<IsTruncated>\s*(true|false)\s*</IsTruncated>")?,
            token: Regex::new(r"<NextContinuationToken>([^<]*)</NextContinuationToken>")?,
            entity: Regex::new(r"&(lt|gt|quot|apos|amp|#[0-9]+|#x[0-9a-fA-F]+);")?,
        })
    }

    fn parse(&self, body: &str) -> Result<ListPage, NexradDataErr> {
        if !self.result.is_match(body) {
            return Err(NexradDataErr::MalformedListing("missing ListBucketResult"));
        }

        let prefixes = self
            .prefix
            .captures_iter(body)
            .map(|caps| self.unescape(&caps[1]))
            .collect();

        let keys = self
            .key
            .captures_iter(body)
            .map(|caps| self.unescape(&caps[1]))
            .collect();

        let truncated = self
            .truncated
            .captures(body)
            .map(|caps| &caps[1] == "true")
            .unwrap_or(false);

        let continuation = if truncated {
            let token = self
                .token
                .captures(body)
                .map(|caps| self.unescape(&caps[1]))
                .ok_or(NexradDataErr::MalformedListing(
                    "truncated without a continuation token",
                ))?;
            Some(token)
        } else {
            None
        };

        Ok(ListPage {
            listing: Listing { prefixes, keys },
            continuation,
        })
    }

    // Decode the named entities and numeric character references, in one pass so "&amp;lt;"
    // stays "&lt;". Unknown or invalid references are left as they are.
    fn unescape(&self, text: &str) -> String {
        self.entity
            .replace_all(text, |caps: &regex::Captures| {
                let name = &caps[1];
                let decoded = match name {
                    "lt" => Some('<'),
                    "gt" => Some('>'),
                    "quot" => Some('"'),
                    "apos" => Some('\''),
                    "amp" => Some('&'),
                    _ if name.starts_with("#x") => u32::from_str_radix(&name[2..], 16)
                        .ok()
                        .and_then(std::char::from_u32),
                    _ => name[1..].parse::<u32>().ok().and_then(std::char::from_u32),
                };

                decoded
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| caps[0].to_owned())
            })
            .into_owned()
    }
}

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/
