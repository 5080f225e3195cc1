//! Access to the object storage holding the archive.

use std::path::Path;

use crate::errors::NexradDataErr;

mod http;
mod memory;

pub use self::http::HttpBucket;
pub use self::memory::MemoryBucket;

/// The entries found under a prefix, one level deep.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Listing {
    /// Child prefixes, each ending in the delimiter.
    pub prefixes: Vec<String>,
    /// Full keys of objects directly under the prefix.
    pub keys: Vec<String>,
}

impl Listing {
    /// True if there were no entries at all.
    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty() && self.keys.is_empty()
    }
}

/// One page of a listing and the token to request the next one, if there is more.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListPage {
    /// The entries in this page.
    pub listing: Listing,
    /// Token for the next page, `None` when this is the last page.
    pub continuation: Option<String>,
}

/// A bucket of objects that can be listed and downloaded.
pub trait Bucket {
    /// List one page of the entries directly below `prefix`, grouping deeper keys by `delimiter`.
    fn list_page(
        &self,
        prefix: &str,
        delimiter: &str,
        continuation: Option<&str>,
    ) -> Result<ListPage, NexradDataErr>;

    /// Download the object at `key` to the file at `dest`.
    ///
    /// When this fails no file is left at `dest`.
    fn download(&self, key: &str, dest: &Path) -> Result<(), NexradDataErr>;

    /// List all the entries directly below `prefix`, following continuation tokens until the
    /// service reports the listing is complete.
    ///
    /// A service that hands back the token it was just given would never finish, that is
    /// reported as a malformed listing.
    fn list(&self, prefix: &str, delimiter: &str) -> Result<Listing, NexradDataErr> {
        let mut listing = Listing::default();
        let mut continuation: Option<String> = None;
        let mut pages = 0;

        loop {
            let page = self.list_page(prefix, delimiter, continuation.as_deref())?;
            pages += 1;

            listing.prefixes.extend(page.listing.prefixes);
            listing.keys.extend(page.listing.keys);

            match page.continuation {
                Some(token) if continuation.as_deref() == Some(token.as_str()) => {
                    return Err(NexradDataErr::MalformedListing(
                        "repeated continuation token",
                    ));
                }
                Some(token) => continuation = Some(token),
                None => break,
            }
        }

        log::debug!(
            "listed '{}': {} prefixes, {} keys in {} page(s)",
            prefix,
            listing.prefixes.len(),
            listing.keys.len(),
            pages
        );

        Ok(listing)
    }
}
