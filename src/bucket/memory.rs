//! An in memory bucket, for testing against something other than the network.

use std::{
    cell::RefCell,
    collections::BTreeMap,
    io::{Error, ErrorKind},
    path::Path,
};

use super::{Bucket, ListPage, Listing};
use crate::errors::NexradDataErr;

/// A bucket held entirely in memory.
///
/// Listings follow the same rules as the remote service: keys are returned in lexicographic
/// order, keys below a deeper delimiter are rolled up into a single prefix, and results are
/// split into pages of at most `page_size` entries.
#[derive(Debug)]
pub struct MemoryBucket {
    objects: RefCell<BTreeMap<String, Vec<u8>>>,
    page_size: usize,
    requests: RefCell<Vec<String>>,
}

impl Default for MemoryBucket {
    fn default() -> Self {
        MemoryBucket {
            objects: RefCell::new(BTreeMap::new()),
            page_size: Self::DEFAULT_PAGE_SIZE,
            requests: RefCell::new(vec![]),
        }
    }
}

enum Entry {
    Prefix(String),
    Key(String),
}

impl MemoryBucket {
    const DEFAULT_PAGE_SIZE: usize = 1000;

    /// Create an empty bucket.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of entries per listing page.
    pub fn with_page_size(self, page_size: usize) -> Self {
        MemoryBucket {
            page_size: page_size.max(1),
            ..self
        }
    }

    /// Add an object.
    pub fn insert(&self, key: &str, data: Vec<u8>) {
        self.objects.borrow_mut().insert(key.to_owned(), data);
    }

    /// The prefix of every page requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }

    fn entries(&self, prefix: &str, delimiter: &str) -> Vec<Entry> {
        let mut entries: Vec<Entry> = vec![];

        for key in self
            .objects
            .borrow()
            .keys()
            .filter(|key| key.starts_with(prefix))
        {
            let rest = &key[prefix.len()..];
            match rest.find(delimiter).filter(|_| !delimiter.is_empty()) {
                Some(idx) => {
                    let common = &key[..prefix.len() + idx + delimiter.len()];
                    // Keys sharing a prefix are adjacent in sorted order.
                    if let Some(Entry::Prefix(last)) = entries.last() {
                        if last == common {
                            continue;
                        }
                    }
                    entries.push(Entry::Prefix(common.to_owned()));
                }
                None => entries.push(Entry::Key(key.clone())),
            }
        }

        entries
    }
}

impl Bucket for MemoryBucket {
    fn list_page(
        &self,
        prefix: &str,
        delimiter: &str,
        continuation: Option<&str>,
    ) -> Result<ListPage, NexradDataErr> {
        self.requests.borrow_mut().push(prefix.to_owned());

        let start: usize = match continuation {
            Some(token) => token
                .parse()
                .map_err(|_| NexradDataErr::MalformedListing("bad continuation token"))?,
            None => 0,
        };

        let entries = self.entries(prefix, delimiter);
        let total = entries.len();
        let end = (start + self.page_size).min(total);

        let mut listing = Listing::default();
        for entry in entries.into_iter().take(end).skip(start) {
            match entry {
                Entry::Prefix(p) => listing.prefixes.push(p),
                Entry::Key(k) => listing.keys.push(k),
            }
        }

        let continuation = if end < total {
            Some(end.to_string())
        } else {
            None
        };

        Ok(ListPage {
            listing,
            continuation,
        })
    }

    fn download(&self, key: &str, dest: &Path) -> Result<(), NexradDataErr> {
        let objects = self.objects.borrow();
        let data = objects.get(key).ok_or_else(|| {
            NexradDataErr::IO(Error::new(
                ErrorKind::NotFound,
                format!("no such key: {}", key),
            ))
        })?;

        std::fs::write(dest, data)?;
        Ok(())
    }
}
