use std::path::Path;

use super::RadarArchive;

use crate::{
    bucket::Bucket,
    errors::NexradDataErr,
    scan::{LocalScanFile, ScanRecord},
};

/// Outcome of making sure a directory exists.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DirStatus {
    /// The directory was created.
    Created,
    /// The directory was already there.
    AlreadyPresent,
}

/// Make sure `path` exists as a directory, creating it and any missing parents.
///
/// An existing directory is fine, anything else at that path, or any other failure to create it,
/// is an error.
pub fn ensure_dir(path: &Path) -> Result<DirStatus, NexradDataErr> {
    if path.is_dir() {
        return Ok(DirStatus::AlreadyPresent);
    }

    match std::fs::create_dir_all(path) {
        Ok(()) => Ok(DirStatus::Created),
        // Lost a race with someone else creating it.
        Err(_) if path.is_dir() => Ok(DirStatus::AlreadyPresent),
        Err(source) => Err(NexradDataErr::DirectoryCreate {
            path: path.to_path_buf(),
            source,
        }),
    }
}

impl<B: Bucket> RadarArchive<B> {
    /// Download scans into `root`, returning the local files in the same order.
    ///
    /// With `keep_hierarchy` the files are placed in `root/YYYY/MM/DD/SITE/`, otherwise directly
    /// in `root`. The first failure aborts the whole batch.
    pub fn download(
        &self,
        scans: &[ScanRecord],
        root: &Path,
        keep_hierarchy: bool,
    ) -> Result<Vec<LocalScanFile>, NexradDataErr> {
        let local_files = scans
            .iter()
            .map(|scan| self.download_one(scan, root, keep_hierarchy))
            .collect::<Result<Vec<_>, _>>()?;

        log::info!(
            "downloaded {} scan(s) to {}",
            local_files.len(),
            root.display()
        );

        Ok(local_files)
    }

    /// Download a single scan into `root`, see `download`.
    pub fn download_one(
        &self,
        scan: &ScanRecord,
        root: &Path,
        keep_hierarchy: bool,
    ) -> Result<LocalScanFile, NexradDataErr> {
        let path = scan.local_path(root, keep_hierarchy);

        if let Some(dir) = path.parent() {
            if ensure_dir(dir)? == DirStatus::Created {
                log::debug!("created {}", dir.display());
            }
        }

        self.bucket.download(scan.key(), &path)?;

        Ok(LocalScanFile::new(scan.clone(), path))
    }
}
