use std::ffi::{OsStr, OsString};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use snafu::ResultExt;
use tracing::{debug, trace};

use crate::ext::PathExt;
use crate::scan::{NotADirectorySnafu, NotFoundSnafu, ScanError, UnreadableSnafu};

/// What an entry is once symlinks are followed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    File,
    Dir,
    /// Sockets, fifos, devices and dangling symlinks.
    Other,
}

impl From<fs::FileType> for EntryKind {
    fn from(file_type: fs::FileType) -> Self {
        if file_type.is_dir() {
            EntryKind::Dir
        } else if file_type.is_file() {
            EntryKind::File
        } else {
            EntryKind::Other
        }
    }
}

/// Immutable identity of one entry of a scanned tree.
///
/// Two identities are equal only when every component matches, which is what
/// makes trees scanned from different locations compare unequal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathIdentity {
    name: OsString,
    absolute: PathBuf,
    relative: PathBuf,
    real: PathBuf,
    kind: EntryKind,
    symlink: bool,
}

impl PathIdentity {
    /// Validates `root` as a scan root and builds its identity.
    pub fn from_root(root: &Path) -> Result<Self, ScanError> {
        let link_metadata = match fs::symlink_metadata(root) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return NotFoundSnafu { path: root }.fail();
            }
            Err(e) => return Err(e).context(UnreadableSnafu { path: root }),
        };
        let symlink = link_metadata.file_type().is_symlink();

        let metadata = match fs::metadata(root) {
            Ok(metadata) => metadata,
            // a dangling root symlink points nowhere
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return NotFoundSnafu { path: root }.fail();
            }
            Err(e) => return Err(e).context(UnreadableSnafu { path: root }),
        };
        if !metadata.is_dir() {
            return NotADirectorySnafu { path: root }.fail();
        }

        let absolute = root
            .lexically_absolute()
            .context(UnreadableSnafu { path: root })?;
        let real = fs::canonicalize(root).context(UnreadableSnafu { path: root })?;
        let name = absolute
            .file_name()
            .or_else(|| real.file_name())
            .map(OsStr::to_os_string)
            .unwrap_or_default();

        debug!(
            "Scan root {} resolves to {}",
            absolute.display(),
            real.display()
        );

        Ok(PathIdentity {
            name,
            absolute,
            relative: PathBuf::new(),
            real,
            kind: EntryKind::Dir,
            symlink,
        })
    }

    /// Enumerates the immediate children of this directory, sorted by name.
    pub fn read_children(&self) -> Result<Vec<PathIdentity>, ScanError> {
        let read_dir = fs::read_dir(&self.absolute).context(UnreadableSnafu {
            path: &self.absolute,
        })?;

        let mut children = read_dir
            .map(|entry| {
                let entry = entry.context(UnreadableSnafu {
                    path: &self.absolute,
                })?;
                self.join(&entry)
            })
            .collect::<Result<Vec<_>, _>>()?;
        children.sort_by(|a, b| a.name.cmp(&b.name));

        trace!(
            "Found {} entries in {}",
            children.len(),
            self.absolute.display()
        );
        Ok(children)
    }

    fn join(&self, entry: &fs::DirEntry) -> Result<PathIdentity, ScanError> {
        let name = entry.file_name();
        let absolute = self.absolute.join(&name);
        let file_type = entry
            .file_type()
            .context(UnreadableSnafu { path: &absolute })?;
        let symlink = file_type.is_symlink();

        // Only symlinks pay for a full resolution; everything else inherits the
        // parent's real path.
        let mut real = self.real.join(&name);
        let kind = if symlink {
            match fs::metadata(&absolute) {
                Ok(target) => {
                    real = fs::canonicalize(&absolute)
                        .context(UnreadableSnafu { path: &absolute })?;
                    EntryKind::from(target.file_type())
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    debug!("Symlink {} is dangling", absolute.display());
                    EntryKind::Other
                }
                Err(e) => return Err(e).context(UnreadableSnafu { path: &absolute }),
            }
        } else {
            EntryKind::from(file_type)
        };

        Ok(PathIdentity {
            relative: self.relative.join(&name),
            name,
            absolute,
            real,
            kind,
            symlink,
        })
    }

    pub fn name(&self) -> &OsStr {
        &self.name
    }

    pub fn absolute(&self) -> &Path {
        &self.absolute
    }

    /// Path relative to the scan root; empty for the root itself.
    pub fn relative(&self) -> &Path {
        &self.relative
    }

    /// Path with every symlink resolved.
    pub fn real(&self) -> &Path {
        &self.real
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    /// Whether the entry is a directory, following symlinks.
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Dir
    }

    /// Whether the entry is a regular file, following symlinks.
    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }

    pub fn is_symlink(&self) -> bool {
        self.symlink
    }

    #[cfg(test)]
    pub(crate) fn mock(relative: &str, kind: EntryKind, symlink: bool) -> Self {
        let relative = PathBuf::from(relative);
        let absolute = Path::new("/mock").join(&relative);
        PathIdentity {
            name: relative
                .file_name()
                .map(OsStr::to_os_string)
                .unwrap_or_default(),
            real: absolute.clone(),
            absolute,
            relative,
            kind,
            symlink,
        }
    }
}
