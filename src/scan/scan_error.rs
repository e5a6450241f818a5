use std::path::PathBuf;

use snafu::Snafu;

use crate::ext::PathExt;
use crate::filter::FilterError;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ScanError {
    #[snafu(display("Scan root {} does not exist", path.best_effort_path_display()))]
    NotFound { path: PathBuf },
    #[snafu(display("Scan root {} is not a directory", path.best_effort_path_display()))]
    NotADirectory { path: PathBuf },
    #[snafu(display("Failed to read {}", path.best_effort_path_display()))]
    Unreadable {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("Invalid filter: {}", source), context(false))]
    InvalidFilter { source: FilterError },
    #[snafu(display(
        "Symlink recursion: real path {} was encountered at {} and then at {}",
        real.display(),
        first.display(),
        second.display()
    ))]
    SymlinkRecursion {
        real: PathBuf,
        first: PathBuf,
        second: PathBuf,
    },
}
