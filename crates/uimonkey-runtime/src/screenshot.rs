#![forbid(unsafe_code)]

//! Screenshot side effect, injected by the host.

use std::io;
use std::path::{Path, PathBuf};

/// Captures the current screen into `path`.
pub trait ScreenshotHook {
    fn take(&mut self, path: &Path) -> io::Result<()>;
}

impl<F> ScreenshotHook for F
where
    F: FnMut(&Path) -> io::Result<()>,
{
    fn take(&mut self, path: &Path) -> io::Result<()> {
        self(path)
    }
}

/// `<directory>/<prefix>_<NNNN>.png`, zero-padded to four digits.
pub fn screenshot_path(directory: &Path, prefix: &str, sequence: u32) -> PathBuf {
    directory.join(format!("{prefix}_{sequence:04}.png"))
}
