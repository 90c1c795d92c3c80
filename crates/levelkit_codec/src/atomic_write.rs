//! Atomic file write using the write-rename pattern.
//!
//! Data goes to `{path}.tmp` first, is flushed with `sync_all()`, and the temp
//! file is then renamed over the destination. A failed save leaves the
//! destination either absent or holding its previous contents.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}

/// Atomically writes `data` to `path`.
///
/// The temp file is removed again if any step fails.
pub fn atomic_write(path: impl AsRef<Path>, data: &[u8]) -> std::io::Result<()> {
    let final_path = path.as_ref();
    let tmp_path = tmp_path(final_path);

    if let Some(parent) = final_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let result = (|| -> std::io::Result<()> {
        let mut file = File::create(&tmp_path)?;
        file.write_all(data)?;
        file.sync_all()?;
        drop(file);
        fs::rename(&tmp_path, final_path)
    })();

    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    result
}
