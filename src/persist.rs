//! Small file helpers shared by the key, credential, and records files.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::Path;

use crate::errors::Result;

/// Write `data` to `path` **atomically**.
///
/// The bytes go to a uniquely named hidden temp file in the same directory,
/// are flushed to disk, and the file is then renamed over the target, so
/// readers (and a restart after a crash) never see a half-written file.
/// With `private` set the temp file is created owner read/write only on
/// Unix, so the contents are never visible to other users.
pub fn write_atomic(path: &Path, data: &[u8], private: bool) -> Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    if !parent.exists() {
        fs::create_dir_all(parent)?;
    }

    let tmp_path = parent.join(format!(
        ".{}.{}-{:08x}.tmp",
        path.file_name().unwrap_or_default().to_string_lossy(),
        std::process::id(),
        rand::random::<u32>()
    ));

    let written = (|| -> Result<()> {
        let mut file = create_new(&tmp_path, private)?;
        file.write_all(data)?;
        file.sync_all()?;
        drop(file);
        fs::rename(&tmp_path, path)?;
        Ok(())
    })();

    if written.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    written
}

/// Create `path`, failing if it already exists.  Private files get mode
/// 0o600 at creation (no-op off Unix).
fn create_new(path: &Path, private: bool) -> Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        if private {
            options.mode(0o600);
        }
    }
    #[cfg(not(unix))]
    let _ = private;

    Ok(options.open(path)?)
}
