use crate::error::PipelineError;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::time::{Duration, SystemTime};

/// Published pages are served directly by the web server and must be
/// readable by its unprivileged worker user.
const PUBLIC_FILE_MODE: u32 = 0o644;

const TEMP_PREFIX: &str = ".leaderboard-";
const TEMP_SUFFIX: &str = ".tmp";

/// A temp file this old cannot belong to a live run and is safe to reclaim.
const STALE_TEMP_AGE: Duration = Duration::from_secs(3600);

/// Atomically replace the file at `dest` with `page`.
///
/// The document is written to a uniquely named temp file in the destination
/// directory (same filesystem, so the final rename is atomic), fsynced,
/// opened up to the public mode, then renamed over `dest`. Readers observe
/// either the previous complete document or the new one. On any failure the
/// temp file is removed when it drops and `dest` is left untouched.
pub fn publish(page: &str, dest: &Path) -> Result<(), PipelineError> {
    let dir = match dest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|e| {
        PipelineError::Publish(format!("failed to create output directory {}: {e}", dir.display()))
    })?;

    sweep_stale_temp_files(dir);

    let mut tmp = tempfile::Builder::new()
        .prefix(TEMP_PREFIX)
        .suffix(TEMP_SUFFIX)
        .tempfile_in(dir)
        .map_err(|e| {
            PipelineError::Publish(format!("failed to create temp file in {}: {e}", dir.display()))
        })?;

    tmp.write_all(page.as_bytes())
        .and_then(|_| tmp.as_file().sync_all())
        .map_err(|e| PipelineError::Publish(format!("failed to write temp file: {e}")))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file()
            .set_permissions(fs::Permissions::from_mode(PUBLIC_FILE_MODE))
            .map_err(|e| PipelineError::Publish(format!("failed to set file mode: {e}")))?;
    }

    tmp.persist(dest).map_err(|e| {
        PipelineError::Publish(format!("failed to rename into {}: {}", dest.display(), e.error))
    })?;

    Ok(())
}

/// Reclaim temp files orphaned by a run that was killed before its own
/// cleanup could drop them. Only files well past any plausible run duration
/// are touched, so an overlapping live run's temp file is never at risk.
/// Best-effort: a sweep failure must not fail the publish.
fn sweep_stale_temp_files(dir: &Path) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.filter_map(|entry| entry.ok()) {
        let name = entry.file_name().to_string_lossy().to_string();
        if !name.starts_with(TEMP_PREFIX) || !name.ends_with(TEMP_SUFFIX) {
            continue;
        }
        let stale = entry
            .metadata()
            .and_then(|meta| meta.modified())
            .ok()
            .and_then(|mtime| SystemTime::now().duration_since(mtime).ok())
            .is_some_and(|age| age > STALE_TEMP_AGE);
        if stale && fs::remove_file(entry.path()).is_ok() {
            log::warn!("removed stale temp file {}", entry.path().display());
        }
    }
}
