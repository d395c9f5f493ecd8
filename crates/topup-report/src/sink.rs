//! Atomic report file writes.
//!
//! The report file is written through a hidden temporary file in the
//! target directory and renamed into place, so a partially written report
//! is never observable at the target path.

use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs::{Dir, OpenOptions};

use crate::error::SinkError;

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Writes the rendered report to a file atomically.
///
/// The parent directory is opened with ambient authority, the contents go
/// to a hidden temporary file, and the temporary file is renamed over the
/// target. The temporary file is removed on every failure path.
///
/// # Errors
///
/// Returns [`SinkError::Write`] if the directory cannot be opened or the
/// file cannot be written.
pub fn write_report_file(path: &Utf8Path, contents: &str) -> Result<(), SinkError> {
    let parent = path
        .parent()
        .filter(|p| !p.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let file_name = path
        .file_name()
        .ok_or_else(|| write_error(path, "report path must name a file".to_owned()))?;

    let dir = Dir::open_ambient_dir(parent, ambient_authority())
        .map_err(|err| write_error(path, err.to_string()))?;

    let tmp_name = temp_file_name(file_name);
    fill_temp_file(&dir, &tmp_name, contents)
        .map_err(|err| write_error(path, err.to_string()))?;
    promote_temp_file(&dir, &tmp_name, file_name)
        .map_err(|err| write_error(path, err.to_string()))?;
    sync_directory(&dir);

    Ok(())
}

fn write_error(path: &Utf8Path, message: String) -> SinkError {
    SinkError::Write {
        path: path.to_path_buf(),
        message,
    }
}

fn temp_file_name(file_name: &str) -> String {
    let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_nanos());
    format!(".{file_name}.tmp.{}.{nanos}.{counter}", std::process::id())
}

fn fill_temp_file(dir: &Dir, tmp_name: &str, contents: &str) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    let mut file = dir.open_with(tmp_name, &options)?;

    let written = file
        .write_all(contents.as_bytes())
        .and_then(|()| file.sync_all());
    if written.is_err() {
        drop(file);
        remove_temp_file(dir, tmp_name);
    }
    written
}

fn promote_temp_file(dir: &Dir, tmp_name: &str, target_name: &str) -> io::Result<()> {
    let renamed = rename_over_target(dir, tmp_name, target_name);
    if renamed.is_err() {
        remove_temp_file(dir, tmp_name);
    }
    renamed
}

#[cfg(windows)]
fn rename_over_target(dir: &Dir, tmp_name: &str, target_name: &str) -> io::Result<()> {
    // Windows rename fails if the target exists, so remove it first.
    match dir.remove_file(target_name) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => return Err(err),
    }
    dir.rename(tmp_name, dir, target_name)
}

#[cfg(not(windows))]
fn rename_over_target(dir: &Dir, tmp_name: &str, target_name: &str) -> io::Result<()> {
    dir.rename(tmp_name, dir, target_name)
}

fn remove_temp_file(dir: &Dir, tmp_name: &str) {
    // Cleanup is best effort; the temp name is unique per call.
    drop(dir.remove_file(tmp_name));
}

fn sync_directory(dir: &Dir) {
    // Directory durability is best effort; sync failures are ignored.
    drop(dir.open(".").and_then(|file| file.sync_all()));
}

#[cfg(test)]
mod tests {
    use camino::Utf8PathBuf;

    use super::*;

    fn temp_root(temp: &tempfile::TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf8 temp path")
    }

    #[test]
    fn writes_the_report_contents() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let path = temp_root(&temp).join("output.txt");

        write_report_file(&path, "\nreport body\n").expect("write report");

        let contents = std::fs::read_to_string(&path).expect("read report");
        assert_eq!(contents, "\nreport body\n");
    }

    #[test]
    fn replaces_an_existing_report() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let path = temp_root(&temp).join("output.txt");

        write_report_file(&path, "first\n").expect("write report");
        write_report_file(&path, "second\n").expect("write report");

        let contents = std::fs::read_to_string(&path).expect("read report");
        assert_eq!(contents, "second\n");
    }

    #[test]
    fn leaves_no_temp_file_behind() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let root = temp_root(&temp);
        let path = root.join("output.txt");

        write_report_file(&path, "report\n").expect("write report");

        let names: Vec<String> = std::fs::read_dir(&root)
            .expect("read temp dir")
            .map(|entry| entry.expect("dir entry").file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["output.txt".to_owned()]);
    }

    #[test]
    fn cleans_up_when_the_target_is_a_directory() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let root = temp_root(&temp);
        let path = root.join("output.txt");
        std::fs::create_dir(&path).expect("create blocking dir");

        let result = write_report_file(&path, "report\n");

        assert!(matches!(result, Err(SinkError::Write { .. })));
        let names: Vec<String> = std::fs::read_dir(&root)
            .expect("read temp dir")
            .map(|entry| entry.expect("dir entry").file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["output.txt".to_owned()]);
    }

    #[test]
    fn reports_a_missing_parent_directory() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let path = temp_root(&temp).join("missing").join("output.txt");

        let result = write_report_file(&path, "report\n");
        assert!(matches!(result, Err(SinkError::Write { .. })));
    }

    #[test]
    fn rejects_a_path_without_a_file_name() {
        let result = write_report_file(Utf8Path::new("."), "report\n");
        assert!(matches!(result, Err(SinkError::Write { .. })));
    }
}
