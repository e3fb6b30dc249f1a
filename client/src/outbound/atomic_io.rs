//! Atomic file replacement inside a capability-scoped directory.
//!
//! Content is written to a hidden temporary sibling, synced, then renamed
//! over the target so readers observe either the old or the new file.

use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use cap_std::fs::{Dir, OpenOptions};

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Replace `file_name` in `dir` with `contents`.
pub(crate) fn write_atomic(dir: &Dir, file_name: &str, contents: &str) -> io::Result<()> {
    let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_nanos());
    let tmp_name = format!(
        ".{file_name}.tmp.{}.{suffix}.{counter}",
        std::process::id()
    );

    if let Err(err) = write_temp_file(dir, &tmp_name, contents)
        .and_then(|()| replace_target(dir, &tmp_name, file_name))
    {
        // Best-effort cleanup; the original error is what matters.
        drop(dir.remove_file(&tmp_name));
        return Err(err);
    }
    sync_directory(dir);
    Ok(())
}

fn write_temp_file(dir: &Dir, tmp_name: &str, contents: &str) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    let mut file = dir.open_with(tmp_name, &options)?;
    file.write_all(contents.as_bytes())?;
    file.sync_all()
}

#[cfg(windows)]
fn replace_target(dir: &Dir, tmp_name: &str, target_name: &str) -> io::Result<()> {
    // Windows rename fails if the target exists, so remove it first.
    match dir.remove_file(target_name) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => return Err(err),
    }
    dir.rename(tmp_name, dir, target_name)
}

#[cfg(not(windows))]
fn replace_target(dir: &Dir, tmp_name: &str, target_name: &str) -> io::Result<()> {
    dir.rename(tmp_name, dir, target_name)
}

fn sync_directory(dir: &Dir) {
    if dir.open(".").and_then(|handle| handle.sync_all()).is_err() {
        // Directory sync is advisory on some platforms.
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use cap_std::ambient_authority;

    use super::*;

    fn temp_dir() -> (tempfile::TempDir, Dir) {
        let temp = tempfile::tempdir().expect("create temp dir");
        let dir = Dir::open_ambient_dir(temp.path(), ambient_authority()).expect("open temp dir");
        (temp, dir)
    }

    #[test]
    fn replaces_existing_content() {
        let (_temp, dir) = temp_dir();
        write_atomic(&dir, "session.json", "{}").expect("first write");
        write_atomic(&dir, "session.json", r#"{"token":"t"}"#).expect("second write");
        assert_eq!(
            dir.read_to_string("session.json").expect("read back"),
            r#"{"token":"t"}"#
        );
    }

    #[test]
    fn leaves_no_temporary_files_behind() {
        let (_temp, dir) = temp_dir();
        write_atomic(&dir, "session.json", "{}").expect("write");
        let names: Vec<String> = dir
            .entries()
            .expect("list dir")
            .map(|entry| {
                entry
                    .expect("entry")
                    .file_name()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect();
        assert_eq!(names, vec!["session.json".to_owned()]);
    }
}
