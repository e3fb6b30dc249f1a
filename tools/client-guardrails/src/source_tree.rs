//! Reading the client's `src/` tree through a capability handle.

use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs::Dir};

use crate::SourceFile;
use crate::finding::GuardrailError;

/// Every `.rs` file under `src_dir`, sorted by relative path.
///
/// # Errors
///
/// [`GuardrailError::Io`] when a directory or file cannot be read, or a name
/// is not valid UTF-8.
pub fn read(src_dir: &Utf8Path) -> Result<Vec<SourceFile>, GuardrailError> {
    let io_error = |source: io::Error| GuardrailError::Io {
        path: src_dir.to_path_buf(),
        source,
    };
    let root = Dir::open_ambient_dir(src_dir, ambient_authority()).map_err(io_error)?;
    let mut sources = Vec::new();
    walk(&root, Utf8Path::new(""), &mut sources).map_err(io_error)?;
    sources.sort_by(|left, right| left.path.cmp(&right.path));
    Ok(sources)
}

fn walk(dir: &Dir, prefix: &Utf8Path, sources: &mut Vec<SourceFile>) -> io::Result<()> {
    for entry in dir.entries()? {
        let entry = entry?;
        let name = entry.file_name().into_string().map_err(|name| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("non UTF-8 file name {name:?} under {prefix}"),
            )
        })?;
        let relative = prefix.join(&name);
        if entry.file_type()?.is_dir() {
            walk(&entry.open_dir()?, &relative, sources)?;
        } else if relative.extension() == Some("rs") {
            let contents = dir.read_to_string(&name)?;
            sources.push(SourceFile {
                path: relative,
                contents,
            });
        }
    }
    Ok(())
}
