//! Filesystem primitives: lexists, recursive remove, symlink-preserving copy.
use anyhow::{Context as _, Result};
use std::path::Path;

/// Returns `true` if `path` exists or is a symlink whose target is missing.
///
/// [`Path::exists`] follows symlinks and reports `false` for dangling links;
/// this check looks at the entry itself.
#[must_use]
pub fn exists_or_broken_link(path: &Path) -> bool {
    path.symlink_metadata().is_ok()
}

/// Recursively delete the file, directory, or symlink at `path`.
///
/// Symlinks are removed themselves and never followed, so removing a link to
/// a directory leaves the directory intact.  An absent path is a success.
///
/// # Errors
///
/// Returns an error if the entry exists but cannot be removed.
pub fn remove(path: &Path) -> Result<()> {
    let meta = match std::fs::symlink_metadata(path) {
        Ok(meta) => meta,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => {
            return Err(e).with_context(|| format!("reading metadata: {}", path.display()));
        }
    };

    if meta.file_type().is_symlink() {
        remove_symlink(path, &meta)
    } else if meta.is_dir() {
        std::fs::remove_dir_all(path)
            .with_context(|| format!("removing directory: {}", path.display()))
    } else {
        std::fs::remove_file(path).with_context(|| format!("removing file: {}", path.display()))
    }
}

/// Remove a symlink entry.
///
/// On Windows, directory symlinks and junctions must be removed with
/// `remove_dir`; `symlink_metadata().is_dir()` is `false` for them, so the
/// raw `FILE_ATTRIBUTE_DIRECTORY` bit is checked instead.
fn remove_symlink(path: &Path, meta: &std::fs::Metadata) -> Result<()> {
    let result = if is_dir_like(meta) {
        std::fs::remove_dir(path)
    } else {
        std::fs::remove_file(path)
    };
    result.with_context(|| format!("removing symlink: {}", path.display()))
}

#[cfg(windows)]
fn is_dir_like(meta: &std::fs::Metadata) -> bool {
    use std::os::windows::fs::MetadataExt;
    meta.file_attributes() & 0x10 != 0 // FILE_ATTRIBUTE_DIRECTORY
}

#[cfg(not(windows))]
const fn is_dir_like(_meta: &std::fs::Metadata) -> bool {
    false
}

/// Recursively copy the directory tree at `src` to `dst`.
///
/// Symlinks inside the tree are recreated as symlinks carrying the same
/// target text (relative targets stay relative); they are never
/// dereferenced.  Missing destination directories are created.
///
/// # Errors
///
/// Returns an error if a directory cannot be created, a source entry cannot
/// be read, or a file or link cannot be written.
pub fn copy_tree(src: &Path, dst: &Path) -> Result<()> {
    let entries =
        std::fs::read_dir(src).with_context(|| format!("reading directory {}", src.display()))?;
    std::fs::create_dir_all(dst)
        .with_context(|| format!("creating directory {}", dst.display()))?;
    for entry in entries {
        let entry = entry.with_context(|| format!("reading entry in {}", src.display()))?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());
        let file_type = entry
            .file_type()
            .with_context(|| format!("reading file type of {}", src_path.display()))?;

        if file_type.is_symlink() {
            let target = std::fs::read_link(&src_path)
                .with_context(|| format!("reading link {}", src_path.display()))?;
            let target_is_dir = src_path.is_dir();
            make_symlink(&target, &dst_path, target_is_dir).with_context(|| {
                format!(
                    "copying link {} -> {}",
                    dst_path.display(),
                    target.display()
                )
            })?;
        } else if file_type.is_dir() {
            copy_tree(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path).with_context(|| {
                format!("copying {} to {}", src_path.display(), dst_path.display())
            })?;
        }
    }
    Ok(())
}

/// Create a symlink at `link` whose target text is `target`.
///
/// `target_is_dir` selects the directory flavour of the link on Windows and
/// is ignored elsewhere.
pub(crate) fn make_symlink(target: &Path, link: &Path, target_is_dir: bool) -> std::io::Result<()> {
    #[cfg(unix)]
    {
        let _ = target_is_dir;
        std::os::unix::fs::symlink(target, link)
    }

    #[cfg(windows)]
    {
        if target_is_dir {
            std::os::windows::fs::symlink_dir(target, link)
        } else {
            std::os::windows::fs::symlink_file(target, link)
        }
    }
}
