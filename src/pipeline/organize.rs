//! Filing processed documents under the output root.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use super::PipelineError;
use crate::extract::file_name_of;

/// Turn a document type into a single safe directory name.
///
/// Path separators and control characters become `_`, and names that would
/// escape or alias the parent (`""`, `.`, `..`) are replaced outright.
pub fn sanitize_component(name: &str) -> String {
    let cleaned: String = name
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    match cleaned.as_str() {
        "" | "." | ".." => "_".to_string(),
        _ => cleaned,
    }
}

/// Destination for a file: `output_dir/<document type>/<file name>`.
pub fn destination_for(output_dir: &Path, document_type: &str, source: &Path) -> PathBuf {
    output_dir
        .join(sanitize_component(document_type))
        .join(file_name_of(source))
}

fn organize_err(path: &Path, reason: &str, source: io::Error) -> PipelineError {
    PipelineError::OrganizeFailed {
        path: path.to_path_buf(),
        reason: reason.to_string(),
        source,
    }
}

/// Copy or move `source` to its destination, creating directories as needed.
///
/// Not transactional: a failure mid-copy can leave a partial destination file.
pub fn organize_file(
    source: &Path,
    output_dir: &Path,
    document_type: &str,
    move_files: bool,
) -> Result<PathBuf, PipelineError> {
    let dest_path = destination_for(output_dir, document_type, source);
    if let Some(dest_dir) = dest_path.parent() {
        fs::create_dir_all(dest_dir)
            .map_err(|e| organize_err(dest_dir, "error creating destination directory", e))?;
    }

    if is_same_file(source, &dest_path) {
        tracing::debug!("{} is already filed", source.display());
        return Ok(dest_path);
    }

    if move_files {
        move_file(source, &dest_path)?;
    } else {
        copy_file(source, &dest_path)?;
    }

    tracing::debug!(
        "{} {} -> {}",
        if move_files { "Moved" } else { "Copied" },
        source.display(),
        dest_path.display()
    );
    Ok(dest_path)
}

/// Whether both paths resolve to the same existing file.
fn is_same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn copy_file(source: &Path, dest: &Path) -> Result<(), PipelineError> {
    let mut src = File::open(source).map_err(|e| organize_err(source, "error opening source file", e))?;
    let mut dst =
        File::create(dest).map_err(|e| organize_err(dest, "error creating destination file", e))?;
    io::copy(&mut src, &mut dst).map_err(|e| organize_err(dest, "error copying file", e))?;
    Ok(())
}

/// Rename, falling back to copy + remove when rename fails (e.g. across filesystems).
fn move_file(source: &Path, dest: &Path) -> Result<(), PipelineError> {
    let rename_err = match fs::rename(source, dest) {
        Ok(()) => return Ok(()),
        Err(e) => e,
    };

    if !source.is_file() {
        return Err(organize_err(source, "error moving file", rename_err));
    }

    tracing::debug!(
        "rename {} failed ({}), falling back to copy",
        source.display(),
        rename_err
    );
    copy_file(source, dest)?;
    fs::remove_file(source).map_err(|e| organize_err(source, "error removing moved file", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_sanitize_component() {
        assert_eq!(sanitize_component("Invoice"), "Invoice");
        assert_eq!(sanitize_component("Empty Document"), "Empty Document");
        assert_eq!(sanitize_component("Tax/Forms"), "Tax_Forms");
        assert_eq!(sanitize_component(r"a\b"), "a_b");
        assert_eq!(sanitize_component(".."), "_");
        assert_eq!(sanitize_component("  "), "_");
        assert_eq!(sanitize_component("Résumé"), "Résumé");
    }

    #[test]
    fn test_destination_for() {
        let dest = destination_for(Path::new("/out"), "Invoice", Path::new("/in/a.txt"));
        assert_eq!(dest, PathBuf::from("/out/Invoice/a.txt"));

        let dest = destination_for(Path::new("/out"), "../escape", Path::new("/in/a.txt"));
        assert_eq!(dest, PathBuf::from("/out/.._escape/a.txt"));
    }

    #[test]
    fn test_copy_keeps_source() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("a.txt");
        fs::write(&src, "invoice").unwrap();
        let out = dir.path().join("out");

        let dest = organize_file(&src, &out, "Invoice", false).unwrap();
        assert_eq!(dest, out.join("Invoice").join("a.txt"));
        assert!(src.exists());
        assert_eq!(fs::read_to_string(&dest).unwrap(), "invoice");
    }

    #[test]
    fn test_copy_overwrites_existing_destination() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("a.txt");
        fs::write(&src, "new").unwrap();
        let out = dir.path().join("out");
        fs::create_dir_all(out.join("Invoice")).unwrap();
        fs::write(out.join("Invoice").join("a.txt"), "old and longer").unwrap();

        let dest = organize_file(&src, &out, "Invoice", false).unwrap();
        assert_eq!(fs::read_to_string(dest).unwrap(), "new");
    }

    #[test]
    fn test_copy_onto_itself_keeps_content() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("out");
        let filed = out.join("Invoice").join("bill.txt");
        fs::create_dir_all(filed.parent().unwrap()).unwrap();
        fs::write(&filed, "invoice 42").unwrap();

        let dest = organize_file(&filed, &out, "Invoice", false).unwrap();
        assert_eq!(dest, filed);
        assert_eq!(fs::read_to_string(&filed).unwrap(), "invoice 42");
    }

    #[test]
    fn test_move_onto_itself_keeps_file() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("out");
        let filed = out.join("Receipt").join("r.txt");
        fs::create_dir_all(filed.parent().unwrap()).unwrap();
        fs::write(&filed, "paid").unwrap();

        organize_file(&filed, &out, "Receipt", true).unwrap();
        assert_eq!(fs::read_to_string(&filed).unwrap(), "paid");
    }

    #[test]
    fn test_move_removes_source() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("a.txt");
        fs::write(&src, "receipt").unwrap();
        let out = dir.path().join("out");

        let dest = organize_file(&src, &out, "Receipt", true).unwrap();
        assert!(!src.exists());
        assert_eq!(fs::read_to_string(dest).unwrap(), "receipt");
    }

    #[test]
    fn test_missing_source_is_organize_failure() {
        let dir = tempdir().unwrap();
        let err = organize_file(&dir.path().join("gone.txt"), dir.path(), "Other", false)
            .unwrap_err();
        assert!(matches!(err, PipelineError::OrganizeFailed { .. }));
    }

    #[test]
    fn test_output_dir_blocked_by_file() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("a.txt");
        fs::write(&src, "x").unwrap();
        let out = dir.path().join("out");
        fs::write(&out, "i am a file").unwrap();

        let err = organize_file(&src, &out, "Other", false).unwrap_err();
        assert!(matches!(err, PipelineError::OrganizeFailed { .. }));
    }
}
