use crate::error::Result;
use crate::extract::SourceFile;
use std::path::Path;
use walkdir::WalkDir;

/// Reads every regular file directly inside `dir`, sorted by file name.
/// The directory is never modified.
pub fn read_batch<P: AsRef<Path>>(dir: P) -> Result<Vec<SourceFile>> {
    let mut batch = Vec::new();
    for entry in WalkDir::new(dir.as_ref()).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.map_err(std::io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }
        let filename = entry.file_name().to_string_lossy().into_owned();
        let bytes = std::fs::read(entry.path())?;
        batch.push(SourceFile::new(filename, bytes));
    }
    tracing::debug!(dir = %dir.as_ref().display(), files = batch.len(), "read document batch");
    Ok(batch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::FileKind;

    #[test]
    fn reads_files_in_name_order_and_skips_directories() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.txt"), "dua").unwrap();
        std::fs::write(dir.path().join("a.pdf"), "%PDF").unwrap();
        std::fs::write(dir.path().join("c.csv"), "x").unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        std::fs::write(dir.path().join("nested/d.txt"), "tiga").unwrap();

        let batch = read_batch(dir.path()).unwrap();
        let names: Vec<_> = batch.iter().map(|f| f.filename.as_str()).collect();
        assert_eq!(names, vec!["a.pdf", "b.txt", "c.csv"]);
        assert_eq!(batch[0].kind, Some(FileKind::Pdf));
        assert_eq!(batch[1].bytes, b"dua");
        assert_eq!(batch[2].kind, None);
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_batch(dir.path().join("absent")).is_err());
    }
}
