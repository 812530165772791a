//! Filesystem-based output service implementation

use async_trait::async_trait;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tokio::fs;

use crate::generation::{GenerationError, OutputService, RenderedFile, Result};

/// Output service that writes rendered files to the filesystem.
///
/// Every file is first staged into a temporary file next to its target. Targets
/// are only replaced once all files were staged, so a failed run leaves the
/// tree as it was, including directories created while staging.
pub struct FileSystemOutputService;

impl FileSystemOutputService {
    pub fn new() -> Self {
        Self
    }

    /// Stage `file` next to its target. The top-most directory created for it
    /// is pushed onto `created`.
    fn stage(file: &RenderedFile, created: &mut Vec<PathBuf>) -> Result<NamedTempFile> {
        let write_failure = |e| GenerationError::write_failure(&file.path, e);

        let parent = match file.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let missing = parent
            .ancestors()
            .take_while(|dir| !dir.as_os_str().is_empty() && !dir.exists())
            .last()
            .map(Path::to_path_buf);
        let result = std::fs::create_dir_all(parent);
        created.extend(missing);
        result.map_err(write_failure)?;

        let mut staged = NamedTempFile::new_in(parent).map_err(write_failure)?;
        staged
            .write_all(file.content.as_bytes())
            .and_then(|_| staged.flush())
            .map_err(write_failure)?;
        Ok(staged)
    }
}

impl Default for FileSystemOutputService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OutputService for FileSystemOutputService {
    async fn existing_files(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        let mut pending = vec![root.join("src")];

        while let Some(dir) = pending.pop() {
            let mut entries = match fs::read_dir(&dir).await {
                Ok(entries) => entries,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
                Err(e) => return Err(GenerationError::scan_failure(&dir, e)),
            };

            while let Some(entry) = entries
                .next_entry()
                .await
                .map_err(|e| GenerationError::scan_failure(&dir, e))?
            {
                let path = entry.path();
                let file_type = entry
                    .file_type()
                    .await
                    .map_err(|e| GenerationError::scan_failure(&path, e))?;
                if file_type.is_dir() {
                    pending.push(path);
                } else {
                    files.push(path);
                }
            }
        }

        files.sort();
        tracing::debug!(root = %root.display(), count = files.len(), "Scanned existing sources");
        Ok(files)
    }

    async fn write_files(&self, files: &[RenderedFile]) -> Result<()> {
        let files = files.to_vec();

        tokio::task::spawn_blocking(move || {
            let mut created = Vec::new();
            let mut staged = Vec::with_capacity(files.len());

            for file in &files {
                match Self::stage(file, &mut created) {
                    Ok(temp) => staged.push((temp, &file.path)),
                    Err(e) => {
                        // Dropping the staged files deletes them
                        drop(staged);
                        for dir in created.iter().rev() {
                            let _ = std::fs::remove_dir_all(dir);
                        }
                        return Err(e);
                    }
                }
            }

            for (temp, path) in staged {
                temp.persist(path)
                    .map_err(|e| GenerationError::write_failure(path, e.error))?;
                tracing::debug!(path = %path.display(), "Wrote artifact");
            }
            Ok(())
        })
        .await
        .map_err(|e| GenerationError::write_failure(".", std::io::Error::other(e)))?
    }
}
