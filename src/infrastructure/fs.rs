//! Local workflow writer
//!
//! Writes through a temporary file in the destination directory and renames
//! it over the target, so readers never observe a half-written workflow.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::domain::ports::WorkflowWriter;
use crate::error::GosmResult;

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalWorkflowWriter;

impl LocalWorkflowWriter {
    pub fn new() -> Self {
        Self
    }
}

impl WorkflowWriter for LocalWorkflowWriter {
    fn write(&self, path: &Path, content: &str) -> GosmResult<()> {
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(parent)?;

        let mut temp = NamedTempFile::new_in(parent)?;
        temp.write_all(content.as_bytes())?;
        temp.as_file().sync_all()?;
        temp.persist(path).map_err(|err| err.error)?;

        tracing::debug!(path = %path.display(), bytes = content.len(), "wrote workflow");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn write_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let file = dir.path().join(".github").join("workflows").join("dump.yml");

        LocalWorkflowWriter::new().write(&file, "---\na: b\n").unwrap();

        assert_eq!(std::fs::read_to_string(&file).unwrap(), "---\na: b\n");
    }

    #[test]
    fn write_replaces_existing_file_without_leftovers() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("dump.yml");
        std::fs::write(&file, "old content that is longer").unwrap();

        LocalWorkflowWriter::new().write(&file, "new").unwrap();

        assert_eq!(std::fs::read_to_string(&file).unwrap(), "new");
        let entries = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(entries, 1);
    }
}
