//! WorkflowWriter port - persistence of rendered workflows

use std::path::Path;

use crate::error::GosmResult;

pub trait WorkflowWriter {
    /// Write `content` to `path`, replacing any existing file
    fn write(&self, path: &Path, content: &str) -> GosmResult<()>;
}
