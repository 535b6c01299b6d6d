//! Insert Service - the filesystem half of insert-after-anchor.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::{
    application::{ApplicationError, ports::Filesystem},
    domain::{AnchorInsertion, DomainError, splice_after_anchor},
    error::{SampleError, SampleResult},
};

/// Applies anchor insertions to files through the `Filesystem` port.
pub struct AnchorInserter {
    fs: Arc<dyn Filesystem>,
}

impl AnchorInserter {
    pub fn new(fs: Arc<dyn Filesystem>) -> Self {
        Self { fs }
    }

    /// Rewrite `path` so `payload` directly follows the first `anchor`.
    ///
    /// Nothing is written when the anchor is missing, so the file stays
    /// byte-identical on that path.
    #[instrument(skip(self, anchor, payload), fields(path = %path.display()))]
    pub fn insert_after_anchor(
        &self,
        path: &Path,
        anchor: &str,
        payload: &str,
    ) -> SampleResult<()> {
        let content = self.fs.read_to_string(path)?;

        let spliced = splice_after_anchor(&content, anchor, payload).map_err(|e| match e {
            DomainError::AnchorNotFound {
                anchor,
                near_miss_line,
            } => SampleError::from(ApplicationError::AnchorNotFound {
                path: path.to_path_buf(),
                anchor,
                near_miss_line,
            }),
            other => other.into(),
        })?;

        if spliced.matches > 1 {
            warn!(
                matches = spliced.matches,
                "Anchor occurs more than once; inserting after the first"
            );
        }

        self.fs.write_file(path, &spliced.content)?;
        debug!(bytes = payload.len(), "Payload inserted");
        Ok(())
    }

    /// Apply an insertion whose file is relative to `workspace`.
    pub fn apply(&self, workspace: &Path, insertion: &AnchorInsertion) -> SampleResult<()> {
        self.insert_after_anchor(
            &insertion.file().under(workspace),
            insertion.anchor(),
            insertion.payload(),
        )
    }
}
