//! Anchor insertion: the pure half of the insert-after-anchor primitive.
//!
//! Matching is exact and positional. The first occurrence of the anchor
//! wins; callers pick anchors specific enough to be unique. When an anchor is
//! missing, a relaxed scan looks for a whitespace/case variant of its first
//! line, but only to enrich the error. It never changes what matches.

use crate::domain::{entities::common::RelativePath, error::DomainError};

/// One `(file, anchor, payload)` insertion against the workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorInsertion {
    file: RelativePath,
    anchor: String,
    payload: String,
}

impl AnchorInsertion {
    /// Create an insertion. `file` is `/`-separated and relative to the
    /// workspace root.
    pub fn new(
        file: &str,
        anchor: impl Into<String>,
        payload: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let anchor = anchor.into();
        if anchor.is_empty() {
            return Err(DomainError::EmptyAnchor {
                step: file.to_string(),
            });
        }
        Ok(Self {
            file: RelativePath::from_segments(file)?,
            anchor,
            payload: payload.into(),
        })
    }

    pub fn file(&self) -> &RelativePath {
        &self.file
    }

    pub fn anchor(&self) -> &str {
        &self.anchor
    }

    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// Apply to in-memory content.
    pub fn apply(&self, content: &str) -> Result<Spliced, DomainError> {
        splice_after_anchor(content, &self.anchor, &self.payload)
    }
}

/// Result of a successful splice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spliced {
    pub content: String,
    /// How many times the anchor occurred. Only the first was used.
    pub matches: usize,
}

/// Insert `payload` immediately after the first occurrence of `anchor`.
///
/// The result is `prefix + anchor + payload + suffix`.
pub fn splice_after_anchor(
    content: &str,
    anchor: &str,
    payload: &str,
) -> Result<Spliced, DomainError> {
    if anchor.is_empty() {
        return Err(DomainError::EmptyAnchor {
            step: "<inline>".into(),
        });
    }

    let Some(start) = content.find(anchor) else {
        return Err(DomainError::AnchorNotFound {
            anchor: anchor.to_string(),
            near_miss_line: find_near_miss(content, anchor),
        });
    };

    let split = start + anchor.len();
    let mut out = String::with_capacity(content.len() + payload.len());
    out.push_str(&content[..split]);
    out.push_str(payload);
    out.push_str(&content[split..]);

    Ok(Spliced {
        content: out,
        matches: content.matches(anchor).count(),
    })
}

/// 1-based line of a relaxed match for the anchor's first non-blank line.
fn find_near_miss(content: &str, anchor: &str) -> Option<usize> {
    let first = anchor.lines().map(str::trim).find(|l| !l.is_empty())?;
    let needle = collapse(first).to_lowercase();

    content
        .lines()
        .position(|line| collapse(line).to_lowercase().contains(&needle))
        .map(|idx| idx + 1)
}

fn collapse(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
