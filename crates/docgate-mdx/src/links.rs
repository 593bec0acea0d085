//! Link targets and their classification.

/// How a link target is treated by the checker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    /// Has a URI scheme separator; never inspected
    External,
    /// Empty or a bare `#`
    Placeholder,
    /// Any other relative or site-absolute target
    Internal,
}

impl TargetKind {
    /// Classify a link destination.
    pub fn classify(target: &str) -> Self {
        if target.contains("://") {
            Self::External
        } else if target.is_empty() || target == "#" {
            Self::Placeholder
        } else {
            Self::Internal
        }
    }
}

/// A link found in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    /// Rendered link text
    pub text: String,

    /// Destination as written (after reference resolution)
    pub target: String,

    /// Line number of the opening bracket (1-indexed, frontmatter included)
    pub line: usize,
}

impl Link {
    /// Classification of this link's target.
    pub fn kind(&self) -> TargetKind {
        TargetKind::classify(&self.target)
    }

    /// An internal link whose target is empty or `#`.
    pub fn is_placeholder(&self) -> bool {
        self.kind() == TargetKind::Placeholder
    }
}
