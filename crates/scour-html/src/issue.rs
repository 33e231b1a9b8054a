use core::fmt;

use strum_macros::{Display, IntoStaticStr};

/// The kind of repair or rejection recorded while sanitizing.
///
/// None of these are errors: the sanitizer repairs structure and drops unsafe
/// markup silently. Issues exist so hosts can report what was changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum IssueKind {
    /// An end tag with no matching open element was ignored.
    StrayEndTag,
    /// An open element was closed without an explicit end tag.
    ImplicitlyClosed,
    /// An element outside the whitelist was unwrapped (children kept).
    UnknownElement,
    /// A raw text element (`script`, `style`) was removed with its content.
    RawTextRemoved,
    /// An attribute outside the whitelist was dropped.
    DroppedAttribute,
    /// A URI attribute with a disallowed scheme was dropped.
    UnsafeUri,
}

/// A single recorded repair or rejection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    /// What happened.
    pub kind: IssueKind,
    /// The element or attribute involved, e.g. `"li"` or `"href on <a>"`.
    pub detail: String,
}

impl Issue {
    /// Create a new issue.
    #[must_use]
    pub fn new(kind: IssueKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.detail)
    }
}
