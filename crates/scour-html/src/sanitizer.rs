//! Orchestration: tokenizer events flow straight into a sanitizing writer.
//!
//! Every call owns its own stack, writer and buffer. The [`Sanitizer`] holds
//! only the immutable policy, so one instance can serve concurrent callers.

use scour_common::warning::warn_once;

use crate::error::SanitizeError;
use crate::issue::Issue;
use crate::policy::{DefaultPolicy, Policy};
use crate::tokenizer::Tokenizer;
use crate::writer::SanitizingWriter;

/// Sanitize `html` with the built-in whitelist.
///
/// # Errors
///
/// Returns [`SanitizeError::Unparseable`] if the markup cannot be tokenized.
///
/// # Example
/// ```ignore
/// let clean = sanitize(r#"<a href="javascript:alert(1)">x</a>"#)?;
/// assert_eq!(clean, "<a>x</a>");
/// ```
pub fn sanitize(html: &str) -> Result<String, SanitizeError> {
    Sanitizer::new().sanitize(html)
}

/// A reusable sanitizer bound to a [`Policy`].
#[derive(Debug, Clone, Default)]
pub struct Sanitizer<P: Policy = DefaultPolicy> {
    policy: P,
    /// If true, every recorded issue is also printed as a warning.
    warnings: bool,
}

impl Sanitizer {
    /// A sanitizer with the built-in whitelist.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            policy: DefaultPolicy,
            warnings: false,
        }
    }
}

impl<P: Policy> Sanitizer<P> {
    /// A sanitizer that classifies markup with `policy`.
    #[must_use]
    pub const fn with_policy(policy: P) -> Self {
        Self {
            policy,
            warnings: false,
        }
    }

    /// Report every issue through the deduplicating warning system.
    #[must_use]
    pub fn with_warnings(mut self) -> Self {
        self.warnings = true;
        self
    }

    /// The policy in use.
    #[must_use]
    pub const fn policy(&self) -> &P {
        &self.policy
    }

    /// The raw event stream for `html`, before any filtering.
    #[must_use]
    pub fn events<'a>(&'a self, html: &'a str) -> Tokenizer<'a, P> {
        Tokenizer::new(html, &self.policy)
    }

    /// Sanitize `html`.
    ///
    /// # Errors
    ///
    /// Returns [`SanitizeError::Unparseable`] if the markup cannot be tokenized.
    pub fn sanitize(&self, html: &str) -> Result<String, SanitizeError> {
        self.sanitize_with_issues(html).map(|(output, _)| output)
    }

    /// Sanitize `html` and return what was repaired or removed along the way.
    ///
    /// Structural repairs from the tokenizer come first, followed by the
    /// writer's policy rejections.
    ///
    /// # Errors
    ///
    /// Returns [`SanitizeError::Unparseable`] if the markup cannot be tokenized.
    pub fn sanitize_with_issues(&self, html: &str) -> Result<(String, Vec<Issue>), SanitizeError> {
        let mut tokenizer = self.events(html);
        let mut writer = SanitizingWriter::new(&self.policy);
        for event in tokenizer.by_ref() {
            writer.write(&event?);
        }

        let mut issues = tokenizer.take_issues();
        issues.append(&mut writer.take_issues());
        if self.warnings {
            for issue in &issues {
                warn_once("Sanitizer", &issue.to_string());
            }
        }
        Ok((writer.into_output(), issues))
    }
}
