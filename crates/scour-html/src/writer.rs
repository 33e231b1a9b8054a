//! Whitelist-filtering re-serializer.
//!
//! The writer is the only component that decides what is safe: it consumes
//! tokenizer events and appends to its output only elements, attributes and
//! URI values the [`Policy`] allows. Text is always re-encoded.

use crate::entities::encode_entities;
use crate::issue::{Issue, IssueKind};
use crate::policy::{DefaultPolicy, Policy};
use crate::tokenizer::{Attributes, Event};

/// Consumes [`Event`]s and accumulates sanitized markup.
pub struct SanitizingWriter<'a, P: Policy + ?Sized = DefaultPolicy> {
    policy: &'a P,
    output: String,
    /// The raw text element currently being suppressed, if any.
    ignore: Option<String>,
    issues: Vec<Issue>,
}

impl<'a, P: Policy + ?Sized> SanitizingWriter<'a, P> {
    /// Create a writer with an empty output buffer.
    #[must_use]
    pub fn new(policy: &'a P) -> Self {
        Self {
            policy,
            output: String::new(),
            ignore: None,
            issues: Vec::new(),
        }
    }

    /// Dispatch one event.
    pub fn write(&mut self, event: &Event) {
        match event {
            Event::StartTag {
                name,
                attributes,
                self_closing,
            } => self.start_tag(name, attributes, *self_closing),
            Event::EndTag { name } => self.end_tag(name),
            Event::Text { content } => self.text(content),
            Event::Comment { content } => self.comment(content),
        }
    }

    /// Write a start tag if the element is allowed.
    ///
    /// A raw text element starts ignore mode, which swallows everything up to
    /// its end tag. An unknown element writes nothing itself, but its
    /// children are still processed.
    pub fn start_tag(&mut self, name: &str, attributes: &Attributes, self_closing: bool) {
        let tag = name.to_ascii_lowercase();
        if self.ignore.is_none() && self.policy.is_special(&tag) {
            self.issues
                .push(Issue::new(IssueKind::RawTextRemoved, tag.as_str()));
            self.ignore = Some(tag);
            return;
        }
        if self.ignore.is_some() {
            return;
        }
        if !self.policy.is_valid_element(&tag) {
            self.issues
                .push(Issue::new(IssueKind::UnknownElement, tag.as_str()));
            return;
        }

        self.output.push('<');
        self.output.push_str(&tag);
        for attr in attributes {
            let key = attr.name.to_ascii_lowercase();
            if !self.policy.is_valid_attribute(&key) {
                self.issues.push(Issue::new(
                    IssueKind::DroppedAttribute,
                    format!("{key} on <{tag}>"),
                ));
                continue;
            }
            if self.policy.is_uri_attribute(&key) && !self.policy.is_allowed_uri(&attr.value) {
                self.issues.push(Issue::new(
                    IssueKind::UnsafeUri,
                    format!("{key} on <{tag}>"),
                ));
                continue;
            }
            self.output.push(' ');
            self.output.push_str(&key);
            self.output.push_str("=\"");
            self.output.push_str(&encode_entities(&attr.value));
            self.output.push('"');
        }
        self.output.push_str(if self_closing { "/>" } else { ">" });
    }

    /// Write an end tag if the element is allowed. The end tag of the raw
    /// text element being ignored is never written; it only ends ignore mode.
    pub fn end_tag(&mut self, name: &str) {
        let tag = name.to_ascii_lowercase();
        if self.ignore.is_none() && self.policy.is_valid_element(&tag) {
            self.output.push_str("</");
            self.output.push_str(&tag);
            self.output.push('>');
        }
        if self.ignore.as_deref() == Some(tag.as_str()) {
            self.ignore = None;
        }
    }

    /// Write encoded text, unless inside an ignored element.
    pub fn text(&mut self, content: &str) {
        if self.ignore.is_none() {
            self.output.push_str(&encode_entities(content));
        }
    }

    /// Comments are never written.
    pub const fn comment(&mut self, _content: &str) {}

    /// True while a raw text element is being suppressed.
    #[must_use]
    pub const fn is_ignoring(&self) -> bool {
        self.ignore.is_some()
    }

    /// Sanitized markup written so far.
    #[must_use]
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Policy rejections recorded so far.
    #[must_use]
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    /// Take the recorded rejections, leaving none behind.
    pub fn take_issues(&mut self) -> Vec<Issue> {
        std::mem::take(&mut self.issues)
    }

    /// Finish writing and return the sanitized markup.
    #[must_use]
    pub fn into_output(self) -> String {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_all(events: &[Event]) -> String {
        let policy = DefaultPolicy;
        let mut writer = SanitizingWriter::new(&policy);
        for event in events {
            writer.write(event);
        }
        writer.into_output()
    }

    #[test]
    fn test_ignore_mode_spans_nested_events() {
        let output = write_all(&[
            Event::start_tag("style", Attributes::new(), false),
            Event::start_tag("b", Attributes::new(), false),
            Event::text("hidden"),
            Event::end_tag("b"),
            Event::end_tag("style"),
            Event::text("shown"),
        ]);
        assert_eq!(output, "shown");
    }

    #[test]
    fn test_comment_is_dropped() {
        assert_eq!(write_all(&[Event::comment("x")]), "");
    }
}
