use std::collections::VecDeque;
use std::iter::FusedIterator;

use strum_macros::Display;

use super::event::{Attributes, Event};
use super::helpers::{
    find_raw_text_end, is_end_tag_open, scan_comment, scan_end_tag, scan_start_tag,
    strip_delimiters,
};
use crate::entities::decode_entities;
use crate::error::SanitizeError;
use crate::issue::{Issue, IssueKind};
use crate::policy::{DefaultPolicy, Policy};

/// Where the tokenizer is in its single pass over the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TokenizerState {
    /// Input remains to be scanned.
    Scanning,
    /// End of input was reached and the open-element stack has been drained.
    Drained,
    /// A fatal parse error was reported; no further events follow.
    Failed,
}

/// Stack-driven tokenizer over a fragment of HTML.
///
/// Implements `Iterator<Item = Result<Event, SanitizeError>>`: events are
/// produced lazily, in document order, and each call to `next` advances the
/// input by at most one markup production. After an `Err` the iterator ends.
///
/// The open-element stack always holds exactly the elements whose start tag
/// has been emitted and whose end tag has not, so every non-void start tag is
/// eventually matched by one end tag, synthesized if necessary.
pub struct Tokenizer<'a, P: Policy + ?Sized = DefaultPolicy> {
    input: &'a str,
    current_pos: usize,
    policy: &'a P,
    state: TokenizerState,
    stack_of_open_elements: Vec<String>,
    pending: VecDeque<Event>,
    issues: Vec<Issue>,
}

impl<'a, P: Policy + ?Sized> Tokenizer<'a, P> {
    /// Create a tokenizer over `input` that classifies elements with `policy`.
    #[must_use]
    pub fn new(input: &'a str, policy: &'a P) -> Self {
        Self {
            input,
            current_pos: 0,
            policy,
            state: TokenizerState::Scanning,
            stack_of_open_elements: Vec::new(),
            pending: VecDeque::new(),
            issues: Vec::new(),
        }
    }

    /// Names of the currently open elements, outermost first.
    #[must_use]
    pub fn open_elements(&self) -> &[String] {
        &self.stack_of_open_elements
    }

    /// Byte offset of the next unconsumed input.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.current_pos
    }

    /// Current tokenizer state.
    #[must_use]
    pub const fn state(&self) -> TokenizerState {
        self.state
    }

    /// Structural repairs recorded so far.
    #[must_use]
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    /// Take the recorded structural repairs, leaving none behind.
    pub fn take_issues(&mut self) -> Vec<Issue> {
        std::mem::take(&mut self.issues)
    }

    fn remaining(&self) -> &'a str {
        let input = self.input;
        &input[self.current_pos..]
    }

    /// Run one production. The caller checks that the input advanced.
    fn step(&mut self) {
        // Make sure we're not in a script or style element
        if let Some(top) = self.stack_of_open_elements.last()
            && self.policy.is_special(top)
        {
            let name = top.clone();
            self.consume_raw_text(&name);
            return;
        }

        let rest = self.remaining();
        let consumed = if rest.starts_with("<!--") {
            self.consume_comment(rest)
        } else if is_end_tag_open(rest) {
            self.consume_end_tag(rest)
        } else if rest.starts_with('<') {
            self.consume_start_tag(rest)
        } else {
            false
        };

        if !consumed {
            self.consume_text(rest);
        }
    }

    fn consume_comment(&mut self, rest: &str) -> bool {
        let Some((content, len)) = scan_comment(rest) else {
            return false;
        };
        self.pending.push_back(Event::comment(content));
        self.current_pos += len;
        true
    }

    fn consume_end_tag(&mut self, rest: &str) -> bool {
        let Some((name, len)) = scan_end_tag(rest) else {
            return false;
        };
        self.current_pos += len;
        self.close_element(&name.to_ascii_lowercase());
        true
    }

    fn consume_start_tag(&mut self, rest: &str) -> bool {
        let Some(tag) = scan_start_tag(rest) else {
            return false;
        };
        self.current_pos += tag.len;

        let attributes = tag
            .attributes
            .iter()
            .map(|(name, value)| (name.to_ascii_lowercase(), decode_entities(value)))
            .collect();
        self.open_element(tag.name.to_ascii_lowercase(), attributes);
        true
    }

    /// Text up to the next `<`. Consumes nothing when the input starts with a
    /// `<` that no other production accepted.
    fn consume_text(&mut self, rest: &str) {
        let len = rest.find('<').unwrap_or(rest.len());
        if len == 0 {
            return;
        }
        self.pending.push_back(Event::text(decode_entities(&rest[..len])));
        self.current_pos += len;
    }

    /// Raw text element content runs to the first matching end tag. Comment
    /// and CDATA delimiters are stripped; their content is kept as text.
    fn consume_raw_text(&mut self, name: &str) {
        let rest = self.remaining();
        let Some((text_len, len)) = find_raw_text_end(rest, name) else {
            return;
        };

        let text = strip_delimiters(&rest[..text_len], "<!--", "-->");
        let text = strip_delimiters(&text, "<![CDATA[", "]]>");
        if !text.is_empty() {
            self.pending.push_back(Event::text(decode_entities(&text)));
        }
        self.current_pos += len;
        self.close_element(name);
    }

    /// Start tag resolution: apply implied end tags, then emit the start tag
    /// and push the element unless it is void.
    fn open_element(&mut self, name: String, attributes: Attributes) {
        // A block element closes the inline elements it would otherwise sit inside.
        if self.policy.is_block(&name) {
            while let Some(index) = self.innermost_recognized()
                && self.policy.is_inline(&self.stack_of_open_elements[index])
            {
                self.close_implicitly_from(index);
            }
        }

        // [§ 13.1.2.4 Optional tags](https://html.spec.whatwg.org/multipage/syntax.html#optional-tags)
        // "An li element's end tag may be omitted if the li element is immediately
        // followed by another li element..."
        if self.policy.is_optional_end_tag(&name)
            && let Some(index) = self.innermost_recognized()
            && self.stack_of_open_elements[index] == name
        {
            self.close_implicitly_from(index);
        }

        let self_closing = self.policy.is_void(&name);
        if !self_closing {
            self.stack_of_open_elements.push(name.clone());
        }
        self.pending
            .push_back(Event::start_tag(name, attributes, self_closing));
    }

    /// Index of the innermost open element the policy recognizes.
    ///
    /// Unrecognized elements are unwrapped by the writer, so the implied end
    /// tag rules look through them to the element the output will nest in.
    fn innermost_recognized(&self) -> Option<usize> {
        self.stack_of_open_elements
            .iter()
            .rposition(|open| self.policy.is_valid_element(open))
    }

    /// End tag resolution: close `name` and everything opened inside it.
    /// An end tag with no open element of that name is ignored.
    fn close_element(&mut self, name: &str) {
        let Some(index) = self
            .stack_of_open_elements
            .iter()
            .rposition(|open| open == name)
        else {
            self.issues.push(Issue::new(IssueKind::StrayEndTag, name));
            return;
        };

        self.close_implicitly_from(index + 1);
        if let Some(closed) = self.stack_of_open_elements.pop() {
            self.pending.push_back(Event::end_tag(closed));
        }
    }

    /// Close every open element at `index` and above, innermost first.
    fn close_implicitly_from(&mut self, index: usize) {
        while self.stack_of_open_elements.len() > index {
            if let Some(closed) = self.stack_of_open_elements.pop() {
                self.issues
                    .push(Issue::new(IssueKind::ImplicitlyClosed, closed.as_str()));
                self.pending.push_back(Event::end_tag(closed));
            }
        }
    }
}

impl<P: Policy + ?Sized> Iterator for Tokenizer<'_, P> {
    type Item = Result<Event, SanitizeError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(event) = self.pending.pop_front() {
                return Some(Ok(event));
            }

            match self.state {
                TokenizerState::Drained | TokenizerState::Failed => return None,
                TokenizerState::Scanning if self.current_pos >= self.input.len() => {
                    // Clean up any remaining tags
                    self.close_implicitly_from(0);
                    self.state = TokenizerState::Drained;
                }
                TokenizerState::Scanning => {
                    let before = self.current_pos;
                    self.step();
                    if self.current_pos == before {
                        self.pending.clear();
                        self.state = TokenizerState::Failed;
                        return Some(Err(SanitizeError::unparseable(self.input, before)));
                    }
                }
            }
        }
    }
}

impl<P: Policy + ?Sized> FusedIterator for Tokenizer<'_, P> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stack_tracks_open_elements() {
        let policy = DefaultPolicy;
        let mut tokenizer = Tokenizer::new("<div><b>x", &policy);
        let first: Vec<Event> = tokenizer.by_ref().take(3).map(Result::unwrap).collect();
        assert_eq!(first.len(), 3);
        assert_eq!(tokenizer.open_elements(), ["div", "b"]);

        let rest: Vec<Event> = tokenizer.by_ref().map(Result::unwrap).collect();
        assert_eq!(rest, [Event::end_tag("b"), Event::end_tag("div")]);
        assert!(tokenizer.open_elements().is_empty());
        assert_eq!(tokenizer.state(), TokenizerState::Drained);
    }

    #[test]
    fn test_failure_ends_iteration() {
        let policy = DefaultPolicy;
        let mut tokenizer = Tokenizer::new("a < b", &policy);
        assert_eq!(tokenizer.next(), Some(Ok(Event::text("a "))));
        assert!(matches!(tokenizer.next(), Some(Err(_))));
        assert_eq!(tokenizer.next(), None);
        assert_eq!(tokenizer.state(), TokenizerState::Failed);
        assert_eq!(tokenizer.position(), 2);
    }
}
