use core::fmt;
use core::slice;

/// An attribute on a start tag event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Lowercase attribute name.
    pub name: String,
    /// Entity-decoded value; empty when the attribute had no `=`.
    pub value: String,
}

impl Attribute {
    /// Create a new attribute with the given name and value.
    #[must_use]
    pub const fn new(name: String, value: String) -> Self {
        Self { name, value }
    }
}

/// Ordered attribute mapping with unique names.
///
/// Inserting a name that is already present overwrites its value in place,
/// so the first occurrence fixes the position and the last one the value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes(Vec<Attribute>);

impl Attributes {
    /// Create an empty attribute list.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Set `name` to `value`, returning the previous value if there was one.
    pub fn insert(&mut self, name: String, value: String) -> Option<String> {
        if let Some(existing) = self.0.iter_mut().find(|attr| attr.name == name) {
            Some(core::mem::replace(&mut existing.value, value))
        } else {
            self.0.push(Attribute::new(name, value));
            None
        }
    }

    /// The value of `name`, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_str())
    }

    /// Iterate attributes in insertion order.
    pub fn iter(&self) -> slice::Iter<'_, Attribute> {
        self.0.iter()
    }

    /// Number of distinct attributes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// True if there are no attributes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a Attributes {
    type Item = &'a Attribute;
    type IntoIter = slice::Iter<'a, Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut attributes = Self::new();
        for (name, value) in iter {
            let _ = attributes.insert(name.into(), value.into());
        }
        attributes
    }
}

/// The events the tokenizer hands to its consumer, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// An element was opened.
    StartTag {
        /// Lowercase tag name.
        name: String,
        /// Parsed attributes.
        attributes: Attributes,
        /// Set for void elements, which are never followed by an end tag.
        self_closing: bool,
    },
    /// An element was closed, explicitly or implicitly.
    EndTag {
        /// Lowercase tag name.
        name: String,
    },
    /// Character data with entities already decoded.
    Text {
        /// Literal text.
        content: String,
    },
    /// A comment.
    Comment {
        /// Text between `<!--` and `-->`.
        content: String,
    },
}

impl Event {
    /// Create a start tag event.
    #[must_use]
    pub fn start_tag(name: impl Into<String>, attributes: Attributes, self_closing: bool) -> Self {
        Self::StartTag {
            name: name.into(),
            attributes,
            self_closing,
        }
    }

    /// Create an end tag event.
    #[must_use]
    pub fn end_tag(name: impl Into<String>) -> Self {
        Self::EndTag { name: name.into() }
    }

    /// Create a text event.
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text {
            content: content.into(),
        }
    }

    /// Create a comment event.
    #[must_use]
    pub fn comment(content: impl Into<String>) -> Self {
        Self::Comment {
            content: content.into(),
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StartTag {
                name,
                attributes,
                self_closing,
            } => {
                write!(f, "StartTag <{name}")?;
                for attr in attributes {
                    write!(f, " {}={:?}", attr.name, attr.value)?;
                }
                if *self_closing {
                    write!(f, " /")?;
                }
                write!(f, ">")
            }
            Self::EndTag { name } => write!(f, "EndTag </{name}>"),
            Self::Text { content } => write!(f, "Text {content:?}"),
            Self::Comment { content } => write!(f, "Comment {content:?}"),
        }
    }
}
