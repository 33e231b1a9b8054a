//! HTML fragment sanitizer for Scour.
//!
//! # Scope
//!
//! This crate implements:
//! - **Policy** - immutable element and attribute whitelists
//! - **Entity Codec** - character reference decoding and safe re-encoding
//!   ([WHATWG § 13.2.5.72](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state))
//! - **Tokenizer** - a stack-based scanner producing start tag, end tag, text
//!   and comment events, with implied end tags and raw text elements
//! - **Sanitizing Writer** - re-serializes only whitelisted markup
//! - **Sanitizer** - wires the above into `sanitize(text) -> text`
//!
//! # Not Implemented
//!
//! - Full tree construction (insertion modes, adoption agency, foster parenting)
//! - Foreign content (SVG, `MathML`)
//! - CSS or `style` attribute sanitization

/// Character reference decoding and encoding.
pub mod entities;
/// Fatal sanitizer errors.
pub mod error;
/// Recorded structural repairs and policy rejections.
pub mod issue;
/// Element and attribute whitelists.
pub mod policy;
/// Orchestration of tokenizer and writer.
pub mod sanitizer;
/// Stack-based tokenizer producing the event stream.
pub mod tokenizer;
/// Whitelist-filtering re-serializer.
pub mod writer;

pub use entities::{decode_entities, encode_entities};
pub use error::SanitizeError;
pub use issue::{Issue, IssueKind};
pub use policy::{DefaultPolicy, Policy, UriScheme};
pub use sanitizer::{Sanitizer, sanitize};
pub use tokenizer::{Attribute, Attributes, Event, Tokenizer};
pub use writer::SanitizingWriter;
