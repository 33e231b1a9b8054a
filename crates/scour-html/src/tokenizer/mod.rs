//! Tokenizer module.
//!
//! A stack-driven scanner in the manner of a simplified
//! [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//! combined with the implied end tag rules of tree construction. It turns
//! fragment text into a well-nested event stream: every start tag of a
//! non-void element is matched by exactly one end tag.

/// Tokenizer state machine implementation.
pub mod core;
/// Event types produced by the tokenizer.
pub mod event;
/// Input scanning helpers.
pub mod helpers;

pub use self::core::Tokenizer;
pub use event::{Attribute, Attributes, Event};
