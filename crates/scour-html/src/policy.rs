//! Element and attribute whitelists.
//!
//! Element categories follow [§ 13.1.2 Elements](https://html.spec.whatwg.org/multipage/syntax.html#elements-2)
//! and [§ 13.1.2.4 Optional tags](https://html.spec.whatwg.org/multipage/syntax.html#optional-tags),
//! restricted to markup that is safe to pass through.
//!
//! The tables are built once and never mutated, so a single [`DefaultPolicy`]
//! can be shared by any number of concurrent sanitize calls.

use std::collections::HashSet;
use std::sync::LazyLock;

use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

/// [§ 13.1.2 Elements](https://html.spec.whatwg.org/multipage/syntax.html#void-elements)
///
/// "Void elements only have a start tag; end tags must not be specified for void elements."
const VOID: &[&str] = &["area", "br", "col", "hr", "img", "wbr"];

/// [§ 13.1.2.4 Optional tags](https://html.spec.whatwg.org/multipage/syntax.html#optional-tags)
const OPTIONAL_END_TAG_BLOCK: &[&str] = &[
    "colgroup", "dd", "dt", "li", "p", "tbody", "td", "tfoot", "th", "thead", "tr",
];

const OPTIONAL_END_TAG_INLINE: &[&str] = &["rp", "rt"];

const BLOCK: &[&str] = &[
    "address",
    "article",
    "aside",
    "blockquote",
    "caption",
    "center",
    "del",
    "dir",
    "div",
    "dl",
    "figure",
    "figcaption",
    "footer",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "header",
    "hgroup",
    "hr",
    "ins",
    "map",
    "menu",
    "nav",
    "ol",
    "pre",
    "script",
    "section",
    "table",
    "ul",
];

const INLINE: &[&str] = &[
    "a", "abbr", "acronym", "b", "bdi", "bdo", "big", "br", "cite", "code", "del", "dfn", "em",
    "font", "i", "img", "ins", "kbd", "label", "map", "mark", "q", "ruby", "s", "samp", "small",
    "span", "strike", "strong", "sub", "sup", "time", "tt", "u", "var",
];

/// Raw text elements: their content is never tokenized as markup.
const SPECIAL: &[&str] = &["script", "style"];

/// Attributes whose value is a resource locator.
const URI_ATTRIBUTES: &[&str] = &["background", "cite", "href", "longdesc", "src", "usemap"];

const PLAIN_ATTRIBUTES: &[&str] = &[
    "abbr",
    "align",
    "alt",
    "axis",
    "bgcolor",
    "border",
    "cellpadding",
    "cellspacing",
    "class",
    "clear",
    "color",
    "cols",
    "colspan",
    "compact",
    "coords",
    "dir",
    "face",
    "headers",
    "height",
    "hreflang",
    "hspace",
    "ismap",
    "lang",
    "language",
    "nohref",
    "nowrap",
    "rel",
    "rev",
    "rows",
    "rowspan",
    "rules",
    "scope",
    "scrolling",
    "shape",
    "span",
    "start",
    "summary",
    "target",
    "title",
    "type",
    "valign",
    "value",
    "vspace",
    "width",
];

type NameSet = LazyLock<HashSet<&'static str>>;

fn union(tables: &[&[&'static str]]) -> HashSet<&'static str> {
    tables.iter().flat_map(|table| table.iter().copied()).collect()
}

static VOID_ELEMENTS: NameSet = LazyLock::new(|| union(&[VOID]));
static OPTIONAL_END_TAG_ELEMENTS: NameSet =
    LazyLock::new(|| union(&[OPTIONAL_END_TAG_BLOCK, OPTIONAL_END_TAG_INLINE]));
static BLOCK_ELEMENTS: NameSet = LazyLock::new(|| union(&[OPTIONAL_END_TAG_BLOCK, BLOCK]));
static INLINE_ELEMENTS: NameSet = LazyLock::new(|| union(&[OPTIONAL_END_TAG_INLINE, INLINE]));
static SPECIAL_ELEMENTS: NameSet = LazyLock::new(|| union(&[SPECIAL]));
static VALID_ELEMENTS: NameSet = LazyLock::new(|| {
    union(&[
        VOID,
        OPTIONAL_END_TAG_BLOCK,
        OPTIONAL_END_TAG_INLINE,
        BLOCK,
        INLINE,
    ])
});
static URI_ATTRS: NameSet = LazyLock::new(|| union(&[URI_ATTRIBUTES]));
static VALID_ATTRS: NameSet = LazyLock::new(|| union(&[URI_ATTRIBUTES, PLAIN_ATTRIBUTES]));

/// ASCII case-insensitive set membership. Table entries are lowercase.
fn contains(set: &HashSet<&'static str>, name: &str) -> bool {
    if name.bytes().any(|b| b.is_ascii_uppercase()) {
        set.contains(name.to_ascii_lowercase().as_str())
    } else {
        set.contains(name)
    }
}

/// URI schemes permitted in URI-bearing attributes.
///
/// Anything else, `javascript:` and `data:` included, is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum UriScheme {
    /// `ftp://`
    Ftp,
    /// `http://`
    Http,
    /// `https://`
    Https,
    /// `mailto:`
    Mailto,
    /// A same-document fragment reference, `#...`
    Fragment,
}

impl UriScheme {
    /// The literal prefix a value must start with.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Ftp => "ftp://",
            Self::Http => "http://",
            Self::Https => "https://",
            Self::Mailto => "mailto:",
            Self::Fragment => "#",
        }
    }

    /// The scheme `value` starts with, compared ASCII case-insensitively.
    #[must_use]
    pub fn of(value: &str) -> Option<Self> {
        Self::iter().find(|scheme| {
            let prefix = scheme.prefix();
            value
                .get(..prefix.len())
                .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
        })
    }
}

/// Classification of element and attribute names.
///
/// All predicates are pure and ASCII case-insensitive. The tokenizer consults
/// the structural ones (void, block, inline, optional end tag, special); the
/// writer consults the whitelist ones.
pub trait Policy {
    /// Element that never has children or an end tag.
    fn is_void(&self, name: &str) -> bool;
    /// Block-level element; its start tag closes open inline elements.
    fn is_block(&self, name: &str) -> bool;
    /// Inline (phrasing) element.
    fn is_inline(&self, name: &str) -> bool;
    /// Element whose end tag is implied by a following sibling of the same name.
    fn is_optional_end_tag(&self, name: &str) -> bool;
    /// Raw text element whose content is not markup.
    fn is_special(&self, name: &str) -> bool;
    /// Element that may appear in sanitized output.
    fn is_valid_element(&self, name: &str) -> bool {
        self.is_void(name)
            || self.is_block(name)
            || self.is_inline(name)
            || self.is_optional_end_tag(name)
    }
    /// Attribute whose value is a resource locator.
    fn is_uri_attribute(&self, name: &str) -> bool;
    /// Attribute that may appear in sanitized output.
    fn is_valid_attribute(&self, name: &str) -> bool;
    /// Value acceptable for a URI attribute.
    fn is_allowed_uri(&self, value: &str) -> bool {
        UriScheme::of(value).is_some()
    }
}

/// The built-in whitelist.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultPolicy;

impl Policy for DefaultPolicy {
    fn is_void(&self, name: &str) -> bool {
        contains(&VOID_ELEMENTS, name)
    }

    fn is_block(&self, name: &str) -> bool {
        contains(&BLOCK_ELEMENTS, name)
    }

    fn is_inline(&self, name: &str) -> bool {
        contains(&INLINE_ELEMENTS, name)
    }

    fn is_optional_end_tag(&self, name: &str) -> bool {
        contains(&OPTIONAL_END_TAG_ELEMENTS, name)
    }

    fn is_special(&self, name: &str) -> bool {
        contains(&SPECIAL_ELEMENTS, name)
    }

    fn is_valid_element(&self, name: &str) -> bool {
        contains(&VALID_ELEMENTS, name)
    }

    fn is_uri_attribute(&self, name: &str) -> bool {
        contains(&URI_ATTRS, name)
    }

    fn is_valid_attribute(&self, name: &str) -> bool {
        contains(&VALID_ATTRS, name)
    }
}
