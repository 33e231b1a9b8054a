//! Property tests over arbitrary input and generated tag soup.

// quickcheck hands properties owned values.
#![allow(clippy::needless_pass_by_value)]

use quickcheck::{Arbitrary, Gen};
use quickcheck_macros::quickcheck;
use scour_html::{
    DefaultPolicy, Event, Policy, Tokenizer, decode_entities, encode_entities, sanitize,
};

const ELEMENTS: &[&str] = &[
    "a", "b", "i", "p", "li", "ul", "div", "td", "tr", "table", "span", "del", "rt", "ruby",
    "foo", "x-y", "DIV", "Li",
];

const VOIDS: &[&str] = &["br", "img", "hr", "wbr"];

const ATTRIBUTES: &[&str] = &["href", "src", "title", "class", "onclick", "style", "HREF"];

const VALUES: &[&str] = &[
    "javascript:alert(1)",
    "JAVASCRIPT:x",
    "http://x.com/?a=1&b=2",
    "https://y",
    "#top",
    "mailto:a@b.c",
    "/relative",
    "it's &amp; <ok>",
    "&#x6A;avascript:x",
];

const TEXTS: &[&str] = &[
    "hello",
    " ",
    "a & b",
    "&lt;script&gt;",
    "caf\u{00E9}",
    "1 > 0",
    "\r\n",
    "&copy",
    "\"q\"",
];

const RAW: &[&str] = &[
    "<script>alert('</b>')</script>",
    "<style><!-- p{} --></style>",
    "<SCRIPT><![CDATA[x]]></script >",
];

/// Well-formed but arbitrarily nested markup.
#[derive(Debug, Clone)]
struct TagSoup(String);

fn pick(g: &mut Gen, options: &[&'static str]) -> &'static str {
    g.choose(options).copied().unwrap_or_default()
}

impl Arbitrary for TagSoup {
    fn arbitrary(g: &mut Gen) -> Self {
        let pieces = usize::arbitrary(g) % 24;
        let mut soup = String::new();
        for _ in 0..pieces {
            match u8::arbitrary(g) % 8 {
                0 => soup.push_str(&format!("<{}>", pick(g, ELEMENTS))),
                1 => soup.push_str(&format!("</{}>", pick(g, ELEMENTS))),
                2 => {
                    let element = pick(g, ELEMENTS);
                    let attribute = pick(g, ATTRIBUTES);
                    let value = pick(g, VALUES);
                    soup.push_str(&format!("<{element} {attribute}=\"{value}\">"));
                }
                3 => soup.push_str(&format!("<{}/>", pick(g, VOIDS))),
                4 => soup.push_str(pick(g, RAW)),
                5 => soup.push_str("<!-- note -->"),
                _ => soup.push_str(pick(g, TEXTS)),
            }
        }
        Self(soup)
    }
}

/// Every tag in `html` passes the default whitelist.
fn only_whitelisted(html: &str) -> bool {
    let policy = DefaultPolicy;
    Tokenizer::new(html, &policy).all(|event| match event {
        Ok(Event::StartTag {
            name, attributes, ..
        }) => {
            policy.is_valid_element(&name)
                && !policy.is_special(&name)
                && attributes.iter().all(|attr| {
                    policy.is_valid_attribute(&attr.name)
                        && (!policy.is_uri_attribute(&attr.name)
                            || policy.is_allowed_uri(&attr.value))
                })
        }
        Ok(Event::EndTag { name }) => policy.is_valid_element(&name),
        Ok(Event::Comment { .. }) | Err(_) => false,
        Ok(Event::Text { .. }) => true,
    })
}

#[quickcheck]
fn sanitize_terminates_on_any_input(input: String) -> bool {
    let _ = sanitize(&input);
    true
}

#[quickcheck]
fn sanitize_is_idempotent(input: String) -> bool {
    match sanitize(&input) {
        Ok(once) => sanitize(&once).as_ref() == Ok(&once),
        Err(_) => true,
    }
}

#[quickcheck]
fn tag_soup_always_parses(soup: TagSoup) -> bool {
    sanitize(&soup.0).is_ok()
}

#[quickcheck]
fn tag_soup_sanitizes_idempotently(soup: TagSoup) -> bool {
    sanitize(&soup.0).is_ok_and(|once| sanitize(&once).as_ref() == Ok(&once))
}

#[quickcheck]
fn tag_soup_output_is_whitelisted(soup: TagSoup) -> bool {
    sanitize(&soup.0).is_ok_and(|output| only_whitelisted(&output))
}

#[quickcheck]
fn any_output_is_whitelisted(input: String) -> bool {
    match sanitize(&input) {
        Ok(output) => only_whitelisted(&output),
        Err(_) => true,
    }
}

#[quickcheck]
fn decode_reverses_encode(text: String) -> bool {
    let text: String = text.chars().filter(|&c| c != '\0').collect();
    decode_entities(&encode_entities(&text)) == text
}
