//! Integration tests for end-to-end sanitizing.

use scour_common::warning::has_warned;
use scour_html::{IssueKind, Policy, SanitizeError, Sanitizer, sanitize};

/// Helper to sanitize a string that is expected to parse
fn clean(input: &str) -> String {
    sanitize(input).unwrap()
}

// =============================================================================
// Removal
// =============================================================================

#[test]
fn test_script_removed_with_content() {
    assert_eq!(clean("<script>alert(1)</script>"), "");
    assert_eq!(clean("a<ScRiPt>x</sCrIpT>b"), "ab");
}

#[test]
fn test_style_removed_with_content() {
    assert_eq!(clean("<style>body { color: red }</style>ok"), "ok");
}

#[test]
fn test_comments_removed() {
    assert_eq!(clean("<!-- x --><b>y</b>"), "<b>y</b>");
}

#[test]
fn test_unknown_element_unwrapped() {
    assert_eq!(clean("<foo>bar</foo>"), "bar");
    assert_eq!(clean("<foo><b>x</b></foo>"), "<b>x</b>");
}

#[test]
fn test_event_handler_attributes_dropped() {
    assert_eq!(
        clean(r#"<div onclick="evil()" class="c">x</div>"#),
        r#"<div class="c">x</div>"#
    );
}

// =============================================================================
// URI attributes
// =============================================================================

#[test]
fn test_javascript_uri_dropped() {
    assert_eq!(clean(r#"<a href="javascript:alert(1)">x</a>"#), "<a>x</a>");
    assert_eq!(clean(r#"<a href="JaVaScRiPt:alert(1)">x</a>"#), "<a>x</a>");
    assert_eq!(clean(r#"<a href="  javascript:x">x</a>"#), "<a>x</a>");
    assert_eq!(clean(r#"<a href="java&#x09;script:x">x</a>"#), "<a>x</a>");
}

#[test]
fn test_whitelisted_schemes_kept() {
    assert_eq!(
        clean(r#"<a href="http://x.com/?a=1&b=2" title="t">"#),
        r#"<a href="http://x.com/?a=1&amp;b=2" title="t"></a>"#
    );
    assert_eq!(
        clean(r#"<a href="mailto:a@b.c">m</a>"#),
        r#"<a href="mailto:a@b.c">m</a>"#
    );
    assert_eq!(clean(r##"<a href="#top">t</a>"##), r##"<a href="#top">t</a>"##);
    assert_eq!(
        clean(r#"<img src="ftp://x/y.png">"#),
        r#"<img src="ftp://x/y.png"/>"#
    );
}

#[test]
fn test_scheme_match_case_insensitive() {
    assert_eq!(clean(r#"<A HREF="HTTP://X">"#), r#"<a href="HTTP://X"></a>"#);
}

#[test]
fn test_relative_uri_dropped() {
    assert_eq!(clean(r#"<a href="/x">x</a>"#), "<a>x</a>");
}

#[test]
fn test_unsafe_image_source_dropped() {
    assert_eq!(
        clean(r#"<img src="javascript:x" alt="a">"#),
        r#"<img alt="a"/>"#
    );
}

// =============================================================================
// Structure
// =============================================================================

#[test]
fn test_paragraphs_closed() {
    assert_eq!(clean("<p>a<p>b"), "<p>a</p><p>b</p>");
}

#[test]
fn test_list_items_closed() {
    assert_eq!(
        clean("<ul><li>a<li>b</ul>"),
        "<ul><li>a</li><li>b</li></ul>"
    );
}

#[test]
fn test_table_cells_closed() {
    assert_eq!(
        clean("<table><tr><td>a<td>b</table>"),
        "<table><tr><td>a</td><td>b</td></tr></table>"
    );
}

#[test]
fn test_block_closes_inline() {
    assert_eq!(
        clean("<b>x<div>y</div>z</b>"),
        "<b>x</b><div>y</div>z"
    );
}

#[test]
fn test_stray_end_tags_dropped() {
    assert_eq!(clean("a</b></div>c"), "ac");
}

#[test]
fn test_misnested_tags_repaired() {
    assert_eq!(clean("<b><i>x</b>y</i>"), "<b><i>x</i></b>y");
}

#[test]
fn test_void_elements() {
    assert_eq!(clean("a<br>b<hr>"), "a<br/>b<hr/>");
    assert_eq!(clean("<div/>x"), "<div>x</div>");
}

#[test]
fn test_attributes_deduplicated_and_lowercased() {
    assert_eq!(
        clean(r#"<p title="a" TITLE="b">x</p>"#),
        r#"<p title="b">x</p>"#
    );
}

// =============================================================================
// Text
// =============================================================================

#[test]
fn test_text_reencoded() {
    assert_eq!(clean("&lt;script&gt;"), "&lt;script&gt;");
    assert_eq!(clean("\"hi\" & 'bye'"), "&#34;hi&#34; &amp; 'bye'");
    assert_eq!(clean("caf\u{00E9} \u{2615}"), "caf&#233; &#9749;");
    assert_eq!(clean("a\r\nb"), "a&#10;b");
}

#[test]
fn test_empty_input() {
    assert_eq!(clean(""), "");
}

#[test]
fn test_sanitized_output_is_stable() {
    for input in [
        "<p>a<p>b",
        "<b><foo><div>x</div></foo></b>",
        r#"<a href="http://x/?a=1&b=2" onclick=x>&copy; y</a>"#,
        "<ul><li>a<li><script>b</script>c</ul>",
    ] {
        let once = clean(input);
        assert_eq!(clean(&once), once, "input: {input}");
    }
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn test_unparseable_markup() {
    assert_eq!(
        sanitize("a < b"),
        Err(SanitizeError::Unparseable {
            position: 2,
            context: "< b".to_string(),
        })
    );
}

#[test]
fn test_unterminated_script_is_error() {
    assert!(sanitize("<p>x<script>alert(1)").is_err());
}

// =============================================================================
// Sanitizer
// =============================================================================

#[test]
fn test_issues_reported() {
    let sanitizer = Sanitizer::new();
    let (output, issues) = sanitizer
        .sanitize_with_issues(r#"<a href="javascript:x" onclick="y">z</a><foo></foo>"#)
        .unwrap();
    assert_eq!(output, "<a>z</a>");
    let kinds: Vec<IssueKind> = issues.iter().map(|issue| issue.kind).collect();
    assert_eq!(
        kinds,
        [
            IssueKind::UnsafeUri,
            IssueKind::DroppedAttribute,
            IssueKind::UnknownElement,
        ]
    );
}

#[test]
fn test_structural_issues_come_first() {
    let (_, issues) = Sanitizer::new()
        .sanitize_with_issues("<p>a<bar>b")
        .unwrap();
    let kinds: Vec<IssueKind> = issues.iter().map(|issue| issue.kind).collect();
    assert_eq!(
        kinds,
        [
            IssueKind::ImplicitlyClosed,
            IssueKind::ImplicitlyClosed,
            IssueKind::UnknownElement,
        ]
    );
}

#[test]
fn test_warnings_emitted() {
    let sanitizer = Sanitizer::new().with_warnings();
    assert_eq!(sanitizer.sanitize("<zzzwarn>x</zzzwarn>").unwrap(), "x");
    assert!(has_warned("Sanitizer", "unknown-element: zzzwarn"));
}

#[test]
fn test_no_warnings_by_default() {
    assert_eq!(clean("<zzzquiet>x</zzzquiet>"), "x");
    assert!(!has_warned("Sanitizer", "unknown-element: zzzquiet"));
}

#[test]
fn test_events_exposed() {
    let sanitizer = Sanitizer::new();
    assert_eq!(sanitizer.events("<p>x").count(), 3);
}

#[test]
fn test_shared_across_threads() {
    let sanitizer = Sanitizer::new();
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let sanitizer = &sanitizer;
                scope.spawn(move || sanitizer.sanitize(&format!("<p>{i}<script>x</script>")))
            })
            .collect();
        for (i, handle) in handles.into_iter().enumerate() {
            assert_eq!(handle.join().unwrap().unwrap(), format!("<p>{i}</p>"));
        }
    });
}

/// Only links, and only secure ones.
struct LinksOnly;

impl Policy for LinksOnly {
    fn is_void(&self, _name: &str) -> bool {
        false
    }
    fn is_block(&self, _name: &str) -> bool {
        false
    }
    fn is_inline(&self, name: &str) -> bool {
        name.eq_ignore_ascii_case("a")
    }
    fn is_optional_end_tag(&self, _name: &str) -> bool {
        false
    }
    fn is_special(&self, name: &str) -> bool {
        name.eq_ignore_ascii_case("script")
    }
    fn is_uri_attribute(&self, name: &str) -> bool {
        name == "href"
    }
    fn is_valid_attribute(&self, name: &str) -> bool {
        name == "href"
    }
    fn is_allowed_uri(&self, value: &str) -> bool {
        value.starts_with("https:")
    }
}

#[test]
fn test_substitute_policy() {
    let sanitizer = Sanitizer::with_policy(LinksOnly);
    let output = sanitizer
        .sanitize(
            r#"<p>see <a href="http://x">x</a> <a href="https://y" title="t">y</a></p><script>z</script>"#,
        )
        .unwrap();
    assert_eq!(output, r#"see <a>x</a> <a href="https://y">y</a>"#);
}
