//! Allow-lists and attribute-level filtering.
//!
//! Everything not listed here is removed by the base pass. Event handler
//! attributes (`on*`), `position` and friends are excluded by omission.

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::Regex;

// =============================================================================
// Tags
// =============================================================================

/// Tags that survive sanitization.
pub const ALLOWED_TAGS: &[&str] = &[
    // Block text
    "p",
    "br",
    "hr",
    "span",
    "div",
    "pre",
    "code",
    "blockquote",
    // Headings
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    // Lists
    "ul",
    "ol",
    "li",
    "dl",
    "dt",
    "dd",
    // Tables
    "table",
    "thead",
    "tbody",
    "tfoot",
    "tr",
    "th",
    "td",
    "caption",
    "colgroup",
    "col",
    // Inline emphasis
    "strong",
    "b",
    "em",
    "i",
    "u",
    "s",
    "del",
    "ins",
    "mark",
    "small",
    "sub",
    "sup",
    "abbr",
    "cite",
    "q",
    "kbd",
    "samp",
    "var",
    // Links and media
    "a",
    "img",
    "figure",
    "figcaption",
    "input",
    // Misc
    "details",
    "summary",
    "address",
    "time",
    "ruby",
    "rt",
    "rp",
];

/// Disallowed tags whose whole subtree is dropped instead of unwrapped.
///
/// Must stay disjoint from [`ALLOWED_TAGS`].
pub const REMOVED_WITH_CONTENT: &[&str] = &[
    "script",
    "style",
    "iframe",
    "frame",
    "frameset",
    "noframes",
    "noscript",
    "noembed",
    "object",
    "embed",
    "applet",
    "template",
    "svg",
    "math",
    "title",
    "textarea",
    "select",
    "xmp",
    "plaintext",
    "audio",
    "video",
];

// =============================================================================
// Attributes
// =============================================================================

/// Attributes allowed on any allowed tag.
///
/// Entries ending in `-*` are prefix wildcards.
pub const ALLOWED_ATTRIBUTES: &[&str] = &[
    // Global
    "class",
    "id",
    "style",
    "title",
    "lang",
    "dir",
    // Links
    "href",
    "target",
    "rel",
    // Images
    "src",
    "alt",
    "width",
    "height",
    "loading",
    // Tables
    "colspan",
    "rowspan",
    "scope",
    "headers",
    // Misc
    "datetime",
    "cite",
    "data-*",
    "aria-*",
    "role",
    "type",
    "checked",
    "disabled",
    "value",
];

/// Concrete attribute names from [`ALLOWED_ATTRIBUTES`].
pub(crate) fn exact_attributes() -> impl Iterator<Item = &'static str> {
    ALLOWED_ATTRIBUTES
        .iter()
        .copied()
        .filter(|attr| !attr.ends_with("-*"))
}

/// Prefixes of the wildcard entries, e.g. `data-` for `data-*`.
pub(crate) fn attribute_prefixes() -> impl Iterator<Item = &'static str> {
    ALLOWED_ATTRIBUTES
        .iter()
        .filter_map(|attr| attr.strip_suffix('*'))
}

// =============================================================================
// CSS
// =============================================================================

/// CSS properties allowed inside a `style` attribute.
pub const ALLOWED_CSS_PROPERTIES: &[&str] = &[
    // Color
    "color",
    "background-color",
    "background",
    "opacity",
    // Text
    "font-family",
    "font-size",
    "font-weight",
    "font-style",
    "text-align",
    "text-decoration",
    "text-transform",
    "line-height",
    "letter-spacing",
    "word-spacing",
    "white-space",
    "vertical-align",
    // Border
    "border",
    "border-radius",
    "border-color",
    "border-width",
    "border-style",
    "border-top",
    "border-right",
    "border-bottom",
    "border-left",
    // Spacing
    "margin",
    "margin-top",
    "margin-right",
    "margin-bottom",
    "margin-left",
    "padding",
    "padding-top",
    "padding-right",
    "padding-bottom",
    "padding-left",
    // Size
    "width",
    "height",
    "max-width",
    "max-height",
    "min-width",
    "min-height",
    // Display
    "display",
    "visibility",
    "overflow",
    "float",
    "clear",
    // Shadow
    "box-shadow",
    "text-shadow",
];

/// Value fragments that make a declaration script-evaluable in some engine.
const SCRIPTABLE_CSS_VALUES: &[&str] = &["expression(", "javascript:", "vbscript:", "-moz-binding"];

/// Filter a raw `style` attribute value down to allowed declarations.
///
/// Declarations are kept verbatim and in order, joined with `"; "`. The
/// result may be empty.
pub fn filter_style(value: &str) -> String {
    value
        .split(';')
        .map(str::trim)
        .filter(|decl| !decl.is_empty() && is_allowed_declaration(decl))
        .collect::<Vec<_>>()
        .join("; ")
}

fn is_allowed_declaration(decl: &str) -> bool {
    let (property, value) = decl.split_once(':').unwrap_or((decl, ""));
    let property = property.trim().to_ascii_lowercase();

    !property.is_empty()
        && ALLOWED_CSS_PROPERTIES.contains(&property.as_str())
        && !is_scriptable_value(value)
}

fn is_scriptable_value(value: &str) -> bool {
    let compact: String = value
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '\\')
        .collect::<String>()
        .to_ascii_lowercase();

    SCRIPTABLE_CSS_VALUES
        .iter()
        .any(|needle| compact.contains(needle))
}

// =============================================================================
// URIs
// =============================================================================

/// Schemes the base engine accepts on URL attributes.
pub const ALLOWED_URL_SCHEMES: &[&str] = &[
    "http", "https", "ftp", "ftps", "mailto", "tel", "callto", "sms", "cid", "xmpp", "data",
];

/// Attributes whose values are checked against [`uri_pattern`].
const URI_ATTRIBUTES: &[&str] = &["href", "src", "cite"];

/// Allowed schemes, or anything that cannot start a scheme (relative paths,
/// fragments, query strings).
pub fn uri_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)^(?:(?:(?:f|ht)tps?|mailto|tel|callto|sms|cid|xmpp|data):|[^a-z]|[a-z+.\-]+(?:[^a-z+.\-:]|$))",
        )
        .expect("valid regex")
    })
}

fn uri_whitespace() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"[\u{0000}-\u{0020}\u{00A0}\u{1680}\u{180E}\u{2000}-\u{2029}\u{205F}\u{3000}]")
            .expect("valid regex")
    })
}

/// Whether a URL attribute value is allowed to stay.
pub fn is_allowed_uri(value: &str) -> bool {
    let compact = uri_whitespace().replace_all(value, "");
    uri_pattern().is_match(&compact)
}

/// Attribute filter installed into the base engine.
///
/// Returning `None` drops the attribute.
pub(crate) fn filter_attribute<'u>(
    _element: &str,
    attribute: &str,
    value: &'u str,
) -> Option<Cow<'u, str>> {
    if attribute == "style" {
        return Some(Cow::Owned(filter_style(value)));
    }
    if URI_ATTRIBUTES.contains(&attribute) && !is_allowed_uri(value) {
        return None;
    }
    Some(Cow::Borrowed(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_style_keeps_allowed_in_order() {
        assert_eq!(filter_style("color:red"), "color:red");
        assert_eq!(
            filter_style("color: blue; font-size: 16px; margin: 10px;"),
            "color: blue; font-size: 16px; margin: 10px"
        );
    }

    #[test]
    fn test_filter_style_drops_unlisted() {
        assert_eq!(filter_style("position: fixed; top: 0;"), "");
        assert_eq!(
            filter_style("position: absolute; COLOR: Red; z-index: 9"),
            "COLOR: Red"
        );
    }

    #[test]
    fn test_filter_style_skips_empty_and_nameless() {
        assert_eq!(filter_style(" ; ;; "), "");
        assert_eq!(filter_style(": red; color: red"), "color: red");
    }

    #[test]
    fn test_filter_style_blocks_expression() {
        assert_eq!(filter_style("width: expression(alert(1))"), "");
        assert_eq!(filter_style("width: EXPRESSION (alert(1)); color: red"), "color: red");
        assert_eq!(filter_style("background: url(javascript:alert(1))"), "");
    }

    #[test]
    fn test_filter_style_is_stable() {
        let once = filter_style("color:red;;position:fixed; margin : 0 ");
        assert_eq!(once, "color:red; margin : 0");
        assert_eq!(filter_style(&once), once);
    }

    #[test]
    fn test_uri_pattern() {
        for ok in [
            "https://example.com",
            "HTTP://EXAMPLE.COM",
            "mailto:a@b.c",
            "tel:+123",
            "data:image/png;base64,AAAA",
            "#fn1",
            "/docs/page",
            "./image.png",
            "image.png",
            "?q=1",
        ] {
            assert!(is_allowed_uri(ok), "{ok} should be allowed");
        }
        for bad in [
            "javascript:alert(1)",
            "JaVaScRiPt:alert(1)",
            "java script:alert(1)",
            " javascript:alert(1)",
            "vbscript:msgbox(1)",
            "file:///etc/passwd",
        ] {
            assert!(!is_allowed_uri(bad), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_attribute_lists_split() {
        let prefixes: Vec<_> = attribute_prefixes().collect();
        assert_eq!(prefixes, vec!["data-", "aria-"]);
        assert!(exact_attributes().all(|attr| !attr.contains('*')));
    }

    #[test]
    fn test_removed_with_content_disjoint_from_allowed() {
        for tag in REMOVED_WITH_CONTENT {
            assert!(!ALLOWED_TAGS.contains(tag), "{tag} is in both lists");
        }
    }

    #[test]
    fn test_filter_attribute() {
        assert_eq!(filter_attribute("a", "href", "#top").as_deref(), Some("#top"));
        assert_eq!(filter_attribute("a", "href", "javascript:void(0)"), None);
        assert_eq!(
            filter_attribute("p", "style", "position:fixed").as_deref(),
            Some("")
        );
        assert_eq!(filter_attribute("p", "class", "x").as_deref(), Some("x"));
    }
}
