use mdpad_core::{
    allowed_attributes, allowed_tags, has_unsafe_content, markdown_to_safe_html,
    render_preview_page, sanitize,
};
use proptest::prelude::*;

/// Hostile and benign fragments used for the property checks.
const CORPUS: &[&str] = &[
    "",
    "plain text",
    "<p>Hello World</p>",
    r#"<script>alert("xss")</script>"#,
    "<SCRIPT SRC=//evil.example/x.js></SCRIPT>",
    "<scr<script>ipt>alert(1)</script>",
    r#"<img src="x" onerror="alert(1)">"#,
    r#"<button onclick="alert(1)">Click</button>"#,
    r#"<body onload="alert(1)">"#,
    r#"<svg onload="alert(1)"><circle/></svg>"#,
    r#"<a href="javascript:alert(1)">x</a>"#,
    r#"<a href="  JaVaScRiPt:alert(1)">x</a>"#,
    r#"<a href="jav&#x09;ascript:alert(1)">x</a>"#,
    r#"<img src="vbscript:msgbox(1)">"#,
    r#"<iframe src="https://evil.com"></iframe>"#,
    r#"<object data="x.swf"></object><embed src="x.swf">"#,
    r#"<p style="width: expression(alert(1))">Text</p>"#,
    r#"<div style="position: fixed; top: 0;">Overlay</div>"#,
    r#"<p style="color:red; behavior: url(x.htc)">t</p>"#,
    r#"<a href="https://external.com" target="_self" rel="opener">External</a>"#,
    r#"<input type="image" src="x.png" checked disabled>"#,
    r#"<input type="text" value="v">"#,
    "<table><tr><th>H</th></tr><tr><td>C</td></tr></table>",
    "<ul><li><input type=checkbox checked> done</li></ul>",
    "<p>unclosed <b>bold <i>both</p> tail",
    "<<>><p <p>>",
    "<!-- comment --><p>after</p>",
    r#"<math><mi xlink:href="javascript:alert(1)">x</mi></math>"#,
    r#"<form action="https://evil.com"><input type="submit"></form>"#,
    r#"<img src="data:image/png;base64,iVBORw0KGgo=" alt="dot">"#,
    r#"<a href="mailto:someone@example.com">mail</a>"#,
    "<details><summary>More</summary><p>Hidden</p></details>",
    r#"<ruby>漢<rp>(</rp><rt>kan</rt><rp>)</rp></ruby>"#,
    "<pre>\n\nx</pre>",
    "<pre>\n\n\n  indented\n</pre>",
    "<pre><script>x</script>\n\ny</pre>",
    "<pre>a<pre></pre>\nb</pre>",
    "<listing>\n\nx</listing>",
    "<textarea>\n\nx</textarea>",
    "<pre><code>\nfn main() {}\n</code></pre>",
];

/// Building blocks for generated fragments. Each one parses back to the
/// same tree after serialization, so any instability comes from the policy.
const PIECES: &[&str] = &[
    "\n",
    "\n\n",
    "<pre>",
    "</pre>",
    "<listing>",
    "</listing>",
    "<code>",
    "</code>",
    "<b>",
    "</b>",
    "<em>",
    "</em>",
    "<span style=\"color:red; position:fixed\">",
    "</span>",
    "<br>",
    "&amp;",
    "<!-- note -->",
    "<script>alert(1)</script>",
    "<img src=x onerror=alert(1)>",
    "<input disabled>",
    "<a href=\"https://example.com\">link</a>",
];

fn fragment_piece() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z \n]{0,6}",
        prop::sample::select(PIECES).prop_map(str::to_string),
    ]
}

#[test]
fn test_idempotent() {
    for &input in CORPUS {
        let once = sanitize(input).unwrap();
        let twice = sanitize(&once).unwrap();
        assert_eq!(once, twice, "not idempotent for {input:?}");
    }
}

proptest! {
    #[test]
    fn prop_sanitize_is_idempotent(pieces in prop::collection::vec(fragment_piece(), 0..16)) {
        let input = pieces.concat();
        let once = sanitize(&input).unwrap();
        let twice = sanitize(&once).unwrap();
        prop_assert_eq!(&once, &twice, "input: {:?}", input);
    }
}

#[test]
fn test_markdown_pre_blocks_idempotent() {
    let markdown = "<pre>\n\nraw block\n</pre>\n\n```rust\n\nfn main() {}\n```\n";
    let once = markdown_to_safe_html(markdown).unwrap();
    assert!(once.contains("<pre>\n\nraw block"), "{once}");
    assert_eq!(sanitize(&once).unwrap(), once);
}

#[test]
fn test_no_script_survives() {
    for &input in CORPUS {
        let out = sanitize(input).unwrap().to_lowercase();
        assert!(!out.contains("<script"), "{input:?} -> {out:?}");
        assert!(!out.contains("javascript:"), "{input:?} -> {out:?}");
        assert!(!out.contains("vbscript:"), "{input:?} -> {out:?}");
        assert!(!out.contains("expression("), "{input:?} -> {out:?}");
        assert!(!out.contains("<iframe"), "{input:?} -> {out:?}");
        assert!(!out.contains("<object"), "{input:?} -> {out:?}");
        assert!(!out.contains("<embed"), "{input:?} -> {out:?}");
        assert!(!out.contains("<form"), "{input:?} -> {out:?}");
    }
}

#[test]
fn test_script_content_removed() {
    let out = sanitize(r#"<p>ok</p><script>alert("xss")</script>"#).unwrap();
    assert!(!out.contains("alert"), "{out}");
    assert!(out.contains("<p>ok</p>"), "{out}");
}

#[test]
fn test_no_event_handlers_survive() {
    for &input in CORPUS {
        let out = sanitize(input).unwrap().to_lowercase();
        for handler in ["onerror", "onclick", "onload"] {
            assert!(!out.contains(handler), "{input:?} -> {out:?}");
        }
    }
}

#[test]
fn test_safe_content_preserved() {
    let out = sanitize("<p>Hello World</p>").unwrap();
    assert!(out.contains("<p>"));
    assert!(out.contains("Hello World"));

    let out = sanitize("<pre><code>const x = 1;</code></pre>").unwrap();
    assert_eq!(out, "<pre><code>const x = 1;</code></pre>");

    let out = sanitize(r#"<img src="image.png" alt="Description">"#).unwrap();
    assert!(out.contains(r#"src="image.png""#), "{out}");
    assert!(out.contains(r#"alt="Description""#), "{out}");

    let out = sanitize("<table><tr><th>Header</th></tr><tr><td>Cell</td></tr></table>").unwrap();
    for tag in ["<table>", "<th>", "<td>"] {
        assert!(out.contains(tag), "{out}");
    }

    let out = sanitize(r#"<a href="mailto:someone@example.com">mail</a>"#).unwrap();
    assert_eq!(out, r#"<a href="mailto:someone@example.com">mail</a>"#);

    let out = sanitize(r#"<img src="data:image/png;base64,iVBORw0KGgo=">"#).unwrap();
    assert!(out.contains("data:image/png"), "{out}");
}

#[test]
fn test_style_filtering() {
    let out = sanitize(r#"<p style="color:red">t</p>"#).unwrap();
    assert!(out.contains(r#"style="color:red""#), "{out}");

    let out = sanitize(r#"<div style="position: fixed; top: 0;">t</div>"#).unwrap();
    assert!(!out.contains("position"), "{out}");
    assert!(!out.contains("top"), "{out}");

    let out = sanitize(r#"<span style="color: blue; font-size: 16px; margin: 10px;">S</span>"#)
        .unwrap();
    assert!(
        out.contains(r#"style="color: blue; font-size: 16px; margin: 10px""#),
        "{out}"
    );
}

#[test]
fn test_link_rewriting() {
    let out = sanitize(r#"<a href="https://external.com">External</a>"#).unwrap();
    assert!(out.contains(r#"target="_blank""#), "{out}");
    assert!(out.contains(r#"rel="noopener noreferrer""#), "{out}");

    let out = sanitize(r#"<a href="https://external.com" target="_self" rel="opener">x</a>"#)
        .unwrap();
    assert!(out.contains(r#"target="_blank""#), "{out}");
    assert!(!out.contains("_self"), "{out}");
    assert!(!out.contains(r#"rel="opener""#), "{out}");

    let out = sanitize(r##"<a href="#section">x</a>"##).unwrap();
    assert!(!out.contains("target"), "{out}");
}

#[test]
fn test_checkbox_normalization() {
    let out = sanitize(r#"<input type="image" checked>"#).unwrap();
    assert!(out.contains(r#"type="checkbox""#), "{out}");
    assert!(out.contains("checked"), "{out}");
    assert!(!out.contains("image"), "{out}");

    let out = sanitize(r#"<input type="checkbox" disabled>"#).unwrap();
    assert!(!out.contains("disabled"), "{out}");
    assert!(!out.contains("checked"), "{out}");
}

#[test]
fn test_has_unsafe_content() {
    assert!(has_unsafe_content("<script>alert(1)</script>").unwrap());
    assert!(has_unsafe_content(r#"<img onerror="alert(1)">"#).unwrap());
    assert!(!has_unsafe_content("<p>Hello</p>").unwrap());
    assert!(!has_unsafe_content("<strong>Bold</strong>").unwrap());
}

#[test]
fn test_accessors_exclude_banned() {
    let tags = allowed_tags();
    for banned in ["script", "iframe", "object", "embed"] {
        assert!(!tags.contains(&banned), "{banned}");
    }
    assert!(
        allowed_attributes()
            .iter()
            .all(|attr| !attr.to_lowercase().starts_with("on"))
    );
}

#[test]
fn test_markdown_to_preview_page() {
    let markdown = "# Notes\n\n- [x] ship\n- [ ] test\n\n[docs](https://docs.example)\n\n<img src=x onerror=alert(1)>\n";
    let body = markdown_to_safe_html(markdown).unwrap();
    let page = render_preview_page(&body);

    assert!(page.contains("<h1>Notes</h1>"), "{page}");
    assert!(page.contains(r#"rel="noopener noreferrer""#), "{page}");
    assert!(page.contains(r#"loading="lazy""#), "{page}");
    assert!(!page.contains("onerror"), "{page}");
    assert_eq!(page.matches(r#"type="checkbox""#).count(), 2, "{page}");
}
