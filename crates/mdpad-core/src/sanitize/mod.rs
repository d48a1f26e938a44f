//! HTML sanitization for rendered Markdown.
//!
//! Turns untrusted HTML into markup that can be injected into a live page:
//!
//! 1. A base allow-list pass ([`ammonia`]) keeps only [`ALLOWED_TAGS`],
//!    [`ALLOWED_ATTRIBUTES`], allowed URL schemes and allowed `style`
//!    declarations ([`filter_style`]). Comments are dropped, and
//!    script-bearing containers are removed together with their content.
//! 2. Element hooks ([`lol_html`]) patch what survives: external links get
//!    `target="_blank" rel="noopener noreferrer"`, images default to
//!    `loading="lazy"`, and inputs become enabled checkboxes.
//!
//! The transform is pure and idempotent. Nothing is logged here; callers
//! decide whether a stripped construct is worth reporting.

mod allowlist;
mod hooks;
mod policy;

pub use allowlist::{
    ALLOWED_ATTRIBUTES, ALLOWED_CSS_PROPERTIES, ALLOWED_TAGS, ALLOWED_URL_SCHEMES,
    REMOVED_WITH_CONTENT, filter_style, is_allowed_uri, uri_pattern,
};
pub use hooks::{
    AttributeMap, DEFAULT_HOOKS, ElementHook, ElementNode, lazy_load_image, normalize_checkbox,
    secure_external_link,
};
pub use policy::SanitizationPolicy;

use crate::error::SanitizeError;

/// Sanitize `dirty` with the shared default policy.
///
/// ```
/// let clean = mdpad_core::sanitize(r#"<img src="x" onerror="alert(1)">"#).unwrap();
/// assert_eq!(clean, r#"<img src="x" loading="lazy">"#);
/// ```
pub fn sanitize(dirty: &str) -> Result<String, SanitizeError> {
    SanitizationPolicy::shared().sanitize(dirty)
}

/// Whether the shared policy would remove or alter anything in `html`.
///
/// A diagnostic only: whitespace differences are ignored, and hook
/// additions such as `loading="lazy"` count as alterations.
pub fn has_unsafe_content(html: &str) -> Result<bool, SanitizeError> {
    SanitizationPolicy::shared().has_unsafe_content(html)
}

/// Tags that survive sanitization.
pub fn allowed_tags() -> &'static [&'static str] {
    ALLOWED_TAGS
}

/// Attributes that survive sanitization, including `data-*` and `aria-*`
/// wildcards.
pub fn allowed_attributes() -> &'static [&'static str] {
    ALLOWED_ATTRIBUTES
}

/// CSS properties allowed inside `style` attributes.
pub fn allowed_css_properties() -> &'static [&'static str] {
    ALLOWED_CSS_PROPERTIES
}
