//! The sanitization policy: a base allow-list pass followed by element hooks.

use std::cell::Cell;
use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;
use std::sync::OnceLock;

use ammonia::{Builder, UrlRelative};
use lol_html::html_content::{ContentType, EndTag};
use lol_html::{EndTagHandler, HandlerResult, RewriteStrSettings, element, rewrite_str, text};

use super::allowlist::{
    self, ALLOWED_TAGS, ALLOWED_URL_SCHEMES, REMOVED_WITH_CONTENT, filter_attribute,
};
use super::hooks::{DEFAULT_HOOKS, ElementHook};
use crate::error::SanitizeError;

/// Immutable sanitization configuration.
///
/// Built once and shared; calls to [`sanitize`](Self::sanitize) never
/// mutate it, so one policy can serve any number of callers.
pub struct SanitizationPolicy {
    base: Builder<'static>,
    hooks: Vec<ElementHook>,
}

impl SanitizationPolicy {
    /// Policy with the default allow-lists and hooks.
    pub fn new() -> Self {
        Self::with_hooks(DEFAULT_HOOKS.to_vec())
    }

    /// Policy with the default allow-lists and a custom hook chain.
    pub fn with_hooks(hooks: Vec<ElementHook>) -> Self {
        let mut base = Builder::empty();
        base.tags(ALLOWED_TAGS.iter().copied().collect::<HashSet<_>>())
            .clean_content_tags(REMOVED_WITH_CONTENT.iter().copied().collect())
            .generic_attributes(allowlist::exact_attributes().collect())
            .generic_attribute_prefixes(allowlist::attribute_prefixes().collect())
            .url_schemes(ALLOWED_URL_SCHEMES.iter().copied().collect())
            .url_relative(UrlRelative::PassThrough)
            .link_rel(None)
            .strip_comments(true)
            .attribute_filter(filter_attribute);

        Self { base, hooks }
    }

    /// Process-wide default policy, initialized on first use.
    pub fn shared() -> &'static SanitizationPolicy {
        static POLICY: OnceLock<SanitizationPolicy> = OnceLock::new();
        POLICY.get_or_init(SanitizationPolicy::new)
    }

    /// Strip everything the policy does not allow and apply the hooks.
    ///
    /// Malformed markup is parsed best-effort. Errors only come from the
    /// element rewriter and are passed through untouched.
    pub fn sanitize(&self, dirty: &str) -> Result<String, SanitizeError> {
        let filtered = self.base.clean(dirty).to_string();
        self.rewrite(&filtered)
    }

    /// Whether sanitizing `html` changes anything beyond whitespace.
    pub fn has_unsafe_content(&self, html: &str) -> Result<bool, SanitizeError> {
        let cleaned = self.sanitize(html)?;
        Ok(normalize_whitespace(&cleaned) != normalize_whitespace(html))
    }

    /// Run the hooks over every element.
    ///
    /// The parser drops a newline right after `<pre>` and the serializer
    /// does not write it back, so `<pre>\n\nx` would shrink on every pass.
    /// A newline is restored after the start tag whenever the first child
    /// of a `pre` is text beginning with one. (`listing` and `textarea`
    /// behave the same but never survive the allow-list.)
    fn rewrite(&self, html: &str) -> Result<String, SanitizeError> {
        let hooks = &self.hooks;
        // Set between a `pre` start tag and its first child.
        let on_element = Rc::new(Cell::new(false));
        let on_text = Rc::clone(&on_element);
        rewrite_str(
            html,
            RewriteStrSettings {
                element_content_handlers: vec![
                    element!("*", move |el| {
                        let is_pre = el.tag_name().eq_ignore_ascii_case("pre");
                        on_element.set(is_pre);
                        if is_pre {
                            if let Some(handlers) = el.end_tag_handlers() {
                                let on_end = Rc::clone(&on_element);
                                let handler: EndTagHandler<'static> = Box::new(
                                    move |_: &mut EndTag<'_>| -> HandlerResult {
                                        on_end.set(false);
                                        Ok(())
                                    },
                                );
                                handlers.push(handler);
                            }
                        }
                        for &hook in hooks {
                            hook(&mut *el);
                        }
                        Ok(())
                    }),
                    text!("pre", move |chunk| {
                        if chunk.as_str().is_empty() || !on_text.get() {
                            return Ok(());
                        }
                        on_text.set(false);
                        if chunk.as_str().starts_with('\n') {
                            chunk.before("\n", ContentType::Text);
                        }
                        Ok(())
                    }),
                ],
                ..RewriteStrSettings::new()
            },
        )
        .map_err(|e| SanitizeError::Rewrite(e.to_string()))
    }
}

impl Default for SanitizationPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SanitizationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SanitizationPolicy")
            .field("tags", &ALLOWED_TAGS.len())
            .field("hooks", &self.hooks.len())
            .finish()
    }
}

/// Collapse whitespace runs to one space and trim.
fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
