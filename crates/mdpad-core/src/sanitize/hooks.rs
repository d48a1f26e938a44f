//! Element hooks applied after the base allow-list pass.
//!
//! Each hook sees one element through [`ElementNode`] and may only touch
//! that element's attributes.

use std::collections::BTreeMap;

use lol_html::html_content::Element;

/// Narrow view of one element: its tag name and a read/write attribute map.
pub trait ElementNode {
    /// Lower-case tag name.
    fn tag_name(&self) -> String;

    fn get_attribute(&self, name: &str) -> Option<String>;

    fn has_attribute(&self, name: &str) -> bool {
        self.get_attribute(name).is_some()
    }

    /// Set an attribute, replacing any previous value.
    ///
    /// Names that cannot appear in markup (empty, or containing whitespace,
    /// `/`, `>` or `=`) are ignored.
    fn set_attribute(&mut self, name: &str, value: &str);

    fn remove_attribute(&mut self, name: &str);
}

/// A stateless rule over a single element.
///
/// Attribute writes with an invalid name are dropped silently; see
/// [`ElementNode::set_attribute`].
pub type ElementHook = fn(&mut dyn ElementNode);

/// Hooks in the order the policy runs them.
pub const DEFAULT_HOOKS: &[ElementHook] =
    &[secure_external_link, lazy_load_image, normalize_checkbox];

/// Open absolute http(s) links in a new context without an opener reference
/// or a referrer.
pub fn secure_external_link(node: &mut dyn ElementNode) {
    if !node.tag_name().eq_ignore_ascii_case("a") {
        return;
    }
    let is_external = node
        .get_attribute("href")
        .is_some_and(|href| href.starts_with("http://") || href.starts_with("https://"));

    if is_external {
        node.set_attribute("target", "_blank");
        node.set_attribute("rel", "noopener noreferrer");
    }
}

/// Default images to lazy loading. An explicit `loading` value wins.
pub fn lazy_load_image(node: &mut dyn ElementNode) {
    if node.tag_name().eq_ignore_ascii_case("img") && !node.has_attribute("loading") {
        node.set_attribute("loading", "lazy");
    }
}

/// Every input becomes an enabled checkbox; `checked` is left alone.
///
/// This also coerces any other input type, since task lists are the only
/// producer of inputs in rendered Markdown.
pub fn normalize_checkbox(node: &mut dyn ElementNode) {
    if !node.tag_name().eq_ignore_ascii_case("input") {
        return;
    }
    if node.get_attribute("type").as_deref() != Some("checkbox") {
        node.set_attribute("type", "checkbox");
    }
    if node.has_attribute("disabled") {
        node.remove_attribute("disabled");
    }
}

impl ElementNode for Element<'_, '_> {
    fn tag_name(&self) -> String {
        Element::tag_name(self).to_ascii_lowercase()
    }

    fn get_attribute(&self, name: &str) -> Option<String> {
        Element::get_attribute(self, name)
    }

    fn has_attribute(&self, name: &str) -> bool {
        Element::has_attribute(self, name)
    }

    fn set_attribute(&mut self, name: &str, value: &str) {
        if Element::set_attribute(self, name, value).is_err() {
            debug_assert!(!is_valid_attribute_name(name), "rejected valid name {name:?}");
        }
    }

    fn remove_attribute(&mut self, name: &str) {
        Element::remove_attribute(self, name);
    }
}

/// Whether `name` can be written as an attribute name.
fn is_valid_attribute_name(name: &str) -> bool {
    !name.is_empty()
        && !name
            .bytes()
            .any(|b| matches!(b, b' ' | b'\n' | b'\r' | b'\t' | b'\x0C' | b'/' | b'>' | b'='))
}

/// Detached element used to run hooks without a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeMap {
    tag: String,
    attributes: BTreeMap<String, String>,
}

impl AttributeMap {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }
}

impl ElementNode for AttributeMap {
    fn tag_name(&self) -> String {
        self.tag.clone()
    }

    fn get_attribute(&self, name: &str) -> Option<String> {
        self.attributes.get(name).cloned()
    }

    fn set_attribute(&mut self, name: &str, value: &str) {
        if is_valid_attribute_name(name) {
            self.attributes.insert(name.to_string(), value.to_string());
        }
    }

    fn remove_attribute(&mut self, name: &str) {
        self.attributes.remove(name);
    }
}
