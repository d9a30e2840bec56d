//! Styled elements and their Cartesian expansion over property descriptors.

use crate::style::PropertyDescriptor;

/// One concrete element: the base markup plus an ordered inline style.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StyledElement {
    pub tag_name: String,
    /// Raw attribute string inserted into the opening tag verbatim
    pub attributes: String,
    /// Raw inner HTML inserted verbatim
    pub content: String,
    style: Vec<(String, String)>,
}

impl StyledElement {
    pub fn new(tag_name: &str, attributes: &str, content: &str) -> Self {
        Self {
            tag_name: tag_name.to_string(),
            attributes: attributes.to_string(),
            content: content.to_string(),
            style: Vec::new(),
        }
    }

    /// Return a copy with `name` set to `value`.
    ///
    /// A property that is already present keeps its position and takes the
    /// new value; otherwise it is appended.
    pub fn with_style(&self, name: &str, value: &str) -> Self {
        let mut next = self.clone();
        next.set_style(name, value);
        next
    }

    pub fn set_style(&mut self, name: &str, value: &str) {
        match self.style.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => *v = value.to_string(),
            None => self.style.push((name.to_string(), value.to_string())),
        }
    }

    /// Look up a style property's value
    pub fn style(&self, name: &str) -> Option<&str> {
        self.style
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Style properties in insertion order
    pub fn styles(&self) -> impl Iterator<Item = (&str, &str)> {
        self.style.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// The value of the `style` attribute, e.g. `color: red; font-size: 2px`.
    pub fn style_attribute(&self) -> String {
        self.styles()
            .map(|(k, v)| format!("{}: {}", k, v))
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// Serialize as `<tag attrs style="...">content</tag>`.
    ///
    /// Attributes and content are not escaped.
    pub fn to_html(&self) -> String {
        let mut open = format!("<{}", self.tag_name);
        if !self.attributes.is_empty() {
            open.push(' ');
            open.push_str(&self.attributes);
        }
        format!(
            "{} style=\"{}\">{}</{}>",
            open,
            self.style_attribute(),
            self.content,
            self.tag_name
        )
    }
}

impl std::fmt::Display for StyledElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_html())
    }
}

/// Expand `base` into one element per combination of descriptor values.
///
/// Descriptors are applied in order, so the first descriptor varies slowest.
/// The result has `product(values.len())` elements; a descriptor with no
/// values empties it.
pub fn expand(base: &StyledElement, descriptors: &[PropertyDescriptor]) -> Vec<StyledElement> {
    let mut elements = vec![base.clone()];

    for descriptor in descriptors {
        let values = descriptor.values();
        elements = elements
            .iter()
            .flat_map(|e| values.iter().map(move |v| e.with_style(&descriptor.name, v)))
            .collect();
    }

    elements
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> StyledElement {
        StyledElement::new("button", "class=\"btn\"", "Click")
    }

    #[test]
    fn style_attribute_keeps_insertion_order() {
        let e = base().with_style("color", "red").with_style("font-size", "2px");
        assert_eq!(e.style_attribute(), "color: red; font-size: 2px");
    }

    #[test]
    fn resetting_a_property_keeps_its_position() {
        let e = base()
            .with_style("color", "red")
            .with_style("font-size", "2px")
            .with_style("color", "blue");
        assert_eq!(e.style_attribute(), "color: blue; font-size: 2px");
    }

    #[test]
    fn to_html_inserts_attributes_and_content_verbatim() {
        let e = base().with_style("color", "red");
        assert_eq!(
            e.to_html(),
            "<button class=\"btn\" style=\"color: red\">Click</button>"
        );

        let bare = StyledElement::new("span", "", "<b>x</b>");
        assert_eq!(bare.to_string(), "<span style=\"\"><b>x</b></span>");
    }

    #[test]
    fn expand_is_a_cartesian_product() {
        let descriptors = vec![
            PropertyDescriptor::number("font-size", 10.0, 16.0, 2.0, "px"),
            PropertyDescriptor::strings("font-weight", ["normal", "bold"]),
        ];
        let out = expand(&base(), &descriptors);
        assert_eq!(out.len(), 3 * 2);
        assert!(out
            .iter()
            .all(|e| e.style("font-size").is_some() && e.style("font-weight").is_some()));

        let pairs: Vec<String> = out.iter().map(|e| e.style_attribute()).collect();
        assert_eq!(pairs[0], "font-size: 10px; font-weight: normal");
        assert_eq!(pairs[1], "font-size: 10px; font-weight: bold");
        assert_eq!(pairs[5], "font-size: 14px; font-weight: bold");
    }

    #[test]
    fn expand_copies_do_not_share_style() {
        let descriptors = vec![PropertyDescriptor::strings("color", ["red", "blue"])];
        let mut out = expand(&base(), &descriptors);
        out[0].set_style("color", "green");
        assert_eq!(out[1].style("color"), Some("blue"));
    }

    #[test]
    fn expand_without_descriptors_returns_base() {
        let out = expand(&base(), &[]);
        assert_eq!(out, vec![base()]);
    }

    #[test]
    fn empty_descriptor_empties_result() {
        let descriptors = vec![
            PropertyDescriptor::strings("color", ["red", "blue"]),
            PropertyDescriptor::strings("border", Vec::<String>::new()),
        ];
        assert!(expand(&base(), &descriptors).is_empty());
    }
}
