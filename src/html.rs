//! HTML document rendering for a batch of styled elements.

use crate::element::StyledElement;

const DOCUMENT_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Document</title>
</head>
<body>
"#;

const DOCUMENT_TAIL: &str = r#"
</body>
</html>
"#;

/// Wrap the serialized elements, concatenated in order, in a fixed HTML shell.
pub fn render_document(elements: &[StyledElement]) -> String {
    let body: String = elements.iter().map(StyledElement::to_html).collect();
    let mut doc = String::with_capacity(DOCUMENT_HEAD.len() + body.len() + DOCUMENT_TAIL.len());
    doc.push_str(DOCUMENT_HEAD);
    doc.push_str(&body);
    doc.push_str(DOCUMENT_TAIL);
    doc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_wraps_elements_in_order() {
        let a = StyledElement::new("div", "", "a").with_style("color", "red");
        let b = StyledElement::new("div", "", "b").with_style("color", "blue");
        let doc = render_document(&[a, b]);

        assert!(doc.starts_with("<!DOCTYPE html>"));
        assert!(doc.contains("<meta charset=\"UTF-8\">"));
        assert!(doc.contains(
            "<div style=\"color: red\">a</div><div style=\"color: blue\">b</div>"
        ));
        assert!(doc.trim_end().ends_with("</html>"));
    }

    #[test]
    fn empty_batch_still_renders_shell() {
        let doc = render_document(&[]);
        assert!(doc.contains("<body>"));
        assert!(doc.contains("</body>"));
    }
}
