//! Rendered markup tree
//!
//! Views render to a small element/text tree instead of a string so tests can
//! inspect structure and the CLI can choose an output format:
//!
//! - [`Markup::to_html`]: deterministic, indented HTML used for snapshots
//! - [`Markup::to_text`]: plain text for terminals

use std::fmt::Write as _;

/// A node in the rendered tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Markup {
    Element(Element),
    Text(String),
    /// Siblings with no wrapping element
    Fragment(Vec<Markup>),
}

/// An element with attributes and children
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: &'static str,
    attrs: Vec<(&'static str, String)>,
    children: Vec<Markup>,
}

impl Element {
    #[must_use]
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Set the `class` attribute
    #[must_use]
    pub fn class(self, class: impl Into<String>) -> Self {
        self.attr("class", class)
    }

    /// Append an attribute; order is preserved in the output
    #[must_use]
    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    #[must_use]
    pub fn child(mut self, child: impl Into<Markup>) -> Self {
        self.children.push(child.into());
        self
    }

    #[must_use]
    pub fn children<I, M>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = M>,
        M: Into<Markup>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    /// Append a text child
    #[must_use]
    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Markup::Text(text.into()))
    }

    #[must_use]
    pub fn tag(&self) -> &'static str {
        self.tag
    }

    /// Attribute value by name
    #[must_use]
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn child_nodes(&self) -> &[Markup] {
        &self.children
    }
}

impl From<Element> for Markup {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

impl From<String> for Markup {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for Markup {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl Markup {
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Nothing rendered
    #[must_use]
    pub fn empty() -> Self {
        Self::Fragment(Vec::new())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Element(_) => false,
            Self::Text(text) => text.is_empty(),
            Self::Fragment(nodes) => nodes.iter().all(Self::is_empty),
        }
    }

    /// Concatenated text of this node and its descendants
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Self::Text(text) => out.push_str(text),
            Self::Element(el) => el.children.iter().for_each(|c| c.collect_text(out)),
            Self::Fragment(nodes) => nodes.iter().for_each(|c| c.collect_text(out)),
        }
    }

    /// Depth-first search for the first element with `class` in its class list
    #[must_use]
    pub fn find_class(&self, class: &str) -> Option<&Element> {
        match self {
            Self::Text(_) => None,
            Self::Fragment(nodes) => nodes.iter().find_map(|n| n.find_class(class)),
            Self::Element(el) => {
                let matches = el
                    .get_attr("class")
                    .is_some_and(|c| c.split_whitespace().any(|c| c == class));
                if matches {
                    Some(el)
                } else {
                    el.children.iter().find_map(|n| n.find_class(class))
                }
            }
        }
    }

    /// Pretty-printed HTML
    ///
    /// An element whose only child is text stays on one line; every other
    /// element puts each child on its own line, indented two spaces per level.
    /// Every line ends with a newline.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out, 0);
        out
    }

    fn write_html(&self, out: &mut String, depth: usize) {
        match self {
            Self::Fragment(nodes) => nodes.iter().for_each(|n| n.write_html(out, depth)),
            Self::Text(text) if text.is_empty() => {}
            Self::Text(text) => {
                indent(out, depth);
                out.push_str(&escape(text));
                out.push('\n');
            }
            Self::Element(el) => {
                indent(out, depth);
                el.write_open(out);
                match el.children.as_slice() {
                    [] => {}
                    [Self::Text(text)] => out.push_str(&escape(text)),
                    children => {
                        out.push('\n');
                        children.iter().for_each(|c| c.write_html(out, depth + 1));
                        indent(out, depth);
                    }
                }
                let _ = write!(out, "</{}>", el.tag);
                out.push('\n');
            }
        }
    }

    /// Plain text, one block per line
    ///
    /// List items collapse to `- a · b`, and `dt`/`dd` pairs in a `dl` become
    /// `term: value`.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut lines = Vec::new();
        self.write_text(&mut lines);
        let mut out = lines.join("\n");
        out.push('\n');
        out
    }

    fn write_text(&self, lines: &mut Vec<String>) {
        match self {
            Self::Text(text) => {
                let text = text.trim();
                if !text.is_empty() {
                    lines.push(text.to_string());
                }
            }
            Self::Fragment(nodes) => nodes.iter().for_each(|n| n.write_text(lines)),
            Self::Element(el) => match el.tag {
                "li" => {
                    let parts: Vec<String> = el
                        .children
                        .iter()
                        .map(|c| c.text_content().trim().to_string())
                        .filter(|t| !t.is_empty())
                        .collect();
                    lines.push(format!("- {}", parts.join(" · ")));
                }
                "dl" => write_definitions(&el.children, lines),
                _ => el.children.iter().for_each(|c| c.write_text(lines)),
            },
        }
    }
}

fn write_definitions(children: &[Markup], lines: &mut Vec<String>) {
    let mut term: Option<String> = None;
    for child in children {
        match child {
            Markup::Element(el) if el.tag == "dt" => term = Some(child.text_content()),
            Markup::Element(el) if el.tag == "dd" => {
                let value = child.text_content();
                match term.take() {
                    Some(term) => lines.push(format!("{term}: {value}")),
                    None => lines.push(value),
                }
            }
            other => other.write_text(lines),
        }
    }
}

impl Element {
    fn write_open(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.tag);
        for (name, value) in &self.attrs {
            let _ = write!(out, " {name}=\"{}\"", escape(value));
        }
        out.push('>');
    }
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str("  ");
    }
}

/// Escape text for HTML content and attribute values
#[must_use]
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Markup {
        Element::new("div")
            .class("card")
            .child(Element::new("h1").text("Tom & Jerry"))
            .child(
                Element::new("dl")
                    .child(Element::new("dt").text("Founded"))
                    .child(Element::new("dd").text("15 May 2010")),
            )
            .child(
                Element::new("ul").child(
                    Element::new("li")
                        .child(Element::new("a").attr("href", "/employees/1").text("John"))
                        .child(Element::new("span").text("Engineer")),
                ),
            )
            .into()
    }

    #[test]
    fn html_is_indented_and_escaped() {
        let expected = "\
<div class=\"card\">
  <h1>Tom &amp; Jerry</h1>
  <dl>
    <dt>Founded</dt>
    <dd>15 May 2010</dd>
  </dl>
  <ul>
    <li>
      <a href=\"/employees/1\">John</a>
      <span>Engineer</span>
    </li>
  </ul>
</div>
";
        assert_eq!(sample().to_html(), expected);
    }

    #[test]
    fn text_collapses_lists_and_definitions() {
        let expected = "Tom & Jerry\nFounded: 15 May 2010\n- John · Engineer\n";
        assert_eq!(sample().to_text(), expected);
    }

    #[test]
    fn empty_fragment_renders_nothing() {
        assert!(Markup::empty().is_empty());
        assert_eq!(Markup::empty().to_html(), "");
        assert_eq!(Markup::from(Element::new("p")).to_html(), "<p></p>\n");
    }

    #[test]
    fn escapes_attribute_quotes() {
        let html = Markup::from(Element::new("a").attr("title", "\"x\" <'y'>")).to_html();
        assert_eq!(html, "<a title=\"&quot;x&quot; &lt;&#39;y&#39;&gt;\"></a>\n");
    }

    #[test]
    fn find_class_matches_class_list() {
        let markup: Markup = Element::new("div")
            .child(Element::new("span").class("status status-active").text("Active"))
            .into();
        let status = markup.find_class("status-active").map(|el| el.tag());
        assert_eq!(status, Some("span"));
        assert!(markup.find_class("status-inactive").is_none());
    }
}
