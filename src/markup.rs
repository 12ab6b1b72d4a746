//! Markup tree produced by views.
//!
//! Views build [`Node`] values; nothing here knows about routing. The tree
//! serialises to escaped HTML and can be queried for its text and links,
//! which is what navigation and the tests rely on.

/// Attribute name/value pair on an element
pub type Attr = (&'static str, String);

/// A node in the markup tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// An element with attributes and children
    Element(Element),
    /// Escaped text
    Text(String),
    /// A sequence of sibling nodes with no wrapper element
    Fragment(Vec<Node>),
}

/// An HTML element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: &'static str,
    pub attrs: Vec<Attr>,
    pub children: Vec<Node>,
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

    #[must_use]
    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    #[must_use]
    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    #[must_use]
    pub fn children<I>(mut self, nodes: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        self.children.extend(nodes.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Text(text.to_string())
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Node::Text(text)
    }
}

impl From<Vec<Node>> for Node {
    fn from(nodes: Vec<Node>) -> Self {
        Node::Fragment(nodes)
    }
}

/// Start an element with the given tag
#[must_use]
pub fn el(tag: &'static str) -> Element {
    Element::new(tag)
}

/// Anchor that navigates client-side to `to`
#[must_use]
pub fn link(to: &str, label: &str) -> Element {
    el("a").attr("href", to).text(label)
}

impl Node {
    /// Serialise to HTML with text and attribute values escaped.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Node::Text(text) => escape_into(out, text),
            Node::Fragment(nodes) => nodes.iter().for_each(|n| n.write_html(out)),
            Node::Element(el) => {
                out.push('<');
                out.push_str(el.tag);
                for (name, value) in &el.attrs {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    escape_into(out, value);
                    out.push('"');
                }
                out.push('>');
                for child in &el.children {
                    child.write_html(out);
                }
                out.push_str("</");
                out.push_str(el.tag);
                out.push('>');
            }
        }
    }

    /// Concatenated text of every descendant text node.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.visit(&mut |node| {
            if let Node::Text(text) = node {
                out.push_str(text);
            }
        });
        out
    }

    /// `href` of every anchor in document order.
    #[must_use]
    pub fn links(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.visit(&mut |node| {
            if let Node::Element(el) = node {
                if el.tag == "a" {
                    if let Some(href) = el.get_attr("href") {
                        out.push(href.to_string());
                    }
                }
            }
        });
        out
    }

    /// Text content of every element with the given tag, in document order.
    #[must_use]
    pub fn texts_of(&self, tag: &str) -> Vec<String> {
        let mut out = Vec::new();
        self.visit(&mut |node| {
            if let Node::Element(el) = node {
                if el.tag == tag {
                    out.push(Node::Fragment(el.children.clone()).text_content());
                }
            }
        });
        out
    }

    fn visit<F: FnMut(&Node)>(&self, f: &mut F) {
        f(self);
        match self {
            Node::Text(_) => {}
            Node::Fragment(nodes) => nodes.iter().for_each(|n| n.visit(f)),
            Node::Element(el) => el.children.iter().for_each(|n| n.visit(f)),
        }
    }
}

fn escape_into(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
}
