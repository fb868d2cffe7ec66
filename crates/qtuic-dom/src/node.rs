use crate::reader::TreeReader;
use crate::DomError;

/// A name/value pair from an element's start tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// One element of a parsed document.
///
/// Text is the concatenation of all text and CDATA directly inside the
/// element. Comments and processing instructions are dropped.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Node {
    pub tag: String,
    pub attributes: Vec<Attribute>,
    pub children: Vec<Node>,
    pub text: String,
}

impl Node {
    /// Create an empty element with the given tag.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Parse a document and return its root element.
    pub fn parse(source: &str) -> Result<Node, DomError> {
        TreeReader::read(source)
    }

    // =========================================================================
    // Attributes
    // =========================================================================

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    pub fn attr_int(&self, name: &str) -> Option<i32> {
        self.attr(name).and_then(|v| v.trim().parse().ok())
    }

    pub fn attr_f64(&self, name: &str) -> Option<f64> {
        self.attr(name).and_then(|v| v.trim().parse().ok())
    }

    pub fn attr_bool(&self, name: &str) -> Option<bool> {
        self.attr(name).map(parse_bool)
    }

    // =========================================================================
    // Element value
    // =========================================================================

    /// The element's text, untrimmed.
    pub fn value(&self) -> &str {
        &self.text
    }

    /// Integer text; malformed or missing values read as 0.
    pub fn int_value(&self) -> i32 {
        self.text.trim().parse().unwrap_or(0)
    }

    pub fn i64_value(&self) -> i64 {
        self.text.trim().parse().unwrap_or(0)
    }

    pub fn u64_value(&self) -> u64 {
        self.text.trim().parse().unwrap_or(0)
    }

    pub fn f32_value(&self) -> f32 {
        self.text.trim().parse().unwrap_or(0.0)
    }

    pub fn f64_value(&self) -> f64 {
        self.text.trim().parse().unwrap_or(0.0)
    }

    pub fn bool_value(&self) -> bool {
        parse_bool(&self.text)
    }

    // =========================================================================
    // Children
    // =========================================================================

    /// First child element with the given tag.
    pub fn child(&self, tag: &str) -> Option<&Node> {
        self.children.iter().find(|c| c.tag == tag)
    }

    /// All child elements with the given tag, in document order.
    pub fn children_named<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Node> + 'a {
        self.children.iter().filter(move |c| c.tag == tag)
    }

    pub fn child_value(&self, tag: &str) -> Option<&str> {
        self.child(tag).map(Node::value)
    }

    /// Integer value of the named child, 0 when absent.
    pub fn child_int(&self, tag: &str) -> i32 {
        self.child(tag).map(Node::int_value).unwrap_or(0)
    }

    pub fn child_f64(&self, tag: &str) -> f64 {
        self.child(tag).map(Node::f64_value).unwrap_or(0.0)
    }

    /// Bool value of the named child, false when absent.
    pub fn child_bool(&self, tag: &str) -> bool {
        self.child(tag).map(Node::bool_value).unwrap_or(false)
    }

    /// Depth-first, pre-order traversal starting at this node.
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }
}

fn parse_bool(s: &str) -> bool {
    matches!(s.trim(), "true" | "True" | "TRUE" | "1")
}

/// Pre-order iterator returned by [`Node::walk`].
pub struct Walk<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(source: &str) -> Node {
        Node::parse(source).unwrap()
    }

    #[test]
    fn test_attr_lookup() {
        let node = parse(r#"<item row="2" column=" 3" flag="true"/>"#);
        assert_eq!(node.attr("row"), Some("2"));
        assert_eq!(node.attr_int("column"), Some(3));
        assert_eq!(node.attr_bool("flag"), Some(true));
        assert_eq!(node.attr("rowspan"), None);
        assert_eq!(node.attr_int("rowspan"), None);
    }

    #[test]
    fn test_typed_child_values() {
        let node = parse("<rect><x>1</x><y>-2</y><width>30</width><height>oops</height></rect>");
        assert_eq!(node.child_int("x"), 1);
        assert_eq!(node.child_int("y"), -2);
        assert_eq!(node.child_int("width"), 30);
        assert_eq!(node.child_int("height"), 0);
        assert_eq!(node.child_int("missing"), 0);
    }

    #[test]
    fn test_bool_values() {
        let node = parse("<font><bold>true</bold><italic>false</italic></font>");
        assert!(node.child_bool("bold"));
        assert!(!node.child_bool("italic"));
        assert!(!node.child_bool("underline"));
    }

    #[test]
    fn test_float_values() {
        let node = parse("<pointf><x>1.5</x><y>2</y></pointf>");
        assert_eq!(node.child_f64("x"), 1.5);
        assert_eq!(node.child_f64("y"), 2.0);
    }

    #[test]
    fn test_children_named_keeps_order() {
        let node = parse("<tabstops><tabstop>a</tabstop><x/><tabstop>b</tabstop></tabstops>");
        let names: Vec<&str> = node.children_named("tabstop").map(Node::value).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_walk_is_depth_first() {
        let node = parse("<a><b><c/></b><d/></a>");
        let tags: Vec<&str> = node.walk().map(|n| n.tag.as_str()).collect();
        assert_eq!(tags, vec!["a", "b", "c", "d"]);
    }
}
