use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::node::{Attribute, Node};
use crate::DomError;

/// Builds a [`Node`] tree from `quick-xml` events.
///
/// Open elements live on a stack; an element is attached to its parent
/// when its end tag (or empty-element tag) is seen.
pub struct TreeReader<'a> {
    reader: Reader<&'a [u8]>,
    stack: Vec<Node>,
    root: Option<Node>,
}

impl<'a> TreeReader<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            reader: Reader::from_str(source),
            stack: Vec::new(),
            root: None,
        }
    }

    /// Read the whole source and return its root element.
    pub fn read(source: &str) -> Result<Node, DomError> {
        TreeReader::new(source).read_tree()
    }

    fn read_tree(mut self) -> Result<Node, DomError> {
        loop {
            let event = self
                .reader
                .read_event()
                .map_err(|e| self.error(e.to_string()))?;

            match event {
                Event::Start(start) => {
                    let node = self.open(&start)?;
                    self.stack.push(node);
                }
                Event::Empty(start) => {
                    let node = self.open(&start)?;
                    self.close(node)?;
                }
                Event::End(_) => {
                    let node = self
                        .stack
                        .pop()
                        .ok_or_else(|| self.error("unexpected closing tag"))?;
                    self.close(node)?;
                }
                Event::Text(text) => {
                    let text = text.unescape().map_err(|e| self.error(e.to_string()))?;
                    if let Some(top) = self.stack.last_mut() {
                        top.text.push_str(&text);
                    }
                }
                Event::CData(data) => {
                    let data = data.into_inner();
                    if let Some(top) = self.stack.last_mut() {
                        top.text.push_str(&String::from_utf8_lossy(&data));
                    }
                }
                Event::Eof => break,
                // Declarations, comments, doctypes, processing instructions
                _ => {}
            }
        }

        if let Some(open) = self.stack.last() {
            return Err(self.error(format!("unclosed element <{}>", open.tag)));
        }

        self.root
            .take()
            .ok_or_else(|| self.error("document has no root element"))
    }

    fn open(&self, start: &BytesStart<'_>) -> Result<Node, DomError> {
        let mut node = Node::new(String::from_utf8_lossy(start.name().as_ref()).into_owned());

        for attr in start.attributes() {
            let attr = attr.map_err(|e| self.error(e.to_string()))?;
            let value = attr
                .unescape_value()
                .map_err(|e| self.error(e.to_string()))?;
            node.attributes.push(Attribute {
                name: String::from_utf8_lossy(attr.key.as_ref()).into_owned(),
                value: value.into_owned(),
            });
        }

        Ok(node)
    }

    fn close(&mut self, node: Node) -> Result<(), DomError> {
        if let Some(parent) = self.stack.last_mut() {
            parent.children.push(node);
            Ok(())
        } else if self.root.is_none() {
            self.root = Some(node);
            Ok(())
        } else {
            Err(self.error(format!("second root element <{}>", node.tag)))
        }
    }

    fn error(&self, message: impl Into<String>) -> DomError {
        DomError {
            message: message.into(),
            position: self.reader.buffer_position() as u64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_nested_elements() {
        let root = TreeReader::read(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<ui version="4.0">
 <class>Dialog</class>
 <widget class="QDialog" name="Dialog">
  <property name="windowTitle">
   <string>Dialog</string>
  </property>
 </widget>
</ui>"#,
        )
        .unwrap();

        assert_eq!(root.tag, "ui");
        assert_eq!(root.attr("version"), Some("4.0"));
        assert_eq!(root.children.len(), 2);

        let widget = root.child("widget").unwrap();
        assert_eq!(widget.attr("class"), Some("QDialog"));
        let prop = widget.child("property").unwrap();
        assert_eq!(prop.child_value("string"), Some("Dialog"));
    }

    #[test]
    fn test_text_is_unescaped_and_untrimmed() {
        let root = TreeReader::read("<string> a &amp; b </string>").unwrap();
        assert_eq!(root.value(), " a & b ");
    }

    #[test]
    fn test_cdata_is_text() {
        let root = TreeReader::read("<string><![CDATA[<b>bold</b>]]></string>").unwrap();
        assert_eq!(root.value(), "<b>bold</b>");
    }

    #[test]
    fn test_attribute_entities() {
        let root = TreeReader::read(r#"<string comment="a &lt; b">x</string>"#).unwrap();
        assert_eq!(root.attr("comment"), Some("a < b"));
    }

    #[test]
    fn test_comments_are_dropped() {
        let root = TreeReader::read("<ui><!-- note --><class>Form</class></ui>").unwrap();
        assert_eq!(root.children.len(), 1);
    }

    #[test]
    fn test_empty_document_is_error() {
        let err = TreeReader::read("   ").unwrap_err();
        assert!(err.message.contains("no root element"));
    }

    #[test]
    fn test_unclosed_element_is_error() {
        assert!(TreeReader::read("<ui><widget></ui>").is_err());
    }

    #[test]
    fn test_second_root_is_error() {
        let err = TreeReader::read("<a/><b/>").unwrap_err();
        assert!(err.message.contains("second root"));
    }
}
