//! qtuic element tree
//!
//! Reads a Qt Designer `.ui` document into a plain tree of elements.
//! Each node keeps its tag name, ordered attributes, ordered element
//! children and concatenated text, with typed accessors for the int,
//! float and bool encodings the `.ui` dialect uses.
//!
//! # Example
//!
//! ```
//! use qtuic_dom::Node;
//!
//! let root = Node::parse("<ui><class>Dialog</class></ui>").unwrap();
//! assert_eq!(root.child_value("class"), Some("Dialog"));
//! ```

pub mod node;
pub mod reader;

pub use node::{Attribute, Node, Walk};
pub use reader::TreeReader;

/// XML error with the byte offset the reader had reached.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("XML error at byte {position}: {message}")]
pub struct DomError {
    pub message: String,
    pub position: u64,
}
