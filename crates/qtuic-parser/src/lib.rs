//! qtuic Parser
//!
//! Builds the typed document model from a Qt Designer `.ui` file.
//! The XML is first read into a plain element tree by `qtuic-dom`;
//! the tree builder then turns it into a [`Document`] holding the root
//! widget hierarchy, layouts, actions, property values, tab order,
//! button groups and signal/slot connections.
//!
//! ```text
//! .ui source → Node tree → Parser::parse() → Document
//! ```

pub mod ast;
pub mod parser;

pub use ast::{Document, Layout, LayoutChild, Property, PropertyValue, Widget};
pub use parser::Parser;

use qtuic_dom::DomError;

/// Malformed or structurally invalid `.ui` document.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Parse error: {message}")]
pub struct ParseError {
    pub message: String,
}

impl From<DomError> for ParseError {
    fn from(e: DomError) -> Self {
        ParseError {
            message: e.to_string(),
        }
    }
}
