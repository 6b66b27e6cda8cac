//! Position-annotated YAML tree built from parser events
//!
//! Only the first document of the stream is loaded. Every scalar keeps the
//! line and column the parser reported for it; lines are 1-based and count
//! from the start of the raw text.

use std::collections::HashMap;

use yaml_rust2::parser::{Event, MarkedEventReceiver, Parser};
use yaml_rust2::scanner::{Marker, TScalarStyle};

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ScalarNode {
    pub value: String,
    pub line: usize,
    pub column: usize,
    pub plain: bool,
}

impl ScalarNode {
    fn is_null(&self) -> bool {
        self.plain && matches!(self.value.as_str(), "" | "~" | "null" | "Null" | "NULL")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Node {
    Scalar(ScalarNode),
    Sequence { items: Vec<Node>, line: usize },
    Mapping { entries: Vec<(Node, Node)>, line: usize },
}

impl Node {
    pub fn line(&self) -> usize {
        match self {
            Node::Scalar(scalar) => scalar.line,
            Node::Sequence { line, .. } | Node::Mapping { line, .. } => *line,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Node::Scalar(scalar) if scalar.is_null())
    }

    /// Value for a string key of a mapping node. The first match wins.
    pub fn get(&self, key: &str) -> Option<&Node> {
        let Node::Mapping { entries, .. } = self else {
            return None;
        };
        entries.iter().find_map(|(k, v)| match k {
            Node::Scalar(scalar) if scalar.value == key => Some(v),
            _ => None,
        })
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Node::Scalar(_) => "a scalar",
            Node::Sequence { .. } => "a sequence",
            Node::Mapping { .. } => "a mapping",
        }
    }
}

enum Frame {
    Sequence {
        items: Vec<Node>,
        line: usize,
        anchor: usize,
    },
    Mapping {
        entries: Vec<(Node, Node)>,
        pending_key: Option<Node>,
        line: usize,
        anchor: usize,
    },
}

#[derive(Default)]
struct TreeBuilder {
    stack: Vec<Frame>,
    anchors: HashMap<usize, Node>,
    root: Option<Node>,
}

impl TreeBuilder {
    fn complete(&mut self, node: Node, anchor: usize) {
        if anchor > 0 {
            self.anchors.insert(anchor, node.clone());
        }
        match self.stack.last_mut() {
            None => {
                if self.root.is_none() {
                    self.root = Some(node);
                }
            }
            Some(Frame::Sequence { items, .. }) => items.push(node),
            Some(Frame::Mapping {
                entries,
                pending_key,
                ..
            }) => match pending_key.take() {
                None => *pending_key = Some(node),
                Some(key) => entries.push((key, node)),
            },
        }
    }
}

impl MarkedEventReceiver for TreeBuilder {
    fn on_event(&mut self, ev: Event, mark: Marker) {
        match ev {
            Event::Scalar(value, style, anchor, _) => {
                let node = Node::Scalar(ScalarNode {
                    value,
                    line: mark.line(),
                    column: mark.col(),
                    plain: matches!(style, TScalarStyle::Plain),
                });
                self.complete(node, anchor);
            }
            Event::SequenceStart(anchor, ..) => self.stack.push(Frame::Sequence {
                items: Vec::new(),
                line: mark.line(),
                anchor,
            }),
            Event::MappingStart(anchor, ..) => self.stack.push(Frame::Mapping {
                entries: Vec::new(),
                pending_key: None,
                line: mark.line(),
                anchor,
            }),
            Event::SequenceEnd | Event::MappingEnd => match self.stack.pop() {
                Some(Frame::Sequence {
                    items,
                    line,
                    anchor,
                }) => self.complete(Node::Sequence { items, line }, anchor),
                Some(Frame::Mapping {
                    entries,
                    line,
                    anchor,
                    ..
                }) => self.complete(Node::Mapping { entries, line }, anchor),
                None => {}
            },
            Event::Alias(id) => {
                let node = self.anchors.get(&id).cloned().unwrap_or_else(|| {
                    Node::Scalar(ScalarNode {
                        value: String::new(),
                        line: mark.line(),
                        column: mark.col(),
                        plain: true,
                    })
                });
                self.complete(node, 0);
            }
            _ => {}
        }
    }
}

/// Parse the first document of `source`. `None` for an empty stream.
pub(crate) fn parse_first_document(source: &str) -> Result<Option<Node>> {
    let mut builder = TreeBuilder::default();
    let mut parser = Parser::new(source.chars());
    parser
        .load(&mut builder, false)
        .map_err(|e| Error::Syntax {
            line: e.marker().line(),
            column: e.marker().col() + 1,
            message: e.info().to_string(),
        })?;
    Ok(builder.root)
}
