//! Workflow template loader
//!
//! Builds [`Document`]s from the event stream of `yaml-rust2`'s parser.
//! Mapping keys are kept verbatim. Plain scalar values go through the
//! [`Classifier`]; quoted, block and explicitly tagged scalars stay strings.
//! Aliases resolve to a copy of the anchored node.

use std::collections::HashMap;

use yaml_rust2::parser::{Event, MarkedEventReceiver, Parser};
use yaml_rust2::scanner::{Marker, TScalarStyle};

use super::classifier::{Classifier, ScalarValue};
use super::document::{Document, Mapping, Node};
use crate::error::{GosmError, GosmResult};

/// Loads YAML text into documents, classifying scalars with a borrowed
/// classifier.
pub struct Loader<'c> {
    classifier: &'c mut Classifier,
}

impl<'c> Loader<'c> {
    pub fn new(classifier: &'c mut Classifier) -> Self {
        Self { classifier }
    }

    /// Load the first document of `text`
    pub fn load(&mut self, text: &str) -> GosmResult<Document> {
        self.load_stream(text)?
            .into_iter()
            .next()
            .ok_or_else(|| GosmError::structure(1, "template contains no document"))
    }

    /// Load every document of a `---` separated stream. Empty documents are
    /// skipped.
    pub fn load_stream(&mut self, text: &str) -> GosmResult<Vec<Document>> {
        let mut builder = TreeBuilder::new(&mut *self.classifier);
        Parser::new_from_str(text)
            .load(&mut builder, true)
            .map_err(|err| GosmError::structure(err.marker().line(), err.info()))?;
        builder.finish()
    }
}

/// Load the first document of `text` with a fresh classifier
pub fn load(text: &str) -> GosmResult<Document> {
    let mut classifier = Classifier::new();
    Loader::new(&mut classifier).load(text)
}

/// Collection under construction
enum Frame {
    Mapping {
        entries: Mapping,
        /// Key waiting for its value, with its line
        key: Option<(String, usize)>,
        anchor: usize,
        line: usize,
    },
    Sequence {
        items: Vec<Node>,
        anchor: usize,
        line: usize,
    },
}

impl Frame {
    fn expects_key(&self) -> bool {
        matches!(self, Frame::Mapping { key: None, .. })
    }
}

struct TreeBuilder<'c> {
    classifier: &'c mut Classifier,
    stack: Vec<Frame>,
    anchors: HashMap<usize, Node>,
    root: Option<(Node, usize)>,
    documents: Vec<Document>,
    /// First error; later events are ignored
    error: Option<GosmError>,
}

impl MarkedEventReceiver for TreeBuilder<'_> {
    fn on_event(&mut self, event: Event, mark: Marker) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = self.handle(event, mark.line()) {
            self.error = Some(err);
        }
    }
}

impl<'c> TreeBuilder<'c> {
    fn new(classifier: &'c mut Classifier) -> Self {
        Self {
            classifier,
            stack: Vec::new(),
            anchors: HashMap::new(),
            root: None,
            documents: Vec::new(),
            error: None,
        }
    }

    fn finish(self) -> GosmResult<Vec<Document>> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.documents),
        }
    }

    fn handle(&mut self, event: Event, line: usize) -> GosmResult<()> {
        match event {
            Event::DocumentStart { .. } => {
                self.root = None;
                Ok(())
            }
            Event::DocumentEnd { .. } => self.finish_document(),
            Event::MappingStart(anchor, ..) => {
                self.reject_complex_key(line)?;
                self.stack.push(Frame::Mapping {
                    entries: Mapping::new(),
                    key: None,
                    anchor,
                    line,
                });
                Ok(())
            }
            Event::SequenceStart(anchor, ..) => {
                self.reject_complex_key(line)?;
                self.stack.push(Frame::Sequence {
                    items: Vec::new(),
                    anchor,
                    line,
                });
                Ok(())
            }
            Event::MappingEnd { .. } | Event::SequenceEnd { .. } => {
                let (node, anchor, line) = match self.stack.pop() {
                    Some(Frame::Mapping {
                        entries,
                        anchor,
                        line,
                        ..
                    }) => (Node::Mapping(entries), anchor, line),
                    Some(Frame::Sequence {
                        items,
                        anchor,
                        line,
                    }) => (Node::Sequence(items), anchor, line),
                    None => return Err(GosmError::structure(line, "unbalanced collection end")),
                };
                self.complete(node, anchor, line)
            }
            Event::Scalar(value, style, anchor, tag) => {
                if self.stack.last().is_some_and(Frame::expects_key) {
                    if let Some(Frame::Mapping { key, .. }) = self.stack.last_mut() {
                        *key = Some((value, line));
                    }
                    return Ok(());
                }
                let scalar = if matches!(style, TScalarStyle::Plain) && tag.is_none() {
                    self.classifier.classify(&value)
                } else {
                    ScalarValue::Str(value)
                };
                self.complete(Node::Scalar(scalar), anchor, line)
            }
            Event::Alias(id) => {
                self.reject_complex_key(line)?;
                let node = self
                    .anchors
                    .get(&id)
                    .cloned()
                    .ok_or_else(|| GosmError::structure(line, "alias to an unknown anchor"))?;
                self.complete(node, 0, line)
            }
            _ => Ok(()),
        }
    }

    fn reject_complex_key(&self, line: usize) -> GosmResult<()> {
        if self.stack.last().is_some_and(Frame::expects_key) {
            return Err(GosmError::structure(line, "mapping keys must be scalars"));
        }
        Ok(())
    }

    /// Attach a finished node to its parent (or make it the root)
    fn complete(&mut self, node: Node, anchor: usize, line: usize) -> GosmResult<()> {
        if anchor > 0 {
            self.anchors.insert(anchor, node.clone());
        }

        match self.stack.last_mut() {
            Some(Frame::Mapping { entries, key, .. }) => {
                let (key, key_line) = key
                    .take()
                    .ok_or_else(|| GosmError::structure(line, "mapping value without a key"))?;
                if entries.contains_key(&key) {
                    return Err(GosmError::structure(
                        key_line,
                        format!("duplicate mapping key '{}'", key),
                    ));
                }
                entries.insert(key, node);
            }
            Some(Frame::Sequence { items, .. }) => items.push(node),
            None => self.root = Some((node, line)),
        }
        Ok(())
    }

    fn finish_document(&mut self) -> GosmResult<()> {
        match self.root.take() {
            None | Some((Node::Scalar(ScalarValue::Null), _)) => Ok(()),
            Some((Node::Mapping(root), _)) => {
                self.documents.push(Document::new(root));
                Ok(())
            }
            Some((other, line)) => Err(GosmError::structure(
                line,
                format!("root node must be a mapping, found a {}", other.kind()),
            )),
        }
    }
}
