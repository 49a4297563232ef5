//! Document serializer
//!
//! Emits block-style YAML that the loader reads back into the same tree:
//! every string whose plain form the [`Classifier`] would resolve to another
//! type is quoted, floats always keep a decimal point, and multi-line
//! strings use literal block scalars. The emitted stream then goes through
//! [`normalize_uppercase_keys`], which is kept only when the normalized text
//! still loads into the same documents.

use std::sync::LazyLock;

use regex::Regex;

use super::classifier::{Classifier, ScalarValue};
use super::document::{Document, Mapping, Node};
use super::loader::Loader;

const INDENT: usize = 2;

static UPPERCASE_KEY_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]+([A-Z_]+):").unwrap());

/// Move every indented line whose key is all uppercase letters and
/// underscores to column 0.
pub fn normalize_uppercase_keys(text: &str) -> String {
    UPPERCASE_KEY_LINE.replace_all(text, "$1:").into_owned()
}

/// Serialize one document with a fresh classifier
pub fn serialize(doc: &Document) -> String {
    serialize_stream(std::slice::from_ref(doc))
}

/// Serialize a document stream with a fresh classifier
pub fn serialize_stream(docs: &[Document]) -> String {
    let mut classifier = Classifier::new();
    Serializer::new(&mut classifier).serialize_stream(docs)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StringStyle {
    Plain,
    SingleQuoted,
    DoubleQuoted,
    Literal,
}

pub struct Serializer<'c> {
    classifier: &'c mut Classifier,
    out: String,
}

impl<'c> Serializer<'c> {
    pub fn new(classifier: &'c mut Classifier) -> Self {
        Self {
            classifier,
            out: String::new(),
        }
    }

    pub fn serialize(&mut self, doc: &Document) -> String {
        self.serialize_stream(std::slice::from_ref(doc))
    }

    pub fn serialize_stream(&mut self, docs: &[Document]) -> String {
        self.out.clear();
        for doc in docs {
            self.out.push_str("---\n");
            if doc.root().is_empty() {
                self.out.push_str("{}\n");
            } else {
                self.write_entries(doc.root(), 0);
            }
        }
        let text = std::mem::take(&mut self.out);
        let normalized = normalize_uppercase_keys(&text);
        if normalized == text {
            return text;
        }

        match Loader::new(&mut *self.classifier).load_stream(&normalized) {
            Ok(reloaded) if reloaded.as_slice() == docs => normalized,
            _ => {
                tracing::warn!(
                    "uppercase key normalization would change the document, keeping keys nested"
                );
                text
            }
        }
    }

    fn write_indent(&mut self, indent: usize) {
        self.out.extend(std::iter::repeat(' ').take(indent));
    }

    fn write_entries(&mut self, mapping: &Mapping, indent: usize) {
        for (key, value) in mapping.iter() {
            self.write_indent(indent);
            self.write_entry(key, value, indent);
        }
    }

    /// `key:` plus its value; the cursor is already at the key's column
    fn write_entry(&mut self, key: &str, value: &Node, indent: usize) {
        self.out.push_str(&format_key(key));
        self.out.push(':');

        match value {
            Node::Mapping(child) if !child.is_empty() => {
                self.out.push('\n');
                self.write_entries(child, indent + INDENT);
            }
            Node::Sequence(items) if !items.is_empty() => {
                self.out.push('\n');
                self.write_sequence(items, indent);
            }
            other => self.write_inline(other, indent),
        }
    }

    fn write_sequence(&mut self, items: &[Node], indent: usize) {
        for item in items {
            self.write_indent(indent);
            self.out.push('-');

            match item {
                Node::Mapping(child) if !child.is_empty() => {
                    self.out.push(' ');
                    let nested = indent + INDENT;
                    for (i, (key, value)) in child.iter().enumerate() {
                        if i > 0 {
                            self.write_indent(nested);
                        }
                        self.write_entry(key, value, nested);
                    }
                }
                Node::Sequence(nested) if !nested.is_empty() => {
                    self.out.push('\n');
                    self.write_sequence(nested, indent + INDENT);
                }
                other => self.write_inline(other, indent),
            }
        }
    }

    /// Value that fits after `key:` or `-` on the same line (block scalar
    /// bodies continue below at `indent + 2`)
    fn write_inline(&mut self, node: &Node, indent: usize) {
        match node {
            Node::Mapping(_) => self.out.push_str(" {}\n"),
            Node::Sequence(_) => self.out.push_str(" []\n"),
            Node::Scalar(ScalarValue::Null) => self.out.push('\n'),
            Node::Scalar(ScalarValue::Str(s)) => self.write_string(s, indent),
            Node::Scalar(ScalarValue::Atom(atom)) => {
                self.out.push(' ');
                self.out.push_str(&format_atom(atom.name()));
                self.out.push('\n');
            }
            Node::Scalar(other) => {
                self.out.push(' ');
                self.out.push_str(&other.to_string());
                self.out.push('\n');
            }
        }
    }

    fn write_string(&mut self, s: &str, indent: usize) {
        match self.string_style(s) {
            StringStyle::Plain => {
                self.out.push(' ');
                self.out.push_str(s);
                self.out.push('\n');
            }
            StringStyle::SingleQuoted => {
                self.out.push_str(" '");
                self.out.push_str(&s.replace('\'', "''"));
                self.out.push_str("'\n");
            }
            StringStyle::DoubleQuoted => {
                self.out.push(' ');
                self.out.push_str(&double_quoted(s));
                self.out.push('\n');
            }
            StringStyle::Literal => self.write_literal(s, indent + INDENT),
        }
    }

    fn write_literal(&mut self, s: &str, indent: usize) {
        let (indicator, body) = if let Some(body) = s.strip_suffix('\n') {
            if body.ends_with('\n') || body.is_empty() {
                ("|+", body)
            } else {
                ("|", body)
            }
        } else {
            ("|-", s)
        };

        self.out.push(' ');
        self.out.push_str(indicator);
        self.out.push('\n');
        for line in body.split('\n') {
            if !line.is_empty() {
                self.write_indent(indent);
                self.out.push_str(line);
            }
            self.out.push('\n');
        }
    }

    fn string_style(&mut self, s: &str) -> StringStyle {
        if s.contains('\n') {
            return if fits_literal(s) {
                StringStyle::Literal
            } else {
                StringStyle::DoubleQuoted
            };
        }
        if !is_plain_safe(s) {
            return StringStyle::DoubleQuoted;
        }
        if !self.classifier.is_plain_string(s) {
            return StringStyle::SingleQuoted;
        }
        StringStyle::Plain
    }
}

/// Text that can appear unquoted without changing the document structure
fn is_plain_safe(s: &str) -> bool {
    let Some(first) = s.chars().next() else {
        return false;
    };
    (first.is_alphanumeric() || first == '_')
        && !s.ends_with(char::is_whitespace)
        && !s.ends_with(':')
        && !breaks_plain(s)
        && !s.chars().any(is_special_char)
}

/// A `: ` value indicator or a ` #` comment start inside the text, with any
/// whitespace character standing in for the space
fn breaks_plain(s: &str) -> bool {
    let chars: Vec<char> = s.chars().collect();
    chars.windows(2).any(|pair| match pair {
        [c, '#'] => c.is_whitespace(),
        [':', c] => c.is_whitespace(),
        _ => false,
    })
}

fn is_special_char(c: char) -> bool {
    c.is_control() || matches!(c, '\u{85}' | '\u{2028}' | '\u{2029}' | '\u{FEFF}')
}

fn fits_literal(s: &str) -> bool {
    let first_text = s.split('\n').find(|line| !line.trim().is_empty());
    !s.chars().any(|c| c != '\n' && c != '\t' && is_special_char(c))
        && first_text.is_some_and(|line| !line.starts_with([' ', '\t']))
}

fn format_key(key: &str) -> String {
    if is_plain_safe(key) {
        key.to_string()
    } else {
        double_quoted(key)
    }
}

/// `:name`, `:"name"` or `:'name'`. Names that cannot sit in a plain
/// scalar are emitted as a double-quoted string instead.
fn format_atom(name: &str) -> String {
    let text = if !name.is_empty() && name.chars().all(|c| c.is_alphanumeric() || c == '_') {
        format!(":{}", name)
    } else if !name.contains('"') {
        format!(":\"{}\"", name)
    } else {
        format!(":'{}'", name)
    };

    if breaks_plain(&text) || text.ends_with(char::is_whitespace) || text.chars().any(is_special_char) {
        double_quoted(&text)
    } else {
        text
    }
}

fn double_quoted(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\0' => out.push_str("\\0"),
            '\u{85}' => out.push_str("\\N"),
            '\u{2028}' => out.push_str("\\L"),
            '\u{2029}' => out.push_str("\\P"),
            c if (c as u32) < 0x100 && is_special_char(c) => {
                out.push_str(&format!("\\x{:02X}", c as u32))
            }
            c if is_special_char(c) => out.push_str(&format!("\\u{:04X}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
