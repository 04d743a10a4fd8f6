//! Span-aware tokenizer for HTML templates.
//!
//! Only what key extraction needs is produced: text nodes and attributes, each with the
//! byte range of its raw text so that a rewrite can splice into the original document.
//! Entities are not decoded.

use std::ops::Range;

use anyhow::{Result, bail};

/// Elements whose content is raw text, never markup or template text.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Element whose whole subtree is ignored.
const IGNORED_ELEMENT: &str = "svg";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextNode {
    pub text: String,
    pub range: Range<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Lower-cased attribute name.
    pub name: String,
    pub value: String,
    /// Range of the raw value, quotes excluded. Empty for valueless attributes.
    pub value_range: Range<usize>,
    /// Quote delimiting the value, if any.
    pub delimiter: Option<char>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MarkupDocument {
    pub texts: Vec<TextNode>,
    pub attributes: Vec<Attribute>,
}

pub fn parse_markup(source: &str) -> Result<MarkupDocument> {
    Tokenizer::new(source).run()
}

struct StartTag {
    name: String,
    attributes: Vec<Attribute>,
    self_closing: bool,
    end: usize,
}

struct Tokenizer<'a> {
    source: &'a str,
    bytes: &'a [u8],
    index: usize,
    text_start: usize,
    ignored_depth: usize,
    document: MarkupDocument,
}

impl<'a> Tokenizer<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            bytes: source.as_bytes(),
            index: 0,
            text_start: 0,
            ignored_depth: 0,
            document: MarkupDocument::default(),
        }
    }

    fn run(mut self) -> Result<MarkupDocument> {
        while self.index < self.bytes.len() {
            if self.bytes[self.index] != b'<' {
                self.index += 1;
                continue;
            }

            if self.starts_with("<!--") {
                self.flush_text();
                self.index = self
                    .find_from(self.index + 4, "-->")
                    .map_or(self.bytes.len(), |pos| pos + 3);
            } else if self.starts_with("<!") || self.starts_with("<?") {
                self.flush_text();
                self.index = self
                    .find_from(self.index, ">")
                    .map_or(self.bytes.len(), |pos| pos + 1);
            } else if self.starts_with("</") && self.is_name_start(self.index + 2) {
                self.flush_text();
                self.consume_end_tag()?;
            } else if self.is_name_start(self.index + 1) {
                self.flush_text();
                self.consume_start_tag()?;
            } else {
                // A lone `<` is text.
                self.index += 1;
                continue;
            }
            self.text_start = self.index;
        }

        self.flush_text();
        Ok(self.document)
    }

    fn consume_end_tag(&mut self) -> Result<()> {
        let name_start = self.index + 2;
        let name_end = self.read_name(name_start);
        let name = self.source[name_start..name_end].to_ascii_lowercase();
        let Some(close) = self.find_from(name_end, ">") else {
            bail!("Unterminated closing tag </{}> at offset {}", name, self.index);
        };
        if name == IGNORED_ELEMENT && self.ignored_depth > 0 {
            self.ignored_depth -= 1;
        }
        self.index = close + 1;
        Ok(())
    }

    fn consume_start_tag(&mut self) -> Result<()> {
        let tag = self.read_start_tag()?;
        self.index = tag.end;

        if tag.name == IGNORED_ELEMENT {
            if !tag.self_closing {
                self.ignored_depth += 1;
            }
            return Ok(());
        }
        if self.ignored_depth == 0 {
            self.document.attributes.extend(tag.attributes);
        }

        if !tag.self_closing && RAW_TEXT_ELEMENTS.contains(&tag.name.as_str()) {
            let closing = format!("</{}", tag.name);
            let lowered = self.source[self.index..].to_ascii_lowercase();
            self.index = match lowered.find(&closing) {
                Some(pos) => {
                    let close_start = self.index + pos;
                    self.find_from(close_start, ">").map_or(self.bytes.len(), |p| p + 1)
                }
                None => self.bytes.len(),
            };
        }
        Ok(())
    }

    fn read_start_tag(&self) -> Result<StartTag> {
        let tag_start = self.index;
        let name_start = tag_start + 1;
        let name_end = self.read_name(name_start);
        let name = self.source[name_start..name_end].to_ascii_lowercase();

        let mut attributes = Vec::new();
        let mut index = name_end;
        loop {
            index = self.skip_whitespace(index);
            match self.bytes.get(index) {
                None => bail!("Unterminated tag <{}> at offset {}", name, tag_start),
                Some(b'>') => {
                    return Ok(StartTag {
                        name,
                        attributes,
                        self_closing: false,
                        end: index + 1,
                    });
                }
                Some(b'/') if self.bytes.get(index + 1) == Some(&b'>') => {
                    return Ok(StartTag {
                        name,
                        attributes,
                        self_closing: true,
                        end: index + 2,
                    });
                }
                Some(b'/') => {
                    index += 1;
                    continue;
                }
                Some(_) => {}
            }

            let attr_start = index;
            while let Some(&b) = self.bytes.get(index) {
                if b.is_ascii_whitespace() || b == b'=' || b == b'>' || b == b'/' {
                    break;
                }
                index += 1;
            }
            if index == attr_start {
                // Stray `=` without a name.
                index += 1;
                continue;
            }
            let attr_name = self.source[attr_start..index].to_ascii_lowercase();

            let after_name = self.skip_whitespace(index);
            if self.bytes.get(after_name) != Some(&b'=') {
                attributes.push(Attribute {
                    name: attr_name,
                    value: String::new(),
                    value_range: index..index,
                    delimiter: None,
                });
                continue;
            }

            let value_start = self.skip_whitespace(after_name + 1);
            let (value_range, next, delimiter) = match self.bytes.get(value_start) {
                Some(&quote @ (b'"' | b'\'')) => {
                    let open = value_start + 1;
                    let Some(close) = self.bytes[open..].iter().position(|&b| b == quote) else {
                        bail!(
                            "Unterminated value for attribute '{}' at offset {}",
                            attr_name,
                            value_start
                        );
                    };
                    (open..open + close, open + close + 1, Some(char::from(quote)))
                }
                _ => {
                    let mut end = value_start;
                    while let Some(&b) = self.bytes.get(end) {
                        if b.is_ascii_whitespace() || b == b'>' {
                            break;
                        }
                        end += 1;
                    }
                    (value_start..end, end, None)
                }
            };
            attributes.push(Attribute {
                name: attr_name,
                value: self.source[value_range.clone()].to_string(),
                value_range,
                delimiter,
            });
            index = next;
        }
    }

    fn flush_text(&mut self) {
        let range = self.text_start..self.index.min(self.bytes.len());
        if self.ignored_depth > 0 || range.is_empty() {
            return;
        }
        let text = &self.source[range.clone()];
        if text.trim().is_empty() {
            return;
        }
        self.document.texts.push(TextNode {
            text: text.to_string(),
            range,
        });
    }

    fn starts_with(&self, pattern: &str) -> bool {
        self.bytes[self.index..].starts_with(pattern.as_bytes())
    }

    fn find_from(&self, from: usize, pattern: &str) -> Option<usize> {
        self.source.get(from..)?.find(pattern).map(|pos| from + pos)
    }

    fn is_name_start(&self, index: usize) -> bool {
        self.bytes.get(index).is_some_and(|b| b.is_ascii_alphabetic())
    }

    fn read_name(&self, from: usize) -> usize {
        let mut index = from;
        while let Some(&b) = self.bytes.get(index) {
            if b.is_ascii_alphanumeric() || b == b'-' || b == b':' || b == b'_' || b == b'.' {
                index += 1;
            } else {
                break;
            }
        }
        index
    }

    fn skip_whitespace(&self, from: usize) -> usize {
        let mut index = from;
        while self.bytes.get(index).is_some_and(|b| b.is_ascii_whitespace()) {
            index += 1;
        }
        index
    }
}
