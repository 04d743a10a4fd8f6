//! Usage extraction from HTML templates.

use std::path::Path;

use anyhow::Result;

use crate::core::data::{SourceKind, UsageKey};
use crate::core::extract::{
    DEFAULT_QUOTE, ExpressionClassifier, KeySite, KeyUsage, UsageExtractor, Vocabulary,
};
use crate::core::interpolate::scan;
use crate::core::parsers::markup::parse_markup;

const DATA_PREFIX: &str = "data-";

pub struct MarkupExtractor<'a> {
    vocabulary: &'a Vocabulary,
    classifier: ExpressionClassifier<'a>,
}

impl<'a> MarkupExtractor<'a> {
    pub fn new(vocabulary: &'a Vocabulary) -> Self {
        Self {
            vocabulary,
            classifier: ExpressionClassifier::new(&vocabulary.filter),
        }
    }

    /// Keys in the `{{ }}` expressions of `text`, with sites rebased by `base`.
    fn interpolated(&self, text: &str, base: usize, is_directive: bool) -> Vec<KeyUsage> {
        scan(text)
            .expressions
            .iter()
            .flat_map(|expression| {
                self.classifier
                    .classify(&expression.text, is_directive)
                    .into_iter()
                    .map(move |usage| usage.shifted(base + expression.range.start))
            })
            .collect()
    }

    /// The directive value itself is the key when it holds no interpolation.
    fn directive_key(&self, value: &str, base: usize) -> Vec<KeyUsage> {
        let interpolation = scan(value);
        if interpolation.literal().is_none() {
            return self.interpolated(value, base, true);
        }

        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Vec::new();
        }
        let start = base + (value.len() - value.trim_start().len());
        vec![KeyUsage::new(
            UsageKey::new(trimmed),
            KeySite::Text {
                range: start..start + trimmed.len(),
            },
        )]
    }
}

impl UsageExtractor for MarkupExtractor<'_> {
    fn kind(&self) -> SourceKind {
        SourceKind::Markup
    }

    fn usages(&self, _path: &Path, source: &str) -> Result<Vec<KeyUsage>> {
        let document = parse_markup(source)?;
        let mut usages = Vec::new();

        for node in &document.texts {
            usages.extend(self.interpolated(&node.text, node.range.start, false));
        }

        for attribute in &document.attributes {
            let name = attribute
                .name
                .strip_prefix(DATA_PREFIX)
                .unwrap_or(&attribute.name);
            let base = attribute.value_range.start;
            let found = if name == self.vocabulary.directive {
                self.directive_key(&attribute.value, base)
            } else {
                self.interpolated(&attribute.value, base, false)
            };
            let quote = literal_quote(attribute.delimiter);
            usages.extend(found.into_iter().map(|usage| usage.quoted_with(quote)));
        }

        Ok(usages)
    }
}

/// Quote for string literals created inside an attribute value, unlike its delimiter.
fn literal_quote(delimiter: Option<char>) -> char {
    if delimiter == Some(DEFAULT_QUOTE) {
        '"'
    } else {
        DEFAULT_QUOTE
    }
}
