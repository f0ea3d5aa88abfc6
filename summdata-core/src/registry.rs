//! Named transforms and tokenizers
//!
//! Configuration files and the command line refer to preprocessing steps by
//! name. The registry resolves those names into shared transform instances.

use crate::error::{DatasetError, Result, TransformError};
use crate::text::{TextValue, Tokenizer, Transform, TransformChain, WhitespaceTokenizer};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Trim leading and trailing whitespace (including the line terminator)
#[derive(Debug, Clone, Copy, Default)]
pub struct Strip;

impl Transform for Strip {
    fn name(&self) -> &str {
        "strip"
    }

    fn apply(&self, value: TextValue) -> std::result::Result<TextValue, TransformError> {
        Ok(value.map_strings(|s| s.trim().to_string()))
    }
}

/// Lowercase every character
#[derive(Debug, Clone, Copy, Default)]
pub struct Lowercase;

impl Transform for Lowercase {
    fn name(&self) -> &str {
        "lowercase"
    }

    fn apply(&self, value: TextValue) -> std::result::Result<TextValue, TransformError> {
        Ok(value.map_strings(|s| s.to_lowercase()))
    }
}

/// Remove empty sentences from a sentence list
#[derive(Debug, Clone, Copy, Default)]
pub struct DropEmpty;

impl Transform for DropEmpty {
    fn name(&self) -> &str {
        "drop-empty"
    }

    fn apply(&self, value: TextValue) -> std::result::Result<TextValue, TransformError> {
        Ok(match value {
            TextValue::Sentences(sentences) => TextValue::Sentences(
                sentences
                    .into_iter()
                    .filter(|s| !s.trim().is_empty())
                    .collect(),
            ),
            text => text,
        })
    }
}

/// Replace every match of a pattern
#[derive(Debug, Clone)]
pub struct RegexReplace {
    name: String,
    pattern: Regex,
    replacement: String,
}

impl RegexReplace {
    /// Compile `pattern`; `replacement` may use `$1`-style group references
    pub fn new(
        name: impl Into<String>,
        pattern: &str,
        replacement: impl Into<String>,
    ) -> Result<Self> {
        let pattern = Regex::new(pattern)
            .map_err(|e| DatasetError::Configuration(format!("invalid pattern: {e}")))?;
        Ok(Self {
            name: name.into(),
            pattern,
            replacement: replacement.into(),
        })
    }
}

impl Transform for RegexReplace {
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, value: TextValue) -> std::result::Result<TextValue, TransformError> {
        Ok(value.map_strings(|s| {
            self.pattern
                .replace_all(&s, self.replacement.as_str())
                .into_owned()
        }))
    }
}

/// Split text into sentences after runs of `.`, `!` or `?`
#[derive(Debug, Clone)]
pub struct SentenceSplitter {
    pattern: Regex,
}

impl SentenceSplitter {
    /// Create a splitter
    pub fn new() -> Result<Self> {
        let pattern = Regex::new(r"[^.!?]+(?:[.!?]+|$)")
            .map_err(|e| DatasetError::Configuration(format!("invalid pattern: {e}")))?;
        Ok(Self { pattern })
    }

    fn split<'a>(&'a self, text: &'a str) -> impl Iterator<Item = String> + 'a {
        self.pattern
            .find_iter(text)
            .map(|m| m.as_str().trim().to_string())
            .filter(|s| !s.is_empty())
    }
}

impl Transform for SentenceSplitter {
    fn name(&self) -> &str {
        "split-sentences"
    }

    fn apply(&self, value: TextValue) -> std::result::Result<TextValue, TransformError> {
        let sentences = match value {
            TextValue::Text(text) => self.split(&text).collect(),
            TextValue::Sentences(parts) => parts.iter().flat_map(|p| self.split(p)).collect(),
        };
        Ok(TextValue::Sentences(sentences))
    }
}

struct Entry<T: ?Sized> {
    item: Arc<T>,
    description: String,
}

/// Lookup table of named transforms and tokenizers
#[derive(Default)]
pub struct TransformRegistry {
    transforms: BTreeMap<String, Entry<dyn Transform>>,
    tokenizers: BTreeMap<String, Entry<dyn Tokenizer>>,
}

impl TransformRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every built-in transform and tokenizer
    pub fn with_builtins() -> Result<Self> {
        let mut registry = Self::new();

        registry.register_transform(
            Arc::new(Strip),
            "trim surrounding whitespace and newlines",
        );
        registry.register_transform(Arc::new(Lowercase), "lowercase all characters");
        registry.register_transform(
            Arc::new(RegexReplace::new("collapse-whitespace", r"\s+", " ")?),
            "replace whitespace runs with a single space",
        );
        registry.register_transform(
            Arc::new(RegexReplace::new("dehyphenate", r"(\w)-\s+(\w)", "${1}${2}")?),
            "join words hyphenated across line breaks",
        );
        registry.register_transform(
            Arc::new(SentenceSplitter::new()?),
            "split text into a list of sentences",
        );
        registry.register_transform(Arc::new(DropEmpty), "remove blank sentences from a list");

        registry.register_tokenizer(
            Arc::new(WhitespaceTokenizer),
            "split sentences on whitespace",
        );

        Ok(registry)
    }

    /// Register a transform under its own name, replacing any previous one
    pub fn register_transform(
        &mut self,
        transform: Arc<dyn Transform>,
        description: impl Into<String>,
    ) {
        self.transforms.insert(
            transform.name().to_string(),
            Entry {
                item: transform,
                description: description.into(),
            },
        );
    }

    /// Register a tokenizer under its own name, replacing any previous one
    pub fn register_tokenizer(
        &mut self,
        tokenizer: Arc<dyn Tokenizer>,
        description: impl Into<String>,
    ) {
        self.tokenizers.insert(
            tokenizer.name().to_string(),
            Entry {
                item: tokenizer,
                description: description.into(),
            },
        );
    }

    /// Look up a transform
    pub fn transform(&self, name: &str) -> Result<Arc<dyn Transform>> {
        self.transforms
            .get(name)
            .map(|entry| Arc::clone(&entry.item))
            .ok_or_else(|| DatasetError::UnknownName {
                kind: "transform",
                name: name.to_string(),
            })
    }

    /// Look up a tokenizer
    pub fn tokenizer(&self, name: &str) -> Result<Arc<dyn Tokenizer>> {
        self.tokenizers
            .get(name)
            .map(|entry| Arc::clone(&entry.item))
            .ok_or_else(|| DatasetError::UnknownName {
                kind: "tokenizer",
                name: name.to_string(),
            })
    }

    /// Build a chain from transform names, in order
    pub fn chain<S: AsRef<str>>(&self, names: &[S]) -> Result<TransformChain> {
        names.iter().try_fold(TransformChain::new(), |chain, name| {
            Ok(chain.push(self.transform(name.as_ref())?))
        })
    }

    /// `(name, description)` of every transform, sorted by name
    pub fn transforms(&self) -> Vec<(&str, &str)> {
        self.transforms
            .iter()
            .map(|(name, entry)| (name.as_str(), entry.description.as_str()))
            .collect()
    }

    /// `(name, description)` of every tokenizer, sorted by name
    pub fn tokenizers(&self) -> Vec<(&str, &str)> {
        self.tokenizers
            .iter()
            .map(|(name, entry)| (name.as_str(), entry.description.as_str()))
            .collect()
    }
}
