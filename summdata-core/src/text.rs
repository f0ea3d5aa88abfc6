//! Text values and the transform/tokenizer seams
//!
//! A [`TextValue`] is what flows through a [`TransformChain`]: a raw line
//! starts as [`TextValue::Text`] and a sentence splitter typically turns it
//! into [`TextValue::Sentences`]. Transforms and tokenizers are `Send + Sync`
//! so a chain can be shared by every worker of the parallel coordinator.

use crate::error::TransformError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// A unit of text at some stage of preprocessing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextValue {
    /// A single string (a raw line, or a cleaned paragraph)
    Text(String),
    /// A sequence of sentence strings
    Sentences(Vec<String>),
}

impl TextValue {
    /// Whether the value carries no content.
    ///
    /// A text is empty when it has no characters; a sentence list is empty
    /// when it has no sentences (a list holding one empty string is not).
    pub fn is_empty(&self) -> bool {
        match self {
            TextValue::Text(text) => text.is_empty(),
            TextValue::Sentences(sentences) => sentences.is_empty(),
        }
    }

    /// View the value as a list of sentences. A plain text is one sentence.
    pub fn sentences(&self) -> Vec<&str> {
        match self {
            TextValue::Text(text) => vec![text.as_str()],
            TextValue::Sentences(sentences) => sentences.iter().map(String::as_str).collect(),
        }
    }

    /// Apply `f` to every string in the value, keeping its shape
    pub fn map_strings<F>(self, mut f: F) -> TextValue
    where
        F: FnMut(String) -> String,
    {
        match self {
            TextValue::Text(text) => TextValue::Text(f(text)),
            TextValue::Sentences(sentences) => {
                TextValue::Sentences(sentences.into_iter().map(f).collect())
            }
        }
    }
}

impl From<String> for TextValue {
    fn from(text: String) -> Self {
        TextValue::Text(text)
    }
}

impl From<&str> for TextValue {
    fn from(text: &str) -> Self {
        TextValue::Text(text.to_string())
    }
}

impl From<Vec<String>> for TextValue {
    fn from(sentences: Vec<String>) -> Self {
        TextValue::Sentences(sentences)
    }
}

/// A text-to-text step of a preprocessing chain
pub trait Transform: Send + Sync {
    /// Name used in logs and error messages
    fn name(&self) -> &str;

    /// Transform one value
    fn apply(&self, value: TextValue) -> Result<TextValue, TransformError>;
}

/// Splits a sentence into word tokens
pub trait Tokenizer: Send + Sync {
    /// Name used in logs and error messages
    fn name(&self) -> &str;

    /// Tokenize one sentence
    fn tokenize(&self, sentence: &str) -> Result<Vec<String>, TransformError>;
}

/// Transform backed by a closure
struct FnTransform<F> {
    name: String,
    f: F,
}

impl<F> Transform for FnTransform<F>
where
    F: Fn(TextValue) -> Result<TextValue, TransformError> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, value: TextValue) -> Result<TextValue, TransformError> {
        (self.f)(value)
    }
}

/// Tokenizer backed by a closure
struct FnTokenizer<F> {
    name: String,
    f: F,
}

impl<F> Tokenizer for FnTokenizer<F>
where
    F: Fn(&str) -> Vec<String> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn tokenize(&self, sentence: &str) -> Result<Vec<String>, TransformError> {
        Ok((self.f)(sentence))
    }
}

/// Wrap a closure as a shared tokenizer
pub fn tokenizer_fn<F>(name: impl Into<String>, f: F) -> Arc<dyn Tokenizer>
where
    F: Fn(&str) -> Vec<String> + Send + Sync + 'static,
{
    Arc::new(FnTokenizer {
        name: name.into(),
        f,
    })
}

/// Splits sentences on Unicode whitespace
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceTokenizer;

impl Tokenizer for WhitespaceTokenizer {
    fn name(&self) -> &str {
        "whitespace"
    }

    fn tokenize(&self, sentence: &str) -> Result<Vec<String>, TransformError> {
        Ok(sentence.split_whitespace().map(str::to_string).collect())
    }
}

/// Ordered list of transforms applied one after another
#[derive(Clone, Default)]
pub struct TransformChain {
    steps: Vec<Arc<dyn Transform>>,
}

impl TransformChain {
    /// Create an empty chain (values pass through unchanged)
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a transform
    pub fn push(mut self, transform: Arc<dyn Transform>) -> Self {
        self.steps.push(transform);
        self
    }

    /// Append a fallible closure
    pub fn then<F>(self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(TextValue) -> Result<TextValue, TransformError> + Send + Sync + 'static,
    {
        self.push(Arc::new(FnTransform {
            name: name.into(),
            f,
        }))
    }

    /// Append an infallible closure
    pub fn map<F>(self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(TextValue) -> TextValue + Send + Sync + 'static,
    {
        self.then(name, move |value| Ok(f(value)))
    }

    /// Number of steps
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the chain has no steps
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Step names in application order
    pub fn names(&self) -> Vec<&str> {
        self.steps.iter().map(|step| step.name()).collect()
    }

    /// Feed `value` through every step in order
    pub fn run(&self, value: TextValue) -> Result<TextValue, TransformError> {
        self.steps
            .iter()
            .try_fold(value, |value, step| step.apply(value))
    }
}

impl fmt::Debug for TransformChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TransformChain").field(&self.names()).finish()
    }
}
