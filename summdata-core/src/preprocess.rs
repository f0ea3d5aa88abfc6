//! The preprocessing primitive shared by both dataset variants

use crate::error::Result;
use crate::text::{TextValue, Tokenizer, TransformChain};
use serde::{Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

/// Outcome of preprocessing one text unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Processed {
    /// Transform chain output, no tokenizer requested
    Plain(TextValue),
    /// Transform chain output with one token sequence per sentence
    Tokenized(TextValue, Vec<Vec<String>>),
}

impl Processed {
    /// The processed text value
    pub fn text(&self) -> &TextValue {
        match self {
            Processed::Plain(text) | Processed::Tokenized(text, _) => text,
        }
    }

    /// Token sequences, when a tokenizer was applied
    pub fn tokens(&self) -> Option<&[Vec<String>]> {
        match self {
            Processed::Plain(_) => None,
            Processed::Tokenized(_, tokens) => Some(tokens),
        }
    }

    /// Whether the processed text is empty (such examples are filtered out
    /// by the materialized dataset)
    pub fn is_empty(&self) -> bool {
        self.text().is_empty()
    }
}

/// Plain values export as the text value, tokenized values as their tokens
impl Serialize for Processed {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Processed::Plain(text) => text.serialize(serializer),
            Processed::Tokenized(_, tokens) => tokens.serialize(serializer),
        }
    }
}

/// Run `value` through `chain`, then tokenize every resulting sentence.
///
/// Failures from the chain or the tokenizer are returned as is.
pub fn preprocess(
    value: TextValue,
    chain: &TransformChain,
    tokenizer: Option<&dyn Tokenizer>,
) -> Result<Processed> {
    let text = chain.run(value)?;

    match tokenizer {
        None => Ok(Processed::Plain(text)),
        Some(tokenizer) => {
            let tokens = text
                .sentences()
                .into_iter()
                .map(|sentence| tokenizer.tokenize(sentence))
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(Processed::Tokenized(text, tokens))
        }
    }
}

/// A transform chain bundled with an optional tokenizer.
///
/// Cloning is cheap; every worker of the coordinator and every lazy line
/// sequence holds one.
#[derive(Clone, Default)]
pub struct Preprocessor {
    chain: TransformChain,
    tokenizer: Option<Arc<dyn Tokenizer>>,
}

impl Preprocessor {
    /// Create a preprocessor without a tokenizer
    pub fn new(chain: TransformChain) -> Self {
        Self {
            chain,
            tokenizer: None,
        }
    }

    /// Set the tokenizer applied after the chain
    pub fn with_tokenizer(mut self, tokenizer: Option<Arc<dyn Tokenizer>>) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    /// The transform chain
    pub fn chain(&self) -> &TransformChain {
        &self.chain
    }

    /// Whether results will be [`Processed::Tokenized`]
    pub fn tokenizes(&self) -> bool {
        self.tokenizer.is_some()
    }

    /// Preprocess one unit
    pub fn process(&self, unit: impl Into<TextValue>) -> Result<Processed> {
        preprocess(unit.into(), &self.chain, self.tokenizer.as_deref())
    }
}

impl fmt::Debug for Preprocessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Preprocessor")
            .field("chain", &self.chain)
            .field("tokenizer", &self.tokenizer.as_ref().map(|t| t.name()))
            .finish()
    }
}
