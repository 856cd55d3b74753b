//! # phonics-rs
//!
//! A Rust library that splits English words into natural-phonics reading
//! chunks for printable vocabulary flashcards.
//!
//! ## Features
//!
//! - **Phonics engine**: exception lexicon, affix stripping, syllable division
//!   and a priority-ordered pattern matcher
//! - **Replaceable rule tables**: load a JSON rule set or build one in code
//! - **Tagged chunks**: every chunk says which rule produced it, so a renderer
//!   can color blocks by category
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! phonics-rs = "2026.2"
//! ```
//!
//! ```rust
//! use phonics_rs::{engines::phonics::PhonicsEngine, SegmentationEngine};
//!
//! let engine = PhonicsEngine::new();
//! let result = engine.segment("flower", None);
//! assert_eq!(result.texts(), vec!["fl", "ow", "er"]);
//! assert_eq!(result.hyphenated(), "fl-ow-er");
//!
//! assert_eq!(phonics_rs::split_phonics("apple"), vec!["ap", "ple"]);
//! ```

pub mod engines;

use std::path::Path;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use engines::phonics::PhonicsEngine;

/// The rule family that produced a chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChunkKind {
    /// Taken verbatim from the exception lexicon
    Exception,
    Prefix,
    Suffix,
    /// A syllable kept whole (short block or stable final syllable)
    Syllable,
    /// Soft c/g pairs and `dge`
    SoftConsonant,
    /// `kn`, `wr`, `mb`, ...
    SilentLetters,
    Digraph,
    /// Two- or three-letter onset blends
    Cluster,
    RControlled,
    MagicE,
    VowelTeam,
    Rime,
    /// Single-letter fallback
    Letter,
    /// Non-letter text (hyphens, apostrophes, digits) carried through verbatim
    Other,
    /// The whole word, emitted when segmentation degraded
    Word,
}

/// One pronounceable block of a segmented word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    pub text: String,
    pub kind: ChunkKind,
}

impl Chunk {
    pub fn new(text: impl Into<String>, kind: ChunkKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }
}

/// The result of a segmentation operation.
///
/// Concatenating the chunk texts in order gives back `word`, the trimmed and
/// lowercased input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentationResult {
    /// Normalized input word
    pub word: String,
    /// Ordered chunks covering `word`
    pub chunks: Vec<Chunk>,
}

impl SegmentationResult {
    /// Chunk texts in order.
    pub fn texts(&self) -> Vec<&str> {
        self.chunks.iter().map(|c| c.text.as_str()).collect()
    }

    /// Consume the result, keeping only the chunk texts.
    pub fn into_strings(self) -> Vec<String> {
        self.chunks.into_iter().map(|c| c.text).collect()
    }

    /// Hyphen-joined chunks, e.g. `"fl-ow-er"`.
    pub fn hyphenated(&self) -> String {
        self.texts().join("-")
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Write the result as pretty-printed JSON.
    pub fn write_json(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// Common interface for word segmentation engines.
///
/// Each engine may have different parameter types for rule loading and for
/// individual segmentation calls.
pub trait SegmentationEngine {
    /// Parameters for configuring a single segmentation call
    type SegmentationParams;
    /// Parameters for configuring rule loading
    type RuleParams: Default;

    /// Load rule tables from the specified path using default parameters.
    fn load_rules(&mut self, rules_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        self.load_rules_with_params(rules_path, Self::RuleParams::default())
    }

    /// Load rule tables from the specified path with custom parameters.
    fn load_rules_with_params(
        &mut self,
        rules_path: &Path,
        params: Self::RuleParams,
    ) -> Result<(), Box<dyn std::error::Error>>;

    /// Drop any loaded rule tables and go back to the built-in defaults.
    fn reset_rules(&mut self);

    /// Segment one word. Never fails: empty input yields an empty result.
    fn segment(&self, word: &str, params: Option<Self::SegmentationParams>)
        -> SegmentationResult;

    /// Segment several words with the same parameters.
    ///
    /// Default implementation calls `segment()` once per word.
    fn segment_batch(
        &self,
        words: &[&str],
        params: Option<Self::SegmentationParams>,
    ) -> Vec<SegmentationResult>
    where
        Self::SegmentationParams: Clone,
    {
        words
            .iter()
            .map(|word| self.segment(word, params.clone()))
            .collect()
    }
}

fn default_engine() -> &'static PhonicsEngine {
    static ENGINE: OnceLock<PhonicsEngine> = OnceLock::new();
    ENGINE.get_or_init(PhonicsEngine::new)
}

/// Split a word into phonics chunks with the built-in rule set.
///
/// Returns an empty list for empty or whitespace-only input.
pub fn split_phonics(word: &str) -> Vec<String> {
    default_engine().segment(word, None).into_strings()
}
