use std::path::{Path, PathBuf};

use crate::{Chunk, ChunkKind, SegmentationEngine, SegmentationResult};

use super::model::{PhonicsError, PhonicsModel, PhonicsSegmentParams};
use super::rules::{default_rules, RuleSet};

/// Parameters for configuring rule loading.
#[derive(Debug, Clone, Default)]
pub struct PhonicsRuleParams {
    /// Merge the file's exception words into the built-in lexicon instead of
    /// replacing it. Entries from the file win on conflict.
    pub extend_exceptions: bool,
}

/// Natural-phonics segmentation engine.
///
/// Starts out with the built-in rule set; [`SegmentationEngine::load_rules`]
/// swaps in tables from a JSON file. Segmentation only needs `&self`, so one
/// engine can be shared across threads.
///
/// # Quick Start
///
/// ```rust
/// use phonics_rs::{SegmentationEngine, engines::phonics::PhonicsEngine};
///
/// let engine = PhonicsEngine::new();
/// assert_eq!(engine.segment("phone", None).hyphenated(), "ph-one");
/// assert_eq!(engine.split_phonics("said"), vec!["s", "ai", "d"]);
/// ```
pub struct PhonicsEngine {
    model: PhonicsModel,
    rules_path: Option<PathBuf>,
}

impl Default for PhonicsEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl PhonicsEngine {
    /// Create a new engine with the built-in rules.
    pub fn new() -> Self {
        Self {
            model: PhonicsModel::default(),
            rules_path: None,
        }
    }

    /// Create an engine around a rule set built in code.
    pub fn with_rules(rules: RuleSet) -> Result<Self, PhonicsError> {
        Ok(Self {
            model: PhonicsModel::new(rules)?,
            rules_path: None,
        })
    }

    pub fn rules(&self) -> &RuleSet {
        self.model.rules()
    }

    /// File the current rules came from, if any.
    pub fn rules_path(&self) -> Option<&Path> {
        self.rules_path.as_deref()
    }

    /// Chunk texts only, with default parameters.
    pub fn split_phonics(&self, word: &str) -> Vec<String> {
        self.segment(word, None).into_strings()
    }
}

impl SegmentationEngine for PhonicsEngine {
    type SegmentationParams = PhonicsSegmentParams;
    type RuleParams = PhonicsRuleParams;

    fn load_rules_with_params(
        &mut self,
        rules_path: &Path,
        params: Self::RuleParams,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut rules = super::rules::load_rules(rules_path)?;
        if params.extend_exceptions {
            let mut merged = default_rules().exceptions;
            merged.append(&mut rules.exceptions);
            rules.exceptions = merged;
        }

        let model = PhonicsModel::new(rules)?;
        log::info!(
            "Loaded phonics rules v{} from {} ({} exception words)",
            model.rules().version,
            rules_path.display(),
            model.rules().exceptions.len()
        );
        self.model = model;
        self.rules_path = Some(rules_path.to_path_buf());
        Ok(())
    }

    fn reset_rules(&mut self) {
        self.model = PhonicsModel::default();
        self.rules_path = None;
    }

    fn segment(&self, word: &str, params: Option<Self::SegmentationParams>) -> SegmentationResult {
        let normalized = word.trim().to_lowercase();
        if normalized.is_empty() {
            return SegmentationResult {
                word: normalized,
                chunks: Vec::new(),
            };
        }

        let p = params.unwrap_or_default();
        let chunks = match self.model.segment_word(&normalized, &p) {
            Ok(chunks) => chunks,
            Err(e) => {
                log::warn!("Segmentation of {normalized:?} failed, keeping it whole: {e}");
                vec![Chunk::new(normalized.as_str(), ChunkKind::Word)]
            }
        };

        SegmentationResult {
            word: normalized,
            chunks,
        }
    }
}
