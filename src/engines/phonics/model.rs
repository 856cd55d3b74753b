use crate::{Chunk, ChunkKind};

use super::affixes::{strip_prefix, strip_suffix};
use super::exceptions::lookup_exception;
use super::patterns::scan_span;
use super::rules::{default_rules, RuleSet, RuleSetBuilderError};
use super::syllables::{divide_syllables, is_atomic_syllable};

#[derive(thiserror::Error, Debug)]
pub enum PhonicsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid rules file: {0}")]
    Config(String),
    #[error("Invalid rule table '{table}': {reason}")]
    Rules { table: String, reason: String },
    #[error("Rule set builder error: {0}")]
    Builder(#[from] RuleSetBuilderError),
    #[error("Pattern scan made no progress at byte {index} of {text:?}")]
    Stalled { text: String, index: usize },
    #[error("Chunks {chunks:?} do not reconstruct {word:?}")]
    RoundTrip { word: String, chunks: Vec<String> },
}

/// Which pipeline stages run for one call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhonicsSegmentParams {
    /// Consult the exception lexicon before any rule.
    pub use_exceptions: bool,
    /// Strip one prefix and one suffix before dividing the stem.
    pub strip_affixes: bool,
    /// Keep short blocks and stable final syllables whole instead of
    /// scanning them letter by letter.
    pub keep_atomic_syllables: bool,
}

impl Default for PhonicsSegmentParams {
    fn default() -> Self {
        Self {
            use_exceptions: true,
            strip_affixes: true,
            keep_atomic_syllables: true,
        }
    }
}

/// Internal segmentation state: a validated rule set.
pub struct PhonicsModel {
    rules: RuleSet,
}

impl Default for PhonicsModel {
    fn default() -> Self {
        Self {
            rules: default_rules(),
        }
    }
}

impl PhonicsModel {
    /// Validate `rules` and build a model around them.
    pub fn new(rules: RuleSet) -> Result<Self, PhonicsError> {
        Ok(Self {
            rules: rules.validated()?,
        })
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Segment a trimmed, lowercased word.
    ///
    /// Letter runs are segmented independently; anything else (hyphens,
    /// apostrophes, digits, non-ASCII text) passes through as `Other` chunks.
    pub fn segment_word(
        &self,
        word: &str,
        params: &PhonicsSegmentParams,
    ) -> Result<Vec<Chunk>, PhonicsError> {
        if params.use_exceptions {
            if let Some(chunks) = self.exception_chunks(word) {
                return Ok(chunks);
            }
        }

        let mut chunks = Vec::new();
        for run in letter_runs(word) {
            match run {
                Run::Letters(letters) => chunks.extend(self.segment_letters(letters, params)?),
                Run::Other(text) => chunks.push(Chunk::new(text, ChunkKind::Other)),
            }
        }

        let rebuilt: String = chunks.iter().map(|c| c.text.as_str()).collect();
        if rebuilt != word || chunks.iter().any(|c| c.text.is_empty()) {
            return Err(PhonicsError::RoundTrip {
                word: word.to_string(),
                chunks: chunks.into_iter().map(|c| c.text).collect(),
            });
        }
        Ok(chunks)
    }

    fn exception_chunks(&self, word: &str) -> Option<Vec<Chunk>> {
        let chunks = lookup_exception(word, &self.rules)?;
        log::debug!("Exception word {word:?}: {chunks:?}");
        Some(
            chunks
                .iter()
                .map(|c| Chunk::new(c.as_str(), ChunkKind::Exception))
                .collect(),
        )
    }

    fn segment_letters(
        &self,
        letters: &str,
        params: &PhonicsSegmentParams,
    ) -> Result<Vec<Chunk>, PhonicsError> {
        if params.use_exceptions {
            if let Some(chunks) = self.exception_chunks(letters) {
                return Ok(chunks);
            }
        }

        let (prefix, rest) = if params.strip_affixes {
            strip_prefix(letters, &self.rules)
        } else {
            (None, letters)
        };
        let (stem, suffix) = if params.strip_affixes {
            strip_suffix(rest, &self.rules)
        } else {
            (rest, None)
        };
        if prefix.is_some() || suffix.is_some() {
            log::debug!("Affixes of {letters:?}: prefix={prefix:?} stem={stem:?} suffix={suffix:?}");
        }

        let syllables = divide_syllables(stem, &self.rules);
        log::debug!("Syllables of {stem:?}: {syllables:?}");

        let mut chunks = Vec::new();
        if let Some(prefix) = prefix {
            chunks.push(Chunk::new(prefix, ChunkKind::Prefix));
        }
        for syllable in syllables {
            if params.keep_atomic_syllables && is_atomic_syllable(syllable, &self.rules) {
                chunks.push(Chunk::new(syllable, ChunkKind::Syllable));
            } else {
                chunks.extend(scan_span(syllable, &self.rules)?);
            }
        }
        if let Some(suffix) = suffix {
            chunks.push(Chunk::new(suffix, ChunkKind::Suffix));
        }
        Ok(chunks)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Run<'a> {
    Letters(&'a str),
    Other(&'a str),
}

/// Split text into maximal runs of ASCII lowercase letters and of anything
/// else.
fn letter_runs(text: &str) -> Vec<Run<'_>> {
    let mut runs = Vec::new();
    let mut start = 0;
    let mut in_letters = None;

    for (idx, ch) in text.char_indices() {
        let is_letter = ch.is_ascii_lowercase();
        match in_letters {
            Some(prev) if prev != is_letter => {
                runs.push(make_run(&text[start..idx], prev));
                start = idx;
            }
            _ => {}
        }
        in_letters = Some(is_letter);
    }
    if let Some(last) = in_letters {
        runs.push(make_run(&text[start..], last));
    }
    runs
}

fn make_run(text: &str, letters: bool) -> Run<'_> {
    if letters {
        Run::Letters(text)
    } else {
        Run::Other(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(chunks: &[Chunk]) -> Vec<&str> {
        chunks.iter().map(|c| c.text.as_str()).collect()
    }

    fn segment(word: &str) -> Vec<Chunk> {
        PhonicsModel::default()
            .segment_word(word, &PhonicsSegmentParams::default())
            .unwrap()
    }

    #[test]
    fn splits_letter_and_other_runs() {
        assert_eq!(
            letter_runs("ice-cream"),
            vec![
                Run::Letters("ice"),
                Run::Other("-"),
                Run::Letters("cream"),
            ]
        );
        assert_eq!(
            letter_runs("don't"),
            vec![Run::Letters("don"), Run::Other("'"), Run::Letters("t")]
        );
        assert!(letter_runs("").is_empty());
    }

    #[test]
    fn non_letter_runs_pass_through() {
        let chunks = segment("one-way");
        assert_eq!(chunks[0], Chunk::new("one", ChunkKind::Exception));
        assert_eq!(chunks[1], Chunk::new("-", ChunkKind::Other));
        let rebuilt: String = texts(&chunks).concat();
        assert_eq!(rebuilt, "one-way");
    }

    #[test]
    fn non_ascii_text_passes_through() {
        let chunks = segment("café");
        assert_eq!(chunks.last(), Some(&Chunk::new("é", ChunkKind::Other)));
        assert_eq!(texts(&chunks).concat(), "café");
    }

    #[test]
    fn tags_prefix_and_suffix_chunks() {
        let chunks = segment("teacher");
        assert_eq!(texts(&chunks), vec!["t", "ea", "ch", "er"]);
        assert_eq!(chunks[2].kind, ChunkKind::Digraph);
        assert_eq!(chunks[3].kind, ChunkKind::Suffix);

        let chunks = segment("replay");
        assert_eq!(texts(&chunks), vec!["re", "pl", "ay"]);
        assert_eq!(chunks[0].kind, ChunkKind::Prefix);
        assert_eq!(chunks[1].kind, ChunkKind::Cluster);
        assert_eq!(chunks[2].kind, ChunkKind::VowelTeam);
    }

    #[test]
    fn stages_can_be_switched_off() {
        let model = PhonicsModel::default();
        let no_exceptions = PhonicsSegmentParams {
            use_exceptions: false,
            ..Default::default()
        };
        let chunks = model.segment_word("said", &no_exceptions).unwrap();
        assert!(chunks.iter().all(|c| c.kind != ChunkKind::Exception));
        assert_eq!(texts(&chunks).concat(), "said");

        let no_affixes = PhonicsSegmentParams {
            strip_affixes: false,
            ..Default::default()
        };
        let chunks = model.segment_word("teacher", &no_affixes).unwrap();
        assert!(chunks.iter().all(|c| c.kind != ChunkKind::Suffix));
        assert_eq!(texts(&chunks).concat(), "teacher");

        let scan_everything = PhonicsSegmentParams {
            keep_atomic_syllables: false,
            ..Default::default()
        };
        let chunks = model.segment_word("cat", &scan_everything).unwrap();
        assert_eq!(texts(&chunks), vec!["c", "a", "t"]);
    }

    #[test]
    fn custom_rules_are_validated() {
        let mut rules = default_rules();
        rules.rimes.push(String::new());
        assert!(matches!(
            PhonicsModel::new(rules),
            Err(PhonicsError::Rules { .. })
        ));
    }
}
