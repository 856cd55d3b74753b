use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use super::model::PhonicsError;

/// Version tag of the built-in rule tables.
pub const DEFAULT_RULES_VERSION: &str = "3.2";

/// Every table the segmentation pipeline consults.
///
/// Pattern tables are ordered longest-first; within one length, table order
/// decides. [`RuleSet::validated`] restores that ordering for tables loaded
/// from JSON or built by hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder)]
#[builder(default, setter(into))]
#[serde(default)]
pub struct RuleSet {
    pub version: String,
    /// Whole word -> predefined chunks
    pub exceptions: BTreeMap<String, Vec<String>>,
    pub prefixes: Vec<String>,
    pub suffixes: Vec<String>,
    /// Soft c/g pairs and `dge`
    pub soft_consonants: Vec<String>,
    pub silent_letters: Vec<String>,
    pub digraphs: Vec<String>,
    /// Three-letter onset clusters (`str`, `squ`, ...)
    pub onset_triples: Vec<String>,
    /// Two-letter onset clusters: s-, r- and l-blends
    pub onset_pairs: Vec<String>,
    pub r_controlled: Vec<String>,
    pub vowel_teams: Vec<String>,
    /// Word-family endings
    pub rimes: Vec<String>,
    /// Final syllables always kept whole
    pub stable_syllables: Vec<String>,
}

impl Default for RuleSet {
    fn default() -> Self {
        default_rules()
    }
}

impl RuleSet {
    /// Normalize and check every table.
    ///
    /// Patterns are trimmed, lowercased, de-duplicated and sorted
    /// longest-first. Pattern tables accept ASCII letters only. Exception
    /// chunks must spell their word exactly.
    pub fn validated(mut self) -> Result<Self, PhonicsError> {
        for (table, patterns) in self.pattern_tables_mut() {
            normalize_table(table, patterns)?;
        }

        let mut exceptions = BTreeMap::new();
        for (word, chunks) in std::mem::take(&mut self.exceptions) {
            let word = word.trim().to_lowercase();
            let chunks: Vec<String> = chunks.iter().map(|c| c.trim().to_lowercase()).collect();
            if word.is_empty() || chunks.is_empty() || chunks.iter().any(|c| c.is_empty()) {
                return Err(rules_error(
                    "exceptions",
                    format!("entry {word:?} has an empty word or chunk"),
                ));
            }
            if chunks.concat() != word {
                return Err(rules_error(
                    "exceptions",
                    format!("chunks {chunks:?} do not spell {word:?}"),
                ));
            }
            exceptions.insert(word, chunks);
        }
        self.exceptions = exceptions;
        Ok(self)
    }

    /// Pretty-printed JSON form, loadable with [`load_rules`].
    pub fn to_json(&self) -> Result<String, PhonicsError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| PhonicsError::Config(format!("Failed to serialize rules: {e}")))
    }

    fn pattern_tables_mut(&mut self) -> [(&'static str, &mut Vec<String>); 11] {
        [
            ("prefixes", &mut self.prefixes),
            ("suffixes", &mut self.suffixes),
            ("soft_consonants", &mut self.soft_consonants),
            ("silent_letters", &mut self.silent_letters),
            ("digraphs", &mut self.digraphs),
            ("onset_triples", &mut self.onset_triples),
            ("onset_pairs", &mut self.onset_pairs),
            ("r_controlled", &mut self.r_controlled),
            ("vowel_teams", &mut self.vowel_teams),
            ("rimes", &mut self.rimes),
            ("stable_syllables", &mut self.stable_syllables),
        ]
    }
}

impl RuleSetBuilder {
    /// Build the rule set and run [`RuleSet::validated`] on it.
    pub fn build_validated(&self) -> Result<RuleSet, PhonicsError> {
        self.build()?.validated()
    }
}

fn rules_error(table: &str, reason: String) -> PhonicsError {
    PhonicsError::Rules {
        table: table.to_string(),
        reason,
    }
}

fn normalize_table(table: &str, patterns: &mut Vec<String>) -> Result<(), PhonicsError> {
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(patterns.len());
    for raw in patterns.drain(..) {
        let pattern = raw.trim().to_ascii_lowercase();
        if pattern.is_empty() {
            return Err(rules_error(table, "empty pattern".to_string()));
        }
        if !pattern.bytes().all(|b| b.is_ascii_lowercase()) {
            return Err(rules_error(
                table,
                format!("pattern {raw:?} must contain ASCII letters only"),
            ));
        }
        if seen.insert(pattern.clone()) {
            out.push(pattern);
        }
    }
    // Stable: equal lengths keep table order.
    out.sort_by(|a, b| b.len().cmp(&a.len()));
    *patterns = out;
    Ok(())
}

/// Load a rule set from a JSON file.
///
/// Keys missing from the file fall back to the built-in tables, so a file
/// holding only `{"exceptions": {...}}` replaces just the lexicon.
pub fn load_rules(rules_path: &Path) -> Result<RuleSet, PhonicsError> {
    let content = std::fs::read_to_string(rules_path)?;
    parse_rules(&content)
}

/// Parse and validate a JSON rule set.
pub fn parse_rules(json: &str) -> Result<RuleSet, PhonicsError> {
    let rules: RuleSet = serde_json::from_str(json)
        .map_err(|e| PhonicsError::Config(format!("Failed to parse JSON: {e}")))?;
    rules.validated()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

/// Built-in rule tables.
///
/// Already in canonical order, so [`RuleSet::validated`] leaves them
/// unchanged.
pub fn default_rules() -> RuleSet {
    let exceptions: &[(&str, &[&str])] = &[
        ("said", &["s", "ai", "d"]),
        ("have", &["h", "a", "ve"]),
        ("one", &["one"]),
        ("two", &["two"]),
        ("done", &["done"]),
        ("gone", &["g", "o", "ne"]),
        ("some", &["s", "o", "me"]),
        ("come", &["c", "o", "me"]),
        ("love", &["l", "o", "ve"]),
        ("give", &["g", "i", "ve"]),
        ("live", &["l", "i", "ve"]),
        ("move", &["m", "o", "ve"]),
        ("lose", &["l", "o", "se"]),
        ("above", &["a", "b", "o", "ve"]),
        ("what", &["wh", "a", "t"]),
        ("who", &["wh", "o"]),
        ("where", &["wh", "ere"]),
        ("when", &["wh", "e", "n"]),
        ("why", &["wh", "y"]),
        ("which", &["wh", "i", "ch"]),
        ("whose", &["wh", "o", "se"]),
        ("how", &["h", "ow"]),
        ("are", &["are"]),
        ("were", &["w", "ere"]),
        ("was", &["w", "a", "s"]),
        ("does", &["d", "oe", "s"]),
        ("friend", &["fr", "ie", "n", "d"]),
        ("again", &["a", "g", "ai", "n"]),
        ("any", &["a", "n", "y"]),
        ("many", &["m", "a", "n", "y"]),
        ("been", &["b", "ee", "n"]),
        ("eye", &["eye"]),
        ("sugar", &["s", "u", "g", "ar"]),
    ];

    RuleSet {
        version: DEFAULT_RULES_VERSION.to_string(),
        exceptions: exceptions
            .iter()
            .map(|(word, chunks)| ((*word).to_string(), strings(chunks)))
            .collect(),
        prefixes: strings(&[
            "inter", "under", "trans", "over", "fore", "anti", "auto", "dis", "mis", "pre",
            "sub", "non", "tri", "con", "un", "re", "ex", "in", "im", "ir", "il", "en", "em",
            "de", "bi", "co",
        ]),
        suffixes: strings(&[
            "less", "able", "ible", "ment", "ness", "tion", "sion", "ship", "hood", "ance",
            "ence", "ward", "wise", "ing", "ify", "ize", "est", "ful", "ous", "ive", "ity",
            "dom", "age", "ist", "ed", "en", "er", "al", "ic", "ty", "or", "ly", "y",
        ]),
        soft_consonants: strings(&["dge", "ge", "gi", "gy", "ce", "ci", "cy"]),
        silent_letters: strings(&["kn", "wr", "mb", "gn", "tw"]),
        digraphs: strings(&["tch", "ch", "sh", "th", "wh", "ph", "gh", "ck"]),
        onset_triples: strings(&["squ", "scr", "spl", "spr", "str", "thr", "shr", "sch"]),
        onset_pairs: strings(&[
            "sc", "sk", "st", "sp", "sm", "sn", "sl", "sw", "br", "cr", "dr", "fr", "gr", "pr",
            "tr", "bl", "cl", "fl", "gl", "pl",
        ]),
        r_controlled: strings(&[
            "air", "are", "ear", "eer", "ere", "ire", "ore", "oar", "ar", "or", "ir", "ur",
            "er",
        ]),
        vowel_teams: strings(&[
            "igh", "ai", "ay", "au", "aw", "ee", "ea", "ey", "ei", "ie", "oa", "oo", "ou", "ow",
            "oe", "oi", "oy", "ue", "ui", "ew", "al",
        ]),
        rimes: strings(&["an", "en", "in", "on", "un"]),
        stable_syllables: strings(&[
            "tion", "sion", "ture", "ble", "cle", "dle", "fle", "gle", "kle", "ple", "tle",
            "zle",
        ]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rules_are_canonical() {
        let rules = default_rules();
        assert_eq!(rules.clone().validated().unwrap(), rules);
    }

    #[test]
    fn validation_sorts_longest_first_and_dedups() {
        let rules = RuleSetBuilder::default()
            .prefixes(strings(&["un", "Inter", "re", "un", " dis "]))
            .build_validated()
            .unwrap();
        assert_eq!(rules.prefixes, strings(&["inter", "dis", "un", "re"]));
    }

    #[test]
    fn validation_rejects_non_letter_patterns() {
        let err = RuleSetBuilder::default()
            .digraphs(strings(&["ch", "s-h"]))
            .build_validated()
            .unwrap_err();
        assert!(matches!(err, PhonicsError::Rules { ref table, .. } if table == "digraphs"));
    }

    #[test]
    fn validation_rejects_empty_pattern() {
        let err = RuleSetBuilder::default()
            .rimes(strings(&["an", "  "]))
            .build_validated()
            .unwrap_err();
        assert!(matches!(err, PhonicsError::Rules { ref table, .. } if table == "rimes"));
    }

    #[test]
    fn validation_rejects_exception_that_does_not_spell_word() {
        let mut exceptions = BTreeMap::new();
        exceptions.insert("said".to_string(), strings(&["s", "ay", "d"]));
        let err = RuleSetBuilder::default()
            .exceptions(exceptions)
            .build_validated()
            .unwrap_err();
        assert!(matches!(err, PhonicsError::Rules { ref table, .. } if table == "exceptions"));
    }

    #[test]
    fn partial_json_falls_back_to_default_tables() {
        let rules = parse_rules(r#"{"exceptions": {"Yacht": ["y", "a", "ch", "t"]}}"#).unwrap();
        assert_eq!(rules.exceptions.len(), 1);
        assert_eq!(rules.exceptions["yacht"], strings(&["y", "a", "ch", "t"]));
        assert_eq!(rules.digraphs, default_rules().digraphs);
        assert_eq!(rules.version, DEFAULT_RULES_VERSION);
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let err = parse_rules("{ not json").unwrap_err();
        assert!(matches!(err, PhonicsError::Config(_)));
    }

    #[test]
    fn dumped_rules_load_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.json");
        std::fs::write(&path, default_rules().to_json().unwrap()).unwrap();
        assert_eq!(load_rules(&path).unwrap(), default_rules());
    }

    #[test]
    fn missing_rules_file_is_io_error() {
        let err = load_rules(Path::new("/nonexistent/phonics-rules.json")).unwrap_err();
        assert!(matches!(err, PhonicsError::Io(_)));
    }
}
