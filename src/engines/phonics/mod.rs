//! Natural-phonics segmentation engine.
//!
//! Splits an English word into the chunks a beginning reader sounds out:
//! onset blends, digraphs, vowel teams, r-controlled vowels, magic-e
//! endings and whole short syllables. Irregular sight words come from an
//! exception lexicon instead.
//!
//! # Pipeline
//!
//! ```text
//! word ─► trim + lowercase ─► exception lexicon ──────────────► chunks
//!                               │ (miss)
//!                               ▼
//!                 letter runs ─► prefix/suffix ─► syllables ─► patterns
//! ```
//!
//! Each stage reads its tables from a [`RuleSet`]. The built-in set is
//! version [`DEFAULT_RULES_VERSION`]; a JSON file can replace any table.
//!
//! # Pattern Priority
//!
//! | Tier | Kind | Examples |
//! |---|---|---|
//! | 1 | Soft c/g | `ce`, `gi`, `dge` |
//! | 2 | Silent letters | `kn`, `wr`, `mb` |
//! | 3 | Digraphs | `ch`, `tch`, `ph` |
//! | 4 | Three-letter blends | `str`, `squ`, `thr` |
//! | 5 | Two-letter blends | `fl`, `br`, `st` |
//! | 6 | R-controlled | `ar`, `ear`, `air` |
//! | 7 | Magic-e | `ake`, `one` |
//! | 8 | Vowel teams | `ai`, `ow`, `igh` |
//! | 9 | Rimes | `an`, `in`, `un` |
//! | 10 | Single letter | |
//!
//! # Examples
//!
//! ## Basic Usage
//!
//! ```rust
//! use phonics_rs::{SegmentationEngine, engines::phonics::PhonicsEngine};
//!
//! let engine = PhonicsEngine::new();
//! let result = engine.segment("Teacher", None);
//! assert_eq!(result.word, "teacher");
//! assert_eq!(result.texts(), vec!["t", "ea", "ch", "er"]);
//! ```
//!
//! ## With Custom Rules
//!
//! ```rust,no_run
//! use phonics_rs::{SegmentationEngine, engines::phonics::{PhonicsEngine, PhonicsRuleParams}};
//! use std::path::PathBuf;
//!
//! let mut engine = PhonicsEngine::new();
//! let params = PhonicsRuleParams {
//!     extend_exceptions: true,
//! };
//! engine.load_rules_with_params(&PathBuf::from("rules/classroom.json"), params)?;
//! println!("{}", engine.segment("yacht", None).hyphenated());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod affixes;
pub mod engine;
pub mod exceptions;
pub mod model;
pub mod patterns;
pub mod rules;
pub mod syllables;

pub use engine::{PhonicsEngine, PhonicsRuleParams};
pub use model::{PhonicsError, PhonicsSegmentParams};
pub use rules::{default_rules, load_rules, RuleSet, RuleSetBuilder, DEFAULT_RULES_VERSION};
