//! Property-based tests for segmentation.
//!
//! 1. **Round-trip**: chunks concatenate to the trimmed, lowercased input
//! 2. **Non-emptiness**: a non-empty word gives at least one chunk, and no
//!    chunk is empty
//! 3. **Determinism**: the same word always gives the same chunks
//! 4. **Case insensitivity**: upper- and lowercase spellings agree
//! 5. **Digraph atomicity**: no chunk boundary falls inside `ch`, `sh`, `th`
//!    or `ph`
//! 6. **Long words**: very long letter runs still round-trip

use phonics_rs::{engines::phonics::PhonicsEngine, split_phonics, SegmentationEngine};
use proptest::prelude::*;

fn arb_word() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z]{1,12}").unwrap()
}

fn arb_digraph_word() -> impl Strategy<Value = String> {
    prop::string::string_regex("[chsptaeiouyrlk]{1,6}").unwrap()
}

fn arb_long_word() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z]{500,5000}").unwrap()
}

/// Byte offsets where one chunk ends and the next begins.
fn inner_boundaries(chunks: &[String]) -> Vec<usize> {
    chunks
        .iter()
        .take(chunks.len().saturating_sub(1))
        .scan(0, |offset, chunk| {
            *offset += chunk.len();
            Some(*offset)
        })
        .collect()
}

fn arb_unicode_string() -> impl Strategy<Value = String> {
    prop::collection::vec(any::<char>(), 0..16).prop_map(|chars| chars.into_iter().collect())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn chunks_rebuild_the_word(word in "[a-zA-Z]{1,12}") {
        let chunks = split_phonics(&word);
        prop_assert_eq!(chunks.concat(), word.to_lowercase());
    }

    #[test]
    fn chunks_are_never_empty(word in arb_word()) {
        let chunks = split_phonics(&word);
        prop_assert!(!chunks.is_empty());
        prop_assert!(chunks.iter().all(|c| !c.is_empty()), "empty chunk in {:?}", chunks);
    }

    #[test]
    fn segmentation_is_deterministic(word in arb_word()) {
        let engine = PhonicsEngine::new();
        prop_assert_eq!(engine.segment(&word, None), engine.segment(&word, None));
        prop_assert_eq!(split_phonics(&word), engine.split_phonics(&word));
    }

    #[test]
    fn case_does_not_matter(word in arb_word()) {
        prop_assert_eq!(split_phonics(&word.to_uppercase()), split_phonics(&word));
    }

    #[test]
    fn arbitrary_text_round_trips(text in arb_unicode_string()) {
        let result = PhonicsEngine::new().segment(&text, None);
        prop_assert_eq!(result.texts().concat(), text.trim().to_lowercase());
        prop_assert!(result.chunks.iter().all(|c| !c.text.is_empty()));
    }

    #[test]
    fn digraphs_are_never_split(word in arb_digraph_word()) {
        let chunks = split_phonics(&word);
        for offset in inner_boundaries(&chunks) {
            for digraph in ["ch", "sh", "th", "ph"] {
                prop_assert!(
                    !word[offset - 1..].starts_with(digraph),
                    "{:?} split inside {:?}: {:?}", word, digraph, chunks
                );
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn long_words_round_trip(word in arb_long_word()) {
        let chunks = split_phonics(&word);
        prop_assert_eq!(chunks.concat(), word);
    }
}
