use crate::{Chunk, ChunkKind};

use super::model::PhonicsError;
use super::rules::RuleSet;

/// A pattern recognized at one scan position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternMatch<'a> {
    pub text: &'a str,
    pub kind: ChunkKind,
}

/// `a e i o u`; `y` is handled by the syllable divider on its own.
pub(crate) fn is_vowel(b: u8) -> bool {
    matches!(b, b'a' | b'e' | b'i' | b'o' | b'u')
}

pub(crate) fn is_consonant(b: u8) -> bool {
    b.is_ascii_lowercase() && !is_vowel(b)
}

/// First entry of a longest-first table that `rest` starts with.
fn first_prefix_match<'r>(rest: &str, table: &'r [String]) -> Option<&'r str> {
    table
        .iter()
        .map(String::as_str)
        .find(|pattern| rest.starts_with(*pattern))
}

/// Onset clusters only count at index 0 or right after a vowel.
fn is_syllable_initial(bytes: &[u8], index: usize) -> bool {
    index == 0 || is_vowel(bytes[index - 1])
}

/// True when a digraph straddles `pos`, i.e. ending a chunk there would
/// split it.
fn splits_digraph(text: &str, pos: usize, rules: &RuleSet) -> bool {
    rules.digraphs.iter().any(|d| {
        (1..d.len()).any(|k| {
            pos >= k
                && text
                    .get(pos - k..)
                    .is_some_and(|window| window.starts_with(d.as_str()))
        })
    })
}

/// Silent `e` closing a consonant-vowel-consonant-`e` pattern. Returns the
/// length of the `VCe` chunk starting at the vowel.
fn magic_e_len(bytes: &[u8], index: usize) -> Option<usize> {
    if index == 0 || index + 2 >= bytes.len() {
        return None;
    }
    let (before, vowel, consonant, e) = (
        bytes[index - 1],
        bytes[index],
        bytes[index + 1],
        bytes[index + 2],
    );
    let followed_by_vowel = bytes
        .get(index + 3)
        .is_some_and(|&b| is_vowel(b) || b == b'y');
    let qualifies = is_consonant(before)
        && is_vowel(vowel)
        && is_consonant(consonant)
        && !matches!(consonant, b'w' | b'x' | b'y')
        && e == b'e'
        && !followed_by_vowel;
    qualifies.then_some(3)
}

/// Try to consume the highest-priority pattern starting at `index`.
///
/// Tiers, first hit wins: soft c/g, silent letters, digraphs, three- and
/// two-letter onset clusters, r-controlled vowels, magic-e, vowel teams,
/// rimes, then a single character. Returns `None` only when `index` is out
/// of range or not on a character boundary.
pub fn match_at<'a>(text: &'a str, index: usize, rules: &RuleSet) -> Option<PatternMatch<'a>> {
    let rest = text.get(index..)?;
    let first = rest.chars().next()?;
    let bytes = text.as_bytes();
    let hit = move |len: usize, kind: ChunkKind| PatternMatch {
        text: &text[index..index + len],
        kind,
    };

    if let Some(p) = first_prefix_match(rest, &rules.soft_consonants) {
        return Some(hit(p.len(), ChunkKind::SoftConsonant));
    }
    if let Some(p) = first_prefix_match(rest, &rules.silent_letters) {
        return Some(hit(p.len(), ChunkKind::SilentLetters));
    }

    let initial = is_syllable_initial(bytes, index);
    if let Some(digraph) = first_prefix_match(rest, &rules.digraphs) {
        // `thr`, `shr`: the onset cluster extends the digraph
        let extended = initial
            .then(|| {
                rules
                    .onset_triples
                    .iter()
                    .find(|c| c.starts_with(digraph) && rest.starts_with(c.as_str()))
            })
            .flatten();
        return Some(match extended {
            Some(cluster) => hit(cluster.len(), ChunkKind::Cluster),
            None => hit(digraph.len(), ChunkKind::Digraph),
        });
    }

    if initial {
        for table in [&rules.onset_triples, &rules.onset_pairs] {
            let cluster = table.iter().find(|c| {
                rest.starts_with(c.as_str()) && !splits_digraph(text, index + c.len(), rules)
            });
            if let Some(cluster) = cluster {
                return Some(hit(cluster.len(), ChunkKind::Cluster));
            }
        }
    }

    if let Some(p) = first_prefix_match(rest, &rules.r_controlled) {
        return Some(hit(p.len(), ChunkKind::RControlled));
    }
    if let Some(len) = magic_e_len(bytes, index) {
        return Some(hit(len, ChunkKind::MagicE));
    }
    if let Some(p) = first_prefix_match(rest, &rules.vowel_teams) {
        return Some(hit(p.len(), ChunkKind::VowelTeam));
    }
    if let Some(p) = first_prefix_match(rest, &rules.rimes) {
        return Some(hit(p.len(), ChunkKind::Rime));
    }

    Some(hit(first.len_utf8(), ChunkKind::Letter))
}

/// Consume `text` left to right with [`match_at`].
pub fn scan_span(text: &str, rules: &RuleSet) -> Result<Vec<Chunk>, PhonicsError> {
    let mut chunks = Vec::new();
    let mut index = 0;
    while index < text.len() {
        let stalled = || PhonicsError::Stalled {
            text: text.to_string(),
            index,
        };
        let found = match_at(text, index, rules).ok_or_else(stalled)?;
        if found.text.is_empty() {
            return Err(stalled());
        }
        log::trace!("{text:?}@{index}: {:?} ({:?})", found.text, found.kind);
        index += found.text.len();
        chunks.push(Chunk::new(found.text, found.kind));
    }
    Ok(chunks)
}
