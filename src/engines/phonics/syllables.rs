//! Syllable division of an affix-free stem.
//!
//! Order of rules: short single-vowel block, consonant+`le` ending, vowel
//! nucleus counting, then the first VCCV or VCV boundary. Every rule either
//! splits a span into two non-empty parts or keeps it whole, so division
//! always terminates and always covers the stem exactly. Pending spans live
//! on a heap work stack, so stem length never grows the call stack.

use std::ops::Range;

use super::patterns::{is_consonant, is_vowel};
use super::rules::RuleSet;

/// Split `stem` into contiguous syllable spans.
///
/// Stems that are not plain ASCII lowercase are returned unsplit.
pub fn divide_syllables<'a>(stem: &'a str, rules: &RuleSet) -> Vec<&'a str> {
    if stem.is_empty() {
        return Vec::new();
    }
    if !stem.bytes().all(|b| b.is_ascii_lowercase()) {
        return vec![stem];
    }
    divide_stem(stem, rules)
}

/// Whether a syllable span is printed as one block without pattern scanning.
pub fn is_atomic_syllable(span: &str, rules: &RuleSet) -> bool {
    rules.stable_syllables.iter().any(|s| s == span)
        || (span.len() == 3 && is_consonant_le(span.as_bytes()))
        || is_short_block(span, rules)
}

/// At most three letters, exactly one of them `aeiou`, and no multi-letter
/// pattern inside (`cat`, `ap`, but not `fly` or `car`).
pub fn is_short_block(span: &str, rules: &RuleSet) -> bool {
    span.len() <= 3
        && span.bytes().filter(|&b| is_vowel(b)).count() == 1
        && !contains_multi_letter_pattern(span, rules)
}

fn contains_multi_letter_pattern(span: &str, rules: &RuleSet) -> bool {
    [
        &rules.soft_consonants,
        &rules.silent_letters,
        &rules.digraphs,
        &rules.onset_triples,
        &rules.onset_pairs,
        &rules.r_controlled,
        &rules.vowel_teams,
    ]
    .into_iter()
    .flatten()
    .any(|p| p.len() >= 2 && span.contains(p.as_str()))
}

fn is_consonant_le(bytes: &[u8]) -> bool {
    let n = bytes.len();
    n >= 3 && bytes.ends_with(b"le") && is_consonant(bytes[n - 3]) && bytes[n - 3] != b'y'
}

enum Task {
    Divide { range: Range<usize>, ends_stem: bool },
    Emit(Range<usize>),
}

fn divide_stem<'a>(stem: &'a str, rules: &RuleSet) -> Vec<&'a str> {
    let mut out = Vec::new();
    let mut tasks = vec![Task::Divide {
        range: 0..stem.len(),
        ends_stem: true,
    }];

    // Right part pushed first so the left part is finished before it.
    while let Some(task) = tasks.pop() {
        let (range, ends_stem) = match task {
            Task::Emit(range) => {
                out.push(&stem[range]);
                continue;
            }
            Task::Divide { range, ends_stem } => (range, ends_stem),
        };
        let span = &stem[range.clone()];

        if span.len() <= 3 && is_short_block(span, rules) {
            out.push(span);
            continue;
        }

        if let Some(at) = consonant_le_split(span, rules) {
            let mid = range.start + at;
            tasks.push(Task::Emit(mid..range.end));
            tasks.push(Task::Divide {
                range: range.start..mid,
                ends_stem: false,
            });
            continue;
        }

        match first_boundary(span, ends_stem, rules) {
            Some(at) => {
                log::trace!("Syllable boundary at byte {}", range.start + at);
                let mid = range.start + at;
                tasks.push(Task::Divide {
                    range: mid..range.end,
                    ends_stem,
                });
                tasks.push(Task::Divide {
                    range: range.start..mid,
                    ends_stem: false,
                });
            }
            None => out.push(span),
        }
    }
    out
}

/// `ap|ple`, `lit|tle`; a digraph before `le` stays whole (`pick|le`).
fn consonant_le_split(span: &str, rules: &RuleSet) -> Option<usize> {
    let n = span.len();
    if n <= 3 || !is_consonant_le(span.as_bytes()) {
        return None;
    }
    let closes_digraph = rules
        .digraphs
        .iter()
        .any(|d| d.len() == 2 && span.get(n - 4..n - 2) == Some(d.as_str()));
    Some(if closes_digraph { n - 2 } else { n - 3 })
}

/// Vowel nuclei of a span, produced left to right on demand.
///
/// `y` counts as a vowel except at the start. A vowel team (other than the
/// `l`/`r` ones) plus any vowels right after it form one nucleus, so the `w`
/// of `ow` is never a dividing consonant. A final `e` after a consonant is
/// silent when it closes the stem.
struct Nuclei<'s, 'r> {
    span: &'s str,
    ends_stem: bool,
    rules: &'r RuleSet,
    pos: usize,
    seen_any: bool,
}

impl<'s, 'r> Nuclei<'s, 'r> {
    fn new(span: &'s str, ends_stem: bool, rules: &'r RuleSet) -> Self {
        Self {
            span,
            ends_stem,
            rules,
            pos: 0,
            seen_any: false,
        }
    }
}

impl Iterator for Nuclei<'_, '_> {
    type Item = Range<usize>;

    fn next(&mut self) -> Option<Range<usize>> {
        let bytes = self.span.as_bytes();
        let n = bytes.len();

        while self.pos < n {
            let i = self.pos;
            let b = bytes[i];
            if !(is_vowel(b) || (b == b'y' && i > 0)) {
                self.pos += 1;
                continue;
            }
            let silent_e = self.ends_stem
                && i == n - 1
                && b == b'e'
                && self.seen_any
                && is_consonant(bytes[i - 1]);
            if silent_e {
                self.pos = n;
                return None;
            }

            let team_len = self
                .rules
                .vowel_teams
                .iter()
                .filter(|t| !t.bytes().any(|c| c == b'l' || c == b'r'))
                .find(|t| self.span[i..].starts_with(t.as_str()))
                .map_or(1, String::len);
            let mut end = i + team_len;
            while end < n && is_vowel(bytes[end]) {
                end += 1;
            }
            self.pos = end;
            self.seen_any = true;
            return Some(i..end);
        }
        None
    }
}

/// Scan nuclei only as far as the first pair with a dividing boundary.
/// Fewer than two nuclei means no boundary.
fn first_boundary(span: &str, ends_stem: bool, rules: &RuleSet) -> Option<usize> {
    let mut nuclei = Nuclei::new(span, ends_stem, rules);
    let mut left = nuclei.next()?;
    for right in nuclei {
        if let Some(at) = boundary_between(span, &left, &right, rules) {
            return Some(at);
        }
        left = right;
    }
    None
}

/// VCV splits before the consonant, VCCV between the two. A two-letter
/// digraph counts as one consonant; `ck` closes the first syllable instead.
fn boundary_between(
    span: &str,
    left: &Range<usize>,
    right: &Range<usize>,
    rules: &RuleSet,
) -> Option<usize> {
    match right.start - left.end {
        1 => Some(left.end),
        2 => {
            let pair = &span[left.end..right.start];
            if !rules.digraphs.iter().any(|d| d == pair) {
                Some(left.end + 1)
            } else if pair == "ck" {
                Some(right.start)
            } else {
                Some(left.end)
            }
        }
        _ => None,
    }
}
