use super::patterns::is_vowel;
use super::rules::RuleSet;

/// Shortest stem an affix may leave behind.
const MIN_STEM_LEN: usize = 3;

/// Strip the longest acceptable prefix from `word`.
///
/// A prefix is skipped when the remainder would not be a viable stem or when
/// the cut would run through a vowel team, r-controlled vowel or digraph.
pub fn strip_prefix<'a>(word: &'a str, rules: &RuleSet) -> (Option<&'a str>, &'a str) {
    for prefix in &rules.prefixes {
        if !word.starts_with(prefix.as_str()) {
            continue;
        }
        let (head, rest) = word.split_at(prefix.len());
        if is_viable_stem(rest) && !cuts_through_unit(head, rest, rules) {
            log::trace!("Prefix {head:?} stripped from {word:?}");
            return (Some(head), rest);
        }
    }
    (None, word)
}

/// Strip the longest acceptable suffix from `word`.
///
/// Same stem and boundary checks as [`strip_prefix`], plus: `-er` stays on
/// the stem when the two letters before it form a vowel team (`flower`).
pub fn strip_suffix<'a>(word: &'a str, rules: &RuleSet) -> (&'a str, Option<&'a str>) {
    for suffix in &rules.suffixes {
        if !word.ends_with(suffix.as_str()) {
            continue;
        }
        let (rest, tail) = word.split_at(word.len() - suffix.len());
        if !is_viable_stem(rest) || cuts_through_unit(rest, tail, rules) {
            continue;
        }
        if tail == "er" && ends_with_vowel_team(rest, rules) {
            continue;
        }
        log::trace!("Suffix {tail:?} stripped from {word:?}");
        return (rest, Some(tail));
    }
    (word, None)
}

fn is_viable_stem(stem: &str) -> bool {
    stem.len() >= MIN_STEM_LEN && stem.bytes().any(|b| is_vowel(b) || b == b'y')
}

fn ends_with_vowel_team(stem: &str, rules: &RuleSet) -> bool {
    stem.len() >= 2
        && stem
            .get(stem.len() - 2..)
            .is_some_and(|last_two| rules.vowel_teams.iter().any(|t| t == last_two))
}

/// True when some vowel team, r-controlled vowel or digraph straddles the
/// boundary between `left` and `right`.
fn cuts_through_unit(left: &str, right: &str, rules: &RuleSet) -> bool {
    rules
        .vowel_teams
        .iter()
        .chain(&rules.r_controlled)
        .chain(&rules.digraphs)
        .any(|unit| {
            (1..unit.len()).any(|k| {
                let (head, tail) = unit.split_at(k);
                left.ends_with(head) && right.starts_with(tail)
            })
        })
}
