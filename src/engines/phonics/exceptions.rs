use super::rules::RuleSet;

/// Look up a trimmed, lowercased word in the exception lexicon.
///
/// `None` means the word is not an exception; validated rule sets never
/// hold an empty chunk list.
pub fn lookup_exception<'r>(word: &str, rules: &'r RuleSet) -> Option<&'r [String]> {
    rules
        .exceptions
        .get(word)
        .map(Vec::as_slice)
        .filter(|chunks| !chunks.is_empty())
}
