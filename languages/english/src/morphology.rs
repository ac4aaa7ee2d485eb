use vocab_core::language::{DerivationCandidate, Morphology};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    /// Replace one suffix with a sibling suffix (`-ize` to `-ization`)
    Swap,
    /// Add a suffix to a word that carries none of the known suffixes
    Append,
    /// Cut a suffix to get back to a shorter family member
    Shorten,
}

/// One row of the derivation table.
///
/// A rule fires when the word ends with `matcher`. `strip` (a tail of
/// `matcher`) is removed and `append` is added to what remains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuffixRule {
    pub kind: RuleKind,
    pub matcher: &'static str,
    pub strip: &'static str,
    pub append: &'static str,
    pub pos: &'static str,
}

const fn swap(from: &'static str, to: &'static str, pos: &'static str) -> SuffixRule {
    SuffixRule {
        kind: RuleKind::Swap,
        matcher: from,
        strip: from,
        append: to,
        pos,
    }
}

const fn append(suffix: &'static str, pos: &'static str) -> SuffixRule {
    SuffixRule {
        kind: RuleKind::Append,
        matcher: "",
        strip: "",
        append: suffix,
        pos,
    }
}

const fn shorten(
    matcher: &'static str,
    strip: &'static str,
    append: &'static str,
    pos: &'static str,
) -> SuffixRule {
    SuffixRule {
        kind: RuleKind::Shorten,
        matcher,
        strip,
        append,
        pos,
    }
}

pub const DEFAULT_RULES: &[SuffixRule] = &[
    swap("ization", "ize", "v."),
    swap("ize", "ization", "n."),
    swap("ize", "izer", "n."),
    swap("ate", "ation", "n."),
    swap("ate", "ator", "n."),
    swap("ate", "ative", "adj."),
    swap("tion", "tive", "adj."),
    swap("ment", "mental", "adj."),
    swap("ous", "ously", "adv."),
    swap("ful", "fully", "adv."),
    swap("able", "ability", "n."),
    swap("able", "ably", "adv."),
    swap("ible", "ibility", "n."),
    swap("ive", "ively", "adv."),
    swap("ive", "iveness", "n."),
    swap("ent", "ence", "n."),
    swap("ant", "ance", "n."),
    swap("al", "ally", "adv."),
    append("ness", "n."),
    append("ly", "adv."),
    append("er", "n."),
    append("ment", "n."),
    append("able", "adj."),
    append("ful", "adj."),
    append("less", "adj."),
    append("ize", "v."),
    shorten("ly", "ly", "", "adj."),
    shorten("ness", "ness", "", "adj."),
    shorten("tion", "ion", "e", "v."),
    shorten("ment", "ment", "", "v."),
];

/// Stems left by a swap must keep at least this many letters
const MIN_STEM_LEN: usize = 2;
/// Shortening only applies to words longer than this
const MIN_SHORTEN_LEN: usize = 4;

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

/// Attach `suffix` to a bare word with the usual spelling adjustments:
/// a mute `e` drops before a vowel, a consonant + `y` turns into `i`
/// unless the suffix itself starts with `i`.
pub fn attach_suffix(stem: &str, suffix: &str) -> String {
    let chars: Vec<char> = stem.chars().collect();
    let first = suffix.chars().next();
    let n = chars.len();

    if n > 2 && chars[n - 1] == 'e' && !is_vowel(chars[n - 2]) && first.is_some_and(is_vowel) {
        let base: String = chars[..n - 1].iter().collect();
        return format!("{base}{suffix}");
    }

    if n > 1 && chars[n - 1] == 'y' && !is_vowel(chars[n - 2]) && first.is_some_and(|c| c != 'i') {
        let base: String = chars[..n - 1].iter().collect();
        return format!("{base}i{suffix}");
    }

    format!("{stem}{suffix}")
}

/// Rule-table driven English derivation. Purely heuristic: candidates are
/// expected to include non-words and must be checked before use.
pub struct EnglishMorphology {
    rules: Vec<SuffixRule>,
}

impl EnglishMorphology {
    pub fn new() -> Self {
        Self::with_rules(DEFAULT_RULES.to_vec())
    }

    pub fn with_rules(rules: Vec<SuffixRule>) -> Self {
        Self { rules }
    }

    /// Apply a single rule, if it fires
    pub fn apply(rule: &SuffixRule, word: &str) -> Option<String> {
        match rule.kind {
            RuleKind::Swap => {
                let stem = word.strip_suffix(rule.strip)?;
                (stem.chars().count() >= MIN_STEM_LEN).then(|| format!("{stem}{}", rule.append))
            }
            RuleKind::Append => Some(attach_suffix(word, rule.append)),
            RuleKind::Shorten => {
                if word.chars().count() <= MIN_SHORTEN_LEN || !word.ends_with(rule.matcher) {
                    return None;
                }
                let stem = word.strip_suffix(rule.strip)?;
                if stem.chars().count() < MIN_STEM_LEN {
                    return None;
                }
                if rule.append.is_empty() {
                    // happily -> happy, happiness -> happy
                    match stem.strip_suffix('i') {
                        Some(base) => Some(format!("{base}y")),
                        None => Some(stem.to_string()),
                    }
                } else {
                    Some(format!("{stem}{}", rule.append))
                }
            }
        }
    }

    fn fires(rule: &SuffixRule, word: &str) -> bool {
        rule.kind != RuleKind::Append && Self::apply(rule, word).is_some()
    }
}

impl Default for EnglishMorphology {
    fn default() -> Self {
        Self::new()
    }
}

impl Morphology for EnglishMorphology {
    fn derive_candidates(&self, word: &str, limit: usize) -> Vec<DerivationCandidate> {
        let word = word.trim().to_lowercase();
        if word.is_empty() || limit == 0 {
            return Vec::new();
        }

        // A word is bare when no swap or shorten rule recognizes its ending
        let bare = !self.rules.iter().any(|r| Self::fires(r, &word));

        let mut candidates: Vec<DerivationCandidate> = Vec::new();
        let passes = [RuleKind::Swap, RuleKind::Append, RuleKind::Shorten];

        for kind in passes {
            if kind == RuleKind::Append && !bare {
                continue;
            }
            for rule in self.rules.iter().filter(|r| r.kind == kind) {
                let Some(derived) = Self::apply(rule, &word) else {
                    continue;
                };
                if derived == word || candidates.iter().any(|c| c.word == derived) {
                    continue;
                }
                candidates.push(DerivationCandidate {
                    word: derived,
                    part_of_speech: rule.pos.to_string(),
                    rule: describe(rule),
                });
            }
        }

        candidates.truncate(limit);
        candidates
    }
}

fn describe(rule: &SuffixRule) -> String {
    match rule.kind {
        RuleKind::Swap => format!("-{} => -{}", rule.matcher, rule.append),
        RuleKind::Append => format!("+{}", rule.append),
        RuleKind::Shorten if rule.append.is_empty() => format!("-{} => stem", rule.matcher),
        RuleKind::Shorten => format!("-{} => stem+{}", rule.matcher, rule.append),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(word: &str, limit: usize) -> Vec<String> {
        EnglishMorphology::new()
            .derive_candidates(word, limit)
            .into_iter()
            .map(|c| c.word)
            .collect()
    }

    #[test]
    fn organize_reaches_organization() {
        let candidates = EnglishMorphology::new().derive_candidates("organize", 8);
        let hit = candidates
            .iter()
            .find(|c| c.word.ends_with("ization"))
            .expect("an -ization candidate");
        assert_eq!(hit.word, "organization");
        assert_eq!(hit.part_of_speech, "n.");
        assert_eq!(hit.rule, "-ize => -ization");
    }

    #[test]
    fn deterministic() {
        assert_eq!(words("organize", 8), words("Organize", 8));
        assert_eq!(words("create", 8), vec!["creation", "creator", "creative"]);
    }

    #[test]
    fn bare_words_get_appended_suffixes() {
        assert_eq!(
            words("quick", 8),
            vec![
                "quickness", "quickly", "quicker", "quickment", "quickable", "quickful",
                "quickless", "quickize"
            ]
        );
        assert_eq!(words("quick", 4).len(), 4);
    }

    #[test]
    fn spelling_adjustments() {
        assert_eq!(attach_suffix("hope", "er"), "hoper");
        assert_eq!(attach_suffix("hope", "ful"), "hopeful");
        assert_eq!(attach_suffix("happy", "ness"), "happiness");
        assert_eq!(attach_suffix("happy", "ize"), "happyize");
        assert_eq!(attach_suffix("play", "er"), "player");
        assert_eq!(attach_suffix("free", "er"), "freeer");
    }

    #[test]
    fn shortening_rules() {
        assert_eq!(words("quickly", 8), vec!["quick"]);
        assert_eq!(words("happiness", 8), vec!["happy"]);
        assert_eq!(words("creation", 8), vec!["creative", "create"]);
        // -ent also fires on -ment words
        assert_eq!(
            words("development", 8),
            vec!["developmental", "developmence", "develop"]
        );
        // too short to shorten
        assert!(!words("holy", 8).contains(&"ho".to_string()));
    }

    #[test]
    fn short_stems_are_rejected() {
        // "ize" alone leaves an empty stem for the swap rules
        assert!(!words("ize", 8).contains(&"ization".to_string()));
    }

    #[test]
    fn each_rule_is_testable_alone() {
        let rule = swap("ous", "ously", "adv.");
        assert_eq!(EnglishMorphology::apply(&rule, "famous").as_deref(), Some("famously"));
        assert_eq!(EnglishMorphology::apply(&rule, "fame"), None);

        let rule = shorten("tion", "ion", "e", "v.");
        assert_eq!(EnglishMorphology::apply(&rule, "creation").as_deref(), Some("create"));
        assert_eq!(EnglishMorphology::apply(&rule, "tion"), None);
    }

    #[test]
    fn zero_limit_or_empty_word() {
        assert!(words("quick", 0).is_empty());
        assert!(words("  ", 8).is_empty());
    }
}
