//! Cleaning and acceptance of illustrative sentences taken from the
//! reference dictionary.

use serde_json::Value;

/// Formatting tags whose inner text is kept as-is
const FORMATTING_TAGS: &[&str] = &[
    "b", "it", "phrase", "qword", "wi", "inf", "sup", "sc", "parahw", "gloss", "i",
];

/// Cross-reference tags whose whole content is noise in a sentence
const SUPPRESSED_TAGS: &[&str] = &["dx", "dx_def", "dx_ety", "ma"];

const AUXILIARIES: &[&str] = &[
    "is", "are", "was", "were", "be", "been", "being", "am", "has", "have", "had", "do", "does",
    "did", "will", "would", "can", "could", "shall", "should", "may", "might", "must",
];

/// First words that mark a sentence fragment
const FRAGMENT_STARTERS: &[&str] = &[
    "and", "but", "or", "nor", "so", "yet", "because", "although", "though", "if", "when",
    "whenever", "while", "whereas", "unless", "until", "since", "which", "that", "who", "whom",
    "whose", "where", "being", "having", "doing", "making", "getting", "to",
];

pub const MAX_SENTENCE_CHARS: usize = 150;
pub const MIN_WORDS: usize = 3;
pub const MAX_WORDS: usize = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TagKind {
    Formatting,
    OpenQuote,
    CloseQuote,
    Suppressed { closing: bool },
    Unknown,
}

fn classify_tag(raw: &str) -> TagKind {
    // Tags may carry fields after a pipe: {dxt|word||}
    let name = raw.split('|').next().unwrap_or_default();
    let (closing, name) = match name.strip_prefix('/') {
        Some(rest) => (true, rest),
        None => (false, name),
    };

    match name {
        "ldquo" => TagKind::OpenQuote,
        "rdquo" => TagKind::CloseQuote,
        n if FORMATTING_TAGS.contains(&n) => TagKind::Formatting,
        n if SUPPRESSED_TAGS.contains(&n) => TagKind::Suppressed { closing },
        _ => TagKind::Unknown,
    }
}

/// Strip `{tag}` markup from a sentence.
///
/// Formatting tags keep their inner text, quote tags become quotation marks,
/// cross-reference tags lose their content, anything else loses just the tag.
/// Whitespace is collapsed afterwards.
pub fn strip_markup(text: &str) -> String {
    enum State {
        Text,
        Tag(String),
    }

    let mut out = String::with_capacity(text.len());
    let mut state = State::Text;
    let mut suppressed = 0usize;

    for c in text.chars() {
        state = match state {
            State::Text if c == '{' => State::Tag(String::new()),
            State::Text => {
                if suppressed == 0 {
                    out.push(c);
                }
                State::Text
            }
            State::Tag(name) if c == '}' => {
                match classify_tag(&name) {
                    TagKind::OpenQuote if suppressed == 0 => out.push('\u{201c}'),
                    TagKind::CloseQuote if suppressed == 0 => out.push('\u{201d}'),
                    TagKind::Suppressed { closing: false } => suppressed += 1,
                    TagKind::Suppressed { closing: true } => {
                        suppressed = suppressed.saturating_sub(1)
                    }
                    _ => {}
                }
                State::Text
            }
            State::Tag(mut name) => {
                name.push(c);
                State::Tag(name)
            }
        };
    }

    // An unterminated tag at the end is dropped
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn normalize_word(word: &str) -> String {
    word.trim_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase()
}

fn has_verb_signal(words: &[&str]) -> bool {
    words.iter().any(|w| {
        let w = normalize_word(w);
        AUXILIARIES.contains(&w.as_str())
            || w.ends_with('s')
            || w.ends_with("ed")
            || w.ends_with("ing")
    })
}

/// Acceptance predicate for a cleaned example sentence.
///
/// The verb check is coarse: irregular past forms such as
/// "sat" carry no signal, so "The cat sat." is rejected.
pub fn is_valid_example(sentence: &str) -> bool {
    let Some(first) = sentence.chars().next() else {
        return false;
    };
    if !first.is_uppercase() {
        return false;
    }

    if !sentence.ends_with(['.', '!', '?']) {
        return false;
    }

    if sentence.chars().count() > MAX_SENTENCE_CHARS {
        return false;
    }

    let words: Vec<&str> = sentence.split(' ').filter(|w| !w.is_empty()).collect();
    if words.len() < MIN_WORDS || words.len() > MAX_WORDS {
        return false;
    }

    if !has_verb_signal(&words) {
        return false;
    }

    let opener = normalize_word(words[0]);
    !FRAGMENT_STARTERS.contains(&opener.as_str())
}

/// Walk a reference-dictionary payload in document order and collect raw
/// illustration texts (the `t` fields under `["vis", [...]]` markers).
fn walk_illustrations<'a>(value: &'a Value, out: &mut Vec<&'a str>) {
    match value {
        Value::Array(items) => {
            if let [Value::String(marker), Value::Array(visuals)] = items.as_slice() {
                if marker == "vis" {
                    out.extend(visuals.iter().filter_map(|v| v.get("t")?.as_str()));
                    return;
                }
            }
            for item in items {
                walk_illustrations(item, out);
            }
        }
        Value::Object(map) => {
            for child in map.values() {
                walk_illustrations(child, out);
            }
        }
        _ => {}
    }
}

/// Cleaned sentences that pass [`is_valid_example`], at most `limit`, without repeats
pub fn extract_examples(payload: &Value, limit: usize) -> Vec<String> {
    let mut raw = Vec::new();
    walk_illustrations(payload, &mut raw);

    let mut accepted: Vec<String> = Vec::new();
    for text in raw {
        if accepted.len() >= limit {
            break;
        }
        let cleaned = strip_markup(text);
        if is_valid_example(&cleaned) && !accepted.contains(&cleaned) {
            accepted.push(cleaned);
        }
    }
    accepted
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn strips_formatting_but_keeps_text() {
        assert_eq!(
            strip_markup("She {it}quickly{/it} {b}organized{/b} the {phrase}files{/phrase}."),
            "She quickly organized the files."
        );
        assert_eq!(strip_markup("H{inf}2{/inf}O is water."), "H2O is water.");
    }

    #[test]
    fn quotes_and_unknown_tags() {
        assert_eq!(
            strip_markup("{ldquo}Hi,{rdquo} she says.{bc}"),
            "\u{201c}Hi,\u{201d} she says."
        );
        assert_eq!(strip_markup("Run {dxt|run||} now."), "Run now.");
        assert_eq!(
            strip_markup("It works. {dx}see also {dxt|walk||}{/dx}"),
            "It works."
        );
        assert_eq!(strip_markup("Broken {tag"), "Broken");
    }

    #[test]
    fn accepts_complete_sentences() {
        assert!(is_valid_example("She walks to school every day."));
        assert!(is_valid_example("They were late again!"));
        assert!(is_valid_example("Is it working?"));
    }

    #[test]
    fn irregular_past_has_no_verb_signal() {
        // three words, but "sat" is neither an auxiliary nor a suffixed form
        assert!(!is_valid_example("The cat sat."));
    }

    #[test]
    fn rejects_malformed_sentences() {
        assert!(!is_valid_example(""));
        assert!(!is_valid_example("she walks to school."));
        assert!(!is_valid_example("She walks to school"));
        assert!(!is_valid_example("Walks fast."));
        assert!(!is_valid_example("Because she was tired."));
        assert!(!is_valid_example("Having finished the work early."));
        let long = format!("She {} walked.", "very ".repeat(40));
        assert!(!is_valid_example(&long));
        let wordy = format!("She {}walked.", "a ".repeat(25));
        assert!(wordy.chars().count() <= MAX_SENTENCE_CHARS);
        assert!(!is_valid_example(&wordy));
    }

    #[test]
    fn extracts_in_document_order_up_to_limit() {
        let payload = json!([{
            "def": [{
                "sseq": [[
                    ["sense", {"dt": [
                        ["text", "{bc}moving fast"],
                        ["vis", [{"t": "The cat sat."}, {"t": "She {it}walked{/it} home quickly."}]]
                    ]}],
                    ["sense", {"dt": [
                        ["uns", [[["text", "often used"], ["vis", [{"t": "He runs every morning."}]]]]],
                        ["vis", [{"t": "They are always late."}]]
                    ]}]
                ]]
            }]
        }]);

        let examples = extract_examples(&payload, 2);
        assert_eq!(
            examples,
            vec!["She walked home quickly.", "He runs every morning."]
        );
    }

    #[test]
    fn suggestion_list_has_no_examples() {
        // the service answers unknown words with a list of spellings
        let payload = json!(["organise", "organism"]);
        assert!(extract_examples(&payload, 2).is_empty());
    }
}
