//! Parsers for the semi-structured blobs stored in lexicon rows.
//!
//! Definition line grammar:
//!
//! ```text
//! line := pos WS+ text   -- pos is one or more of [a-z.]
//!       | text           -- anything else, part of speech left empty
//! ```
//!
//! Word-form grammar: `entry ("/" entry)*` with `entry := code ":" form`.

use std::collections::BTreeMap;

use vocab_types::Definition;

/// Split one definition line into `(part_of_speech, text)`
pub fn parse_definition_line(line: &str) -> (String, String) {
    let line = line.trim();

    if let Some(split) = line.find(char::is_whitespace) {
        let (head, rest) = line.split_at(split);
        let rest = rest.trim_start();
        let is_pos = head
            .chars()
            .all(|c| c.is_ascii_lowercase() || c == '.');

        if is_pos && !rest.is_empty() {
            return (head.to_string(), rest.to_string());
        }
    }

    (String::new(), line.to_string())
}

/// Parse a multi-line translation blob into native definitions
pub fn parse_translation_blob(blob: &str) -> Vec<Definition> {
    blob.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            let (pos, text) = parse_definition_line(line);
            Definition::new(pos, text)
        })
        .collect()
}

/// Fill `source_definition` from the English definition blob, pairing each
/// native row with the first English line of the same part-of-speech family
pub fn attach_source_definitions(translations: &mut [Definition], english_blob: &str) {
    let english: Vec<(String, String)> = english_blob
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(parse_definition_line)
        .collect();

    for translation in translations.iter_mut() {
        if translation.part_of_speech.is_empty() {
            continue;
        }
        let family = pos_family(&translation.part_of_speech);
        if let Some((_, text)) = english
            .iter()
            .find(|(pos, _)| !pos.is_empty() && pos_family(pos) == family)
        {
            translation.source_definition = text.clone();
        }
    }
}

/// Collapse lexicon part-of-speech spellings onto one family name.
/// English rows say `a.`/`r.`/`s.` where native rows say `adj.`/`adv.`.
pub fn pos_family(pos: &str) -> &str {
    match pos {
        "a." | "adj." | "s." => "adj",
        "r." | "adv." => "adv",
        "v." | "vt." | "vi." => "v",
        "n." => "n",
        other => other,
    }
}

/// Distinct parts of speech in row order, space separated (`"n. vt."`)
pub fn pos_summary(translations: &[Definition]) -> String {
    let mut seen: Vec<&str> = Vec::new();
    for t in translations {
        let pos = t.part_of_speech.as_str();
        if !pos.is_empty() && !seen.contains(&pos) {
            seen.push(pos);
        }
    }
    seen.join(" ")
}

/// Parse `code:form/code:form` into a role map. Entries with an empty side are dropped.
pub fn parse_exchange(blob: &str) -> BTreeMap<String, String> {
    blob.split('/')
        .filter_map(|segment| {
            let (code, form) = segment.split_once(':')?;
            let (code, form) = (code.trim(), form.trim());
            if code.is_empty() || form.is_empty() {
                None
            } else {
                Some((code.to_string(), form.to_string()))
            }
        })
        .collect()
}

/// Human-readable name of a word-form role code
pub fn role_label(code: &str) -> Option<&'static str> {
    match code {
        "p" => Some("past tense"),
        "d" => Some("past participle"),
        "i" => Some("present participle"),
        "3" => Some("third person singular"),
        "r" => Some("comparative"),
        "t" => Some("superlative"),
        "s" => Some("plural"),
        "0" => Some("lemma"),
        "1" => Some("lemma form"),
        _ => None,
    }
}
