use std::collections::BTreeMap;

use serde::Serialize;
use vocab_lang_english::parse::role_label;
use vocab_types::{LookupMode, WordRecord};

/// What `lookup` prints for one record
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupOutput<'a> {
    pub mode: LookupMode,
    pub found: bool,
    pub record: &'a WordRecord,
    /// Word forms keyed by readable role name
    pub word_form_labels: BTreeMap<String, String>,
}

impl<'a> LookupOutput<'a> {
    pub fn new(mode: LookupMode, found: bool, record: &'a WordRecord) -> Self {
        let word_form_labels = record
            .word_forms
            .iter()
            .map(|(code, form)| {
                let label = role_label(code).map(str::to_string).unwrap_or_else(|| code.clone());
                (label, form.clone())
            })
            .collect();

        Self {
            mode,
            found,
            record,
            word_form_labels,
        }
    }
}

pub fn print_json<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<()> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{text}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_known_roles_and_keeps_unknown_codes() {
        let mut record = WordRecord::new("quick");
        record.word_forms.insert("r".into(), "quicker".into());
        record.word_forms.insert("t".into(), "quickest".into());
        record.word_forms.insert("x".into(), "odd".into());

        let output = LookupOutput::new(LookupMode::Full, true, &record);
        assert_eq!(output.word_form_labels["comparative"], "quicker");
        assert_eq!(output.word_form_labels["superlative"], "quickest");
        assert_eq!(output.word_form_labels["x"], "odd");

        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["mode"], "full");
        assert_eq!(json["record"]["headword"], "quick");
        assert!(json["wordFormLabels"].is_object());
    }
}
