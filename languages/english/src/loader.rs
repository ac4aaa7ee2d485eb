use std::path::Path;

use vocab_core::dictionary::LoadError;

use crate::dictionary::Ecdict;

pub struct EcdictLoader;

impl EcdictLoader {
    /// Load lexicon from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Ecdict, LoadError> {
        if !path.exists() {
            return Err(LoadError::FileNotFound(path.display().to_string()));
        }

        tracing::info!("Loading lexicon from file: {}", path.display());
        let json = std::fs::read_to_string(path)?;
        let dict = Ecdict::from_json(&json)?;
        tracing::info!("Loaded {} lexicon entries from file", dict.entry_count());
        Ok(dict)
    }

    /// Load the main lexicon, then merge each additional file over it.
    /// Additional files that fail to load are skipped with a warning.
    pub fn load_with_additional(main: &Path, additional: &[String]) -> Result<Ecdict, LoadError> {
        let mut dict = Self::load_from_file(main)?;

        for path in additional {
            match Self::load_from_file(Path::new(path)) {
                Ok(extra) => {
                    tracing::info!("Merging additional lexicon from: {}", path);
                    dict = dict.merge(extra);
                }
                Err(e) => {
                    tracing::warn!("Failed to load lexicon from {}: {}", path, e);
                }
            }
        }

        Ok(dict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vocab_core::dictionary::Lexicon;

    #[test]
    fn missing_file_is_reported() {
        let err = EcdictLoader::load_from_file(Path::new("/no/such/lexicon.json"))
            .err()
            .unwrap();
        assert!(matches!(err, LoadError::FileNotFound(_)));
    }

    #[test]
    fn merges_additional_files_and_skips_broken_ones() {
        let dir = std::env::temp_dir().join(format!("vocab-loader-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let main = dir.join("main.json");
        let extra = dir.join("extra.json");
        std::fs::write(&main, r#"[{"word": "cat", "translation": "n. 猫"}]"#).unwrap();
        std::fs::write(&extra, r#"[{"word": "cat", "translation": "n. 猫科动物"}, {"word": "dog"}]"#)
            .unwrap();

        let dict = EcdictLoader::load_with_additional(
            &main,
            &[
                extra.display().to_string(),
                dir.join("missing.json").display().to_string(),
            ],
        )
        .unwrap();

        assert_eq!(dict.entry_count(), 2);
        assert_eq!(dict.lookup("cat").unwrap().translation, "n. 猫科动物");

        std::fs::remove_dir_all(&dir).ok();
    }
}
