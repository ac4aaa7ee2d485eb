pub trait Preprocessor {
    /// Canonical lookup key: first whitespace-delimited token, lowercased.
    /// `None` when the query holds no token at all.
    fn headword(&self, query: &str) -> Option<String> {
        query
            .split_whitespace()
            .next()
            .map(|token| token.to_lowercase())
    }
}

pub struct DefaultPreprocessor;
impl Preprocessor for DefaultPreprocessor {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn takes_first_token_lowercased() {
        let p = DefaultPreprocessor;
        assert_eq!(p.headword("  Quick brown fox ").as_deref(), Some("quick"));
        assert_eq!(p.headword("ORGANIZE").as_deref(), Some("organize"));
        assert_eq!(p.headword("\tRun\nfast").as_deref(), Some("run"));
    }

    #[test]
    fn blank_query_has_no_headword() {
        let p = DefaultPreprocessor;
        assert_eq!(p.headword(""), None);
        assert_eq!(p.headword("   \n\t"), None);
    }
}
