use std::sync::Arc;

use crate::{LanguageCode, PacingPolicy, TranslateError, Translator};

/// Runs texts through one provider strictly in order, pacing the calls.
///
/// The output always has the input's length and order. An item that still
/// fails after its retries becomes an empty string and the batch moves on.
#[derive(Clone)]
pub struct BatchTranslator {
    translator: Arc<dyn Translator>,
    pacing: PacingPolicy,
    from: LanguageCode,
    to: LanguageCode,
}

impl BatchTranslator {
    pub fn new(
        translator: Arc<dyn Translator>,
        pacing: PacingPolicy,
        from: impl Into<LanguageCode>,
        to: impl Into<LanguageCode>,
    ) -> Self {
        Self {
            translator,
            pacing,
            from: from.into(),
            to: to.into(),
        }
    }

    pub fn provider_name(&self) -> String {
        self.translator.metadata().name
    }

    pub async fn translate_batch(&self, texts: &[String]) -> Vec<String> {
        if texts.is_empty() {
            return Vec::new();
        }

        if !self.translator.has_credentials() {
            tracing::debug!(
                "{} has no credentials, skipping {} items",
                self.provider_name(),
                texts.len()
            );
            return vec![String::new(); texts.len()];
        }

        let mut results = Vec::with_capacity(texts.len());

        for (i, text) in texts.iter().enumerate() {
            let translated = match self.translate_with_retry(text).await {
                Ok(translated) => translated,
                Err(e) => {
                    tracing::warn!(
                        "{} gave up on item {} after {} attempts: {}",
                        self.provider_name(),
                        i,
                        self.pacing.attempts(),
                        e
                    );
                    String::new()
                }
            };
            results.push(translated);

            if i + 1 < texts.len() {
                self.pacing.wait_between_items().await;
            }
        }

        results
    }

    async fn translate_with_retry(&self, text: &str) -> Result<String, TranslateError> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.translator.translate(text, &self.from, &self.to).await {
                Ok(translation) => {
                    tracing::trace!(
                        "{} {} -> {} with {} alternatives",
                        translation.provider,
                        translation.from,
                        translation.to,
                        translation.alternatives.len()
                    );
                    return Ok(translation.text);
                }
                Err(TranslateError::MissingCredentials) => {
                    return Err(TranslateError::MissingCredentials);
                }
                Err(e) if attempt < self.pacing.attempts() => {
                    tracing::debug!("attempt {} failed: {}, retrying", attempt, e);
                    self.pacing.wait_before_retry().await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::{ProviderMetadata, Translation};

    /// Upper-cases its input, failing on the configured texts
    struct FakeTranslator {
        failing: HashSet<String>,
        credentials: bool,
        calls: AtomicUsize,
        seen: Mutex<Vec<String>>,
    }

    impl FakeTranslator {
        fn new(failing: &[&str]) -> Self {
            Self {
                failing: failing.iter().map(|s| s.to_string()).collect(),
                credentials: true,
                calls: AtomicUsize::new(0),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn without_credentials() -> Self {
            Self {
                credentials: false,
                ..Self::new(&[])
            }
        }
    }

    #[async_trait]
    impl Translator for FakeTranslator {
        async fn translate(
            &self,
            text: &str,
            from: &str,
            to: &str,
        ) -> Result<Translation, TranslateError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen.lock().unwrap().push(text.to_string());
            if self.failing.contains(text) {
                return Err(TranslateError::ProviderError {
                    code: "54003".to_string(),
                });
            }
            Ok(Translation {
                text: text.to_uppercase(),
                from: from.to_string(),
                to: to.to_string(),
                provider: "fake".to_string(),
                alternatives: vec![],
            })
        }

        fn has_credentials(&self) -> bool {
            self.credentials
        }

        fn metadata(&self) -> ProviderMetadata {
            ProviderMetadata {
                name: "fake".to_string(),
                requires_api_key: true,
                free_tier_available: true,
            }
        }
    }

    fn texts(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn batch(fake: Arc<FakeTranslator>) -> BatchTranslator {
        BatchTranslator::new(fake, PacingPolicy::unpaced(2), "en", "zh")
    }

    #[tokio::test]
    async fn translates_in_order() {
        let fake = Arc::new(FakeTranslator::new(&[]));
        let out = batch(fake.clone())
            .translate_batch(&texts(&["one", "two", "three"]))
            .await;
        assert_eq!(out, texts(&["ONE", "TWO", "THREE"]));
        assert_eq!(*fake.seen.lock().unwrap(), texts(&["one", "two", "three"]));
    }

    #[tokio::test]
    async fn failing_provider_yields_empty_strings() {
        let fake = Arc::new(FakeTranslator::new(&["a", "b", "c", "d"]));
        let out = batch(fake.clone())
            .translate_batch(&texts(&["a", "b", "c", "d"]))
            .await;
        assert_eq!(out, vec![String::new(); 4]);
        // first attempt plus two retries per item
        assert_eq!(fake.calls.load(Ordering::SeqCst), 12);
    }

    #[tokio::test]
    async fn one_failing_item_does_not_abort_the_batch() {
        let fake = Arc::new(FakeTranslator::new(&["bad"]));
        let out = batch(fake)
            .translate_batch(&texts(&["good", "bad", "fine"]))
            .await;
        assert_eq!(out, texts(&["GOOD", "", "FINE"]));
    }

    #[tokio::test]
    async fn missing_credentials_skip_network() {
        let fake = Arc::new(FakeTranslator::without_credentials());
        let out = batch(fake.clone())
            .translate_batch(&texts(&["x", "y"]))
            .await;
        assert_eq!(out, texts(&["", ""]));
        assert_eq!(fake.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn empty_batch_is_empty() {
        let fake = Arc::new(FakeTranslator::new(&[]));
        assert!(batch(fake).translate_batch(&[]).await.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn pauses_between_items_but_not_after_the_last() {
        let fake = Arc::new(FakeTranslator::new(&[]));
        let translator = BatchTranslator::new(
            fake,
            PacingPolicy::from_millis(500, 2, 1000),
            "en",
            "zh",
        );

        let start = tokio::time::Instant::now();
        translator
            .translate_batch(&texts(&["a", "b", "c"]))
            .await;
        assert_eq!(start.elapsed(), Duration::from_millis(1000));
    }

    #[tokio::test(start_paused = true)]
    async fn backs_off_between_attempts() {
        let fake = Arc::new(FakeTranslator::new(&["a"]));
        let translator = BatchTranslator::new(
            fake,
            PacingPolicy::from_millis(500, 2, 1000),
            "en",
            "zh",
        );

        let start = tokio::time::Instant::now();
        let out = translator.translate_batch(&texts(&["a"])).await;
        assert_eq!(out, texts(&[""]));
        assert_eq!(start.elapsed(), Duration::from_millis(2000));
    }
}
