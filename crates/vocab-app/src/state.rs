use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use vocab_config::Config;
use vocab_config::dictionary::DictionaryConfig;
use vocab_core::dictionary::Lexicon;
use vocab_enrich::Enricher;
use vocab_lang_english::http::build_client;
use vocab_lang_english::{
    BaiduTranslator, Datamuse, Ecdict, EcdictLoader, EnglishMorphology, EnglishProcessor,
    FreeDictionary, MerriamWebster, YoudaoDictionary, YoudaoTranslator,
};
use vocab_store::Store;
use vocab_translator::{BatchTranslator, PacingPolicy};

pub struct AppState {
    pub config: Config,
    pub enricher: Enricher,
    pub store: Store,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let enricher = build_enricher(&config)?;
        let store = Store::open(&config.store)
            .with_context(|| format!("failed to open store at {}", config.store.path))?;

        Ok(Self {
            config,
            enricher,
            store,
        })
    }
}

/// Lexicon problems are not fatal: lookups then report every word as not found
fn load_lexicon(config: &DictionaryConfig) -> Ecdict {
    if !config.enabled {
        tracing::warn!("Lexicon disabled, every lookup will miss");
        return Ecdict::new();
    }

    let lexicon =
        EcdictLoader::load_with_additional(Path::new(&config.path), &config.additional_paths)
            .unwrap_or_else(|e| {
                tracing::error!("Failed to load lexicon from {}: {}", config.path, e);
                tracing::warn!("Starting with empty lexicon");
                Ecdict::new()
            });

    let meta = lexicon.metadata();
    tracing::info!(
        "Lexicon {} ({}) ready with {} entries",
        meta.name,
        meta.language,
        meta.entry_count
    );
    lexicon
}

pub fn build_enricher(config: &Config) -> anyhow::Result<Enricher> {
    let lexicon = load_lexicon(&config.dictionary);

    let sources = &config.sources;
    let client = build_client(Duration::from_secs(sources.timeout_secs))
        .context("failed to build HTTP client")?;

    let tr = &config.translator;
    let youdao = YoudaoTranslator::new(
        client.clone(),
        tr.youdao.app_key.clone(),
        tr.youdao.app_secret.clone(),
        tr.youdao.api_url.clone(),
    );
    let baidu = BaiduTranslator::new(
        client.clone(),
        tr.baidu.app_id.clone(),
        tr.baidu.secret.clone(),
        tr.baidu.api_url.clone(),
    );

    let phrase_translator = BatchTranslator::new(
        Arc::new(youdao),
        PacingPolicy::from_millis(tr.youdao.delay_ms, tr.max_retries, tr.backoff_ms),
        &tr.from_lang,
        &tr.to_lang,
    );
    let example_translator = BatchTranslator::new(
        Arc::new(baidu),
        PacingPolicy::from_millis(tr.baidu.delay_ms, tr.max_retries, tr.backoff_ms),
        &tr.from_lang,
        &tr.to_lang,
    );

    let primary = YoudaoDictionary::new(
        client.clone(),
        sources.youdao_dict_url.clone(),
        sources.youdao_keyfrom.clone(),
        sources.youdao_key.clone(),
    );
    let fallback = FreeDictionary::new(client.clone(), sources.free_dictionary_url.clone());
    let relations = Datamuse::new(client.clone(), sources.datamuse_url.clone());
    let examples = MerriamWebster::new(
        client,
        sources.merriam_webster_url.clone(),
        sources.merriam_webster_key.clone(),
    );

    if !examples.has_key() {
        tracing::info!("No example-sentence key configured, examples come from dictionaries only");
    }

    Ok(Enricher::new(
        Arc::new(lexicon),
        Arc::new(EnglishProcessor::new()),
        Arc::new(EnglishMorphology::new()),
        phrase_translator,
        example_translator,
    )
    .with_dictionaries(Arc::new(primary), Arc::new(fallback))
    .with_relations(Arc::new(relations))
    .with_examples(Arc::new(examples)))
}
