use anyhow::Context;
use serde_json::json;
use vocab_core::error::EnrichError;
use vocab_core::preprocess::{DefaultPreprocessor, Preprocessor};
use vocab_store::UserRole;
use vocab_types::{LookupMode, WordRecord};

use crate::exit::CliExitCode;
use crate::output::{LookupOutput, print_json};
use crate::state::AppState;
use crate::{CacheAction, Command, UserAction};

pub async fn dispatch(state: &mut AppState, command: Command) -> anyhow::Result<CliExitCode> {
    match command {
        Command::Lookup {
            query,
            fast,
            stream,
            no_cache,
        } => {
            let query = query.join(" ");
            if stream {
                lookup_stream(state, &query).await
            } else {
                lookup(state, &query, LookupMode::from_fast_flag(fast), !no_cache).await
            }
        }
        Command::History { clear } => {
            if clear {
                state.store.clear_history()?;
            }
            print_json(&state.store.history(), true)?;
            Ok(CliExitCode::Success)
        }
        Command::Favorite { word } => toggle_favorite(state, &word).await,
        Command::Favorites { clear } => {
            if clear {
                state.store.clear_favorites()?;
            }
            print_json(&state.store.favorites(), true)?;
            Ok(CliExitCode::Success)
        }
        Command::Cache {
            action: CacheAction::Clear,
        } => {
            let cleared = state.store.clear_cache()?;
            print_json(&json!({ "cleared": cleared }), false)?;
            Ok(CliExitCode::Success)
        }
        Command::User { action } => user(state, action),
    }
}

/// Print the outcome of one path and turn it into an exit code
fn report(
    mode: LookupMode,
    result: &Result<WordRecord, EnrichError>,
    pretty: bool,
) -> anyhow::Result<CliExitCode> {
    match result {
        Ok(record) => {
            print_json(&LookupOutput::new(mode, true, record), pretty)?;
            Ok(CliExitCode::Success)
        }
        Err(e) => {
            if let Some(record) = e.not_found_record() {
                print_json(&LookupOutput::new(mode, false, record), pretty)?;
            } else {
                tracing::error!("Lookup failed: {}", e);
            }
            Ok(CliExitCode::from(e))
        }
    }
}

/// Cache and remember a successful full record
fn remember(state: &mut AppState, record: &WordRecord) -> anyhow::Result<()> {
    state.store.cache_word(record).context("failed to cache record")?;
    state
        .store
        .save_to_history(record)
        .context("failed to save history")?;
    Ok(())
}

pub async fn lookup(
    state: &mut AppState,
    query: &str,
    mode: LookupMode,
    use_cache: bool,
) -> anyhow::Result<CliExitCode> {
    if mode == LookupMode::Full && use_cache {
        if let Some(headword) = DefaultPreprocessor.headword(query) {
            if let Some(record) = state.store.cached(&headword)? {
                tracing::debug!("Cache hit for '{}'", headword);
                state.store.save_to_history(&record)?;
                print_json(&LookupOutput::new(mode, true, &record), true)?;
                return Ok(CliExitCode::Success);
            }
        }
    }

    let result = state.enricher.enrich(query, mode).await;
    if let (LookupMode::Full, Ok(record)) = (mode, &result) {
        remember(state, record)?;
    }
    report(mode, &result, true)
}

/// Run both paths at once. The fast record is printed as soon as it is
/// ready, the full record always comes last.
pub async fn lookup_stream(state: &mut AppState, query: &str) -> anyhow::Result<CliExitCode> {
    let fast_enricher = state.enricher.clone();
    let fast_query = query.to_string();
    let fast = tokio::spawn(async move { fast_enricher.enrich(&fast_query, LookupMode::Fast).await });

    let full_enricher = state.enricher.clone();
    let full_query = query.to_string();
    let full = tokio::spawn(async move { full_enricher.enrich(&full_query, LookupMode::Full).await });

    let fast_result = fast.await.context("fast lookup task failed")?;
    report(LookupMode::Fast, &fast_result, false)?;

    let full_result = full.await.context("full lookup task failed")?;
    if let Ok(record) = &full_result {
        remember(state, record)?;
    }
    report(LookupMode::Full, &full_result, false)
}

/// Favorites hold whole records: reuse the cached or historical one when
/// available, otherwise take a fast lookup
async fn toggle_favorite(state: &mut AppState, word: &str) -> anyhow::Result<CliExitCode> {
    let Some(headword) = DefaultPreprocessor.headword(word) else {
        tracing::error!("Favorite needs a word");
        return Ok(CliExitCode::BadRequest);
    };

    let known = match state.store.cached(&headword)? {
        Some(record) => Some(record),
        None => state
            .store
            .history()
            .iter()
            .find(|s| s.record.headword == headword)
            .map(|s| s.record.clone()),
    };

    let record = match known {
        Some(record) => record,
        None => match state.enricher.enrich(&headword, LookupMode::Fast).await {
            Ok(record) => record,
            Err(e) => return report(LookupMode::Fast, &Err(e), true),
        },
    };

    let added = state.store.toggle_favorite(&record)?;
    print_json(&json!({ "word": headword, "favorite": added }), false)?;
    Ok(CliExitCode::Success)
}

fn user(state: &mut AppState, action: UserAction) -> anyhow::Result<CliExitCode> {
    match action {
        UserAction::Add { name, role } => {
            let Some(role) = UserRole::parse(&role) else {
                tracing::error!("Unknown role '{}'", role);
                return Ok(CliExitCode::BadRequest);
            };
            let user = state.store.add_user(&name, role)?;
            print_json(&user, true)?;
        }
        UserAction::List => {
            state.store.ensure_user()?;
            let current = state.store.current_user().map(|u| u.id.clone());
            let users: Vec<_> = state
                .store
                .users()
                .iter()
                .map(|u| {
                    json!({
                        "id": u.id,
                        "name": u.name,
                        "role": u.role.label(),
                        "current": Some(&u.id) == current.as_ref(),
                    })
                })
                .collect();
            print_json(&users, true)?;
        }
        UserAction::Switch { id } => {
            state.store.switch_user(&id)?;
            tracing::info!("Switched to user {}", id);
        }
        UserAction::Remove { id } => {
            state.store.remove_user(&id)?;
        }
    }
    Ok(CliExitCode::Success)
}
