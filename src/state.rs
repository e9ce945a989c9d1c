//! Application state management
//!
//! Shared state handed to every request handler via Axum's State extractor.

use std::sync::Arc;

use coursegate_rules::drip::RuleEvaluator;
use sqlx::PgPool;

use crate::{config::Config, store::PgStore};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    store: PgStore,

    /// Drip evaluator bound to the platform calendar
    evaluator: RuleEvaluator,

    config: Config,
}

impl AppState {
    pub fn new(db: PgPool, config: Config) -> Self {
        let evaluator = RuleEvaluator::new(config.engine.calendar);

        Self {
            inner: Arc::new(AppStateInner {
                store: PgStore::new(db),
                evaluator,
                config,
            }),
        }
    }

    /// Get a reference to the database pool
    pub fn db(&self) -> &PgPool {
        self.inner.store.pool()
    }

    pub fn store(&self) -> &PgStore {
        &self.inner.store
    }

    pub fn evaluator(&self) -> &RuleEvaluator {
        &self.inner.evaluator
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }
}
