use std::sync::Arc;

use axum::extract::FromRef;

use crate::{
    ai::TextGenerator,
    config::Config,
    exam::{provider::QuestionProvider, session::SessionRegistry},
    store::{NotificationStore, ResultStore, UpdateStore},
};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub generator: Arc<dyn TextGenerator>,
    pub questions: QuestionProvider,
    pub sessions: Arc<SessionRegistry>,
    pub results: Arc<dyn ResultStore>,
    pub updates: Arc<dyn UpdateStore>,
    pub notifications: Arc<dyn NotificationStore>,
}

impl AppState {
    /// Wires every store seam to the same backing store.
    pub fn new<S>(config: Config, generator: Arc<dyn TextGenerator>, store: Arc<S>) -> Self
    where
        S: ResultStore + UpdateStore + NotificationStore + 'static,
    {
        Self {
            config,
            questions: QuestionProvider::new(generator.clone()),
            generator,
            sessions: Arc::new(SessionRegistry::new()),
            results: store.clone(),
            updates: store.clone(),
            notifications: store,
        }
    }
}

impl FromRef<AppState> for Arc<dyn ResultStore> {
    fn from_ref(state: &AppState) -> Self {
        state.results.clone()
    }
}

impl FromRef<AppState> for Arc<dyn UpdateStore> {
    fn from_ref(state: &AppState) -> Self {
        state.updates.clone()
    }
}

impl FromRef<AppState> for Arc<dyn NotificationStore> {
    fn from_ref(state: &AppState) -> Self {
        state.notifications.clone()
    }
}

impl FromRef<AppState> for Arc<dyn TextGenerator> {
    fn from_ref(state: &AppState) -> Self {
        state.generator.clone()
    }
}
