use std::{collections::HashMap, sync::Arc, time::Duration};

use rand::Rng;
use tokio::{
    sync::{RwLock, broadcast},
    task::JoinHandle,
    time::Instant,
};
use tracing::info;

use crate::dto::{form_dto::ScheduleForm, update_dto::FormUpdate};
use crate::error::{AppError, AppResult};
use crate::services::{form_model::FormError, websocket::publish};

const UPDATE_CHANNEL_CAPACITY: usize = 64;
const MIN_SWEEP_PERIOD: Duration = Duration::from_secs(1);
const MAX_SWEEP_PERIOD: Duration = Duration::from_secs(60);

pub type SessionId = String;

struct Session {
    form: ScheduleForm,
    tx: broadcast::Sender<String>,
    last_touched: Instant,
}

impl Session {
    fn touch(&mut self) -> &mut Self {
        self.last_touched = Instant::now();
        self
    }
}

/**
 * Per-coordinator form state. Every session owns its form and a broadcast
 * channel its views subscribe to; nothing is shared between sessions.
 * Sessions end on request or once they sit idle past the sweeper's limit.
 */
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, Session>>>,
}

fn new_session_id() -> SessionId {
    format!("{:032x}", rand::rng().random::<u128>())
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create(&self, form: ScheduleForm) -> SessionId {
        let (tx, _) = broadcast::channel(UPDATE_CHANNEL_CAPACITY);
        let mut guard = self.sessions.write().await;

        let mut id = new_session_id();
        while guard.contains_key(&id) {
            id = new_session_id();
        }
        guard.insert(id.clone(), Session { form, tx, last_touched: Instant::now() });
        info!("Created session {} ({} open).", id, guard.len());
        id
    }

    pub async fn read<T>(&self, id: &str, f: impl FnOnce(&ScheduleForm) -> T) -> AppResult<T> {
        let mut guard = self.sessions.write().await;
        let session = guard
            .get_mut(id)
            .ok_or_else(|| AppError::SessionNotFound(id.to_string()))?;
        Ok(f(&session.touch().form))
    }

    /// Runs one mutation against the session's form and publishes the
    /// update it reports, if any. Nothing is published when the mutation fails.
    pub async fn update<T>(
        &self,
        id: &str,
        f: impl FnOnce(&mut ScheduleForm) -> Result<(T, Option<FormUpdate>), FormError>,
    ) -> AppResult<T> {
        let mut guard = self.sessions.write().await;
        let session = guard
            .get_mut(id)
            .ok_or_else(|| AppError::SessionNotFound(id.to_string()))?
            .touch();

        let (result, update) = f(&mut session.form)?;
        if let Some(update) = update {
            publish(&session.tx, &update);
        }
        Ok(result)
    }

    pub async fn subscribe(&self, id: &str) -> AppResult<broadcast::Receiver<String>> {
        let mut guard = self.sessions.write().await;
        guard
            .get_mut(id)
            .map(|session| session.touch().tx.subscribe())
            .ok_or_else(|| AppError::SessionNotFound(id.to_string()))
    }

    /// Ends a session. Open subscriptions see their channel close.
    pub async fn remove(&self, id: &str) -> AppResult<()> {
        let mut guard = self.sessions.write().await;
        match guard.remove(id) {
            Some(_) => {
                info!("Ended session {} ({} open).", id, guard.len());
                Ok(())
            }
            None => Err(AppError::SessionNotFound(id.to_string())),
        }
    }

    /// Drops every session untouched for at least `idle`. Returns how many went.
    pub async fn sweep_idle(&self, idle: Duration) -> usize {
        let mut guard = self.sessions.write().await;
        let before = guard.len();
        guard.retain(|_, session| session.last_touched.elapsed() < idle);

        let swept = before - guard.len();
        if swept > 0 {
            info!("Swept {} idle sessions ({} open).", swept, guard.len());
        }
        swept
    }

    pub fn spawn_idle_sweeper(&self, idle: Duration) -> JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(idle.clamp(MIN_SWEEP_PERIOD, MAX_SWEEP_PERIOD));
            loop {
                ticker.tick().await;
                store.sweep_idle(idle).await;
            }
        })
    }
}
