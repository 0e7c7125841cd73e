use chrono::Utc;
use std::sync::Arc;
use tokio::sync::{RwLock, mpsc};
use tracing::{debug, info, warn};

use crate::auth::events::{SessionEvent, SessionEvents};
use crate::auth::jwt;
use crate::auth::store::{SessionStore, StoredSession};
use crate::error::SessionError;
use crate::models::{LoginResponse, UserDto};

/// The login session shared by the API client and every view.
///
/// Cloning is cheap; clones share state, store and subscribers.
#[derive(Clone)]
pub struct Session {
    current: Arc<RwLock<Option<StoredSession>>>,
    store: Arc<dyn SessionStore>,
    events: Arc<SessionEvents>,
}

impl Session {
    /// An empty session backed by `store`. Call [`Session::restore`] to pick
    /// up a previous login.
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self {
            current: Arc::new(RwLock::new(None)),
            store,
            events: Arc::new(SessionEvents::new()),
        }
    }

    /// Load a previously stored session. Tokens already past their `exp` are
    /// discarded instead of being sent to the backend.
    pub async fn restore(&self) -> Result<Option<UserDto>, SessionError> {
        let Some(stored) = self.store.load()? else {
            debug!("No stored session");
            return Ok(None);
        };

        if jwt::is_expired(&stored.token, Utc::now()) {
            info!("Stored session for {} has expired", stored.user.username);
            self.store.clear()?;
            return Ok(None);
        }

        let user = stored.user.clone();
        *self.current.write().await = Some(stored);
        debug!("Restored session for {}", user.username);
        Ok(Some(user))
    }

    /// Remember the token and user from a successful login or signup.
    pub async fn establish(&self, response: &LoginResponse) -> Result<(), SessionError> {
        let stored = StoredSession {
            token: response.token.clone(),
            user: response.user.clone(),
        };
        self.store.save(&stored)?;
        *self.current.write().await = Some(stored);

        self.events
            .broadcast(SessionEvent::LoggedIn {
                username: response.user.username.clone(),
            })
            .await;
        Ok(())
    }

    pub async fn token(&self) -> Option<String> {
        self.current.read().await.as_ref().map(|s| s.token.clone())
    }

    pub async fn current_user(&self) -> Option<UserDto> {
        self.current.read().await.as_ref().map(|s| s.user.clone())
    }

    /// The logged-in user's id, required by create requests.
    pub async fn user_id(&self) -> Result<i64, SessionError> {
        self.current
            .read()
            .await
            .as_ref()
            .map(|s| s.user.id)
            .ok_or(SessionError::NotLoggedIn)
    }

    pub async fn is_authenticated(&self) -> bool {
        self.current.read().await.is_some()
    }

    /// User-initiated logout.
    pub async fn logout(&self) -> Result<(), SessionError> {
        self.clear().await?;
        self.events.broadcast(SessionEvent::LoggedOut).await;
        Ok(())
    }

    /// Clear the session because the backend no longer accepts it, and tell
    /// every subscriber why.
    pub async fn force_logout(&self, reason: &str) {
        warn!("Forced logout: {reason}");
        if let Err(e) = self.clear().await {
            warn!("Failed to clear stored session: {e}");
        }
        self.events
            .broadcast(SessionEvent::ForcedLogout {
                reason: reason.to_string(),
            })
            .await;
    }

    pub async fn subscribe(&self) -> mpsc::UnboundedReceiver<SessionEvent> {
        self.events.subscribe().await
    }

    async fn clear(&self) -> Result<(), SessionError> {
        *self.current.write().await = None;
        self.store.clear()
    }
}
