//! Simulated login session and role-based screen access
//!
//! Credentials are not checked beyond a minimum password length. Sign-in
//! derives the role from the email address; registration takes it from the
//! sign-up form.
//!
//! The session is kept in a pluggable [`SessionStore`] so the TUI can persist
//! it to disk while tests use memory.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, info, warn};

use crate::error::{Result, TrainifyError};
use crate::forms::Registration;

/// Shortest password accepted at sign-in and registration
pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionRole {
    Admin,
    User,
}

impl SessionRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionRole::Admin => "admin",
            SessionRole::User => "user",
        }
    }
}

/// The signed-in account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub email: String,
    pub name: String,
    pub role: SessionRole,
}

impl SessionUser {
    /// Derive a session user from an email address.
    ///
    /// The display name is the part before `@`; any address containing
    /// "admin" gets the admin role.
    pub fn from_email(email: &str) -> Self {
        let email = email.trim();
        let name = email.split('@').next().unwrap_or(email).to_string();
        let role = if email.to_lowercase().contains("admin") {
            SessionRole::Admin
        } else {
            SessionRole::User
        };

        Self {
            email: email.to_string(),
            name,
            role,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == SessionRole::Admin
    }
}

/// Storage for the current session
pub trait SessionStore: Send + Sync {
    fn load(&self) -> Result<Option<SessionUser>>;

    fn save(&self, user: &SessionUser) -> Result<()>;

    fn clear(&self) -> Result<()>;
}

/// Session kept as a JSON file
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<SessionUser>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&self.path)?;
        match serde_json::from_str(&content) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                // A corrupt session file behaves like a signed-out session
                warn!("Ignoring unreadable session file {}: {}", self.path.display(), e);
                Ok(None)
            }
        }
    }

    fn save(&self, user: &SessionUser) -> Result<()> {
        let content = serde_json::to_string_pretty(user)?;
        std::fs::write(&self.path, content)?;
        debug!("Session saved to {}", self.path.display());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Session kept in process memory
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    user: Mutex<Option<SessionUser>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<SessionUser>> {
        let user = self
            .user
            .lock()
            .map_err(|_| TrainifyError::Session("session lock poisoned".to_string()))?;
        Ok(user.clone())
    }

    fn save(&self, user: &SessionUser) -> Result<()> {
        let mut slot = self
            .user
            .lock()
            .map_err(|_| TrainifyError::Session("session lock poisoned".to_string()))?;
        *slot = Some(user.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut slot = self
            .user
            .lock()
            .map_err(|_| TrainifyError::Session("session lock poisoned".to_string()))?;
        *slot = None;
        Ok(())
    }
}

/// Outcome of checking a screen against the current session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allowed,
    /// Nobody is signed in
    RedirectToLogin,
    /// Signed in with a different role; go to that role's home screen
    RedirectToHome(SessionRole),
}

/// Current session backed by a store
pub struct AuthSession {
    store: Box<dyn SessionStore>,
    user: Option<SessionUser>,
}

impl AuthSession {
    /// Restore whatever session the store holds
    pub fn restore(store: Box<dyn SessionStore>) -> Result<Self> {
        let user = store.load()?;
        if let Some(ref user) = user {
            info!("Restored session for {} ({})", user.email, user.role.as_str());
        }
        Ok(Self { store, user })
    }

    pub fn user(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn login(&mut self, email: &str, password: &str) -> Result<&SessionUser> {
        if email.trim().is_empty() || password.trim().is_empty() {
            return Err(TrainifyError::InvalidCredentials);
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(TrainifyError::PasswordTooShort(MIN_PASSWORD_LEN));
        }

        let user = SessionUser::from_email(email);
        self.store.save(&user)?;
        info!("Signed in as {} ({})", user.email, user.role.as_str());
        Ok(&*self.user.insert(user))
    }

    /// Create an account and sign in with the role chosen at sign-up
    pub fn register(&mut self, registration: &Registration) -> Result<&SessionUser> {
        let email = registration.email.trim();
        if email.is_empty() || registration.full_name.trim().is_empty() {
            return Err(TrainifyError::InvalidCredentials);
        }
        if registration.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(TrainifyError::PasswordTooShort(MIN_PASSWORD_LEN));
        }

        let user = SessionUser {
            email: email.to_string(),
            name: registration.full_name.trim().to_string(),
            role: registration.role,
        };
        self.store.save(&user)?;
        info!("Registered {} ({})", user.email, user.role.as_str());
        Ok(&*self.user.insert(user))
    }

    pub fn logout(&mut self) -> Result<()> {
        self.store.clear()?;
        if let Some(user) = self.user.take() {
            info!("Signed out {}", user.email);
        }
        Ok(())
    }

    /// Check access to a screen that needs `required` (or just a session when `None`)
    pub fn guard(&self, required: Option<SessionRole>) -> Access {
        match (&self.user, required) {
            (None, _) => Access::RedirectToLogin,
            (Some(user), Some(role)) if user.role != role => Access::RedirectToHome(user.role),
            _ => Access::Allowed,
        }
    }
}
