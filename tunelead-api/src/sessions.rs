//! Admin session store
//!
//! Process-wide token table behind a mutex. Single-operator use: races
//! between concurrent create/verify are tolerated. The store is an
//! explicit abstraction so it can later back onto a shared store without
//! touching the login/verify handlers.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use rand::distributions::Alphanumeric;
use rand::Rng;

/// Session lifetime: tokens expire 24 hours after creation.
pub fn session_ttl() -> Duration {
    Duration::hours(24)
}

const TOKEN_LEN: usize = 32;

#[derive(Debug, Clone)]
struct Session {
    expires_at: DateTime<Utc>,
}

/// In-process admin session table.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<String, Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new session token expiring 24 hours from now.
    pub fn create(&self) -> String {
        self.create_at(Utc::now())
    }

    /// Issue a new session token with expiry relative to `now`.
    pub fn create_at(&self, now: DateTime<Utc>) -> String {
        let token: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(TOKEN_LEN)
            .map(char::from)
            .collect();

        let session = Session {
            expires_at: now + session_ttl(),
        };
        self.sessions
            .lock()
            .expect("session table lock poisoned")
            .insert(token.clone(), session);
        token
    }

    /// Check a token. Expired tokens are evicted on check.
    pub fn verify(&self, token: &str) -> bool {
        self.verify_at(token, Utc::now())
    }

    /// Check a token against the given instant.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> bool {
        let mut sessions = self.sessions.lock().expect("session table lock poisoned");
        match sessions.get(token) {
            None => false,
            Some(session) if now > session.expires_at => {
                sessions.remove(token);
                false
            }
            Some(_) => true,
        }
    }

    /// Number of tokens currently held (expired ones included until checked).
    pub fn len(&self) -> usize {
        self.sessions
            .lock()
            .expect("session table lock poisoned")
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
