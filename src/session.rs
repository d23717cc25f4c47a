use std::collections::HashMap;
use std::sync::Mutex;

use rand::Rng;

/// Shared session table mapping session identifiers to usernames.
///
/// Handlers consult and mutate this table through a single lock; the parsing
/// core never touches it. Sessions live in memory only and are lost on
/// restart.
#[derive(Debug, Default)]
pub struct SessionStore {
    inner: Mutex<HashMap<String, String>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, session_id: String, username: String) {
        self.inner
            .lock()
            .expect("session store lock poisoned")
            .insert(session_id, username);
    }

    pub fn username(&self, session_id: &str) -> Option<String> {
        self.inner
            .lock()
            .expect("session store lock poisoned")
            .get(session_id)
            .cloned()
    }

    pub fn remove(&self, session_id: &str) -> bool {
        self.inner
            .lock()
            .expect("session store lock poisoned")
            .remove(session_id)
            .is_some()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().expect("session store lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Generates a fresh session identifier: `sess_` plus 32 hex characters
    /// drawn from the thread-local CSPRNG.
    pub fn generate_id() -> String {
        const HEX: &[u8; 16] = b"0123456789abcdef";

        let mut rng = rand::thread_rng();
        let token: String = (0..32)
            .map(|_| HEX[rng.gen_range(0..16)] as char)
            .collect();

        format!("sess_{token}")
    }
}
