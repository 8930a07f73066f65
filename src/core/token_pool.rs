//! Credential pool used to authorize execute calls
//!
//! The pool is either fixed at construction or grows lazily from the tokens
//! seen on incoming calls. Batches pick their credential round-robin, so a
//! batch can run under a token harvested from another caller. That is the
//! accepted cost of lazy loading: the execute call is authorized by whichever
//! identity is next in the pool, not by each member's own token.

use parking_lot::Mutex;
use std::collections::HashMap;

#[derive(Debug, Default)]
struct PoolState {
    tokens: Vec<String>,
    usage: HashMap<String, u64>,
    cursor: usize,
}

/// Round-robin pool of access tokens
#[derive(Debug, Default)]
pub struct TokenPool {
    state: Mutex<PoolState>,
}

impl TokenPool {
    /// Create an empty pool
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a pool pre-filled with `tokens`
    pub fn with_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let pool = Self::new();
        for token in tokens {
            pool.append(token);
        }
        pool
    }

    /// Add a token; returns `false` if it was empty or already pooled
    pub fn append<S: Into<String>>(&self, token: S) -> bool {
        let token = token.into();
        if token.is_empty() {
            return false;
        }

        let mut state = self.state.lock();
        if state.usage.contains_key(&token) {
            return false;
        }
        state.usage.insert(token.clone(), 0);
        state.tokens.push(token);
        true
    }

    /// Number of distinct tokens
    pub fn len(&self) -> usize {
        self.state.lock().tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Token for the next dispatched batch, rotating through the pool
    pub fn next(&self) -> Option<String> {
        let mut state = self.state.lock();
        if state.tokens.is_empty() {
            return None;
        }

        let index = state.cursor % state.tokens.len();
        state.cursor = index + 1;
        let token = state.tokens[index].clone();
        if let Some(count) = state.usage.get_mut(&token) {
            *count += 1;
        }
        Some(token)
    }

    /// How many batches `token` has authorized so far
    pub fn usage(&self, token: &str) -> Option<u64> {
        self.state.lock().usage.get(token).copied()
    }
}
