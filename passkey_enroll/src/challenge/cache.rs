use chrono::{DateTime, TimeDelta, Utc};
use std::collections::HashMap;

/// A challenge handed out for a later login by the same email.
#[derive(Clone, Debug)]
pub(crate) struct PendingChallenge {
    pub(crate) challenge: String,
    pub(crate) issued_at: DateTime<Utc>,
    pub(crate) ttl: u64,
}

impl PendingChallenge {
    /// `None` when the ttl reaches past what chrono can represent
    fn expires_at(&self) -> Option<DateTime<Utc>> {
        i64::try_from(self.ttl)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .and_then(|ttl| self.issued_at.checked_add_signed(ttl))
    }

    fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at().is_some_and(|expires_at| now > expires_at)
    }
}

/// Outstanding authentication challenges, at most one per email.
///
/// Issuing a new challenge replaces the previous one. `peek` leaves an
/// unexpired entry in place; `take` removes the entry whether or not it has
/// expired, so a challenge is usable once.
#[derive(Debug, Default)]
pub(crate) struct ChallengeCache {
    entries: HashMap<String, PendingChallenge>,
}

impl ChallengeCache {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn put(&mut self, email: &str, challenge: String, ttl: u64) {
        self.purge_expired(Utc::now());
        self.entries.insert(
            email.to_string(),
            PendingChallenge {
                challenge,
                issued_at: Utc::now(),
                ttl,
            },
        );
    }

    pub(crate) fn peek(&mut self, email: &str) -> Option<&PendingChallenge> {
        if self
            .entries
            .get(email)
            .is_some_and(|pending| pending.is_expired_at(Utc::now()))
        {
            tracing::debug!("Dropping expired challenge for {}", email);
            self.entries.remove(email);
        }
        self.entries.get(email)
    }

    pub(crate) fn take(&mut self, email: &str) -> Option<PendingChallenge> {
        let pending = self.entries.remove(email)?;
        if pending.is_expired_at(Utc::now()) {
            tracing::debug!("Challenge for {} expired at issue + {}s", email, pending.ttl);
            return None;
        }
        Some(pending)
    }

    fn purge_expired(&mut self, now: DateTime<Utc>) {
        self.entries.retain(|_, pending| !pending.is_expired_at(now));
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
