//! Authenticated session state.
//!
//! A session moves through `Uninitiated → Authenticating → Active →
//! Expired`, with `Failed` as the terminal state for rejected credentials.
//! The state lives in an atomic so that a session shared across any number
//! of concurrent batch calls observes exactly one `Active → Expired`
//! transition: detection races resolve through compare-and-swap, never
//! load-then-check. Everything else about the session (ticket, endpoint,
//! locale) is written once at activation and read-only afterwards.

use std::sync::Arc;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicU8, Ordering};

use chrono::{DateTime, Utc};
use url::Url;

use crate::error::ClientError;

/// Lifecycle state of a [`Session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SessionStatus {
    /// No ticket; the only valid move is to begin authentication.
    Uninitiated = 0,
    /// Authentication request in flight.
    Authenticating = 1,
    /// Ticket valid; usable by any number of concurrent batch calls.
    Active = 2,
    /// The service reported the ticket expired or invalid. Terminal.
    Expired = 3,
    /// The service rejected the credentials. Terminal.
    Failed = 4,
}

impl SessionStatus {
    fn from_u8(value: u8) -> SessionStatus {
        match value {
            0 => SessionStatus::Uninitiated,
            1 => SessionStatus::Authenticating,
            2 => SessionStatus::Active,
            3 => SessionStatus::Expired,
            _ => SessionStatus::Failed,
        }
    }
}

#[derive(Debug)]
pub(crate) struct SessionData {
    pub ticket: String,
    pub endpoint: Url,
    pub locale: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug)]
struct Inner {
    state: AtomicU8,
    data: OnceLock<SessionData>,
}

/// One authenticated connection to the service.
///
/// Cheap to clone; all clones share the same state, so an expiry detected
/// by one batch call is immediately visible to every other holder.
#[derive(Debug, Clone)]
pub struct Session {
    inner: Arc<Inner>,
}

impl Session {
    /// Creates a fresh, unauthenticated session.
    pub fn new() -> Self {
        Session {
            inner: Arc::new(Inner {
                state: AtomicU8::new(SessionStatus::Uninitiated as u8),
                data: OnceLock::new(),
            }),
        }
    }

    /// The current lifecycle state.
    pub fn status(&self) -> SessionStatus {
        SessionStatus::from_u8(self.inner.state.load(Ordering::Acquire))
    }

    /// The session ticket, once authentication has completed. The ticket
    /// remains readable after expiry for diagnostic purposes; check
    /// [`Session::status`] before using it.
    pub fn ticket(&self) -> Option<&str> {
        self.inner.data.get().map(|data| data.ticket.as_str())
    }

    /// The endpoint the service assigned to this session.
    pub fn endpoint(&self) -> Option<&Url> {
        self.inner.data.get().map(|data| &data.endpoint)
    }

    /// The locale the service reported for this session.
    pub fn locale(&self) -> Option<&str> {
        self.inner.data.get().and_then(|data| data.locale.as_deref())
    }

    /// When authentication completed.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.inner.data.get().map(|data| data.created_at)
    }

    fn transition(&self, from: SessionStatus, to: SessionStatus) -> bool {
        self.inner
            .state
            .compare_exchange(from as u8, to as u8, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Moves `Uninitiated → Authenticating`; any other starting state is a
    /// caller error.
    pub(crate) fn begin_authentication(&self) -> Result<(), ClientError> {
        if self.transition(SessionStatus::Uninitiated, SessionStatus::Authenticating) {
            Ok(())
        } else {
            Err(ClientError::InvalidSession {
                status: self.status(),
            })
        }
    }

    /// Moves `Authenticating → Active`, publishing the session data.
    pub(crate) fn activate(&self, data: SessionData) {
        let stored = self.inner.data.set(data).is_ok();
        debug_assert!(stored, "session activated twice");
        self.transition(SessionStatus::Authenticating, SessionStatus::Active);
    }

    /// Moves `Authenticating → Failed` after a remote credential rejection.
    pub(crate) fn fail_authentication(&self) {
        self.transition(SessionStatus::Authenticating, SessionStatus::Failed);
    }

    /// Moves `Authenticating → Uninitiated` after cancellation or a
    /// transport-level failure, leaving the session retryable.
    pub(crate) fn cancel_authentication(&self) {
        self.transition(SessionStatus::Authenticating, SessionStatus::Uninitiated);
    }

    /// Moves `Active → Expired`. Returns whether this call performed the
    /// transition; concurrent detections race through the CAS and exactly
    /// one caller wins.
    pub(crate) fn mark_expired(&self) -> bool {
        self.transition(SessionStatus::Active, SessionStatus::Expired)
    }
}

impl Default for Session {
    fn default() -> Self {
        Session::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn active_session() -> Session {
        let session = Session::new();
        session.begin_authentication().unwrap();
        session.activate(SessionData {
            ticket: "ticket-1".to_string(),
            endpoint: Url::parse("https://unit.test/xml/v2").unwrap(),
            locale: Some("en_US".to_string()),
            created_at: Utc::now(),
        });
        session
    }

    #[test]
    fn test_lifecycle_happy_path() {
        let session = Session::new();
        assert_eq!(session.status(), SessionStatus::Uninitiated);
        assert_eq!(session.ticket(), None);

        session.begin_authentication().unwrap();
        assert_eq!(session.status(), SessionStatus::Authenticating);

        session.activate(SessionData {
            ticket: "ticket-1".to_string(),
            endpoint: Url::parse("https://unit.test/xml/v2").unwrap(),
            locale: None,
            created_at: Utc::now(),
        });
        assert_eq!(session.status(), SessionStatus::Active);
        assert_eq!(session.ticket(), Some("ticket-1"));
    }

    #[test]
    fn test_begin_authentication_twice_is_rejected() {
        let session = Session::new();
        session.begin_authentication().unwrap();
        assert!(matches!(
            session.begin_authentication(),
            Err(ClientError::InvalidSession {
                status: SessionStatus::Authenticating
            })
        ));
    }

    #[test]
    fn test_cancelled_authentication_is_retryable() {
        let session = Session::new();
        session.begin_authentication().unwrap();
        session.cancel_authentication();
        assert_eq!(session.status(), SessionStatus::Uninitiated);
        session.begin_authentication().unwrap();
    }

    #[test]
    fn test_failed_is_terminal() {
        let session = Session::new();
        session.begin_authentication().unwrap();
        session.fail_authentication();
        assert_eq!(session.status(), SessionStatus::Failed);
        assert!(session.begin_authentication().is_err());
    }

    #[test]
    fn test_exactly_one_expiry_transition() {
        let session = active_session();
        assert!(session.mark_expired());
        assert!(!session.mark_expired());
        assert_eq!(session.status(), SessionStatus::Expired);
    }

    #[test]
    fn test_concurrent_expiry_has_single_winner() {
        let session = active_session();
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let shared = session.clone();
                std::thread::spawn(move || shared.mark_expired())
            })
            .collect();
        let winners = handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .filter(|won| *won)
            .count();
        assert_eq!(winners, 1);
        assert_eq!(session.status(), SessionStatus::Expired);
    }
}
