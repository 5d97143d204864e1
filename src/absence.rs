//! Absence request tracking.
//!
//! Requests live for the lifetime of the process; nothing is persisted.
//! One active request per member: a new submission replaces any earlier
//! unresolved one.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use poise::serenity_prelude::UserId;
use tokio::sync::Mutex;

/// One absence request. Dates are free text and never parsed.
#[derive(Debug, Clone)]
pub struct AbsenceRequest {
    pub id: String,
    pub user_id: UserId,
    pub username: String,
    pub character_name: String,
    pub start_date: String,
    pub end_date: String,
    pub reason: String,
    pub approved: bool,
    pub requested_at: DateTime<Utc>,
}

/// Input for [`AbsenceStore::submit`].
#[derive(Debug)]
pub struct NewAbsence {
    pub user_id: UserId,
    pub username: String,
    pub character_name: String,
    pub start_date: String,
    pub end_date: String,
    pub reason: Option<String>,
}

/// In-memory absence table. Every lookup-and-mutate goes through one
/// mutex, so an approve and a deny racing on the same request cannot
/// both win.
#[derive(Default)]
pub struct AbsenceStore {
    requests: Mutex<HashMap<UserId, AbsenceRequest>>,
    seq: AtomicU64,
}

impl AbsenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a request, replacing any earlier unresolved one from the
    /// same member. The id is time-derived with a sequence suffix so
    /// two submissions in the same millisecond cannot collide.
    pub async fn submit(&self, new: NewAbsence) -> AbsenceRequest {
        let now = Utc::now();
        let id = format!(
            "{}-{}",
            now.timestamp_millis(),
            self.seq.fetch_add(1, Ordering::Relaxed)
        );
        let request = AbsenceRequest {
            id,
            user_id: new.user_id,
            username: new.username,
            character_name: new.character_name,
            start_date: new.start_date,
            end_date: new.end_date,
            reason: new.reason.unwrap_or_else(|| "Not specified".to_string()),
            approved: false,
            requested_at: now,
        };
        self.requests
            .lock()
            .await
            .insert(request.user_id, request.clone());
        request
    }

    /// Marks the request approved. The record stays in the table.
    /// `None` when the id is stale (already denied or replaced).
    pub async fn approve(&self, id: &str) -> Option<AbsenceRequest> {
        let mut requests = self.requests.lock().await;
        let request = requests.values_mut().find(|request| request.id == id)?;
        request.approved = true;
        Some(request.clone())
    }

    /// Removes the request entirely. `None` when the id is stale.
    pub async fn deny(&self, id: &str) -> Option<AbsenceRequest> {
        let mut requests = self.requests.lock().await;
        let user_id = requests
            .values()
            .find(|request| request.id == id)?
            .user_id;
        requests.remove(&user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_request(user: u64, reason: Option<&str>) -> NewAbsence {
        NewAbsence {
            user_id: UserId::new(user),
            username: format!("raider{user}"),
            character_name: "Mankrik".to_string(),
            start_date: "Apr 25".to_string(),
            end_date: "Apr 30".to_string(),
            reason: reason.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn approval_retains_the_request() {
        let store = AbsenceStore::new();
        let request = store.submit(new_request(1, Some("vacation"))).await;
        assert!(!request.approved);

        let approved = store.approve(&request.id).await.unwrap();
        assert!(approved.approved);

        // Still present afterwards; the original never cleans these up.
        let again = store.approve(&request.id).await.unwrap();
        assert!(again.approved);
    }

    #[tokio::test]
    async fn denial_removes_the_request() {
        let store = AbsenceStore::new();
        let request = store.submit(new_request(1, None)).await;

        let denied = store.deny(&request.id).await.unwrap();
        assert_eq!(denied.id, request.id);

        assert!(store.approve(&request.id).await.is_none());
        assert!(store.deny(&request.id).await.is_none());
    }

    #[tokio::test]
    async fn resubmission_replaces_the_pending_request() {
        let store = AbsenceStore::new();
        let first = store.submit(new_request(1, None)).await;
        let second = store.submit(new_request(1, None)).await;
        assert_ne!(first.id, second.id);

        // The first request's id is stale, only the newest resolves.
        assert!(store.approve(&first.id).await.is_none());
        assert!(store.approve(&second.id).await.is_some());
    }

    #[tokio::test]
    async fn missing_reason_gets_a_default() {
        let store = AbsenceStore::new();
        let request = store.submit(new_request(1, None)).await;
        assert_eq!(request.reason, "Not specified");
    }
}
