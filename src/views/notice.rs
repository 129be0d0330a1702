//! Transient user-facing notices.
//!
//! Success and error messages share the board but carry an explicit
//! severity. Each notice expires a fixed time after it is posted.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tokio::sync::Mutex;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Longest time a notice may stay up.
pub const MAX_NOTICE_TTL_SECS: u64 = 24 * 60 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum Severity {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Notice {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub id: u64,
    pub severity: Severity,
    pub message: String,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub created_at: DateTime<Utc>,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub expires_at: DateTime<Utc>,
}

struct Board {
    next_id: u64,
    notices: Vec<Notice>,
}

/// Notices awaiting display.
pub struct NoticeBoard {
    ttl: Duration,
    board: Mutex<Board>,
}

impl NoticeBoard {
    /// `ttl_secs` is capped at [`MAX_NOTICE_TTL_SECS`].
    pub fn new(ttl_secs: u64) -> Self {
        let ttl_secs = ttl_secs.min(MAX_NOTICE_TTL_SECS) as i64;
        Self {
            ttl: Duration::seconds(ttl_secs),
            board: Mutex::new(Board {
                next_id: 1,
                notices: Vec::new(),
            }),
        }
    }

    pub async fn success(&self, message: &str) -> Notice {
        self.post(Severity::Success, message, Utc::now()).await
    }

    pub async fn error(&self, message: &str) -> Notice {
        self.post(Severity::Error, message, Utc::now()).await
    }

    pub async fn post(&self, severity: Severity, message: &str, now: DateTime<Utc>) -> Notice {
        let mut board = self.board.lock().await;
        board.notices.retain(|n| n.expires_at > now);
        let notice = Notice {
            id: board.next_id,
            severity,
            message: message.to_string(),
            created_at: now,
            expires_at: now.checked_add_signed(self.ttl).unwrap_or(DateTime::<Utc>::MAX_UTC),
        };
        board.next_id += 1;
        board.notices.push(notice.clone());
        notice
    }

    /// Notices still visible at `now`; expired ones are pruned.
    pub async fn active_at(&self, now: DateTime<Utc>) -> Vec<Notice> {
        let mut board = self.board.lock().await;
        board.notices.retain(|n| n.expires_at > now);
        board.notices.clone()
    }

    pub async fn active(&self) -> Vec<Notice> {
        self.active_at(Utc::now()).await
    }

    /// Remove a notice. Returns false if it was already gone.
    pub async fn dismiss(&self, id: u64) -> bool {
        let mut board = self.board.lock().await;
        let before = board.notices.len();
        board.notices.retain(|n| n.id != id);
        board.notices.len() != before
    }
}
