//! Message Model
//!
//! Deletion is a tagged state rather than loose nullable columns: a deleted
//! message always knows who deleted it and when, by construction.

use serde::{Deserialize, Serialize};

/// Deletion record — present iff the message was soft-deleted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageDeletion {
    pub by: i64,
    pub at: i64,
}

/// Message entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,
    pub sender_id: i64,
    /// None = broadcast to all staff
    pub receiver_id: Option<i64>,
    pub reply_to_id: Option<i64>,
    pub message: String,
    pub is_read: bool,
    pub deleted: Option<MessageDeletion>,
    pub created_at: i64,
}

/// Message as listed in the feed — joined with usernames and the replied-to
/// excerpt
#[derive(Debug, Clone, Serialize)]
pub struct MessageDetail {
    #[serde(flatten)]
    pub message: Message,
    pub sender_name: String,
    pub receiver_name: Option<String>,
    pub reply_to_message: Option<String>,
    pub reply_to_sender: Option<String>,
}

/// POST /api/messages body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageCreate {
    pub message: String,
    pub receiver_id: Option<i64>,
    pub reply_to_id: Option<i64>,
}
