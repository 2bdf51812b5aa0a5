//! Message database operations

use shared::AppError;
use shared::models::{Message, MessageCreate, MessageDeletion, MessageDetail};
use sqlx::SqlitePool;

use crate::auth::CurrentUser;
use crate::util::now_millis;

use super::DbService;

/// Raw row — deletion state as stored (flag + nullable audit columns)
#[derive(Debug, sqlx::FromRow)]
struct MessageRow {
    id: i64,
    sender_id: i64,
    receiver_id: Option<i64>,
    reply_to_id: Option<i64>,
    message: String,
    is_read: bool,
    is_deleted: bool,
    deleted_by: Option<i64>,
    deleted_at: Option<i64>,
    created_at: i64,
}

impl MessageRow {
    /// Fold the three deletion columns into the tagged state. A deleted row
    /// without its audit fields indicates a corrupted write, not a value the
    /// model can represent.
    fn into_message(self) -> Result<Message, AppError> {
        let deleted = match (self.is_deleted, self.deleted_by, self.deleted_at) {
            (false, _, _) => None,
            (true, Some(by), Some(at)) => Some(MessageDeletion { by, at }),
            (true, _, _) => {
                tracing::error!(message_id = self.id, "Deleted message missing audit fields");
                return Err(AppError::Internal);
            }
        };
        Ok(Message {
            id: self.id,
            sender_id: self.sender_id,
            receiver_id: self.receiver_id,
            reply_to_id: self.reply_to_id,
            message: self.message,
            is_read: self.is_read,
            deleted,
            created_at: self.created_at,
        })
    }
}

/// Feed for one user: own messages, messages addressed to them and staff
/// broadcasts — deleted ones excluded, oldest first.
pub async fn list_for_user(
    pool: &SqlitePool,
    user_id: i64,
) -> Result<Vec<MessageDetail>, AppError> {
    #[derive(sqlx::FromRow)]
    struct FeedRow {
        #[sqlx(flatten)]
        message: MessageRow,
        sender_name: String,
        receiver_name: Option<String>,
        reply_to_message: Option<String>,
        reply_to_sender: Option<String>,
    }

    let rows: Vec<FeedRow> = sqlx::query_as(
        "SELECT m.id, m.sender_id, m.receiver_id, m.reply_to_id, m.message, m.is_read, \
         m.is_deleted, m.deleted_by, m.deleted_at, m.created_at, \
         s.username AS sender_name, \
         r.username AS receiver_name, \
         rm.message AS reply_to_message, \
         rs.username AS reply_to_sender \
         FROM messages m \
         JOIN users s ON m.sender_id = s.id \
         LEFT JOIN users r ON m.receiver_id = r.id \
         LEFT JOIN messages rm ON m.reply_to_id = rm.id \
         LEFT JOIN users rs ON rm.sender_id = rs.id \
         WHERE (m.sender_id = ?1 OR m.receiver_id = ?1 OR m.receiver_id IS NULL) \
         AND m.is_deleted = 0 \
         ORDER BY m.created_at ASC, m.id ASC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    rows.into_iter()
        .map(|r| {
            Ok(MessageDetail {
                sender_name: r.sender_name,
                receiver_name: r.receiver_name,
                reply_to_message: r.reply_to_message,
                reply_to_sender: r.reply_to_sender,
                message: r.message.into_message()?,
            })
        })
        .collect()
}

pub async fn create(
    db: &DbService,
    sender: &CurrentUser,
    data: &MessageCreate,
) -> Result<Message, AppError> {
    if data.message.trim().is_empty() {
        return Err(AppError::validation("Message text is required"));
    }

    let id = sqlx::query(
        "INSERT INTO messages (sender_id, receiver_id, reply_to_id, message, is_read, \
         is_deleted, created_at) VALUES (?, ?, ?, ?, 0, 0, ?)",
    )
    .bind(sender.id)
    .bind(data.receiver_id)
    .bind(data.reply_to_id)
    .bind(&data.message)
    .bind(now_millis())
    .execute(&db.write)
    .await?
    .last_insert_rowid();

    find_by_id(&db.read, id)
        .await?
        .ok_or(AppError::Internal)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Message>, AppError> {
    let row: Option<MessageRow> = sqlx::query_as(
        "SELECT id, sender_id, receiver_id, reply_to_id, message, is_read, is_deleted, \
         deleted_by, deleted_at, created_at FROM messages WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    row.map(MessageRow::into_message).transpose()
}

/// Soft delete. Senders may delete their own messages; admin/operator any.
pub async fn soft_delete(
    db: &DbService,
    id: i64,
    actor: &CurrentUser,
) -> Result<Message, AppError> {
    let message = find_by_id(&db.read, id)
        .await?
        .ok_or_else(|| AppError::not_found("Message not found"))?;

    let can_delete = actor.role.can_manage_catalog() || message.sender_id == actor.id;
    if !can_delete {
        return Err(AppError::forbidden(
            "Insufficient permissions to delete this message",
        ));
    }

    sqlx::query(
        "UPDATE messages SET is_deleted = 1, deleted_by = ?, deleted_at = ? WHERE id = ?",
    )
    .bind(actor.id)
    .bind(now_millis())
    .bind(id)
    .execute(&db.write)
    .await?;

    find_by_id(&db.read, id).await?.ok_or(AppError::Internal)
}
