//! 消息流程测试
//!
//! Visibility (own + broadcast), reply excerpts and the soft-delete rules.

mod common;

use common::{seed_user, test_db};
use festival_server::db::messages;
use shared::AppError;
use shared::models::{MessageCreate, Role};

#[tokio::test]
async fn feed_shows_own_addressed_and_broadcast_messages() {
    let (_dir, db) = test_db().await;
    let operator = seed_user(&db, "operator1", Role::Operator).await;
    let courier_a = seed_user(&db, "courier_a", Role::Courier).await;
    let courier_b = seed_user(&db, "courier_b", Role::Courier).await;

    // Broadcast from the operator
    let broadcast = messages::create(
        &db,
        &operator,
        &MessageCreate {
            message: "Gates open at noon".to_string(),
            receiver_id: None,
            reply_to_id: None,
        },
    )
    .await
    .expect("broadcast");

    // Direct message to courier_a with a reply
    messages::create(
        &db,
        &operator,
        &MessageCreate {
            message: "Take zone A today".to_string(),
            receiver_id: Some(courier_a.id),
            reply_to_id: Some(broadcast.id),
        },
    )
    .await
    .expect("direct");

    let feed_a = messages::list_for_user(&db.read, courier_a.id).await.expect("feed a");
    assert_eq!(feed_a.len(), 2);
    assert_eq!(feed_a[0].message.message, "Gates open at noon");
    assert_eq!(feed_a[1].sender_name, "operator1");
    assert_eq!(feed_a[1].reply_to_message.as_deref(), Some("Gates open at noon"));
    assert_eq!(feed_a[1].reply_to_sender.as_deref(), Some("operator1"));

    // courier_b only sees the broadcast
    let feed_b = messages::list_for_user(&db.read, courier_b.id).await.expect("feed b");
    assert_eq!(feed_b.len(), 1);
}

#[tokio::test]
async fn soft_delete_records_who_and_when_and_hides_the_message() {
    let (_dir, db) = test_db().await;
    let operator = seed_user(&db, "operator1", Role::Operator).await;
    let courier = seed_user(&db, "courier1", Role::Courier).await;

    let note = messages::create(
        &db,
        &courier,
        &MessageCreate {
            message: "Running low on Neko-Active".to_string(),
            receiver_id: None,
            reply_to_id: None,
        },
    )
    .await
    .expect("message");
    assert!(note.deleted.is_none());

    // A different courier may not delete it
    let stranger = seed_user(&db, "courier2", Role::Courier).await;
    let err = messages::soft_delete(&db, note.id, &stranger)
        .await
        .expect_err("stranger delete");
    assert!(matches!(err, AppError::Forbidden(_)));

    // The operator may; the deletion is tagged with actor and time
    let deleted = messages::soft_delete(&db, note.id, &operator)
        .await
        .expect("operator delete");
    let mark = deleted.deleted.expect("deletion mark");
    assert_eq!(mark.by, operator.id);
    assert!(mark.at > 0);

    // Gone from every feed
    let feed = messages::list_for_user(&db.read, courier.id).await.expect("feed");
    assert!(feed.iter().all(|m| m.message.id != note.id));

    // Senders can remove their own messages
    let own = messages::create(
        &db,
        &courier,
        &MessageCreate {
            message: "typo, ignore".to_string(),
            receiver_id: None,
            reply_to_id: None,
        },
    )
    .await
    .expect("message");
    messages::soft_delete(&db, own.id, &courier)
        .await
        .expect("own delete");

    let err = messages::soft_delete(&db, 424_242, &operator)
        .await
        .expect_err("unknown id");
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn blank_messages_are_rejected() {
    let (_dir, db) = test_db().await;
    let courier = seed_user(&db, "courier1", Role::Courier).await;

    let err = messages::create(
        &db,
        &courier,
        &MessageCreate {
            message: "   ".to_string(),
            receiver_id: None,
            reply_to_id: None,
        },
    )
    .await
    .expect_err("blank message");
    assert!(matches!(err, AppError::Validation(_)));
}
