//! UseCase: 字幕の中継
//!
//! ルームの送信者以外の全メンバーに `new-subtitle` を配信します。
//! 送信者名の解決順は `resolve_sender_name` を参照。

use std::sync::Arc;

use crate::domain::{ConnectionId, DisplayName, MessagePusher, OutboundEvent, PresenceRepository, RoomId};

use super::{
    delivery::{self, DeliveryOrder},
    error::SubtitleError,
};

/// 字幕中継のユースケース
pub struct RelaySubtitleUseCase {
    repository: Arc<dyn PresenceRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    order: DeliveryOrder,
}

impl RelaySubtitleUseCase {
    pub fn new(
        repository: Arc<dyn PresenceRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        order: DeliveryOrder,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            order,
        }
    }

    /// 字幕を配信する
    ///
    /// `sender_id` は常に実際の接続 id。クライアントが申告した id は使わない。
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<ConnectionId>)` - 配信先
    /// * `Err(SubtitleError)` - room または text が空（何も送信しない）
    pub async fn execute(
        &self,
        sender: &ConnectionId,
        room_id: Option<RoomId>,
        text: Option<String>,
        client_supplied_name: Option<DisplayName>,
    ) -> Result<Vec<ConnectionId>, SubtitleError> {
        let room_id = room_id.ok_or(SubtitleError::MissingRoom)?;
        let text = text
            .filter(|text| !text.is_empty())
            .ok_or(SubtitleError::MissingText)?;
        let _order = self.order.enter().await;

        let route = self
            .repository
            .subtitle_route(sender, &room_id, client_supplied_name)
            .await;

        let event = OutboundEvent::NewSubtitle {
            text,
            sender_id: sender.clone(),
            name: route.sender_name,
        };
        delivery::fan_out(self.message_pusher.as_ref(), &route.recipients, &event).await;

        tracing::debug!(
            connection_id = %sender,
            room_id = %room_id,
            recipients = route.recipients.len(),
            "subtitle relayed"
        );
        Ok(route.recipients)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecase::test_support::{
        connect, create_test_message_pusher, create_test_repository, drain, id, room,
    };
    use serde_json::json;

    #[tokio::test]
    async fn test_subtitle_reaches_everyone_but_sender() {
        // テスト項目: 字幕は送信者以外のルームメンバーに届き、他のルームには届かない
        // given (前提条件):
        let repository = create_test_repository();
        let pusher = create_test_message_pusher();
        let mut rx_a = connect(&repository, &pusher, "a").await;
        let mut rx_b = connect(&repository, &pusher, "b").await;
        let mut rx_c = connect(&repository, &pusher, "c").await;
        let mut rx_d = connect(&repository, &pusher, "d").await;
        let alice = DisplayName::new("Alice".to_string()).unwrap();
        repository.join(&id("a"), &room("r1"), Some(alice)).await;
        repository.join(&id("b"), &room("r1"), None).await;
        repository.join(&id("c"), &room("r1"), None).await;
        repository.join(&id("d"), &room("r2"), None).await;
        let usecase = RelaySubtitleUseCase::new(repository.clone(), pusher.clone(), DeliveryOrder::new());

        // when (操作):
        let recipients = usecase
            .execute(&id("a"), Some(room("r1")), Some("hello".to_string()), None)
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(recipients, vec![id("b"), id("c")]);
        let expected = json!({"event": "new-subtitle", "text": "hello", "sender_id": "a", "name": "Alice"});
        assert_eq!(drain(&mut rx_b), vec![expected.clone()]);
        assert_eq!(drain(&mut rx_c), vec![expected]);
        assert!(drain(&mut rx_a).is_empty());
        assert!(drain(&mut rx_d).is_empty());
    }

    #[tokio::test]
    async fn test_subtitle_sender_name_falls_back() {
        // テスト項目: ルームにいない送信者の名前は申告名、なければ User_ ラベルになる
        // given (前提条件):
        let repository = create_test_repository();
        let pusher = create_test_message_pusher();
        let _rx_a = connect(&repository, &pusher, "abcdef").await;
        let mut rx_b = connect(&repository, &pusher, "b").await;
        repository.join(&id("b"), &room("r1"), None).await;
        let usecase = RelaySubtitleUseCase::new(repository.clone(), pusher.clone(), DeliveryOrder::new());
        let supplied = DisplayName::new("Carol".to_string()).unwrap();

        // when (操作):
        usecase
            .execute(&id("abcdef"), Some(room("r1")), Some("one".to_string()), Some(supplied))
            .await
            .unwrap();
        usecase
            .execute(&id("abcdef"), Some(room("r1")), Some("two".to_string()), None)
            .await
            .unwrap();

        // then (期待する結果):
        let frames = drain(&mut rx_b);
        assert_eq!(frames[0]["name"], "Carol");
        assert_eq!(frames[1]["name"], "User_abcd");
        assert_eq!(frames[1]["sender_id"], "abcdef");
    }

    #[tokio::test]
    async fn test_subtitle_with_missing_fields_is_dropped() {
        // テスト項目: room または text が空の字幕は破棄される
        // given (前提条件):
        let repository = create_test_repository();
        let pusher = create_test_message_pusher();
        let _rx_a = connect(&repository, &pusher, "a").await;
        let mut rx_b = connect(&repository, &pusher, "b").await;
        repository.join(&id("a"), &room("r1"), None).await;
        repository.join(&id("b"), &room("r1"), None).await;
        let usecase = RelaySubtitleUseCase::new(repository.clone(), pusher.clone(), DeliveryOrder::new());

        // when (操作):
        let no_room = usecase
            .execute(&id("a"), None, Some("hello".to_string()), None)
            .await;
        let empty_text = usecase
            .execute(&id("a"), Some(room("r1")), Some(String::new()), None)
            .await;

        // then (期待する結果):
        assert_eq!(no_room, Err(SubtitleError::MissingRoom));
        assert_eq!(empty_text, Err(SubtitleError::MissingText));
        assert!(drain(&mut rx_b).is_empty());
    }
}
