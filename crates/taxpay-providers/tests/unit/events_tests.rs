//! Event bus tests

use futures::StreamExt;
use std::time::Duration;
use taxpay_domain::ports::EventBusProvider;
use taxpay_providers::events::{NullEventBus, TokioEventBusProvider};

#[tokio::test]
async fn test_publish_without_subscribers_reaches_nobody() {
    let bus = TokioEventBusProvider::new();
    let delivered = bus
        .publish("payments.completed", serde_json::json!({}))
        .await
        .unwrap();
    assert_eq!(delivered, 0);
    assert!(!bus.has_subscribers());
}

#[tokio::test]
async fn test_subscriber_receives_only_its_topic() {
    let bus = TokioEventBusProvider::new();
    let mut payments = bus.subscribe("payments.completed").await.unwrap();
    let _stays = bus.subscribe("stays.updated").await.unwrap();
    assert!(bus.has_subscribers());
    assert_eq!(bus.subscriber_count("payments.completed"), 1);

    bus.publish("stays.updated", serde_json::json!({"id": 1}))
        .await
        .unwrap();
    let delivered = bus
        .publish("payments.completed", serde_json::json!({"tx": "tx-1"}))
        .await
        .unwrap();
    assert_eq!(delivered, 1);

    let message = tokio::time::timeout(Duration::from_secs(1), payments.next())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(message.topic, "payments.completed");
    assert_eq!(message.payload["tx"], "tx-1");
}

#[tokio::test]
async fn test_multiple_subscribers_on_one_topic() {
    let bus = TokioEventBusProvider::with_capacity(8);
    let mut first = bus.subscribe("t").await.unwrap();
    let mut second = bus.subscribe("t").await.unwrap();

    assert_eq!(bus.publish("t", serde_json::json!(1)).await.unwrap(), 2);
    assert_eq!(first.next().await.unwrap().payload, serde_json::json!(1));
    assert_eq!(second.next().await.unwrap().payload, serde_json::json!(1));
}

#[tokio::test]
async fn test_dropped_subscription_is_not_counted() {
    let bus = TokioEventBusProvider::new();
    let stream = bus.subscribe("t").await.unwrap();
    drop(stream);
    assert_eq!(bus.publish("t", serde_json::json!(null)).await.unwrap(), 0);
}

#[tokio::test]
async fn test_idle_topics_are_pruned() {
    let bus = TokioEventBusProvider::with_capacity(4);
    let mut streams = Vec::new();
    for i in 0..100 {
        streams.push(bus.subscribe(&format!("stay.{i}")).await.unwrap());
    }
    assert_eq!(bus.topic_count(), 100);
    drop(streams);

    // Publishing to an abandoned topic drops its channel
    assert_eq!(bus.publish("stay.0", serde_json::json!(0)).await.unwrap(), 0);
    assert_eq!(bus.topic_count(), 99);

    // Subscribing sweeps every remaining idle topic
    let _live = bus.subscribe("payments.completed").await.unwrap();
    assert_eq!(bus.topic_count(), 1);
    assert_eq!(bus.subscriber_count("payments.completed"), 1);
    assert_eq!(bus.subscriber_count("stay.1"), 0);
}

#[tokio::test]
async fn test_live_topic_survives_pruning() {
    let bus = TokioEventBusProvider::new();
    let mut kept = bus.subscribe("kept").await.unwrap();
    drop(bus.subscribe("gone").await.unwrap());
    let _other = bus.subscribe("other").await.unwrap();

    assert_eq!(bus.topic_count(), 2);
    assert_eq!(bus.publish("kept", serde_json::json!("x")).await.unwrap(), 1);
    assert_eq!(kept.next().await.unwrap().payload, serde_json::json!("x"));
}

#[tokio::test]
async fn test_null_event_bus() {
    let bus = NullEventBus::new();
    assert_eq!(bus.publish("t", serde_json::json!(1)).await.unwrap(), 0);
    let mut stream = bus.subscribe("t").await.unwrap();
    assert!(stream.next().await.is_none());
    assert!(!bus.has_subscribers());
}
