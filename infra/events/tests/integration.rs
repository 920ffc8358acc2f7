use sdash_event_bus::{EventBus, EventBusError, EventReceiverExt};

#[derive(Clone, Debug, PartialEq, Eq)]
struct TestEvent(u64);

#[derive(Clone, Debug, PartialEq, Eq)]
struct OtherEvent(&'static str);

#[tokio::test]
async fn event_reaches_subscriber() {
    let bus = EventBus::new();
    let mut rx = bus.subscribe::<TestEvent>().unwrap();

    bus.publish(TestEvent(42)).unwrap();

    let received = rx.recv_event().await.unwrap();
    assert_eq!(*received, TestEvent(42));
}

#[tokio::test]
async fn multiple_subscribers_each_get_the_event() {
    let bus = EventBus::new();
    let mut rx1 = bus.subscribe::<TestEvent>().unwrap();
    let mut rx2 = bus.subscribe::<TestEvent>().unwrap();

    let delivered = bus.publish(TestEvent(100)).unwrap();
    assert_eq!(delivered, 2);

    assert_eq!(*rx1.recv_event().await.unwrap(), TestEvent(100));
    assert_eq!(*rx2.recv_event().await.unwrap(), TestEvent(100));
}

#[tokio::test]
async fn event_types_are_isolated() {
    let bus = EventBus::new();
    let mut grades = bus.subscribe::<TestEvent>().unwrap();
    let _other = bus.subscribe::<OtherEvent>().unwrap();

    bus.publish(OtherEvent("noise")).unwrap();
    bus.publish(TestEvent(7)).unwrap();

    // Only the matching event type is delivered to this receiver.
    assert_eq!(*grades.recv_event().await.unwrap(), TestEvent(7));
}

#[tokio::test]
async fn publish_without_subscribers_is_dropped() {
    let bus = EventBus::new();
    let delivered = bus.publish(TestEvent(1)).unwrap();
    assert_eq!(delivered, 0);
}

#[tokio::test]
async fn lagged_receiver_skips_to_fresh_tail() {
    let bus = EventBus::new();
    let mut rx = bus.subscribe_with_capacity::<TestEvent>(2).unwrap();

    for i in 0..100 {
        bus.publish(TestEvent(i)).unwrap();
    }

    let first = rx.recv_event().await.unwrap();
    assert!(first.0 >= 98, "expected the fresh tail, got {}", first.0);
}

#[test]
fn zero_capacity_is_rejected() {
    let bus = EventBus::new();
    let err = bus.subscribe_with_capacity::<TestEvent>(0).unwrap_err();
    assert!(matches!(err, EventBusError::InvalidCapacity(0)));
}

#[tokio::test]
async fn closed_channel_yields_none() {
    let bus = EventBus::new();
    let mut rx = bus.subscribe::<TestEvent>().unwrap();

    assert_eq!(bus.shutdown(), 1);
    assert!(rx.recv_event().await.is_none());
}
