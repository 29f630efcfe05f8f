//! End-to-end schedule lifecycle: materialize, populate, dispatch,
//! follow-up spawn, anchor advancement.

use chrono::{Duration, TimeZone as _, Utc};

use plume_domain::{DeliveryStatus, Frequency, advance};
use plume_newsletter::usecase::dispatch::DispatchUseCase;
use plume_newsletter::usecase::materialize::MaterializeUseCase;
use plume_newsletter::usecase::populate::PopulateUseCase;
use plume_testing::fixtures;
use plume_testing::mocks::{
    MemoryContentItemRepository, MemoryDeliveryRepository, MemorySectionRepository,
    MemorySubscriberRepository, MockCollector, MockMailTransport,
};

#[tokio::test]
async fn should_carry_a_weekly_schedule_through_one_full_cycle() {
    let anchor = fixtures::reference_time();
    let owner = fixtures::subscriber("reader@example.com");
    let section = fixtures::section(owner.id, "Rust", Frequency::Weekly, anchor);

    let sections = MemorySectionRepository::with(vec![section.clone()]);
    let deliveries = MemoryDeliveryRepository::default();
    let content = MemoryContentItemRepository::with(vec![
        fixtures::content_item("Rust", "Async closures land"),
        fixtures::content_item("Rust", "Borrow checker internals"),
    ]);
    let subscribers = MemorySubscriberRepository::with(vec![owner]);
    let mail = MockMailTransport::succeeding();

    // Materialize a day ahead of the anchor.
    let materialize = MaterializeUseCase {
        sections: sections.clone(),
        deliveries: deliveries.clone(),
        collector: MockCollector::new(),
    };
    let report = materialize.execute(anchor - Duration::days(1)).await.unwrap();
    assert_eq!(report.created, 1);

    // Populate before the send date.
    let populate = PopulateUseCase {
        sections: sections.clone(),
        deliveries: deliveries.clone(),
        content,
        items_per_topic: 5,
    };
    let report = populate.execute_all().await.unwrap();
    assert_eq!(report.rendered, 1);

    // Dispatch at the anchor instant.
    let delivery = deliveries.all().into_iter().next().unwrap();
    let dispatch = DispatchUseCase {
        deliveries: deliveries.clone(),
        sections: sections.clone(),
        subscribers,
        mail: mail.clone(),
    };
    let receipt = dispatch.execute(delivery.id, anchor).await.unwrap();

    // The mail went out with the rendered subject.
    let sent = mail.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, "reader@example.com");
    assert_eq!(sent[0].1, "Your Rust Newsletter");

    // The sent delivery is terminal; its successor is pending one week out.
    let sent_delivery = deliveries.get(delivery.id).unwrap();
    assert_eq!(sent_delivery.status, DeliveryStatus::Sent);
    assert_eq!(sent_delivery.sent_at, Some(anchor));

    let next = deliveries.get(receipt.next_delivery_id.unwrap()).unwrap();
    assert_eq!(next.status, DeliveryStatus::Pending);
    assert_eq!(next.send_date, anchor + Duration::days(7));
    assert_eq!(next.next_date, anchor + Duration::days(14));
    assert!(next.rendered_content.is_none());

    // The section's anchors advanced in lockstep.
    let advanced = sections.get(section.id).unwrap();
    assert_eq!(advanced.anchor_send_time, anchor + Duration::days(7));
    assert_eq!(advanced.next_anchor_time, anchor + Duration::days(14));
}

#[tokio::test]
async fn should_create_exactly_one_delivery_under_concurrent_materialization() {
    let anchor = fixtures::reference_time();
    let owner = fixtures::subscriber("reader@example.com");
    let section = fixtures::section(owner.id, "Rust", Frequency::Daily, anchor);

    let sections = MemorySectionRepository::with(vec![section]);
    let deliveries = MemoryDeliveryRepository::default();

    // Two scheduler runs racing over the same section; the shared
    // uniqueness guard lets exactly one insert through.
    let first = MaterializeUseCase {
        sections: sections.clone(),
        deliveries: deliveries.clone(),
        collector: MockCollector::new(),
    };
    let second = MaterializeUseCase {
        sections,
        deliveries: deliveries.clone(),
        collector: MockCollector::new(),
    };
    let now = anchor - Duration::hours(1);
    let (a, b) = tokio::join!(first.execute(now), second.execute(now));

    let created = a.unwrap().created + b.unwrap().created;
    assert_eq!(created, 1);
    assert_eq!(deliveries.count(), 1);
}

#[tokio::test]
async fn should_keep_monthly_schedules_aligned_across_short_months() {
    let jan31 = Utc.with_ymd_and_hms(2027, 1, 31, 9, 0, 0).unwrap();
    let owner = fixtures::subscriber("reader@example.com");
    let section = fixtures::section(owner.id, "Finance", Frequency::Monthly, jan31);

    let sections = MemorySectionRepository::with(vec![section.clone()]);
    let deliveries = MemoryDeliveryRepository::default();
    let mut delivery = fixtures::pending_delivery(&section);
    delivery.rendered_content = Some(fixtures::rendered_content("Finance"));
    deliveries.insert_raw(delivery.clone());

    let dispatch = DispatchUseCase {
        deliveries: deliveries.clone(),
        sections,
        subscribers: MemorySubscriberRepository::with(vec![owner]),
        mail: MockMailTransport::succeeding(),
    };
    let receipt = dispatch.execute(delivery.id, jan31).await.unwrap();

    let next = deliveries.get(receipt.next_delivery_id.unwrap()).unwrap();
    // Jan 31 steps to Feb 28; the clamped day carries forward.
    assert_eq!(next.send_date, advance(jan31, Frequency::Monthly));
    assert_eq!(
        next.next_date,
        advance(advance(jan31, Frequency::Monthly), Frequency::Monthly)
    );
}
