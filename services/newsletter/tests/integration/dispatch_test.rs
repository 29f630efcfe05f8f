//! Dispatch edge cases against the in-memory store: transport trouble,
//! missing content, and repeated dispatch attempts.

use chrono::Duration;

use plume_domain::{DeliveryStatus, Frequency};
use plume_newsletter::error::NewsletterError;
use plume_newsletter::usecase::dispatch::DispatchUseCase;
use plume_testing::fixtures;
use plume_testing::mocks::{
    MemoryDeliveryRepository, MemorySectionRepository, MemorySubscriberRepository,
    MockMailTransport, ScriptedSend,
};

struct Setup {
    sections: MemorySectionRepository,
    deliveries: MemoryDeliveryRepository,
    subscribers: MemorySubscriberRepository,
    delivery_id: uuid::Uuid,
}

fn setup(with_content: bool) -> Setup {
    let owner = fixtures::subscriber("reader@example.com");
    let section = fixtures::section(
        owner.id,
        "Rust",
        Frequency::Weekly,
        fixtures::reference_time(),
    );
    let mut delivery = fixtures::pending_delivery(&section);
    if with_content {
        delivery.rendered_content = Some(fixtures::rendered_content("Rust"));
    }
    let delivery_id = delivery.id;
    Setup {
        sections: MemorySectionRepository::with(vec![section]),
        deliveries: MemoryDeliveryRepository::with(vec![delivery]),
        subscribers: MemorySubscriberRepository::with(vec![owner]),
        delivery_id,
    }
}

#[tokio::test]
async fn should_recover_after_a_transport_timeout() {
    let s = setup(true);
    // First attempt times out, the retry goes through.
    let mail = MockMailTransport::scripted(vec![ScriptedSend::Timeout, ScriptedSend::Succeed]);
    let dispatch = DispatchUseCase {
        deliveries: s.deliveries.clone(),
        sections: s.sections,
        subscribers: s.subscribers,
        mail: mail.clone(),
    };
    let now = fixtures::reference_time();

    let err = dispatch.execute(s.delivery_id, now).await.unwrap_err();
    assert!(matches!(err, NewsletterError::MailTimeout));
    // Still pending: the timeout claimed nothing.
    assert_eq!(
        s.deliveries.get(s.delivery_id).unwrap().status,
        DeliveryStatus::Pending
    );

    let receipt = dispatch.execute(s.delivery_id, now).await.unwrap();
    assert!(receipt.next_delivery_id.is_some());
    assert_eq!(
        s.deliveries.get(s.delivery_id).unwrap().status,
        DeliveryStatus::Sent
    );
    assert_eq!(mail.sent().len(), 1);
}

#[tokio::test]
async fn should_terminate_delivery_on_transport_rejection() {
    let s = setup(true);
    let dispatch = DispatchUseCase {
        deliveries: s.deliveries.clone(),
        sections: s.sections,
        subscribers: s.subscribers,
        mail: MockMailTransport::scripted(vec![ScriptedSend::Reject(
            "invalid recipient".to_owned(),
        )]),
    };

    let err = dispatch
        .execute(s.delivery_id, fixtures::reference_time())
        .await
        .unwrap_err();

    assert!(matches!(err, NewsletterError::MailRejected(_)));
    let failed = s.deliveries.get(s.delivery_id).unwrap();
    assert_eq!(failed.status, DeliveryStatus::Failed);
    assert_eq!(failed.error_detail.as_deref(), Some("invalid recipient"));
    // A failed delivery spawns nothing.
    assert_eq!(s.deliveries.count(), 1);
}

#[tokio::test]
async fn should_fail_due_delivery_that_was_never_populated() {
    let s = setup(false);
    let dispatch = DispatchUseCase {
        deliveries: s.deliveries.clone(),
        sections: s.sections,
        subscribers: s.subscribers,
        mail: MockMailTransport::succeeding(),
    };

    let err = dispatch
        .execute(s.delivery_id, fixtures::reference_time())
        .await
        .unwrap_err();

    assert!(matches!(err, NewsletterError::ContentMissing));
    assert_eq!(
        s.deliveries.get(s.delivery_id).unwrap().status,
        DeliveryStatus::Failed
    );
}

#[tokio::test]
async fn should_reject_a_second_dispatch_of_the_same_delivery() {
    let s = setup(true);
    let dispatch = DispatchUseCase {
        deliveries: s.deliveries.clone(),
        sections: s.sections,
        subscribers: s.subscribers,
        mail: MockMailTransport::succeeding(),
    };
    let now = fixtures::reference_time();

    dispatch.execute(s.delivery_id, now).await.unwrap();
    let err = dispatch.execute(s.delivery_id, now).await.unwrap_err();

    assert!(matches!(err, NewsletterError::DeliveryNotPending));
    // One send, one follow-up; the retry added nothing.
    assert_eq!(s.deliveries.count(), 2);
}

#[tokio::test]
async fn should_hold_early_dispatch_until_the_send_date() {
    let s = setup(true);
    let dispatch = DispatchUseCase {
        deliveries: s.deliveries.clone(),
        sections: s.sections,
        subscribers: s.subscribers,
        mail: MockMailTransport::succeeding(),
    };

    let err = dispatch
        .execute(
            s.delivery_id,
            fixtures::reference_time() - Duration::minutes(5),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, NewsletterError::DeliveryNotDue));
    assert_eq!(
        s.deliveries.get(s.delivery_id).unwrap().status,
        DeliveryStatus::Pending
    );
}
