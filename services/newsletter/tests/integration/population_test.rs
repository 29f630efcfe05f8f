//! Population behavior against the in-memory store: deferral, retry,
//! write-once content, and url-deduplicated ingestion.

use plume_newsletter::domain::repository::ContentItemRepository as _;
use plume_newsletter::usecase::populate::{PopulateOutcome, PopulateUseCase};
use plume_testing::fixtures;
use plume_testing::mocks::{
    MemoryContentItemRepository, MemoryDeliveryRepository, MemorySectionRepository,
};

use plume_domain::Frequency;

#[tokio::test]
async fn should_defer_then_render_once_content_arrives() {
    let owner = fixtures::subscriber("reader@example.com");
    let section = fixtures::section(
        owner.id,
        "Rust",
        Frequency::Weekly,
        fixtures::reference_time(),
    );
    let delivery = fixtures::pending_delivery(&section);

    let sections = MemorySectionRepository::with(vec![section]);
    let deliveries = MemoryDeliveryRepository::with(vec![delivery.clone()]);
    let content = MemoryContentItemRepository::default();

    let populate = PopulateUseCase {
        sections,
        deliveries: deliveries.clone(),
        content: content.clone(),
        items_per_topic: 5,
    };

    // Nothing collected yet.
    let outcome = populate.populate_by_id(delivery.id).await.unwrap();
    assert_eq!(outcome, PopulateOutcome::Deferred);
    assert!(deliveries.get(delivery.id).unwrap().rendered_content.is_none());

    // The collector delivers; the retry renders.
    content
        .upsert(&fixtures::content_item("Rust", "Edition guide"))
        .await
        .unwrap();
    let outcome = populate.populate_by_id(delivery.id).await.unwrap();
    assert_eq!(outcome, PopulateOutcome::Rendered);

    let rendered = deliveries
        .get(delivery.id)
        .unwrap()
        .rendered_content
        .unwrap();
    assert_eq!(rendered.items.len(), 1);
    assert_eq!(rendered.items[0].title, "Edition guide");
}

#[tokio::test]
async fn should_report_already_rendered_on_second_pass() {
    let owner = fixtures::subscriber("reader@example.com");
    let section = fixtures::section(
        owner.id,
        "Rust",
        Frequency::Weekly,
        fixtures::reference_time(),
    );
    let delivery = fixtures::pending_delivery(&section);

    let deliveries = MemoryDeliveryRepository::with(vec![delivery.clone()]);
    let populate = PopulateUseCase {
        sections: MemorySectionRepository::with(vec![section]),
        deliveries: deliveries.clone(),
        content: MemoryContentItemRepository::with(vec![fixtures::content_item(
            "Rust",
            "Edition guide",
        )]),
        items_per_topic: 5,
    };

    assert_eq!(
        populate.populate_by_id(delivery.id).await.unwrap(),
        PopulateOutcome::Rendered
    );
    let first = deliveries.get(delivery.id).unwrap().rendered_content;

    assert_eq!(
        populate.populate_by_id(delivery.id).await.unwrap(),
        PopulateOutcome::AlreadyRendered
    );
    assert_eq!(deliveries.get(delivery.id).unwrap().rendered_content, first);
}

#[tokio::test]
async fn should_deduplicate_ingested_items_by_url() {
    let content = MemoryContentItemRepository::default();

    let mut first = fixtures::content_item("Rust", "Edition guide");
    first.summary = Some("old summary".to_owned());
    content.upsert(&first).await.unwrap();

    // Same url, refreshed fields.
    let mut refreshed = fixtures::content_item("Rust", "Edition guide");
    refreshed.summary = Some("new summary".to_owned());
    content.upsert(&refreshed).await.unwrap();

    let items = content.all();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].summary.as_deref(), Some("new summary"));
}
