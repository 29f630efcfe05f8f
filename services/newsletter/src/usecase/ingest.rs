use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::repository::ContentItemRepository;
use crate::domain::types::ContentItem;
use crate::error::NewsletterError;

/// A collected article as submitted by the collector, before it has an
/// identity in the store.
#[derive(Debug, Clone)]
pub struct NewContentItem {
    pub topic: String,
    pub title: String,
    pub url: String,
    pub source: Option<String>,
    pub published_date: DateTime<Utc>,
    pub body: String,
    pub summary: Option<String>,
}

impl NewContentItem {
    fn into_item(self, now: DateTime<Utc>) -> ContentItem {
        ContentItem {
            id: Uuid::new_v4(),
            topic: self.topic,
            title: self.title,
            url: self.url,
            source: self.source,
            published_date: self.published_date,
            body: self.body,
            summary: self.summary,
            created_at: now,
        }
    }
}

/// Ingest a batch of collected items. Each item upserts on its `url`,
/// so re-submitting an article refreshes its fields instead of
/// duplicating it.
pub struct IngestContentUseCase<C> {
    pub content: C,
}

impl<C> IngestContentUseCase<C>
where
    C: ContentItemRepository,
{
    /// Returns how many items of the batch were accepted into the store.
    pub async fn execute(
        &self,
        items: Vec<NewContentItem>,
        now: DateTime<Utc>,
    ) -> Result<u32, NewsletterError> {
        let mut accepted = 0u32;
        for item in items {
            self.content.upsert(&item.into_item(now)).await?;
            accepted += 1;
        }
        Ok(accepted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 25, 12, 0, 0).unwrap()
    }

    fn new_item(url: &str, summary: Option<&str>) -> NewContentItem {
        NewContentItem {
            topic: "Rust".to_owned(),
            title: "Edition guide".to_owned(),
            url: url.to_owned(),
            source: None,
            published_date: now(),
            body: "body".to_owned(),
            summary: summary.map(str::to_owned),
        }
    }

    #[derive(Clone, Default)]
    struct MockContentRepo {
        items: Arc<Mutex<Vec<ContentItem>>>,
    }

    impl ContentItemRepository for MockContentRepo {
        async fn query_recent(
            &self,
            _topic: &str,
            _limit: u32,
        ) -> Result<Vec<ContentItem>, NewsletterError> {
            Ok(vec![])
        }
        async fn upsert(&self, item: &ContentItem) -> Result<(), NewsletterError> {
            let mut items = self.items.lock().unwrap();
            if let Some(existing) = items.iter_mut().find(|i| i.url == item.url) {
                let id = existing.id;
                *existing = item.clone();
                existing.id = id;
            } else {
                items.push(item.clone());
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn should_accept_every_item_of_a_batch() {
        let repo = MockContentRepo::default();
        let uc = IngestContentUseCase {
            content: repo.clone(),
        };

        let accepted = uc
            .execute(
                vec![
                    new_item("https://example.com/a", None),
                    new_item("https://example.com/b", None),
                    new_item("https://example.com/c", None),
                ],
                now(),
            )
            .await
            .unwrap();

        assert_eq!(accepted, 3);
        assert_eq!(repo.items.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn should_collapse_same_url_resubmissions_in_the_store() {
        let repo = MockContentRepo::default();
        let uc = IngestContentUseCase {
            content: repo.clone(),
        };

        let accepted = uc
            .execute(
                vec![
                    new_item("https://example.com/a", Some("old")),
                    new_item("https://example.com/a", Some("new")),
                ],
                now(),
            )
            .await
            .unwrap();

        assert_eq!(accepted, 2);
        let items = repo.items.lock().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].summary.as_deref(), Some("new"));
    }

    #[tokio::test]
    async fn should_accept_an_empty_batch() {
        let uc = IngestContentUseCase {
            content: MockContentRepo::default(),
        };
        assert_eq!(uc.execute(vec![], now()).await.unwrap(), 0);
    }
}
