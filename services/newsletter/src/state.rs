use axum::extract::FromRef;
use sea_orm::DatabaseConnection;

use plume_core::auth::TriggerSecret;

use crate::infra::collector::HttpContentCollector;
use crate::infra::db::{
    DbContentItemRepository, DbDeliveryRepository, DbSectionRepository, DbSubscriberRepository,
};
use crate::infra::mailer::ResendMailer;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub trigger_secret: TriggerSecret,
    pub mailer: ResendMailer,
    pub collector: HttpContentCollector,
    pub items_per_topic: u32,
}

impl AppState {
    pub fn section_repo(&self) -> DbSectionRepository {
        DbSectionRepository {
            db: self.db.clone(),
        }
    }

    pub fn delivery_repo(&self) -> DbDeliveryRepository {
        DbDeliveryRepository {
            db: self.db.clone(),
        }
    }

    pub fn content_repo(&self) -> DbContentItemRepository {
        DbContentItemRepository {
            db: self.db.clone(),
        }
    }

    pub fn subscriber_repo(&self) -> DbSubscriberRepository {
        DbSubscriberRepository {
            db: self.db.clone(),
        }
    }

    pub fn mailer(&self) -> ResendMailer {
        self.mailer.clone()
    }

    pub fn collector(&self) -> HttpContentCollector {
        self.collector.clone()
    }
}

impl FromRef<AppState> for TriggerSecret {
    fn from_ref(state: &AppState) -> Self {
        state.trigger_secret.clone()
    }
}
