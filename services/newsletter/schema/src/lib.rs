//! sea-orm entities for the newsletter service.

pub mod content_items;
pub mod newsletter_sections;
pub mod scheduled_deliveries;
pub mod subscribers;
