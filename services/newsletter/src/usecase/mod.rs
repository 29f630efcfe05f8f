pub mod dispatch;
pub mod ingest;
pub mod materialize;
pub mod populate;
