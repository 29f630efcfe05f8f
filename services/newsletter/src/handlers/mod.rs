pub mod content;
pub mod deliveries;
pub mod scheduler;
