pub mod client;
pub mod entity;
pub mod record;
pub mod registry;
pub mod store;
