pub mod client;
pub mod fetch;
pub mod model;

pub use client::SwapiClient;
pub use fetch::FetchError;
pub use model::{resource_id, Character, Planet, Snapshot, Species};
