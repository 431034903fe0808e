pub mod clock;
pub mod ecs;
pub mod engine;
pub mod error;
pub mod fleet;
pub mod matching;
pub mod notify;
pub mod pending;
pub mod pricing;
pub mod rating;
pub mod scenario;
pub mod spatial;
