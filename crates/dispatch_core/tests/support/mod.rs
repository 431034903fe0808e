pub mod sinks;
pub mod world;
