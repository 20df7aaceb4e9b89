//! Test fixtures for the ttlkv client
//!
//! - [`InMemoryStore`]: a `StoreTransport` implementation with the full
//!   store contract (per-scope records, version counters, sliding TTL,
//!   conditional updates) plus latency and failure injection. Expiry runs
//!   on `tokio::time::Instant`, so suites using `start_paused` get
//!   deterministic clocks.
//! - [`DataGen`]: a seedable random key/payload generator. Injectable, not
//!   process-wide: every suite owns its generator and its seed.

pub mod datagen;
pub mod store;

pub use datagen::DataGen;
pub use store::InMemoryStore;
