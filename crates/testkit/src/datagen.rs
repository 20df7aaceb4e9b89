//! Seedable test data generation
//!
//! Every suite owns its [`DataGen`] and its seed; nothing here is
//! process-wide. Re-running a suite with the same seed reproduces the same
//! keys and payloads.

use rand::distributions::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// Random key/payload generator backed by a seeded [`StdRng`].
pub struct DataGen {
    rng: StdRng,
}

impl DataGen {
    /// Generator with a fixed seed; identical seeds reproduce identical
    /// sequences.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generator seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Alphanumeric key of exactly `len` bytes.
    pub fn key(&mut self, len: usize) -> Vec<u8> {
        (&mut self.rng)
            .sample_iter(&Alphanumeric)
            .take(len)
            .collect()
    }

    /// Arbitrary payload of exactly `len` bytes.
    pub fn payload(&mut self, len: usize) -> Vec<u8> {
        let mut buf = vec![0u8; len];
        self.rng.fill_bytes(&mut buf);
        buf
    }

    /// `count` distinct keys, each `len` random bytes plus an index suffix
    /// so collisions are impossible.
    pub fn distinct_keys(&mut self, count: usize, len: usize) -> Vec<Vec<u8>> {
        (0..count)
            .map(|i| {
                let mut key = self.key(len);
                key.extend_from_slice(format!("-{i}").as_bytes());
                key
            })
            .collect()
    }
}
