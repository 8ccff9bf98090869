//! Block id generation.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::BlockId;

/// Source of candidate block ids.
///
/// Candidates may collide with ids already in a document; callers go
/// through [`fresh_id`] which retries until the id is unused.
pub trait IdSource {
    fn next_id(&mut self) -> BlockId;
}

/// Random ids of the form `b` + 12 lowercase hex digits.
pub struct RandomIds {
    rng: StdRng,
}

impl RandomIds {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible ids, for tooling that wants stable output.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomIds {
    fn default() -> Self {
        Self::new()
    }
}

impl IdSource for RandomIds {
    fn next_id(&mut self) -> BlockId {
        let bits: u64 = self.rng.gen::<u64>() & 0xffff_ffff_ffff;
        BlockId(format!("b{:012x}", bits))
    }
}

/// Counting ids (`b1`, `b2`, ...).
#[derive(Debug, Clone, Default)]
pub struct SequentialIds {
    next: u64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdSource for SequentialIds {
    fn next_id(&mut self) -> BlockId {
        self.next += 1;
        BlockId(format!("b{}", self.next))
    }
}

/// Draw ids from `source` until one is not `taken`.
pub fn fresh_id(source: &mut dyn IdSource, taken: impl Fn(&BlockId) -> bool) -> BlockId {
    loop {
        let id = source.next_id();
        if !id.0.is_empty() && !taken(&id) {
            return id;
        }
    }
}
