use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Picks an index into a response pool of `len` entries.
pub trait RandomSource {
    fn pick(&mut self, len: usize) -> usize;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn pick(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        rand::thread_rng().gen_range(0..len)
    }
}

/// Reproducible selection for a fixed seed.
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn pick(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.rng.gen_range(0..len)
    }
}

/// Replays a fixed cycle of indices, unchecked against the pool length.
#[derive(Debug, Clone)]
pub struct FixedSequence {
    indices: Vec<usize>,
    cursor: usize,
}

impl FixedSequence {
    pub fn new(indices: Vec<usize>) -> Self {
        Self { indices, cursor: 0 }
    }
}

impl RandomSource for FixedSequence {
    fn pick(&mut self, _len: usize) -> usize {
        if self.indices.is_empty() {
            return 0;
        }
        let index = self.indices[self.cursor % self.indices.len()];
        self.cursor += 1;
        index
    }
}
