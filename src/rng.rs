use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::cell::Height;
use crate::grid::Direction;

/// Seeded source for the randomized parts of world construction: initial
/// wind direction, terrain height and cloud cover. Injected explicitly so
/// the same seed always rebuilds the same world.
pub struct InitRng {
    inner: ChaCha8Rng,
}

impl InitRng {
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn direction(&mut self) -> Direction {
        Direction::ALL[self.inner.gen_range(0..Direction::ALL.len())]
    }

    pub fn height(&mut self) -> Height {
        const HEIGHTS: [Height; 3] = [Height::Valley, Height::SeaLevel, Height::Mountain];
        HEIGHTS[self.inner.gen_range(0..HEIGHTS.len())]
    }

    pub fn clouds(&mut self) -> bool {
        self.inner.gen_bool(0.5)
    }
}
