use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform choices among equally good moves.
pub trait TieBreaker {
    /// Returns an index in `0..len`. `len` is never zero.
    fn pick_index(&mut self, len: usize) -> usize;
}

pub struct SessionRng {
    rng: StdRng,
    seed: u64,
}

impl SessionRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    pub fn from_random() -> Self {
        let seed: u64 = rand::rng().random();
        Self::new(seed)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn random_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distr::uniform::SampleUniform,
        R: rand::distr::uniform::SampleRange<T>,
    {
        self.rng.random_range(range)
    }
}

impl TieBreaker for SessionRng {
    fn pick_index(&mut self, len: usize) -> usize {
        self.random_range(0..len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_gives_same_choices() {
        let mut a = SessionRng::new(42);
        let mut b = SessionRng::new(42);
        let picks_a: Vec<usize> = (0..32).map(|_| a.pick_index(9)).collect();
        let picks_b: Vec<usize> = (0..32).map(|_| b.pick_index(9)).collect();
        assert_eq!(picks_a, picks_b);
        assert_eq!(a.seed(), 42);
    }

    #[test]
    fn test_pick_index_stays_in_range() {
        let mut rng = SessionRng::from_random();
        for len in 1..=9 {
            for _ in 0..50 {
                assert!(rng.pick_index(len) < len);
            }
        }
    }
}
