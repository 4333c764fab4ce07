//! Injectable randomness.
//!
//! Every random decision in the engine (board setup, detection rolls and
//! patrol movement) goes through a single [`RandomSource`], so a fixed seed
//! replays a whole game exactly.

/// Source of uniformly distributed draws in `[0.0, 1.0)`.
pub trait RandomSource {
    /// Draw the next value in `[0.0, 1.0)`.
    fn next_f64(&mut self) -> f64;

    /// Pick an index in `0..len` (returns 0 when `len` is 0).
    fn index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        let scaled = (self.next_f64() * len as f64) as usize;
        scaled.min(len - 1)
    }

    /// Return true with the given probability. Consumes exactly one draw.
    fn chance(&mut self, probability: f64) -> bool {
        self.next_f64() < probability
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }
}

/// A deterministic random number generator using xorshift.
///
/// The same seed produces the same sequence on every platform.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeededRng {
    state: u64,
}

impl SeededRng {
    /// Create a new RNG from a 64-bit seed.
    pub fn new(seed: u64) -> Self {
        let mut bytes = [0u8; 32];
        bytes[..8].copy_from_slice(&seed.to_le_bytes());
        Self::from_seed(&bytes)
    }

    /// Create a new RNG from a 32-byte seed.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        // FNV-1a fold so that different seeds produce different states
        let mut state: u64 = 0xcbf29ce484222325;
        for &byte in seed.iter() {
            state ^= byte as u64;
            state = state.wrapping_mul(0x100000001b3);
        }
        if state == 0 {
            state = 0x853c49e6748fea9b;
        }
        Self { state }
    }

    /// Generate next random u64.
    pub fn next_u64(&mut self) -> u64 {
        // xorshift64*
        self.state ^= self.state >> 12;
        self.state ^= self.state << 25;
        self.state ^= self.state >> 27;
        self.state.wrapping_mul(0x2545F4914F6CDD1D)
    }
}

impl RandomSource for SeededRng {
    fn next_f64(&mut self) -> f64 {
        // 53 high bits give every representable step in [0, 1)
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// Replays a fixed, cyclic sequence of draws.
///
/// Useful for forcing or suppressing detections in tests and for replaying
/// recorded draws.
#[derive(Clone, Debug, PartialEq)]
pub struct ScriptedRandom {
    values: Vec<f64>,
    cursor: usize,
}

impl ScriptedRandom {
    /// Create from a list of draws. Values are clamped into `[0.0, 1.0)`.
    pub fn new(values: Vec<f64>) -> Self {
        let values = if values.is_empty() { vec![0.0] } else { values };
        Self {
            values: values
                .into_iter()
                .map(|v| v.clamp(0.0, 1.0 - f64::EPSILON))
                .collect(),
            cursor: 0,
        }
    }

    /// A source that always returns the same value.
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }

    /// Number of draws consumed so far.
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedRandom {
    fn next_f64(&mut self) -> f64 {
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}
