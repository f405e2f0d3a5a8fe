//! RNG module - uniform random piece generation
//!
//! Every draw picks one of the seven kinds with equal probability, independent
//! of previous draws. The queue holds exactly one piece of lookahead, which the
//! next-piece preview shows.
//!
//! A simple LCG keeps sequences reproducible from a seed.

use crate::types::PieceKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Scales by the high bits; the low bits of an LCG cycle with short periods.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }
}

/// One-slot lookahead piece generator
#[derive(Debug, Clone)]
pub struct PieceQueue {
    next: PieceKind,
    seed: u32,
    rng: SimpleRng,
}

impl PieceQueue {
    /// Create a new piece queue with the given seed
    pub fn new(seed: u32) -> Self {
        let mut rng = SimpleRng::new(seed);
        let next = Self::random_kind(&mut rng);
        Self { next, seed, rng }
    }

    fn random_kind(rng: &mut SimpleRng) -> PieceKind {
        PieceKind::ALL[rng.next_range(PieceKind::ALL.len() as u32) as usize]
    }

    /// The piece that the next [`draw`](Self::draw) returns
    pub fn peek(&self) -> PieceKind {
        self.next
    }

    /// Take the queued piece and queue a fresh random one
    pub fn draw(&mut self) -> PieceKind {
        let piece = self.next;
        self.next = Self::random_kind(&mut self.rng);
        piece
    }

    /// Seed this queue was created with
    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl Default for PieceQueue {
    fn default() -> Self {
        Self::new(1)
    }
}
