//! RNG module - uniform next-piece generation
//!
//! A small LCG seeded from the time base's tick counter feeds a one-deep
//! lookahead queue. Every draw picks one of the seven kinds with equal
//! weight.

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
    /// Uses the high half of the state; the low bits of a power-of-two LCG
    /// cycle with short periods.
    pub fn next_range(&mut self, max: u32) -> u32 {
        (self.next_u32() >> 16) % max
    }

    /// Current internal state
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// One-deep lookahead of the next piece kind
#[derive(Debug, Clone)]
pub struct NextPieceQueue {
    next: PieceKind,
    rng: SimpleRng,
}

impl NextPieceQueue {
    /// Create a new queue; the first lookahead is drawn immediately
    pub fn new(seed: u32) -> Self {
        let mut rng = SimpleRng::new(seed);
        let next = Self::draw_kind(&mut rng);
        Self { next, rng }
    }

    /// Create a queue whose first lookahead is `next`
    pub fn with_next(seed: u32, next: PieceKind) -> Self {
        Self {
            next,
            rng: SimpleRng::new(seed),
        }
    }

    fn draw_kind(rng: &mut SimpleRng) -> PieceKind {
        PieceKind::ALL[rng.next_range(PieceKind::ALL.len() as u32) as usize]
    }

    /// Kind that the next spawn will use
    pub fn peek(&self) -> PieceKind {
        self.next
    }

    /// Take the lookahead and refill it with a fresh draw
    pub fn advance(&mut self) -> PieceKind {
        let kind = self.next;
        self.next = Self::draw_kind(&mut self.rng);
        kind
    }

    /// Current RNG state, exported in snapshots
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }
}

impl Default for NextPieceQueue {
    fn default() -> Self {
        Self::new(1)
    }
}
