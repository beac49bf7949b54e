use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::codec::HEADER_SIZE;

/// Where a fault landed in a serialized frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Corruption {
    /// Byte index within the serialized frame.
    pub index: usize,
    /// Which bit was flipped (0 = least significant).
    pub bit: u32,
}

/// Deliberate bit-flipper for corruption testing.
///
/// Test and demo collaborator only — this never belongs on the production
/// wire path. The randomness source is injected and explicitly seeded, so a
/// corruption run is reproducible from its seed.
pub struct FaultInjector<R = ChaCha8Rng> {
    rng: R,
    probability: f64,
}

impl FaultInjector<ChaCha8Rng> {
    /// Create an injector with a deterministic stream cipher RNG.
    ///
    /// `probability` is the per-frame chance of corruption, clamped to
    /// `0.0..=1.0`.
    pub fn seeded(seed: u64, probability: f64) -> Self {
        Self::with_rng(ChaCha8Rng::seed_from_u64(seed), probability)
    }
}

impl<R: Rng> FaultInjector<R> {
    /// Create an injector over any randomness source.
    pub fn with_rng(rng: R, probability: f64) -> Self {
        Self {
            rng,
            probability: probability.clamp(0.0, 1.0),
        }
    }

    /// Maybe flip one bit in a serialized frame.
    ///
    /// The corruptible region is the message id, length, and payload bytes.
    /// The start marker is left alone (corrupting it desynchronizes rather
    /// than invalidates) and so is the checksum trailer, matching the region
    /// the checksum is meant to protect.
    ///
    /// Returns where the fault landed, or `None` if this frame was spared or
    /// is too short to corrupt.
    pub fn corrupt_wire(&mut self, wire: &mut [u8]) -> Option<Corruption> {
        if wire.len() < HEADER_SIZE + 1 {
            return None;
        }
        if !self.rng.gen_bool(self.probability) {
            return None;
        }

        let index = self.rng.gen_range(1..wire.len() - 1);
        let bit = self.rng.gen_range(0..8u32);
        wire[index] ^= 1 << bit;

        debug!(index, bit, "injected fault into serialized frame");
        Some(Corruption { index, bit })
    }
}

impl<R> std::fmt::Debug for FaultInjector<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FaultInjector")
            .field("probability", &self.probability)
            .finish()
    }
}
