use std::f64::consts::{E, PI};

/// Per-register shape `(k, q, s)` of the four Tausworthe components.
const TW223: [(u32, u32, u32); 4] = [(63, 31, 18), (58, 19, 28), (55, 24, 7), (47, 21, 8)];

const MANTISSA_MASK: u64 = 0x000f_ffff_ffff_ffff;
const ONE_BITS: u64 = 0x3ff0_0000_0000_0000;

/// Steps discarded after seeding.
const WARMUP_STEPS: usize = 10;

/// Step generator equivalent to LuaJIT's `math.randomseed` / `math.random`
/// (combined Tausworthe, period ~2^223).
///
/// A generator is fully determined by the `f64` it was seeded with; two
/// generators built from the same value yield the same stream on every
/// platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LuaRandom {
    state: [u64; 4],
}

impl LuaRandom {
    pub fn new(seed: f64) -> Self {
        let mut state = [0u64; 4];
        let mut d = seed;
        for (slot, &(k, _, _)) in state.iter_mut().zip(TW223.iter()) {
            // The top k bits of each register must not all be zero.
            let min = 1u64 << (64 - k);
            d = d * PI + E;
            let mut bits = d.to_bits();
            if bits < min {
                bits += min;
            }
            *slot = bits;
        }
        let mut rng = Self { state };
        for _ in 0..WARMUP_STEPS {
            rng.step();
        }
        rng
    }

    #[inline]
    fn step(&mut self) -> u64 {
        let mut r = 0u64;
        for (z, &(k, q, s)) in self.state.iter_mut().zip(TW223.iter()) {
            let x = *z;
            let next = (((x << q) ^ x) >> (k - s)) ^ ((x & (u64::MAX << (64 - k))) << s);
            r ^= next;
            *z = next;
        }
        (r & MANTISSA_MASK) | ONE_BITS
    }

    /// Uniform draw in `[0, 1)`.
    #[inline]
    pub fn random(&mut self) -> f64 {
        f64::from_bits(self.step()) - 1.0
    }

    /// Uniform integer in `[min, max]`, inclusive on both ends.
    #[inline]
    pub fn randint(&mut self, min: i32, max: i32) -> i32 {
        let span = f64::from(max) - f64::from(min) + 1.0;
        ((self.random() * span).floor() + f64::from(min)) as i32
    }
}
