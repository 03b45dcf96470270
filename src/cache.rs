use std::hash::BuildHasherDefault;

use hashbrown::HashMap;

use crate::numeric::{fract, round13};

type FastHasher = BuildHasherDefault<ahash::AHasher>;

const STEP_MUL: f64 = 1.724_312_34;
const STEP_ADD: f64 = 2.134_453_429_141;

/// One step of a node chain: multiply-add, keep the fraction, round to 13 places.
#[inline]
pub fn advance_node(value: f64) -> f64 {
    round13(fract(value * STEP_MUL + STEP_ADD))
}

/// Chain states keyed by decision-point ID, valid for a single seed binding.
///
/// Keys are an open namespace chosen by callers; two unrelated decision
/// points that share a key share a chain.
#[derive(Debug, Clone, Default)]
pub struct Cache {
    nodes: HashMap<String, f64, FastHasher>,
    pub generated_first_pack: bool,
}

impl Cache {
    #[inline]
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            nodes: HashMap::with_capacity_and_hasher(cap, FastHasher::default()),
            generated_first_pack: false,
        }
    }

    /// Advance the chain for `id` by one step and return its new state.
    /// `init` supplies the state on first touch; the step is applied to it
    /// immediately as well.
    #[inline]
    pub fn advance(&mut self, id: &str, init: impl FnOnce() -> f64) -> f64 {
        let node = self.nodes.entry_ref(id).or_insert_with(init);
        *node = advance_node(*node);
        *node
    }

    /// Current state for `id` without advancing it.
    #[inline]
    pub fn get(&self, id: &str) -> Option<f64> {
        self.nodes.get(id).copied()
    }

    #[inline]
    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Drop every chain and the first-pack flag. Allocation is kept.
    #[inline]
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.generated_first_pack = false;
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.nodes.iter().map(|(k, &v)| (k.as_str(), v))
    }
}
