use log::{debug, trace};

use crate::cache::Cache;
use crate::hash::pseudohash_from;
use crate::params::InstParams;
use crate::rng::LuaRandom;
use crate::seed::Seed;
use crate::types::{pick_weighted, Item, ItemSet, WeightedItem};

/// Last resample suffix tried by [`Instance::randchoice`] before it gives up
/// and returns whatever it drew.
pub const MAX_RESAMPLE: u32 = 1000;

/// Evaluation context for one seed: node chains, run settings and item locks.
///
/// An instance is owned by a single worker and reused across seeds with
/// [`Instance::next`] or [`Instance::reset`]. Reseeding clears the chains and
/// restores default settings; locks survive it.
#[derive(Debug, Clone)]
pub struct Instance {
    seed: Seed,
    hashed_seed: f64,
    pub cache: Cache,
    pub params: InstParams,
    locks: ItemSet,
}

impl Instance {
    pub fn new(seed: Seed) -> Self {
        debug!("[instance] bind seed={seed}");
        Self {
            seed,
            hashed_seed: seed.pseudohash(0),
            cache: Cache::default(),
            params: InstParams::default(),
            locks: ItemSet::new(),
        }
    }

    #[inline]
    pub fn seed(&self) -> Seed {
        self.seed
    }

    /// Hash of the bound seed, mixed into every node value.
    #[inline]
    pub fn hashed_seed(&self) -> f64 {
        self.hashed_seed
    }

    /// Rebind to an arbitrary seed. Prefer [`Instance::next`] for sweeps.
    pub fn reset(&mut self, seed: Seed) {
        trace!("[instance] reset {} -> {seed}", self.seed);
        self.seed = seed;
        self.rebind();
    }

    /// Advance the bound seed to its successor and rebind.
    pub fn next(&mut self) {
        self.seed.next();
        self.rebind();
    }

    #[inline]
    fn rebind(&mut self) {
        self.hashed_seed = self.seed.pseudohash(0);
        self.params = InstParams::default();
        self.cache.clear();
    }

    /// Advance the chain for `id` and return the node value for this step.
    ///
    /// Every call moves the chain, so repeated calls with the same `id` yield
    /// a sequence, not a constant.
    #[inline]
    pub fn get_node(&mut self, id: &str) -> f64 {
        let seed = self.seed;
        let state = self
            .cache
            .advance(id, || pseudohash_from(id, seed.pseudohash(id.len())));
        (state + self.hashed_seed) / 2.0
    }

    /// Generator seeded from the next node of `id`.
    #[inline]
    pub fn rng(&mut self, id: &str) -> LuaRandom {
        LuaRandom::new(self.get_node(id))
    }

    /// Uniform draw in `[0, 1)`.
    #[inline]
    pub fn random(&mut self, id: &str) -> f64 {
        self.rng(id).random()
    }

    /// Uniform integer in `[min, max]`.
    #[inline]
    pub fn randint(&mut self, id: &str, min: i32, max: i32) -> i32 {
        self.rng(id).randint(min, max)
    }

    /// Uniform pick from `items`, redrawing under `"{id}_resample{n}"` keys
    /// while the pick is [`Item::Retry`] or locked.
    ///
    /// The first pick ignores locks when `showman` is set. Redraws always
    /// require an unlocked, non-retry item; the redraw with suffix
    /// [`MAX_RESAMPLE`] is returned regardless.
    ///
    /// # Panics
    /// If `items` is empty. No chain is advanced in that case.
    pub fn randchoice(&mut self, id: &str, items: &[Item]) -> Item {
        assert!(!items.is_empty(), "randchoice({id}) on an empty pool");
        let item = self.pick(id, items);
        let rejected = (!self.params.showman && self.is_locked(item)) || item == Item::Retry;
        if !rejected {
            return item;
        }
        let mut resample = 2;
        loop {
            let item = self.pick(&format!("{id}_resample{resample}"), items);
            if (item != Item::Retry && !self.is_locked(item)) || resample >= MAX_RESAMPLE {
                return item;
            }
            resample += 1;
        }
    }

    #[inline]
    fn pick(&mut self, id: &str, items: &[Item]) -> Item {
        let last = items.len() as i32 - 1;
        items[self.randint(id, 0, last) as usize]
    }

    /// Weighted pick from a header-led table, see [`pick_weighted`].
    ///
    /// # Panics
    /// If `items` is empty (before any chain is advanced) or if the weights
    /// after the header sum to less than the header total.
    pub fn randweightedchoice(&mut self, id: &str, items: &[WeightedItem]) -> Item {
        assert!(!items.is_empty(), "randweightedchoice({id}) on an empty table");
        let poll = self.random(id) * items[0].weight;
        pick_weighted(items, poll)
    }

    #[inline]
    pub fn lock(&mut self, item: Item) {
        self.locks.insert(item);
    }

    #[inline]
    pub fn unlock(&mut self, item: Item) {
        self.locks.remove(item);
    }

    #[inline]
    pub fn is_locked(&self, item: Item) -> bool {
        self.locks.contains(item)
    }

    #[inline]
    pub fn locks(&self) -> &ItemSet {
        &self.locks
    }

    #[inline]
    pub fn locks_mut(&mut self) -> &mut ItemSet {
        &mut self.locks
    }

    #[inline]
    pub fn is_voucher_active(&self, voucher: Item) -> bool {
        self.params.is_voucher_active(voucher)
    }

    /// Mark `voucher` redeemed: it stops appearing (locked) and its upgrade
    /// tier, if any, becomes available.
    pub fn activate_voucher(&mut self, voucher: Item) {
        if !self.params.set_voucher_active(voucher, true) {
            return;
        }
        self.lock(voucher);
        if let Some(upgrade) = voucher.voucher_upgrade() {
            self.unlock(upgrade);
        }
    }

    /// Select a deck, redeeming the vouchers it starts with.
    pub fn set_deck(&mut self, deck: Item) {
        self.params.deck = deck;
        match deck {
            Item::MagicDeck => self.activate_voucher(Item::CrystalBall),
            Item::NebulaDeck => self.activate_voucher(Item::Telescope),
            Item::ZodiacDeck => {
                self.activate_voucher(Item::TarotMerchant);
                self.activate_voucher(Item::PlanetMerchant);
                self.activate_voucher(Item::Overstock);
            }
            _ => {}
        }
    }

    #[inline]
    pub fn set_stake(&mut self, stake: Item) {
        self.params.stake = stake;
    }
}
