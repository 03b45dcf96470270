use serde::{Deserialize, Serialize};

use crate::types::Item;

/// Game version 1.0.1c, encoded as major*10000 + minor*100 + patch*10 + revision.
pub const DEFAULT_VERSION: i64 = 10103;

/// Per-run settings. Rebuilt from `Default` on every reseed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstParams {
    pub deck: Item,
    pub stake: Item,
    /// Disables lock avoidance in `randchoice`.
    pub showman: bool,
    pub sixes_factor: i32,
    pub version: i64,
    /// One bit per voucher slot, see [`Item::voucher_index`].
    pub vouchers: u32,
}

impl Default for InstParams {
    fn default() -> Self {
        Self {
            deck: Item::RedDeck,
            stake: Item::WhiteStake,
            showman: false,
            sixes_factor: 1,
            version: DEFAULT_VERSION,
            vouchers: 0,
        }
    }
}

impl InstParams {
    #[inline]
    pub const fn new(deck: Item, stake: Item, showman: bool, version: i64) -> Self {
        Self {
            deck,
            stake,
            showman,
            sixes_factor: 1,
            version,
            vouchers: 0,
        }
    }

    /// False for anything that is not a voucher.
    #[inline]
    pub fn is_voucher_active(&self, voucher: Item) -> bool {
        voucher
            .voucher_index()
            .is_some_and(|i| self.vouchers & (1 << i) != 0)
    }

    /// Returns false (and changes nothing) if `voucher` is not a voucher.
    #[inline]
    pub fn set_voucher_active(&mut self, voucher: Item, active: bool) -> bool {
        let Some(i) = voucher.voucher_index() else {
            return false;
        };
        if active {
            self.vouchers |= 1 << i;
        } else {
            self.vouchers &= !(1 << i);
        }
        true
    }
}
