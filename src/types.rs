use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Error;

macro_rules! items {
    ($( $(#[$group_meta:meta])* $group:ident { $( $variant:ident => $name:literal ),* $(,)? } )*) => {
        /// Closed set of item kinds the engine can select or lock.
        ///
        /// `Retry` is the sentinel a pool uses for "draw again"; it is never a
        /// valid result of a selection except when resampling gives up.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(u16)]
        pub enum Item {
            Retry,
            $( $( $variant, )* )*
        }

        impl Item {
            /// Every item kind, in discriminant order.
            pub const ALL: &'static [Item] = &[Item::Retry, $( $( Item::$variant, )* )*];

            /// Display name, matching the in-game label.
            pub const fn name(self) -> &'static str {
                match self {
                    Item::Retry => "RETRY",
                    $( $( Item::$variant => $name, )* )*
                }
            }
        }

        $(
            $(#[$group_meta])*
            pub const $group: &[Item] = &[$( Item::$variant ),*];
        )*
    };
}

items! {
    /// Starting decks.
    DECKS {
        RedDeck => "Red Deck",
        BlueDeck => "Blue Deck",
        YellowDeck => "Yellow Deck",
        GreenDeck => "Green Deck",
        BlackDeck => "Black Deck",
        MagicDeck => "Magic Deck",
        NebulaDeck => "Nebula Deck",
        GhostDeck => "Ghost Deck",
        AbandonedDeck => "Abandoned Deck",
        CheckeredDeck => "Checkered Deck",
        ZodiacDeck => "Zodiac Deck",
        PaintedDeck => "Painted Deck",
        AnaglyphDeck => "Anaglyph Deck",
        PlasmaDeck => "Plasma Deck",
        ErraticDeck => "Erratic Deck",
    }
    /// Stakes, lowest first.
    STAKES {
        WhiteStake => "White Stake",
        RedStake => "Red Stake",
        GreenStake => "Green Stake",
        BlackStake => "Black Stake",
        BlueStake => "Blue Stake",
        PurpleStake => "Purple Stake",
        OrangeStake => "Orange Stake",
        GoldStake => "Gold Stake",
    }
    /// Vouchers as (base, upgrade) pairs: even slots are base tiers.
    VOUCHERS {
        Overstock => "Overstock",
        OverstockPlus => "Overstock Plus",
        ClearanceSale => "Clearance Sale",
        Liquidation => "Liquidation",
        Hone => "Hone",
        GlowUp => "Glow Up",
        RerollSurplus => "Reroll Surplus",
        RerollGlut => "Reroll Glut",
        CrystalBall => "Crystal Ball",
        OmenGlobe => "Omen Globe",
        Telescope => "Telescope",
        Observatory => "Observatory",
        Grabber => "Grabber",
        NachoTong => "Nacho Tong",
        Wasteful => "Wasteful",
        Recyclomancy => "Recyclomancy",
        TarotMerchant => "Tarot Merchant",
        TarotTycoon => "Tarot Tycoon",
        PlanetMerchant => "Planet Merchant",
        PlanetTycoon => "Planet Tycoon",
        SeedMoney => "Seed Money",
        MoneyTree => "Money Tree",
        Blank => "Blank",
        Antimatter => "Antimatter",
        MagicTrick => "Magic Trick",
        Illusion => "Illusion",
        Hieroglyph => "Hieroglyph",
        Petroglyph => "Petroglyph",
        DirectorsCut => "Director's Cut",
        Retcon => "Retcon",
        PaintBrush => "Paint Brush",
        Palette => "Palette",
    }
    TAROTS {
        TheFool => "The Fool",
        TheMagician => "The Magician",
        TheHighPriestess => "The High Priestess",
        TheEmpress => "The Empress",
        TheEmperor => "The Emperor",
        TheHierophant => "The Hierophant",
        TheLovers => "The Lovers",
        TheChariot => "The Chariot",
        Justice => "Justice",
        TheHermit => "The Hermit",
        TheWheelOfFortune => "The Wheel of Fortune",
        Strength => "Strength",
        TheHangedMan => "The Hanged Man",
        Death => "Death",
        Temperance => "Temperance",
        TheDevil => "The Devil",
        TheTower => "The Tower",
        TheStar => "The Star",
        TheMoon => "The Moon",
        TheSun => "The Sun",
        Judgement => "Judgement",
        TheWorld => "The World",
    }
    PLANETS {
        Mercury => "Mercury",
        Venus => "Venus",
        Earth => "Earth",
        Mars => "Mars",
        Jupiter => "Jupiter",
        Saturn => "Saturn",
        Uranus => "Uranus",
        Neptune => "Neptune",
        Pluto => "Pluto",
        PlanetX => "Planet X",
        Ceres => "Ceres",
        Eris => "Eris",
    }
    SPECTRALS {
        Familiar => "Familiar",
        Grim => "Grim",
        Incantation => "Incantation",
        Talisman => "Talisman",
        Aura => "Aura",
        Wraith => "Wraith",
        Sigil => "Sigil",
        Ouija => "Ouija",
        Ectoplasm => "Ectoplasm",
        Immolate => "Immolate",
        Ankh => "Ankh",
        DejaVu => "Deja Vu",
        Hex => "Hex",
        Trance => "Trance",
        Medium => "Medium",
        Cryptid => "Cryptid",
        TheSoul => "The Soul",
        BlackHole => "Black Hole",
    }
}

impl Item {
    pub const COUNT: usize = Self::ALL.len();

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Slot of this item in the 32-slot voucher bitset, if it is a voucher.
    #[inline]
    pub fn voucher_index(self) -> Option<usize> {
        let i = self.index().checked_sub(Item::Overstock.index())?;
        (i < VOUCHERS.len()).then_some(i)
    }

    /// Upgrade tier of a base voucher (`Overstock` -> `OverstockPlus`).
    #[inline]
    pub fn voucher_upgrade(self) -> Option<Item> {
        match self.voucher_index() {
            Some(i) if i % 2 == 0 => VOUCHERS.get(i + 1).copied(),
            _ => None,
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Item {
    type Err = Error;

    /// Case-insensitive display name; underscores stand for spaces.
    fn from_str(s: &str) -> Result<Self, Error> {
        let wanted = s.trim().replace('_', " ");
        Item::ALL
            .iter()
            .copied()
            .find(|item| item.name().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| Error::UnknownItem(s.to_string()))
    }
}

impl Serialize for Item {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Item {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Entry of a weighted table. By convention entry 0 of a table is a header
/// whose `weight` is the table total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightedItem {
    pub item: Item,
    pub weight: f64,
}

impl WeightedItem {
    #[inline]
    pub const fn new(item: Item, weight: f64) -> Self {
        Self { item, weight }
    }
}

/// Walk a header-led weighted table: accumulate weights from entry 1 until
/// the running sum reaches or exceeds `poll`, and return the entry where that
/// happened. With `poll == 0` nothing is accumulated and the header's own
/// item is returned.
///
/// # Panics
/// If the weights after the header never reach `poll`.
#[inline]
pub fn pick_weighted(items: &[WeightedItem], poll: f64) -> Item {
    let mut idx = 1;
    let mut weight = 0.0;
    while weight < poll {
        weight += items[idx].weight;
        idx += 1;
    }
    items[idx - 1].item
}

const SET_WORDS: usize = (Item::COUNT + 63) / 64;

/// Fixed-size bitset over every [`Item`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ItemSet {
    words: [u64; SET_WORDS],
}

impl ItemSet {
    #[inline]
    pub const fn new() -> Self {
        Self { words: [0; SET_WORDS] }
    }

    /// Returns true if the item was not already present.
    #[inline]
    pub fn insert(&mut self, item: Item) -> bool {
        let (w, bit) = Self::slot(item);
        let was = self.words[w] & bit != 0;
        self.words[w] |= bit;
        !was
    }

    /// Returns true if the item was present.
    #[inline]
    pub fn remove(&mut self, item: Item) -> bool {
        let (w, bit) = Self::slot(item);
        let was = self.words[w] & bit != 0;
        self.words[w] &= !bit;
        was
    }

    #[inline]
    pub fn contains(&self, item: Item) -> bool {
        let (w, bit) = Self::slot(item);
        self.words[w] & bit != 0
    }

    #[inline]
    pub fn clear(&mut self) {
        self.words = [0; SET_WORDS];
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    pub fn iter(&self) -> impl Iterator<Item = Item> + '_ {
        Item::ALL.iter().copied().filter(move |&item| self.contains(item))
    }

    #[inline]
    fn slot(item: Item) -> (usize, u64) {
        let i = item.index();
        (i / 64, 1u64 << (i % 64))
    }
}

impl FromIterator<Item> for ItemSet {
    fn from_iter<I: IntoIterator<Item = Item>>(iter: I) -> Self {
        let mut set = Self::new();
        for item in iter {
            set.insert(item);
        }
        set
    }
}
