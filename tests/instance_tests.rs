use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;

use pseudoseed::types::{TAROTS, VOUCHERS};
use pseudoseed::{
    advance_node, pick_weighted, InstParams, Instance, Item, LuaRandom, Seed, WeightedItem,
    MAX_RESAMPLE,
};

fn inst(s: &str) -> Instance {
    Instance::new(s.parse().expect("valid seed"))
}

#[test]
fn get_node_known_chain() {
    let mut i = inst("AAAAAAAA");
    assert_eq!(i.hashed_seed(), 0.432_571_383_515_437_45);
    let got: Vec<f64> = (0..3).map(|_| i.get_node("Voucher1")).collect();
    assert_eq!(
        got,
        vec![0.529_023_426_948_818_8, 0.322_769_942_301_868_73, 0.467_124_513_557_168_7]
    );
    assert_eq!(i.cache.get("Voucher1"), Some(0.501_677_643_598_9));

    assert_eq!(inst("1").get_node("cdt1"), 0.082_233_959_782_100_93);
}

#[test]
fn draws_known_values() {
    let mut i = inst("AAAAAAAA");
    let got: Vec<f64> = (0..3).map(|_| i.random("Voucher1")).collect();
    assert_eq!(
        got,
        vec![0.732_735_351_259_305_6, 0.458_229_710_199_836_05, 0.041_371_676_754_583_09]
    );

    let mut i = inst("7LB2WVPK");
    let got: Vec<i32> = (0..8).map(|_| i.randint("cdt1", 1, 10)).collect();
    assert_eq!(got, vec![10, 1, 1, 9, 8, 1, 3, 4]);
}

#[test]
fn chain_evolves_by_fixed_step() {
    let mut i = inst("7LB2WVPK");
    let id = "Tag1";
    assert!(!i.cache.contains(id));
    let mut prev_state: Option<f64> = None;
    let mut values = Vec::new();
    for _ in 0..3 {
        let value = i.get_node(id);
        let state = i.cache.get(id).expect("cached after first touch");
        if let Some(prev) = prev_state {
            assert_eq!(state, advance_node(prev));
        }
        assert_eq!(value, (state + i.hashed_seed()) / 2.0);
        prev_state = Some(state);
        values.push(value);
    }
    assert_ne!(values[0], values[1]);
    assert_ne!(values[1], values[2]);
    assert_ne!(values[0], values[2]);
}

#[test]
fn draw_matches_generator_from_node() {
    let mut a = inst("ABCDEFGH");
    let mut b = a.clone();
    let node = a.get_node("boss");
    assert_eq!(b.random("boss"), LuaRandom::new(node).random());
    let node = a.get_node("boss");
    assert_eq!(b.randint("boss", 0, 99), LuaRandom::new(node).randint(0, 99));
    assert_eq!(a.cache.get("boss"), b.cache.get("boss"));
}

#[test]
fn independent_instances_agree() {
    let mut rng = Pcg64::seed_from_u64(0x5EED);
    let ids = ["Joker1", "Tarotar1", "shop_pack1", "cdt1", "Voucher1"];
    for _ in 0..50 {
        let seed = Seed::from_id(rng.gen_range(0..pseudoseed::seed::SEED_SPACE)).expect("seed");
        let mut a = Instance::new(seed);
        let mut b = Instance::new(seed);
        for _ in 0..40 {
            let id = ids[rng.gen_range(0..ids.len())];
            match rng.gen_range(0..4) {
                0 => assert_eq!(a.get_node(id), b.get_node(id)),
                1 => assert_eq!(a.random(id), b.random(id)),
                2 => assert_eq!(a.randint(id, -3, 17), b.randint(id, -3, 17)),
                _ => assert_eq!(a.randchoice(id, TAROTS), b.randchoice(id, TAROTS)),
            }
        }
    }
}

#[test]
fn interleaving_distinct_ids_is_order_independent() {
    let mut a = inst("KQJ19");
    let mut b = inst("KQJ19");
    let a1 = a.random("x");
    let a2 = a.random("y");
    let b2 = b.random("y");
    let b1 = b.random("x");
    assert_eq!((a1, a2), (b1, b2));
}

#[test]
fn next_behaves_like_fresh_successor() {
    let mut i = inst("7LB2WVPK");
    i.get_node("Voucher1");
    i.get_node("Voucher1");
    i.cache.generated_first_pack = true;
    i.params.showman = true;
    i.next();

    let mut expected_seed: Seed = "7LB2WVPK".parse().expect("seed");
    expected_seed.next();
    assert_eq!(i.seed(), expected_seed);
    assert!(i.cache.is_empty());
    assert!(!i.cache.generated_first_pack);
    assert_eq!(i.params, InstParams::default());

    let mut fresh = Instance::new(expected_seed);
    assert_eq!(i.hashed_seed(), fresh.hashed_seed());
    assert_eq!(i.get_node("Voucher1"), fresh.get_node("Voucher1"));
}

#[test]
fn reset_behaves_like_fresh_instance() {
    let mut i = inst("AAAAAAAA");
    i.random("Voucher1");
    i.set_deck(Item::ZodiacDeck);

    let other: Seed = "1".parse().expect("seed");
    i.reset(other);
    assert_eq!(i.seed(), other);
    assert!(!i.cache.contains("Voucher1"));
    assert_eq!(i.params, InstParams::default());
    assert_eq!(i.get_node("cdt1"), 0.082_233_959_782_100_93);
}

#[test]
fn locks_survive_reseed() {
    let mut i = inst("AAAAAAAA");
    i.lock(Item::TheFool);
    i.next();
    assert!(i.is_locked(Item::TheFool));
    i.reset("ZZZ".parse().expect("seed"));
    assert!(i.is_locked(Item::TheFool));
    i.unlock(Item::TheFool);
    assert!(!i.is_locked(Item::TheFool));
}

#[test]
fn randchoice_known_picks() {
    let mut i = inst("AAAAAAAA");
    let got: Vec<Item> = (0..4).map(|_| i.randchoice("Tarotar1", TAROTS)).collect();
    assert_eq!(got, vec![Item::TheEmperor, Item::TheFool, Item::Death, Item::TheFool]);
    assert!(!i.cache.contains("Tarotar1_resample2"));
}

#[test]
fn randchoice_resamples_locked_pick() {
    let mut i = inst("AAAAAAAA");
    i.lock(Item::TheEmperor);
    assert_eq!(i.randchoice("Tarotar1", TAROTS), Item::Judgement);
    assert!(i.cache.contains("Tarotar1_resample2"));
    assert!(!i.cache.contains("Tarotar1_resample3"));
}

#[test]
fn showman_keeps_locked_first_pick() {
    let mut i = inst("AAAAAAAA");
    i.lock(Item::TheEmperor);
    i.params.showman = true;
    assert_eq!(i.randchoice("Tarotar1", TAROTS), Item::TheEmperor);
    assert!(!i.cache.contains("Tarotar1_resample2"));
}

#[test]
fn randchoice_gives_up_after_cap_when_everything_locked() {
    let mut i = inst("AAAAAAAA");
    for &t in TAROTS {
        i.lock(t);
    }
    let item = i.randchoice("Tarotar1", TAROTS);
    assert_eq!(item, Item::TheMagician);
    assert!(TAROTS.contains(&item));
    assert!(i.cache.contains(&format!("Tarotar1_resample{MAX_RESAMPLE}")));
    assert!(!i.cache.contains(&format!("Tarotar1_resample{}", MAX_RESAMPLE + 1)));
    // First pick plus one chain per suffix 2..=MAX_RESAMPLE.
    assert_eq!(i.cache.len(), MAX_RESAMPLE as usize);
}

#[test]
fn retry_sentinel_is_returned_only_when_resampling_gives_up() {
    let mut i = inst("RETRY");
    i.params.showman = true;
    assert_eq!(i.randchoice("Spectral1", &[Item::Retry]), Item::Retry);
    assert!(i.cache.contains(&format!("Spectral1_resample{MAX_RESAMPLE}")));

    let mut i = inst("RETRY");
    for _ in 0..200 {
        let got = i.randchoice("Spectral1", &[Item::Retry, Item::Hex]);
        assert_eq!(got, Item::Hex);
    }
}

#[test]
#[should_panic(expected = "empty pool")]
fn randchoice_rejects_empty_pool() {
    let mut i = inst("AAAAAAAA");
    i.randchoice("Tarotar1", &[]);
}

#[test]
fn weighted_header_convention() {
    let table = [
        WeightedItem::new(Item::Retry, 10.0),
        WeightedItem::new(Item::TheFool, 3.0),
        WeightedItem::new(Item::TheMagician, 7.0),
    ];
    assert_eq!(pick_weighted(&table, 0.0), Item::Retry);
    assert_eq!(pick_weighted(&table, 1e-12), Item::TheFool);
    assert_eq!(pick_weighted(&table, 2.999), Item::TheFool);
    assert_eq!(pick_weighted(&table, 3.0), Item::TheFool);
    assert_eq!(pick_weighted(&table, 3.000_001), Item::TheMagician);
    assert_eq!(pick_weighted(&table, 9.999), Item::TheMagician);
    assert_eq!(pick_weighted(&table, 10.0), Item::TheMagician);
}

#[test]
fn randweightedchoice_scales_draw_by_header() {
    let table = [
        WeightedItem::new(Item::Retry, 10.0),
        WeightedItem::new(Item::TheFool, 3.0),
        WeightedItem::new(Item::TheMagician, 7.0),
    ];
    let mut i = inst("7LB2WVPK");
    for _ in 0..100 {
        let mut probe = i.clone();
        let poll = probe.random("pack") * 10.0;
        let expected = if poll <= 3.0 { Item::TheFool } else { Item::TheMagician };
        assert_eq!(i.randweightedchoice("pack", &table), expected);
    }
}

#[test]
fn voucher_activation_locks_and_unlocks_upgrade() {
    let mut i = inst("AAAAAAAA");
    i.lock(Item::OverstockPlus);
    i.activate_voucher(Item::Overstock);
    assert!(i.is_voucher_active(Item::Overstock));
    assert!(i.is_locked(Item::Overstock));
    assert!(!i.is_locked(Item::OverstockPlus));

    i.lock(Item::Liquidation);
    i.activate_voucher(Item::ClearanceSale);
    i.activate_voucher(Item::Liquidation);
    assert!(i.is_locked(Item::Liquidation));

    // Not a voucher: nothing happens.
    i.activate_voucher(Item::TheFool);
    assert!(!i.is_locked(Item::TheFool));
    assert!(!i.is_voucher_active(Item::TheFool));
}

#[test]
fn decks_redeem_starting_vouchers() {
    let mut i = inst("AAAAAAAA");
    i.set_deck(Item::ZodiacDeck);
    assert_eq!(i.params.deck, Item::ZodiacDeck);
    let active: Vec<Item> = VOUCHERS.iter().copied().filter(|&v| i.is_voucher_active(v)).collect();
    assert_eq!(active, vec![Item::Overstock, Item::TarotMerchant, Item::PlanetMerchant]);

    let mut i = inst("AAAAAAAA");
    i.set_deck(Item::MagicDeck);
    assert!(i.is_voucher_active(Item::CrystalBall));
    i.set_stake(Item::GoldStake);
    assert_eq!(i.params.stake, Item::GoldStake);

    let mut i = inst("AAAAAAAA");
    i.set_deck(Item::PlasmaDeck);
    assert_eq!(i.params.vouchers, 0);
}
