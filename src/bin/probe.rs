use std::io::{self, Write};

use clap::{Parser, ValueEnum};
use log::{debug, info};
use serde::Serialize;

use pseudoseed::types::{PLANETS, SPECTRALS, TAROTS};
use pseudoseed::{Instance, Item, Seed};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OpOpt {
    Node,
    Random,
    Randint,
    Choice,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PoolOpt {
    Tarot,
    Planet,
    Spectral,
}

#[derive(Debug, Parser)]
#[command(name = "probe", about = "Print the pseudorandom draws a seed produces for given IDs")]
struct Args {
    /// Seed to bind (1-8 characters from 1-9, A-Z without O)
    #[arg(long)]
    seed: String,

    /// Decision-point ID; repeat for several IDs
    #[arg(long = "id", required = true)]
    ids: Vec<String>,

    /// Draw to perform for every step
    #[arg(long, value_enum, default_value_t = OpOpt::Random)]
    op: OpOpt,

    /// Number of consecutive draws per ID
    #[arg(long, default_value_t = 1)]
    count: usize,

    /// Lower bound for --op randint
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    min: i32,

    /// Upper bound for --op randint
    #[arg(long, default_value_t = 10, allow_negative_numbers = true)]
    max: i32,

    /// Pool used by --op choice
    #[arg(long, value_enum, default_value_t = PoolOpt::Tarot)]
    pool: PoolOpt,

    /// Deck name, e.g. "Magic Deck" or Magic_Deck
    #[arg(long)]
    deck: Option<String>,

    /// Stake name, e.g. "Gold Stake"
    #[arg(long)]
    stake: Option<String>,

    /// Ignore locks on the first pick of --op choice
    #[arg(long)]
    showman: bool,

    /// Item to lock before drawing; repeatable
    #[arg(long = "lock")]
    locks: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum DrawValue {
    Float(f64),
    Int(i32),
    Item(Item),
}

#[derive(Debug, Serialize)]
struct DrawOut<'a> {
    seed: String,
    id: &'a str,
    step: usize,
    op: &'static str,
    value: DrawValue,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let seed: Seed = args.seed.parse().map_err(|e| format!("Seed parse error: {e}"))?;
    let mut inst = Instance::new(seed);

    if let Some(deck) = &args.deck {
        let deck: Item = deck.parse().map_err(|e| format!("Deck parse error: {e}"))?;
        inst.set_deck(deck);
    }
    if let Some(stake) = &args.stake {
        let stake: Item = stake.parse().map_err(|e| format!("Stake parse error: {e}"))?;
        inst.set_stake(stake);
    }
    inst.params.showman = args.showman;
    for name in &args.locks {
        let item: Item = name.parse().map_err(|e| format!("Lock parse error: {e}"))?;
        inst.lock(item);
    }
    info!(
        "[probe] seed={} hashed_seed={} ids={} count={} op={:?} locks={}",
        seed,
        inst.hashed_seed(),
        args.ids.len(),
        args.count,
        args.op,
        inst.locks().len()
    );

    let pool: &[Item] = match args.pool {
        PoolOpt::Tarot => TAROTS,
        PoolOpt::Planet => PLANETS,
        PoolOpt::Spectral => SPECTRALS,
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for id in &args.ids {
        for step in 1..=args.count {
            let (op, value) = match args.op {
                OpOpt::Node => ("node", DrawValue::Float(inst.get_node(id))),
                OpOpt::Random => ("random", DrawValue::Float(inst.random(id))),
                OpOpt::Randint => ("randint", DrawValue::Int(inst.randint(id, args.min, args.max))),
                OpOpt::Choice => ("choice", DrawValue::Item(inst.randchoice(id, pool))),
            };
            let line = DrawOut { seed: seed.to_string(), id, step, op, value };
            serde_json::to_writer(&mut out, &line)?;
            writeln!(out)?;
        }
    }
    debug!("[probe] cached chains={}", inst.cache.len());

    Ok(())
}
