//! Timing experiments for `threaded-avl`.
//!
//! 1. `prefix`: average cost of `prefix_xor` (tree walk) against
//!    `slow_prefix_xor` (list walk) on random trees of growing size.
//! 2. `insert`: average cost of one insertion into an AVL tree and into the
//!    unbalanced baseline, for ascending, balanced and random key sequences.
//!
//! Results are printed as `|`-separated nanosecond averages, one row per
//! round.

use std::process::ExitCode;
use std::time::Instant;

use clap::{Parser, ValueEnum};
use log::{debug, error, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use threaded_avl::{AvlTree, BsTree, OrderedTree};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Experiment {
    Prefix,
    Insert,
    All,
}

#[derive(Debug, Parser)]
#[command(name = "avl-experiments", about = "Time AVL prefix queries and insertions")]
struct Cli {
    /// Which experiment to run.
    #[arg(long, value_enum, default_value_t = Experiment::All, env = "AVL_EXPERIMENT")]
    experiment: Experiment,

    /// Number of rounds; round `i` works on `i` times the base size.
    #[arg(long, default_value_t = 5, env = "AVL_ROUNDS")]
    rounds: u32,

    /// Tree size increment per round for the prefix experiment.
    #[arg(long, default_value_t = 500, env = "AVL_STEP")]
    step: usize,

    /// Seed for the random key sequences; drawn from the OS when omitted.
    #[arg(long, env = "AVL_SEED")]
    seed: Option<u64>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let _r = env_logger::builder()
        .filter_level(log::LevelFilter::Warn)
        .format_target(false)
        .format_timestamp(None)
        .parse_default_env()
        .try_init();

    if cli.rounds == 0 || cli.step == 0 {
        error!("--rounds and --step must be positive");
        return ExitCode::FAILURE;
    }

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    debug!("running {:?}", cli);

    if matches!(cli.experiment, Experiment::Prefix | Experiment::All) {
        prefix_experiment(&mut rng, cli.rounds, cli.step);
    }
    if cli.experiment == Experiment::All {
        println!();
    }
    if matches!(cli.experiment, Experiment::Insert | Experiment::All) {
        insert_experiment(&mut rng, cli.rounds);
    }
    ExitCode::SUCCESS
}

fn random_tree(rng: &mut StdRng, n: usize) -> AvlTree {
    let mut tree = AvlTree::new();
    for _ in 0..n {
        // Collisions are simply skipped, as in a plain random fill.
        let _ = tree.insert(rng.gen_range(0..i32::MAX), true);
    }
    tree
}

fn time_ns(f: impl FnOnce()) -> u128 {
    let start = Instant::now();
    f();
    start.elapsed().as_nanos()
}

fn prefix_experiment(rng: &mut StdRng, rounds: u32, step: usize) {
    const HEAD: usize = 100;

    for i in 1..=rounds {
        let tree = random_tree(rng, step * i as usize);
        let keys = tree.keys_in_order();
        info!("prefix round {i}: {} distinct keys", keys.len());

        let (mut fast, mut slow) = (0u128, 0u128);
        let (mut fast_head, mut slow_head) = (0u128, 0u128);
        for (j, &k) in keys.iter().enumerate() {
            fast += time_ns(|| {
                std::hint::black_box(tree.prefix_xor(k).ok());
            });
            slow += time_ns(|| {
                std::hint::black_box(tree.slow_prefix_xor(k));
            });
            if j + 1 == HEAD {
                (fast_head, slow_head) = (fast, slow);
            }
        }
        let head = keys.len().min(HEAD);
        if keys.len() < HEAD {
            (fast_head, slow_head) = (fast, slow);
        }

        println!(
            "i={i} | {:.6} | {:.6} | {:.6} | {:.6}",
            average(fast, keys.len()),
            average(slow, keys.len()),
            average(fast_head, head),
            average(slow_head, head),
        );
    }
}

fn insert_experiment(rng: &mut StdRng, rounds: u32) {
    for i in 1..=rounds {
        let n = 1000 * i as usize;
        let ascending: Vec<i32> = (0..n as i32).collect();
        let balanced: Vec<i32> = BalancedSequence::new(n).take(n).collect();
        let random: Vec<i32> = (0..n).map(|_| rng.gen_range(0..i32::MAX)).collect();
        let narrow: Vec<i32> = (0..n).map(|_| rng.gen_range(0..100)).collect();

        let avgs = [
            measure_avg(&ascending, &mut AvlTree::new()),
            measure_avg(&ascending, &mut BsTree::new()),
            measure_avg(&balanced, &mut AvlTree::new()),
            measure_avg(&balanced, &mut BsTree::new()),
            measure_avg(&random, &mut AvlTree::new()),
            measure_avg(&narrow, &mut BsTree::new()),
        ];
        println!(
            "i={i} | {:.6} | {:.6} | {:.6} | {:.6} | {:.6} | {:.6}",
            avgs[0], avgs[1], avgs[2], avgs[3], avgs[4], avgs[5]
        );
    }
}

/// Average time of one `insert` over `keys`, duplicates included.
fn measure_avg<T: OrderedTree>(keys: &[i32], tree: &mut T) -> f64 {
    let total: u128 = keys
        .iter()
        .map(|&k| {
            time_ns(|| {
                let _ = std::hint::black_box(tree.insert(k, true));
            })
        })
        .sum();
    average(total, keys.len())
}

fn average(total: u128, n: usize) -> f64 {
    if n == 0 {
        0.0
    } else {
        total as f64 / n as f64
    }
}

/// Breadth-first midpoints of `1..=n`: `n/2`, then `n/4` and `3n/4`, and so
/// on. Inserting keys in this order builds a balanced tree even without
/// rebalancing.
struct BalancedSequence {
    n: f64,
    exp: i32,
    i: i64,
}

impl BalancedSequence {
    fn new(n: usize) -> Self {
        Self {
            n: n as f64,
            exp: 1,
            i: -1,
        }
    }
}

impl Iterator for BalancedSequence {
    type Item = i32;

    fn next(&mut self) -> Option<i32> {
        self.i += 2;
        if self.i as f64 > 2f64.powi(self.exp) {
            self.exp += 1;
            self.i = 1;
        }
        Some((self.i as f64 * (self.n + 1.0) / 2f64.powi(self.exp)).ceil() as i32)
    }
}
