use clap::Parser;
use gtopoker::Chips;
use gtopoker::cfr::trainer::Trainer;
use gtopoker::cfr::trainer::Variant;
use gtopoker::cfr::tree::GameTree;
use gtopoker::config::CfrConfig;
use gtopoker::gameplay::game::Game;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rayon::prelude::*;

/// run CFR self-play on a heads-up spot and print the root strategy.
/// iterations split across workers, each with its own regret tables,
/// merged at the end.
#[derive(Parser)]
#[command(name = "trainer", about = "train the abstracted-tree solver on a spot")]
struct Args {
    /// total training iterations across all workers
    #[arg(long, default_value_t = 50_000)]
    iterations: usize,
    /// vanilla, plus, or external
    #[arg(long, default_value = "plus")]
    variant: String,
    /// decision plies in the abstract tree
    #[arg(long, default_value_t = 3)]
    depth: usize,
    /// stack depth in chips at blinds 1/2
    #[arg(long, default_value_t = 100)]
    stack: Chips,
    /// worker threads, 0 meaning every core
    #[arg(long, default_value_t = 0)]
    jobs: usize,
    #[arg(long, default_value_t = 2024)]
    seed: u64,
    /// print the recommendation as json instead of a table
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    gtopoker::init();
    let args = Args::parse();
    let variant = match args.variant.as_str() {
        "vanilla" => Variant::Vanilla,
        "plus" => Variant::Plus,
        "external" => Variant::External,
        other => anyhow::bail!("unknown variant {}", other),
    };
    let jobs = match args.jobs {
        0 => num_cpus::get(),
        n => n,
    };
    let per_worker = (args.iterations / jobs).max(1);
    let mut rng = SmallRng::seed_from_u64(args.seed);
    let game = Game::table(&["hero", "villain"], args.stack, (1, 2), &mut rng)?;
    let tree = GameTree::plan(&game, 0, args.depth)?;
    log::info!(
        "training {} x {} iterations over a {}-node tree",
        jobs,
        per_worker,
        tree.size()
    );
    let bar = gtopoker::progress(jobs * per_worker);
    let config = CfrConfig {
        variant,
        iterations: per_worker,
        depth: args.depth,
        exploit_every: (per_worker / 20).max(1),
        exploit_target: 0.0,
    };
    let workers = (0..jobs)
        .into_par_iter()
        .map(|j| {
            let mut trainer = Trainer::new(tree.clone(), variant, args.seed + j as u64)
                .with_world(game.clone(), 0);
            let mut last = 0usize;
            trainer.train(&config, None, &mut |p| {
                bar.inc((p.iteration - last) as u64);
                last = p.iteration;
                log::debug!(
                    "worker {} iteration {} exploitability {:.5}",
                    j,
                    p.iteration,
                    p.exploitability
                );
            });
            trainer
        })
        .collect::<Vec<Trainer>>();
    bar.finish();
    let trainer = workers
        .into_iter()
        .reduce(|mut a, b| {
            a.absorb(b);
            a
        })
        .expect("at least one worker");
    log::info!("merged exploitability {:.5}", trainer.exploitability());
    let decision = trainer.decision();
    if args.json {
        let lines = decision
            .iter()
            .map(|(action, frequency, ev)| {
                serde_json::json!({
                    "action": action,
                    "frequency": frequency * 100.0,
                    "ev": ev,
                })
            })
            .collect::<Vec<_>>();
        println!("{}", serde_json::to_string_pretty(&lines)?);
    } else {
        println!("root strategy after {} iterations:", trainer.epochs());
        for (action, frequency, ev) in decision {
            println!("  {:<14} {:>5.1}%  {:>+8.2}", action.to_string(), frequency * 100.0, ev);
        }
    }
    Ok(())
}
