use clap::Parser;
use colored::Colorize;
use dialoguer::Confirm;
use dialoguer::Input;
use dialoguer::Select;
use gtopoker::Chips;
use gtopoker::config::Config;
use gtopoker::engine::Engine;
use gtopoker::gameplay::action::Action;
use gtopoker::gameplay::seat::Seat;
use gtopoker::solver::agent::Agent;
use gtopoker::solver::profile::DecisionProfile;

/// sit at a table against the engine's own agents.
/// every decision you make is graded against the solver's profile,
/// with the EV you left behind printed when you stray.
#[derive(Parser)]
#[command(name = "play", about = "play graded hands against the engine")]
struct Args {
    /// players at the table, you included
    #[arg(long, default_value_t = 3)]
    seats: usize,
    /// starting stack in chips (blinds are 1/2)
    #[arg(long, default_value_t = 100)]
    stack: Chips,
    /// solver budget per decision in milliseconds
    #[arg(long, default_value_t = 250)]
    think: u64,
    /// fixed seed for reproducible sessions
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    gtopoker::init();
    let args = Args::parse();
    anyhow::ensure!((2..=6).contains(&args.seats), "2 to 6 seats");
    let seed = args.seed.unwrap_or_else(rand::random);
    let mut stacks = vec![args.stack; args.seats];
    let mut hand = 0u64;
    loop {
        play_hand(&mut stacks, hand, seed, &args)?;
        hand += 1;
        if stacks[0] <= 0 {
            println!("{}", "you are felted, thanks for playing".red());
            break;
        }
        if stacks.iter().any(|&s| s <= 0) {
            println!("{}", "a seat went broke, session over".green());
            break;
        }
        if !Confirm::new()
            .with_prompt("next hand?")
            .default(true)
            .interact()?
        {
            break;
        }
    }
    Ok(())
}

fn play_hand(stacks: &mut [Chips], hand: u64, seed: u64, args: &Args) -> anyhow::Result<()> {
    let n = stacks.len();
    let ids = (0..n)
        .map(|i| {
            if i == 0 {
                "you".to_string()
            } else {
                format!("bot{}", i)
            }
        })
        .collect::<Vec<String>>();
    // the button walks one seat per hand
    let dealer = (hand as usize) % n;
    let sblind = if n == 2 { dealer } else { (dealer + 1) % n };
    let bblind = if n == 2 { (dealer + 1) % n } else { (dealer + 2) % n };
    let seats = (0..n)
        .map(|i| {
            let seat = Seat::new(ids[i].clone(), stacks[i]);
            let seat = if i == 0 { seat.with_hero() } else { seat };
            let seat = if i == dealer { seat.with_dealer() } else { seat };
            let seat = if i == sblind { seat.with_sblind() } else { seat };
            if i == bblind { seat.with_bblind() } else { seat }
        })
        .collect::<Vec<Seat>>();
    let mut engine = Engine::with_seats(seats, Config::default(), seed ^ hand)?;
    let mut agent = Agent::new(seed ^ hand ^ 0xb07);
    println!();
    println!("{}", format!("=== hand {} ===", hand + 1).bold());
    while !engine.game().over() {
        let id = engine.game().action_on().to_string();
        let profile = engine.solve(&id, args.think)?;
        if id == "you" {
            render(&engine);
            let action = prompt(&engine)?;
            grade(&profile, &action);
            engine.execute_action("you", action)?;
        } else {
            let action = agent.act(&profile);
            println!("  {:<6} {}", id.dimmed(), action);
            engine.execute_action(&id, action)?;
        }
    }
    settle(&engine, stacks);
    Ok(())
}

fn render(engine: &Engine) {
    let game = engine.game();
    let hero = game.seats().iter().find(|s| s.is_hero()).expect("seated");
    println!();
    println!(
        "{} pot {} board {}",
        game.street().to_string().cyan(),
        game.pot().to_string().yellow(),
        game.board()
    );
    println!(
        "your hand {}  stack {}",
        hero.cards().expect("dealt").to_string().bold(),
        hero.stack()
    );
}

fn prompt(engine: &Engine) -> anyhow::Result<Action> {
    let legal = engine.legal_actions("you")?;
    let labels = legal.iter().map(|a| a.to_string()).collect::<Vec<_>>();
    let pick = Select::new()
        .with_prompt("your action")
        .items(&labels)
        .default(0)
        .interact()?;
    let mut action = legal[pick];
    if matches!(action, Action::Bet(_) | Action::Raise(_)) {
        let min = action.chips();
        let to: Chips = Input::new()
            .with_prompt(format!("to how much (min {})", min))
            .default(min)
            .interact_text()?;
        action = match action {
            Action::Bet(_) => Action::Bet(to),
            Action::Raise(_) => Action::Raise(to),
            a => a,
        };
    }
    Ok(action)
}

/// the lesson: how far from the solver's line did you land
fn grade(profile: &DecisionProfile, action: &Action) {
    let optimal = profile.optimal();
    let chosen = profile
        .entries
        .iter()
        .find(|e| std::mem::discriminant(&e.action) == std::mem::discriminant(action));
    println!("{}", "--- solver ---".dimmed());
    print!("{}", profile);
    match chosen {
        Some(entry) if entry.optimal => {
            println!("{}", "max EV, well played".green());
        }
        Some(entry) if entry.frequency >= 10.0 => {
            println!(
                "{}",
                format!(
                    "on the mixed line at {:.0}%, {:.2}bb behind the best",
                    entry.frequency,
                    optimal.ev - entry.ev
                )
                .yellow()
            );
        }
        Some(entry) => {
            println!(
                "{}",
                format!("blunder: {:.2}bb worse than {}", optimal.ev - entry.ev, optimal.action)
                    .red()
            );
        }
        None => println!("{}", "off the charted actions".red()),
    }
}

fn settle(engine: &Engine, stacks: &mut [Chips]) {
    let game = engine.game();
    println!();
    for (i, seat) in game.seats().iter().enumerate() {
        stacks[i] = seat.stack();
        let result = game
            .result()
            .and_then(|r| r.get(i).map(|s| s.pnl()))
            .unwrap_or(0);
        let line = format!("{:<6} stack {:>5} ({:+})", seat.id(), seat.stack(), result);
        if result > 0 {
            println!("{}", line.green());
        } else {
            println!("{}", line);
        }
    }
}
