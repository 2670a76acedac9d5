pub mod abstraction;
pub mod cards;
pub mod cfr;
pub mod config;
pub mod engine;
pub mod equity;
pub mod error;
pub mod gameplay;
pub mod mcts;
pub mod nash;
pub mod solver;

/// dimensional analysis types
pub type Chips = i32;
pub type Equity = f32;
pub type Utility = f32;
pub type Probability = f32;

/// frequencies in a strategy distribution are expressed in percent.
/// they sum to 100 within rounding tolerance.
pub type Percent = f32;

// regret matching parameters
pub(crate) const REGRET_MIN: Utility = -3e5;
pub(crate) const REGRET_MAX: Utility = Utility::MAX;
pub(crate) const POLICY_MIN: Probability = Probability::MIN_POSITIVE;

/// trait for random generation, mainly (strictly?) for testing
pub trait Arbitrary {
    fn random() -> Self;
}

/// progress bar
pub fn progress(n: usize) -> indicatif::ProgressBar {
    let tick = std::time::Duration::from_secs(1);
    let style = "{spinner:.cyan} {elapsed} ~ {percent:>3}% {wide_bar:.cyan}";
    let style = indicatif::ProgressStyle::with_template(style).unwrap();
    let progress = indicatif::ProgressBar::new(n as u64);
    progress.set_style(style);
    progress.enable_steady_tick(tick);
    progress
}

/// initialize logging for the binaries
pub fn init() {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time moves slow")
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time)).expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).expect("initialize logger");
}
