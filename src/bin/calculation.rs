use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use calculation_solver::game::is_winnable_size;
use calculation_solver::{
    compare_players, get_deck, render_moves, solve, write_results, Board, Card, GameRng, GreedyPlayer,
    RandomPlayer, RankingKind, RunRecord, SearchLimits, SearchMode, SearchOutcome, SolverConfig,
};
use log::{LevelFilter, Log, Metadata, Record};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Cards in each suit (5 to 13)
    #[arg(long, default_value_t = 13, value_name = "NUM")]
    cards_per_suit: u8,
    /// Max boards to expand before giving up
    #[arg(long, value_name = "NUM")]
    iterations: Option<u64>,
    /// Search strategy: bfs or ida
    #[arg(long, default_value = "bfs")]
    mode: SearchMode,
    /// Waste ordering: by-length, king-reserved or short-term-chain
    #[arg(long, default_value = "by-length")]
    ranking: RankingKind,
    /// Waste pile the king-aware rankings keep for Kings
    #[arg(long, value_name = "PILE")]
    king_pile: Option<usize>,
    /// Never place a non-King on the King pile until all Kings are out
    #[arg(long)]
    reserve_king_pile: bool,
    /// Seed for the shuffle; taken from the clock when omitted
    #[arg(long)]
    seed: Option<u64>,
    /// Fixed deck as comma-separated card values instead of a shuffle
    #[arg(long, value_delimiter = ',', value_name = "CARDS")]
    deck: Option<Vec<Card>>,
    /// Wall-clock limit for the search
    #[arg(long, value_name = "SECS")]
    time_limit_secs: Option<u64>,
    /// Append a JSON record of the run to this file
    #[arg(long, value_name = "FILE")]
    output: Option<PathBuf>,
    /// Instead of solving, pit a random player against a greedy one over this many deals
    #[arg(long, value_name = "GAMES")]
    compare: Option<usize>,
    /// Expansions between progress reports (shown with -vv, boards with -vvv)
    #[arg(long, default_value_t = 10_000, value_name = "NUM")]
    progress_interval: u64,
    /// Log more: -v for run summaries, -vv for progress, -vvv for boards
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

/// Writes log records to stderr, one per line.
struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn init_logging(verbose: u8) -> Result<()> {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    log::set_logger(&LOGGER).map_err(|err| anyhow::anyhow!("failed to install the logger: {err}"))?;
    log::set_max_level(level);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;
    let seed = cli.seed.unwrap_or_else(clock_seed);

    if !is_winnable_size(cli.cards_per_suit) {
        log::warn!(
            "no deal with {} cards per suit can be won; the search will only end on its budget",
            cli.cards_per_suit
        );
    }

    if let Some(games) = cli.compare {
        let mut rng = GameRng::new(seed);
        let comparison = compare_players(
            &mut RandomPlayer::new(seed),
            &mut GreedyPlayer,
            cli.cards_per_suit,
            games,
            &mut rng,
        )?;
        println!("Random won {}/{} games", comparison.first_wins, comparison.games);
        println!("Greedy won {}/{} games", comparison.second_wins, comparison.games);
        return Ok(());
    }

    let config = build_config(&cli);

    let deck = get_deck(cli.cards_per_suit, cli.deck, seed).context("failed to build the deck")?;
    println!("Seed: {seed}");
    println!("Deck: {:?}", deck.cards());

    let report = solve(&deck, &config)?;
    match &report.outcome {
        SearchOutcome::Solved(board) => {
            println!("{board}");
            print!("{}", render_moves(board.move_log()));
            println!("Solved in {} moves", board.move_count());
        }
        SearchOutcome::NoSolution => {
            println!("{}", Board::new(&deck));
            println!("No solution");
        }
        SearchOutcome::Timeout => println!("Gave up: search budget exhausted"),
    }
    println!(
        "Expanded {} boards ({} duplicates, {:.1}% of children) in {:.3}s",
        report.stats.expansions,
        report.stats.duplicates,
        report.stats.duplicate_rate() * 100.0,
        report.stats.time_us as f64 / 1_000_000.0
    );

    if let Some(path) = &cli.output {
        let record = RunRecord::new(&deck, config.mode, config.ranking, &report.outcome, &report.stats);
        write_results(path, &record).with_context(|| format!("failed to write {}", path.display()))?;
    }

    Ok(())
}

fn build_config(cli: &Cli) -> SolverConfig {
    let mut limits = SearchLimits::unlimited();
    if let Some(iterations) = cli.iterations {
        limits = limits.with_max_expansions(iterations);
    }
    if let Some(secs) = cli.time_limit_secs {
        limits = limits.with_time_limit(Duration::from_secs(secs));
    }

    let mut config = SolverConfig::default()
        .with_cards_per_suit(cli.cards_per_suit)
        .with_mode(cli.mode)
        .with_ranking(cli.ranking)
        .with_limits(limits)
        .with_progress_interval(cli.progress_interval);
    if let Some(pile) = cli.king_pile {
        config.king_pile = pile;
    }
    if cli.reserve_king_pile {
        let king_pile = config.king_pile;
        config = config.with_reserved_king_pile(king_pile);
    }
    config
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}
