use bidding_engine::{BidDecision, BiddingEngine, DealSession, EngineConfig, ExplanationLevel};
use clap::{Parser, Subcommand};
use cli::bidding_utils::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;
use tracing::info;
use types::{Auction, Hand, Position};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Engine configuration file (YAML)
    #[arg(short, long, global = true, env = "BIDDING_CONFIG")]
    config: Option<PathBuf>,

    /// Explanation level: simple, detailed, expert or convention_only
    #[arg(short, long, global = true)]
    level: Option<ExplanationLevel>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Show engine debug logs (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decide the next call for one hand
    Decide {
        /// Hand in dotted form, clubs first (e.g. AK2.Q32.KJ32.K32)
        #[arg(long)]
        hand: String,

        /// Calls so far, separated by spaces or commas (e.g. "1N P 2C P")
        #[arg(short, long, default_value = "")]
        auction: String,

        /// Dealer seat
        #[arg(short, long, default_value = "N")]
        dealer: Position,

        /// Seat to act; defaults to whoever is next
        #[arg(short, long)]
        seat: Option<Position>,
    },
    /// Bid random deals to the end with all four seats played by the engine
    Simulate {
        /// Number of random deals
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,

        /// Random seed for reproducible runs (random if omitted, always printed)
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "bidding_engine=debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_engine(args: &Args) -> Result<BiddingEngine, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => EngineConfig::from_path(path)?,
        None => EngineConfig::default(),
    };
    if let Some(level) = args.level {
        config.explanation_level = level;
    }
    Ok(BiddingEngine::new(config))
}

fn print_decision(decision: &BidDecision, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(decision)?);
    } else {
        println!("{}", format_detail(decision));
    }
    Ok(())
}

fn decide(
    engine: &BiddingEngine,
    hand: &str,
    calls: &str,
    dealer: Position,
    seat: Option<Position>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let hand: Hand = hand.parse()?;
    if !hand.is_complete() {
        return Err(format!("hand has {} cards, expected 13", hand.cards.len()).into());
    }
    let auction = Auction::from_calls(dealer, parse_calls(calls)?);
    let seat = seat.unwrap_or_else(|| auction.current_player());
    info!(%hand, history = %auction, %seat, "deciding");
    let decision = engine.decide(&hand, &auction, seat)?;
    print_decision(&decision, json)
}

fn simulate(
    engine: &BiddingEngine,
    count: usize,
    seed: Option<u64>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let seed = seed.unwrap_or_else(|| rand::thread_rng().gen());
    eprintln!("Seed: {seed} | Deals: {count}");
    let mut rng = StdRng::seed_from_u64(seed);

    for n in 0..count {
        let hands = random_deal(&mut rng);
        let dealer = Position::ALL[n % 4];
        let mut session = DealSession::new(engine, dealer);
        let mut decisions = Vec::new();
        while !session.is_finished() {
            let seat = session.current_player();
            let decision = session.bid(&hands[seat.idx()])?;
            decisions.push((seat, decision));
        }

        if json {
            let record = serde_json::json!({
                "deal": n + 1,
                "dealer": dealer,
                "hands": hands.iter().map(|h| h.to_string()).collect::<Vec<_>>(),
                "calls": decisions.iter().map(|(seat, d)| serde_json::json!({
                    "seat": seat,
                    "decision": d,
                })).collect::<Vec<_>>(),
            });
            println!("{}", serde_json::to_string(&record)?);
            continue;
        }

        println!("Deal {} | Dealer: {dealer}", n + 1);
        println!("{}", format_hands_table(&hands));
        print!("{}", format_table_header());
        for (idx, (seat, decision)) in decisions.iter().enumerate() {
            println!("{}", format_row(idx + 1, *seat, decision));
        }
        match session.auction().final_contract() {
            Some(contract) => {
                let reach = if contract.is_slam() {
                    " (slam)"
                } else if contract.is_game() {
                    " (game)"
                } else {
                    ""
                };
                println!("Contract: {contract}{reach}\n");
            }
            None => println!("Passed out\n"),
        }
    }
    Ok(())
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    let result = load_engine(&args).and_then(|engine| match &args.command {
        Command::Decide {
            hand,
            auction,
            dealer,
            seat,
        } => decide(&engine, hand, auction, *dealer, *seat, args.json),
        Command::Simulate { count, seed } => simulate(&engine, *count, *seed, args.json),
    });
    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
