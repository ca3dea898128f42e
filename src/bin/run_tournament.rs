use clap::Parser;
use holdem_bots::arena::{
    Agent,
    agent::{AggressiveAgent, AllInAgent, ConservativeAgent, RandomAgent},
    tournament::SingleTableTournamentBuilder,
};
use rand::{SeedableRng, rngs::StdRng};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, long_about = None)]
#[command(name = "run-tournament")]
#[command(about = "Play a table of hold'em bots against each other")]
struct Cli {
    /// Chips each bot starts with
    #[arg(short, long, default_value_t = 200)]
    stack: u32,

    /// The big blind, and the smallest raise allowed
    #[arg(short, long, default_value_t = 10)]
    min_bet: u32,

    /// Stop after this many hands
    #[arg(long, default_value_t = 10)]
    hands: usize,

    /// Seed for the deck and the bots, random if not given
    #[arg(long)]
    seed: Option<u64>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let seed = cli.seed.unwrap_or_else(rand::random);
    let mut rng = StdRng::seed_from_u64(seed);

    let agents: Vec<Box<dyn Agent>> = vec![
        Box::new(AggressiveAgent),
        Box::new(ConservativeAgent::with_seed(seed.wrapping_add(1))),
        Box::new(AllInAgent),
        Box::new(RandomAgent::with_seed(seed.wrapping_add(2))),
    ];
    let names = ["Aggressive", "Conservative", "AllIn", "Random"]
        .iter()
        .map(|name| name.to_string())
        .collect();

    let tournament = SingleTableTournamentBuilder::default()
        .agents(agents)
        .names(names)
        .starting_stacks(vec![cli.stack; 4])
        .min_bet(cli.min_bet)
        .max_hands(cli.hands)
        .build();

    let results = match tournament.and_then(|t| t.run(&mut rng)) {
        Ok(results) => results,
        Err(error) => {
            eprintln!("Tournament failed: {error}");
            std::process::exit(1);
        }
    };

    println!("Seed {seed}, {} hands played", results.hands_played);
    let mut standings: Vec<usize> = (0..results.places.len()).collect();
    standings.sort_by_key(|&idx| results.places[idx]);
    for idx in standings {
        println!(
            "{}. {:<14} {:>6}",
            results.places[idx], results.names[idx], results.stacks[idx]
        );
    }
}
