use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing_subscriber::EnvFilter;

use kalah::ai::{Agent, AgentKind, HeuristicKind, SearchConfig};
use kalah::arena::{play_game_with, run_match};
use kalah::config::AppConfig;
use kalah::game::{GameOutcome, GameState, Pit, Player};

/// Play Kalah against the computer or pit computer players against each other.
#[derive(Parser)]
#[command(name = "kalah", about = "Kalah (Mancala) with minimax opponents")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, global = true, default_value = "kalah.toml")]
    config: PathBuf,

    /// Override the minimax search depth
    #[arg(long, global = true)]
    depth: Option<u32>,

    /// Override the minimax evaluation
    #[arg(long, global = true, value_enum)]
    heuristic: Option<HeuristicKind>,

    /// Cap the nodes a minimax move may expand
    #[arg(long, global = true)]
    node_budget: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Play a game at the terminal; either seat may be a human
    Play {
        #[arg(long, value_enum, default_value = "human")]
        p1: Seat,
        #[arg(long, value_enum, default_value = "minimax")]
        p2: Seat,
    },
    /// Watch two computer players play one game
    Watch {
        #[arg(long, value_enum)]
        p1: Option<AgentKind>,
        #[arg(long, value_enum)]
        p2: Option<AgentKind>,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Play many games and report win/loss/draw statistics
    Stats {
        #[arg(long, value_enum)]
        p1: Option<AgentKind>,
        #[arg(long, value_enum)]
        p2: Option<AgentKind>,
        #[arg(long)]
        games: Option<usize>,
        #[arg(long)]
        seed: Option<u64>,
        /// Print the statistics as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the default configuration as TOML
    Config,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Seat {
    Human,
    Random,
    Greedy,
    Minimax,
}

impl Seat {
    fn agent(self) -> Option<AgentKind> {
        match self {
            Seat::Human => None,
            Seat::Random => Some(AgentKind::Random),
            Seat::Greedy => Some(AgentKind::Greedy),
            Seat::Minimax => Some(AgentKind::Minimax),
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    if let Command::Config = cli.command {
        let toml = AppConfig::default_toml().context("serializing default config")?;
        print!("{toml}");
        return Ok(());
    }

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(depth) = cli.depth {
        config.search.depth = depth;
    }
    if let Some(heuristic) = cli.heuristic {
        config.search.heuristic = heuristic;
    }
    if cli.node_budget.is_some() {
        config.search.node_budget = cli.node_budget;
    }

    match cli.command {
        Command::Play { p1, p2 } => {
            config.validate().context("invalid configuration")?;
            run_play(p1, p2, &config.search)
        }
        Command::Watch { p1, p2, seed } => {
            config.validate().context("invalid configuration")?;
            let p1 = p1.unwrap_or(config.arena.player_one);
            let p2 = p2.unwrap_or(config.arena.player_two);
            run_watch(p1, p2, seed.or(config.arena.seed), &config.search)
        }
        Command::Stats {
            p1,
            p2,
            games,
            seed,
            json,
        } => {
            if let Some(p1) = p1 {
                config.arena.player_one = p1;
            }
            if let Some(p2) = p2 {
                config.arena.player_two = p2;
            }
            if let Some(games) = games {
                config.arena.games = games;
            }
            if seed.is_some() {
                config.arena.seed = seed;
            }
            config.validate().context("invalid configuration")?;
            run_stats(&config, json)
        }
        Command::Config => Ok(()),
    }
}

fn run_play(p1: Seat, p2: Seat, search: &SearchConfig) -> Result<()> {
    let mut seats: [Option<Box<dyn Agent>>; 2] = [
        p1.agent().map(|kind| kind.build(search, None)),
        p2.agent().map(|kind| kind.build(search, None)),
    ];
    for (seat, player) in seats.iter_mut().zip([Player::One, Player::Two]) {
        if let Some(agent) = seat {
            agent.bind(player);
        }
    }

    let mut state = GameState::new_game();
    println!("{} moves first.", state.turn().name());
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    while !state.check_game_over() {
        println!("\n{state}\n");
        let player = state.turn();
        let seat = match player {
            Player::One => &mut seats[0],
            Player::Two => &mut seats[1],
        };
        let pit = match seat {
            Some(agent) => {
                let pit = agent.make_move(&state)?;
                println!("{} ({}) sows {}", player.name(), agent.name(), pit);
                pit
            }
            None => match prompt_move(&state, &mut lines)? {
                Some(pit) => pit,
                None => {
                    println!("Thanks for playing!");
                    return Ok(());
                }
            },
        };

        let outcome = state.play(pit)?;
        if outcome.captured > 0 {
            println!("{} captures {} seeds", player.name(), outcome.captured);
        }
        if outcome.extra_turn && !outcome.game_over {
            println!("{} takes another turn", player.name());
        }
    }

    println!("\n{state}\n");
    print_result(&state);
    Ok(())
}

/// Ask the human to move until a legal pit is entered. `None` means quit.
fn prompt_move<B: BufRead>(
    state: &GameState,
    lines: &mut io::Lines<B>,
) -> Result<Option<Pit>> {
    let player = state.turn();
    let pits = player.pits();
    loop {
        print!(
            "{}, choose a pit ({}-{}) or QUIT: ",
            player.name(),
            pits[0],
            pits[5]
        );
        io::stdout().flush().context("flushing prompt")?;

        let Some(line) = lines.next() else {
            return Ok(None);
        };
        let line = line.context("reading move")?;
        let input = line.trim();
        if input.eq_ignore_ascii_case("quit") {
            return Ok(None);
        }

        let pit = match input.parse::<Pit>() {
            Ok(pit) => pit,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };
        match state.validate_move(pit) {
            Ok(()) => return Ok(Some(pit)),
            Err(err) => println!("Invalid move: {err}"),
        }
    }
}

fn run_watch(p1: AgentKind, p2: AgentKind, seed: Option<u64>, search: &SearchConfig) -> Result<()> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let mut one = p1.build(search, Some(rng.random()));
    let mut two = p2.build(search, Some(rng.random()));
    one.bind(Player::One);
    two.bind(Player::Two);
    let names = [one.name().to_string(), two.name().to_string()];

    let state = GameState::new_game_with_rng(&mut rng);
    println!("{state}\n");
    let record = play_game_with(state, one.as_mut(), two.as_mut(), |ply| {
        let name = match ply.outcome.mover {
            Player::One => &names[0],
            Player::Two => &names[1],
        };
        println!("{} ({}) sows {}", ply.outcome.mover.name(), name, ply.pit);
        if ply.outcome.captured > 0 {
            println!("  captures {} seeds", ply.outcome.captured);
        }
        println!("{}\n", ply.state);
    })
    .context("playing game")?;

    println!(
        "Final stores: {} {} - {} {} after {} plies",
        Player::One.name(),
        record.store_one,
        record.store_two,
        Player::Two.name(),
        record.plies
    );
    print_outcome(record.outcome);
    Ok(())
}

fn run_stats(config: &AppConfig, json: bool) -> Result<()> {
    let stats = run_match(&config.arena, &config.search).context("running match")?;
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&stats).context("serializing statistics")?
        );
    } else {
        println!(
            "{:?} (Player 1) vs {:?} (Player 2)",
            config.arena.player_one, config.arena.player_two
        );
        println!("{stats}");
    }
    Ok(())
}

fn print_result(state: &GameState) {
    if let Some(outcome) = state.outcome() {
        println!(
            "Final stores: {} {} - {} {}",
            Player::One.name(),
            state.store(Player::One),
            state.store(Player::Two),
            Player::Two.name()
        );
        print_outcome(outcome);
    }
}

fn print_outcome(outcome: GameOutcome) {
    match outcome {
        GameOutcome::Winner(player) => println!("{} wins!", player.name()),
        GameOutcome::Draw => println!("It's a draw!"),
    }
}
