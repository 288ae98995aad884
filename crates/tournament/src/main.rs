//! Tournament standings CLI
//!
//! Show, edit and save the single-elimination bracket of a tournament.

use anyhow::{bail, Context, Result};
use bracket_core::render::{compact, outline};
use bracket_core::{validate_standings, BranchPath, ParticipantId};
use std::env;
use std::path::PathBuf;
use tournament::{
    draw_seeds, JsonFileStore, StandingsSession, StandingsStore, TournamentConfig, TournamentId,
    DEFAULT_CONFIG_PATH,
};
use tracing_subscriber::EnvFilter;

fn print_usage() {
    println!("Tournament Standings");
    println!();
    println!("Usage:");
    println!("  tournament show <tournament>");
    println!("  tournament candidates <tournament> <path>");
    println!("  tournament decide <tournament> <path> <participant>");
    println!("  tournament reset <tournament> <path>");
    println!("  tournament draw <tournament>");
    println!("  tournament validate <tournament>");
    println!();
    println!("Options:");
    println!("  --config <file>   Config file (default: {})", DEFAULT_CONFIG_PATH);
    println!();
    println!("Paths:");
    println!("  root              The final");
    println!("  U, L              The semifinals (upper, lower)");
    println!("  UL, LLU, ...      Deeper matches and seed slots");
    println!();
    println!("Examples:");
    println!("  tournament show 1");
    println!("  tournament decide 1 UL 3");
    println!("  tournament reset 1 U --config cup.toml");
}

fn init_logging(filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn parse_tournament(arg: Option<&String>) -> Result<TournamentId> {
    let arg = arg.context("missing tournament id")?;
    let id = arg
        .parse()
        .with_context(|| format!("invalid tournament id: {}", arg))?;
    Ok(TournamentId(id))
}

fn parse_path(arg: Option<&String>) -> Result<BranchPath> {
    let arg = arg.context("missing bracket path")?;
    arg.parse()
        .with_context(|| format!("invalid bracket path: {}", arg))
}

fn parse_participant(arg: Option<&String>) -> Result<ParticipantId> {
    let arg = arg.context("missing participant id")?;
    let id = arg
        .parse()
        .with_context(|| format!("invalid participant id: {}", arg))?;
    Ok(ParticipantId(id))
}

fn open(
    config: &TournamentConfig,
    tournament: TournamentId,
) -> Result<StandingsSession<JsonFileStore>> {
    let store = JsonFileStore::new(&config.data_dir);
    StandingsSession::open(store, tournament, config.field_size)
        .with_context(|| format!("failed to open tournament {}", tournament))
}

fn print_bracket(session: &StandingsSession<JsonFileStore>) {
    let bracket = session.editor().bracket();
    println!("=== Tournament {} ({} slots) ===", session.tournament(), bracket.field());
    print!("{}", outline(bracket));
    println!();
    println!("{}", compact(bracket.root()));
    if let Some(champion) = bracket.champion() {
        println!("Champion: {}", champion);
    }
}

fn show(config: &TournamentConfig, args: &[String]) -> Result<()> {
    let tournament = parse_tournament(args.first())?;
    let session = open(config, tournament)?;
    print_bracket(&session);
    Ok(())
}

fn candidates(config: &TournamentConfig, args: &[String]) -> Result<()> {
    let tournament = parse_tournament(args.first())?;
    let path = parse_path(args.get(1))?;
    let session = open(config, tournament)?;

    let editor = session.editor();
    if editor.node(&path).is_none() {
        bail!("no node at {}", path);
    }
    let candidates = editor.candidates(&path);
    if candidates.is_empty() {
        println!("Nobody can be picked at {}", path);
        return Ok(());
    }
    println!("Candidates at {}:", path);
    for participant in candidates {
        println!("  {:>4}  {}", participant.id, participant);
    }
    Ok(())
}

fn decide(config: &TournamentConfig, args: &[String]) -> Result<()> {
    let tournament = parse_tournament(args.first())?;
    let path = parse_path(args.get(1))?;
    let participant = parse_participant(args.get(2))?;

    let mut session = open(config, tournament)?;
    session
        .select(&path, participant)
        .with_context(|| format!("cannot pick {} at {}", participant, path))?;
    session.save().context("failed to save standings")?;
    print_bracket(&session);
    Ok(())
}

fn reset(config: &TournamentConfig, args: &[String]) -> Result<()> {
    let tournament = parse_tournament(args.first())?;
    let path = parse_path(args.get(1))?;

    let mut session = open(config, tournament)?;
    session
        .editor_mut()
        .reset(&path)
        .with_context(|| format!("cannot reset {}", path))?;
    session.overwrite().context("failed to save standings")?;
    print_bracket(&session);
    Ok(())
}

fn draw(config: &TournamentConfig, args: &[String]) -> Result<()> {
    let tournament = parse_tournament(args.first())?;
    let mut store = JsonFileStore::new(&config.data_dir);
    let mut participants = store.tournament_participants(tournament)?;

    let drawn = draw_seeds(&mut participants, config.field_size, &mut rand::thread_rng());
    validate_standings(&participants, config.field_size).context("drawn seeds are inconsistent")?;
    store.save_tournament_standings(tournament, &participants)?;

    println!("Drew {} seeds for tournament {}", drawn, tournament);
    let mut seeded: Vec<_> = participants.iter().filter(|p| p.seed.is_some()).collect();
    seeded.sort_by_key(|p| p.seed);
    for participant in seeded {
        if let Some(seed) = participant.seed {
            println!("  Slot {:>2}: {}", seed, participant);
        }
    }
    Ok(())
}

fn validate(config: &TournamentConfig, args: &[String]) -> Result<()> {
    let tournament = parse_tournament(args.first())?;
    let store = JsonFileStore::new(&config.data_dir);
    let participants = store.tournament_participants(tournament)?;

    match validate_standings(&participants, config.field_size) {
        Ok(()) => println!(
            "Tournament {}: {} participants, standings are consistent",
            tournament,
            participants.len()
        ),
        Err(e) => {
            println!("Tournament {}: {}", tournament, e.message);
            for error in &e.errors {
                println!("  - {}", error);
            }
            bail!("{} violations found", e.errors.len());
        }
    }
    Ok(())
}

/// Pull `--config <file>` out of the arguments
fn take_config_path(args: &mut Vec<String>) -> Result<PathBuf> {
    let Some(i) = args.iter().position(|a| a == "--config" || a == "-c") else {
        return Ok(PathBuf::from(DEFAULT_CONFIG_PATH));
    };
    if i + 1 >= args.len() {
        bail!("--config requires a file");
    }
    let path = args.remove(i + 1);
    args.remove(i);
    Ok(PathBuf::from(path))
}

fn run(mut args: Vec<String>) -> Result<()> {
    let config_path = take_config_path(&mut args)?;
    if args.len() < 2 {
        print_usage();
        return Ok(());
    }

    let config = TournamentConfig::load_or_default(&config_path)
        .with_context(|| format!("failed to load {}", config_path.display()))?;
    init_logging(&config.log_filter);

    match args[1].as_str() {
        "show" => show(&config, &args[2..]),
        "candidates" => candidates(&config, &args[2..]),
        "decide" => decide(&config, &args[2..]),
        "reset" => reset(&config, &args[2..]),
        "draw" => draw(&config, &args[2..]),
        "validate" => validate(&config, &args[2..]),
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            print_usage();
            bail!("unknown command: {}", other)
        }
    }
}

fn main() {
    let args: Vec<String> = env::args().collect();
    if let Err(e) = run(args) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
