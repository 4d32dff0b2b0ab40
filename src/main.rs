//! # Delve Main Entry Point
//!
//! Parses command-line options, initializes logging, and bootstraps a new
//! game session, printing a short summary of the generated dungeon. The
//! interactive presentation layer lives outside this crate; this binary only
//! exercises the bootstrap path.

use clap::Parser;
use delve::{
    Combatant, DelveResult, Difficulty, GameSession, GenerationConfig, HeroClass, PillarProgress,
    RoomKind,
};
use log::info;

/// Command line arguments for the Delve bootstrap.
#[derive(Parser, Debug)]
#[command(name = "delve")]
#[command(about = "A turn-based dungeon-crawler engine with pillar-driven progression")]
#[command(version)]
struct Args {
    /// Random seed for dungeon generation
    #[arg(short, long)]
    seed: Option<u64>,

    /// Dungeon width in rooms
    #[arg(long, default_value_t = 10)]
    width: u32,

    /// Dungeon height in rooms
    #[arg(long, default_value_t = 10)]
    height: u32,

    /// Difficulty (easy, normal, hard)
    #[arg(long, default_value = "normal")]
    difficulty: String,

    /// Hero name
    #[arg(long, default_value = "Adventurer")]
    name: String,

    /// Hero class (warrior, priestess, thief)
    #[arg(long, default_value = "warrior")]
    class: String,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> DelveResult<()> {
    let args = Args::parse();
    initialize_logging(&args.log_level);

    info!("starting delve v{}", delve::VERSION);

    let difficulty: Difficulty = args.difficulty.parse()?;
    let class: HeroClass = args.class.parse()?;
    let seed = args.seed.unwrap_or_else(rand::random);

    let config = GenerationConfig::new(args.width, args.height, difficulty, seed);
    let session = GameSession::new(&args.name, class, &config)?;

    print_summary(&session, seed);
    Ok(())
}

/// Initializes env_logger with the requested default level.
fn initialize_logging(log_level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();
}

/// Prints a one-screen overview of the freshly generated game.
fn print_summary(session: &GameSession, seed: u64) {
    let dungeon = session.dungeon();
    let hero = session.hero();

    println!(
        "{} the {} enters a {}x{} {} dungeon (seed {})",
        hero.name(),
        hero.class(),
        dungeon.width(),
        dungeon.height(),
        dungeon.difficulty(),
        seed
    );
    let progress = match dungeon.pillar_progress() {
        PillarProgress::Collecting => "collecting",
        PillarProgress::AllCollected => "all collected",
        PillarProgress::BossSpawned => "boss spawned",
    };
    println!(
        "pillars to find: {} | progress: {}",
        dungeon.total_pillars(),
        progress
    );

    for y in 0..dungeon.height() as i32 {
        let mut row = String::new();
        for x in 0..dungeon.width() as i32 {
            let kind = dungeon
                .room(delve::Position::new(x, y))
                .map(|room| room.kind())
                .unwrap_or(RoomKind::Empty);
            row.push(room_glyph(kind));
        }
        println!("{}", row);
    }
}

/// Single-character map glyph per room kind.
fn room_glyph(kind: RoomKind) -> char {
    match kind {
        RoomKind::Empty => '.',
        RoomKind::Trap => '^',
        RoomKind::Treasure => '$',
        RoomKind::Monster => 'M',
        RoomKind::Pillar => 'P',
        RoomKind::Entrance => '@',
        RoomKind::Exit => 'X',
        RoomKind::Boss => 'B',
    }
}
