//! Dice Tray CLI
//!
//! Throws physically simulated dice into a headless tray, waits for them to
//! settle and prints what they show.

use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;

use dicetray::tray::{
    DieKind, PhysicsWorld, RapierWorld, RollMode, RollSummary, SimulationSession, TraySettings,
    Viewport,
};

/// Dice Tray - roll simulated dice from the command line
#[derive(Parser)]
#[command(name = "dicetray-roll")]
#[command(
    author,
    version,
    about = "Dice Tray - roll physically simulated dice and read the faces"
)]
struct Cli {
    /// Dice to roll (e.g., "2d6", "1d20", "d100"). Can specify multiple.
    #[arg(short, long, value_parser = parse_dice_arg)]
    dice: Vec<(usize, DieKind)>,

    /// Roll with advantage (two d20s, take higher)
    #[arg(short, long)]
    advantage: bool,

    /// Roll with disadvantage (two d20s, take lower)
    #[arg(short = 'D', long)]
    disadvantage: bool,

    /// Seed for reproducible throws
    #[arg(long)]
    seed: Option<u64>,

    /// Tray settings JSON file
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Give up waiting for the dice to settle after this many simulated seconds
    #[arg(long, default_value = "20")]
    max_seconds: f32,

    /// Viewport width used to size the table
    #[arg(long, default_value = "1280")]
    width: f32,

    /// Viewport height used to size the table
    #[arg(long, default_value = "720")]
    height: f32,
}

fn parse_dice_arg(s: &str) -> Result<(usize, DieKind), String> {
    let s = s.trim().to_lowercase();

    let (count_str, die_str) = if s.starts_with('d') {
        ("1", s.as_str())
    } else if let Some(pos) = s.find('d') {
        (&s[..pos], &s[pos..])
    } else {
        return Err(format!(
            "Invalid dice format: {}. Use format like '2d6' or 'd20'",
            s
        ));
    };

    let count: usize = count_str
        .parse()
        .map_err(|_| format!("Invalid count: {}", count_str))?;
    if count == 0 {
        return Err("Dice count must be at least 1".to_string());
    }
    let kind = DieKind::parse(die_str).ok_or_else(|| {
        format!(
            "Unknown die type: {}. Valid: d4, d6, d8, d10, d12, d20, d100",
            die_str
        )
    })?;

    Ok((count, kind))
}

/// Advantage and disadvantage together cancel out.
fn roll_mode_from_flags(advantage: bool, disadvantage: bool) -> RollMode {
    match (advantage, disadvantage) {
        (true, false) => RollMode::Advantage,
        (false, true) => RollMode::Disadvantage,
        _ => RollMode::Normal,
    }
}

fn main() {
    let cli = Cli::parse();

    let viewport = match Viewport::new(cli.width, cli.height) {
        Ok(viewport) => viewport,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    };

    let mut settings = match &cli.settings {
        Some(path) => match TraySettings::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                eprintln!("{} Failed to load settings: {}", "Error:".red().bold(), e);
                std::process::exit(1);
            }
        },
        None => TraySettings::default(),
    };
    if cli.seed.is_some() {
        settings.seed = cli.seed;
    }

    let physics = RapierWorld::new(&settings.physics);
    let mut session = SimulationSession::new(physics, (), settings, viewport);
    session.set_roll_mode(roll_mode_from_flags(cli.advantage, cli.disadvantage));

    let mut requested = cli.dice.clone();
    if requested.is_empty() {
        requested.push((1, DieKind::D20));
    }
    for (count, kind) in &requested {
        for _ in 0..*count {
            session.spawn(*kind);
        }
    }

    let settled = run_until_settled(&mut session, cli.max_seconds);
    if !settled {
        eprintln!(
            "{} dice still moving after {}s, reading them as they lie",
            "Warning:".yellow().bold(),
            cli.max_seconds
        );
        session.refresh(true);
    }

    print_readout(&session);
}

/// Step at 60 Hz until every die rests or the time budget runs out.
fn run_until_settled<P: PhysicsWorld>(session: &mut SimulationSession<P>, max_seconds: f32) -> bool {
    let frame = 1.0 / 60.0;
    let max_frames = (max_seconds.max(0.0) / frame).ceil() as u32;
    for _ in 0..max_frames {
        session.step(frame);
        if session.all_at_rest() {
            return true;
        }
    }
    session.all_at_rest()
}

fn print_readout<P: PhysicsWorld>(session: &SimulationSession<P>) {
    let rule = "═══════════════════════════════════════".cyan();
    println!("\n{}", rule);

    let kinds: Vec<String> = session.dice().iter().map(|d| d.kind.to_string()).collect();
    println!(
        "{} {}",
        "Rolling:".bold().white(),
        kinds.join(", ").yellow().bold()
    );

    match session.summary() {
        RollSummary::Total { total, rolls } => {
            let faces: Vec<String> = session
                .dice()
                .iter()
                .zip(rolls)
                .map(|(die, value)| format!("{}: {}", die.kind, color_roll(die.kind, *value)))
                .collect();
            println!("{} {}", "Dice:".bold().white(), faces.join(", "));
            println!(
                "{} {}",
                "Total:".bold().white(),
                total.to_string().bright_white().bold()
            );
        }
        RollSummary::Advantage { high, rolls } => {
            let dropped = rolls[0].min(rolls[1]);
            println!(
                "{} {} (dropped {})",
                "Dice:".bold().white(),
                format!("[{}]", high).bright_green().bold(),
                format!("[{}]", dropped).dimmed()
            );
        }
        RollSummary::Disadvantage { low, rolls } => {
            let dropped = rolls[0].max(rolls[1]);
            println!(
                "{} {} (dropped {})",
                "Dice:".bold().white(),
                format!("[{}]", low).bright_red().bold(),
                format!("[{}]", dropped).dimmed()
            );
        }
        _ => {}
    }

    println!("{} {}", "Result:".bold().white(), session.status());
    println!("{}", rule);
}

fn color_roll(kind: DieKind, value: u32) -> String {
    let text = format!("[{}]", value);
    if kind == DieKind::D20 {
        match value {
            20 => return text.bright_green().bold().to_string(),
            1 => return text.bright_red().bold().to_string(),
            _ => {}
        }
    }
    text.bright_white().bold().to_string()
}
