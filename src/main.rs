//! codecrushed CLI
//!
//! Drive the portfolio motion engines from a terminal.

use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;
use std::time::{Duration, Instant};

use clap::{Parser, Subcommand};
use env_logger::{Builder, Target};
use indicatif::{ProgressBar, ProgressStyle};
use log::LevelFilter;

use codecrushed_motion::clock::{Clock, ManualClock, TimerDriven};
use codecrushed_motion::config::MotionConfig;
use codecrushed_motion::intro::IntroSequencer;
use codecrushed_motion::tui;
use codecrushed_motion::typewriter::{PhraseSet, TypewriterEngine};

/// Wall-clock step for the real-time intro.
const INTRO_STEP: Duration = Duration::from_millis(20);

#[derive(Parser)]
#[command(name = "codecrushed")]
#[command(about = "Typewriter, reveal, carousel and splash engines of the CodeCrushed portfolio")]
#[command(version)]
struct Cli {
    /// Config file (default: <config dir>/codecrushed/motion.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive showcase (default)
    Show,

    /// Print the typewriter trace, one line per tick
    Type {
        /// Comma-separated phrases (default: from config)
        #[arg(long, value_delimiter = ',')]
        phrases: Option<Vec<String>>,

        /// Number of ticks to print
        #[arg(long, default_value_t = 40)]
        ticks: usize,
    },

    /// Play the splash sequence in real time
    Intro,

    /// Print the effective config as JSON
    Config,
}

fn init_logger() {
    if std::env::var("RUST_LOG").is_ok() {
        Builder::from_default_env().target(Target::Stderr).init();
    } else {
        Builder::new()
            .target(Target::Stderr)
            .filter_level(LevelFilter::Warn)
            .init();
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger();

    let result = MotionConfig::resolve(cli.config.as_deref())
        .map_err(|e| e.to_string())
        .and_then(|config| match cli.command.unwrap_or(Commands::Show) {
            Commands::Show => cmd_show(&config),
            Commands::Type { phrases, ticks } => cmd_type(&config, phrases, ticks),
            Commands::Intro => cmd_intro(&config),
            Commands::Config => cmd_config(&config),
        });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

// ============================================================================
// PROGRESS HELPERS
// ============================================================================

fn spinner(msg: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(msg);
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

// ============================================================================
// COMMAND HANDLERS
// ============================================================================

fn cmd_show(config: &MotionConfig) -> Result<(), String> {
    tui::run::run(config).map_err(|e| e.to_string())
}

fn cmd_type(
    config: &MotionConfig,
    phrases: Option<Vec<String>>,
    ticks: usize,
) -> Result<(), String> {
    let phrases = match phrases {
        Some(list) => PhraseSet::new(list),
        None => config.phrase_set(),
    }
    .map_err(|e| e.to_string())?;

    let mut clock = ManualClock::new();
    let mut engine = TypewriterEngine::new(phrases, config.typewriter_timings());
    engine.start(&mut clock);

    println!("{:>5}  {:>8}  {:>8}  text", "tick", "at ms", "next ms");
    for tick in 1..=ticks {
        let Some(id) = clock.fire_next() else {
            break;
        };
        engine.on_timer(id, &mut clock);
        println!(
            "{:>5}  {:>8}  {:>8.1}  {:?}{}",
            tick,
            clock.now().as_millis(),
            engine.tick_delay_ms(),
            engine.displayed_text(),
            if engine.is_deleting() { "  (deleting)" } else { "" },
        );
    }

    engine.teardown(&mut clock);
    Ok(())
}

fn cmd_intro(config: &MotionConfig) -> Result<(), String> {
    let mut clock = ManualClock::new();
    let mut intro = IntroSequencer::new(config.intro_timings()).map_err(|e| e.to_string())?;
    intro.start(&mut clock);

    let started = Instant::now();
    let mut last = started;
    let mut phase = intro.phase();
    let mut entered = clock.now();
    let mut sp = spinner(phase.to_string());

    while !intro.is_done() {
        thread::sleep(INTRO_STEP);
        let now = Instant::now();
        clock.advance(now.duration_since(last), |clk, id| {
            intro.on_timer(id, clk);
        });
        last = now;

        if intro.phase() != phase {
            let dwell = clock.now() - entered;
            sp.finish_with_message(format!("{} ({} ms)", phase, dwell.as_millis()));
            phase = intro.phase();
            entered = clock.now();
            if !intro.is_done() {
                sp = spinner(phase.to_string());
            }
        }
    }

    println!(
        "Intro finished in {} ms (scheduled {} ms)",
        started.elapsed().as_millis(),
        intro.timings().total().as_millis()
    );
    Ok(())
}

fn cmd_config(config: &MotionConfig) -> Result<(), String> {
    println!("{}", config.to_json());
    Ok(())
}
