//! Nyan Flap headless harness
//!
//! Runs sessions under the autopilot with no window, logging events and
//! printing the leaderboard. The browser build drives `nyan_flap::web` instead.

#[cfg(not(target_arch = "wasm32"))]
mod harness {
    use std::path::PathBuf;

    use anyhow::{Context, Result};
    use clap::Parser;

    use nyan_flap::audio::{LogAudio, Mixer};
    use nyan_flap::sim::{Command, GameEvent, Session, TickStatus, WorldSize};
    use nyan_flap::{Autopilot, Preset, Tuning};

    #[derive(Debug, Parser)]
    #[command(name = "nyan-flap", about = "Run headless Nyan Flap sessions")]
    pub struct Args {
        /// RNG seed (random if omitted)
        #[arg(long)]
        seed: Option<u64>,

        /// Tick limit per run
        #[arg(long, default_value_t = 20_000)]
        ticks: u64,

        /// Number of runs in the session
        #[arg(long, default_value_t = 3)]
        runs: u32,

        /// Tuning preset (standard, classic, sticky, bonus)
        #[arg(long, default_value = "standard")]
        preset: String,

        /// JSON tuning file (overrides --preset)
        #[arg(long)]
        config: Option<PathBuf>,

        /// World width
        #[arg(long, default_value_t = nyan_flap::consts::WORLD_WIDTH)]
        width: f32,

        /// World height
        #[arg(long, default_value_t = nyan_flap::consts::WORLD_HEIGHT)]
        height: f32,

        /// Autopilot margin above each gap's bottom edge
        #[arg(long, default_value_t = 30.0)]
        margin: f32,
    }

    pub fn run() -> Result<()> {
        let args = Args::parse();

        let tuning = match &args.config {
            Some(path) => Tuning::load(path)
                .with_context(|| format!("loading tuning from {}", path.display()))?,
            None => Tuning::from_preset(args.preset.parse::<Preset>()?),
        };
        let seed = args.seed.unwrap_or_else(rand::random);
        log::info!("Nyan Flap (native) starting, seed {}", seed);

        let mut session = Session::new(tuning, WorldSize::new(args.width, args.height), seed);
        let pilot = Autopilot::new(args.margin);
        let mixer = Mixer::new();
        let mut audio = LogAudio;

        for run in 1..=args.runs {
            let command = if run == 1 {
                Command::Start
            } else {
                Command::Restart
            };
            session.handle(command);

            while session.time_ticks < args.ticks {
                if pilot.decide(&session) {
                    session.request_jump();
                }
                let status = session.advance();

                let events = session.drain_events();
                mixer.dispatch(&events, &mut audio);
                for event in &events {
                    if let GameEvent::GameOver { final_score, cause } = event {
                        println!("run {}: {} points ({:?})", run, final_score, cause);
                    }
                }

                if status == TickStatus::Halted {
                    break;
                }
            }

            if session.is_running() {
                // A live run can only end by crashing; nothing to restart
                println!(
                    "run {}: survived {} ticks with {} points, stopping",
                    run, session.time_ticks, session.score
                );
                break;
            }
        }

        println!("\nhigh score: {}", session.high_score);
        for (i, entry) in session.leaderboard.runs().iter().enumerate() {
            println!(
                "{:>2}. {:>4} pts  level {:>2}  {:>6} ticks",
                i + 1,
                entry.score,
                entry.level,
                entry.ticks
            );
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    env_logger::init();
    harness::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is nyan_flap::web::wasm_start, this is just to satisfy the compiler
}
