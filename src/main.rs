//! Sky Runner entry point
//!
//! Natively this runs a headless demo: the autopilot flies a few runs at a
//! fixed 60 Hz step and the outcome is logged. The web build is driven from
//! JavaScript through `sky_runner::web::WebGame`.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = demo::run(std::env::args().skip(1)) {
        log::error!("Demo failed: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::start, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use sky_runner::audio::NullAudio;
    use sky_runner::autopilot::Autopilot;
    use sky_runner::sim::SessionPhase;
    use sky_runner::storage::FileStore;
    use sky_runner::{Game, Result, Tuning};

    const FRAME: f32 = 1.0 / 60.0;
    const RUNS: u32 = 3;
    /// Give up on a run after this many frames (5 minutes)
    const MAX_FRAMES: u32 = 60 * 60 * 5;

    pub fn run(mut args: impl Iterator<Item = String>) -> Result<()> {
        let seed = match args.next() {
            Some(arg) => arg.parse().unwrap_or_else(|_| {
                log::warn!("Ignoring bad seed {:?}", arg);
                0
            }),
            None => 0,
        };
        let tuning = match args.next() {
            Some(path) => Tuning::from_json(&std::fs::read_to_string(path)?)?,
            None => Tuning::default(),
        };

        let store = FileStore::new(std::env::temp_dir().join("sky-runner"));
        let mut game = Game::new(seed, tuning, Box::new(store), Box::new(NullAudio::new()))?;
        let pilot = Autopilot::default();

        log::info!("Sky Runner demo starting (seed {})", seed);

        for run in 1..=RUNS {
            game.start()?;
            let mut frames = 0;
            let mut collected = 0u32;
            while game.phase() == SessionPhase::Running && frames < MAX_FRAMES {
                let input = pilot.decide(game.state());
                if input.flap {
                    game.flap();
                }
                game.steer(input.left, input.right);

                let report = game.frame(FRAME);
                collected += report
                    .events
                    .iter()
                    .filter(|e| matches!(e, sky_runner::sim::GameEvent::Collected { .. }))
                    .count() as u32;
                frames += 1;
            }

            println!(
                "run {}: score {} ({} collected) in {:.1}s",
                run,
                game.score(),
                collected,
                frames as f32 * FRAME
            );
        }

        println!(
            "high score {} over {} runs",
            game.high_score().best,
            game.high_score().runs
        );
        Ok(())
    }
}
