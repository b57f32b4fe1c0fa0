//! End-to-end runs through the public `Game` API

use sky_runner::audio::NullAudio;
use sky_runner::autopilot::Autopilot;
use sky_runner::sim::{GameEvent, SessionPhase};
use sky_runner::storage::{FileStore, MemoryStore};
use sky_runner::{Game, HighScore, Tuning};

const DT: f32 = 1.0 / 60.0;

fn fly_until_over(game: &mut Game, pilot: &Autopilot, max_frames: u32) -> Vec<GameEvent> {
    let mut events = Vec::new();
    for _ in 0..max_frames {
        if game.phase() != SessionPhase::Running {
            break;
        }
        let input = pilot.decide(game.state());
        if input.flap {
            game.flap();
        }
        game.steer(input.left, input.right);
        events.extend(game.frame(DT).events);
    }
    events
}

#[test]
fn test_ready_running_over_running() {
    let mut game = Game::new(
        42,
        Tuning::default(),
        Box::new(MemoryStore::new()),
        Box::new(NullAudio::new()),
    )
    .unwrap();
    assert_eq!(game.phase(), SessionPhase::Ready);

    game.start().unwrap();
    // Never flaps: the player drops to the ground
    let grounded = Autopilot {
        flap_margin: f32::INFINITY,
        ..Default::default()
    };
    let events = fly_until_over(&mut game, &grounded, 600);
    assert_eq!(game.phase(), SessionPhase::Over);
    let game_overs = events
        .iter()
        .filter(|e| matches!(e, GameEvent::GameOver { .. }))
        .count();
    assert_eq!(game_overs, 1);

    game.restart().unwrap();
    assert_eq!(game.phase(), SessionPhase::Running);
    assert_eq!(game.score(), 0);
    assert_eq!(game.state().player.pos.y, game.state().tuning.spawn_height);
}

#[test]
fn test_autopilot_run_ends_and_is_recorded() {
    let mut game = Game::new(
        7,
        Tuning::default(),
        Box::new(MemoryStore::new()),
        Box::new(NullAudio::new()),
    )
    .unwrap();
    let pilot = Autopilot::default();

    game.start().unwrap();
    let mut events = fly_until_over(&mut game, &pilot, 60 * 20);
    assert!(events.contains(&GameEvent::Flapped));

    // Stop flapping so the run always ends
    let grounded = Autopilot {
        flap_margin: f32::INFINITY,
        ..Default::default()
    };
    events.extend(fly_until_over(&mut game, &grounded, 600));
    assert_eq!(game.phase(), SessionPhase::Over);

    let final_score = game.score();
    let over: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            GameEvent::GameOver {
                final_score,
                new_high_score,
                ..
            } => Some((*final_score, *new_high_score)),
            _ => None,
        })
        .collect();
    assert_eq!(over, vec![(final_score, final_score > 0)]);
    assert_eq!(game.high_score().best, final_score);
    let stored = HighScore::load(game.store());
    assert_eq!(stored.best, final_score);
    assert_eq!(stored.runs, 1);
}

#[test]
fn test_high_score_survives_restart_of_the_program() {
    let dir = std::env::temp_dir().join(format!("sky-runner-flow-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);

    {
        let mut game = Game::new(
            1,
            Tuning::default(),
            Box::new(FileStore::new(&dir)),
            Box::new(NullAudio::new()),
        )
        .unwrap();
        game.start().unwrap();
        // Falling to the ground still counts as a run
        while game.phase() == SessionPhase::Running {
            game.frame(DT);
        }
        assert_eq!(game.high_score().runs, 1);
    }

    let game = Game::new(
        2,
        Tuning::default(),
        Box::new(FileStore::new(&dir)),
        Box::new(NullAudio::new()),
    )
    .unwrap();
    assert_eq!(game.high_score().runs, 1);

    let _ = std::fs::remove_dir_all(&dir);
}
