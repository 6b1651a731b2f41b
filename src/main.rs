//! Neo Pong entry point
//!
//! Headless driver: runs a scripted two-player session followed by a match
//! against the AI, feeding events to the audio manager and persisting the
//! save, settings and high scores under the data directory.
//!
//! Usage: neo-pong [--seed N] [--frames N] [--data DIR]
//!
//! Sprites are looked up under `DIR/assets`.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use neo_pong::audio::{AudioManager, LogBackend};
use neo_pong::persistence::SaveStore;
use neo_pong::platform::{FrameClock, InputSource, KeyState, ScriptedInput, SystemClock};
use neo_pong::render::{Frame, Sprite, SpriteSet};
use neo_pong::sim::{GameMode, GamePhase, GameState, tick};
use neo_pong::{HighScores, Settings, Tuning};

struct Args {
    seed: u64,
    frames: usize,
    data_dir: PathBuf,
}

impl Args {
    fn parse() -> Self {
        let mut args = Args {
            seed: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0),
            frames: 600,
            data_dir: PathBuf::from(".neo-pong"),
        };

        let mut it = std::env::args().skip(1);
        while let Some(flag) = it.next() {
            let value = it.next();
            match (flag.as_str(), value) {
                ("--seed", Some(v)) => match v.parse() {
                    Ok(seed) => args.seed = seed,
                    Err(_) => log::warn!("Ignoring bad seed {v:?}"),
                },
                ("--frames", Some(v)) => match v.parse() {
                    Ok(frames) => args.frames = frames,
                    Err(_) => log::warn!("Ignoring bad frame count {v:?}"),
                },
                ("--data", Some(v)) => args.data_dir = PathBuf::from(v),
                (other, _) => log::warn!("Ignoring unknown argument {other:?}"),
            }
        }
        args
    }
}

/// Left player holds W for a while, then S; the right player mirrors with the arrows
fn demo_script(frames: usize) -> ScriptedInput {
    let quarter = frames / 4;
    ScriptedInput::default()
        .hold(
            KeyState {
                w: true,
                down: true,
                ..Default::default()
            },
            quarter,
        )
        .hold(
            KeyState {
                s: true,
                up: true,
                ..Default::default()
            },
            quarter,
        )
}

fn run<I: InputSource>(
    state: &mut GameState,
    input: &mut I,
    clock: &mut FrameClock<SystemClock>,
    audio: &mut AudioManager,
    frames: usize,
) {
    for _ in 0..frames {
        let dt = clock.wait_frame();
        tick(state, &input.poll().to_tick_input(), dt);
        audio.handle_events(&state.drain_events());
        audio.sync_music(state.phase);
        if state.phase == GamePhase::GameOver {
            break;
        }
    }
    let frame = Frame::capture(state);
    log::info!(
        "{}: {} - {}: {}",
        frame.scores[0].name,
        frame.scores[0].score,
        frame.scores[1].name,
        frame.scores[1].score
    );
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    log::info!("Neo Pong starting with seed {}", args.seed);

    let settings_path = args.data_dir.join("settings.json");
    let scores_path = args.data_dir.join("highscores.json");
    let settings = Settings::load(&settings_path);
    let tuning = Tuning::load(&args.data_dir.join("tuning.json"));
    let mut highscores = HighScores::load(&scores_path);
    let store = SaveStore::new(args.data_dir.join("save.dat"));

    let sprites = SpriteSet::load(&args.data_dir.join("assets"));
    if sprites.ball == Sprite::Vector {
        log::info!("Drawing with vector shapes");
    }

    let mut audio = AudioManager::from_settings(&settings, Some(Box::new(LogBackend)));
    let mut clock = FrameClock::new(SystemClock::new(), tuning.min_frame_ms, tuning.max_dt);

    let mut state = GameState::with_tuning(args.seed, tuning);
    state.ai.difficulty = settings.difficulty;
    audio.sync_music(state.phase);

    // Two-player session, resumed from the save slot when there is one
    if !(store.exists() && store.load(&mut state)) {
        state.set_player_names(&settings.left_name, &settings.right_name);
        state.start(GameMode::TwoPlayer, settings.ball_shape);
    }
    let mut script = demo_script(args.frames);
    run(&mut state, &mut script, &mut clock, &mut audio, args.frames);
    store.save(&state);

    // Session over: rank it and clear the slot
    state.end_session();
    audio.handle_events(&state.drain_events());
    audio.sync_music(state.phase);
    if let Some(top) = highscores.record_session(&state.scores).first() {
        log::info!("New high score at rank {top}");
    }
    highscores.save(&scores_path);
    store.delete();

    // Versus AI until someone reaches the win score or the frame budget runs out
    state.start(GameMode::VersusAi, settings.ball_shape);
    let mut script = demo_script(args.frames);
    run(&mut state, &mut script, &mut clock, &mut audio, args.frames);
    match (state.phase, state.winner) {
        (GamePhase::GameOver, Some(side)) => {
            log::info!("{} wins against the AI", state.scores.get(side).name)
        }
        _ => log::info!("AI match stopped after {} ticks", state.time_ticks),
    }

    settings.save(&settings_path);
}
