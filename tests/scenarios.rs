//! End-to-end runs through the public API

use glam::Vec2;
use proptest::prelude::*;

use neo_pong::persistence::SaveStore;
use neo_pong::platform::{InputSource, KeyState, ScriptedInput};
use neo_pong::sim::{
    BallShape, GameEvent, GameMode, GamePhase, GameState, Side, TickInput, tick,
};

const DT: f32 = 0.02;

/// Put the ball just short of the scoring edge so the next tick scores for `side`
fn score_for(state: &mut GameState, side: Side) {
    match side {
        Side::Left => {
            state.ball.pos = Vec2::new(797.0, 560.0);
            state.ball.vel = Vec2::new(300.0, 0.0);
        }
        Side::Right => {
            state.ball.pos = Vec2::new(3.0, 560.0);
            state.ball.vel = Vec2::new(-300.0, 0.0);
        }
    }
    tick(state, &TickInput::default(), DT);
}

#[test]
fn test_playing_miss_scores_for_opponent() {
    let mut state = GameState::new(2025);
    state.start(GameMode::TwoPlayer, BallShape::Classic);
    assert_eq!((state.scores.left.score, state.scores.right.score), (0, 0));

    // Left paddle parked at the top while the ball passes below it
    let mut input = ScriptedInput::default().hold(
        KeyState {
            w: true,
            ..Default::default()
        },
        50,
    );
    for _ in 0..50 {
        tick(&mut state, &input.poll().to_tick_input(), DT);
    }
    state.drain_events();
    assert_eq!(state.left.y, 50.0);

    state.ball.pos = Vec2::new(40.0, 400.0);
    state.ball.vel = Vec2::new(-300.0, 0.0);
    let mut scored = false;
    for _ in 0..10 {
        tick(&mut state, &TickInput::default(), DT);
        if state
            .drain_events()
            .contains(&GameEvent::Scored { side: Side::Right })
        {
            scored = true;
            break;
        }
    }

    assert!(scored);
    assert_eq!(state.scores.right.score, 1);
    assert_eq!(state.scores.left.score, 0);
    assert_eq!(state.ball.pos, Vec2::new(400.0, 300.0));
}

#[test]
fn test_storytime_rounds_until_match_end() {
    let mut state = GameState::new(7);
    state.start(GameMode::Storytime, BallShape::Square);

    for _ in 0..8 {
        score_for(&mut state, Side::Left);
    }
    assert_eq!(state.scores.left.rounds, 1);
    assert_eq!((state.scores.left.score, state.scores.right.score), (0, 0));
    assert_eq!(state.phase, GamePhase::StorytimePlaying);

    for _ in 0..8 {
        score_for(&mut state, Side::Right);
    }
    assert_eq!(state.scores.right.rounds, 1);
    assert_eq!(state.phase, GamePhase::StorytimePlaying);

    for _ in 0..8 {
        score_for(&mut state, Side::Left);
    }
    assert_eq!(state.scores.total_rounds(), 3);
    assert_eq!(state.phase, GamePhase::GameOver);
    assert_eq!(state.winner, Some(Side::Left));
    assert!(
        state
            .events()
            .contains(&GameEvent::MatchComplete { winner: Some(Side::Left) })
    );
}

#[test]
fn test_letter_point_closes_round_on_the_same_tick() {
    let mut state = GameState::new(19);
    state.start(GameMode::Storytime, BallShape::Square);
    state.scores.left.score = 7;
    state.scores.right.score = 7;

    // Ball parked inside the falling glyph, left of its midpoint
    let glyph = state.letter.bounds();
    state.ball.pos = Vec2::new(glyph.min.x + 5.0, glyph.center().y);
    state.ball.vel = Vec2::ZERO;
    tick(&mut state, &TickInput::default(), DT);

    assert_eq!(state.scores.left.rounds, 1);
    assert_eq!(state.scores.right.rounds, 0);
    assert_eq!((state.scores.left.score, state.scores.right.score), (0, 0));
    let events = state.drain_events();
    assert!(events.contains(&GameEvent::LetterCollected {
        glyph: 'P',
        side: Side::Left
    }));
    assert!(events.contains(&GameEvent::RoundComplete { winner: Side::Left }));

    // The opponent's next point starts the new round instead of stealing this one
    score_for(&mut state, Side::Right);
    assert_eq!(state.scores.left.rounds, 1);
    assert_eq!(state.scores.right.rounds, 0);
    assert_eq!((state.scores.left.score, state.scores.right.score), (0, 1));
}

#[test]
fn test_exit_mode_clears_effects() {
    let mut state = GameState::new(4);
    state.start(GameMode::Fun, BallShape::Classic);
    state.left.inverted = true;
    state.left.set_height(200.0, 600.0);
    state.ball.color = neo_pong::sim::BACKGROUND;

    state.exit_mode();

    assert!(!state.left.inverted);
    assert_eq!(state.left.height, 100.0);
    assert_eq!(state.ball.color, neo_pong::sim::FOREGROUND);
    assert!(state.powers.iter().all(|p| !p.is_active() && !p.effect_is_active()));
    assert_eq!(state.phase, GamePhase::Idle);
}

#[test]
fn test_save_round_trip_through_store() {
    let dir = std::env::temp_dir().join(format!("neo-pong-scenario-{}", std::process::id()));
    let store = SaveStore::new(dir.join("save.dat"));

    let mut state = GameState::new(31);
    state.set_player_names("Left Hand", "Right Hand Of The Long Table");
    state.start(GameMode::TwoPlayer, BallShape::Square);
    for _ in 0..45 {
        tick(&mut state, &TickInput::default(), DT);
    }
    state.scores.left.score = 3;
    state.scores.right.score = 2;
    assert!(store.save(&state));

    let mut loaded = GameState::new(0);
    assert!(store.load(&mut loaded));
    assert_eq!(loaded.scores.left.score, 3);
    assert_eq!(loaded.scores.right.score, 2);
    assert_eq!(loaded.scores.left.name, "Left Hand");
    assert_eq!(loaded.scores.right.name, "Right Hand Of The L");
    assert_eq!(loaded.scores, state.scores);
    assert_eq!(loaded.left.y, state.left.y);
    assert_eq!(loaded.right.y, state.right.y);
    assert_eq!(loaded.ball.pos, state.ball.pos);
    assert_eq!(loaded.ball.vel, state.ball.vel);
    assert_eq!(loaded.ball.shape, BallShape::Square);

    store.delete();
}

proptest! {
    #[test]
    fn prop_free_flight_keeps_speed(
        x in 100.0f32..700.0,
        y in 30.0f32..570.0,
        angle in 0.0f32..std::f32::consts::TAU,
        speed in 50.0f32..600.0,
        dt in 0.0f32..0.05,
    ) {
        let mut state = GameState::new(1);
        state.start(GameMode::TwoPlayer, BallShape::Classic);
        state.ball.pos = Vec2::new(x, y);
        state.ball.vel = Vec2::from_angle(angle) * speed;
        let before = state.ball.vel;

        tick(&mut state, &TickInput::default(), dt);

        let events = state.drain_events();
        if events.is_empty() {
            prop_assert_eq!(state.ball.vel, before);
        } else {
            prop_assert_eq!(events, vec![GameEvent::WallHit]);
            prop_assert_eq!(state.ball.vel.x, before.x);
            prop_assert_eq!(state.ball.vel.y, -before.y);
            prop_assert!(state.ball.pos.y == 0.0 || state.ball.pos.y == 600.0);
        }
    }
}
