//! Per-mode scoring rules, evaluated once per tick after the ball has moved

use super::state::{GameEvent, GameMode, GameState, Side};

/// Apply the current mode's win and round conditions
pub fn evaluate(state: &mut GameState) {
    match state.mode {
        // Open-ended; the session is closed explicitly with `end_session`
        GameMode::TwoPlayer => {}
        GameMode::VersusAi => {
            let target = state.tuning.ai_win_score;
            let winner = [Side::Left, Side::Right]
                .into_iter()
                .find(|side| state.scores.score(*side) >= target);
            if let Some(side) = winner {
                state.finish(Some(side));
            }
        }
        GameMode::Storytime | GameMode::Fun => {
            if let Some(threshold) = state.mode.round_threshold(&state.tuning) {
                evaluate_round(state, threshold);
            }
        }
    }
}

fn evaluate_round(state: &mut GameState, threshold: u32) {
    let (left, right) = (state.scores.left.score, state.scores.right.score);
    if left < threshold && right < threshold {
        return;
    }

    let winner = if left > right { Side::Left } else { Side::Right };
    state.scores.get_mut(winner).rounds += 1;
    state.scores.reset_scores();
    state.emit(GameEvent::RoundComplete { winner });
    log::info!(
        "Round to {} ({} - {} rounds)",
        state.scores.get(winner).name,
        state.scores.left.rounds,
        state.scores.right.rounds
    );

    if state.scores.total_rounds() >= state.tuning.match_rounds {
        let (l, r) = (state.scores.left.rounds, state.scores.right.rounds);
        let champion = match l.cmp(&r) {
            std::cmp::Ordering::Greater => Some(Side::Left),
            std::cmp::Ordering::Less => Some(Side::Right),
            std::cmp::Ordering::Equal => None,
        };
        state.finish(champion);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{BallShape, GamePhase};

    fn started(mode: GameMode) -> GameState {
        let mut state = GameState::new(5);
        state.start(mode, BallShape::Classic);
        state
    }

    #[test]
    fn test_ai_mode_ends_at_ten() {
        let mut state = started(GameMode::VersusAi);
        state.scores.right.score = 9;
        evaluate(&mut state);
        assert_eq!(state.phase, GamePhase::AiPlaying);

        state.scores.right.score = 10;
        evaluate(&mut state);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.winner, Some(Side::Right));
    }

    #[test]
    fn test_storytime_round_resets_scores() {
        let mut state = started(GameMode::Storytime);
        state.scores.left.score = 8;
        state.scores.right.score = 3;
        evaluate(&mut state);

        assert_eq!(state.scores.left.rounds, 1);
        assert_eq!(state.scores.left.score, 0);
        assert_eq!(state.scores.right.score, 0);
        assert_eq!(state.phase, GamePhase::StorytimePlaying);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::RoundComplete { winner: Side::Left }]
        );
    }

    #[test]
    fn test_round_tie_goes_to_right() {
        let mut state = started(GameMode::Fun);
        state.scores.left.score = 5;
        state.scores.right.score = 5;
        evaluate(&mut state);
        assert_eq!(state.scores.right.rounds, 1);
        assert_eq!(state.scores.left.rounds, 0);
    }

    #[test]
    fn test_third_round_ends_match() {
        let mut state = started(GameMode::Fun);
        state.scores.left.rounds = 1;
        state.scores.right.rounds = 1;
        state.scores.left.score = 5;
        evaluate(&mut state);

        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.winner, Some(Side::Left));
        assert!(state
            .events()
            .contains(&GameEvent::MatchComplete { winner: Some(Side::Left) }));
    }

    #[test]
    fn test_two_player_never_ends_itself() {
        let mut state = started(GameMode::TwoPlayer);
        state.scores.left.score = 50;
        evaluate(&mut state);
        assert_eq!(state.phase, GamePhase::Playing);
    }
}
