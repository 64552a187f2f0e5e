use pong_remake::sim::{
    FrameEvents, FrameInput, MatchPhase, MatchState, PaddleInput, Side, advance_frame,
};
use pong_remake::{Difficulty, GameMode, Tuning};

const DT: f32 = 1.0 / 60.0;

/// Step `frames` frames with the same input, collecting every frame's events
fn run(state: &mut MatchState, frames: usize, input: &FrameInput) -> Vec<FrameEvents> {
    (0..frames)
        .map(|_| advance_frame(state, DT, input))
        .collect()
}

fn assert_invariants(state: &MatchState) {
    let t = &state.tuning;
    for side in [Side::Left, Side::Right] {
        let paddle = state.paddle(side);
        assert!(paddle.position.y >= 0.0);
        assert!(paddle.position.y + paddle.length <= t.field_height + 1e-3);
        assert!(paddle.next_hit_pos >= 0.0 && paddle.next_hit_pos <= paddle.length / 2.0);
        assert!(state.score(side) <= t.win_score);
    }
    assert!(state.score_timer() >= 0.0);
    assert!(state.win_timer() >= 0.0);

    if state.phase == MatchPhase::Rally {
        let ball = &state.ball;
        let floor = ball.speed * t.min_vertical_angle().sin();
        assert!(ball.direction.x.abs() >= floor - ball.speed * 1e-4);
    }
}

#[test]
fn test_demo_scores_a_point() {
    let mut state = MatchState::new(GameMode::Demo, Difficulty::Medium, 2024);
    let mut scored = false;

    // Five simulated minutes is far longer than any rally can last
    for _ in 0..60 * 300 {
        let events = advance_frame(&mut state, DT, &FrameInput::default());
        assert_invariants(&state);
        if events.score.is_some() {
            scored = true;
            break;
        }
    }

    assert!(scored);
    assert_eq!(state.score(Side::Left) + state.score(Side::Right), 1);
}

#[test]
fn test_demo_plays_through_a_win_and_rematch() {
    let tuning = Tuning {
        win_score: 3,
        win_pause_secs: 2.0,
        ..Tuning::default()
    };
    let mut state = MatchState::with_tuning(GameMode::Demo, Difficulty::Hard, 77, tuning);
    let mut winner = None;
    let mut frames_after_win = 0;

    for _ in 0..60 * 600 {
        let events = advance_frame(&mut state, DT, &FrameInput::default());
        assert_invariants(&state);

        if let Some(side) = events.win {
            assert_eq!(state.score(side), 3);
            assert_eq!(state.winner(), Some(side));
            winner = Some(side);
            continue;
        }
        if winner.is_some() {
            frames_after_win += 1;
            if !state.player_won() {
                break;
            }
            // Scores stay frozen for the whole win pause
            assert!(events.score.is_none());
        }
    }

    assert!(winner.is_some());
    assert_eq!(state.score, [0, 0]);
    assert_eq!(state.difficulty, Difficulty::Hard);
    assert_eq!(state.tuning.win_score, 3);
    // 2 s pause at 60 fps
    assert!((119..=122).contains(&frames_after_win));
}

#[test]
fn test_deterministic_replay() {
    let scripted = |i: usize| FrameInput {
        left: PaddleInput {
            up: i % 120 < 50,
            down: i % 120 > 70,
            boost: i % 240 < 20,
        },
        pause: i == 500 || i == 530,
        ..Default::default()
    };

    let play = || {
        let mut state = MatchState::new(GameMode::SinglePlayer, Difficulty::Easy, 31337);
        let mut history = Vec::new();
        for i in 0..3000 {
            let events = advance_frame(&mut state, DT, &scripted(i));
            history.push((events, state.clone()));
        }
        history
    };

    assert_eq!(play(), play());
}

#[test]
fn test_different_seeds_diverge() {
    let mut a = MatchState::new(GameMode::Demo, Difficulty::Medium, 1);
    let mut b = MatchState::new(GameMode::Demo, Difficulty::Medium, 2);
    run(&mut a, 60, &FrameInput::default());
    run(&mut b, 60, &FrameInput::default());
    assert_ne!(a.ball.position, b.ball.position);
}

#[test]
fn test_two_player_paddles_follow_their_own_keys() {
    let mut state = MatchState::new(GameMode::TwoPlayer, Difficulty::Medium, 5);
    let input = FrameInput {
        left: PaddleInput {
            up: true,
            ..Default::default()
        },
        right: PaddleInput {
            down: true,
            ..Default::default()
        },
        ..Default::default()
    };

    run(&mut state, 180, &input);

    let t = &state.tuning;
    assert_eq!(state.paddle(Side::Left).position.y, 0.0);
    assert_eq!(
        state.paddle(Side::Right).position.y,
        t.field_height - t.paddle_length
    );
}

#[test]
fn test_single_player_ignores_right_keys() {
    let mut state = MatchState::new(GameMode::SinglePlayer, Difficulty::Medium, 5);
    let input = FrameInput {
        right: PaddleInput {
            down: true,
            boost: true,
            ..Default::default()
        },
        ..Default::default()
    };
    let mut human = state.clone();
    human.mode = GameMode::TwoPlayer;

    run(&mut state, 30, &input);
    run(&mut human, 30, &input);

    // Same start, but only the two-player right paddle obeyed the keys
    assert_ne!(
        state.paddle(Side::Right).position.y,
        human.paddle(Side::Right).position.y
    );
}

#[test]
fn test_paused_match_holds_still() {
    let mut state = MatchState::new(GameMode::Demo, Difficulty::Medium, 9);
    run(&mut state, 30, &FrameInput::default());

    let pause = FrameInput {
        pause: true,
        ..Default::default()
    };
    advance_frame(&mut state, DT, &pause);
    let snapshot = (state.ball.clone(), state.paddles.clone(), state.score);

    let events = run(&mut state, 600, &FrameInput::default());

    assert!(events.iter().all(FrameEvents::is_empty));
    assert_eq!((state.ball.clone(), state.paddles.clone(), state.score), snapshot);
    assert!(state.pause_text_alpha() >= 0.0 && state.pause_text_alpha() <= 1.0);
}
