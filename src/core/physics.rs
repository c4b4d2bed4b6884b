//! Ball motion, collisions and scoring.
//!
//! Every function here runs on a `GameState` the caller already holds
//! exclusively; nothing in this module locks.

use rand::{rngs::StdRng, Rng, SeedableRng};
use std::f64::consts::PI;

use super::{constants::MAX_LAUNCH_ANGLE, Ball, GameSettings, GameState, Paddle, SlotId};

/// Source of ball launch angles, in radians from the positive x axis
pub trait AngleSource: Send {
    fn next_angle(&mut self) -> f64;
}

/// Launch angles drawn from a `rand` RNG
///
/// Uniform within ±45° of the horizontal, flipped by 180° half of the
/// time so either player is equally likely to receive the serve.
#[derive(Debug)]
pub struct RngAngleSource<R: Rng = StdRng> {
    rng: R,
}

impl RngAngleSource<StdRng> {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible sequence of launch angles
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng + Send> AngleSource for RngAngleSource<R> {
    fn next_angle(&mut self) -> f64 {
        let angle = self.rng.gen_range(-MAX_LAUNCH_ANGLE..=MAX_LAUNCH_ANGLE);
        if self.rng.gen_bool(0.5) {
            angle + PI
        } else {
            angle
        }
    }
}

/// What a single [`step`] did, for logging
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepOutcome {
    /// Paddle the ball bounced off
    pub paddle_hit: Option<SlotId>,
    /// Player credited with a goal
    pub goal: Option<SlotId>,
}

/// Advance the simulation by one tick
pub fn step(
    state: &mut GameState,
    settings: &GameSettings,
    angles: &mut dyn AngleSource,
) -> StepOutcome {
    let mut outcome = StepOutcome::default();

    let ball = &mut state.ball;
    ball.x += ball.vx;
    ball.y += ball.vy;

    bounce_off_walls(ball, settings.game_height);

    let (side, paddle) = if ball.vx < 0.0 {
        (SlotId::Player1, &state.player1)
    } else {
        (SlotId::Player2, &state.player2)
    };
    if ball.vx != 0.0 && overlaps(ball, paddle) {
        if side == SlotId::Player1 {
            ball.x = paddle.x + paddle.width;
        } else {
            ball.x = paddle.x - ball.size;
        }
        ball.vx = -ball.vx * settings.ball_speed_increase_factor;
        outcome.paddle_hit = Some(side);
    }

    let scorer = if ball.x < 0.0 {
        Some(SlotId::Player2)
    } else if ball.x + ball.size > settings.game_width {
        Some(SlotId::Player1)
    } else {
        None
    };
    if let Some(scorer) = scorer {
        state.score.award(scorer);
        reset_ball(state, settings, angles);
        outcome.goal = Some(scorer);
    }

    outcome
}

fn bounce_off_walls(ball: &mut Ball, game_height: f64) {
    if ball.y < 0.0 {
        ball.y = 0.0;
        ball.vy = ball.vy.abs();
    } else if ball.y + ball.size > game_height {
        ball.y = game_height - ball.size;
        ball.vy = -ball.vy.abs();
    }
}

/// Axis-aligned overlap between the ball and a paddle, each axis tested on its own
fn overlaps(ball: &Ball, paddle: &Paddle) -> bool {
    let horizontal = ball.x < paddle.x + paddle.width && ball.x + ball.size > paddle.x;
    let vertical = ball.y < paddle.y + paddle.height && ball.y + ball.size > paddle.y;
    horizontal && vertical
}

/// Put the ball back in the centre and relaunch it at a fresh angle
pub fn reset_ball(state: &mut GameState, settings: &GameSettings, angles: &mut dyn AngleSource) {
    let angle = angles.next_angle();
    let ball = &mut state.ball;

    ball.x = settings.initial_ball.x;
    ball.y = settings.initial_ball.y;
    ball.vx = settings.ball_initial_speed * angle.cos();
    ball.vy = settings.ball_initial_speed * angle.sin();
}

/// Zero the score, restore both paddles and relaunch the ball
pub fn reset_game(state: &mut GameState, settings: &GameSettings, angles: &mut dyn AngleSource) {
    state.score = Default::default();

    for (slot, initial) in [
        (SlotId::Player1, settings.initial_player1),
        (SlotId::Player2, settings.initial_player2),
    ] {
        let paddle = state.paddle_mut(slot);
        paddle.x = initial.x;
        paddle.y = initial.y;
    }

    reset_ball(state, settings, angles);
}

/// Clamp a requested paddle `y` into `[0, gameHeight - paddleHeight]`
pub fn clamp_paddle_y(y: f64, settings: &GameSettings) -> f64 {
    y.clamp(0.0, settings.max_paddle_y())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::core::{Position, Score};

    /// Always launches at the same angle
    pub(crate) struct FixedAngle(pub f64);

    impl AngleSource for FixedAngle {
        fn next_angle(&mut self) -> f64 {
            self.0
        }
    }

    const EPSILON: f64 = 1e-9;

    fn setup() -> (GameState, GameSettings) {
        let settings = GameSettings::default();
        (GameState::new(&settings), settings)
    }

    fn place_ball(state: &mut GameState, x: f64, y: f64, vx: f64, vy: f64) {
        state.ball.x = x;
        state.ball.y = y;
        state.ball.vx = vx;
        state.ball.vy = vy;
    }

    #[test]
    fn test_ball_moves_by_velocity() {
        let (mut state, settings) = setup();
        place_ball(&mut state, 400.0, 300.0, 3.0, -2.0);

        let outcome = step(&mut state, &settings, &mut FixedAngle(0.0));

        assert_eq!(outcome, StepOutcome::default());
        assert_eq!(state.ball.position(), Position::new(403.0, 298.0));
    }

    #[test]
    fn test_bounce_off_top_wall() {
        let (mut state, settings) = setup();
        place_ball(&mut state, 400.0, 1.0, 2.0, -3.0);

        step(&mut state, &settings, &mut FixedAngle(0.0));

        assert_eq!(state.ball.y, 0.0);
        assert_eq!(state.ball.vy, 3.0);
        assert_eq!(state.ball.vx, 2.0);
    }

    #[test]
    fn test_bounce_off_bottom_wall() {
        let (mut state, settings) = setup();
        place_ball(&mut state, 400.0, 588.0, 2.0, 4.0);

        step(&mut state, &settings, &mut FixedAngle(0.0));

        assert_eq!(state.ball.y, 590.0);
        assert_eq!(state.ball.vy, -4.0);
    }

    #[test]
    fn test_no_collision_before_reaching_paddle() {
        let (mut state, settings) = setup();
        state.player1.y = 300.0;
        place_ball(&mut state, 16.0, 300.0, -2.5, 0.0);

        let outcome = step(&mut state, &settings, &mut FixedAngle(0.0));

        assert!(outcome.paddle_hit.is_none());
        assert!((state.ball.x - 13.5).abs() < EPSILON);
        assert_eq!(state.ball.vx, -2.5);
    }

    #[test]
    fn test_left_paddle_reflects_and_speeds_up() {
        let (mut state, settings) = setup();
        state.player1.y = 300.0;
        place_ball(&mut state, 25.0, 300.0, -2.5, 0.0);

        let outcome = step(&mut state, &settings, &mut FixedAngle(0.0));

        assert_eq!(outcome.paddle_hit, Some(SlotId::Player1));
        assert!((state.ball.vx - 2.875).abs() < EPSILON);
        assert_eq!(state.ball.x, 45.0);
    }

    #[test]
    fn test_right_paddle_reflects_and_snaps() {
        let (mut state, settings) = setup();
        state.player2.y = 200.0;
        place_ball(&mut state, 748.0, 250.0, 4.0, 1.0);

        let outcome = step(&mut state, &settings, &mut FixedAngle(0.0));

        assert_eq!(outcome.paddle_hit, Some(SlotId::Player2));
        assert!((state.ball.vx + 4.6).abs() < EPSILON);
        assert_eq!(state.ball.x, 745.0);
        assert_eq!(state.ball.vy, 1.0);
    }

    #[test]
    fn test_only_paddle_in_direction_of_travel_collides() {
        let (mut state, settings) = setup();
        state.player1.y = 300.0;
        // overlapping player1's paddle but travelling away from it
        place_ball(&mut state, 35.0, 300.0, 2.0, 0.0);

        let outcome = step(&mut state, &settings, &mut FixedAngle(0.0));

        assert!(outcome.paddle_hit.is_none());
        assert_eq!(state.ball.vx, 2.0);
    }

    #[test]
    fn test_ball_passing_paddle_vertically_misses() {
        let (mut state, settings) = setup();
        state.player1.y = 0.0;
        place_ball(&mut state, 40.0, 300.0, -3.0, 0.0);

        let outcome = step(&mut state, &settings, &mut FixedAngle(0.0));

        assert!(outcome.paddle_hit.is_none());
    }

    #[test]
    fn test_goal_on_left_scores_for_player2() {
        let (mut state, settings) = setup();
        state.score = Score { player1: 3, player2: 1 };
        state.player1.y = 0.0;
        place_ball(&mut state, 2.0, 400.0, -5.0, 0.0);

        let outcome = step(&mut state, &settings, &mut FixedAngle(0.0));

        assert_eq!(outcome.goal, Some(SlotId::Player2));
        assert_eq!(state.score, Score { player1: 3, player2: 2 });
        assert_eq!(state.ball.position(), settings.initial_ball);
        assert_eq!(state.player1.y, 0.0);
    }

    #[test]
    fn test_goal_on_right_scores_for_player1() {
        let (mut state, settings) = setup();
        state.player2.y = 0.0;
        place_ball(&mut state, 788.0, 400.0, 5.0, 0.0);

        let outcome = step(&mut state, &settings, &mut FixedAngle(PI));

        assert_eq!(outcome.goal, Some(SlotId::Player1));
        assert_eq!(state.score, Score { player1: 1, player2: 0 });
        assert_eq!(state.ball.position(), settings.initial_ball);
        assert!((state.ball.vx + settings.ball_initial_speed).abs() < EPSILON);
    }

    #[test]
    fn test_reset_ball_uses_angle() {
        let (mut state, settings) = setup();
        place_ball(&mut state, 10.0, 10.0, 0.0, 0.0);

        reset_ball(&mut state, &settings, &mut FixedAngle(PI / 4.0));

        let expected = settings.ball_initial_speed * (PI / 4.0).cos();
        assert_eq!(state.ball.position(), settings.initial_ball);
        assert!((state.ball.vx - expected).abs() < EPSILON);
        assert!((state.ball.vy - expected).abs() < EPSILON);
    }

    #[test]
    fn test_reset_game_is_idempotent() {
        let (mut state, settings) = setup();
        state.score = Score { player1: 4, player2: 7 };
        state.player1.y = 0.0;
        state.player2.y = 500.0;
        place_ball(&mut state, 100.0, 100.0, 9.0, 9.0);

        reset_game(&mut state, &settings, &mut FixedAngle(0.0));
        let once = state.clone();
        reset_game(&mut state, &settings, &mut FixedAngle(0.0));

        assert_eq!(state, once);
        assert_eq!(state.score, Score::default());
        assert_eq!(state.player1.position(), settings.initial_player1);
        assert_eq!(state.player2.position(), settings.initial_player2);
        assert_eq!(state.ball.position(), settings.initial_ball);
    }

    #[test]
    fn test_clamp_paddle_y() {
        let settings = GameSettings::default();

        for requested in [f64::MIN, -1e9, -0.5, 0.0, 123.25, 500.0, 500.5, 1e12, f64::MAX] {
            let y = clamp_paddle_y(requested, &settings);
            assert!((0.0..=500.0).contains(&y), "{requested} clamped to {y}");
        }

        assert_eq!(clamp_paddle_y(123.25, &settings), 123.25);
        assert_eq!(clamp_paddle_y(-40.0, &settings), 0.0);
        assert_eq!(clamp_paddle_y(900.0, &settings), 500.0);
    }

    #[test]
    fn test_rng_angles_stay_within_launch_cones() {
        let mut angles = RngAngleSource::seeded(7);
        let mut towards_left = 0;

        for _ in 0..1000 {
            let angle = angles.next_angle();
            let (vx, vy) = (angle.cos(), angle.sin());

            // within 45° of the horizontal axis on either side
            assert!(vy.abs() <= vx.abs() + EPSILON);
            if vx < 0.0 {
                towards_left += 1;
            }
        }

        assert!((350..=650).contains(&towards_left));
    }

    #[test]
    fn test_seeded_angles_are_reproducible() {
        let mut a = RngAngleSource::seeded(42);
        let mut b = RngAngleSource::seeded(42);

        for _ in 0..10 {
            assert_eq!(a.next_angle(), b.next_angle());
        }
    }
}
