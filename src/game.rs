//! Frame driver
//!
//! Owns the `GameState`, applies external commands immediately, and turns
//! variable frame times into fixed simulation ticks.

use crate::consts::*;
use crate::platform::{self, Frame, Presenter};
use crate::sim::{CourseError, GameState, Move, apply_move, tick};
use crate::tuning::Tuning;

/// Commands from input devices and the host page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// One grid step in a direction
    Move(Move),
    /// Start gate (start button / game over screen)
    SetStarted(bool),
    /// Viewport changed; presentation only
    Resize { width: u32, height: u32 },
    /// Player model finished loading
    PlayerLoaded,
    /// Player model went away
    PlayerUnloaded,
}

/// Game instance holding all state
#[derive(Debug)]
pub struct Game {
    state: GameState,
    accumulator: f32,
}

impl Game {
    pub fn new(seed: u64, tuning: Tuning) -> Result<Self, CourseError> {
        Ok(Self::from_state(GameState::new(seed, tuning)?))
    }

    pub fn from_state(state: GameState) -> Self {
        Self {
            state,
            accumulator: 0.0,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Apply a command right away; returns whether it changed anything
    pub fn command(&mut self, command: Command) -> bool {
        match command {
            Command::Move(mv) => apply_move(&mut self.state, mv),
            Command::SetStarted(started) => {
                if self.state.started == started {
                    return false;
                }
                self.state.started = started;
                log::info!("Game {}", if started { "started" } else { "stopped" });
                true
            }
            Command::Resize { width, height } => {
                log::debug!("Viewport resized to {}x{} (ignored by simulation)", width, height);
                false
            }
            Command::PlayerLoaded => {
                let had_player = self.state.player.is_some();
                self.state.spawn_player();
                !had_player
            }
            Command::PlayerUnloaded => {
                let had_player = self.state.player.is_some();
                self.state.despawn_player();
                had_player
            }
        }
    }

    /// Advance by a frame's elapsed time and present the result
    ///
    /// Returns the number of fixed ticks that ran. A non-finite `elapsed`
    /// counts as no time at all.
    pub fn frame<P: Presenter + ?Sized>(&mut self, elapsed: f32, presenter: &mut P) -> u32 {
        let dt = if elapsed.is_finite() {
            elapsed.clamp(0.0, MAX_FRAME_DT)
        } else {
            log::warn!("Ignoring non-finite frame time {}", elapsed);
            0.0
        };
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(&mut self.state);
            self.accumulator -= SIM_DT;
            substeps += 1;
        }

        let events = self.state.drain_events();
        platform::dispatch(presenter, &events);
        presenter.render(&Frame::capture(&self.state));

        substeps
    }

    /// Start over on a fresh course, keeping tuning and the player entity
    pub fn restart(&mut self, seed: u64) -> Result<(), CourseError> {
        let had_player = self.state.player.is_some();
        let mut state = GameState::new(seed, self.state.tuning.clone())?;
        if had_player {
            state.spawn_player();
        }
        self.state = state;
        self.accumulator = 0.0;
        log::info!("Restarted with seed {}", seed);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::Feedback;
    use crate::sim::{Direction, Lane, LaneKind, LaneMap, Obstacle, ObstacleKind};
    use glam::Vec2;

    #[derive(Default)]
    struct Recorder {
        frames: Vec<Frame>,
        played: Vec<Feedback>,
        resets: Vec<Vec2>,
    }

    impl Presenter for Recorder {
        fn render(&mut self, frame: &Frame) {
            self.frames.push(frame.clone());
        }

        fn play(&mut self, feedback: Feedback) {
            self.played.push(feedback);
        }

        fn reset_position(&mut self, to: Vec2) {
            self.resets.push(to);
        }
    }

    fn game_with(obstacles: Vec<Obstacle>) -> Game {
        let lanes = LaneMap::new(
            vec![
                Lane::new(LaneKind::Grass, 6.0),
                Lane::new(LaneKind::Road, 4.0),
                Lane::new(LaneKind::Water, 2.0),
                Lane::new(LaneKind::Goal, 0.0),
            ],
            LANE_TOLERANCE,
        )
        .unwrap();
        Game::from_state(GameState::with_course(lanes, obstacles, Tuning::default()).unwrap())
    }

    #[test]
    fn test_frame_runs_fixed_ticks() {
        let mut game = game_with(Vec::new());
        let mut recorder = Recorder::default();

        assert_eq!(game.frame(SIM_DT * 0.5, &mut recorder), 0);
        assert_eq!(game.frame(SIM_DT * 0.6, &mut recorder), 1);
        assert_eq!(game.frame(SIM_DT * 3.0, &mut recorder), 3);
        assert_eq!(recorder.frames.len(), 3);
        assert_eq!(game.state().time_ticks, 4);
    }

    #[test]
    fn test_frame_caps_hiccups() {
        let mut game = game_with(Vec::new());
        let mut recorder = Recorder::default();
        let ticks = game.frame(5.0, &mut recorder);
        assert!(ticks <= MAX_SUBSTEPS);
        assert!(ticks as f32 * SIM_DT <= MAX_FRAME_DT + SIM_DT);
    }

    #[test]
    fn test_bad_frame_time_does_not_stall() {
        let mut game = game_with(Vec::new());
        let mut recorder = Recorder::default();

        assert_eq!(game.frame(f32::NAN, &mut recorder), 0);
        assert_eq!(game.frame(f32::INFINITY, &mut recorder), 0);
        assert_eq!(game.frame(-1.0, &mut recorder), 0);
        assert_eq!(game.frame(SIM_DT * 2.0, &mut recorder), 2);
        assert_eq!(game.state().time_ticks, 2);
        assert_eq!(recorder.frames.len(), 4);
    }

    #[test]
    fn test_late_player_is_not_controllable() {
        let mut game = game_with(Vec::new());
        let mut recorder = Recorder::default();
        assert!(game.command(Command::SetStarted(true)));
        assert!(!game.command(Command::Move(Move::Up)));

        game.frame(SIM_DT, &mut recorder);
        assert!(recorder.frames[0].player.is_none());

        assert!(game.command(Command::PlayerLoaded));
        assert!(!game.command(Command::PlayerLoaded));
        assert!(game.command(Command::Move(Move::Up)));
    }

    #[test]
    fn test_resize_is_ignored() {
        let mut game = game_with(Vec::new());
        game.command(Command::PlayerLoaded);
        let before = game.state().player.clone();
        assert!(!game.command(Command::Resize {
            width: 800,
            height: 600
        }));
        assert_eq!(game.state().player, before);
    }

    #[test]
    fn test_crash_feedback_then_reset() {
        let car = Obstacle::new(ObstacleKind::Vehicle, 4.0, 0.0, 0.0, Direction::Left);
        let mut game = game_with(vec![car]);
        let mut recorder = Recorder::default();
        game.command(Command::PlayerLoaded);
        game.command(Command::SetStarted(true));
        game.command(Command::Move(Move::Up));

        game.frame(SIM_DT, &mut recorder);
        assert_eq!(recorder.played, vec![Feedback::Crash]);
        assert!(recorder.frames.last().unwrap().player.unwrap().dying);

        let delay = game.state().tuning.death_delay_secs;
        let mut elapsed = 0.0;
        while elapsed < delay + SIM_DT {
            game.frame(SIM_DT, &mut recorder);
            elapsed += SIM_DT;
        }
        assert_eq!(recorder.played, vec![Feedback::Crash]);
        assert_eq!(recorder.resets, vec![Vec2::new(0.0, 6.0)]);
        let player = recorder.frames.last().unwrap().player.unwrap();
        assert!(!player.dying);
        assert_eq!(player.axis, 6.0);
    }

    #[test]
    fn test_stop_freezes_resolution() {
        let mut game = game_with(Vec::new());
        let mut recorder = Recorder::default();
        game.command(Command::PlayerLoaded);
        game.command(Command::SetStarted(true));
        game.command(Command::Move(Move::Up));
        game.command(Command::Move(Move::Up));
        assert!(game.command(Command::SetStarted(false)));

        // Standing on water, but the gate is closed
        game.frame(SIM_DT * 4.0, &mut recorder);
        assert!(recorder.played.is_empty());

        game.command(Command::SetStarted(true));
        game.frame(SIM_DT, &mut recorder);
        assert_eq!(recorder.played, vec![Feedback::Splash]);
    }

    #[test]
    fn test_restart_keeps_player_entity() {
        let mut game = Game::new(1, Tuning::default()).unwrap();
        game.command(Command::PlayerLoaded);
        game.restart(2).unwrap();
        assert_eq!(game.state().seed(), 2);
        assert!(game.state().player.is_some());
        assert_eq!(game.state().time_ticks, 0);
    }
}
