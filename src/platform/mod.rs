//! Platform abstraction layer
//!
//! The simulation only talks to the host through these narrow interfaces:
//! - `InputSource`: at most one discrete event per frame
//! - `SpriteSource`: ball and paddle sprite sizes, read once at start-up
//! - `Presenter`: receives a read-only snapshot after every frame
//!
//! Window creation, texture loading, drawing and frame pacing stay on the
//! host side of these traits.

use std::collections::VecDeque;

use crate::consts::SIM_DT;
use crate::settings::SpriteSize;
use crate::sim::{
    FieldBounds, FrameControl, GamePhase, GameState, InputEvent, Key, Score, Snapshot, TickInput,
    tick,
};

/// Source of discrete input events
pub trait InputSource {
    /// Next event for this frame, if any. `snapshot` is the world as last presented.
    fn poll_event(&mut self, snapshot: &Snapshot) -> Option<InputEvent>;
}

/// Sprite dimensions from the asset loader
pub trait SpriteSource {
    fn ball_size(&self) -> SpriteSize;
    fn paddle_size(&self) -> SpriteSize;
}

/// Consumer of per-frame snapshots (renderer, HUD, logger)
pub trait Presenter {
    fn present(&mut self, snapshot: &Snapshot);
}

/// Build a game sized from the host's sprites and field
pub fn new_game<S: SpriteSource + ?Sized>(sprites: &S, field: FieldBounds, seed: u64) -> GameState {
    let game = GameState::new(
        seed,
        field,
        sprites.ball_size().as_vec2(),
        sprites.paddle_size().as_vec2(),
    );
    log::info!(
        "Game initialized: field {}x{}, seed {}",
        field.width,
        field.height,
        seed
    );
    game
}

/// How a run of the frame loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub frames: u64,
    pub score: Score,
    pub phase: GamePhase,
    pub quit: bool,
}

/// Drive the game one frame at a time until quit or `max_frames`.
///
/// Each frame: poll one event, tick by `SIM_DT`, present. The initial state is
/// presented once before the first frame.
pub fn run_frames<I, P>(
    state: &mut GameState,
    input: &mut I,
    presenter: &mut P,
    max_frames: Option<u64>,
) -> RunSummary
where
    I: InputSource + ?Sized,
    P: Presenter + ?Sized,
{
    let mut snapshot = state.snapshot();
    presenter.present(&snapshot);

    let mut frames = 0u64;
    let mut quit = false;
    while max_frames.is_none_or(|max| frames < max) {
        let event = input.poll_event(&snapshot);
        let control = tick(state, &TickInput::from_event(event), SIM_DT);
        frames += 1;

        snapshot = state.snapshot();
        presenter.present(&snapshot);

        if control == FrameControl::Quit {
            quit = true;
            break;
        }
    }

    RunSummary {
        frames,
        score: state.score,
        phase: state.phase,
        quit,
    }
}

/// Replays a fixed queue of per-frame events. `None` entries are idle frames.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: VecDeque<Option<InputEvent>>,
}

impl ScriptedInput {
    pub fn new<T>(frames: T) -> Self
    where
        T: IntoIterator<Item = Option<InputEvent>>,
    {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    pub fn push(&mut self, event: Option<InputEvent>) {
        self.frames.push_back(event);
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl InputSource for ScriptedInput {
    fn poll_event(&mut self, _snapshot: &Snapshot) -> Option<InputEvent> {
        self.frames.pop_front().flatten()
    }
}

/// Demo mode: plays the player paddle by pressing keys like a person would.
///
/// Tracks the ball while it heads toward the player, otherwise returns to the
/// middle. Presses at most one key every `press_interval` frames and closes the
/// window once the game is over.
#[derive(Debug, Clone)]
pub struct Autopilot {
    press_interval: u64,
    quit_sent: bool,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self::new(2)
    }
}

impl Autopilot {
    pub fn new(press_interval: u64) -> Self {
        Self {
            press_interval: press_interval.max(1),
            quit_sent: false,
        }
    }

    fn steer(snapshot: &Snapshot) -> Option<InputEvent> {
        let paddle = &snapshot.player;
        let ball = &snapshot.ball;
        let target = if ball.vel.x < 0.0 {
            ball.center().y
        } else {
            snapshot.field.half_height()
        };

        // Half a key step of slack so it doesn't twitch around the target
        let slack = paddle.key_step() / 2.0;
        let middle = paddle.center_y();
        if middle < target - slack {
            Some(InputEvent::KeyDown(Key::Down))
        } else if middle > target + slack {
            Some(InputEvent::KeyDown(Key::Up))
        } else {
            None
        }
    }
}

impl InputSource for Autopilot {
    fn poll_event(&mut self, snapshot: &Snapshot) -> Option<InputEvent> {
        match snapshot.phase {
            GamePhase::GameOver if !self.quit_sent => {
                self.quit_sent = true;
                Some(InputEvent::WindowClose)
            }
            GamePhase::GameOver | GamePhase::Paused => None,
            GamePhase::Playing => {
                if snapshot.frame % self.press_interval != 0 {
                    return None;
                }
                Self::steer(snapshot)
            }
        }
    }
}

/// Headless presenter: logs score and phase changes
#[derive(Debug, Clone, Default)]
pub struct LogPresenter {
    last: Option<(Score, GamePhase)>,
    presented: u64,
    /// Dump the full snapshot as JSON every this many frames (debug level)
    dump_every: Option<u64>,
    last_dump: Option<String>,
    dumped: u64,
}

impl LogPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also dump every `every`-th snapshot as JSON. `None` or zero disables it.
    pub fn with_dump_every(every: Option<u64>) -> Self {
        Self {
            dump_every: every.filter(|&n| n > 0),
            ..Self::default()
        }
    }

    pub fn presented(&self) -> u64 {
        self.presented
    }

    /// Most recent JSON dump, if any
    pub fn last_dump(&self) -> Option<&str> {
        self.last_dump.as_deref()
    }

    pub fn dumped(&self) -> u64 {
        self.dumped
    }
}

impl Presenter for LogPresenter {
    fn present(&mut self, snapshot: &Snapshot) {
        self.presented += 1;

        let current = (
            Score {
                player: snapshot.player_score,
                opponent: snapshot.opponent_score,
            },
            snapshot.phase,
        );
        if self.last != Some(current) {
            log::info!(
                "Frame {}: {} - {} ({:?})",
                snapshot.frame,
                snapshot.player_score,
                snapshot.opponent_score,
                snapshot.phase
            );
            self.last = Some(current);
        }

        if let Some(every) = self.dump_every {
            if snapshot.frame % every == 0 {
                match serde_json::to_string(snapshot) {
                    Ok(json) => {
                        log::debug!("{}", json);
                        self.last_dump = Some(json);
                        self.dumped += 1;
                    }
                    Err(e) => log::warn!("Could not serialize frame {}: {}", snapshot.frame, e),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::{Intent, Side};

    /// Keeps every snapshot it is shown
    #[derive(Default)]
    struct Recorder {
        snapshots: Vec<Snapshot>,
    }

    impl Presenter for Recorder {
        fn present(&mut self, snapshot: &Snapshot) {
            self.snapshots.push(*snapshot);
        }
    }

    fn game() -> GameState {
        let settings = Settings::default();
        new_game(&settings, settings.field(), 12345)
    }

    #[test]
    fn test_run_presents_initial_frame() {
        let mut state = game();
        let mut input = ScriptedInput::default();
        let mut recorder = Recorder::default();

        let summary = run_frames(&mut state, &mut input, &mut recorder, Some(3));
        assert_eq!(summary.frames, 3);
        assert!(!summary.quit);
        assert_eq!(recorder.snapshots.len(), 4);
        assert_eq!(recorder.snapshots[0].frame, 0);
        assert_eq!(recorder.snapshots[3].frame, 3);
    }

    #[test]
    fn test_run_stops_after_quit_frame() {
        let mut state = game();
        let mut input = ScriptedInput::new([None, Some(InputEvent::KeyDown(Key::Up))]);
        input.push(Some(InputEvent::WindowClose));
        input.push(Some(InputEvent::KeyDown(Key::Up)));
        let mut recorder = Recorder::default();

        let summary = run_frames(&mut state, &mut input, &mut recorder, None);
        assert!(summary.quit);
        assert_eq!(summary.frames, 3);
        assert!(!input.is_empty());
    }

    #[test]
    fn test_pause_script() {
        let mut state = game();
        let start_y = state.player.pos.y;
        let mut input = ScriptedInput::new([
            Some(InputEvent::KeyDown(Key::Pause)),
            Some(InputEvent::KeyDown(Key::Up)),
            Some(InputEvent::KeyDown(Key::Down)),
            Some(InputEvent::KeyDown(Key::Up)),
        ]);
        let mut presenter = LogPresenter::new();

        let summary = run_frames(&mut state, &mut input, &mut presenter, Some(4));
        assert_eq!(summary.phase, GamePhase::Paused);
        assert_eq!(state.player.pos.y, start_y);
        assert_eq!(presenter.presented(), 5);
    }

    #[test]
    fn test_log_presenter_dumps_snapshots() {
        let mut state = game();
        let mut presenter = LogPresenter::with_dump_every(Some(5));

        run_frames(&mut state, &mut ScriptedInput::default(), &mut presenter, Some(10));
        // Frames 0, 5 and 10
        assert_eq!(presenter.dumped(), 3);
        let json = presenter.last_dump().expect("a dump was taken");
        let dumped: Snapshot = serde_json::from_str(json).expect("dump is valid json");
        assert_eq!(dumped.frame, 10);
        assert_eq!(dumped, state.snapshot());
    }

    #[test]
    fn test_log_presenter_dump_disabled() {
        let mut state = game();
        for every in [None, Some(0)] {
            let mut presenter = LogPresenter::with_dump_every(every);
            run_frames(&mut state, &mut ScriptedInput::default(), &mut presenter, Some(3));
            assert_eq!(presenter.dumped(), 0);
            assert!(presenter.last_dump().is_none());
        }
    }

    #[test]
    fn test_autopilot_steers_toward_incoming_ball() {
        let mut state = game();
        state.ball.vel = glam::Vec2::new(-400.0, 0.0);
        state.ball.pos.y = 50.0;
        state.frame = 0;

        let mut pilot = Autopilot::new(1);
        assert_eq!(
            pilot.poll_event(&state.snapshot()),
            Some(InputEvent::KeyDown(Key::Up))
        );

        state.ball.pos.y = 700.0;
        assert_eq!(
            pilot.poll_event(&state.snapshot()),
            Some(InputEvent::KeyDown(Key::Down))
        );
    }

    #[test]
    fn test_autopilot_closes_window_once_game_over() {
        let mut state = game();
        state.phase = GamePhase::GameOver;
        let mut pilot = Autopilot::default();
        assert_eq!(
            pilot.poll_event(&state.snapshot()),
            Some(InputEvent::WindowClose)
        );
        assert_eq!(pilot.poll_event(&state.snapshot()), None);
    }

    #[test]
    fn test_autopilot_run_ends_cleanly() {
        let mut state = game();
        let mut pilot = Autopilot::default();
        let mut presenter = LogPresenter::new();

        let summary = run_frames(&mut state, &mut pilot, &mut presenter, Some(50_000));
        assert!(state.player.top() >= 0.0);
        assert!(state.player.bottom() <= state.field.height);

        if summary.phase == GamePhase::GameOver {
            // The autopilot closes the window right after the final point
            assert!(summary.quit);
            let winner = summary.score.winner().expect("someone won");
            assert_eq!(summary.score.get(winner), crate::consts::WINNING_SCORE);
            assert!(summary.score.get(winner.opposite()) < crate::consts::WINNING_SCORE);
        } else {
            assert!(!summary.quit);
            assert_eq!(summary.frames, 50_000);
        }
    }

    #[test]
    fn test_scripted_moves_match_direct_intents() {
        let mut scripted = game();
        let mut direct = game();

        let mut input = ScriptedInput::new([Some(InputEvent::KeyDown(Key::Down)), None]);
        run_frames(&mut scripted, &mut input, &mut Recorder::default(), Some(2));

        tick(&mut direct, &TickInput::from_intent(Intent::MoveDown), SIM_DT);
        tick(&mut direct, &TickInput::none(), SIM_DT);

        assert_eq!(scripted.player, direct.player);
        assert_eq!(scripted.ball, direct.ball);
        assert_eq!(scripted.paddle(Side::Opponent), direct.paddle(Side::Opponent));
    }
}
