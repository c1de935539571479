//! Paddle Pong entry point
//!
//! Runs the simulation headless: the autopilot (or nobody) plays the player
//! paddle and the log presenter reports the score as it changes.
//!
//! Usage: `paddle-pong [settings.json]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::path::PathBuf;

    use paddle_pong::platform::{Autopilot, LogPresenter, ScriptedInput, new_game};
    use paddle_pong::{InputSource, Settings, run_frames};

    env_logger::init();
    log::info!("Paddle Pong (native) starting...");

    let path = std::env::args().nth(1).map(PathBuf::from);
    let settings = Settings::load_or_default(path.as_deref());

    let mut state = new_game(&settings, settings.field(), settings.seed);
    let mut input: Box<dyn InputSource> = if settings.autopilot {
        Box::new(Autopilot::default())
    } else {
        log::info!("Autopilot off: player paddle stays put");
        Box::new(ScriptedInput::default())
    };
    let mut presenter = LogPresenter::with_dump_every(settings.snapshot_dump_every);

    // Without the autopilot nothing ever closes the window
    let max_frames = match settings.max_frames {
        None if !settings.autopilot => {
            let fallback = Settings::default().max_frames;
            log::warn!("No frame limit and no autopilot, capping at {:?} frames", fallback);
            fallback
        }
        max => max,
    };

    let summary = run_frames(&mut state, input.as_mut(), &mut presenter, max_frames);

    log::info!(
        "Finished after {} frames: {} - {} ({:?})",
        summary.frames,
        summary.score.player,
        summary.score.opponent,
        summary.phase
    );
    println!(
        "{} - {} after {} frames",
        summary.score.player, summary.score.opponent, summary.frames
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The web host drives the library directly
}
