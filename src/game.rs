/// The session loop: poll input, advance one frame, draw it, present it,
/// wait out the rest of the frame budget.  Runs until the quit signal or
/// the defeat frame.
use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::assets::Assets;
use crate::clock::Clock;
use crate::compute::{init_state, tick, Frame, FrameOutcome};
use crate::config::GameConfig;
use crate::display::{render, Surface};
use crate::entities::{GameState, GameStatus};
use crate::input::InputSource;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ending {
    Quit,
    Defeated,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionSummary {
    pub score: u32,
    pub frames: u64,
    pub ending: Ending,
    /// Every bomb was destroyed before the session ended.
    pub cleared: bool,
}

impl SessionSummary {
    fn of(state: &GameState, ending: Ending) -> Self {
        Self {
            score: state.score,
            frames: state.frame,
            ending,
            cleared: state.status == GameStatus::Victory,
        }
    }
}

/// Opening state for `config`.  Without a configured seed one is drawn at
/// random and logged so the layout can be replayed.
pub fn new_game(config: &GameConfig, assets: &Assets) -> GameState {
    let seed = config.seed.unwrap_or_else(rand::random);
    log::info!(
        "new game: seed {}, {} bombs, {:?} colours, {:?} beams, invincible for {} frames",
        seed,
        config.bombs,
        config.coloring,
        config.beam_mode,
        config.invincible_frames
    );
    let mut rng = StdRng::seed_from_u64(seed);
    init_state(config, assets, &mut rng)
}

pub fn play<S, I, C>(
    mut state: GameState,
    config: &GameConfig,
    assets: &Assets,
    surface: &mut S,
    input: &mut I,
    clock: &mut C,
) -> Result<SessionSummary>
where
    S: Surface + ?Sized,
    I: InputSource + ?Sized,
    C: Clock + ?Sized,
{
    loop {
        let frame_input = input.poll().context("reading input")?;
        if let Some((cols, rows)) = frame_input.resized {
            surface.resize(cols, rows);
        }

        let Frame {
            state: next,
            scene,
            outcome,
        } = tick(&state, &frame_input, assets);

        if outcome == FrameOutcome::Quit {
            log::info!("quit at frame {}, score {}", state.frame, state.score);
            return Ok(SessionSummary::of(&state, Ending::Quit));
        }

        render(surface, &scene).context("drawing frame")?;
        surface.present().context("presenting frame")?;

        if outcome == FrameOutcome::Defeated {
            clock.sleep(config.death_pause);
            return Ok(SessionSummary::of(&next, Ending::Defeated));
        }

        state = next;
        clock.tick(config.max_fps);
    }
}
