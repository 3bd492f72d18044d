/// Command-line options and the validated runtime configuration.
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Result};
use clap::{Parser, ValueEnum};

use crate::consts::{
    DEATH_PAUSE_MS, HEIGHT, INVINCIBLE_FRAMES, MAX_FPS, NUM_OF_BOMBS, TITLE, WIDTH,
};

/// How bomb colours are picked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, ValueEnum)]
pub enum BombColoring {
    /// One of six fixed colours.
    #[default]
    Palette,
    /// Uniformly random RGB.
    Random,
}

/// How the fire key turns into beams.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, ValueEnum)]
pub enum BeamMode {
    /// One beam per key-down; any number may be in flight.
    #[default]
    Multi,
    /// At most one beam, relaunched every frame the key is held.
    Single,
}

#[derive(Parser, Debug)]
#[command(name = "fight_kokaton")]
#[command(about = "Dodge the bouncing bombs and shoot them down")]
pub struct Args {
    /// Bombs spawned at the start
    #[arg(long, default_value_t = NUM_OF_BOMBS)]
    pub bombs: usize,

    /// Frames during which bombs cannot hurt the player (0 disables)
    #[arg(long, default_value_t = INVINCIBLE_FRAMES)]
    pub invincible_frames: u64,

    /// Frame-rate ceiling; all speeds are per frame
    #[arg(long, default_value_t = MAX_FPS)]
    pub fps: u32,

    /// Bomb colouring
    #[arg(long, value_enum, default_value_t = BombColoring::Palette)]
    pub colors: BombColoring,

    /// Beam firing mode
    #[arg(long, value_enum, default_value_t = BeamMode::Multi)]
    pub beam_mode: BeamMode,

    /// Seed for bomb placement (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Directory holding sprites.json (built-in sprites when omitted)
    #[arg(long)]
    pub assets: Option<PathBuf>,

    /// Pause after the defeat frame, in milliseconds
    #[arg(long, default_value_t = DEATH_PAUSE_MS)]
    pub death_pause_ms: u64,

    /// Write log output to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    pub width: i32,
    pub height: i32,
    pub title: String,
    pub bombs: usize,
    pub invincible_frames: u64,
    pub max_fps: u32,
    pub coloring: BombColoring,
    pub beam_mode: BeamMode,
    pub seed: Option<u64>,
    pub assets_dir: Option<PathBuf>,
    pub death_pause: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            title: TITLE.to_string(),
            bombs: NUM_OF_BOMBS,
            invincible_frames: INVINCIBLE_FRAMES,
            max_fps: MAX_FPS,
            coloring: BombColoring::default(),
            beam_mode: BeamMode::default(),
            seed: None,
            assets_dir: None,
            death_pause: Duration::from_millis(DEATH_PAUSE_MS),
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_fps == 0 {
            bail!("fps must be > 0");
        }
        if self.width <= 0 || self.height <= 0 {
            bail!("field must have a positive size, got {}x{}", self.width, self.height);
        }
        Ok(())
    }
}

impl TryFrom<&Args> for GameConfig {
    type Error = anyhow::Error;

    fn try_from(args: &Args) -> Result<Self> {
        let config = GameConfig {
            bombs: args.bombs,
            invincible_frames: args.invincible_frames,
            max_fps: args.fps,
            coloring: args.colors,
            beam_mode: args.beam_mode,
            seed: args.seed,
            assets_dir: args.assets.clone(),
            death_pause: Duration::from_millis(args.death_pause_ms),
            ..GameConfig::default()
        };
        config.validate()?;
        Ok(config)
    }
}
