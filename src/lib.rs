//! Fight, Kokaton! - dodge the bouncing bombs, shoot them down.
//!
//! Core modules:
//! - `geometry`: pixel rectangles, headings and the field bounds check
//! - `entities`: player, bombs, beams, explosions and the game state
//! - `compute`: every gameplay rule, as pure functions over the state
//! - `assets` / `scene` / `display`: images, per-frame draw lists, terminal output
//! - `input` / `clock` / `game`: the frame loop and its collaborators

pub mod assets;
pub mod clock;
pub mod compute;
pub mod config;
pub mod display;
pub mod entities;
pub mod game;
pub mod geometry;
pub mod input;
pub mod scene;

/// Game configuration constants
pub mod consts {
    /// Play field size in pixels
    pub const WIDTH: i32 = 1600;
    pub const HEIGHT: i32 = 900;

    pub const TITLE: &str = "たたかえ！こうかとん";

    /// Player spawn point
    pub const PLAYER_START: (i32, i32) = (900, 400);

    pub const NUM_OF_BOMBS: usize = 5;
    /// Bomb radius range (inclusive)
    pub const BOMB_MIN_RADIUS: i32 = 10;
    pub const BOMB_MAX_RADIUS: i32 = 50;

    /// Frames during which bombs cannot hurt the player
    pub const INVINCIBLE_FRAMES: u64 = 1000;
    /// Blink half-period while invincible
    pub const BLINK_FRAMES: u64 = 10;

    /// Explosion lifetime counter at spawn
    pub const EXPLOSION_LIFE: i32 = 100;

    pub const MAX_FPS: u32 = 120;
    pub const DEATH_PAUSE_MS: u64 = 1000;

    /// Scale applied to the kokaton poses
    pub const KOKATON_ZOOM: f32 = 2.0;
}
