/// All game entity types.  Constructors only; the rules that move and
/// retire entities live in `compute`.
use crate::assets::{Assets, Image, Rgb};
use crate::config::BeamMode;
use crate::consts::{EXPLOSION_LIFE, KOKATON_ZOOM};
use crate::geometry::{Heading, Rect};

/// Anything that occupies a box on the field.
pub trait Entity {
    fn rect(&self) -> Rect;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    /// Every bomb is gone; the player holds the victory pose until quit.
    Victory,
    /// The player touched a bomb.  Terminal.
    GameOver,
}

// ── Player ────────────────────────────────────────────────────────────────────

/// The kokaton pose for each heading, indexed by [`Heading::index`].
#[derive(Clone, Debug, PartialEq)]
pub struct FacingImages([Image; 8]);

impl FacingImages {
    /// `raw` is the left-facing source image; it is scaled up and mirrored
    /// so the unrotated pose faces right.
    pub fn from_source(raw: &Image) -> Self {
        let base = raw.rotozoom(0.0, KOKATON_ZOOM).flip(true, false);
        let mirrored = base.flip(true, false);
        Self(Heading::ALL.map(|heading| match heading {
            Heading::Left => mirrored,
            Heading::UpLeft => mirrored.rotozoom(-45.0, 1.0),
            Heading::DownLeft => mirrored.rotozoom(45.0, 1.0),
            Heading::Up => base.rotozoom(90.0, 1.0),
            Heading::Right => base,
            Heading::UpRight => base.rotozoom(45.0, 1.0),
            Heading::Down => base.rotozoom(-90.0, 1.0),
            Heading::DownRight => base.rotozoom(-45.0, 1.0),
        }))
    }

    pub fn get(&self, heading: Heading) -> &Image {
        &self.0[heading.index()]
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    /// Hit box.  Sized by the unrotated pose and never resized.
    pub rect: Rect,
    pub heading: Heading,
    /// Image currently shown; follows `heading` unless overridden.
    pub image: Image,
    pub facing: FacingImages,
    /// False while blinking out during invincibility.
    pub visible: bool,
    pub alive: bool,
}

impl Player {
    pub fn new(assets: &Assets, (cx, cy): (i32, i32)) -> Self {
        let facing = FacingImages::from_source(&assets.kokaton);
        let heading = Heading::Right;
        let image = *facing.get(heading);
        Self {
            rect: image.rect().with_center(cx, cy),
            heading,
            image,
            facing,
            visible: true,
            alive: true,
        }
    }

    /// Swap in a scaled-up pose (victory, defeat) regardless of heading.
    pub fn set_image(&mut self, raw: &Image) {
        self.image = raw.rotozoom(0.0, KOKATON_ZOOM);
    }
}

impl Entity for Player {
    fn rect(&self) -> Rect {
        self.rect
    }
}

// ── Bomb ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Bomb {
    pub rect: Rect,
    /// Per-frame velocity; each component is ±1.
    pub vx: i32,
    pub vy: i32,
    pub color: Rgb,
    pub radius: i32,
    pub image: Image,
}

impl Bomb {
    pub fn new((cx, cy): (i32, i32), radius: i32, color: Rgb, (vx, vy): (i32, i32)) -> Self {
        let image = Image::disc(radius, color);
        Self {
            rect: image.rect().with_center(cx, cy),
            vx,
            vy,
            color,
            radius,
            image,
        }
    }
}

impl Entity for Bomb {
    fn rect(&self) -> Rect {
        self.rect
    }
}

// ── Beam ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Beam {
    pub rect: Rect,
    /// Fixed at launch; the beam advances one pixel per axis along it.
    pub heading: Heading,
    pub image: Image,
}

impl Beam {
    /// Launch from the edge of `player`'s box it is facing, sprite turned
    /// to match.
    pub fn new(player: &Player, sprite: &Image) -> Self {
        let heading = player.heading;
        let image = sprite.rotozoom(heading.angle_degrees(), 1.0);
        let (cx, cy) = heading.anchor(&player.rect);
        Self {
            rect: image.rect().with_center(cx, cy),
            heading,
            image,
        }
    }
}

impl Entity for Beam {
    fn rect(&self) -> Rect {
        self.rect
    }
}

// ── Explosion ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Explosion {
    pub rect: Rect,
    /// Counts down once per frame; retired when it goes negative.
    pub life: i32,
    /// Shown alternately, picked by `life % 2`.
    pub frames: [Image; 2],
}

impl Explosion {
    pub fn new((cx, cy): (i32, i32), sprite: &Image) -> Self {
        Self {
            rect: sprite.rect().with_center(cx, cy),
            life: EXPLOSION_LIFE,
            frames: [*sprite, sprite.flip(true, true)],
        }
    }
}

impl Entity for Explosion {
    fn rect(&self) -> Rect {
        self.rect
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

/// Rule switches fixed for the whole session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rules {
    /// Bombs are harmless while `frame <= invincible_frames`.  0 disables.
    pub invincible_frames: u64,
    pub beam_mode: BeamMode,
}

/// The entire game state.  Cloneable so the per-frame update can return a
/// new copy without mutating the original.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub player: Player,
    pub bombs: Vec<Bomb>,
    pub beams: Vec<Beam>,
    pub explosions: Vec<Explosion>,
    pub score: u32,
    pub frame: u64,
    pub status: GameStatus,
    pub field: Rect,
    pub rules: Rules,
}
