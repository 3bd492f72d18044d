/// Pure game-logic functions.
///
/// Every public function takes immutable views of the current state and
/// returns new values.  Drawing is recorded into a `Scene`, never performed.
/// Randomness only enters through the RNG handed to `init_state` /
/// `spawn_bomb`.
use rand::seq::SliceRandom;
use rand::Rng;

use crate::assets::{Assets, Rgb};
use crate::config::{BeamMode, BombColoring, GameConfig};
use crate::consts::{BLINK_FRAMES, BOMB_MAX_RADIUS, BOMB_MIN_RADIUS, PLAYER_START};
use crate::entities::{Beam, Bomb, Entity, Explosion, GameState, GameStatus, Player, Rules};
use crate::geometry::{check_bound, fully_inside, Heading, Rect};
use crate::input::{FrameInput, PressedKeys, MOVE_KEYS};
use crate::scene::Scene;

pub const BOMB_PALETTE: [Rgb; 6] = [
    Rgb(255, 0, 0),
    Rgb(255, 255, 0),
    Rgb(0, 255, 255),
    Rgb(0, 0, 255),
    Rgb(255, 0, 255),
    Rgb(255, 255, 255),
];

pub const SCORE_COLOR: Rgb = Rgb::BLACK;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the opening state: player at the start point, `config.bombs`
/// randomly placed bombs, empty beam and explosion lists.
pub fn init_state(config: &GameConfig, assets: &Assets, rng: &mut impl Rng) -> GameState {
    let field = Rect::field(config.width, config.height);
    let bombs = (0..config.bombs)
        .map(|_| spawn_bomb(&field, config.coloring, rng))
        .collect();
    GameState {
        player: Player::new(assets, PLAYER_START),
        bombs,
        beams: Vec::new(),
        explosions: Vec::new(),
        score: 0,
        frame: 0,
        status: GameStatus::Running,
        field,
        rules: Rules {
            invincible_frames: config.invincible_frames,
            beam_mode: config.beam_mode,
        },
    }
}

/// A bomb centred anywhere in the field, radius 10..=50, moving diagonally.
pub fn spawn_bomb(field: &Rect, coloring: BombColoring, rng: &mut impl Rng) -> Bomb {
    let color = match coloring {
        BombColoring::Palette => *BOMB_PALETTE.choose(rng).unwrap_or(&Rgb::WHITE),
        BombColoring::Random => Rgb(rng.gen(), rng.gen(), rng.gen()),
    };
    let radius = rng.gen_range(BOMB_MIN_RADIUS..=BOMB_MAX_RADIUS);
    let direction = (
        *[-1, 1].choose(rng).unwrap_or(&1),
        *[-1, 1].choose(rng).unwrap_or(&1),
    );
    let center = (
        field.left() + rng.gen_range(0..field.w),
        field.top() + rng.gen_range(0..field.h),
    );
    Bomb::new(center, radius, color, direction)
}

// ── Player ───────────────────────────────────────────────────────────────────

/// Apply one frame of directional input.
///
/// Every pressed key moves the player one pixel.  If the result leaves the
/// field on either axis, all of this frame's moves are taken back.  The
/// heading follows the summed key vector even when the move is undone, and
/// is kept as-is when the keys cancel out.
pub fn move_player(player: &Player, keys: &PressedKeys, field: &Rect) -> Player {
    let (dx, dy) = MOVE_KEYS
        .iter()
        .filter(|(key, _)| keys.is_pressed(*key))
        .fold((0, 0), |(x, y), (_, (mx, my))| (x + mx, y + my));

    let mut moved = player.clone();
    if let Some(heading) = Heading::from_vector(dx, dy) {
        moved.heading = heading;
        moved.image = *moved.facing.get(heading);
    }

    let rect = player.rect.translated(dx, dy);
    if fully_inside(field, &rect) {
        moved.rect = rect;
    }
    moved
}

/// Blink while invincible: drawn on even tens of frames only.
pub fn player_visible(frame: u64, invincible_frames: u64) -> bool {
    if frame < invincible_frames {
        (frame / BLINK_FRAMES) % 2 == 0
    } else {
        true
    }
}

pub fn update_player(
    player: &Player,
    keys: &PressedKeys,
    visible: bool,
    field: &Rect,
    scene: &mut Scene,
) -> Player {
    let mut player = move_player(player, keys, field);
    player.visible = visible;
    if visible {
        scene.blit(&player.image, player.rect.topleft());
    }
    player
}

// ── Projectiles & hazards ────────────────────────────────────────────────────

/// Beams launched by this frame's input.
pub fn fire_beams(state: &GameState, input: &FrameInput, assets: &Assets) -> Vec<Beam> {
    let launched = match state.rules.beam_mode {
        BeamMode::Multi => input.fire_presses as usize,
        BeamMode::Single => usize::from(input.keys.fire || input.fire_presses > 0),
    };
    if launched == 0 {
        return state.beams.clone();
    }
    log::debug!(
        "frame {}: fired {} beam(s) heading {:?}",
        state.frame,
        launched,
        state.player.heading
    );

    let beam = Beam::new(&state.player, &assets.beam);
    match state.rules.beam_mode {
        BeamMode::Multi => {
            let mut beams = state.beams.clone();
            beams.extend(std::iter::repeat(beam).take(launched));
            beams
        }
        BeamMode::Single => vec![beam],
    }
}

/// Reflect off any wall the bomb is outside of, then advance one step.
pub fn update_bomb(bomb: &Bomb, field: &Rect, scene: &mut Scene) -> Bomb {
    let (inside_h, inside_v) = check_bound(field, &bomb.rect);
    let vx = if inside_h { bomb.vx } else { -bomb.vx };
    let vy = if inside_v { bomb.vy } else { -bomb.vy };
    let rect = bomb.rect.translated(vx, vy);
    scene.blit(&bomb.image, rect.topleft());
    Bomb {
        rect,
        vx,
        vy,
        ..bomb.clone()
    }
}

/// Advance every beam and drop the ones that left the field.
pub fn update_beams(beams: &[Beam], field: &Rect, scene: &mut Scene) -> Vec<Beam> {
    beams
        .iter()
        .filter_map(|beam| {
            let (dx, dy) = beam.heading.vector();
            let rect = beam.rect.translated(dx, dy);
            scene.blit(&beam.image, rect.topleft());
            fully_inside(field, &rect).then(|| Beam {
                rect,
                ..beam.clone()
            })
        })
        .collect()
}

/// Draw the current frame of each explosion, count down, retire the
/// ones whose life went negative.
pub fn update_explosions(explosions: &[Explosion], scene: &mut Scene) -> Vec<Explosion> {
    explosions
        .iter()
        .filter_map(|explosion| {
            let frame = &explosion.frames[explosion.life.rem_euclid(2) as usize];
            scene.blit(frame, explosion.rect.topleft());
            let life = explosion.life - 1;
            (life >= 0).then(|| Explosion {
                life,
                ..explosion.clone()
            })
        })
        .collect()
}

// ── Collisions ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct HitReport {
    pub bombs: Vec<Bomb>,
    pub beams: Vec<Beam>,
    /// One per destroyed bomb, centred on it.
    pub explosions: Vec<Explosion>,
    pub hits: u32,
}

/// Pair beams with bombs.  Bombs are visited in order; each takes the first
/// beam (in order) that overlaps it and has not been spent on an earlier
/// bomb.  A bomb is destroyed at most once and a beam is spent at most once.
pub fn resolve_hits(bombs: &[Bomb], beams: &[Beam], assets: &Assets) -> HitReport {
    let mut killed_bombs: Vec<usize> = Vec::new();
    let mut used_beams: Vec<usize> = Vec::new();
    let mut explosions = Vec::new();

    for (bi, bomb) in bombs.iter().enumerate() {
        let hit = beams
            .iter()
            .enumerate()
            .find(|(ri, beam)| !used_beams.contains(ri) && beam.rect().intersects(&bomb.rect()));
        if let Some((ri, _)) = hit {
            killed_bombs.push(bi);
            used_beams.push(ri);
            explosions.push(Explosion::new(bomb.rect.center(), &assets.explosion));
        }
    }

    HitReport {
        bombs: bombs
            .iter()
            .enumerate()
            .filter(|(i, _)| !killed_bombs.contains(i))
            .map(|(_, b)| b.clone())
            .collect(),
        beams: beams
            .iter()
            .enumerate()
            .filter(|(i, _)| !used_beams.contains(i))
            .map(|(_, b)| b.clone())
            .collect(),
        explosions,
        hits: killed_bombs.len() as u32,
    }
}

/// First bomb overlapping the player, if any.
pub fn player_hit(player: &Player, bombs: &[Bomb]) -> Option<usize> {
    bombs
        .iter()
        .position(|bomb| player.rect().intersects(&bomb.rect()))
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    Continue,
    /// Quit signal received; nothing was simulated or drawn.
    Quit,
    /// The player touched a bomb; the scene holds the defeat frame.
    Defeated,
}

#[derive(Clone, Debug)]
pub struct Frame {
    pub state: GameState,
    pub scene: Scene,
    pub outcome: FrameOutcome,
}

/// Advance the simulation by one frame.
pub fn tick(state: &GameState, input: &FrameInput, assets: &Assets) -> Frame {
    if input.quit {
        return Frame {
            state: state.clone(),
            scene: Scene::new(),
            outcome: FrameOutcome::Quit,
        };
    }
    if state.status == GameStatus::GameOver {
        return Frame {
            state: state.clone(),
            scene: Scene::new(),
            outcome: FrameOutcome::Defeated,
        };
    }

    // ── 1. Fire ──────────────────────────────────────────────────────────────
    let beams = if state.status == GameStatus::Running {
        fire_beams(state, input, assets)
    } else {
        state.beams.clone()
    };

    let frame = state.frame + 1;
    let mut scene = Scene::new();
    scene.blit(&assets.background, (0, 0));
    let mut player = state.player.clone();

    // ── 2. Player ↔ bombs ────────────────────────────────────────────────────
    if frame > state.rules.invincible_frames {
        if let Some(i) = player_hit(&player, &state.bombs) {
            log::info!(
                "frame {}: kokaton hit bomb #{} at {:?}, final score {}",
                frame,
                i,
                state.bombs[i].rect.center(),
                state.score
            );
            player.set_image(&assets.defeat);
            player.alive = false;
            scene.blit(&player.image, player.rect.topleft());
            return Frame {
                state: GameState {
                    player,
                    beams,
                    frame,
                    status: GameStatus::GameOver,
                    ..state.clone()
                },
                scene,
                outcome: FrameOutcome::Defeated,
            };
        }
    }

    // ── 3. Victory pose ──────────────────────────────────────────────────────
    if state.bombs.is_empty() {
        if state.status == GameStatus::Running {
            log::info!("frame {}: all bombs cleared, score {}", frame, state.score);
        }
        player.set_image(&assets.victory);
        scene.blit(&player.image, player.rect.topleft());
        return Frame {
            state: GameState {
                player,
                beams,
                frame,
                status: GameStatus::Victory,
                ..state.clone()
            },
            scene,
            outcome: FrameOutcome::Continue,
        };
    }

    // ── 4. Beams ↔ bombs ─────────────────────────────────────────────────────
    let hits = resolve_hits(&state.bombs, &beams, assets);
    if hits.hits > 0 {
        log::debug!(
            "frame {}: {} bomb(s) destroyed, score {}",
            frame,
            hits.hits,
            state.score + hits.hits
        );
    }
    let mut explosions = state.explosions.clone();
    explosions.extend(hits.explosions);

    // ── 5. Move & draw ───────────────────────────────────────────────────────
    let visible = player_visible(frame, state.rules.invincible_frames);
    let player = update_player(&player, &input.keys, visible, &state.field, &mut scene);
    let bombs = hits
        .bombs
        .iter()
        .map(|bomb| update_bomb(bomb, &state.field, &mut scene))
        .collect();
    let explosions = update_explosions(&explosions, &mut scene);
    let beams = update_beams(&hits.beams, &state.field, &mut scene);

    let score = state.score + hits.hits;
    scene.text(format!("Score: {}", score), SCORE_COLOR, (0, 0));

    Frame {
        state: GameState {
            player,
            bombs,
            beams,
            explosions,
            score,
            frame,
            ..state.clone()
        },
        scene,
        outcome: FrameOutcome::Continue,
    }
}
