/// Integer pixel geometry: rectangles, the eight headings, and the field
/// bounds check every moving entity relies on.
///
/// Screen coordinates: x grows rightward, y grows downward.

// ── Rect ──────────────────────────────────────────────────────────────────────

/// Axis-aligned box in pixels.  `x`/`y` is the top-left corner; `right` and
/// `bottom` are exclusive edges (`x + w`, `y + h`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// The play field: origin at (0, 0).
    pub fn field(width: i32, height: i32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Box of size `w`×`h` whose centre lands on `(cx, cy)`.
    pub fn from_center(cx: i32, cy: i32, w: i32, h: i32) -> Self {
        Self::new(cx - w / 2, cy - h / 2, w, h)
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn centerx(&self) -> i32 {
        self.x + self.w / 2
    }

    pub fn centery(&self) -> i32 {
        self.y + self.h / 2
    }

    pub fn center(&self) -> (i32, i32) {
        (self.centerx(), self.centery())
    }

    pub fn topleft(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    /// Same size, shifted by `(dx, dy)`.
    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Same size, re-centred on `(cx, cy)`.
    pub fn with_center(&self, cx: i32, cy: i32) -> Self {
        Self::from_center(cx, cy, self.w, self.h)
    }

    /// Strict overlap test.  Boxes that only share an edge do not
    /// intersect, and an empty box intersects nothing.
    pub fn intersects(&self, other: &Rect) -> bool {
        if self.w <= 0 || self.h <= 0 || other.w <= 0 || other.h <= 0 {
            return false;
        }
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

// ── Bounds check ──────────────────────────────────────────────────────────────

/// Reports, per axis, whether `obj` lies fully inside `area`.
///
/// Returns `(inside_horizontal, inside_vertical)`.
pub fn check_bound(area: &Rect, obj: &Rect) -> (bool, bool) {
    let horizontal = !(obj.left() < area.left() || area.right() < obj.right());
    let vertical = !(obj.top() < area.top() || area.bottom() < obj.bottom());
    (horizontal, vertical)
}

/// Both axes inside.
pub fn fully_inside(area: &Rect, obj: &Rect) -> bool {
    check_bound(area, obj) == (true, true)
}

// ── Heading ───────────────────────────────────────────────────────────────────

/// One of the eight discrete directions used for facing, movement and
/// beam travel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Heading {
    Left,
    UpLeft,
    DownLeft,
    Up,
    Down,
    Right,
    UpRight,
    DownRight,
}

impl Heading {
    pub const ALL: [Heading; 8] = [
        Heading::Left,
        Heading::UpLeft,
        Heading::DownLeft,
        Heading::Up,
        Heading::Down,
        Heading::Right,
        Heading::UpRight,
        Heading::DownRight,
    ];

    /// Unit step `(dx, dy)`; up is negative y.
    pub fn vector(self) -> (i32, i32) {
        match self {
            Heading::Left => (-1, 0),
            Heading::UpLeft => (-1, -1),
            Heading::DownLeft => (-1, 1),
            Heading::Up => (0, -1),
            Heading::Down => (0, 1),
            Heading::Right => (1, 0),
            Heading::UpRight => (1, -1),
            Heading::DownRight => (1, 1),
        }
    }

    /// Inverse of [`Heading::vector`].  `None` for the zero vector and for
    /// anything outside the 3×3 unit grid.
    pub fn from_vector(dx: i32, dy: i32) -> Option<Heading> {
        Heading::ALL.into_iter().find(|h| h.vector() == (dx, dy))
    }

    /// Position in [`Heading::ALL`], for table lookups.
    pub fn index(self) -> usize {
        self as usize
    }

    /// `atan2(-dy, dx)` in degrees: counter-clockwise from +x with screen
    /// y flipped, so `Up` is 90°.  Tabulated to keep the values exact.
    pub fn angle_degrees(self) -> f32 {
        match self {
            Heading::Right => 0.0,
            Heading::UpRight => 45.0,
            Heading::Up => 90.0,
            Heading::UpLeft => 135.0,
            Heading::Left => 180.0,
            Heading::DownLeft => -135.0,
            Heading::Down => -90.0,
            Heading::DownRight => -45.0,
        }
    }

    /// The point on `rect`'s outline this heading points at: an edge
    /// midpoint for the axis headings, a corner for the diagonals.
    pub fn anchor(self, rect: &Rect) -> (i32, i32) {
        let (dx, dy) = self.vector();
        let x = match dx {
            -1 => rect.left(),
            0 => rect.centerx(),
            _ => rect.right(),
        };
        let y = match dy {
            -1 => rect.top(),
            0 => rect.centery(),
            _ => rect.bottom(),
        };
        (x, y)
    }
}
