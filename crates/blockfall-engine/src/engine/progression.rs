/// Points awarded for every locked piece.
pub const PLACEMENT_POINTS: usize = 25;

/// Drop speed at the start of a game, in ticks per automatic drop.
pub const INITIAL_SPEED: usize = 20;

/// The fastest drop speed a game can reach.
pub const MIN_SPEED: usize = 10;

/// Every this many locked pieces the drop speed goes up by one step.
const PIECES_PER_SPEEDUP: usize = 50;

const POINTS_PER_LEVEL: usize = 1000;

/// Returns the bonus for completing `rows` rows with one lock.
///
/// The bonus doubles with every extra row: `2^rows * 100`, and nothing for
/// zero rows.
///
/// ```
/// use blockfall_engine::engine::line_clear_bonus;
///
/// assert_eq!(line_clear_bonus(0), 0);
/// assert_eq!(line_clear_bonus(1), 200);
/// assert_eq!(line_clear_bonus(4), 1600);
/// ```
#[must_use]
pub const fn line_clear_bonus(rows: usize) -> usize {
    if rows == 0 { 0 } else { (1 << rows) * 100 }
}

/// Score, level and drop speed of a game.
///
/// - **Score**: 25 points per lock plus [`line_clear_bonus`]
/// - **Level**: starts at 1 and goes up once the score crosses each multiple of 1000
/// - **Speed**: ticks per automatic drop, starts at 20 and only ever decreases,
///   never below 10
///
/// # Example
///
/// ```
/// use blockfall_engine::Progression;
///
/// let mut progression = Progression::new();
/// progression.complete_lock(2);
///
/// assert_eq!(progression.score(), 425);
/// assert_eq!(progression.level(), 1);
/// assert_eq!(progression.placed_pieces(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progression {
    score: usize,
    level: usize,
    speed: usize,
    placed_pieces: usize,
}

impl Default for Progression {
    fn default() -> Self {
        Self::new()
    }
}

impl Progression {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            level: 1,
            speed: INITIAL_SPEED,
            placed_pieces: 0,
        }
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub const fn level(&self) -> usize {
        self.level
    }

    /// Returns the number of ticks between automatic drops.
    #[must_use]
    pub const fn speed(&self) -> usize {
        self.speed
    }

    #[must_use]
    pub const fn placed_pieces(&self) -> usize {
        self.placed_pieces
    }

    /// Updates score, level and speed after a piece is locked.
    ///
    /// Returns the points awarded.
    pub fn complete_lock(&mut self, completed_rows: usize) -> usize {
        let points = PLACEMENT_POINTS + line_clear_bonus(completed_rows);
        self.score += points;

        self.placed_pieces += 1;
        if self.placed_pieces % PIECES_PER_SPEEDUP == 0 {
            self.speed_up(1);
        }
        if self.score / POINTS_PER_LEVEL > self.level - 1 {
            self.level += 1;
            self.speed_up(2);
        }
        points
    }

    /// Puts the score back to an earlier value (used by undo).
    ///
    /// Level, speed and the piece count are left alone.
    pub(crate) fn restore_score(&mut self, score: usize) {
        self.score = score;
    }

    fn speed_up(&mut self, steps: usize) {
        self.speed = self.speed.saturating_sub(steps).max(MIN_SPEED);
    }
}
