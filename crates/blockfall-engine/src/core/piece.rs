use rand::{Rng, distr::StandardUniform, prelude::Distribution};

use super::{PIECE_SPAWN_X, PIECE_SPAWN_Y};

/// A falling piece: its kind, rotation counter and the board position of the
/// top-left corner of its 4×4 bounding box.
///
/// Pieces are immutable values; movement and rotation return new `Piece`s,
/// and whether the result fits is decided by [`fits`](super::collision::fits).
///
/// # Example
///
/// ```
/// use blockfall_engine::{Piece, PieceKind};
///
/// let piece = Piece::new(PieceKind::I);
/// assert_eq!((piece.x(), piece.y()), (10, 0));
///
/// let moved = piece.shifted(-1, 1).rotated();
/// assert_eq!((moved.x(), moved.y()), (9, 1));
/// assert_eq!(moved.rotation().quadrant(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    kind: PieceKind,
    rotation: PieceRotation,
    x: i32,
    y: i32,
}

impl Piece {
    /// Creates a piece of the given kind at the spawn position with rotation 0.
    #[must_use]
    pub const fn new(kind: PieceKind) -> Self {
        Self::at(kind, PieceRotation::SPAWN, PIECE_SPAWN_X, PIECE_SPAWN_Y)
    }

    #[must_use]
    pub const fn at(kind: PieceKind, rotation: PieceRotation, x: i32, y: i32) -> Self {
        Self {
            kind,
            rotation,
            x,
            y,
        }
    }

    #[must_use]
    pub const fn kind(self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub const fn rotation(self) -> PieceRotation {
        self.rotation
    }

    #[must_use]
    pub const fn x(self) -> i32 {
        self.x
    }

    #[must_use]
    pub const fn y(self) -> i32 {
        self.y
    }

    #[must_use]
    pub const fn shifted(self, dx: i32, dy: i32) -> Self {
        Self::at(self.kind, self.rotation, self.x + dx, self.y + dy)
    }

    #[must_use]
    pub const fn rotated(self) -> Self {
        Self::at(self.kind, self.rotation.rotated(), self.x, self.y)
    }

    #[must_use]
    pub const fn with_kind(self, kind: PieceKind) -> Self {
        Self::at(kind, self.rotation, self.x, self.y)
    }

    /// Moves the piece back to the spawn position, keeping kind and rotation.
    #[must_use]
    pub const fn at_spawn(self) -> Self {
        Self::at(self.kind, self.rotation, PIECE_SPAWN_X, PIECE_SPAWN_Y)
    }

    /// Returns whether the rotated shape is solid at a local offset of the bounding box.
    #[must_use]
    pub fn is_solid_at(self, local_x: u8, local_y: u8) -> bool {
        let index = rotated_index(usize::from(local_x), usize::from(local_y), self.rotation);
        self.kind.shape()[index]
    }

    /// Returns the board positions of the solid cells of this piece.
    ///
    /// Positions may lie outside the board; callers decide how to treat those.
    pub fn occupied_positions(self) -> impl Iterator<Item = (i32, i32)> {
        local_offsets()
            .filter(move |&(lx, ly)| self.is_solid_at(lx, ly))
            .map(move |(lx, ly)| (self.x + i32::from(lx), self.y + i32::from(ly)))
    }
}

/// Iterates over the 16 local offsets `(x, y)` of a 4×4 bounding box.
pub(crate) fn local_offsets() -> impl Iterator<Item = (u8, u8)> {
    (0..4).flat_map(|ly| (0..4).map(move |lx| (lx, ly)))
}

/// Rotation counter of a piece.
///
/// The counter only ever grows and is read modulo 4:
///
/// - `0`: 0° (spawn orientation)
/// - `1`: 90°
/// - `2`: 180°
/// - `3`: 270°
///
/// Wrapping at `u32::MAX` keeps the quadrant sequence intact because 2³² is a
/// multiple of 4.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PieceRotation(u32);

impl PieceRotation {
    pub const SPAWN: Self = Self(0);

    #[must_use]
    pub const fn new(count: u32) -> Self {
        Self(count)
    }

    #[must_use]
    pub const fn count(self) -> u32 {
        self.0
    }

    #[must_use]
    pub const fn quadrant(self) -> u32 {
        self.0 % 4
    }

    #[must_use]
    pub const fn rotated(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// Maps a local offset of the rotated bounding box to an index into the
/// shape's row-major 16-cell pattern.
///
/// Each quadrant has its own closed form. They are not all true matrix
/// rotations of the pattern, and the piece shapes are laid out against
/// exactly these formulas.
///
/// # Example
///
/// ```
/// use blockfall_engine::{PieceRotation, rotated_index};
///
/// assert_eq!(rotated_index(1, 2, PieceRotation::new(0)), 9);
/// assert_eq!(rotated_index(1, 2, PieceRotation::new(1)), 10);
/// assert_eq!(rotated_index(1, 2, PieceRotation::new(2)), 6);
/// assert_eq!(rotated_index(1, 2, PieceRotation::new(3)), 5);
/// ```
#[must_use]
pub const fn rotated_index(local_x: usize, local_y: usize, rotation: PieceRotation) -> usize {
    debug_assert!(local_x < 4 && local_y < 4);
    match rotation.quadrant() {
        0 => local_y * 4 + local_x,
        1 => 12 + local_y - local_x * 4,
        2 => 15 - local_y * 4 - local_x,
        _ => 3 + local_x * 4 - local_y,
    }
}

/// Enum representing the type of piece.
///
/// The discriminant is the piece's index in the shape table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece.
    I = 0,
    /// T-piece.
    T = 1,
    /// O-piece.
    O = 2,
    /// Z-piece.
    Z = 3,
    /// S-piece.
    S = 4,
    /// L-piece.
    L = 5,
    /// J-piece.
    J = 6,
}

impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        PieceKind::ALL[rng.random_range(0..PieceKind::LEN)]
    }
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    pub const ALL: [Self; Self::LEN] = [
        PieceKind::I,
        PieceKind::T,
        PieceKind::O,
        PieceKind::Z,
        PieceKind::S,
        PieceKind::L,
        PieceKind::J,
    ];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the unrotated 4×4 occupancy pattern of this piece, row-major.
    #[must_use]
    pub const fn shape(self) -> &'static PieceShape {
        &PIECE_SHAPES[self as usize]
    }
}

/// Occupancy pattern of a piece within its 4×4 bounding box, row-major.
pub type PieceShape = [bool; 16];

const PIECE_SHAPES: [PieceShape; PieceKind::LEN] = {
    const fn p(pattern: &[u8; 16]) -> PieceShape {
        let mut shape = [false; 16];
        let mut i = 0;
        while i < 16 {
            shape[i] = pattern[i] == b'X';
            i += 1;
        }
        shape
    }

    [
        p(b"..X...X...X...X."), // I
        p(b"..X..XX...X....."), // T
        p(b".....XX..XX....."), // O
        p(b"..X..XX..X......"), // Z
        p(b".X...XX...X....."), // S
        p(b".X...X...XX....."), // L
        p(b"..X...X..XX....."), // J
    ]
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotated_index_in_range() {
        for count in 0..8 {
            let rotation = PieceRotation::new(count);
            for ly in 0..4 {
                for lx in 0..4 {
                    let index = rotated_index(lx, ly, rotation);
                    assert!(index < 16, "index {index} out of range for ({lx}, {ly}, {count})");
                }
            }
        }
    }

    #[test]
    fn test_rotated_index_is_permutation() {
        for count in 0..4 {
            let rotation = PieceRotation::new(count);
            let mut seen = [false; 16];
            for (lx, ly) in local_offsets() {
                let index = rotated_index(usize::from(lx), usize::from(ly), rotation);
                assert!(!seen[index], "index {index} mapped twice in quadrant {count}");
                seen[index] = true;
            }
        }
    }

    #[test]
    fn test_rotated_index_quadrant_formulas() {
        assert_eq!(rotated_index(0, 0, PieceRotation::new(0)), 0);
        assert_eq!(rotated_index(3, 3, PieceRotation::new(0)), 15);
        assert_eq!(rotated_index(0, 0, PieceRotation::new(1)), 12);
        assert_eq!(rotated_index(3, 0, PieceRotation::new(1)), 0);
        assert_eq!(rotated_index(0, 0, PieceRotation::new(2)), 15);
        assert_eq!(rotated_index(3, 3, PieceRotation::new(2)), 0);
        assert_eq!(rotated_index(0, 0, PieceRotation::new(3)), 3);
        assert_eq!(rotated_index(3, 0, PieceRotation::new(3)), 15);
    }

    #[test]
    fn test_rotation_counter_read_mod_4() {
        assert_eq!(PieceRotation::new(4).quadrant(), 0);
        assert_eq!(PieceRotation::new(7).quadrant(), 3);
        assert_eq!(
            rotated_index(2, 1, PieceRotation::new(5)),
            rotated_index(2, 1, PieceRotation::new(1))
        );

        let last = PieceRotation::new(u32::MAX);
        assert_eq!(last.quadrant(), 3);
        assert_eq!(last.rotated().quadrant(), 0);
    }

    #[test]
    fn test_every_shape_has_four_cells_in_every_rotation() {
        for kind in PieceKind::ALL {
            let mut piece = Piece::new(kind);
            for _ in 0..4 {
                assert_eq!(piece.occupied_positions().count(), 4, "{kind:?}");
                piece = piece.rotated();
            }
        }
    }

    #[test]
    fn test_i_piece_positions() {
        let piece = Piece::new(PieceKind::I);
        let vertical: Vec<_> = piece.occupied_positions().collect();
        assert_eq!(vertical, [(12, 0), (12, 1), (12, 2), (12, 3)]);

        let horizontal: Vec<_> = piece.rotated().occupied_positions().collect();
        assert_eq!(horizontal, [(10, 2), (11, 2), (12, 2), (13, 2)]);
    }

    #[test]
    fn test_spawn_and_respawn() {
        let piece = Piece::new(PieceKind::T);
        assert_eq!((piece.x(), piece.y()), (PIECE_SPAWN_X, PIECE_SPAWN_Y));
        assert_eq!(piece.rotation(), PieceRotation::SPAWN);

        let moved = piece.shifted(3, 7).rotated();
        let respawned = moved.at_spawn();
        assert_eq!((respawned.x(), respawned.y()), (PIECE_SPAWN_X, PIECE_SPAWN_Y));
        assert_eq!(respawned.rotation(), moved.rotation());
        assert_eq!(respawned.kind(), PieceKind::T);
    }

    #[test]
    fn test_piece_kind_index_conversion() {
        for (i, kind) in PieceKind::ALL.into_iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }
}
