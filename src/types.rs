//! Core types for spark-gui.
//!
//! Geometry primitives used by every layer (positions, sizes, clip rects) and
//! the cell/color/attribute values the renderer understands.

use std::fmt;
use std::ops::{Add, Sub};

// =============================================================================
// Position
// =============================================================================

/// A column/row coordinate.
///
/// Positions are relative to whatever origin the caller is working in: the
/// parent's content origin for a component's own position, the pane origin
/// for `to_base_pane`, the screen origin for `to_global`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Position {
    pub column: i32,
    pub row: i32,
}

impl Position {
    /// The top-left corner, (0, 0).
    pub const ORIGIN: Self = Self { column: 0, row: 0 };

    /// Create a new position.
    pub const fn new(column: i32, row: i32) -> Self {
        Self { column, row }
    }

    /// Copy of this position shifted by the given deltas, saturating at the
    /// `i32` bounds.
    pub const fn with_relative(self, columns: i32, rows: i32) -> Self {
        Self {
            column: self.column.saturating_add(columns),
            row: self.row.saturating_add(rows),
        }
    }
}

impl Add for Position {
    type Output = Position;

    fn add(self, rhs: Position) -> Position {
        self.with_relative(rhs.column, rhs.row)
    }
}

impl Sub for Position {
    type Output = Position;

    fn sub(self, rhs: Position) -> Position {
        Position::new(
            self.column.saturating_sub(rhs.column),
            self.row.saturating_sub(rhs.row),
        )
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.column, self.row)
    }
}

// =============================================================================
// Size
// =============================================================================

/// A width/height in terminal cells. Never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    pub columns: u16,
    pub rows: u16,
}

impl Size {
    /// Zero columns, zero rows.
    pub const ZERO: Self = Self { columns: 0, rows: 0 };

    /// Create a new size.
    pub const fn new(columns: u16, rows: u16) -> Self {
        Self { columns, rows }
    }

    /// Component-wise maximum.
    pub fn max(self, other: Size) -> Size {
        Size::new(self.columns.max(other.columns), self.rows.max(other.rows))
    }

    /// Component-wise minimum.
    pub fn min(self, other: Size) -> Size {
        Size::new(self.columns.min(other.columns), self.rows.min(other.rows))
    }

    /// Component-wise subtraction, clamped at zero.
    pub fn saturating_sub(self, other: Size) -> Size {
        Size::new(
            self.columns.saturating_sub(other.columns),
            self.rows.saturating_sub(other.rows),
        )
    }

    /// Component-wise addition, saturating at `u16::MAX`.
    pub fn saturating_add(self, other: Size) -> Size {
        Size::new(
            self.columns.saturating_add(other.columns),
            self.rows.saturating_add(other.rows),
        )
    }

    /// True if either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.columns == 0 || self.rows == 0
    }

    /// True if `position` (relative to the same origin) falls inside this size.
    pub fn contains(&self, position: Position) -> bool {
        position.column >= 0
            && position.row >= 0
            && position.column < self.columns as i32
            && position.row < self.rows as i32
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.columns, self.rows)
    }
}

// =============================================================================
// Color
// =============================================================================

/// RGBA color with 8-bit channels.
///
/// Special values: r=-1 means "terminal default", r=-2 marks an ANSI palette
/// color whose index is stored in `g`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgba {
    pub r: i16,
    pub g: i16,
    pub b: i16,
    pub a: i16,
}

impl Rgba {
    /// Create a new RGBA color.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as i16,
            g: g as i16,
            b: b as i16,
            a: a as i16,
        }
    }

    /// Create an opaque RGB color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Create an opaque color from `0xRRGGBB`.
    pub const fn from_rgb_int(rgb: u32) -> Self {
        Self::rgb(
            ((rgb >> 16) & 0xff) as u8,
            ((rgb >> 8) & 0xff) as u8,
            (rgb & 0xff) as u8,
        )
    }

    /// Terminal default color (let terminal decide).
    pub const TERMINAL_DEFAULT: Self = Self {
        r: -1,
        g: -1,
        b: -1,
        a: -1,
    };

    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const RED: Self = Self::rgb(255, 0, 0);

    /// Create an ANSI palette color (0-255).
    pub const fn ansi(index: u8) -> Self {
        Self {
            r: -2,
            g: index as i16,
            b: 0,
            a: 255,
        }
    }

    #[inline]
    pub const fn is_terminal_default(&self) -> bool {
        self.r == -1
    }

    #[inline]
    pub const fn is_ansi(&self) -> bool {
        self.r == -2
    }

    /// Get ANSI palette index (only meaningful if `is_ansi()`).
    #[inline]
    pub const fn ansi_index(&self) -> u8 {
        self.g as u8
    }
}

// =============================================================================
// Cell Attributes (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Text attributes as a bitfield.
    ///
    /// Combine with bitwise OR: `Attr::BOLD | Attr::REVERSE`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Attr: u8 {
        const NONE = 0;
        const BOLD = 1 << 0;
        const DIM = 1 << 1;
        const ITALIC = 1 << 2;
        const UNDERLINE = 1 << 3;
        const BLINK = 1 << 4;
        const REVERSE = 1 << 5;
        const STRIKETHROUGH = 1 << 6;
    }
}

// =============================================================================
// Cell
// =============================================================================

/// A single terminal cell: the unit the core writes to the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub char: char,
    pub fg: Rgba,
    pub bg: Rgba,
    pub attrs: Attr,
}

impl Cell {
    /// A cell holding `char` with terminal-default colors.
    pub const fn plain(char: char) -> Self {
        Self {
            char,
            fg: Rgba::TERMINAL_DEFAULT,
            bg: Rgba::TERMINAL_DEFAULT,
            attrs: Attr::NONE,
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::plain(' ')
    }
}

// =============================================================================
// ClipRect
// =============================================================================

/// A clipping rectangle in frame-buffer coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipRect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl ClipRect {
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self { x, y, width, height }
    }

    /// Check if a point is inside this rect.
    #[inline]
    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x
            && (x as u32) < self.x as u32 + self.width as u32
            && y >= self.y
            && (y as u32) < self.y as u32 + self.height as u32
    }

    /// Compute intersection of two rects.
    pub fn intersect(&self, other: &ClipRect) -> Option<ClipRect> {
        let x1 = self.x.max(other.x) as u32;
        let y1 = self.y.max(other.y) as u32;
        let x2 = (self.x as u32 + self.width as u32).min(other.x as u32 + other.width as u32);
        let y2 = (self.y as u32 + self.height as u32).min(other.y as u32 + other.height as u32);

        if x2 > x1 && y2 > y1 {
            Some(ClipRect {
                x: x1 as u16,
                y: y1 as u16,
                width: (x2 - x1) as u16,
                height: (y2 - y1) as u16,
            })
        } else {
            None
        }
    }

    /// Clip a rectangle given in signed coordinates against `u16` space.
    ///
    /// Returns `None` when nothing of it is on-screen.
    pub fn from_signed(origin: Position, size: Size) -> Option<ClipRect> {
        let x1 = origin.column.max(0) as i64;
        let y1 = origin.row.max(0) as i64;
        let x2 = (origin.column as i64 + size.columns as i64).min(u16::MAX as i64);
        let y2 = (origin.row as i64 + size.rows as i64).min(u16::MAX as i64);
        if x2 > x1 && y2 > y1 {
            Some(ClipRect::new(
                x1 as u16,
                y1 as u16,
                (x2 - x1) as u16,
                (y2 - y1) as u16,
            ))
        } else {
            None
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
