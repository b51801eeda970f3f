use std::collections::BTreeSet;
use std::fmt;
use std::num::IntErrorKind;
use std::str::FromStr;
use std::time::{Duration, Instant};

use crate::error::HighlightError;

/// Cells per grid row and column.
pub const GRID_SIDE: u8 = 10;

/// A number that names one grid cell, always within `1..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellNumber(u8);

impl CellNumber {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = GRID_SIDE * GRID_SIDE;
    pub const FIRST: CellNumber = CellNumber(Self::MIN);

    pub fn new(value: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Zero-based `(row, column)` in the row-major grid.
    pub fn position(self) -> (u8, u8) {
        let index = self.0 - 1;
        (index / GRID_SIDE, index % GRID_SIDE)
    }

    pub fn from_position(row: u8, col: u8) -> Option<Self> {
        if row >= GRID_SIDE || col >= GRID_SIDE {
            return None;
        }
        Self::new(row * GRID_SIDE + col + 1)
    }

    pub fn all() -> impl Iterator<Item = CellNumber> {
        (Self::MIN..=Self::MAX).map(CellNumber)
    }
}

impl fmt::Display for CellNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for CellNumber {
    type Error = HighlightError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .ok()
            .and_then(CellNumber::new)
            .ok_or(HighlightError::OutOfRange)
    }
}

/// Parses user input. Surrounding whitespace is ignored; anything else
/// that is not a plain integer is rejected.
impl FromStr for CellNumber {
    type Err = HighlightError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(HighlightError::EmptyInput);
        }
        match trimmed.parse::<i64>() {
            Ok(value) => Self::try_from(value),
            Err(e) => match e.kind() {
                IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
                    Err(HighlightError::OutOfRange)
                }
                _ => Err(HighlightError::InvalidNumber),
            },
        }
    }
}

/// The set of currently highlighted numbers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighlightSet {
    set: BTreeSet<CellNumber>,
}

impl HighlightSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, number: CellNumber) -> bool {
        self.set.contains(&number)
    }

    pub fn len(&self) -> usize {
        self.set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.set.len() == CellNumber::MAX as usize
    }

    /// Ascending.
    pub fn iter(&self) -> impl Iterator<Item = CellNumber> + '_ {
        self.set.iter().copied()
    }

    /// Numbers not yet highlighted, ascending.
    pub fn free(&self) -> impl Iterator<Item = CellNumber> + '_ {
        CellNumber::all().filter(|n| !self.set.contains(n))
    }

    pub(crate) fn insert(&mut self, number: CellNumber) -> bool {
        self.set.insert(number)
    }

    /// Returns the membership after the flip.
    pub(crate) fn toggle(&mut self, number: CellNumber) -> bool {
        if self.set.remove(&number) {
            false
        } else {
            self.set.insert(number);
            true
        }
    }

    pub(crate) fn clear(&mut self) {
        self.set.clear();
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorBanner {
    pub message: String,
    pub raised_at: Instant,
}

impl ErrorBanner {
    pub fn new(message: impl Into<String>, raised_at: Instant) -> Self {
        Self {
            message: message.into(),
            raised_at,
        }
    }

    pub fn is_expired(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.raised_at) >= ttl
    }
}

/// Brief emphasis of a randomly picked cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flash {
    pub cell: CellNumber,
    pub started_at: Instant,
}

impl Flash {
    pub fn is_over(&self, now: Instant, duration: Duration) -> bool {
        now.saturating_duration_since(self.started_at) >= duration
    }
}

/// What subscribers of the controller observe after every change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridSnapshot {
    pub highlighted: HighlightSet,
    pub banner: Option<String>,
    pub flashing: Option<CellNumber>,
}

impl GridSnapshot {
    pub fn count(&self) -> usize {
        self.highlighted.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusArea {
    Grid,
    Input,
    Buttons,
}

impl FocusArea {
    pub fn next(self) -> Self {
        match self {
            FocusArea::Grid => FocusArea::Input,
            FocusArea::Input => FocusArea::Buttons,
            FocusArea::Buttons => FocusArea::Grid,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            FocusArea::Grid => FocusArea::Buttons,
            FocusArea::Input => FocusArea::Grid,
            FocusArea::Buttons => FocusArea::Input,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonKind {
    Highlight,
    Random,
    ClearAll,
}

impl ButtonKind {
    pub const ALL: [ButtonKind; 3] = [ButtonKind::Highlight, ButtonKind::Random, ButtonKind::ClearAll];

    pub fn label(self) -> &'static str {
        match self {
            ButtonKind::Highlight => "Highlight Entered Number",
            ButtonKind::Random => "Light up Random Number",
            ButtonKind::ClearAll => "Clear All",
        }
    }

    pub fn index(self) -> usize {
        match self {
            ButtonKind::Highlight => 0,
            ButtonKind::Random => 1,
            ButtonKind::ClearAll => 2,
        }
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}
