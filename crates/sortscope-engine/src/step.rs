//! Step vocabulary shared by every generator: direction, highlights, step results.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::sequence::Value;

/// Sort order for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Direction {
    #[default]
    Ascending,
    Descending,
}

impl Direction {
    /// Whether `left` must move past `right` for this order.
    ///
    /// Ascending uses `>`, descending uses `<`; equal values never move.
    #[inline]
    pub fn out_of_order(self, left: Value, right: Value) -> bool {
        match self {
            Direction::Ascending => left > right,
            Direction::Descending => left < right,
        }
    }

    /// Check that a slice is ordered for this direction.
    pub fn is_sorted(self, values: &[Value]) -> bool {
        values.windows(2).all(|w| !self.out_of_order(w[0], w[1]))
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Direction::Ascending => "Ascending",
            Direction::Descending => "Descending",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" | "a" => Ok(Direction::Ascending),
            "desc" | "descending" | "d" => Ok(Direction::Descending),
            other => Err(Error::Configuration(format!("unknown direction: {other}"))),
        }
    }
}

/// How a highlighted bar should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Marker {
    Primary,
    Secondary,
}

/// Indices touched by the most recent step (at most two).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Highlight {
    entries: [Option<(usize, Marker)>; 2],
}

impl Highlight {
    /// No highlighted bars.
    pub const NONE: Self = Self { entries: [None, None] };

    /// Mark `primary` and `secondary`. If both name the same index the
    /// secondary marker wins.
    pub fn pair(primary: usize, secondary: usize) -> Self {
        if primary == secondary {
            Self {
                entries: [Some((secondary, Marker::Secondary)), None],
            }
        } else {
            Self {
                entries: [
                    Some((primary, Marker::Primary)),
                    Some((secondary, Marker::Secondary)),
                ],
            }
        }
    }

    /// Marker for an index, if highlighted.
    pub fn marker(&self, index: usize) -> Option<Marker> {
        self.iter().find(|&(i, _)| i == index).map(|(_, m)| m)
    }

    /// Whether the index is highlighted at all.
    pub fn contains(&self, index: usize) -> bool {
        self.marker(index).is_some()
    }

    /// Iterate highlighted `(index, marker)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, Marker)> + '_ {
        self.entries.iter().flatten().copied()
    }

    /// Number of highlighted indices.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.entries[0].is_none() && self.entries[1].is_none()
    }
}

/// Outcome of a single `advance()` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// One visible mutation was made; more may follow.
    Continue(Highlight),
    /// The sequence is ordered; the generator must not be advanced again.
    Finished,
}

impl Step {
    pub fn is_finished(&self) -> bool {
        matches!(self, Step::Finished)
    }
}
