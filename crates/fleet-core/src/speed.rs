//! Robot speed modes.
//!
//! A robot throttles itself near obstacles.  The mode is derived every
//! movement step from the Euclidean distance to the nearest obstacle inside a
//! small window around the robot; see [`SpeedMode::from_clearance`].

/// Radius (in cells) of the square window scanned for obstacles.
pub const CLEARANCE_WINDOW: i32 = 2;

/// How many ticks elapse between a robot's path-consuming steps.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SpeedMode {
    /// Obstacle within one cell: move once every 3 ticks.
    Cautious,
    /// Obstacle within three cells: move once every 2 ticks.
    Normal,
    /// Open ground: move every tick.
    #[default]
    Fast,
}

impl SpeedMode {
    /// Classify a clearance distance.  `None` means no obstacle in the window.
    pub fn from_clearance(distance: Option<f64>) -> Self {
        match distance {
            Some(d) if d <= 1.0 => SpeedMode::Cautious,
            Some(d) if d <= 3.0 => SpeedMode::Normal,
            _ => SpeedMode::Fast,
        }
    }

    /// Ticks that must accumulate before one cell of path is consumed.
    #[inline]
    pub fn ticks_per_move(self) -> u32 {
        match self {
            SpeedMode::Cautious => 3,
            SpeedMode::Normal   => 2,
            SpeedMode::Fast     => 1,
        }
    }

    /// Human-readable label, useful for CSV column values.
    pub fn as_str(self) -> &'static str {
        match self {
            SpeedMode::Cautious => "cautious",
            SpeedMode::Normal   => "normal",
            SpeedMode::Fast     => "fast",
        }
    }
}

impl std::fmt::Display for SpeedMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
