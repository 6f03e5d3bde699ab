//! Room and technology categories
//!
//! Both sets are closed: the regression carries one offset per variant and
//! the lookup tables below are total, so there is no "unknown room" path.

use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Kind of room being lit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum RoomType {
    /// Teaching space
    #[cfg_attr(feature = "serde", serde(alias = "aula"))]
    Classroom,
    /// General office area
    #[cfg_attr(feature = "serde", serde(alias = "oficina"))]
    Office,
    /// Conference or meeting room
    #[cfg_attr(feature = "serde", serde(alias = "sala-reuniones", alias = "meeting_room"))]
    MeetingRoom,
}

impl RoomType {
    /// Every room type, in declaration order
    pub const ALL: [RoomType; 3] = [Self::Classroom, Self::Office, Self::MeetingRoom];

    /// Stable identifier used in configuration files
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Classroom => "classroom",
            Self::Office => "office",
            Self::MeetingRoom => "meeting-room",
        }
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoomType {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let matches = |names: &[&str]| names.iter().any(|n| n.eq_ignore_ascii_case(s));

        if matches(&["classroom", "aula"]) {
            Ok(Self::Classroom)
        } else if matches(&["office", "oficina"]) {
            Ok(Self::Office)
        } else if matches(&[
            "meeting-room",
            "meeting_room",
            "meeting room",
            "sala-reuniones",
            "sala de reuniones",
        ]) {
            Ok(Self::MeetingRoom)
        } else {
            Err(ParseCategoryError { kind: "room type" })
        }
    }
}

/// Lighting technology
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Technology {
    /// Solid-state LED luminaires
    #[cfg_attr(feature = "serde", serde(alias = "LED", alias = "Led"))]
    Led,
    /// Linear fluorescent luminaires
    #[cfg_attr(feature = "serde", serde(alias = "fluorescente", alias = "Fluorescent"))]
    Fluorescent,
}

impl Technology {
    /// Every technology, in declaration order
    pub const ALL: [Technology; 2] = [Self::Led, Self::Fluorescent];

    /// Stable identifier used in configuration files
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Led => "led",
            Self::Fluorescent => "fluorescent",
        }
    }
}

impl fmt::Display for Technology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Led => f.write_str("LED"),
            Self::Fluorescent => f.write_str("fluorescent"),
        }
    }
}

impl FromStr for Technology {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("led") {
            Ok(Self::Led)
        } else if s.eq_ignore_ascii_case("fluorescent") || s.eq_ignore_ascii_case("fluorescente") {
            Ok(Self::Fluorescent)
        } else {
            Err(ParseCategoryError { kind: "technology" })
        }
    }
}

/// Unrecognized room type or technology label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseCategoryError {
    kind: &'static str,
}

impl fmt::Display for ParseCategoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unrecognized {}", self.kind)
    }
}

/// One value per room type
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RoomTable<T> {
    /// Value for [`RoomType::Classroom`]
    pub classroom: T,
    /// Value for [`RoomType::Office`]
    pub office: T,
    /// Value for [`RoomType::MeetingRoom`]
    pub meeting_room: T,
}

impl<T> RoomTable<T> {
    /// Build a table from its three entries
    pub const fn new(classroom: T, office: T, meeting_room: T) -> Self {
        Self { classroom, office, meeting_room }
    }

    /// Look up the value for a room type
    pub fn get(&self, room: RoomType) -> &T {
        match room {
            RoomType::Classroom => &self.classroom,
            RoomType::Office => &self.office,
            RoomType::MeetingRoom => &self.meeting_room,
        }
    }
}

impl<T: Copy> RoomTable<T> {
    /// Same value for every room type
    pub const fn uniform(value: T) -> Self {
        Self::new(value, value, value)
    }
}

/// One value per technology
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TechnologyTable<T> {
    /// Value for [`Technology::Led`]
    pub led: T,
    /// Value for [`Technology::Fluorescent`]
    pub fluorescent: T,
}

impl<T> TechnologyTable<T> {
    /// Build a table from its two entries
    pub const fn new(led: T, fluorescent: T) -> Self {
        Self { led, fluorescent }
    }

    /// Look up the value for a technology
    pub fn get(&self, technology: Technology) -> &T {
        match technology {
            Technology::Led => &self.led,
            Technology::Fluorescent => &self.fluorescent,
        }
    }
}

/// Validated input to the regression model
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PredictionInput {
    /// Floor area in square meters
    pub area: f64,
    /// Room category
    pub room_type: RoomType,
    /// Lighting technology
    pub technology: Technology,
}

impl PredictionInput {
    /// Bundle the three model inputs
    pub fn new(area: f64, room_type: RoomType, technology: Technology) -> Self {
        Self { area, room_type, technology }
    }

    /// Same room and technology at a different area
    pub fn with_area(&self, area: f64) -> Self {
        Self { area, ..*self }
    }
}
