//! Team colors.
//!
//! On the wire a team is its lowercase name. Decoding never fails:
//! anything unrecognised (or missing) becomes [`Team::Neutral`].

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serialize, Serializer};

/// Owner of a board cell, or a participating team.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Team {
    /// Bystander cell, owned by nobody
    #[default]
    Neutral = 0,
    /// Red team
    Red = 1,
    /// Blue team
    Blue = 2,
    /// Green team
    Green = 3,
    /// Yellow team
    Yellow = 4,
    /// The elimination cell. Never a playing team.
    Black = 5,
}

impl Team {
    /// Playable colors in their base turn order.
    pub const PLAYABLE: [Team; 4] = [Team::Red, Team::Blue, Team::Green, Team::Yellow];

    /// Canonical lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Team::Neutral => "neutral",
            Team::Red => "red",
            Team::Blue => "blue",
            Team::Green => "green",
            Team::Yellow => "yellow",
            Team::Black => "black",
        }
    }

    /// Parse a name, falling back to `Neutral`.
    pub fn from_name(name: &str) -> Team {
        match name {
            "red" => Team::Red,
            "blue" => Team::Blue,
            "green" => Team::Green,
            "yellow" => Team::Yellow,
            "black" => Team::Black,
            _ => Team::Neutral,
        }
    }

    /// Whether this is one of the four team colors.
    #[inline]
    pub fn is_playable(self) -> bool {
        self.playable_index().is_some()
    }

    /// Position in [`Team::PLAYABLE`].
    #[inline]
    pub fn playable_index(self) -> Option<usize> {
        match self {
            Team::Red => Some(0),
            Team::Blue => Some(1),
            Team::Green => Some(2),
            Team::Yellow => Some(3),
            Team::Neutral | Team::Black => None,
        }
    }

    /// `n` copies of this team.
    pub fn repeat(self, n: usize) -> Vec<Team> {
        vec![self; n]
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Team {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Team::from_name(s))
    }
}

impl Serialize for Team {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Team {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(TeamVisitor)
    }
}

struct TeamVisitor;

impl<'de> Visitor<'de> for TeamVisitor {
    type Value = Team;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a team name")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Team, E> {
        Ok(Team::from_name(v))
    }

    fn visit_none<E: de::Error>(self) -> Result<Team, E> {
        Ok(Team::Neutral)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Team, D::Error> {
        deserializer.deserialize_any(TeamVisitor)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Team, E> {
        Ok(Team::Neutral)
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<Team, E> {
        Ok(Team::Neutral)
    }

    fn visit_i64<E: de::Error>(self, _: i64) -> Result<Team, E> {
        Ok(Team::Neutral)
    }

    fn visit_u64<E: de::Error>(self, _: u64) -> Result<Team, E> {
        Ok(Team::Neutral)
    }

    fn visit_f64<E: de::Error>(self, _: f64) -> Result<Team, E> {
        Ok(Team::Neutral)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Team, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(Team::Neutral)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Team, A::Error> {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(Team::Neutral)
    }
}
