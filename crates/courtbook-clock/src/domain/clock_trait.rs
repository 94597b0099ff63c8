//! The behavioural tags a clock type can carry.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One behavioural tag of a [`ClockType`](super::clock_type::ClockType).
///
/// The known tags drive completion and depletion. Any other tag is kept
/// verbatim so saved data from newer versions survives a round trip, but it
/// has no effect.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ClockTrait {
    /// The clock may advance.
    Progress,
    /// The clock may regress.
    Regress,
    /// Both ends are meaningful: the clock can complete and deplete.
    TugOfWar,
    /// The clock completes when it reaches its maximum.
    CompletesFull,
    /// The clock depletes when it reaches zero.
    DepletesEmpty,
    /// The clock is linked to one or more other clocks.
    Linked,
    /// The clock unlocks one or more other clocks.
    Chained,
    /// A tag this version does not know about.
    Other(UnknownTag),
}

/// The text of a tag that matched none of the known ones.
///
/// Only parsing builds one, so a known tag can never end up in
/// [`ClockTrait::Other`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UnknownTag(String);

impl UnknownTag {
    /// The tag as written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ClockTrait {
    /// Canonical tag string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Progress => "progress",
            Self::Regress => "regress",
            Self::TugOfWar => "tug-of-war",
            Self::CompletesFull => "completes-full",
            Self::DepletesEmpty => "depletes-empty",
            Self::Linked => "linked",
            Self::Chained => "chained",
            Self::Other(tag) => tag.as_str(),
        }
    }

    /// Is this one of the tags this version understands.
    #[must_use]
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl FromStr for ClockTrait {
    type Err = Infallible;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        Ok(match tag {
            "progress" => Self::Progress,
            "regress" => Self::Regress,
            "tug-of-war" => Self::TugOfWar,
            // Older saves spell these two "complete-full" and "complete-empty".
            "completes-full" | "complete-full" => Self::CompletesFull,
            "depletes-empty" | "complete-empty" => Self::DepletesEmpty,
            "linked" => Self::Linked,
            "chained" => Self::Chained,
            other => Self::Other(UnknownTag(other.to_owned())),
        })
    }
}

impl From<&str> for ClockTrait {
    fn from(tag: &str) -> Self {
        match tag.parse() {
            Ok(clock_trait) => clock_trait,
            Err(never) => match never {},
        }
    }
}

impl From<String> for ClockTrait {
    fn from(tag: String) -> Self {
        Self::from(tag.as_str())
    }
}

impl From<ClockTrait> for String {
    fn from(clock_trait: ClockTrait) -> Self {
        match clock_trait {
            ClockTrait::Other(UnknownTag(tag)) => tag,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for ClockTrait {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
