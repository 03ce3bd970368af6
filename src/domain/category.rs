use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Kind of number a window tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Prime,
    Fibonacci,
    Even,
    Random,
}

impl Category {
    pub const COUNT: usize = 4;

    pub const ALL: [Category; Self::COUNT] = [
        Category::Prime,
        Category::Fibonacci,
        Category::Even,
        Category::Random,
    ];

    /// Single-letter key used in the `/numbers/{number_id}` path
    pub fn key(&self) -> &'static str {
        match self {
            Self::Prime => "p",
            Self::Fibonacci => "f",
            Self::Even => "e",
            Self::Random => "r",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Prime => "prime",
            Self::Fibonacci => "fibonacci",
            Self::Even => "even",
            Self::Random => "random",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Rejected category key
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid number ID '{0}'. Use 'p', 'f', 'e', or 'r'")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "p" => return Ok(Self::Prime),
            "f" => return Ok(Self::Fibonacci),
            "e" => return Ok(Self::Even),
            "r" => return Ok(Self::Random),
            _ => {}
        }

        Self::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}
