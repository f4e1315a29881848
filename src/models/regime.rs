use serde::{Deserialize, Serialize};

/// Market behavior classification, computed fresh per evaluation cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MarketRegime {
    Trending,
    Ranging,
    Volatile,
}

impl MarketRegime {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarketRegime::Trending => "TRENDING",
            MarketRegime::Ranging => "RANGING",
            MarketRegime::Volatile => "VOLATILE",
        }
    }
}

impl std::fmt::Display for MarketRegime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
