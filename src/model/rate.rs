use std::fmt;

use serde::Serialize;

/// Integer percentage, or undefined when the denominator was zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Rate(Option<u32>);

impl Rate {
    pub const UNDEFINED: Rate = Rate(None);

    /// Rounds half to even on the percentage value, so 62.5 becomes 62.
    pub fn from_ratio(numerator: u32, denominator: u32) -> Self {
        if denominator == 0 {
            return Self::UNDEFINED;
        }
        let pct = f64::from(numerator) / f64::from(denominator) * 100.0;
        Rate(Some(pct.round_ties_even() as u32))
    }

    pub fn percent(self) -> Option<u32> {
        self.0
    }

    pub fn is_defined(self) -> bool {
        self.0.is_some()
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.percent() {
            Some(pct) => write!(f, "{pct} %"),
            None => f.write_str("undefined"),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/rate.rs"]
mod tests;
