//! Defines `Cut`, the predicate behind a bin, and `Bin` itself.

use serde::{Deserialize, Serialize};

/// The selection applied by a single bin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Cut {
    /// Open interval `min < x < max`.
    Range { min: f64, max: f64 },
    /// `x > value`.
    Min(f64),
    /// `x < value`.
    Max(f64),
    /// `x == value`, for discrete variables.
    Equal(f64),
    /// No selection at all; the bin only carries a label.
    Custom(String),
}

impl Cut {
    pub fn accepts(&self, x: f64) -> bool {
        match self {
            Cut::Range { min, max } => *min < x && x < *max,
            Cut::Min(v) => x > *v,
            Cut::Max(v) => x < *v,
            Cut::Equal(v) => x == *v,
            Cut::Custom(_) => true,
        }
    }

    /// True for cuts that select nothing and only label a bin.
    pub fn is_custom(&self) -> bool { matches!(self, Cut::Custom(_)) }
}

/// One bin of a `BinScheme`.
///
/// Immutable once built. The variable name and title are copied from the
/// owning scheme so a bin can produce its title on its own, which is what the
/// histos index needs when it builds container titles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bin {
    pub var_name: String,
    pub var_title: String,
    pub cut: Cut,
}

impl Bin {
    pub fn new(var_name: impl Into<String>, var_title: impl Into<String>, cut: Cut) -> Self {
        Self { var_name: var_name.into(), var_title: var_title.into(), cut }
    }

    /// Human-readable description of the selection, e.g. `"1 < p_T < 2"`.
    pub fn title(&self) -> String {
        let var = &self.var_title;
        match &self.cut {
            Cut::Range { min, max } => format!("{} < {} < {}", min, var, max),
            Cut::Min(v) => format!("{} > {}", var, v),
            Cut::Max(v) => format!("{} < {}", var, v),
            Cut::Equal(v) => format!("{} = {}", var, v),
            Cut::Custom(title) => title.clone(),
        }
    }

    pub fn accepts(&self, x: f64) -> bool { self.cut.accepts(x) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Cut::Range { min: 1.0, max: 2.5 }, "1 < p_T < 2.5")]
    #[case(Cut::Min(0.1), "p_T > 0.1")]
    #[case(Cut::Max(10.0), "p_T < 10")]
    #[case(Cut::Equal(3.0), "p_T = 3")]
    #[case(Cut::Custom("full p_T range".into()), "full p_T range")]
    fn test_bin_titles(#[case] cut: Cut, #[case] expected: &str) {
        let bin = Bin::new("pt", "p_T", cut);
        assert_eq!(bin.title(), expected);
    }

    #[rstest]
    #[case(Cut::Range { min: 1.0, max: 2.0 }, 1.5, true)]
    #[case(Cut::Range { min: 1.0, max: 2.0 }, 1.0, false)] // open interval
    #[case(Cut::Range { min: 1.0, max: 2.0 }, 2.0, false)]
    #[case(Cut::Min(1.0), 1.1, true)]
    #[case(Cut::Min(1.0), 0.9, false)]
    #[case(Cut::Max(1.0), 0.9, true)]
    #[case(Cut::Equal(2.0), 2.0, true)]
    #[case(Cut::Equal(2.0), 2.1, false)]
    #[case(Cut::Custom("anything".into()), -1e9, true)]
    fn test_cut_acceptance(#[case] cut: Cut, #[case] x: f64, #[case] expected: bool) {
        assert_eq!(cut.accepts(x), expected);
    }
}
