use crate::binning::Bin;
use serde::{Deserialize, Serialize};

/// The result container created for one bin combination.
///
/// The index only names, titles and tags it; the analysis output it
/// accumulates is the analysis driver's business.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histos {
    name: String,
    title: String,
    cuts: Vec<Bin>,
}

impl Histos {
    pub fn new(name: impl Into<String>, title: impl Into<String>) -> Self {
        Self { name: name.into(), title: title.into(), cuts: Vec::new() }
    }

    pub fn name(&self) -> &str { &self.name }
    pub fn title(&self) -> &str { &self.title }
    pub fn cuts(&self) -> &[Bin] { &self.cuts }

    /// Tags the container with one of the bins it was created for.
    pub fn add_cut(&mut self, bin: Bin) { self.cuts.push(bin); }

    /// True if every tagged bin accepts the value its variable takes.
    /// Custom bins accept anything; a variable `value_of` cannot supply
    /// rejects.
    pub fn accepts(&self, value_of: impl Fn(&str) -> Option<f64>) -> bool {
        self.cuts.iter().all(|bin| bin.cut.is_custom() || value_of(&bin.var_name).is_some_and(|x| bin.accepts(x)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binning::Cut;

    #[test]
    fn test_accepts_checks_every_tagged_bin() {
        let mut h = Histos::new("histos__eta0__pt1", "");
        h.add_cut(Bin::new("pt", "p_T", Cut::Range { min: 1.0, max: 2.0 }));
        h.add_cut(Bin::new("eta", "#eta", Cut::Max(0.0)));
        h.add_cut(Bin::new("y", "y", Cut::Custom("full y".into())));

        let event = |pt: f64, eta: f64| move |var: &str| match var {
            "pt" => Some(pt),
            "eta" => Some(eta),
            _ => None,
        };
        assert!(h.accepts(event(1.5, -1.0)));
        assert!(!h.accepts(event(2.5, -1.0)));
        assert!(!h.accepts(event(1.5, 1.0)));
        assert!(!h.accepts(|var: &str| if var == "pt" { Some(1.5) } else { None }));
    }
}
