use super::axis::Axis;
use super::cut::{Bin, Cut};
use super::error::BinningError;
use serde::{Deserialize, Serialize};

/// The ordered bins of one analysis variable.
///
/// A scheme starts with zero bins; every builder appends to the list, so
/// insertion order is the semantic order (e.g. increasing range). A scheme
/// with zero bins contributes no layer to a histos index.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BinScheme {
    var_name: String,
    var_title: String,
    bins: Vec<Bin>,
}

impl BinScheme {
    pub fn new(var_name: impl Into<String>, var_title: impl Into<String>) -> Self {
        Self { var_name: var_name.into(), var_title: var_title.into(), bins: Vec::new() }
    }

    pub fn var_name(&self) -> &str { &self.var_name }
    pub fn var_title(&self) -> &str { &self.var_title }
    pub fn num_bins(&self) -> usize { self.bins.len() }
    pub fn is_empty(&self) -> bool { self.bins.is_empty() }
    pub fn bins(&self) -> &[Bin] { &self.bins }
    pub fn bin_at(&self, index: usize) -> Option<&Bin> { self.bins.get(index) }

    /// Appends a bin applying `cut` to this scheme's variable. Returns its index.
    pub fn add_bin(&mut self, cut: Cut) -> usize {
        self.bins.push(Bin::new(self.var_name.clone(), self.var_title.clone(), cut));
        self.bins.len() - 1
    }

    /// Appends a bin that applies no cut and only carries `title`.
    pub fn add_custom_bin(&mut self, title: impl Into<String>) -> usize {
        self.add_bin(Cut::Custom(title.into()))
    }

    /// Appends `nbins` range bins covering `[min, max]`, equal-width in
    /// linear scale, or in log scale when `log` is set (needs `min > 0`).
    pub fn build_bins(&mut self, nbins: usize, min: f64, max: f64, log: bool) -> Result<(), BinningError> {
        let mut axis = Axis::uniform(nbins, min, max)?;
        if log {
            axis.bin_log()?;
        }
        self.push_axis_bins(&axis);
        Ok(())
    }

    /// Appends one range bin per bin of `axis`. With `log` set the axis is
    /// first rescaled in place, so the caller sees the edges that were used.
    pub fn build_bins_from_axis(&mut self, axis: &mut Axis, log: bool) -> Result<(), BinningError> {
        if log {
            axis.bin_log()?;
        }
        self.push_axis_bins(axis);
        Ok(())
    }

    fn push_axis_bins(&mut self, axis: &Axis) {
        for w in axis.edges().windows(2) {
            self.add_bin(Cut::Range { min: w[0], max: w[1] });
        }
    }
}
