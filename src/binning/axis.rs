//! axis.rs
//! Edge partitions of a numeric range: equal-width, log-spaced, or arbitrary.

use super::error::BinningError;
use serde::{Deserialize, Serialize};

/// An ordered partition of a range into `num_bins()` adjacent sub-ranges.
///
/// Stores `N + 1` finite, strictly increasing edges for `N` bins.
/// Serialized as the bare edge list; deserializing validates it like
/// `from_edges`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct Axis {
    edges: Vec<f64>,
}

impl Axis {
    /// Splits `[min, max]` into `nbins` equal-width bins.
    pub fn uniform(nbins: usize, min: f64, max: f64) -> Result<Self, BinningError> {
        if nbins == 0 {
            return Err(BinningError::NoBins);
        }
        if !(min.is_finite() && max.is_finite()) || min >= max {
            return Err(BinningError::InvalidRange { min, max, reason: "bounds must be finite with min < max" });
        }

        let width = (max - min) / nbins as f64;
        let mut edges: Vec<f64> = (0..=nbins).map(|i| min + width * i as f64).collect();
        // Pin the upper edge so accumulated rounding never moves it.
        edges[nbins] = max;
        Ok(Self { edges })
    }

    /// Wraps a caller-supplied partition.
    pub fn from_edges(edges: Vec<f64>) -> Result<Self, BinningError> {
        if edges.len() < 2 {
            return Err(BinningError::NoBins);
        }
        if let Some(index) = edges.iter().position(|e| !e.is_finite()) {
            return Err(BinningError::NonIncreasingEdges { index });
        }
        if let Some(i) = edges.windows(2).position(|w| w[0] >= w[1]) {
            return Err(BinningError::NonIncreasingEdges { index: i + 1 });
        }
        Ok(Self { edges })
    }

    /// Rescales the edges in place so the bins are equal-width in log10,
    /// keeping the first and last edge and the number of bins.
    ///
    /// Works on any axis, including display axes that never become bins.
    /// Requires a strictly positive lower edge; the axis is left untouched
    /// otherwise.
    pub fn bin_log(&mut self) -> Result<(), BinningError> {
        let nbins = self.num_bins();
        let min = self.edges[0];
        let max = self.edges[nbins];
        if min <= 0.0 {
            return Err(BinningError::InvalidRange { min, max, reason: "log scale requires min > 0" });
        }

        let low = min.log10();
        let width = (max.log10() - low) / nbins as f64;
        for (i, edge) in self.edges.iter_mut().enumerate() {
            *edge = 10f64.powf(low + width * i as f64);
        }
        self.edges[0] = min;
        self.edges[nbins] = max;
        Ok(())
    }

    pub fn num_bins(&self) -> usize { self.edges.len() - 1 }
    pub fn edges(&self) -> &[f64] { &self.edges }
    pub fn min(&self) -> f64 { self.edges[0] }
    pub fn max(&self) -> f64 { self.edges[self.num_bins()] }

    pub fn low_edge(&self, bin: usize) -> Option<f64> {
        if bin < self.num_bins() { Some(self.edges[bin]) } else { None }
    }

    pub fn up_edge(&self, bin: usize) -> Option<f64> {
        if bin < self.num_bins() { Some(self.edges[bin + 1]) } else { None }
    }

    /// Index of the bin containing `x`, treating bins as `[low, up)`.
    pub fn find_bin(&self, x: f64) -> Option<usize> {
        if !(x >= self.min() && x < self.max()) {
            return None;
        }
        Some(self.edges.partition_point(|&e| e <= x) - 1)
    }
}

impl TryFrom<Vec<f64>> for Axis {
    type Error = BinningError;

    fn try_from(edges: Vec<f64>) -> Result<Self, Self::Error> { Self::from_edges(edges) }
}

impl From<Axis> for Vec<f64> {
    fn from(axis: Axis) -> Self { axis.edges }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn assert_equal_widths(values: &[f64]) {
        let widths: Vec<f64> = values.windows(2).map(|w| w[1] - w[0]).collect();
        for w in &widths {
            assert!((w - widths[0]).abs() < 1e-9, "Widths differ: {:?}", widths);
        }
    }

    #[rstest]
    #[case(1, 0.0, 1.0)]
    #[case(4, 0.0, 10.0)]
    #[case(7, -3.5, 2.0)]
    fn test_uniform_edges_are_equal_width(#[case] n: usize, #[case] min: f64, #[case] max: f64) {
        let axis = Axis::uniform(n, min, max).unwrap();
        assert_eq!(axis.num_bins(), n);
        assert_eq!(axis.min(), min);
        assert_eq!(axis.max(), max);
        assert_equal_widths(axis.edges());
    }

    #[rstest]
    #[case(3, 1.0, 1000.0)]
    #[case(5, 0.01, 100.0)]
    #[case(10, 2.0, 3.0)]
    fn test_log_edges_are_equal_width_in_log10(#[case] n: usize, #[case] min: f64, #[case] max: f64) {
        let mut axis = Axis::uniform(n, min, max).unwrap();
        axis.bin_log().unwrap();
        assert_eq!(axis.num_bins(), n);
        assert_eq!(axis.min(), min);
        assert_eq!(axis.max(), max);
        let logs: Vec<f64> = axis.edges().iter().map(|e| e.log10()).collect();
        assert_equal_widths(&logs);
    }

    #[test]
    fn test_log_decades() {
        let mut axis = Axis::uniform(3, 1.0, 1000.0).unwrap();
        axis.bin_log().unwrap();
        let expected = [1.0, 10.0, 100.0, 1000.0];
        for (got, want) in axis.edges().iter().zip(expected) {
            assert!((got - want).abs() < 1e-9, "{} != {}", got, want);
        }
    }

    #[test]
    fn test_bin_log_rejects_non_positive_minimum() {
        let mut axis = Axis::uniform(4, 0.0, 10.0).unwrap();
        let before = axis.clone();
        let err = axis.bin_log().unwrap_err();
        assert!(matches!(err, BinningError::InvalidRange { .. }));
        assert_eq!(axis, before);
    }

    #[test]
    fn test_bin_log_on_arbitrary_partition() {
        let mut axis = Axis::from_edges(vec![1.0, 2.0, 50.0, 100.0]).unwrap();
        axis.bin_log().unwrap();
        let logs: Vec<f64> = axis.edges().iter().map(|e| e.log10()).collect();
        assert_equal_widths(&logs);
    }

    #[rstest]
    #[case(vec![])]
    #[case(vec![1.0])]
    fn test_from_edges_needs_a_bin(#[case] edges: Vec<f64>) {
        assert_eq!(Axis::from_edges(edges).unwrap_err(), BinningError::NoBins);
    }

    #[test]
    fn test_from_edges_rejects_unordered() {
        let err = Axis::from_edges(vec![0.0, 2.0, 2.0, 3.0]).unwrap_err();
        assert_eq!(err, BinningError::NonIncreasingEdges { index: 2 });
        let err = Axis::from_edges(vec![0.0, f64::NAN]).unwrap_err();
        assert_eq!(err, BinningError::NonIncreasingEdges { index: 1 });
    }

    #[test]
    fn test_uniform_rejects_bad_ranges() {
        assert_eq!(Axis::uniform(0, 0.0, 1.0).unwrap_err(), BinningError::NoBins);
        assert!(Axis::uniform(2, 1.0, 1.0).is_err());
        assert!(Axis::uniform(2, 0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_serde_keeps_edges_valid() {
        let axis = Axis::from_edges(vec![0.0, 1.0, 5.0]).unwrap();
        let json = serde_json::to_string(&axis).unwrap();
        assert_eq!(json, "[0.0,1.0,5.0]");
        assert_eq!(serde_json::from_str::<Axis>(&json).unwrap(), axis);
    }

    #[rstest]
    #[case("[]")]
    #[case("[1.0]")]
    #[case("[0.0,2.0,1.0]")]
    fn test_deserialize_rejects_invalid_edges(#[case] json: &str) {
        assert!(serde_json::from_str::<Axis>(json).is_err());
    }

    #[test]
    fn test_find_bin() {
        let axis = Axis::from_edges(vec![0.0, 1.0, 5.0, 10.0]).unwrap();
        assert_eq!(axis.find_bin(0.0), Some(0));
        assert_eq!(axis.find_bin(1.0), Some(1));
        assert_eq!(axis.find_bin(9.99), Some(2));
        assert_eq!(axis.find_bin(10.0), None);
        assert_eq!(axis.find_bin(-0.1), None);
        assert_eq!(axis.find_bin(f64::NAN), None);
        assert_eq!(axis.low_edge(2), Some(5.0));
        assert_eq!(axis.up_edge(2), Some(10.0));
        assert_eq!(axis.up_edge(3), None);
    }
}
