//! Min-max feature scaling.

use bioprint_types::{Feature, NUM_FEATURES, ProcessParameters};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{DatasetError, Result};

/// Raw or scaled feature vector.
pub type FeatureRow = [f64; NUM_FEATURES];

/// Per-feature min-max scaler.
///
/// Fitted on the dataset being prepared; the stored bounds must be applied
/// to every new sample before inference, since models only ever see scaled
/// inputs.
///
/// A constant column (`min == max`) scales to `0.0` for every value and
/// inverts back to the constant.
///
/// # Example
///
/// ```
/// use bioprint_dataset::FeatureScaler;
///
/// let rows = [[0.0, 10.0, 1.0, 0.1, 2.0, 30.0], [10.0, 20.0, 3.0, 0.3, 4.0, 60.0]];
/// let scaler = FeatureScaler::fit(&rows).unwrap();
///
/// let scaled = scaler.transform(&[5.0, 15.0, 2.0, 0.2, 3.0, 45.0]);
/// assert!(scaled.iter().all(|v| (v - 0.5).abs() < 1e-9));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureScaler {
    /// Observed per-feature minimum.
    #[serde(rename = "featureMin")]
    min: FeatureRow,

    /// Observed per-feature maximum.
    #[serde(rename = "featureMax")]
    max: FeatureRow,
}

impl FeatureScaler {
    /// Fits the scaler to the given rows.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::EmptyDataset`] if `rows` is empty.
    pub fn fit(rows: &[FeatureRow]) -> Result<Self> {
        let first = rows.first().ok_or(DatasetError::EmptyDataset)?;
        let mut min = *first;
        let mut max = *first;

        for row in &rows[1..] {
            for (i, &value) in row.iter().enumerate() {
                min[i] = min[i].min(value);
                max[i] = max[i].max(value);
            }
        }

        let scaler = Self { min, max };
        for feature in scaler.degenerate_features() {
            debug!(
                feature = feature.key(),
                value = min[feature.index()],
                "constant feature column; scaling to zero"
            );
        }
        Ok(scaler)
    }

    /// Creates a scaler from known bounds.
    #[must_use]
    pub const fn from_bounds(min: FeatureRow, max: FeatureRow) -> Self {
        Self { min, max }
    }

    /// Observed per-feature minimum.
    #[must_use]
    pub const fn feature_min(&self) -> &FeatureRow {
        &self.min
    }

    /// Observed per-feature maximum.
    #[must_use]
    pub const fn feature_max(&self) -> &FeatureRow {
        &self.max
    }

    /// Returns true if a feature column was constant.
    #[must_use]
    pub fn is_degenerate(&self, feature: Feature) -> bool {
        let i = feature.index();
        let span = self.max[i] - self.min[i];
        span.is_nan() || span <= 0.0
    }

    /// Returns the constant feature columns.
    #[must_use]
    pub fn degenerate_features(&self) -> Vec<Feature> {
        Feature::ALL
            .into_iter()
            .filter(|f| self.is_degenerate(*f))
            .collect()
    }

    /// Scales a raw row into the fitted range.
    #[must_use]
    pub fn transform(&self, row: &FeatureRow) -> FeatureRow {
        let mut scaled = [0.0; NUM_FEATURES];
        for feature in Feature::ALL {
            let i = feature.index();
            if !self.is_degenerate(feature) {
                scaled[i] = (row[i] - self.min[i]) / (self.max[i] - self.min[i]);
            }
        }
        scaled
    }

    /// Scales the features of a parameter set.
    #[must_use]
    pub fn transform_parameters(&self, parameters: &ProcessParameters) -> FeatureRow {
        self.transform(&parameters.to_features())
    }

    /// Maps a scaled row back to raw units.
    #[must_use]
    pub fn inverse(&self, row: &FeatureRow) -> FeatureRow {
        let mut raw = self.min;
        for feature in Feature::ALL {
            let i = feature.index();
            if !self.is_degenerate(feature) {
                raw[i] = row[i].mul_add(self.max[i] - self.min[i], self.min[i]);
            }
        }
        raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn rows() -> Vec<FeatureRow> {
        vec![
            [5.0, 180.0, 30.0, 0.3, 3.5, 30.0],
            [10.0, 200.0, 25.0, 0.2, 2.8, 45.0],
            [15.0, 210.0, 20.0, 0.4, 2.0, 60.0],
        ]
    }

    #[test]
    fn fit_empty_fails() {
        assert!(matches!(
            FeatureScaler::fit(&[]),
            Err(DatasetError::EmptyDataset)
        ));
    }

    #[test]
    fn fit_tracks_bounds() {
        let scaler = FeatureScaler::fit(&rows()).unwrap();
        assert_eq!(scaler.feature_min(), &[5.0, 180.0, 20.0, 0.2, 2.0, 30.0]);
        assert_eq!(scaler.feature_max(), &[15.0, 210.0, 30.0, 0.4, 3.5, 60.0]);
        assert!(scaler.degenerate_features().is_empty());
    }

    #[test]
    fn transform_maps_bounds_to_unit_interval() {
        let scaler = FeatureScaler::fit(&rows()).unwrap();
        let low = scaler.transform(scaler.feature_min());
        let high = scaler.transform(scaler.feature_max());
        for i in 0..NUM_FEATURES {
            assert_relative_eq!(low[i], 0.0);
            assert_relative_eq!(high[i], 1.0);
        }
    }

    #[test]
    fn inverse_round_trips() {
        let scaler = FeatureScaler::fit(&rows()).unwrap();
        for row in rows() {
            let back = scaler.inverse(&scaler.transform(&row));
            for i in 0..NUM_FEATURES {
                assert_relative_eq!(back[i], row[i], epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn constant_column_scales_to_zero() {
        let rows = vec![
            [5.0, 190.0, 30.0, 0.3, 3.0, 45.0],
            [10.0, 190.0, 35.0, 0.3, 3.5, 50.0],
        ];
        let scaler = FeatureScaler::fit(&rows).unwrap();
        assert_eq!(
            scaler.degenerate_features(),
            vec![Feature::Temperature, Feature::LayerHeight]
        );

        let scaled = scaler.transform(&rows[1]);
        assert_relative_eq!(scaled[Feature::Temperature.index()], 0.0);
        assert_relative_eq!(scaled[Feature::CellDensity.index()], 1.0);
        assert!(scaled.iter().all(|v| v.is_finite()));

        let back = scaler.inverse(&scaled);
        assert_relative_eq!(back[Feature::Temperature.index()], 190.0);
    }

    #[test]
    fn single_row_is_fully_degenerate() {
        let scaler = FeatureScaler::fit(&rows()[..1]).unwrap();
        assert_eq!(scaler.degenerate_features().len(), NUM_FEATURES);
        assert_eq!(scaler.transform(&rows()[0]), [0.0; NUM_FEATURES]);
    }

    #[test]
    fn scaler_serializes_bounds() {
        let scaler = FeatureScaler::fit(&rows()).unwrap();
        let json = serde_json::to_string(&scaler).unwrap();
        assert!(json.contains("featureMin"));
        assert!(json.contains("featureMax"));
        let parsed: FeatureScaler = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, scaler);
    }
}
