//! Label encoding.

use bioprint_types::{NUM_CLASSES, ViabilityClass};

/// One-hot encoded viability label.
pub type OneHot = [f64; NUM_CLASSES];

/// One-hot encodes viability labels (`Low = 0`, `Medium = 1`, `High = 2`).
#[must_use]
pub fn one_hot_encode(labels: &[ViabilityClass]) -> Vec<OneHot> {
    labels.iter().map(|label| label.one_hot()).collect()
}

/// Decodes a one-hot (or probability) row to the class with the largest value.
///
/// Ties resolve to the lowest class index.
#[must_use]
pub fn decode_class(row: &OneHot) -> ViabilityClass {
    let mut best = 0;
    for (i, &value) in row.iter().enumerate().skip(1) {
        if value > row[best] {
            best = i;
        }
    }
    ViabilityClass::from_index(best).unwrap_or(ViabilityClass::Low)
}
