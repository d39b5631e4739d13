//! Min-max normalization across the current tract set.

/// Observed range of one indicator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinMax {
    pub min: f64,
    pub max: f64,
}

impl MinMax {
    /// Range of the finite values in `values`, or `None` if there are none.
    #[must_use]
    pub fn of(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some(Self { min: v, max: v }),
                Some(Self { min, max }) => Some(Self {
                    min: min.min(v),
                    max: max.max(v),
                }),
            })
    }

    /// Whether every observed value was identical.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.max - self.min <= 0.0
    }

    /// Scales `value` into `[0, 1]`.
    ///
    /// A degenerate range maps everything to `0.0`, as does a non-finite
    /// input.
    #[must_use]
    pub fn normalize(&self, value: f64) -> f64 {
        if self.is_degenerate() || !value.is_finite() {
            return 0.0;
        }
        ((value - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
    }
}

/// Normalizes every value against the range of the whole slice.
///
/// With `inverted`, non-degenerate scores become `1 - score`. A degenerate
/// slice scores `0.0` everywhere regardless of polarity.
#[must_use]
pub fn min_max_normalize(values: &[f64], inverted: bool) -> Vec<f64> {
    let Some(range) = MinMax::of(values.iter().copied()) else {
        return vec![0.0; values.len()];
    };

    if range.is_degenerate() {
        return vec![0.0; values.len()];
    }

    values
        .iter()
        .map(|&v| {
            let score = range.normalize(v);
            if inverted { 1.0 - score } else { score }
        })
        .collect()
}
