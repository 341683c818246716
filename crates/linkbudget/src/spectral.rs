//! CNR to spectral efficiency lookup.
//!
//! A table is an ordered list of modulation/coding rows keyed by the lowest CNR
//! at which each row is usable. Tables are validated once on construction and
//! passed explicitly to the engine; nothing here is global state.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One modulation/coding row of a lookup table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpectralEfficiencyEntry {
    pub label: String,
    /// Achievable spectral efficiency (bit/s/Hz).
    pub spectral_efficiency: f64,
    /// Lowest CNR (dB) at which the row applies.
    pub cnr_threshold_low_db: f64,
    /// CNR (dB) at which the next row takes over; `+inf` for the last row.
    pub cnr_threshold_high_db: f64,
}

/// Reasons a lookup table is rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LookupTableError {
    #[error("spectral efficiency table is empty")]
    Empty,
    #[error("row {row} ({label}) has a non-finite efficiency or lower threshold")]
    NonFinite { row: usize, label: String },
    #[error("row {row} ({label}) threshold {threshold} dB is below the previous row's {previous} dB")]
    Unsorted {
        row: usize,
        label: String,
        previous: f64,
        threshold: f64,
    },
    #[error("row {row} ({label}) upper threshold is below its lower threshold")]
    InvertedInterval { row: usize, label: String },
}

/// DVB-S2X MODCODs: label, spectral efficiency (bit/s/Hz), ideal Es/N0 (dB), sorted by Es/N0.
const DVB_S2X_ROWS: &[(&str, f64, f64)] = &[
    ("QPSK 13/45", 0.567805, -2.03),
    ("QPSK 9/20", 0.889135, 0.22),
    ("QPSK 11/20", 1.088581, 1.45),
    ("8APSK 5/9-L", 1.647211, 4.73),
    ("8APSK 26/45-L", 1.713601, 5.13),
    ("8PSK 23/36", 1.896173, 5.71),
    ("16APSK 1/2-L", 1.972253, 5.97),
    ("8PSK 25/36", 2.062148, 6.27),
    ("16APSK 8/15-L", 2.104850, 6.55),
    ("8PSK 13/18", 2.145136, 6.60),
    ("16APSK 5/9-L", 2.193247, 6.84),
    ("16APSK 3/5-L", 2.370043, 7.41),
    ("16APSK 26/45", 2.281645, 7.51),
    ("16APSK 3/5", 2.370043, 7.80),
    ("16APSK 28/45", 2.458441, 8.10),
    ("16APSK 23/36", 2.524739, 8.38),
    ("16APSK 2/3-L", 2.635236, 8.43),
    ("16APSK 25/36", 2.745734, 9.27),
    ("16APSK 13/18", 2.856231, 9.71),
    ("16APSK 7/9", 3.077225, 10.65),
    ("32APSK 2/3-L", 3.291954, 11.10),
    ("32APSK 32/45", 3.510192, 11.75),
    ("16APSK 77/90", 3.386618, 11.99),
    ("32APSK 11/15", 3.620536, 12.17),
    ("32APSK 7/9", 3.841226, 13.05),
    ("64APSK 32/45-L", 4.206428, 13.98),
    ("64APSK 11/15", 4.338659, 14.81),
    ("64APSK 7/9", 4.603122, 15.47),
    ("64APSK 4/5", 4.735354, 15.87),
    ("64APSK 5/6", 4.936639, 16.55),
    ("256APSK 29/45-L", 5.065690, 16.98),
    ("256APSK 2/3-L", 5.241514, 17.24),
    ("128APSK 3/4", 5.163248, 17.73),
    ("256APSK 31/45-L", 5.417338, 18.10),
    ("128APSK 7/9", 5.355556, 18.53),
    ("256APSK 32/45", 5.593162, 18.59),
    ("256APSK 11/15-L", 5.768987, 18.84),
    ("256APSK 3/4", 5.900855, 19.57),
];

/// Higher-order DVB-S2X subset starting at 8APSK 5/9-L, thresholds 0.01 dB under the
/// ideal Es/N0. Weaker links saturate to the first row instead of falling back to QPSK.
const HIGH_ORDER_ROWS: &[(&str, f64, f64)] = &[
    ("8APSK 5/9-L", 1.647211, 5.12),
    ("16APSK 1/2-L", 1.972253, 5.96),
    ("16APSK 1/2-L", 1.972253, 6.54),
    ("16APSK 8/15-L", 2.104850, 6.83),
    ("16APSK 3/5-L", 2.370043, 7.40),
    ("16APSK 5/9-L", 2.193247, 7.50),
    ("16APSK 26/45", 2.281645, 7.79),
    ("16APSK 3/5", 2.370043, 8.00),
    ("16APSK 28/45", 2.458441, 8.37),
    ("16APSK 23/36", 2.524739, 8.42),
    ("16APSK 2/3-L", 2.635236, 9.26),
    ("16APSK 25/36", 2.745734, 9.70),
    ("16APSK 13/18", 2.856231, 10.64),
    ("16APSK 77/90", 3.386618, 11.09),
    ("32APSK 2/3-L", 3.291954, 11.74),
    ("16APSK 7/9", 3.077225, 11.98),
    ("32APSK 32/45", 3.510192, 12.16),
    ("32APSK 11/15", 3.620536, 13.04),
    ("32APSK 7/9", 3.841226, 13.97),
    ("64APSK 32/45-L", 4.206428, 14.80),
    ("64APSK 11/15", 4.338659, 15.46),
    ("64APSK 7/9", 4.603122, 15.86),
    ("64APSK 4/5", 4.735354, 16.54),
    ("128APSK 7/9", 5.355556, 16.97),
    ("256APSK 29/45-L", 5.065690, 17.23),
    ("64APSK 5/6", 4.936639, 17.72),
    ("256APSK 2/3-L", 5.241514, 18.00),
    ("128APSK 3/4", 5.163248, 18.52),
    ("256APSK 31/45-L", 5.417338, 18.58),
    ("256APSK 32/45", 5.593162, 18.83),
    ("256APSK 11/15-L", 5.768987, 19.56),
];

/// Validated, threshold-ordered lookup table.
#[derive(Debug, Clone, PartialEq)]
pub struct SpectralEfficiencyTable {
    entries: Vec<SpectralEfficiencyEntry>,
}

impl SpectralEfficiencyTable {
    /// Validate and wrap `entries`.
    ///
    /// Lower thresholds must be finite and non-decreasing; each upper threshold must not
    /// sit below its row's lower threshold.
    pub fn new(entries: Vec<SpectralEfficiencyEntry>) -> Result<Self, LookupTableError> {
        if entries.is_empty() {
            return Err(LookupTableError::Empty);
        }
        let mut previous: Option<f64> = None;
        for (row, entry) in entries.iter().enumerate() {
            if !entry.spectral_efficiency.is_finite() || !entry.cnr_threshold_low_db.is_finite() {
                return Err(LookupTableError::NonFinite {
                    row,
                    label: entry.label.clone(),
                });
            }
            if entry.cnr_threshold_high_db.is_nan()
                || entry.cnr_threshold_high_db < entry.cnr_threshold_low_db
            {
                return Err(LookupTableError::InvertedInterval {
                    row,
                    label: entry.label.clone(),
                });
            }
            if let Some(prev) = previous {
                if entry.cnr_threshold_low_db < prev {
                    return Err(LookupTableError::Unsorted {
                        row,
                        label: entry.label.clone(),
                        previous: prev,
                        threshold: entry.cnr_threshold_low_db,
                    });
                }
            }
            previous = Some(entry.cnr_threshold_low_db);
        }
        Ok(Self { entries })
    }

    /// Built-in DVB-S2X table, QPSK 13/45 through 256APSK 3/4.
    pub fn dvb_s2x() -> Self {
        Self::from_static(DVB_S2X_ROWS)
    }

    /// Built-in table without QPSK rows; the lowest usable row is 8APSK 5/9-L at 5.12 dB.
    pub fn dvb_s2x_high_order() -> Self {
        Self::from_static(HIGH_ORDER_ROWS)
    }

    // Rows are sorted by threshold; each upper bound is the next row's lower bound.
    fn from_static(rows: &[(&str, f64, f64)]) -> Self {
        let entries = rows
            .iter()
            .enumerate()
            .map(|(idx, &(label, efficiency, threshold))| SpectralEfficiencyEntry {
                label: label.to_string(),
                spectral_efficiency: efficiency,
                cnr_threshold_low_db: threshold,
                cnr_threshold_high_db: rows
                    .get(idx + 1)
                    .map(|next| next.2)
                    .unwrap_or(f64::INFINITY),
            })
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[SpectralEfficiencyEntry] {
        &self.entries
    }

    /// Row applying at `cnr_db`.
    ///
    /// Adjacent rows form half-open intervals `[lower, next lower)` and the lower row
    /// wins. CNR at or above the last threshold saturates to the last row; CNR below
    /// the first threshold (or NaN) falls back to the first row. Rows sharing a
    /// threshold leave an empty interval, so the later one applies.
    pub fn resolve(&self, cnr_db: f64) -> &SpectralEfficiencyEntry {
        for pair in self.entries.windows(2) {
            let (lower, upper) = (&pair[0], &pair[1]);
            if cnr_db >= lower.cnr_threshold_low_db && cnr_db < upper.cnr_threshold_low_db {
                return lower;
            }
        }
        let last = &self.entries[self.entries.len() - 1];
        if cnr_db >= last.cnr_threshold_low_db {
            last
        } else {
            &self.entries[0]
        }
    }
}

/// Spectral efficiency (bit/s/Hz) for `cnr_db` under `table`.
pub fn resolve_spectral_efficiency(cnr_db: f64, table: &SpectralEfficiencyTable) -> f64 {
    table.resolve(cnr_db).spectral_efficiency
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(label: &str, se: f64, low: f64, high: f64) -> SpectralEfficiencyEntry {
        SpectralEfficiencyEntry {
            label: label.to_string(),
            spectral_efficiency: se,
            cnr_threshold_low_db: low,
            cnr_threshold_high_db: high,
        }
    }

    #[test]
    fn builtin_tables_pass_validation() {
        for builtin in [
            SpectralEfficiencyTable::dvb_s2x(),
            SpectralEfficiencyTable::dvb_s2x_high_order(),
        ] {
            let rebuilt = SpectralEfficiencyTable::new(builtin.entries().to_vec()).unwrap();
            assert_eq!(rebuilt, builtin);
        }
        assert_eq!(SpectralEfficiencyTable::dvb_s2x_high_order().entries().len(), 31);
    }

    #[test]
    fn shared_threshold_resolves_to_later_row() {
        let table = SpectralEfficiencyTable::new(vec![
            entry("a", 1.0, 0.0, 5.0),
            entry("b", 2.0, 5.0, 5.0),
            entry("c", 3.0, 5.0, f64::INFINITY),
        ])
        .unwrap();
        assert_eq!(table.resolve(5.0).label, "c");
        assert_eq!(table.resolve(4.99).label, "a");
    }

    #[test]
    fn inverted_interval_is_rejected() {
        let err = SpectralEfficiencyTable::new(vec![entry("a", 1.0, 3.0, 2.0)]).unwrap_err();
        assert!(matches!(err, LookupTableError::InvertedInterval { row: 0, .. }));
    }
}
