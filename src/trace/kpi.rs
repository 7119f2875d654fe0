use serde::Deserialize;

/// Per-run counters reported by the simulator itself (`kpi_*.csv`).
///
/// Only the first row of the file is meaningful.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Kpi {
    pub sum_sent: u64,
    #[serde(default)]
    pub sum_sent_coded: Option<u64>,
    pub sum_rcvd: u64,
    pub sum_fwd: u64,
    /// Excess probability at 1 R, peak.
    #[serde(default)]
    pub pe500: Option<f64>,
    /// Average dissemination rate.
    #[serde(default)]
    pub pd: Option<f64>,
}
