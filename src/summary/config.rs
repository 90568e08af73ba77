/// Configuration for the summary report
#[derive(Clone, Debug)]
pub struct SummaryConfig {
    /// Mean relative uncertainty below this is labelled high quality
    pub high_quality_threshold: f64,
    /// Mean relative uncertainty below this is labelled medium quality
    pub medium_quality_threshold: f64,
    /// Power above which an interval counts as producing
    pub producing_threshold_kw: f64,
    pub relative_uncertainty_epsilon_kw: f64,
    pub power_decimals: u32,
    pub energy_decimals: u32,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            high_quality_threshold: 0.15,
            medium_quality_threshold: 0.30,
            producing_threshold_kw: 0.01,
            relative_uncertainty_epsilon_kw: 0.001,
            power_decimals: 3,
            energy_decimals: 1,
        }
    }
}
