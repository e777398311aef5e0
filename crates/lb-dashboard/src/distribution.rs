//! Property distributions over the issues of one report.

use lb_core::entities::{Issue, Report};
use lb_core::responses::PropertyDistribution;

/// Count the report's issues per distinct value of `extractor`.
///
/// Labels appear in the order their value is first seen while scanning the
/// issues in stored order. A report without issues yields empty `labels`
/// and a single empty dataset.
pub fn property_distribution<F>(report: &Report, extractor: F) -> PropertyDistribution
where
    F: Fn(&Issue) -> &str,
{
    PropertyDistribution::from_counts(report.property_count(extractor))
}
