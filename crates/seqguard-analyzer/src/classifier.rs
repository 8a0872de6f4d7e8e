//! Risk classification of a projection.

use seqguard_core::RiskLabel;

use crate::predictor::Projection;

pub fn classify(projection: &Projection) -> RiskLabel {
    if !projection.within_horizon {
        RiskLabel::Safe
    } else if projection.is_exhausted() {
        RiskLabel::Overflowed
    } else {
        RiskLabel::Soon
    }
}
