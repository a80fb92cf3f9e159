//! Structured recommendation record.

use serde::{Deserialize, Serialize};

/// A parsed travel recommendation.
///
/// All four fields are always present; unextractable fields are empty rather
/// than absent, so consumers never deal with a partial record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationRecord {
    /// Recommended destination, possibly empty when unparsable.
    pub destination_city: String,
    /// Free-text reasoning, possibly the whole raw block as fallback.
    pub reason: String,
    /// Ordered landmark list, possibly empty.
    pub landmarks: Vec<String>,
    /// Recommended season, free text, possibly empty.
    pub season: String,
}

impl RecommendationRecord {
    /// True when nothing at all was extracted.
    pub fn is_empty(&self) -> bool {
        self.destination_city.is_empty()
            && self.reason.is_empty()
            && self.landmarks.is_empty()
            && self.season.is_empty()
    }
}
