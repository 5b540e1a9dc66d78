// ── VisualRF topology ──
//
// Campus -> building -> floor containment, read-only from the pipeline's
// point of view.

use serde::Deserialize;

use super::lenient_text;

#[derive(Debug, Clone, Deserialize)]
pub struct Campus {
    pub campus_id: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub campus_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Building {
    pub building_id: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub building_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub campus_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Floor {
    pub floor_id: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub floor_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub floor_level: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub building_id: Option<String>,
}

/// An access point placed on a floor plan.
#[derive(Debug, Clone, Deserialize)]
pub struct ApLocation {
    pub ap_id: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub ap_name: Option<String>,
}
