// ── Model name resolution ──
//
// Maps a device's raw product name to (manufacturer, series) through an
// ordered pattern table. Unrecognized products resolve to the
// `UNKNOWN_MODEL` sentinel; resolution never fails.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::model::{Device, System};

/// Sentinel model for products no pattern matches.
pub const UNKNOWN_MODEL: &str = "Unknown model";

#[derive(Debug, Clone, Copy)]
struct ModelFamily {
    manufacturer: &'static str,
    series: &'static str,
}

const NIBE_F: ModelFamily = ModelFamily {
    manufacturer: "Nibe",
    series: "F",
};
const NIBE_S: ModelFamily = ModelFamily {
    manufacturer: "Nibe",
    series: "S",
};

/// Ordered model pattern table. Patterns are matched as substrings of
/// the raw product name (`"VVM320 E"` and `"VVM320X"` both match
/// `VVM320`), first match wins.
static MODEL_PATTERNS: LazyLock<Vec<(Regex, ModelFamily)>> = LazyLock::new(|| {
    [
        ("F1145", NIBE_F),
        ("F1155", NIBE_F),
        ("F1245", NIBE_F),
        ("F1255", NIBE_F),
        ("F1345", NIBE_F),
        ("F1355", NIBE_F),
        ("F370", NIBE_F),
        ("F470", NIBE_F),
        ("F730", NIBE_F),
        ("F750", NIBE_F),
        ("SMO20", NIBE_F),
        ("SMO40", NIBE_F),
        ("VVM225", NIBE_F),
        ("VVM310", NIBE_F),
        ("VVM320", NIBE_F),
        ("VVM325", NIBE_F),
        ("VVM500", NIBE_F),
        ("S1155", NIBE_S),
        ("S1255", NIBE_S),
        ("S1256", NIBE_S),
        ("S320", NIBE_S),
        ("S325", NIBE_S),
        ("S735", NIBE_S),
        ("S2125", NIBE_S),
        ("SMOS40", NIBE_S),
    ]
    .into_iter()
    .map(|(pattern, family)| {
        let regex = Regex::new(pattern).expect("static model pattern is valid");
        (regex, family)
    })
    .collect()
});

/// Display identity resolved for one device within its system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedNames {
    /// The system's display name, verbatim.
    pub name: String,
    /// Matched model key, or [`UNKNOWN_MODEL`].
    pub model: String,
    pub manufacturer: Option<String>,
    pub series: Option<String>,
}

/// Resolve display name, model, manufacturer, and series for a device.
///
/// Unrecognized product names resolve to [`UNKNOWN_MODEL`] with no
/// manufacturer/series rather than erroring out -- new products appear
/// in the cloud before any table knows about them.
pub fn resolve_names(system: &System, device: &Device) -> ResolvedNames {
    let product_name = device.product_name.as_deref().unwrap_or_default();

    for (pattern, family) in MODEL_PATTERNS.iter() {
        if pattern.is_match(product_name) {
            return ResolvedNames {
                name: system.name.clone(),
                model: pattern.as_str().to_owned(),
                manufacturer: Some(family.manufacturer.to_owned()),
                series: Some(family.series.to_owned()),
            };
        }
    }

    ResolvedNames {
        name: system.name.clone(),
        model: UNKNOWN_MODEL.to_owned(),
        manufacturer: None,
        series: None,
    }
}
