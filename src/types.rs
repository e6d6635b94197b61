use serde::{Deserialize, Serialize};

/// Bases per pixel at or below which individual reads are drawn in detail.
pub const DETAIL_MAX_BASES_PER_PIXEL: f64 = 25.0;

/// Bases per pixel from which coverage is estimated from the index alone.
pub const DENSITY_MIN_BASES_PER_PIXEL: f64 = 8.0 * 1024.0;

/// How much of an alignment file a view of a region needs to touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Fidelity {
    /// Every read with its fields.
    Detail,
    /// Every overlapping read aggregated per pixel.
    Summary,
    /// Estimated from the linear index without decoding records.
    Density,
}

impl Fidelity {
    /// Pick the fidelity for `start..=end` drawn across `pixel_width` pixels.
    pub fn for_region(start: u64, end: u64, pixel_width: u32) -> Self {
        let bases = end.saturating_sub(start) + 1;
        let bpp = bases as f64 / pixel_width.max(1) as f64;
        if bpp <= DETAIL_MAX_BASES_PER_PIXEL {
            Fidelity::Detail
        } else if bpp < DENSITY_MIN_BASES_PER_PIXEL {
            Fidelity::Summary
        } else {
            Fidelity::Density
        }
    }
}

/// Query parameters for coverage requests
#[derive(Debug, Deserialize, Default)]
pub struct CoverageQuery {
    #[serde(rename = "referenceName")]
    pub reference_name: Option<String>,
    pub start: Option<u64>,
    pub end: Option<u64>,
    pub width: Option<u32>,
    pub step: Option<u32>,
}

/// Coverage response body
#[derive(Debug, Serialize)]
pub struct CoverageResponse {
    pub coverage: CoverageValues,
}

#[derive(Debug, Serialize)]
pub struct CoverageValues {
    #[serde(rename = "referenceName")]
    pub reference_name: String,
    pub from: u64,
    pub to: u64,
    pub step: u32,
    /// Fidelity a renderer would choose for this request. Values are always
    /// the index estimate.
    pub fidelity: Fidelity,
    pub values: Vec<f64>,
    /// Values truncated to integers and joined with `;`.
    #[serde(rename = "valueList")]
    pub value_list: String,
}

/// Service info response
#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub id: String,
    pub name: String,
    pub r#type: ServiceType,
    pub description: Option<String>,
    pub version: String,
    pub density: DensityCapabilities,
}

#[derive(Debug, Serialize)]
pub struct ServiceType {
    pub group: String,
    pub artifact: String,
    pub version: String,
}

#[derive(Debug, Serialize)]
pub struct DensityCapabilities {
    #[serde(rename = "windowSize")]
    pub window_size: u64,
    #[serde(rename = "detailMaxBasesPerPixel")]
    pub detail_max_bases_per_pixel: f64,
    #[serde(rename = "densityMinBasesPerPixel")]
    pub density_min_bases_per_pixel: f64,
}
