use crate::index::WINDOW_SIZE;
use crate::types::{
    DENSITY_MIN_BASES_PER_PIXEL, DETAIL_MAX_BASES_PER_PIXEL, DensityCapabilities, ServiceInfo,
    ServiceType,
};
use axum::Json;

pub async fn service_info() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        id: "org.example.readdensity".to_string(),
        name: "readdensity".to_string(),
        r#type: ServiceType {
            group: "org.example".to_string(),
            artifact: "coverage".to_string(),
            version: "1.0.0".to_string(),
        },
        description: Some("Index-driven read density estimation for BAM files".to_string()),
        version: env!("CARGO_PKG_VERSION").to_string(),
        density: DensityCapabilities {
            window_size: WINDOW_SIZE,
            detail_max_bases_per_pixel: DETAIL_MAX_BASES_PER_PIXEL,
            density_min_bases_per_pixel: DENSITY_MIN_BASES_PER_PIXEL,
        },
    })
}
