//! # Map Commands
//!
//! Loads the GeoJSON document once and hands the overlays to a surface.
//!
//! ## Source Document
//! ```text
//! --geojson PATH   ─┐
//! POCKET_GEOJSON_PATH ─┼──► first one set wins ──► read file
//! geojson_path (toml) ─┘
//!            (none) ────────────────────────────► bundled campus map
//! ```

use std::path::Path;

use serde::Serialize;
use tracing::{debug, info};

use crate::error::{AppError, AppResult};
use crate::render::TextSurface;
use crate::state::AppConfig;
use pocket_core::geo::Bounds;
use pocket_core::{GeoPoint, MapView, Overlay};

/// Campus map shipped inside the binary.
pub const BUNDLED_GEOJSON: &str = include_str!("../../../../assets/export.geojson");

/// Everything the map screen shows.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapResponse {
    pub source: String,
    pub center: GeoPoint,
    pub zoom: f64,
    pub polygons: usize,
    pub polylines: usize,
    pub bounds: Option<Bounds>,
    pub overlays: Vec<Overlay>,
    /// Text rendering of the overlays
    #[serde(skip)]
    pub rendered: Vec<String>,
}

/// Reads the configured document, or the bundled one.
pub async fn load_map(geojson_path: Option<&Path>) -> AppResult<(String, MapView)> {
    let (source, text) = match geojson_path {
        Some(path) => {
            let text = tokio::fs::read_to_string(path).await.map_err(|e| {
                AppError::not_found("GeoJSON file", format!("{} ({})", path.display(), e))
            })?;
            (path.display().to_string(), text)
        }
        None => ("bundled".to_string(), BUNDLED_GEOJSON.to_string()),
    };

    let view = MapView::from_geojson(&text)?;
    info!(
        source = %source,
        polygons = view.polygon_count(),
        polylines = view.polyline_count(),
        "Map loaded"
    );
    Ok((source, view))
}

/// Builds the map screen.
///
/// ## Arguments
/// * `override_path` - `map --geojson PATH`, wins over the config
pub async fn show_map(config: &AppConfig, override_path: Option<&Path>) -> AppResult<MapResponse> {
    let path = override_path.or(config.geojson_path.as_deref());
    debug!(?path, "show_map command");

    let (source, view) = load_map(path).await?;

    let mut surface = TextSurface::new();
    view.render_onto(&mut surface);

    Ok(MapResponse {
        source,
        center: view.center,
        zoom: view.zoom,
        polygons: view.polygon_count(),
        polylines: view.polyline_count(),
        bounds: view.bounds(),
        overlays: view.overlays,
        rendered: surface.into_lines(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use pocket_core::{MAP_CENTER, MAP_ZOOM};

    #[tokio::test]
    async fn test_bundled_map_has_overlays() {
        let response = show_map(&AppConfig::default(), None).await.unwrap();
        assert_eq!(response.source, "bundled");
        assert_eq!(response.center, MAP_CENTER);
        assert_eq!(response.zoom, MAP_ZOOM);
        assert!(response.polygons > 0);
        assert!(response.polylines > 0);
        assert!(response.bounds.is_some());
        assert!(response.rendered[0].starts_with("center"));
    }

    #[tokio::test]
    async fn test_override_path_wins() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("one.geojson");
        std::fs::write(
            &path,
            r#"{"type":"FeatureCollection","features":[
                {"type":"Feature","geometry":{"type":"LineString","coordinates":[[-82.4,22.9],[-82.5,23.0]]}}
            ]}"#,
        )
        .unwrap();

        let response = show_map(&AppConfig::default(), Some(&path)).await.unwrap();
        assert_eq!((response.polygons, response.polylines), (0, 1));
        assert_eq!(response.overlays[0].points()[0], GeoPoint::new(22.9, -82.4));
    }

    #[tokio::test]
    async fn test_missing_and_malformed_files() {
        let dir = tempfile::tempdir().unwrap();

        let err = show_map(&AppConfig::default(), Some(&dir.path().join("none.geojson")))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        let bad = dir.path().join("bad.geojson");
        std::fs::write(&bad, "not json").unwrap();
        let err = show_map(&AppConfig::default(), Some(&bad)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::MapError);
    }
}
