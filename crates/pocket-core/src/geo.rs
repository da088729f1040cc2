//! # Geo Module
//!
//! Turns a GeoJSON-like feature collection into overlays for the map screen.
//!
//! ## Transform
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    GeoJSON text → Overlays                              │
//! │                                                                         │
//! │  { "features": [                                                        │
//! │      { "geometry": { "type": "Polygon",                                 │
//! │                      "coordinates": [[[lon,lat], ...], [hole...]] } },  │
//! │      { "geometry": { "type": "LineString",                              │
//! │                      "coordinates": [[lon,lat], ...] } },               │
//! │      { "geometry": { "type": "Point", ... } }                           │
//! │  ] }                                                                    │
//! │        │                                                                │
//! │        ▼  build_overlays()                                              │
//! │                                                                         │
//! │  Polygon    ──► Overlay::Polygon  (first ring only, filled red 0x50)    │
//! │  LineString ──► Overlay::Polyline (whole path, blue, width 5)           │
//! │  anything else / null geometry ──► skipped                              │
//! │                                                                         │
//! │  Every [lon, lat] pair becomes GeoPoint { lat, lon }.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The result is handed once to an [`OverlaySurface`]; nothing here keeps
//! rendering state.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::GeoError;
use crate::{MAP_CENTER, MAP_ZOOM};

// =============================================================================
// Document Types
// =============================================================================

/// The parsed document. Only the parts the map screen reads are modelled.
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Feature {
    #[serde(default)]
    pub geometry: Option<Geometry>,

    #[serde(default)]
    pub properties: Option<serde_json::Map<String, Value>>,
}

/// Geometry with its coordinates left untyped until the type is known.
#[derive(Debug, Clone, Deserialize)]
pub struct Geometry {
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default)]
    pub coordinates: Value,
}

impl FeatureCollection {
    /// Parses a feature collection from JSON text.
    pub fn from_json(text: &str) -> Result<Self, GeoError> {
        Ok(serde_json::from_str(text)?)
    }
}

impl Feature {
    /// The `name` property, when there is one.
    pub fn name(&self) -> Option<&str> {
        self.properties.as_ref()?.get("name")?.as_str()
    }
}

// =============================================================================
// Overlay Types
// =============================================================================

/// A map position in (latitude, longitude) order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lon: f64) -> Self {
        GeoPoint { lat, lon }
    }
}

/// Fill and outline of a polygon overlay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolygonStyle {
    /// ARGB fill colour.
    pub fill_argb: u32,
    pub stroke_width: f32,
}

/// Stroke of a polyline overlay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineStyle {
    /// ARGB stroke colour.
    pub color_argb: u32,
    pub width: f32,
}

/// Semi-transparent red.
pub const POLYGON_STYLE: PolygonStyle = PolygonStyle {
    fill_argb: 0x50FF_0000,
    stroke_width: 2.0,
};

/// Opaque blue.
pub const LINE_STYLE: LineStyle = LineStyle {
    color_argb: 0xFF00_00FF,
    width: 5.0,
};

/// A drawable shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Overlay {
    Polygon {
        label: Option<String>,
        points: Vec<GeoPoint>,
        style: PolygonStyle,
    },
    Polyline {
        label: Option<String>,
        points: Vec<GeoPoint>,
        style: LineStyle,
    },
}

impl Overlay {
    pub fn points(&self) -> &[GeoPoint] {
        match self {
            Overlay::Polygon { points, .. } | Overlay::Polyline { points, .. } => points,
        }
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            Overlay::Polygon { label, .. } | Overlay::Polyline { label, .. } => label.as_deref(),
        }
    }
}

// =============================================================================
// Coordinate Extraction
// =============================================================================

/// Reads one `[lon, lat, (alt)]` position.
fn position(value: &Value) -> Result<GeoPoint, String> {
    let items = value
        .as_array()
        .ok_or_else(|| format!("position must be an array, got {}", value))?;

    match (items.first().and_then(Value::as_f64), items.get(1).and_then(Value::as_f64)) {
        (Some(lon), Some(lat)) => Ok(GeoPoint::new(lat, lon)),
        _ => Err("position needs at least 2 numbers".to_string()),
    }
}

/// Reads an array of positions.
fn positions(value: &Value) -> Result<Vec<GeoPoint>, String> {
    value
        .as_array()
        .ok_or_else(|| "coordinates must be an array of positions".to_string())?
        .iter()
        .map(position)
        .collect()
}

/// Reads the outer ring of a polygon. Holes are ignored.
fn outer_ring(value: &Value) -> Result<Vec<GeoPoint>, String> {
    let ring = value
        .as_array()
        .ok_or_else(|| "polygon coordinates must be an array of rings".to_string())?
        .first()
        .ok_or_else(|| "polygon has no rings".to_string())?;
    positions(ring)
}

// =============================================================================
// Transform
// =============================================================================

/// Converts every Polygon and LineString feature into an overlay, in
/// document order.
///
/// ## Example
/// ```rust
/// use pocket_core::geo::{build_overlays, FeatureCollection};
///
/// let doc = r#"{"features":[
///   {"geometry":{"type":"LineString","coordinates":[[-82.46,22.99],[-82.47,22.98]]}},
///   {"geometry":{"type":"Point","coordinates":[-82.46,22.99]}}
/// ]}"#;
/// let overlays = build_overlays(&FeatureCollection::from_json(doc).unwrap()).unwrap();
/// assert_eq!(overlays.len(), 1);
/// assert_eq!(overlays[0].points()[0].lat, 22.99);
/// ```
pub fn build_overlays(collection: &FeatureCollection) -> Result<Vec<Overlay>, GeoError> {
    let mut overlays = Vec::new();

    for (index, feature) in collection.features.iter().enumerate() {
        let Some(geometry) = &feature.geometry else {
            continue;
        };
        let label = feature.name().map(str::to_string);
        let invalid = |reason: String| GeoError::InvalidCoordinates {
            index,
            kind: geometry.kind.clone(),
            reason,
        };

        match geometry.kind.as_str() {
            "Polygon" => overlays.push(Overlay::Polygon {
                label,
                points: outer_ring(&geometry.coordinates).map_err(invalid)?,
                style: POLYGON_STYLE,
            }),
            "LineString" => overlays.push(Overlay::Polyline {
                label,
                points: positions(&geometry.coordinates).map_err(invalid)?,
                style: LINE_STYLE,
            }),
            _ => {}
        }
    }

    Ok(overlays)
}

// =============================================================================
// Map View
// =============================================================================

/// Anything the map screen can draw onto.
pub trait OverlaySurface {
    /// Positions the camera.
    fn set_center(&mut self, center: GeoPoint, zoom: f64);

    /// Adds one shape on top of those already added.
    fn add_overlay(&mut self, overlay: &Overlay);

    /// Called once after the last overlay.
    fn invalidate(&mut self) {}
}

/// Smallest box containing every overlay point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    pub south_west: GeoPoint,
    pub north_east: GeoPoint,
}

/// The map screen's content: a fixed camera plus the overlays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    pub center: GeoPoint,
    pub zoom: f64,
    pub overlays: Vec<Overlay>,
}

impl MapView {
    /// Parses the document and builds the view centred on the campus.
    pub fn from_geojson(text: &str) -> Result<Self, GeoError> {
        Self::from_collection(&FeatureCollection::from_json(text)?)
    }

    pub fn from_collection(collection: &FeatureCollection) -> Result<Self, GeoError> {
        Ok(MapView {
            center: MAP_CENTER,
            zoom: MAP_ZOOM,
            overlays: build_overlays(collection)?,
        })
    }

    /// Hands the camera and every overlay to a surface, then invalidates it.
    pub fn render_onto<S: OverlaySurface + ?Sized>(&self, surface: &mut S) {
        surface.set_center(self.center, self.zoom);
        for overlay in &self.overlays {
            surface.add_overlay(overlay);
        }
        surface.invalidate();
    }

    pub fn polygon_count(&self) -> usize {
        self.overlays
            .iter()
            .filter(|o| matches!(o, Overlay::Polygon { .. }))
            .count()
    }

    pub fn polyline_count(&self) -> usize {
        self.overlays.len() - self.polygon_count()
    }

    /// Bounding box of all overlay points, or `None` with no points.
    pub fn bounds(&self) -> Option<Bounds> {
        let mut points = self.overlays.iter().flat_map(|o| o.points().iter());
        let first = *points.next()?;

        let (sw, ne) = points.fold((first, first), |(sw, ne), p| {
            (
                GeoPoint::new(sw.lat.min(p.lat), sw.lon.min(p.lon)),
                GeoPoint::new(ne.lat.max(p.lat), ne.lon.max(p.lon)),
            )
        });

        Some(Bounds {
            south_west: sw,
            north_east: ne,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": { "name": "Docente 3" },
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [
                        [[-82.4660, 22.9900], [-82.4650, 22.9900], [-82.4650, 22.9910], [-82.4660, 22.9900]],
                        [[-82.4658, 22.9902], [-82.4656, 22.9902], [-82.4658, 22.9902]]
                    ]
                }
            },
            {
                "type": "Feature",
                "properties": {},
                "geometry": {
                    "type": "LineString",
                    "coordinates": [[-82.4670, 22.9890, 12.0], [-82.4640, 22.9920]]
                }
            },
            {
                "type": "Feature",
                "geometry": { "type": "Point", "coordinates": [-82.4659, 22.9903] }
            },
            { "type": "Feature", "geometry": null }
        ]
    }"#;

    #[derive(Default)]
    struct RecordingSurface {
        center: Option<(GeoPoint, f64)>,
        overlays: Vec<Overlay>,
        invalidated: usize,
    }

    impl OverlaySurface for RecordingSurface {
        fn set_center(&mut self, center: GeoPoint, zoom: f64) {
            self.center = Some((center, zoom));
        }

        fn add_overlay(&mut self, overlay: &Overlay) {
            self.overlays.push(overlay.clone());
        }

        fn invalidate(&mut self) {
            self.invalidated += 1;
        }
    }

    #[test]
    fn test_polygon_uses_first_ring_with_swapped_axes() {
        let view = MapView::from_geojson(DOC).unwrap();

        let Overlay::Polygon { points, style, label } = &view.overlays[0] else {
            panic!("expected polygon first");
        };
        assert_eq!(points.len(), 4);
        assert_eq!(points[0], GeoPoint::new(22.9900, -82.4660));
        assert_eq!(points[2], GeoPoint::new(22.9910, -82.4650));
        assert_eq!(*style, POLYGON_STYLE);
        assert_eq!(label.as_deref(), Some("Docente 3"));
    }

    #[test]
    fn test_linestring_keeps_whole_path_and_ignores_altitude() {
        let view = MapView::from_geojson(DOC).unwrap();

        let Overlay::Polyline { points, style, label } = &view.overlays[1] else {
            panic!("expected polyline second");
        };
        assert_eq!(
            points,
            &vec![GeoPoint::new(22.9890, -82.4670), GeoPoint::new(22.9920, -82.4640)]
        );
        assert_eq!(style.color_argb, 0xFF0000FF);
        assert_eq!(style.width, 5.0);
        assert!(label.is_none());
    }

    #[test]
    fn test_unknown_and_null_geometries_are_skipped() {
        let view = MapView::from_geojson(DOC).unwrap();
        assert_eq!(view.overlays.len(), 2);
        assert_eq!(view.polygon_count(), 1);
        assert_eq!(view.polyline_count(), 1);
    }

    #[test]
    fn test_view_is_centred_on_campus() {
        let view = MapView::from_geojson(r#"{"features": []}"#).unwrap();
        assert_eq!(view.center, GeoPoint::new(22.990278, -82.465833));
        assert_eq!(view.zoom, 17.0);
        assert!(view.overlays.is_empty());
        assert!(view.bounds().is_none());
    }

    #[test]
    fn test_render_onto_hands_everything_over_once() {
        let view = MapView::from_geojson(DOC).unwrap();
        let mut surface = RecordingSurface::default();

        view.render_onto(&mut surface);

        assert_eq!(surface.center, Some((MAP_CENTER, MAP_ZOOM)));
        assert_eq!(surface.overlays, view.overlays);
        assert_eq!(surface.invalidated, 1);
    }

    #[test]
    fn test_bounds() {
        let view = MapView::from_geojson(DOC).unwrap();
        let bounds = view.bounds().unwrap();
        assert_eq!(bounds.south_west, GeoPoint::new(22.9890, -82.4670));
        assert_eq!(bounds.north_east, GeoPoint::new(22.9920, -82.4640));
    }

    #[test]
    fn test_malformed_document_is_an_error() {
        assert!(matches!(
            MapView::from_geojson("not json"),
            Err(GeoError::InvalidDocument(_))
        ));
        assert!(matches!(
            MapView::from_geojson(r#"{"type": "FeatureCollection"}"#),
            Err(GeoError::InvalidDocument(_))
        ));
    }

    #[test]
    fn test_bad_coordinates_name_the_feature() {
        let doc = r#"{"features": [
            {"geometry": {"type": "Point", "coordinates": [0, 0]}},
            {"geometry": {"type": "LineString", "coordinates": [[1.0], [2.0, 3.0]]}}
        ]}"#;
        match MapView::from_geojson(doc) {
            Err(GeoError::InvalidCoordinates { index, kind, .. }) => {
                assert_eq!(index, 1);
                assert_eq!(kind, "LineString");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_polygon_without_rings_is_an_error() {
        let doc = r#"{"features": [{"geometry": {"type": "Polygon", "coordinates": []}}]}"#;
        assert!(matches!(
            MapView::from_geojson(doc),
            Err(GeoError::InvalidCoordinates { index: 0, .. })
        ));
    }

    #[test]
    fn test_overlay_serializes_with_kind_tag() {
        let overlay = Overlay::Polyline {
            label: None,
            points: vec![GeoPoint::new(1.0, 2.0)],
            style: LINE_STYLE,
        };
        let json = serde_json::to_value(&overlay).unwrap();
        assert_eq!(json["kind"], "polyline");
        assert_eq!(json["style"]["colorArgb"], 0xFF0000FFu32);
    }
}
