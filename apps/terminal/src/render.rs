//! # Text Rendering
//!
//! Plain-text views of each screen, plus [`TextSurface`], the terminal's
//! [`OverlaySurface`].

use std::fmt::Write as _;

use pocket_core::{GeoPoint, Overlay, OverlaySurface};

use crate::commands::bills::BillSummary;
use crate::commands::map::MapResponse;
use crate::commands::orders::OrderListResponse;
use crate::commands::profit::ProfitResponse;
use crate::commands::qr::QrStatus;
use crate::navigation::Screen;

// =============================================================================
// Overlay Surface
// =============================================================================

/// Collects one text line per drawing call.
#[derive(Debug, Default)]
pub struct TextSurface {
    lines: Vec<String>,
    overlays: usize,
}

impl TextSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

fn point(p: GeoPoint) -> String {
    format!("{:.6}, {:.6}", p.lat, p.lon)
}

impl OverlaySurface for TextSurface {
    fn set_center(&mut self, center: GeoPoint, zoom: f64) {
        self.lines
            .push(format!("center {} zoom {}", point(center), zoom));
    }

    fn add_overlay(&mut self, overlay: &Overlay) {
        self.overlays += 1;
        let label = overlay.label().unwrap_or("-");
        let points = overlay.points();
        let first = points.first().map(|p| point(*p)).unwrap_or_default();

        let line = match overlay {
            Overlay::Polygon { style, .. } => format!(
                "#{:<3} polygon  {:<28} {:>4} pts  fill #{:08X} stroke {:.1}  from {}",
                self.overlays,
                label,
                points.len(),
                style.fill_argb,
                style.stroke_width,
                first
            ),
            Overlay::Polyline { style, .. } => format!(
                "#{:<3} polyline {:<28} {:>4} pts  line #{:08X} width {:.1}  from {}",
                self.overlays,
                label,
                points.len(),
                style.color_argb,
                style.width,
                first
            ),
        };
        self.lines.push(line);
    }

    fn invalidate(&mut self) {
        self.lines.push(format!("{} overlays drawn", self.overlays));
    }
}

// =============================================================================
// Screens
// =============================================================================

fn header(out: &mut String, screen: Screen) {
    let title = screen.title();
    let _ = writeln!(out, "== {} ({}) ==", title, screen.route());
}

pub fn main_menu(qr: &QrStatus) -> String {
    let mut out = String::new();
    header(&mut out, Screen::MainMenu);
    for (i, screen) in Screen::MENU.iter().enumerate() {
        let _ = writeln!(out, "  {}. {:<16} [{}]", i + 1, screen.title(), screen.route());
    }
    out.push('\n');
    match (&qr.path, qr.size_bytes) {
        (Some(path), Some(size)) if qr.loaded => {
            let _ = writeln!(out, "QR image: {} ({} bytes)", path.display(), size);
        }
        _ => out.push_str("No image loaded.\n"),
    }
    out
}

pub fn bills(summary: &BillSummary) -> String {
    let mut out = String::new();
    header(&mut out, Screen::BillCounter);
    let _ = writeln!(out, "Total: {}", summary.total_display);
    for row in &summary.rows {
        let _ = writeln!(out, "  {:>5} x {:>6}", row.denomination, row.display);
    }
    out
}

pub fn orders(list: &OrderListResponse) -> String {
    let mut out = String::new();
    header(&mut out, Screen::Orders);
    if list.orders.is_empty() {
        out.push_str("  (no orders)\n");
    }
    for order in &list.orders {
        let _ = writeln!(
            out,
            "  #{:<4} Apartment: {}  Description: {}",
            order.id, order.apartment, order.description
        );
    }
    out
}

pub fn profit(response: &ProfitResponse) -> String {
    let mut out = String::new();
    header(&mut out, Screen::Profitability);
    let _ = writeln!(out, "Purchase price: {}", response.purchase_price);
    let _ = writeln!(out, "Sale price:     {}", response.sale_price);
    let _ = writeln!(out, "Profit per 1000: {}", response.profit_display);
    out
}

pub fn map(response: &MapResponse) -> String {
    let mut out = String::new();
    header(&mut out, Screen::Map);
    let _ = writeln!(
        out,
        "source {}: {} polygons, {} polylines",
        response.source, response.polygons, response.polylines
    );
    if let Some(bounds) = &response.bounds {
        let _ = writeln!(
            out,
            "bounds {} .. {}",
            point(bounds.south_west),
            point(bounds.north_east)
        );
    }
    for line in &response.rendered {
        let _ = writeln!(out, "  {}", line);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pocket_core::geo::{LINE_STYLE, POLYGON_STYLE};
    use pocket_core::{MapView, Order};

    #[test]
    fn test_surface_records_center_overlays_and_invalidate() {
        let view = MapView {
            center: GeoPoint::new(22.990278, -82.465833),
            zoom: 17.0,
            overlays: vec![
                Overlay::Polygon {
                    label: Some("Docente 1".into()),
                    points: vec![GeoPoint::new(22.99, -82.46); 4],
                    style: POLYGON_STYLE,
                },
                Overlay::Polyline {
                    label: None,
                    points: vec![GeoPoint::new(22.98, -82.47); 2],
                    style: LINE_STYLE,
                },
            ],
        };

        let mut surface = TextSurface::new();
        view.render_onto(&mut surface);
        let lines = surface.into_lines();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "center 22.990278, -82.465833 zoom 17");
        assert!(lines[1].contains("polygon") && lines[1].contains("#50FF0000"));
        assert!(lines[2].contains("polyline") && lines[2].contains("#FF0000FF"));
        assert_eq!(lines[3], "2 overlays drawn");
    }

    #[test]
    fn test_orders_and_empty_qr_text() {
        let list = OrderListResponse {
            orders: vec![Order::new("A2", "noise", 1)],
            count: 1,
            next_id: 2,
        };
        assert!(orders(&list).contains("Apartment: A2  Description: noise"));

        let qr = QrStatus {
            loaded: false,
            path: None,
            size_bytes: None,
        };
        assert!(main_menu(&qr).contains("No image loaded."));
    }
}
