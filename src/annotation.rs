//! Reference zones marked identically on every map.
//!
//! The same four places are labelled on both projections so a reader can
//! compare how each projection moves and stretches them.

use crate::projection::MapProjection;
use crate::render::{HAlign, Layer, Marker, Panel, TextBox, TextLabel, TextStyle, VAlign};

/// Distance in degrees of latitude from a marker down to the top of its label
pub const LABEL_OFFSET_DEG: f64 = 8.0;

const MARKER_SIZE_PT: f64 = 8.0;
const LABEL_SIZE_PT: f64 = 9.0;
const LABEL_BOX: TextBox = TextBox {
    facecolor: [255, 255, 0, 255],
    alpha: 0.7,
    pad_em: 0.4,
};

/// A labelled point of interest
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Zone {
    pub lon: f64,
    pub lat: f64,
    pub label: &'static str,
}

/// The zones marked on both panels
pub const EXAMPLE_ZONES: [Zone; 4] = [
    Zone {
        lon: -80.0,
        lat: 10.0,
        label: "Zone\nTropicale",
    },
    Zone {
        lon: 20.0,
        lat: -20.0,
        label: "Afrique",
    },
    Zone {
        lon: 100.0,
        lat: 50.0,
        label: "Asie\nCentrale",
    },
    Zone {
        lon: -100.0,
        lat: 60.0,
        label: "Amérique\ndu Nord",
    },
];

/// Add a black marker and a boxed label for each zone, both given in plain
/// longitude/latitude. Labels hang below their anchor so multi-line text
/// grows away from the marker.
pub fn annotate_zones(panel: &mut Panel, zones: &[Zone]) {
    for zone in zones {
        panel.add_layer(Layer::Marker(Marker {
            x: zone.lon,
            y: zone.lat,
            transform: MapProjection::PlateCarree,
            size_pt: MARKER_SIZE_PT,
            color: [0, 0, 0, 255],
        }));
        panel.add_layer(Layer::Text(TextLabel {
            x: zone.lon,
            y: zone.lat - LABEL_OFFSET_DEG,
            transform: MapProjection::PlateCarree,
            text: zone.label.to_string(),
            style: TextStyle::new(LABEL_SIZE_PT).bold(),
            halign: HAlign::Center,
            valign: VAlign::Top,
            bbox: Some(LABEL_BOX),
        }));
    }
}
