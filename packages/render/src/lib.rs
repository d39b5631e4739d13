#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Self-contained HTML map document for scored census tracts.
//!
//! The document loads Leaflet from a CDN and draws three marker layers
//! from an embedded JSON config. Every dynamic string is escaped before it
//! reaches the page.

pub mod html;
pub mod intro;
pub mod jitter;
pub mod legend;
pub mod markers;

use std::path::Path;

use gentrification_map_region::RegionDefinition;
use gentrification_map_scoring_models::ScoredRegion;
use serde::Serialize;

pub use legend::SourceStatus;
pub use markers::{Layer, MarkerSpec, build_markers};

/// Errors that can occur while producing the map document.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The marker config could not be serialized.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// The document could not be written.
    #[error("Failed to write {path}: {source}")]
    Io {
        /// Destination path.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";
const TILE_URL: &str = "https://{s}.basemap.cartocdn.com/light_all/{z}/{x}/{y}{r}.png";
const TILE_ATTRIBUTION: &str = "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors &copy; <a href=\"https://carto.com/attributions\">CARTO</a>";

/// Draws the markers in `MAP_CONFIG`.
const MAP_SCRIPT: &str = r#"
(function () {
  var cfg = MAP_CONFIG;

  function hexToRgba(hex, alpha) {
    var n = parseInt(hex.slice(1), 16);
    return 'rgba(' + ((n >> 16) & 255) + ',' + ((n >> 8) & 255) + ',' + (n & 255) + ',' + alpha + ')';
  }

  var map = L.map('map').setView(cfg.center, cfg.zoom);
  L.tileLayer(cfg.tileUrl, {
    attribution: cfg.tileAttribution,
    subdomains: 'abcd',
    maxZoom: 20
  }).addTo(map);

  var groups = {};
  cfg.layers.forEach(function (layer) {
    groups[layer.id] = L.layerGroup().addTo(map);
  });

  cfg.markers.forEach(function (m) {
    var marker;
    if (m.shape === 'square') {
      var size = m.radius * 2;
      marker = L.marker([m.lat, m.lon], {
        icon: L.divIcon({
          className: '',
          iconSize: [size, size],
          iconAnchor: [m.radius, m.radius],
          html: '<div style="width:' + size + 'px;height:' + size + 'px;background:' +
            hexToRgba(m.fillColor, m.fillOpacity) + ';border:' + m.weight +
            'px solid ' + m.outlineColor + ';box-sizing:border-box;"></div>'
        })
      });
    } else {
      marker = L.circleMarker([m.lat, m.lon], {
        radius: m.radius,
        weight: m.weight,
        color: m.outlineColor,
        opacity: 1,
        fillColor: m.fillColor,
        fillOpacity: m.fillOpacity
      });
    }
    marker.bindPopup(m.popup, { maxWidth: 300 });
    marker.addTo(groups[m.layer]);
  });

  var overlays = {};
  cfg.layers.forEach(function (layer) {
    overlays[layer.name] = groups[layer.id];
  });
  L.control.layers(null, overlays, { collapsed: false }).addTo(map);
})();
"#;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LayerConfig {
    id: Layer,
    name: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MapConfig<'a> {
    center: [f64; 2],
    zoom: u8,
    tile_url: &'static str,
    tile_attribution: &'static str,
    layers: Vec<LayerConfig>,
    markers: &'a [MarkerSpec],
}

const fn layer_name(layer: Layer) -> &'static str {
    match layer {
        Layer::Income => "Income Levels",
        Layer::Education => "Education Levels",
        Layer::Risk => "Gentrification Risk",
    }
}

/// Renders the complete HTML document.
///
/// The intro overlay is the first child of `<body>`, followed by the map
/// container and the legend.
///
/// # Errors
///
/// * [`RenderError::Json`] - If the marker config fails to serialize
pub fn render_document(
    region: &RegionDefinition,
    sources: &[SourceStatus],
    scored: &[ScoredRegion],
) -> Result<String, RenderError> {
    let markers = build_markers(
        scored,
        (region.center_lat(), region.center_lon()),
        &region.scoring.thresholds,
    );

    let config = MapConfig {
        center: region.center,
        zoom: region.zoom,
        tile_url: TILE_URL,
        tile_attribution: TILE_ATTRIBUTION,
        layers: Layer::ALL
            .iter()
            .map(|&id| LayerConfig {
                id,
                name: layer_name(id),
            })
            .collect(),
        markers: &markers,
    };
    let config_json = html::script_safe_json(&config)?;

    let title = format!("{} Gentrification Risk Map", region.name);
    let title = html_escape::encode_safe(&title);
    let intro = intro::intro_modal_html(&region.intro);
    let legend = legend::legend_html(&region.name, region.acs_year, scored.len(), sources);

    log::debug!(
        "Rendering {} markers for {} tracts in {}",
        markers.len(),
        scored.len(),
        region.id
    );

    Ok(format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n\
         <title>{title}</title>\n\
         <link rel=\"stylesheet\" href=\"{LEAFLET_CSS}\">\n\
         <script src=\"{LEAFLET_JS}\"></script>\n\
         <style>html, body {{ margin: 0; padding: 0; height: 100%; }} #map {{ position: absolute; top: 0; bottom: 0; width: 100%; }}</style>\n\
         </head>\n\
         <body>\n\
         {intro}\
         <div id=\"map\"></div>\n\
         {legend}\
         <script>\n\
         var MAP_CONFIG = {config_json};\n\
         {MAP_SCRIPT}\
         </script>\n\
         </body>\n\
         </html>\n"
    ))
}

/// Writes a rendered document to `path`.
///
/// # Errors
///
/// * [`RenderError::Io`] - If the file cannot be written
pub fn write_document(path: &Path, html: &str) -> Result<(), RenderError> {
    std::fs::write(path, html).map_err(|source| RenderError::Io {
        path: path.display().to_string(),
        source,
    })?;
    log::info!("Map saved as {}", path.display());
    Ok(())
}
