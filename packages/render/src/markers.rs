//! Marker layers and per-tract marker construction.
//!
//! Every scored tract gets three markers stacked vertically around its
//! jittered position: a large income circle in the middle, a small
//! education circle above it, and a risk square below it.

use gentrification_map_census_models::tract_code;
use gentrification_map_scoring_models::{ScoredRegion, Tier, TierThresholds};
use html_escape::encode_safe;
use serde::Serialize;

use crate::html::format_dollars;
use crate::jitter::jitter_offsets;

/// Latitude distance between the income marker and its neighbours.
const STACK_OFFSET: f64 = 0.015;

/// Stroke colour shared by every marker.
pub const MARKER_OUTLINE: &str = "black";

/// One visual layer of the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Layer {
    Income,
    Education,
    Risk,
}

impl Layer {
    pub const ALL: &[Self] = &[Self::Income, Self::Education, Self::Risk];

    /// Fill colour for a tier on this layer.
    #[must_use]
    pub const fn color(self, tier: Tier) -> &'static str {
        match (self, tier) {
            (Self::Income, Tier::High) => "#FF1744",
            (Self::Income, Tier::Medium) => "#FF9800",
            (Self::Income, Tier::Low) => "#4CAF50",
            (Self::Education, Tier::High) => "#9C27B0",
            (Self::Education, Tier::Medium) => "#2196F3",
            (Self::Education, Tier::Low) => "#093A28",
            (Self::Risk, Tier::High) => "#740127",
            (Self::Risk, Tier::Medium) => "#FFFB0A",
            (Self::Risk, Tier::Low) => "#5DD270",
        }
    }

    /// Full tier label shown in popups, e.g. "High Income".
    #[must_use]
    pub const fn tier_label(self, tier: Tier) -> &'static str {
        match (self, tier) {
            (Self::Income, Tier::High) => "High Income",
            (Self::Income, Tier::Medium) => "Medium Income",
            (Self::Income, Tier::Low) => "Low Income",
            (Self::Education, Tier::High) => "High Education",
            (Self::Education, Tier::Medium) => "Medium Education",
            (Self::Education, Tier::Low) => "Low Education",
            (Self::Risk, Tier::High) => "High Gentrification Risk",
            (Self::Risk, Tier::Medium) => "Medium Gentrification Risk",
            (Self::Risk, Tier::Low) => "Low Gentrification Risk",
        }
    }

    const fn style(self) -> MarkerStyle {
        match self {
            Self::Income => MarkerStyle {
                shape: MarkerShape::Circle,
                radius: 8,
                weight: 2,
                fill_opacity: 0.9,
                lat_offset: 0.0,
            },
            Self::Education => MarkerStyle {
                shape: MarkerShape::Circle,
                radius: 4,
                weight: 1,
                fill_opacity: 0.8,
                lat_offset: STACK_OFFSET,
            },
            Self::Risk => MarkerStyle {
                shape: MarkerShape::Square,
                radius: 5,
                weight: 1,
                fill_opacity: 0.8,
                lat_offset: -STACK_OFFSET,
            },
        }
    }

    /// The score this layer visualises.
    #[must_use]
    pub const fn score(self, scored: &ScoredRegion) -> f64 {
        match self {
            Self::Income => scored.scores.income,
            Self::Education => scored.scores.education,
            Self::Risk => scored.composite,
        }
    }
}

/// Marker geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerShape {
    Circle,
    Square,
}

struct MarkerStyle {
    shape: MarkerShape,
    radius: u8,
    weight: u8,
    fill_opacity: f64,
    lat_offset: f64,
}

/// A marker as consumed by the embedded map script.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerSpec {
    pub layer: Layer,
    pub shape: MarkerShape,
    pub lat: f64,
    pub lon: f64,
    pub radius: u8,
    pub weight: u8,
    pub outline_color: &'static str,
    pub fill_color: &'static str,
    pub fill_opacity: f64,
    pub tier: Tier,
    /// Popup HTML. Dynamic values are already escaped.
    pub popup: String,
}

/// Builds one marker per (tract, layer) pair, in tract order.
#[must_use]
pub fn build_markers(
    scored: &[ScoredRegion],
    center: (f64, f64),
    thresholds: &TierThresholds,
) -> Vec<MarkerSpec> {
    let mut markers = Vec::with_capacity(scored.len() * Layer::ALL.len());

    for region in scored {
        let (lat_jitter, lon_jitter) = jitter_offsets(&region.region.geoid);
        let base_lat = center.0 + lat_jitter;
        let base_lon = center.1 + lon_jitter;

        for &layer in Layer::ALL {
            let tier = Tier::classify(layer.score(region), thresholds);
            let style = layer.style();

            markers.push(MarkerSpec {
                layer,
                shape: style.shape,
                lat: base_lat + style.lat_offset,
                lon: base_lon,
                radius: style.radius,
                weight: style.weight,
                outline_color: MARKER_OUTLINE,
                fill_color: layer.color(tier),
                fill_opacity: style.fill_opacity,
                tier,
                popup: popup_html(layer, tier, region),
            });
        }
    }

    markers
}

fn popup_html(layer: Layer, tier: Tier, scored: &ScoredRegion) -> String {
    let region = &scored.region;
    let tract = encode_safe(tract_code(&region.geoid));
    let label = layer.tier_label(tier);

    match layer {
        Layer::Income => format!(
            "<b>Census Tract {tract}</b><br>\
             <b>REAL US CENSUS DATA</b><br>\
             Median Income: {income}<br>\
             Education Rate: {education:.1}%<br>\
             Median Rent: {rent}<br>\
             Homeownership: {ownership:.1}%<br>\
             Transit Use: {transit:.1}%<br>\
             <b>Income Level: {label}</b>",
            income = format_dollars(region.median_income),
            education = region.education_rate,
            rent = format_dollars(region.median_rent),
            ownership = region.homeownership_rate,
            transit = region.transit_rate,
        ),
        Layer::Education => format!(
            "<b>Education Data</b><br>\
             Tract: {tract}<br>\
             Bachelor's Degree Rate: {education:.1}%<br>\
             <b>{label}</b>",
            education = region.education_rate,
        ),
        Layer::Risk => format!(
            "<b>Gentrification Risk Analysis</b><br>\
             Tract: {tract}<br>\
             Risk Score: {risk:.2}<br>\
             Income Factor: {income:.2}<br>\
             Education Factor: {education:.2}<br>\
             Rent Pressure: {rent:.2}<br>\
             Rental Market Pressure: {ownership:.2}<br>\
             <b>{label}</b>",
            risk = scored.composite,
            income = scored.scores.income,
            education = scored.scores.education,
            rent = scored.scores.rent,
            ownership = scored.scores.ownership,
        ),
    }
}

#[cfg(test)]
mod tests {
    use gentrification_map_scoring_models::{DerivedRegion, IndicatorScores};

    use super::*;

    fn scored(geoid: &str, income: f64, education: f64, composite: f64) -> ScoredRegion {
        ScoredRegion {
            region: DerivedRegion {
                geoid: geoid.to_string(),
                median_income: 52_340.0,
                median_rent: 1_150.0,
                education_rate: 31.25,
                transit_rate: 12.5,
                homeownership_rate: 47.0,
            },
            scores: IndicatorScores {
                income,
                education,
                rent: 0.5,
                ownership: 0.25,
            },
            composite,
        }
    }

    #[test]
    fn one_marker_per_tract_and_layer() {
        let regions = vec![
            scored("24510010100", 0.9, 0.5, 0.1),
            scored("24510280500", 0.1, 0.9, 0.7),
        ];
        let markers = build_markers(&regions, (39.2904, -76.6122), &TierThresholds::default());
        assert_eq!(markers.len(), 6);
        assert_eq!(
            markers.iter().map(|m| m.layer).collect::<Vec<_>>(),
            vec![
                Layer::Income,
                Layer::Education,
                Layer::Risk,
                Layer::Income,
                Layer::Education,
                Layer::Risk,
            ]
        );
    }

    #[test]
    fn colours_follow_tiers() {
        let regions = vec![scored("24510010100", 0.9, 0.5, 0.1)];
        let markers = build_markers(&regions, (0.0, 0.0), &TierThresholds::default());

        assert_eq!(markers[0].tier, Tier::High);
        assert_eq!(markers[0].fill_color, "#FF1744");
        assert_eq!(markers[1].tier, Tier::Medium);
        assert_eq!(markers[1].fill_color, "#2196F3");
        assert_eq!(markers[2].tier, Tier::Low);
        assert_eq!(markers[2].fill_color, "#5DD270");
        assert_eq!(markers[2].shape, MarkerShape::Square);
    }

    #[test]
    fn every_marker_has_black_outline() {
        let regions = vec![scored("24510010100", 0.9, 0.5, 0.1)];
        let markers = build_markers(&regions, (0.0, 0.0), &TierThresholds::default());

        assert!(markers.iter().all(|m| m.outline_color == "black"));
        assert_eq!(
            markers.iter().map(|m| m.weight).collect::<Vec<_>>(),
            vec![2, 1, 1]
        );
    }

    #[test]
    fn markers_stack_around_jittered_position() {
        let regions = vec![scored("24510280500", 0.5, 0.5, 0.5)];
        let center = (39.2904, -76.6122);
        let markers = build_markers(&regions, center, &TierThresholds::default());
        let (lat_jitter, lon_jitter) = jitter_offsets("24510280500");

        assert!((markers[0].lat - (center.0 + lat_jitter)).abs() < 1e-12);
        assert!((markers[1].lat - markers[0].lat - STACK_OFFSET).abs() < 1e-12);
        assert!((markers[0].lat - markers[2].lat - STACK_OFFSET).abs() < 1e-12);
        for m in &markers {
            assert!((m.lon - (center.1 + lon_jitter)).abs() < 1e-12);
        }
    }

    #[test]
    fn income_popup_formats_values() {
        let regions = vec![scored("24510010100", 0.9, 0.5, 0.1)];
        let markers = build_markers(&regions, (0.0, 0.0), &TierThresholds::default());
        let popup = &markers[0].popup;

        assert!(popup.contains("Census Tract 010100"));
        assert!(popup.contains("Median Income: $52,340"));
        assert!(popup.contains("Median Rent: $1,150"));
        assert!(popup.contains("Education Rate: 31.2%") || popup.contains("Education Rate: 31.3%"));
        assert!(popup.contains("Transit Use: 12.5%"));
        assert!(popup.contains("Income Level: High Income"));
    }

    #[test]
    fn risk_popup_lists_factors() {
        let regions = vec![scored("24510010100", 0.9, 0.5, 0.7)];
        let markers = build_markers(&regions, (0.0, 0.0), &TierThresholds::default());
        let popup = &markers[2].popup;

        assert!(popup.contains("Risk Score: 0.70"));
        assert!(popup.contains("Income Factor: 0.90"));
        assert!(popup.contains("High Gentrification Risk"));
    }
}
