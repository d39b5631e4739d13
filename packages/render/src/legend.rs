//! Fixed-position legend panel.

use std::borrow::Cow;

use gentrification_map_census_models::ApiStatus;
use gentrification_map_scoring_models::Tier;
use html_escape::encode_safe;

use crate::markers::Layer;

/// Status line for one upstream data source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceStatus {
    pub name: String,
    pub status: ApiStatus,
    /// Extra text after the status, e.g. "412 tracts (REAL DATA)".
    pub detail: Option<String>,
}

const fn status_icon(status: ApiStatus) -> &'static str {
    match status {
        ApiStatus::Available => "✅",
        ApiStatus::Unavailable => "❌",
        ApiStatus::Skipped => "➖",
    }
}

struct LayerLegend {
    layer: Layer,
    heading: &'static str,
    heading_color: &'static str,
    glyph: &'static str,
    descriptions: [&'static str; 3],
}

const LAYER_LEGENDS: [LayerLegend; 3] = [
    LayerLegend {
        layer: Layer::Income,
        heading: "💰 Income Levels (Large Circles):",
        heading_color: "#e74c3c",
        glyph: "⬤",
        descriptions: ["Above median", "Middle range", "Below median"],
    },
    LayerLegend {
        layer: Layer::Education,
        heading: "🎓 Education Levels (Small Circles):",
        heading_color: "#8e44ad",
        glyph: "⬤",
        descriptions: [
            "High bachelor's rate",
            "Average rate",
            "Low bachelor's rate",
        ],
    },
    LayerLegend {
        layer: Layer::Risk,
        heading: "🏠 Gentrification Risk (Squares):",
        heading_color: "#f39c12",
        glyph: "◼",
        descriptions: [
            "Multiple pressure factors",
            "Some indicators",
            "Stable conditions",
        ],
    },
];

/// Builds the legend panel HTML.
#[must_use]
pub fn legend_html(
    region_name: &str,
    acs_year: u16,
    tract_count: usize,
    sources: &[SourceStatus],
) -> String {
    let region_name = encode_safe(region_name);

    let source_lines: String = sources
        .iter()
        .map(|source| {
            let detail = source
                .detail
                .as_deref()
                .map_or(Cow::Borrowed(source.status.label()), encode_safe);
            format!(
                "{} {}: {detail}<br>\n",
                status_icon(source.status),
                encode_safe(&source.name),
            )
        })
        .collect();

    let layer_sections: String = LAYER_LEGENDS.iter().map(layer_section).collect();

    format!(
        "<div id=\"map-legend\" style=\"position: fixed; bottom: 10px; left: 10px; \
         width: 450px; max-height: 400px; background-color: white; \
         border: 3px solid #333; border-radius: 12px; z-index: 9999; \
         font-size: 13px; padding: 20px; box-shadow: 0 8px 16px rgba(0,0,0,0.3); \
         font-family: 'Segoe UI', Arial, sans-serif; overflow-y: auto;\">\n\
         <h3 style=\"margin: 0 0 15px 0; color: #2c3e50; text-align: center; \
         border-bottom: 2px solid #3498db; padding-bottom: 8px; font-size: 16px;\">\
         {region_name} Gentrification Analysis (REAL DATA)</h3>\n\
         <div style=\"margin-bottom: 15px; padding: 8px; background-color: #e8f5e8; \
         border-radius: 5px;\">\n\
         <h4 style=\"margin: 0 0 5px 0; color: #27ae60; font-size: 12px;\">\
         📊 DATA SOURCES STATUS:</h4>\n\
         <div style=\"font-size: 11px; line-height: 1.4;\">\n\
         {source_lines}\
         </div>\n\
         </div>\n\
         {layer_sections}\
         <div style=\"font-size: 10px; color: #7f8c8d; text-align: center; margin-top: 10px; \
         border-top: 1px solid #ecf0f1; padding-top: 8px;\">\
         Real Data: US Census Bureau ACS {acs_year}<br>\
         {tract_count} {region_name} Census Tracts</div>\n\
         </div>\n"
    )
}

fn layer_section(legend: &LayerLegend) -> String {
    let rows: String = [Tier::High, Tier::Medium, Tier::Low]
        .into_iter()
        .zip(legend.descriptions)
        .map(|(tier, description)| {
            format!(
                "{} <span style=\"color: {}; font-weight: bold;\">{}</span> - {description}<br>\n",
                legend.glyph,
                legend.layer.color(tier),
                legend.layer.tier_label(tier),
            )
        })
        .collect();

    format!(
        "<div style=\"margin-bottom: 15px;\">\n\
         <h4 style=\"margin: 0 0 8px 0; color: {}; font-size: 14px;\">{}</h4>\n\
         <div style=\"margin-left: 15px; line-height: 1.6; font-size: 12px;\">\n\
         {rows}\
         </div>\n\
         </div>\n",
        legend.heading_color, legend.heading
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sources() -> Vec<SourceStatus> {
        vec![
            SourceStatus {
                name: "US Census Bureau".to_string(),
                status: ApiStatus::Available,
                detail: Some("412 tracts (REAL DATA)".to_string()),
            },
            SourceStatus {
                name: "Bureau of Labor Statistics".to_string(),
                status: ApiStatus::Unavailable,
                detail: None,
            },
        ]
    }

    #[test]
    fn lists_source_statuses() {
        let html = legend_html("Baltimore", 2021, 412, &sources());
        assert!(html.contains("✅ US Census Bureau: 412 tracts (REAL DATA)"));
        assert!(html.contains("❌ Bureau of Labor Statistics: Unavailable"));
    }

    #[test]
    fn includes_every_tier_colour() {
        let html = legend_html("Baltimore", 2021, 412, &sources());
        for &layer in Layer::ALL {
            for tier in [Tier::High, Tier::Medium, Tier::Low] {
                assert!(html.contains(layer.color(tier)), "{layer:?} {tier:?}");
                assert!(html.contains(layer.tier_label(tier)));
            }
        }
    }

    #[test]
    fn footer_names_vintage_and_count() {
        let html = legend_html("Baltimore", 2021, 412, &sources());
        assert!(html.contains("US Census Bureau ACS 2021"));
        assert!(html.contains("412 Baltimore Census Tracts"));
    }

    #[test]
    fn escapes_region_name() {
        let html = legend_html("<Springfield>", 2021, 1, &[]);
        assert!(html.contains("&lt;Springfield&gt;"));
        assert!(!html.contains("<Springfield>"));
    }

    #[test]
    fn escapes_quotes_in_source_names() {
        let sources = [SourceStatus {
            name: r#""Tom" & 'Jerry'"#.to_string(),
            status: ApiStatus::Skipped,
            detail: None,
        }];
        let html = legend_html("Baltimore", 2021, 1, &sources);
        assert!(html.contains("&quot;Tom&quot; &amp; "));
        assert!(!html.contains("'Jerry'"));
        assert!(html.contains(": Not checked<br>"));
    }
}
