//! Full-screen intro overlay shown before the map.

use gentrification_map_region::IntroText;
use html_escape::encode_safe;

/// Element id of the overlay; the dismiss button hides it by id.
pub const INTRO_MODAL_ID: &str = "intro-modal";

/// Builds the intro overlay HTML.
#[must_use]
pub fn intro_modal_html(intro: &IntroText) -> String {
    let paragraphs: String = intro
        .paragraphs
        .iter()
        .map(|paragraph| {
            format!(
                "<p style=\"font-size:1.1em;color:#333;margin-bottom:18px;\">{}</p>\n",
                encode_safe(paragraph)
            )
        })
        .collect();

    format!(
        "<div id=\"{INTRO_MODAL_ID}\" style=\"position:fixed;top:0;left:0;width:100vw;height:100vh;\
         background:rgba(255,255,255,0.98);z-index:10000;display:flex;align-items:center;\
         justify-content:center;\">\n\
         <div style=\"max-width:600px;background:white;border-radius:16px;\
         box-shadow:0 8px 32px rgba(0,0,0,0.18);padding:36px 32px 32px 32px;text-align:center;\">\n\
         <h2 style=\"color:#1f4e79;margin-bottom:18px;\">{title}</h2>\n\
         {paragraphs}\
         <button onclick=\"document.getElementById('{INTRO_MODAL_ID}').style.display='none';\" \
         style=\"background:#1f4e79;color:white;font-size:1.1em;padding:12px 32px;border:none;\
         border-radius:8px;cursor:pointer;box-shadow:0 2px 8px rgba(31,78,121,0.12);\
         margin-top:10px;\">Enter the Map</button>\n\
         </div>\n\
         </div>\n",
        title = encode_safe(&intro.title),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_title_paragraphs_and_dismiss_button() {
        let html = intro_modal_html(&IntroText {
            title: "Understanding Gentrification".to_string(),
            paragraphs: vec!["First.".to_string(), "Second & last.".to_string()],
        });

        assert!(html.starts_with("<div id=\"intro-modal\""));
        assert!(html.contains("<h2 style=\"color:#1f4e79;margin-bottom:18px;\">Understanding Gentrification</h2>"));
        assert!(html.contains(">First.</p>"));
        assert!(html.contains(">Second &amp; last.</p>"));
        assert!(html.contains("getElementById('intro-modal').style.display='none'"));
        assert!(html.contains("Enter the Map"));
    }
}
