//! Card fields for media grids.
//!
//! Music, movie, book, and TV items arrive from different upstream
//! feeds with different shapes. Each item's `type` decides how its
//! title, alt text, and subtext are assembled.

use serde::Serialize;
use serde_json::Value;

/// Display fields for one media card. Absent fields are omitted from
/// serialized output.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NormalizedMedia {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtext: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentage: Option<String>,
}

/// Map raw media items onto card fields by their `type`.
pub fn normalize_media(media: &[Value]) -> Vec<NormalizedMedia> {
    media.iter().map(normalize_item).collect()
}

fn normalize_item(item: &Value) -> NormalizedMedia {
    let mut card = NormalizedMedia {
        image: text_opt(item, "image"),
        url: text_opt(item, "url"),
        ..Default::default()
    };

    match item.get("type").and_then(Value::as_str).unwrap_or_default() {
        "album" => {
            card.title = text_opt(item, "title");
            card.alt = Some(format!("{} by {}", text(item, "title"), text(item, "artist")));
            card.subtext = Some(text(item, "artist"));
        }
        "artist" => {
            card.title = text_opt(item, "title");
            card.alt = Some(format!(
                "{} plays of {}",
                text(item, "plays"),
                text(item, "title")
            ));
            card.subtext = Some(format!("{} plays", text(item, "plays")));
        }
        "movie" => {
            card.alt = text_opt(item, "title");
        }
        "book" => {
            card.alt = Some(format!("{} by {}", text(item, "title"), text(item, "author")));
            card.subtext = Some(format!("{} finished", text(item, "percentage")));
            card.percentage = text_opt(item, "percentage");
        }
        "tv" => {
            card.title = text_opt(item, "title");
            card.alt = Some(format!("{} from {}", text(item, "title"), text(item, "name")));
            card.subtext = text_opt(item, "subtext");
        }
        "tv-range" => {
            card.title = text_opt(item, "name");
            card.alt = Some(format!(
                "{} from {}",
                text(item, "subtext"),
                text(item, "name")
            ));
            card.subtext = text_opt(item, "subtext");
        }
        _ => {}
    }
    card
}

/// String form of a field; numbers are rendered, anything else is empty.
fn text(item: &Value, key: &str) -> String {
    match item.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

fn text_opt(item: &Value, key: &str) -> Option<String> {
    match item.get(key) {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

// ============================================================================
// Tests
// ============================================================================
