use serde::{Serialize, Serializer};

use crate::constants::{CLOCK_KEY, GREEN_BULLET_KEY, ORANGE_BULLET_KEY, STAR_KEY};

/// Decorative glyph shown next to a kanban example
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    GreenDot,
    OrangeDot,
    Star,
    Clock,
}

impl Marker {
    /// All markers in the order the backend emits their keys
    pub const ALL: [Marker; 4] = [Marker::GreenDot, Marker::OrangeDot, Marker::Star, Marker::Clock];

    /// Resolve a backend key; unknown keys yield `None`
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            GREEN_BULLET_KEY => Some(Marker::GreenDot),
            ORANGE_BULLET_KEY => Some(Marker::OrangeDot),
            STAR_KEY => Some(Marker::Star),
            CLOCK_KEY => Some(Marker::Clock),
            _ => None,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Marker::GreenDot => GREEN_BULLET_KEY,
            Marker::OrangeDot => ORANGE_BULLET_KEY,
            Marker::Star => STAR_KEY,
            Marker::Clock => CLOCK_KEY,
        }
    }

    /// Pre-rendered markup for this marker
    pub fn fragment(&self) -> &'static str {
        match self {
            Marker::GreenDot => r#"<span class="o_status d-inline-block o_status_green"></span>"#,
            Marker::OrangeDot => r#"<span class="o_status d-inline-block text-warning"></span>"#,
            Marker::Star => r#"<a style="color: gold;" class="fa fa-star"></a>"#,
            Marker::Clock => r#"<a class="fa fa-clock-o"></a>"#,
        }
    }
}

impl Serialize for Marker {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.fragment())
    }
}

/// Map marker keys through the fixed table, dropping keys that do not resolve
pub fn resolve_markers<S: AsRef<str>>(keys: &[S]) -> Vec<Marker> {
    keys.iter()
        .filter_map(|k| Marker::from_key(k.as_ref()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_keys_resolve() {
        for marker in Marker::ALL {
            assert_eq!(Marker::from_key(marker.key()), Some(marker));
        }
    }

    #[test]
    fn test_unknown_keys_are_dropped() {
        let markers = resolve_markers(&["greenBullet", "unknownKey"]);
        assert_eq!(markers, vec![Marker::GreenDot]);
    }

    #[test]
    fn test_resolution_preserves_order_and_duplicates() {
        let markers = resolve_markers(&["clock", "star", "", "Star", "clock"]);
        assert_eq!(markers, vec![Marker::Clock, Marker::Star, Marker::Clock]);
    }

    #[test]
    fn test_marker_serializes_as_fragment() {
        let json = serde_json::to_string(&Marker::Star).unwrap();
        assert!(json.contains("fa-star"));
    }
}
