use crate::models::Coordinates;
use serde::{Deserialize, Serialize};

/// A labeled point on the map, used either as a user waypoint or as a
/// down-sampled route-trace point.
///
/// `title` doubles as the identity key when comparing against a previous render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "StopMarkerRecord", from = "StopMarkerRecord")]
pub struct StopMarker {
    pub id: Option<String>,
    pub title: String,
    pub subtitle: Option<String>,
    pub coordinate: Coordinates,
    pub order_index: Option<u32>,
}

impl StopMarker {
    pub fn new(title: impl Into<String>, coordinate: Coordinates) -> Self {
        StopMarker {
            id: None,
            title: title.into(),
            subtitle: None,
            coordinate,
            order_index: None,
        }
    }

    pub fn with_order_index(mut self, order_index: u32) -> Self {
        self.order_index = Some(order_index);
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }
}

/// Wire form: coordinate flattened into `latitude`/`longitude`. Keys are
/// snake_case like the rest of the HTTP API.
#[derive(Serialize, Deserialize)]
struct StopMarkerRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    title: String,
    #[serde(default)]
    subtitle: Option<String>,
    latitude: f64,
    longitude: f64,
    #[serde(default)]
    order_index: Option<u32>,
}

impl From<StopMarker> for StopMarkerRecord {
    fn from(marker: StopMarker) -> Self {
        StopMarkerRecord {
            id: marker.id,
            title: marker.title,
            subtitle: marker.subtitle,
            latitude: marker.coordinate.lat,
            longitude: marker.coordinate.lng,
            order_index: marker.order_index,
        }
    }
}

impl From<StopMarkerRecord> for StopMarker {
    fn from(record: StopMarkerRecord) -> Self {
        StopMarker {
            id: record.id,
            title: record.title,
            subtitle: record.subtitle,
            coordinate: Coordinates {
                lat: record.latitude,
                lng: record.longitude,
            },
            order_index: record.order_index,
        }
    }
}

/// Connecting polyline through the markers, in list order.
/// Recomputed on every call; callers cache it if they need to.
pub fn derive_trace(markers: &[StopMarker]) -> Vec<Coordinates> {
    markers.iter().map(|m| m.coordinate).collect()
}

/// What a map surface has to do to go from `previous` to `current` markers.
#[derive(Debug, Clone, PartialEq)]
pub enum MarkerDiff {
    /// Marker count changed: drop everything and add `current` again
    Reload,
    /// Same markers; these titles moved and need re-placing
    Moved(Vec<String>),
}

impl MarkerDiff {
    pub fn is_unchanged(&self) -> bool {
        matches!(self, MarkerDiff::Moved(titles) if titles.is_empty())
    }
}

/// Compare two marker lists, matching markers by title.
pub fn diff_markers(previous: &[StopMarker], current: &[StopMarker]) -> MarkerDiff {
    if previous.len() != current.len() {
        return MarkerDiff::Reload;
    }

    let moved = previous
        .iter()
        .filter_map(|old| {
            current
                .iter()
                .find(|new| new.title == old.title)
                .filter(|new| new.coordinate != old.coordinate)
                .map(|new| new.title.clone())
        })
        .collect();

    MarkerDiff::Moved(moved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn coord(lat: f64, lng: f64) -> Coordinates {
        Coordinates::new(lat, lng).unwrap()
    }

    fn sample_markers() -> Vec<StopMarker> {
        vec![
            StopMarker::new("1", coord(55.670616, 12.535209)).with_order_index(1),
            StopMarker::new("2", coord(55.670986, 12.535339)).with_order_index(2),
            StopMarker::new("3", coord(55.671416, 12.535474)).with_order_index(3),
        ]
    }

    #[test]
    fn test_derive_trace_follows_list_order() {
        let markers = sample_markers();
        let trace = derive_trace(&markers);

        assert_eq!(trace.len(), 3);
        assert_eq!(trace[0], markers[0].coordinate);
        assert_eq!(trace[2], markers[2].coordinate);
        assert!(derive_trace(&[]).is_empty());
    }

    #[test]
    fn test_diff_reload_on_count_change() {
        let previous = sample_markers();
        let mut current = previous.clone();
        current.push(StopMarker::new("4", coord(55.671989, 12.535639)));

        assert_eq!(diff_markers(&previous, &current), MarkerDiff::Reload);
    }

    #[test]
    fn test_diff_reports_moved_titles() {
        let previous = sample_markers();
        let mut current = previous.clone();
        current[1].coordinate = coord(55.672745, 12.535889);

        let diff = diff_markers(&previous, &current);
        assert_eq!(diff, MarkerDiff::Moved(vec!["2".to_string()]));
        assert!(!diff.is_unchanged());

        assert!(diff_markers(&previous, &previous).is_unchanged());
    }

    #[test]
    fn test_wire_format() {
        let marker = StopMarker::new("Testlocation", coord(55.670660, 12.535274))
            .with_subtitle("Home to the 2012 Summer Olympics.")
            .with_order_index(1);

        let value = serde_json::to_value(&marker).unwrap();
        assert_eq!(
            value,
            json!({
                "title": "Testlocation",
                "subtitle": "Home to the 2012 Summer Olympics.",
                "latitude": 55.670660,
                "longitude": 12.535274,
                "order_index": 1
            })
        );

        let parsed: StopMarker = serde_json::from_value(json!({
            "id": "abc",
            "title": "7",
            "latitude": 55.0,
            "longitude": 12.0
        }))
        .unwrap();
        assert_eq!(parsed.id.as_deref(), Some("abc"));
        assert_eq!(parsed.subtitle, None);
        assert_eq!(parsed.order_index, None);
        assert_eq!(parsed.coordinate, coord(55.0, 12.0));
    }
}
