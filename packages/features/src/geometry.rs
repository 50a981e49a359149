//! Geometry extraction from the upstream polygon field.

use serde_json::Value;

/// Parses a raw polygon field value into a geometry object.
///
/// The field arrives either as a GeoJSON geometry object or as a
/// JSON-encoded string of one. Anything that does not strictly parse
/// into an object carrying a string `type` discriminator yields `None`;
/// geometry content beyond that is not validated, so malformed coordinate
/// arrays are the map renderer's problem.
#[must_use]
pub fn parse_geometry(value: Option<&Value>) -> Option<Value> {
    let candidate = match value? {
        Value::String(s) => serde_json::from_str::<Value>(s).ok()?,
        other => other.clone(),
    };

    candidate.get("type")?.as_str()?;
    Some(candidate)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn parses_json_encoded_geometry() {
        let raw = json!(r#"{"type":"Polygon","coordinates":[[[0,0],[1,0],[1,1],[0,0]]]}"#);
        let geometry = parse_geometry(Some(&raw)).unwrap();
        assert_eq!(geometry["type"], "Polygon");
    }

    #[test]
    fn passes_through_geometry_objects() {
        let raw = json!({ "type": "MultiPolygon", "coordinates": [] });
        assert_eq!(parse_geometry(Some(&raw)), Some(raw));
    }

    #[test]
    fn rejects_absent_field() {
        assert_eq!(parse_geometry(None), None);
    }

    #[test]
    fn rejects_unparseable_string() {
        assert_eq!(parse_geometry(Some(&json!("not json"))), None);
    }

    #[test]
    fn rejects_object_without_type_tag() {
        assert_eq!(parse_geometry(Some(&json!({ "coordinates": [] }))), None);
    }

    #[test]
    fn rejects_null_and_scalars() {
        assert_eq!(parse_geometry(Some(&Value::Null)), None);
        assert_eq!(parse_geometry(Some(&json!(5))), None);
        assert_eq!(parse_geometry(Some(&json!("null"))), None);
    }
}
