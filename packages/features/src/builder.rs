//! Per-record property assembly.
//!
//! Field names are resolved through explicit, finite fallback lists
//! because the upstream table has accumulated case variants of the same
//! logical column over time. The lists are deliberate enumerations of the
//! observed variants, not a general case-insensitive rule.

use network_map_normalize::{collect_photo_urls, normalize_lookup, normalize_text_list};
use network_map_upstream::UpstreamRecord;
use serde_json::Value;

use crate::{Feature, FeatureCollection, geometry::parse_geometry};

/// Fixed number of photo/image slots on every feature.
const MAX_SLOTS: usize = 6;

const POLYGON_FIELDS: &[&str] = &["Polygon", "polygon"];
const NAME_FIELDS: &[&str] = &["Network Name", "Name", "name"];
const LEADER_FIELDS: &[&str] = &["Leaders", "leaders"];
const PHOTO_FIELDS: &[&str] = &["Photos", "photos", "Photo"];
const IMAGE_FIELDS: &[&str] = &["Images", "images", "Image"];
const CONTACT_EMAIL_FIELDS: &[&str] = &["Contact Email", "Contact email", "contact email"];
const STATUS_FIELDS: &[&str] = &["Status", "status"];
const COUNTY_FIELDS: &[&str] = &["County", "county"];
const TAGS_FIELDS: &[&str] = &["Tags", "tags"];
const CHURCH_COUNT_FIELDS: &[&str] = &[
    "Number of Churches",
    "Number of churches",
    "number_of_churches",
];

/// The two attachment-bearing slot families on a feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttachmentKind {
    /// The photo slots (`photo1..photo6`).
    Photo,
    /// The image slots (`image1..image6`).
    Image,
}

impl AttachmentKind {
    const fn field_names(self) -> &'static [&'static str] {
        match self {
            Self::Photo => PHOTO_FIELDS,
            Self::Image => IMAGE_FIELDS,
        }
    }

    /// Path segment used by the proxy/redirect endpoints.
    #[must_use]
    pub const fn path_segment(self) -> &'static str {
        match self {
            Self::Photo => "img",
            Self::Image => "image",
        }
    }
}

/// Returns the attachment value at `index` in the record's photo or
/// image field, when that field is an array with an entry there.
#[must_use]
pub fn attachment_at(
    record: &UpstreamRecord,
    kind: AttachmentKind,
    index: usize,
) -> Option<&Value> {
    field(record, kind.field_names())?.as_array()?.get(index)
}

/// Builds the feature collection for a batch of upstream records.
///
/// Records without a usable geometry are dropped; everything else is
/// included.
#[must_use]
pub fn build_collection(records: &[UpstreamRecord], base_url: &str) -> FeatureCollection {
    let mut features = Vec::with_capacity(records.len());
    let mut skipped = 0usize;

    for record in records {
        match build_feature(record, base_url) {
            Some(feature) => features.push(feature),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        log::debug!("Skipped {skipped} records without usable geometry");
    }

    FeatureCollection::new(features)
}

/// Builds one feature from an upstream record.
///
/// Returns `None` when the polygon field fails to parse into a
/// type-tagged geometry; the record is excluded from the collection
/// entirely rather than emitted without a location.
#[must_use]
pub fn build_feature(record: &UpstreamRecord, base_url: &str) -> Option<Feature> {
    let geometry = parse_geometry(field(record, POLYGON_FIELDS))?;

    let mut props = serde_json::Map::new();
    props.insert("id".to_owned(), Value::String(record.id.clone()));

    let name = field(record, NAME_FIELDS)
        .and_then(Value::as_str)
        .unwrap_or_default();
    props.insert("name".to_owned(), Value::String(name.to_owned()));

    props.insert(
        "leaders".to_owned(),
        Value::String(text_field(record, LEADER_FIELDS)),
    );

    insert_slots(
        &mut props,
        "photo",
        &resolve_slots(record, AttachmentKind::Photo, base_url),
    );
    insert_slots(
        &mut props,
        "image",
        &resolve_slots(record, AttachmentKind::Image, base_url),
    );

    props.insert(
        "contact_email".to_owned(),
        Value::String(
            field(record, CONTACT_EMAIL_FIELDS).map_or_else(String::new, normalize_lookup),
        ),
    );
    props.insert(
        "status".to_owned(),
        Value::String(text_field(record, STATUS_FIELDS)),
    );
    props.insert(
        "county".to_owned(),
        Value::String(text_field(record, COUNTY_FIELDS)),
    );
    props.insert(
        "tags".to_owned(),
        Value::String(text_field(record, TAGS_FIELDS)),
    );
    props.insert(
        "number_of_churches".to_owned(),
        church_count(field(record, CHURCH_COUNT_FIELDS)),
    );

    Some(Feature::new(geometry, Value::Object(props)))
}

/// Resolves a record field through an ordered fallback list of names.
fn field<'a>(record: &'a UpstreamRecord, names: &[&str]) -> Option<&'a Value> {
    names.iter().find_map(|name| record.fields.get(*name))
}

fn text_field(record: &UpstreamRecord, names: &[&str]) -> String {
    field(record, names).map_or_else(String::new, normalize_text_list)
}

/// Resolves up to [`MAX_SLOTS`] URLs for a photo-like field.
///
/// When the raw field is an array of attachment objects, the slots get
/// same-origin proxy URLs (`{base}/{segment}/{record}/{index}`) so the
/// response never embeds signed upstream URLs that expire underneath the
/// consumer's cache. Any other shape resolves directly through the URL
/// flattener.
fn resolve_slots(record: &UpstreamRecord, kind: AttachmentKind, base_url: &str) -> Vec<String> {
    match field(record, kind.field_names()) {
        Some(Value::Array(items)) if items.first().is_some_and(is_attachment_like) => items
            .iter()
            .take(MAX_SLOTS)
            .enumerate()
            .map(|(index, _)| {
                format!("{base_url}/{}/{}/{index}", kind.path_segment(), record.id)
            })
            .collect(),
        Some(value) => {
            let mut urls = collect_photo_urls(value);
            urls.truncate(MAX_SLOTS);
            urls
        }
        None => Vec::new(),
    }
}

fn is_attachment_like(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|obj| obj.contains_key("url") || obj.contains_key("thumbnails"))
}

/// Pads slot values to the fixed width and records the populated count,
/// so the output shape is identical for every feature.
fn insert_slots(props: &mut serde_json::Map<String, Value>, prefix: &str, urls: &[String]) {
    for index in 0..MAX_SLOTS {
        props.insert(
            format!("{prefix}{}", index + 1),
            Value::String(urls.get(index).cloned().unwrap_or_default()),
        );
    }
    props.insert(format!("{prefix}_count"), Value::from(urls.len()));
}

/// Church-count rollups pass numbers through untouched; any other shape
/// goes through the text normalizer.
fn church_count(value: Option<&Value>) -> Value {
    match value {
        Some(number @ Value::Number(_)) => number.clone(),
        Some(other) => Value::String(normalize_text_list(other)),
        None => Value::String(String::new()),
    }
}
