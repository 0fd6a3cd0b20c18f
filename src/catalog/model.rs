//! Asset records as the catalog returns them.
//!
//! The catalog has served custom metadata in two incompatible shapes over
//! its API versions. Both decode into [`Metadata`], so the normalizer can
//! match on the shape instead of probing fields.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A digital asset in the remote catalog. Read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "WireAsset", into = "WireAsset")]
pub struct Asset {
    pub id: String,
    pub title: String,
    pub preview_url: Option<String>,
    /// `None` when the catalog returned no metadata collection at all
    pub metadata: Option<Metadata>,
}

impl Asset {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            preview_url: None,
            metadata: None,
        }
    }

    pub fn with_preview_url(mut self, url: impl Into<String>) -> Self {
        self.preview_url = Some(url.into());
        self
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// Custom metadata attached to an asset.
#[derive(Debug, Clone, PartialEq)]
pub enum Metadata {
    /// Account-wide `metadataValues { key value }` list
    Keyed(Vec<KeyedField>),
    /// Library-scoped `customMetadata { property { id name } value | values }` list
    Typed(Vec<TypedProperty>),
}

impl Metadata {
    pub fn len(&self) -> usize {
        match self {
            Self::Keyed(fields) => fields.len(),
            Self::Typed(entries) => entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyedField {
    pub key: String,
    #[serde(default)]
    pub value: Value,
}

impl KeyedField {
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn raw_value(&self) -> Option<String> {
        scalar_text(&self.value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyDescriptor {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TypedProperty {
    #[serde(default)]
    pub property: Option<PropertyDescriptor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<Value>>,
}

impl TypedProperty {
    /// Entry with a single scalar `value`
    pub fn single(name: impl Into<String>, value: impl Into<Value>) -> Self {
        let name = name.into();
        Self {
            property: Some(PropertyDescriptor {
                id: name.clone(),
                name: Some(name),
            }),
            value: Some(value.into()),
            values: None,
        }
    }

    /// Entry with a multi-valued `values` list
    pub fn multi<I, V>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let name = name.into();
        Self {
            property: Some(PropertyDescriptor {
                id: name.clone(),
                name: Some(name),
            }),
            value: None,
            values: Some(values.into_iter().map(Into::into).collect()),
        }
    }

    /// Lower-cased property name, if one is present and non-empty.
    pub fn normalized_name(&self) -> Option<String> {
        self.property
            .as_ref()
            .and_then(|p| p.name.as_deref())
            .filter(|name| !name.is_empty())
            .map(str::to_lowercase)
    }

    /// The singular `value` when usable, otherwise the first of `values`.
    pub fn raw_value(&self) -> Option<String> {
        self.value.as_ref().and_then(scalar_text).or_else(|| {
            self.values
                .as_ref()
                .and_then(|values| values.first())
                .and_then(scalar_text)
        })
    }
}

/// Text of a scalar JSON value; null, empty strings and non-scalars yield nothing.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Serde mirror of the GraphQL item, covering both query shapes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireAsset {
    id: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    preview_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    custom_metadata: Option<Vec<TypedProperty>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    metadata_values: Option<Vec<KeyedField>>,
}

impl From<WireAsset> for Asset {
    fn from(wire: WireAsset) -> Self {
        // Prefer the typed shape when a response somehow carries both
        let metadata = match (wire.custom_metadata, wire.metadata_values) {
            (Some(typed), _) => Some(Metadata::Typed(typed)),
            (None, Some(keyed)) => Some(Metadata::Keyed(keyed)),
            (None, None) => None,
        };

        Self {
            id: wire.id,
            title: wire.title.unwrap_or_default(),
            preview_url: wire.preview_url.filter(|url| !url.is_empty()),
            metadata,
        }
    }
}

impl From<Asset> for WireAsset {
    fn from(asset: Asset) -> Self {
        let (custom_metadata, metadata_values) = match asset.metadata {
            Some(Metadata::Typed(typed)) => (Some(typed), None),
            Some(Metadata::Keyed(keyed)) => (None, Some(keyed)),
            None => (None, None),
        };

        Self {
            id: asset.id,
            title: Some(asset.title),
            preview_url: asset.preview_url,
            custom_metadata,
            metadata_values,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_typed_metadata() {
        let asset: Asset = serde_json::from_value(json!({
            "id": "a1",
            "title": "Harbour",
            "previewUrl": "https://cdn.example.com/a1.jpg",
            "customMetadata": [
                { "property": { "id": "p1", "name": "Latitude" }, "value": "53.55" },
                { "property": { "id": "p2", "name": "Tags" }, "values": ["port", "ships"] }
            ]
        }))
        .unwrap();

        assert_eq!(asset.id, "a1");
        assert_eq!(asset.preview_url.as_deref(), Some("https://cdn.example.com/a1.jpg"));
        let Some(Metadata::Typed(entries)) = &asset.metadata else {
            panic!("expected typed metadata, got {:?}", asset.metadata);
        };
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].normalized_name().as_deref(), Some("latitude"));
        assert_eq!(entries[1].raw_value().as_deref(), Some("port"));
    }

    #[test]
    fn test_decode_keyed_metadata() {
        let asset: Asset = serde_json::from_value(json!({
            "id": "a2",
            "title": "Dock",
            "metadataValues": [
                { "key": "latitude", "value": "1.5" },
                { "key": "longitude", "value": 2.5 }
            ]
        }))
        .unwrap();

        let Some(Metadata::Keyed(fields)) = &asset.metadata else {
            panic!("expected keyed metadata");
        };
        assert_eq!(fields[0].raw_value().as_deref(), Some("1.5"));
        assert_eq!(fields[1].raw_value().as_deref(), Some("2.5"));
        assert_eq!(asset.preview_url, None);
    }

    #[test]
    fn test_decode_without_metadata_or_title() {
        let asset: Asset = serde_json::from_value(json!({ "id": "a3", "title": null })).unwrap();
        assert_eq!(asset.title, "");
        assert_eq!(asset.metadata, None);
    }

    #[test]
    fn test_raw_value_falls_back_to_values() {
        let entry = TypedProperty {
            property: Some(PropertyDescriptor {
                id: "p".into(),
                name: Some("Lat".into()),
            }),
            value: Some(json!("")),
            values: Some(vec![json!("12.5"), json!("13")]),
        };
        assert_eq!(entry.raw_value().as_deref(), Some("12.5"));

        let empty = TypedProperty::multi("Lat", Vec::<String>::new());
        assert_eq!(empty.raw_value(), None);

        let boolean = TypedProperty::single("Lat", true);
        assert_eq!(boolean.raw_value(), None);

        let zero = TypedProperty::single("Lat", 0);
        assert_eq!(zero.raw_value().as_deref(), Some("0"));
    }

    #[test]
    fn test_serialize_keeps_shape() {
        let asset = Asset::new("a4", "Pier")
            .with_metadata(Metadata::Keyed(vec![KeyedField::new("latitude", "4")]));
        let value = serde_json::to_value(&asset).unwrap();
        assert_eq!(value["metadataValues"][0]["key"], "latitude");
        assert!(value.get("customMetadata").is_none());
    }
}
