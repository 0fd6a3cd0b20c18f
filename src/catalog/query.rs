//! GraphQL documents and request bodies for the two supported query shapes.

use serde_json::{json, Value};

/// Library-scoped query returning typed custom-metadata properties.
pub const LIBRARY_ASSETS_QUERY: &str = r#"
query GetLibraryAssets($id: ID!, $limit: Int!, $page: Int!) {
  library(id: $id) {
    assets(limit: $limit, page: $page) {
      total
      items {
        id
        title
        customMetadata {
          property {
            id
            name
          }
          ... on CustomMetadataValue {
            value
          }
          ... on CustomMetadataValues {
            values
          }
        }
        ... on Image {
          previewUrl
        }
        ... on Video {
          previewUrl
        }
        ... on Audio {
          previewUrl
        }
        ... on Document {
          previewUrl
        }
        ... on File {
          previewUrl
        }
      }
    }
  }
}
"#;

/// Account-wide query returning the older key/value metadata list.
pub const ACCOUNT_ASSETS_QUERY: &str = r#"
query GetAssets($limit: Int!, $page: Int!) {
  assets(limit: $limit, page: $page) {
    total
    items {
      id
      title
      previewUrl
      metadataValues {
        key
        value
      }
    }
  }
}
"#;

/// Which query document a fetcher sends, and where its page lives in the response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryShape {
    /// Scoped to one library; typed-property metadata
    Library { id: String },
    /// All assets visible to the credential; keyed-list metadata
    Account,
}

impl QueryShape {
    pub fn from_library_id(library_id: Option<&str>) -> Self {
        match library_id {
            Some(id) => Self::Library { id: id.to_string() },
            None => Self::Account,
        }
    }

    pub fn document(&self) -> &'static str {
        match self {
            Self::Library { .. } => LIBRARY_ASSETS_QUERY,
            Self::Account => ACCOUNT_ASSETS_QUERY,
        }
    }

    /// JSON pointer, relative to `data`, of the object holding `items` and `total`.
    pub fn assets_pointer(&self) -> &'static str {
        match self {
            Self::Library { .. } => "/library/assets",
            Self::Account => "/assets",
        }
    }

    /// Request body for one page.
    pub fn request_body(&self, page: u32, limit: u32) -> Value {
        let variables = match self {
            Self::Library { id } => json!({ "id": id, "limit": limit, "page": page }),
            Self::Account => json!({ "limit": limit, "page": page }),
        };
        json!({ "query": self.document(), "variables": variables })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_request_body() {
        let shape = QueryShape::from_library_id(Some("lib-7"));
        let body = shape.request_body(3, 100);

        assert_eq!(body["variables"]["id"], "lib-7");
        assert_eq!(body["variables"]["page"], 3);
        assert_eq!(body["variables"]["limit"], 100);
        assert!(body["query"].as_str().unwrap().contains("customMetadata"));
    }

    #[test]
    fn test_account_request_body_has_no_id() {
        let body = QueryShape::Account.request_body(1, 50);

        assert!(body["variables"].get("id").is_none());
        assert_eq!(body["variables"]["limit"], 50);
        assert!(body["query"].as_str().unwrap().contains("metadataValues"));
    }
}
