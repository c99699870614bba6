//! Object metadata mapping.
//!
//! Object-store metadata travels as HTTP headers, so free-text values (`name`, `contentType`)
//! are percent-encoded with the URI-component rule before they are attached.

use std::collections::BTreeMap;

use ingestor_core::{IngestRequest, OwningIdentity};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Everything except ASCII alphanumerics and `- _ . ! ~ * ' ( )` is escaped.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a value as a URI component (UTF-8 `%XX` escapes).
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}

/// Build the metadata record attached to a stored image.
///
/// The identity key is always present; provenance fields are included only when supplied.
pub fn build_object_metadata(
    request: &IngestRequest,
    identity: &OwningIdentity,
) -> BTreeMap<String, String> {
    let mut metadata = BTreeMap::new();
    metadata.insert(identity.metadata_key().to_string(), identity.id().to_string());

    let fields = [
        ("ccampaignid", request.campaign_id.as_deref(), false),
        ("contentdocumentid", request.content_document_id.as_deref(), false),
        ("contenttype", request.content_type.as_deref(), true),
        ("contentversionid", request.content_version_id.as_deref(), false),
        ("name", request.name.as_deref(), true),
        ("userid", request.user_id.as_deref(), false),
    ];

    for (key, value, escape) in fields {
        let Some(value) = value.filter(|v| !v.is_empty()) else {
            continue;
        };
        let value = if escape {
            encode_component(value)
        } else {
            value.to_string()
        };
        metadata.insert(key.to_string(), value);
    }

    metadata
}

#[cfg(test)]
mod tests {
    use super::*;
    use percent_encoding::percent_decode_str;

    fn decode(value: &str) -> String {
        percent_decode_str(value).decode_utf8().unwrap().into_owned()
    }

    #[test]
    fn test_safe_characters_are_untouched() {
        let safe = "AZaz09-_.!~*'()";
        assert_eq!(encode_component(safe), safe);
    }

    #[test]
    fn test_reserved_and_unicode_are_escaped() {
        assert_eq!(encode_component("My photo.png"), "My%20photo.png");
        assert_eq!(encode_component("image/png"), "image%2Fpng");
        assert_eq!(encode_component("a&b=c"), "a%26b%3Dc");
        assert_eq!(encode_component("café"), "caf%C3%A9");
    }

    #[test]
    fn test_encoding_round_trips() {
        for value in ["Summer fête 2024 (final).jpg", "image/svg+xml; charset=utf-8", "日本"] {
            assert_eq!(decode(&encode_component(value)), value);
        }
    }

    #[test]
    fn test_identity_only() {
        let request = IngestRequest::default();
        let metadata = build_object_metadata(&request, &OwningIdentity::Account("001xx".into()));
        assert_eq!(metadata.len(), 1);
        assert_eq!(metadata.get("accountid").map(String::as_str), Some("001xx"));
    }

    #[test]
    fn test_champion_fund_key() {
        let request = IngestRequest::default();
        let metadata =
            build_object_metadata(&request, &OwningIdentity::ChampionFund("cf1".into()));
        assert_eq!(metadata.get("championfundid").map(String::as_str), Some("cf1"));
        assert!(!metadata.contains_key("accountid"));
    }

    #[test]
    fn test_all_provenance_fields() {
        let request = IngestRequest {
            campaign_id: Some("camp 1".into()),
            content_document_id: Some("doc".into()),
            content_type: Some("image/png".into()),
            content_version_id: Some("ver".into()),
            name: Some("My photo".into()),
            user_id: Some("user".into()),
            ..Default::default()
        };
        let metadata = build_object_metadata(&request, &OwningIdentity::Account("001xx".into()));

        assert_eq!(metadata["ccampaignid"], "camp 1");
        assert_eq!(metadata["contentdocumentid"], "doc");
        assert_eq!(metadata["contenttype"], "image%2Fpng");
        assert_eq!(metadata["contentversionid"], "ver");
        assert_eq!(metadata["name"], "My%20photo");
        assert_eq!(metadata["userid"], "user");
    }

    #[test]
    fn test_empty_fields_are_omitted() {
        let request = IngestRequest {
            name: Some(String::new()),
            user_id: None,
            ..Default::default()
        };
        let metadata = build_object_metadata(&request, &OwningIdentity::Account("001xx".into()));
        assert!(!metadata.contains_key("name"));
        assert!(!metadata.contains_key("userid"));
    }
}
