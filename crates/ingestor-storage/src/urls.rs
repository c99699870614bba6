//! Public retrieval URIs for stored objects.

use ingestor_core::IngestConfig;

/// Build the URI a caller uses to fetch a stored object.
///
/// Precedence: the configured public base URI, then a custom S3 endpoint (path-style),
/// then the regional AWS host, then the global AWS host.
pub fn public_uri(config: &IngestConfig, bucket: &str, key: &str) -> String {
    if let Some(base) = config.image_access_base_uri() {
        return format!("{}/{}", base.trim_end_matches('/'), key);
    }

    if let Some(endpoint) = config.s3_endpoint() {
        return format!("{}/{}/{}", endpoint.trim_end_matches('/'), bucket, key);
    }

    match config.s3_region() {
        Some(region) => format!("https://{}.s3.{}.amazonaws.com/{}", bucket, region, key),
        None => format!("https://{}.s3.amazonaws.com/{}", bucket, key),
    }
}
