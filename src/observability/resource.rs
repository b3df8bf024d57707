//! Resource attributes attached to every exported span.

use opentelemetry::KeyValue;
use opentelemetry_sdk::Resource;

pub const SERVICE_NAME: &str = "service.name";
pub const SERVICE_VERSION: &str = "service.version";
pub const DEPLOYMENT_ENVIRONMENT: &str = "environment";

/// The SDK's default resource with the service's name, version and
/// environment layered on top. Later attributes win on key collision.
pub fn service_resource(name: &str, version: &str, environment: &str) -> Resource {
    Resource::builder()
        .with_attributes([
            KeyValue::new(SERVICE_NAME, name.to_string()),
            KeyValue::new(SERVICE_VERSION, version.to_string()),
            KeyValue::new(DEPLOYMENT_ENVIRONMENT, environment.to_string()),
        ])
        .build()
}
