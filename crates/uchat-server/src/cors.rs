use http::{Method, header::HeaderName};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use uchat_config::{AnyOrArray, CorsConfig};

/// Build a Tower CORS layer from configuration
///
/// Without a `[server.cors]` section every origin is allowed. With
/// credentials enabled, wildcards are answered by mirroring the request
/// since browsers reject `*` on credentialed requests.
pub fn cors_layer(config: Option<&CorsConfig>) -> CorsLayer {
    let Some(config) = config else {
        return CorsLayer::permissive();
    };

    let mut layer = CorsLayer::new();

    // Origins
    layer = match &config.origins {
        AnyOrArray::Any if config.credentials => layer.allow_origin(AllowOrigin::mirror_request()),
        AnyOrArray::Any => layer.allow_origin(AllowOrigin::any()),
        AnyOrArray::List(origins) => {
            let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();
            layer.allow_origin(origins)
        }
    };

    // Methods
    layer = match &config.methods {
        AnyOrArray::Any if config.credentials => layer.allow_methods(AllowMethods::mirror_request()),
        AnyOrArray::Any => layer.allow_methods(AllowMethods::any()),
        AnyOrArray::List(methods) => {
            let methods: Vec<Method> = methods.iter().filter_map(|m| m.parse().ok()).collect();
            layer.allow_methods(methods)
        }
    };

    // Headers
    layer = match &config.headers {
        AnyOrArray::Any if config.credentials => layer.allow_headers(AllowHeaders::mirror_request()),
        AnyOrArray::Any => layer.allow_headers(AllowHeaders::any()),
        AnyOrArray::List(headers) => {
            let headers: Vec<HeaderName> = headers.iter().filter_map(|h| h.parse().ok()).collect();
            layer.allow_headers(headers)
        }
    };

    if config.credentials {
        layer = layer.allow_credentials(true);
    }

    if let Some(duration) = config.max_age_duration() {
        layer = layer.max_age(duration);
    }

    layer
}
