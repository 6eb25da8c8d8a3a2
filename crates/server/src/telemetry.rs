use axum::{body::Body, http::Request, response::Response};
use opentelemetry::{
    global,
    trace::{SpanKind, Status, TraceContextExt, Tracer},
    Context, KeyValue,
};
use opentelemetry_otlp::tonic_types::{metadata::MetadataMap, transport::ClientTlsConfig};
use opentelemetry_otlp::{WithExportConfig, WithTonicConfig};
use opentelemetry_sdk::{logs::SdkLoggerProvider, trace::SdkTracerProvider, Resource};
use std::{
    future::Future,
    pin::Pin,
    sync::OnceLock,
    task::{Context as TaskContext, Poll},
};
use tower::{Layer, Service};

use crate::auth::jwt::Claims;

const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
const TRACER_NAME: &str = "casebook";

static LOGGER_PROVIDER: OnceLock<SdkLoggerProvider> = OnceLock::new();

/// Tonic's lazy channel spawns onto Tokio, and the `dioxus::serve` init
/// closure may run outside a runtime context.
static OTEL_RUNTIME: OnceLock<tokio::runtime::Runtime> = OnceLock::new();

/// Where and how to export, read from the environment.
#[derive(Debug, Clone, PartialEq)]
struct OtlpSettings {
    endpoint: String,
    service_name: String,
    environment: String,
    ingestion_key: Option<String>,
}

impl OtlpSettings {
    /// `None` when `OTEL_EXPORTER_OTLP_ENDPOINT` is unset.
    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let endpoint = get("OTEL_EXPORTER_OTLP_ENDPOINT").filter(|e| !e.is_empty())?;
        Some(Self {
            endpoint,
            service_name: get("OTEL_SERVICE_NAME").unwrap_or_else(|| TRACER_NAME.to_string()),
            environment: get("DEPLOY_ENV").unwrap_or_else(|| "development".to_string()),
            ingestion_key: get("SIGNOZ_INGESTION_KEY").filter(|k| !k.is_empty()),
        })
    }

    fn from_env() -> Option<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn resource(&self) -> Resource {
        Resource::builder()
            .with_service_name(self.service_name.clone())
            .with_attribute(KeyValue::new("service.version", APP_VERSION))
            .with_attribute(KeyValue::new("deployment.environment", self.environment.clone()))
            .build()
    }

    /// Apply endpoint, TLS for `https://` collectors and the ingestion key.
    fn transport<B>(&self, builder: B) -> B
    where
        B: WithExportConfig + WithTonicConfig,
    {
        let mut builder = builder.with_endpoint(&self.endpoint);
        if self.endpoint.starts_with("https://") {
            builder = builder.with_tls_config(ClientTlsConfig::new().with_native_roots());
        }
        if let Some(value) = self.ingestion_key.as_deref().and_then(|k| k.parse().ok()) {
            let mut metadata = MetadataMap::new();
            metadata.insert("signoz-ingestion-key", value);
            builder = builder.with_metadata(metadata);
        }
        builder
    }
}

/// Install the OTLP trace and log exporters.
///
/// Dioxus owns the `tracing` subscriber, so traces come from
/// [`OtelTraceLayer`] and logs from the `log` crate bridge. Reads
/// `OTEL_EXPORTER_OTLP_ENDPOINT`, `OTEL_SERVICE_NAME`, `DEPLOY_ENV` and
/// `SIGNOZ_INGESTION_KEY`. Does nothing without an endpoint.
pub fn init_telemetry() {
    let _ = dotenvy::dotenv();

    let Some(settings) = OtlpSettings::from_env() else {
        eprintln!("OTEL_EXPORTER_OTLP_ENDPOINT not set, skipping OTLP telemetry");
        return;
    };

    let rt = OTEL_RUNTIME.get_or_init(|| {
        tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .worker_threads(1)
            .build()
            .expect("Failed to create OTEL runtime")
    });
    let _guard = rt.enter();

    let resource = settings.resource();

    let span_exporter = settings
        .transport(opentelemetry_otlp::SpanExporter::builder().with_tonic())
        .build()
        .expect("Failed to create OTLP span exporter");
    global::set_tracer_provider(
        SdkTracerProvider::builder()
            .with_batch_exporter(span_exporter)
            .with_resource(resource.clone())
            .build(),
    );

    let log_exporter = settings
        .transport(opentelemetry_otlp::LogExporter::builder().with_tonic())
        .build()
        .expect("Failed to create OTLP log exporter");
    let logger_provider = LOGGER_PROVIDER.get_or_init(|| {
        SdkLoggerProvider::builder()
            .with_batch_exporter(log_exporter)
            .with_resource(resource)
            .build()
    });

    let bridge = opentelemetry_appender_log::OpenTelemetryLogBridge::new(logger_provider);
    if log::set_boxed_logger(Box::new(bridge)).is_ok() {
        log::set_max_level(log::LevelFilter::Info);
    } else {
        eprintln!("Log bridge skipped: a `log` logger is already installed");
    }

    eprintln!(
        "Telemetry initialized v{APP_VERSION}, exporting to {} as {}",
        settings.endpoint, settings.service_name
    );
}

/// Resource and record id of an API path, e.g. `/api/legal-cases/42/...`
/// gives `("legal-cases", Some(42))`. Non-API paths give `None`.
fn api_target(path: &str) -> Option<(&str, Option<i64>)> {
    let mut segments = path.strip_prefix("/api/")?.split('/');
    let resource = segments.next().filter(|s| !s.is_empty())?;
    let id = segments.next().and_then(|s| s.parse().ok());
    Some((resource, id))
}

/// Span name with numeric ids replaced, so `/api/clients/7` and
/// `/api/clients/8` aggregate under `/api/clients/{id}`.
fn span_route(path: &str) -> String {
    path.split('/')
        .map(|s| {
            if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
                "{id}"
            } else {
                s
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Tower layer that opens a server span per HTTP request, tagged with the
/// Casebook resource, record id, request id and signed-in officer.
#[derive(Clone)]
pub struct OtelTraceLayer;

impl<S> Layer<S> for OtelTraceLayer {
    type Service = OtelTraceService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        OtelTraceService { inner }
    }
}

#[derive(Clone)]
pub struct OtelTraceService<S> {
    inner: S,
}

fn request_attributes(req: &Request<Body>) -> Vec<KeyValue> {
    let path = req.uri().path();
    let header = |name: &str| {
        req.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string()
    };

    let mut attributes = vec![
        KeyValue::new("http.method", req.method().to_string()),
        KeyValue::new("http.target", path.to_string()),
        KeyValue::new("http.user_agent", header("user-agent")),
        KeyValue::new("http.request_id", header("x-request-id")),
    ];
    if let Some((resource, id)) = api_target(path) {
        attributes.push(KeyValue::new("casebook.resource", resource.to_string()));
        if let Some(id) = id {
            attributes.push(KeyValue::new("casebook.record_id", id));
        }
    }
    match req.extensions().get::<Claims>() {
        Some(claims) => {
            attributes.push(KeyValue::new("user.id", claims.sub));
            attributes.push(KeyValue::new("user.name", claims.username.clone()));
            attributes.push(KeyValue::new("auth.status", "authenticated"));
        }
        None => attributes.push(KeyValue::new("auth.status", "anonymous")),
    }
    attributes
}

impl<S> Service<Request<Body>> for OtelTraceService<S>
where
    S: Service<Request<Body>, Response = Response> + Send + Clone + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut TaskContext<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let tracer = global::tracer(TRACER_NAME);
        let span = tracer
            .span_builder(format!("{} {}", req.method(), span_route(req.uri().path())))
            .with_kind(SpanKind::Server)
            .with_attributes(request_attributes(&req))
            .start(&tracer);

        let cx = Context::current_with_span(span);
        let mut inner = self.inner.clone();

        let guard = cx.clone().attach();
        let future = inner.call(req);
        drop(guard);

        Box::pin(async move {
            let response = future.await?;

            let span = cx.span();
            let status = response.status();
            span.set_attribute(KeyValue::new("http.status_code", status.as_u16() as i64));
            if status.is_server_error() {
                span.set_status(Status::error(status.to_string()));
            } else if status.is_client_error() {
                span.set_attribute(KeyValue::new("error.type", "client_error"));
            }

            Ok(response)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn settings_need_an_endpoint() {
        assert_eq!(OtlpSettings::from_lookup(lookup(&[])), None);
        assert_eq!(
            OtlpSettings::from_lookup(lookup(&[("OTEL_EXPORTER_OTLP_ENDPOINT", "")])),
            None
        );
    }

    #[test]
    fn settings_fill_defaults() {
        let settings = OtlpSettings::from_lookup(lookup(&[
            ("OTEL_EXPORTER_OTLP_ENDPOINT", "http://localhost:4317"),
            ("SIGNOZ_INGESTION_KEY", ""),
        ]))
        .unwrap();
        assert_eq!(settings.service_name, "casebook");
        assert_eq!(settings.environment, "development");
        assert_eq!(settings.ingestion_key, None);
    }

    #[test]
    fn api_target_splits_resource_and_id() {
        assert_eq!(api_target("/api/legal-cases/42"), Some(("legal-cases", Some(42))));
        assert_eq!(
            api_target("/api/legal-case-files/7/download"),
            Some(("legal-case-files", Some(7)))
        );
        assert_eq!(api_target("/api/summary/monthly"), Some(("summary", None)));
        assert_eq!(api_target("/cases/42"), None);
        assert_eq!(api_target("/api/"), None);
    }

    #[test]
    fn route_replaces_ids() {
        assert_eq!(span_route("/api/legal-cases/42"), "/api/legal-cases/{id}");
        assert_eq!(span_route("/api/logs/3/changes"), "/api/logs/{id}/changes");
        assert_eq!(span_route("/api/summary/monthly"), "/api/summary/monthly");
    }
}
