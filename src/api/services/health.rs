use std::sync::Arc;
use std::time::Duration;

use actix_web::http::StatusCode;
use actix_web::{Responder, web};
use serde::Serialize;
use tracing::{error, trace};

use crate::api::services::admin::ErrorCode;
use crate::api::services::admin::helpers::json_response;
use crate::storage::LinkStore;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub timestamp: String,
}

/// Health Service
///
/// 直接探测存储，不经过 LinkService。
pub struct HealthService;

impl HealthService {
    pub async fn health_check(store: web::Data<Arc<LinkStore>>) -> impl Responder {
        trace!("Received health check request");

        let healthy = match tokio::time::timeout(Duration::from_secs(5), store.ping()).await {
            Ok(Ok(())) => true,
            Ok(Err(e)) => {
                error!("Storage health check failed: {}", e);
                false
            }
            Err(_) => {
                error!("Storage health check timeout");
                false
            }
        };

        let body = HealthStatus {
            status: if healthy { "healthy" } else { "unhealthy" },
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        if healthy {
            json_response(StatusCode::OK, ErrorCode::Success, "OK", Some(body))
        } else {
            json_response(
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorCode::ServiceUnavailable,
                "Storage unavailable",
                Some(body),
            )
        }
    }
}

/// 健康检查路由 `/health`
pub fn health_routes() -> actix_web::Scope {
    web::scope("/health")
        .route("", web::get().to(HealthService::health_check))
        .route("", web::head().to(HealthService::health_check))
}
