use std::sync::Arc;

use actix_web::http::{Method, StatusCode};
use actix_web::{HttpRequest, HttpResponse, Responder, web};
use tracing::{debug, error, trace};

use crate::services::{ClickRecorder, LinkService};

pub struct RedirectService {}

impl RedirectService {
    pub async fn handle_redirect(
        req: HttpRequest,
        path: web::Path<String>,
        links: web::Data<Arc<LinkService>>,
        clicks: web::Data<ClickRecorder>,
    ) -> impl Responder {
        let code = path.into_inner();

        match links.resolve(&code).await {
            Ok(Some(link)) => {
                // HEAD 只探测，不计点击
                if req.method() != Method::HEAD {
                    clicks.record(link.id);
                }
                trace!("Redirecting {} -> {}", code, link.target_url);
                HttpResponse::Found()
                    .insert_header(("Location", link.target_url))
                    .insert_header(("Cache-Control", "no-cache, no-store, must-revalidate"))
                    .finish()
            }
            Ok(None) => {
                debug!("No active link for code: {:?}", code);
                Self::not_found_response()
            }
            Err(e) => {
                error!("Storage error during redirect lookup: {}", e);
                Self::error_response()
            }
        }
    }

    #[inline]
    fn not_found_response() -> HttpResponse {
        HttpResponse::build(StatusCode::NOT_FOUND)
            .insert_header(("Content-Type", "text/html; charset=utf-8"))
            .insert_header(("Cache-Control", "no-cache"))
            .body("Not Found")
    }

    #[inline]
    fn error_response() -> HttpResponse {
        HttpResponse::build(StatusCode::INTERNAL_SERVER_ERROR)
            .insert_header(("Content-Type", "text/html; charset=utf-8"))
            .body("Internal Server Error")
    }
}

/// 重定向路由配置
///
/// 匹配整个剩余路径，含 `/` 的路径由 `LinkService::resolve` 判为不存在。
pub fn redirect_routes() -> actix_web::Resource {
    web::resource("/{code:.*}")
        .route(web::get().to(RedirectService::handle_redirect))
        .route(web::head().to(RedirectService::handle_redirect))
}
