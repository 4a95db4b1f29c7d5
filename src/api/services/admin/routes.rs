//! Admin API 路由配置

use actix_web::web;

use super::auth::{login, logout, me};
use super::helpers::{json_error_handler, path_error_handler, query_error_handler};
use super::link_crud::{create_link, get_link, list_links, update_link};

/// 认证路由
///
/// - POST /login
/// - POST /logout
/// - GET /me
pub fn auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/login", web::post().to(login))
        .route("/logout", web::post().to(logout))
        .route("/me", web::get().to(me));
}

/// 链接管理路由 `/links`
///
/// - GET /links
/// - POST /links
/// - GET /links/{id}
/// - PUT|POST /links/{id}
pub fn links_routes() -> actix_web::Scope {
    web::scope("/links")
        .route("", web::get().to(list_links))
        .route("", web::post().to(create_link))
        .route("/{id}", web::get().to(get_link))
        .route("/{id}", web::put().to(update_link))
        .route("/{id}", web::post().to(update_link))
}

/// Everything under `/api`, without the auth middleware (the caller wraps it)
pub fn api_v1_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .configure(auth_routes)
        .service(links_routes());
}
