//! Admin API 链接 CRUD 操作

use std::sync::Arc;

use actix_web::{Responder, Result as ActixResult, web};
use tracing::trace;

use crate::services::{CreateLinkRequest, LinkService, Principal, UpdateLinkRequest};

use super::helpers::{api_result, created_response, error_from_shorturl};
use super::types::{ListLinksQuery, PostNewLink, UpdateLinkBody};

/// `GET /api/links?limit=N`
pub async fn list_links(
    principal: Principal,
    query: web::Query<ListLinksQuery>,
    service: web::Data<Arc<LinkService>>,
) -> ActixResult<impl Responder> {
    trace!("Admin API: list links, limit {:?}", query.limit);
    Ok(api_result(service.list_links(&principal, query.limit).await))
}

/// `POST /api/links`
pub async fn create_link(
    principal: Principal,
    body: web::Json<PostNewLink>,
    service: web::Data<Arc<LinkService>>,
) -> ActixResult<impl Responder> {
    let body = body.into_inner();
    let req = CreateLinkRequest {
        code: body.code,
        target_url: body.target_url,
    };

    Ok(match service.create_link(&principal, req).await {
        Ok(link) => created_response(link),
        Err(e) => error_from_shorturl(&e),
    })
}

/// `GET /api/links/{id}`
pub async fn get_link(
    principal: Principal,
    id: web::Path<i32>,
    service: web::Data<Arc<LinkService>>,
) -> ActixResult<impl Responder> {
    Ok(api_result(service.get_link(&principal, id.into_inner()).await))
}

/// `PUT /api/links/{id}` (POST accepted for HTML forms)
pub async fn update_link(
    principal: Principal,
    id: web::Path<i32>,
    body: web::Json<UpdateLinkBody>,
    service: web::Data<Arc<LinkService>>,
) -> ActixResult<impl Responder> {
    let body = body.into_inner();
    let req = UpdateLinkRequest {
        target_url: body.target_url,
        enabled: body.enabled,
    };

    Ok(api_result(
        service.update_link(&principal, id.into_inner(), req).await,
    ))
}
