//! Admin API 认证相关端点

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, Result as ActixResult, web};
use tracing::{error, info, warn};

use crate::api::session::SessionService;
use crate::services::{AuthService, Principal};

use super::error_code::ErrorCode;
use super::helpers::{error_from_shorturl, error_response, success_response};
use super::types::{LoginCredentials, UserInfo};

/// `POST /api/login`
pub async fn login(
    credentials: web::Json<LoginCredentials>,
    auth: web::Data<Arc<AuthService>>,
    sessions: web::Data<Arc<SessionService>>,
) -> ActixResult<impl Responder> {
    let credentials = credentials.into_inner();

    let principal = match auth
        .authenticate(&credentials.username, &credentials.password)
        .await
    {
        Ok(Some(principal)) => principal,
        Ok(None) => {
            warn!("Login failed for '{}'", credentials.username.trim());
            return Ok(error_response(
                StatusCode::UNAUTHORIZED,
                ErrorCode::AuthFailed,
                "Invalid username or password",
            ));
        }
        Err(e) => {
            error!("Login check failed: {}", e);
            return Ok(error_from_shorturl(&e));
        }
    };

    let token = match sessions.issue(&principal) {
        Ok(token) => token,
        Err(e) => {
            error!("Failed to issue session token: {}", e);
            return Ok(error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::InternalServerError,
                "Failed to create session",
            ));
        }
    };

    info!("User '{}' logged in", principal.username);
    let mut response = success_response(UserInfo {
        username: principal.username,
    });
    response.add_cookie(&sessions.session_cookie(token))?;
    Ok(response)
}

/// `POST /api/logout`
pub async fn logout(sessions: web::Data<Arc<SessionService>>) -> ActixResult<impl Responder> {
    Ok(HttpResponse::NoContent()
        .cookie(sessions.expired_cookie())
        .finish())
}

/// `GET /api/me`
pub async fn me(principal: Principal) -> ActixResult<impl Responder> {
    Ok(success_response(UserInfo {
        username: principal.username,
    }))
}
