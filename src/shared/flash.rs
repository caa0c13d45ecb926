//! One-shot notices carried across a redirect.
//!
//! The notice travels in the `flash` cookie (`<level>:<url-encoded message>`)
//! so the page the client lands on can show it, and is also echoed in the
//! body of the redirect response.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::cookie::{Cookie, SameSite};
use serde::Serialize;

use crate::shared::constants::FLASH_COOKIE;
use crate::shared::types::ApiResponse;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Error,
}

impl FlashLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlashLevel::Success => "success",
            FlashLevel::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Error,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.level == FlashLevel::Success
    }

    /// The `flash` cookie carrying this notice
    pub fn cookie(&self) -> Cookie<'static> {
        let value = format!("{}:{}", self.level.as_str(), urlencoding::encode(&self.message));

        Cookie::build((FLASH_COOKIE, value))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .build()
    }
}

/// `303 See Other` to `location`, optionally carrying a notice
#[derive(Debug)]
pub struct FlashRedirect {
    pub location: String,
    pub flash: Option<Flash>,
}

impl FlashRedirect {
    pub fn to(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            flash: None,
        }
    }

    pub fn with_flash(mut self, flash: Flash) -> Self {
        self.flash = Some(flash);
        self
    }
}

impl IntoResponse for FlashRedirect {
    fn into_response(self) -> Response {
        let Some(flash) = self.flash else {
            let body = Json(ApiResponse::<()>::success(None, None, None));
            return (StatusCode::SEE_OTHER, [(header::LOCATION, self.location)], body)
                .into_response();
        };

        let body = if flash.is_success() {
            ApiResponse::<()>::success(None, Some(flash.message.clone()), None)
        } else {
            ApiResponse::<()>::error(Some(flash.message.clone()), None)
        };

        (
            StatusCode::SEE_OTHER,
            [
                (header::LOCATION, self.location),
                (header::SET_COOKIE, flash.cookie().to_string()),
            ],
            Json(body),
        )
            .into_response()
    }
}
