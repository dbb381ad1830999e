use async_trait::async_trait;
use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::extract::cookie::{Cookie, Key, PrivateCookieJar};

use crate::error::AppError;

pub const SESSION_COOKIE: &str = "travel_session";

/// Whoever passed the email gate. There are no accounts and no credentials;
/// the session cookie simply carries the authorized email.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub email: String,
}

#[derive(Debug, Clone, Default)]
pub struct CurrentUser(pub Option<AuthenticatedUser>);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
    Key: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = PrivateCookieJar::<Key>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::Unauthorized)?;
        let user = jar.get(SESSION_COOKIE).map(|cookie| AuthenticatedUser {
            email: cookie.value().to_string(),
        });
        Ok(Self(user))
    }
}

impl CurrentUser {
    pub fn require_user(&self) -> Result<&AuthenticatedUser, AppError> {
        self.0.as_ref().ok_or(AppError::Unauthorized)
    }
}

pub fn start_session(jar: PrivateCookieJar, email: &str) -> PrivateCookieJar {
    let cookie = Cookie::build((SESSION_COOKIE, email.to_string()))
        .path("/")
        .http_only(true)
        .build();
    jar.add(cookie)
}

pub fn end_session(jar: PrivateCookieJar) -> PrivateCookieJar {
    jar.remove(Cookie::build(SESSION_COOKIE).path("/").build())
}
