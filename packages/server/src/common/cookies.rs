//! Session cookie handling.
//!
//! Workflows write cookies into a request-scoped [`ResponseCookies`]; the HTTP
//! layer turns it into `Set-Cookie` headers when the response is built.

use std::convert::Infallible;
use std::fmt;

use axum::http::{
    header::{COOKIE, SET_COOKIE},
    HeaderMap, HeaderValue,
};
use axum::response::{IntoResponseParts, ResponseParts};
use tracing::warn;

/// Cookie carrying the backend session secret
pub const SESSION_COOKIE_NAME: &str = "appwrite-session";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SameSite {
    Strict,
    Lax,
}

impl fmt::Display for SameSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SameSite::Strict => f.write_str("Strict"),
            SameSite::Lax => f.write_str("Lax"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
    pub name: String,
    pub value: String,
    pub path: String,
    pub http_only: bool,
    pub secure: bool,
    pub same_site: SameSite,
    /// `Some(0)` expires the cookie immediately
    pub max_age: Option<i64>,
}

impl Cookie {
    /// Http-only, strict same-site session cookie.
    pub fn session(secret: &str, secure: bool) -> Self {
        Self {
            name: SESSION_COOKIE_NAME.to_string(),
            value: secret.to_string(),
            path: "/".to_string(),
            http_only: true,
            secure,
            same_site: SameSite::Strict,
            max_age: None,
        }
    }

    /// Cookie that tells the browser to drop `name`.
    pub fn removal(name: &str, secure: bool) -> Self {
        Self {
            name: name.to_string(),
            value: String::new(),
            path: "/".to_string(),
            http_only: true,
            secure,
            same_site: SameSite::Strict,
            max_age: Some(0),
        }
    }
}

impl fmt::Display for Cookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}; Path={}", self.name, self.value, self.path)?;
        if let Some(max_age) = self.max_age {
            write!(f, "; Max-Age={}", max_age)?;
        }
        if self.http_only {
            f.write_str("; HttpOnly")?;
        }
        write!(f, "; SameSite={}", self.same_site)?;
        if self.secure {
            f.write_str("; Secure")?;
        }
        Ok(())
    }
}

/// Cookies to emit with the current response
#[derive(Debug, Default)]
pub struct ResponseCookies {
    cookies: Vec<Cookie>,
}

impl ResponseCookies {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a cookie, replacing any earlier one with the same name
    pub fn set(&mut self, cookie: Cookie) {
        self.cookies.retain(|c| c.name != cookie.name);
        self.cookies.push(cookie);
    }

    pub fn remove(&mut self, name: &str, secure: bool) {
        self.set(Cookie::removal(name, secure));
    }

    pub fn get(&self, name: &str) -> Option<&Cookie> {
        self.cookies.iter().find(|c| c.name == name)
    }

    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cookie> {
        self.cookies.iter()
    }
}

impl IntoResponseParts for ResponseCookies {
    type Error = Infallible;

    fn into_response_parts(self, mut res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        for cookie in self.cookies {
            match HeaderValue::from_str(&cookie.to_string()) {
                Ok(value) => {
                    res.headers_mut().append(SET_COOKIE, value);
                }
                Err(e) => warn!(cookie = %cookie.name, error = %e, "Dropping unencodable cookie"),
            }
        }
        Ok(res)
    }
}

/// Value of cookie `name` from the request's `Cookie` headers
pub fn read_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|raw| raw.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
}

/// Session secret sent by the browser, if any
pub fn session_secret(headers: &HeaderMap) -> Option<&str> {
    read_cookie(headers, SESSION_COOKIE_NAME)
}
