use crate::fetch::client::HttpClient;
use anyhow::Context;
use async_trait::async_trait;
use reqwest::Method;
use reqwest::header::{COOKIE, HeaderName, HeaderValue};

/// Name of the session cookie that carries the anti-forgery token.
pub const CSRF_COOKIE: &str = "csrftoken";

/// An [`HttpClient`] wrapper that attaches an anti-forgery token to unsafe
/// requests.
///
/// The token is sent both as the `X-CSRFToken` header and as the
/// `csrftoken` cookie, which is what the prediction service checks on
/// `POST`. `GET`/`HEAD` requests pass through untouched.
pub struct CsrfToken<C> {
    inner: C,
    header: HeaderValue,
    cookie: HeaderValue,
}

impl<C> CsrfToken<C> {
    pub fn new(inner: C, token: &str) -> anyhow::Result<Self> {
        let header = HeaderValue::from_str(token).context("CSRF token is not a valid header value")?;
        let cookie = HeaderValue::from_str(&format!("{CSRF_COOKIE}={token}"))
            .context("CSRF token is not a valid cookie value")?;
        Ok(Self {
            inner,
            header,
            cookie,
        })
    }
}

#[async_trait]
impl<C: HttpClient> HttpClient for CsrfToken<C> {
    async fn execute(&self, mut req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        if *req.method() != Method::GET && *req.method() != Method::HEAD {
            let headers = req.headers_mut();
            headers.insert(HeaderName::from_static("x-csrftoken"), self.header.clone());
            if !headers.contains_key(COOKIE) {
                headers.insert(COOKIE, self.cookie.clone());
            }
        }
        self.inner.execute(req).await
    }
}

/// Extracts the cookie called `name` from a `Cookie`-style string
/// (`"a=1; csrftoken=abc%3D"`), percent-decoding its value.
pub fn csrf_token_from_cookies(cookies: &str, name: &str) -> Option<String> {
    cookies.split(';').find_map(|pair| {
        let value = pair.trim().strip_prefix(name)?.strip_prefix('=')?;
        urlencoding::decode(value).ok().map(|v| v.into_owned())
    })
}
