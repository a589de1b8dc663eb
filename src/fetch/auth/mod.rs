//! Request decorators that attach credentials.

mod csrf;

pub use csrf::{CSRF_COOKIE, CsrfToken, csrf_token_from_cookies};
