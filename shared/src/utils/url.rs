//! Sign-in link construction

/// Build a fully qualified sign-in URL carrying the strategy, token and uid
///
/// ```
/// use pwl_shared::url::signin_url;
///
/// let link = signin_url("https://example.com/account/token", "email", "AB12", "alice@example.com");
/// assert_eq!(
///     link,
///     "https://example.com/account/token?strategy=email&token=AB12&uid=alice%40example.com"
/// );
/// ```
pub fn signin_url(endpoint: &str, strategy: &str, token: &str, uid: &str) -> String {
    let separator = if endpoint.contains('?') { '&' } else { '?' };
    format!(
        "{}{}strategy={}&token={}&uid={}",
        endpoint,
        separator,
        urlencoding::encode(strategy),
        urlencoding::encode(token),
        urlencoding::encode(uid),
    )
}
