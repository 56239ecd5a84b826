//! Endpoint URL construction.

/// Join a base URL and an endpoint path without doubling or dropping slashes.
///
/// ```
/// use quickreply::utils::url::construct_api_url;
///
/// assert_eq!(
///     construct_api_url("https://example.test/v1beta/", "/models"),
///     "https://example.test/v1beta/models"
/// );
/// ```
pub fn construct_api_url(base_url: &str, endpoint: &str) -> String {
    let base = base_url.trim_end_matches('/');
    let endpoint = endpoint.trim_start_matches('/');
    format!("{base}/{endpoint}")
}

/// URL for a model-scoped action, e.g. `{base}/models/{model}:generateContent`.
pub fn model_action_url(base_url: &str, model: &str, action: &str) -> String {
    construct_api_url(base_url, &format!("models/{model}:{action}"))
}
