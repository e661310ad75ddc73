use covid_core::ApiError;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

fn transport(url: &str, message: impl Into<String>) -> ApiError {
    ApiError::Transport {
        url: url.to_string(),
        message: message.into(),
    }
}

/// GETs `url` cross-origin and returns the body text.
pub async fn fetch_text(url: &str) -> Result<String, ApiError> {
    let window = web_sys::window().ok_or_else(|| transport(url, "no window"))?;

    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::Cors);

    let request = Request::new_with_str_and_init(url, &opts)
        .map_err(|_| transport(url, "invalid request"))?;

    let response_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|_| transport(url, "network error"))?;

    let response = response_value
        .dyn_into::<Response>()
        .map_err(|_| transport(url, "not a response"))?;

    if !response.ok() {
        return Err(ApiError::Status {
            url: url.to_string(),
            status: response.status(),
        });
    }

    let body = response
        .text()
        .map_err(|_| transport(url, "unreadable body"))?;
    JsFuture::from(body)
        .await
        .map_err(|_| transport(url, "unreadable body"))?
        .as_string()
        .ok_or_else(|| ApiError::Decode(format!("{url}: body is not text")))
}

pub fn log_error(context: &str, error: &ApiError) {
    web_sys::console::error_1(&format!("{context}: {error}").into());
}
