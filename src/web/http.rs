//! HTTP 传输实现
//!
//! 基于 `gloo-net` 的 fetch 封装，超时由 `gloo-timers` 与请求竞速实现。
//! 超时后通过 `AbortController` 取消浏览器中的请求。

use gloo_net::http::{Method, RequestBuilder};
use gloo_timers::future::TimeoutFuture;
use web_sys::AbortController;

use crate::error::TransportError;
use crate::pipeline::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, with_deadline};

/// 浏览器 fetch 传输
pub struct FetchTransport;

impl From<HttpMethod> for Method {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl HttpTransport for FetchTransport {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        let timeout = req.timeout;

        let controller = AbortController::new()
            .map_err(|e| TransportError::Build(format!("{e:?}")))?;
        let signal = controller.signal();

        let mut builder = RequestBuilder::new(&req.url)
            .method(req.method.into())
            .abort_signal(Some(&signal));
        for (key, value) in &req.headers {
            builder = builder.header(key, value);
        }

        let request = match req.body {
            Some(body) => builder.body(body),
            None => builder.build(),
        }
        .map_err(|e| TransportError::Build(e.to_string()))?;

        let fetch = async move {
            let response = request
                .send()
                .await
                .map_err(|e| TransportError::Network(e.to_string()))?;
            let status = response.status();
            let body = response
                .text()
                .await
                .map_err(|e| TransportError::Decode(e.to_string()))?;
            Ok::<_, TransportError>(HttpResponse { status, body })
        };

        let millis = u32::try_from(timeout.as_millis()).unwrap_or(u32::MAX);
        with_deadline(fetch, TimeoutFuture::new(millis), timeout, || controller.abort()).await
    }
}
