//! Mail-in-a-Box HTTP 请求方法（使用通用 HTTP 工具）

use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::http_client::HttpUtils;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::MiabProvider;

impl MiabProvider {
    /// 构造带 Basic Auth 的请求
    fn build_request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{path}", self.base_url);
        self.client
            .request(method, url)
            .basic_auth(&self.username, Some(&self.password))
    }

    /// 发送请求并返回成功响应的文本，非 2xx 映射为统一错误
    async fn send(
        &self,
        method: Method,
        path: &str,
        request: RequestBuilder,
        max_retries: u32,
        ctx: ErrorContext,
    ) -> Result<String> {
        let (status, response_text) = HttpUtils::execute_request_with_retry(
            request,
            self.provider_name(),
            method.as_str(),
            path,
            max_retries,
        )
        .await?;

        if !(200..300).contains(&status) {
            log::error!(
                "[{}] {method} {path} failed with HTTP {status}",
                self.provider_name()
            );
            return Err(self.map_error(RawApiError::with_status(status, response_text), ctx));
        }

        Ok(response_text)
    }

    /// 执行 GET 请求并解析 JSON
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        ctx: ErrorContext,
    ) -> Result<T> {
        let request = self.build_request(Method::GET, path);
        let text = self
            .send(Method::GET, path, request, self.max_retries, ctx)
            .await?;
        HttpUtils::parse_json(&text, self.provider_name())
    }

    /// 以原始请求体发送 `value`（守护进程同时接受表单字段与原始 body）
    ///
    /// 修改类请求只发送一次：响应丢失时服务端可能已经生效，重发会重复写入。
    pub(crate) async fn send_value(
        &self,
        method: Method,
        path: &str,
        value: &str,
        ctx: ErrorContext,
    ) -> Result<String> {
        let request = self
            .build_request(method.clone(), path)
            .header("Content-Type", "text/plain; charset=utf-8")
            .body(value.to_string());
        self.send(method, path, request, 0, ctx).await
    }

    /// 发送表单请求，同样不重试
    pub(crate) async fn send_form(
        &self,
        method: Method,
        path: &str,
        form: &[(&str, &str)],
        ctx: ErrorContext,
    ) -> Result<String> {
        let request = self.build_request(method.clone(), path).form(form);
        self.send(method, path, request, 0, ctx).await
    }
}
