use std::collections::HashMap;

use crate::RedcapError;
use core::future::Future;

#[cfg(feature = "reqwest")]
use reqwest;

/// Transport used to send encoded request bodies. Implement this to plug in any HTTP stack.
pub trait RedcapHttpClient: Clone + Send + 'static {
    fn post(
        &self,
        url: &str,
        body: Vec<u8>,
        headers: HashMap<String, String>,
    ) -> impl Future<Output = Result<Vec<u8>, RedcapError>> + Send;
}

#[cfg(feature = "reqwest")]
impl RedcapHttpClient for reqwest::Client {
    fn post(
        &self,
        url: &str,
        body: Vec<u8>,
        headers: HashMap<String, String>,
    ) -> impl Future<Output = Result<Vec<u8>, RedcapError>> {
        use crate::errors::{error, this_errors};

        async move {
            use reqwest::header::HeaderMap;

            let url = this_errors!(
                OperationFailed,
                "failed to parse url",
                reqwest::Url::parse(url)
            );

            let headers = this_errors!(
                OperationFailed,
                "failed to convert headers",
                headers
                    .iter()
                    .map(|(k, v)| {
                        Ok((
                            reqwest::header::HeaderName::from_bytes(k.as_bytes())
                                .map_err(|e| error!(InvalidInput, e))?,
                            reqwest::header::HeaderValue::from_str(v.as_str())
                                .map_err(|e| error!(InvalidInput, e))?,
                        ))
                    })
                    .collect::<Result<
                        Vec<(reqwest::header::HeaderName, reqwest::header::HeaderValue)>,
                        RedcapError,
                    >>()
            );

            let resp = this_errors!(
                OperationFailed,
                "failed to send post request",
                self.post(url)
                    .body(body)
                    .headers(HeaderMap::from_iter(headers))
                    .send()
                    .await
            );

            let resp = this_errors!(
                OperationFailed,
                "server returned an error status",
                resp.error_for_status()
            );

            let bytes = this_errors!(
                OperationFailed,
                "failed to get response bytes",
                resp.bytes().await
            );

            Ok(bytes.to_vec())
        }
    }
}
