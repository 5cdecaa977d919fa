use std::collections::HashMap;

use derive_builder::Builder;

use crate::{
    RedcapError,
    http::{
        client::RedcapHttpClient,
        form::{FormEncoder, FormUrlEncodedContent},
    },
    utils::file::{ResponseFile, WrittenFile},
};

pub mod client;
pub mod form;
mod macros;


/// A form-encoded POST against the API endpoint.
///
/// Parameters are sent in the order given; build them with [`params!`](crate::params) and
/// flatten multi-valued arguments with [`join_strings`](crate::join_strings) first.
#[derive(Builder, Debug, Clone)]
pub struct RedcapRequest {
    #[builder(setter(into))]
    url: String,

    #[builder(setter(into), default = Vec::new())]
    params: Vec<(String, String)>,

    #[builder(setter(into), default = HashMap::new())]
    headers: HashMap<String, String>,

    #[builder(default)]
    encoder: FormEncoder,
}

impl RedcapRequest {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    /// Encodes the request parameters without sending anything.
    pub fn body(&self) -> Result<FormUrlEncodedContent, RedcapError> {
        self.encoder.encode(Some(&self.params[..]))
    }

    pub async fn post<C: RedcapHttpClient>(self, client: &C) -> Result<Vec<u8>, RedcapError> {
        let body = self.body()?;
        let mut headers = self.headers;

        headers.insert("content-type".into(), body.content_type().into());

        client
            .post(self.url.as_str(), body.into_bytes(), headers)
            .await
    }

    /// Posts the request and saves the response body to `file`.
    pub async fn download<C: RedcapHttpClient>(
        self,
        client: &C,
        file: &ResponseFile,
    ) -> Result<WrittenFile, RedcapError> {
        let resp = self.post(client).await?;

        file.write_reader(resp.as_slice())
    }
}
