use derive_builder::Builder;
use encoding_rs::Encoding;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::{RedcapError, error, logging::Logger};

#[cfg(test)]
#[path = "./form_test.rs"]
mod form_test;

pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

// Characters left as-is by the legacy web utility encoder. Space is escaped to %20 here
// and rewritten to '+' afterwards.
const LEGACY_FORM_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'*')
    .remove(b'(')
    .remove(b')');

/// Anything that can stand as a key or value in a form body. `None` encodes as empty.
pub trait FormValue {
    fn as_form_str(&self) -> Option<&str>;
}

impl FormValue for str {
    fn as_form_str(&self) -> Option<&str> {
        Some(self)
    }
}

impl FormValue for String {
    fn as_form_str(&self) -> Option<&str> {
        Some(self.as_str())
    }
}

impl FormValue for Option<String> {
    fn as_form_str(&self) -> Option<&str> {
        self.as_deref()
    }
}

impl FormValue for Option<&str> {
    fn as_form_str(&self) -> Option<&str> {
        *self
    }
}

impl<T: FormValue + ?Sized> FormValue for &T {
    fn as_form_str(&self) -> Option<&str> {
        (**self).as_form_str()
    }
}

#[derive(Builder, Debug, Clone)]
pub struct FormEncoderOpts {
    /// Text encoding used to turn the assembled body into bytes.
    ///
    /// Defaults to windows-1252, the single-byte code page the legacy API clients wrote
    /// bodies in.
    #[builder(default = encoding_rs::WINDOWS_1252)]
    pub(crate) encoding: &'static Encoding,

    #[builder(setter(into), default)]
    pub(crate) logger: Logger,
}

impl Default for FormEncoderOpts {
    fn default() -> Self {
        Self {
            encoding: encoding_rs::WINDOWS_1252,
            logger: Logger::default(),
        }
    }
}

/// An encoded `application/x-www-form-urlencoded` request body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormUrlEncodedContent {
    body: Vec<u8>,
}

impl FormUrlEncodedContent {
    /// Encodes `params` with the default options.
    pub fn new<K: FormValue, V: FormValue>(
        params: Option<&[(K, V)]>,
    ) -> Result<Self, RedcapError> {
        FormEncoder::default().encode(params)
    }

    pub fn content_type(&self) -> &'static str {
        FORM_CONTENT_TYPE
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.body
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.body
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

impl From<FormUrlEncodedContent> for Vec<u8> {
    fn from(content: FormUrlEncodedContent) -> Self {
        content.body
    }
}

#[derive(Debug, Clone, Default)]
pub struct FormEncoder {
    opts: FormEncoderOpts,
}

impl FormEncoder {
    pub fn new(opts: FormEncoderOpts) -> Self {
        Self { opts }
    }

    pub fn encoding(&self) -> &'static Encoding {
        self.opts.encoding
    }

    /// Encodes the ordered `params` into a form body.
    ///
    /// `None` is rejected with `InvalidInput`; an empty slice gives an empty body.
    pub fn encode<K: FormValue, V: FormValue>(
        &self,
        params: Option<&[(K, V)]>,
    ) -> Result<FormUrlEncodedContent, RedcapError> {
        let params =
            params.ok_or_else(|| error!(InvalidInput, "form parameters were not provided"))?;

        let text = construct_body(params);
        let (bytes, used_encoding, had_errors) = self.opts.encoding.encode(&text);

        if had_errors {
            return Err(error!(
                OperationFailed,
                message = format!("form body is not representable in {}", used_encoding.name())
            ));
        }

        let body = bytes.into_owned();

        self.opts.logger.scope(|| {
            tracing::debug!(
                pairs = params.len(),
                bytes = body.len(),
                encoding = used_encoding.name(),
                "encoded form body"
            );
        });

        Ok(FormUrlEncodedContent { body })
    }
}

/// Encodes a single key or value the way it appears inside a form body.
pub fn encode_form_component(input: &str) -> String {
    let mut buffer = String::with_capacity(input.len());
    encode_into(&mut buffer, Some(input));
    buffer
}

fn construct_body<K: FormValue, V: FormValue>(params: &[(K, V)]) -> String {
    let guessed_length = params.len() * 20;
    let mut body = String::with_capacity(guessed_length);

    let mut prefix = "";

    for (key, value) in params {
        body.push_str(prefix);

        encode_into(&mut body, key.as_form_str());
        body.push('=');
        encode_into(&mut body, value.as_form_str());

        prefix = "&";
    }

    body
}

fn encode_into(buffer: &mut String, input: Option<&str>) {
    let Some(input) = input.filter(|s| !s.is_empty()) else {
        return;
    };

    // '%' in the input is always escaped to %25, so only escaped spaces match here.
    let encoded = utf8_percent_encode(input, LEGACY_FORM_SET).to_string();
    buffer.push_str(&encoded.replace("%20", "+"));
}
