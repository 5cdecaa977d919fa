pub(crate) mod errors;
pub(crate) mod http;
pub(crate) mod logging;
pub(crate) mod utils;

pub(crate) use errors::error;

pub use errors::{ErrorKind, RedcapError};

pub use http::{
    RedcapRequest, RedcapRequestBuilder, RedcapRequestBuilderError,
    client::RedcapHttpClient,
    form::{
        FORM_CONTENT_TYPE, FormEncoder, FormEncoderOpts, FormEncoderOptsBuilder,
        FormEncoderOptsBuilderError, FormUrlEncodedContent, FormValue, encode_form_component,
    },
};

pub use logging::Logger;

pub use utils::{
    file::{
        ResponseFile, ResponseFileOpts, ResponseFileOptsBuilder, ResponseFileOptsBuilderError,
        WrittenFile,
    },
    join::{ListJoiner, join_ints, join_strings},
};
