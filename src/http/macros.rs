/// Builds an ordered `Vec<(String, String)>` of request parameters.
///
/// Values may be `&str`, `String`, `Option<String>` or `Option<&str>`. Pairs whose value
/// is `None` are left out, so optional API arguments can be listed unconditionally.
///
/// ```
/// let fields: Option<String> = None;
/// let params = redcap_rs::params!(
///     ("content", "record"),
///     ("format", "json"),
///     ("fields", fields),
/// );
/// assert_eq!(params.len(), 2);
/// ```
#[macro_export]
macro_rules! params {
    ( $( ($key:expr, $val:expr) ),* $(,)? ) => {{
        #[allow(unused_mut)]
        let mut v: Vec<(String, String)> = Vec::new();
        $(
            if let Some(s) = $crate::FormValue::as_form_str(&$val) {
                v.push(($key.to_string(), s.to_string()));
            }
        )*
        v
    }};
}
