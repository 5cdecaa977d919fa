#[cfg(test)]
use super::*;

fn failing_io() -> Result<(), RedcapError> {
    let res: Result<(), std::io::Error> = Err(std::io::Error::other("disk on fire"));
    this_errors!(OperationFailed, "failed to write", res);
    Ok(())
}

#[test]
fn literal_error_carries_kind_and_trace() {
    let err = error!(InvalidInput, "params were not provided");

    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    assert_eq!(err.message(), "params were not provided");
    assert!(err.trace().ends_with("literal_error_carries_kind_and_trace"));
    assert!(err.underlying_error().is_none());
    assert!(err.to_string().starts_with("[InvalidInput] ("));
}

#[test]
fn formatted_message_error() {
    let name = "report.csv";
    let err = error!(AlreadyExists, message = format!("file {} already exists", name));

    assert_eq!(err.kind(), ErrorKind::AlreadyExists);
    assert_eq!(err.message(), "file report.csv already exists");
}

#[test]
fn this_errors_wraps_and_preserves_message() {
    let err = failing_io().unwrap_err();

    assert_eq!(err.kind(), ErrorKind::OperationFailed);
    assert_eq!(err.message(), "failed to write - disk on fire");
    assert_eq!(err.underlying_error(), Some("Error"));
    assert!(err.trace().contains("failing_io"));
}
