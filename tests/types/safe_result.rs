use std::io;
use std::panic::{self, AssertUnwindSafe};

use safe_rail::traits::Failure;
use safe_rail::{capture, Fault, FaultKind, SafeResult};

#[derive(Debug, Clone, PartialEq)]
struct QuotaExceeded(u32);

impl std::fmt::Display for QuotaExceeded {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "quota exceeded by {}", self.0)
    }
}

impl Failure for QuotaExceeded {}

#[test]
fn success_holds_value() {
    let result: SafeResult<i32, QuotaExceeded> = SafeResult::of_value(42);

    assert!(result.is_success());
    assert!(!result.is_failure());
    assert_eq!(result.value(), Some(&42));
    assert!(result.failure().is_none());
    assert!(result.diagnostic().is_none());
    assert_eq!(result.clone().unwrap_or(0), 42);
    assert_eq!(result.unwrap(), 42);
}

#[test]
fn failure_holds_failure() {
    let result: SafeResult<i32, QuotaExceeded> = SafeResult::of_failure(QuotaExceeded(3));

    assert!(result.is_failure());
    assert!(!result.is_success());
    assert!(result.value().is_none());
    assert_eq!(result.failure(), Some(&QuotaExceeded(3)));
    assert_eq!(result.unwrap_or(42), 42);
}

#[test]
fn unit_success_is_still_success() {
    let result: SafeResult<(), Fault> = SafeResult::of_value(());

    assert!(result.is_success());
    assert_eq!(result.value(), Some(&()));
}

#[test]
fn unwrap_raises_the_original_failure() {
    let result: SafeResult<i32, QuotaExceeded> = SafeResult::of_failure(QuotaExceeded(7));

    let payload = panic::catch_unwind(AssertUnwindSafe(move || result.unwrap())).unwrap_err();

    assert_eq!(payload.downcast_ref::<QuotaExceeded>(), Some(&QuotaExceeded(7)));
}

#[test]
fn unwrap_resumes_the_captured_panic_payload() {
    #[derive(Debug, PartialEq)]
    struct Marker(u8);

    let result = capture(|| -> u8 { panic::panic_any(Marker(9)) });
    assert_eq!(result.failure().map(Fault::kind), Some(FaultKind::Panic));

    let payload = panic::catch_unwind(AssertUnwindSafe(move || result.unwrap())).unwrap_err();

    assert_eq!(payload.downcast_ref::<Marker>(), Some(&Marker(9)));
}

#[test]
fn unwrap_or_with_different_types() {
    let text: SafeResult<String, io::Error> = SafeResult::of_value("hello".to_string());
    assert_eq!(text.unwrap_or("default".to_string()), "hello");

    let failed: SafeResult<String, io::Error> = SafeResult::of_failure(io::Error::other("nope"));
    assert_eq!(failed.unwrap_or("default".to_string()), "default");

    let list: SafeResult<Vec<u8>, &str> = SafeResult::of_failure("empty");
    assert!(list.unwrap_or(Vec::new()).is_empty());
}

#[test]
fn unwrap_or_else_receives_the_failure() {
    let result: SafeResult<u32, QuotaExceeded> = SafeResult::of_failure(QuotaExceeded(5));

    assert_eq!(result.unwrap_or_else(|failure| failure.0 * 10), 50);
}

#[test]
fn display_marks_failures() {
    let success: SafeResult<&str, &str> = SafeResult::of_value("success");
    let failure: SafeResult<&str, &str> = SafeResult::of_failure("test error");

    assert_eq!(success.to_string(), "success");
    assert_eq!(failure.to_string(), "Error: test error");
}

#[test]
fn debug_distinguishes_states() {
    let success: SafeResult<&str, &str> = SafeResult::of_value("success");
    let failure: SafeResult<&str, &str> = SafeResult::of_failure("test error");

    assert_eq!(format!("{:?}", success), r#"SafeResult { value: "success" }"#);
    assert_eq!(format!("{:?}", failure), r#"SafeResult { failure: "test error" }"#);
}

#[test]
fn instances_are_independent() {
    let first: SafeResult<i32, &str> = SafeResult::of_value(1);
    let second: SafeResult<i32, &str> = SafeResult::of_value(2);
    let third: SafeResult<i32, &str> = SafeResult::of_failure("bad");

    assert_ne!(first.value(), second.value());
    assert!(first.is_success() && second.is_success());
    assert!(third.is_failure());
}

#[test]
fn into_result_supports_question_mark() {
    fn total(parts: &[SafeResult<u32, &'static str>]) -> Result<u32, &'static str> {
        let mut sum = 0;
        for part in parts {
            sum += part.clone().into_result()?;
        }
        Ok(sum)
    }

    let good: [SafeResult<u32, &str>; 2] = [SafeResult::of_value(1), SafeResult::of_value(2)];
    let bad: [SafeResult<u32, &str>; 2] =
        [SafeResult::of_value(1), SafeResult::of_failure("missing")];

    assert_eq!(total(&good), Ok(3));
    assert_eq!(total(&bad), Err("missing"));
}

#[test]
fn from_result_builds_matching_state() {
    let ok: SafeResult<u8, &str> = Ok(3).into();
    let err: SafeResult<u8, &str> = Err("broken").into();

    assert_eq!(ok.value(), Some(&3));
    assert_eq!(err.failure(), Some(&"broken"));
}

#[test]
fn map_transforms_only_success() {
    let doubled = SafeResult::<u32, &str>::of_value(21).map(|v| v * 2);
    let untouched = SafeResult::<u32, &str>::of_failure("nope").map(|v| v * 2);

    assert_eq!(doubled.value(), Some(&42));
    assert_eq!(untouched.failure(), Some(&"nope"));
}

#[test]
fn flatten_turns_inner_errors_into_faults() {
    let parsed = capture(|| "17".parse::<u8>()).flatten();
    assert_eq!(parsed.value(), Some(&17));

    let failed = capture(|| "seventeen".parse::<u8>()).flatten();
    let fault = failed.failure().expect("parse error expected");
    assert_eq!(fault.kind(), FaultKind::Error);
    assert!(fault.downcast_ref::<std::num::ParseIntError>().is_some());
}

#[test]
fn flatten_keeps_existing_faults() {
    let failed = capture(|| -> Result<u8, io::Error> { panic!("before parsing") }).flatten();

    assert_eq!(failed.failure().map(Fault::kind), Some(FaultKind::Panic));
    assert!(failed.to_string().contains("before parsing"));
}

#[test]
fn results_are_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<SafeResult<String>>();
    assert_send_sync::<Fault>();
}

#[cfg(feature = "serde")]
#[test]
fn serializes_success_and_failure() {
    use safe_rail::DiagnosticCapture;

    let ok: SafeResult<u32> = SafeResult::of_value(5);
    assert_eq!(serde_json::to_string(&ok).unwrap(), r#"{"value":5}"#);

    let failed: SafeResult<u32> =
        SafeResult::of_failure_with(Fault::error("disk full"), DiagnosticCapture::Off);
    let json: serde_json::Value = serde_json::to_value(&failed).unwrap();
    assert_eq!(json["failure"], "disk full");
    assert_eq!(json["kind"], "error");
    assert!(json["diagnostic"].is_null());
}
