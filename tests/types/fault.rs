use std::any::Any;
use std::error::Error;

use safe_rail::{Cancelled, Fault, FaultKind, Panicked};

fn payload<P: Any + Send>(value: P) -> Box<dyn Any + Send> {
    Box::new(value)
}

#[test]
fn str_payload_becomes_panic_with_message() {
    let fault = Fault::from_panic(payload("attempt to divide by zero"));

    assert_eq!(fault.kind(), FaultKind::Panic);
    assert!(fault.is_panic());
    assert_eq!(fault.to_string(), "attempt to divide by zero");
    assert_eq!(fault.as_panic().and_then(Panicked::message), Some("attempt to divide by zero"));
}

#[test]
fn string_payload_keeps_formatted_message() {
    let fault = Fault::from_panic(payload(format!("index out of bounds: the len is {}", 3)));

    assert_eq!(fault.to_string(), "index out of bounds: the len is 3");
}

#[test]
fn opaque_payload_has_no_message() {
    #[derive(Debug)]
    struct Opaque;

    let fault = Fault::from_panic(payload(Opaque));
    let panicked = fault.as_panic().unwrap();

    assert!(panicked.message().is_none());
    assert!(panicked.payload_is::<Opaque>());
    assert_eq!(fault.to_string(), "Box<dyn Any>");
}

#[test]
fn panic_payload_is_returned_unchanged() {
    let panicked = Panicked::new(payload(41_u64));

    let original = panicked.into_payload();

    assert_eq!(original.downcast_ref::<u64>(), Some(&41));
}

#[test]
fn cancelled_payload_is_classified_as_cancellation() {
    let fault = Fault::from_panic(payload(Cancelled::with_reason("shutdown")));

    assert_eq!(fault.kind(), FaultKind::Cancelled);
    assert!(fault.is_cancelled());
    assert!(!fault.is_panic());
    assert_eq!(fault.to_string(), "operation cancelled: shutdown");
    assert_eq!(fault.downcast_ref::<Cancelled>().and_then(Cancelled::reason), Some("shutdown"));
}

#[test]
fn error_keeps_concrete_type() {
    let fault = Fault::error(std::io::Error::new(std::io::ErrorKind::NotFound, "missing file"));

    assert_eq!(fault.kind(), FaultKind::Error);
    assert!(fault.is_error());
    assert_eq!(
        fault.downcast_ref::<std::io::Error>().map(std::io::Error::kind),
        Some(std::io::ErrorKind::NotFound)
    );
    assert!(fault.downcast_ref::<std::fmt::Error>().is_none());
}

#[test]
fn source_exposes_inner_error() {
    let fault = Fault::error("root cause");

    assert_eq!(fault.source().map(ToString::to_string), Some("root cause".to_string()));
    assert!(Fault::from_panic(payload("boom")).source().is_none());
}

#[test]
fn conversions_pick_the_right_variant() {
    assert!(Fault::from(Cancelled::new()).is_cancelled());
    assert!(Fault::from(Panicked::new(payload("boom"))).is_panic());

    let boxed: safe_rail::BoxError = "boxed".into();
    assert!(Fault::from(boxed).is_error());
}

#[test]
fn cancelled_display_without_reason() {
    let cancelled = Cancelled::new();

    assert_eq!(cancelled.reason(), None);
    assert_eq!(cancelled.to_string(), "operation cancelled");
    assert_eq!(cancelled, Cancelled::default());
}

#[test]
fn kind_labels() {
    assert_eq!(FaultKind::Panic.to_string(), "panic");
    assert_eq!(FaultKind::Error.as_str(), "error");
    assert_eq!(FaultKind::Cancelled.to_string(), "cancelled");
}

#[test]
fn debug_hides_payload() {
    let fault = Fault::from_panic(payload("boom"));

    let debug = format!("{:?}", fault);
    assert!(debug.contains("Panic"));
    assert!(debug.contains("boom"));
}
