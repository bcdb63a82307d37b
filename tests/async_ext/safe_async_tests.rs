//! Tests for the async wrapping adapter.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use safe_rail::prelude_async::*;
use safe_rail::traits::Failure;

async fn async_divide(a: i32, b: i32) -> f64 {
    tokio::time::sleep(Duration::from_millis(10)).await;
    if b == 0 {
        panic!("division by zero");
    }
    f64::from(a) / f64::from(b)
}

#[tokio::test]
async fn async_divide_success_and_failure() {
    let divide = safe_async(|(a, b): (i32, i32)| async_divide(a, b));

    let success = divide((10, 2)).await;
    assert!(success.is_success());
    assert_eq!(success.value(), Some(&5.0));

    let failure = divide((10, 0)).await;
    assert!(failure.is_failure());
    assert_eq!(failure.failure().map(Fault::kind), Some(FaultKind::Panic));
}

#[tokio::test]
async fn failure_after_suspension_is_captured() {
    let fail = safe_async(|()| async {
        tokio::time::sleep(Duration::from_millis(10)).await;
        panic!("async error")
    });

    let result: SafeResult<()> = fail(()).await;

    assert!(result.is_failure());
    let fault = result.failure().unwrap();
    assert!(fault.is_panic());
    assert!(fault.to_string().contains("async error"));
}

#[tokio::test]
async fn cancellation_mid_suspension_is_captured() {
    let slow = safe_async(|value: u32| async move {
        tokio::time::sleep(Duration::from_secs(60)).await;
        value
    });

    let result = slow(7).cancel_on(tokio::time::sleep(Duration::from_millis(10))).await;

    let fault = result.failure().expect("cancelled operation should fail");
    assert_eq!(fault.kind(), FaultKind::Cancelled);
    assert!(fault.is_cancellation());
    assert!(!fault.is_panic());
}

#[tokio::test]
async fn cancellation_is_absorbed_and_caller_continues() {
    let counter = Arc::new(AtomicU32::new(0));
    let slow = safe_async(|()| async {
        tokio::time::sleep(Duration::from_secs(60)).await;
    });

    for _ in 0..3 {
        let result = slow(()).cancel_on(tokio::time::sleep(Duration::from_millis(1))).await;
        if result.failure().is_some_and(Fault::is_cancelled) {
            counter.fetch_add(1, Ordering::SeqCst);
        }
    }

    assert_eq!(counter.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn signal_fired_before_start_prevents_the_operation() {
    let started = Arc::new(AtomicBool::new(false));
    let flag = started.clone();
    let op = safe_async(move |()| {
        let flag = flag.clone();
        async move {
            flag.store(true, Ordering::SeqCst);
            1
        }
    });

    let result = op(()).cancel_on(async {}).await;

    assert!(result.failure().is_some_and(Fault::is_cancelled));
    assert!(!started.load(Ordering::SeqCst));
}

#[tokio::test]
async fn completion_before_signal_keeps_the_value() {
    let op = safe_async(|x: u32| async move { x + 1 });

    let result = op(41).cancel_on(tokio::time::sleep(Duration::from_secs(60))).await;

    assert_eq!(result.unwrap(), 42);
}

#[tokio::test]
async fn panic_while_creating_the_future_is_captured() {
    let broken = safe_async(|index: usize| {
        let table = [10_u32, 20, 30];
        let value = table[index];
        async move { value }
    });

    assert_eq!(broken(1).await.unwrap(), 20);

    let result = broken(9).await;
    assert!(result.to_string().contains("index out of bounds"));
}

#[tokio::test]
async fn raised_cancellation_inside_operation_is_a_cancellation() {
    async fn shut_down() -> u8 {
        tokio::task::yield_now().await;
        std::panic::panic_any(Cancelled::with_reason("shutdown requested"))
    }

    let op = safe_async(|()| shut_down());

    let result = op(()).await;

    let fault = result.failure().unwrap();
    assert_eq!(fault.kind(), FaultKind::Cancelled);
    assert!(fault.to_string().contains("shutdown requested"));
}

#[tokio::test]
async fn round_trip_preserves_values() {
    let double = safe_async(|x: i64| async move { x * 2 });

    for x in [-3, 0, 5, 1_000] {
        assert_eq!(double(x).await.unwrap(), x * 2);
    }
}

#[tokio::test]
async fn timeout_by_racing_a_timer() {
    let fetch = safe_async(|delay: u64| async move {
        tokio::time::sleep(Duration::from_millis(delay)).await;
        "payload"
    });

    let fast = fetch(1).cancel_on(tokio::time::sleep(Duration::from_secs(5))).await;
    let slow = fetch(5_000).cancel_on(tokio::time::sleep(Duration::from_millis(5))).await;

    assert_eq!(fast.unwrap(), "payload");
    assert!(slow.failure().is_some_and(Fault::is_cancelled));
}
