//! Best-effort diagnostics attached to failure-bearing results.
//!
//! When a [`SafeResult`](crate::SafeResult) is built from a failure it records
//! a human-readable trace of where the failure came from. The trace is a side
//! channel: nothing in this crate reads it back, and its absence is normal.
//!
//! How much work is done is controlled by a process-wide
//! [`DiagnosticCapture`] mode:
//!
//! ```
//! use safe_rail::{diagnostic_capture, set_diagnostic_capture, DiagnosticCapture};
//!
//! set_diagnostic_capture(DiagnosticCapture::Always);
//! assert_eq!(diagnostic_capture(), DiagnosticCapture::Always);
//! ```
use core::sync::atomic::{AtomicU8, Ordering};
use std::backtrace::{Backtrace, BacktraceStatus};

use crate::traits::Failure;

/// Backtrace policy used when a failure-bearing result is constructed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum DiagnosticCapture {
    /// Capture only when `RUST_BACKTRACE` / `RUST_LIB_BACKTRACE` enable it.
    #[default]
    Env = 0,
    /// Always capture, regardless of the environment.
    Always = 1,
    /// Never capture a backtrace. A failure's own origin is still recorded.
    Off = 2,
}

impl DiagnosticCapture {
    #[inline]
    const fn from_u8(raw: u8) -> Self {
        match raw {
            1 => DiagnosticCapture::Always,
            2 => DiagnosticCapture::Off,
            _ => DiagnosticCapture::Env,
        }
    }
}

static CAPTURE_MODE: AtomicU8 = AtomicU8::new(DiagnosticCapture::Env as u8);

/// Sets the process-wide capture mode.
#[inline]
pub fn set_diagnostic_capture(mode: DiagnosticCapture) {
    CAPTURE_MODE.store(mode as u8, Ordering::Relaxed);
}

/// Returns the process-wide capture mode.
#[inline]
pub fn diagnostic_capture() -> DiagnosticCapture {
    DiagnosticCapture::from_u8(CAPTURE_MODE.load(Ordering::Relaxed))
}

/// Builds the diagnostic for `failure`.
///
/// The first line is always `"<label>: <failure>"`. It is followed by the
/// failure's own origin when it has one, otherwise by the active tracing span
/// (with the `tracing` feature) and a backtrace when `mode` allows it. Returns
/// `None` when nothing beyond the first line is available.
pub(crate) fn describe<F>(failure: &F, mode: DiagnosticCapture) -> Option<String>
where
    F: Failure,
{
    let header = format!("{}: {}", failure.label(), failure);

    if let Some(origin) = failure.origin() {
        return Some(format!("{}\n{}", header, origin));
    }

    let mut lines = Vec::new();

    if let Some(span) = current_span_name() {
        lines.push(format!("in span '{}'", span));
    }

    let backtrace = match mode {
        DiagnosticCapture::Env => Backtrace::capture(),
        DiagnosticCapture::Always => Backtrace::force_capture(),
        DiagnosticCapture::Off => Backtrace::disabled(),
    };
    if backtrace.status() == BacktraceStatus::Captured {
        lines.push(format!("stack backtrace:\n{}", backtrace));
    }

    if lines.is_empty() {
        return None;
    }

    lines.insert(0, header);
    Some(lines.join("\n"))
}

#[cfg(feature = "tracing")]
fn current_span_name() -> Option<&'static str> {
    tracing::Span::current().metadata().map(|metadata| metadata.name())
}

#[cfg(not(feature = "tracing"))]
#[inline]
fn current_span_name() -> Option<&'static str> {
    None
}
