//! Records where a captured panic was raised.
//!
//! `catch_unwind` hands back only the payload; the location and the stack of
//! the panic are gone by the time the adapter sees it. [`catch`] installs a
//! chained panic hook (once per process) that, while a wrapped call is
//! running on the current thread, stores the panic location and, when the
//! [`DiagnosticCapture`] mode allows, a backtrace taken at the panic site.
//! The previous hook still runs afterwards.
//!
//! A hook installed later with [`std::panic::set_hook`] replaces this one;
//! captured panics then simply carry no origin.
use core::cell::{Cell, RefCell};
use std::backtrace::{Backtrace, BacktraceStatus};
use std::panic::{self, AssertUnwindSafe, PanicHookInfo};
use std::sync::Once;

use crate::types::diagnostic::{diagnostic_capture, DiagnosticCapture};
use crate::types::Fault;

thread_local! {
    static DEPTH: Cell<usize> = const { Cell::new(0) };
    static ORIGIN: RefCell<Option<String>> = const { RefCell::new(None) };
}

static INSTALL: Once = Once::new();

/// Runs `f`, turning an unwinding panic into a [`Fault`] that remembers where
/// it was raised.
pub(crate) fn catch<R>(f: impl FnOnce() -> R) -> Result<R, Fault> {
    INSTALL.call_once(install_hook);

    let _scope = Scope::enter();
    panic::catch_unwind(AssertUnwindSafe(f)).map_err(|payload| {
        let origin = ORIGIN.with(|slot| slot.borrow_mut().take());
        Fault::from_caught(payload, origin)
    })
}

fn install_hook() {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        if DEPTH.try_with(Cell::get).unwrap_or(0) > 0 {
            let origin = describe_site(info);
            let _ = ORIGIN.try_with(|slot| {
                if let Ok(mut slot) = slot.try_borrow_mut() {
                    *slot = Some(origin);
                }
            });
        }
        previous(info);
    }));
}

fn describe_site(info: &PanicHookInfo<'_>) -> String {
    let mut origin = match info.location() {
        Some(location) => format!("panicked at {}", location),
        None => String::from("panicked at an unknown location"),
    };

    let backtrace = match diagnostic_capture() {
        DiagnosticCapture::Env => Backtrace::capture(),
        DiagnosticCapture::Always => Backtrace::force_capture(),
        DiagnosticCapture::Off => Backtrace::disabled(),
    };
    if backtrace.status() == BacktraceStatus::Captured {
        origin.push_str("\nstack backtrace:\n");
        origin.push_str(&backtrace.to_string());
    }
    origin
}

/// Marks the current thread as running a wrapped call.
struct Scope;

impl Scope {
    fn enter() -> Self {
        DEPTH.with(|depth| depth.set(depth.get() + 1));
        Scope
    }
}

impl Drop for Scope {
    fn drop(&mut self) {
        DEPTH.with(|depth| depth.set(depth.get() - 1));
        if DEPTH.with(Cell::get) == 0 {
            ORIGIN.with(|slot| slot.borrow_mut().take());
        }
    }
}
