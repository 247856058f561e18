//! Ctrl-C handling.
//!
//! The first SIGINT only raises a flag; the pipeline notices it between
//! steps and stops cleanly. The handler then restores the default
//! disposition, so a second Ctrl-C kills a step stuck on a dead mount.

use std::sync::atomic::{AtomicBool, Ordering};

static SIGINT_RECEIVED: AtomicBool = AtomicBool::new(false);

/// Cooperative interruption flag checked between pipeline steps.
#[derive(Debug, Default)]
pub struct InterruptFlag {
    local: AtomicBool,
    watch_signal: bool,
}

impl InterruptFlag {
    /// Install the SIGINT handler and return a flag that observes it.
    ///
    /// On platforms without the handler the flag only reacts to
    /// [`trigger`](Self::trigger).
    pub fn install() -> Self {
        let watch_signal = install_sigint_handler();
        if !watch_signal {
            tracing::debug!("SIGINT handler not installed");
        }
        Self {
            local: AtomicBool::new(false),
            watch_signal,
        }
    }

    /// A flag not connected to any signal.
    pub fn manual() -> Self {
        Self::default()
    }

    /// Request interruption.
    pub fn trigger(&self) {
        self.local.store(true, Ordering::SeqCst);
    }

    /// Whether interruption was requested.
    pub fn is_set(&self) -> bool {
        self.local.load(Ordering::SeqCst)
            || (self.watch_signal && SIGINT_RECEIVED.load(Ordering::SeqCst))
    }
}

#[cfg(unix)]
extern "C" fn on_sigint(_signal: libc::c_int) {
    SIGINT_RECEIVED.store(true, Ordering::SeqCst);
    // SAFETY: signal() is async-signal-safe; resetting to SIG_DFL touches no Rust state.
    unsafe {
        libc::signal(libc::SIGINT, libc::SIG_DFL);
    }
}

#[cfg(unix)]
fn install_sigint_handler() -> bool {
    let handler = on_sigint as extern "C" fn(libc::c_int) as libc::sighandler_t;
    // SAFETY: the handler only stores to a static atomic and calls signal().
    let previous = unsafe { libc::signal(libc::SIGINT, handler) };
    previous != libc::SIG_ERR
}

#[cfg(not(unix))]
fn install_sigint_handler() -> bool {
    false
}
