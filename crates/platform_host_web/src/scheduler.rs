//! `window.setInterval` / `window.setTimeout` scheduler.
//!
//! Interval handles own their JS closure and release it when cleared. Timeouts use a one-shot JS
//! function that frees itself after firing, so a settle callback may drop its own handle.
//! Non-wasm targets return inert handles and never fire.

use std::time::Duration;

use platform_host::{Scheduler, TimerHandle};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{closure::Closure, JsCast};

#[derive(Debug, Clone, Copy, Default)]
/// Browser timer service bound to the global `window`.
pub struct WebScheduler;

#[cfg(target_arch = "wasm32")]
fn timeout_millis(duration: Duration) -> i32 {
    i32::try_from(duration.as_millis()).unwrap_or(i32::MAX)
}

impl Scheduler for WebScheduler {
    fn set_interval(&self, period: Duration, callback: Box<dyn FnMut()>) -> TimerHandle {
        #[cfg(target_arch = "wasm32")]
        {
            let Some(window) = web_sys::window() else {
                return TimerHandle::inert();
            };
            let mut callback = callback;
            let closure = Closure::<dyn FnMut()>::new(move || callback());
            match window.set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                timeout_millis(period),
            ) {
                Ok(interval_id) => TimerHandle::new(move || {
                    if let Some(window) = web_sys::window() {
                        window.clear_interval_with_handle(interval_id);
                    }
                    drop(closure);
                }),
                Err(_) => TimerHandle::inert(),
            }
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = (period, callback);
            TimerHandle::inert()
        }
    }

    fn set_timeout(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> TimerHandle {
        #[cfg(target_arch = "wasm32")]
        {
            let Some(window) = web_sys::window() else {
                return TimerHandle::inert();
            };
            let callback = Closure::once_into_js(move || callback());
            match window.set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.unchecked_ref(),
                timeout_millis(delay),
            ) {
                Ok(timeout_id) => TimerHandle::new(move || {
                    if let Some(window) = web_sys::window() {
                        window.clear_timeout_with_handle(timeout_id);
                    }
                }),
                Err(_) => TimerHandle::inert(),
            }
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = (delay, callback);
            TimerHandle::inert()
        }
    }
}
