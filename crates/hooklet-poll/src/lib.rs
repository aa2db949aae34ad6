//! # Self-rescheduling polling with stale-response fencing
//!
//! A [`Poller`] fetches a url, hands the body to a callback, and schedules
//! the next fetch a fixed interval *after the response* — so the cadence
//! self-corrects for request latency instead of drifting or piling up.
//!
//! The url of the most recently started request is the fencing token:
//! every response compares its own url against it at completion time. Start
//! polling a new url while an old request is still in flight and the old
//! chain simply ends at its next response — no flag juggling in callbacks.
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use std::time::Duration;
//!
//! use async_trait::async_trait;
//! use hooklet_poll::{FetchError, Poller, Transport};
//!
//! struct Canned;
//!
//! #[async_trait(?Send)]
//! impl Transport for Canned {
//!     async fn fetch(&self, url: &str) -> Result<String, FetchError> {
//!         Ok(format!("{url}: ok"))
//!     }
//! }
//!
//! let rt = tokio::runtime::Builder::new_current_thread()
//!     .enable_time()
//!     .build()
//!     .unwrap();
//! let seen = Rc::new(RefCell::new(Vec::new()));
//!
//! rt.block_on(async {
//!     let local = tokio::task::LocalSet::new();
//!     local
//!         .run_until(async {
//!             let poller = Poller::new(Rc::new(Canned), Duration::from_millis(10));
//!             poller.start("https://example.com/a", {
//!                 let seen = seen.clone();
//!                 move |body| seen.borrow_mut().push(body)
//!             });
//!             tokio::time::sleep(Duration::from_millis(25)).await;
//!             poller.shutdown();
//!         })
//!         .await;
//! });
//!
//! assert!(seen.borrow().len() >= 2);
//! ```
//!
//! ## Stopping
//!
//! [`Poller::stop`] cancels only the *scheduled* next fetch. A fetch already
//! in flight still completes, and — because `stop` leaves the fencing token
//! in place — schedules one more fetch. That is the historical contract;
//! [`Poller::shutdown`] is the hardened variant that also clears the token,
//! ending the chain at the in-flight response.
//!
//! ## Failures
//!
//! A failed fetch does not halt polling: the error goes to the sink
//! installed with [`Poller::with_error_sink`] (or a debug log) and the next
//! fetch is scheduled as usual. Flip
//! [`PollPolicy::continue_after_error`] off to end the chain on first error
//! instead.
//!
//! ## As a hook
//!
//! [`use_poll`] packages the poller for components running on a
//! `hooklet-core` [`StateStore`](hooklet_core::StateStore): the latest
//! response body lives in a state slot, every response re-renders, and
//! changing the url re-fences automatically.

pub mod error;
pub mod hooks;
pub mod scheduler;
pub mod transport;

pub use error::*;
pub use hooks::*;
pub use scheduler::*;
pub use transport::*;
