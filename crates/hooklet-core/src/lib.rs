//! # Hook-style state without a framework
//!
//! hooklet-core is the small state runtime behind the hook pattern: a
//! [`StateStore`] hands out persistent state cells in allocation call order,
//! and writing through a [`Setter`] re-runs the mounted component through a
//! [`RenderHost`]. There is no widget tree, no reconciliation, no macro — the
//! call-order discipline *is* the addressing scheme.
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use hooklet_core::{Component, RenderHost, Setter, StateStore};
//!
//! struct Headless;
//!
//! impl RenderHost for Headless {
//!     fn render(&self, store: &StateStore, component: &Component) {
//!         component(store);
//!     }
//! }
//!
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let pending = Rc::new(RefCell::new(None::<Setter<i32>>));
//!
//! let store = StateStore::new(Headless);
//! store.mount({
//!     let seen = seen.clone();
//!     let pending = pending.clone();
//!     move |store| {
//!         let (count, set_count) = store.use_state(0);
//!         seen.borrow_mut().push(count);
//!         *pending.borrow_mut() = Some(set_count);
//!     }
//! });
//!
//! let set_count = pending.borrow_mut().take().unwrap();
//! set_count.set(5);
//! assert_eq!(*seen.borrow(), vec![0, 5]);
//! ```
//!
//! ## The call-order contract
//!
//! [`StateStore::use_state`] and [`StateStore::remember`] associate a call
//! site with its slot purely by position: the Nth hook call of a pass gets
//! the Nth slot. The mounted component must therefore make the same hook
//! calls, in the same order, on every render — no hooks inside branches or
//! loops whose shape changes between passes. Violations are not detected;
//! the store serves whatever slot the cursor points at, and the only visible
//! symptom is a type-mismatch warning when two call sites collide on one
//! slot. [`StateStore::use_state_keyed`] and [`StateStore::remember_keyed`]
//! trade the ordering contract for an explicit string key where call sites
//! can't promise a stable order.
//!
//! ## One store, one component
//!
//! A store drives exactly one mounted component function; mounting again
//! replaces it. Stores are plain values — construct as many independent
//! ones as needed (each with its own host), and nothing leaks between them.

pub mod store;

pub use store::*;
