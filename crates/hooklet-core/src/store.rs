use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::marker::PhantomData;
use std::rc::{Rc, Weak};

use smallvec::SmallVec;

/// A mounted component function. Running it is one render pass: the function
/// reads its state through the store's hook calls and must make them in the
/// same count and order every time it runs.
pub type Component = Rc<dyn Fn(&StateStore)>;

/// Presentation boundary. Given the store and the mounted component, an
/// implementation runs one render pass (invokes the component with the store)
/// and presents whatever the component produced.
///
/// `render` is called once on mount and once per state write; it must
/// tolerate repeated calls with the same component.
pub trait RenderHost {
    fn render(&self, store: &StateStore, component: &Component);
}

struct Inner {
    slots: SmallVec<[Box<dyn Any>; 8]>,
    keyed_slots: HashMap<String, Box<dyn Any>>,
    cursor: usize,
    mounted: Option<Component>,
    host: Rc<dyn RenderHost>,
}

/// Hook-style state store: persistent slots addressed by allocation call
/// order, plus a keyed side table for call sites that can't rely on ordering.
///
/// A store is an ordinary value, not a global. Cloning the handle is cheap
/// and refers to the same slots. Exactly one component function may be
/// mounted at a time; every [`Setter::set`] re-runs it through the
/// [`RenderHost`].
///
/// All operations assume a single logical thread; the store is neither
/// `Send` nor `Sync`.
pub struct StateStore {
    inner: Rc<RefCell<Inner>>,
}

impl Clone for StateStore {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl StateStore {
    pub fn new(host: impl RenderHost + 'static) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                slots: SmallVec::new(),
                keyed_slots: HashMap::new(),
                cursor: 0,
                mounted: None,
                host: Rc::new(host),
            })),
        }
    }

    /// Mounts `component` and performs the initial render. Mounting again
    /// replaces the component; existing slots are kept.
    pub fn mount(&self, component: impl Fn(&StateStore) + 'static) {
        self.inner.borrow_mut().mounted = Some(Rc::new(component));
        self.render();
    }

    /// Order-based state slot (sequential hook calls only).
    ///
    /// The Nth `use_state` call in a render pass always refers to the Nth
    /// slot. `initial` is consumed only when the slot is first created;
    /// on every later pass it is ignored, whatever value is passed. Returns
    /// the slot's current value and a setter bound to the slot.
    ///
    /// A slot reused at a different type is the visible symptom of hook
    /// calls running in a different order across passes; the slot is
    /// replaced and a warning logged.
    pub fn use_state<T: Clone + 'static>(&self, initial: T) -> (T, Setter<T>) {
        let mut st = self.inner.borrow_mut();
        let cursor = st.cursor;
        st.cursor += 1;

        let value = if cursor >= st.slots.len() {
            st.slots.push(Box::new(initial.clone()));
            initial
        } else if let Some(v) = st.slots[cursor].downcast_ref::<T>() {
            v.clone()
        } else {
            log::warn!(
                "use_state: slot {cursor} holds a different type; replacing. \
                 Hook calls must run in the same count and order on every render."
            );
            st.slots[cursor] = Box::new(initial.clone());
            initial
        };

        (value, self.setter(SlotAddr::Index(cursor)))
    }

    /// Key-based state slot, stable across conditional hook calls.
    pub fn use_state_keyed<T: Clone + 'static>(
        &self,
        key: impl Into<String>,
        initial: T,
    ) -> (T, Setter<T>) {
        let key = key.into();
        let mut st = self.inner.borrow_mut();

        if let Some(existing) = st.keyed_slots.get(&key) {
            if let Some(v) = existing.downcast_ref::<T>() {
                let v = v.clone();
                return (v, self.setter(SlotAddr::Key(key)));
            }
            log::warn!("use_state_keyed: key `{key}` reused with a different type; replacing.");
        }
        st.keyed_slots.insert(key.clone(), Box::new(initial.clone()));
        (initial, self.setter(SlotAddr::Key(key)))
    }

    /// Order-based retained value without a setter. `init` runs once, when
    /// the slot is created.
    pub fn remember<T: 'static>(&self, init: impl FnOnce() -> T) -> Rc<T> {
        let mut st = self.inner.borrow_mut();
        let cursor = st.cursor;
        st.cursor += 1;

        if cursor >= st.slots.len() {
            let rc: Rc<T> = Rc::new(init());
            st.slots.push(Box::new(rc.clone()));
            return rc;
        }

        if let Some(rc) = st.slots[cursor].downcast_ref::<Rc<T>>() {
            rc.clone()
        } else {
            log::warn!("remember: slot {cursor} holds a different type; replacing.");
            let rc: Rc<T> = Rc::new(init());
            st.slots[cursor] = Box::new(rc.clone());
            rc
        }
    }

    /// Key-based retained value.
    pub fn remember_keyed<T: 'static>(
        &self,
        key: impl Into<String>,
        init: impl FnOnce() -> T,
    ) -> Rc<T> {
        let mut st = self.inner.borrow_mut();
        let key = key.into();

        if let Some(existing) = st.keyed_slots.get(&key) {
            if let Some(rc) = existing.downcast_ref::<Rc<T>>() {
                return rc.clone();
            }
            log::warn!("remember_keyed: key `{key}` reused with a different type; replacing.");
        }

        let rc: Rc<T> = Rc::new(init());
        st.keyed_slots.insert(key, Box::new(rc.clone()));
        rc
    }

    /// Number of order-based slots allocated so far.
    pub fn slot_count(&self) -> usize {
        self.inner.borrow().slots.len()
    }

    /// Index of the next order-based slot to serve.
    pub fn cursor(&self) -> usize {
        self.inner.borrow().cursor
    }

    fn setter<T>(&self, addr: SlotAddr) -> Setter<T> {
        Setter {
            store: Rc::downgrade(&self.inner),
            addr,
            _value: PhantomData,
        }
    }

    /// One render pass: park the cursor back at the first slot, then hand the
    /// mounted component to the host.
    fn render(&self) {
        let pass = {
            let mut st = self.inner.borrow_mut();
            st.cursor = 0;
            st.mounted.clone().map(|c| (st.host.clone(), c))
        };
        if let Some((host, component)) = pass {
            host.render(self, &component);
        }
    }
}

#[derive(Clone)]
enum SlotAddr {
    Index(usize),
    Key(String),
}

/// Write handle bound to one state slot. Cloneable; holds the store weakly,
/// so a setter that outlives its store writes nowhere.
pub struct Setter<T> {
    store: Weak<RefCell<Inner>>,
    addr: SlotAddr,
    _value: PhantomData<fn(T)>,
}

impl<T> Clone for Setter<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            addr: self.addr.clone(),
            _value: PhantomData,
        }
    }
}

impl<T: 'static> Setter<T> {
    /// Overwrites the slot's value and re-renders the mounted component.
    /// The next hook call after this is the first call of a new pass.
    ///
    /// Calling this from inside a render pass re-enters the host
    /// synchronously; writes are not batched or coalesced.
    pub fn set(&self, value: T) {
        let Some(inner) = self.store.upgrade() else {
            return;
        };
        {
            let mut st = inner.borrow_mut();
            let slot = match &self.addr {
                SlotAddr::Index(index) => st.slots.get_mut(*index),
                SlotAddr::Key(key) => st.keyed_slots.get_mut(key),
            };
            let Some(slot) = slot else {
                log::warn!("set on a state slot that no longer exists; ignoring");
                return;
            };
            *slot = Box::new(value);
        }
        StateStore { inner }.render();
    }
}
