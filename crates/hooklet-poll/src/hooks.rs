use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use hooklet_core::StateStore;

use crate::scheduler::{PollPolicy, Poller};
use crate::transport::Transport;

/// Polls `url` at `interval` from inside a component, re-rendering the
/// mounted component with each response. Returns the latest body, `None`
/// until the first response lands.
///
/// The poller is created once, on the call site's first render; `transport`,
/// `interval`, and `policy` are captured then and later values are ignored.
/// Passing a different `url` restarts polling under a new fencing token, so
/// a response still in flight for the old url cannot reschedule.
///
/// Makes three hook calls — the usual ordering contract applies.
pub fn use_poll(
    store: &StateStore,
    transport: &Rc<dyn Transport>,
    url: &str,
    interval: Duration,
    policy: PollPolicy,
) -> Option<String> {
    let (latest, set_latest) = store.use_state(None::<String>);

    let poller = store.remember({
        let transport = transport.clone();
        move || Poller::new(transport, interval).with_policy(policy)
    });
    let last_url = store.remember(|| RefCell::new(None::<String>));

    let changed = last_url.borrow().as_deref() != Some(url);
    if changed {
        *last_url.borrow_mut() = Some(url.to_string());
        poller.start(url, move |body| set_latest.set(Some(body)));
    }

    latest
}
