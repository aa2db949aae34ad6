use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::error::FetchError;
use crate::transport::Transport;

/// Chain behavior knobs. The defaults match the reference semantics: a
/// failed fetch is absorbed and the chain keeps going, and a stale
/// response's body is still delivered (only its reschedule is fenced off).
#[derive(Clone, Copy, Debug)]
pub struct PollPolicy {
    /// Keep rescheduling after a failed fetch.
    pub continue_after_error: bool,
    /// Also fence `on_data` delivery, not just the reschedule: a response
    /// whose url lost the fencing token is dropped outright.
    pub guard_delivery: bool,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            continue_after_error: true,
            guard_delivery: false,
        }
    }
}

type DataFn = Rc<dyn Fn(String)>;
type ErrorSink = Rc<dyn Fn(&FetchError)>;

#[derive(Default)]
struct Session {
    /// Url of the most recently started request — the fencing token. A
    /// response compares its own url against this at completion time.
    active_url: Option<String>,
    /// The scheduled next-fetch task, cancellable until its timer fires.
    pending: Option<JoinHandle<()>>,
}

/// Repeatedly fetches a url, rescheduling `interval` after each response so
/// the cadence self-corrects for request latency. Only the chain holding the
/// fencing token reschedules; superseded chains end at their next response.
///
/// Runs on the current thread's task set: [`Poller::start`] spawns with
/// `tokio::task::spawn_local` and must be called from within a `LocalSet`
/// (or a current-thread runtime driving one).
pub struct Poller {
    interval: Duration,
    policy: PollPolicy,
    transport: Rc<dyn Transport>,
    error_sink: Option<ErrorSink>,
    session: Rc<RefCell<Session>>,
}

impl Poller {
    pub fn new(transport: Rc<dyn Transport>, interval: Duration) -> Self {
        Self {
            interval,
            policy: PollPolicy::default(),
            transport,
            error_sink: None,
            session: Rc::new(RefCell::new(Session::default())),
        }
    }

    pub fn with_policy(mut self, policy: PollPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Routes fetch failures somewhere visible. Without a sink they are
    /// logged at debug level and otherwise absorbed.
    pub fn with_error_sink(mut self, sink: impl Fn(&FetchError) + 'static) -> Self {
        self.error_sink = Some(Rc::new(sink));
        self
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Current holder of the fencing token, if polling has started.
    pub fn active_url(&self) -> Option<String> {
        self.session.borrow().active_url.clone()
    }

    /// Whether a next fetch is scheduled (and still cancellable).
    pub fn is_scheduled(&self) -> bool {
        self.session.borrow().pending.is_some()
    }

    /// Begins (or redirects) polling: cancels any scheduled next fetch,
    /// moves the fencing token to `url`, and issues a fetch immediately.
    /// Each successful response is passed to `on_data`, then the next fetch
    /// is scheduled `interval` later — unless a newer `start` has taken the
    /// token, in which case this chain ends.
    ///
    /// A fetch already in flight for the *same* url is not superseded by
    /// re-starting with that url; both chains stay fresh and reschedule.
    pub fn start(&self, url: impl Into<String>, on_data: impl Fn(String) + 'static) {
        let url = url.into();
        {
            let mut session = self.session.borrow_mut();
            if let Some(pending) = session.pending.take() {
                pending.abort();
            }
            session.active_url = Some(url.clone());
        }

        let _ = Chain {
            url,
            on_data: Rc::new(on_data),
            transport: self.transport.clone(),
            interval: self.interval,
            policy: self.policy,
            error_sink: self.error_sink.clone(),
            session: self.session.clone(),
        }
        .spawn(None);
    }

    /// Cancels the scheduled next fetch, if any.
    ///
    /// A fetch already in flight is not cancelled: its response still
    /// arrives and, because the fencing token stays in place, it schedules
    /// one more fetch. Call `stop` again after that race, or use
    /// [`Poller::shutdown`] to end the chain outright.
    pub fn stop(&self) {
        let mut session = self.session.borrow_mut();
        if let Some(pending) = session.pending.take() {
            pending.abort();
        }
    }

    /// [`Poller::stop`] plus invalidation of the fencing token: a response
    /// already in flight fails the freshness check and its chain ends
    /// instead of rescheduling.
    pub fn shutdown(&self) {
        let mut session = self.session.borrow_mut();
        if let Some(pending) = session.pending.take() {
            pending.abort();
        }
        session.active_url = None;
    }
}

/// One self-perpetuating fetch chain. Everything a cycle needs travels with
/// it, so a chain keeps running (or dies at the fence) independently of the
/// `Poller` value that spawned it.
#[derive(Clone)]
struct Chain {
    url: String,
    on_data: DataFn,
    transport: Rc<dyn Transport>,
    interval: Duration,
    policy: PollPolicy,
    error_sink: Option<ErrorSink>,
    session: Rc<RefCell<Session>>,
}

impl Chain {
    fn spawn(self, delay: Option<Duration>) -> JoinHandle<()> {
        tokio::task::spawn_local(async move {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
                // Timer fired: from here the fetch is in flight and no
                // longer cancellable.
                self.session.borrow_mut().pending = None;
            }
            self.run_once().await;
        })
    }

    fn is_fresh(&self) -> bool {
        self.session.borrow().active_url.as_deref() == Some(self.url.as_str())
    }

    async fn run_once(self) {
        let result = self.transport.fetch(&self.url).await;

        match &result {
            Ok(body) => {
                if self.is_fresh() || !self.policy.guard_delivery {
                    (self.on_data)(body.clone());
                }
            }
            Err(err) => match &self.error_sink {
                Some(sink) => sink(err),
                None => log::debug!("poll fetch for `{}` failed: {err}", self.url),
            },
        }

        // Freshness is re-read after delivery: on_data may itself have
        // moved the token (e.g. a re-render started polling a new url).
        if !self.is_fresh() {
            return;
        }
        if result.is_err() && !self.policy.continue_after_error {
            return;
        }

        let next = self.clone().spawn(Some(self.interval));
        self.session.borrow_mut().pending = Some(next);
    }
}
