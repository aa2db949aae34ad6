//! The polling hook and the state store working together: responses land in
//! a state slot, each one re-renders, and redirecting the url mid-flight
//! fences the old chain off.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::task::LocalSet;
use tokio::time::Instant;

use hooklet_core::{Component, RenderHost, Setter, StateStore};
use hooklet_poll::{FetchError, PollPolicy, Poller, Transport, use_poll};

struct Headless;

impl RenderHost for Headless {
    fn render(&self, store: &StateStore, component: &Component) {
        component(store);
    }
}

#[derive(Default)]
struct FakeTransport {
    latency: RefCell<HashMap<String, Duration>>,
    fetched: RefCell<Vec<(String, Instant)>>,
    counter: RefCell<u32>,
}

impl FakeTransport {
    fn with_latency(self, url: &str, ms: u64) -> Self {
        self.latency
            .borrow_mut()
            .insert(url.to_string(), Duration::from_millis(ms));
        self
    }

    fn fetches(&self, url: &str) -> Vec<Instant> {
        self.fetched
            .borrow()
            .iter()
            .filter(|(u, _)| u == url)
            .map(|(_, at)| *at)
            .collect()
    }
}

#[async_trait(?Send)]
impl Transport for FakeTransport {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.fetched
            .borrow_mut()
            .push((url.to_string(), Instant::now()));
        let delay = self
            .latency
            .borrow()
            .get(url)
            .copied()
            .unwrap_or(Duration::from_millis(10));
        tokio::time::sleep(delay).await;

        let n = {
            let mut c = self.counter.borrow_mut();
            *c += 1;
            *c
        };
        Ok(format!("{url}#{n}"))
    }
}

/// Two slots allocated in one render; writing the first leaves the second
/// untouched on the next pass.
#[test]
fn two_slots_one_write() {
    let renders = Rc::new(RefCell::new(Vec::<(i32, i32)>::new()));
    let setter = Rc::new(RefCell::new(None::<Setter<i32>>));

    let store = StateStore::new(Headless);
    store.mount({
        let renders = renders.clone();
        let setter = setter.clone();
        move |store| {
            let (a, set_a) = store.use_state(0);
            let (b, _) = store.use_state(0);
            renders.borrow_mut().push((a, b));
            *setter.borrow_mut() = Some(set_a);
        }
    });

    let set_a = setter.borrow_mut().take().unwrap();
    set_a.set(5);
    assert_eq!(*renders.borrow(), vec![(0, 0), (5, 0)]);
}

/// A superseding start fences the old url's chain, and the surviving chain
/// reschedules one interval after each response.
#[tokio::test(start_paused = true)]
async fn redirect_fences_old_url_and_keeps_cadence() {
    let local = LocalSet::new();
    local
        .run_until(async {
            let fake = Rc::new(
                FakeTransport::default()
                    .with_latency("u1", 200)
                    .with_latency("u2", 20),
            );
            let poller = Poller::new(fake.clone(), Duration::from_millis(100));

            poller.start("u1", |_| {});
            tokio::time::sleep(Duration::from_millis(50)).await;
            poller.start("u2", |_| {});
            tokio::time::sleep(Duration::from_millis(400)).await;

            // u1 resolved at t=200, well after u2 took the token: one fetch
            // ever, no reschedule.
            assert_eq!(fake.fetches("u1").len(), 1);

            // u2: fetched on start, then interval after each response.
            let u2 = fake.fetches("u2");
            assert!(u2.len() >= 3);
            let gap = u2[1] - u2[0];
            let expected = Duration::from_millis(120); // latency + interval
            assert!(
                gap >= expected && gap <= expected + Duration::from_millis(5),
                "unexpected reschedule gap: {gap:?}"
            );
        })
        .await;
}

/// The full cascade: poll responses land in a state slot through a setter,
/// every response re-renders, and switching the url from component state
/// re-fences the chain.
#[tokio::test(start_paused = true)]
async fn polling_hook_drives_re_renders() {
    let local = LocalSet::new();
    local
        .run_until(async {
            let fake = Rc::new(FakeTransport::default());
            let transport: Rc<dyn Transport> = fake.clone();
            let observed = Rc::new(RefCell::new(Vec::<Option<String>>::new()));
            let url_setter = Rc::new(RefCell::new(None::<Setter<String>>));

            let store = StateStore::new(Headless);
            store.mount({
                let transport = transport.clone();
                let observed = observed.clone();
                let url_setter = url_setter.clone();
                move |store| {
                    let (url, set_url) = store.use_state(String::from("feed/a"));
                    let latest = use_poll(
                        store,
                        &transport,
                        &url,
                        Duration::from_millis(100),
                        PollPolicy::default(),
                    );
                    observed.borrow_mut().push(latest);
                    *url_setter.borrow_mut() = Some(set_url);
                }
            });

            // Mount saw no data; the first response re-rendered with a body.
            tokio::time::sleep(Duration::from_millis(30)).await;
            {
                let observed = observed.borrow();
                assert_eq!(observed[0], None);
                assert!(observed.last().unwrap().as_deref().unwrap().starts_with("feed/a"));
            }

            // Redirect: aborts feed/a's scheduled fetch and re-fences.
            let set_url = url_setter.borrow_mut().take().unwrap();
            set_url.set(String::from("feed/b"));
            tokio::time::sleep(Duration::from_millis(400)).await;

            assert_eq!(fake.fetches("feed/a").len(), 1);
            assert!(fake.fetches("feed/b").len() >= 3);
            let observed = observed.borrow();
            assert!(observed.last().unwrap().as_deref().unwrap().starts_with("feed/b"));
        })
        .await;
}
