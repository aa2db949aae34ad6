//! Polls a fake endpoint for three seconds, printing each response as it
//! lands, then shuts the chain down.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;
use hooklet_poll::{FetchError, Poller, Transport};

struct Ticker {
    n: RefCell<u32>,
}

#[async_trait(?Send)]
impl Transport for Ticker {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        tokio::time::sleep(Duration::from_millis(120)).await;
        let n = {
            let mut n = self.n.borrow_mut();
            *n += 1;
            *n
        };
        Ok(format!("{url} -> tick {n}"))
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let local = tokio::task::LocalSet::new();
    local
        .run_until(async {
            let transport: Rc<dyn Transport> = Rc::new(Ticker {
                n: RefCell::new(0),
            });
            let poller = Poller::new(transport, Duration::from_millis(500))
                .with_error_sink(|err| log::warn!("fetch failed: {err}"));

            poller.start("https://example.com/status", |body| println!("{body}"));
            tokio::time::sleep(Duration::from_secs(3)).await;
            poller.shutdown();
        })
        .await;

    Ok(())
}
