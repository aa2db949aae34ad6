//! Counter on a console render host: every setter write re-runs the
//! component and reprints its output.

use std::cell::RefCell;
use std::rc::Rc;

use hooklet_core::{Component, RenderHost, StateStore};

struct ConsoleHost;

impl RenderHost for ConsoleHost {
    fn render(&self, store: &StateStore, component: &Component) {
        component(store);
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // The component rebuilds its click handler each render, the same way a
    // button would; the demo "clicks" it from outside.
    let on_click = Rc::new(RefCell::new(None::<Rc<dyn Fn()>>));

    let store = StateStore::new(ConsoleHost);
    store.mount({
        let on_click = on_click.clone();
        move |store| {
            let (count, set_count) = store.use_state(0);
            let (label, _) = store.use_state(String::from("count"));
            println!("[render] {label} = {count}");

            *on_click.borrow_mut() = Some(Rc::new({
                let set_count = set_count.clone();
                move || set_count.set(count + 1)
            }));
        }
    });

    for _ in 0..3 {
        let click = on_click.borrow().clone();
        if let Some(click) = click {
            click();
        }
    }

    Ok(())
}
