//! Integration tests for signals embedded in owning types.

use std::sync::Arc;

use parking_lot::Mutex;
use tincture_core::Signal;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::TRACE)
        .try_init();
}

#[derive(Clone, Debug, PartialEq)]
struct Renamed {
    previous: String,
    current: String,
}

#[derive(Default)]
struct Swatch {
    name: String,
    renamed: Signal<Renamed>,
}

impl Swatch {
    fn set_name(&mut self, name: &str) {
        if self.name == name {
            return;
        }
        let previous = std::mem::replace(&mut self.name, name.to_string());
        self.renamed.emit(Renamed {
            previous,
            current: self.name.clone(),
        });
    }
}

#[test]
fn owner_emits_only_on_change() {
    init_tracing();

    let mut swatch = Swatch::default();
    let log = Arc::new(Mutex::new(Vec::new()));
    let log_clone = log.clone();
    swatch.renamed.connect(move |change| log_clone.lock().push(change.clone()));

    swatch.set_name("base00");
    swatch.set_name("base00");
    swatch.set_name("base01");

    let log = log.lock();
    assert_eq!(log.len(), 2);
    assert_eq!(
        log[1],
        Renamed {
            previous: "base00".into(),
            current: "base01".into(),
        }
    );
}

#[test]
fn forwarding_between_signals() {
    init_tracing();

    let inner = Signal::<u8>::new();
    let outer = Arc::new(Signal::<()>::new());
    let hits = Arc::new(Mutex::new(0));

    let outer_clone = outer.clone();
    inner.connect(move |_| outer_clone.emit(()));
    let hits_clone = hits.clone();
    outer.connect(move |_| *hits_clone.lock() += 1);

    inner.emit(1);
    inner.emit(2);
    outer.set_blocked(true);
    inner.emit(3);

    assert_eq!(*hits.lock(), 2);
}
