use super::*;
use std::cell::Cell;
use std::rc::Rc;

fn counted() -> (Rc<Cell<u32>>, OnceSubscription) {
    let n = Rc::new(Cell::new(0));
    let n2 = Rc::clone(&n);
    let sub = OnceSubscription::new(move || n2.set(n2.get() + 1));
    (n, sub)
}

#[test]
fn explicit_release_runs_once() {
    let (n, mut sub) = counted();
    assert!(sub.is_active());
    assert!(sub.release());
    assert!(!sub.release());
    assert!(!sub.is_active());
    drop(sub);
    assert_eq!(n.get(), 1);
}

#[test]
fn drop_releases_when_never_triggered() {
    let (n, sub) = counted();
    drop(sub);
    assert_eq!(n.get(), 1);
}

#[test]
fn detached_has_nothing_to_release() {
    let mut sub = OnceSubscription::detached();
    assert!(!sub.is_active());
    assert!(!sub.release());
}
