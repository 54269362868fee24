use super::*;
use crate::visibility::viewport::{Bounds, ViewportObserver};
use std::cell::Cell;

fn setup() -> (ViewportObserver, ContainerId) {
    let mut obs = ViewportObserver::new(Bounds::new(0.0, 0.0, 800.0, 600.0));
    let id = ContainerId::new("chartIdx02");
    obs.place(id.clone(), Bounds::new(0.0, 2000.0, 700.0, 800.0));
    (obs, id)
}

#[test]
fn fires_once_on_first_intersection_and_disconnects() {
    let (mut obs, id) = setup();
    let calls = Cell::new(0);
    let mut gate = VisibilityGate::on_becomes_visible(&mut obs, id.clone(), |c: &ContainerId| {
        calls.set(calls.get() + 1);
        c.clone()
    });
    assert!(obs.is_observing(&id));

    for e in obs.scroll_to(Bounds::new(0.0, 0.0, 800.0, 600.0)) {
        assert_eq!(gate.notify(&mut obs, &e), None);
    }
    assert_eq!(calls.get(), 0);

    let mut fired = None;
    for e in obs.scroll_to(Bounds::new(0.0, 1800.0, 800.0, 600.0)) {
        fired = fired.or(gate.notify(&mut obs, &e));
    }
    assert_eq!(fired, Some(id.clone()));
    assert_eq!(calls.get(), 1);
    assert!(gate.is_spent());
    assert!(!obs.is_observing(&id));

    let again = IntersectionEntry {
        target: id.clone(),
        is_intersecting: true,
    };
    assert_eq!(gate.notify(&mut obs, &again), None);
    assert_eq!(calls.get(), 1);
}

#[test]
fn entries_for_other_containers_are_ignored() {
    let (mut obs, id) = setup();
    let mut gate = VisibilityGate::on_becomes_visible(&mut obs, id, |_: &ContainerId| ());
    let other = IntersectionEntry {
        target: ContainerId::new("footer"),
        is_intersecting: true,
    };
    assert_eq!(gate.notify(&mut obs, &other), None);
    assert!(!gate.is_spent());
}

#[test]
fn cancel_disconnects_without_firing() {
    let (mut obs, id) = setup();
    let fired = Cell::new(false);
    let mut gate =
        VisibilityGate::on_becomes_visible(&mut obs, id.clone(), |_: &ContainerId| fired.set(true));
    gate.cancel(&mut obs);
    assert!(!obs.is_observing(&id));
    let entry = IntersectionEntry {
        target: id,
        is_intersecting: true,
    };
    assert_eq!(gate.notify(&mut obs, &entry), None);
    assert!(!fired.get());
}
