use hiding_bars::{SettingChange, SettingName, SharedSettings, VisibilitySettings};
use std::cell::RefCell;
use std::rc::Rc;

fn recorder(shared: &SharedSettings, tag: &'static str, log: &Rc<RefCell<Vec<(&'static str, SettingChange)>>>) {
    let log = log.clone();
    shared.subscribe(move |change| log.borrow_mut().push((tag, *change)));
}

#[test]
fn every_observer_is_notified_in_registration_order() {
    let shared = SharedSettings::default();
    let log = Rc::default();
    recorder(&shared, "first", &log);
    recorder(&shared, "second", &log);

    shared.set(SettingName::HideOnAppear, false);

    let change = SettingChange {
        name: SettingName::HideOnAppear,
        value: false,
    };
    assert_eq!(*log.borrow(), vec![("first", change), ("second", change)]);
}

#[test]
fn observer_sees_new_value_during_notification() {
    let shared = SharedSettings::default();
    let seen = Rc::new(RefCell::new(None));
    let (reader, sink) = (shared.clone(), seen.clone());
    shared.subscribe(move |_| *sink.borrow_mut() = Some(reader.borrow().hide_secondary_bar));

    shared.set(SettingName::HideSecondaryBar, false);
    assert_eq!(*seen.borrow(), Some(false));
}

#[test]
fn unsubscribed_observer_is_not_called() {
    let shared = SharedSettings::default();
    let calls = Rc::new(RefCell::new(0));
    let counter = calls.clone();
    let id = shared.subscribe(move |_| *counter.borrow_mut() += 1);

    shared.set(SettingName::ShowOnAppear, false);
    assert!(shared.unsubscribe(id));
    assert!(!shared.unsubscribe(id));
    shared.set(SettingName::ShowOnAppear, true);

    assert_eq!(*calls.borrow(), 1);
    assert_eq!(shared.subscriber_count(), 0);
}

#[test]
fn unknown_name_changes_nothing() {
    let shared = SharedSettings::default();
    let calls = Rc::new(RefCell::new(0));
    let counter = calls.clone();
    shared.subscribe(move |_| *counter.borrow_mut() += 1);

    assert!(!shared.set_flag("hideEverything", true));
    assert_eq!(shared.flag("hideEverything"), None);
    assert_eq!(*calls.borrow(), 0);

    assert!(shared.set_flag("hidePrimaryBar", false));
    assert_eq!(shared.flag("hidePrimaryBar"), Some(false));
    assert_eq!(*calls.borrow(), 1);
}

#[test]
fn clones_share_one_instance() {
    let mut initial = VisibilitySettings::default();
    initial.hide_primary_bar = false;
    let shared = SharedSettings::new(initial);
    let other = shared.clone();

    other.set(SettingName::HidePrimaryBar, true);
    assert!(shared.borrow().hide_primary_bar);
    assert!(shared.ptr_eq(&other));
    assert!(!shared.ptr_eq(&SharedSettings::default()));
}

#[test]
fn observer_writing_back_does_not_recurse() {
    let shared = SharedSettings::default();
    let calls = Rc::new(RefCell::new(0));
    let (inner, counter) = (shared.clone(), calls.clone());
    shared.subscribe(move |change| {
        *counter.borrow_mut() += 1;
        if change.name == SettingName::HidePrimaryBar {
            inner.set(SettingName::HideSecondaryBar, change.value);
        }
    });

    shared.set(SettingName::HidePrimaryBar, false);
    assert_eq!(*calls.borrow(), 1);
    assert!(!shared.borrow().hide_secondary_bar);
}
