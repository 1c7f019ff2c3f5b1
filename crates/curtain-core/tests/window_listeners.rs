#![forbid(unsafe_code)]

//! Namespaced listener behaviour of [`Window`] as overlays use it.

use std::cell::RefCell;
use std::rc::Rc;

use curtain_core::Size;
use curtain_core::event::{Event, ListenerError};
use curtain_core::window::Window;

fn log_into(log: &Rc<RefCell<Vec<String>>>, tag: &'static str) -> impl FnMut(&Event) + 'static {
    let log = Rc::clone(log);
    move |event| {
        let Event::Resize(size) = *event;
        log.borrow_mut().push(format!("{tag}:{}x{}", size.width, size.height));
    }
}

#[test]
fn instances_remove_only_their_own_listener() {
    let window = Window::new(Size::new(800.0, 600.0));
    let log = Rc::new(RefCell::new(Vec::new()));
    window.on("resize.curtain-1", log_into(&log, "a")).unwrap();
    window.on("resize.curtain-2", log_into(&log, "b")).unwrap();
    window.on("resize", log_into(&log, "app")).unwrap();

    assert_eq!(window.off("resize.curtain-1").unwrap(), 1);
    window.resize(Size::new(640.0, 480.0));

    assert_eq!(*log.borrow(), vec!["b:640x480", "app:640x480"]);
}

#[test]
fn namespace_only_removal() {
    let window = Window::new(Size::new(800.0, 600.0));
    let log = Rc::new(RefCell::new(Vec::new()));
    window.on("resize.tour", log_into(&log, "tour")).unwrap();
    window.on("resize.other", log_into(&log, "other")).unwrap();

    assert_eq!(window.off(".tour").unwrap(), 1);
    assert!(!window.has_listener("resize.tour"));
    assert!(window.has_listener("resize.other"));
}

#[test]
fn handlers_read_fresh_size() {
    let window = Window::new(Size::new(800.0, 600.0));
    let seen = Rc::new(RefCell::new(Vec::new()));
    let (w, s) = (window.clone(), Rc::clone(&seen));
    window
        .on("resize.reader", move |_| s.borrow_mut().push(w.inner_size()))
        .unwrap();

    window.resize(Size::new(1024.0, 768.0));
    window.resize(Size::new(320.0, 240.0));
    assert_eq!(
        *seen.borrow(),
        vec![Size::new(1024.0, 768.0), Size::new(320.0, 240.0)]
    );
}

#[test]
fn malformed_names_are_rejected() {
    let window = Window::new(Size::new(800.0, 600.0));
    assert_eq!(window.on("", |_| {}), Err(ListenerError::Empty));
    assert_eq!(window.on(".ns", |_| {}), Err(ListenerError::Empty));
    assert_eq!(
        window.on("scroll.ns", |_| {}),
        Err(ListenerError::UnknownEvent("scroll".to_owned()))
    );
    assert_eq!(window.listener_count(), 0);
}
