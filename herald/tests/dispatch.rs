//! Dispatch behaviour: ordering, stop semantics, guards and response modes.

use herald::{
    DispatchError, Event, EventDispatcher, Listener, ResponseError, testing::CallLog,
};

mod common;
use common::{init_tracing, responder};

#[test]
fn test_priority_order_with_fifo_ties() {
    init_tracing();
    let dispatcher = EventDispatcher::new();
    let log = CallLog::new();

    dispatcher
        .attach(log.listener("test", "p2").with_priority(50).responding("p2").build())
        .unwrap();
    dispatcher
        .attach(log.listener("test", "p4").with_priority(-1).responding("p4").build())
        .unwrap();
    dispatcher
        .attach(log.listener("test", "p1").with_priority(100).responding("p1").build())
        .unwrap();
    dispatcher
        .attach(log.listener("test", "p3").with_priority(50).responding("p3").build())
        .unwrap();

    let order: Vec<i32> = dispatcher
        .listeners("test")
        .unwrap()
        .iter()
        .map(|l| l.priority())
        .collect();
    assert_eq!(order, vec![100, 50, 50, -1]);

    let responses = dispatcher.collect(&mut Event::new("test")).unwrap();
    assert_eq!(responses.into_vec(), vec!["p1", "p2", "p3", "p4"]);
    assert_eq!(log.calls(), vec!["p1", "p2", "p3", "p4"]);
}

#[test]
fn test_collect_equal_priority_in_registration_order() {
    let dispatcher = EventDispatcher::new();
    dispatcher.attach(responder("test", "a", 100)).unwrap();
    dispatcher.attach(responder("test", "b", 100)).unwrap();

    let responses = dispatcher.collect(&mut Event::new("test")).unwrap();
    assert_eq!(responses.into_vec(), vec!["a", "b"]);
}

#[test]
fn test_stop_returns_stopper_response_and_skips_lower() {
    let dispatcher = EventDispatcher::new();
    let log = CallLog::new();

    dispatcher
        .attach(log.listener::<&'static str>("test", "p100").with_priority(100).build())
        .unwrap();
    dispatcher
        .attach(
            log.listener("test", "p50")
                .with_priority(50)
                .responding("X")
                .stopping()
                .build(),
        )
        .unwrap();
    dispatcher
        .attach(log.listener("test", "p0").responding("never").build())
        .unwrap();

    let mut event = Event::new("test");
    assert_eq!(dispatcher.ask(&mut event).unwrap(), Some("X"));
    assert!(event.is_stopped());
    assert_eq!(log.calls(), vec!["p100", "p50"]);
    assert!(!log.contains("p0"));
}

#[test]
fn test_stop_only_affects_current_dispatch() {
    let dispatcher = EventDispatcher::new();
    let log = CallLog::new();
    dispatcher
        .attach(log.listener::<()>("test", "first").with_priority(1).stopping().build())
        .unwrap();
    dispatcher
        .attach(log.listener("test", "second").build())
        .unwrap();

    dispatcher.notify(&mut Event::new("test")).unwrap();
    dispatcher.notify(&mut Event::new("test")).unwrap();
    assert_eq!(log.calls(), vec!["first", "first"]);
}

#[test]
fn test_condition_false_never_invoked() {
    let dispatcher = EventDispatcher::new();
    let log = CallLog::new();

    dispatcher
        .attach(
            log.listener("request", "admin-only")
                .with_priority(10)
                .responding("secret")
                .build()
                .with_condition(|event| event.param::<bool>("admin") == Some(&true)),
        )
        .unwrap();
    dispatcher
        .attach(log.listener("request", "public").responding("page").build())
        .unwrap();

    let responses = dispatcher
        .collect(&mut Event::new("request").with_param("admin", false))
        .unwrap();
    assert_eq!(responses.into_vec(), vec!["page"]);
    assert_eq!(log.calls(), vec!["public"]);

    let responses = dispatcher
        .collect(&mut Event::new("request").with_param("admin", true))
        .unwrap();
    assert_eq!(responses.into_vec(), vec!["secret", "page"]);
}

#[test]
fn test_ask_skips_none_responses() {
    let dispatcher: EventDispatcher<String> = EventDispatcher::new();
    dispatcher
        .attach(Listener::new("lookup", |_, _| Ok(None)).with_priority(10))
        .unwrap();
    dispatcher
        .attach(Listener::new("lookup", |event, _| {
            Ok(event.param::<String>("key").map(|k| format!("value of {k}")))
        }))
        .unwrap();

    let mut event = Event::new("lookup").with_param("key", "colour".to_string());
    assert_eq!(
        dispatcher.ask(&mut event).unwrap().as_deref(),
        Some("value of colour")
    );
    assert_eq!(dispatcher.ask(&mut Event::new("lookup")).unwrap(), None);
}

#[test]
fn test_responses_shift_pop_and_empty() {
    let dispatcher = EventDispatcher::new();
    dispatcher.attach(responder("test", 1, 3)).unwrap();
    dispatcher.attach(responder("test", 2, 2)).unwrap();
    dispatcher.attach(responder("test", 3, 1)).unwrap();

    let mut responses = dispatcher.collect(&mut Event::new("test")).unwrap();
    assert_eq!(responses.count(), 3);
    assert_eq!(responses.shift(), Ok(1));
    assert_eq!(responses.pop(), Ok(3));
    assert_eq!(responses.pop(), Ok(2));
    assert!(responses.is_empty());
    assert_eq!(responses.shift(), Err(ResponseError::ResponseNotAvailable));
}

#[test]
fn test_notify_chains() {
    let dispatcher: EventDispatcher = EventDispatcher::new();
    let log = CallLog::new();
    dispatcher.attach(log.listener("a", "a").build()).unwrap();
    dispatcher.attach(log.listener("b", "b").build()).unwrap();

    dispatcher
        .notify(&mut Event::new("a"))
        .and_then(|d| d.notify(&mut Event::new("b")))
        .and_then(|d| d.notify(&mut Event::new("unknown")))
        .unwrap();
    assert_eq!(log.calls(), vec!["a", "b"]);
}

#[test]
fn test_listener_error_propagates_and_aborts() {
    let dispatcher: EventDispatcher = EventDispatcher::new();
    let log = CallLog::new();
    dispatcher
        .attach(Listener::new("save", |_, _| Err("disk full".into())).with_priority(1))
        .unwrap();
    dispatcher.attach(log.listener("save", "after").build()).unwrap();

    let err = dispatcher.notify(&mut Event::new("save")).unwrap_err();
    match err {
        DispatchError::Listener(source) => assert_eq!(source.to_string(), "disk full"),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(log.count(), 0);
    assert_eq!(dispatcher.recursion_depth("save"), 0);
}

#[test]
fn test_sender_and_params_reach_listener() {
    struct Kernel {
        name: &'static str,
    }

    let dispatcher: EventDispatcher<String> = EventDispatcher::new();
    dispatcher
        .attach(Listener::new("boot", |event, _| {
            let kernel = event.sender::<Kernel>().ok_or("missing sender")?;
            let stage = event.param::<u8>("stage").copied().unwrap_or_default();
            Ok(Some(format!("{} stage {}", kernel.name, stage)))
        }))
        .unwrap();

    let mut event = Event::new("boot")
        .with_sender(std::sync::Arc::new(Kernel { name: "main" }))
        .with_param("stage", 2_u8);
    assert_eq!(
        dispatcher.ask(&mut event).unwrap().as_deref(),
        Some("main stage 2")
    );
}
