//! End-to-end scenarios driving the machine the way a host would.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use turnstile::{
    identifier_enum, Action, Lifecycle, MachineError, StateMachine, StateMachineBuilder,
};

#[test]
fn playback_lifecycle() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let hook = |label: &'static str| {
        let log = Arc::clone(&log);
        Action::new(move || log.lock().unwrap().push(label))
    };

    let machine = StateMachine::new();
    machine.add_transition("idle", "PLAY", "playing");
    machine.add_transition("playing", "STOP", "idle");
    machine.set_on_entry("idle", hook("entered idle"));
    machine.set_on_exit("idle", hook("left idle"));
    machine.set_on_entry("playing", hook("entered playing"));
    machine.set_on_exit("playing", hook("left playing"));

    assert_eq!(machine.states(), vec!["idle", "playing"]);
    assert!(machine.set_state("foo").is_err());
    assert_eq!(machine.lifecycle(), Lifecycle::Uninitialized);

    machine.set_state("idle").unwrap();
    assert_eq!(machine.state().unwrap(), "idle");
    assert_eq!(machine.valid_events("idle"), vec!["PLAY"]);

    assert!(machine.process("PUSH").is_err());
    assert_eq!(machine.state().unwrap(), "idle");

    machine.process("PLAY").unwrap();
    assert_eq!(machine.state().unwrap(), "playing");
    assert_eq!(machine.valid_events("playing"), vec!["STOP"]);

    machine.process("STOP").unwrap();
    assert_eq!(machine.state().unwrap(), "idle");
    assert_eq!(machine.valid_events("idle"), vec!["PLAY"]);

    assert_eq!(
        *log.lock().unwrap(),
        vec![
            "entered idle",
            "left idle",
            "entered playing",
            "left playing",
            "entered idle",
        ]
    );
}

#[test]
fn data_round_trip() {
    let machine = StateMachine::new();
    machine.data("a").insert("foo", "bar");

    assert_eq!(machine.data("a").string("foo"), "bar");
    assert_eq!(machine.data("a").string("missing"), "");
}

#[test]
fn each_process_failure_is_distinguishable() {
    let machine = StateMachine::new();
    machine.add_transition("open", "close", "closed");

    assert_eq!(machine.process("close"), Err(MachineError::NoCurrentState));

    machine.set_state("open").unwrap();
    assert!(matches!(
        machine.process("lock"),
        Err(MachineError::EventNotAccepted { .. })
    ));

    machine.process("close").unwrap();
    assert!(matches!(
        machine.process("close"),
        Err(MachineError::NoTransitions { .. })
    ));
    assert_eq!(machine.state().unwrap(), "closed");
}

identifier_enum! {
    enum Handshake {
        Waiting,
        Negotiating,
        Established,
    }
}

identifier_enum! {
    enum Signal {
        Hello = "hello",
        Ack = "ack",
        Reset = "reset",
    }
}

#[test]
fn enum_vocabulary_drives_the_machine() {
    let machine = StateMachineBuilder::<Handshake, Signal>::default()
        .transition(Handshake::Waiting, Signal::Hello, Handshake::Negotiating)
        .transition(Handshake::Negotiating, Signal::Ack, Handshake::Established)
        .transition(Handshake::Negotiating, Signal::Reset, Handshake::Waiting)
        .transition(Handshake::Established, Signal::Reset, Handshake::Waiting)
        .initial(Handshake::Waiting)
        .build()
        .unwrap();

    machine.process(&Signal::Hello).unwrap();
    assert_eq!(
        machine.out_states(&Handshake::Negotiating),
        vec![Handshake::Waiting, Handshake::Established]
    );
    assert_eq!(
        machine.valid_events(&Handshake::Negotiating),
        vec![Signal::Ack, Signal::Reset]
    );

    let err = machine.process(&Signal::Hello).unwrap_err();
    assert_eq!(err.to_string(), "state 'Negotiating' does not accept event 'hello'");

    machine.process(&Signal::Ack).unwrap();
    assert_eq!(machine.state(), Some(Handshake::Established));
}

#[test]
fn concurrent_callers_are_serialized() {
    let machine = Arc::new(StateMachine::new());
    machine.add_transition("a", "flip", "b");
    machine.add_transition("b", "flip", "a");

    let inside = Arc::new(AtomicUsize::new(0));
    let overlaps = Arc::new(AtomicUsize::new(0));
    for state in ["a", "b"] {
        let inside = Arc::clone(&inside);
        let overlaps = Arc::clone(&overlaps);
        machine.set_on_entry(
            state,
            Action::new(move || {
                if inside.fetch_add(1, Ordering::SeqCst) != 0 {
                    overlaps.fetch_add(1, Ordering::SeqCst);
                }
                thread::yield_now();
                inside.fetch_sub(1, Ordering::SeqCst);
            }),
        );
    }
    machine.set_state("a").unwrap();

    let workers: Vec<_> = (0..4)
        .map(|_| {
            let machine = Arc::clone(&machine);
            thread::spawn(move || {
                for _ in 0..250 {
                    machine.process("flip").unwrap();
                }
            })
        })
        .collect();
    for worker in workers {
        worker.join().unwrap();
    }

    assert_eq!(overlaps.load(Ordering::SeqCst), 0);
    // 1000 flips from "a" land back on "a".
    assert_eq!(machine.state().unwrap(), "a");
}
