//! Playback Lifecycle
//!
//! This example wires a media player's lifecycle onto the engine.
//!
//! Key concepts:
//! - Declaring transitions with the builder
//! - Entry/exit hooks that touch per-state data
//! - Rejected events leave the machine where it was
//!
//! Run with: cargo run --example playback

use turnstile::{Action, MachineError, StateMachineBuilder};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Playback Lifecycle Example ===\n");

    let machine = StateMachineBuilder::new()
        .transition("stopped", "play", "playing")
        .transition("playing", "pause", "paused")
        .transition("paused", "play", "playing")
        .transition("playing", "stop", "stopped")
        .transition("paused", "stop", "stopped")
        .on_exit("stopped", || println!("  [hook] leaving stopped, loading media"))
        .data("playing", "label", "Now playing")
        .initial("stopped")
        .build()?;

    let playing = machine.data("playing");
    machine.set_on_entry(
        "playing",
        Action::new(move || {
            let mut bag = playing.write();
            let plays = bag.int("plays") + 1;
            bag.insert("plays", plays);
            println!("  [hook] {} (#{plays})", bag.string("label"));
        }),
    );

    println!("States: {:?}", machine.states());

    for event in ["play", "pause", "pause", "play", "stop", "stop"] {
        match machine.process(event) {
            Ok(()) => {
                let state = machine.state().map(|s| s.to_string()).unwrap_or_default();
                println!("{event:>6} -> {state}");
            }
            Err(MachineError::EventNotAccepted { state, .. }) => {
                println!("{event:>6} rejected in {state}")
            }
            Err(err) => return Err(err.into()),
        }
    }

    println!("\nTimes played: {}", machine.data("playing").int("plays"));
    println!("\n=== Example Complete ===");
    Ok(())
}
