#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use vanguard::{EngineConfig, EngineEvent, Session, TickEvent};

/// One update as the transport might deliver it.
#[derive(Arbitrary, Debug)]
struct Update {
    turn: u16,
    map_diff: Vec<i32>,
    cities_diff: Vec<i16>,
    generals: Vec<i8>,
    swamps: Vec<u8>,
}

fuzz_target!(|updates: Vec<Update>| {
    let mut session = Session::with_sink(0, EngineConfig::default(), Vec::<EngineEvent>::new());
    for update in updates.into_iter().take(64) {
        let event = TickEvent {
            turn: u32::from(update.turn),
            map_diff: update.map_diff,
            cities_diff: update.cities_diff.into_iter().map(i32::from).collect(),
            generals: update.generals.into_iter().map(i32::from).collect(),
            swamps: update.swamps.into_iter().map(usize::from).collect(),
        };

        // Garbage must be rejected, never panic
        let _ = session.update(&event);
    }
});
