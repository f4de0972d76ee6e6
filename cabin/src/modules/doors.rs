/// ----- DOORS MODULE -----
/// This module simulates the door cycle after the cabin stops for a call:
/// open, let passengers through, close, then keep the cabin parked for a
/// while in case someone presses a cabin button.

use crate::utilities::cabin::Cabin;
use crate::utilities::elevator_status::Behaviour;
use crate::utilities::error::SuspensionInterrupted;

pub fn hold(cabin: &Cabin) -> Result<(), SuspensionInterrupted> {
    let timing = cabin.timing();
    let timer = cabin.timer();

    {
        let mut state = cabin.lock();
        state.behaviour = Behaviour::DoorOpen;
        cabin.log("Opening doors...");
        cabin.publish(&state);
    }
    timer.wait(timing.door_units)?;

    cabin.log("Waiting for passengers to enter/exit...");
    timer.wait(timing.dwell_units)?;

    cabin.log("Closing doors...");
    timer.wait(timing.door_units)?;

    let wait_units = {
        let state = cabin.lock();
        if state.requests.has_inside_request() {
            cabin.log("Inside button pressed. Processing inside request...");
            return Ok(())
        }
        if state.requests.pending().is_empty() {
            timing.idle_wait_units
        } else {
            timing.busy_wait_units
        }
    };

    cabin.log("Waiting for inside button calls...");
    for _ in 0..wait_units {
        if cabin.lock().requests.has_inside_request() {
            cabin.log("Inside button pressed. Processing inside request...");
            return Ok(())
        }
        timer.wait(1)?;
    }
    Ok(())
}
