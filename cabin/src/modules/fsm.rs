/// ----- FSM MODULE -----
/// This module is the service loop driving the cabin. Every tick it picks
/// the next call, moves the cabin one floor per step towards it, hands over
/// to the doors module on arrival, and sends the cabin home when idle.

use shared_resources::direction::Direction;
use shared_resources::request::Request;

use crate::utilities::cabin::{Cabin, CabinState, HOME_FLOOR};
use crate::utilities::elevator_status::Behaviour;
use crate::utilities::error::SuspensionInterrupted;

use super::doors;

enum Step {
    Serve(Request),
    ReturnHome,
    Idle,
}

#[derive(Clone, Copy, PartialEq, Debug)]
enum Travel {
    Service,
    ReturnHome,
}

#[derive(Clone, Copy, PartialEq, Debug)]
enum Movement {
    Arrived,
    Redirected(Request),
}

pub fn main(cabin: &Cabin) {
    tracing::info!("service loop started");

    while cabin.is_running() {
        let result = match next_step(cabin) {
            Step::Serve(request) => serve(cabin, request),
            Step::ReturnHome => return_home(cabin),
            Step::Idle => Ok(()),
        };
        if let Err(e) = result {
            cabin.log(e.to_string());
        }

        cabin.publish(&cabin.lock());

        if let Err(e) = cabin.timer().wait(cabin.timing().poll_units) {
            cabin.log(e.to_string());
        }
    }

    let mut state = cabin.lock();
    state.behaviour = Behaviour::Stopped;
    cabin.log("Elevator system stopped.");
    cabin.publish(&state);
    tracing::info!("service loop stopped");
}

fn next_step(cabin: &Cabin) -> Step {
    let mut state = cabin.lock();
    if let Some(request) = state.requests.take_next() {
        cabin.publish(&state);
        return Step::Serve(request)
    }
    if state.floor != HOME_FLOOR {
        return Step::ReturnHome
    }
    if state.behaviour != Behaviour::Idle {
        state.behaviour = Behaviour::Idle;
        cabin.publish(&state);
    }
    Step::Idle
}

fn serve(cabin: &Cabin, request: Request) -> Result<(), SuspensionInterrupted> {
    let mut target = request;
    loop {
        match move_to(cabin, target, Travel::Service)? {
            Movement::Arrived => break,
            Movement::Redirected(next) => {
                tracing::info!(from = target.floor, to = next.floor, "movement redirected");
                target = next;
            },
        }
    }

    doors::hold(cabin)?;

    let mut state = cabin.lock();
    state.requests.finish(&target);
    state.behaviour = Behaviour::Idle;
    cabin.publish(&state);
    Ok(())
}

fn return_home(cabin: &Cabin) -> Result<(), SuspensionInterrupted> {
    cabin.log(format!("Returning to floor {} as no more requests are in the queue.", HOME_FLOOR));
    let home = Request::outside(HOME_FLOOR, Direction::Up);

    // calls made on the way down wait for the next tick
    move_to(cabin, home, Travel::ReturnHome)?;

    let mut state = cabin.lock();
    state.behaviour = Behaviour::Idle;
    cabin.publish(&state);
    Ok(())
}

/// Moves one floor per step until the cabin reaches `target`. A service move
/// stops early when a different call took over the active slot.
fn move_to(cabin: &Cabin, target: Request, travel: Travel) -> Result<Movement, SuspensionInterrupted> {
    {
        let mut state = cabin.lock();
        cabin.log(format!("Starting movement to floor {}", target.floor));
        state.moving_up = target.floor > state.floor;
        state.behaviour = match travel {
            Travel::Service => Behaviour::Moving,
            Travel::ReturnHome => Behaviour::Returning,
        };
        cabin.publish(&state);
    }

    loop {
        {
            let state = cabin.lock();
            if let Some(next) = interruption(&state, &target, travel) {
                return Ok(Movement::Redirected(next))
            }
            if state.floor == target.floor {
                break
            }
        }

        cabin.timer().wait(cabin.timing().travel_units)?;

        let mut state = cabin.lock();
        if state.floor < target.floor {
            state.floor += 1;
        } else {
            state.floor -= 1;
        }
        if state.floor != target.floor {
            cabin.log(format!("Passing floor {}", state.floor));
        }
        cabin.publish(&state);
    }

    let mut state = cabin.lock();
    let floor = state.floor;
    cabin.log(format!("Arrived at floor {}", floor));
    if let Some(served) = state.requests.clear_arrival(floor) {
        tracing::debug!(%served, "request satisfied on arrival");
    }
    if let Some(direction) = target.direction {
        state.moving_up = direction.is_up();
    }
    cabin.publish(&state);
    Ok(Movement::Arrived)
}

fn interruption(state: &CabinState, target: &Request, travel: Travel) -> Option<Request> {
    if travel == Travel::ReturnHome {
        return None
    }
    match state.requests.active() {
        Some(active) if active != *target => Some(active),
        _ => None,
    }
}
