use crossbeam_channel::Sender;
use parking_lot::{Mutex, MutexGuard};

use shared_resources::config::{ConfigError, TimingConfig};
use shared_resources::direction::Direction;
use shared_resources::request::Request;

use crate::modules::fsm;

use super::elevator_status::{Behaviour, ElevatorStatus};
use super::error::RequestError;
use super::requests::RequestQueue;
use super::timer::Timer;

pub const HOME_FLOOR: u8 = 1;

#[derive(Debug, Clone)]
pub struct CabinState {
    pub floor: u8,
    pub top_floor: u8,
    pub moving_up: bool,
    pub running: bool,
    pub behaviour: Behaviour,
    pub requests: RequestQueue,
}

impl CabinState {
    pub fn new(top_floor: u8) -> Self {
        CabinState {
            floor: HOME_FLOOR,
            top_floor: top_floor,
            moving_up: false,
            running: true,
            behaviour: Behaviour::Idle,
            requests: RequestQueue::new(),
        }
    }

    pub fn status(&self) -> ElevatorStatus {
        ElevatorStatus {
            active: self.requests.active(),
            pending: self.requests.pending().iter().copied().collect(),
            floor: self.floor,
            moving_up: self.moving_up,
            behaviour: self.behaviour,
        }
    }

    fn check_outside(&self, floor: u8, direction: Direction) -> Result<(), RequestError> {
        if (floor == HOME_FLOOR && direction != Direction::Up)
            || (floor == self.top_floor && direction != Direction::Down) {
            return Err(RequestError::InvalidBoundaryDirection { floor: floor, direction: direction })
        }
        self.check_range(floor)
    }

    fn check_inside(&self, floor: u8) -> Result<(), RequestError> {
        self.check_range(floor)?;
        if floor == self.floor {
            return Err(RequestError::RedundantInsideCall { floor: floor })
        }
        Ok(())
    }

    fn check_range(&self, floor: u8) -> Result<(), RequestError> {
        if floor < HOME_FLOOR || floor > self.top_floor {
            return Err(RequestError::OutOfRangeFloor { floor: floor, top_floor: self.top_floor })
        }
        Ok(())
    }
}

/// The single cabin. Callers add calls from any thread while `run` drives
/// the cabin on its own thread; every state change happens under one lock.
pub struct Cabin {
    state: Mutex<CabinState>,
    timer: Timer,
    timing: TimingConfig,
    log_tx: Sender<String>,
    status_tx: Sender<ElevatorStatus>,
}

impl Cabin {
    pub fn new(
        top_floor: u8,
        timing: TimingConfig,
        log_tx: Sender<String>,
        status_tx: Sender<ElevatorStatus>,
    ) -> Result<Self, ConfigError> {
        if top_floor < HOME_FLOOR {
            return Err(ConfigError::InvalidTopFloor)
        }
        if timing.unit_ms == 0 {
            return Err(ConfigError::InvalidTimeUnit)
        }

        let cabin = Cabin {
            state: Mutex::new(CabinState::new(top_floor)),
            timer: Timer::new(timing.unit()),
            timing: timing,
            log_tx: log_tx,
            status_tx: status_tx,
        };
        tracing::info!(top_floor, unit_ms = cabin.timing.unit_ms, "cabin created");
        cabin.log(format!("Elevator initialized at floor {}.", HOME_FLOOR));
        cabin.publish(&cabin.state.lock());
        Ok(cabin)
    }

    pub fn add_outside_request(&self, floor: u8, direction: Direction) -> Result<(), RequestError> {
        let mut state = self.state.lock();
        if let Err(e) = self.check_running(&state).and(state.check_outside(floor, direction)) {
            return Err(self.reject(&state, e))
        }

        let (current_floor, moving_up) = (state.floor, state.moving_up);
        let admission = state.requests.admit_outside(Request::outside(floor, direction), current_floor, moving_up);
        if let Some(line) = admission.describe(floor) {
            self.log(line);
        }
        state.requests.sort(current_floor);
        self.publish(&state);
        Ok(())
    }

    pub fn add_inside_request(&self, floor: u8) -> Result<(), RequestError> {
        let mut state = self.state.lock();
        if let Err(e) = self.check_running(&state).and(state.check_inside(floor)) {
            return Err(self.reject(&state, e))
        }

        let current_floor = state.floor;
        state.requests.admit_inside(Request::inside(floor));
        self.log(format!("Inside button pressed for floor {}.", floor));
        state.requests.sort(current_floor);
        self.publish(&state);
        Ok(())
    }

    /// Runs the service loop on the calling thread until `stop` is called.
    pub fn run(&self) {
        fsm::main(self);
    }

    pub fn stop(&self) {
        let was_running = {
            let mut state = self.state.lock();
            std::mem::replace(&mut state.running, false)
        };
        if was_running {
            self.log("Forcing elevator system to stop.");
        }
        self.timer.cancel();
    }

    pub fn floor(&self) -> u8 {
        self.state.lock().floor
    }

    pub fn top_floor(&self) -> u8 {
        self.state.lock().top_floor
    }

    pub fn active(&self) -> Option<Request> {
        self.state.lock().requests.active()
    }

    pub fn pending(&self) -> Vec<Request> {
        self.state.lock().requests.pending().iter().copied().collect()
    }

    pub fn is_running(&self) -> bool {
        self.state.lock().running
    }

    pub fn status(&self) -> ElevatorStatus {
        self.state.lock().status()
    }

    pub(crate) fn lock(&self) -> MutexGuard<'_, CabinState> {
        self.state.lock()
    }

    pub(crate) fn timer(&self) -> &Timer {
        &self.timer
    }

    pub(crate) fn timing(&self) -> &TimingConfig {
        &self.timing
    }

    pub(crate) fn log(&self, line: impl Into<String>) {
        let line = line.into();
        tracing::info!("{}", line);
        // the display may already be gone during shutdown
        let _ = self.log_tx.send(line);
    }

    pub(crate) fn publish(&self, state: &CabinState) {
        let status = state.status();
        tracing::debug!(?status, "status");
        let _ = self.status_tx.send(status);
    }

    fn check_running(&self, state: &CabinState) -> Result<(), RequestError> {
        if !state.running {
            return Err(RequestError::Stopped)
        }
        Ok(())
    }

    fn reject(&self, state: &CabinState, error: RequestError) -> RequestError {
        tracing::warn!(%error, "request rejected");
        let _ = self.log_tx.send(error.to_string());
        self.publish(state);
        error
    }
}
