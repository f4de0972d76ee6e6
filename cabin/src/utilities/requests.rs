use std::cmp::Reverse;
use std::collections::VecDeque;

use shared_resources::direction::Direction;
use shared_resources::request::Request;

/// Where the admission step put a new outside request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Idle,
    Prioritized(Direction),
    InsertedOnTheWay(Direction),
    Appended,
    /// Queued behind the active call with nothing else waiting. Not logged.
    Queued,
}

impl Admission {
    pub fn describe(self, floor: u8) -> Option<String> {
        let line = match self {
            Admission::Idle => String::from("Elevator is idle, adding request to the queue."),
            Admission::Prioritized(direction) => {
                format!("Prioritizing request to stop at floor {} on the way {}.", floor, direction)
            },
            Admission::InsertedOnTheWay(direction) => {
                format!("Inserting outside request at floor {} on the way {}.", floor, direction)
            },
            Admission::Appended => format!("Adding request for floor {} to the end of the queue.", floor),
            Admission::Queued => return None,
        };
        Some(line)
    }
}

/// Pending calls plus the one currently being served.
#[derive(Debug, Clone, Default)]
pub struct RequestQueue {
    pending: VecDeque<Request>,
    active: Option<Request>,
}

impl RequestQueue {
    pub fn new() -> Self {
        RequestQueue::default()
    }

    pub fn active(&self) -> Option<Request> {
        self.active
    }

    pub fn pending(&self) -> &VecDeque<Request> {
        &self.pending
    }

    pub fn has_inside_request(&self) -> bool {
        self.pending.iter().any(|request| request.is_inside)
    }

    /// Places an outside call relative to the cabin at `floor`. A call strictly
    /// on the way to the active target replaces it; the old target goes back to
    /// the front of the queue.
    pub fn admit_outside(&mut self, request: Request, floor: u8, moving_up: bool) -> Admission {
        let active = match self.active {
            Some(active) => active,
            None => {
                self.pending.push_back(request);
                return Admission::Idle
            },
        };

        let target = request.floor;
        if moving_up && target > floor && target < active.floor {
            self.pending.push_front(active);
            self.active = Some(request);
            return Admission::Prioritized(Direction::Up)
        }
        if !moving_up && target < floor && target > active.floor {
            self.pending.push_front(active);
            self.active = Some(request);
            return Admission::Prioritized(Direction::Down)
        }

        let next = match self.pending.front() {
            Some(next) => *next,
            None => {
                self.pending.push_back(request);
                return Admission::Queued
            },
        };
        if moving_up && request.goes(Direction::Up) && target > floor && target < next.floor {
            self.pending.push_front(request);
            return Admission::InsertedOnTheWay(Direction::Up)
        }
        if !moving_up && request.goes(Direction::Down) && target < floor && target > next.floor {
            self.pending.push_front(request);
            return Admission::InsertedOnTheWay(Direction::Down)
        }

        self.pending.push_back(request);
        Admission::Appended
    }

    pub fn admit_inside(&mut self, request: Request) {
        self.pending.push_front(request);
    }

    /// Rebuilds the pending queue as one greedy pass from `floor`: inside calls
    /// swept in the busier direction first, then each outside call spliced into
    /// the first segment that passes its floor in its direction.
    pub fn sort(&mut self, floor: u8) {
        let mut unique: Vec<Request> = Vec::with_capacity(self.pending.len());
        for request in self.pending.drain(..) {
            if !unique.contains(&request) {
                unique.push(request);
            }
        }

        if let Some(active) = self.active {
            unique.retain(|request| request.floor != active.floor);
        }

        let (inside, outside): (Vec<Request>, Vec<Request>) = unique
            .into_iter()
            .partition(|request| request.is_inside);

        let mut path = order_inside(floor, inside);
        for request in outside {
            merge_outside(&mut path, request);
        }
        self.pending = path.into();
    }

    /// Moves the next pending call into service unless one is already active.
    pub fn take_next(&mut self) -> Option<Request> {
        if self.active.is_none() {
            self.active = self.pending.pop_front();
        }
        self.active
    }

    /// Drops the front call when the cabin has just arrived at its floor.
    pub fn clear_arrival(&mut self, floor: u8) -> Option<Request> {
        match self.pending.front() {
            Some(next) if next.floor == floor => self.pending.pop_front(),
            _ => None,
        }
    }

    /// Clears the active slot if it still holds `served`.
    pub fn finish(&mut self, served: &Request) -> bool {
        if self.active.as_ref() == Some(served) {
            self.active = None;
            return true
        }
        false
    }
}

fn order_inside(floor: u8, inside: Vec<Request>) -> Vec<Request> {
    let (mut going_up, mut going_down): (Vec<Request>, Vec<Request>) = inside
        .into_iter()
        .partition(|request| request.floor > floor);

    going_up.sort_by_key(|request| request.floor);
    going_down.sort_by_key(|request| Reverse(request.floor));

    if going_down.len() > going_up.len() {
        going_down.extend(going_up);
        going_down
    } else {
        going_up.extend(going_down);
        going_up
    }
}

fn merge_outside(path: &mut Vec<Request>, request: Request) {
    let slot = path.windows(2).position(|pair| {
        let (current, next) = (pair[0], pair[1]);
        current.floor <= request.floor
            && request.floor <= next.floor
            && request.goes(Direction::between(current.floor, next.floor))
    });
    match slot {
        Some(index) => path.insert(index + 1, request),
        None => path.push(request),
    }
}
