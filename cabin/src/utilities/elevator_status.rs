use shared_resources::request::Request;

#[derive(serde::Serialize, serde::Deserialize, PartialEq, Eq, Debug, Clone, Copy)]
pub enum Behaviour {
    Idle,
    Moving,
    Returning,
    DoorOpen,
    Stopped,
}

impl Behaviour {
    pub fn as_string(&self) -> String {
        match self {
            Behaviour::Idle => String::from("idle"),
            Behaviour::Moving => String::from("moving"),
            Behaviour::Returning => String::from("returning"),
            Behaviour::DoorOpen => String::from("doorOpen"),
            Behaviour::Stopped => String::from("stopped"),
        }
    }
}

/// What the display gets after every change: the call in service and the
/// queue behind it, plus where the cabin is.
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq)]
pub struct ElevatorStatus {
    pub active: Option<Request>,
    pub pending: Vec<Request>,
    pub floor: u8,
    pub moving_up: bool,
    pub behaviour: Behaviour,
}

impl ElevatorStatus {
    pub fn direction_str(&self) -> &'static str {
        if self.moving_up { "up" } else { "down" }
    }

    pub fn queue_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        let active = match self.active {
            Some(active) => active,
            None => return lines,
        };
        lines.push(format!("Current queue item: {}", active));
        if !self.pending.is_empty() {
            lines.push(String::from("--------------------------------"));
            lines.push(String::from("Awaiting queue items:"));
            lines.push(String::from("--------------------------------"));
            for request in &self.pending {
                lines.push(format!("Floor: {}, Direction: {}", request.floor, request.direction_str()));
            }
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use shared_resources::direction::Direction;

    use super::*;

    #[test]
    fn queue_is_blank_without_active_request() {
        let status = ElevatorStatus {
            active: None,
            pending: vec![Request::outside(3, Direction::Up)],
            floor: 1,
            moving_up: false,
            behaviour: Behaviour::Idle,
        };
        assert!(status.queue_lines().is_empty());
    }

    #[test]
    fn queue_lists_active_then_pending() {
        let status = ElevatorStatus {
            active: Some(Request::outside(4, Direction::Down)),
            pending: vec![Request::inside(2)],
            floor: 3,
            moving_up: true,
            behaviour: Behaviour::Moving,
        };
        assert_eq!(status.queue_lines(), vec![
            String::from("Current queue item: Request [Floor: 4, Direction: down]"),
            String::from("--------------------------------"),
            String::from("Awaiting queue items:"),
            String::from("--------------------------------"),
            String::from("Floor: 2, Direction: none"),
        ]);
    }
}
