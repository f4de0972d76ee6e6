use std::fmt;

use super::direction::Direction;

/// A floor call. Outside calls carry the direction the passenger wants to
/// travel, inside (cabin button) calls never do.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Request {
    pub floor: u8,
    pub direction: Option<Direction>,
    pub is_inside: bool,
}

impl Request {
    pub fn outside(floor: u8, direction: Direction) -> Self {
        Request {
            floor: floor,
            direction: Some(direction),
            is_inside: false,
        }
    }

    pub fn inside(floor: u8) -> Self {
        Request {
            floor: floor,
            direction: None,
            is_inside: true,
        }
    }

    pub fn goes(&self, direction: Direction) -> bool {
        self.direction == Some(direction)
    }

    pub fn direction_str(&self) -> &'static str {
        match self.direction {
            Some(direction) => direction.as_str(),
            None => "none",
        }
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_inside {
            write!(f, "Request [Floor: {} (inside)]", self.floor)
        } else {
            write!(f, "Request [Floor: {}, Direction: {}]", self.floor, self.direction_str())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_includes_kind_and_direction() {
        assert_eq!(Request::outside(3, Direction::Up), Request::outside(3, Direction::Up));
        assert_ne!(Request::outside(3, Direction::Up), Request::outside(3, Direction::Down));
        assert_ne!(Request::inside(3), Request::outside(3, Direction::Up));
    }

    #[test]
    fn displays_like_the_queue_panel() {
        assert_eq!(Request::outside(4, Direction::Down).to_string(), "Request [Floor: 4, Direction: down]");
        assert_eq!(Request::inside(2).to_string(), "Request [Floor: 2 (inside)]");
    }
}
