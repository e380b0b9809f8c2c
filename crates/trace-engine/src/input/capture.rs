use glam::Vec2;

use super::queue::InputEvent;

/// Snapshot of the touch state after a handled pointer event.
#[derive(Debug, Clone, PartialEq)]
pub struct TouchFrame {
    /// True while a finger is down.
    pub touching: bool,
    /// Latest pointer position, filtered or not.
    pub position: Option<Vec2>,
    /// Points accepted by the movement filter since the last pointer down.
    pub path: Vec<Vec2>,
}

/// Turns raw pointer events into a discrete path.
///
/// A move only extends the path once the finger has travelled at least
/// `min_distance` from the last accepted point, which keeps jitter out of
/// the path without losing the live position.
#[derive(Debug, Clone)]
pub struct TouchCapture {
    min_distance: f32,
    touching: bool,
    position: Option<Vec2>,
    last_accepted: Option<Vec2>,
    path: Vec<Vec2>,
}

impl TouchCapture {
    pub fn new(min_distance: f32) -> Self {
        Self {
            min_distance,
            touching: false,
            position: None,
            last_accepted: None,
            path: Vec::with_capacity(256),
        }
    }

    /// Process one event. Returns the new touch state if the event was
    /// relevant (down, up, or a move while touching).
    pub fn handle(&mut self, event: &InputEvent) -> Option<TouchFrame> {
        match *event {
            InputEvent::PointerDown { x, y } => {
                let pos = Vec2::new(x, y);
                self.touching = true;
                self.position = Some(pos);
                self.last_accepted = Some(pos);
                self.path.clear();
                self.path.push(pos);
                Some(self.frame())
            }
            InputEvent::PointerMove { x, y } if self.touching => {
                let pos = Vec2::new(x, y);
                let accept = self
                    .last_accepted
                    .map_or(true, |last| last.distance(pos) >= self.min_distance);
                if accept {
                    self.path.push(pos);
                    self.last_accepted = Some(pos);
                }
                self.position = Some(pos);
                Some(self.frame())
            }
            // The path survives the lift; it is the final replay.
            InputEvent::PointerUp { .. } if self.touching => {
                self.touching = false;
                Some(self.frame())
            }
            _ => None,
        }
    }

    /// Forget the current path and touch.
    pub fn clear(&mut self) {
        self.touching = false;
        self.position = None;
        self.last_accepted = None;
        self.path.clear();
    }

    pub fn is_touching(&self) -> bool {
        self.touching
    }

    pub fn path(&self) -> &[Vec2] {
        &self.path
    }

    fn frame(&self) -> TouchFrame {
        TouchFrame {
            touching: self.touching,
            position: self.position,
            path: self.path.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn down(x: f32, y: f32) -> InputEvent {
        InputEvent::PointerDown { x, y }
    }

    fn mv(x: f32, y: f32) -> InputEvent {
        InputEvent::PointerMove { x, y }
    }

    #[test]
    fn down_starts_a_fresh_path() {
        let mut capture = TouchCapture::new(5.0);
        let frame = capture.handle(&down(10.0, 10.0)).unwrap();
        assert!(frame.touching);
        assert_eq!(frame.position, Some(Vec2::new(10.0, 10.0)));
        assert_eq!(frame.path, vec![Vec2::new(10.0, 10.0)]);
    }

    #[test]
    fn small_moves_update_position_but_not_path() {
        let mut capture = TouchCapture::new(5.0);
        capture.handle(&down(10.0, 10.0));

        let frame = capture.handle(&mv(12.0, 11.0)).unwrap();
        assert_eq!(frame.position, Some(Vec2::new(12.0, 11.0)));
        assert_eq!(frame.path.len(), 1);

        // Distance is measured from the last accepted point, not the last event
        let frame = capture.handle(&mv(13.0, 13.0)).unwrap();
        assert_eq!(frame.path.len(), 1);
        let frame = capture.handle(&mv(13.0, 14.0)).unwrap();
        assert_eq!(frame.path.len(), 2);
    }

    #[test]
    fn threshold_distance_is_accepted() {
        let mut capture = TouchCapture::new(5.0);
        capture.handle(&down(0.0, 0.0));
        let frame = capture.handle(&mv(3.0, 4.0)).unwrap();
        assert_eq!(frame.path, vec![Vec2::ZERO, Vec2::new(3.0, 4.0)]);
    }

    #[test]
    fn moves_without_touch_are_ignored() {
        let mut capture = TouchCapture::new(5.0);
        assert!(capture.handle(&mv(50.0, 50.0)).is_none());
        assert!(capture.handle(&InputEvent::PointerUp { x: 0.0, y: 0.0 }).is_none());
    }

    #[test]
    fn up_keeps_path_for_replay() {
        let mut capture = TouchCapture::new(5.0);
        capture.handle(&down(0.0, 0.0));
        capture.handle(&mv(10.0, 0.0));
        let frame = capture.handle(&InputEvent::PointerUp { x: 10.0, y: 0.0 }).unwrap();
        assert!(!frame.touching);
        assert_eq!(frame.path.len(), 2);
        assert!(!capture.is_touching());
    }

    #[test]
    fn custom_events_are_not_touch() {
        let mut capture = TouchCapture::new(5.0);
        let event = InputEvent::Custom { kind: 1, a: 0.0, b: 0.0, c: 0.0 };
        assert!(capture.handle(&event).is_none());
    }

    #[test]
    fn clear_resets_everything() {
        let mut capture = TouchCapture::new(5.0);
        capture.handle(&down(0.0, 0.0));
        capture.handle(&mv(10.0, 0.0));
        capture.clear();
        assert!(capture.path().is_empty());
        assert!(!capture.is_touching());
    }
}
