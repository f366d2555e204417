use crate::animation::TreeMode;

/// Hand pose reported by whatever classifier the host runs. Labels
/// arrive as free-form strings, so anything unrecognized maps to
/// `Unknown` rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    Open,
    Closed,
    Pinch,
    Point,
    Unknown,
}

impl Gesture {
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "open" => Gesture::Open,
            "closed" => Gesture::Closed,
            "pinch" => Gesture::Pinch,
            "point" => Gesture::Point,
            _ => Gesture::Unknown,
        }
    }

    /// The mode this gesture asks for, if it asks for one at all.
    pub fn requested_mode(&self) -> Option<TreeMode> {
        match self {
            Gesture::Open => Some(TreeMode::Chaos),
            Gesture::Closed | Gesture::Pinch => Some(TreeMode::Formed),
            Gesture::Point | Gesture::Unknown => None,
        }
    }
}

/// One frame of hand input. Position is normalized to [-1, 1] on both
/// axes, or absent when the tracker only classified the pose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandSignal {
    pub position: Option<[f32; 2]>,
    pub gesture: Gesture,
}

impl HandSignal {
    pub fn new(x: f32, y: f32, label: &str) -> Self {
        Self {
            position: Some([x, y]),
            gesture: Gesture::from_label(label),
        }
    }
}

/// Anything that can feed hand signals into the engine. Production
/// hosts wrap a webcam tracker; tests use a scripted source.
pub trait HandSignalSource {
    /// The latest signal, or None while no hand is visible.
    fn poll(&mut self) -> Option<HandSignal>;
}

/// Turns raw signals into mode requests and remembers where the hand
/// was last seen so the camera can lean toward it.
#[derive(Debug, Default)]
pub struct GestureInterpreter {
    last_position: Option<[f32; 2]>,
}

impl GestureInterpreter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one signal. Returns the mode the gesture requests, or None
    /// when the pose should leave the current mode alone.
    pub fn interpret(&mut self, signal: &HandSignal) -> Option<TreeMode> {
        if let Some(position) = signal.position {
            self.last_position = Some(position);
        }
        signal.gesture.requested_mode()
    }

    /// The hand left the frame. The mode is left alone; only the camera
    /// influence decays back to center.
    pub fn hand_lost(&mut self) {
        self.last_position = None;
    }

    pub fn last_position(&self) -> Option<[f32; 2]> {
        self.last_position
    }

    /// Drain a source, applying every pending signal in order. Returns
    /// the last mode request seen, if any.
    pub fn drain(&mut self, source: &mut dyn HandSignalSource) -> Option<TreeMode> {
        let mut requested = None;
        while let Some(signal) = source.poll() {
            if let Some(mode) = self.interpret(&signal) {
                requested = Some(mode);
            }
        }
        requested
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Plays back a fixed script of signals.
    struct ScriptedSource {
        signals: Vec<HandSignal>,
    }

    impl HandSignalSource for ScriptedSource {
        fn poll(&mut self) -> Option<HandSignal> {
            if self.signals.is_empty() {
                None
            } else {
                Some(self.signals.remove(0))
            }
        }
    }

    #[test]
    fn test_labels_parse_case_insensitively() {
        assert_eq!(Gesture::from_label("open"), Gesture::Open);
        assert_eq!(Gesture::from_label("OPEN"), Gesture::Open);
        assert_eq!(Gesture::from_label(" Closed "), Gesture::Closed);
        assert_eq!(Gesture::from_label("Pinch"), Gesture::Pinch);
        assert_eq!(Gesture::from_label("point"), Gesture::Point);
        assert_eq!(Gesture::from_label("wave"), Gesture::Unknown);
        assert_eq!(Gesture::from_label(""), Gesture::Unknown);
    }

    #[test]
    fn test_open_scatters_closed_forms() {
        assert_eq!(Gesture::Open.requested_mode(), Some(TreeMode::Chaos));
        assert_eq!(Gesture::Closed.requested_mode(), Some(TreeMode::Formed));
        assert_eq!(Gesture::Pinch.requested_mode(), Some(TreeMode::Formed));
        assert_eq!(Gesture::Point.requested_mode(), None);
        assert_eq!(Gesture::Unknown.requested_mode(), None);
    }

    #[test]
    fn test_interpreter_tracks_position() {
        let mut interp = GestureInterpreter::new();
        assert!(interp.last_position().is_none());

        let mode = interp.interpret(&HandSignal::new(0.3, -0.6, "open"));
        assert_eq!(mode, Some(TreeMode::Chaos));
        assert_eq!(interp.last_position(), Some([0.3, -0.6]));
    }

    #[test]
    fn test_unrecognized_pose_keeps_position_but_requests_nothing() {
        let mut interp = GestureInterpreter::new();
        interp.interpret(&HandSignal::new(0.1, 0.1, "closed"));

        let mode = interp.interpret(&HandSignal::new(0.5, 0.5, "wave"));
        assert_eq!(mode, None);
        // Camera still follows the hand even when the pose means nothing.
        assert_eq!(interp.last_position(), Some([0.5, 0.5]));
    }

    #[test]
    fn test_hand_lost_clears_position_only() {
        let mut interp = GestureInterpreter::new();
        interp.interpret(&HandSignal::new(0.2, 0.2, "open"));
        interp.hand_lost();
        assert!(interp.last_position().is_none());
    }

    #[test]
    fn test_positionless_signal_keeps_last_position() {
        let mut interp = GestureInterpreter::new();
        interp.interpret(&HandSignal::new(0.4, 0.4, "open"));

        let poseless = HandSignal {
            position: None,
            gesture: Gesture::Closed,
        };
        let mode = interp.interpret(&poseless);
        assert_eq!(mode, Some(TreeMode::Formed));
        assert_eq!(interp.last_position(), Some([0.4, 0.4]));
    }

    #[test]
    fn test_drain_returns_last_request() {
        let mut interp = GestureInterpreter::new();
        let mut source = ScriptedSource {
            signals: vec![
                HandSignal::new(0.0, 0.0, "open"),
                HandSignal::new(0.1, 0.0, "point"),
                HandSignal::new(0.2, 0.0, "pinch"),
            ],
        };

        let mode = interp.drain(&mut source);
        assert_eq!(mode, Some(TreeMode::Formed));
        assert_eq!(interp.last_position(), Some([0.2, 0.0]));
        assert!(source.poll().is_none());
    }
}
