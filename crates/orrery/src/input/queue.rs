use crate::core::policy::SpinMode;

/// Control events the model understands.
/// Generic: no window-system key codes, the host maps its own input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlEvent {
    /// Play/pause toggle.
    TogglePause,
    /// Raise the time scale by one step.
    FasterTime,
    /// Lower the time scale by one step.
    SlowerTime,
    /// Set the time scale directly (days per real second).
    SetTimeScale(f64),
    /// Simulated time back to zero.
    ResetTime,
    /// Linear ↔ compressed distances.
    ToggleCompression,
    /// Exaggerated → realistic → hidden satellites.
    CycleMoonVisibility,
    /// Show or hide orbit polylines.
    ToggleOrbits,
    /// Realistic ↔ smooth spin.
    ToggleSpinMode,
    /// Select a spin mode directly.
    SetSpinMode(SpinMode),
}

impl ControlEvent {
    /// Default keyboard binding.
    pub fn from_key(key: char) -> Option<Self> {
        match key.to_ascii_lowercase() {
            ' ' => Some(Self::TogglePause),
            '[' => Some(Self::SlowerTime),
            ']' => Some(Self::FasterTime),
            'r' => Some(Self::ResetTime),
            'o' => Some(Self::ToggleOrbits),
            'c' => Some(Self::ToggleCompression),
            'm' => Some(Self::CycleMoonVisibility),
            's' => Some(Self::ToggleSpinMode),
            _ => None,
        }
    }
}

/// A queue of control events.
/// The host pushes events as they arrive; the model drains them once per frame.
#[derive(Debug, Default)]
pub struct ControlQueue {
    events: Vec<ControlEvent>,
}

impl ControlQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(16),
        }
    }

    pub fn push(&mut self, event: ControlEvent) {
        self.events.push(event);
    }

    /// Push the event bound to `key`, if any. Returns whether one was queued.
    pub fn push_key(&mut self, key: char) -> bool {
        match ControlEvent::from_key(key) {
            Some(event) => {
                self.push(event);
                true
            }
            None => false,
        }
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<ControlEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &ControlEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain() {
        let mut q = ControlQueue::new();
        q.push(ControlEvent::TogglePause);
        q.push(ControlEvent::SetTimeScale(50.0));
        assert_eq!(q.len(), 2);
        let events = q.drain();
        assert_eq!(events, vec![ControlEvent::TogglePause, ControlEvent::SetTimeScale(50.0)]);
        assert!(q.is_empty());
    }

    #[test]
    fn key_bindings() {
        let mut q = ControlQueue::new();
        assert!(q.push_key(' '));
        assert!(q.push_key(']'));
        assert!(q.push_key('M'));
        assert!(!q.push_key('x'));
        let events: Vec<_> = q.iter().copied().collect();
        assert_eq!(
            events,
            vec![ControlEvent::TogglePause, ControlEvent::FasterTime, ControlEvent::CycleMoonVisibility]
        );
    }
}
