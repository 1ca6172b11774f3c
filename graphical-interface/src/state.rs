use clustering::ClusterId;
use egui::CursorIcon;
use walkers::Position;

/// Something the user did on the map during the last frame.
#[derive(Debug, Clone, PartialEq)]
pub enum MapEvent {
    MarkerDragged(Position),
    MarkerDragEnded(Position),
    ClusterClicked { id: ClusterId, center: Position },
    /// An unclustered point was clicked; `click` is where the pointer was.
    PointClicked { index: usize, click: Position },
    PopupClosed,
}

/// Whether the pointer currently rests on a cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HoverState {
    #[default]
    Idle,
    Hovering,
}

impl HoverState {
    /// Cursor to show for this state; `None` leaves the default cursor alone.
    pub fn cursor_icon(self) -> Option<CursorIcon> {
        match self {
            HoverState::Hovering => Some(CursorIcon::PointingHand),
            HoverState::Idle => None,
        }
    }
}

/// Shared between the map plugins, which record what happened, and the app,
/// which hands the recorded events to the view controller.
#[derive(Debug, Default)]
pub struct InteractionState {
    events: Vec<MapEvent>,
    hover: HoverState,
}

impl InteractionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: MapEvent) {
        self.events.push(event);
    }

    /// Removes and returns the events recorded since the last call.
    pub fn take_events(&mut self) -> Vec<MapEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn hover(&self) -> HoverState {
        self.hover
    }

    /// Moves the hover toggle to match whether a cluster is under the pointer.
    /// Returns `true` when this changed the state (mouse enter or mouse leave).
    pub fn set_cluster_hover(&mut self, over_cluster: bool) -> bool {
        let next = if over_cluster {
            HoverState::Hovering
        } else {
            HoverState::Idle
        };
        let changed = next != self.hover;
        self.hover = next;
        changed
    }

    pub fn cursor_icon(&self) -> Option<CursorIcon> {
        self.hover.cursor_icon()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hover_toggle_is_symmetric() {
        let mut state = InteractionState::new();
        assert_eq!(state.cursor_icon(), None);

        assert!(state.set_cluster_hover(true));
        assert_eq!(state.hover(), HoverState::Hovering);
        assert_eq!(state.cursor_icon(), Some(CursorIcon::PointingHand));

        assert!(!state.set_cluster_hover(true));

        assert!(state.set_cluster_hover(false));
        assert_eq!(state.hover(), HoverState::Idle);
        assert_eq!(state.cursor_icon(), None);
    }

    #[test]
    fn test_take_events_drains_queue() {
        let mut state = InteractionState::new();
        state.push(MapEvent::PopupClosed);
        state.push(MapEvent::MarkerDragEnded(Position::from_lon_lat(1.0, 2.0)));

        let events = state.take_events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0], MapEvent::PopupClosed);
        assert!(state.take_events().is_empty());
    }
}
