//! Bridge between the dropdown lifecycle and an external positioning collaborator.
//!
//! The engine never computes coordinates itself. A [`Positioner`] receives the trigger rectangle,
//! a preferred side and the collision boundary, and answers with the overlay area and the side it
//! actually used (it may flip or shift). [`PlacementAdapter`] decides *when* to ask: after
//! opening, after the trigger moves, after the boundary changes, and never while closed.
use ratatui::layout::Rect;
use ratatui::layout::Size;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlacementPreference {
    #[default]
    Auto,
    Top,
    Bottom,
}

impl PlacementPreference {
    pub fn preferred_side(self) -> Side {
        match self {
            Self::Top => Side::Top,
            Self::Auto | Self::Bottom => Side::Bottom,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Top,
    Bottom,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlacementRequest {
    /// Bounding rectangle of the trigger.
    pub anchor: Rect,
    pub preferred: Side,
    /// Area the overlay must stay inside (usually the whole frame).
    pub boundary: Rect,
    /// Size the overlay would like to have.
    pub desired: Size,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedPlacement {
    pub area: Rect,
    pub side: Side,
}

/// The positioning collaborator. Must be safe to call repeatedly with the same request.
pub trait Positioner {
    fn resolve(&mut self, request: &PlacementRequest) -> ResolvedPlacement;
}

impl<F> Positioner for F
where
    F: FnMut(&PlacementRequest) -> ResolvedPlacement,
{
    fn resolve(&mut self, request: &PlacementRequest) -> ResolvedPlacement {
        self(request)
    }
}

#[derive(Clone, Debug, Default)]
pub struct PlacementAdapter {
    preference: PlacementPreference,
    active: bool,
    dirty: bool,
    anchor: Option<Rect>,
    boundary: Option<Rect>,
    desired: Size,
    resolved: Option<ResolvedPlacement>,
}

impl PlacementAdapter {
    pub fn new(preference: PlacementPreference) -> Self {
        Self {
            preference,
            ..Self::default()
        }
    }

    pub fn preference(&self) -> PlacementPreference {
        self.preference
    }

    /// Called on `closed -> open`: the next [`update`](Self::update) asks the positioner.
    pub fn activate(&mut self) {
        self.active = true;
        self.dirty = true;
    }

    /// Called on `open -> closed`: stops updates and forgets the last answer.
    pub fn deactivate(&mut self) {
        self.active = false;
        self.dirty = false;
        self.resolved = None;
    }

    pub fn set_anchor(&mut self, anchor: Rect) {
        if self.anchor != Some(anchor) {
            self.anchor = Some(anchor);
            self.dirty = true;
        }
    }

    pub fn set_boundary(&mut self, boundary: Rect) {
        if self.boundary != Some(boundary) {
            self.boundary = Some(boundary);
            self.dirty = true;
        }
    }

    pub fn set_desired_size(&mut self, desired: Size) {
        if self.desired != desired {
            self.desired = desired;
            self.dirty = true;
        }
    }

    /// Asks the positioner for fresh coordinates if anything changed since the last answer.
    ///
    /// Returns the current placement; `None` while closed or before anchor and boundary are known.
    pub fn update(&mut self, positioner: &mut dyn Positioner) -> Option<ResolvedPlacement> {
        if !self.active {
            return None;
        }
        if self.dirty {
            if let Some(request) = self.request() {
                let resolved = positioner.resolve(&request);
                tracing::trace!(
                    side = ?resolved.side,
                    x = resolved.area.x,
                    y = resolved.area.y,
                    w = resolved.area.width,
                    h = resolved.area.height,
                    "overlay placed"
                );
                self.resolved = Some(resolved);
                self.dirty = false;
            }
        }
        self.resolved
    }

    pub fn resolved(&self) -> Option<ResolvedPlacement> {
        self.resolved
    }

    fn request(&self) -> Option<PlacementRequest> {
        Some(PlacementRequest {
            anchor: self.anchor?,
            preferred: self.preference.preferred_side(),
            boundary: self.boundary?,
            desired: self.desired,
        })
    }
}
