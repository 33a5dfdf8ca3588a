//! Automatic flower planting for a moving player.
//!
//! [`ToggleController`] owns the on/off state and its HUD countdown;
//! [`PlantingPlanner`] decides, once per tick, whether and where to plant.
//! Both are driven by the host's tick loop, toggle first.

pub mod catalog;
pub mod hud;
pub mod movement;
pub mod planner;
pub mod toggle;

pub use catalog::{is_suitable_ground, PlantableCatalog, SUITABLE_GROUND};
pub use hud::{render_status, DisplaySink, STATUS_TOP_OFFSET};
pub use movement::{MovementTracker, DEFAULT_MOVEMENT_EPSILON};
pub use planner::{
    candidate_ring, PlacementCandidate, PlannerSettings, PlantingHost, PlantingPlanner,
    TickOutcome, MAX_RADIUS,
};
pub use toggle::{
    StatusLine, ToggleController, DEFAULT_HUD_DISPLAY_TICKS, STATUS_COLOR_OFF, STATUS_COLOR_ON,
};
