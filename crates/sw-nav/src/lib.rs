//! `sw-nav` — road-mode navigation, free-explore movement, and the session
//! that switches between them.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                          |
//! |-------------|-------------------------------------------------------------------|
//! | [`cursor`]  | `NavigationCursor` — locate start, advance, turn                  |
//! | [`acquire`] | `RoadSource`, `GrowthPolicy`, `acquire_graph` radius-doubling loop |
//! | [`explore`] | `Explorer` — free-explore position, heading, step, history        |
//! | [`summary`] | `TravelSummary`, `TurnSummary`, `MoveSummary`                     |
//! | [`session`] | `NavigationSession` — context object owning all of the above     |
//! | [`config`]  | `NavConfig`                                                       |
//! | [`error`]   | `NavError`, `NavResult<T>`                                        |
//!
//! # Road mode
//!
//! 1. [`NavigationSession::enter_road_mode`] asks a [`RoadSource`] for
//!    elements around the explorer, growing the radius until the graph has
//!    enough real intersections.
//! 2. The cursor starts on the nearest real intersection, facing the road
//!    closest to the explorer's heading.
//! 3. `advance` walks straight through collapsible vertices to the next
//!    real intersection; `turn_left` / `turn_right` step through the roads
//!    at the current one in bearing order.
//! 4. `exit_road_mode` drops the graph and resumes free-explore on the
//!    current intersection.
//!
//! Failed commands never change state.

pub mod acquire;
pub mod config;
pub mod cursor;
pub mod error;
pub mod explore;
pub mod session;
pub mod summary;


pub use acquire::{acquire_graph, AcquisitionError, GrowthPolicy, InMemorySource, RoadSource};
pub use config::NavConfig;
pub use cursor::{advance_to_next_real_intersection, Advance, Arrival, NavigationCursor, TurnDirection};
pub use error::{NavError, NavResult};
pub use explore::{ExploreConfig, Explorer};
pub use session::NavigationSession;
pub use summary::{MoveSummary, TravelSummary, TurnSummary, Upcoming};
