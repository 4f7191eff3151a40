//! `sim` — Car animation on top of `track_core`: animator, car outline,
//! built-in layouts, ride logs.

pub mod animator;
pub mod car;
pub mod layouts;
pub mod replay;

pub use animator::{AnimatorConfig, CarAnimator, Frame};
pub use car::CarOutline;
pub use layouts::{load_definition, Layout, LayoutKind};
pub use replay::{load_ride, save_ride, PoseSample, RideLog};
