//! Reusable interactive widgets layered on the screen contract.

pub mod checkbox;
pub mod clickable;
pub mod select;
pub mod tooltip;

pub use checkbox::{MultiAction, MultiSelect};
pub use clickable::{Bounds, ClickableTracker};
pub use select::{SelectAction, SingleSelect};
pub use tooltip::Tooltip;
