//! Form Input Validators
//!
//! ## Overview
//!
//! The simulator takes two numbers from the user: the room area and,
//! optionally, a target illuminance. Both go through a validator before any
//! prediction is attempted, and both follow the same two-phase life cycle.
//!
//! ## Draft vs Commit
//!
//! ### Draft
//! While the user is typing, [`InputValidator::check_draft`] classifies the
//! text into a [`DraftState`]. It never clamps and never fails. A field that
//! holds `"1"` on its way to `"12"` is `BelowMinimum(1.0)`, which the
//! presentation layer may hint at, but the text is left alone.
//!
//! ### Commit
//! When the field loses focus, [`InputValidator::commit`] turns the text into
//! a usable value or an error. What happens to a positive value below the
//! minimum depends on the [`CommitPolicy`]:
//!
//! | Policy   | `"3"` with a 5 m² minimum              |
//! |----------|----------------------------------------|
//! | `Reject` | `Err(BelowMinimum { value: 3, min: 5 })` |
//! | `Clamp`  | `Ok(5.0)`                              |
//!
//! Zero, negative, empty and non-numeric input is rejected under both.
//!
//! ## Usage Example
//!
//! ```rust
//! use lumisim_core::validators::{AreaValidator, CommitPolicy, DraftState};
//! use lumisim_core::InputValidator;
//!
//! let strict = AreaValidator::default();
//! assert_eq!(strict.check_draft("1"), DraftState::BelowMinimum(1.0));
//! assert!(strict.commit("3").is_err());
//! assert_eq!(strict.commit("12,5"), Ok(12.5));
//!
//! let lenient = AreaValidator::new(5.0, CommitPolicy::Clamp);
//! assert_eq!(lenient.commit("3"), Ok(5.0));
//! ```

mod area;
mod illuminance;
pub mod utils;

pub use area::AreaValidator;
pub use illuminance::IlluminanceValidator;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Treatment of a committed value below the minimum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CommitPolicy {
    /// Return `BelowMinimum` and leave the field as typed
    #[default]
    Reject,
    /// Replace the value with the minimum
    Clamp,
}

/// Classification of text still being edited
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DraftState {
    /// Nothing typed
    Empty,
    /// A prefix of a number such as `"-"` or `"1e"`
    Incomplete,
    /// Text that cannot become a number
    NotANumber,
    /// A number under the minimum
    BelowMinimum(f64),
    /// A usable number
    Valid(f64),
}

impl DraftState {
    /// Value that would be accepted as-is on commit
    pub fn valid_value(&self) -> Option<f64> {
        match self {
            Self::Valid(value) => Some(*value),
            _ => None,
        }
    }
}
