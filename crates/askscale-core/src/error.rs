//! Profile error types.
//!
//! Every variant is a caller contract violation: malformed responses or
//! inconsistent catalog/pool configuration. An empty eligibility set is not
//! an error and never surfaces here.

use thiserror::Error;

use crate::model::{Dimension, ItemId, ResponseValue};

/// Errors raised while building configuration or scoring a session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileError {
    /// A response value lies outside the Likert scale.
    #[error("response {value} for item {item_id} is outside the 1..=5 scale")]
    ResponseOutOfRange {
        item_id: ItemId,
        value: ResponseValue,
    },

    /// A dimension key that is not part of the dimension catalogue.
    #[error("unknown dimension: {0}")]
    UnknownDimension(String),

    /// A level key other than high/medium/low.
    #[error("unknown level: {0}")]
    UnknownLevel(String),

    /// An item refers to a dimension the catalog does not configure.
    #[error("item {item_id} belongs to dimension '{dimension}', which the catalog does not configure")]
    DimensionNotConfigured { item_id: ItemId, dimension: Dimension },

    /// Two items share an identifier.
    #[error("duplicate item id: {0}")]
    DuplicateItem(ItemId),

    /// A compound trigger with no pairs.
    #[error("compound trigger must contain at least one condition")]
    EmptyTrigger,

    /// The call-to-action pool must always have something to pick.
    #[error("call-to-action pool is empty")]
    EmptyCallToActionPool,
}

impl ProfileError {
    /// Returns `true` if the error stems from session input rather than
    /// from the static configuration.
    pub fn is_session_error(&self) -> bool {
        matches!(self, ProfileError::ResponseOutOfRange { .. })
    }
}
