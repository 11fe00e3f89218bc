//! Common utilities for integration tests

pub mod mock_models;
pub mod test_helpers;

// Re-export commonly used items
pub use mock_models::{ExponentialDecay, IndependentFields};
pub use test_helpers::{
    assert_fields_close,
    compute_l2_error,
    dirichlet_mode,
    gaussian_field,
    relative_error,
};
