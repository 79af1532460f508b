//! External service integrations.

pub mod delivery {
    pub use crate::delivery::*;
}

pub mod storage {
    pub use crate::storage::*;
}
