// Domain-layer modules and shared errors/models
pub mod estimate {
    pub use crate::estimate::*;
}

pub mod models {
    pub use crate::models::*;
}

pub mod notification {
    pub use crate::notification::*;
}

pub mod projection {
    pub use crate::projection::*;
}

pub mod validation {
    pub use crate::validation::*;
}

pub mod errors {
    pub use crate::errors::*;
}
