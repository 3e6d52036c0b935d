pub mod codec;
pub mod deferred;
pub mod error;

pub mod prelude {
    pub use crate::error::*;

    pub use crate::codec::unix::{
        AccessTriad, FileMode, PermissionBits, UnixPermissionError, UserClass,
    };
    pub use crate::deferred::{Deferred, EvaluationError};
}
