pub mod codec;
pub mod error;
pub mod id;
pub mod object;

pub use error::CoreError;
pub use id::ObjectId;
pub use object::{Object, ObjectKind};
