pub mod commit;
pub mod error;
pub mod tree;
pub mod walk;

pub use error::GraphError;
