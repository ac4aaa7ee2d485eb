pub mod error;
pub mod model;
pub mod store;

pub use error::StoreError;
pub use model::{SavedWord, User, UserRole};
pub use store::Store;
