//! Infrastructure layer.

pub mod catalog;
pub mod storage;

pub use self::{
    catalog::Catalog,
    storage::{Backend, LocalStorage},
};

/// Database operation.
pub use common::Handler as Database;
