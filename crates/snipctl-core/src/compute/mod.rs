//! Compute Engine: hyperdisks provisioned from a storage pool
//!
//! Disk creation is asynchronous. `insert` returns a zonal operation which is
//! polled to completion before the finished disk is fetched.

pub mod handler;
pub mod model;
pub mod params;
pub mod workflows;

pub use handler::{DisksHandler, ZoneOperationPoller};
pub use model::{ComputeOperation, Disk, OperationStatus};
pub use params::{CreateHyperdiskParams, DiskInsertRequest};
pub use workflows::*;
