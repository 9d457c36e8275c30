#![allow(rustdoc::broken_intra_doc_links)]
#![doc = include_str!("../readme.md")]

pub mod error;
pub mod frame;
pub mod message;
pub mod pack;
pub mod quantize;
pub mod snapshot;

/// Commonly imported items for broadcasting or receiving Remote-ID frames.
pub mod prelude {
    pub use crate::error::{RemoteIdError, Result};
    pub use crate::frame;
    pub use crate::pack;
    pub use crate::snapshot::{
        Auth, AuthType, BasicId, IdType, Location, LocationSource,
        MessageType, SelfId, Status, System, UasSnapshot, UasType,
    };
}
