//! Typed Sonos API for device control
//!
//! Each UPnP action is a zero-sized type implementing [`SonosOperation`],
//! carrying its request and response types. [`SonosClient::execute`] turns an
//! operation into a SOAP call via the private `soap-client` crate.
//!
//! ```rust,ignore
//! use sonos_api::SonosClient;
//! use sonos_api::operations::av_transport::{GetTransportInfoOperation, GetTransportInfoRequest};
//!
//! let client = SonosClient::new();
//! let info = client.execute::<GetTransportInfoOperation>(
//!     "192.168.1.102",
//!     &GetTransportInfoRequest { instance_id: 0 },
//! )?;
//! println!("{:?}", info.current_transport_state);
//! ```

pub mod client;
pub mod error;
pub mod operation;
pub mod operations;
pub mod service;

pub use client::SonosClient;
pub use error::{ApiError, Result};
pub use operation::SonosOperation;
pub use service::{Service, ServiceInfo};
