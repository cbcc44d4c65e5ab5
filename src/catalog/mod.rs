//! The catalog module maps data domains to and from typed messages.
//!
//! - [`builder`] lays out the data domain for every control code and wraps it
//!   in a frame.
//! - [`station`] and [`response`] demultiplex decoded frames in each
//!   direction.
//! - [`view`] holds the read-only results the interpreters hand back.

pub mod builder;
pub mod response;
pub mod station;
pub mod view;

use thiserror::Error;

use crate::error::Dlt645Error;

pub use builder::*;
pub use response::{MeterResponse, ResponseInterpreter};
pub use station::{StationInterpreter, StationRequest};
pub use view::{
    Acknowledgement, ErrorResponse, ErrorWord, FreezeCommand, MeterTimestamp,
    ReadContinuationRequest, ReadRequest, ReadResponse, SetAddressRequest, SetRequest,
    TimeCalibration, UnregisteredResponse,
};

/// A frame an interpreter could not turn into a message.
///
/// Carries the control code and the raw data domain so the caller can log or
/// answer it; the interpreter itself is unaffected.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Rejected frame with control {control:#04X}: {error}")]
pub struct Rejection {
    pub control: u8,
    pub data: Vec<u8>,
    #[source]
    pub error: Dlt645Error,
}

impl Rejection {
    pub fn new(control: u8, data: &[u8], error: Dlt645Error) -> Self {
        Self {
            control,
            data: data.to_vec(),
            error,
        }
    }
}

pub(crate) fn require(control: u8, data: &[u8], required: usize) -> Result<(), Dlt645Error> {
    if data.len() < required {
        return Err(Dlt645Error::DataDomainTooShort {
            control,
            required,
            actual: data.len(),
        });
    }
    Ok(())
}
