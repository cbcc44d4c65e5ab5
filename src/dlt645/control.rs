//! Bit-level view over the DL/T 645-2007 control byte.
//!
//! ```text
//!  D7   D6         D5          D4..D0
//!  DIR  exception  following   function
//! ```

use crate::constants::{
    CTRL_MASK_DIR_S2M, CTRL_MASK_EXCEPTION, CTRL_MASK_FOLLOWING, CTRL_MASK_FUNCTION,
};

/// Transfer direction carried in bit D7.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Issued by the master station (D7 = 0).
    MasterToSlave,
    /// Issued by a meter (D7 = 1).
    SlaveToMaster,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ControlWord(pub u8);

impl ControlWord {
    pub fn raw(&self) -> u8 {
        self.0
    }

    /// Low five bits (D0..D4).
    pub fn function_bits(&self) -> u8 {
        self.0 & CTRL_MASK_FUNCTION
    }

    /// D5: the meter has more frames for this identifier.
    pub fn has_following_frame(&self) -> bool {
        self.0 & CTRL_MASK_FOLLOWING != 0
    }

    /// D6: exception response, the data domain holds an error byte.
    pub fn is_exception(&self) -> bool {
        self.0 & CTRL_MASK_EXCEPTION != 0
    }

    pub fn direction(&self) -> Direction {
        if self.0 & CTRL_MASK_DIR_S2M != 0 {
            Direction::SlaveToMaster
        } else {
            Direction::MasterToSlave
        }
    }
}

impl From<u8> for ControlWord {
    fn from(raw: u8) -> Self {
        ControlWord(raw)
    }
}
