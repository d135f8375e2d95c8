use std::{convert::TryFrom, fmt};

use crate::merai_errors::MeraiError;

/// SPK segment data types understood by the reader.
///
/// DE-series planetary kernels only use Chebyshev segments: type 2 (position only) and type 3
/// (position and velocity). Every other type is rejected when the kernel is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum SpkDataType {
    ChebyshevPositionOnly = 2,
    ChebyshevPositionVelocity = 3,
}

impl SpkDataType {
    /// Number of Chebyshev coefficient sets stored per record (3 for x/y/z, 6 with velocities).
    pub fn components(self) -> usize {
        match self {
            SpkDataType::ChebyshevPositionOnly => 3,
            SpkDataType::ChebyshevPositionVelocity => 6,
        }
    }
}

impl TryFrom<i32> for SpkDataType {
    type Error = MeraiError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(SpkDataType::ChebyshevPositionOnly),
            3 => Ok(SpkDataType::ChebyshevPositionVelocity),
            _ => Err(MeraiError::InvalidSpkDataType(value)),
        }
    }
}

impl fmt::Display for SpkDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpkDataType::ChebyshevPositionOnly => write!(f, "Chebyshev Position Only"),
            SpkDataType::ChebyshevPositionVelocity => write!(f, "Chebyshev Position Velocity"),
        }
    }
}

#[cfg(test)]
mod test_spk_type {
    use super::*;

    #[test]
    fn test_spk_type_conversion() {
        assert_eq!(
            SpkDataType::try_from(2).unwrap(),
            SpkDataType::ChebyshevPositionOnly
        );
        assert_eq!(SpkDataType::try_from(3).unwrap().components(), 6);
        assert_eq!(
            SpkDataType::try_from(13),
            Err(MeraiError::InvalidSpkDataType(13))
        );
    }
}
