use thiserror::Error;

/// Errors raised by the `merai` library.
///
/// Loading errors ([`MeraiError::DataUnavailable`]) are fatal: nothing can be computed without the
/// ephemeris, the star catalog and the constellation map. Everything raised while processing a
/// single object or a single external call is meant to be caught by the caller and degraded to a
/// sentinel value.
#[derive(Error, Debug)]
pub enum MeraiError {
    #[error("Data unavailable ({path}): {reason}")]
    DataUnavailable { path: String, reason: String },

    #[error("Computation skipped for {body}: {reason}")]
    ComputationSkipped { body: String, reason: String },

    #[error("Lookup miss: {0}")]
    LookupMiss(String),

    #[error("External call timed out: {0}")]
    ExternalTimeout(String),

    #[error("Invalid observer: {0}")]
    InvalidObserver(String),

    #[error("Invalid ephemeris file source: {0}")]
    InvalidEphemSource(String),

    #[error("No ephemeris segment for NAIF id {0}")]
    EphemerisKeyMissing(i32),

    #[error("Epoch {et} s past J2000 is outside the coverage of NAIF id {target}")]
    EpochOutOfRange { target: i32, et: f64 },

    #[error("Invalid SPK data type: {0}")]
    InvalidSpkDataType(i32),

    #[error("Star catalog has no '{0}' column")]
    MissingColumn(String),

    #[error("Error during the nom parsing: {0}")]
    NomParsingError(String),

    #[error("Invalid date or time: {0}")]
    InvalidEpoch(String),

    #[error("Chart rendering failed: {0}")]
    RenderError(String),

    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("HTTP ureq error: {0}")]
    UreqHttpError(#[from] ureq::Error),

    #[cfg(feature = "jpl-download")]
    #[error("HTTP reqwest error: {0}")]
    ReqwestError(#[from] reqwest::Error),
}

impl MeraiError {
    /// Build a [`MeraiError::DataUnavailable`] for a given file.
    pub fn data_unavailable(path: impl ToString, reason: impl ToString) -> Self {
        MeraiError::DataUnavailable {
            path: path.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Wrap any error raised while computing a single body.
    pub fn skipped(body: impl ToString, cause: &MeraiError) -> Self {
        MeraiError::ComputationSkipped {
            body: body.to_string(),
            reason: cause.to_string(),
        }
    }
}

impl PartialEq for MeraiError {
    fn eq(&self, other: &Self) -> bool {
        use MeraiError::*;
        match (self, other) {
            (
                DataUnavailable {
                    path: p1,
                    reason: r1,
                },
                DataUnavailable {
                    path: p2,
                    reason: r2,
                },
            ) => p1 == p2 && r1 == r2,
            (
                ComputationSkipped {
                    body: b1,
                    reason: r1,
                },
                ComputationSkipped {
                    body: b2,
                    reason: r2,
                },
            ) => b1 == b2 && r1 == r2,
            (LookupMiss(a), LookupMiss(b)) => a == b,
            (ExternalTimeout(a), ExternalTimeout(b)) => a == b,
            (InvalidObserver(a), InvalidObserver(b)) => a == b,
            (InvalidEphemSource(a), InvalidEphemSource(b)) => a == b,
            (EphemerisKeyMissing(a), EphemerisKeyMissing(b)) => a == b,
            (EpochOutOfRange { target: t1, et: e1 }, EpochOutOfRange { target: t2, et: e2 }) => {
                t1 == t2 && e1 == e2
            }
            (InvalidSpkDataType(a), InvalidSpkDataType(b)) => a == b,
            (MissingColumn(a), MissingColumn(b)) => a == b,
            (NomParsingError(a), NomParsingError(b)) => a == b,
            (InvalidEpoch(a), InvalidEpoch(b)) => a == b,
            (RenderError(a), RenderError(b)) => a == b,

            // foreign errors are not comparable: same variant is enough
            (IoError(_), IoError(_)) => true,
            (CsvError(_), CsvError(_)) => true,
            (JsonError(_), JsonError(_)) => true,
            (UreqHttpError(_), UreqHttpError(_)) => true,
            #[cfg(feature = "jpl-download")]
            (ReqwestError(_), ReqwestError(_)) => true,

            _ => false,
        }
    }
}
