#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// IO error on the byte channel; aborts any in-progress correlation.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The expected report did not arrive within the attempt budget.
    #[error("no matching report after {attempts} decoded packets")]
    NoReport {
        /// Code of the command that was sent
        code: u8,
        /// Subcode of the command, for super-packet commands
        subcode: Option<u8>,
        /// Number of packets decoded before giving up
        attempts: u32,
    },

    #[error("command payload too long")]
    PayloadTooLong { actual: usize, max: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
