use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum GeometryError {
    #[error("rotation chain broken: expected a rotation from {expected}, got one from {found}")]
    FrameMismatch { expected: String, found: String },
    #[error("unknown frame name: {0}")]
    UnknownFrame(String),
    #[error("motor step {0} outside the motor angle table")]
    InvalidMotorStep(u8),
    #[error("sector {0} has no look angle")]
    InvalidSector(u8),
}
