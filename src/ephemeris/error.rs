use thiserror::Error;

#[derive(Debug, Error)]
pub enum EphemerisError {
    #[error("unknown body id: {0}")]
    UnknownBody(i32),
    #[error("unknown frame: {0}")]
    UnknownFrame(String),
    #[error("no rotation available from {from} to {to}")]
    UnsupportedRotation { from: String, to: String },
    #[error("invalid time tag '{tag}': {message}")]
    InvalidTime { tag: String, message: String },
    #[error("trajectory of body {body} relative to {relative_to} has {points} points, need at least two")]
    SparseTrajectory {
        body: i32,
        relative_to: i32,
        points: usize,
    },
    #[error("no trajectory for body {body} relative to {relative_to}")]
    NoTrajectory { body: i32, relative_to: i32 },
    #[error("time {et} outside trajectory coverage [{start}, {end}]")]
    OutOfRange { et: f64, start: f64, end: f64 },
    #[error("trajectory file read error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed trajectory record in {file} line {line}: {message}")]
    MalformedTrajectory {
        file: String,
        line: usize,
        message: String,
    },
}
