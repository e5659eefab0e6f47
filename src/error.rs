use std::{fmt, io};

pub type Result<T> = std::result::Result<T, SchedError>;

#[derive(Debug)]
pub enum SchedError {
    /// No processes to schedule
    EmptyWorkload,
    DuplicateId(u32),
    NonPositiveBurst { pid: u32, burst: i64 },
    NegativeArrival { pid: u32, arrival: i64 },
    NonPositiveQuantum(i64),
    UnknownPolicy(String),
    /// Last arrival plus total burst time doesn't fit the clock
    TimeOverflow,
    /// Malformed process list, `line` is 1-based
    Parse { line: usize, message: String },
    /// The simulation produced a state that can't happen under correct accounting
    InvariantViolation { pid: u32, detail: String },
    /// A policy named a process slot that doesn't exist
    InvalidDispatch { index: usize, count: usize },
    Io(io::Error),
}

impl SchedError {
    /// Errors caused by the data handed to the engine rather than by the engine itself.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            SchedError::EmptyWorkload
                | SchedError::DuplicateId(_)
                | SchedError::NonPositiveBurst { .. }
                | SchedError::NegativeArrival { .. }
                | SchedError::NonPositiveQuantum(_)
                | SchedError::UnknownPolicy(_)
                | SchedError::TimeOverflow
                | SchedError::Parse { .. }
        )
    }

    pub(crate) fn invariant(pid: u32, detail: impl Into<String>) -> Self {
        SchedError::InvariantViolation {
            pid,
            detail: detail.into(),
        }
    }
}

impl fmt::Display for SchedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchedError::EmptyWorkload => write!(f, "no processes to schedule"),
            SchedError::DuplicateId(pid) => write!(f, "process id {pid} appears more than once"),
            SchedError::NonPositiveBurst { pid, burst } => {
                write!(f, "process {pid} has non-positive burst time {burst}")
            }
            SchedError::NegativeArrival { pid, arrival } => {
                write!(f, "process {pid} has negative arrival time {arrival}")
            }
            SchedError::NonPositiveQuantum(quantum) => {
                write!(f, "round robin quantum must be positive, got {quantum}")
            }
            SchedError::UnknownPolicy(name) => write!(
                f,
                "unknown policy \"{name}\", expected one of fcfs, sjf, rr, priority"
            ),
            SchedError::TimeOverflow => {
                write!(f, "arrival and burst times overflow the simulated clock")
            }
            SchedError::Parse { line, message } => write!(f, "line {line}: {message}"),
            SchedError::InvariantViolation { pid, detail } => {
                write!(f, "invariant violated for process {pid}: {detail}")
            }
            SchedError::InvalidDispatch { index, count } => write!(
                f,
                "policy dispatched slot {index} but only {count} processes exist"
            ),
            SchedError::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for SchedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SchedError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for SchedError {
    fn from(err: io::Error) -> Self {
        SchedError::Io(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_grouping() {
        assert!(SchedError::EmptyWorkload.is_invalid_input());
        assert!(SchedError::NonPositiveQuantum(0).is_invalid_input());
        assert!(SchedError::Parse {
            line: 3,
            message: "bad".to_owned()
        }
        .is_invalid_input());
        assert!(!SchedError::invariant(1, "negative wait").is_invalid_input());
        assert!(!SchedError::from(io::Error::new(io::ErrorKind::Other, "x")).is_invalid_input());
    }

    #[test]
    fn test_display() {
        assert_eq!(
            SchedError::NonPositiveBurst { pid: 2, burst: 0 }.to_string(),
            "process 2 has non-positive burst time 0"
        );
        assert_eq!(
            SchedError::Parse {
                line: 4,
                message: "missing burst time".to_owned()
            }
            .to_string(),
            "line 4: missing burst time"
        );
    }
}
