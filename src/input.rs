//! Building process lists: parsing them from text and the built-in sample experiment.
//!
//! The text format is one process per line, `id arrival burst [priority]`, with fields
//! separated by commas and/or whitespace. Blank lines and lines starting with `#` are
//! ignored, and a leading header line (first field not a number) is skipped.

use crate::{
    error::{Result, SchedError},
    scheduler::{self, Process},
};
use std::{fs, io::Read, path::Path, str::FromStr};

/// The classic five process experiment, meant to be run with a quantum of 4.
pub fn sample_workload() -> Vec<Process> {
    vec![
        Process::with_priority(1, 1, 6, 3),
        Process::with_priority(2, 3, 8, 1),
        Process::with_priority(3, 5, 2, 5),
        Process::with_priority(4, 7, 4, 2),
        Process::with_priority(5, 9, 5, 4),
    ]
}

pub fn load_file(path: impl AsRef<Path>) -> Result<Vec<Process>> {
    parse_processes(&fs::read_to_string(path)?)
}

pub fn read_processes(mut reader: impl Read) -> Result<Vec<Process>> {
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    parse_processes(&contents)
}

/// Parses and validates a process list.
pub fn parse_processes(contents: &str) -> Result<Vec<Process>> {
    let mut processes = Vec::new();
    let mut seen_data = false;

    for (number, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|field| !field.is_empty())
            .collect();
        let Some(first) = fields.first() else {
            continue;
        };

        // Only the first data line may be a header
        let is_header = first.parse::<i64>().is_err();
        if is_header && !seen_data {
            seen_data = true;
            continue;
        }
        seen_data = true;

        processes.push(parse_line(number + 1, &fields)?);
    }

    scheduler::validate(&processes)?;
    Ok(processes)
}

fn parse_line(line: usize, fields: &[&str]) -> Result<Process> {
    if fields.len() < 3 {
        return Err(SchedError::Parse {
            line,
            message: format!("expected at least 3 fields, found {}", fields.len()),
        });
    }
    if fields.len() > 4 {
        return Err(SchedError::Parse {
            line,
            message: format!("unexpected field \"{}\"", fields[4]),
        });
    }

    let pid: u32 = parse_field(line, "id", fields[0])?;
    let arrival: i64 = parse_field(line, "arrival time", fields[1])?;
    let burst: i64 = parse_field(line, "burst time", fields[2])?;
    let priority: i32 = match fields.get(3) {
        Some(field) => parse_field(line, "priority", field)?,
        None => 0,
    };

    if arrival < 0 {
        return Err(SchedError::NegativeArrival { pid, arrival });
    }
    if burst <= 0 {
        return Err(SchedError::NonPositiveBurst { pid, burst });
    }

    Ok(Process::with_priority(
        pid,
        arrival as u64,
        burst as u64,
        priority,
    ))
}

fn parse_field<T: FromStr>(line: usize, name: &str, field: &str) -> Result<T> {
    field.parse().map_err(|_| SchedError::Parse {
        line,
        message: format!("invalid {name} \"{field}\""),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_csv_with_header_and_comments() {
        let text = "\
id,arrival,burst,priority
# the usual three
1,0,5,2

2, 1, 3
3 2 8 -1
";
        let processes = parse_processes(text).unwrap();
        assert_eq!(
            processes,
            vec![
                Process::with_priority(1, 0, 5, 2),
                Process::new(2, 1, 3),
                Process::with_priority(3, 2, 8, -1),
            ]
        );
    }

    #[test]
    fn test_parse_errors_carry_line_numbers() {
        match parse_processes("1,0,5\n2,x,3\n") {
            Err(SchedError::Parse { line, message }) => {
                assert_eq!(line, 2);
                assert!(message.contains("arrival time"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(matches!(
            parse_processes("1,0\n"),
            Err(SchedError::Parse { line: 1, .. })
        ));
        assert!(matches!(
            parse_processes("1,0,4,1,9\n"),
            Err(SchedError::Parse { line: 1, .. })
        ));
        // A header is only allowed before the data
        assert!(matches!(
            parse_processes("1,0,4\nid,arrival,burst\n"),
            Err(SchedError::Parse { line: 2, .. })
        ));
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            parse_processes("1,-2,4\n"),
            Err(SchedError::NegativeArrival { pid: 1, arrival: -2 })
        ));
        assert!(matches!(
            parse_processes("1,0,0\n"),
            Err(SchedError::NonPositiveBurst { pid: 1, burst: 0 })
        ));
        assert!(matches!(
            parse_processes("1,0,-3\n"),
            Err(SchedError::NonPositiveBurst { pid: 1, burst: -3 })
        ));
        assert!(matches!(
            parse_processes("# nothing\n\n"),
            Err(SchedError::EmptyWorkload)
        ));
        assert!(matches!(
            parse_processes("1,0,1\n1,2,1\n"),
            Err(SchedError::DuplicateId(1))
        ));
    }

    #[test]
    fn test_read_processes() {
        let processes = read_processes("7 0 2\n".as_bytes()).unwrap();
        assert_eq!(processes, vec![Process::new(7, 0, 2)]);
    }

    #[test]
    fn test_sample_workload_is_valid() {
        let processes = sample_workload();
        assert!(scheduler::validate(&processes).is_ok());
        assert_eq!(processes.len(), 5);
    }
}
