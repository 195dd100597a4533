//! Ingestion of the whitespace-delimited process list:
//!
//! ```text
//! <count>
//! <pid> <work>
//! ...
//! ```
//!
//! Values are 32-bit signed integers. Tokens after the last expected pair
//! are ignored.

use super::process::ProcessSpec;
use crate::{core::Work, error::InputError};
use rustc_hash::FxHashSet;
use std::io::Read;

pub fn read_process_list<R: Read>(
    mut reader: R,
) -> Result<Vec<ProcessSpec>, InputError> {
    let mut contents = Vec::new();
    reader.read_to_end(&mut contents)?;
    parse_process_list(&contents)
}

pub fn parse_process_list(
    input: impl AsRef<[u8]>,
) -> Result<Vec<ProcessSpec>, InputError> {
    let mut tokens = input
        .as_ref()
        .split(u8::is_ascii_whitespace)
        .filter(|tok| !tok.is_empty());

    let count = tokens
        .next()
        .and_then(parse_int)
        .ok_or(InputError::MalformedCount)?;
    if count <= 0 {
        return Err(InputError::InvalidCount(count));
    }

    let mut seen = FxHashSet::default();
    let mut specs = Vec::new();
    for index in 0..count as u64 {
        let mut next_int = || tokens.next().and_then(parse_int);
        let (Some(pid), Some(work)) = (next_int(), next_int()) else {
            return Err(InputError::MalformedEntry { index });
        };

        // Work is checked before uniqueness, so a bad duplicate reports its work.
        if work <= 0 {
            return Err(InputError::InvalidWork { pid, work });
        }
        if !seen.insert(pid) {
            return Err(InputError::DuplicatePid(pid));
        }

        specs.push(ProcessSpec {
            pid,
            work: work as Work,
        });
    }

    Ok(specs)
}

// Non-UTF-8 and out-of-range tokens are malformed like any other.
fn parse_int(tok: &[u8]) -> Option<i32> {
    std::str::from_utf8(tok).ok()?.parse().ok()
}
