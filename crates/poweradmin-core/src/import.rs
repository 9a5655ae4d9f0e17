//! Import identifier parsing
//!
//! | Kind   | Format                    |
//! |--------|---------------------------|
//! | Zone   | `<id>` or `<name>`        |
//! | Record | `<zoneId>/<recordId>`     |
//! | RRSet  | `<zoneId>/<name>/<type>`  |
//! | User   | `<id>`                    |
//!
//! Parsing never touches the network; malformed input is a validation error.

use crate::error::{Error, Result};
use crate::rrset::RRSetKey;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A zone addressed by id or by name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ZoneRef {
    Id(i64),
    Name(String),
}

/// Identity of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordId {
    pub zone_id: i64,
    pub record_id: i64,
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.zone_id, self.record_id)
    }
}

fn parse_int(part: &str, what: &str, input: &str) -> Result<i64> {
    part.trim().parse::<i64>().map_err(|_| {
        Error::validation(format!(
            "invalid {} '{}' in import id '{}': expected an integer",
            what, part, input
        ))
    })
}

/// `<id>` or `<name>`
pub fn parse_zone(input: &str) -> Result<ZoneRef> {
    let input = input.trim();
    if input.is_empty() {
        return Err(Error::validation("zone import id cannot be empty"));
    }
    Ok(match input.parse::<i64>() {
        Ok(id) => ZoneRef::Id(id),
        Err(_) => ZoneRef::Name(input.to_string()),
    })
}

/// `<zoneId>/<recordId>`
pub fn parse_record(input: &str) -> Result<RecordId> {
    let parts: Vec<&str> = input.split('/').collect();
    let [zone, record] = parts.as_slice() else {
        return Err(Error::validation(format!(
            "invalid record import id '{}': expected <zone_id>/<record_id>",
            input
        )));
    };
    Ok(RecordId {
        zone_id: parse_int(zone, "zone id", input)?,
        record_id: parse_int(record, "record id", input)?,
    })
}

/// `<zoneId>/<name>/<type>`
///
/// Split into at most three parts, so anything after the second `/` is the
/// type token.
pub fn parse_rrset(input: &str) -> Result<RRSetKey> {
    let parts: Vec<&str> = input.splitn(3, '/').collect();
    let [zone, name, rtype] = parts.as_slice() else {
        return Err(Error::validation(format!(
            "invalid rrset import id '{}': expected <zone_id>/<name>/<type>",
            input
        )));
    };
    if name.is_empty() || rtype.is_empty() {
        return Err(Error::validation(format!(
            "invalid rrset import id '{}': name and type cannot be empty",
            input
        )));
    }
    Ok(RRSetKey::new(parse_int(zone, "zone id", input)?, *name, *rtype))
}

/// `<id>`
pub fn parse_user(input: &str) -> Result<i64> {
    parse_int(input, "user id", input)
}
