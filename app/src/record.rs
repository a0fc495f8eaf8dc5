//! Reading a [`SplitRecord`] out of a fetched split object.

use collabsplit_gateway::ObjectResponse;
use collabsplit_types::{Address, BasisPoints, Mist, ObjectId, SplitRecord};
use serde_json::Value;

use crate::error::AppError;

/// Parse the Move fields `members`, `percentages` and `balance` of a split object.
///
/// Integers may arrive as JSON numbers or as decimal strings (the ledger
/// renders `u64` as strings).
pub fn parse_split_record(id: &ObjectId, response: &ObjectResponse) -> Result<SplitRecord, AppError> {
    if let Some(err) = response.error() {
        return Err(AppError::InvalidSplitObject(format!(
            "object {id} unavailable: {err}"
        )));
    }

    let fields = response
        .content()
        .and_then(|c| c.get("fields"))
        .ok_or_else(|| AppError::InvalidSplitObject(format!("object {id} has no content fields")))?;

    let members = array_field(fields, "members")?
        .iter()
        .map(|v| {
            v.as_str()
                .and_then(|s| Address::new(s).ok())
                .ok_or_else(|| invalid_field("members", v))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let percentages = array_field(fields, "percentages")?
        .iter()
        .map(|v| {
            as_u64(v)
                .map(BasisPoints::new)
                .ok_or_else(|| invalid_field("percentages", v))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if members.len() != percentages.len() {
        return Err(AppError::InvalidSplitObject(format!(
            "object {id} has {} members but {} percentages",
            members.len(),
            percentages.len()
        )));
    }

    let balance = fields
        .get("balance")
        .and_then(as_u64)
        .map(Mist::new)
        .ok_or_else(|| AppError::InvalidSplitObject("missing or invalid balance".into()))?;

    Ok(SplitRecord {
        id: id.clone(),
        members,
        percentages,
        balance,
    })
}

fn array_field<'a>(fields: &'a Value, name: &str) -> Result<&'a Vec<Value>, AppError> {
    fields
        .get(name)
        .and_then(Value::as_array)
        .ok_or_else(|| AppError::InvalidSplitObject(format!("missing array field {name}")))
}

fn as_u64(v: &Value) -> Option<u64> {
    v.as_u64().or_else(|| v.as_str()?.parse().ok())
}

fn invalid_field(name: &str, value: &Value) -> AppError {
    AppError::InvalidSplitObject(format!("invalid entry {value} in {name}"))
}
