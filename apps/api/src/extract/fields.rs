use serde_json::{Map, Value};

use super::ExtractError;

/// Checks that every name in `field_names` is present and holds a string.
///
/// Length budgets given to the model are not checked here.
pub fn validate_required_string_fields<'a>(
    object: &'a Map<String, Value>,
    field_names: &[&str],
) -> Result<&'a Map<String, Value>, ExtractError> {
    for &name in field_names {
        match object.get(name) {
            None => return Err(ExtractError::MissingField(name.to_string())),
            Some(Value::String(_)) => {}
            Some(_) => {
                return Err(ExtractError::WrongType {
                    field: name.to_string(),
                    expected: "string",
                })
            }
        }
    }
    Ok(object)
}
