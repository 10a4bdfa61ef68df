//! Shape checks for the homework statuses payload.

use serde_json::Value;
use tracing::debug;

use crate::error::RelayError;

/// Validates an API payload and returns its homework records in order.
///
/// The payload must be an object with a `current_date` key and a
/// `homeworks` array. Records are returned as-is; their fields are checked
/// later by [`crate::homework::parse_status`].
///
/// # Errors
///
/// Returns [`RelayError::MalformedResponse`] for any other shape.
pub fn check_response(response: &Value) -> Result<Vec<Value>, RelayError> {
    debug!("Checking API response shape");

    let Some(body) = response.as_object() else {
        return Err(RelayError::MalformedResponse(format!(
            "response is not an object: response = {response}"
        )));
    };

    let Some(homeworks) = body.get("homeworks") else {
        return Err(RelayError::MalformedResponse(format!(
            "missing required key \"homeworks\": response = {response}"
        )));
    };

    if !body.contains_key("current_date") {
        return Err(RelayError::MalformedResponse(format!(
            "missing required key \"current_date\": response = {response}"
        )));
    }

    if homeworks.is_object() {
        return Err(RelayError::MalformedResponse(format!(
            "\"homeworks\" is a mapping, expected a list: response = {response}"
        )));
    }

    let Some(list) = homeworks.as_array() else {
        return Err(RelayError::MalformedResponse(format!(
            "\"homeworks\" is not a list: response = {response}"
        )));
    };

    Ok(list.clone())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_valid_response_keeps_order() {
        let response = json!({
            "homeworks": [
                {"homework_name": "a", "status": "approved"},
                {"homework_name": "b", "status": "rejected"}
            ],
            "current_date": 1000
        });

        let homeworks = check_response(&response).unwrap();
        assert_eq!(homeworks.len(), 2);
        assert_eq!(homeworks[0]["homework_name"], "a");
        assert_eq!(homeworks[1]["homework_name"], "b");
    }

    #[test]
    fn test_empty_list_is_valid() {
        let response = json!({"homeworks": [], "current_date": 1000});
        assert!(check_response(&response).unwrap().is_empty());
    }

    #[test]
    fn test_missing_homeworks() {
        let response = json!({"current_date": 1000});
        let err = check_response(&response).unwrap_err();
        assert!(matches!(err, RelayError::MalformedResponse(_)));
        assert!(err.to_string().contains("homeworks"));
    }

    #[test]
    fn test_missing_current_date() {
        let response = json!({"homeworks": []});
        let err = check_response(&response).unwrap_err();
        assert!(err.to_string().contains("current_date"));
    }

    #[test]
    fn test_homeworks_not_a_list() {
        for homeworks in [json!({"homework_name": "a"}), json!("a"), json!(1), json!(null)] {
            let response = json!({"homeworks": homeworks, "current_date": 1000});
            assert!(matches!(
                check_response(&response),
                Err(RelayError::MalformedResponse(_))
            ));
        }
    }

    #[test]
    fn test_response_not_an_object() {
        let response = json!([{"homework_name": "a"}]);
        assert!(matches!(
            check_response(&response),
            Err(RelayError::MalformedResponse(_))
        ));
    }
}
