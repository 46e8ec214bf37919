//! Instance check response parsing.

use super::error::QueryError;
use crate::flavor::Flavor;
use serde::Deserialize;

/// Body of a successful instance check.
#[derive(Debug, Deserialize)]
struct InstanceCheckResponse {
    flavor: Option<String>,
}

/// Extract the flavor from a 200 response body.
pub fn parse_check_response(body: &str) -> Result<Flavor, QueryError> {
    let response: InstanceCheckResponse =
        serde_json::from_str(body).map_err(|e| QueryError::ParseError(e.to_string()))?;
    tracing::debug!(?response, "Instance check response");

    let flavor = response
        .flavor
        .ok_or_else(|| QueryError::ParseError("missing 'flavor' field".to_string()))?;
    flavor
        .parse()
        .map_err(|_| QueryError::UnknownFlavor(flavor))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_payg() {
        assert_eq!(parse_check_response(r#"{"flavor":"PAYG"}"#).unwrap(), Flavor::Payg);
    }

    #[test]
    fn test_parse_ignores_extra_fields() {
        let body = r#"{"flavor":"BYOS","instance":"i-0123","registered":true}"#;
        assert_eq!(parse_check_response(body).unwrap(), Flavor::Byos);
    }

    #[test]
    fn test_parse_missing_flavor() {
        assert!(matches!(
            parse_check_response(r#"{"status":"ok"}"#),
            Err(QueryError::ParseError(_))
        ));
    }

    #[test]
    fn test_parse_unknown_flavor() {
        assert!(matches!(
            parse_check_response(r#"{"flavor":"amazing flavor"}"#),
            Err(QueryError::UnknownFlavor(f)) if f == "amazing flavor"
        ));
    }

    #[test]
    fn test_parse_invalid_json() {
        assert!(matches!(
            parse_check_response("<html>oops</html>"),
            Err(QueryError::ParseError(_))
        ));
    }
}
