//! Permission checks over verified claims.
//!
//! # Purpose
//! Decide whether a verified token grants access to a route. Routes carry a
//! static list of permission strings; the token carries a `permissions` claim
//! holding an array of granted strings.
//!
//! # Key invariants
//! - A token without a `permissions` claim is always rejected with 400, even
//!   on routes guarded by an empty list.
//! - The route check passes when ANY granted permission appears in the
//!   route's list. This means every permission attached to a path grants all
//!   of that path's methods; the original service shipped this containment
//!   direction and clients rely on it. Method-specific enforcement (delete
//!   guards) is done in handlers via [`has_permission`].
use crate::auth::error::AuthError;
use crate::auth::verify::VerifiedClaims;

/// Extract the `permissions` claim as a list of strings.
///
/// Non-string entries are skipped rather than failing the whole token.
fn granted_permissions(claims: &VerifiedClaims) -> Result<Vec<&str>, AuthError> {
    let granted = claims
        .0
        .get("permissions")
        .and_then(|value| value.as_array())
        .ok_or(AuthError::PermissionsAbsent)?;
    Ok(granted.iter().filter_map(|value| value.as_str()).collect())
}

/// Route-level check: any granted permission found in `required` passes.
pub fn check_permissions(required: &[&str], claims: &VerifiedClaims) -> Result<(), AuthError> {
    let granted = granted_permissions(claims)?;
    if granted.iter().any(|permission| required.contains(permission)) {
        return Ok(());
    }
    Err(AuthError::PermissionDenied)
}

/// Exact-match check used by handlers that guard a single method.
pub fn has_permission(claims: &VerifiedClaims, permission: &str) -> bool {
    granted_permissions(claims)
        .map(|granted| granted.contains(&permission))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn claims(value: serde_json::Value) -> VerifiedClaims {
        VerifiedClaims(value)
    }

    #[test]
    fn missing_permissions_claim_is_rejected() {
        let claims = claims(json!({"sub": "user-1"}));
        assert_eq!(
            check_permissions(&["get-owners"], &claims).unwrap_err(),
            AuthError::PermissionsAbsent
        );
        assert_eq!(
            check_permissions(&[], &claims).unwrap_err(),
            AuthError::PermissionsAbsent
        );
    }

    #[test]
    fn any_granted_permission_in_route_list_passes() {
        let claims = claims(json!({"permissions": ["get-owners"]}));
        assert!(check_permissions(&["get-owners", "post-owners"], &claims).is_ok());
    }

    #[test]
    fn read_permission_grants_the_whole_path_list() {
        // get-owners alone satisfies a list that also covers put/delete.
        let claims = claims(json!({"permissions": ["get-owners"]}));
        assert!(
            check_permissions(&["get-owners", "put-owners", "delete-owners"], &claims).is_ok()
        );
    }

    #[test]
    fn unrelated_permissions_are_denied() {
        let claims = claims(json!({"permissions": ["get-games"]}));
        assert_eq!(
            check_permissions(&["get-owners", "post-owners"], &claims).unwrap_err(),
            AuthError::PermissionDenied
        );
    }

    #[test]
    fn empty_grant_list_is_denied_not_absent() {
        let claims = claims(json!({"permissions": []}));
        assert_eq!(
            check_permissions(&["get-owners"], &claims).unwrap_err(),
            AuthError::PermissionDenied
        );
    }

    #[test]
    fn has_permission_is_exact_match() {
        let claims = claims(json!({"permissions": ["get-pets", "delete-pets"]}));
        assert!(has_permission(&claims, "delete-pets"));
        assert!(!has_permission(&claims, "delete-owners"));
    }

    #[test]
    fn has_permission_is_false_without_claim() {
        let claims = claims(json!({"sub": "user-1"}));
        assert!(!has_permission(&claims, "delete-pets"));
    }
}
