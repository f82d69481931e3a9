use gridbal_core::{Capability, GridbalError};

/// Collapse a set of provider errors into a uniform `GridbalError` outcome.
///
/// Rules:
/// - If `attempted_any` is false → `Unsupported(capability)`.
/// - If all errors are `ProviderTimeout` → `AllProvidersTimedOut(capability)`.
/// - If `not_found_what` is `Some` and all errors are `NotFound` → `NotFound(what)`.
/// - Else → `AllProvidersFailed(errors)`.
pub fn collapse_errors(
    capability: Capability,
    attempted_any: bool,
    errors: Vec<GridbalError>,
    not_found_what: Option<String>,
) -> GridbalError {
    if !attempted_any {
        return GridbalError::unsupported(capability.to_string());
    }
    if !errors.is_empty()
        && errors
            .iter()
            .all(|e| matches!(e, GridbalError::ProviderTimeout { .. }))
    {
        return GridbalError::AllProvidersTimedOut {
            capability: capability.to_string(),
        };
    }
    if let Some(what) = not_found_what
        && !errors.is_empty()
        && errors
            .iter()
            .all(|e| matches!(e, GridbalError::NotFound { .. }))
    {
        return GridbalError::not_found(what);
    }
    GridbalError::AllProvidersFailed(errors)
}
