use crate::errors::LoadError;

/// Bring a stored design body from `from` up to `to`.
///
/// Steps run one version at a time. Version 1 is the only format so far, so the body
/// passes through untouched when the versions agree.
pub fn migrate(
    design: serde_json::Value,
    from: u32,
    to: u32,
) -> Result<serde_json::Value, LoadError> {
    if from == to {
        return Ok(design);
    }
    Err(LoadError::MigrationFailed {
        from,
        to,
        reason: format!("no migration path from v{} to v{}", from, to),
    })
}
