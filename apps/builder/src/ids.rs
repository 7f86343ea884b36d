use uuid::Uuid;

/// Generates a collision-safe id of the form `{prefix}-{uuid}`.
pub fn generate_id(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4())
}
