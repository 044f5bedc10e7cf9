use serde::{Deserialize, Serialize};

/// A persisted team record
///
/// `team_id` is immutable once assigned; updates only ever touch
/// `team_name` and `region`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Team {
    pub team_id: i64,
    pub team_name: String,
    pub region: String,
}

/// Validated input for creating a team
///
/// # Invariants
/// - `team_name` must be present and non-empty
/// - `region` must be present and non-empty
#[derive(Debug, Clone)]
pub struct NewTeam {
    pub team_name: String,
    pub region: String,
}

impl NewTeam {
    /// Builds a `NewTeam` from the raw request fields.
    ///
    /// Returns an error message suitable for a 400 response when either
    /// field is absent or empty. Validation happens here so an invalid
    /// create never reaches the store.
    pub fn new(team_name: Option<String>, region: Option<String>) -> Result<Self, String> {
        let team_name = team_name.unwrap_or_default();
        let region = region.unwrap_or_default();

        if team_name.is_empty() || region.is_empty() {
            return Err(
                "Missing required fields: team_name and region are required.".to_string(),
            );
        }

        Ok(Self { team_name, region })
    }
}

/// Validated field-level partial update for a team
///
/// Carries only the fields the client supplied; an omitted field is never
/// written back. At least one field must be present.
#[derive(Debug, Clone)]
pub struct TeamPatch {
    pub team_name: Option<String>,
    pub region: Option<String>,
}

impl TeamPatch {
    /// Builds a `TeamPatch` from the raw request fields.
    ///
    /// Returns an error message suitable for a 400 response when no
    /// recognized field is supplied, or when a supplied field is empty.
    pub fn new(team_name: Option<String>, region: Option<String>) -> Result<Self, String> {
        if team_name.is_none() && region.is_none() {
            return Err(
                "No valid fields provided for update. Must include team_name or region."
                    .to_string(),
            );
        }

        if team_name.as_deref() == Some("") || region.as_deref() == Some("") {
            return Err("Updated fields must not be empty.".to_string());
        }

        Ok(Self { team_name, region })
    }
}
