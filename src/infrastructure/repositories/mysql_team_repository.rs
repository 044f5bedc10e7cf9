use async_trait::async_trait;
use sqlx::mysql::{MySql, MySqlPool};
use sqlx::QueryBuilder;

use crate::config::IdMode;
use crate::domain::repositories::{DeleteOutcome, StoreError, TeamRepository, UpdateOutcome};
use crate::domain::team::{NewTeam, Team, TeamPatch};
use crate::infrastructure::store::{IdAllocator, StoreGateway};

/// MySQL implementation of TeamRepository
///
/// Issues one parameterized statement per gateway call and resolves
/// rows-affected ambiguity with an existence probe. Identifier assignment
/// follows the configured [`IdMode`].
pub struct MySqlTeamRepository {
    gateway: StoreGateway,
    id_mode: IdMode,
}

impl MySqlTeamRepository {
    pub fn new(pool: MySqlPool, id_mode: IdMode) -> Self {
        Self {
            gateway: StoreGateway::new(pool),
            id_mode,
        }
    }

    async fn exists(&self, id: i64) -> Result<bool, StoreError> {
        let probe: Option<(i64,)> = self
            .gateway
            .fetch_optional(
                sqlx::query_as("SELECT team_id FROM teams WHERE team_id = ?").bind(id),
            )
            .await?;

        Ok(probe.is_some())
    }
}

#[async_trait]
impl TeamRepository for MySqlTeamRepository {
    async fn insert(&self, new_team: NewTeam) -> Result<Team, StoreError> {
        let team_id = match self.id_mode {
            IdMode::StoreAssigned => {
                let report = self
                    .gateway
                    .execute(
                        sqlx::query("INSERT INTO teams (team_name, region) VALUES (?, ?)")
                            .bind(&new_team.team_name)
                            .bind(&new_team.region),
                    )
                    .await?;

                report.last_insert_id as i64
            }
            IdMode::MaxPlusOne => {
                // Allocation failure is an internal error, distinct from a
                // failure of the insert itself.
                let allocator = IdAllocator::new(self.gateway.clone());
                let team_id = allocator
                    .next_id("teams", "team_id")
                    .await
                    .map_err(|err| {
                        StoreError::Internal(format!("Failed to calculate new team ID: {err}"))
                    })?;

                self.gateway
                    .execute(
                        sqlx::query(
                            "INSERT INTO teams (team_id, team_name, region) VALUES (?, ?, ?)",
                        )
                        .bind(team_id)
                        .bind(&new_team.team_name)
                        .bind(&new_team.region),
                    )
                    .await?;

                team_id
            }
        };

        Ok(Team {
            team_id,
            team_name: new_team.team_name,
            region: new_team.region,
        })
    }

    async fn list(&self) -> Result<Vec<Team>, StoreError> {
        self.gateway
            .fetch_all(sqlx::query_as(
                "SELECT team_id, team_name, region FROM teams ORDER BY team_id",
            ))
            .await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Team>, StoreError> {
        self.gateway
            .fetch_optional(
                sqlx::query_as("SELECT team_id, team_name, region FROM teams WHERE team_id = ?")
                    .bind(id),
            )
            .await
    }

    async fn update(&self, id: i64, patch: TeamPatch) -> Result<UpdateOutcome, StoreError> {
        let mut builder: QueryBuilder<MySql> = QueryBuilder::new("UPDATE teams SET ");
        {
            let mut fields = builder.separated(", ");
            if let Some(team_name) = patch.team_name {
                fields.push("team_name = ").push_bind_unseparated(team_name);
            }
            if let Some(region) = patch.region {
                fields.push("region = ").push_bind_unseparated(region);
            }
        }
        builder.push(" WHERE team_id = ").push_bind(id);

        let report = self.gateway.execute(builder.build()).await?;

        if report.rows_affected > 0 {
            return Ok(UpdateOutcome::Updated);
        }

        // Zero rows affected is ambiguous: the row may be missing, or it may
        // already hold the supplied values. The probe decides; the count
        // alone never does.
        if self.exists(id).await? {
            Ok(UpdateOutcome::NoChange)
        } else {
            Ok(UpdateOutcome::NotFound)
        }
    }

    async fn delete(&self, id: i64) -> Result<DeleteOutcome, StoreError> {
        let report = self
            .gateway
            .execute(sqlx::query("DELETE FROM teams WHERE team_id = ?").bind(id))
            .await?;

        if report.rows_affected == 0 {
            Ok(DeleteOutcome::NotFound)
        } else {
            Ok(DeleteOutcome::Deleted)
        }
    }
}
