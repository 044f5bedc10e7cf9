//! Integration tests for the repository layer
//!
//! These tests drive the MySQL adapter directly and assert the outcome
//! resolution the HTTP layer depends on: rows-affected interpretation,
//! the existence probe on zero-rows-affected updates, and foreign-key
//! classification on refused deletes.

use sqlx::mysql::MySqlPool;

use teamdesk_api::config::IdMode;
use teamdesk_api::domain::repositories::{
    DeleteOutcome, StoreError, TeamRepository, UpdateOutcome,
};
use teamdesk_api::domain::team::{NewTeam, TeamPatch};
use teamdesk_api::infrastructure::repositories::MySqlTeamRepository;
use teamdesk_api::infrastructure::store::{IdAllocator, StoreGateway};

/// Set up test database connection and make sure the schema exists
async fn setup_test_db() -> MySqlPool {
    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for integration tests");

    let pool = MySqlPool::connect(&database_url)
        .await
        .expect("Failed to connect to test database");

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS teams (
            team_id BIGINT NOT NULL AUTO_INCREMENT,
            team_name VARCHAR(255) NOT NULL,
            region VARCHAR(255) NOT NULL,
            PRIMARY KEY (team_id)
        )",
    )
    .execute(&pool)
    .await
    .expect("Failed to create teams table");

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS players (
            player_id BIGINT NOT NULL AUTO_INCREMENT,
            player_name VARCHAR(255) NOT NULL,
            team_id BIGINT NOT NULL,
            PRIMARY KEY (player_id),
            CONSTRAINT fk_players_team FOREIGN KEY (team_id) REFERENCES teams (team_id)
        )",
    )
    .execute(&pool)
    .await
    .expect("Failed to create players table");

    pool
}

fn new_team(name: &str, region: &str) -> NewTeam {
    NewTeam::new(Some(name.to_string()), Some(region.to_string())).expect("valid team")
}

async fn cleanup_team(pool: &MySqlPool, team_id: i64) {
    sqlx::query("DELETE FROM players WHERE team_id = ?")
        .bind(team_id)
        .execute(pool)
        .await
        .expect("Failed to cleanup players");
    sqlx::query("DELETE FROM teams WHERE team_id = ?")
        .bind(team_id)
        .execute(pool)
        .await
        .expect("Failed to cleanup team");
}

#[tokio::test]
async fn test_insert_and_find_round_trip() {
    let pool = setup_test_db().await;
    let repo = MySqlTeamRepository::new(pool.clone(), IdMode::StoreAssigned);

    let team = repo
        .insert(new_team("Repo Alpha", "NA"))
        .await
        .expect("insert succeeds");
    assert!(team.team_id >= 1);

    let found = repo
        .find_by_id(team.team_id)
        .await
        .expect("find succeeds")
        .expect("team exists");
    assert_eq!(found, team);

    cleanup_team(&pool, team.team_id).await;
}

#[tokio::test]
async fn test_find_missing_team_is_none() {
    let pool = setup_test_db().await;
    let repo = MySqlTeamRepository::new(pool, IdMode::StoreAssigned);

    let found = repo.find_by_id(999999999).await.expect("find succeeds");
    assert!(found.is_none());
}

#[tokio::test]
async fn test_update_resolves_all_three_outcomes() {
    let pool = setup_test_db().await;
    let repo = MySqlTeamRepository::new(pool.clone(), IdMode::StoreAssigned);

    let team = repo
        .insert(new_team("Repo Bravo", "NA"))
        .await
        .expect("insert succeeds");

    // Changed values: Updated
    let outcome = repo
        .update(
            team.team_id,
            TeamPatch::new(None, Some("EU".to_string())).unwrap(),
        )
        .await
        .expect("update succeeds");
    assert_eq!(outcome, UpdateOutcome::Updated);

    // Identical values: zero rows affected, probe finds the row
    let outcome = repo
        .update(
            team.team_id,
            TeamPatch::new(None, Some("EU".to_string())).unwrap(),
        )
        .await
        .expect("update succeeds");
    assert_eq!(outcome, UpdateOutcome::NoChange);

    // Missing row: zero rows affected, probe finds nothing
    let outcome = repo
        .update(
            999999999,
            TeamPatch::new(None, Some("EU".to_string())).unwrap(),
        )
        .await
        .expect("update succeeds");
    assert_eq!(outcome, UpdateOutcome::NotFound);

    cleanup_team(&pool, team.team_id).await;
}

#[tokio::test]
async fn test_partial_update_leaves_other_fields() {
    let pool = setup_test_db().await;
    let repo = MySqlTeamRepository::new(pool.clone(), IdMode::StoreAssigned);

    let team = repo
        .insert(new_team("Repo Charlie", "NA"))
        .await
        .expect("insert succeeds");

    repo.update(
        team.team_id,
        TeamPatch::new(None, Some("APAC".to_string())).unwrap(),
    )
    .await
    .expect("update succeeds");

    let found = repo
        .find_by_id(team.team_id)
        .await
        .expect("find succeeds")
        .expect("team exists");
    assert_eq!(found.team_name, "Repo Charlie");
    assert_eq!(found.region, "APAC");

    cleanup_team(&pool, team.team_id).await;
}

#[tokio::test]
async fn test_delete_outcomes() {
    let pool = setup_test_db().await;
    let repo = MySqlTeamRepository::new(pool.clone(), IdMode::StoreAssigned);

    let team = repo
        .insert(new_team("Repo Delta", "EU"))
        .await
        .expect("insert succeeds");

    let outcome = repo.delete(team.team_id).await.expect("delete succeeds");
    assert_eq!(outcome, DeleteOutcome::Deleted);

    let outcome = repo.delete(team.team_id).await.expect("delete succeeds");
    assert_eq!(outcome, DeleteOutcome::NotFound);

    assert!(repo
        .find_by_id(team.team_id)
        .await
        .expect("find succeeds")
        .is_none());
}

#[tokio::test]
async fn test_delete_referenced_team_classifies_foreign_key() {
    let pool = setup_test_db().await;
    let repo = MySqlTeamRepository::new(pool.clone(), IdMode::StoreAssigned);

    let team = repo
        .insert(new_team("Repo Echo", "NA"))
        .await
        .expect("insert succeeds");

    sqlx::query("INSERT INTO players (player_name, team_id) VALUES (?, ?)")
        .bind("Blocking Player")
        .bind(team.team_id)
        .execute(&pool)
        .await
        .expect("Failed to insert referencing player");

    let result = repo.delete(team.team_id).await;
    assert!(matches!(result, Err(StoreError::ForeignKey(_))));

    // The refused delete must leave the row in place
    assert!(repo
        .find_by_id(team.team_id)
        .await
        .expect("find succeeds")
        .is_some());

    cleanup_team(&pool, team.team_id).await;
}

#[tokio::test]
async fn test_legacy_insert_uses_allocated_id() {
    let pool = setup_test_db().await;
    let repo = MySqlTeamRepository::new(pool.clone(), IdMode::MaxPlusOne);

    let team = repo
        .insert(new_team("Repo Foxtrot", "EU"))
        .await
        .expect("insert succeeds");

    let found = repo
        .find_by_id(team.team_id)
        .await
        .expect("find succeeds")
        .expect("team exists");
    assert_eq!(found.team_name, "Repo Foxtrot");

    cleanup_team(&pool, team.team_id).await;
}

#[tokio::test]
async fn test_allocator_advances_past_existing_ids() {
    let pool = setup_test_db().await;
    let repo = MySqlTeamRepository::new(pool.clone(), IdMode::StoreAssigned);

    let team = repo
        .insert(new_team("Repo Golf", "NA"))
        .await
        .expect("insert succeeds");

    let allocator = IdAllocator::new(StoreGateway::new(pool.clone()));
    let next = allocator
        .next_id("teams", "team_id")
        .await
        .expect("allocation succeeds");
    assert!(next > team.team_id);

    cleanup_team(&pool, team.team_id).await;
}
