use sqlx::SqlitePool;
use storage::{
    dto::participant::{
        CreateParticipantRequest, ParticipantDetailResponse, UpdateParticipantRequest,
    },
    models::Participant,
    repository::participant::ParticipantRepository,
};

use crate::error::{ServiceError, ServiceResult};
use crate::features::rules::{clearable_text, normalize_email, optional_text, required_text};

/// List all participants
pub async fn list_participants(pool: &SqlitePool) -> ServiceResult<Vec<Participant>> {
    let repo = ParticipantRepository::new(pool);
    Ok(repo.list().await?)
}

/// Get participant by ID
pub async fn get_participant(pool: &SqlitePool, id: i64) -> ServiceResult<Participant> {
    let repo = ParticipantRepository::new(pool);
    Ok(repo.find_by_id(id).await?)
}

/// Get participant with the events they are registered for
pub async fn get_participant_detailed(
    pool: &SqlitePool,
    id: i64,
) -> ServiceResult<ParticipantDetailResponse> {
    let repo = ParticipantRepository::new(pool);
    Ok(repo.find_by_id_detailed(id).await?)
}

/// Create a new participant with a unique email
pub async fn create_participant(
    pool: &SqlitePool,
    request: &CreateParticipantRequest,
) -> ServiceResult<Participant> {
    let repo = ParticipantRepository::new(pool);

    let first_name = required_text(&request.first_name, "First name is required")?;
    let last_name = required_text(&request.last_name, "Last name is required")?;
    let email = normalize_email(&request.email, "Email is required")?;

    if repo.find_by_email(&email).await?.is_some() {
        return Err(ServiceError::validation(format!(
            "A participant with email '{}' already exists",
            email
        )));
    }

    let cleaned = CreateParticipantRequest {
        first_name,
        last_name,
        email,
        phone: optional_text(request.phone.as_deref()),
    };

    Ok(repo.create(&cleaned).await?)
}

/// Update a participant. Only the supplied fields are checked and changed.
pub async fn update_participant(
    pool: &SqlitePool,
    id: i64,
    request: &UpdateParticipantRequest,
) -> ServiceResult<Participant> {
    let repo = ParticipantRepository::new(pool);
    let existing = repo.find_by_id(id).await?;

    let first_name = request
        .first_name
        .as_deref()
        .map(|v| required_text(v, "First name cannot be empty"))
        .transpose()?;
    let last_name = request
        .last_name
        .as_deref()
        .map(|v| required_text(v, "Last name cannot be empty"))
        .transpose()?;

    let email = match request.email.as_deref() {
        Some(email) => {
            let email = normalize_email(email, "Email cannot be empty")?;
            if let Some(other) = repo.find_by_email(&email).await? {
                if other.participant_id != id {
                    return Err(ServiceError::validation(format!(
                        "Another participant with email '{}' already exists",
                        email
                    )));
                }
            }
            Some(email)
        }
        None => None,
    };

    let cleaned = UpdateParticipantRequest {
        first_name,
        last_name,
        email,
        phone: clearable_text(request.phone.as_deref()),
    };

    Ok(repo.update(id, &existing, &cleaned).await?)
}

/// Delete a participant along with their registrations
pub async fn delete_participant(pool: &SqlitePool, id: i64) -> ServiceResult<()> {
    let repo = ParticipantRepository::new(pool);
    let participant = repo.find_by_id(id).await?;

    repo.delete(participant.participant_id).await?;
    tracing::info!(participant_id = id, "Deleted participant {}", participant.full_name());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::{Database, error::StorageError};

    fn participant_request(first: &str, last: &str, email: &str) -> CreateParticipantRequest {
        CreateParticipantRequest {
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: email.to_string(),
            phone: None,
        }
    }

    #[tokio::test]
    async fn test_create_participant_normalizes_fields() {
        let db = Database::in_memory().await.unwrap();

        let participant = create_participant(
            db.pool(),
            &CreateParticipantRequest {
                phone: Some("  555-0100 ".to_string()),
                ..participant_request(" Ana ", " Lee ", "  Ana@X.com ")
            },
        )
        .await
        .unwrap();

        assert_eq!(participant.first_name, "Ana");
        assert_eq!(participant.last_name, "Lee");
        assert_eq!(participant.email, "ana@x.com");
        assert_eq!(participant.phone.as_deref(), Some("555-0100"));
    }

    #[tokio::test]
    async fn test_create_participant_requires_names_and_email() {
        let db = Database::in_memory().await.unwrap();

        let cases = [
            participant_request(" ", "Lee", "ana@x.com"),
            participant_request("Ana", "", "ana@x.com"),
            participant_request("Ana", "Lee", "  "),
        ];

        for request in cases {
            let err = create_participant(db.pool(), &request).await.unwrap_err();
            assert!(matches!(err, ServiceError::Validation(_)));
        }
    }

    #[tokio::test]
    async fn test_create_participant_rejects_email_without_at() {
        let db = Database::in_memory().await.unwrap();

        let err = create_participant(db.pool(), &participant_request("Ana", "Lee", "ana.x.com"))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Email is not a valid address");
    }

    #[tokio::test]
    async fn test_create_participant_rejects_duplicate_email() {
        let db = Database::in_memory().await.unwrap();

        create_participant(db.pool(), &participant_request("Ana", "Lee", "ana@x.com"))
            .await
            .unwrap();
        let err = create_participant(db.pool(), &participant_request("Ann", "Lee", "ANA@x.com"))
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::Validation(_)));
        assert_eq!(list_participants(db.pool()).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_participant_email_uniqueness_excludes_self() {
        let db = Database::in_memory().await.unwrap();
        let ana = create_participant(db.pool(), &participant_request("Ana", "Lee", "ana@x.com"))
            .await
            .unwrap();
        create_participant(db.pool(), &participant_request("Bo", "Kim", "bo@x.com"))
            .await
            .unwrap();

        let same = update_participant(
            db.pool(),
            ana.participant_id,
            &UpdateParticipantRequest {
                email: Some("ana@x.com".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(same.email, "ana@x.com");

        let err = update_participant(
            db.pool(),
            ana.participant_id,
            &UpdateParticipantRequest {
                email: Some("bo@x.com".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn test_update_participant_partial_fields() {
        let db = Database::in_memory().await.unwrap();
        let ana = create_participant(db.pool(), &participant_request("Ana", "Lee", "ana@x.com"))
            .await
            .unwrap();

        let updated = update_participant(
            db.pool(),
            ana.participant_id,
            &UpdateParticipantRequest {
                last_name: Some("  Park ".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(updated.first_name, "Ana");
        assert_eq!(updated.last_name, "Park");

        let err = update_participant(
            db.pool(),
            ana.participant_id,
            &UpdateParticipantRequest {
                first_name: Some(" ".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn test_delete_participant() {
        let db = Database::in_memory().await.unwrap();
        let ana = create_participant(db.pool(), &participant_request("Ana", "Lee", "ana@x.com"))
            .await
            .unwrap();

        delete_participant(db.pool(), ana.participant_id).await.unwrap();

        let err = delete_participant(db.pool(), ana.participant_id)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Storage(StorageError::NotFound)));
    }
}
