use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::audit::auditor::Auditor;
use crate::domain::audit::models::AuditAction;
use crate::domain::audit::ports::AuditLogRepository;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserFilter;
use crate::domain::user::ports::UserRepository;
use crate::domain::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Role and status mutations write audit records through the audit log port.
pub struct UserService<UR, AR>
where
    UR: UserRepository,
    AR: AuditLogRepository,
{
    repository: Arc<UR>,
    audit_log: Arc<AR>,
}

impl<UR, AR> UserService<UR, AR>
where
    UR: UserRepository,
    AR: AuditLogRepository,
{
    /// Create a new user service with injected dependencies.
    pub fn new(repository: Arc<UR>, audit_log: Arc<AR>) -> Self {
        Self {
            repository,
            audit_log,
        }
    }
}

#[async_trait]
impl<UR, AR> UserServicePort for UserService<UR, AR>
where
    UR: UserRepository,
    AR: AuditLogRepository,
{
    async fn get_user(&self, email: &str) -> Result<User, UserError> {
        self.repository
            .find_by_email(email)
            .await?
            .ok_or(UserError::NotFound(email.to_string()))
    }

    async fn list_users(&self, filter: UserFilter) -> Result<Vec<User>, UserError> {
        self.repository.list(filter).await
    }

    async fn update_user(
        &self,
        email: &str,
        command: UpdateUserCommand,
        auditor: &Auditor,
    ) -> Result<User, UserError> {
        let mut user = self
            .repository
            .find_by_email(email)
            .await?
            .ok_or(UserError::NotFound(email.to_string()))?;

        let mut records = Vec::new();

        if let Some(new_role) = command.role {
            if new_role != user.role {
                records.push(auditor.record(AuditAction::UserRole {
                    from: user.role,
                    to: new_role,
                }));
                user.role = new_role;
            }
        }

        if let Some(new_status) = command.status {
            if new_status != user.status {
                records.push(auditor.record(AuditAction::UserStatus {
                    from: user.status,
                    to: new_status,
                }));
                user.status = new_status;
            }
        }

        if let Some(info) = command.info {
            user.info = Some(info);
        }

        user.updated = Utc::now();
        let updated_user = self.repository.update(user).await?;

        for record in records {
            if let Err(e) = self.audit_log.append(record).await {
                tracing::error!(
                    user = %updated_user.email,
                    "Failed to append audit record: {}",
                    e
                );
            }
        }

        Ok(updated_user)
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;

    use super::*;
    use crate::domain::audit::errors::AuditError;
    use crate::domain::audit::models::AuditRecord;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::Role;
    use crate::domain::user::models::UserId;
    use crate::domain::user::models::UserStatus;

    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn insert(&self, user: User) -> Result<User, UserError>;
            async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;
            async fn list(&self, filter: UserFilter) -> Result<Vec<User>, UserError>;
            async fn update(&self, user: User) -> Result<User, UserError>;
        }
    }

    mock! {
        pub TestAuditLog {}

        #[async_trait]
        impl AuditLogRepository for TestAuditLog {
            async fn append(&self, record: AuditRecord) -> Result<(), AuditError>;
            async fn list_recent(&self, limit: i64) -> Result<Vec<AuditRecord>, AuditError>;
        }
    }

    fn fixture_user(email: &str) -> User {
        User {
            id: UserId::new(),
            email: EmailAddress::new(email.to_string()).unwrap(),
            password_hash: Some("$argon2id$test_hash".to_string()),
            role: Role::Pending,
            status: UserStatus::Pending,
            info: None,
            created: Utc::now(),
            updated: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let mut repository = MockTestUserRepository::new();
        let audit_log = MockTestAuditLog::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));

        let service = UserService::new(Arc::new(repository), Arc::new(audit_log));

        let result = service.get_user("missing@test.com").await;
        assert!(matches!(result.unwrap_err(), UserError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_user_role_is_audited() {
        let mut repository = MockTestUserRepository::new();
        let mut audit_log = MockTestAuditLog::new();

        let user = fixture_user("attendee@test.com");
        let returned = user.clone();
        repository
            .expect_find_by_email()
            .withf(|email| email == "attendee@test.com")
            .times(1)
            .returning(move |_| Ok(Some(returned.clone())));
        repository
            .expect_update()
            .withf(|user| user.role == Role::Staff)
            .times(1)
            .returning(|user| Ok(user));

        audit_log
            .expect_append()
            .withf(|record| {
                record.kind == "role"
                    && record.user == "admin@test.com"
                    && record.data["from"] == "pending"
                    && record.data["to"] == "staff"
            })
            .times(1)
            .returning(|_| Ok(()));

        let service = UserService::new(Arc::new(repository), Arc::new(audit_log));
        let auditor = Auditor::new("admin@test.com");

        let command = UpdateUserCommand {
            role: Some(Role::Staff),
            status: None,
            info: None,
        };

        let updated = service
            .update_user("attendee@test.com", command, &auditor)
            .await
            .unwrap();
        assert_eq!(updated.role, Role::Staff);
    }

    #[tokio::test]
    async fn test_update_user_unchanged_role_not_audited() {
        let mut repository = MockTestUserRepository::new();
        let mut audit_log = MockTestAuditLog::new();

        let user = fixture_user("attendee@test.com");
        let returned = user.clone();
        repository
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(returned.clone())));
        repository
            .expect_update()
            .times(1)
            .returning(|user| Ok(user));

        audit_log.expect_append().times(0);

        let service = UserService::new(Arc::new(repository), Arc::new(audit_log));
        let auditor = Auditor::new("admin@test.com");

        let command = UpdateUserCommand {
            role: Some(Role::Pending),
            status: None,
            info: None,
        };

        let result = service
            .update_user("attendee@test.com", command, &auditor)
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_update_user_not_found() {
        let mut repository = MockTestUserRepository::new();
        let audit_log = MockTestAuditLog::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));

        let service = UserService::new(Arc::new(repository), Arc::new(audit_log));
        let auditor = Auditor::new("admin@test.com");

        let command = UpdateUserCommand {
            role: Some(Role::Staff),
            status: None,
            info: None,
        };

        let result = service
            .update_user("missing@test.com", command, &auditor)
            .await;
        assert!(matches!(result.unwrap_err(), UserError::NotFound(_)));
    }
}
