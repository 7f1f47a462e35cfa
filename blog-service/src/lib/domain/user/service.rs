use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;

use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::Session;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for account operations.
///
/// Concrete implementation of UserServicePort with dependency injection.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Password hashing and session issuance
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    fn open_session(&self, user: User) -> Result<Session, UserError> {
        let token = self
            .authenticator
            .issue_token(user.id.0)
            .map_err(|e| UserError::TokenIssuance(e.to_string()))?;

        Ok(Session { user, token })
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterCommand) -> Result<Session, UserError> {
        if self
            .repository
            .find_by_telephone(&command.telephone)
            .await?
            .is_some()
        {
            return Err(UserError::TelephoneAlreadyExists(
                command.telephone.to_string(),
            ));
        }

        let password_hash = self
            .authenticator
            .hash_password(command.password.expose())
            .map_err(|e| UserError::PasswordHashing(e.to_string()))?;

        let user = self
            .repository
            .create(NewUser {
                name: command.name,
                telephone: command.telephone,
                password_hash,
            })
            .await?;

        tracing::info!(user_id = %user.id, "User registered");

        self.open_session(user)
    }

    async fn login(&self, command: LoginCommand) -> Result<Session, UserError> {
        let user = self
            .repository
            .find_by_telephone(&command.telephone)
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        let result = self
            .authenticator
            .authenticate(command.password.expose(), &user.password_hash, user.id.0)
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => UserError::InvalidCredentials,
                AuthenticationError::PasswordError(err) => {
                    UserError::PasswordHashing(err.to_string())
                }
                AuthenticationError::JwtError(err) => UserError::TokenIssuance(err.to_string()),
            })?;

        Ok(Session {
            user,
            token: result.access_token,
        })
    }

    async fn get_user(&self, id: UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use auth::CredentialSecret;
    use auth::PasswordCost;
    use auth::PasswordHasher;
    use chrono::Utc;
    use mockall::mock;

    use super::*;
    use crate::domain::user::models::Password;
    use crate::domain::user::models::Telephone;
    use crate::domain::user::models::UserName;

    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, user: NewUser) -> Result<User, UserError>;
            async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserError>;
            async fn find_by_telephone(&self, telephone: &Telephone) -> Result<Option<User>, UserError>;
        }
    }

    fn test_authenticator() -> Arc<Authenticator> {
        let secret = CredentialSecret::new("test-secret-key-for-jwt-signing-at-least-32-bytes")
            .unwrap();
        let hasher = PasswordHasher::with_cost(PasswordCost {
            memory_kib: 8,
            iterations: 1,
            parallelism: 1,
        })
        .unwrap();
        Arc::new(Authenticator::new(&secret).with_password_hasher(hasher))
    }

    fn stored_user(id: u64, password_hash: String) -> User {
        User {
            id: UserId(id),
            name: UserName::new("alice".to_string()).unwrap(),
            telephone: Telephone::new("13800138000".to_string()).unwrap(),
            password_hash,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn register_command() -> RegisterCommand {
        RegisterCommand {
            name: UserName::new("alice".to_string()).unwrap(),
            telephone: Telephone::new("13800138000".to_string()).unwrap(),
            password: Password::new("secret".to_string()).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_register_success() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_telephone()
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_create()
            .withf(|user| {
                user.telephone.as_str() == "13800138000"
                    && user.password_hash.starts_with("$argon2")
                    && user.password_hash != "secret"
            })
            .times(1)
            .returning(|user| Ok(stored_user(42, user.password_hash)));

        let authenticator = test_authenticator();
        let service = UserService::new(Arc::new(repository), Arc::clone(&authenticator));

        let session = service.register(register_command()).await.unwrap();
        assert_eq!(session.user.id, UserId(42));
        assert!(authenticator.verify_password("secret", &session.user.password_hash));

        let claims = authenticator.validate_token(&session.token).unwrap();
        assert_eq!(claims.user_id, 42);
    }

    #[tokio::test]
    async fn test_register_duplicate_telephone() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_telephone()
            .times(1)
            .returning(|_| Ok(Some(stored_user(1, "$argon2id$existing".to_string()))));
        repository.expect_create().times(0);

        let service = UserService::new(Arc::new(repository), test_authenticator());

        let result = service.register(register_command()).await;
        assert!(matches!(
            result.unwrap_err(),
            UserError::TelephoneAlreadyExists(_)
        ));
    }

    #[tokio::test]
    async fn test_login_success() {
        let authenticator = test_authenticator();
        let hash = authenticator.hash_password("secret").unwrap();

        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_telephone()
            .times(1)
            .returning(move |_| Ok(Some(stored_user(42, hash.clone()))));

        let service = UserService::new(Arc::new(repository), Arc::clone(&authenticator));

        let session = service
            .login(LoginCommand {
                telephone: Telephone::new("13800138000".to_string()).unwrap(),
                password: Password::new("secret".to_string()).unwrap(),
            })
            .await
            .unwrap();

        assert_eq!(session.token.split('.').count(), 3);
        assert_eq!(
            authenticator.validate_token(&session.token).unwrap().user_id,
            42
        );
    }

    #[tokio::test]
    async fn test_login_wrong_password_and_unknown_user_look_the_same() {
        let authenticator = test_authenticator();
        let hash = authenticator.hash_password("secret").unwrap();

        let mut known = MockTestUserRepository::new();
        known
            .expect_find_by_telephone()
            .returning(move |_| Ok(Some(stored_user(42, hash.clone()))));
        let mut unknown = MockTestUserRepository::new();
        unknown.expect_find_by_telephone().returning(|_| Ok(None));

        let command = || LoginCommand {
            telephone: Telephone::new("13800138000".to_string()).unwrap(),
            password: Password::new("not-the-secret".to_string()).unwrap(),
        };

        let wrong_password = UserService::new(Arc::new(known), Arc::clone(&authenticator))
            .login(command())
            .await
            .unwrap_err();
        let unknown_user = UserService::new(Arc::new(unknown), authenticator)
            .login(command())
            .await
            .unwrap_err();

        assert!(matches!(wrong_password, UserError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_user.to_string());
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = UserService::new(Arc::new(repository), test_authenticator());

        let result = service.get_user(UserId(7)).await;
        assert!(matches!(result.unwrap_err(), UserError::NotFound(_)));
    }
}
