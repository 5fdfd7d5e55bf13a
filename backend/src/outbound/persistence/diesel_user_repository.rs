//! PostgreSQL-backed [`UserRepository`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{DisplayName, EmailAddress, PasswordHash, User, UserAccount, UserId};

use super::diesel_basic_error_mapping::{
    is_unique_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel implementation of the credential store.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    map_basic_pool_error(error, UserPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    if is_unique_violation(&error) {
        return UserPersistenceError::duplicate_email();
    }
    map_basic_diesel_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

fn row_to_account(row: UserRow) -> Result<UserAccount, UserPersistenceError> {
    let invalid = |err| UserPersistenceError::query(format!("stored user is invalid: {err}"));
    let email = EmailAddress::new(row.email).map_err(invalid)?;
    // Blank names were never written by registration; treat them as absent.
    let display_name = row.name.and_then(|name| DisplayName::new(name).ok());
    let password_hash = PasswordHash::new(row.password_hash).map_err(invalid)?;
    let user = User::new(UserId::from_uuid(row.id), email, display_name);
    Ok(UserAccount::new(user, password_hash))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserAccount>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<UserRow> = users::table
            .filter(users::email.eq(email.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_account).transpose()
    }

    async fn insert(&self, account: &UserAccount) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let user = account.user();
        let row = NewUserRow {
            id: *user.id().as_uuid(),
            email: user.email().as_ref(),
            name: user.display_name().map(AsRef::as_ref),
            password_hash: account.password_hash().as_str(),
        };
        diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::result::{DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;
    use uuid::Uuid;

    fn row(name: Option<&str>) -> UserRow {
        UserRow {
            id: Uuid::new_v4(),
            email: "a@x.com".to_owned(),
            name: name.map(str::to_owned),
            password_hash: "$2b$10$hash".to_owned(),
        }
    }

    #[rstest]
    fn unique_violation_maps_to_duplicate_email() {
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new(String::from("users_email_key")),
        );
        assert_eq!(map_diesel_error(error), UserPersistenceError::DuplicateEmail);
    }

    #[rstest]
    #[case(Some("Ada"), Some("Ada"))]
    #[case(Some("  "), None)]
    #[case(None, None)]
    fn row_conversion_keeps_optional_name(
        #[case] stored: Option<&str>,
        #[case] expected: Option<&str>,
    ) {
        let account = row_to_account(row(stored)).expect("valid row");
        assert_eq!(
            account.user().display_name().map(AsRef::as_ref),
            expected
        );
        assert_eq!(account.password_hash().as_str(), "$2b$10$hash");
    }

    #[rstest]
    fn empty_hash_is_rejected() {
        let mut bad = row(None);
        bad.password_hash.clear();
        assert!(matches!(
            row_to_account(bad),
            Err(UserPersistenceError::Query { .. })
        ));
    }
}
