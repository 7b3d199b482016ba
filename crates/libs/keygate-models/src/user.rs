//! User credential records.
//!
//! The credential store owns user identity and the salted password hash.
//! Records are immutable once created; there are no update or delete
//! operations. Username uniqueness is enforced by a unique index, so
//! "check existence then create" is atomic at the storage layer.

use crate::prelude::*;
use crate::{db::connection::DbConnection, schema::users::dsl::*};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::result::DatabaseErrorKind;
use uuid::Uuid;

/// A registered user.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable, PartialEq)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    /// Unique user ID.
    pub id: Uuid,
    /// Unique username (case-sensitive).
    pub username: String,
    /// Salted password hash in PHC string format. Never the plaintext.
    pub hash: String,
    /// Version of the hashing scheme used for `hash`.
    pub hash_version: i32,
    /// When this user registered.
    pub created_at: DateTime<Utc>,
}

/// Data for creating a new user.
#[derive(Insertable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::users)]
pub struct UserCreate {
    /// The requested username.
    pub username: String,
    /// Pre-computed password hash.
    pub hash: String,
    /// Version of the hashing scheme.
    pub hash_version: i32,
}

impl UserCreate {
    /// Creates a new user creation request with the current hash scheme.
    pub fn new(name: String, password_hash: String) -> Self {
        Self {
            username: name,
            hash: password_hash,
            hash_version: 1,
        }
    }

    /// Inserts the user, relying on the unique index for atomicity.
    ///
    /// A concurrent insert with the same username fails with
    /// [`Error::UniqueViolation`] instead of overwriting; the row is
    /// either fully committed or not committed at all.
    pub fn create(self, connection: &DbConnection) -> Result<User> {
        let conn = &mut connection.pool.get()?;

        match diesel::insert_into(users)
            .values(self)
            .returning(User::as_returning())
            .get_result(conn)
        {
            Err(diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
                Err(Error::UniqueViolation)
            }
            other => Ok(other?),
        }
    }
}

impl User {
    /// Fetches a user by exact username match.
    ///
    /// Returns `Ok(None)` when no such user exists; only infrastructure
    /// failures surface as errors.
    pub fn fetch_by_username(target: &str, connection: &DbConnection) -> Result<Option<Self>> {
        let conn = &mut connection.pool.get()?;

        Ok(User::by_username(target)
            .select(User::as_select())
            .get_result(conn)
            .optional()?)
    }

    /// Returns a query filtered by username.
    #[diesel::dsl::auto_type(no_type_alias)]
    pub fn by_username(target: &str) -> _ {
        crate::schema::users::dsl::users.filter(username.eq(target))
    }
}
