//! User domain types and the user collection.
//!
//! Users are constructed only from validated records whose active flag is
//! set, so every [`User`] in the pipeline is active by construction.
//! Inactive records are dropped at load time and never join a company.

use camino::Utf8Path;

use crate::error::{LoadError, Resource};
use crate::records::{UserRecord, parse_user_records, read_resource};

/// An active user loaded from the users dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Unique identifier for the user.
    pub id: i64,
    /// The user's first name.
    pub first_name: String,
    /// The user's last name.
    pub last_name: String,
    /// The user's email address.
    pub email: String,
    /// Identifier of the company the user belongs to.
    pub company_id: i64,
    /// Whether the user has opted in to email.
    pub email_enabled: bool,
    /// Token balance before any top up.
    pub tokens: i64,
}

impl User {
    fn from_record(record: UserRecord) -> Self {
        Self {
            id: record.id,
            first_name: record.first_name,
            last_name: record.last_name,
            email: record.email,
            company_id: record.company_id,
            email_enabled: record.email_status,
            tokens: record.tokens,
        }
    }
}

/// A user joined into a company, carrying the derived token balance.
///
/// The new balance is fixed at construction as the user's tokens plus the
/// company's top up, so an inconsistent balance cannot be represented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToppedUpUser {
    user: User,
    new_balance: i64,
}

impl ToppedUpUser {
    /// Wraps a user with the balance derived from the given top up.
    #[must_use]
    pub const fn new(user: User, top_up: i64) -> Self {
        let new_balance = user.tokens + top_up;
        Self { user, new_balance }
    }

    /// Returns the underlying user.
    #[must_use]
    pub const fn user(&self) -> &User {
        &self.user
    }

    /// Returns the token balance before the top up.
    #[must_use]
    pub const fn previous_balance(&self) -> i64 {
        self.user.tokens
    }

    /// Returns the token balance after the top up.
    #[must_use]
    pub const fn new_balance(&self) -> i64 {
        self.new_balance
    }
}

/// Collection of active users loaded from the users dataset.
///
/// The collection preserves load order internally; [`UserCollection::all`]
/// exposes a view sorted by last name.
///
/// # Example
///
/// ```
/// use topup_report::UserCollection;
///
/// let json = r#"[{
///     "id": 1,
///     "first_name": "Tanya",
///     "last_name": "Nichols",
///     "email": "tanya.nichols@test.com",
///     "company_id": 2,
///     "email_status": true,
///     "active_status": true,
///     "tokens": 23
/// }]"#;
///
/// let users = UserCollection::from_json(json).expect("valid users");
/// assert_eq!(users.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserCollection {
    users: Vec<User>,
}

impl UserCollection {
    /// Parses the users dataset from a JSON array string.
    ///
    /// Every record is validated before any filtering, so a malformed
    /// record aborts the load even when its active flag is unset. Records
    /// that validate but are inactive are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] if the JSON is malformed or any record is
    /// missing required fields.
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        let records = parse_user_records(json)?;
        let users = records
            .into_iter()
            .filter(|record| record.active_status)
            .map(User::from_record)
            .collect();

        Ok(Self { users })
    }

    /// Loads the users dataset from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] if the file cannot be read or parsed.
    pub fn load(path: &Utf8Path) -> Result<Self, LoadError> {
        let contents = read_resource(Resource::Users, path)?;
        Self::from_json(&contents)
    }

    /// Returns all users sorted by last name.
    ///
    /// The sort is stable, so users sharing a last name keep their load
    /// order.
    #[must_use]
    pub fn all(&self) -> Vec<&User> {
        let mut sorted: Vec<&User> = self.users.iter().collect();
        sorted.sort_by(|a, b| a.last_name.cmp(&b.last_name));
        sorted
    }

    /// Joins users into a company by identifier, applying its top up.
    ///
    /// Membership already implies the user is active, so the top up is
    /// added unconditionally. Matches are returned in load order; the
    /// company sorts them when it takes ownership.
    #[must_use]
    pub fn find_by_company(&self, company_id: i64, top_up: i64) -> Vec<ToppedUpUser> {
        self.users
            .iter()
            .filter(|user| user.company_id == company_id)
            .map(|user| ToppedUpUser::new(user.clone(), top_up))
            .collect()
    }

    /// Returns the number of users in the collection.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.users.len()
    }

    /// Returns `true` if the collection holds no users.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
