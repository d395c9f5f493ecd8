//! Company domain types and the company collection.
//!
//! Loading companies performs the join: each validated company record is
//! matched against the already-loaded user collection, and only companies
//! with at least one active user are kept. Companies own copies of their
//! joined users, sorted by last name at construction.

use camino::Utf8Path;

use crate::error::{LoadError, Resource};
use crate::records::{CompanyRecord, parse_company_records, read_resource};
use crate::users::{ToppedUpUser, UserCollection};

/// A company together with its joined active users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Company {
    id: i64,
    name: String,
    top_up: i64,
    email_enabled: bool,
    users: Vec<ToppedUpUser>,
}

impl Company {
    fn from_record(record: CompanyRecord, mut users: Vec<ToppedUpUser>) -> Self {
        users.sort_by(|a, b| a.user().last_name.cmp(&b.user().last_name));
        Self {
            id: record.id,
            name: record.name,
            top_up: record.top_up,
            email_enabled: record.email_status,
            users,
        }
    }

    /// Returns the company identifier.
    #[must_use]
    pub const fn id(&self) -> i64 {
        self.id
    }

    /// Returns the company name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the amount added to each joined user's token balance.
    #[must_use]
    pub const fn top_up(&self) -> i64 {
        self.top_up
    }

    /// Returns whether the company sends email at all.
    #[must_use]
    pub const fn email_enabled(&self) -> bool {
        self.email_enabled
    }

    /// Returns the joined users, sorted by last name.
    #[must_use]
    pub fn users(&self) -> &[ToppedUpUser] {
        &self.users
    }

    /// Returns the joined users who will be emailed.
    ///
    /// A user is emailed only when both the company and the user have
    /// email enabled. Order follows [`Company::users`].
    #[must_use]
    pub fn users_emailed(&self) -> Vec<&ToppedUpUser> {
        self.users
            .iter()
            .filter(|member| self.email_enabled && member.user().email_enabled)
            .collect()
    }

    /// Returns the joined users who will not be emailed.
    ///
    /// This is the exact complement of [`Company::users_emailed`], in the
    /// same order.
    #[must_use]
    pub fn users_not_emailed(&self) -> Vec<&ToppedUpUser> {
        self.users
            .iter()
            .filter(|member| !(self.email_enabled && member.user().email_enabled))
            .collect()
    }

    /// Returns the total amount of top ups for the company.
    ///
    /// The top up is granted once per joined user.
    #[must_use]
    pub fn total_top_up(&self) -> i64 {
        self.users.iter().map(|_| self.top_up).sum()
    }
}

/// Collection of companies joined with their active users.
///
/// Companies without a single qualifying user are dropped during the
/// load, so every company in the collection renders a non-empty block in
/// the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyCollection {
    companies: Vec<Company>,
}

impl CompanyCollection {
    /// Parses the companies dataset from a JSON array string and joins it
    /// against the given users.
    ///
    /// The user collection is an explicit parameter so that the load order
    /// between the two datasets is visible in the signature.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] if the JSON is malformed or any record is
    /// missing required fields.
    pub fn from_json(json: &str, users: &UserCollection) -> Result<Self, LoadError> {
        let records = parse_company_records(json)?;
        let companies = records
            .into_iter()
            .filter_map(|record| {
                let members = users.find_by_company(record.id, record.top_up);
                if members.is_empty() {
                    None
                } else {
                    Some(Company::from_record(record, members))
                }
            })
            .collect();

        Ok(Self { companies })
    }

    /// Loads the companies dataset from a JSON file and joins it against
    /// the given users.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] if the file cannot be read or parsed.
    pub fn load(path: &Utf8Path, users: &UserCollection) -> Result<Self, LoadError> {
        let contents = read_resource(Resource::Companies, path)?;
        Self::from_json(&contents, users)
    }

    /// Returns all companies sorted by ascending identifier.
    #[must_use]
    pub fn all(&self) -> Vec<&Company> {
        let mut sorted: Vec<&Company> = self.companies.iter().collect();
        sorted.sort_by_key(|company| company.id());
        sorted
    }

    /// Iterates over the companies in ascending identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &Company> {
        self.all().into_iter()
    }

    /// Returns the number of companies in the collection.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.companies.len()
    }

    /// Returns `true` if the collection holds no companies.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.companies.is_empty()
    }
}
