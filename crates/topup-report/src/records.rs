//! JSON record parsing and presence validation for the input datasets.
//!
//! Raw records deserialize with every field optional so that a record with
//! absent fields still parses and can be inspected. A per-record presence
//! check then reports every missing field at once rather than just the
//! first. Type mismatches fail JSON deserialization of the whole array and
//! surface as [`LoadError::InvalidJson`].

use camino::Utf8Path;
use cap_std::{ambient_authority, fs::Dir};
use serde::Deserialize;

use crate::error::{LoadError, Resource};

/// Raw JSON representation of a user record.
#[derive(Debug, Deserialize)]
struct RawUserRecord {
    id: Option<i64>,
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
    company_id: Option<i64>,
    email_status: Option<bool>,
    active_status: Option<bool>,
    tokens: Option<i64>,
}

/// Validated user record with every required field present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct UserRecord {
    pub(crate) id: i64,
    pub(crate) first_name: String,
    pub(crate) last_name: String,
    pub(crate) email: String,
    pub(crate) company_id: i64,
    pub(crate) email_status: bool,
    pub(crate) active_status: bool,
    pub(crate) tokens: i64,
}

/// Raw JSON representation of a company record.
#[derive(Debug, Deserialize)]
struct RawCompanyRecord {
    id: Option<i64>,
    name: Option<String>,
    top_up: Option<i64>,
    email_status: Option<bool>,
}

/// Validated company record with every required field present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CompanyRecord {
    pub(crate) id: i64,
    pub(crate) name: String,
    pub(crate) top_up: i64,
    pub(crate) email_status: bool,
}

/// Records an absent value's field name and passes the value through.
fn require<T>(value: Option<T>, name: &'static str, missing: &mut Vec<&'static str>) -> Option<T> {
    if value.is_none() {
        missing.push(name);
    }
    value
}

impl RawUserRecord {
    fn validate(self, index: usize) -> Result<UserRecord, LoadError> {
        let mut missing = Vec::new();
        match (
            require(self.id, "id", &mut missing),
            require(self.first_name, "first_name", &mut missing),
            require(self.last_name, "last_name", &mut missing),
            require(self.email, "email", &mut missing),
            require(self.company_id, "company_id", &mut missing),
            require(self.email_status, "email_status", &mut missing),
            require(self.active_status, "active_status", &mut missing),
            require(self.tokens, "tokens", &mut missing),
        ) {
            (
                Some(id),
                Some(first_name),
                Some(last_name),
                Some(email),
                Some(company_id),
                Some(email_status),
                Some(active_status),
                Some(tokens),
            ) => Ok(UserRecord {
                id,
                first_name,
                last_name,
                email,
                company_id,
                email_status,
                active_status,
                tokens,
            }),
            _ => Err(LoadError::MissingFields {
                resource: Resource::Users,
                index,
                fields: missing,
            }),
        }
    }
}

impl RawCompanyRecord {
    fn validate(self, index: usize) -> Result<CompanyRecord, LoadError> {
        let mut missing = Vec::new();
        match (
            require(self.id, "id", &mut missing),
            require(self.name, "name", &mut missing),
            require(self.top_up, "top_up", &mut missing),
            require(self.email_status, "email_status", &mut missing),
        ) {
            (Some(id), Some(name), Some(top_up), Some(email_status)) => Ok(CompanyRecord {
                id,
                name,
                top_up,
                email_status,
            }),
            _ => Err(LoadError::MissingFields {
                resource: Resource::Companies,
                index,
                fields: missing,
            }),
        }
    }
}

/// Parses and validates the users dataset from a JSON array.
pub(crate) fn parse_user_records(json: &str) -> Result<Vec<UserRecord>, LoadError> {
    let raw: Vec<RawUserRecord> =
        serde_json::from_str(json).map_err(|err| LoadError::InvalidJson {
            resource: Resource::Users,
            message: err.to_string(),
        })?;

    raw.into_iter()
        .enumerate()
        .map(|(index, record)| record.validate(index))
        .collect()
}

/// Parses and validates the companies dataset from a JSON array.
pub(crate) fn parse_company_records(json: &str) -> Result<Vec<CompanyRecord>, LoadError> {
    let raw: Vec<RawCompanyRecord> =
        serde_json::from_str(json).map_err(|err| LoadError::InvalidJson {
            resource: Resource::Companies,
            message: err.to_string(),
        })?;

    raw.into_iter()
        .enumerate()
        .map(|(index, record)| record.validate(index))
        .collect()
}

/// Reads a dataset file into a string.
///
/// The parent directory is opened with ambient authority and the file is
/// read relative to it. Open and read failures map to
/// [`LoadError::FileNotFound`]; content that is not valid UTF-8 maps to
/// [`LoadError::InvalidJson`].
pub(crate) fn read_resource(resource: Resource, path: &Utf8Path) -> Result<String, LoadError> {
    let parent = path
        .parent()
        .filter(|p| !p.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let file_name = path.file_name().ok_or_else(|| LoadError::FileNotFound {
        resource,
        path: path.to_path_buf(),
        message: "path must name a file".to_owned(),
    })?;

    let dir = Dir::open_ambient_dir(parent, ambient_authority())
        .map_err(|err| LoadError::FileNotFound {
            resource,
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
    let payload = dir.read(file_name).map_err(|err| LoadError::FileNotFound {
        resource,
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;

    String::from_utf8(payload).map_err(|err| LoadError::InvalidJson {
        resource,
        message: err.to_string(),
    })
}
