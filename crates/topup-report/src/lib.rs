//! Token top-up reporting pipeline.
//!
//! This crate loads user and company datasets from JSON, joins active
//! users into their companies, applies each company's token top up, and
//! renders a grouped plain-text report. It is a linear batch pipeline:
//! load, validate, filter, join, transform, sort, render.
//!
//! # Overview
//!
//! The crate supports:
//!
//! - Permissive JSON deserialization with per-record presence validation
//!   that reports every missing field
//! - An active-only user collection with a stable last-name ordering
//! - Joining users into companies with derived post-top-up balances
//! - Deterministic report rendering, identical for every sink
//! - Atomic report file writes
//!
//! # Example
//!
//! ```
//! use topup_report::{CompanyCollection, UserCollection, render_report};
//!
//! let users_json = r#"[{
//!     "id": 1,
//!     "first_name": "Tanya",
//!     "last_name": "Nichols",
//!     "email": "tanya.nichols@test.com",
//!     "company_id": 2,
//!     "email_status": true,
//!     "active_status": true,
//!     "tokens": 23
//! }]"#;
//! let companies_json = r#"[{
//!     "id": 2,
//!     "name": "Yellow Mouse Inc.",
//!     "top_up": 10,
//!     "email_status": true
//! }]"#;
//!
//! let users = UserCollection::from_json(users_json).expect("valid users");
//! let companies =
//!     CompanyCollection::from_json(companies_json, &users).expect("valid companies");
//! let report = render_report(&companies);
//!
//! assert!(report.contains("New Token Balance 33"));
//! ```

mod companies;
mod error;
mod records;
mod report;
mod sink;
mod users;

pub use companies::{Company, CompanyCollection};
pub use error::{LoadError, Resource, SinkError};
pub use report::render_report;
pub use sink::write_report_file;
pub use users::{ToppedUpUser, User, UserCollection};
