//! Plain-text report rendering.
//!
//! Rendering is pure string assembly over an already-joined company
//! collection. The whole report is produced in one pass so that every
//! sink receives identical bytes.

use crate::companies::{Company, CompanyCollection};
use crate::users::ToppedUpUser;

/// Renders the grouped top-up report for the given companies.
///
/// Each company block is preceded by a blank line and lists the emailed
/// and not-emailed users with their balances, followed by the company's
/// top-up total. Companies render in ascending identifier order. An empty
/// collection renders as a single blank line.
#[must_use]
pub fn render_report(companies: &CompanyCollection) -> String {
    let mut lines = Vec::new();
    for company in companies.iter() {
        lines.push(String::new());
        push_company_block(&mut lines, company);
    }
    lines.push(String::new());

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

fn push_company_block(lines: &mut Vec<String>, company: &Company) {
    lines.push(format!("\tCompany Id: {}", company.id()));
    lines.push(format!("\tCompany Name: {}", company.name()));
    lines.push("\tUsers Emailed:".to_owned());
    for member in company.users_emailed() {
        push_user_lines(lines, member);
    }
    lines.push("\tUsers Not Emailed:".to_owned());
    for member in company.users_not_emailed() {
        push_user_lines(lines, member);
    }
    lines.push(format!(
        "\tTotal amount of top ups for {}: {}",
        company.name(),
        company.total_top_up()
    ));
}

// Consumers parse these lines byte for byte. "Previous Token Balance" is
// followed by a comma and "New Token Balance" is not; keep it that way.
fn push_user_lines(lines: &mut Vec<String>, member: &ToppedUpUser) {
    let user = member.user();
    lines.push(format!(
        "\t\t{}, {}, {}",
        user.last_name, user.first_name, user.email
    ));
    lines.push(format!(
        "\t\t  Previous Token Balance, {}",
        member.previous_balance()
    ));
    lines.push(format!("\t\t  New Token Balance {}", member.new_balance()));
}
