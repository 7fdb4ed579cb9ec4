use anyhow::Result;
use std::path::Path;

use super::store::{load_user_directory, save_user_directory};
use super::types::NewUser;

/// What the seeding run did, for the CLI to report.
#[derive(Debug, Default)]
pub struct SeedSummary {
    pub created: Vec<String>,
    pub skipped: Vec<String>,
}

/// The two demo accounts shipped for evaluation installs.
pub fn demo_accounts() -> Vec<NewUser> {
    vec![
        NewUser {
            user_id: "demo_user_001".to_string(),
            email: "demo@ocean.com".to_string(),
            password: "DemoUser123!".to_string(),
            full_name: "Ocean Demo User".to_string(),
            organization: "Marine Conservation Society".to_string(),
            phone: "+91 98765 43210".to_string(),
            role: "user".to_string(),
            email_verified: true,
        },
        NewUser {
            user_id: "demo_admin_001".to_string(),
            email: "admin@ocean.com".to_string(),
            password: "AdminOcean123!".to_string(),
            full_name: "Ocean Admin".to_string(),
            organization: "National Centre for Coastal Research".to_string(),
            phone: "+91 87654 32109".to_string(),
            role: "admin".to_string(),
            email_verified: true,
        },
    ]
}

/// Create the demo accounts in the store at `path` if they don't exist yet.
/// Safe to run repeatedly; existing accounts are left untouched.
pub fn seed_demo_accounts(path: &Path) -> Result<SeedSummary> {
    let mut directory = load_user_directory(path)?;
    let mut summary = SeedSummary::default();

    for account in demo_accounts() {
        if directory.find_by_email(&account.email).is_some() {
            summary.skipped.push(account.email);
            continue;
        }
        let email = account.email.clone();
        directory.register(account)?;
        summary.created.push(email);
    }

    if !summary.created.is_empty() {
        save_user_directory(path, &directory)?;
    }

    Ok(summary)
}
