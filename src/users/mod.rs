pub mod seed;
pub mod store;
pub mod types;

pub use seed::{demo_accounts, seed_demo_accounts, SeedSummary};
pub use store::{get_user_store_path, load_user_directory, save_user_directory};
pub use types::{NewUser, UserDirectory, UserRecord};
