//! Configuration constants and settings

// Concurrency Configuration
//
// Each worker holds one git child process. The upper bound keeps a full
// pool from tripping GitHub's concurrent connection limits.
pub const MIN_JOBS: u8 = 1;
pub const MAX_JOBS: u8 = 30;
pub const DEFAULT_JOBS: u8 = 1;

// Manifest location, relative to the packages checkout
pub const PACKAGES_MANIFEST_PATH: &str = "common/packages";

// Remote layout for package repositories
pub const PACKAGES_HOST_DOMAIN: &str = "github.com";
pub const PACKAGES_ORGANIZATION: &str = "solus-packages";
pub const DEFAULT_REMOTE_NAME: &str = "origin";

// GitHub API
pub const GITHUB_API_URL: &str = "https://api.github.com";
pub const GITHUB_TOKEN_ENV: &str = "GITHUB_AUTH_TOKEN";
pub const GITHUB_PAGE_SIZE: u32 = 100;
/// Organization-level repository that is not a package
pub const GITHUB_META_REPO: &str = ".github";

// Timeout constants
pub const GIT_OPERATION_TIMEOUT_SECS: u64 = 600; // large packages carry big histories
pub const HTTP_TIMEOUT_SECS: u64 = 30;

// Progress bar configuration
pub const PROGRESS_CHARS: &str = "##-";
pub const PROGRESS_TEMPLATE: &str = "{prefix:.bold} [{bar:30}] {pos}/{len} {wide_msg}";

// UI Constants
pub const NO_PACKAGES_MESSAGE: &str = "No packages to synchronize.";
pub const RETRY_PROMPT: &str = "Would you like to retry (y/n?)";
pub const INTERRUPTED_MESSAGE: &str = "Script terminated by ctrl+c.";

// Display formatting constants
pub const ERROR_MESSAGE_MAX_LENGTH: usize = 60;
pub const ERROR_MESSAGE_TRUNCATE_LENGTH: usize = 57;
