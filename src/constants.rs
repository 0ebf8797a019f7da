//! App-wide constants.
//!
//! Centralises the tool name, config paths, environment variable names,
//! discovery patterns, and rendering limits so a rename only requires
//! changing this file.

/// Display name of the tool (lowercase).
pub const APP_NAME: &str = "revbrief";

/// Local config filename (e.g. `.revbrief.toml` in the project root).
pub const CONFIG_FILENAME: &str = ".revbrief.toml";

/// Directory name under `~/.config/` for global config.
pub const CONFIG_DIR: &str = "revbrief";

/// GitHub REST API base URL.
pub const GITHUB_API_BASE: &str = "https://api.github.com";

/// User-Agent header for GitHub API requests.
pub const USER_AGENT: &str = concat!("revbrief/", env!("CARGO_PKG_VERSION"));


// ── Environment variable names ──────────────────────────────────────

pub const ENV_PROVIDER: &str = "REVBRIEF_PROVIDER";
pub const ENV_MODEL: &str = "REVBRIEF_MODEL";
pub const ENV_API_KEY: &str = "REVBRIEF_API_KEY";
pub const ENV_BASE_URL: &str = "REVBRIEF_BASE_URL";
pub const ENV_REVIEW: &str = "REVBRIEF_REVIEW";

/// GitHub API tokens, checked in order.
pub const ENV_GITHUB_TOKENS: &[&str] = &["GITHUB_TOKEN", "GH_TOKEN"];

/// Override for the GitHub API base URL. Set automatically in GitHub
/// Actions; lets GitHub Enterprise users point at their own host.
pub const ENV_GITHUB_API_BASE: &str = "GITHUB_API_URL";


// ── Project file discovery ──────────────────────────────────────────

/// Directory searched first for task lists and PRDs.
pub const TASKS_DIR: &str = "tasks";

/// Task-list filenames start with this prefix (e.g. `tasks-auth.md`).
pub const TASK_FILE_PREFIX: &str = "tasks-";

/// PRD filenames end with this suffix (e.g. `user-auth-prd.md`).
pub const PRD_FILE_SUFFIX: &str = "-prd.md";

/// Bare PRD filename accepted at the project root.
pub const PRD_FILE_PLAIN: &str = "prd.md";


// ── Rendering limits ────────────────────────────────────────────────

/// Content recorded for files that cannot be read as text.
pub const BINARY_SENTINEL: &str = "[Binary file]";

/// Maximum commits listed in the branch-comparison commit block.
pub const MAX_COMMITS_SHOWN: usize = 15;

/// PR descriptions longer than this are truncated in the metadata block.
pub const MAX_PR_BODY_CHARS: usize = 500;

/// Output filename prefixes.
pub const CONTEXT_FILE_PREFIX: &str = "review-context";
pub const REVIEW_FILE_PREFIX: &str = "code-review";
