/// Registry key the UI layer queries for the project kanban examples
pub const PROJECT_CATALOG_KEY: &str = "project";

/// Backend route serving operator-configured templates
pub const KANBAN_EXAMPLES_PATH: &str = "/project_templates/kanban_examples";

// Marker keys as sent by the backend
pub const GREEN_BULLET_KEY: &str = "greenBullet";
pub const ORANGE_BULLET_KEY: &str = "orangeBullet";
pub const STAR_KEY: &str = "star";
pub const CLOCK_KEY: &str = "clock";

// Defaults for configuration values
pub const DEFAULT_BASE_URL: &str = "http://localhost:8070";
pub const DEFAULT_FETCH_TIMEOUT_MS: u64 = 5_000;
pub const DEFAULT_SERVER_PORT: u16 = 8070;
pub const DEFAULT_TEMPLATES_PATH: &str = "templates.toml";
pub const DEFAULT_CONFIG_PATH: &str = "catalog.toml";

// Environment overrides
pub const ENV_BASE_URL: &str = "KANBAN_CATALOG_BASE_URL";
pub const ENV_PORT: &str = "KANBAN_CATALOG_PORT";
