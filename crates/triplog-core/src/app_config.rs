use std::path::PathBuf;

#[derive(Clone)]
pub struct AppConfig {
    pub notion_token: String,
    pub notion_database_id: String,
    pub notion_version: String,
    pub notion_api_base: String,
    pub nominatim_user_agent: String,
    pub nominatim_base_url: String,
    pub request_timeout_secs: u64,
    pub page_size: u32,
    pub output_path: PathBuf,
    pub log_level: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("notion_token", &"[redacted]")
            .field("notion_database_id", &self.notion_database_id)
            .field("notion_version", &self.notion_version)
            .field("notion_api_base", &self.notion_api_base)
            .field("nominatim_user_agent", &self.nominatim_user_agent)
            .field("nominatim_base_url", &self.nominatim_base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("page_size", &self.page_size)
            .field("output_path", &self.output_path)
            .field("log_level", &self.log_level)
            .finish()
    }
}
