//! Nested records, including one record type used twice.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nested {
    pub inner_str: String,
    pub inner_bool: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestConfigNested {
    pub app_name: String,
    pub nested: Nested,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Server {
    pub host: String,
    pub port: isize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub server: Server,
    pub admin: Server,
    pub r#type: String,
}

pub mod nested_loader {
    include!(concat!(env!("OUT_DIR"), "/nested_gen.rs"));
}

pub mod app_loader {
    include!(concat!(env!("OUT_DIR"), "/app_gen.rs"));
}
