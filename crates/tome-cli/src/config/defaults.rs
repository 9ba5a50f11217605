use std::path::PathBuf;

pub fn default_root() -> PathBuf {
    PathBuf::from(".")
}

pub fn default_content_dir() -> PathBuf {
    PathBuf::from("docs")
}

pub fn default_out_dir() -> PathBuf {
    PathBuf::from("dist/docs")
}

pub fn default_cache_file() -> PathBuf {
    PathBuf::from(".tome/build-cache.json")
}

pub fn default_extensions() -> Vec<String> {
    vec!["mdx".to_string()]
}

pub fn default_ignore() -> Vec<String> {
    vec![
        "node_modules".to_string(),
        "dist".to_string(),
        ".tome".to_string(),
    ]
}

pub fn default_debounce_ms() -> u64 {
    300
}
