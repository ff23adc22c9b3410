use std::path::PathBuf;

pub const DEFAULT_SERVER: &str = "localhost:50051";
pub const DEFAULT_CONCURRENCY: usize = 50;
pub const DEFAULT_REQUESTS: usize = 1000;
pub const DEFAULT_OUTPUT_DIR: &str = "results";

/// Parameters of one benchmark run.
#[derive(Debug, Clone)]
pub struct BenchConfig {
    pub server: String,
    /// Number of calls in flight at once.
    pub concurrency: usize,
    /// Calls issued per operation.
    pub requests: usize,
    /// Appended to the report file name when set.
    pub tag: Option<String>,
    pub output_dir: PathBuf,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            server: DEFAULT_SERVER.to_string(),
            concurrency: DEFAULT_CONCURRENCY,
            requests: DEFAULT_REQUESTS,
            tag: None,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}
