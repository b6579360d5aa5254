use crate::config::CONFIG_FILE_NAME;
use crate::io;
use anyhow::Result;
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# Domaindiff Configuration

[source]
# SQLite database with raw per-domain daily rows
database = "~/domain_metrics.sqlite"
table = "dap_domain"

[output]
directory = "~/Downloads/domain_reports"
# logs_directory = "~/Downloads/domain_reports/logs"
file_prefix = "domain_analysis"

[retention]
days = 30

[report]
top_n = 10
"#;

pub fn init_config(dir: &Path, force: bool) -> Result<()> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    io::write_atomic(&config_path, DEFAULT_CONFIG.as_bytes())?;
    println!("Created {} configuration file", CONFIG_FILE_NAME);

    Ok(())
}
