use anyhow::Result;
use oseddl_core::config::Config;
use owo_colors::OwoColorize;

pub fn run(config: &Config, init: bool) -> Result<()> {
    let config_path = Config::config_path()?;

    if init && !config_path.exists() {
        Config::create_default_config(&config_path)?;
        println!("{} {}", "Created".green(), config_path.display());
    }

    println!("{}", "Paths".bold());
    println!("  Config:     {}", config_path.display());
    println!("  Data:       {}", config.data_dir()?.display());

    println!("{}", "Settings".bold());
    println!("  Endpoint:   {}", config.endpoint);
    println!("  Search:     min similarity {}", config.search_min_similarity);
    println!("  Timeout:    {}s", config.timeout_secs);

    Ok(())
}
