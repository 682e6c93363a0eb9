use crate::error::Result;
use crate::settings::{load_settings, save_settings, settings_path, Settings};

pub fn show() -> Result<()> {
    let settings = load_settings();
    println!("Settings file: {}", settings_path().display());
    println!("Endpoint:      {}", settings.endpoint);
    println!("Log filter:    {}", settings.log_filter);
    Ok(())
}

pub fn set_endpoint(url: &str) -> Result<()> {
    let mut settings = load_settings();
    settings.endpoint = url.trim().to_string();
    save_settings(&settings)?;
    println!("Endpoint set to {}", settings.endpoint);
    Ok(())
}

pub fn reset() -> Result<()> {
    save_settings(&Settings::default())?;
    println!("Settings restored to defaults.");
    Ok(())
}
