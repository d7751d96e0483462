use crate::config;

pub fn load_settings() -> config::Settings {
    // Logging is not up yet: the filter comes from these settings.
    match config::Settings::load() {
        Ok(s) => {
            if let Err(msg) = s.validate() {
                eprintln!("radioman: invalid config, using defaults: {msg}");
                config::Settings::default()
            } else {
                s
            }
        }
        Err(e) => {
            // Config is optional; failures should not prevent the daemon from starting.
            eprintln!("radioman: failed to load config, using defaults: {e}");
            config::Settings::default()
        }
    }
}
