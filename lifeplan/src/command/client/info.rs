use lifeplan_client::settings::Settings;

use crate::VERSION;

pub fn run(settings: &Settings) {
    let env_config_dir = std::env::var("LIFEPLAN_CONFIG_DIR");

    let vars = format!(
        "VARS:\nLIFEPLAN_CONFIG_DIR = {:?}",
        env_config_dir.unwrap_or("None".into())
    );
    println!("{vars}\n");

    let mut paths = String::from("PATHS:\n");
    paths.push_str(&format!("config_path: {:?}\n", Settings::config_file()));
    paths.push_str(&format!("session_path: {:?}", settings.session_path));
    println!("{paths}\n");

    println!("SERVER:");
    println!("Address: {}", settings.server_address);
    println!("Timeout: {}s", settings.timeout);
    println!(
        "Session: {}",
        if settings.has_session() {
            "Stored"
        } else {
            "Unauthenticated"
        }
    );

    println!();
    println!("Version: {VERSION}");
}
