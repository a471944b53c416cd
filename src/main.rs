use vista::ShowcaseConfig;

fn main() {
    env_logger::builder().format_timestamp(None).init();

    let config = match std::env::args().nth(1) {
        Some(path) => match ShowcaseConfig::from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("Failed to load {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => ShowcaseConfig::default(),
    };

    if let Err(e) = vista::run(config) {
        log::error!("Event loop failed: {}", e);
        std::process::exit(1);
    }
}
