use dioxus::prelude::*;

mod components;
mod config;
mod error;

use components::{FeedScreen, FeedServices};
use config::AppConfig;
use error::AppError;
use image_feed::{HttpImageService, ImageDownloader};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let (config, services) = match setup() {
        Ok(ready) => ready,
        Err(e) => {
            log::error!("Startup failed: {}", e);
            eprintln!("{}", e.user_message());
            std::process::exit(1);
        }
    };
    log::info!("Image Service at {}", config.service.base_url);

    dioxus::LaunchBuilder::new()
        .with_context(config)
        .with_context(services)
        .launch(App);
}

fn setup() -> Result<(AppConfig, FeedServices), AppError> {
    let config = AppConfig::from_env()?;
    let services = FeedServices {
        service: HttpImageService::new(&config.service)?,
        downloader: ImageDownloader::new(config.download.clone())?,
    };
    Ok((config, services))
}

#[component]
fn App() -> Element {
    let config = use_context::<AppConfig>();

    rsx! {
        div { style: "display: flex; flex-direction: column; height: 100vh; font-family: sans-serif;",
            div { style: "flex: 1; overflow-y: auto;",
                FeedScreen { config }
            }
        }
    }
}
