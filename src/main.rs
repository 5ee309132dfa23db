use anyhow::Result;
use clap::Parser;
use media_style_transfer::ai::{BackendStyleClient, GeminiStyleClient, StyleService};
use media_style_transfer::media::MediaCodec;
use media_style_transfer::models::{Config, StyleProvider};
use media_style_transfer::session::StyleSession;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "media-style-transfer")]
#[command(about = "Apply a named visual style to an image with generative AI")]
struct CliArgs {
    /// Path of the image to stylize.
    image: PathBuf,

    /// Style label to apply (for example "Watercolor").
    style: String,

    /// Where to save the stylized image.
    #[arg(short, long, default_value = "stylized.png")]
    output: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "media_style_transfer=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = CliArgs::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let stylizer: Arc<dyn StyleService> = match config.provider {
        StyleProvider::Gemini => {
            info!("Style provider: Gemini (model: {})", config.gemini_model);
            Arc::new(GeminiStyleClient::new(
                config
                    .gemini_api_key
                    .clone()
                    .expect("GEMINI_API_KEY validated in Config::from_env"),
                config.gemini_model.clone(),
            ))
        }
        StyleProvider::Backend => {
            let base_url = config
                .backend_base_url
                .clone()
                .expect("BACKEND_BASE_URL validated in Config::from_env");
            info!("Style provider: custom backend at {}", base_url);
            Arc::new(BackendStyleClient::new(base_url))
        }
    };

    let session = StyleSession::new(Arc::new(MediaCodec::new()), stylizer, config.jpeg_quality);

    let mut updates = session.subscribe();
    let _status_printer = tokio::spawn(async move {
        while let Ok(state) = updates.recv().await {
            if state.is_loading {
                info!("{}", state.loading_message);
            }
        }
    });

    session.select_media(&args.image).await;
    if let Some(message) = session.state().error_message {
        error!("{}", message);
        std::process::exit(1);
    }

    session.generate(&args.style).await;
    let state = session.state();

    if let Some(message) = state.error_message {
        error!("{}", message);
        std::process::exit(1);
    }

    match state.result_image {
        Some(image) => {
            image.save(&args.output)?;
            info!("Saved stylized image to {}", args.output.display());
            Ok(())
        }
        None => {
            error!("No stylized image was produced");
            std::process::exit(1);
        }
    }
}
