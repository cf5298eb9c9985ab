use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use shared::form::FormSnapshot;
use shared::query::{build_image_uri, DEFAULT_FONT_SIZE};

/// Headless client: assembles the same request the form UI would and
/// optionally fetches it.
#[derive(Parser, Debug)]
struct Args {
    /// Width, passed through unvalidated like the form field.
    #[arg(long, default_value = "")]
    width: String,
    /// Height, passed through unvalidated like the form field.
    #[arg(long, default_value = "")]
    height: String,
    #[arg(long, default_value_t = DEFAULT_FONT_SIZE.to_string())]
    font_size: String,
    /// Text to draw on the image.
    #[arg(long, default_value = "")]
    text: String,
    /// Ask the service to print the dimensions under the text.
    #[arg(long)]
    print_size: bool,
    /// png or gif; anything else means jpeg on the service side.
    #[arg(long)]
    image_type: Option<String>,
    #[arg(long, default_value = "http://127.0.0.1:8080")]
    server_url: String,
    /// Fetch the image and write the bytes to this path.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();

    let snapshot = FormSnapshot {
        width: args.width,
        height: args.height,
        font_size: args.font_size,
        text: args.text,
        has_property: args.print_size,
        image_type: args.image_type,
    };
    let uri = build_image_uri(&snapshot);

    println!("snapshot: {}", serde_json::to_string(&snapshot)?);
    println!("request: {uri}");

    if let Some(out) = args.out {
        let response = reqwest::get(format!("{}{uri}", args.server_url))
            .await?
            .error_for_status()?;
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("unknown")
            .to_string();
        let bytes = response.bytes().await?;
        tokio::fs::write(&out, &bytes).await?;
        println!(
            "wrote {} bytes ({content_type}) to {}",
            bytes.len(),
            out.display()
        );
    }

    Ok(())
}
