use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use dnd_uploads::config::Config;
use dnd_uploads::dispatch::{SessionEvent, SurfaceKind};
use dnd_uploads::logging::init_tracing;
use dnd_uploads::session::{
    FormInput, FormFields, PendingFile, Preview, TriggeringElement, UploadSession, UploadVariant,
};
use dnd_uploads::transport::HttpTransport;

#[derive(Parser)]
#[command(name = "dnd-uploads")]
#[command(about = "Upload files as one multipart form request")]
struct Cli {
    /// Config file (defaults to the user config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Upload endpoint, overriding the config
    #[arg(long)]
    url: Option<String>,

    #[arg(long, value_enum, default_value_t = VariantArg::File)]
    variant: VariantArg,

    /// Extra form field as key=value; may be repeated
    #[arg(long = "field", value_name = "KEY=VALUE")]
    fields: Vec<String>,

    /// Files to upload
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum VariantArg {
    Plain,
    File,
    Image,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(url) = cli.url {
        config.upload.url = url;
    }
    config.validate()?;
    if config.upload.url.is_empty() {
        bail!("No upload URL configured; pass --url or set upload.url");
    }

    let inputs = parse_fields(&cli.fields)?;
    let mut variant = match cli.variant {
        VariantArg::Plain => UploadVariant::plain(),
        VariantArg::File => UploadVariant::file(),
        VariantArg::Image => UploadVariant::image(),
    }
    .with_contributor(FormFields::new(config.upload.field_name.clone(), inputs));
    if let Some(name) = config.upload.triggering_name.clone() {
        variant = variant.with_contributor(TriggeringElement {
            name,
            value: config.upload.triggering_value.clone().unwrap_or_default(),
        });
    }

    let transport = HttpTransport::new(&config.transport)?;
    let mut session = UploadSession::new(&config, variant);
    let drop_zone = session.register_surface(SurfaceKind::DropZone);
    session.register_surface(SurfaceKind::BrowseButton);

    session.add_fn_listener(|_surface, event| match event {
        SessionEvent::SendSuccess { response } => {
            println!("Uploaded ({}): {}", response.status, response.text());
        }
        SessionEvent::SendError { errors } => {
            eprintln!("Upload failed with {} error(s)", errors.len());
        }
        _ => {}
    });

    let mut files = Vec::with_capacity(cli.files.len());
    for path in &cli.files {
        let data = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        files.push(PendingFile::with_guessed_type(data, filename));
    }

    let collected = session.add_files(drop_zone, files);
    for preview in session.previews() {
        print_preview(&preview);
    }
    if collected.accepted == 0 && collected.rejected.is_empty() {
        bail!("No files collected");
    }

    // The command line is the send trigger in manual mode.
    let sent = session.send(&transport).await?;

    if !session.error_display().is_empty() {
        eprintln!("{}", session.error_display());
    }
    session.destroy();

    if !sent.is_success() {
        std::process::exit(1);
    }
    Ok(())
}

fn parse_fields(fields: &[String]) -> Result<Vec<FormInput>> {
    fields
        .iter()
        .map(|field| match field.split_once('=') {
            Some((key, value)) if !key.is_empty() => Ok(FormInput::new(key, value)),
            _ => bail!("Invalid field '{}', expected KEY=VALUE", field),
        })
        .collect()
}

fn print_preview(preview: &Preview) {
    match preview {
        Preview::File {
            filename,
            size_label,
        } => println!("  {} ({})", filename, size_label),
        Preview::Image { filename, data_url } => {
            println!("  {} (image, {} bytes inline)", filename, data_url.len())
        }
    }
}
