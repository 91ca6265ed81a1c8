use std::path::PathBuf;

use anyhow::{bail, Context};

use vidgen_client::{
    CreateVideoParams, ListVideosParams, ReferenceSource, RequestOptions, VideoClient,
};
use vidgen_models::Video;

use crate::args::{Cli, Commands};

/// Dispatch a parsed command line.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let client = VideoClient::from_env().context("Failed to configure video client")?;
    let opts = RequestOptions::default();

    match cli.command {
        Commands::Create {
            prompt,
            file,
            model,
            size,
            seconds,
        } => create(&client, prompt, file, model, size, seconds, &opts).await,
        Commands::Status { id } => status(&client, &id, &opts).await,
        Commands::List { limit } => list(&client, limit, &opts).await,
        Commands::Download { id, path } => download(&client, &id, path, &opts).await,
        Commands::Delete { id } => delete(&client, &id, &opts).await,
    }
}

async fn create(
    client: &VideoClient,
    prompt: Vec<String>,
    file: Option<PathBuf>,
    model: Option<String>,
    size: Option<String>,
    seconds: Option<String>,
    opts: &RequestOptions,
) -> anyhow::Result<()> {
    let prompt = prompt.join(" ");
    if prompt.trim().is_empty() {
        bail!("A prompt is required: vidgen create <prompt...>");
    }

    let reference = file
        .or_else(|| client.config().default_reference.clone())
        .map(ReferenceSource::Path);

    let params = CreateVideoParams {
        prompt,
        model,
        size,
        seconds,
        reference,
        extra: Default::default(),
    };

    let video = client.create(params, opts).await?;
    println!("Created {}", video.id);
    print_video(&video);
    Ok(())
}

async fn status(client: &VideoClient, id: &str, opts: &RequestOptions) -> anyhow::Result<()> {
    let video = client.retrieve(id, opts).await?;
    print_video(&video);
    Ok(())
}

async fn list(client: &VideoClient, limit: u32, opts: &RequestOptions) -> anyhow::Result<()> {
    let params = ListVideosParams {
        limit: Some(limit),
        ..ListVideosParams::default()
    };
    let list = client.list(&params, opts).await?;

    if list.data.is_empty() {
        println!("No videos.");
        return Ok(());
    }

    for video in &list.data {
        let progress = video
            .progress
            .map(|p| format!("{p}%"))
            .unwrap_or_default();
        println!(
            "{}  {:<12} {:<10} {}",
            video.id,
            video.status.to_string(),
            video.size.as_deref().unwrap_or("-"),
            progress
        );
    }
    Ok(())
}

async fn download(
    client: &VideoClient,
    id: &str,
    path: Option<PathBuf>,
    opts: &RequestOptions,
) -> anyhow::Result<()> {
    let content = client.download(id, opts).await?;
    let target = path.unwrap_or_else(|| client.config().download_dir.join(&content.filename));

    let bytes = content.into_bytes().await?;
    if let Some(parent) = target.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }
    tokio::fs::write(&target, &bytes)
        .await
        .with_context(|| format!("Failed to write {}", target.display()))?;

    println!("Saved {} bytes to {}", bytes.len(), target.display());
    Ok(())
}

async fn delete(client: &VideoClient, id: &str, opts: &RequestOptions) -> anyhow::Result<()> {
    client.delete(id, opts).await?;
    println!("Deleted {id}");
    Ok(())
}

fn print_video(video: &Video) {
    println!("  status:   {}", video.status);
    if let Some(model) = &video.model {
        println!("  model:    {model}");
    }
    if let Some(size) = &video.size {
        println!("  size:     {size}");
    }
    if let Some(seconds) = &video.seconds {
        println!("  seconds:  {seconds}");
    }
    if let Some(progress) = video.progress {
        println!("  progress: {progress}%");
    }
    if let Some(error) = &video.error {
        println!(
            "  error:    {}",
            error.message.as_deref().unwrap_or("unknown")
        );
    }
}
