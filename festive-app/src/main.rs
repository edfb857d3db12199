//! # Festive
//!
//! Command-line host for Festive Canvas.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use festive_app::{
    App, AppConfig, CardMessage, CliArgs, Command, EditorMessage, Message, Notice, NoticeLevel,
    Section,
};
use festive_core::Swatch;
use festive_renderer::ExportFormat;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "festive_app=info,festive_renderer=info,festive_core=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = CliArgs::parse();

    if let Command::Swatches = args.command {
        for swatch in Swatch::ALL {
            println!("{:<10} {}", swatch.name(), swatch.color());
        }
        return Ok(());
    }

    let mut app = App::new(AppConfig::from(&args))?;
    tracing::debug!("{} font faces loaded", app.renderer().fonts().face_count());

    match args.command {
        Command::Card {
            message,
            signature,
            swatch,
            out,
        } => {
            send(&mut app, Message::Navigate(Section::CardGenerator.id().into()))?;
            if let Some(message) = message {
                send(&mut app, Message::Card(CardMessage::SetMessage(message)))?;
            }
            if let Some(signature) = signature {
                send(&mut app, Message::Card(CardMessage::SetSignature(signature)))?;
            }
            send(&mut app, Message::Card(CardMessage::SelectSwatch(swatch)))?;
            save(&app, Section::CardGenerator, out)
        }
        Command::Photo {
            input,
            stickers,
            drags,
            filter,
            out,
        } => {
            send(&mut app, Message::Navigate(Section::PhotoEditor.id().into()))?;
            send(&mut app, Message::Editor(EditorMessage::LoadSource(input)))?;
            for sticker in stickers {
                send(&mut app, Message::Editor(EditorMessage::AddSticker(sticker)))?;
            }
            for drag in drags {
                if !app.drag(drag) {
                    tracing::warn!("No sticker under {:?}; drag ignored", drag.from);
                }
            }
            if let Some(filter) = filter {
                send(&mut app, Message::Editor(EditorMessage::ApplyFilter(filter)))?;
            }
            save(&app, Section::PhotoEditor, out)
        }
        Command::Swatches => Ok(()),
    }
}

/// Dispatch a message, printing its notices. Any non-info notice aborts.
fn send(app: &mut App, message: Message) -> anyhow::Result<()> {
    let notices = app.dispatch(message);
    for Notice { level, text } in &notices {
        match level {
            NoticeLevel::Info => tracing::info!("{text}"),
            NoticeLevel::Warning | NoticeLevel::Error => anyhow::bail!("{text}"),
        }
    }
    Ok(())
}

fn save(app: &App, section: Section, out: Option<PathBuf>) -> anyhow::Result<()> {
    let path = out
        .or_else(|| section.download_name().map(PathBuf::from))
        .context("section has no download")?;
    let format = ExportFormat::from_extension(
        path.extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default(),
    );
    let download = app.download_as(section, format)?;
    download
        .save(&path)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}
