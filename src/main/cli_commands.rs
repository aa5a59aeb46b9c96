// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use std::path::Path;
use std::sync::Arc;

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;

use greenloop::assistant::{Assistant, ClassificationResult};
use greenloop::auth::{HttpAuthService, RegisterRequest, User};
use greenloop::cli::{ChatArgs, ClassifyArgs, LoginArgs, OutputFormat, RegisterArgs};
use greenloop::config::Settings;
use greenloop::error::{GreenLoopError, Result};
use greenloop::session::SessionManager;

/// Build a session manager over the configured backend and restore it
async fn restored_session(settings: &Settings) -> Result<SessionManager> {
    let auth = HttpAuthService::from_settings(settings)?;
    let manager = SessionManager::new(Arc::new(auth));
    manager.restore_session().await;
    Ok(manager)
}

fn print_user(user: &User) {
    println!("{} <{}>", user.full_name(), user.email);
    if let Some(role) = &user.role {
        println!("Role: {}", role);
    }
}

/// MIME type from the file extension, defaulting to JPEG
fn image_mime(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        Some("heic") => "image/heic",
        _ => "image/jpeg",
    }
}

pub(super) async fn run_chat(args: ChatArgs, settings: &Settings) -> Result<()> {
    let assistant = Assistant::from_settings(settings);
    if !assistant.is_available() {
        tracing::info!("no Gemini API key configured; assistant runs in offline mode");
    }
    println!("{}", assistant.chat_reply(&args.message).await);
    Ok(())
}

pub(super) async fn run_classify(
    args: ClassifyArgs,
    settings: &Settings,
    format: OutputFormat,
) -> Result<()> {
    let bytes = std::fs::read(&args.image)?;
    if bytes.is_empty() {
        return Err(GreenLoopError::InvalidInput(format!(
            "{} is empty",
            args.image.display()
        )));
    }
    let data_url = format!(
        "data:{};base64,{}",
        image_mime(&args.image),
        BASE64_STANDARD.encode(bytes)
    );

    let assistant = Assistant::from_settings(settings);
    let result = assistant.classify_waste_image(&data_url).await;
    print_classification(&result, format)
}

fn print_classification(result: &ClassificationResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(result)?),
        OutputFormat::Text => {
            println!("Type:       {}", result.waste_type);
            println!("Confidence: {}", result.confidence);
            println!("Points:     {}", result.points);
            println!("{}", result.message);
        }
    }
    Ok(())
}

pub(super) async fn run_login(args: LoginArgs, settings: &Settings) -> Result<()> {
    let session = restored_session(settings).await?;
    let user = session.login(&args.email, &args.password).await?;
    print!("Logged in as ");
    print_user(&user);
    Ok(())
}

pub(super) async fn run_register(args: RegisterArgs, settings: &Settings) -> Result<()> {
    let session = restored_session(settings).await?;
    let user = session
        .register(RegisterRequest {
            first_name: args.first_name,
            last_name: args.last_name,
            email: args.email,
            password: args.password,
        })
        .await?;
    print!("Registered ");
    print_user(&user);
    Ok(())
}

pub(super) async fn run_logout(settings: &Settings) -> Result<()> {
    let session = restored_session(settings).await?;
    let was_logged_in = session.is_authenticated();
    session.logout();
    if was_logged_in {
        println!("Logged out.");
    } else {
        println!("Not logged in.");
    }
    Ok(())
}

pub(super) async fn run_whoami(settings: &Settings, format: OutputFormat) -> Result<()> {
    let session = restored_session(settings).await?;
    let user = session.current_user()?;
    match (format, user) {
        (OutputFormat::Json, user) => println!("{}", serde_json::to_string_pretty(&user)?),
        (OutputFormat::Text, Some(user)) => print_user(&user),
        (OutputFormat::Text, None) => println!("Not logged in."),
    }
    Ok(())
}
