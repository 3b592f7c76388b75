use anyhow::Result;
use clap::Subcommand;
use prism_application::{AppServices, ExportFormat, export_session};
use prism_core::{PrismError, Scope};
use prism_core::session::SessionPatch;

use super::utils::print_json;

#[derive(Subcommand)]
pub enum SessionAction {
    /// List sessions of a product, newest first
    List {
        product: String,
        #[arg(long)]
        json: bool,
    },
    /// Print one session
    Show {
        product: String,
        id: String,
        /// json or markdown
        #[arg(long, default_value = "markdown")]
        format: ExportFormat,
    },
    /// Change title or tags
    Update {
        product: String,
        id: String,
        #[arg(long)]
        title: Option<String>,
        /// Replaces all tags
        #[arg(long = "tag")]
        tags: Option<Vec<String>>,
    },
    /// Delete a session
    Delete { product: String, id: String },
}

pub async fn execute(app: &AppServices, user: &str, action: SessionAction) -> Result<()> {
    match action {
        SessionAction::List { product, json } => {
            let sessions = app.sessions.list(&Scope::new(product, user)).await?;
            if json {
                return print_json(&sessions);
            }
            if sessions.is_empty() {
                println!("No sessions.");
            }
            for session in sessions {
                println!(
                    "{}  {}  {}",
                    session.id,
                    session.created_at.format("%Y-%m-%d %H:%M"),
                    session.title
                );
            }
        }
        SessionAction::Show {
            product,
            id,
            format,
        } => {
            let strategy = app.registry.require(&product)?;
            let session = app
                .sessions
                .get(&Scope::new(&product, user), &id)
                .await
                .ok_or_else(|| PrismError::not_found("Session", &id))?;
            println!(
                "{}",
                export_session(&session, format, strategy.metrics_config())?
            );
        }
        SessionAction::Update {
            product,
            id,
            title,
            tags,
        } => {
            let patch = SessionPatch {
                title,
                tags,
                ..Default::default()
            };
            match app
                .sessions
                .update(&Scope::new(product, user), &id, patch)
                .await?
            {
                Some(session) => println!("Updated {} ({})", session.id, session.title),
                None => return Err(PrismError::not_found("Session", id).into()),
            }
        }
        SessionAction::Delete { product, id } => {
            if app.sessions.delete(&Scope::new(product, user), &id).await {
                println!("Deleted {}", id);
            } else {
                println!("Nothing to delete");
            }
        }
    }
    Ok(())
}
