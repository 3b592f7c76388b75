use std::path::PathBuf;

use anyhow::Result;
use clap::Subcommand;
use prism_application::{AppServices, render_template};
use prism_core::{PrismError, Scope};
use prism_core::template::TemplatePatch;

use super::utils::{parse_key_val, print_json, read_text};

#[derive(Subcommand)]
pub enum TemplateAction {
    /// List templates of a product
    List {
        product: String,
        #[arg(long)]
        json: bool,
    },
    /// Create a template; variables are taken from `{placeholders}` in the body
    Create {
        product: String,
        name: String,
        /// Template body; `-` or nothing reads stdin
        body: Option<String>,
        #[arg(long)]
        file: Option<PathBuf>,
    },
    Show { product: String, id: String },
    /// Print the body with placeholders filled in
    Render {
        product: String,
        id: String,
        #[arg(long = "var", value_parser = parse_key_val)]
        vars: Vec<(String, String)>,
    },
    /// Rename or replace the body
    Update {
        product: String,
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        body: Option<String>,
    },
    Delete { product: String, id: String },
}

pub async fn execute(app: &AppServices, user: &str, action: TemplateAction) -> Result<()> {
    match action {
        TemplateAction::List { product, json } => {
            let templates = app.templates.list(&Scope::new(product, user)).await?;
            if json {
                return print_json(&templates);
            }
            if templates.is_empty() {
                println!("No templates.");
            }
            for template in templates {
                println!(
                    "{}  {}  [{}]",
                    template.id,
                    template.name,
                    template.variables.join(", ")
                );
            }
        }
        TemplateAction::Create {
            product,
            name,
            body,
            file,
        } => {
            let body = read_text(body, file.as_deref())?;
            let template = app
                .templates
                .create_from_body(&Scope::new(product, user), name, body)
                .await?;
            println!("Created {} with variables [{}]", template.id, template.variables.join(", "));
        }
        TemplateAction::Show { product, id } => {
            let template = app
                .templates
                .get(&Scope::new(product, user), &id)
                .await
                .ok_or_else(|| PrismError::not_found("Template", &id))?;
            print_json(&template)?;
        }
        TemplateAction::Render { product, id, vars } => {
            let template = app
                .templates
                .get(&Scope::new(product, user), &id)
                .await
                .ok_or_else(|| PrismError::not_found("Template", &id))?;
            println!("{}", render_template(&template, &vars.into_iter().collect()));
        }
        TemplateAction::Update {
            product,
            id,
            name,
            body,
        } => {
            let patch = TemplatePatch {
                name,
                body,
                variables: None,
            };
            match app
                .templates
                .update(&Scope::new(product, user), &id, patch)
                .await?
            {
                Some(template) => println!("Updated {} ({})", template.id, template.name),
                None => return Err(PrismError::not_found("Template", id).into()),
            }
        }
        TemplateAction::Delete { product, id } => {
            if app.templates.delete(&Scope::new(product, user), &id).await {
                println!("Deleted {}", id);
            } else {
                println!("Nothing to delete");
            }
        }
    }
    Ok(())
}
