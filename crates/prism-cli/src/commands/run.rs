use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use prism_application::{AppServices, RunRequest, RunResponse, SaveOptions};
use prism_core::{PrismError, Scope};
use prism_core::strategy::Strategy;

use super::utils::{metric_lines, params_from_pairs, parse_key_val, print_json, read_text};

#[derive(Args)]
pub struct RunArgs {
    /// Product id (see `prism products`)
    pub product: String,

    /// Input text; `-` or nothing reads stdin
    pub input: Option<String>,

    /// Read input from a file
    #[arg(long, conflicts_with = "template")]
    pub file: Option<PathBuf>,

    /// Use a saved template of this product as input
    #[arg(long)]
    pub template: Option<String>,

    /// Product parameter, e.g. `-p tone=friendly`
    #[arg(short = 'p', long = "param", value_parser = parse_key_val)]
    pub params: Vec<(String, String)>,

    /// Value for a `{variable}` placeholder
    #[arg(long = "var", value_parser = parse_key_val)]
    pub vars: Vec<(String, String)>,

    /// Save the result as a session
    #[arg(long)]
    pub save: bool,

    /// Session title (implies --save)
    #[arg(long)]
    pub title: Option<String>,

    /// Session tag (implies --save)
    #[arg(long = "tag")]
    pub tags: Vec<String>,

    /// Print the full response as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn execute(app: &AppServices, user: &str, args: RunArgs) -> Result<()> {
    let input = match &args.template {
        Some(id) => {
            let scope = Scope::new(&args.product, user);
            app.templates
                .get(&scope, id)
                .await
                .map(|t| t.body)
                .ok_or_else(|| PrismError::not_found("Template", id))?
        }
        None => read_text(args.input, args.file.as_deref())?,
    };

    let save = (args.save || args.title.is_some() || !args.tags.is_empty()).then(|| SaveOptions {
        title: args.title,
        tags: args.tags,
    });

    let mut request = RunRequest::new(&args.product, user, input);
    request.params = params_from_pairs(args.params);
    request.variables = args.vars.into_iter().collect::<HashMap<_, _>>();
    request.save = save;

    let response = app.runs.execute(request).await?;

    if args.json {
        return print_json(&response);
    }
    let strategy = app.registry.require(&args.product)?;
    print_response(strategy.as_ref(), &response);
    Ok(())
}

fn print_response(strategy: &dyn Strategy, response: &RunResponse) {
    let labels = strategy.labels();
    let result = &response.result;

    println!("== {} ==\n{}\n", labels.result, result.output);

    if !result.improvements.is_empty() {
        println!("== {} ==", labels.improvements);
        for improvement in &result.improvements {
            println!("  - {}", improvement);
        }
        println!();
    }

    let lines = metric_lines(strategy.metrics_config(), &result.metrics);
    if !lines.is_empty() {
        println!("== Metrics ==");
        for line in lines {
            println!("  {}", line);
        }
        println!();
    }

    if let Some(diff) = &result.diff {
        println!("== Diff ==\n{}\n", diff);
    }

    if let Some(session) = &response.session {
        println!("Saved session {} ({})", session.id, session.title);
    }
    match (response.usage.remaining, response.usage.limit) {
        (Some(remaining), Some(limit)) => println!("Runs left today: {}/{}", remaining, limit),
        _ => println!("Runs left today: unlimited"),
    }
}
