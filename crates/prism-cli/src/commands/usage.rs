use anyhow::Result;
use prism_application::AppServices;
use prism_core::Scope;

use super::utils::print_json;

pub async fn show(app: &AppServices, user: &str, product: &str, json: bool) -> Result<()> {
    app.registry.require(product)?;
    let usage = app.quota.get_usage(&Scope::new(product, user)).await?;

    if json {
        return print_json(&usage);
    }
    match (usage.remaining, usage.limit) {
        (Some(remaining), Some(limit)) => println!(
            "{}: {} runs used on {}, {}/{} left",
            product, usage.count, usage.date, remaining, limit
        ),
        _ => println!(
            "{}: {} runs used on {}, unlimited plan",
            product, usage.count, usage.date
        ),
    }
    Ok(())
}
