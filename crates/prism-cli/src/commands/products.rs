use anyhow::Result;
use prism_application::AppServices;
use serde_json::{Value, json};

use super::utils::print_json;

pub fn list(app: &AppServices, json: bool) -> Result<()> {
    if json {
        let products: Vec<Value> = app
            .registry
            .iter()
            .map(|(id, strategy)| {
                json!({
                    "id": id,
                    "labels": strategy.labels(),
                    "metrics": strategy
                        .metrics_config()
                        .iter()
                        .map(|spec| json!({ "label": spec.label, "key": spec.key }))
                        .collect::<Vec<_>>(),
                    "deterministic": strategy.is_deterministic(),
                })
            })
            .collect();
        return print_json(&products);
    }

    for (id, strategy) in app.registry.iter() {
        let marker = if strategy.is_deterministic() { "" } else { "  (randomized)" };
        println!("{:<28} {}{}", id, strategy.labels().run, marker);
    }
    Ok(())
}
