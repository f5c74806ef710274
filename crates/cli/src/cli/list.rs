use anyhow::{Result, bail};
use clap::Args;
use serde_json::{Value, json};

use hookwarden_core::hooks::{Hook, catalog};

#[derive(Args)]
pub struct ListArgs {
    /// Only list hooks shipped by this plugin
    #[arg(short, long)]
    pub plugin: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: ListArgs) -> Result<()> {
    let hooks = match &args.plugin {
        Some(plugin) => {
            let hooks = catalog::for_plugin(plugin);
            if hooks.is_empty() {
                bail!(
                    "Unknown plugin '{}'. Known plugins: {}",
                    plugin,
                    catalog::plugins().join(", ")
                );
            }
            hooks
        }
        None => catalog::all(),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&to_json(&hooks))?);
    } else {
        print!("{}", render_table(&hooks));
    }
    Ok(())
}

fn to_json(hooks: &[&'static dyn Hook]) -> Value {
    hooks
        .iter()
        .map(|hook| {
            json!({
                "name": hook.name(),
                "plugin": hook.plugin(),
                "stage": hook.stage(),
                "outcome": hook.outcome(),
                "description": hook.description(),
            })
        })
        .collect()
}

fn render_table(hooks: &[&'static dyn Hook]) -> String {
    let width = hooks.iter().map(|h| h.name().len()).max().unwrap_or(0);
    let mut out = String::new();
    let mut current_plugin = "";

    for hook in hooks {
        if hook.plugin() != current_plugin {
            if !current_plugin.is_empty() {
                out.push('\n');
            }
            current_plugin = hook.plugin();
            out.push_str(&format!("{}:\n", current_plugin));
        }
        out.push_str(&format!(
            "  {:<width$}  {:<11}  {:<5}  {}\n",
            hook.name(),
            hook.stage().as_str(),
            hook.outcome().label(),
            hook.description(),
            width = width
        ));
    }
    out
}
