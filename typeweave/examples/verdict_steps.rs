//! Example: plugin discovery feeding a resolver chain with verdict members.
//!
//! Scans the directory given as the first argument (default `.`) for plugin
//! files, registers one manifest per file stem, and shows the members each
//! resolved step type ends up with.
//!
//! Run with: `cargo run --example verdict_steps -p typeweave --features full -- <dir>`

use std::sync::Arc;
use typeweave::prelude::*;

#[derive(Default)]
struct PluginStep;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let root = std::env::args().nth(1).unwrap_or_else(|| ".".into());
    let scanner = PluginScanner::new(ScannerConfig::new().with_root(root))?;

    let manifest = Arc::new(ManifestResolver::new().with_primitives());
    for file in scanner.search_files().iter() {
        let Some(stem) = file.file_stem() else {
            continue;
        };
        manifest.register(
            ClassType::builder(stem.to_string_lossy())
                .base(step_type())
                .tag(
                    DisplayTag::new(stem.to_string_lossy())
                        .with_description(file.display().to_string()),
                )
                .build(),
        );
    }

    let registry = ResolverRegistry::new()
        .with(Resolver::Direct(manifest.clone()))
        .with(Resolver::stacked(verdict_decorator()));

    println!(
        "{} plugin file(s), {} total",
        scanner.search_files().len(),
        scanner.all_files().len()
    );

    let step: Instance = Arc::new(PluginStep);
    typeweave::typeweave_verdict::set_verdict_behavior(
        &step,
        VerdictBehavior::BREAK_ON_FAIL | VerdictBehavior::RETRY_ON_ERROR,
    );
    typeweave::typeweave_verdict::set_retry_count(&step, 2);

    for file in scanner.search_files().iter() {
        let Some(stem) = file.file_stem() else {
            continue;
        };
        let Some(ty) = registry.resolve(&stem.to_string_lossy())? else {
            continue;
        };
        println!("{} ({})", ty.display().name, ty.display().description);
        for member in ty.members() {
            let display = member.display();
            let value = member.get_value(&step)?;
            let enabled = member.is_enabled(ty.as_ref(), &step)?;
            println!("  {:<20} = {value} (enabled: {enabled})", display.name);
        }
    }
    Ok(())
}
