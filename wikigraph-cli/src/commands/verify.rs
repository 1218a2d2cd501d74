//! Verify content health without writing artifacts.

use anyhow::{Context, Result};
use serde::Serialize;
use wikigraph_core::{health::AliasConflict, Config, ContentHealth, GraphBuilder};

#[derive(Serialize)]
struct VerificationSummary<'a> {
    nodes: usize,
    problems: usize,
    advisories: usize,
    health: &'a ContentHealth,
}

/// Run the build pipeline in memory and surface the health report.
pub fn verify_content(config: &Config, json: bool, strict: bool) -> Result<()> {
    let builder = GraphBuilder::new(config.clone());
    let artifacts = builder
        .build()
        .context("Failed to build graph for verification")?;
    let health = &artifacts.health;

    let summary = VerificationSummary {
        nodes: artifacts.nodes.len(),
        problems: health.problem_count(),
        advisories: health.advisory_count(),
        health,
    };

    if json {
        let payload = serde_json::to_string_pretty(&summary)?;
        println!("{}", payload);
    } else {
        println!(
            "Verification complete: {} nodes, {} problems, {} advisories",
            summary.nodes, summary.problems, summary.advisories
        );
        print_report(health);
    }

    if strict && summary.problems > 0 {
        anyhow::bail!("{} content problems found", summary.problems);
    }

    Ok(())
}

fn print_report(health: &ContentHealth) {
    for bad in &health.bad_files {
        println!("- bad file {}: {}", bad.path, bad.message);
    }
    for message in health.unresolved_mentions.messages() {
        println!("- {}", message);
    }
    for message in health.ambiguous_mentions.messages() {
        println!("- {}", message);
    }
    for collision in &health.id_collisions {
        println!(
            "- id {} in {} collides with {}",
            collision.id, collision.path, collision.kept_path
        );
    }
    for missing in &health.missing_identifiers {
        println!("- {} has no identifier (id {})", missing.path, missing.id);
    }
    for conflict in &health.alias_conflicts {
        match conflict {
            AliasConflict::DuplicateAlias { alias, nodes } => {
                println!("- alias {:?} shared by {} and {}", alias, nodes[0], nodes[1]);
            }
            AliasConflict::AliasMatchesTitle {
                alias,
                alias_owner,
                title_owner,
            } => {
                println!(
                    "- alias {:?} of {} is the title of {}",
                    alias, alias_owner, title_owner
                );
            }
        }
    }
    for id in &health.orphans.strict {
        println!("- orphan {}", id);
    }
}
