//! # Catalog Subcommands
//!
//! `dmo taxonomy`, `dmo levels` and `dmo datasets`: read-only listings of
//! the compiled-in questionnaire, level profiles and example datasets.

use std::fmt::Write as _;

use anyhow::Result;
use clap::Args;
use dmo_classify::ExampleDataset;
use dmo_core::TaxonomyRegistry;

/// Shared flag for listing commands.
#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Print JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

pub fn run_taxonomy(args: &ListArgs) -> Result<u8> {
    println!("{}", render_taxonomy(TaxonomyRegistry::standard(), args.json)?);
    Ok(0)
}

pub fn run_levels(args: &ListArgs) -> Result<u8> {
    println!("{}", render_levels(TaxonomyRegistry::standard(), args.json)?);
    Ok(0)
}

pub fn run_datasets(args: &ListArgs) -> Result<u8> {
    println!("{}", render_datasets(args.json)?);
    Ok(0)
}

pub fn render_taxonomy(registry: &TaxonomyRegistry, json: bool) -> Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(registry.categories())?);
    }
    let mut out = String::new();
    for category in registry.categories() {
        writeln!(out, "{} {} [{}]", category.icon, category.name, category.key)?;
        for sub in category.subcategories {
            writeln!(out, "  {} [{}]", sub.name, sub.key)?;
            for (index, question) in sub.questions.iter().enumerate() {
                writeln!(out, "    {index}. {question}")?;
            }
        }
    }
    write!(out, "{} questions", registry.total_questions())?;
    Ok(out)
}

pub fn render_levels(registry: &TaxonomyRegistry, json: bool) -> Result<String> {
    if json {
        let profiles: Vec<_> = registry.level_profiles().collect();
        return Ok(serde_json::to_string_pretty(&profiles)?);
    }
    let mut out = String::new();
    for profile in registry.level_profiles() {
        writeln!(out, "{}", profile.level.label())?;
        writeln!(out, "  {}", profile.description)?;
        for control in profile.controls {
            writeln!(out, "  - {control}")?;
        }
    }
    Ok(out.trim_end().to_string())
}

pub fn render_datasets(json: bool) -> Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(ExampleDataset::all())?);
    }
    let mut out = String::new();
    for example in ExampleDataset::all() {
        writeln!(out, "{:<18} {}", example.key, example.name)?;
        writeln!(out, "{:<18} {}", "", example.description)?;
    }
    Ok(out.trim_end().to_string())
}
