//! Formats command
//!
//! List the registered export formats.

use anyhow::Result;
use clap::{Args, ValueEnum};
use serde::Serialize;
use std::sync::Arc;

use folio_core::export::SerializerSet;
use folio_core::format::{FormatCategory, FormatDescriptor, FormatRegistry};

/// Category filter
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CategoryArg {
    Document,
    Template,
    Export,
    Web,
    Text,
    Data,
}

impl From<CategoryArg> for FormatCategory {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Document => FormatCategory::Document,
            CategoryArg::Template => FormatCategory::Template,
            CategoryArg::Export => FormatCategory::Export,
            CategoryArg::Web => FormatCategory::Web,
            CategoryArg::Text => FormatCategory::Text,
            CategoryArg::Data => FormatCategory::Data,
        }
    }
}

/// Arguments for the formats command
#[derive(Debug, Args)]
pub struct FormatsArgs {
    /// Only list one category
    #[arg(long, value_enum)]
    pub category: Option<CategoryArg>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct FormatEntry<'a> {
    #[serde(flatten)]
    descriptor: &'a FormatDescriptor,
    media_type: &'a str,
}

/// Execute the formats command
pub fn execute(args: FormatsArgs) -> Result<()> {
    use colored::Colorize;

    let registry = Arc::new(FormatRegistry::builtin());
    let serializers = SerializerSet::new(registry.clone());

    let categories: Vec<FormatCategory> = match args.category {
        Some(category) => vec![category.into()],
        None => FormatCategory::all().to_vec(),
    };

    if args.json {
        let entries: Vec<FormatEntry> = categories
            .iter()
            .flat_map(|category| registry.by_category(*category))
            .map(|descriptor| FormatEntry {
                descriptor,
                media_type: serializers.media_type(descriptor.id.as_str()),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    for category in categories {
        let formats = registry.by_category(category);
        if formats.is_empty() {
            continue;
        }
        println!("{}", category.label().bold().underline());
        for format in formats {
            println!(
                "  {:<6} {:<40} {}",
                format.id.to_string().cyan(),
                format.description,
                serializers.media_type(format.id.as_str()).dimmed()
            );
        }
        println!();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_values() {
        for name in ["document", "template", "export", "web", "text", "data"] {
            assert!(CategoryArg::from_str(name, true).is_ok());
        }
        assert_eq!(FormatCategory::from(CategoryArg::Web), FormatCategory::Web);
    }

    #[test]
    fn test_entry_serializes_media_type() {
        let registry = Arc::new(FormatRegistry::builtin());
        let serializers = SerializerSet::new(registry.clone());
        let descriptor = registry.require("efgh").unwrap();
        let entry = FormatEntry {
            descriptor,
            media_type: serializers.media_type("efgh"),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["id"], "efgh");
        assert_eq!(json["media_type"], "application/rtf");
    }
}
