//! Statistics over a harvested artifact
//!
//! This module provides functionality for summarizing an already written
//! types artifact without crawling again.

use crate::model::TypeDescriptor;
use std::collections::BTreeMap;

/// Harvest statistics summary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HarvestStatistics {
    /// Total number of type records
    pub total_types: usize,

    /// Count of records by kind
    pub types_by_kind: BTreeMap<String, usize>,

    /// Count of records by module
    pub types_by_module: BTreeMap<String, usize>,

    pub total_fields: usize,
    pub total_constructors: usize,
    pub total_methods: usize,

    /// Constructors and methods whose signature was not decomposed
    pub undecomposed_callables: usize,
}

impl HarvestStatistics {
    pub fn from_types(types: &[TypeDescriptor]) -> Self {
        let mut stats = Self {
            total_types: types.len(),
            ..Self::default()
        };

        for descriptor in types {
            *stats
                .types_by_kind
                .entry(descriptor.kind.to_string())
                .or_default() += 1;
            *stats
                .types_by_module
                .entry(descriptor.module_name.clone())
                .or_default() += 1;

            stats.total_fields += descriptor.fields.len();
            stats.total_constructors += descriptor.constructors.len();
            stats.total_methods += descriptor.methods.len();
            stats.undecomposed_callables += descriptor
                .constructors
                .iter()
                .chain(&descriptor.methods)
                .filter(|callable| callable.parameters.is_none())
                .count();
        }

        stats
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &HarvestStatistics) {
    println!("=== Harvest Statistics ===\n");

    println!("Overview:");
    println!("  Total types: {}", stats.total_types);
    println!("  Fields: {}", stats.total_fields);
    println!("  Constructors: {}", stats.total_constructors);
    println!("  Methods: {}", stats.total_methods);
    println!();

    println!("Types by Kind:");
    for (kind, count) in &stats.types_by_kind {
        println!("  {}: {}", kind, count);
    }
    println!();

    println!("Types by Module:");
    let mut modules: Vec<_> = stats.types_by_module.iter().collect();
    modules.sort_by(|a, b| b.1.cmp(a.1));
    for (module, count) in modules {
        let module = if module.is_empty() { "(unnamed)" } else { module };
        println!("  {}: {}", module, count);
    }
    println!();

    let callables = stats.total_constructors + stats.total_methods;
    let decomposed_rate = if callables > 0 {
        ((callables - stats.undecomposed_callables) as f64 / callables as f64) * 100.0
    } else {
        0.0
    };

    println!(
        "Decomposed signatures: {:.1}% ({} without parameters)",
        decomposed_rate, stats.undecomposed_callables
    );
}
