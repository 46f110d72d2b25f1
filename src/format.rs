//! Output formatting for CLI commands.
//!
//! Human-readable tables on stdout; per-id failures are listed inline
//! rather than aborting the whole run.

use std::sync::Arc;

use itemresolve::{Identifier, IdentifierError, ProviderDescriptor, ResolveError, ResolvedItem};

/// Print normalized ids. Returns `true` if every id parsed.
pub fn print_parsed(results: &[(String, Result<Identifier, IdentifierError>)]) -> bool {
    println!("{:<32} NORMALIZED", "RAW");
    println!("{}", "-".repeat(60));
    let mut ok = true;
    for (raw, result) in results {
        match result {
            Ok(id) => println!("{:<32} {id}", format!("{raw:?}")),
            Err(e) => {
                ok = false;
                println!("{:<32} error: {e}", format!("{raw:?}"));
            }
        }
    }
    ok
}

/// Print provider descriptors in resolution order.
pub fn print_providers(descriptors: &[ProviderDescriptor]) {
    if descriptors.is_empty() {
        println!("No providers registered");
        return;
    }

    println!("{:<4} {:<16} {:>8} AVAILABLE", "#", "PROVIDER", "PRIORITY");
    println!("{}", "-".repeat(44));
    let mut rank = 0;
    for d in descriptors {
        let position = if d.available {
            rank += 1;
            rank.to_string()
        } else {
            "-".to_string()
        };
        println!(
            "{:<4} {:<16} {:>8} {}",
            position,
            d.name,
            d.priority,
            if d.available { "yes" } else { "no" }
        );
    }
}

/// Print resolution results. Returns `true` if every id resolved.
pub fn print_resolved(
    results: &[(String, Result<Arc<ResolvedItem>, ResolveError>)],
) -> bool {
    println!("{:<32} {:<12} STATUS", "ID", "PROVIDER");
    println!("{}", "-".repeat(60));
    let mut ok = true;
    for (raw, result) in results {
        match result {
            Ok(item) => println!("{:<32} {:<12} found", item.identifier.to_string(), item.provider),
            Err(ResolveError::NotFound(id)) => {
                ok = false;
                println!("{:<32} {:<12} not found", id.to_string(), "-");
            }
            Err(e @ ResolveError::Malformed(_)) => {
                ok = false;
                println!("{:<32} {:<12} {e}", format!("{raw:?}"), "-");
            }
        }
    }
    ok
}
