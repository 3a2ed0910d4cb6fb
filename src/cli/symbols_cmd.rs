//! Symbol library command handler

use crate::domain::symbols::{self, LibrarySymbol};

use super::args::SymbolsArgs;
use super::presenter::Presenter;

/// Print the library entries matching the search and category
pub fn handle_symbols(args: &SymbolsArgs, presenter: &Presenter) -> Result<(), String> {
    let matches = matching_symbols(args);

    if args.json {
        let json = serde_json::to_string_pretty(&matches)
            .map_err(|e| format!("Failed to encode symbols: {}", e))?;
        presenter.output(&json);
        return Ok(());
    }

    if matches.is_empty() {
        presenter.info("No symbols match your search");
        return Ok(());
    }

    for symbol in matches {
        presenter.symbol(symbol);
    }
    Ok(())
}

fn matching_symbols(args: &SymbolsArgs) -> Vec<&'static LibrarySymbol> {
    symbols::filter(args.search.as_deref().unwrap_or_default(), args.category)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::symbols::{CategoryFilter, SymbolCategory};

    fn args(search: Option<&str>, category: CategoryFilter) -> SymbolsArgs {
        SymbolsArgs {
            search: search.map(String::from),
            category,
            json: false,
        }
    }

    #[test]
    fn search_and_category_combine() {
        let found = matching_symbols(&args(
            Some("freedom"),
            CategoryFilter::Only(SymbolCategory::Animals),
        ));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "Bird");
    }

    #[test]
    fn missing_search_lists_category() {
        let found = matching_symbols(&args(None, CategoryFilter::Only(SymbolCategory::Objects)));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "House");
    }

    #[test]
    fn empty_result_is_not_an_error() {
        colored::control::set_override(false);
        let presenter = Presenter::new();
        assert!(handle_symbols(&args(Some("dragon"), CategoryFilter::All), &presenter).is_ok());
    }
}
