
use crate::catalog::CatalogName;

fn name(raw: &str) -> CatalogName {
    CatalogName::new(raw).expect("test names are non-empty")
}

fn raw(names: &[&str]) -> Vec<String> {
    names.iter().map(ToString::to_string).collect()
}
