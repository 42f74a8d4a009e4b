//! Identifier resolution against the record store

use crate::models::ContactRecord;
use crate::store::RecordStore;

/// Canonical form of a user-typed identifier: surrounding whitespace removed, upper-cased
pub fn normalize_identifier(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Resolve an identifier to its record, falling back to the `DEFAULT` record.
///
/// Never fails. Blank input is the caller's concern and also yields the fallback.
pub fn resolve<'a>(store: &'a RecordStore, raw_input: &str) -> &'a ContactRecord {
    let id = normalize_identifier(raw_input);
    store.get(&id).unwrap_or_else(|| store.default_record())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> RecordStore {
        RecordStore::builtin().unwrap()
    }

    #[test]
    fn test_resolve_every_known_identifier() {
        let store = store();
        for id in store.ids() {
            assert_eq!(resolve(&store, id), store.get(id).unwrap());
        }
    }

    #[test]
    fn test_resolve_unknown_returns_default() {
        let store = store();
        for unknown in ["ZZZZZZ", "A123B", "A123B44", "DEFAULT", "_META", "-"] {
            assert_eq!(resolve(&store, unknown), store.default_record(), "input {:?}", unknown);
        }
    }

    #[test]
    fn test_resolve_is_case_insensitive() {
        let store = store();
        assert_eq!(resolve(&store, "a123b4"), resolve(&store, "A123B4"));
        assert_eq!(resolve(&store, "a123b4").owner_name, "王先生");
    }

    #[test]
    fn test_resolve_trims_whitespace() {
        let store = store();
        assert_eq!(resolve(&store, "  A123B4  "), resolve(&store, "A123B4"));
        assert_eq!(resolve(&store, "\tTEST01\n").owner_name, "测试用户");
    }

    #[test]
    fn test_normalize_identifier() {
        assert_eq!(normalize_identifier(" a696g1 "), "A696G1");
        assert_eq!(normalize_identifier(""), "");
        assert_eq!(normalize_identifier("   "), "");
    }
}
