/// Heuristic dork detection
use regex::Regex;
use std::sync::LazyLock;

/// Operator prefixes recognized anywhere in a query, compared lowercased
pub const DORK_OPERATORS: &[&str] = &[
    "site:", "filetype:", "intitle:", "inurl:", "intext:",
    "allintext:", "allintitle:", "allinurl:", "link:",
    "cache:", "related:", "info:", "ext:", "inanchor:",
    "allinanchor:", "author:", "group:", "stocks:",
    "define:", "phonebook:", "movie:", "weather:",
    "map:", "book:", "froogle:", "daterange:",
    "source:", "before:", "after:", "around(", "loc:",
    "location:", "blogurl:", "bphonebook:", "rphonebook:",
    "safesearch:", "numrange:", "ip:", "range:",
];

static QUOTED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"["'][^"']*["']"#).unwrap());
static EXCLUSION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-[0-9A-Za-z_]").unwrap());
static BOOLEAN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\s(AND|OR)\s").unwrap());
static GROUPING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\([^)]+\)").unwrap());
static NUMERIC_RANGE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]+\.\.[0-9]+").unwrap());

/// Decide whether a search query looks like a dork worth saving
///
/// Any one of these makes a query a dork:
/// 1. An operator from `DORK_OPERATORS` appears (case-insensitive)
/// 2. A quoted phrase appears together with an operator
/// 3. An exclusion like `-word`
/// 4. `AND` / `OR` between whitespace, plus a colon somewhere
/// 5. A `*` wildcard in a query longer than 3 UTF-16 units, as JS counts length
/// 6. A parenthesized group, plus a colon somewhere
/// 7. A numeric range like `1..100`
///
/// Examples:
/// - `site:example.com` → true
/// - `"exact phrase" filetype:pdf` → true
/// - `cats AND dogs` → false (no colon)
/// - `wi*` → false (too short)
pub fn is_dork(query: &str) -> bool {
    let has_operator = has_operator(query);
    let has_colon = query.contains(':');

    has_operator
        || (QUOTED.is_match(query) && has_operator)
        || EXCLUSION.is_match(query)
        || (BOOLEAN.is_match(query) && has_colon)
        || (query.contains('*') && query.encode_utf16().count() > 3)
        || (GROUPING.is_match(query) && has_colon)
        || NUMERIC_RANGE.is_match(query)
}

fn has_operator(query: &str) -> bool {
    let lowered = query.to_lowercase();
    DORK_OPERATORS.iter().any(|op| lowered.contains(op))
}
