//! Benchmark file name parser.
//!
//! The final path segment is split on `-` and `_`. The first token names
//! the instance and the last token is the type candidate; both are stripped
//! of everything from the first `.` on.

use crate::result::BenchType;

/// Name and type parsed from a benchmark path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedName {
    pub name: String,
    pub bench_type: BenchType,
}

/// Parse the instance name and type from `path`.
pub fn parse_file_name(path: &str) -> ParsedName {
    let file_name = path.rsplit('/').next().unwrap_or(path);
    let tokens: Vec<&str> = file_name.split(['-', '_']).collect();

    let first = tokens.first().copied().unwrap_or_default();
    let last = tokens.last().copied().unwrap_or_default();

    ParsedName {
        name: strip_extension(first).to_string(),
        bench_type: BenchType::from_token(strip_extension(last)),
    }
}

fn strip_extension(token: &str) -> &str {
    token.split('.').next().unwrap_or(token)
}
