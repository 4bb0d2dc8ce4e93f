//! Keyword search criteria generation.

use super::filter::Criterion;
use crate::error::CriteriaError;

/// Build criteria matching every keyword against any searchable column.
///
/// Each whitespace-separated keyword becomes an OR group of LIKE clauses
/// across the columns; the keyword groups are ANDed together.
pub fn search_criteria(keywords: &str, columns: &[&str]) -> Result<Criterion, CriteriaError> {
    if columns.is_empty() {
        return Err(CriteriaError::NoSearchableColumns);
    }

    let groups = keywords
        .split_whitespace()
        .map(|keyword| {
            let clauses = columns
                .iter()
                .map(|column| Criterion::like(*column, format!("%{}%", keyword)))
                .collect();
            Criterion::any(clauses)
        })
        .collect();

    Ok(Criterion::all(groups))
}
