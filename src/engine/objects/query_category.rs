//! Benchmark question categories. The set is closed; labels outside it keep their
//! name for reporting but compare strictly.
use super::ComparisonPolicy;
use std::fmt::{self, Display, Formatter};

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum QueryCategory {
    Exact,
    Aggregation,
    DateFunctions,
    GroupBy,
    OrderBy,
    Ratio,
    TableJoin,
    Instructions,
    Ranking,
    Other(String),
}

impl QueryCategory {
    pub fn parse(label: &str) -> QueryCategory {
        let normalized = label.trim().to_lowercase();
        match normalized.as_str() {
            "exact" => QueryCategory::Exact,
            "aggregation" | "keywords_aggregate" => QueryCategory::Aggregation,
            "date_functions" => QueryCategory::DateFunctions,
            "group_by" => QueryCategory::GroupBy,
            "order_by" => QueryCategory::OrderBy,
            "ratio" | "keywords_ratio" => QueryCategory::Ratio,
            "table_join" => QueryCategory::TableJoin,
            "instructions" | "instruct" => QueryCategory::Instructions,
            "ranking" | "rank" | "keywords_rank" | "top_n" => QueryCategory::Ranking,
            _ => QueryCategory::Other(normalized),
        }
    }

    pub fn policy(&self) -> ComparisonPolicy {
        match self {
            QueryCategory::Exact | QueryCategory::Other(_) => ComparisonPolicy::empty(),
            QueryCategory::GroupBy
            | QueryCategory::TableJoin
            | QueryCategory::DateFunctions
            | QueryCategory::OrderBy
            | QueryCategory::Instructions => ComparisonPolicy::EXTRA_COLUMNS,
            QueryCategory::Aggregation | QueryCategory::Ratio => {
                ComparisonPolicy::EXTRA_COLUMNS | ComparisonPolicy::LOOSE_NUMERIC
            }
            QueryCategory::Ranking => {
                ComparisonPolicy::EXTRA_COLUMNS
                    | ComparisonPolicy::TIE_SWAP
                    | ComparisonPolicy::TIE_SUBSET
            }
        }
    }

    pub fn name(&self) -> &str {
        match self {
            QueryCategory::Exact => "exact",
            QueryCategory::Aggregation => "aggregation",
            QueryCategory::DateFunctions => "date_functions",
            QueryCategory::GroupBy => "group_by",
            QueryCategory::OrderBy => "order_by",
            QueryCategory::Ratio => "ratio",
            QueryCategory::TableJoin => "table_join",
            QueryCategory::Instructions => "instructions",
            QueryCategory::Ranking => "ranking",
            QueryCategory::Other(ref name) => name,
        }
    }
}

impl Display for QueryCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aliases() {
        assert_eq!(QueryCategory::parse(" Rank "), QueryCategory::Ranking);
        assert_eq!(QueryCategory::parse("instruct"), QueryCategory::Instructions);
        assert_eq!(
            QueryCategory::parse("keywords_ratio"),
            QueryCategory::Ratio
        );
        assert_eq!(
            QueryCategory::parse("Cte"),
            QueryCategory::Other("cte".to_string())
        );
    }

    #[test]
    fn test_unknown_categories_are_strict() {
        assert!(QueryCategory::parse("whatever").policy().is_strict());
        assert!(QueryCategory::Exact.policy().is_strict());
    }

    #[test]
    fn test_ranking_is_tie_tolerant() {
        let policy = QueryCategory::Ranking.policy();
        assert!(policy.tie_tolerant());
        assert!(policy.contains(ComparisonPolicy::EXTRA_COLUMNS));
        assert!(!QueryCategory::GroupBy.policy().tie_tolerant());
    }

    #[test]
    fn test_name_round_trips_through_parse() {
        for category in [
            QueryCategory::Exact,
            QueryCategory::Aggregation,
            QueryCategory::DateFunctions,
            QueryCategory::GroupBy,
            QueryCategory::OrderBy,
            QueryCategory::Ratio,
            QueryCategory::TableJoin,
            QueryCategory::Instructions,
            QueryCategory::Ranking,
        ] {
            assert_eq!(QueryCategory::parse(category.name()), category);
        }
    }
}
