use crate::common::{condition::Clauses, value::Attributes};

/// Per-record query builder state and the results of the last query.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct QueryState {
    pub(crate) limit: Option<i32>,
    pub(crate) exclusive_start_key: Option<Attributes>,
    pub(crate) index_name: Option<String>,
    pub(crate) consistent_read: bool,
    pub(crate) where_clauses: Clauses,
    pub(crate) filter_clauses: Clauses,
    pub(crate) last_evaluated_key: Option<Attributes>,
    pub(crate) result_count: Option<usize>,
}

impl QueryState {
    /// Page size of a limited query; non-positive limits mean no limit.
    pub(crate) fn page_limit(&self) -> Option<i32> {
        self.limit.filter(|limit| *limit > 0)
    }

    /// Clear the builder fields; the results of the last query are kept.
    pub(crate) fn reset(&mut self) {
        self.limit = None;
        self.exclusive_start_key = None;
        self.index_name = None;
        self.consistent_read = false;
        self.where_clauses.clear();
        self.filter_clauses.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::value::Value;

    use rstest::rstest;

    #[rstest]
    #[case::unset(None, None)]
    #[case::zero(Some(0), None)]
    #[case::negative(Some(-1), None)]
    #[case::positive(Some(10), Some(10))]
    fn test_query_state_page_limit(#[case] limit: Option<i32>, #[case] expected: Option<i32>) {
        let state = QueryState {
            limit,
            ..Default::default()
        };
        assert_eq!(state.page_limit(), expected);
    }

    #[test]
    fn test_query_state_reset_keeps_results() {
        let mut state = QueryState {
            limit: Some(1),
            exclusive_start_key: Some(Attributes::from([("id".to_string(), Value::from("a"))])),
            index_name: Some("by_age".to_string()),
            consistent_read: true,
            last_evaluated_key: Some(Attributes::from([("id".to_string(), Value::from("b"))])),
            result_count: Some(1),
            ..Default::default()
        };
        state.where_clauses.equals("id", "a");
        state.filter_clauses.op("age", ">", 20);
        state.reset();
        assert_eq!(
            state,
            QueryState {
                last_evaluated_key: Some(Attributes::from([("id".to_string(), Value::from("b"))])),
                result_count: Some(1),
                ..Default::default()
            }
        );
    }
}
