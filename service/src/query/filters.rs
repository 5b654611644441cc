//! [`Query`] collection related to filters.

use std::convert::Infallible;

#[cfg(doc)]
use crate::domain::filter::FilterDescriptor;
use crate::{domain::SearchParams, filters::FilterState, Query, Service};

/// Queries the [`FilterState`] of [`SearchParams`]: applicable
/// [`FilterDescriptor`]s, values, active filters and chips.
#[derive(Clone, Debug)]
pub struct State {
    /// [`SearchParams`] to describe.
    pub params: SearchParams,
}

impl<Db, St> Query<State> for Service<Db, St> {
    type Ok = FilterState;
    type Err = Infallible;

    async fn execute(&self, query: State) -> Result<Self::Ok, Self::Err> {
        Ok(FilterState::from(&query.params))
    }
}

#[cfg(test)]
mod spec {
    use crate::{
        domain::{FilterId, SearchParams},
        spec::service,
        Query as _,
    };

    use super::State;

    #[tokio::test]
    async fn describes_filters() {
        let svc = service(vec![]);

        let state = svc
            .execute(State {
                params: SearchParams::from_query(
                    "propertyType=land&utilities=gas,water",
                ),
            })
            .await
            .unwrap();

        assert!(state.active.contains(&FilterId::Utilities));
        assert_eq!(
            state
                .chips
                .iter()
                .filter(|c| c.id == FilterId::Utilities)
                .count(),
            2,
        );
        assert!(!state.applicable.iter().any(|d| d.id == FilterId::Floor));
    }
}
