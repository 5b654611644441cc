//! [`Command`] for setting a [`FilterValue`].

use std::convert::Infallible;

use crate::{domain::FilterValue, filters, Service, Store};

use super::Command;

/// [`Command`] for setting a [`FilterValue`] in a URL query string.
///
/// Results in the new canonical URL query string.
#[derive(Clone, Debug)]
pub struct SetFilterValue {
    /// URL query string to modify.
    pub query: String,

    /// [`FilterValue`] to set.
    pub value: FilterValue,
}

impl<Db, St> Command<SetFilterValue> for Service<Db, St> {
    type Ok = String;
    type Err = Infallible;

    async fn execute(
        &self,
        cmd: SetFilterValue,
    ) -> Result<Self::Ok, Self::Err> {
        let SetFilterValue { query, value } = cmd;

        let mut store = Store::new(&query);
        _ = filters::set_value(&mut store, value);
        Ok(store.query())
    }
}

#[cfg(test)]
mod spec {
    use crate::{
        domain::{
            filter::value::AreaRange,
            listing::{DealType, PropertyType},
            FilterValue,
        },
        spec::service,
        Command as _,
    };

    use super::SetFilterValue;

    #[tokio::test]
    async fn sets_value_with_dependent_reset() {
        let svc = service(vec![]);

        let query = svc
            .execute(SetFilterValue {
                query: "propertyType=house&landAreaMin=5&page=2".into(),
                value: FilterValue::PropertyType(vec![PropertyType::Apartment]),
            })
            .await
            .unwrap();
        assert_eq!(query, "propertyType=apartment");

        let query = svc
            .execute(SetFilterValue {
                query,
                value: FilterValue::DealType(DealType::Sale),
            })
            .await
            .unwrap();
        assert_eq!(query, "dealType=sale&propertyType=apartment");

        let query = svc
            .execute(SetFilterValue {
                query,
                value: FilterValue::Area(AreaRange {
                    min: Some(40),
                    ..AreaRange::default()
                }),
            })
            .await
            .unwrap();
        assert_eq!(query, "dealType=sale&propertyType=apartment&areaMin=40");
    }
}
