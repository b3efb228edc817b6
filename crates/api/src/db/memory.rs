//! In-memory [`CustomerStore`] for handler tests.
//!
//! Mirrors the table's behavior that handlers can observe: store-generated
//! IDs, `NOT NULL` columns, `last_update` refreshed on update, and ordering
//! by `last_update DESC, customer_id`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use customer_rest_core::{CustomerId, Page};

use super::{CustomerStore, RepositoryError};
use crate::models::customer::{Customer, CustomerPayload};

#[derive(Clone, Default)]
pub struct MemoryCustomerStore {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    rows: Mutex<Vec<Customer>>,
    clock: Mutex<Option<DateTime<Utc>>>,
    offline: AtomicBool,
}

impl MemoryCustomerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following call fail as if the store were unreachable.
    pub fn set_offline(&self, offline: bool) {
        self.inner.offline.store(offline, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.rows().len()
    }

    /// Store a row as-is, bypassing the clock.
    pub fn insert(&self, customer: Customer) {
        self.rows().push(customer);
    }

    fn rows(&self) -> std::sync::MutexGuard<'_, Vec<Customer>> {
        self.inner
            .rows
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Wall-clock time, strictly after every timestamp handed out before.
    fn tick(&self) -> DateTime<Utc> {
        let mut last = self
            .inner
            .clock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let now = Utc::now();
        let next = match *last {
            Some(prev) if now <= prev => prev + TimeDelta::microseconds(1),
            _ => now,
        };
        *last = Some(next);
        next
    }

    fn check_online(&self) -> Result<(), RepositoryError> {
        if self.inner.offline.load(Ordering::SeqCst) {
            return Err(RepositoryError::Unavailable(
                "connection refused".to_string(),
            ));
        }
        Ok(())
    }
}

fn skip(page: Page) -> usize {
    page.offset
        .and_then(|o| usize::try_from(o).ok())
        .unwrap_or(0)
}

fn take(page: Page) -> usize {
    page.limit
        .and_then(|l| usize::try_from(l).ok())
        .unwrap_or(usize::MAX)
}

fn not_null(column: &str, value: Option<&String>) -> Result<String, RepositoryError> {
    value.cloned().ok_or_else(|| {
        RepositoryError::Constraint(format!(
            "null value in column \"{column}\" violates not-null constraint"
        ))
    })
}

#[async_trait]
impl CustomerStore for MemoryCustomerStore {
    async fn create(&self, payload: &CustomerPayload) -> Result<CustomerId, RepositoryError> {
        self.check_online()?;
        let customer = Customer {
            customer_id: CustomerId::random(),
            first_name: not_null("first_name", payload.first_name.as_ref())?,
            last_name: not_null("last_name", payload.last_name.as_ref())?,
            email: not_null("email", payload.email.as_ref())?,
            last_update: self.tick(),
        };
        let id = customer.customer_id;
        self.rows().push(customer);
        Ok(id)
    }

    async fn get(&self, id: CustomerId) -> Result<Option<Customer>, RepositoryError> {
        self.check_online()?;
        Ok(self
            .rows()
            .iter()
            .find(|row| row.customer_id == id)
            .cloned())
    }

    async fn update(
        &self,
        id: CustomerId,
        payload: &CustomerPayload,
    ) -> Result<Option<Customer>, RepositoryError> {
        self.check_online()?;
        let last_update = self.tick();
        let mut rows = self.rows();
        let Some(row) = rows.iter_mut().find(|row| row.customer_id == id) else {
            return Ok(None);
        };

        let first_name = not_null("first_name", payload.first_name.as_ref())?;
        let last_name = not_null("last_name", payload.last_name.as_ref())?;
        let email = not_null("email", payload.email.as_ref())?;
        row.first_name = first_name;
        row.last_name = last_name;
        row.email = email;
        row.last_update = last_update;
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: CustomerId) -> Result<Option<CustomerId>, RepositoryError> {
        self.check_online()?;
        let mut rows = self.rows();
        let before = rows.len();
        rows.retain(|row| row.customer_id != id);
        Ok((rows.len() < before).then_some(id))
    }

    async fn list(&self, page: Page) -> Result<Vec<Customer>, RepositoryError> {
        self.check_online()?;
        let rows = self.rows();
        let mut ordered: Vec<&Customer> = rows.iter().collect();
        ordered.sort_by(|a, b| {
            b.last_update
                .cmp(&a.last_update)
                .then_with(|| a.customer_id.cmp(&b.customer_id))
        });
        Ok(ordered
            .into_iter()
            .skip(skip(page))
            .take(take(page))
            .cloned()
            .collect())
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        self.check_online()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn row(id: &str, last_update: DateTime<Utc>) -> Customer {
        Customer {
            customer_id: id.parse().unwrap(),
            first_name: "First".to_string(),
            last_name: "Last".to_string(),
            email: "x@example.com".to_string(),
            last_update,
        }
    }

    #[tokio::test]
    async fn test_list_breaks_ties_by_customer_id() {
        let store = MemoryCustomerStore::new();
        let at = Utc::now();
        let earlier = at - TimeDelta::seconds(1);
        store.insert(row("cccccccc-0000-4000-8000-000000000000", at));
        store.insert(row("aaaaaaaa-0000-4000-8000-000000000000", at));
        store.insert(row("00000000-0000-4000-8000-000000000000", earlier));
        store.insert(row("bbbbbbbb-0000-4000-8000-000000000000", at));

        let ids: Vec<String> = store
            .list(Page::default())
            .await
            .unwrap()
            .iter()
            .map(|c| c.customer_id.to_string())
            .collect();
        assert_eq!(
            ids,
            vec![
                "aaaaaaaa-0000-4000-8000-000000000000",
                "bbbbbbbb-0000-4000-8000-000000000000",
                "cccccccc-0000-4000-8000-000000000000",
                "00000000-0000-4000-8000-000000000000",
            ]
        );
    }

    #[tokio::test]
    async fn test_list_window() {
        let store = MemoryCustomerStore::new();
        for _ in 0..4 {
            store
                .create(&CustomerPayload {
                    first_name: Some("F".to_string()),
                    last_name: Some("L".to_string()),
                    email: Some("e@example.com".to_string()),
                })
                .await
                .unwrap();
        }

        let page = Page::parse(Some("2"), Some("3")).unwrap();
        assert_eq!(store.list(page).await.unwrap().len(), 1);
        let page = Page::parse(None, Some("1")).unwrap();
        assert_eq!(store.list(page).await.unwrap().len(), 3);
    }

    #[test]
    fn test_clock_is_strictly_increasing() {
        let store = MemoryCustomerStore::new();
        let a = store.tick();
        let b = store.tick();
        let c = store.tick();
        assert!(a < b && b < c);
    }
}
