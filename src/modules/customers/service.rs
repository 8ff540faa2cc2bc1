use std::sync::Arc;

use biblio_db::{Customer, CustomerId, CustomerRepository, NewCustomer, StoreResult};

/// Customer registry operations.
#[derive(Clone)]
pub struct CustomerService {
    customers: Arc<dyn CustomerRepository>,
}

impl CustomerService {
    pub fn new(customers: Arc<dyn CustomerRepository>) -> Self {
        Self { customers }
    }

    pub async fn create(&self, customer: NewCustomer) -> StoreResult<Customer> {
        let created = self.customers.insert_customer(customer).await?;
        tracing::info!(customer_id = created.id, "customer registered");
        Ok(created)
    }

    /// `Ok(None)` when no customer is stored under `id`.
    pub async fn update(
        &self,
        id: CustomerId,
        customer: NewCustomer,
    ) -> StoreResult<Option<Customer>> {
        self.customers.update_customer(id, customer).await
    }

    pub async fn find_by_email(&self, email: &str) -> StoreResult<Option<Customer>> {
        self.customers.find_customer_by_email(email.trim()).await
    }
}
