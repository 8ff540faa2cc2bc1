use biblio_db::{Customer, CustomerId, NewCustomer};
use serde::{Deserialize, Serialize};

/// Customer payload exchanged with clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<CustomerId>,
    pub first_name: String,
    pub last_name: String,
    /// Unique business key used for lookups
    pub email: String,
}

impl From<Customer> for CustomerDto {
    fn from(customer: Customer) -> Self {
        Self {
            id: Some(customer.id),
            first_name: customer.first_name,
            last_name: customer.last_name,
            email: customer.email,
        }
    }
}

impl From<CustomerDto> for NewCustomer {
    fn from(dto: CustomerDto) -> Self {
        Self {
            first_name: dto.first_name.trim().to_string(),
            last_name: dto.last_name.trim().to_string(),
            email: dto.email.trim().to_string(),
        }
    }
}
