use biblio_db::{BookId, CustomerId, LoanKey, LoanRecord};
use serde::{Deserialize, Serialize};
use time::Date;

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

/// Book fields exposed in a loan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanBookDto {
    pub id: BookId,
    pub isbn: String,
    pub title: String,
}

/// Customer fields exposed in a loan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanCustomerDto {
    pub id: CustomerId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Projection of a loan returned by the reporting endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanDto {
    #[serde(rename = "bookDTO")]
    pub book: LoanBookDto,
    #[serde(rename = "customerDTO")]
    pub customer: LoanCustomerDto,
    #[serde(with = "iso_date")]
    pub loan_begin_date: Date,
    #[serde(with = "iso_date")]
    pub loan_end_date: Date,
}

impl From<LoanRecord> for LoanDto {
    fn from(record: LoanRecord) -> Self {
        Self {
            book: LoanBookDto {
                id: record.book.id,
                isbn: record.book.isbn,
                title: record.book.title,
            },
            customer: LoanCustomerDto {
                id: record.customer.id,
                first_name: record.customer.first_name,
                last_name: record.customer.last_name,
                email: record.customer.email,
            },
            loan_begin_date: record.loan.begin_date,
            loan_end_date: record.loan.end_date,
        }
    }
}

/// Map records to DTOs ordered by begin date, then book, then customer.
pub fn to_loan_dtos(records: Vec<LoanRecord>) -> Vec<LoanDto> {
    let mut loans: Vec<LoanDto> = records.into_iter().map(LoanDto::from).collect();
    loans.sort_by_key(|loan| (loan.loan_begin_date, loan.book.id, loan.customer.id));
    loans
}

/// Loan request naming the book and customer. Dates are only read when
/// opening a loan; any status sent by the client is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimpleLoanDto {
    pub book_id: BookId,
    pub customer_id: CustomerId,
    #[serde(default, with = "iso_date::option")]
    pub begin_date: Option<Date>,
    #[serde(default, with = "iso_date::option")]
    pub end_date: Option<Date>,
}

impl SimpleLoanDto {
    pub const fn key(&self) -> LoanKey {
        LoanKey::new(self.book_id, self.customer_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use biblio_db::{Book, Customer, Loan, LoanStatus};
    use time::macros::date;

    fn record(book_id: BookId, begin: Date) -> LoanRecord {
        LoanRecord {
            loan: Loan {
                key: LoanKey::new(book_id, 2),
                begin_date: begin,
                end_date: date!(2024 - 12 - 31),
                status: LoanStatus::Close,
            },
            book: Book {
                id: book_id,
                isbn: format!("isbn-{book_id}"),
                title: "Germinal".to_string(),
                category: None,
            },
            customer: Customer {
                id: 2,
                first_name: "Émile".to_string(),
                last_name: "Zola".to_string(),
                email: "emile@example.org".to_string(),
            },
        }
    }

    #[test]
    fn loan_projection_uses_wire_names_and_iso_dates() {
        let json = serde_json::to_value(LoanDto::from(record(1, date!(2024 - 01 - 01)))).unwrap();

        assert_eq!(json["bookDTO"]["isbn"], "isbn-1");
        assert_eq!(json["customerDTO"]["firstName"], "Émile");
        assert_eq!(json["loanBeginDate"], "2024-01-01");
        assert_eq!(json["loanEndDate"], "2024-12-31");
        assert!(json.get("status").is_none());
        assert!(json["bookDTO"].get("category").is_none());
    }

    #[test]
    fn loans_are_sorted_by_begin_date() {
        let loans = to_loan_dtos(vec![
            record(3, date!(2024 - 03 - 01)),
            record(1, date!(2024 - 01 - 01)),
            record(2, date!(2024 - 01 - 01)),
        ]);
        let books: Vec<_> = loans.iter().map(|loan| loan.book.id).collect();
        assert_eq!(books, vec![1, 2, 3]);
    }

    #[test]
    fn simple_loan_accepts_missing_dates_and_ignores_status() {
        let request: SimpleLoanDto =
            serde_json::from_str(r#"{ "bookId": 1, "customerId": 2, "status": "CLOSE" }"#)
                .unwrap();
        assert_eq!(request.key(), LoanKey::new(1, 2));
        assert_eq!(request.begin_date, None);

        let request: SimpleLoanDto = serde_json::from_str(
            r#"{ "bookId": 1, "customerId": 2, "beginDate": "2024-01-01", "endDate": "2024-01-15" }"#,
        )
        .unwrap();
        assert_eq!(request.end_date, Some(date!(2024 - 01 - 15)));
    }
}
