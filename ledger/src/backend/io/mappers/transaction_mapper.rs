use crate::backend::domain::models::{Transaction, TransactionType as DomainTransactionType};
use crate::backend::domain::receipt_service::ReceiptService;
use crate::backend::domain::transaction_table::{format_amount_input, format_date, format_signed_amount};
use shared::{EditFormState, TransactionRow, TransactionType as SharedTransactionType};

pub struct TransactionMapper;

impl TransactionMapper {
    pub fn to_row(domain: &Transaction) -> TransactionRow {
        TransactionRow {
            id: domain.id.clone(),
            description: domain.description.clone(),
            formatted_date: format_date(domain.date),
            formatted_amount: format_signed_amount(domain),
            transaction_type: Self::to_dto_type(domain.transaction_type),
            receipt_name: domain.receipt.as_ref().map(|r| r.file_name.clone()),
        }
    }

    /// Form values for editing `domain`
    pub fn to_edit_form(domain: &Transaction) -> EditFormState {
        EditFormState {
            id: domain.id.clone(),
            description: domain.description.clone(),
            amount: format_amount_input(domain.amount),
            transaction_type: Self::to_dto_type(domain.transaction_type),
            date: domain.date.format("%Y-%m-%d").to_string(),
            receipt_preview: domain.receipt.as_ref().map(ReceiptService::preview),
            show_remove_receipt: domain.receipt.is_some(),
        }
    }

    pub fn to_domain_type(dto_type: SharedTransactionType) -> DomainTransactionType {
        match dto_type {
            SharedTransactionType::Receita => DomainTransactionType::Receita,
            SharedTransactionType::Despesa => DomainTransactionType::Despesa,
        }
    }

    pub fn to_dto_type(domain_type: DomainTransactionType) -> SharedTransactionType {
        match domain_type {
            DomainTransactionType::Receita => SharedTransactionType::Receita,
            DomainTransactionType::Despesa => SharedTransactionType::Despesa,
        }
    }
}
