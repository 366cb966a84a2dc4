mod generator;
mod ledger;
mod report;
mod view;

pub use generator::{
    build_lines, create_document, edit_document, find_document, find_document_mut,
    format_document_number, parse_date, resolve_document_number, DocumentRequest,
};
pub use ledger::{record_payment, remove_payment};
pub use report::{build_statement, Statement, StatementFilter, StatementPayment, StatementRow};
pub use view::{DocumentView, PricedLine};
