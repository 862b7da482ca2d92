pub mod audit_logs;
pub mod categories;
pub mod enums;
pub mod skus;
pub mod spus;
pub mod stocks;

pub use audit_logs::Entity as AuditLogs;
pub use categories::Entity as Categories;
pub use skus::Entity as Skus;
pub use spus::Entity as Spus;
pub use stocks::Entity as Stocks;
