//! HR vertical slice: the employee workflow plus its persistence and
//! outbound-collaborator seams.

pub mod notify;
pub mod service;
pub mod store;
pub mod validate;
pub mod verify;

pub use notify::{HttpNotifier, Notifier};
pub use service::{EmployeeInput, EmployeeService};
pub use store::{EmployeeStore, OrmEmployeeStore};
pub use verify::{DepartmentVerifier, EmailVerifier, HttpDepartmentVerifier, HttpEmailVerifier};
