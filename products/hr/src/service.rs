use std::sync::Arc;

use entity::employees;
use platform_api::{ApiError, ApiResult};
use serde::Deserialize;
use uuid::Uuid;

use crate::notify::Notifier;
use crate::store::EmployeeStore;
use crate::verify::{DepartmentVerifier, EmailVerifier};

const MIN_SALARY: f64 = 1500.0;

/// Request-body form of an employee; the id is always store-assigned.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub department: String,
    pub salary: f64,
}

impl EmployeeInput {
    fn into_model(self, id: Uuid) -> employees::Model {
        employees::Model {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            department: self.department,
            salary: self.salary,
        }
    }
}

/// The employee workflow. Business-rule checks run on create only; the
/// update path overwrites without re-validating, matching the system this
/// replaces.
pub struct EmployeeService {
    store: Arc<dyn EmployeeStore>,
    email_verifier: Arc<dyn EmailVerifier>,
    department_verifier: Arc<dyn DepartmentVerifier>,
    notifier: Arc<dyn Notifier>,
}

impl EmployeeService {
    pub fn new(
        store: Arc<dyn EmployeeStore>,
        email_verifier: Arc<dyn EmailVerifier>,
        department_verifier: Arc<dyn DepartmentVerifier>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            store,
            email_verifier,
            department_verifier,
            notifier,
        }
    }

    pub fn store(&self) -> &Arc<dyn EmployeeStore> {
        &self.store
    }

    pub async fn get_all(&self) -> ApiResult<Vec<employees::Model>> {
        let records = self.store.find_all().await?;
        Ok(records)
    }

    pub async fn get_by_id(&self, id: Uuid) -> ApiResult<employees::Model> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::not_found(format!("Employee not found with ID: {id}")))
    }

    pub async fn create(&self, input: EmployeeInput) -> ApiResult<employees::Model> {
        if input.salary < MIN_SALARY {
            return Err(ApiError::invalid_input(
                "Salary must be greater than or equal to 1,500.",
            ));
        }
        if !self.email_verifier.is_valid(&input.email).await? {
            return Err(ApiError::invalid_input("Invalid email address"));
        }
        if !self.department_verifier.is_valid(&input.department).await? {
            return Err(ApiError::invalid_input("Invalid department"));
        }

        let saved = self.store.save(input.into_model(Uuid::nil())).await?;
        tracing::info!(id = %saved.id, "employee created");
        self.notifier
            .send(
                &saved.email,
                "Employee Created",
                &format!("Welcome, {}!", saved.first_name),
            )
            .await?;
        Ok(saved)
    }

    pub async fn update(&self, id: Uuid, input: EmployeeInput) -> ApiResult<employees::Model> {
        let existing = self.get_by_id(id).await?;
        let updated = self.store.save(input.into_model(existing.id)).await?;
        tracing::info!(id = %updated.id, "employee updated");
        self.notifier
            .send(
                &updated.email,
                "Employee Updated",
                "Your details have been updated.",
            )
            .await?;
        Ok(updated)
    }

    pub async fn delete(&self, id: Uuid) -> ApiResult<()> {
        let existing = self.get_by_id(id).await?;
        self.store.delete(&existing).await?;
        tracing::info!(%id, "employee deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use anyhow::{Result, anyhow};
    use async_trait::async_trait;

    use super::*;

    #[derive(Default)]
    struct MemStore {
        rows: Mutex<Vec<employees::Model>>,
        save_calls: AtomicUsize,
    }

    #[async_trait]
    impl EmployeeStore for MemStore {
        async fn find_all(&self) -> Result<Vec<employees::Model>> {
            Ok(self.rows.lock().unwrap().clone())
        }

        async fn find_by_id(&self, id: Uuid) -> Result<Option<employees::Model>> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .find(|row| row.id == id)
                .cloned())
        }

        async fn save(&self, mut employee: employees::Model) -> Result<employees::Model> {
            self.save_calls.fetch_add(1, Ordering::SeqCst);
            let mut rows = self.rows.lock().unwrap();
            if employee.id.is_nil() {
                employee.id = Uuid::new_v4();
                rows.push(employee.clone());
            } else if let Some(row) = rows.iter_mut().find(|row| row.id == employee.id) {
                *row = employee.clone();
            } else {
                rows.push(employee.clone());
            }
            Ok(employee)
        }

        async fn delete(&self, employee: &employees::Model) -> Result<()> {
            self.rows.lock().unwrap().retain(|row| row.id != employee.id);
            Ok(())
        }

        async fn ping(&self) -> Result<()> {
            Ok(())
        }
    }

    struct StaticVerifier(bool);

    #[async_trait]
    impl EmailVerifier for StaticVerifier {
        async fn is_valid(&self, _email: &str) -> Result<bool> {
            Ok(self.0)
        }
    }

    #[async_trait]
    impl DepartmentVerifier for StaticVerifier {
        async fn is_valid(&self, _department: &str) -> Result<bool> {
            Ok(self.0)
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        sent: Mutex<Vec<(String, String, String)>>,
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        async fn send(&self, to: &str, subject: &str, body: &str) -> Result<()> {
            self.sent
                .lock()
                .unwrap()
                .push((to.into(), subject.into(), body.into()));
            Ok(())
        }
    }

    struct FailingNotifier;

    #[async_trait]
    impl Notifier for FailingNotifier {
        async fn send(&self, _to: &str, _subject: &str, _body: &str) -> Result<()> {
            Err(anyhow!("relay unreachable"))
        }
    }

    struct Harness {
        store: Arc<MemStore>,
        notifier: Arc<RecordingNotifier>,
        service: EmployeeService,
    }

    fn harness(email_ok: bool, department_ok: bool) -> Harness {
        let store = Arc::new(MemStore::default());
        let notifier = Arc::new(RecordingNotifier::default());
        let service = EmployeeService::new(
            store.clone(),
            Arc::new(StaticVerifier(email_ok)),
            Arc::new(StaticVerifier(department_ok)),
            notifier.clone(),
        );
        Harness {
            store,
            notifier,
            service,
        }
    }

    fn input() -> EmployeeInput {
        EmployeeInput {
            first_name: "Ahmed".into(),
            last_name: "Hamdy".into(),
            email: "a@x.com".into(),
            department: "IT".into(),
            salary: 2000.0,
        }
    }

    #[tokio::test]
    async fn create_assigns_id_and_notifies_once() {
        let h = harness(true, true);
        let created = h.service.create(input()).await.unwrap();

        assert!(!created.id.is_nil());
        assert_eq!(created.first_name, "Ahmed");
        assert_eq!(created.department, "IT");
        assert_eq!(created.salary, 2000.0);

        let sent = h.notifier.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(
            sent[0],
            (
                "a@x.com".to_string(),
                "Employee Created".to_string(),
                "Welcome, Ahmed!".to_string()
            )
        );
    }

    #[tokio::test]
    async fn create_rejects_low_salary_before_touching_the_store() {
        let h = harness(true, true);
        let mut low = input();
        low.salary = 1000.0;

        let err = h.service.create(low).await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidInput(_)));
        assert_eq!(
            err.to_string(),
            "Salary must be greater than or equal to 1,500."
        );
        assert_eq!(h.store.save_calls.load(Ordering::SeqCst), 0);
        assert!(h.notifier.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_rejects_unverified_email() {
        let h = harness(false, true);
        let err = h.service.create(input()).await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid email address");
        assert_eq!(h.store.save_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn create_rejects_unverified_department() {
        let h = harness(true, false);
        let err = h.service.create(input()).await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid department");
        assert_eq!(h.store.save_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn salary_check_runs_before_verification() {
        // Both verifiers would reject, but the salary failure short-circuits.
        let h = harness(false, false);
        let mut low = input();
        low.salary = 0.0;
        let err = h.service.create(low).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Salary must be greater than or equal to 1,500."
        );
    }

    #[tokio::test]
    async fn get_by_id_returns_the_stored_record_or_not_found() {
        let h = harness(true, true);
        let created = h.service.create(input()).await.unwrap();

        let found = h.service.get_by_id(created.id).await.unwrap();
        assert_eq!(found, created);

        let missing = Uuid::new_v4();
        let err = h.service.get_by_id(missing).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
        assert_eq!(
            err.to_string(),
            format!("Employee not found with ID: {missing}")
        );
    }

    #[tokio::test]
    async fn update_replaces_every_field_but_the_id() {
        let h = harness(true, true);
        let created = h.service.create(input()).await.unwrap();

        let replacement = EmployeeInput {
            first_name: "Mona".into(),
            last_name: "Ali".into(),
            email: "mona@y.com".into(),
            department: "HR".into(),
            salary: 2500.0,
        };
        let updated = h.service.update(created.id, replacement).await.unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.first_name, "Mona");
        assert_eq!(updated.last_name, "Ali");
        assert_eq!(updated.email, "mona@y.com");
        assert_eq!(updated.department, "HR");
        assert_eq!(updated.salary, 2500.0);

        let sent = h.notifier.sent.lock().unwrap();
        assert_eq!(sent.len(), 2);
        assert_eq!(
            sent[1],
            (
                "mona@y.com".to_string(),
                "Employee Updated".to_string(),
                "Your details have been updated.".to_string()
            )
        );
    }

    #[tokio::test]
    async fn update_does_not_rerun_create_validations() {
        let h = harness(true, true);
        let created = h.service.create(input()).await.unwrap();

        // Rejecting verifiers and a sub-floor salary; update accepts anyway.
        let service = EmployeeService::new(
            h.store.clone(),
            Arc::new(StaticVerifier(false)),
            Arc::new(StaticVerifier(false)),
            h.notifier.clone(),
        );
        let mut low = input();
        low.salary = 100.0;
        let updated = service.update(created.id, low).await.unwrap();
        assert_eq!(updated.salary, 100.0);
    }

    #[tokio::test]
    async fn update_of_unknown_id_mutates_nothing() {
        let h = harness(true, true);
        let err = h.service.update(Uuid::new_v4(), input()).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
        assert_eq!(h.store.save_calls.load(Ordering::SeqCst), 0);
        assert!(h.notifier.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_removes_the_record() {
        let h = harness(true, true);
        let created = h.service.create(input()).await.unwrap();

        h.service.delete(created.id).await.unwrap();
        let err = h.service.get_by_id(created.id).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));

        let err = h.service.delete(created.id).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn notification_failure_surfaces_after_the_record_is_saved() {
        let store = Arc::new(MemStore::default());
        let service = EmployeeService::new(
            store.clone(),
            Arc::new(StaticVerifier(true)),
            Arc::new(StaticVerifier(true)),
            Arc::new(FailingNotifier),
        );

        let err = service.create(input()).await.unwrap_err();
        assert!(matches!(err, ApiError::Internal(_)));
        // The save is not rolled back.
        assert_eq!(store.rows.lock().unwrap().len(), 1);
    }
}
