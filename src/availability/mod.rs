//! Availability set builder.
//!
//! Turns calendar gestures into batch create and delete calls against the
//! backend, keeping the pending selections consistent with what is loaded.

mod selection;

pub use selection::*;

use chrono::NaiveDate;

use crate::api::AvailabilityApi;
use crate::errors::AppError;
use crate::models::{AvailabilitySlot, AvailabilityWindow, CreateAvailabilityRequest};

/// A professional's availability calendar and its pending selections.
pub struct AvailabilityManager<B> {
    api: B,
    professional_id: String,
    slots: Vec<AvailabilitySlot>,
    selection: DateSelection,
    to_delete: SlotSelection,
}

impl<B: AvailabilityApi> AvailabilityManager<B> {
    pub fn new(api: B, professional_id: impl Into<String>) -> Self {
        Self {
            api,
            professional_id: professional_id.into(),
            slots: Vec::new(),
            selection: DateSelection::new(),
            to_delete: SlotSelection::new(),
        }
    }

    pub fn professional_id(&self) -> &str {
        &self.professional_id
    }

    /// Slots as of the last successful load, ordered by date then start time.
    pub fn slots(&self) -> &[AvailabilitySlot] {
        &self.slots
    }

    pub fn selected_dates(&self) -> &[NaiveDate] {
        self.selection.dates()
    }

    pub fn last_clicked_date(&self) -> Option<NaiveDate> {
        self.selection.last_clicked()
    }

    pub fn slots_to_delete(&self) -> &SlotSelection {
        &self.to_delete
    }

    /// Fetch the professional's slots and prune stale delete selections.
    pub async fn load(&mut self) -> Result<&[AvailabilitySlot], AppError> {
        let mut slots = self.api.list_availability(&self.professional_id).await?;
        slots.sort_by(|a, b| {
            a.date
                .cmp(&b.date)
                .then_with(|| a.start_time.cmp(&b.start_time))
        });

        tracing::debug!(
            professional_id = %self.professional_id,
            count = slots.len(),
            "Loaded availability"
        );

        self.slots = slots;
        self.to_delete.retain_loaded(&self.slots);
        Ok(&self.slots)
    }

    /// Reload after a confirmed mutation. A failure here leaves the previous
    /// slot list in place; the mutation itself already went through.
    async fn reload(&mut self) {
        if let Err(e) = self.load().await {
            tracing::warn!("Failed to reload availability: {}", e);
        }
    }

    /// Replace the date selection wholesale.
    pub fn handle_date_select(&mut self, dates: Option<Vec<NaiveDate>>) {
        self.selection.select(dates);
    }

    pub fn handle_day_click(&mut self, day: NaiveDate, range_modifier: bool, disabled: bool) {
        self.selection.click_day(day, range_modifier, disabled);
    }

    /// Create one slot per selected date in a single request.
    ///
    /// Clears the selection and reloads once the backend confirms. On failure
    /// the selection is kept so the user can retry.
    pub async fn handle_add_availability(
        &mut self,
        window: &AvailabilityWindow,
    ) -> Result<Vec<AvailabilitySlot>, AppError> {
        if self.selection.is_empty() {
            return Err(AppError::Validation(
                "Select at least one date".to_string(),
            ));
        }

        let request =
            CreateAvailabilityRequest::new(self.selection.dates(), window, &self.professional_id);

        let created = match self.api.create_availability(&request).await {
            Ok(created) => created,
            Err(e) => {
                tracing::warn!("Failed to add availability: {}", e);
                return Err(e);
            }
        };

        tracing::info!(
            professional_id = %self.professional_id,
            dates = request.dates.len(),
            all_day = request.is_all_day,
            "Availability added"
        );

        self.selection.clear();
        self.reload().await;
        Ok(created)
    }

    /// Flip a persisted slot in or out of the bulk delete set.
    pub fn toggle_slot_selection(&mut self, id: &str) {
        self.to_delete.toggle(id, &self.slots);
    }

    pub fn handle_select_all(&mut self) {
        self.to_delete.toggle_all(&self.slots);
    }

    /// Delete every selected slot in one request. Returns how many were sent.
    pub async fn handle_bulk_delete(&mut self) -> Result<usize, AppError> {
        if self.to_delete.is_empty() {
            return Ok(0);
        }

        let ids = self.to_delete.ids();
        if let Err(e) = self.api.delete_availability_many(&ids).await {
            tracing::warn!("Failed to delete {} slots: {}", ids.len(), e);
            return Err(e);
        }

        tracing::info!(count = ids.len(), "Availability slots deleted");

        self.to_delete.clear();
        self.reload().await;
        Ok(ids.len())
    }

    pub async fn handle_delete_availability(&mut self, id: &str) -> Result<(), AppError> {
        if let Err(e) = self.api.delete_availability(id).await {
            tracing::warn!("Failed to delete slot {}: {}", id, e);
            return Err(e);
        }

        tracing::info!(slot_id = %id, "Availability slot deleted");

        self.to_delete.remove(id);
        self.reload().await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    use super::*;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        List,
        Create(CreateAvailabilityRequest),
        Delete(String),
        DeleteMany(Vec<String>),
    }

    #[derive(Default)]
    struct FakeApi {
        slots: Mutex<Vec<AvailabilitySlot>>,
        calls: Mutex<Vec<Call>>,
        next_id: Mutex<u32>,
        fail: AtomicBool,
    }

    impl FakeApi {
        fn with_slots(dates: &[&str]) -> Self {
            let api = FakeApi::default();
            for (i, d) in dates.iter().enumerate() {
                api.slots.lock().unwrap().push(AvailabilitySlot {
                    id: format!("s{}", i + 1),
                    date: day(d),
                    start_time: "09:00".to_string(),
                    end_time: "17:00".to_string(),
                    professional_id: "pro-1".to_string(),
                });
            }
            *api.next_id.lock().unwrap() = dates.len() as u32;
            api
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn mutations(&self) -> Vec<Call> {
            self.calls()
                .into_iter()
                .filter(|c| *c != Call::List)
                .collect()
        }

        fn check(&self) -> Result<(), AppError> {
            if self.fail.load(Ordering::SeqCst) {
                Err(AppError::Network("connection refused".to_string()))
            } else {
                Ok(())
            }
        }
    }

    impl AvailabilityApi for FakeApi {
        async fn list_availability(
            &self,
            _professional_id: &str,
        ) -> Result<Vec<AvailabilitySlot>, AppError> {
            self.calls.lock().unwrap().push(Call::List);
            self.check()?;
            Ok(self.slots.lock().unwrap().clone())
        }

        async fn create_availability(
            &self,
            request: &CreateAvailabilityRequest,
        ) -> Result<Vec<AvailabilitySlot>, AppError> {
            self.calls.lock().unwrap().push(Call::Create(request.clone()));
            self.check()?;
            let mut created = Vec::new();
            for date in &request.dates {
                let mut next = self.next_id.lock().unwrap();
                *next += 1;
                created.push(AvailabilitySlot {
                    id: format!("s{}", *next),
                    date: day(date),
                    start_time: request.start_time.clone().unwrap_or_else(|| "00:00".into()),
                    end_time: request.end_time.clone().unwrap_or_else(|| "23:59".into()),
                    professional_id: request.professional_id.clone(),
                });
            }
            self.slots.lock().unwrap().extend(created.clone());
            Ok(created)
        }

        async fn delete_availability(&self, id: &str) -> Result<(), AppError> {
            self.calls.lock().unwrap().push(Call::Delete(id.to_string()));
            self.check()?;
            self.slots.lock().unwrap().retain(|s| s.id != id);
            Ok(())
        }

        async fn delete_availability_many(&self, ids: &[String]) -> Result<(), AppError> {
            self.calls.lock().unwrap().push(Call::DeleteMany(ids.to_vec()));
            self.check()?;
            self.slots.lock().unwrap().retain(|s| !ids.contains(&s.id));
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_add_requires_selection() {
        let mut manager = AvailabilityManager::new(FakeApi::default(), "pro-1");
        let err = manager
            .handle_add_availability(&AvailabilityWindow::AllDay)
            .await
            .unwrap_err();
        assert!(err.is_validation());
        assert!(manager.api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_click_range_then_add_all_day() {
        let mut manager = AvailabilityManager::new(FakeApi::default(), "pro-1");

        manager.handle_day_click(day("2024-03-01"), false, false);
        assert_eq!(manager.selected_dates(), &[day("2024-03-01")]);

        manager.handle_day_click(day("2024-03-05"), true, false);
        assert_eq!(manager.selected_dates().len(), 5);

        let created = manager
            .handle_add_availability(&AvailabilityWindow::AllDay)
            .await
            .unwrap();
        assert_eq!(created.len(), 5);

        let mutations = manager.api.mutations();
        assert_eq!(mutations.len(), 1);
        let Call::Create(request) = &mutations[0] else {
            panic!("expected a create call, got {:?}", mutations[0]);
        };
        assert_eq!(
            request.dates,
            vec!["2024-03-01", "2024-03-02", "2024-03-03", "2024-03-04", "2024-03-05"]
        );
        assert!(request.is_all_day);
        assert_eq!(request.start_time, None);
        assert_eq!(request.end_time, None);

        assert!(manager.selected_dates().is_empty());
        assert_eq!(manager.last_clicked_date(), None);
        assert_eq!(manager.slots().len(), 5);
        assert!(manager.slots().iter().all(|s| s.is_all_day()));
    }

    #[tokio::test]
    async fn test_add_failure_keeps_selection() {
        let api = FakeApi::default();
        api.fail.store(true, Ordering::SeqCst);
        let mut manager = AvailabilityManager::new(api, "pro-1");
        manager.handle_day_click(day("2024-03-01"), false, false);

        let window = AvailabilityWindow::hours("09:00", "12:00").unwrap();
        let err = manager.handle_add_availability(&window).await.unwrap_err();

        assert!(!err.is_validation());
        assert_eq!(manager.selected_dates(), &[day("2024-03-01")]);
        assert_eq!(manager.last_clicked_date(), Some(day("2024-03-01")));
        assert!(manager.slots().is_empty());
        // No reload after a failed create.
        assert!(!manager.api.calls().contains(&Call::List));
    }

    #[tokio::test]
    async fn test_load_sorts_by_date() {
        let api = FakeApi::with_slots(&["2024-03-03", "2024-03-01", "2024-03-02"]);
        let mut manager = AvailabilityManager::new(api, "pro-1");
        let dates: Vec<NaiveDate> = manager.load().await.unwrap().iter().map(|s| s.date).collect();
        assert_eq!(dates, vec![day("2024-03-01"), day("2024-03-02"), day("2024-03-03")]);
    }

    #[tokio::test]
    async fn test_select_all_then_bulk_delete() {
        let api = FakeApi::with_slots(&["2024-03-01", "2024-03-02", "2024-03-03"]);
        let mut manager = AvailabilityManager::new(api, "pro-1");
        manager.load().await.unwrap();

        manager.toggle_slot_selection("s2");
        manager.handle_select_all();
        assert_eq!(manager.slots_to_delete().len(), 3);
        manager.handle_select_all();
        assert!(manager.slots_to_delete().is_empty());

        manager.toggle_slot_selection("s1");
        manager.toggle_slot_selection("s3");
        let deleted = manager.handle_bulk_delete().await.unwrap();

        assert_eq!(deleted, 2);
        assert_eq!(
            manager.api.mutations(),
            vec![Call::DeleteMany(vec!["s1".to_string(), "s3".to_string()])]
        );
        assert!(manager.slots_to_delete().is_empty());
        assert_eq!(manager.slots().len(), 1);
        assert_eq!(manager.slots()[0].id, "s2");
    }

    #[tokio::test]
    async fn test_bulk_delete_empty_is_noop() {
        let api = FakeApi::with_slots(&["2024-03-01"]);
        let mut manager = AvailabilityManager::new(api, "pro-1");
        assert_eq!(manager.handle_bulk_delete().await.unwrap(), 0);
        assert!(manager.api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_bulk_delete_failure_keeps_selection() {
        let api = FakeApi::with_slots(&["2024-03-01", "2024-03-02"]);
        let mut manager = AvailabilityManager::new(api, "pro-1");
        manager.load().await.unwrap();
        manager.handle_select_all();

        manager.api.fail.store(true, Ordering::SeqCst);
        assert!(manager.handle_bulk_delete().await.is_err());
        assert_eq!(manager.slots_to_delete().len(), 2);
        assert_eq!(manager.slots().len(), 2);
    }

    #[tokio::test]
    async fn test_single_delete_drops_id_from_bulk_set() {
        let api = FakeApi::with_slots(&["2024-03-01", "2024-03-02"]);
        let mut manager = AvailabilityManager::new(api, "pro-1");
        manager.load().await.unwrap();
        manager.handle_select_all();

        manager.handle_delete_availability("s1").await.unwrap();

        assert!(!manager.slots_to_delete().contains("s1"));
        assert!(manager.slots_to_delete().contains("s2"));
        assert_eq!(manager.slots().len(), 1);
    }

    #[tokio::test]
    async fn test_reload_prunes_slots_deleted_elsewhere() {
        let api = FakeApi::with_slots(&["2024-03-01", "2024-03-02"]);
        let mut manager = AvailabilityManager::new(api, "pro-1");
        manager.load().await.unwrap();
        manager.handle_select_all();

        manager.api.slots.lock().unwrap().retain(|s| s.id != "s2");
        manager.load().await.unwrap();

        assert_eq!(manager.slots_to_delete().ids(), vec!["s1"]);
    }
}
